//! Radix rendering and parsing for register values.
//!
//! Rendering is unpadded: hex is uppercase with no prefix, and zero renders
//! as a single `"0"` in every base.

use std::fmt;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// One of the four bases a register value can be shown or typed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Radix {
    Hex,
    Dec,
    Oct,
    Bin,
}

impl Radix {
    /// All radices in display order.
    pub const ALL: [Radix; 4] = [Radix::Hex, Radix::Dec, Radix::Oct, Radix::Bin];

    /// Numeric base.
    pub const fn base(self) -> u32 {
        match self {
            Radix::Hex => 16,
            Radix::Dec => 10,
            Radix::Oct => 8,
            Radix::Bin => 2,
        }
    }

    /// Literal prefix accepted on input (`None` for decimal).
    pub const fn prefix(self) -> Option<&'static str> {
        match self {
            Radix::Hex => Some("0x"),
            Radix::Dec => None,
            Radix::Oct => Some("0o"),
            Radix::Bin => Some("0b"),
        }
    }

    /// Look up a radix by its short name (`hex`, `dec`, `oct`, `bin`).
    pub fn from_name(name: &str) -> Option<Radix> {
        match name.to_ascii_lowercase().as_str() {
            "hex" => Some(Radix::Hex),
            "dec" => Some(Radix::Dec),
            "oct" => Some(Radix::Oct),
            "bin" => Some(Radix::Bin),
            _ => None,
        }
    }
}

impl fmt::Display for Radix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Radix::Hex => "hex",
            Radix::Dec => "dec",
            Radix::Oct => "oct",
            Radix::Bin => "bin",
        };
        f.write_str(name)
    }
}

/// Errors from typing a value into one of the radix fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseRadixError {
    #[error("empty {0} value")]
    Empty(Radix),

    #[error("invalid {radix} digit '{digit}'")]
    InvalidDigit { radix: Radix, digit: char },

    #[error("misplaced '_' in {0} value")]
    MisplacedSeparator(Radix),
}

/// Render `value` in the given radix.
pub fn render(value: u64, radix: Radix) -> String {
    match radix {
        Radix::Hex => format!("{:X}", value),
        Radix::Dec => format!("{}", value),
        Radix::Oct => format!("{:o}", value),
        Radix::Bin => format!("{:b}", value),
    }
}

/// Parse text typed into a radix field.
///
/// Surrounding whitespace, a leading `+`/`-`, a matching prefix and single
/// `_` separators between digits are allowed. Digits beyond 64 bits wrap and
/// a negative value is stored as its two's complement, so `-5` in the
/// decimal field gives `0xFFFF_FFFF_FFFF_FFFB`.
pub fn parse(text: &str, radix: Radix) -> Result<u64, ParseRadixError> {
    let mut digits = text.trim();
    let negative = digits.starts_with('-');
    if let Some(rest) = digits.strip_prefix('-').or_else(|| digits.strip_prefix('+')) {
        digits = rest;
    }

    let mut after_prefix = false;
    if let Some(prefix) = radix.prefix() {
        if let Some(head) = digits.get(..2) {
            if head.eq_ignore_ascii_case(prefix) {
                digits = &digits[2..];
                after_prefix = true;
            }
        }
    }

    if !separators_valid(digits, after_prefix) {
        return Err(ParseRadixError::MisplacedSeparator(radix));
    }

    let base = radix.base();
    let mut value: u64 = 0;
    let mut seen_digit = false;

    for c in digits.chars() {
        if c == '_' {
            continue;
        }
        let d = c
            .to_digit(base)
            .ok_or(ParseRadixError::InvalidDigit { radix, digit: c })?;
        value = value.wrapping_mul(base as u64).wrapping_add(d as u64);
        seen_digit = true;
    }

    if !seen_digit {
        return Err(ParseRadixError::Empty(radix));
    }
    Ok(if negative { value.wrapping_neg() } else { value })
}

/// Underscores may only sit between two digits, or directly after a radix
/// prefix (`0x_FF`). Shared with the expression lexer.
pub(crate) fn separators_valid(digits: &str, after_prefix: bool) -> bool {
    if digits.ends_with('_') || digits.contains("__") {
        return false;
    }
    after_prefix || !digits.starts_with('_')
}
