//! Inclusive bit ranges and their masks.

use crate::register::{check_index, RegisterError};

/// An inclusive pair of bit indices `[low, high]`, both in `0..=63`.
///
/// Construction normalizes the pair, so `BitRange::new(7, 4)` and
/// `BitRange::new(4, 7)` describe the same field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitRange {
    low: u32,
    high: u32,
}

impl BitRange {
    /// Validate both indices and order them.
    pub fn new(a: u32, b: u32) -> Result<Self, RegisterError> {
        let a = check_index(a)?;
        let b = check_index(b)?;
        let (low, high) = if a > b { (b, a) } else { (a, b) };
        Ok(Self { low, high })
    }

    /// The whole register, bits 0 through 63.
    pub const fn full() -> Self {
        Self { low: 0, high: 63 }
    }

    #[inline]
    pub const fn low(&self) -> u32 {
        self.low
    }

    #[inline]
    pub const fn high(&self) -> u32 {
        self.high
    }

    /// Number of bits covered (1 to 64).
    #[inline]
    pub const fn width(&self) -> u32 {
        self.high - self.low + 1
    }

    /// Build the mask with exactly bits `low..=high` set.
    ///
    /// Accumulates `width` ones by shift-and-or, then moves the block up to
    /// `low`. Recomputed on every call.
    pub fn mask(&self) -> u64 {
        let mut mask: u64 = 0;
        for _ in 0..self.width() {
            mask = (mask << 1) | 1;
        }
        mask << self.low
    }
}

/// Mask with bits `low..=high` set. Argument order does not matter.
pub fn range_mask(low: u32, high: u32) -> Result<u64, RegisterError> {
    Ok(BitRange::new(low, high)?.mask())
}
