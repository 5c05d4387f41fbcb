//! An interactive session: one register plus the calculator transcript.
//!
//! Front-ends (REPL, TUI, WASM) drive the register through [`Session`]. Range
//! bounds and shift amounts arrive as text, so the small command language
//! accepted by [`Session::execute`] lives here too:
//!
//! ```text
//! set <expr>            replace the value with an expression result
//! bit <i> [on|off|toggle]
//! extract <lo> <hi>     pull bits lo..=hi down to bit 0
//! zero <lo> <hi>        clear bits lo..=hi
//! one <lo> <hi>         set bits lo..=hi
//! toggle <lo> <hi>      invert bits lo..=hi
//! shl <n> / shr <n>     logical shifts
//! all0 / all1 / invert  whole-register operations
//! hex|dec|oct|bin <v>   type the value in a given base
//! clear                 clear the transcript
//! <anything else>       evaluated as an expression
//! ```

use std::fmt;
use serde::{Serialize, Deserialize};
use thiserror::Error;
use crate::expr::{evaluate, evaluate_full, EvalError, Evaluation};
use crate::register::{ParseRadixError, Radix, Register, RegisterError};

/// One line of calculator history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum TranscriptEntry {
    /// What the user typed.
    Input(String),
    /// The raw (unmasked) result.
    Output(String),
    /// Why the input was rejected.
    Error(String),
}

impl fmt::Display for TranscriptEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranscriptEntry::Input(text) => write!(f, "<<< {}", text),
            TranscriptEntry::Output(text) => write!(f, ">>> {}", text),
            TranscriptEntry::Error(text) => write!(f, ">>> error: {}", text),
        }
    }
}

/// The register value rendered in every base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub value: u64,
    pub hex: String,
    pub dec: String,
    pub oct: String,
    pub bin: String,
}

impl Snapshot {
    pub fn of(reg: &Register) -> Self {
        Self {
            value: reg.get(),
            hex: reg.to_hex(),
            dec: reg.to_dec(),
            oct: reg.to_oct(),
            bin: reg.to_bin(),
        }
    }
}

/// What a successful command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The register now holds this value.
    Value(u64),
    /// An expression was evaluated and stored.
    Calculated(Evaluation),
    /// The transcript was emptied.
    TranscriptCleared,
}

/// Errors from the session command language.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("{command}: missing {argument}")]
    MissingArgument { command: &'static str, argument: &'static str },

    #[error("{command}: unexpected argument '{text}'")]
    UnexpectedArgument { command: &'static str, text: String },

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("expected on, off or toggle, got '{0}'")]
    InvalidBitState(String),

    #[error(transparent)]
    Register(#[from] RegisterError),

    #[error(transparent)]
    Radix(#[from] ParseRadixError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// A register owned by one user, with its calculator history.
#[derive(Debug, Clone, Default)]
pub struct Session {
    register: Register,
    transcript: Vec<TranscriptEntry>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: u64) -> Self {
        Self {
            register: Register::with_value(value),
            transcript: Vec::new(),
        }
    }

    pub fn register(&self) -> &Register {
        &self.register
    }

    pub fn register_mut(&mut self) -> &mut Register {
        &mut self.register
    }

    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    pub fn clear_transcript(&mut self) {
        self.transcript.clear();
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::of(&self.register)
    }

    /// Evaluate calculator input and store the masked result.
    ///
    /// Input and result (or error) are appended to the transcript. The
    /// register is only written after a fully successful evaluation.
    pub fn calculate(&mut self, input: &str) -> Result<Evaluation, EvalError> {
        let input = input.trim();
        self.transcript.push(TranscriptEntry::Input(input.to_string()));

        match evaluate_full(input) {
            Ok(result) => {
                log::debug!("calculated {:?} = {} (stored 0x{:X})", input, result, result.value());
                self.transcript.push(TranscriptEntry::Output(result.to_string()));
                self.register.set(result.value());
                Ok(result)
            }
            Err(e) => {
                log::warn!("rejected expression {:?}: {}", input, e);
                self.transcript.push(TranscriptEntry::Error(e.to_string()));
                Err(e)
            }
        }
    }

    /// Run one line of the command language.
    pub fn execute(&mut self, line: &str) -> Result<Outcome, CommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let mut args = Args::new(word, rest);

        match word.to_ascii_lowercase().as_str() {
            "set" => {
                let value = evaluate(args.remainder("expression")?)?;
                self.register.set(value);
            }
            "bit" => {
                let index = args.index("bit index")?;
                let state = args.optional().map(|s| s.to_ascii_lowercase());
                args.finish()?;
                match state.as_deref() {
                    None | Some("toggle") | Some("r") => {
                        self.register.toggle_bit(index)?;
                    }
                    Some("on") | Some("1") => self.register.set_bit(index, true)?,
                    Some("off") | Some("0") => self.register.set_bit(index, false)?,
                    Some(other) => return Err(CommandError::InvalidBitState(other.to_string())),
                }
            }
            "extract" | "zero" | "one" | "toggle" => {
                let low = args.index("low bit")?;
                let high = args.index("high bit")?;
                args.finish()?;
                match word.to_ascii_lowercase().as_str() {
                    "extract" => self.register.extract_range(low, high)?,
                    "zero" => self.register.zero_range(low, high)?,
                    "one" => self.register.one_range(low, high)?,
                    _ => self.register.toggle_range(low, high)?,
                }
            }
            "shl" | "shr" => {
                let n = args.index("shift amount")?;
                args.finish()?;
                if word.eq_ignore_ascii_case("shl") {
                    self.register.shift_left(n);
                } else {
                    self.register.shift_right(n);
                }
            }
            "all0" => {
                args.finish()?;
                self.register.clear();
            }
            "all1" => {
                args.finish()?;
                self.register.fill();
            }
            "invert" | "allr" => {
                args.finish()?;
                self.register.invert();
            }
            "clear" => {
                args.finish()?;
                self.clear_transcript();
                return Ok(Outcome::TranscriptCleared);
            }
            name => match Radix::from_name(name).filter(|_| !rest.is_empty()) {
                Some(radix) => self.register.set_from_str(rest, radix)?,
                None => return Ok(Outcome::Calculated(self.calculate(line)?)),
            },
        }

        log::debug!("{:?} -> 0x{:X}", line, self.register.get());
        Ok(Outcome::Value(self.register.get()))
    }
}

/// Positional arguments of one command line.
struct Args<'a> {
    command: &'static str,
    rest: &'a str,
    words: std::str::SplitWhitespace<'a>,
}

impl<'a> Args<'a> {
    fn new(word: &str, rest: &'a str) -> Self {
        Self {
            command: command_name(word),
            rest,
            words: rest.split_whitespace(),
        }
    }

    fn optional(&mut self) -> Option<&'a str> {
        self.words.next()
    }

    fn required(&mut self, argument: &'static str) -> Result<&'a str, CommandError> {
        self.optional().ok_or(CommandError::MissingArgument { command: self.command, argument })
    }

    /// A bit index or shift amount; range is checked by the register.
    fn index(&mut self, argument: &'static str) -> Result<u32, CommandError> {
        let text = self.required(argument)?;
        text.parse::<u32>().map_err(|_| CommandError::InvalidNumber(text.to_string()))
    }

    /// Everything after the command word.
    fn remainder(&mut self, argument: &'static str) -> Result<&'a str, CommandError> {
        if self.rest.is_empty() {
            return Err(CommandError::MissingArgument { command: self.command, argument });
        }
        Ok(self.rest)
    }

    fn finish(&mut self) -> Result<(), CommandError> {
        match self.words.next() {
            Some(text) => Err(CommandError::UnexpectedArgument {
                command: self.command,
                text: text.to_string(),
            }),
            None => Ok(()),
        }
    }
}

fn command_name(word: &str) -> &'static str {
    const NAMES: [&str; 12] = [
        "set", "bit", "extract", "zero", "one", "toggle", "shl", "shr", "all0", "all1", "invert", "clear",
    ];
    NAMES
        .iter()
        .find(|n| n.eq_ignore_ascii_case(word))
        .copied()
        .unwrap_or("command")
}
