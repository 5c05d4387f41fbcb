//! # Bitable
//!
//! An interactive 64-bit register inspector and bitwise calculator.
//!
//! A single unsigned 64-bit value can be read and changed bit by bit, by
//! contiguous bit range, by shifts, or by typing an integer expression. The
//! value is always kept masked to 64 bits and is never read as signed.

pub mod register;
pub mod expr;
pub mod session;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use register::{range_mask, BitRange, Radix, Register, RegisterError, MASK64};
pub use expr::{evaluate, evaluate_full, EvalError, Evaluation};
pub use session::{CommandError, Outcome, Session, Snapshot, TranscriptEntry};

#[cfg(feature = "tui")]
pub use tui::run_inspector;
