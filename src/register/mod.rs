//! The 64-bit register engine.
//!
//! This module provides:
//! - [`Register`] - the canonical 64-bit value and its bit, range and shift mutators
//! - [`BitRange`] - an inclusive, normalized pair of bit indices
//! - [`Radix`] - the four display bases and their rendering/parsing helpers

mod bits;
mod range;
pub mod format;

pub use bits::Register;
pub use range::{range_mask, BitRange};
pub use format::{ParseRadixError, Radix};

use thiserror::Error;

/// Width of the register in bits.
pub const WIDTH: u32 = 64;

/// Highest addressable bit index.
pub const MAX_BIT: u32 = WIDTH - 1;

/// All 64 bits set.
pub const MASK64: u64 = 0xFFFF_FFFF_FFFF_FFFF;

/// Errors raised when a caller breaks the register's index contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegisterError {
    #[error("bit index {0} out of range [0, 63]")]
    BitOutOfRange(u32),
}

/// Reject any index outside `0..=63`.
#[inline]
pub(crate) fn check_index(index: u32) -> Result<u32, RegisterError> {
    if index > MAX_BIT {
        Err(RegisterError::BitOutOfRange(index))
    } else {
        Ok(index)
    }
}
