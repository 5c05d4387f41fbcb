//! The 64-bit register.
//!
//! Every mutator funnels through [`Register::set`], so the stored value is
//! always masked to 64 bits before anyone can observe it.

use std::fmt;
use serde::{Serialize, Deserialize};
use crate::register::{check_index, format, BitRange, Radix, RegisterError, MASK64};

/// A single unsigned 64-bit value under inspection.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Register {
    value: u64,
}

impl Register {
    /// Create a register holding zero.
    pub const fn new() -> Self {
        Self { value: 0 }
    }

    /// Create a register holding `value`.
    pub const fn with_value(value: u64) -> Self {
        Self { value: value & MASK64 }
    }

    /// Replace the value.
    #[inline]
    pub fn set(&mut self, value: u64) {
        self.value = value & MASK64;
    }

    /// Current value.
    #[inline]
    pub const fn get(&self) -> u64 {
        self.value
    }

    // ========================================================================
    // Single bits
    // ========================================================================

    /// Read bit `index` (0 = LSB).
    pub fn get_bit(&self, index: u32) -> Result<bool, RegisterError> {
        let index = check_index(index)?;
        Ok((self.value >> index) & 1 == 1)
    }

    /// Set or clear bit `index`.
    pub fn set_bit(&mut self, index: u32, on: bool) -> Result<(), RegisterError> {
        let index = check_index(index)?;
        let bit = 1u64 << index;
        let value = if on { self.value | bit } else { self.value & !bit };
        self.set(value);
        Ok(())
    }

    /// Flip bit `index`, returning its new state.
    pub fn toggle_bit(&mut self, index: u32) -> Result<bool, RegisterError> {
        let on = !self.get_bit(index)?;
        self.set_bit(index, on)?;
        Ok(on)
    }

    // ========================================================================
    // Ranges
    // ========================================================================

    /// Pull bits `low..=high` down to bit 0, discarding everything else.
    pub fn extract_range(&mut self, low: u32, high: u32) -> Result<(), RegisterError> {
        let range = BitRange::new(low, high)?;
        self.set((self.value & range.mask()) >> range.low());
        Ok(())
    }

    /// Clear bits `low..=high`.
    pub fn zero_range(&mut self, low: u32, high: u32) -> Result<(), RegisterError> {
        let mask = BitRange::new(low, high)?.mask();
        self.set(self.value & !mask);
        Ok(())
    }

    /// Set bits `low..=high`.
    pub fn one_range(&mut self, low: u32, high: u32) -> Result<(), RegisterError> {
        let mask = BitRange::new(low, high)?.mask();
        self.set(self.value | mask);
        Ok(())
    }

    /// Invert bits `low..=high`.
    pub fn toggle_range(&mut self, low: u32, high: u32) -> Result<(), RegisterError> {
        let mask = BitRange::new(low, high)?.mask();
        self.set(self.value ^ mask);
        Ok(())
    }

    // ========================================================================
    // Whole register
    // ========================================================================

    /// All bits to 0.
    pub fn clear(&mut self) {
        self.set(0);
    }

    /// All bits to 1.
    pub fn fill(&mut self) {
        self.set(MASK64);
    }

    /// Invert every bit. Same as `toggle_range(0, 63)`.
    pub fn invert(&mut self) {
        self.set(self.value ^ BitRange::full().mask());
    }

    // ========================================================================
    // Shifts
    // ========================================================================

    /// Logical shift left. Bits past bit 63 are dropped; `n >= 64` gives 0.
    pub fn shift_left(&mut self, n: u32) {
        self.set(self.value.checked_shl(n).unwrap_or(0));
    }

    /// Logical shift right. Never sign-extends; `n >= 64` gives 0.
    pub fn shift_right(&mut self, n: u32) {
        self.set(self.value.checked_shr(n).unwrap_or(0));
    }

    // ========================================================================
    // Formatting
    // ========================================================================

    /// Replace the value with text typed in the given radix.
    ///
    /// On error the register is left untouched.
    pub fn set_from_str(&mut self, text: &str, radix: Radix) -> Result<(), format::ParseRadixError> {
        let value = format::parse(text, radix)?;
        self.set(value);
        Ok(())
    }

    /// Render in the given radix.
    pub fn render(&self, radix: Radix) -> String {
        format::render(self.value, radix)
    }

    /// Uppercase hexadecimal, no prefix.
    pub fn to_hex(&self) -> String {
        self.render(Radix::Hex)
    }

    pub fn to_dec(&self) -> String {
        self.render(Radix::Dec)
    }

    pub fn to_oct(&self) -> String {
        self.render(Radix::Oct)
    }

    pub fn to_bin(&self) -> String {
        self.render(Radix::Bin)
    }

    /// All 64 bits as a string, MSB first, grouped by nibble.
    pub fn to_bit_grid(&self) -> String {
        let mut out = String::with_capacity(79);
        for i in (0..64).rev() {
            out.push(if (self.value >> i) & 1 == 1 { '1' } else { '0' });
            if i % 4 == 0 && i != 0 {
                out.push(' ');
            }
        }
        out
    }
}

impl From<u64> for Register {
    fn from(value: u64) -> Self {
        Self::with_value(value)
    }
}

impl fmt::Debug for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Register(0x{:016X})", self.value)
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::register::range_mask;
    use proptest::prelude::*;

    #[test]
    fn test_set_bit_zero() {
        let mut reg = Register::new();
        reg.set_bit(0, true).unwrap();
        assert_eq!(reg.get(), 1);
        assert_eq!(reg.to_hex(), "1");
    }

    #[test]
    fn test_set_and_clear_bit() {
        let mut reg = Register::with_value(0);
        reg.set_bit(63, true).unwrap();
        assert_eq!(reg.get(), 0x8000_0000_0000_0000);
        assert!(reg.get_bit(63).unwrap());
        reg.set_bit(63, false).unwrap();
        assert_eq!(reg.get(), 0);
    }

    #[test]
    fn test_bit_index_out_of_range() {
        let mut reg = Register::with_value(0xAA);
        assert_eq!(reg.get_bit(64), Err(RegisterError::BitOutOfRange(64)));
        assert_eq!(reg.set_bit(70, true), Err(RegisterError::BitOutOfRange(70)));
        assert_eq!(reg.zero_range(0, 64), Err(RegisterError::BitOutOfRange(64)));
        assert_eq!(reg.get(), 0xAA);
    }

    #[test]
    fn test_toggle_bit() {
        let mut reg = Register::new();
        assert!(reg.toggle_bit(3).unwrap());
        assert_eq!(reg.get(), 8);
        assert!(!reg.toggle_bit(3).unwrap());
        assert_eq!(reg.get(), 0);
    }

    #[test]
    fn test_zero_range() {
        let mut reg = Register::with_value(0xFF);
        reg.zero_range(4, 7).unwrap();
        assert_eq!(reg.get(), 0x0F);
    }

    #[test]
    fn test_one_range_full() {
        let mut reg = Register::new();
        reg.one_range(0, 63).unwrap();
        assert_eq!(reg.get(), 0xFFFF_FFFF_FFFF_FFFF);
    }

    #[test]
    fn test_extract_range() {
        let mut reg = Register::with_value(0xDEAD_BEEF);
        reg.extract_range(8, 15).unwrap();
        assert_eq!(reg.get(), 0xBE);

        // Inverted bounds select the same field
        let mut reg = Register::with_value(0xDEAD_BEEF);
        reg.extract_range(31, 16).unwrap();
        assert_eq!(reg.get(), 0xDEAD);
    }

    #[test]
    fn test_shift_left() {
        let mut reg = Register::with_value(0x0F);
        reg.shift_left(4);
        assert_eq!(reg.get(), 0xF0);

        let mut reg = Register::with_value(0xF000_0000_0000_0001);
        reg.shift_left(4);
        assert_eq!(reg.get(), 0x10);
    }

    #[test]
    fn test_shift_right_is_logical() {
        let mut reg = Register::with_value(0x8000_0000_0000_0000);
        reg.shift_right(63);
        assert_eq!(reg.get(), 1);
    }

    #[test]
    fn test_whole_register_ops() {
        let mut reg = Register::with_value(0x1234);
        reg.invert();
        assert_eq!(reg.get(), !0x1234u64);
        reg.fill();
        assert_eq!(reg.get(), u64::MAX);
        reg.clear();
        assert_eq!(reg.get(), 0);
    }

    #[test]
    fn test_formatting() {
        let reg = Register::with_value(255);
        assert_eq!(reg.to_hex(), "FF");
        assert_eq!(reg.to_dec(), "255");
        assert_eq!(reg.to_oct(), "377");
        assert_eq!(reg.to_bin(), "11111111");
        assert_eq!(Register::new().to_bin(), "0");
    }

    #[test]
    fn test_set_from_str_keeps_value_on_error() {
        let mut reg = Register::with_value(7);
        assert!(reg.set_from_str("xyz", Radix::Dec).is_err());
        assert_eq!(reg.get(), 7);
        reg.set_from_str("7f", Radix::Hex).unwrap();
        assert_eq!(reg.get(), 0x7F);
        assert!(reg.set_from_str("_7f", Radix::Hex).is_err());
        reg.set_from_str("-1", Radix::Dec).unwrap();
        assert_eq!(reg.get(), u64::MAX);
    }

    #[test]
    fn test_bit_grid() {
        let reg = Register::with_value(0x8000_0000_0000_0001);
        let grid = reg.to_bit_grid();
        assert_eq!(grid.len(), 79);
        assert!(grid.starts_with("1000 0000"));
        assert!(grid.ends_with("0000 0001"));
    }

    fn arb_index() -> impl Strategy<Value = u32> {
        0u32..64
    }

    proptest! {
        #[test]
        fn prop_mask_is_contiguous(a in arb_index(), b in arb_index()) {
            let (low, high) = if a > b { (b, a) } else { (a, b) };
            let mask = range_mask(a, b).unwrap();
            prop_assert_eq!(mask, range_mask(b, a).unwrap());
            prop_assert_eq!(mask.count_ones(), high - low + 1);
            prop_assert_eq!(mask.trailing_zeros(), low);
            // Contiguous: shifting the block down leaves a run of ones
            let block = mask >> low;
            prop_assert_eq!(block & block.wrapping_add(1), 0);
        }

        #[test]
        fn prop_toggle_involution(v: u64, a in arb_index(), b in arb_index()) {
            let mut reg = Register::with_value(v);
            reg.toggle_range(a, b).unwrap();
            reg.toggle_range(a, b).unwrap();
            prop_assert_eq!(reg.get(), v);
        }

        #[test]
        fn prop_extract_matches_mask(v: u64, a in arb_index(), b in arb_index()) {
            let low = a.min(b);
            let mut reg = Register::with_value(v);
            reg.extract_range(a, b).unwrap();
            prop_assert_eq!(reg.get(), (v & range_mask(a, b).unwrap()) >> low);
        }

        #[test]
        fn prop_shift_saturates(v: u64, n in 64u32..1024) {
            let mut left = Register::with_value(v);
            left.shift_left(n);
            prop_assert_eq!(left.get(), 0);

            let mut right = Register::with_value(v);
            right.shift_right(n);
            prop_assert_eq!(right.get(), 0);
        }

        #[test]
        fn prop_full_toggle_is_complement(v: u64) {
            let mut reg = Register::with_value(v);
            reg.toggle_range(0, 63).unwrap();
            prop_assert_eq!(reg.get(), !v);
        }

        #[test]
        fn prop_render_parse_roundtrip(v: u64) {
            for radix in Radix::ALL {
                let text = format::render(v, radix);
                prop_assert_eq!(format::parse(&text, radix), Ok(v));
            }
        }
    }
}
