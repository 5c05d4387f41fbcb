//! End-to-end register scenarios through the public API.

use bitable::{evaluate, range_mask, CommandError, EvalError, Outcome, Register, Session};
use proptest::prelude::*;

#[test]
fn set_bit_zero_from_empty() {
    let mut reg = Register::new();
    reg.set_bit(0, true).unwrap();
    assert_eq!(reg.get(), 1);
    assert_eq!(reg.to_hex(), "1");
}

#[test]
fn zero_high_nibble() {
    let mut reg = Register::with_value(0xFF);
    reg.zero_range(4, 7).unwrap();
    assert_eq!(reg.get(), 0x0F);
}

#[test]
fn one_whole_register() {
    let mut reg = Register::new();
    reg.one_range(0, 63).unwrap();
    assert_eq!(reg.get(), 0xFFFF_FFFF_FFFF_FFFF);
}

#[test]
fn shift_nibble_up() {
    let mut reg = Register::with_value(0x0F);
    reg.shift_left(4);
    assert_eq!(reg.get(), 0xF0);
}

#[test]
fn evaluate_mixed_literals() {
    assert_eq!(evaluate("0x10 + 2*3"), Ok(22));
    assert_eq!(evaluate("0b1010 | 0o20"), Ok(0b1_1010));
}

#[test]
fn divide_by_zero_leaves_register() {
    let mut session = Session::with_value(0xABCD);
    assert_eq!(session.calculate("5/0"), Err(EvalError::DivideByZero));
    assert_eq!(session.register().get(), 0xABCD);

    let transcript: Vec<String> = session.transcript().iter().map(|e| e.to_string()).collect();
    assert_eq!(transcript, vec!["<<< 5/0", ">>> error: division by zero"]);
}

#[test]
fn oversized_expression_leaves_register() {
    let mut session = Session::with_value(7);
    let chain = format!("{}1", "1+".repeat(100_000));
    assert!(session.calculate(&chain).unwrap_err().is_syntax());
    assert_eq!(session.register().get(), 7);
}

#[test]
fn signed_radix_field_input() {
    let mut session = Session::new();
    session.execute("dec -5").unwrap();
    assert_eq!(session.register().get(), 0xFFFF_FFFF_FFFF_FFFB);

    assert!(session.execute("dec 5__0").is_err());
    assert_eq!(session.register().get(), 0xFFFF_FFFF_FFFF_FFFB);
}

#[test]
fn session_walkthrough() {
    let mut session = Session::new();
    session.execute("set 0xDEAD_BEEF").unwrap();
    session.execute("extract 8 15").unwrap();
    assert_eq!(session.register().to_hex(), "BE");

    session.execute("shl 56").unwrap();
    assert_eq!(session.register().get(), 0xBE00_0000_0000_0000);

    session.execute("shr 60").unwrap();
    assert_eq!(session.register().get(), 0xB);

    let outcome = session.execute("~0").unwrap();
    assert!(matches!(outcome, Outcome::Calculated(e) if e.raw() == -1));
    assert_eq!(session.register().get(), u64::MAX);

    assert_eq!(
        session.execute("toggle 0 99"),
        Err(CommandError::Register(bitable::RegisterError::BitOutOfRange(99)))
    );
    assert_eq!(session.register().get(), u64::MAX);
}

#[derive(Debug, Clone)]
enum Op {
    Set(u64),
    Bit(u32, bool),
    Extract(u32, u32),
    Zero(u32, u32),
    One(u32, u32),
    Toggle(u32, u32),
    Shl(u32),
    Shr(u32),
    Invert,
}

fn arb_op() -> impl Strategy<Value = Op> {
    let idx = || 0u32..64;
    prop_oneof![
        any::<u64>().prop_map(Op::Set),
        (idx(), any::<bool>()).prop_map(|(i, on)| Op::Bit(i, on)),
        (idx(), idx()).prop_map(|(a, b)| Op::Extract(a, b)),
        (idx(), idx()).prop_map(|(a, b)| Op::Zero(a, b)),
        (idx(), idx()).prop_map(|(a, b)| Op::One(a, b)),
        (idx(), idx()).prop_map(|(a, b)| Op::Toggle(a, b)),
        (0u32..200).prop_map(Op::Shl),
        (0u32..200).prop_map(Op::Shr),
        Just(Op::Invert),
    ]
}

/// Model of each op on a u128 so anything above bit 63 would show up.
fn model(value: u64, op: &Op) -> u64 {
    let v = value as u128;
    let mask = |a: u32, b: u32| range_mask(a, b).unwrap() as u128;
    let next = match *op {
        Op::Set(x) => x as u128,
        Op::Bit(i, true) => v | (1u128 << i),
        Op::Bit(i, false) => v & !(1u128 << i),
        Op::Extract(a, b) => (v & mask(a, b)) >> a.min(b),
        Op::Zero(a, b) => v & !mask(a, b),
        Op::One(a, b) => v | mask(a, b),
        Op::Toggle(a, b) => v ^ mask(a, b),
        Op::Shl(n) => if n >= 128 { 0 } else { v << n },
        Op::Shr(n) => if n >= 128 { 0 } else { v >> n },
        Op::Invert => v ^ (u64::MAX as u128),
    };
    (next & u64::MAX as u128) as u64
}

proptest! {
    #[test]
    fn register_tracks_masked_model(ops in prop::collection::vec(arb_op(), 1..40)) {
        let mut reg = Register::new();
        let mut expected = 0u64;
        for op in &ops {
            match *op {
                Op::Set(x) => reg.set(x),
                Op::Bit(i, on) => reg.set_bit(i, on).unwrap(),
                Op::Extract(a, b) => reg.extract_range(a, b).unwrap(),
                Op::Zero(a, b) => reg.zero_range(a, b).unwrap(),
                Op::One(a, b) => reg.one_range(a, b).unwrap(),
                Op::Toggle(a, b) => reg.toggle_range(a, b).unwrap(),
                Op::Shl(n) => reg.shift_left(n),
                Op::Shr(n) => reg.shift_right(n),
                Op::Invert => reg.invert(),
            }
            expected = model(expected, op);
            prop_assert_eq!(reg.get(), expected);
        }
    }

    #[test]
    fn calculate_decimal_rendering_roundtrip(v: u64) {
        let mut session = Session::new();
        let rendered = bitable::Register::with_value(v).to_dec();
        prop_assert_eq!(session.calculate(&rendered).map(|e| e.value()), Ok(v));
        prop_assert_eq!(session.register().get(), v);
    }
}
