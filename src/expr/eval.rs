//! Post-order evaluation of parsed expressions.

use std::fmt;
use crate::expr::parser::{parse, BinaryOp, Expr, UnaryOp};
use crate::expr::EvalError;

/// The result of a successful evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    raw: i128,
}

impl Evaluation {
    /// The unmasked result, as shown in the transcript.
    pub const fn raw(&self) -> i128 {
        self.raw
    }

    /// The low 64 bits of the result (two's complement for negatives).
    pub const fn value(&self) -> u64 {
        self.raw as u64
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Evaluate `input` and return the result masked to 64 bits.
pub fn evaluate(input: &str) -> Result<u64, EvalError> {
    evaluate_full(input).map(|e| e.value())
}

/// Evaluate `input`, keeping the raw result alongside the masked value.
pub fn evaluate_full(input: &str) -> Result<Evaluation, EvalError> {
    let expr = parse(input)?;
    let raw = eval(&expr)?;
    Ok(Evaluation { raw })
}

fn eval(expr: &Expr) -> Result<i128, EvalError> {
    match expr {
        Expr::Literal(n) => Ok(*n),
        Expr::Unary(op, operand) => {
            let v = eval(operand)?;
            match op {
                UnaryOp::Neg => v.checked_neg().ok_or(EvalError::Overflow),
                UnaryOp::Pos => Ok(v),
                UnaryOp::Not => Ok(!v),
            }
        }
        Expr::Binary(op, lhs, rhs) => {
            let a = eval(lhs)?;
            let b = eval(rhs)?;
            apply(*op, a, b)
        }
    }
}

fn apply(op: BinaryOp, a: i128, b: i128) -> Result<i128, EvalError> {
    match op {
        BinaryOp::Add => a.checked_add(b).ok_or(EvalError::Overflow),
        BinaryOp::Sub => a.checked_sub(b).ok_or(EvalError::Overflow),
        BinaryOp::Mul => a.checked_mul(b).ok_or(EvalError::Overflow),
        BinaryOp::Div => floor_div(a, b),
        BinaryOp::Rem => floor_rem(a, b),
        BinaryOp::Pow => pow(a, b),
        BinaryOp::Shl => shl(a, b),
        BinaryOp::Shr => shr(a, b),
        BinaryOp::And => Ok(a & b),
        BinaryOp::Xor => Ok(a ^ b),
        BinaryOp::Or => Ok(a | b),
    }
}

/// Division rounding toward negative infinity.
fn floor_div(a: i128, b: i128) -> Result<i128, EvalError> {
    if b == 0 {
        return Err(EvalError::DivideByZero);
    }
    let q = a.checked_div(b).ok_or(EvalError::Overflow)?;
    if a % b != 0 && ((a < 0) != (b < 0)) {
        Ok(q - 1)
    } else {
        Ok(q)
    }
}

/// Remainder with the sign of the divisor, paired with [`floor_div`].
fn floor_rem(a: i128, b: i128) -> Result<i128, EvalError> {
    if b == 0 {
        return Err(EvalError::DivideByZero);
    }
    if b == -1 {
        return Ok(0);
    }
    let r = a % b;
    if r != 0 && ((r < 0) != (b < 0)) {
        Ok(r + b)
    } else {
        Ok(r)
    }
}

fn pow(base: i128, exp: i128) -> Result<i128, EvalError> {
    if exp < 0 {
        return Err(EvalError::NegativeExponent);
    }
    match base {
        0 => return Ok(if exp == 0 { 1 } else { 0 }),
        1 => return Ok(1),
        -1 => return Ok(if exp % 2 == 0 { 1 } else { -1 }),
        _ => {}
    }
    // |base| >= 2, so anything past 127 cannot fit
    let exp = u32::try_from(exp).map_err(|_| EvalError::Overflow)?;
    if exp > 127 {
        return Err(EvalError::Overflow);
    }
    base.checked_pow(exp).ok_or(EvalError::Overflow)
}

fn shl(a: i128, n: i128) -> Result<i128, EvalError> {
    if n < 0 {
        return Err(EvalError::NegativeShift);
    }
    if a == 0 {
        return Ok(0);
    }
    if n >= 127 {
        return Err(EvalError::Overflow);
    }
    let n = n as u32;
    let shifted = a << n;
    if shifted >> n != a {
        return Err(EvalError::Overflow);
    }
    Ok(shifted)
}

fn shr(a: i128, n: i128) -> Result<i128, EvalError> {
    if n < 0 {
        return Err(EvalError::NegativeShift);
    }
    if n >= 128 {
        return Ok(if a < 0 { -1 } else { 0 });
    }
    Ok(a >> n as u32)
}
