//! Closed-grammar integer expression evaluator.
//!
//! Turns calculator input such as `0x10 + 2*3` into an integer. Only integer
//! literals and the operators below are understood; there are no names,
//! calls or any other way for input text to reach the host.
//!
//! Precedence, highest first:
//!
//! | operators        | associativity |
//! |------------------|---------------|
//! | `**`             | right         |
//! | unary `-` `+` `~`| prefix        |
//! | `*` `/` `//` `%` | left          |
//! | `+` `-`          | left          |
//! | `<<` `>>`        | left          |
//! | `&`              | left          |
//! | `^`              | left          |
//! | `\|`             | left          |
//!
//! Arithmetic runs on a signed 128-bit intermediate with floor division;
//! the caller gets both the raw result and its low 64 bits.

mod lexer;
mod parser;
mod eval;

pub use lexer::{tokenize, Token, TokenKind};
pub use parser::{parse, BinaryOp, Expr, UnaryOp};
pub use eval::{evaluate, evaluate_full, Evaluation};

use thiserror::Error;

/// Reasons an expression fails to evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("empty expression")]
    Empty,

    #[error("syntax error at column {column}: {message}")]
    SyntaxError { column: usize, message: String },

    #[error("division by zero")]
    DivideByZero,

    #[error("integer overflow")]
    Overflow,

    #[error("negative shift count")]
    NegativeShift,

    #[error("negative exponent")]
    NegativeExponent,
}

impl EvalError {
    pub(crate) fn syntax(column: usize, message: impl Into<String>) -> Self {
        EvalError::SyntaxError { column, message: message.into() }
    }

    /// True for malformed input as opposed to an arithmetic fault.
    pub fn is_syntax(&self) -> bool {
        matches!(self, EvalError::Empty | EvalError::SyntaxError { .. })
    }
}
