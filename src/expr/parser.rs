//! Recursive-descent parser producing an [`Expr`] tree.
//!
//! Grammar:
//! ```text
//! expr   := xor ( '|' xor )*
//! xor    := and ( '^' and )*
//! and    := shift ( '&' shift )*
//! shift  := sum ( ( '<<' | '>>' ) sum )*
//! sum    := term ( ( '+' | '-' ) term )*
//! term   := unary ( ( '*' | '/' | '%' ) unary )*
//! unary  := ( '-' | '+' | '~' ) unary | power
//! power  := atom ( '**' unary )?
//! atom   := NUMBER | '(' expr ')'
//! ```

use crate::expr::lexer::{tokenize, Token, TokenKind};
use crate::expr::EvalError;

/// Deepest nesting accepted before the parser gives up.
const MAX_DEPTH: usize = 200;

/// Most tokens accepted in one expression. Bounds the depth of the tree that
/// left-associative chains build, and with it evaluation and drop recursion.
const MAX_TOKENS: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Pos,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Pow,
    Mul,
    Div,
    Rem,
    Add,
    Sub,
    Shl,
    Shr,
    And,
    Xor,
    Or,
}

/// A parsed expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Literal(i128),
    Unary(UnaryOp, Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
}

/// Parse a complete expression. Trailing tokens are an error.
pub fn parse(input: &str) -> Result<Expr, EvalError> {
    if input.trim().is_empty() {
        return Err(EvalError::Empty);
    }

    let tokens = tokenize(input)?;
    if let Some(tok) = tokens.get(MAX_TOKENS) {
        return Err(EvalError::syntax(tok.column, "expression too long"));
    }
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
        end_column: input.chars().count() + 1,
    };

    let expr = parser.parse_or()?;
    if let Some(tok) = parser.peek() {
        return Err(EvalError::syntax(
            tok.column,
            format!("unexpected '{}'", tok.kind.symbol()),
        ));
    }
    Ok(expr)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    /// Column reported for errors at end of input.
    end_column: usize,
}

impl Parser {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<Token> {
        let tok = self.peek();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    /// Consume the next token if `pick` maps it to an operator.
    fn eat_op<F>(&mut self, pick: F) -> Option<BinaryOp>
    where
        F: Fn(TokenKind) -> Option<BinaryOp>,
    {
        let op = self.peek().and_then(|t| pick(t.kind))?;
        self.pos += 1;
        Some(op)
    }

    /// Parse a left-associative chain of `next` joined by operators from `pick`.
    fn left_assoc<F>(
        &mut self,
        next: fn(&mut Self) -> Result<Expr, EvalError>,
        pick: F,
    ) -> Result<Expr, EvalError>
    where
        F: Fn(TokenKind) -> Option<BinaryOp>,
    {
        let mut lhs = next(self)?;
        while let Some(op) = self.eat_op(&pick) {
            let rhs = next(self)?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_or(&mut self) -> Result<Expr, EvalError> {
        self.left_assoc(Self::parse_xor, |k| match k {
            TokenKind::Pipe => Some(BinaryOp::Or),
            _ => None,
        })
    }

    fn parse_xor(&mut self) -> Result<Expr, EvalError> {
        self.left_assoc(Self::parse_and, |k| match k {
            TokenKind::Caret => Some(BinaryOp::Xor),
            _ => None,
        })
    }

    fn parse_and(&mut self) -> Result<Expr, EvalError> {
        self.left_assoc(Self::parse_shift, |k| match k {
            TokenKind::Amp => Some(BinaryOp::And),
            _ => None,
        })
    }

    fn parse_shift(&mut self) -> Result<Expr, EvalError> {
        self.left_assoc(Self::parse_sum, |k| match k {
            TokenKind::Shl => Some(BinaryOp::Shl),
            TokenKind::Shr => Some(BinaryOp::Shr),
            _ => None,
        })
    }

    fn parse_sum(&mut self) -> Result<Expr, EvalError> {
        self.left_assoc(Self::parse_term, |k| match k {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            _ => None,
        })
    }

    fn parse_term(&mut self) -> Result<Expr, EvalError> {
        self.left_assoc(Self::parse_unary, |k| match k {
            TokenKind::Star => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Percent => Some(BinaryOp::Rem),
            _ => None,
        })
    }

    fn parse_unary(&mut self) -> Result<Expr, EvalError> {
        let op = match self.peek().map(|t| t.kind) {
            Some(TokenKind::Minus) => UnaryOp::Neg,
            Some(TokenKind::Plus) => UnaryOp::Pos,
            Some(TokenKind::Tilde) => UnaryOp::Not,
            _ => return self.parse_power(),
        };
        self.pos += 1;

        self.enter()?;
        let operand = self.parse_unary();
        self.depth -= 1;
        Ok(Expr::Unary(op, Box::new(operand?)))
    }

    fn parse_power(&mut self) -> Result<Expr, EvalError> {
        let base = self.parse_atom()?;
        if self.eat_op(|k| (k == TokenKind::StarStar).then_some(BinaryOp::Pow)).is_none() {
            return Ok(base);
        }

        // Right operand may carry its own sign: `2 ** -1`, `2 ** 3 ** 2`
        self.enter()?;
        let exponent = self.parse_unary();
        self.depth -= 1;
        Ok(Expr::Binary(BinaryOp::Pow, Box::new(base), Box::new(exponent?)))
    }

    fn parse_atom(&mut self) -> Result<Expr, EvalError> {
        let tok = self
            .advance()
            .ok_or_else(|| EvalError::syntax(self.end_column, "unexpected end of expression"))?;

        match tok.kind {
            TokenKind::Number(n) => Ok(Expr::Literal(n)),
            TokenKind::LParen => {
                self.enter()?;
                let inner = self.parse_or();
                self.depth -= 1;
                let inner = inner?;

                match self.advance() {
                    Some(Token { kind: TokenKind::RParen, .. }) => Ok(inner),
                    Some(other) => Err(EvalError::syntax(
                        other.column,
                        format!("expected ')' but found '{}'", other.kind.symbol()),
                    )),
                    None => Err(EvalError::syntax(
                        tok.column,
                        "unclosed '('",
                    )),
                }
            }
            other => Err(EvalError::syntax(
                tok.column,
                format!("unexpected '{}'", other.symbol()),
            )),
        }
    }

    fn enter(&mut self) -> Result<(), EvalError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            let column = self.peek().map(|t| t.column).unwrap_or(self.end_column);
            return Err(EvalError::syntax(column, "expression nested too deeply"));
        }
        Ok(())
    }
}
