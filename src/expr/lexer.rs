//! Tokenizer for calculator expressions.
//!
//! Literals:
//! ```text
//! 123        decimal
//! 0x1F  0X1F hexadecimal
//! 0o17  0O17 octal
//! 0b101 0B101 binary
//! 0xFFFF_FFFF  underscores may separate digits
//! ```

use crate::expr::EvalError;
use crate::register::format::separators_valid;

/// Kinds of token produced by [`tokenize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Number(i128),
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    Percent,
    Shl,
    Shr,
    Amp,
    Caret,
    Pipe,
    Tilde,
    LParen,
    RParen,
}

impl TokenKind {
    /// Source spelling, used in error messages.
    pub fn symbol(&self) -> String {
        let s = match self {
            TokenKind::Number(n) => return n.to_string(),
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::StarStar => "**",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Shl => "<<",
            TokenKind::Shr => ">>",
            TokenKind::Amp => "&",
            TokenKind::Caret => "^",
            TokenKind::Pipe => "|",
            TokenKind::Tilde => "~",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
        };
        s.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// 1-based column of the first character.
    pub column: usize,
}

/// Split `input` into tokens.
pub fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let mut out = Vec::with_capacity(16);
    let chars: Vec<char> = input.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let column = i + 1;

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c.is_ascii_digit() {
            let start = i;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let text: String = chars[start..i].iter().collect();
            let value = parse_literal(&text, column)?;
            out.push(Token { kind: TokenKind::Number(value), column });
            continue;
        }

        let next = chars.get(i + 1).copied();
        let (kind, len) = match (c, next) {
            ('*', Some('*')) => (TokenKind::StarStar, 2),
            ('/', Some('/')) => (TokenKind::Slash, 2),
            ('<', Some('<')) => (TokenKind::Shl, 2),
            ('>', Some('>')) => (TokenKind::Shr, 2),
            ('+', _) => (TokenKind::Plus, 1),
            ('-', _) => (TokenKind::Minus, 1),
            ('*', _) => (TokenKind::Star, 1),
            ('/', _) => (TokenKind::Slash, 1),
            ('%', _) => (TokenKind::Percent, 1),
            ('&', _) => (TokenKind::Amp, 1),
            ('^', _) => (TokenKind::Caret, 1),
            ('|', _) => (TokenKind::Pipe, 1),
            ('~', _) => (TokenKind::Tilde, 1),
            ('(', _) => (TokenKind::LParen, 1),
            (')', _) => (TokenKind::RParen, 1),
            _ => {
                return Err(EvalError::syntax(column, format!("unexpected character '{}'", c)));
            }
        };
        out.push(Token { kind, column });
        i += len;
    }

    Ok(out)
}

/// Parse one integer literal, choosing the base from its prefix.
fn parse_literal(text: &str, column: usize) -> Result<i128, EvalError> {
    let invalid = || EvalError::syntax(column, format!("invalid literal '{}'", text));

    let (base, digits) = match text.get(..2).map(|p| p.to_ascii_lowercase()) {
        Some(p) if p == "0x" => (16, &text[2..]),
        Some(p) if p == "0o" => (8, &text[2..]),
        Some(p) if p == "0b" => (2, &text[2..]),
        _ => (10, text),
    };

    if !separators_valid(digits, base != 10) {
        return Err(invalid());
    }

    let mut value: i128 = 0;
    let mut seen_digit = false;
    for c in digits.chars() {
        if c == '_' {
            continue;
        }
        let d = c.to_digit(base).ok_or_else(invalid)?;
        value = value
            .checked_mul(base as i128)
            .and_then(|v| v.checked_add(d as i128))
            .ok_or(EvalError::Overflow)?;
        seen_digit = true;
    }

    if !seen_digit {
        return Err(invalid());
    }

    // `012` is rejected rather than guessed at; `0`, `00` are fine.
    if base == 10 && digits.starts_with('0') && value != 0 {
        return Err(EvalError::syntax(
            column,
            format!("leading zeros in decimal literal '{}' (use 0o for octal)", text),
        ));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_literals() {
        assert_eq!(kinds("123"), vec![TokenKind::Number(123)]);
        assert_eq!(kinds("0x1F"), vec![TokenKind::Number(31)]);
        assert_eq!(kinds("0X1f"), vec![TokenKind::Number(31)]);
        assert_eq!(kinds("0o17"), vec![TokenKind::Number(15)]);
        assert_eq!(kinds("0b101"), vec![TokenKind::Number(5)]);
        assert_eq!(kinds("0xFFFF_FFFF"), vec![TokenKind::Number(0xFFFF_FFFF)]);
        assert_eq!(kinds("0x_FF"), vec![TokenKind::Number(255)]);
        assert_eq!(kinds("0"), vec![TokenKind::Number(0)]);
        assert_eq!(kinds("000"), vec![TokenKind::Number(0)]);
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("1<<2>>3**4//5"),
            vec![
                TokenKind::Number(1),
                TokenKind::Shl,
                TokenKind::Number(2),
                TokenKind::Shr,
                TokenKind::Number(3),
                TokenKind::StarStar,
                TokenKind::Number(4),
                TokenKind::Slash,
                TokenKind::Number(5),
            ]
        );
        assert_eq!(
            kinds("~(-1)"),
            vec![
                TokenKind::Tilde,
                TokenKind::LParen,
                TokenKind::Minus,
                TokenKind::Number(1),
                TokenKind::RParen,
            ]
        );
    }

    #[test]
    fn test_columns() {
        let tokens = tokenize("  12 +  0x3").unwrap();
        let columns: Vec<usize> = tokens.iter().map(|t| t.column).collect();
        assert_eq!(columns, vec![3, 6, 9]);
    }

    #[test]
    fn test_rejects_bad_literals() {
        assert!(matches!(tokenize("0x"), Err(EvalError::SyntaxError { column: 1, .. })));
        assert!(matches!(tokenize("0b102"), Err(EvalError::SyntaxError { .. })));
        assert!(matches!(tokenize("12abc"), Err(EvalError::SyntaxError { .. })));
        assert!(matches!(tokenize("012"), Err(EvalError::SyntaxError { .. })));
        assert!(matches!(tokenize("1__0"), Err(EvalError::SyntaxError { .. })));
        assert!(matches!(tokenize("5_"), Err(EvalError::SyntaxError { .. })));
    }

    #[test]
    fn test_rejects_names() {
        let err = tokenize("1 + x").unwrap_err();
        assert_eq!(err, EvalError::syntax(5, "unexpected character 'x'"));
        assert!(tokenize("__import__('os')").is_err());
    }

    #[test]
    fn test_literal_overflow() {
        let huge = format!("0x{}", "F".repeat(40));
        assert_eq!(tokenize(&huge), Err(EvalError::Overflow));
    }
}
