//! Fatal lexical errors.

use ember_core::text::SourceLocation;
use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexErrorKind {
    #[error("Unrecognized character '{0}'")]
    UnrecognizedChar(char),
    #[error("Unterminated character literal")]
    UnterminatedChar,
    #[error("Unterminated string literal")]
    UnterminatedString,
    #[error("Invalid escape sequence '\\{0}'")]
    InvalidEscape(char),
    #[error("Expected two hexadecimal digits after '\\x'")]
    InvalidHexEscape,
    #[error("Line is too long")]
    LineTooLong,
}

/// A lexical error. Lexing stops at the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
#[error("{kind}")]
#[diagnostic(code(ember::lex::invalid_token))]
pub struct LexError {
    pub kind: LexErrorKind,
    pub loc: SourceLocation,
    #[label("here")]
    pub span: SourceSpan,
}

impl LexError {
    pub fn new(kind: LexErrorKind, loc: SourceLocation, len: usize) -> Self {
        let offset = if loc.is_valid() { loc.index as usize } else { 0 };
        Self {
            kind,
            loc,
            span: SourceSpan::new(offset.into(), len),
        }
    }
}
