//! Decoded literal values and their structured error kinds.
//!
//! Literal errors are attached to the literal node so later stages can
//! report them precisely. They never stop the parse.

use thiserror::Error;

/// A successfully parsed integer literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedNumber {
    /// Whether the literal carried a leading `-`.
    pub negative: bool,
    /// Magnitude of the value.
    pub value: u64,
    /// Radix selected by the prefix (2, 8, 10, or 16).
    pub base: u32,
}

impl ParsedNumber {
    /// The signed value.
    pub fn as_i128(&self) -> i128 {
        let magnitude = self.value as i128;
        if self.negative {
            -magnitude
        } else {
            magnitude
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NumberErrorKind {
    #[error("Number literal is empty")]
    Empty,
    #[error("Signed integers can't be negative")]
    NegativeNumber,
    #[error("Integers can't have a +sign")]
    PositiveSign,
    #[error("Invalid digit in number")]
    InvalidDigit,
    #[error("Unrecognized character in number")]
    UnrecognizedChar,
    #[error("Unrecognized base in number")]
    UnrecognizedBase,
    #[error("Number cannot have a leading zero")]
    LeadingZero,
    #[error("Negative zero cannot be valid")]
    NegativeZero,
    #[error("Floating-point number not supported")]
    FloatingPoint,
    #[error("Number is too large")]
    Overflow,
}

/// A numeric literal error and the byte index in the literal text where it
/// was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct NumberError {
    pub kind: NumberErrorKind,
    pub index: usize,
}

impl NumberError {
    pub fn new(kind: NumberErrorKind, index: usize) -> Self {
        Self { kind, index }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LiteralError {
    #[error("Character literals cannot be empty. Use '\\0' to store a null-character")]
    EmptyChar,
    #[error("Use double quotes to store strings with multiple characters")]
    MultipleChars,
    #[error("Invalid escape-sequence")]
    InvalidEscape { index: usize },
    #[error("Literal ends in the middle of an escape-sequence")]
    UnterminatedEscape { index: usize },
    #[error("Literal is missing its closing quote")]
    Unterminated,
}

impl LiteralError {
    /// Byte offset of the problem within the literal text, when known.
    pub fn index(&self) -> Option<usize> {
        match self {
            LiteralError::InvalidEscape { index } | LiteralError::UnterminatedEscape { index } => {
                Some(*index)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_value() {
        let n = ParsedNumber { negative: true, value: 42, base: 10 };
        assert_eq!(n.as_i128(), -42);
        let n = ParsedNumber { negative: false, value: u64::MAX, base: 16 };
        assert_eq!(n.as_i128(), u64::MAX as i128);
    }

    #[test]
    fn test_error_messages() {
        let err = NumberError::new(NumberErrorKind::InvalidDigit, 3);
        assert_eq!(err.to_string(), "Invalid digit in number");
        assert_eq!(LiteralError::InvalidEscape { index: 2 }.index(), Some(2));
        assert_eq!(LiteralError::EmptyChar.index(), None);
    }
}
