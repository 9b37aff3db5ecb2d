//! Operator enumerations carried by expression nodes.

use crate::token_kind::{Keyword, TokenKind};
use std::fmt;

/// A non-assigning binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
    ShiftLeft,
    ShiftRight,
    BitwiseAnd,
    BitwiseOr,
    BitwiseXor,
    LogicalAnd,
    LogicalOr,
    Equality,
    Inequality,
    LessThan,
    GreaterThan,
    LessThanOrEqual,
    GreaterThanOrEqual,
}

impl BinaryOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        let op = match kind {
            TokenKind::Plus => BinaryOperator::Add,
            TokenKind::Minus => BinaryOperator::Subtract,
            TokenKind::Star => BinaryOperator::Multiply,
            TokenKind::Slash => BinaryOperator::Divide,
            TokenKind::Percent => BinaryOperator::Modulo,
            TokenKind::DoubleStar => BinaryOperator::Power,
            TokenKind::ShiftLeft => BinaryOperator::ShiftLeft,
            TokenKind::ShiftRight => BinaryOperator::ShiftRight,
            TokenKind::Ampersand => BinaryOperator::BitwiseAnd,
            TokenKind::Pipe => BinaryOperator::BitwiseOr,
            TokenKind::Caret => BinaryOperator::BitwiseXor,
            TokenKind::DoubleAmpersand => BinaryOperator::LogicalAnd,
            TokenKind::DoublePipe => BinaryOperator::LogicalOr,
            TokenKind::DoubleEqual => BinaryOperator::Equality,
            TokenKind::NotEqual => BinaryOperator::Inequality,
            TokenKind::LessThan => BinaryOperator::LessThan,
            TokenKind::GreaterThan => BinaryOperator::GreaterThan,
            TokenKind::LessThanOrEqual => BinaryOperator::LessThanOrEqual,
            TokenKind::GreaterThanOrEqual => BinaryOperator::GreaterThanOrEqual,
            _ => return None,
        };
        Some(op)
    }

    /// `and` and `or` are spelled-out forms of `&&` and `||`.
    pub fn from_keyword(keyword: Keyword) -> Option<Self> {
        match keyword {
            Keyword::And => Some(BinaryOperator::LogicalAnd),
            Keyword::Or => Some(BinaryOperator::LogicalOr),
            _ => None,
        }
    }

    pub fn lexeme(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Subtract => "-",
            BinaryOperator::Multiply => "*",
            BinaryOperator::Divide => "/",
            BinaryOperator::Modulo => "%",
            BinaryOperator::Power => "**",
            BinaryOperator::ShiftLeft => "<<",
            BinaryOperator::ShiftRight => ">>",
            BinaryOperator::BitwiseAnd => "&",
            BinaryOperator::BitwiseOr => "|",
            BinaryOperator::BitwiseXor => "^",
            BinaryOperator::LogicalAnd => "&&",
            BinaryOperator::LogicalOr => "||",
            BinaryOperator::Equality => "==",
            BinaryOperator::Inequality => "!=",
            BinaryOperator::LessThan => "<",
            BinaryOperator::GreaterThan => ">",
            BinaryOperator::LessThanOrEqual => "<=",
            BinaryOperator::GreaterThanOrEqual => ">=",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.lexeme())
    }
}

/// `=` and the compound assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssignmentOperator {
    Assign,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    ShiftLeft,
    ShiftRight,
    BitwiseAnd,
    BitwiseXor,
    BitwiseOr,
    /// `a ~= b` stores `~b` into `a`.
    BitwiseNot,
}

impl AssignmentOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        let op = match kind {
            TokenKind::Equal => AssignmentOperator::Assign,
            TokenKind::PlusEqual => AssignmentOperator::Add,
            TokenKind::MinusEqual => AssignmentOperator::Subtract,
            TokenKind::StarEqual => AssignmentOperator::Multiply,
            TokenKind::SlashEqual => AssignmentOperator::Divide,
            TokenKind::PercentEqual => AssignmentOperator::Modulo,
            TokenKind::ShiftLeftEqual => AssignmentOperator::ShiftLeft,
            TokenKind::ShiftRightEqual => AssignmentOperator::ShiftRight,
            TokenKind::AmpersandEqual => AssignmentOperator::BitwiseAnd,
            TokenKind::CaretEqual => AssignmentOperator::BitwiseXor,
            TokenKind::PipeEqual => AssignmentOperator::BitwiseOr,
            TokenKind::TildeEqual => AssignmentOperator::BitwiseNot,
            _ => return None,
        };
        Some(op)
    }

    /// The arithmetic operator a compound assignment applies.
    pub fn binary_operator(self) -> Option<BinaryOperator> {
        match self {
            AssignmentOperator::Assign | AssignmentOperator::BitwiseNot => None,
            AssignmentOperator::Add => Some(BinaryOperator::Add),
            AssignmentOperator::Subtract => Some(BinaryOperator::Subtract),
            AssignmentOperator::Multiply => Some(BinaryOperator::Multiply),
            AssignmentOperator::Divide => Some(BinaryOperator::Divide),
            AssignmentOperator::Modulo => Some(BinaryOperator::Modulo),
            AssignmentOperator::ShiftLeft => Some(BinaryOperator::ShiftLeft),
            AssignmentOperator::ShiftRight => Some(BinaryOperator::ShiftRight),
            AssignmentOperator::BitwiseAnd => Some(BinaryOperator::BitwiseAnd),
            AssignmentOperator::BitwiseXor => Some(BinaryOperator::BitwiseXor),
            AssignmentOperator::BitwiseOr => Some(BinaryOperator::BitwiseOr),
        }
    }

    pub fn lexeme(self) -> &'static str {
        match self {
            AssignmentOperator::Assign => "=",
            AssignmentOperator::Add => "+=",
            AssignmentOperator::Subtract => "-=",
            AssignmentOperator::Multiply => "*=",
            AssignmentOperator::Divide => "/=",
            AssignmentOperator::Modulo => "%=",
            AssignmentOperator::ShiftLeft => "<<=",
            AssignmentOperator::ShiftRight => ">>=",
            AssignmentOperator::BitwiseAnd => "&=",
            AssignmentOperator::BitwiseXor => "^=",
            AssignmentOperator::BitwiseOr => "|=",
            AssignmentOperator::BitwiseNot => "~=",
        }
    }
}

impl fmt::Display for AssignmentOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.lexeme())
    }
}

/// A prefix operator.
///
/// In type position `*T` reads as a pointer type; the parser records it as
/// `Dereference` and leaves the interpretation to semantic analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Negate,
    LogicalNot,
    BitwiseNot,
    AddressOf,
    Dereference,
    Spread,
}

impl UnaryOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        let op = match kind {
            TokenKind::Minus => UnaryOperator::Negate,
            TokenKind::Exclamation => UnaryOperator::LogicalNot,
            TokenKind::Tilde => UnaryOperator::BitwiseNot,
            TokenKind::Ampersand => UnaryOperator::AddressOf,
            TokenKind::Star => UnaryOperator::Dereference,
            TokenKind::DotDotDot => UnaryOperator::Spread,
            _ => return None,
        };
        Some(op)
    }

    pub fn lexeme(self) -> &'static str {
        match self {
            UnaryOperator::Negate => "-",
            UnaryOperator::LogicalNot => "!",
            UnaryOperator::BitwiseNot => "~",
            UnaryOperator::AddressOf => "&",
            UnaryOperator::Dereference => "*",
            UnaryOperator::Spread => "...",
        }
    }
}

impl fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.lexeme())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_operator_lexemes_match_tokens() {
        for kind in TokenKind::all_with_lexeme() {
            if let Some(op) = BinaryOperator::from_token(kind) {
                assert_eq!(Some(op.lexeme()), kind.lexeme());
            }
        }
    }

    #[test]
    fn test_assignment_operator_covers_assignment_tokens() {
        for kind in TokenKind::all_with_lexeme() {
            assert_eq!(
                AssignmentOperator::from_token(kind).is_some(),
                kind.is_assignment(),
                "{:?}",
                kind
            );
        }
    }

    #[test]
    fn test_tilde_equal_is_an_assignment() {
        assert_eq!(
            AssignmentOperator::from_token(TokenKind::TildeEqual),
            Some(AssignmentOperator::BitwiseNot)
        );
        assert_eq!(AssignmentOperator::BitwiseNot.lexeme(), "~=");
    }

    #[test]
    fn test_compound_assignment_maps_to_binary() {
        assert_eq!(AssignmentOperator::Assign.binary_operator(), None);
        assert_eq!(AssignmentOperator::BitwiseNot.binary_operator(), None);
        assert_eq!(
            AssignmentOperator::ShiftLeft.binary_operator(),
            Some(BinaryOperator::ShiftLeft)
        );
    }

    #[test]
    fn test_keyword_operators() {
        assert_eq!(BinaryOperator::from_keyword(Keyword::And), Some(BinaryOperator::LogicalAnd));
        assert_eq!(BinaryOperator::from_keyword(Keyword::Or), Some(BinaryOperator::LogicalOr));
        assert_eq!(BinaryOperator::from_keyword(Keyword::As), None);
    }
}
