//! Operator precedence for binary operators.

use ember_ast::{Keyword, TokenKind};

/// Operator precedence levels, from lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum OperatorPrecedence {
    Assignment = 0,
    LogicalOr = 1,
    LogicalAnd = 2,
    BitwiseOr = 3,
    BitwiseXor = 4,
    BitwiseAnd = 5,
    Equality = 6,
    Relational = 7,
    Shift = 8,
    Additive = 9,
    Multiplicative = 10,
    Cast = 11,
    Power = 12,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorInfo {
    pub precedence: OperatorPrecedence,
    pub associativity: Associativity,
}

impl OperatorInfo {
    const fn left(precedence: OperatorPrecedence) -> Self {
        Self { precedence, associativity: Associativity::Left }
    }

    const fn right(precedence: OperatorPrecedence) -> Self {
        Self { precedence, associativity: Associativity::Right }
    }

    /// Whether an operator with `next` info binds its left operand before
    /// this one is reduced.
    pub fn yields_to(&self, next: &OperatorInfo) -> bool {
        next.precedence > self.precedence
            || (next.precedence == self.precedence && next.associativity == Associativity::Right)
    }
}

/// Get the binary operator info for a token. `keyword` is the keyword the
/// token spells, if any.
///
/// `,` and `?` are not binary operators in expression position: commas
/// separate list items and `?` is parsed as a postfix unwrap.
pub fn get_binary_operator_info(kind: TokenKind, keyword: Option<Keyword>) -> Option<OperatorInfo> {
    use OperatorPrecedence as P;

    let info = match kind {
        kind if kind.is_assignment() => OperatorInfo::right(P::Assignment),
        TokenKind::DoublePipe => OperatorInfo::left(P::LogicalOr),
        TokenKind::DoubleAmpersand => OperatorInfo::left(P::LogicalAnd),
        TokenKind::Pipe => OperatorInfo::left(P::BitwiseOr),
        TokenKind::Caret => OperatorInfo::left(P::BitwiseXor),
        TokenKind::Ampersand => OperatorInfo::left(P::BitwiseAnd),
        TokenKind::DoubleEqual | TokenKind::NotEqual => OperatorInfo::left(P::Equality),
        TokenKind::LessThan
        | TokenKind::GreaterThan
        | TokenKind::LessThanOrEqual
        | TokenKind::GreaterThanOrEqual => OperatorInfo::left(P::Relational),
        TokenKind::ShiftLeft | TokenKind::ShiftRight => OperatorInfo::left(P::Shift),
        TokenKind::Plus | TokenKind::Minus => OperatorInfo::left(P::Additive),
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => OperatorInfo::left(P::Multiplicative),
        TokenKind::DoubleStar => OperatorInfo::right(P::Power),
        TokenKind::Keyword => match keyword? {
            Keyword::Or => OperatorInfo::left(P::LogicalOr),
            Keyword::And => OperatorInfo::left(P::LogicalAnd),
            Keyword::As => OperatorInfo::left(P::Cast),
            _ => return None,
        },
        _ => return None,
    };
    Some(info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_order() {
        let mul = get_binary_operator_info(TokenKind::Star, None).unwrap();
        let add = get_binary_operator_info(TokenKind::Plus, None).unwrap();
        let cast = get_binary_operator_info(TokenKind::Keyword, Some(Keyword::As)).unwrap();
        let pow = get_binary_operator_info(TokenKind::DoubleStar, None).unwrap();
        assert!(mul.precedence > add.precedence);
        assert!(cast.precedence > mul.precedence);
        assert!(pow.precedence > cast.precedence);
    }

    #[test]
    fn test_associativity() {
        let pow = get_binary_operator_info(TokenKind::DoubleStar, None).unwrap();
        let assign = get_binary_operator_info(TokenKind::PlusEqual, None).unwrap();
        let sub = get_binary_operator_info(TokenKind::Minus, None).unwrap();
        assert_eq!(pow.associativity, Associativity::Right);
        assert_eq!(assign.associativity, Associativity::Right);
        let tilde = get_binary_operator_info(TokenKind::TildeEqual, None).unwrap();
        assert_eq!(tilde, assign);
        assert!(pow.yields_to(&pow));
        assert!(!sub.yields_to(&sub));
        assert!(sub.yields_to(&pow));
    }

    #[test]
    fn test_keyword_operators() {
        let and = get_binary_operator_info(TokenKind::Keyword, Some(Keyword::And)).unwrap();
        assert_eq!(and.precedence, OperatorPrecedence::LogicalAnd);
        assert!(get_binary_operator_info(TokenKind::Keyword, Some(Keyword::Let)).is_none());
        assert!(get_binary_operator_info(TokenKind::Keyword, None).is_none());
    }

    #[test]
    fn test_non_binary_tokens() {
        assert!(get_binary_operator_info(TokenKind::Comma, None).is_none());
        assert!(get_binary_operator_info(TokenKind::QuestionMark, None).is_none());
        assert!(get_binary_operator_info(TokenKind::Exclamation, None).is_none());
    }
}
