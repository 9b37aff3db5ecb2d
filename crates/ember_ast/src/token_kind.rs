//! TokenKind and Keyword - the lexical vocabulary of the language.

use std::fmt;

/// The kind of a lexical token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TokenKind {
    // ========================================================================
    // Sentinels
    // ========================================================================
    Invalid = 0,
    EndOfFile,

    // ========================================================================
    // Literals and names
    // ========================================================================
    IntegerLiteral,
    FloatLiteral,
    CharLiteral,
    StringLiteral,
    Identifier,
    Keyword,

    // ========================================================================
    // Arithmetic
    // ========================================================================
    Plus,
    Minus,
    Star,
    DoubleStar,
    Slash,
    Percent,

    // ========================================================================
    // Bitwise and logical
    // ========================================================================
    ShiftLeft,
    ShiftRight,
    Caret,
    Ampersand,
    DoubleAmpersand,
    Pipe,
    DoublePipe,
    Tilde,
    Exclamation,

    // ========================================================================
    // Comparison
    // ========================================================================
    LessThan,
    GreaterThan,
    LessThanOrEqual,
    GreaterThanOrEqual,
    DoubleEqual,
    NotEqual,

    // ========================================================================
    // Assignment
    // ========================================================================
    Equal,
    PlusEqual,
    MinusEqual,
    StarEqual,
    SlashEqual,
    PercentEqual,
    ShiftLeftEqual,
    ShiftRightEqual,
    CaretEqual,
    AmpersandEqual,
    PipeEqual,
    TildeEqual,

    // ========================================================================
    // Punctuation
    // ========================================================================
    QuestionMark,
    OpenParen,
    CloseParen,
    OpenCurlyBrace,
    CloseCurlyBrace,
    LeftSquareBracket,
    RightSquareBracket,
    Comma,
    Colon,
    Semicolon,
    Dot,
    DotIdentifier,
    DotStar,
    DotDot,
    DotDotLessThan,
    DotDotGreaterThan,
    DotDotEqual,
    DotDotDot,
    ThinArrow,
    FatArrow,
}

impl TokenKind {
    // Marker constants for TokenKind ranges. These can't be enum variants
    // because Rust doesn't allow duplicate discriminants.
    pub const FIRST_LITERAL: TokenKind = TokenKind::IntegerLiteral;
    pub const LAST_LITERAL: TokenKind = TokenKind::StringLiteral;
    pub const FIRST_OPERATOR: TokenKind = TokenKind::Plus;
    pub const LAST_OPERATOR: TokenKind = TokenKind::TildeEqual;
    pub const FIRST_ASSIGNMENT: TokenKind = TokenKind::Equal;
    pub const LAST_ASSIGNMENT: TokenKind = TokenKind::TildeEqual;
}

impl TokenKind {
    /// Whether this kind is a literal token.
    #[inline]
    pub fn is_literal(self) -> bool {
        let v = self as u8;
        v >= Self::FIRST_LITERAL as u8 && v <= Self::LAST_LITERAL as u8
    }

    /// Whether this kind is an operator (arithmetic, bitwise, comparison, or assignment).
    #[inline]
    pub fn is_operator(self) -> bool {
        let v = self as u8;
        v >= Self::FIRST_OPERATOR as u8 && v <= Self::LAST_OPERATOR as u8
    }

    /// Whether this kind is `=` or a compound assignment.
    #[inline]
    pub fn is_assignment(self) -> bool {
        let v = self as u8;
        v >= Self::FIRST_ASSIGNMENT as u8 && v <= Self::LAST_ASSIGNMENT as u8
    }

    /// Opening brackets tracked by nesting-aware scans.
    #[inline]
    pub fn is_open_bracket(self) -> bool {
        matches!(
            self,
            TokenKind::OpenParen | TokenKind::OpenCurlyBrace | TokenKind::LeftSquareBracket
        )
    }

    #[inline]
    pub fn is_close_bracket(self) -> bool {
        matches!(
            self,
            TokenKind::CloseParen | TokenKind::CloseCurlyBrace | TokenKind::RightSquareBracket
        )
    }

    /// The closer matching an opening bracket.
    pub fn matching_close(self) -> Option<TokenKind> {
        match self {
            TokenKind::OpenParen => Some(TokenKind::CloseParen),
            TokenKind::OpenCurlyBrace => Some(TokenKind::CloseCurlyBrace),
            TokenKind::LeftSquareBracket => Some(TokenKind::RightSquareBracket),
            _ => None,
        }
    }

    /// Tokens that may start a prefix unary expression.
    pub fn is_unary_operator(self) -> bool {
        matches!(
            self,
            TokenKind::Exclamation
                | TokenKind::Tilde
                | TokenKind::Ampersand
                | TokenKind::Star
                | TokenKind::Minus
                | TokenKind::DotDotDot
                | TokenKind::QuestionMark
        )
    }

    /// Human-readable token name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Invalid => "invalid",
            TokenKind::EndOfFile => "end-of-file",
            TokenKind::IntegerLiteral => "integer-literal",
            TokenKind::FloatLiteral => "float-literal",
            TokenKind::CharLiteral => "char-literal",
            TokenKind::StringLiteral => "string-literal",
            TokenKind::Identifier => "identifier",
            TokenKind::Keyword => "keyword",
            TokenKind::Plus => "plus-sign",
            TokenKind::Minus => "minus-sign",
            TokenKind::Star => "star",
            TokenKind::DoubleStar => "double-star",
            TokenKind::Slash => "slash",
            TokenKind::Percent => "percent",
            TokenKind::ShiftLeft => "shift-left",
            TokenKind::ShiftRight => "shift-right",
            TokenKind::Caret => "caret",
            TokenKind::Ampersand => "ampersand",
            TokenKind::DoubleAmpersand => "double-ampersand",
            TokenKind::Pipe => "pipe",
            TokenKind::DoublePipe => "double-pipe",
            TokenKind::Tilde => "tilde",
            TokenKind::Exclamation => "exclamation-mark",
            TokenKind::LessThan => "less-than",
            TokenKind::GreaterThan => "greater-than",
            TokenKind::LessThanOrEqual => "less-than-or-equal",
            TokenKind::GreaterThanOrEqual => "greater-than-or-equal",
            TokenKind::DoubleEqual => "double-equal",
            TokenKind::NotEqual => "not-equal",
            TokenKind::Equal => "equal-sign",
            TokenKind::PlusEqual => "plus-equal",
            TokenKind::MinusEqual => "minus-equal",
            TokenKind::StarEqual => "star-equal",
            TokenKind::SlashEqual => "slash-equal",
            TokenKind::PercentEqual => "percent-equal",
            TokenKind::ShiftLeftEqual => "shift-left-equal",
            TokenKind::ShiftRightEqual => "shift-right-equal",
            TokenKind::CaretEqual => "caret-equal",
            TokenKind::AmpersandEqual => "ampersand-equal",
            TokenKind::PipeEqual => "pipe-equal",
            TokenKind::TildeEqual => "tilde-equal",
            TokenKind::QuestionMark => "question-mark",
            TokenKind::OpenParen => "left-paren",
            TokenKind::CloseParen => "right-paren",
            TokenKind::OpenCurlyBrace => "left-curly-brace",
            TokenKind::CloseCurlyBrace => "right-curly-brace",
            TokenKind::LeftSquareBracket => "left-square-bracket",
            TokenKind::RightSquareBracket => "right-square-bracket",
            TokenKind::Comma => "comma",
            TokenKind::Colon => "colon",
            TokenKind::Semicolon => "semicolon",
            TokenKind::Dot => "dot",
            TokenKind::DotIdentifier => "dot-identifier",
            TokenKind::DotStar => "dot-star",
            TokenKind::DotDot => "dot-dot",
            TokenKind::DotDotLessThan => "dot-dot-less-than",
            TokenKind::DotDotGreaterThan => "dot-dot-greater-than",
            TokenKind::DotDotEqual => "dot-dot-equal",
            TokenKind::DotDotDot => "dot-dot-dot",
            TokenKind::ThinArrow => "thin-arrow",
            TokenKind::FatArrow => "fat-arrow",
        }
    }

    /// The fixed lexeme of this kind, if it has one.
    pub fn lexeme(self) -> Option<&'static str> {
        match self {
            TokenKind::Plus => Some("+"),
            TokenKind::Minus => Some("-"),
            TokenKind::Star => Some("*"),
            TokenKind::DoubleStar => Some("**"),
            TokenKind::Slash => Some("/"),
            TokenKind::Percent => Some("%"),
            TokenKind::ShiftLeft => Some("<<"),
            TokenKind::ShiftRight => Some(">>"),
            TokenKind::Caret => Some("^"),
            TokenKind::Ampersand => Some("&"),
            TokenKind::DoubleAmpersand => Some("&&"),
            TokenKind::Pipe => Some("|"),
            TokenKind::DoublePipe => Some("||"),
            TokenKind::Tilde => Some("~"),
            TokenKind::Exclamation => Some("!"),
            TokenKind::LessThan => Some("<"),
            TokenKind::GreaterThan => Some(">"),
            TokenKind::LessThanOrEqual => Some("<="),
            TokenKind::GreaterThanOrEqual => Some(">="),
            TokenKind::DoubleEqual => Some("=="),
            TokenKind::NotEqual => Some("!="),
            TokenKind::Equal => Some("="),
            TokenKind::PlusEqual => Some("+="),
            TokenKind::MinusEqual => Some("-="),
            TokenKind::StarEqual => Some("*="),
            TokenKind::SlashEqual => Some("/="),
            TokenKind::PercentEqual => Some("%="),
            TokenKind::ShiftLeftEqual => Some("<<="),
            TokenKind::ShiftRightEqual => Some(">>="),
            TokenKind::CaretEqual => Some("^="),
            TokenKind::AmpersandEqual => Some("&="),
            TokenKind::PipeEqual => Some("|="),
            TokenKind::TildeEqual => Some("~="),
            TokenKind::QuestionMark => Some("?"),
            TokenKind::OpenParen => Some("("),
            TokenKind::CloseParen => Some(")"),
            TokenKind::OpenCurlyBrace => Some("{"),
            TokenKind::CloseCurlyBrace => Some("}"),
            TokenKind::LeftSquareBracket => Some("["),
            TokenKind::RightSquareBracket => Some("]"),
            TokenKind::Comma => Some(","),
            TokenKind::Colon => Some(":"),
            TokenKind::Semicolon => Some(";"),
            TokenKind::Dot => Some("."),
            TokenKind::DotStar => Some(".*"),
            TokenKind::DotDot => Some(".."),
            TokenKind::DotDotLessThan => Some("..<"),
            TokenKind::DotDotGreaterThan => Some("..>"),
            TokenKind::DotDotEqual => Some("..="),
            TokenKind::DotDotDot => Some("..."),
            TokenKind::ThinArrow => Some("->"),
            TokenKind::FatArrow => Some("=>"),
            _ => None,
        }
    }

    /// Every kind that has a fixed lexeme, in declaration order.
    pub fn all_with_lexeme() -> impl Iterator<Item = TokenKind> {
        ALL_KINDS.iter().copied().filter(|k| k.lexeme().is_some())
    }
}

const ALL_KINDS: &[TokenKind] = &[
    TokenKind::Invalid,
    TokenKind::EndOfFile,
    TokenKind::IntegerLiteral,
    TokenKind::FloatLiteral,
    TokenKind::CharLiteral,
    TokenKind::StringLiteral,
    TokenKind::Identifier,
    TokenKind::Keyword,
    TokenKind::Plus,
    TokenKind::Minus,
    TokenKind::Star,
    TokenKind::DoubleStar,
    TokenKind::Slash,
    TokenKind::Percent,
    TokenKind::ShiftLeft,
    TokenKind::ShiftRight,
    TokenKind::Caret,
    TokenKind::Ampersand,
    TokenKind::DoubleAmpersand,
    TokenKind::Pipe,
    TokenKind::DoublePipe,
    TokenKind::Tilde,
    TokenKind::Exclamation,
    TokenKind::LessThan,
    TokenKind::GreaterThan,
    TokenKind::LessThanOrEqual,
    TokenKind::GreaterThanOrEqual,
    TokenKind::DoubleEqual,
    TokenKind::NotEqual,
    TokenKind::Equal,
    TokenKind::PlusEqual,
    TokenKind::MinusEqual,
    TokenKind::StarEqual,
    TokenKind::SlashEqual,
    TokenKind::PercentEqual,
    TokenKind::ShiftLeftEqual,
    TokenKind::ShiftRightEqual,
    TokenKind::CaretEqual,
    TokenKind::AmpersandEqual,
    TokenKind::PipeEqual,
    TokenKind::TildeEqual,
    TokenKind::QuestionMark,
    TokenKind::OpenParen,
    TokenKind::CloseParen,
    TokenKind::OpenCurlyBrace,
    TokenKind::CloseCurlyBrace,
    TokenKind::LeftSquareBracket,
    TokenKind::RightSquareBracket,
    TokenKind::Comma,
    TokenKind::Colon,
    TokenKind::Semicolon,
    TokenKind::Dot,
    TokenKind::DotIdentifier,
    TokenKind::DotStar,
    TokenKind::DotDot,
    TokenKind::DotDotLessThan,
    TokenKind::DotDotGreaterThan,
    TokenKind::DotDotEqual,
    TokenKind::DotDotDot,
    TokenKind::ThinArrow,
    TokenKind::FatArrow,
];

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lexeme() {
            Some(lexeme) => write!(f, "{}", lexeme),
            None => write!(f, "{}", self.name()),
        }
    }
}

// ============================================================================
// Keywords
// ============================================================================

/// The closed set of reserved words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Keyword {
    Let,
    Func,
    If,
    Else,
    Return,
    Struct,
    Class,
    Shape,
    Union,
    Interface,
    Impl,
    Enum,
    And,
    Or,
    For,
    While,
    Default,
    In,
    As,
    Discardable,
    Mut,
    Volatile,
    Comptime,
    Inline,
    Extern,
}

impl Keyword {
    pub const ALL: &'static [Keyword] = &[
        Keyword::Let,
        Keyword::Func,
        Keyword::If,
        Keyword::Else,
        Keyword::Return,
        Keyword::Struct,
        Keyword::Class,
        Keyword::Shape,
        Keyword::Union,
        Keyword::Interface,
        Keyword::Impl,
        Keyword::Enum,
        Keyword::And,
        Keyword::Or,
        Keyword::For,
        Keyword::While,
        Keyword::Default,
        Keyword::In,
        Keyword::As,
        Keyword::Discardable,
        Keyword::Mut,
        Keyword::Volatile,
        Keyword::Comptime,
        Keyword::Inline,
        Keyword::Extern,
    ];

    pub fn lexeme(self) -> &'static str {
        match self {
            Keyword::Let => "let",
            Keyword::Func => "func",
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::Return => "return",
            Keyword::Struct => "struct",
            Keyword::Class => "class",
            Keyword::Shape => "shape",
            Keyword::Union => "union",
            Keyword::Interface => "interface",
            Keyword::Impl => "impl",
            Keyword::Enum => "enum",
            Keyword::And => "and",
            Keyword::Or => "or",
            Keyword::For => "for",
            Keyword::While => "while",
            Keyword::Default => "default",
            Keyword::In => "in",
            Keyword::As => "as",
            Keyword::Discardable => "discardable",
            Keyword::Mut => "mut",
            Keyword::Volatile => "volatile",
            Keyword::Comptime => "comptime",
            Keyword::Inline => "inline",
            Keyword::Extern => "extern",
        }
    }

    /// Reverse lookup from identifier text.
    pub fn from_lexeme(text: &str) -> Option<Keyword> {
        match text {
            "let" => Some(Keyword::Let),
            "func" => Some(Keyword::Func),
            "if" => Some(Keyword::If),
            "else" => Some(Keyword::Else),
            "return" => Some(Keyword::Return),
            "struct" => Some(Keyword::Struct),
            "class" => Some(Keyword::Class),
            "shape" => Some(Keyword::Shape),
            "union" => Some(Keyword::Union),
            "interface" => Some(Keyword::Interface),
            "impl" => Some(Keyword::Impl),
            "enum" => Some(Keyword::Enum),
            "and" => Some(Keyword::And),
            "or" => Some(Keyword::Or),
            "for" => Some(Keyword::For),
            "while" => Some(Keyword::While),
            "default" => Some(Keyword::Default),
            "in" => Some(Keyword::In),
            "as" => Some(Keyword::As),
            "discardable" => Some(Keyword::Discardable),
            "mut" => Some(Keyword::Mut),
            "volatile" => Some(Keyword::Volatile),
            "comptime" => Some(Keyword::Comptime),
            "inline" => Some(Keyword::Inline),
            "extern" => Some(Keyword::Extern),
            _ => None,
        }
    }

    /// Whether this keyword is one of the declaration qualifiers.
    #[inline]
    pub fn is_qualifier(self) -> bool {
        matches!(
            self,
            Keyword::Mut | Keyword::Volatile | Keyword::Comptime | Keyword::Inline | Keyword::Extern
        )
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.lexeme())
    }
}
