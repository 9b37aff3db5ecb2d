//! Tokens produced by the tokenizer.

use std::ops::Range;

use ember_ast::TokenKind;
use ember_core::text::SourceLocation;

/// A scanned token. The text is recovered by slicing the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Location of the first character.
    pub loc: SourceLocation,
    /// Byte offset one past the last character.
    pub end: u32,
}

impl Token {
    pub fn new(kind: TokenKind, loc: SourceLocation, end: u32) -> Self {
        Self { kind, loc, end }
    }

    #[inline]
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// The length of this token in bytes.
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.loc.index)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn range(&self) -> Range<usize> {
        self.loc.index as usize..self.end as usize
    }

    /// The token's text within `source`.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.range()).unwrap_or("")
    }
}
