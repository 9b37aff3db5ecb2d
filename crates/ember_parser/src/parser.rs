//! The parser state shared by the expression, declaration and statement
//! parsers.
//!
//! `Parser` is split across several files: `expr.rs`, `decl.rs`, `stmt.rs`
//! and `misc.rs` each add an `impl` block for their part of the grammar.

use ember_ast::{Keyword, Name, TokenKind};
use ember_core::text::SourceLocation;
use ember_core::Arena;
use ember_diagnostics::{messages, DiagnosticMessage};
use ember_lexer::{Token, TokenStream};
use ember_options::ParseOptions;

use crate::context::ParseContext;
use crate::error::{ParseError, ParseResult};

/// Maximum recursion depth to prevent stack overflow on deeply nested input.
pub const MAX_RECURSION_DEPTH: u32 = 200;

/// A recursive descent parser allocating into `arena`.
pub struct Parser<'a, 'b, 's> {
    pub(crate) arena: &'a Arena,
    pub(crate) ctx: ParseContext<'b, 's>,
    /// Tracks recursion depth to prevent stack overflow on deeply nested input.
    recursion_depth: u32,
}

impl<'a, 'b, 's: 'a> Parser<'a, 'b, 's> {
    pub fn new(arena: &'a Arena, ctx: ParseContext<'b, 's>) -> Self {
        Self {
            arena,
            ctx,
            recursion_depth: 0,
        }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.ctx.options
    }

    pub fn stream(&self) -> &TokenStream<'b, 's> {
        &self.ctx.stream
    }

    // ========================================================================
    // Allocation
    // ========================================================================

    #[inline]
    pub(crate) fn alloc<T>(&self, value: T) -> &'a T {
        self.arena.alloc(value)
    }

    #[inline]
    pub(crate) fn alloc_slice<T>(&self, items: Vec<T>) -> &'a [T] {
        self.arena.alloc_slice(items)
    }

    // ========================================================================
    // Token helpers
    // ========================================================================

    #[inline]
    pub(crate) fn report(&mut self, loc: SourceLocation, message: &DiagnosticMessage, args: &[&str]) {
        self.ctx.diag.report(loc, message, args);
    }

    #[inline]
    pub(crate) fn text(&self, token: Token) -> &'s str {
        self.ctx.stream.text(token)
    }

    #[inline]
    pub(crate) fn keyword(&self, token: Token) -> Option<Keyword> {
        self.ctx.stream.keyword(token)
    }

    pub(crate) fn name_of(&self, token: Token) -> Name<'a> {
        Name::new(self.text(token), token.loc)
    }

    #[inline]
    pub(crate) fn peek(&self) -> Option<Token> {
        self.ctx.stream.peek()
    }

    #[inline]
    pub(crate) fn peek_kind(&self) -> Option<TokenKind> {
        self.ctx.stream.peek().map(|t| t.kind)
    }

    /// The text of the next token, or `"end of file"`.
    pub(crate) fn peek_text(&self) -> &'s str {
        match self.peek() {
            Some(token) => self.text(token),
            None => "end of file",
        }
    }

    #[inline]
    pub(crate) fn at(&self, kind: TokenKind) -> bool {
        self.ctx.stream.peek_is(kind)
    }

    #[inline]
    pub(crate) fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        self.ctx.stream.consume_if_is(kind)
    }

    #[inline]
    pub(crate) fn eat_keyword(&mut self, keyword: Keyword) -> Option<Token> {
        self.ctx.stream.consume_if_is_keyword(keyword)
    }

    /// The location of the next token, or of the last one at end of input.
    pub(crate) fn here(&self) -> SourceLocation {
        self.ctx.stream.current_or_previous_loc()
    }

    // ========================================================================
    // Recursion guard
    // ========================================================================

    pub(crate) fn enter(&mut self) -> ParseResult<()> {
        self.recursion_depth += 1;
        if self.recursion_depth > MAX_RECURSION_DEPTH {
            let loc = self.here();
            self.report(loc, &messages::EXPRESSION_TOO_DEEP, &[]);
            self.recursion_depth -= 1;
            return Err(ParseError::FailedCouldNotProceed);
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn leave(&mut self) {
        self.recursion_depth -= 1;
    }

    /// Run `f` one nesting level deeper.
    pub(crate) fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        self.enter()?;
        let result = f(self);
        self.leave();
        result
    }
}
