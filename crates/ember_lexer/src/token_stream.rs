//! A cursor over a token buffer.
//!
//! Besides plain lookahead, the stream offers two kinds of forward scans
//! for error recovery. The flat `proceed_to_*` scans stop at the first
//! matching token. The `find_next_*` scans track the open `(`, `{` and `[`
//! they step over and only accept a target outside of them, so a `;` inside
//! a nested call does not end the enclosing statement.

use ember_ast::{Keyword, TokenKind};
use ember_core::text::SourceLocation;
use thiserror::Error;

use crate::buffer::TokenBuffer;
use crate::token::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FindError {
    #[error("reached the end of the input without finding the token")]
    NotFound,
    #[error("reached the end of the input inside an unclosed bracket")]
    UnclosedToken,
    #[error("closing bracket does not match the open bracket")]
    MismatchClosingToken,
    #[error("unexpected closing bracket")]
    UnexpectedClosingToken,
}

/// A saved stream position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

pub struct TokenStream<'b, 's> {
    buffer: &'b TokenBuffer<'s>,
    index: usize,
}

/// What a nesting-aware scan does with a token seen at depth zero.
enum ScanStep {
    /// Consume it and stop.
    Take,
    /// Stop before it.
    Stop,
    Skip,
}

impl<'b, 's> TokenStream<'b, 's> {
    pub fn new(buffer: &'b TokenBuffer<'s>) -> Self {
        Self { buffer, index: 0 }
    }

    pub fn buffer(&self) -> &'b TokenBuffer<'s> {
        self.buffer
    }

    #[inline]
    pub fn position(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn reached_eof(&self) -> bool {
        self.index >= self.buffer.len()
    }

    pub fn token_count(&self) -> usize {
        self.buffer.len()
    }

    pub fn text(&self, token: Token) -> &'s str {
        self.buffer.text(token)
    }

    pub fn keyword(&self, token: Token) -> Option<Keyword> {
        self.buffer.keyword(token)
    }

    // ========================================================================
    // Lookahead
    // ========================================================================

    pub fn peek(&self) -> Option<Token> {
        self.buffer.get(self.index)
    }

    /// The token `offset` places after the next one.
    pub fn peek_nth(&self, offset: usize) -> Option<Token> {
        self.buffer.get(self.index + offset)
    }

    pub fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|t| t.kind == kind)
    }

    pub fn peek_is_keyword(&self, keyword: Keyword) -> bool {
        self.peek()
            .is_some_and(|t| self.keyword(t) == Some(keyword))
    }

    pub fn peek_is_one_of(&self, kinds: &[TokenKind]) -> bool {
        self.peek().is_some_and(|t| kinds.contains(&t.kind))
    }

    // ========================================================================
    // Consuming
    // ========================================================================

    pub fn consume(&mut self) -> Option<Token> {
        let token = self.peek()?;
        self.index += 1;
        Some(token)
    }

    pub fn consume_if_is(&mut self, kind: TokenKind) -> Option<Token> {
        if self.peek_is(kind) {
            return self.consume();
        }
        None
    }

    pub fn consume_if_is_keyword(&mut self, keyword: Keyword) -> Option<Token> {
        if self.peek_is_keyword(keyword) {
            return self.consume();
        }
        None
    }

    pub fn consume_if_one_of(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        if self.peek_is_one_of(kinds) {
            return self.consume();
        }
        None
    }

    /// The most recently consumed token.
    pub fn current(&self) -> Option<Token> {
        self.index.checked_sub(1).and_then(|i| self.buffer.get(i))
    }

    /// The location of the next token, or of the last one at the end of
    /// the input.
    pub fn current_or_previous_loc(&self) -> SourceLocation {
        self.peek()
            .or_else(|| self.current())
            .map(|t| t.loc)
            .unwrap_or_else(SourceLocation::start)
    }

    // ========================================================================
    // Backtracking
    // ========================================================================

    /// Move back `count` tokens. Fails without moving if that would pass
    /// the start of the stream.
    pub fn go_back(&mut self, count: usize) -> bool {
        if count > self.index {
            return false;
        }
        self.index -= count;
        true
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.index)
    }

    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.index = checkpoint.0.min(self.buffer.len());
    }

    /// Run `f` and then return to the current position.
    pub fn in_window<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let checkpoint = self.checkpoint();
        let result = f(self);
        self.restore(checkpoint);
        result
    }

    // ========================================================================
    // Flat scans
    // ========================================================================

    /// Consume tokens up to and including the next `kind`.
    pub fn proceed_to_and_consume(&mut self, kind: TokenKind) -> Option<Token> {
        self.proceed_to_and_consume_one_of(&[kind])
    }

    pub fn proceed_to_and_consume_one_of(&mut self, kinds: &[TokenKind]) -> Option<Token> {
        while let Some(token) = self.consume() {
            if kinds.contains(&token.kind) {
                return Some(token);
            }
        }
        None
    }

    // ========================================================================
    // Nesting-aware scans
    // ========================================================================

    pub fn find_next_and_consume(&mut self, kind: TokenKind) -> Result<Token, FindError> {
        self.find_next_and_consume_one_of(&[kind])
    }

    /// Consume tokens up to and including the next token in `kinds` that is
    /// not nested inside brackets opened during the scan.
    pub fn find_next_and_consume_one_of(&mut self, kinds: &[TokenKind]) -> Result<Token, FindError> {
        self.scan_nested(|kind| {
            if kinds.contains(&kind) {
                ScanStep::Take
            } else {
                ScanStep::Skip
            }
        })
    }

    /// Advance to the next token outside of `kinds` at depth zero, leaving
    /// it unconsumed.
    pub fn find_next_not_one_of(&mut self, kinds: &[TokenKind]) -> Result<Token, FindError> {
        self.scan_nested(|kind| {
            if kinds.contains(&kind) {
                ScanStep::Skip
            } else {
                ScanStep::Stop
            }
        })
    }

    fn scan_nested(&mut self, mut at_depth_zero: impl FnMut(TokenKind) -> ScanStep) -> Result<Token, FindError> {
        let mut stack: Vec<TokenKind> = Vec::new();

        while let Some(token) = self.peek() {
            if stack.is_empty() {
                match at_depth_zero(token.kind) {
                    ScanStep::Take => {
                        self.index += 1;
                        return Ok(token);
                    }
                    ScanStep::Stop => return Ok(token),
                    ScanStep::Skip => {}
                }
            }

            self.index += 1;
            if token.kind.is_open_bracket() {
                stack.push(token.kind);
            } else if token.kind.is_close_bracket() {
                let Some(open) = stack.pop() else {
                    return Err(FindError::UnexpectedClosingToken);
                };
                if open.matching_close() != Some(token.kind) {
                    return Err(FindError::MismatchClosingToken);
                }
            }
        }

        if stack.is_empty() {
            Err(FindError::NotFound)
        } else {
            Err(FindError::UnclosedToken)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_go_back_bounds() {
        let buffer = TokenBuffer::create("a b").unwrap();
        let mut stream = TokenStream::new(&buffer);
        assert!(!stream.go_back(1));
        stream.consume();
        assert!(stream.go_back(1));
        assert_eq!(stream.position(), 0);
    }

    #[test]
    fn test_current_or_previous_loc_at_eof() {
        let buffer = TokenBuffer::create("ab cd").unwrap();
        let mut stream = TokenStream::new(&buffer);
        stream.consume();
        stream.consume();
        assert!(stream.reached_eof());
        assert_eq!(stream.current_or_previous_loc().index, 3);
    }
}
