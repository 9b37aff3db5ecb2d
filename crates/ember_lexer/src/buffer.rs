//! The token buffer: every token of one source text.

use ember_ast::{Keyword, TokenKind};
use ember_core::text::LineMap;
use tracing::{debug, trace};

use crate::error::{LexError, LexErrorKind};
use crate::token::Token;
use crate::tokenizer::Tokenizer;

/// All tokens of a source text, excluding the end-of-file sentinel.
#[derive(Debug)]
pub struct TokenBuffer<'s> {
    source: &'s str,
    tokens: Vec<Token>,
    line_map: LineMap,
}

impl<'s> TokenBuffer<'s> {
    /// Tokenize `source` to the end. The first lexical error aborts the
    /// whole buffer.
    pub fn create(source: &'s str) -> Result<Self, LexError> {
        let mut tokenizer = Tokenizer::new(source);
        let mut tokens = Vec::new();

        loop {
            let token = tokenizer.next_token();
            match token.kind {
                TokenKind::EndOfFile => break,
                TokenKind::Invalid => {
                    let error = tokenizer.take_error().unwrap_or_else(|| {
                        LexError::new(LexErrorKind::UnrecognizedChar('\0'), token.loc, 1)
                    });
                    debug!(loc = %error.loc, error = %error.kind, "lexing failed");
                    return Err(error);
                }
                _ => {
                    trace!(kind = %token.kind, loc = %token.loc, "token");
                    tokens.push(token);
                }
            }
        }

        let line_map = LineMap::from_line_starts(tokenizer.into_line_starts());
        debug!(tokens = tokens.len(), lines = line_map.line_count(), "lexed source");

        Ok(Self {
            source,
            tokens,
            line_map,
        })
    }

    pub fn source(&self) -> &'s str {
        self.source
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Token> {
        self.tokens.get(index).copied()
    }

    pub fn text(&self, token: Token) -> &'s str {
        token.text(self.source)
    }

    /// The keyword a `Keyword` token spells.
    pub fn keyword(&self, token: Token) -> Option<Keyword> {
        if token.kind != TokenKind::Keyword {
            return None;
        }
        Keyword::from_lexeme(self.text(token))
    }

    pub fn line_map(&self) -> &LineMap {
        &self.line_map
    }
}
