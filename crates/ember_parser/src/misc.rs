//! Qualifiers, separated lists, statement terminators and resynchronization.

use ember_ast::{Decl, Qualifiers, Stmt, TokenKind};
use ember_diagnostics::messages;

use crate::error::{ParseError, ParseResult};
use crate::parser::Parser;

/// How [`Parser::parse_list_with_separator`] names and checks its items.
#[derive(Debug, Clone, Copy)]
pub struct ListOptions {
    /// Item name used in diagnostics, e.g. `"parameter"`.
    pub name: &'static str,
    pub warn_on_trailing_separator: bool,
}

impl ListOptions {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            warn_on_trailing_separator: false,
        }
    }

    pub const fn warn_on_trailing(mut self) -> Self {
        self.warn_on_trailing_separator = true;
        self
    }
}

/// `"a parameter"`, `"an array element"`.
fn with_article(name: &str) -> String {
    let article = match name.as_bytes().first() {
        Some(b'a' | b'e' | b'i' | b'o' | b'u') => "an",
        _ => "a",
    };
    format!("{article} {name}")
}

pub(crate) fn lexeme(kind: TokenKind) -> &'static str {
    kind.lexeme().unwrap_or_else(|| kind.name())
}

impl<'a, 'b, 's: 'a> Parser<'a, 'b, 's> {
    // ========================================================================
    // Qualifiers
    // ========================================================================

    /// Consume a run of qualifier keywords. The first token that is not a
    /// qualifier is left in the stream.
    pub(crate) fn parse_qualifiers(&mut self) -> Qualifiers {
        let mut qualifiers = Qualifiers::new();
        while let Some(token) = self.peek() {
            let Some(keyword) = self.keyword(token).filter(|k| k.is_qualifier()) else {
                break;
            };
            self.ctx.stream.consume();
            if qualifiers.apply_keyword(keyword, token.loc) == Some(false) {
                self.report(token.loc, &messages::DUPLICATE_QUALIFIER, &[keyword.lexeme()]);
            }
        }
        qualifiers
    }

    // ========================================================================
    // Separated lists
    // ========================================================================

    /// Parse `item (separator item)* close`. The opening token has already
    /// been consumed; the closing one is consumed here.
    ///
    /// A failed item skips to the next `separator` or `close` outside of
    /// nested brackets, so one bad item does not lose the rest of the list.
    pub(crate) fn parse_list_with_separator<T>(
        &mut self,
        close: TokenKind,
        separator: TokenKind,
        options: &ListOptions,
        mut item: impl FnMut(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<Vec<T>> {
        let mut items = Vec::new();
        if self.eat(close).is_some() {
            return Ok(items);
        }

        if let Some(leading) = self.eat(separator) {
            let name = with_article(options.name);
            self.report(
                leading.loc,
                &messages::EXPECTED_ITEM_BEFORE_SEPARATOR,
                &[name.as_str(), lexeme(separator)],
            );
            if self.ctx.stream.find_next_not_one_of(&[separator]).is_err() {
                return Err(ParseError::FailedCouldNotProceed);
            }
            if self.eat(close).is_some() {
                return Ok(items);
            }
        }

        loop {
            match item(self) {
                Ok(value) => items.push(value),
                Err(_) => {
                    if self.resync_list(close, separator)? {
                        return Ok(items);
                    }
                    continue;
                }
            }

            if self.eat(close).is_some() {
                return Ok(items);
            }

            if let Some(sep) = self.eat(separator) {
                if let Some(extra) = self.peek().filter(|t| t.kind == separator) {
                    self.report(
                        extra.loc,
                        &messages::MULTIPLE_SEPARATORS,
                        &[lexeme(separator), options.name],
                    );
                    while self.eat(separator).is_some() {}
                }
                if self.eat(close).is_some() {
                    if options.warn_on_trailing_separator {
                        self.report(sep.loc, &messages::TRAILING_SEPARATOR, &[lexeme(separator), options.name]);
                    }
                    return Ok(items);
                }
                continue;
            }

            let loc = self.here();
            if self.ctx.stream.reached_eof() {
                self.report(loc, &messages::EXPECTED_CLOSING_BRACKET, &[]);
                return Err(ParseError::FailedCouldNotProceed);
            }
            self.report(
                loc,
                &messages::EXPECTED_SEPARATOR_OR_CLOSE,
                &[lexeme(separator), lexeme(close), options.name],
            );
            if self.resync_list(close, separator)? {
                return Ok(items);
            }
        }
    }

    /// Skip to the next `separator` or `close`. Returns whether the list was
    /// closed.
    fn resync_list(&mut self, close: TokenKind, separator: TokenKind) -> ParseResult<bool> {
        match self.ctx.stream.find_next_and_consume_one_of(&[separator, close]) {
            Ok(token) => Ok(token.kind == close),
            Err(_) => Err(ParseError::FailedCouldNotProceed),
        }
    }

    // ========================================================================
    // Statement boundaries
    // ========================================================================

    /// Skip a failed statement up to its `;`, or up to a `}` that closes the
    /// enclosing block. The `}` is left in the stream.
    pub(crate) fn recover_statement(&mut self, start: usize) -> ParseError {
        let stream = &mut self.ctx.stream;
        match stream.find_next_and_consume_one_of(&[TokenKind::Semicolon, TokenKind::CloseCurlyBrace]) {
            Ok(token) => {
                if token.kind == TokenKind::CloseCurlyBrace {
                    stream.go_back(1);
                }
                if stream.position() > start {
                    ParseError::FailedAndProceeded
                } else {
                    ParseError::FailedCouldNotProceed
                }
            }
            Err(_) => ParseError::FailedCouldNotProceed,
        }
    }

    /// Consume the `;` ending `stmt`. If-expressions, function declarations
    /// and blocks may omit it.
    pub(crate) fn expect_terminator(&mut self, stmt: &Stmt<'a>) {
        if self.eat(TokenKind::Semicolon).is_some() {
            return;
        }
        let exempt = match stmt {
            Stmt::Expr(expr) => expr.is_if(),
            Stmt::Decl(Decl::Function(_)) => true,
            Stmt::Compound(_) => true,
            _ => false,
        };
        if exempt || self.options().dont_require_semicolons {
            return;
        }
        let loc = self.here();
        self.report(loc, &messages::EXPECTED_SEMICOLON, &[]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_article() {
        assert_eq!(with_article("parameter"), "a parameter");
        assert_eq!(with_article("array element"), "an array element");
        assert_eq!(with_article("field"), "a field");
    }

    #[test]
    fn test_lexeme_falls_back_to_name() {
        assert_eq!(lexeme(TokenKind::Comma), ",");
        assert_eq!(lexeme(TokenKind::CloseParen), ")");
    }
}
