//! Statements: dispatch, `return`, and compound blocks.

use ember_ast::*;
use ember_diagnostics::messages;
use ember_lexer::Token;

use crate::error::{ParseError, ParseResult};
use crate::parser::Parser;

fn record_kind_of(keyword: Keyword) -> Option<RecordKind> {
    match keyword {
        Keyword::Struct => Some(RecordKind::Struct),
        Keyword::Shape => Some(RecordKind::Shape),
        Keyword::Union => Some(RecordKind::Union),
        Keyword::Interface => Some(RecordKind::Interface),
        _ => None,
    }
}

impl<'a, 'b, 's: 'a> Parser<'a, 'b, 's> {
    /// Parse one statement without its terminator.
    ///
    /// A failed statement is skipped up to the next `;` at the current
    /// depth, or up to the `}` closing the enclosing block.
    pub fn parse_stmt(&mut self) -> ParseResult<Stmt<'a>> {
        let start = self.ctx.stream.position();
        let qualifiers_loc = self.here();
        let qualifiers = self.parse_qualifiers();

        let Some(token) = self.peek() else {
            let loc = self.here();
            self.report(loc, &messages::UNEXPECTED_END_OF_FILE, &[]);
            return Err(ParseError::FailedCouldNotProceed);
        };

        let declares = self
            .keyword(token)
            .is_some_and(|k| matches!(k, Keyword::Let | Keyword::Func) || record_kind_of(k).is_some());
        if !qualifiers.is_empty() && !declares {
            self.report(qualifiers_loc, &messages::QUALIFIERS_WITHOUT_DECLARATION, &[]);
        }

        if token.kind == TokenKind::OpenCurlyBrace {
            self.ctx.stream.consume();
            return self.parse_compound_stmt(token).map(Stmt::Compound);
        }

        if let Some(keyword) = self.keyword(token) {
            let result = match keyword {
                Keyword::Let => {
                    self.ctx.stream.consume();
                    self.parse_var_decl(token, qualifiers).map(Stmt::Decl)
                }
                Keyword::Return => {
                    self.ctx.stream.consume();
                    self.parse_return_tail(token).map(Stmt::Return)
                }
                Keyword::Func => {
                    self.ctx.stream.consume();
                    match self.parse_function_decl(token, qualifiers) {
                        Ok(decl) if decl.name().is_none() => {
                            self.report(token.loc, &messages::FUNCTION_REQUIRES_NAME, &[]);
                            return Err(ParseError::FailedAndProceeded);
                        }
                        result => result.map(Stmt::Decl),
                    }
                }
                Keyword::If => {
                    self.ctx.stream.consume();
                    self.parse_if_expr(token).map(Stmt::Expr)
                }
                Keyword::And | Keyword::Or | Keyword::In | Keyword::Default | Keyword::As | Keyword::Else => {
                    self.ctx.stream.consume();
                    self.report(token.loc, &messages::UNEXPECTED_KEYWORD, &[keyword.lexeme()]);
                    return Err(self.recover_statement(start));
                }
                other => match record_kind_of(other) {
                    Some(kind) => {
                        self.ctx.stream.consume();
                        match self.parse_record_decl(token, kind, qualifiers) {
                            Ok(decl) if decl.name().is_none() => {
                                self.report(token.loc, &messages::RECORD_REQUIRES_NAME, &[kind.keyword_text()]);
                                return Err(ParseError::FailedAndProceeded);
                            }
                            result => result.map(Stmt::Decl),
                        }
                    }
                    None => self.parse_expression().map(Stmt::Expr),
                },
            };
            return self.recover_on_error(result, start);
        }

        let result = self.parse_expression().map(Stmt::Expr);
        self.recover_on_error(result, start)
    }

    fn recover_on_error(&mut self, result: ParseResult<Stmt<'a>>, start: usize) -> ParseResult<Stmt<'a>> {
        match result {
            Ok(stmt) => Ok(stmt),
            Err(_) => Err(self.recover_statement(start)),
        }
    }

    /// The value after a consumed `return`, if any.
    pub(crate) fn parse_return_tail(&mut self, return_token: Token) -> ParseResult<&'a ReturnStmt<'a>> {
        let ends_here = match self.peek_kind() {
            None => true,
            Some(kind) => matches!(kind, TokenKind::Semicolon | TokenKind::CloseCurlyBrace),
        };
        let value = if ends_here { None } else { Some(self.parse_expression()?) };
        Ok(self.alloc(ReturnStmt {
            loc: return_token.loc,
            value,
        }))
    }

    /// Statements up to the `}` matching the consumed `brace`.
    ///
    /// The statement right before `}` may omit its `;`.
    pub fn parse_compound_stmt(&mut self, brace: Token) -> ParseResult<&'a CompoundStmt<'a>> {
        self.nested(|p| {
            let mut stmts = Vec::new();
            loop {
                if p.eat(TokenKind::CloseCurlyBrace).is_some() {
                    break;
                }
                if p.ctx.stream.reached_eof() {
                    p.report_unclosed(brace);
                    return Err(ParseError::FailedCouldNotProceed);
                }
                if p.eat(TokenKind::Semicolon).is_some() {
                    continue;
                }

                match p.parse_stmt() {
                    Ok(stmt) => {
                        if !p.at(TokenKind::CloseCurlyBrace) {
                            p.expect_terminator(&stmt);
                        }
                        stmts.push(stmt);
                    }
                    Err(ParseError::FailedAndProceeded) => continue,
                    Err(ParseError::FailedCouldNotProceed) => {
                        if p.ctx.stream.reached_eof() {
                            p.report_unclosed(brace);
                        }
                        return Err(ParseError::FailedCouldNotProceed);
                    }
                }
            }

            let stmts = p.alloc_slice(stmts);
            Ok(p.alloc(CompoundStmt { loc: brace.loc, stmts }))
        })
    }

    fn report_unclosed(&mut self, brace: Token) {
        self.report(brace.loc, &messages::UNCLOSED_COMPOUND_STATEMENT, &[]);
    }
}
