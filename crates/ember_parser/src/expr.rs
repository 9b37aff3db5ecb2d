//! Expression parsing.
//!
//! `parse_expression` is precedence climbing over `parse_lhs`, which handles
//! prefix operators, primaries and the postfix chain. Parenthesized input
//! is classified up front as a parameter list, an empty pair or a plain
//! grouping, since `(x)` and `(x) => x` share a prefix.

use ember_ast::*;
use ember_core::text::SourceLocation;
use ember_diagnostics::messages;
use ember_lexer::{Token, TokenStream};

use crate::error::{ParseError, ParseResult};
use crate::misc::ListOptions;
use crate::number::parse_number;
use crate::parser::Parser;
use crate::precedence::{get_binary_operator_info, OperatorPrecedence};
use crate::string::{parse_char_literal, parse_string_literal};

const ARGUMENT_LIST: ListOptions = ListOptions::new("argument");
const SUBSCRIPT_LIST: ListOptions = ListOptions::new("array index");
const ELEMENT_LIST: ListOptions = ListOptions::new("array element");
const CAPTURE_LIST: ListOptions = ListOptions::new("capture");

/// What an opening parenthesis starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParenShape {
    ParamList,
    /// `()` not followed by an arrow or a return type.
    Empty,
    Expression,
}

fn begins_function_tail(token: Option<Token>) -> bool {
    token.is_some_and(|t| matches!(t.kind, TokenKind::ThinArrow | TokenKind::FatArrow | TokenKind::Colon))
}

/// Classify the tokens following a consumed `(` without moving the stream.
fn classify_paren(stream: &mut TokenStream<'_, '_>) -> ParenShape {
    stream.in_window(|s| {
        let Some(first) = s.peek() else {
            return ParenShape::Expression;
        };
        match first.kind {
            TokenKind::CloseParen => {
                return if begins_function_tail(s.peek_nth(1)) {
                    ParenShape::ParamList
                } else {
                    ParenShape::Empty
                };
            }
            TokenKind::Identifier => match s.peek_nth(1).map(|t| t.kind) {
                Some(TokenKind::Colon | TokenKind::Equal) => return ParenShape::ParamList,
                Some(TokenKind::CloseParen) => {
                    let after = s.peek_nth(2);
                    if begins_function_tail(after) || after.is_some_and(|t| t.kind == TokenKind::LeftSquareBracket) {
                        return ParenShape::ParamList;
                    }
                }
                _ => {}
            },
            _ => {}
        }

        match s.find_next_and_consume(TokenKind::CloseParen) {
            Ok(_) if begins_function_tail(s.peek()) => ParenShape::ParamList,
            _ => ParenShape::Expression,
        }
    })
}

/// Whether a consumed `(` opens a parameter list.
fn is_likely_param_list(stream: &mut TokenStream<'_, '_>) -> bool {
    classify_paren(stream) == ParenShape::ParamList
}

impl<'a, 'b, 's: 'a> Parser<'a, 'b, 's> {
    // ========================================================================
    // Entry points
    // ========================================================================

    /// Parse a full expression, including binary and assignment operators.
    pub fn parse_expression(&mut self) -> ParseResult<&'a Expr<'a>> {
        self.nested(|p| {
            let lhs = p.parse_lhs()?;
            p.parse_binary_rhs(lhs, OperatorPrecedence::Assignment)
        })
    }

    /// Types are ordinary operand expressions: `Int`, `[4]u8`, `?*Node`.
    pub fn parse_type_expression(&mut self) -> ParseResult<&'a Expr<'a>> {
        self.parse_lhs()
    }

    /// Parse an operand: prefix operators, a primary and its postfix chain.
    pub fn parse_lhs(&mut self) -> ParseResult<&'a Expr<'a>> {
        self.nested(|p| p.parse_prefixed())
    }

    fn parse_prefixed(&mut self) -> ParseResult<&'a Expr<'a>> {
        let mut prefixes = Vec::new();
        while let Some(token) = self.peek().filter(|t| t.kind.is_unary_operator()) {
            self.ctx.stream.consume();
            prefixes.push(token);
        }

        if let Some(last) = prefixes.last().copied() {
            if self.ctx.stream.reached_eof() {
                let text = self.text(last);
                self.report(last.loc, &messages::EXPECTED_EXPRESSION_AFTER_OPERATOR, &[text]);
                return Err(ParseError::FailedCouldNotProceed);
            }
        }

        let primary = self.parse_primary()?;
        let mut expr = self.parse_postfix_chain(primary)?;

        for token in prefixes.into_iter().rev() {
            let node = if token.kind == TokenKind::QuestionMark {
                Expr::OptionalType(OptionalTypeExpr {
                    loc: token.loc,
                    inner: expr,
                })
            } else {
                let Some(op) = UnaryOperator::from_token(token.kind) else {
                    continue;
                };
                Expr::Unary(UnaryOperation {
                    loc: token.loc,
                    op,
                    operand: expr,
                })
            };
            expr = self.alloc(node);
        }
        Ok(expr)
    }

    // ========================================================================
    // Binary operators
    // ========================================================================

    fn parse_binary_rhs(&mut self, mut lhs: &'a Expr<'a>, min: OperatorPrecedence) -> ParseResult<&'a Expr<'a>> {
        loop {
            let Some(token) = self.peek() else {
                return Ok(lhs);
            };
            let keyword = self.keyword(token);
            let Some(info) = get_binary_operator_info(token.kind, keyword) else {
                return Ok(lhs);
            };
            if info.precedence < min {
                return Ok(lhs);
            }
            self.ctx.stream.consume();

            if self.ctx.stream.reached_eof() {
                let text = self.text(token);
                self.report(token.loc, &messages::EXPECTED_EXPRESSION_AFTER_OPERATOR, &[text]);
                return Err(ParseError::FailedCouldNotProceed);
            }

            let mut rhs = self.parse_lhs()?;
            while let Some(next) = self.peek() {
                let Some(next_info) = get_binary_operator_info(next.kind, self.keyword(next)) else {
                    break;
                };
                if !info.yields_to(&next_info) {
                    break;
                }
                rhs = self.nested(|p| p.parse_binary_rhs(rhs, next_info.precedence))?;
            }

            lhs = self.build_binary(token, keyword, lhs, rhs)?;
        }
    }

    fn build_binary(
        &mut self,
        token: Token,
        keyword: Option<Keyword>,
        lhs: &'a Expr<'a>,
        rhs: &'a Expr<'a>,
    ) -> ParseResult<&'a Expr<'a>> {
        let loc = token.loc;
        let node = if let Some(op) = AssignmentOperator::from_token(token.kind) {
            Expr::Assignment(AssignmentExpr { loc, op, lhs, rhs })
        } else if keyword == Some(Keyword::As) {
            Expr::Cast(CastExpr {
                loc,
                operand: lhs,
                target: rhs,
            })
        } else {
            let op = BinaryOperator::from_token(token.kind).or_else(|| keyword.and_then(BinaryOperator::from_keyword));
            let Some(op) = op else {
                let text = self.text(token);
                self.report(loc, &messages::UNEXPECTED_TOKEN, &[text]);
                return Err(ParseError::FailedCouldNotProceed);
            };
            Expr::Binary(BinaryOperation { loc, op, lhs, rhs })
        };
        Ok(self.alloc(node))
    }

    // ========================================================================
    // Primary expressions
    // ========================================================================

    fn parse_primary(&mut self) -> ParseResult<&'a Expr<'a>> {
        let Some(token) = self.ctx.stream.consume() else {
            let loc = self.here();
            self.report(loc, &messages::EXPECTED_EXPRESSION, &[]);
            return Err(ParseError::FailedCouldNotProceed);
        };

        let node = match token.kind {
            TokenKind::IntegerLiteral | TokenKind::FloatLiteral => self.number_literal(token),
            TokenKind::CharLiteral => self.char_literal(token),
            TokenKind::StringLiteral => self.string_literal(token),
            TokenKind::Identifier => Expr::DeclRef(DeclRefExpr {
                name: self.name_of(token),
            }),
            TokenKind::DotIdentifier => {
                let text = self.text(token);
                Expr::DotIdentifier(DotIdentifierExpr {
                    loc: token.loc,
                    name: Name::new(&text[1..], token.loc.adding(1)),
                })
            }
            TokenKind::Keyword => return self.parse_keyword_expr(token),
            TokenKind::OpenParen => return self.parse_paren_expr(token),
            TokenKind::LeftSquareBracket => return self.parse_square_bracket_expr(token),
            _ => {
                self.ctx.stream.go_back(1);
                let text = self.text(token);
                self.report(token.loc, &messages::UNEXPECTED_TOKEN, &[text]);
                return Err(ParseError::FailedCouldNotProceed);
            }
        };
        Ok(self.alloc(node))
    }

    fn number_literal(&mut self, token: Token) -> Expr<'a> {
        let text = self.text(token);
        let result = parse_number(text, &self.ctx.options);
        if let Err(error) = &result {
            let message = error.kind.to_string();
            self.report(
                token.loc.adding(error.index as u32),
                &messages::INVALID_NUMBER_LITERAL,
                &[&message],
            );
        }
        let suffix = result.as_ref().ok().and_then(|parts| parts.suffix);
        Expr::Number(NumberLiteral {
            loc: token.loc,
            text,
            suffix,
            value: result.map(|parts| parts.number),
        })
    }

    fn literal_error_loc(token: Token, error: &LiteralError) -> SourceLocation {
        token.loc.adding(error.index().unwrap_or(0) as u32)
    }

    fn char_literal(&mut self, token: Token) -> Expr<'a> {
        let text = self.text(token);
        let value = parse_char_literal(text);
        if let Err(error) = &value {
            let message = error.to_string();
            self.report(
                Self::literal_error_loc(token, error),
                &messages::INVALID_CHAR_LITERAL,
                &[&message],
            );
        }
        Expr::Char(CharLiteral {
            loc: token.loc,
            text,
            value,
        })
    }

    fn string_literal(&mut self, token: Token) -> Expr<'a> {
        let text = self.text(token);
        let arena = self.arena;
        let value = parse_string_literal(text).map(|decoded| arena.alloc_str(&decoded));
        if let Err(error) = &value {
            let message = error.to_string();
            self.report(
                Self::literal_error_loc(token, error),
                &messages::INVALID_STRING_LITERAL,
                &[&message],
            );
        }
        Expr::String(StringLiteral {
            loc: token.loc,
            text,
            value,
        })
    }

    fn parse_keyword_expr(&mut self, token: Token) -> ParseResult<&'a Expr<'a>> {
        let keyword = self.keyword(token);
        let decl = match keyword {
            Some(Keyword::Struct) => self.parse_record_decl(token, RecordKind::Struct, Qualifiers::new())?,
            Some(Keyword::Shape) => self.parse_record_decl(token, RecordKind::Shape, Qualifiers::new())?,
            Some(Keyword::Union) => self.parse_record_decl(token, RecordKind::Union, Qualifiers::new())?,
            Some(Keyword::Interface) => self.parse_record_decl(token, RecordKind::Interface, Qualifiers::new())?,
            Some(Keyword::Func) => self.parse_function_decl(token, Qualifiers::new())?,
            Some(Keyword::If) => return self.parse_if_expr(token),
            _ => {
                let text = self.text(token);
                self.report(token.loc, &messages::KEYWORD_IN_EXPRESSION, &[text]);
                return Err(ParseError::FailedCouldNotProceed);
            }
        };

        if let Some(name) = decl.name() {
            self.report(name.loc, &messages::NAME_WILL_BE_UNUSED, &[name.text]);
        }
        Ok(self.alloc(Expr::Decl(decl)))
    }

    // ========================================================================
    // Parentheses: grouping, arrow functions and function types
    // ========================================================================

    fn parse_paren_expr(&mut self, paren: Token) -> ParseResult<&'a Expr<'a>> {
        match classify_paren(&mut self.ctx.stream) {
            ParenShape::ParamList => self.parse_function_like(paren),
            ParenShape::Empty => {
                self.report(paren.loc, &messages::EMPTY_PARENTHESES, &[]);
                self.eat(TokenKind::CloseParen);
                Err(ParseError::FailedAndProceeded)
            }
            ParenShape::Expression => {
                let inner = self.parse_expression()?;
                if self.eat(TokenKind::CloseParen).is_none() {
                    self.report(paren.loc, &messages::EXPECTED_CLOSING_PAREN, &[]);
                    return Err(match self.ctx.stream.find_next_and_consume(TokenKind::CloseParen) {
                        Ok(_) => ParseError::FailedAndProceeded,
                        Err(_) => ParseError::FailedCouldNotProceed,
                    });
                }
                Ok(self.alloc(Expr::Paren(ParenExpr { loc: paren.loc, inner })))
            }
        }
    }

    /// `(params) -> T` is a function type, `(params) -> T { ... }` and
    /// `(params) [: T] => body` are arrow functions.
    fn parse_function_like(&mut self, paren: Token) -> ParseResult<&'a Expr<'a>> {
        let params = self.parse_param_list()?;

        if let Some(arrow) = self.eat(TokenKind::ThinArrow) {
            if self.ctx.stream.reached_eof() {
                self.report(arrow.loc, &messages::EXPECTED_TYPE_EXPRESSION, &["->"]);
                return Err(ParseError::FailedCouldNotProceed);
            }
            let return_type = self.parse_type_expression()?;
            if let Some(brace) = self.eat(TokenKind::OpenCurlyBrace) {
                let body = self.parse_compound_stmt(brace)?;
                let decl = self.alloc(Decl::ArrowFunction(ArrowFunctionDecl {
                    loc: paren.loc,
                    params,
                    return_type: Some(return_type),
                    body,
                }));
                return Ok(self.alloc(Expr::Decl(decl)));
            }
            return Ok(self.alloc(Expr::FunctionType(FunctionTypeExpr {
                loc: paren.loc,
                params,
                return_type,
            })));
        }

        let (return_type, body) = self.parse_arrow_tail()?;
        let decl = self.alloc(Decl::ArrowFunction(ArrowFunctionDecl {
            loc: paren.loc,
            params,
            return_type,
            body,
        }));
        Ok(self.alloc(Expr::Decl(decl)))
    }

    /// `[: RetType] => body` after a parameter list.
    fn parse_arrow_tail(&mut self) -> ParseResult<(Option<&'a Expr<'a>>, &'a CompoundStmt<'a>)> {
        let return_type = match self.eat(TokenKind::Colon) {
            Some(_) => Some(self.parse_type_expression()?),
            None => None,
        };
        if self.eat(TokenKind::FatArrow).is_none() {
            let loc = self.here();
            self.report(loc, &messages::EXPECTED_FAT_ARROW, &[]);
        }
        let body = self.parse_arrow_body()?;
        Ok((return_type, body))
    }

    /// A block, a `return` statement, or an expression returned implicitly.
    pub(crate) fn parse_arrow_body(&mut self) -> ParseResult<&'a CompoundStmt<'a>> {
        if let Some(brace) = self.eat(TokenKind::OpenCurlyBrace) {
            return self.parse_compound_stmt(brace);
        }
        if self.ctx.stream.reached_eof() {
            let loc = self.here();
            self.report(loc, &messages::EXPECTED_ARROW_BODY, &[]);
            return Err(ParseError::FailedCouldNotProceed);
        }

        let ret = match self.eat_keyword(Keyword::Return) {
            Some(token) => self.parse_return_tail(token)?,
            None => {
                let value = self.parse_expression()?;
                self.alloc(ReturnStmt {
                    loc: SourceLocation::INVALID,
                    value: Some(value),
                })
            }
        };
        let stmts = self.alloc_slice(vec![Stmt::Return(ret)]);
        Ok(self.alloc(CompoundStmt {
            loc: SourceLocation::INVALID,
            stmts,
        }))
    }

    // ========================================================================
    // Square brackets: arrays, array types and closures
    // ========================================================================

    fn parse_square_bracket_expr(&mut self, bracket: Token) -> ParseResult<&'a Expr<'a>> {
        let is_closure = self.ctx.stream.in_window(|s| {
            if s.find_next_and_consume(TokenKind::RightSquareBracket).is_err() {
                return false;
            }
            if s.consume_if_is(TokenKind::OpenParen).is_none() {
                return false;
            }
            is_likely_param_list(s)
        });
        if is_closure {
            return self.parse_closure(bracket);
        }

        let elements = self.parse_list_with_separator(
            TokenKind::RightSquareBracket,
            TokenKind::Comma,
            &ELEMENT_LIST,
            |p| p.parse_expression(),
        )?;
        let elements = self.alloc_slice(elements);

        if self.starts_array_element_type() {
            let element = self.parse_lhs()?;
            return Ok(self.alloc(Expr::ArrayType(ArrayTypeExpr {
                loc: bracket.loc,
                sizes: elements,
                element,
            })));
        }

        Ok(self.alloc(Expr::ArrayLiteral(ArrayLiteral {
            loc: bracket.loc,
            elements,
        })))
    }

    /// Whether the token after `[...]` begins the element type of an array
    /// type rather than continuing an array literal.
    fn starts_array_element_type(&self) -> bool {
        let Some(token) = self.peek() else {
            return false;
        };
        let starts_type = |token: Token| match token.kind {
            TokenKind::Identifier | TokenKind::LeftSquareBracket => true,
            TokenKind::Keyword => matches!(
                self.keyword(token),
                Some(Keyword::Struct | Keyword::Shape | Keyword::Union | Keyword::Interface | Keyword::Func)
            ),
            _ => false,
        };
        match token.kind {
            TokenKind::QuestionMark => self
                .ctx
                .stream
                .peek_nth(1)
                .is_some_and(|next| next.kind == TokenKind::QuestionMark || starts_type(next)),
            _ => starts_type(token),
        }
    }

    fn parse_closure(&mut self, bracket: Token) -> ParseResult<&'a Expr<'a>> {
        let captures = self.parse_list_with_separator(
            TokenKind::RightSquareBracket,
            TokenKind::Comma,
            &CAPTURE_LIST,
            |p| p.parse_capture(),
        )?;
        let captures = self.alloc_slice(captures);

        if self.eat(TokenKind::OpenParen).is_none() {
            let loc = self.here();
            self.report(loc, &messages::EXPECTED_CLOSURE_PARAMS, &[]);
            return Err(ParseError::FailedCouldNotProceed);
        }
        let params = self.parse_param_list()?;
        let (return_type, body) = self.parse_arrow_tail()?;

        let decl = self.alloc(Decl::Closure(ClosureDecl {
            loc: bracket.loc,
            captures,
            params,
            return_type,
            body,
        }));
        Ok(self.alloc(Expr::Decl(decl)))
    }

    /// `&` and `=` capture everything; anything else is a captured expression.
    fn parse_capture(&mut self) -> ParseResult<&'a Expr<'a>> {
        let checkpoint = self.ctx.stream.checkpoint();
        if let Some(token) = self
            .ctx
            .stream
            .consume_if_one_of(&[TokenKind::Ampersand, TokenKind::Equal])
        {
            let qualifiers = self.parse_qualifiers();
            if self
                .ctx
                .stream
                .peek_is_one_of(&[TokenKind::Comma, TokenKind::RightSquareBracket])
            {
                let node = if token.kind == TokenKind::Ampersand {
                    Expr::CaptureAllByRef(CaptureAllByRefExpr {
                        loc: token.loc,
                        qualifiers,
                    })
                } else {
                    Expr::CaptureAllByValue(CaptureAllByValueExpr {
                        loc: token.loc,
                        qualifiers,
                    })
                };
                return Ok(self.alloc(node));
            }
            self.ctx.stream.restore(checkpoint);
        }
        self.parse_expression()
    }

    // ========================================================================
    // Postfix chain
    // ========================================================================

    fn parse_postfix_chain(&mut self, mut expr: &'a Expr<'a>) -> ParseResult<&'a Expr<'a>> {
        if matches!(expr, Expr::ArrayType(_)) {
            return Ok(expr);
        }

        while let Some(token) = self.peek() {
            let node = match token.kind {
                TokenKind::Dot => {
                    self.ctx.stream.consume();
                    let Some(member) = self.eat(TokenKind::Identifier) else {
                        self.report(token.loc, &messages::EXPECTED_FIELD_NAME, &["."]);
                        return Err(ParseError::FailedCouldNotProceed);
                    };
                    Expr::Field(FieldExpr {
                        loc: token.loc,
                        base: expr,
                        member: self.name_of(member),
                        is_arrow: false,
                    })
                }
                TokenKind::ThinArrow => {
                    let Some(member) = self.ctx.stream.peek_nth(1).filter(|t| t.kind == TokenKind::Identifier) else {
                        break;
                    };
                    self.ctx.stream.consume();
                    self.ctx.stream.consume();
                    Expr::Field(FieldExpr {
                        loc: token.loc,
                        base: expr,
                        member: self.name_of(member),
                        is_arrow: true,
                    })
                }
                TokenKind::DotIdentifier => {
                    self.ctx.stream.consume();
                    let text = self.text(token);
                    Expr::Field(FieldExpr {
                        loc: token.loc,
                        base: expr,
                        member: Name::new(&text[1..], token.loc.adding(1)),
                        is_arrow: false,
                    })
                }
                TokenKind::DotStar => {
                    self.ctx.stream.consume();
                    Expr::Deref(DerefExpr {
                        loc: token.loc,
                        operand: expr,
                    })
                }
                TokenKind::QuestionMark => {
                    self.ctx.stream.consume();
                    Expr::OptionalUnwrap(OptionalUnwrapExpr {
                        loc: token.loc,
                        operand: expr,
                    })
                }
                TokenKind::LeftSquareBracket => {
                    self.ctx.stream.consume();
                    let indices = self.parse_list_with_separator(
                        TokenKind::RightSquareBracket,
                        TokenKind::Comma,
                        &SUBSCRIPT_LIST,
                        |p| p.parse_expression(),
                    )?;
                    Expr::Subscript(ArraySubscriptExpr {
                        loc: token.loc,
                        base: expr,
                        indices: self.alloc_slice(indices),
                    })
                }
                TokenKind::OpenParen => {
                    self.ctx.stream.consume();
                    let args = self.parse_list_with_separator(
                        TokenKind::CloseParen,
                        TokenKind::Comma,
                        &ARGUMENT_LIST,
                        |p| p.parse_call_arg(),
                    )?;
                    Expr::Call(CallExpr {
                        loc: token.loc,
                        callee: expr,
                        args: self.alloc_slice(args),
                    })
                }
                _ => break,
            };
            expr = self.alloc(node);
        }
        Ok(expr)
    }

    /// `value` or `label: value`.
    fn parse_call_arg(&mut self) -> ParseResult<CallArg<'a>> {
        let stream = &self.ctx.stream;
        let labeled = stream.peek_is(TokenKind::Identifier)
            && stream.peek_nth(1).is_some_and(|t| t.kind == TokenKind::Colon);
        let label = if labeled {
            let token = self.ctx.stream.consume();
            self.ctx.stream.consume();
            token.map(|t| self.name_of(t))
        } else {
            None
        };
        let value = self.parse_expression()?;
        Ok(CallArg { label, value })
    }

    // ========================================================================
    // If-expressions
    // ========================================================================

    /// `if cond then [else otherwise]`, with `if_token` already consumed.
    pub(crate) fn parse_if_expr(&mut self, if_token: Token) -> ParseResult<&'a Expr<'a>> {
        if self.ctx.stream.reached_eof() || self.at(TokenKind::OpenCurlyBrace) {
            self.report(if_token.loc, &messages::EXPECTED_IF_CONDITION, &[]);
            return Err(ParseError::FailedCouldNotProceed);
        }

        let condition = self.parse_expression()?;
        if self.options().require_parens_on_if_expr && !matches!(condition, Expr::Paren(_)) {
            self.report(condition.loc(), &messages::IF_CONDITION_REQUIRES_PARENS, &[]);
        }

        let then_branch = self.parse_branch("if")?;
        let else_branch = match self.eat_keyword(Keyword::Else) {
            Some(_) => match self.eat_keyword(Keyword::If) {
                Some(nested_if) => Some(Stmt::Expr(self.nested(|p| p.parse_if_expr(nested_if))?)),
                None => Some(self.parse_branch("else")?),
            },
            None => None,
        };

        Ok(self.alloc(Expr::If(IfExpr {
            loc: if_token.loc,
            condition,
            then_branch,
            else_branch,
        })))
    }

    /// A block, or a single statement with its terminator.
    fn parse_branch(&mut self, after: &str) -> ParseResult<Stmt<'a>> {
        if let Some(brace) = self.eat(TokenKind::OpenCurlyBrace) {
            return Ok(Stmt::Compound(self.parse_compound_stmt(brace)?));
        }
        if self.ctx.stream.reached_eof() {
            let loc = self.here();
            self.report(loc, &messages::EXPECTED_STATEMENT_AFTER, &[after]);
            return Err(ParseError::FailedCouldNotProceed);
        }
        let stmt = self.parse_stmt()?;
        self.expect_terminator(&stmt);
        Ok(stmt)
    }
}
