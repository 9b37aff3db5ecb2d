//! Declarations: variables, destructuring patterns, parameters, functions
//! and records.

use ember_ast::*;
use ember_diagnostics::messages;
use ember_lexer::Token;

use crate::error::{ParseError, ParseResult};
use crate::misc::ListOptions;
use crate::parser::Parser;

const PARAM_LIST: ListOptions = ListOptions::new("parameter").warn_on_trailing();
const FIELD_LIST: ListOptions = ListOptions::new("field");
const ARRAY_BINDING_LIST: ListOptions = ListOptions::new("array binding");
const OBJECT_BINDING_LIST: ListOptions = ListOptions::new("object binding");

impl<'a, 'b, 's: 'a> Parser<'a, 'b, 's> {
    // ========================================================================
    // Variables
    // ========================================================================

    /// `let [quals] name [: Type] = init`, or a destructuring `let`.
    ///
    /// `qualifiers` are the ones written before `let`; any written after it
    /// are merged in.
    pub(crate) fn parse_var_decl(&mut self, let_token: Token, mut qualifiers: Qualifiers) -> ParseResult<&'a Decl<'a>> {
        qualifiers.merge(&self.parse_qualifiers());

        let Some(token) = self.peek() else {
            self.report(let_token.loc, &messages::EXPECTED_DECL_NAME, &["variable", "end of file"]);
            return Err(ParseError::FailedCouldNotProceed);
        };

        let decl = match token.kind {
            TokenKind::LeftSquareBracket => {
                self.ctx.stream.consume();
                let items = self.parse_array_binding_items()?;
                let init = self.parse_var_init()?;
                Decl::ArrayDestructure(ArrayDestructuredVarDecl {
                    loc: token.loc,
                    qualifiers,
                    items,
                    init,
                })
            }
            TokenKind::OpenCurlyBrace => {
                self.ctx.stream.consume();
                let fields = self.parse_object_binding_fields()?;
                let init = self.parse_var_init()?;
                Decl::ObjectDestructure(ObjectDestructuredVarDecl {
                    loc: token.loc,
                    qualifiers,
                    fields,
                    init,
                })
            }
            TokenKind::Identifier => {
                self.ctx.stream.consume();
                let name = self.name_of(token);
                let type_annotation = self.parse_type_annotation_if_found()?;
                let init = self.parse_var_init()?;
                Decl::Var(VarDecl {
                    loc: token.loc,
                    qualifiers,
                    name,
                    type_annotation,
                    init,
                })
            }
            TokenKind::Keyword => {
                self.ctx.stream.consume();
                self.report(token.loc, &messages::KEYWORD_AS_NAME, &["variable"]);
                return Err(ParseError::FailedAndProceeded);
            }
            _ => {
                let text = self.text(token);
                self.report(token.loc, &messages::EXPECTED_DECL_NAME, &["variable", text]);
                return Err(ParseError::FailedCouldNotProceed);
            }
        };
        Ok(self.alloc(decl))
    }

    /// `= init`. A missing initializer is reported and yields `None`.
    fn parse_var_init(&mut self) -> ParseResult<Option<&'a Expr<'a>>> {
        if self.eat(TokenKind::Equal).is_none() {
            let loc = self.here();
            self.report(loc, &messages::VAR_REQUIRES_INIT, &[]);
            return Ok(None);
        }
        self.parse_expression().map(Some)
    }

    /// `: Type` if the next token is a colon.
    fn parse_type_annotation_if_found(&mut self) -> ParseResult<Option<&'a Expr<'a>>> {
        let Some(colon) = self.eat(TokenKind::Colon) else {
            return Ok(None);
        };
        let missing = match self.peek_kind() {
            None => true,
            Some(kind) => matches!(
                kind,
                TokenKind::Equal
                    | TokenKind::Comma
                    | TokenKind::CloseParen
                    | TokenKind::Semicolon
                    | TokenKind::CloseCurlyBrace
            ),
        };
        if missing {
            self.report(colon.loc, &messages::EXPECTED_TYPE_ANNOTATION, &[]);
            return Ok(None);
        }
        self.parse_type_expression().map(Some)
    }

    // ========================================================================
    // Destructuring patterns
    // ========================================================================

    fn parse_array_binding_items(&mut self) -> ParseResult<&'a [ArrayBindingItem<'a>]> {
        let items = self.parse_list_with_separator(
            TokenKind::RightSquareBracket,
            TokenKind::Comma,
            &ARRAY_BINDING_LIST,
            |p| p.parse_array_binding_item(),
        )?;
        Ok(self.alloc_slice(items))
    }

    /// `[quals] pattern` or `[quals] index: [quals] pattern`.
    fn parse_array_binding_item(&mut self) -> ParseResult<ArrayBindingItem<'a>> {
        let loc = self.here();
        let mut qualifiers = self.parse_qualifiers();

        let direct = match self.peek_kind() {
            Some(TokenKind::LeftSquareBracket | TokenKind::OpenCurlyBrace | TokenKind::DotDotDot) => true,
            Some(TokenKind::Identifier) => !self
                .ctx
                .stream
                .peek_nth(1)
                .is_some_and(|t| t.kind == TokenKind::Colon),
            _ => false,
        };

        let index = if direct {
            None
        } else {
            let index = self.parse_expression()?;
            if self.eat(TokenKind::Colon).is_none() {
                let here = self.here();
                self.report(here, &messages::EXPECTED_COLON_AFTER_INDEX, &[]);
                return Err(ParseError::FailedAndProceeded);
            }
            qualifiers.merge(&self.parse_qualifiers());
            Some(index)
        };

        let pattern = self.parse_binding_pattern()?;
        Ok(ArrayBindingItem {
            loc,
            index,
            qualifiers,
            pattern,
        })
    }

    fn parse_binding_pattern(&mut self) -> ParseResult<BindingPattern<'a>> {
        self.nested(|p| {
            let Some(token) = p.ctx.stream.consume() else {
                let loc = p.here();
                p.report(loc, &messages::EXPECTED_BINDING, &["end of file"]);
                return Err(ParseError::FailedCouldNotProceed);
            };
            match token.kind {
                TokenKind::Identifier => Ok(BindingPattern::Identifier(p.name_of(token))),
                TokenKind::LeftSquareBracket => Ok(BindingPattern::Array(p.parse_array_binding_items()?)),
                TokenKind::OpenCurlyBrace => Ok(BindingPattern::Object(p.parse_object_binding_fields()?)),
                TokenKind::DotDotDot => match p.eat(TokenKind::Identifier) {
                    Some(name) => Ok(BindingPattern::Spread(p.name_of(name))),
                    None => {
                        p.report(token.loc, &messages::EXPECTED_SPREAD_NAME, &[]);
                        Err(ParseError::FailedAndProceeded)
                    }
                },
                _ => {
                    p.ctx.stream.go_back(1);
                    let text = p.text(token);
                    p.report(token.loc, &messages::EXPECTED_BINDING, &[text]);
                    Err(ParseError::FailedAndProceeded)
                }
            }
        })
    }

    fn parse_object_binding_fields(&mut self) -> ParseResult<&'a [ObjectBindingField<'a>]> {
        let fields = self.parse_list_with_separator(
            TokenKind::CloseCurlyBrace,
            TokenKind::Comma,
            &OBJECT_BINDING_LIST,
            |p| p.parse_object_binding_field(),
        )?;
        Ok(self.alloc_slice(fields))
    }

    /// `[quals] key`, `[quals] key: [quals] pattern` or `[quals] ...name`.
    fn parse_object_binding_field(&mut self) -> ParseResult<ObjectBindingField<'a>> {
        let loc = self.here();
        let mut qualifiers = self.parse_qualifiers();

        if self.at(TokenKind::DotDotDot) {
            let pattern = self.parse_binding_pattern()?;
            return Ok(ObjectBindingField {
                loc,
                key: None,
                qualifiers,
                pattern,
            });
        }

        let Some(key) = self.eat(TokenKind::Identifier) else {
            let text = self.peek_text();
            self.report(loc, &messages::EXPECTED_BINDING_KEY, &[text]);
            return Err(ParseError::FailedAndProceeded);
        };
        let key = self.name_of(key);

        let pattern = if self.eat(TokenKind::Colon).is_some() {
            qualifiers.merge(&self.parse_qualifiers());
            self.parse_binding_pattern()?
        } else {
            BindingPattern::Identifier(key)
        };
        Ok(ObjectBindingField {
            loc,
            key: Some(key),
            qualifiers,
            pattern,
        })
    }

    // ========================================================================
    // Parameters
    // ========================================================================

    /// The parameters after a consumed `(`, up to and including `)`.
    pub(crate) fn parse_param_list(&mut self) -> ParseResult<&'a [ParamVarDecl<'a>]> {
        let params = self.parse_list_with_separator(TokenKind::CloseParen, TokenKind::Comma, &PARAM_LIST, |p| {
            p.parse_param()
        })?;
        Ok(self.alloc_slice(params))
    }

    /// `[quals] name|pattern [...] [: Type] [= default]`
    fn parse_param(&mut self) -> ParseResult<ParamVarDecl<'a>> {
        let qualifiers = self.parse_qualifiers();
        let Some(token) = self.peek() else {
            let loc = self.here();
            self.report(loc, &messages::EXPECTED_DECL_NAME, &["parameter", "end of file"]);
            return Err(ParseError::FailedCouldNotProceed);
        };

        let binding = match token.kind {
            TokenKind::Identifier => {
                self.ctx.stream.consume();
                ParamBinding::Name(self.name_of(token))
            }
            TokenKind::LeftSquareBracket => {
                self.ctx.stream.consume();
                ParamBinding::Array(self.parse_array_binding_items()?)
            }
            TokenKind::OpenCurlyBrace => {
                self.ctx.stream.consume();
                ParamBinding::Object(self.parse_object_binding_fields()?)
            }
            TokenKind::Keyword => {
                self.ctx.stream.consume();
                self.report(token.loc, &messages::KEYWORD_AS_NAME, &["parameter"]);
                return Err(ParseError::FailedAndProceeded);
            }
            _ => {
                let text = self.text(token);
                self.report(token.loc, &messages::EXPECTED_DECL_NAME, &["parameter", text]);
                return Err(ParseError::FailedCouldNotProceed);
            }
        };

        let is_inline_array = self.eat(TokenKind::DotDotDot).is_some();
        let type_annotation = self.parse_type_annotation_if_found()?;
        let default_value = match self.eat(TokenKind::Equal) {
            Some(_) => Some(self.parse_expression()?),
            None => None,
        };

        Ok(ParamVarDecl {
            loc: token.loc,
            qualifiers,
            binding,
            is_inline_array,
            type_annotation,
            default_value,
        })
    }

    // ========================================================================
    // Functions
    // ========================================================================

    /// `func [name](params) [-> RetType] { body }` or `... => expr`, with
    /// `func` already consumed.
    pub(crate) fn parse_function_decl(&mut self, func_token: Token, qualifiers: Qualifiers) -> ParseResult<&'a Decl<'a>> {
        let name = match self.peek() {
            Some(token) if token.kind == TokenKind::Identifier => {
                self.ctx.stream.consume();
                Some(self.name_of(token))
            }
            Some(token) if token.kind == TokenKind::Keyword => {
                self.ctx.stream.consume();
                self.report(token.loc, &messages::KEYWORD_AS_NAME, &["function"]);
                Some(self.name_of(token))
            }
            _ => None,
        };

        if self.eat(TokenKind::OpenParen).is_none() {
            let loc = self.here();
            self.report(loc, &messages::EXPECTED_FUNCTION_PARAMS, &[]);
            return Err(ParseError::FailedCouldNotProceed);
        }
        let params = self.parse_param_list()?;

        let return_type = match self.eat(TokenKind::ThinArrow) {
            Some(arrow) => {
                let missing = match self.peek_kind() {
                    None => true,
                    Some(kind) => matches!(
                        kind,
                        TokenKind::Equal | TokenKind::OpenCurlyBrace | TokenKind::FatArrow
                    ),
                };
                if missing {
                    self.report(arrow.loc, &messages::EXPECTED_RETURN_TYPE, &[]);
                    None
                } else {
                    Some(self.parse_type_expression()?)
                }
            }
            None => None,
        };

        let decl = self.alloc(Decl::Function(FunctionDecl::new(
            func_token.loc,
            qualifiers,
            name,
            params,
            return_type,
        )));

        let body = if let Some(brace) = self.eat(TokenKind::OpenCurlyBrace) {
            self.parse_compound_stmt(brace)?
        } else if self.eat(TokenKind::FatArrow).is_some() {
            self.parse_arrow_body()?
        } else {
            let loc = self.here();
            self.report(loc, &messages::EXPECTED_FUNCTION_BODY, &[]);
            return Err(ParseError::FailedCouldNotProceed);
        };

        if let Decl::Function(function) = decl {
            function.set_body(body);
        }
        Ok(decl)
    }

    // ========================================================================
    // Records
    // ========================================================================

    /// `struct|shape|union|interface [Name] { fields }`, with the keyword
    /// already consumed.
    pub(crate) fn parse_record_decl(
        &mut self,
        keyword: Token,
        record_kind: RecordKind,
        qualifiers: Qualifiers,
    ) -> ParseResult<&'a Decl<'a>> {
        let name = match self.peek() {
            Some(token) if token.kind == TokenKind::Identifier => {
                self.ctx.stream.consume();
                Some(self.name_of(token))
            }
            Some(token) if token.kind == TokenKind::Keyword => {
                self.ctx.stream.consume();
                self.report(token.loc, &messages::KEYWORD_AS_NAME, &[record_kind.keyword_text()]);
                Some(self.name_of(token))
            }
            _ => None,
        };

        if self.eat(TokenKind::OpenCurlyBrace).is_none() {
            let loc = self.here();
            self.report(loc, &messages::EXPECTED_RECORD_BODY, &[record_kind.keyword_text()]);
            return Err(ParseError::FailedCouldNotProceed);
        }

        let fields = self.parse_list_with_separator(TokenKind::CloseCurlyBrace, TokenKind::Comma, &FIELD_LIST, |p| {
            p.parse_field(record_kind)
        })?;
        let fields = self.alloc_slice(fields);

        Ok(self.alloc(Decl::Record(RecordDecl {
            record_kind,
            loc: keyword.loc,
            qualifiers,
            name,
            fields,
        })))
    }

    /// `[quals] name[?]: Type [= default]`
    fn parse_field(&mut self, record_kind: RecordKind) -> ParseResult<FieldDecl<'a>> {
        let qualifiers = self.parse_qualifiers();
        let token = match self.peek() {
            Some(token) if token.kind == TokenKind::Identifier => token,
            Some(token) if token.kind == TokenKind::Keyword => {
                self.report(token.loc, &messages::KEYWORD_AS_NAME, &["field"]);
                token
            }
            _ => {
                let loc = self.here();
                let text = self.peek_text();
                self.report(loc, &messages::EXPECTED_DECL_NAME, &["field", text]);
                return Err(ParseError::FailedCouldNotProceed);
            }
        };
        self.ctx.stream.consume();
        let name = self.name_of(token);

        let is_optional = match self.eat(TokenKind::QuestionMark) {
            Some(mark) => {
                if !record_kind.allows_optional_fields() {
                    self.report(mark.loc, &messages::OPTIONAL_FIELD_NOT_ALLOWED, &[]);
                }
                true
            }
            None => false,
        };

        let type_annotation = if let Some(colon) = self.eat(TokenKind::Colon) {
            let missing = match self.peek_kind() {
                None => true,
                Some(kind) => matches!(
                    kind,
                    TokenKind::Equal | TokenKind::Comma | TokenKind::CloseCurlyBrace
                ),
            };
            if missing {
                self.report(colon.loc, &messages::EXPECTED_TYPE_ANNOTATION, &[]);
                None
            } else {
                Some(self.parse_type_expression()?)
            }
        } else {
            self.report(token.loc, &messages::FIELD_REQUIRES_TYPE, &[]);
            let at_boundary = self
                .ctx
                .stream
                .peek_is_one_of(&[TokenKind::Equal, TokenKind::Comma, TokenKind::CloseCurlyBrace]);
            if !at_boundary {
                return Err(ParseError::FailedAndProceeded);
            }
            None
        };

        let default_value = match self.eat(TokenKind::Equal) {
            Some(_) => Some(self.parse_expression()?),
            None => None,
        };

        Ok(FieldDecl {
            loc: token.loc,
            qualifiers,
            name,
            is_optional,
            type_annotation,
            default_value,
        })
    }
}
