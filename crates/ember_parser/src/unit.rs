//! A parsed source file: its top-level statements and name table.

use ember_ast::visitor::{walk_pattern, AstVisitor};
use ember_ast::{BindingPattern, Decl, Expr, Name, Stmt};
use ember_core::collections::FxIndexMap;
use ember_core::{Arena, InternedString, StringInterner};
use ember_diagnostics::{messages, Diagnostic, DiagnosticSink};
use ember_lexer::{TokenBuffer, TokenStream};
use ember_options::ParseOptions;
use tracing::{debug, trace};

use crate::context::ParseContext;
use crate::error::ParseError;
use crate::parser::Parser;

/// A name declared at the top level and the statement declaring it.
#[derive(Debug, Clone, Copy)]
pub struct TopLevelName<'a> {
    pub name: Name<'a>,
    pub stmt: Stmt<'a>,
}

/// Forwards to another sink, counting errors on the way.
struct CountingSink<'d> {
    inner: &'d mut dyn DiagnosticSink,
    errors: usize,
}

impl DiagnosticSink for CountingSink<'_> {
    fn consume(&mut self, diagnostic: Diagnostic) {
        if diagnostic.is_error() {
            self.errors += 1;
        }
        self.inner.consume(diagnostic);
    }
}

/// Collects every name bound by a destructuring pattern.
#[derive(Default)]
struct BindingNameCollector<'a> {
    names: Vec<Name<'a>>,
}

impl<'a> AstVisitor<'a> for BindingNameCollector<'a> {
    fn visit_expr(&mut self, _expr: &Expr<'a>) {}

    fn visit_pattern(&mut self, pattern: &BindingPattern<'a>) {
        match pattern {
            BindingPattern::Identifier(name) | BindingPattern::Spread(name) => self.names.push(*name),
            _ => walk_pattern(self, pattern),
        }
    }
}

/// The names a top-level statement introduces.
fn declared_names<'a>(stmt: &Stmt<'a>) -> Vec<Name<'a>> {
    let Some(decl) = stmt.as_decl() else {
        return Vec::new();
    };
    match decl {
        Decl::ArrayDestructure(_) | Decl::ObjectDestructure(_) => {
            let mut collector = BindingNameCollector::default();
            collector.visit_decl(decl);
            collector.names
        }
        _ => stmt
            .as_named_decl()
            .and_then(|decl| decl.name())
            .into_iter()
            .collect(),
    }
}

/// One source file parsed to the end.
pub struct ParseUnit<'a> {
    statements: Vec<Stmt<'a>>,
    names: FxIndexMap<InternedString, TopLevelName<'a>>,
    interner: StringInterner,
    error_count: usize,
}

impl<'a> ParseUnit<'a> {
    /// Parse every top-level statement of `buffer` into `arena`.
    ///
    /// A statement that fails but leaves the stream at a recovery point is
    /// dropped and parsing continues; a statement that cannot be recovered
    /// from ends the unit.
    pub fn create<'s: 'a>(
        arena: &'a Arena,
        buffer: &TokenBuffer<'s>,
        diag: &mut dyn DiagnosticSink,
        options: ParseOptions,
    ) -> ParseUnit<'a> {
        let mut sink = CountingSink { inner: diag, errors: 0 };
        let mut unit = ParseUnit {
            statements: Vec::new(),
            names: FxIndexMap::default(),
            interner: StringInterner::new(),
            error_count: 0,
        };

        {
            let ctx = ParseContext::new(TokenStream::new(buffer), &mut sink, options);
            let mut parser = Parser::new(arena, ctx);

            while !parser.stream().reached_eof() {
                match parser.parse_stmt() {
                    Ok(stmt) => {
                        if let Some(expr) = stmt.as_expr() {
                            if !expr.is_assignment() && !expr.is_if() && !options.ignore_unused_expressions {
                                parser.report(expr.loc(), &messages::UNUSED_EXPRESSION, &[]);
                            }
                        }
                        parser.expect_terminator(&stmt);
                        unit.register_names(&mut parser, stmt);
                        trace!(kind = %stmt.kind(), loc = %stmt.loc(), "top-level statement");
                        unit.statements.push(stmt);
                    }
                    Err(ParseError::FailedAndProceeded) => {
                        debug!(position = parser.stream().position(), "recovered from failed statement");
                    }
                    Err(ParseError::FailedCouldNotProceed) => {
                        debug!(position = parser.stream().position(), "could not recover, stopping");
                        break;
                    }
                }
            }
        }

        unit.error_count = sink.errors;
        debug!(
            statements = unit.statements.len(),
            names = unit.names.len(),
            errors = unit.error_count,
            "parsed unit"
        );
        unit
    }

    fn register_names<'b, 's: 'a>(&mut self, parser: &mut Parser<'a, 'b, 's>, stmt: Stmt<'a>) {
        for name in declared_names(&stmt) {
            let key = self.interner.intern(name.text);
            if let Some(previous) = self.names.get(&key) {
                let previous_loc = previous.name.loc;
                debug!(name = name.text, loc = %name.loc, previous = %previous_loc, "duplicate top-level name");
                parser.report(name.loc, &messages::DUPLICATE_DECL_NAME, &[name.text]);
                parser.report(previous_loc, &messages::PREVIOUS_DECLARATION_HERE, &[name.text]);
                continue;
            }
            self.names.insert(key, TopLevelName { name, stmt });
        }
    }

    /// Top-level statements in source order.
    pub fn statements(&self) -> &[Stmt<'a>] {
        &self.statements
    }

    /// The first top-level declaration of `name`.
    pub fn lookup(&self, name: &str) -> Option<&TopLevelName<'a>> {
        let key = self.interner.get(name)?;
        self.names.get(&key)
    }

    /// Declared names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &TopLevelName<'a>> {
        self.names.values()
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }
}
