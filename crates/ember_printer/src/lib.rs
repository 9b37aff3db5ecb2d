//! ember_printer: AST to S-expression text.
//!
//! Renders the structure of a parsed tree, not its source text. Every node
//! becomes a parenthesized form tagged with its kind, so two inputs that
//! parse to the same tree print identically:
//!
//! ```text
//! 1 + 2 * 3                 (binary + 1 (binary * 2 3))
//! let [a, 2: b, ...rest] = xs;
//!                           (let-array [a (index 2 b) ...rest] xs)
//! ```

use ember_ast::*;

/// Options for the printer.
#[derive(Debug, Clone)]
pub struct PrinterOptions {
    /// Put every statement of a block on its own indented line.
    pub pretty: bool,
    /// Indentation string for pretty output.
    pub indent_str: String,
}

impl Default for PrinterOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            indent_str: "  ".to_string(),
        }
    }
}

/// The printer converts AST nodes to text.
pub struct Printer {
    output: String,
    indent_level: u32,
    options: PrinterOptions,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self::with_options(PrinterOptions::default())
    }

    pub fn with_options(options: PrinterOptions) -> Self {
        Self {
            output: String::with_capacity(1024),
            indent_level: 0,
            options,
        }
    }

    /// Print a list of top-level statements, one per line.
    pub fn print_statements(&mut self, stmts: &[Stmt<'_>]) -> String {
        self.output.clear();
        for (i, stmt) in stmts.iter().enumerate() {
            if i > 0 {
                self.output.push('\n');
            }
            self.print_stmt(stmt);
        }
        std::mem::take(&mut self.output)
    }

    pub fn stmt_to_string(&mut self, stmt: &Stmt<'_>) -> String {
        self.output.clear();
        self.print_stmt(stmt);
        std::mem::take(&mut self.output)
    }

    pub fn expr_to_string(&mut self, expr: &Expr<'_>) -> String {
        self.output.clear();
        self.print_expr(expr);
        std::mem::take(&mut self.output)
    }

    // ========================================================================
    // Output helpers
    // ========================================================================

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
    }

    fn open(&mut self, tag: &str) {
        self.output.push('(');
        self.output.push_str(tag);
    }

    fn close(&mut self) {
        self.output.push(')');
    }

    fn space(&mut self) {
        self.output.push(' ');
    }

    fn newline_and_indent(&mut self) {
        self.output.push('\n');
        for _ in 0..self.indent_level {
            self.output.push_str(&self.options.indent_str);
        }
    }

    fn write_qualifiers(&mut self, qualifiers: &Qualifiers) {
        for keyword in qualifiers.keywords() {
            self.space();
            self.write(keyword.lexeme());
        }
    }

    fn write_exprs(&mut self, exprs: &[&Expr<'_>]) {
        for (i, expr) in exprs.iter().enumerate() {
            if i > 0 {
                self.space();
            }
            self.print_expr(expr);
        }
    }

    // ========================================================================
    // Statements
    // ========================================================================

    fn print_stmt(&mut self, stmt: &Stmt<'_>) {
        match *stmt {
            Stmt::Expr(expr) => self.print_expr(expr),
            Stmt::Decl(decl) => self.print_decl(decl),
            Stmt::Compound(compound) => self.print_compound(compound),
            Stmt::Return(ret) => {
                self.open("return");
                if let Some(value) = ret.value {
                    self.space();
                    self.print_expr(value);
                }
                self.close();
            }
        }
    }

    fn print_compound(&mut self, compound: &CompoundStmt<'_>) {
        self.open("block");
        self.indent_level += 1;
        for stmt in compound.stmts.iter() {
            if self.options.pretty {
                self.newline_and_indent();
            } else {
                self.space();
            }
            self.print_stmt(stmt);
        }
        self.indent_level -= 1;
        self.close();
    }

    // ========================================================================
    // Expressions
    // ========================================================================

    fn print_expr(&mut self, expr: &Expr<'_>) {
        match expr {
            Expr::Number(n) => self.write(n.text),
            Expr::Char(n) => self.write(n.text),
            Expr::String(n) => self.write(n.text),
            Expr::DeclRef(n) => self.write(n.name.text),
            Expr::DotIdentifier(n) => {
                self.write(".");
                self.write(n.name.text);
            }
            Expr::Paren(n) => {
                self.open("paren ");
                self.print_expr(n.inner);
                self.close();
            }
            Expr::Unary(n) => {
                self.open("unary ");
                self.write(n.op.lexeme());
                self.space();
                self.print_expr(n.operand);
                self.close();
            }
            Expr::Binary(n) => {
                self.open("binary ");
                self.write(n.op.lexeme());
                self.space();
                self.print_expr(n.lhs);
                self.space();
                self.print_expr(n.rhs);
                self.close();
            }
            Expr::Assignment(n) => {
                self.open("assign ");
                self.write(n.op.lexeme());
                self.space();
                self.print_expr(n.lhs);
                self.space();
                self.print_expr(n.rhs);
                self.close();
            }
            Expr::Cast(n) => {
                self.open("cast ");
                self.print_expr(n.operand);
                self.space();
                self.print_expr(n.target);
                self.close();
            }
            Expr::Field(n) => {
                self.open(if n.is_arrow { "field-> " } else { "field " });
                self.print_expr(n.base);
                self.space();
                self.write(n.member.text);
                self.close();
            }
            Expr::Deref(n) => {
                self.open("deref ");
                self.print_expr(n.operand);
                self.close();
            }
            Expr::OptionalUnwrap(n) => {
                self.open("unwrap ");
                self.print_expr(n.operand);
                self.close();
            }
            Expr::Subscript(n) => {
                self.open("subscript ");
                self.print_expr(n.base);
                for index in n.indices.iter() {
                    self.space();
                    self.print_expr(index);
                }
                self.close();
            }
            Expr::Call(n) => {
                self.open("call ");
                self.print_expr(n.callee);
                for arg in n.args.iter() {
                    self.space();
                    match arg.label {
                        Some(label) => {
                            self.open("arg ");
                            self.write(label.text);
                            self.space();
                            self.print_expr(arg.value);
                            self.close();
                        }
                        None => self.print_expr(arg.value),
                    }
                }
                self.close();
            }
            Expr::ArrayLiteral(n) => {
                self.open("array");
                for element in n.elements.iter() {
                    self.space();
                    self.print_expr(element);
                }
                self.close();
            }
            Expr::ArrayType(n) => {
                self.open("array-type [");
                self.write_exprs(n.sizes);
                self.write("] ");
                self.print_expr(n.element);
                self.close();
            }
            Expr::OptionalType(n) => {
                self.open("optional ");
                self.print_expr(n.inner);
                self.close();
            }
            Expr::FunctionType(n) => {
                self.open("function-type ");
                self.print_params(n.params);
                self.space();
                self.print_expr(n.return_type);
                self.close();
            }
            Expr::CaptureAllByRef(n) => self.print_capture_all("&", &n.qualifiers),
            Expr::CaptureAllByValue(n) => self.print_capture_all("=", &n.qualifiers),
            Expr::If(n) => {
                self.open("if ");
                self.print_expr(n.condition);
                self.space();
                self.print_stmt(&n.then_branch);
                if let Some(else_branch) = &n.else_branch {
                    self.space();
                    self.print_stmt(else_branch);
                }
                self.close();
            }
            Expr::Decl(decl) => self.print_decl(decl),
        }
    }

    fn print_capture_all(&mut self, symbol: &str, qualifiers: &Qualifiers) {
        if qualifiers.is_empty() {
            self.write(symbol);
            return;
        }
        self.open(symbol);
        self.write_qualifiers(qualifiers);
        self.close();
    }

    // ========================================================================
    // Declarations
    // ========================================================================

    fn print_decl(&mut self, decl: &Decl<'_>) {
        match decl {
            Decl::Param(param) => self.print_param(param),
            Decl::Field(field) => self.print_field(field),
            Decl::Var(var) => {
                self.open("let");
                self.write_qualifiers(&var.qualifiers);
                self.space();
                self.write(var.name.text);
                if let Some(ty) = var.type_annotation {
                    self.write(" : ");
                    self.print_expr(ty);
                }
                if let Some(init) = var.init {
                    self.space();
                    self.print_expr(init);
                }
                self.close();
            }
            Decl::ArrayDestructure(d) => {
                self.open("let-array");
                self.write_qualifiers(&d.qualifiers);
                self.space();
                self.print_array_items(d.items);
                if let Some(init) = d.init {
                    self.space();
                    self.print_expr(init);
                }
                self.close();
            }
            Decl::ObjectDestructure(d) => {
                self.open("let-object");
                self.write_qualifiers(&d.qualifiers);
                self.space();
                self.print_object_fields(d.fields);
                if let Some(init) = d.init {
                    self.space();
                    self.print_expr(init);
                }
                self.close();
            }
            Decl::Function(f) => {
                self.open("func");
                self.write_qualifiers(&f.qualifiers);
                if let Some(name) = f.name {
                    self.space();
                    self.write(name.text);
                }
                self.space();
                self.print_params(f.params);
                self.print_return_type(f.return_type);
                if let Some(body) = f.body() {
                    self.space();
                    self.print_compound(body);
                }
                self.close();
            }
            Decl::ArrowFunction(f) => {
                self.open("arrow ");
                self.print_params(f.params);
                self.print_return_type(f.return_type);
                self.space();
                self.print_compound(f.body);
                self.close();
            }
            Decl::Closure(c) => {
                self.open("closure (captures");
                for capture in c.captures.iter() {
                    self.space();
                    self.print_expr(capture);
                }
                self.write(") ");
                self.print_params(c.params);
                self.print_return_type(c.return_type);
                self.space();
                self.print_compound(c.body);
                self.close();
            }
            Decl::Record(r) => {
                self.open(r.record_kind.keyword_text());
                self.write_qualifiers(&r.qualifiers);
                if let Some(name) = r.name {
                    self.space();
                    self.write(name.text);
                }
                for field in r.fields.iter() {
                    self.space();
                    self.print_field(field);
                }
                self.close();
            }
        }
    }

    fn print_return_type(&mut self, return_type: Option<&Expr<'_>>) {
        if let Some(ty) = return_type {
            self.write(" -> ");
            self.print_expr(ty);
        }
    }

    fn print_params(&mut self, params: &[ParamVarDecl<'_>]) {
        self.open("params");
        for param in params {
            self.space();
            self.print_param(param);
        }
        self.close();
    }

    /// A bare parameter prints as its binding; anything more wraps it.
    fn print_param(&mut self, param: &ParamVarDecl<'_>) {
        let bare = param.qualifiers.is_empty()
            && !param.is_inline_array
            && param.type_annotation.is_none()
            && param.default_value.is_none();
        if bare {
            self.print_param_binding(&param.binding);
            return;
        }

        self.output.push('(');
        for keyword in param.qualifiers.keywords() {
            self.write(keyword.lexeme());
            self.space();
        }
        self.print_param_binding(&param.binding);
        if param.is_inline_array {
            self.write("...");
        }
        if let Some(ty) = param.type_annotation {
            self.write(" : ");
            self.print_expr(ty);
        }
        if let Some(default) = param.default_value {
            self.write(" = ");
            self.print_expr(default);
        }
        self.close();
    }

    fn print_param_binding(&mut self, binding: &ParamBinding<'_>) {
        match binding {
            ParamBinding::Name(name) => self.write(name.text),
            ParamBinding::Array(items) => self.print_array_items(items),
            ParamBinding::Object(fields) => self.print_object_fields(fields),
        }
    }

    /// `(name : T)`, `(name? : T = default)`
    fn print_field(&mut self, field: &FieldDecl<'_>) {
        self.output.push('(');
        for keyword in field.qualifiers.keywords() {
            self.write(keyword.lexeme());
            self.space();
        }
        self.write(field.name.text);
        if field.is_optional {
            self.write("?");
        }
        if let Some(ty) = field.type_annotation {
            self.write(" : ");
            self.print_expr(ty);
        }
        if let Some(default) = field.default_value {
            self.write(" = ");
            self.print_expr(default);
        }
        self.close();
    }

    // ========================================================================
    // Binding patterns
    // ========================================================================

    fn print_pattern(&mut self, pattern: &BindingPattern<'_>) {
        match pattern {
            BindingPattern::Identifier(name) => self.write(name.text),
            BindingPattern::Spread(name) => {
                self.write("...");
                self.write(name.text);
            }
            BindingPattern::Array(items) => self.print_array_items(items),
            BindingPattern::Object(fields) => self.print_object_fields(fields),
        }
    }

    fn print_qualified_pattern(&mut self, qualifiers: &Qualifiers, pattern: &BindingPattern<'_>) {
        if qualifiers.is_empty() {
            self.print_pattern(pattern);
            return;
        }
        self.output.push('(');
        for keyword in qualifiers.keywords() {
            self.write(keyword.lexeme());
            self.space();
        }
        self.print_pattern(pattern);
        self.close();
    }

    fn print_array_items(&mut self, items: &[ArrayBindingItem<'_>]) {
        self.write("[");
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.space();
            }
            match item.index {
                Some(index) => {
                    self.open("index ");
                    self.print_expr(index);
                    self.space();
                    self.print_qualified_pattern(&item.qualifiers, &item.pattern);
                    self.close();
                }
                None => self.print_qualified_pattern(&item.qualifiers, &item.pattern),
            }
        }
        self.write("]");
    }

    fn print_object_fields(&mut self, fields: &[ObjectBindingField<'_>]) {
        self.write("{");
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                self.space();
            }
            match field.key {
                Some(key) if !field.is_shorthand() => {
                    self.open(key.text);
                    self.space();
                    self.print_qualified_pattern(&field.qualifiers, &field.pattern);
                    self.close();
                }
                _ => self.print_qualified_pattern(&field.qualifiers, &field.pattern),
            }
        }
        self.write("}");
    }
}

/// Print top-level statements with default options.
pub fn print_statements(stmts: &[Stmt<'_>]) -> String {
    Printer::new().print_statements(stmts)
}

pub fn print_stmt(stmt: &Stmt<'_>) -> String {
    Printer::new().stmt_to_string(stmt)
}

pub fn print_expr(expr: &Expr<'_>) -> String {
    Printer::new().expr_to_string(expr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_core::text::SourceLocation;
    use ember_core::Arena;

    fn loc(index: u32) -> SourceLocation {
        SourceLocation::new(index, 1, index + 1)
    }

    fn name(text: &str, index: u32) -> Name<'_> {
        Name::new(text, loc(index))
    }

    fn decl_ref<'a>(arena: &'a Arena, text: &'a str) -> &'a Expr<'a> {
        arena.alloc(Expr::DeclRef(DeclRefExpr { name: name(text, 0) }))
    }

    fn number<'a>(arena: &'a Arena, text: &'a str) -> &'a Expr<'a> {
        arena.alloc(Expr::Number(NumberLiteral {
            loc: loc(0),
            text,
            suffix: None,
            value: Err(NumberError::new(NumberErrorKind::Empty, 0)),
        }))
    }

    #[test]
    fn test_binary_and_unary() {
        let arena = Arena::new();
        let product = arena.alloc(Expr::Binary(BinaryOperation {
            loc: loc(2),
            op: BinaryOperator::Multiply,
            lhs: number(&arena, "2"),
            rhs: number(&arena, "3"),
        }));
        let sum = Expr::Binary(BinaryOperation {
            loc: loc(0),
            op: BinaryOperator::Add,
            lhs: number(&arena, "1"),
            rhs: product,
        });
        assert_eq!(print_expr(&sum), "(binary + 1 (binary * 2 3))");

        let negated = Expr::Unary(UnaryOperation {
            loc: loc(0),
            op: UnaryOperator::Negate,
            operand: decl_ref(&arena, "x"),
        });
        assert_eq!(print_expr(&negated), "(unary - x)");
    }

    #[test]
    fn test_array_destructure_shape() {
        let arena = Arena::new();
        let items = arena.alloc_slice(vec![
            ArrayBindingItem {
                loc: loc(5),
                index: None,
                qualifiers: Qualifiers::new(),
                pattern: BindingPattern::Identifier(name("a", 5)),
            },
            ArrayBindingItem {
                loc: loc(8),
                index: Some(number(&arena, "2")),
                qualifiers: Qualifiers::new(),
                pattern: BindingPattern::Identifier(name("b", 11)),
            },
            ArrayBindingItem {
                loc: loc(14),
                index: None,
                qualifiers: Qualifiers::new(),
                pattern: BindingPattern::Spread(name("rest", 17)),
            },
        ]);
        let decl = arena.alloc(Decl::ArrayDestructure(ArrayDestructuredVarDecl {
            loc: loc(4),
            qualifiers: Qualifiers::new(),
            items,
            init: Some(decl_ref(&arena, "xs")),
        }));
        assert_eq!(print_stmt(&Stmt::Decl(decl)), "(let-array [a (index 2 b) ...rest] xs)");
    }

    #[test]
    fn test_object_fields_shorthand() {
        let arena = Arena::new();
        let fields = arena.alloc_slice(vec![
            ObjectBindingField {
                loc: loc(5),
                key: Some(name("x", 5)),
                qualifiers: Qualifiers::new(),
                pattern: BindingPattern::Identifier(name("x", 5)),
            },
            ObjectBindingField {
                loc: loc(8),
                key: Some(name("y", 8)),
                qualifiers: Qualifiers::new(),
                pattern: BindingPattern::Identifier(name("z", 11)),
            },
        ]);
        let decl = arena.alloc(Decl::ObjectDestructure(ObjectDestructuredVarDecl {
            loc: loc(4),
            qualifiers: Qualifiers::new(),
            fields,
            init: Some(decl_ref(&arena, "p")),
        }));
        assert_eq!(print_stmt(&Stmt::Decl(decl)), "(let-object {x (y z)} p)");
    }

    #[test]
    fn test_pretty_block() {
        let arena = Arena::new();
        let ret = arena.alloc(ReturnStmt {
            loc: loc(2),
            value: Some(decl_ref(&arena, "x")),
        });
        let stmts = arena.alloc_slice(vec![Stmt::Expr(decl_ref(&arena, "y")), Stmt::Return(ret)]);
        let block = arena.alloc(CompoundStmt { loc: loc(0), stmts });

        assert_eq!(print_stmt(&Stmt::Compound(block)), "(block y (return x))");

        let mut printer = Printer::with_options(PrinterOptions {
            pretty: true,
            ..PrinterOptions::default()
        });
        assert_eq!(printer.stmt_to_string(&Stmt::Compound(block)), "(block\n  y\n  (return x))");
    }

    #[test]
    fn test_statements_one_per_line() {
        let arena = Arena::new();
        let stmts = [Stmt::Expr(decl_ref(&arena, "a")), Stmt::Expr(decl_ref(&arena, "b"))];
        assert_eq!(print_statements(&stmts), "a\nb");
        assert_eq!(print_statements(&[]), "");
    }
}
