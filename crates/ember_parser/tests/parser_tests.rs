//! Parser integration tests.
//!
//! Sources are parsed through `ParseUnit` and compared against their
//! S-expression rendering.

use ember_ast::{Decl, Expr, NodeKind, ParamBinding, Stmt};
use ember_core::Arena;
use ember_diagnostics::DiagnosticCollection;
use ember_lexer::TokenBuffer;
use ember_options::ParseOptions;
use ember_parser::ParseUnit;
use ember_printer::print_statements;

fn parse_with(source: &str, options: ParseOptions) -> (String, DiagnosticCollection) {
    let buffer = TokenBuffer::create(source).expect("source should lex");
    let arena = Arena::new();
    let mut diags = DiagnosticCollection::new();
    let unit = ParseUnit::create(&arena, &buffer, &mut diags, options);
    (print_statements(unit.statements()), diags)
}

fn parse(source: &str) -> (String, DiagnosticCollection) {
    parse_with(source, ParseOptions::default())
}

/// Parse with unused-expression warnings off and expect no diagnostics.
fn parse_clean(source: &str) -> String {
    let options = ParseOptions {
        ignore_unused_expressions: true,
        ..ParseOptions::default()
    };
    let (printed, diags) = parse_with(source, options);
    assert!(diags.is_empty(), "unexpected diagnostics: {:?}", diags.diagnostics());
    printed
}

fn with_unit<R>(source: &str, f: impl FnOnce(&ParseUnit<'_>, &DiagnosticCollection) -> R) -> R {
    let buffer = TokenBuffer::create(source).expect("source should lex");
    let arena = Arena::new();
    let mut diags = DiagnosticCollection::new();
    let unit = ParseUnit::create(&arena, &buffer, &mut diags, ParseOptions::default());
    f(&unit, &diags)
}

fn codes(diags: &DiagnosticCollection) -> Vec<u32> {
    diags.diagnostics().iter().map(|d| d.code).collect()
}

// ============================================================================
// Binary operators
// ============================================================================

#[test]
fn test_multiplication_binds_tighter() {
    assert_eq!(parse_clean("1 + 2 * 3;"), "(binary + 1 (binary * 2 3))");
    assert_eq!(parse_clean("1 * 2 + 3;"), "(binary + (binary * 1 2) 3)");
}

#[test]
fn test_power_is_right_associative() {
    assert_eq!(parse_clean("2 ** 3 ** 2;"), "(binary ** 2 (binary ** 3 2))");
}

#[test]
fn test_subtraction_is_left_associative() {
    assert_eq!(parse_clean("a - b - c;"), "(binary - (binary - a b) c)");
}

#[test]
fn test_assignment_is_right_associative() {
    assert_eq!(parse_clean("a = b = 1;"), "(assign = a (assign = b 1))");
    assert_eq!(parse_clean("a += b * 2;"), "(assign += a (binary * b 2))");
    assert_eq!(parse_clean("a ~= b = c;"), "(assign ~= a (assign = b c))");
}

#[test]
fn test_comparison_and_logic() {
    assert_eq!(
        parse_clean("a < b && c == d || e;"),
        "(binary || (binary && (binary < a b) (binary == c d)) e)"
    );
    assert_eq!(parse_clean("a and b or c;"), "(binary || (binary && a b) c)");
}

#[test]
fn test_cast_binds_tighter_than_multiplication() {
    assert_eq!(parse_clean("x as Int * 2;"), "(binary * (cast x Int) 2)");
}

#[test]
fn test_shift_and_bitwise() {
    assert_eq!(parse_clean("a | b & c << 1;"), "(binary | a (binary & b (binary << c 1)))");
}

// ============================================================================
// Prefix and postfix operators
// ============================================================================

#[test]
fn test_prefix_operators_compose_right_to_left() {
    assert_eq!(parse_clean("&*x;"), "(unary & (unary * x))");
    assert_eq!(parse_clean("-a * b;"), "(binary * (unary - a) b)");
    assert_eq!(parse_clean("!~x;"), "(unary ! (unary ~ x))");
}

#[test]
fn test_postfix_chain() {
    assert_eq!(
        parse_clean("a.b->c.*?[1](x, label: 2);"),
        "(call (subscript (unwrap (deref (field-> (field a b) c))) 1) x (arg label 2))"
    );
}

#[test]
fn test_prefix_applies_after_postfix() {
    assert_eq!(parse_clean("-f(x);"), "(unary - (call f x))");
}

#[test]
fn test_dot_identifier_primary() {
    assert_eq!(parse_clean("x = .Red;"), "(assign = x .Red)");
}

#[test]
fn test_multi_index_subscript() {
    assert_eq!(parse_clean("m[i, j + 1];"), "(subscript m i (binary + j 1))");
}

// ============================================================================
// Literals
// ============================================================================

#[test]
fn test_literals_keep_their_text() {
    assert_eq!(parse_clean("x = 0x1F;"), "(assign = x 0x1F)");
    assert_eq!(parse_clean("x = 42u8;"), "(assign = x 42u8)");
    assert_eq!(parse_clean("x = 'a';"), "(assign = x 'a')");
    assert_eq!(parse_clean(r#"x = "hi\n";"#), r#"(assign = x "hi\n")"#);
}

#[test]
fn test_number_literal_values() {
    with_unit("let a = 0b101; let b = 7s32;", |unit, diags| {
        assert!(diags.is_empty());
        let values: Vec<_> = unit
            .statements()
            .iter()
            .map(|stmt| match stmt {
                Stmt::Decl(Decl::Var(var)) => match var.init {
                    Some(Expr::Number(n)) => (n.value.map(|v| v.as_i128()).ok(), n.suffix),
                    _ => panic!("expected a number initializer"),
                },
                _ => panic!("expected a variable"),
            })
            .collect();
        assert_eq!(values, vec![(Some(5), None), (Some(7), Some("s32"))]);
    });
}

#[test]
fn test_string_literal_is_decoded() {
    with_unit(r#"let s = "a\tb";"#, |unit, _| {
        let Some(Stmt::Decl(Decl::Var(var))) = unit.statements().first() else {
            panic!("expected a variable");
        };
        let Some(Expr::String(s)) = var.init else {
            panic!("expected a string");
        };
        assert_eq!(s.value, Ok("a\tb"));
    });
}

// ============================================================================
// Parentheses, arrow functions and function types
// ============================================================================

#[test]
fn test_paren_expression() {
    assert_eq!(parse_clean("(1 + 2);"), "(paren (binary + 1 2))");
    assert_eq!(parse_clean("(a) * b;"), "(binary * (paren a) b)");
}

#[test]
fn test_arrow_function_with_expression_body() {
    assert_eq!(
        parse_clean("(x: Int) => x;"),
        "(arrow (params (x : Int)) (block (return x)))"
    );
    assert_eq!(parse_clean("(x) => x;"), "(arrow (params x) (block (return x)))");
    assert_eq!(
        parse_clean("(a, b) => a + b;"),
        "(arrow (params a b) (block (return (binary + a b))))"
    );
}

#[test]
fn test_arrow_function_with_return_type() {
    assert_eq!(
        parse_clean("() -> Int { return 1; };"),
        "(arrow (params) -> Int (block (return 1)))"
    );
    assert_eq!(
        parse_clean("(x): Int => { return x; };"),
        "(arrow (params x) -> Int (block (return x)))"
    );
}

#[test]
fn test_implicit_return_has_no_location() {
    with_unit("let f = (x) => x;", |unit, _| {
        let Some(Stmt::Decl(Decl::Var(var))) = unit.statements().first() else {
            panic!("expected a variable");
        };
        let Some(Expr::Decl(Decl::ArrowFunction(arrow))) = var.init else {
            panic!("expected an arrow function");
        };
        assert!(!arrow.body.loc.is_valid());
        let Stmt::Return(ret) = arrow.body.stmts[0] else {
            panic!("expected a return");
        };
        assert!(ret.is_implicit());
    });
}

#[test]
fn test_function_type() {
    assert_eq!(
        parse_clean("let f: (a: Int) -> Bool = g;"),
        "(let f : (function-type (params (a : Int)) Bool) g)"
    );
}

// ============================================================================
// Arrays, array types and closures
// ============================================================================

#[test]
fn test_array_literal() {
    assert_eq!(parse_clean("let xs = [1, 2, 3];"), "(let xs (array 1 2 3))");
    assert_eq!(parse_clean("let xs = [];"), "(let xs (array))");
}

#[test]
fn test_array_and_optional_types() {
    assert_eq!(parse_clean("let a: [4]u8 = b;"), "(let a : (array-type [4] u8) b)");
    assert_eq!(
        parse_clean("let p: ?*Node = q;"),
        "(let p : (optional (unary * Node)) q)"
    );
    assert_eq!(
        parse_clean("let m: [2][3]Int = n;"),
        "(let m : (array-type [2] (array-type [3] Int)) n)"
    );
}

#[test]
fn test_closure() {
    assert_eq!(
        parse_clean("let f = [&, x](y) => x + y;"),
        "(let f (closure (captures & x) (params y) (block (return (binary + x y)))))"
    );
    assert_eq!(
        parse_clean("let g = [= mut, &z](): Int => { return z; };"),
        "(let g (closure (captures (= mut) (unary & z)) (params) -> Int (block (return z))))"
    );
}

// ============================================================================
// Functions
// ============================================================================

#[test]
fn test_function_declaration() {
    assert_eq!(
        parse_clean("func add(a: Int, b: Int = 0) -> Int { return a + b; }"),
        "(func add (params (a : Int) (b : Int = 0)) -> Int (block (return (binary + a b))))"
    );
}

#[test]
fn test_function_with_arrow_body() {
    assert_eq!(
        parse_clean("func double(x: Int) -> Int => x * 2"),
        "(func double (params (x : Int)) -> Int (block (return (binary * x 2))))"
    );
}

#[test]
fn test_function_params_with_patterns_and_qualifiers() {
    assert_eq!(
        parse_clean("func f(mut a, [x, y]: Pair, {k}, rest...: Int) {}"),
        "(func f (params (mut a) ([x y] : Pair) {k} (rest... : Int)) (block))"
    );
}

#[test]
fn test_function_body_is_attached() {
    with_unit("inline func f() { g(); }", |unit, _| {
        let Some(Stmt::Decl(decl)) = unit.statements().first() else {
            panic!("expected a declaration");
        };
        let function = decl.as_function().expect("function");
        let body = function.body().expect("body");
        assert_eq!(body.stmts.len(), 1);
        assert!(!function.qualifiers.is_empty());
        assert_eq!(decl.kind(), NodeKind::FunctionDecl);
    });
}

#[test]
fn test_param_binding_kinds() {
    with_unit("func f(a, [b], {c}) {}", |unit, _| {
        let Some(Stmt::Decl(Decl::Function(function))) = unit.statements().first() else {
            panic!("expected a function");
        };
        let bindings: Vec<_> = function
            .params
            .iter()
            .map(|p| match p.binding {
                ParamBinding::Name(_) => "name",
                ParamBinding::Array(_) => "array",
                ParamBinding::Object(_) => "object",
            })
            .collect();
        assert_eq!(bindings, vec!["name", "array", "object"]);
    });
}

// ============================================================================
// Variables and destructuring
// ============================================================================

#[test]
fn test_variable_declarations() {
    assert_eq!(parse_clean("let x = 1;"), "(let x 1)");
    assert_eq!(parse_clean("let x: Int = 1;"), "(let x : Int 1)");
    assert_eq!(parse_clean("let mut x = 1;"), "(let mut x 1)");
    assert_eq!(parse_clean("volatile let mut x = 1;"), "(let mut volatile x 1)");
}

#[test]
fn test_array_destructure() {
    assert_eq!(
        parse_clean("let [a, 2: b, ...rest] = xs;"),
        "(let-array [a (index 2 b) ...rest] xs)"
    );
}

#[test]
fn test_array_destructure_items() {
    with_unit("let [a, 2: b, ...rest] = xs;", |unit, diags| {
        assert!(diags.is_empty());
        let Some(Stmt::Decl(Decl::ArrayDestructure(d))) = unit.statements().first() else {
            panic!("expected an array destructure");
        };
        assert_eq!(d.items.len(), 3);
        assert!(d.items[0].index.is_none());
        assert!(matches!(d.items[1].index, Some(Expr::Number(n)) if n.text == "2"));
        assert!(matches!(d.items[2].pattern, ember_ast::BindingPattern::Spread(name) if name.text == "rest"));
    });
}

#[test]
fn test_nested_destructure() {
    assert_eq!(
        parse_clean("let {x, y: [p, mut q], ...others} = point;"),
        "(let-object {x (y [p (mut q)]) ...others} point)"
    );
    assert_eq!(
        parse_clean("let [[a, b], {c}] = pairs;"),
        "(let-array [[a b] {c}] pairs)"
    );
}

// ============================================================================
// Records
// ============================================================================

#[test]
fn test_struct_declaration() {
    assert_eq!(
        parse_clean("struct Point { x: Int, mut y: Int = 0 };"),
        "(struct Point (x : Int) (mut y : Int = 0))"
    );
}

#[test]
fn test_shape_optional_field() {
    assert_eq!(parse_clean("shape S { a?: Int, b: Int };"), "(shape S (a? : Int) (b : Int))");
    assert_eq!(parse_clean("interface I { f?: () -> Int };"), "(interface I (f? : (function-type (params) Int)))");
}

#[test]
fn test_union_declaration() {
    assert_eq!(parse_clean("union U { i: Int, f: Float };"), "(union U (i : Int) (f : Float))");
}

#[test]
fn test_anonymous_record_type() {
    let (printed, diags) = parse("let p: struct { x: Int } = q;");
    assert_eq!(printed, "(let p : (struct (x : Int)) q)");
    assert!(diags.is_empty());
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_if_else_chain() {
    assert_eq!(
        parse_clean("if x { a = 1 } else if y { b = 2 } else c = 3;"),
        "(if x (block (assign = a 1)) (if y (block (assign = b 2)) (assign = c 3)))"
    );
}

#[test]
fn test_if_needs_no_semicolon() {
    assert_eq!(
        parse_clean("if (x) { f(); }\nlet y = 1;"),
        "(if (paren x) (block (call f)))\n(let y 1)"
    );
}

#[test]
fn test_if_expression_as_value() {
    assert_eq!(
        parse_clean("let v = if c { 1 } else { 2 };"),
        "(let v (if c (block 1) (block 2)))"
    );
}

#[test]
fn test_compound_statement() {
    assert_eq!(
        parse_clean("{ let a = 1; { return a; } b = a }"),
        "(block (let a 1) (block (return a)) (assign = b a))"
    );
}

#[test]
fn test_bare_return() {
    assert_eq!(parse_clean("func f() { return; }"), "(func f (params) (block (return)))");
}

#[test]
fn test_stray_semicolons_in_block() {
    assert_eq!(parse_clean("{ ;; a = 1;; }"), "(block (assign = a 1))");
}

// ============================================================================
// Parse options
// ============================================================================

#[test]
fn test_missing_semicolon_is_reported() {
    let (printed, diags) = parse("let x = 1 let y = 2;");
    assert_eq!(printed, "(let x 1)\n(let y 2)");
    assert_eq!(codes(&diags), vec![1402]);
}

#[test]
fn test_dont_require_semicolons() {
    let options = ParseOptions {
        dont_require_semicolons: true,
        ..ParseOptions::default()
    };
    let (printed, diags) = parse_with("let x = 1\nlet y = x\n{ a = 1 b = 2 }", options);
    assert_eq!(printed, "(let x 1)\n(let y x)\n(block (assign = a 1) (assign = b 2))");
    assert!(diags.is_empty());
}

#[test]
fn test_unused_expression_warning() {
    let (_, diags) = parse("x + 1; y = 2; if c { d = 1 }");
    assert_eq!(codes(&diags), vec![6005]);
    assert!(!diags.has_errors());

    let options = ParseOptions {
        ignore_unused_expressions: true,
        ..ParseOptions::default()
    };
    let (_, diags) = parse_with("x + 1;", options);
    assert!(diags.is_empty());
}

#[test]
fn test_require_parens_on_if() {
    let options = ParseOptions {
        require_parens_on_if_expr: true,
        ..ParseOptions::default()
    };
    let (_, diags) = parse_with("if x { }", options);
    assert_eq!(codes(&diags), vec![1403]);

    let (_, diags) = parse_with("if (x) { }", options);
    assert!(diags.is_empty());
}

#[test]
fn test_positive_sign_option_has_no_effect_without_sign() {
    let options = ParseOptions {
        allow_positive_sign: true,
        ignore_unused_expressions: true,
        ..ParseOptions::default()
    };
    let (printed, diags) = parse_with("x = 5;", options);
    assert_eq!(printed, "(assign = x 5)");
    assert!(diags.is_empty());
}

// ============================================================================
// Name table
// ============================================================================

#[test]
fn test_top_level_names() {
    let source = "let x = 1; func f() {} struct S { a: Int }; let [p, {q, r: s}] = t;";
    with_unit(source, |unit, diags| {
        assert!(diags.is_empty(), "{:?}", diags.diagnostics());
        let names: Vec<_> = unit.names().map(|n| n.name.text).collect();
        assert_eq!(names, vec!["x", "f", "S", "p", "q", "s"]);
        assert!(unit.lookup("r").is_none());
        assert!(unit.lookup("f").is_some_and(|n| n.stmt.kind() == NodeKind::FunctionDecl));
        assert!(unit.lookup("S").is_some_and(|n| n.stmt.kind() == NodeKind::StructDecl));
        assert!(!unit.has_errors());
    });
}

#[test]
fn test_duplicate_names() {
    with_unit("let x = 1; let x = 2;", |unit, diags| {
        assert_eq!(codes(diags), vec![1500, 9002]);
        assert_eq!(diags.diagnostics()[0].location.index, 15);
        assert_eq!(diags.diagnostics()[1].location.index, 4);
        assert_eq!(unit.statements().len(), 2);
        assert_eq!(unit.lookup("x").map(|n| n.name.loc.index), Some(4));
        assert_eq!(unit.error_count(), 1);
    });
}

#[test]
fn test_nested_names_are_not_top_level() {
    with_unit("func f() { let inner = 1; }", |unit, _| {
        assert!(unit.lookup("f").is_some());
        assert!(unit.lookup("inner").is_none());
    });
}
