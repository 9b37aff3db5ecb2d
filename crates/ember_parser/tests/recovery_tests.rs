//! Error reporting and recovery.
//!
//! Each case checks the diagnostic codes produced and what survives of the
//! tree afterwards.

use ember_core::Arena;
use ember_diagnostics::{DiagnosticCollection, DiagnosticLevel};
use ember_lexer::TokenBuffer;
use ember_options::ParseOptions;
use ember_parser::ParseUnit;
use ember_printer::print_statements;

fn parse_quiet(source: &str) -> (String, DiagnosticCollection) {
    let options = ParseOptions {
        ignore_unused_expressions: true,
        ..ParseOptions::default()
    };
    let buffer = TokenBuffer::create(source).expect("source should lex");
    let arena = Arena::new();
    let mut diags = DiagnosticCollection::new();
    let unit = ParseUnit::create(&arena, &buffer, &mut diags, options);
    (print_statements(unit.statements()), diags)
}

fn codes(diags: &DiagnosticCollection) -> Vec<u32> {
    diags.diagnostics().iter().map(|d| d.code).collect()
}

// ============================================================================
// Lists
// ============================================================================

#[test]
fn test_missing_parameter_before_comma() {
    let (printed, diags) = parse_quiet("func f(, y) { }");
    assert_eq!(printed, "(func f (params y) (block))");
    assert_eq!(codes(&diags), vec![1207]);
    assert_eq!(diags.diagnostics()[0].message, "Expected a parameter before ','");
}

#[test]
fn test_double_comma_in_call() {
    let (printed, diags) = parse_quiet("foo(a,, b);");
    assert_eq!(printed, "(call foo a b)");
    assert_eq!(codes(&diags), vec![6001]);
    assert!(!diags.has_errors());
}

#[test]
fn test_trailing_comma_in_params() {
    let (printed, diags) = parse_quiet("func f(a,) {}");
    assert_eq!(printed, "(func f (params a) (block))");
    assert_eq!(codes(&diags), vec![6002]);
    assert_eq!(diags.diagnostics()[0].level, DiagnosticLevel::Warning);
}

#[test]
fn test_trailing_comma_in_arguments_is_silent() {
    let (printed, diags) = parse_quiet("f(1, 2,);");
    assert_eq!(printed, "(call f 1 2)");
    assert!(diags.is_empty());
}

#[test]
fn test_bad_argument_is_skipped() {
    let (printed, diags) = parse_quiet("f(1, let, 3);");
    assert_eq!(printed, "(call f 1 3)");
    assert_eq!(codes(&diags), vec![1201]);
}

#[test]
fn test_missing_separator_drops_statement() {
    let (printed, diags) = parse_quiet("{ (a, ; b) }");
    assert_eq!(printed, "(block)");
    assert_eq!(codes(&diags), vec![1204]);
}

#[test]
fn test_unclosed_paren_stops() {
    let (printed, diags) = parse_quiet("let x = (1 + 2;");
    assert_eq!(printed, "");
    assert_eq!(codes(&diags), vec![1204]);
}

#[test]
fn test_empty_parens() {
    let (_, diags) = parse_quiet("let x = ();");
    assert_eq!(codes(&diags), vec![1214]);
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_keyword_in_expression() {
    let (printed, diags) = parse_quiet("let x = while; let y = 2;");
    assert_eq!(printed, "(let y 2)");
    assert_eq!(codes(&diags), vec![1201]);
}

#[test]
fn test_missing_right_operand() {
    let (printed, diags) = parse_quiet("let x = 1 +");
    assert_eq!(printed, "");
    assert_eq!(codes(&diags), vec![1203]);
}

#[test]
fn test_deep_nesting_is_rejected() {
    let source = format!("let x = {}1{};", "(".repeat(300), ")".repeat(300));
    let (_, diags) = parse_quiet(&source);
    assert!(diags.contains_code(1209));
}

#[test]
fn test_deep_power_chain_is_rejected() {
    let source = format!("let x = {}2;", "2 **\n".repeat(300));
    let (_, diags) = parse_quiet(&source);
    assert!(diags.contains_code(1209));
}

#[test]
fn test_deep_assignment_chain_is_rejected() {
    let source = format!("{}1;", "a =\n".repeat(300));
    let (_, diags) = parse_quiet(&source);
    assert!(diags.contains_code(1209));
}

#[test]
fn test_deep_else_if_chain_is_rejected() {
    let source = String::from("if a { }") + &" else if a { }\n".repeat(300);
    let (_, diags) = parse_quiet(&source);
    assert!(diags.contains_code(1209));
}

#[test]
fn test_shallow_else_if_chain_is_accepted() {
    let source = String::from("if a { }") + &" else if a { }\n".repeat(50);
    let (_, diags) = parse_quiet(&source);
    assert!(diags.is_empty());
}

#[test]
fn test_unused_declaration_name() {
    let (printed, diags) = parse_quiet("let s = struct Foo { a: Int };");
    assert_eq!(printed, "(let s (struct Foo (a : Int)))");
    assert_eq!(codes(&diags), vec![6003]);
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_unclosed_block_is_reported_at_brace() {
    let (printed, diags) = parse_quiet("func f() { let x = 1;");
    assert_eq!(printed, "");
    assert_eq!(codes(&diags), vec![1401]);
    assert_eq!(diags.diagnostics()[0].location.index, 9);
}

#[test]
fn test_missing_semicolon() {
    let (printed, diags) = parse_quiet("let x = 1 let y = 2;");
    assert_eq!(printed, "(let x 1)\n(let y 2)");
    assert_eq!(codes(&diags), vec![1402]);
}

#[test]
fn test_arrow_function_statement_needs_semicolon() {
    let (_, diags) = parse_quiet("() -> Int { return 1; }");
    assert_eq!(codes(&diags), vec![1402]);
}

#[test]
fn test_unexpected_keyword_at_statement_start() {
    let (printed, diags) = parse_quiet("else; let y = 1;");
    assert_eq!(printed, "(let y 1)");
    assert_eq!(codes(&diags), vec![1400]);
}

#[test]
fn test_function_requires_name() {
    let (printed, diags) = parse_quiet("func () {}");
    assert_eq!(printed, "");
    assert_eq!(codes(&diags), vec![1313]);
}

#[test]
fn test_nameless_function_keeps_following_statement() {
    let (printed, diags) = parse_quiet("func () {} let y = 1;");
    assert_eq!(printed, "(let y 1)");
    assert_eq!(codes(&diags), vec![1313]);
}

// ============================================================================
// Declarations
// ============================================================================

#[test]
fn test_duplicate_qualifier() {
    let (printed, diags) = parse_quiet("let mut mut x = 1;");
    assert_eq!(printed, "(let mut x 1)");
    assert_eq!(codes(&diags), vec![6004]);
}

#[test]
fn test_qualifiers_on_expression_statement() {
    let (printed, diags) = parse_quiet("mut 5;");
    assert_eq!(printed, "5");
    assert_eq!(codes(&diags), vec![1406]);
    assert_eq!(diags.diagnostics()[0].location.index, 0);
}

#[test]
fn test_qualifiers_on_block_and_return() {
    let (printed, diags) = parse_quiet("func f() { extern return 1; }");
    assert_eq!(printed, "(func f (params) (block (return 1)))");
    assert_eq!(codes(&diags), vec![1406]);
    assert_eq!(diags.diagnostics()[0].location.index, 11);
}

#[test]
fn test_qualifiers_before_let() {
    let (before, diags) = parse_quiet("mut let x = 1;");
    assert!(diags.is_empty());
    let (after, _) = parse_quiet("let mut x = 1;");
    assert_eq!(before, after);
}

#[test]
fn test_optional_field_outside_shape() {
    let (_, diags) = parse_quiet("struct S { a?: Int };");
    assert_eq!(codes(&diags), vec![1304]);
    let (_, diags) = parse_quiet("shape S { a?: Int };");
    assert!(diags.is_empty());
}

#[test]
fn test_field_without_type() {
    let (printed, diags) = parse_quiet("struct S { a, b: Int };");
    assert_eq!(printed, "(struct S (a) (b : Int))");
    assert_eq!(codes(&diags), vec![1303]);
}

#[test]
fn test_duplicate_top_level_name() {
    let (printed, diags) = parse_quiet("let x = 1; let x = 2;");
    assert_eq!(printed, "(let x 1)\n(let x 2)");
    assert_eq!(codes(&diags), vec![1500, 9002]);
    assert_eq!(diags.error_count(), 1);
}
