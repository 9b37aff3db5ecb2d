//! TokenStream integration tests.
//!
//! Covers lookahead, backtracking and the nesting-aware resynchronization
//! scans the parser uses for error recovery.

use ember_ast::{Keyword, TokenKind};
use ember_lexer::{FindError, TokenBuffer, TokenStream};

fn buffer(source: &str) -> TokenBuffer<'_> {
    TokenBuffer::create(source).expect("source should lex")
}

// ============================================================================
// Lookahead and consuming
// ============================================================================

#[test]
fn test_peek_and_consume() {
    let buffer = buffer("let x = 1;");
    let mut stream = TokenStream::new(&buffer);

    assert_eq!(stream.token_count(), 5);
    assert!(stream.peek_is(TokenKind::Keyword));
    assert!(stream.peek_is_keyword(Keyword::Let));
    assert!(stream.consume_if_is_keyword(Keyword::Func).is_none());
    assert!(stream.consume_if_is_keyword(Keyword::Let).is_some());

    assert!(stream.consume_if_is(TokenKind::Equal).is_none());
    let name = stream.consume_if_is(TokenKind::Identifier).unwrap();
    assert_eq!(stream.text(name), "x");
    assert_eq!(stream.current(), Some(name));

    assert!(stream.peek_is_one_of(&[TokenKind::Colon, TokenKind::Equal]));
    assert!(stream.consume_if_one_of(&[TokenKind::Colon, TokenKind::Equal]).is_some());
    assert_eq!(stream.position(), 3);
}

#[test]
fn test_consume_at_eof() {
    let buffer = buffer("a");
    let mut stream = TokenStream::new(&buffer);
    assert!(stream.consume().is_some());
    assert!(stream.reached_eof());
    assert!(stream.consume().is_none());
    assert!(stream.peek().is_none());
    assert_eq!(stream.position(), 1);
}

// ============================================================================
// Backtracking
// ============================================================================

#[test]
fn test_checkpoint_restores_exact_position() {
    let buffer = buffer("a b c d");
    let mut stream = TokenStream::new(&buffer);
    stream.consume();
    let checkpoint = stream.checkpoint();
    stream.consume();
    stream.consume();
    stream.restore(checkpoint);
    assert_eq!(stream.position(), 1);
}

#[test]
fn test_in_window_returns_to_start() {
    let buffer = buffer("( a ) =>");
    let mut stream = TokenStream::new(&buffer);
    let found = stream.in_window(|s| s.find_next_and_consume(TokenKind::FatArrow).is_ok());
    assert!(found);
    assert_eq!(stream.position(), 0);
}

#[test]
fn test_go_back_refuses_to_underflow() {
    let buffer = buffer("a b");
    let mut stream = TokenStream::new(&buffer);
    stream.consume();
    assert!(!stream.go_back(2));
    assert_eq!(stream.position(), 1);
    assert!(stream.go_back(1));
    assert_eq!(stream.position(), 0);
}

// ============================================================================
// Flat scans
// ============================================================================

#[test]
fn test_proceed_to_ignores_nesting() {
    let buffer = buffer("( a ; b ) ;");
    let mut stream = TokenStream::new(&buffer);
    let semicolon = stream.proceed_to_and_consume(TokenKind::Semicolon).unwrap();
    assert_eq!(semicolon.loc.index, 4);
    assert_eq!(stream.position(), 3);
}

#[test]
fn test_proceed_to_one_of_not_found() {
    let buffer = buffer("a b c");
    let mut stream = TokenStream::new(&buffer);
    assert!(stream
        .proceed_to_and_consume_one_of(&[TokenKind::Comma, TokenKind::Semicolon])
        .is_none());
    assert!(stream.reached_eof());
}

// ============================================================================
// Nesting-aware scans
// ============================================================================

#[test]
fn test_find_skips_nested_target() {
    let buffer = buffer("f(a; b); c");
    let mut stream = TokenStream::new(&buffer);
    let semicolon = stream.find_next_and_consume(TokenKind::Semicolon).unwrap();
    assert_eq!(semicolon.loc.index, 7);
}

#[test]
fn test_unclosed_bracket_recovery() {
    let buffer = buffer("{ (a, ; b) }");
    let mut stream = TokenStream::new(&buffer);
    // The `;` only appears nested inside the braces and parens.
    assert_eq!(
        stream.find_next_and_consume(TokenKind::Semicolon),
        Err(FindError::NotFound)
    );
    assert!(stream.reached_eof());

    // From inside the braces, the closing `}` belongs to the caller.
    let mut stream = TokenStream::new(&buffer);
    stream.consume();
    assert_eq!(
        stream.find_next_and_consume(TokenKind::Semicolon),
        Err(FindError::UnexpectedClosingToken)
    );
    assert_eq!(stream.current().map(|t| t.kind), Some(TokenKind::CloseCurlyBrace));
}

#[test]
fn test_unclosed_at_eof() {
    let buffer = buffer("( a ; b");
    let mut stream = TokenStream::new(&buffer);
    assert_eq!(
        stream.find_next_and_consume(TokenKind::Semicolon),
        Err(FindError::UnclosedToken)
    );
}

#[test]
fn test_mismatched_closer() {
    let buffer = buffer("( a ] ;");
    let mut stream = TokenStream::new(&buffer);
    assert_eq!(
        stream.find_next_and_consume(TokenKind::Semicolon),
        Err(FindError::MismatchClosingToken)
    );
    assert_eq!(stream.position(), 3);
}

#[test]
fn test_closer_at_depth_zero_can_be_target() {
    let buffer = buffer("a, (b, c) )");
    let mut stream = TokenStream::new(&buffer);
    stream.consume();
    stream.consume();
    let close = stream
        .find_next_and_consume_one_of(&[TokenKind::Comma, TokenKind::CloseParen])
        .unwrap();
    assert_eq!(close.loc.index, 10);
}

#[test]
fn test_find_next_not_one_of_leaves_token() {
    let buffer = buffer(", , ; x");
    let mut stream = TokenStream::new(&buffer);
    let token = stream
        .find_next_not_one_of(&[TokenKind::Comma, TokenKind::Semicolon])
        .unwrap();
    assert_eq!(stream.text(token), "x");
    assert_eq!(stream.peek(), Some(token));
}
