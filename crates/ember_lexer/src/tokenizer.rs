//! The tokenizer state machine.
//!
//! Each call to [`Tokenizer::next_token`] starts in [`State::Start`], picks a
//! state from the first character and keeps extending the token while the
//! next character fits. A character that cannot extend the token is left
//! for the following call.

use ember_ast::{Keyword, TokenKind};
use ember_core::text::{SourceLocation, TextPos};

use crate::error::{LexError, LexErrorKind};
use crate::token::Token;

/// The largest column a token may start at.
pub const COLUMN_LIMIT: u32 = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Identifier,
    DotIdentifier,
    IntegerLiteral,
    FloatLiteral,
    CharLiteral,
    CharEscape,
    StringLiteral,
    StringEscape,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Caret,
    Ampersand,
    Pipe,
    Tilde,
    LessThan,
    ShiftLeft,
    GreaterThan,
    ShiftRight,
    Equal,
    Exclamation,
    Dot,
    DotDot,
}

#[inline]
fn is_ident_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_'
}

#[inline]
fn is_ident_continue(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

#[inline]
fn is_simple_escape(byte: u8) -> bool {
    matches!(
        byte,
        b'a' | b'b' | b'f' | b'n' | b'r' | b't' | b'v' | b'\\' | b'\'' | b'"'
    )
}

/// Converts source text into tokens, one per call.
pub struct Tokenizer<'s> {
    text: &'s str,
    index: usize,
    row: u32,
    column: u32,
    line_starts: Vec<TextPos>,
    error: Option<LexError>,
    finished: bool,
}

impl<'s> Tokenizer<'s> {
    pub fn new(text: &'s str) -> Self {
        Self {
            text,
            index: 0,
            row: 1,
            column: 1,
            line_starts: vec![0],
            error: None,
            finished: false,
        }
    }

    /// The error behind the last `Invalid` token.
    pub fn error(&self) -> Option<&LexError> {
        self.error.as_ref()
    }

    pub fn take_error(&mut self) -> Option<LexError> {
        self.error.take()
    }

    /// Byte offsets of every line start seen so far.
    pub fn line_starts(&self) -> &[TextPos] {
        &self.line_starts
    }

    pub fn into_line_starts(self) -> Vec<TextPos> {
        self.line_starts
    }

    #[inline]
    fn location(&self) -> SourceLocation {
        SourceLocation::new(self.index as TextPos, self.row, self.column)
    }

    #[inline]
    fn peek_byte(&self) -> Option<u8> {
        self.text.as_bytes().get(self.index).copied()
    }

    #[inline]
    fn peek_byte_at(&self, offset: usize) -> Option<u8> {
        self.text.as_bytes().get(self.index + offset).copied()
    }

    fn bump(&mut self) {
        let Some(byte) = self.peek_byte() else {
            return;
        };
        self.index += 1;
        if byte == b'\n' {
            self.row += 1;
            self.column = 1;
            self.line_starts.push(self.index as TextPos);
        } else {
            self.column += 1;
        }
    }

    fn skip_line_comment(&mut self) {
        let rest = &self.text.as_bytes()[self.index..];
        let len = memchr::memchr(b'\n', rest).unwrap_or(rest.len());
        self.index += len;
        self.column = self.column.saturating_add(len as u32);
    }

    fn finish(&self, kind: TokenKind, start: SourceLocation) -> Token {
        Token::new(kind, start, self.index as u32)
    }

    fn finish_identifier(&self, start: SourceLocation) -> Token {
        let text = &self.text[start.index as usize..self.index];
        let kind = if Keyword::from_lexeme(text).is_some() {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        self.finish(kind, start)
    }

    fn fail(&mut self, kind: LexErrorKind, loc: SourceLocation) -> Token {
        let len = (self.index.saturating_sub(loc.index as usize)).max(1);
        self.error = Some(LexError::new(kind, loc, len));
        self.finished = true;
        Token::new(TokenKind::Invalid, loc, self.index as u32)
    }

    fn unrecognized_char(&mut self, start: SourceLocation) -> Token {
        let ch = self.text[start.index as usize..]
            .chars()
            .next()
            .unwrap_or('\0');
        // Step over the whole character so the span covers it.
        self.index = start.index as usize + ch.len_utf8();
        self.column = start.column + 1;
        self.fail(LexErrorKind::UnrecognizedChar(ch), start)
    }

    /// Scan the next token. Returns `EndOfFile` at the end of the input and
    /// `Invalid` on a lexical error (see [`Tokenizer::error`]).
    pub fn next_token(&mut self) -> Token {
        let mut state = State::Start;
        let mut kind = TokenKind::Invalid;
        let mut start = self.location();

        loop {
            let Some(byte) = self.peek_byte() else {
                return match state {
                    State::Start => self.finish(TokenKind::EndOfFile, self.location()),
                    State::CharLiteral | State::CharEscape => {
                        self.fail(LexErrorKind::UnterminatedChar, start)
                    }
                    State::StringLiteral | State::StringEscape => {
                        self.fail(LexErrorKind::UnterminatedString, start)
                    }
                    State::Identifier => self.finish_identifier(start),
                    _ => self.finish(kind, start),
                };
            };

            if self.column > COLUMN_LIMIT && byte != b'\n' {
                let loc = self.location();
                return self.fail(LexErrorKind::LineTooLong, loc);
            }

            match state {
                State::Start => {
                    match byte {
                        b' ' | b'\t' | b'\r' | b'\n' => {
                            self.bump();
                            continue;
                        }
                        b'/' if self.peek_byte_at(1) == Some(b'/') => {
                            self.skip_line_comment();
                            continue;
                        }
                        _ => {}
                    }

                    start = self.location();
                    if !byte.is_ascii() {
                        return self.unrecognized_char(start);
                    }
                    self.bump();

                    (state, kind) = match byte {
                        b'\'' => (State::CharLiteral, TokenKind::CharLiteral),
                        b'"' => (State::StringLiteral, TokenKind::StringLiteral),
                        b'0'..=b'9' => (State::IntegerLiteral, TokenKind::IntegerLiteral),
                        b if is_ident_start(b) => (State::Identifier, TokenKind::Identifier),
                        b'+' => (State::Plus, TokenKind::Plus),
                        b'-' => (State::Minus, TokenKind::Minus),
                        b'*' => (State::Star, TokenKind::Star),
                        b'/' => (State::Slash, TokenKind::Slash),
                        b'%' => (State::Percent, TokenKind::Percent),
                        b'^' => (State::Caret, TokenKind::Caret),
                        b'&' => (State::Ampersand, TokenKind::Ampersand),
                        b'|' => (State::Pipe, TokenKind::Pipe),
                        b'~' => (State::Tilde, TokenKind::Tilde),
                        b'<' => (State::LessThan, TokenKind::LessThan),
                        b'>' => (State::GreaterThan, TokenKind::GreaterThan),
                        b'=' => (State::Equal, TokenKind::Equal),
                        b'!' => (State::Exclamation, TokenKind::Exclamation),
                        b'.' => (State::Dot, TokenKind::Dot),
                        b'?' => return self.finish(TokenKind::QuestionMark, start),
                        b'(' => return self.finish(TokenKind::OpenParen, start),
                        b')' => return self.finish(TokenKind::CloseParen, start),
                        b'{' => return self.finish(TokenKind::OpenCurlyBrace, start),
                        b'}' => return self.finish(TokenKind::CloseCurlyBrace, start),
                        b'[' => return self.finish(TokenKind::LeftSquareBracket, start),
                        b']' => return self.finish(TokenKind::RightSquareBracket, start),
                        b',' => return self.finish(TokenKind::Comma, start),
                        b':' => return self.finish(TokenKind::Colon, start),
                        b';' => return self.finish(TokenKind::Semicolon, start),
                        _ => {
                            self.index = start.index as usize;
                            self.column = start.column;
                            return self.unrecognized_char(start);
                        }
                    };
                }
                State::Identifier | State::DotIdentifier => {
                    if !is_ident_continue(byte) {
                        return if state == State::Identifier {
                            self.finish_identifier(start)
                        } else {
                            self.finish(kind, start)
                        };
                    }
                    self.bump();
                }
                State::IntegerLiteral => match byte {
                    b'.' if self.peek_byte_at(1).is_some_and(|b| b.is_ascii_digit()) => {
                        self.bump();
                        state = State::FloatLiteral;
                        kind = TokenKind::FloatLiteral;
                    }
                    b if is_ident_continue(b) => self.bump(),
                    _ => return self.finish(kind, start),
                },
                State::FloatLiteral => {
                    if !is_ident_continue(byte) {
                        return self.finish(kind, start);
                    }
                    self.bump();
                }
                State::CharLiteral | State::StringLiteral => {
                    let (close, unterminated) = if state == State::CharLiteral {
                        (b'\'', LexErrorKind::UnterminatedChar)
                    } else {
                        (b'"', LexErrorKind::UnterminatedString)
                    };
                    match byte {
                        b'\n' => return self.fail(unterminated, start),
                        b'\\' => {
                            self.bump();
                            state = if state == State::CharLiteral {
                                State::CharEscape
                            } else {
                                State::StringEscape
                            };
                        }
                        b if b == close => {
                            self.bump();
                            return self.finish(kind, start);
                        }
                        _ => self.bump(),
                    }
                }
                State::CharEscape | State::StringEscape => {
                    let escape_loc = self.location();
                    if byte == b'x' {
                        let hex = |b: Option<u8>| b.is_some_and(|b| b.is_ascii_hexdigit());
                        if !hex(self.peek_byte_at(1)) || !hex(self.peek_byte_at(2)) {
                            return self.fail(LexErrorKind::InvalidHexEscape, escape_loc);
                        }
                        self.bump();
                        self.bump();
                        self.bump();
                    } else if is_simple_escape(byte) {
                        self.bump();
                    } else {
                        let ch = self.text[self.index..].chars().next().unwrap_or('\0');
                        return self.fail(LexErrorKind::InvalidEscape(ch), escape_loc);
                    }
                    state = if state == State::CharEscape {
                        State::CharLiteral
                    } else {
                        State::StringLiteral
                    };
                }
                State::Plus => return self.extend_if(byte, b'=', TokenKind::PlusEqual, kind, start),
                State::Minus => {
                    let next = match byte {
                        b'=' => TokenKind::MinusEqual,
                        b'>' => TokenKind::ThinArrow,
                        _ => return self.finish(kind, start),
                    };
                    self.bump();
                    return self.finish(next, start);
                }
                State::Star => {
                    let next = match byte {
                        b'*' => TokenKind::DoubleStar,
                        b'=' => TokenKind::StarEqual,
                        _ => return self.finish(kind, start),
                    };
                    self.bump();
                    return self.finish(next, start);
                }
                State::Slash => return self.extend_if(byte, b'=', TokenKind::SlashEqual, kind, start),
                State::Percent => {
                    return self.extend_if(byte, b'=', TokenKind::PercentEqual, kind, start)
                }
                State::Caret => return self.extend_if(byte, b'=', TokenKind::CaretEqual, kind, start),
                State::Ampersand => {
                    let next = match byte {
                        b'&' => TokenKind::DoubleAmpersand,
                        b'=' => TokenKind::AmpersandEqual,
                        _ => return self.finish(kind, start),
                    };
                    self.bump();
                    return self.finish(next, start);
                }
                State::Pipe => {
                    let next = match byte {
                        b'|' => TokenKind::DoublePipe,
                        b'=' => TokenKind::PipeEqual,
                        _ => return self.finish(kind, start),
                    };
                    self.bump();
                    return self.finish(next, start);
                }
                State::Tilde => return self.extend_if(byte, b'=', TokenKind::TildeEqual, kind, start),
                State::LessThan => match byte {
                    b'<' => {
                        self.bump();
                        state = State::ShiftLeft;
                        kind = TokenKind::ShiftLeft;
                    }
                    b'=' => {
                        self.bump();
                        return self.finish(TokenKind::LessThanOrEqual, start);
                    }
                    _ => return self.finish(kind, start),
                },
                State::GreaterThan => match byte {
                    b'>' => {
                        self.bump();
                        state = State::ShiftRight;
                        kind = TokenKind::ShiftRight;
                    }
                    b'=' => {
                        self.bump();
                        return self.finish(TokenKind::GreaterThanOrEqual, start);
                    }
                    _ => return self.finish(kind, start),
                },
                State::ShiftLeft => {
                    return self.extend_if(byte, b'=', TokenKind::ShiftLeftEqual, kind, start)
                }
                State::ShiftRight => {
                    return self.extend_if(byte, b'=', TokenKind::ShiftRightEqual, kind, start)
                }
                State::Equal => {
                    let next = match byte {
                        b'=' => TokenKind::DoubleEqual,
                        b'>' => TokenKind::FatArrow,
                        _ => return self.finish(kind, start),
                    };
                    self.bump();
                    return self.finish(next, start);
                }
                State::Exclamation => {
                    return self.extend_if(byte, b'=', TokenKind::NotEqual, kind, start)
                }
                State::Dot => match byte {
                    b if is_ident_continue(b) => {
                        self.bump();
                        state = State::DotIdentifier;
                        kind = TokenKind::DotIdentifier;
                    }
                    b'*' => {
                        self.bump();
                        return self.finish(TokenKind::DotStar, start);
                    }
                    b'.' => {
                        self.bump();
                        state = State::DotDot;
                        kind = TokenKind::DotDot;
                    }
                    _ => return self.finish(kind, start),
                },
                State::DotDot => {
                    let next = match byte {
                        b'<' => TokenKind::DotDotLessThan,
                        b'>' => TokenKind::DotDotGreaterThan,
                        b'=' => TokenKind::DotDotEqual,
                        b'.' => TokenKind::DotDotDot,
                        _ => return self.finish(kind, start),
                    };
                    self.bump();
                    return self.finish(next, start);
                }
            }
        }
    }

    /// Finish as `extended` if `byte` is `expected`, otherwise as `kind`.
    fn extend_if(
        &mut self,
        byte: u8,
        expected: u8,
        extended: TokenKind,
        kind: TokenKind,
        start: SourceLocation,
    ) -> Token {
        if byte == expected {
            self.bump();
            return self.finish(extended, start);
        }
        self.finish(kind, start)
    }
}

impl Iterator for Tokenizer<'_> {
    type Item = Token;

    /// Yields tokens up to, but not including, `EndOfFile`. An `Invalid`
    /// token is yielded once and ends the iteration.
    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::EndOfFile {
            self.finished = true;
            return None;
        }
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Tokenizer::new(source).map(|t| t.kind).collect()
    }

    #[test]
    fn test_empty_source_is_eof() {
        let mut tokenizer = Tokenizer::new("");
        assert_eq!(tokenizer.next_token().kind, TokenKind::EndOfFile);
        assert!(tokenizer.error().is_none());
    }

    #[test]
    fn test_longest_match() {
        assert_eq!(kinds("<<="), vec![TokenKind::ShiftLeftEqual]);
        assert_eq!(kinds("<< <= <"), vec![TokenKind::ShiftLeft, TokenKind::LessThanOrEqual, TokenKind::LessThan]);
        assert_eq!(kinds("** *"), vec![TokenKind::DoubleStar, TokenKind::Star]);
        assert_eq!(kinds("-> -= -"), vec![TokenKind::ThinArrow, TokenKind::MinusEqual, TokenKind::Minus]);
        assert_eq!(kinds("=> == ="), vec![TokenKind::FatArrow, TokenKind::DoubleEqual, TokenKind::Equal]);
    }

    #[test]
    fn test_dot_family() {
        assert_eq!(
            kinds("... ..= ..< ..> .. ."),
            vec![
                TokenKind::DotDotDot,
                TokenKind::DotDotEqual,
                TokenKind::DotDotLessThan,
                TokenKind::DotDotGreaterThan,
                TokenKind::DotDot,
                TokenKind::Dot,
            ]
        );
        assert_eq!(kinds("x.y"), vec![TokenKind::Identifier, TokenKind::DotIdentifier]);
        assert_eq!(kinds("p.*"), vec![TokenKind::Identifier, TokenKind::DotStar]);
    }

    #[test]
    fn test_positions_track_rows_and_columns() {
        let tokens: Vec<_> = Tokenizer::new("a\n  bc").collect();
        assert_eq!(tokens[0].loc, SourceLocation::new(0, 1, 1));
        assert_eq!(tokens[1].loc, SourceLocation::new(4, 2, 3));
        assert_eq!(tokens[1].end, 6);
    }

    #[test]
    fn test_column_limit() {
        let source = format!("{}x", " ".repeat(COLUMN_LIMIT as usize));
        let mut tokenizer = Tokenizer::new(&source);
        assert_eq!(tokenizer.next_token().kind, TokenKind::Invalid);
        assert_eq!(tokenizer.error().map(|e| &e.kind), Some(&LexErrorKind::LineTooLong));
    }

    #[test]
    fn test_iterator_stops_after_invalid() {
        let tokens: Vec<_> = Tokenizer::new("a # b").collect();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[1].kind, TokenKind::Invalid);
    }
}
