//! Character and string literal decoding.
//!
//! Both functions take the literal text including its quotes.

use ember_ast::LiteralError;

/// Decode the contents between `quote` characters, resolving escapes.
fn decode(text: &str, quote: char) -> Result<String, LiteralError> {
    let bytes = text.as_bytes();
    if bytes.len() < 2 || !text.starts_with(quote) || !text.ends_with(quote) {
        return Err(LiteralError::Unterminated);
    }

    let body_end = text.len() - 1;
    let mut out = String::with_capacity(body_end);
    let mut chars = text[1..body_end].char_indices();
    while let Some((offset, c)) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let index = offset + 1;
        let Some((_, escape)) = chars.next() else {
            return Err(LiteralError::UnterminatedEscape { index });
        };
        let decoded = match escape {
            'a' => '\x07',
            'b' => '\x08',
            'f' => '\x0C',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'v' => '\x0B',
            '\\' => '\\',
            '\'' => '\'',
            '"' => '"',
            'x' => {
                let hi = chars.next();
                let lo = chars.next();
                let (Some((_, hi)), Some((_, lo))) = (hi, lo) else {
                    return Err(LiteralError::UnterminatedEscape { index });
                };
                let (Some(hi), Some(lo)) = (hi.to_digit(16), lo.to_digit(16)) else {
                    return Err(LiteralError::InvalidEscape { index });
                };
                match char::from_u32(hi * 16 + lo) {
                    Some(c) => c,
                    None => return Err(LiteralError::InvalidEscape { index }),
                }
            }
            _ => return Err(LiteralError::InvalidEscape { index }),
        };
        out.push(decoded);
    }
    Ok(out)
}

/// Decode a `'c'` literal into its single character.
pub fn parse_char_literal(text: &str) -> Result<char, LiteralError> {
    let decoded = decode(text, '\'')?;
    let mut chars = decoded.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Err(LiteralError::EmptyChar),
        (Some(c), None) => Ok(c),
        (Some(_), Some(_)) => Err(LiteralError::MultipleChars),
    }
}

/// Decode a `"..."` literal.
pub fn parse_string_literal(text: &str) -> Result<String, LiteralError> {
    decode(text, '"')
}
