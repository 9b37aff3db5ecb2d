//! Integer literal decoding.
//!
//! Literals are `[-|+]digits[suffix]` where the digits may carry a `0b`,
//! `0o` or `0x` base prefix and the suffix is a type name starting with `s`
//! or `u` (`42u8`, `-1s32`). Errors carry the byte index in the literal text
//! at which they were detected.

use ember_ast::{NumberError, NumberErrorKind, ParsedNumber};
use ember_options::ParseOptions;

/// A decoded number and its type suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberParts<'t> {
    pub number: ParsedNumber,
    pub suffix: Option<&'t str>,
}

fn digit_value(c: u8) -> Option<u32> {
    match c {
        b'0'..=b'9' => Some((c - b'0') as u32),
        b'a'..=b'z' => Some((c - b'a') as u32 + 10),
        b'A'..=b'Z' => Some((c - b'A') as u32 + 10),
        _ => None,
    }
}

#[inline]
fn is_suffix_start(c: u8) -> bool {
    c == b's' || c == b'u'
}

/// Decode an integer literal.
pub fn parse_number<'t>(text: &'t str, options: &ParseOptions) -> Result<NumberParts<'t>, NumberError> {
    let bytes = text.as_bytes();
    let err = |kind, index| Err(NumberError::new(kind, index));

    let mut index = 0;
    let mut negative = false;
    match bytes.first() {
        Some(b'-') => {
            negative = true;
            index += 1;
        }
        Some(b'+') => {
            if !options.allow_positive_sign {
                return err(NumberErrorKind::PositiveSign, 0);
            }
            index += 1;
        }
        _ => {}
    }

    if index >= bytes.len() {
        return err(NumberErrorKind::Empty, index);
    }

    let mut base = 10u32;
    if bytes[index] == b'0' {
        let Some(&next) = bytes.get(index + 1) else {
            if negative {
                return err(NumberErrorKind::NegativeZero, 0);
            }
            return Ok(NumberParts {
                number: ParsedNumber { negative, value: 0, base },
                suffix: None,
            });
        };
        match next {
            b'.' => return err(NumberErrorKind::FloatingPoint, index + 1),
            b'b' | b'B' => base = 2,
            b'o' | b'O' => base = 8,
            b'x' | b'X' => base = 16,
            c if is_suffix_start(c) => {
                if negative {
                    return err(NumberErrorKind::NegativeZero, 0);
                }
                return Ok(NumberParts {
                    number: ParsedNumber { negative, value: 0, base },
                    suffix: Some(&text[index + 1..]),
                });
            }
            c if c.is_ascii_digit() => return err(NumberErrorKind::LeadingZero, index),
            _ => return err(NumberErrorKind::UnrecognizedBase, index + 1),
        }
        index += 2;
        if index >= bytes.len() || is_suffix_start(bytes[index]) {
            return err(NumberErrorKind::Empty, index);
        }
    }

    let mut value: u64 = 0;
    let mut suffix = None;
    while index < bytes.len() {
        let c = bytes[index];
        if c == b'.' {
            return err(NumberErrorKind::FloatingPoint, index);
        }
        if is_suffix_start(c) {
            suffix = Some(&text[index..]);
            break;
        }
        let Some(digit) = digit_value(c) else {
            return err(NumberErrorKind::UnrecognizedChar, index);
        };
        if digit >= base {
            return err(NumberErrorKind::InvalidDigit, index);
        }
        value = match value
            .checked_mul(base as u64)
            .and_then(|v| v.checked_add(digit as u64))
        {
            Some(v) => v,
            None => return err(NumberErrorKind::Overflow, index),
        };
        index += 1;
    }

    if negative {
        if value > 1u64 << 63 {
            return err(NumberErrorKind::Overflow, 0);
        }
        if suffix.is_some_and(|s| s.starts_with('u')) {
            return err(NumberErrorKind::NegativeNumber, 0);
        }
        if value == 0 {
            return err(NumberErrorKind::NegativeZero, 0);
        }
    }

    Ok(NumberParts {
        number: ParsedNumber { negative, value, base },
        suffix,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<NumberParts<'_>, NumberError> {
        parse_number(text, &ParseOptions::default())
    }

    fn value(text: &str) -> i128 {
        parse(text).unwrap().number.as_i128()
    }

    fn error(text: &str) -> NumberErrorKind {
        parse(text).unwrap_err().kind
    }

    #[test]
    fn test_decimal() {
        assert_eq!(value("0"), 0);
        assert_eq!(value("42"), 42);
        assert_eq!(value("-17"), -17);
        assert_eq!(value("18446744073709551615"), u64::MAX as i128);
    }

    #[test]
    fn test_base_prefixes() {
        assert_eq!(value("0b1011"), 11);
        assert_eq!(value("0B11"), 3);
        assert_eq!(value("0o17"), 15);
        assert_eq!(value("0xff"), 255);
        assert_eq!(value("0XFF"), 255);
        assert_eq!(value("-0x10"), -16);
        assert_eq!(parse("0x1f").unwrap().number.base, 16);
    }

    #[test]
    fn test_suffix() {
        let parts = parse("42u8").unwrap();
        assert_eq!(parts.number.value, 42);
        assert_eq!(parts.suffix, Some("u8"));

        let parts = parse("-1s32").unwrap();
        assert_eq!(parts.number.as_i128(), -1);
        assert_eq!(parts.suffix, Some("s32"));

        assert_eq!(parse("0u8").unwrap().suffix, Some("u8"));
        assert_eq!(parse("0x1u16").unwrap().suffix, Some("u16"));
    }

    #[test]
    fn test_sign_errors() {
        assert_eq!(error("+1"), NumberErrorKind::PositiveSign);
        assert_eq!(error("-"), NumberErrorKind::Empty);
        assert_eq!(error("-0"), NumberErrorKind::NegativeZero);
        assert_eq!(error("-5u8"), NumberErrorKind::NegativeNumber);
    }

    #[test]
    fn test_positive_sign_allowed() {
        let options = ParseOptions {
            allow_positive_sign: true,
            ..ParseOptions::default()
        };
        let parts = parse_number("+7", &options).unwrap();
        assert_eq!(parts.number.as_i128(), 7);
        assert!(!parts.number.negative);
    }

    #[test]
    fn test_digit_errors() {
        assert_eq!(error("0b102"), NumberErrorKind::InvalidDigit);
        assert_eq!(error("0o8"), NumberErrorKind::InvalidDigit);
        assert_eq!(error("12a"), NumberErrorKind::InvalidDigit);
        assert_eq!(error("1_000"), NumberErrorKind::UnrecognizedChar);
        assert_eq!(error("0q1"), NumberErrorKind::UnrecognizedBase);
        assert_eq!(error("012"), NumberErrorKind::LeadingZero);
        assert_eq!(error("0x"), NumberErrorKind::Empty);
    }

    #[test]
    fn test_floating_point_rejected() {
        assert_eq!(error("1.5"), NumberErrorKind::FloatingPoint);
        assert_eq!(error("0.5"), NumberErrorKind::FloatingPoint);
    }

    #[test]
    fn test_overflow() {
        assert_eq!(error("18446744073709551616"), NumberErrorKind::Overflow);
        assert_eq!(value("-9223372036854775808"), i64::MIN as i128);
        assert_eq!(error("-9223372036854775809"), NumberErrorKind::Overflow);
    }

    #[test]
    fn test_error_index() {
        assert_eq!(parse("12a").unwrap_err().index, 2);
        assert_eq!(parse("0b102").unwrap_err().index, 4);
    }
}
