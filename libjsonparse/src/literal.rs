//! Literal conversion.
//!
//! The lexer hands over raw NUMBER and STRING text. This module enforces the
//! strict JSON grammar for numbers and decodes string escapes. Offsets in
//! errors are absolute positions in the source.

use crate::error::{ParseError, Result};

/// Convert a raw NUMBER literal that starts at `offset`.
///
/// The literal must match
/// `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?` in full.
pub fn parse_number(literal: &str, offset: usize) -> Result<f64> {
    let invalid = || ParseError::InvalidNumber {
        literal: literal.to_string(),
        offset,
    };

    if !is_json_number(literal.as_bytes()) {
        return Err(invalid());
    }
    literal.parse::<f64>().map_err(|_| invalid())
}

fn is_json_number(s: &[u8]) -> bool {
    let mut i = 0;

    if s.first() == Some(&b'-') {
        i += 1;
    }

    // Integer part: a lone zero, or a non-zero digit followed by digits
    match s.get(i) {
        Some(b'0') => i += 1,
        Some(b'1'..=b'9') => i += count_digits(&s[i..]),
        _ => return false,
    }

    if s.get(i) == Some(&b'.') {
        i += 1;
        let digits = count_digits(&s[i..]);
        if digits == 0 {
            return false;
        }
        i += digits;
    }

    if matches!(s.get(i), Some(b'e' | b'E')) {
        i += 1;
        if matches!(s.get(i), Some(b'+' | b'-')) {
            i += 1;
        }
        let digits = count_digits(&s[i..]);
        if digits == 0 {
            return false;
        }
        i += digits;
    }

    i == s.len()
}

fn count_digits(s: &[u8]) -> usize {
    s.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Decode the raw body of a STRING token whose opening quote is at `offset`.
pub fn parse_string(literal: &str, offset: usize) -> Result<String> {
    // Fast path: nothing to decode
    if !literal.bytes().any(|b| b == b'\\' || b < 0x20) {
        return Ok(literal.to_string());
    }

    let body_offset = offset + 1;
    let mut out = String::with_capacity(literal.len());
    let mut chars = literal.char_indices();

    while let Some((i, ch)) = chars.next() {
        match ch {
            '\\' => {
                let escape_offset = body_offset + i;
                let Some((_, esc)) = chars.next() else {
                    return Err(bad_escape("\\", escape_offset));
                };
                match esc {
                    '"' => out.push('"'),
                    '\\' => out.push('\\'),
                    '/' => out.push('/'),
                    'b' => out.push('\x08'),
                    'f' => out.push('\x0C'),
                    'n' => out.push('\n'),
                    'r' => out.push('\r'),
                    't' => out.push('\t'),
                    'u' => {
                        let ch = parse_unicode_escape(literal, i, escape_offset)?;
                        out.push(ch.value);
                        // Skip the hex digits (and the second escape of a pair)
                        for _ in 0..ch.extra_chars {
                            chars.next();
                        }
                    }
                    other => {
                        return Err(bad_escape(&format!("\\{}", other), escape_offset));
                    }
                }
            }
            c if (c as u32) < 0x20 => {
                return Err(ParseError::ControlCharacter {
                    code: c as u32,
                    offset: body_offset + i,
                });
            }
            c => out.push(c),
        }
    }

    Ok(out)
}

/// A decoded `\u` escape and how many characters past `\u` it used.
struct UnicodeEscape {
    value: char,
    extra_chars: usize,
}

/// Decode `\uXXXX` (or a `\uXXXX\uXXXX` surrogate pair) at byte `start` of
/// `literal`, where `literal[start..]` begins with the backslash.
fn parse_unicode_escape(literal: &str, start: usize, offset: usize) -> Result<UnicodeEscape> {
    let high = read_hex4(literal, start, offset)?;

    if (0xDC00..=0xDFFF).contains(&high) {
        return Err(bad_escape(&literal[start..start + 6], offset));
    }

    if !(0xD800..=0xDBFF).contains(&high) {
        // Not a surrogate, so always a valid scalar value
        let value = char::from_u32(high)
            .ok_or_else(|| bad_escape(&literal[start..start + 6], offset))?;
        return Ok(UnicodeEscape {
            value,
            extra_chars: 4,
        });
    }

    // High surrogate: a low surrogate escape must follow
    let next = start + 6;
    if !literal[next..].starts_with("\\u") {
        return Err(bad_escape(&literal[start..start + 6], offset));
    }
    let low = read_hex4(literal, next, offset + 6)?;
    if !(0xDC00..=0xDFFF).contains(&low) {
        return Err(bad_escape(&literal[start..next + 6], offset));
    }

    let code = 0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00);
    let value = char::from_u32(code)
        .ok_or_else(|| bad_escape(&literal[start..next + 6], offset))?;
    Ok(UnicodeEscape {
        value,
        extra_chars: 10,
    })
}

/// Read the four hex digits following `\u` at byte `start`.
fn read_hex4(literal: &str, start: usize, offset: usize) -> Result<u32> {
    let digits = literal
        .get(start + 2..start + 6)
        .filter(|d| d.bytes().all(|b| b.is_ascii_hexdigit()));

    match digits {
        Some(d) => u32::from_str_radix(d, 16)
            .map_err(|_| bad_escape(&literal[start..start + 6], offset)),
        None => {
            let end = literal[start..]
                .char_indices()
                .nth(6)
                .map_or(literal.len(), |(i, _)| start + i);
            Err(bad_escape(&literal[start..end], offset))
        }
    }
}

fn bad_escape(sequence: &str, offset: usize) -> ParseError {
    ParseError::InvalidEscape {
        sequence: sequence.to_string(),
        offset,
    }
}
