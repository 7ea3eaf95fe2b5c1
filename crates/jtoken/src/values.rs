//! Value recognizers: string, number, and primitive-literal scanning.
//!
//! Each recognizer is a pure function of `(input, pos)` — it never mutates
//! caller state and never commits a position. The structural driver in
//! [`crate::parser`] is responsible for advancing `self.pos` only once a
//! recognizer has returned success, which is what makes a `Partial` outcome
//! free: nothing needs to be rewound because nothing was committed.

use crate::error::TokenizeError;
use crate::scanner::{is_delim, is_digit, is_hex, match_literal};

/// Scans a JSON string starting at the opening quote `input[pos]`.
///
/// On success returns `(key_start, key_end, end)`: `key_start..key_end` is
/// the span excluding the quotes, and `end` is the position just past the
/// closing quote.
///
/// Fails with [`TokenizeError::Invalid`] on a raw control byte (`< 0x20`), an
/// unrecognized escape introducer, or a malformed `\u` escape. Fails with
/// [`TokenizeError::Partial`] if the buffer ends inside the string or mid
/// escape, with `pos` set to the first byte beyond the truncated region;
/// since this function never commits a resume position of its own, the
/// caller's `pos` is left untouched, so a later call with more bytes
/// re-scans the whole literal from the opening quote.
pub(crate) fn scan_string(input: &[u8], pos: usize) -> Result<(usize, usize), TokenizeError> {
    debug_assert_eq!(input.get(pos), Some(&b'"'));
    let mut i = pos + 1;
    loop {
        let Some(&c) = input.get(i) else {
            return Err(TokenizeError::Partial { pos: i });
        };
        if c < 0x20 {
            return Err(TokenizeError::Invalid { pos: i });
        }
        if c == b'"' {
            return Ok((pos + 1, i));
        }
        if c == b'\\' {
            i += 1;
            let Some(&esc) = input.get(i) else {
                return Err(TokenizeError::Partial { pos: i });
            };
            match esc {
                b'"' | b'\\' | b'/' | b'b' | b'f' | b'n' | b'r' | b't' => {
                    i += 1;
                }
                b'u' => {
                    for _ in 0..4 {
                        i += 1;
                        let Some(&h) = input.get(i) else {
                            return Err(TokenizeError::Partial { pos: i });
                        };
                        if !is_hex(h) {
                            return Err(TokenizeError::Invalid { pos: i });
                        }
                    }
                    i += 1;
                }
                _ => return Err(TokenizeError::Invalid { pos: i }),
            }
            continue;
        }
        i += 1;
    }
}

/// Scans a JSON number starting at `input[pos]`.
///
/// Grammar: optional `-`; integer part `0` or `[1-9][0-9]*`; optional
/// fractional part; optional exponent. Returns the exclusive end position on
/// success.
///
/// A number is only accepted once a delimiter (or end-of-buffer *and the
/// caller is certain no more bytes follow*, which this function cannot know)
/// has been observed after it — so in fact a number followed immediately by
/// end-of-buffer always fails with [`TokenizeError::Partial`], never a
/// success, because appending another digit could change the value. This is
/// the price of incremental correctness.
pub(crate) fn scan_number(input: &[u8], pos: usize, strict: bool) -> Result<usize, TokenizeError> {
    let mut i = pos;
    let Some(&first) = input.get(i) else {
        return Err(TokenizeError::Partial { pos: i });
    };
    if first == b'-' {
        i += 1;
        if input.get(i).is_none() {
            return Err(TokenizeError::Partial { pos: i });
        }
    }

    match input.get(i) {
        Some(&b'0') => {
            i += 1;
            if strict {
                if let Some(&d) = input.get(i) {
                    if is_digit(d) {
                        return Err(TokenizeError::Invalid { pos: i });
                    }
                }
            } else {
                while input.get(i).is_some_and(|&d| is_digit(d)) {
                    i += 1;
                }
            }
        }
        Some(&d) if (b'1'..=b'9').contains(&d) => {
            i += 1;
            while input.get(i).is_some_and(|&d| is_digit(d)) {
                i += 1;
            }
        }
        Some(_) => return Err(TokenizeError::Invalid { pos: i }),
        None => return Err(TokenizeError::Partial { pos: i }),
    }

    if input.get(i) == Some(&b'.') {
        i += 1;
        match input.get(i) {
            None => return Err(TokenizeError::Partial { pos: i }),
            Some(&d) if is_digit(d) => {
                i += 1;
                while input.get(i).is_some_and(|&d| is_digit(d)) {
                    i += 1;
                }
            }
            Some(_) => return Err(TokenizeError::Invalid { pos: i }),
        }
    }

    if matches!(input.get(i), Some(&b'e' | &b'E')) {
        i += 1;
        if matches!(input.get(i), Some(&b'+' | &b'-')) {
            i += 1;
        }
        match input.get(i) {
            None => return Err(TokenizeError::Partial { pos: i }),
            Some(&d) if is_digit(d) => {
                i += 1;
                while input.get(i).is_some_and(|&d| is_digit(d)) {
                    i += 1;
                }
            }
            Some(_) => return Err(TokenizeError::Invalid { pos: i }),
        }
    }

    // Resume safety: end-of-buffer here means the number might not be over.
    let Some(&after) = input.get(i) else {
        return Err(TokenizeError::Partial { pos: i });
    };
    if !is_delim(after) {
        return Err(TokenizeError::Invalid { pos: i });
    }
    Ok(i)
}

pub(crate) const TRUE: &[u8] = b"true";
pub(crate) const FALSE: &[u8] = b"false";
pub(crate) const NULL: &[u8] = b"null";

/// Dispatches to the literal matcher or the number scanner based on the
/// first byte, and returns the exclusive end position of the primitive
/// token.
pub(crate) fn scan_primitive(
    input: &[u8],
    pos: usize,
    strict: bool,
) -> Result<usize, TokenizeError> {
    match input.get(pos) {
        None => Err(TokenizeError::Partial { pos }),
        Some(&b't') => match_literal(input, pos, TRUE).map(|n| pos + n),
        Some(&b'f') => match_literal(input, pos, FALSE).map(|n| pos + n),
        Some(&b'n') => match_literal(input, pos, NULL).map(|n| pos + n),
        Some(_) => scan_number(input, pos, strict),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_excludes_quotes_in_span() {
        let (start, end) = scan_string(br#""hi""#, 0).unwrap();
        assert_eq!((start, end), (1, 3));
    }

    #[test]
    fn string_rejects_raw_control_byte() {
        let err = scan_string(b"\"a\x01b\"", 0).unwrap_err();
        assert!(matches!(err, TokenizeError::Invalid { pos: 2 }));
    }

    #[test]
    fn string_rejects_unknown_escape() {
        let err = scan_string(br#""\q""#, 0).unwrap_err();
        assert!(matches!(err, TokenizeError::Invalid { pos: 2 }));
    }

    #[test]
    fn string_partial_inside_unicode_escape() {
        let err = scan_string(br#""\u12"#, 0).unwrap_err();
        assert!(matches!(err, TokenizeError::Partial { .. }));
    }

    #[test]
    fn string_partial_never_commits_a_position() {
        // scan_string returns a byte offset on Partial for diagnostics only;
        // it never advances anything the caller relies on to resume, since
        // the driver's `self.pos` is what actually gets rewound.
        let a = scan_string(br#""abc"#, 0).unwrap_err();
        let b = scan_string(br#""abc"#, 0).unwrap_err();
        assert_eq!(a, b);
    }

    #[test]
    fn number_accepts_leading_zero_only_in_relaxed_mode() {
        assert!(scan_number(b"01 ", 0, true).is_err());
        assert_eq!(scan_number(b"01 ", 0, false), Ok(2));
    }

    #[test]
    fn number_rejects_bare_minus() {
        let err = scan_number(b"- ", 0, true).unwrap_err();
        assert!(matches!(err, TokenizeError::Partial { .. } | TokenizeError::Invalid { .. }));
    }

    #[test]
    fn number_parses_fraction_and_exponent() {
        assert_eq!(scan_number(b"-12.5e+10 ", 0, true), Ok(9));
    }

    #[test]
    fn number_at_end_of_buffer_is_always_partial() {
        assert!(matches!(
            scan_number(b"123", 0, true),
            Err(TokenizeError::Partial { .. })
        ));
    }

    #[test]
    fn primitive_dispatches_on_first_byte() {
        assert_eq!(scan_primitive(b"true,", 0, true), Ok(4));
        assert_eq!(scan_primitive(b"false,", 0, true), Ok(5));
        assert_eq!(scan_primitive(b"null,", 0, true), Ok(4));
        assert_eq!(scan_primitive(b"42,", 0, true), Ok(2));
    }
}
