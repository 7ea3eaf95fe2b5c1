//! Byte classification and literal matching over a `(input, pos)` view.
//!
//! These are the leaves of the tokenizer: no state beyond the arguments
//! passed in, no allocation, no partial-input handling beyond what their
//! return types express.

use crate::error::TokenizeError;

/// JSON whitespace: space, tab, line feed, carriage return.
#[must_use]
pub(crate) fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

#[must_use]
pub(crate) fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

#[must_use]
pub(crate) fn is_hex(b: u8) -> bool {
    b.is_ascii_hexdigit()
}

/// A byte that may legally follow a complete value: `,`, `]`, `}`, or
/// whitespace. Used to confirm a number or keyword literal isn't the prefix
/// of a longer token.
#[must_use]
pub(crate) fn is_delim(b: u8) -> bool {
    matches!(b, b',' | b']' | b'}') || is_space(b)
}

/// Matches the fixed literal `lit` (one of `true`, `false`, `null`) starting
/// at `pos`. The literal must be followed by a delimiter or end-of-buffer.
///
/// Returns the literal's length on success. Fails with
/// [`TokenizeError::Invalid`] on a mismatched byte, or
/// [`TokenizeError::Partial`] if the buffer ends inside the literal or
/// immediately after it with no delimiter yet observed.
pub(crate) fn match_literal(
    input: &[u8],
    pos: usize,
    lit: &'static [u8],
) -> Result<usize, TokenizeError> {
    for (i, &want) in lit.iter().enumerate() {
        let Some(&got) = input.get(pos + i) else {
            return Err(TokenizeError::Partial { pos: pos + i });
        };
        if got != want {
            return Err(TokenizeError::Invalid { pos: pos + i });
        }
    }
    let end = pos + lit.len();
    match input.get(end) {
        None => Ok(lit.len()),
        Some(&b) if is_delim(b) => Ok(lit.len()),
        Some(_) => Err(TokenizeError::Invalid { pos: end }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_whitespace() {
        for b in [b' ', b'\t', b'\n', b'\r'] {
            assert!(is_space(b));
        }
        assert!(!is_space(b'x'));
    }

    #[test]
    fn classifies_delimiters() {
        for b in [b',', b']', b'}', b' '] {
            assert!(is_delim(b));
        }
        assert!(!is_delim(b'1'));
    }

    #[test]
    fn literal_matches_exactly_at_end_of_buffer() {
        assert_eq!(match_literal(b"true", 0, crate::values::TRUE), Ok(4));
    }

    #[test]
    fn literal_matches_followed_by_delimiter() {
        assert_eq!(match_literal(b"null]", 0, crate::values::NULL), Ok(4));
    }

    #[test]
    fn literal_fails_on_mismatch() {
        let err = match_literal(b"talse", 0, crate::values::TRUE).unwrap_err();
        assert!(matches!(err, TokenizeError::Invalid { pos: 1 }));
    }

    #[test]
    fn literal_partial_inside_literal() {
        let err = match_literal(b"tru", 0, crate::values::TRUE).unwrap_err();
        assert!(matches!(err, TokenizeError::Partial { pos: 3 }));
    }

    #[test]
    fn literal_rejects_trailing_non_delimiter() {
        let err = match_literal(b"truex", 0, crate::values::TRUE).unwrap_err();
        assert!(matches!(err, TokenizeError::Invalid { pos: 4 }));
    }
}
