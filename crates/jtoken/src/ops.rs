//! Navigation helpers over a flat [`Token`] array: span extraction,
//! byte-exact equality, iterative subtree skip, object lookup by key, array
//! indexing, and integer/boolean coercion.
//!
//! None of these recurse. [`skip`] is the one that would naturally want to
//! (descend into each child, skip its descendants, repeat) and instead walks
//! with a small fixed-capacity auxiliary stack, for the same reason the
//! structural driver avoids native recursion: a hostile or merely very deep
//! document must not blow the call stack.

use crate::token::{Token, TokenKind};

/// Returns the byte slice `input[start..end)` that `tokens[idx]` addresses,
/// or `None` if `idx` is out of bounds.
#[must_use]
pub fn span<'i>(tokens: &[Token], idx: usize, input: &'i [u8]) -> Option<&'i [u8]> {
    let tok = tokens.get(idx)?;
    input.get(tok.start..tok.end)
}

/// Byte-exact comparison of `tokens[idx]`'s span against `needle`.
///
/// Returns `false` (never panics) for an out-of-range index.
#[must_use]
pub fn token_eq(tokens: &[Token], idx: usize, input: &[u8], needle: &[u8]) -> bool {
    span(tokens, idx, input).is_some_and(|s| s == needle)
}

/// The number of immediate descendant tokens of a container: `size` for an
/// array, `2 * size` for an object (keys and values). Zero for non-containers.
#[must_use]
fn child_count(tok: &Token) -> usize {
    match tok.kind {
        TokenKind::Array => tok.size as usize,
        TokenKind::Object => 2 * tok.size as usize,
        TokenKind::String | TokenKind::Primitive => 0,
    }
}

/// Returns the index one past the last descendant of `tokens[idx]` — i.e.
/// the index of `tokens[idx]`'s next sibling, or `tokens.len()` if it was the
/// last token in the array.
///
/// Iterative: walks a fixed-capacity stack of "remaining children at this
/// depth" counters rather than recursing, so it is safe to call on a subtree
/// as deep as `MaxDepth` allows.
///
/// Returns `None` if `idx` is out of bounds.
#[must_use]
pub fn skip<const MAX_DEPTH: usize>(tokens: &[Token], idx: usize) -> Option<usize> {
    let mut remaining = [0usize; MAX_DEPTH];
    let mut depth = 0usize;
    let mut i = idx;

    let first = tokens.get(i)?;
    let mut pending = child_count(first);
    i += 1;

    loop {
        if pending == 0 {
            if depth == 0 {
                return Some(i);
            }
            depth -= 1;
            pending = remaining[depth];
            continue;
        }
        let tok = tokens.get(i)?;
        pending -= 1;
        let grandchildren = child_count(tok);
        i += 1;
        if grandchildren > 0 {
            remaining[depth] = pending;
            depth += 1;
            if depth >= MAX_DEPTH {
                // A well-formed token array produced by `Tokenizer<MAX_DEPTH>`
                // never nests deeper than MAX_DEPTH, so this is unreachable
                // for tokens this crate produced; guard against a
                // hand-constructed array instead of indexing out of bounds.
                return None;
            }
            pending = grandchildren;
        }
    }
}

/// Scans the `size` key/value pairs of an `Object` token for a key whose
/// span equals `key`, and returns the index of the matching value token.
///
/// Returns `None` if `idx` is out of range, not an `Object`, or no key
/// matches.
#[must_use]
pub fn object_get<const MAX_DEPTH: usize>(
    tokens: &[Token],
    idx: usize,
    input: &[u8],
    key: &[u8],
) -> Option<usize> {
    let obj = tokens.get(idx)?;
    if obj.kind != TokenKind::Object {
        return None;
    }
    let mut key_idx = idx + 1;
    for _ in 0..obj.size {
        if token_eq(tokens, key_idx, input, key) {
            return Some(key_idx + 1);
        }
        let value_idx = key_idx + 1;
        key_idx = skip::<MAX_DEPTH>(tokens, value_idx)?;
    }
    None
}

/// Walks the `size` elements of an `Array` token and returns the index of
/// the `n`-th (zero-based) element.
///
/// Returns `None` if `idx` is out of range, not an `Array`, or `n` is out of
/// bounds.
#[must_use]
pub fn array_get<const MAX_DEPTH: usize>(
    tokens: &[Token],
    idx: usize,
    n: usize,
) -> Option<usize> {
    let arr = tokens.get(idx)?;
    if arr.kind != TokenKind::Array || n >= arr.size as usize {
        return None;
    }
    let mut elem_idx = idx + 1;
    for _ in 0..n {
        elem_idx = skip::<MAX_DEPTH>(tokens, elem_idx)?;
    }
    Some(elem_idx)
}

/// Parses `tokens[idx]`'s span as a JSON integer: an optional leading `-`
/// followed by one or more decimal digits. A number with a fractional part
/// or exponent (e.g. `1.0`, `1e3`) fails, as does anything that isn't a
/// `Primitive`.
#[must_use]
pub fn as_i64(tokens: &[Token], idx: usize, input: &[u8]) -> Option<i64> {
    let tok = tokens.get(idx)?;
    if tok.kind != TokenKind::Primitive {
        return None;
    }
    let bytes = span(tokens, idx, input)?;
    let (neg, digits) = match bytes.split_first() {
        Some((b'-', rest)) => (true, rest),
        _ => (false, bytes),
    };
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let mut value: i64 = 0;
    for &d in digits {
        value = value.checked_mul(10)?.checked_add(i64::from(d - b'0'))?;
    }
    Some(if neg { -value } else { value })
}

/// Parses `tokens[idx]`'s span as a JSON boolean: exactly `true` or `false`.
/// `null` is not a boolean and returns `None`.
#[must_use]
pub fn as_bool(tokens: &[Token], idx: usize, input: &[u8]) -> Option<bool> {
    let tok = tokens.get(idx)?;
    if tok.kind != TokenKind::Primitive {
        return None;
    }
    match span(tokens, idx, input)? {
        b"true" => Some(true),
        b"false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Options, Token, TokenKind, Tokenizer};

    fn tokenize(input: &[u8]) -> [Token; 32] {
        let mut tokens = [Token {
            kind: TokenKind::Primitive,
            start: 0,
            end: 0,
            size: 0,
            parent: None,
        }; 32];
        let mut tk: Tokenizer<8> = Tokenizer::new(Options::default());
        let n = tk.parse(input, &mut tokens).expect("parse");
        assert!(n <= tokens.len());
        tokens
    }

    #[test]
    fn span_extracts_string_without_quotes() {
        let input = br#"{"a": "hi"}"#;
        let tokens = tokenize(input);
        assert_eq!(span(&tokens, 1, input), Some(&b"a"[..]));
        assert_eq!(span(&tokens, 2, input), Some(&b"hi"[..]));
    }

    #[test]
    fn token_eq_compares_bytes() {
        let input = br#"{"a": 1}"#;
        let tokens = tokenize(input);
        assert!(token_eq(&tokens, 1, input, b"a"));
        assert!(!token_eq(&tokens, 1, input, b"b"));
    }

    #[test]
    fn skip_over_nested_container_lands_on_sibling() {
        let input = br#"{"a": [1, 2], "b": 3}"#;
        let tokens = tokenize(input);
        // tokens: 0 object, 1 "a", 2 array(size=2), 3 1, 4 2, 5 "b", 6 3
        let after_array = skip::<8>(&tokens, 2).unwrap();
        assert_eq!(after_array, 5);
        assert!(token_eq(&tokens, after_array, input, b"b"));
    }

    #[test]
    fn object_get_finds_value_by_key() {
        let input = br#"{"num": 1234, "arr": [1, 2]}"#;
        let tokens = tokenize(input);
        let num = object_get::<8>(&tokens, 0, input, b"num").unwrap();
        assert_eq!(as_i64(&tokens, num, input), Some(1234));
        assert!(object_get::<8>(&tokens, 0, input, b"missing").is_none());
    }

    #[test]
    fn array_get_indexes_elements() {
        let input = b"[10, 20, 30]";
        let tokens = tokenize(input);
        let first = array_get::<8>(&tokens, 0, 0).unwrap();
        let last = array_get::<8>(&tokens, 0, 2).unwrap();
        assert_eq!(as_i64(&tokens, first, input), Some(10));
        assert_eq!(as_i64(&tokens, last, input), Some(30));
        assert!(array_get::<8>(&tokens, 0, 3).is_none());
    }

    #[test]
    fn integer_coercion_rejects_fractional_and_exponent() {
        let input = b"[1, -2, 1.5, 1e3]";
        let tokens = tokenize(input);
        assert_eq!(as_i64(&tokens, 1, input), Some(1));
        assert_eq!(as_i64(&tokens, 2, input), Some(-2));
        assert_eq!(as_i64(&tokens, 3, input), None);
        assert_eq!(as_i64(&tokens, 4, input), None);
    }

    #[test]
    fn boolean_coercion_rejects_null() {
        let input = b"[true, false, null]";
        let tokens = tokenize(input);
        assert_eq!(as_bool(&tokens, 1, input), Some(true));
        assert_eq!(as_bool(&tokens, 2, input), Some(false));
        assert_eq!(as_bool(&tokens, 3, input), None);
    }
}
