//! Typed path traversal over a token array.
//!
//! The source this crate's contract is drawn from expresses a path as a
//! variadic argument list terminated by a sentinel. That doesn't translate:
//! a caller here builds a slice of [`PathStep`], a small sum type, and hands
//! it to [`resolve`].

use crate::ops::{array_get, object_get};
use crate::token::TokenKind;
use crate::Token;

/// One step of a path into a token tree: either an object key or an array
/// index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStep<'a> {
    /// Look up this key in the current token, which must be an `Object`.
    Key(&'a [u8]),
    /// Index into the current token, which must be an `Array`.
    Index(usize),
}

/// Resolves `path` starting from `tokens[root]`.
///
/// At each step, if the current token is an `Object` the step must be
/// [`PathStep::Key`]; if it is an `Array`, the step must be
/// [`PathStep::Index`]. A type mismatch, a missing key, an out-of-bounds
/// index, or an out-of-range token index returns `None` immediately — the
/// partially resolved prefix is discarded, matching the "last resolved index
/// or not found" contract of a linear path walk where a miss anywhere
/// invalidates the whole lookup.
///
/// An empty `path` resolves to `root` itself.
#[must_use]
pub fn resolve<const MAX_DEPTH: usize>(
    tokens: &[Token],
    root: usize,
    input: &[u8],
    path: &[PathStep<'_>],
) -> Option<usize> {
    let mut current = root;
    for step in path {
        let tok = tokens.get(current)?;
        current = match (tok.kind, step) {
            (TokenKind::Object, PathStep::Key(key)) => {
                object_get::<MAX_DEPTH>(tokens, current, input, key)?
            }
            (TokenKind::Array, PathStep::Index(n)) => array_get::<MAX_DEPTH>(tokens, current, *n)?,
            _ => return None,
        };
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Options, TokenKind as TK, Tokenizer};

    fn tokenize(input: &[u8]) -> [Token; 32] {
        let mut tokens = [Token {
            kind: TK::Primitive,
            start: 0,
            end: 0,
            size: 0,
            parent: None,
        }; 32];
        let mut tk: Tokenizer<8> = Tokenizer::new(Options::default());
        tk.parse(input, &mut tokens).expect("parse");
        tokens
    }

    #[test]
    fn traverses_mixed_object_and_array_path() {
        let input = br#"{"users": [{"name": "ada"}, {"name": "grace"}]}"#;
        let tokens = tokenize(input);
        let idx = resolve::<8>(
            &tokens,
            0,
            input,
            &[
                PathStep::Key(b"users"),
                PathStep::Index(1),
                PathStep::Key(b"name"),
            ],
        )
        .unwrap();
        assert_eq!(&input[tokens[idx].start..tokens[idx].end], b"grace");
    }

    #[test]
    fn empty_path_resolves_to_root() {
        let input = b"{}";
        let tokens = tokenize(input);
        assert_eq!(resolve::<8>(&tokens, 0, input, &[]), Some(0));
    }

    #[test]
    fn type_mismatch_fails() {
        let input = br#"{"a": 1}"#;
        let tokens = tokenize(input);
        assert!(resolve::<8>(&tokens, 0, input, &[PathStep::Index(0)]).is_none());
    }

    #[test]
    fn missing_key_fails() {
        let input = br#"{"a": 1}"#;
        let tokens = tokenize(input);
        assert!(resolve::<8>(&tokens, 0, input, &[PathStep::Key(b"missing")]).is_none());
    }
}
