#![no_main]

use arbitrary::Arbitrary;
use jtoken::{Options, Token, TokenKind, TokenizeError, Tokenizer};
use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Value};

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let node_type = u.choose_index(21)?;
        let value = match node_type {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => {
                let n: i32 = u.arbitrary()?;
                Value::Number(n.into())
            }
            3..=10 => Value::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            16..=20 => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(Map::from_iter(m.into_iter().map(|(k, v)| (k, v.0))))
            }
            _ => Err(arbitrary::Error::IncorrectFormat)?,
        };
        Ok(ArbitraryValue(value))
    }
}

fn blank_tokens(n: usize) -> Vec<Token> {
    vec![
        Token {
            kind: TokenKind::Primitive,
            start: 0,
            end: 0,
            size: 0,
            parent: None,
        };
        n
    ]
}

/// Splits `len` bytes into chunks whose sizes are derived from `seed`, each
/// at least one byte.
fn chunk_lengths(len: usize, mut seed: u64) -> Vec<usize> {
    let mut out = Vec::new();
    let mut start = 0;
    while start < len {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        let remaining = len - start;
        let size = ((seed >> 33) as usize % remaining) + 1;
        start += size;
        out.push(start);
    }
    out
}

/// Feeds `input` to a tokenizer in growing windows and checks the
/// incremental-idempotence property: every partial result stays partial
/// until the final window, which must match a one-shot parse.
fn check_incremental_matches_one_shot(input: &[u8], seed: u64) {
    let mut one_shot_tk: Tokenizer<32> = Tokenizer::new(Options::default());
    let mut one_shot_toks = blank_tokens(4096);
    let one_shot = one_shot_tk.parse(input, &mut one_shot_toks);

    let mut counter: Tokenizer<32> = Tokenizer::new(Options::default());
    let counted = counter.count(input);
    match (&one_shot, &counted) {
        (Ok(a), Ok(b)) => assert_eq!(a, b),
        (Err(a), Err(b)) => assert_eq!(a, b),
        _ => panic!("count/materialize disagreement on {input:?}"),
    }

    let mut tk: Tokenizer<32> = Tokenizer::new(Options::default());
    let mut toks = blank_tokens(4096);
    let windows = chunk_lengths(input.len(), seed);
    for &len in &windows {
        match tk.parse(&input[..len], &mut toks) {
            Ok(n) => {
                assert_eq!(len, input.len(), "succeeded before consuming everything");
                if let Ok(expected) = one_shot {
                    assert_eq!(n, expected);
                    assert_eq!(&toks[..n], &one_shot_toks[..n]);
                }
                return;
            }
            Err(TokenizeError::Partial { .. }) => {
                assert!(one_shot.is_err(), "incremental partial but one-shot succeeded");
            }
            Err(e) => {
                assert_eq!(Err(e), one_shot, "incremental and one-shot disagree");
                return;
            }
        }
    }
}

fuzz_target!(|value: ArbitraryValue| {
    let Ok(serialized) = serde_json::to_vec(&value.0) else {
        return;
    };
    if serialized.is_empty() {
        return;
    }
    let mut seed = 0u64;
    for &b in &serialized {
        seed = seed.wrapping_mul(31).wrapping_add(u64::from(b));
    }
    check_incremental_matches_one_shot(&serialized, seed);
});
