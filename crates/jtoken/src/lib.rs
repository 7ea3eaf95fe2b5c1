//! A zero-allocation, resumable JSON tokenizer paired with a line-oriented
//! Server-Sent Events (SSE) `data:` framer.
//!
//! Overview
//! - [`Tokenizer`] turns an in-memory byte buffer into a flat [`Token`] array
//!   that slices the original buffer; it never builds a tree and never
//!   allocates. A `Tokenizer` can be fed the same logical input across
//!   several calls with a monotonically growing length and will resume
//!   exactly where it left off (see [`TokenizeError::Partial`]).
//! - A *count-only* call ([`Tokenizer::count`]) walks the same state machine
//!   without a token array and returns the number of tokens a materializing
//!   call would have produced; both modes are guaranteed to agree (see the
//!   crate tests for that property).
//! - [`sse`] is an independent, cursor-driven scanner for `text/event-stream`
//!   framing: it yields the payload of the next `data:` line, silently
//!   skipping comments, blank lines, and other SSE fields.
//! - [`ops`], [`path`], and [`escape`] supply the routine navigation helpers
//!   (span extraction, equality, subtree skip, object/array lookup, path
//!   traversal, integer/boolean coercion, and `\uXXXX` decoding to UTF-8)
//!   that make a bare token array usable without ever materializing a DOM.
//!
//! This crate is `#![no_std]` and performs no heap allocation whatsoever: the
//! container-frame stack that [`Tokenizer`] uses to track open objects and
//! arrays is a fixed-size array sized by the `MAX_DEPTH` const generic
//! parameter (default 64), and the token array is always borrowed from the
//! caller.
#![no_std]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::pedantic)]

#[cfg(test)]
extern crate std;

mod error;
mod options;
mod parser;
mod scanner;
mod token;
mod values;

pub mod escape;
pub mod ops;
pub mod path;
pub mod sse;

pub use error::TokenizeError;
pub use options::Options;
pub use parser::Tokenizer;
pub use token::{Token, TokenKind};
