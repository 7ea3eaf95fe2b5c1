//! The structural driver: a state machine over container frames that
//! validates JSON grammar at each position, invokes the value recognizers in
//! [`crate::values`], and threads a flat [`Token`] array.
//!
//! Design
//! - State lives entirely in the caller-owned [`Tokenizer`] descriptor: no
//!   global state, no allocation. The frame stack is a fixed-size array
//!   sized by the `MAX_DEPTH` const generic, not a growable `Vec`, so
//!   pathologically deep input fails fast with [`TokenizeError::Depth`]
//!   instead of blowing any stack (caller's or host's) or growing without
//!   bound.
//! - [`Tokenizer::parse`] and [`Tokenizer::count`] share one code path via
//!   [`TokenSink`], which either writes through to a caller-provided token
//!   array or silently counts. This is what guarantees the two modes agree:
//!   there is exactly one place (`new_token`) where the sink is consulted,
//!   and it's the only point where behavior can diverge between the modes.
//! - A value recognizer that is mid-token at end-of-buffer reports
//!   [`TokenizeError::Partial`] without the driver having committed any of
//!   that value's side effects: `accept_value` / `accept_key` run *before*
//!   the recognizer, so on a partial outcome the driver rolls back the
//!   container's `size` bump and per-frame state (or `root_done` at the
//!   root). Combined with the recognizers never committing `pos` until they
//!   succeed, a later call with more bytes reproduces exactly the tokens a
//!   one-shot parse of the full buffer would have produced.

use crate::error::TokenizeError;
use crate::scanner::is_space;
use crate::token::{Token, TokenKind};
use crate::values::{scan_primitive, scan_string};
use crate::Options;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContainerKind {
    Object,
    Array,
}

impl ContainerKind {
    fn as_token_kind(self) -> TokenKind {
        match self {
            ContainerKind::Object => TokenKind::Object,
            ContainerKind::Array => TokenKind::Array,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameState {
    ObjKeyOrEnd,
    ObjKey,
    ObjColon,
    ObjValue,
    ObjCommaOrEnd,
    ArrValueOrEnd,
    ArrValue,
    ArrCommaOrEnd,
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    kind: ContainerKind,
    state: FrameState,
    /// Index of this container's own token. Meaningful in both modes: in
    /// count-only mode it is still a valid (monotonically increasing) index,
    /// the sink just never dereferences it.
    token: u32,
}

impl Default for Frame {
    fn default() -> Self {
        Frame {
            kind: ContainerKind::Object,
            state: FrameState::ObjKeyOrEnd,
            token: 0,
        }
    }
}

/// Either a caller-provided token array (materializing mode) or nothing
/// (count-only mode). The tokenizer's side effects are written through this
/// single seam, which is what keeps the two modes in lockstep.
enum TokenSink<'t> {
    Count,
    Tokens(&'t mut [Token]),
}

impl<'t> TokenSink<'t> {
    /// Writes `tok` at `idx` if materializing. Returns `false` only when
    /// materializing and `idx` is out of bounds; count-only mode never
    /// fails.
    #[must_use]
    fn write(&mut self, idx: u32, tok: Token) -> bool {
        match self {
            TokenSink::Count => true,
            TokenSink::Tokens(toks) => match toks.get_mut(idx as usize) {
                Some(slot) => {
                    *slot = tok;
                    true
                }
                None => false,
            },
        }
    }

    fn set_end(&mut self, idx: u32, end: usize) {
        if let TokenSink::Tokens(toks) = self {
            if let Some(t) = toks.get_mut(idx as usize) {
                t.end = end;
            }
        }
    }

    fn bump_size(&mut self, idx: u32) {
        if let TokenSink::Tokens(toks) = self {
            if let Some(t) = toks.get_mut(idx as usize) {
                t.size += 1;
            }
        }
    }

    fn unbump_size(&mut self, idx: u32) {
        if let TokenSink::Tokens(toks) = self {
            if let Some(t) = toks.get_mut(idx as usize) {
                t.size -= 1;
            }
        }
    }
}

/// A resumable, zero-allocation JSON tokenizer.
///
/// `MAX_DEPTH` bounds the number of simultaneously open containers (objects
/// and arrays); it defaults to 64, matching common JSON-tokenizer libraries.
/// Exceeding it fails with [`TokenizeError::Depth`] rather than growing the
/// frame stack.
///
/// A `Tokenizer` is meant to be reused across calls on the same logical
/// input: see [`Tokenizer::parse`] for the incremental contract.
#[derive(Debug, Clone)]
pub struct Tokenizer<const MAX_DEPTH: usize = 64> {
    pos: usize,
    toknext: u32,
    depth: usize,
    root_done: bool,
    last_error: Option<TokenizeError>,
    stack: [Frame; MAX_DEPTH],
    options: Options,
}

impl<const MAX_DEPTH: usize> Default for Tokenizer<MAX_DEPTH> {
    fn default() -> Self {
        Tokenizer::new(Options::default())
    }
}

impl<const MAX_DEPTH: usize> Tokenizer<MAX_DEPTH> {
    /// Creates a fresh tokenizer with the given options.
    #[must_use]
    pub fn new(options: Options) -> Self {
        Tokenizer {
            pos: 0,
            toknext: 0,
            depth: 0,
            root_done: false,
            last_error: None,
            stack: [Frame::default(); MAX_DEPTH],
            options,
        }
    }

    /// Resets the descriptor to its initial state, as if newly constructed
    /// with the same options. Required after any non-[`TokenizeError::Partial`]
    /// failure before the descriptor can be reused.
    pub fn reset(&mut self) {
        *self = Tokenizer::new(self.options);
    }

    /// The last error recorded by a call to [`Tokenizer::parse`] or
    /// [`Tokenizer::count`], for diagnostics. Cleared at the start of every
    /// call and set only if that call fails.
    #[must_use]
    pub fn last_error(&self) -> Option<TokenizeError> {
        self.last_error
    }

    /// Byte offset of the next unexamined byte. Useful after a
    /// [`TokenizeError::Partial`] result to see how far the tokenizer got.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Parses `input`, writing tokens into `tokens`.
    ///
    /// `input` must be the same logical byte buffer as any previous call on
    /// this descriptor, only possibly longer. On success, returns the number
    /// of tokens written (a prefix of `tokens`). On
    /// [`TokenizeError::Partial`], the descriptor is left in a state such
    /// that calling again with a longer `input` (and the same `tokens`
    /// array) reproduces exactly the tokens a one-shot parse of the full
    /// input would have produced.
    ///
    /// # Errors
    ///
    /// Returns [`TokenizeError::Partial`] if `input` is truncated mid-token
    /// or mid-structure; [`TokenizeError::Invalid`] on a grammar violation;
    /// [`TokenizeError::Depth`] if nesting would exceed `MAX_DEPTH`; or
    /// [`TokenizeError::NoMemory`] if `tokens` is too small.
    pub fn parse(&mut self, input: &[u8], tokens: &mut [Token]) -> Result<usize, TokenizeError> {
        self.run(input, TokenSink::Tokens(tokens))
    }

    /// Like [`Tokenizer::parse`], but without a token array: walks the same
    /// state machine and returns only the token count that a materializing
    /// call would need. `count` and `parse` are guaranteed to agree on
    /// success value and on error kind/position for the same input.
    ///
    /// # Errors
    ///
    /// Same as [`Tokenizer::parse`], except [`TokenizeError::NoMemory`] never
    /// occurs (there is no capacity to exhaust).
    pub fn count(&mut self, input: &[u8]) -> Result<usize, TokenizeError> {
        self.run(input, TokenSink::Count)
    }

    fn top(&mut self) -> Option<&mut Frame> {
        if self.depth == 0 {
            None
        } else {
            Some(&mut self.stack[self.depth - 1])
        }
    }

    fn push(&mut self, kind: ContainerKind, state: FrameState, token: u32) -> Result<(), TokenizeError> {
        if self.depth >= MAX_DEPTH {
            let err = TokenizeError::Depth { pos: self.pos };
            self.last_error = Some(err);
            return Err(err);
        }
        self.stack[self.depth] = Frame { kind, state, token };
        self.depth += 1;
        Ok(())
    }

    fn new_token(
        &mut self,
        sink: &mut TokenSink,
        kind: TokenKind,
        start: usize,
        end: usize,
        parent: Option<u32>,
    ) -> Result<u32, TokenizeError> {
        let idx = self.toknext;
        if !sink.write(idx, Token::new(kind, start, end, parent)) {
            let err = TokenizeError::NoMemory { pos: self.pos };
            self.last_error = Some(err);
            return Err(err);
        }
        self.toknext += 1;
        Ok(idx)
    }

    /// Validates that the current frame (or the root) permits a value here,
    /// bumps the parent container's size, and advances its state. Returns
    /// the saved state needed to roll this back on a `Partial` outcome.
    fn accept_value(&mut self, sink: &mut TokenSink) -> Result<Rollback, TokenizeError> {
        if self.depth == 0 {
            if self.options.strict && self.root_done {
                let err = TokenizeError::Invalid { pos: self.pos };
                self.last_error = Some(err);
                return Err(err);
            }
            let was_done = self.root_done;
            self.root_done = true;
            return Ok(Rollback::Root { was_done });
        }

        let pos = self.pos;
        let frame = &mut self.stack[self.depth - 1];
        let (ok, next_state) = match (frame.kind, frame.state) {
            (ContainerKind::Array, FrameState::ArrValueOrEnd | FrameState::ArrValue) => {
                (true, FrameState::ArrCommaOrEnd)
            }
            (ContainerKind::Object, FrameState::ObjValue) => (true, FrameState::ObjCommaOrEnd),
            _ => (false, frame.state),
        };
        if !ok {
            let err = TokenizeError::Invalid { pos };
            self.last_error = Some(err);
            return Err(err);
        }
        let saved_state = frame.state;
        let token = frame.token;
        frame.state = next_state;
        sink.bump_size(token);
        Ok(Rollback::Frame { saved_state, token })
    }

    fn rollback(&mut self, sink: &mut TokenSink, rb: Rollback) {
        match rb {
            Rollback::Root { was_done } => self.root_done = was_done,
            Rollback::Frame { saved_state, token } => {
                sink.unbump_size(token);
                if self.depth > 0 {
                    self.stack[self.depth - 1].state = saved_state;
                }
            }
        }
    }

    fn accept_key(&mut self) -> Result<(), TokenizeError> {
        let pos = self.pos;
        let Some(frame) = self.top() else {
            let err = TokenizeError::Invalid { pos };
            self.last_error = Some(err);
            return Err(err);
        };
        if frame.kind != ContainerKind::Object
            || !matches!(frame.state, FrameState::ObjKeyOrEnd | FrameState::ObjKey)
        {
            let err = TokenizeError::Invalid { pos };
            self.last_error = Some(err);
            return Err(err);
        }
        frame.state = FrameState::ObjColon;
        Ok(())
    }

    fn start_container(
        &mut self,
        sink: &mut TokenSink,
        kind: ContainerKind,
    ) -> Result<(), TokenizeError> {
        let parent = self.top().map(|f| f.token);
        // A '{' or '[' is exactly one byte, so accept_value can never see a
        // Partial outcome here; there's nothing to roll back.
        self.accept_value(sink)?;

        let idx = self.new_token(sink, kind.as_token_kind(), self.pos, usize::MAX, parent)?;
        let state = match kind {
            ContainerKind::Object => FrameState::ObjKeyOrEnd,
            ContainerKind::Array => FrameState::ArrValueOrEnd,
        };
        self.push(kind, state, idx)?;
        self.pos += 1;
        Ok(())
    }

    fn end_container(
        &mut self,
        sink: &mut TokenSink,
        kind: ContainerKind,
    ) -> Result<(), TokenizeError> {
        let pos = self.pos;
        let Some(frame) = self.top() else {
            let err = TokenizeError::Invalid { pos };
            self.last_error = Some(err);
            return Err(err);
        };
        if frame.kind != kind {
            let err = TokenizeError::Invalid { pos };
            self.last_error = Some(err);
            return Err(err);
        }
        let closeable = match kind {
            ContainerKind::Object => matches!(
                frame.state,
                FrameState::ObjKeyOrEnd | FrameState::ObjCommaOrEnd
            ),
            ContainerKind::Array => matches!(
                frame.state,
                FrameState::ArrValueOrEnd | FrameState::ArrCommaOrEnd
            ),
        };
        if !closeable {
            let err = TokenizeError::Invalid { pos };
            self.last_error = Some(err);
            return Err(err);
        }

        let token = frame.token;
        sink.set_end(token, pos + 1);
        self.depth -= 1;
        self.pos += 1;
        Ok(())
    }

    fn run(&mut self, input: &[u8], mut sink: TokenSink) -> Result<usize, TokenizeError> {
        self.last_error = None;

        while self.pos < input.len() {
            #[cfg(any(test, feature = "fuzzing"))]
            assert!(
                self.depth <= MAX_DEPTH,
                "internal error: frame stack depth {} exceeds MAX_DEPTH {}",
                self.depth,
                MAX_DEPTH
            );

            let c = input[self.pos];

            if is_space(c) {
                self.pos += 1;
                continue;
            }

            match c {
                b'{' => self.start_container(&mut sink, ContainerKind::Object)?,
                b'[' => self.start_container(&mut sink, ContainerKind::Array)?,
                b'}' => self.end_container(&mut sink, ContainerKind::Object)?,
                b']' => self.end_container(&mut sink, ContainerKind::Array)?,
                b':' => {
                    let pos = self.pos;
                    let Some(frame) = self.top() else {
                        let err = TokenizeError::Invalid { pos };
                        self.last_error = Some(err);
                        return Err(err);
                    };
                    if frame.kind != ContainerKind::Object || frame.state != FrameState::ObjColon {
                        let err = TokenizeError::Invalid { pos };
                        self.last_error = Some(err);
                        return Err(err);
                    }
                    frame.state = FrameState::ObjValue;
                    self.pos += 1;
                }
                b',' => {
                    let pos = self.pos;
                    let Some(frame) = self.top() else {
                        let err = TokenizeError::Invalid { pos };
                        self.last_error = Some(err);
                        return Err(err);
                    };
                    match (frame.kind, frame.state) {
                        (ContainerKind::Object, FrameState::ObjCommaOrEnd) => {
                            frame.state = FrameState::ObjKey;
                        }
                        (ContainerKind::Array, FrameState::ArrCommaOrEnd) => {
                            frame.state = FrameState::ArrValue;
                        }
                        _ => {
                            let err = TokenizeError::Invalid { pos };
                            self.last_error = Some(err);
                            return Err(err);
                        }
                    }
                    self.pos += 1;
                }
                b'"' => {
                    let is_key = self
                        .top()
                        .is_some_and(|f| {
                            f.kind == ContainerKind::Object
                                && matches!(f.state, FrameState::ObjKeyOrEnd | FrameState::ObjKey)
                        });

                    if is_key {
                        let (start, end) = scan_string(input, self.pos)?;
                        let parent = self.top().map(|f| f.token);
                        self.new_token(&mut sink, TokenKind::String, start, end, parent)?;
                        self.pos = end + 1;
                        self.accept_key()?;
                    } else {
                        let parent = self.top().map(|f| f.token);
                        let rb = self.accept_value(&mut sink)?;
                        match scan_string(input, self.pos) {
                            Ok((start, end)) => {
                                self.new_token(&mut sink, TokenKind::String, start, end, parent)?;
                                self.pos = end + 1;
                            }
                            Err(e) => {
                                if e.is_resumable() {
                                    self.rollback(&mut sink, rb);
                                }
                                self.last_error = Some(e);
                                return Err(e);
                            }
                        }
                    }
                }
                _ => {
                    let parent = self.top().map(|f| f.token);
                    let rb = self.accept_value(&mut sink)?;
                    match scan_primitive(input, self.pos, self.options.strict) {
                        Ok(end) => {
                            self.new_token(&mut sink, TokenKind::Primitive, self.pos, end, parent)?;
                            self.pos = end;
                        }
                        Err(e) => {
                            if e.is_resumable() {
                                self.rollback(&mut sink, rb);
                            }
                            self.last_error = Some(e);
                            return Err(e);
                        }
                    }
                }
            }
        }

        if self.depth != 0 {
            let err = TokenizeError::Partial { pos: self.pos };
            self.last_error = Some(err);
            return Err(err);
        }
        if self.options.strict && !self.root_done {
            let err = TokenizeError::Partial { pos: self.pos };
            self.last_error = Some(err);
            return Err(err);
        }

        Ok(self.toknext as usize)
    }
}

enum Rollback {
    Root { was_done: bool },
    Frame { saved_state: FrameState, token: u32 },
}
