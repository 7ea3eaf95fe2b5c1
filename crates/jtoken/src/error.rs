use thiserror::Error;

/// Failure outcomes of [`crate::Tokenizer::parse`] and
/// [`crate::Tokenizer::count`].
///
/// [`TokenizeError::Partial`] is the only resumable kind: it means the input
/// was consistent so far but truncated, and a later call on the same
/// descriptor with a longer buffer can still succeed. The other three kinds
/// are sticky — more bytes alone cannot fix them, the caller must reset the
/// descriptor (see [`crate::Tokenizer::reset`]).
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenizeError {
    /// The input ended mid-token or mid-structure. Feed more bytes and call
    /// again with the same descriptor to resume.
    #[error("partial input, truncated at byte {pos}")]
    Partial {
        /// First byte offset beyond the truncated region.
        pos: usize,
    },

    /// The input violates JSON grammar at `pos`.
    #[error("invalid syntax at byte {pos}")]
    Invalid {
        /// The offending byte offset.
        pos: usize,
    },

    /// Opening a new container would exceed the tokenizer's `MAX_DEPTH`.
    #[error("nesting exceeds max depth at byte {pos}")]
    Depth {
        /// The byte offset of the container that would have exceeded the
        /// depth limit.
        pos: usize,
    },

    /// The token array's capacity was reached. Resizing the array, not
    /// feeding more bytes, is what resolves this.
    #[error("token array exhausted at byte {pos}")]
    NoMemory {
        /// The byte offset being processed when capacity ran out.
        pos: usize,
    },
}

impl TokenizeError {
    /// The byte offset associated with this error, for diagnostics.
    #[must_use]
    pub fn pos(self) -> usize {
        match self {
            TokenizeError::Partial { pos }
            | TokenizeError::Invalid { pos }
            | TokenizeError::Depth { pos }
            | TokenizeError::NoMemory { pos } => pos,
        }
    }

    /// Whether more input could resolve this error.
    #[must_use]
    pub fn is_resumable(self) -> bool {
        matches!(self, TokenizeError::Partial { .. })
    }
}
