//! A cursor-driven, resumable scanner for the `data:` lines of a
//! `text/event-stream` (Server-Sent Events) byte stream.
//!
//! Unlike [`crate::Tokenizer`], this scanner has no grammar to violate: every
//! byte sequence is *some* sequence of SSE lines, so there is no `Invalid`
//! outcome here, only "got a payload" or "need more bytes."

/// Result of [`SseCursor::next_event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SseEvent<'a> {
    /// A complete `data:` line was consumed; `payload` is the bytes after
    /// the colon and the single optional leading space, up to (not
    /// including) the line terminator.
    Data(&'a [u8]),
    /// No complete line remains in the buffer (or every complete line seen
    /// was skipped and the buffer ran out before the next one completed).
    /// The cursor is left at the start of the incomplete line; call again
    /// once more bytes have been appended to the same buffer.
    NeedMore,
}

/// Cursor into a possibly-growing SSE byte buffer.
///
/// A caller owns the buffer (appending bytes to it as they arrive) and a
/// `SseCursor`, and repeatedly calls [`SseCursor::next_event`] with the
/// current buffer contents. The cursor only ever advances past complete
/// lines, so the same `(buffer, cursor)` pair fed a longer buffer later
/// resumes exactly where it left off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SseCursor {
    pos: usize,
}

impl SseCursor {
    /// A cursor positioned at the start of the stream.
    #[must_use]
    pub fn new() -> Self {
        SseCursor { pos: 0 }
    }

    /// The next byte offset this cursor will examine.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Scans forward from the cursor's current position, skipping comment
    /// lines (`:`...), blank lines, and non-`data` fields (`event:`, `id:`,
    /// `retry:`, or anything else), until it finds the next `data:` line or
    /// runs out of complete lines.
    ///
    /// A line is complete only once an `LF` has been observed; `CR LF` is
    /// recognized as the same terminator with the `CR` stripped from the
    /// reported payload. If `buffer` is shorter than the cursor's position
    /// (the buffer was somehow truncated), the cursor is first clamped to
    /// `buffer.len()`.
    pub fn next_event<'a>(&mut self, buffer: &'a [u8]) -> SseEvent<'a> {
        if self.pos > buffer.len() {
            self.pos = buffer.len();
        }

        loop {
            let line_start = self.pos;
            let Some(rel_lf) = buffer[line_start..].iter().position(|&b| b == b'\n') else {
                self.pos = line_start;
                return SseEvent::NeedMore;
            };
            let lf_pos = line_start + rel_lf;
            let mut line_end = lf_pos;
            if line_end > line_start && buffer[line_end - 1] == b'\r' {
                line_end -= 1;
            }
            let line = &buffer[line_start..line_end];
            self.pos = lf_pos + 1;

            if line.is_empty() || line[0] == b':' {
                continue;
            }
            if let Some(rest) = line.strip_prefix(b"data:") {
                let payload = match rest.first() {
                    Some(b' ') => &rest[1..],
                    _ => rest,
                };
                return SseEvent::Data(payload);
            }
            // event:, id:, retry:, any other field, or a malformed line.
        }
    }
}
