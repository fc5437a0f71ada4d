//! Line buffering for chunked SSE response bodies.
//!
//! The transport hands us arbitrary byte chunks. A chunk may end in the middle
//! of a line, in the middle of a `\r\n` pair, or in the middle of a multi-byte
//! UTF-8 character. [`FrameBuffer`] hides all of that and only ever yields
//! complete lines.

/// Replacement for byte sequences that are not valid UTF-8.
const REPLACEMENT: char = '\u{FFFD}';

/// Accumulates decoded text across chunks and yields complete lines.
///
/// Invariant: `pending` never contains `'\n'`. Any complete line is removed
/// and returned by the same [`feed`](FrameBuffer::feed) call that completed it.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    /// Trailing partial line (no terminator yet)
    pending: String,
    /// Bytes of an incomplete UTF-8 sequence carried to the next chunk
    undecoded: Vec<u8>,
}

impl FrameBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a raw chunk and return every line it completes, in arrival order.
    ///
    /// Lines are returned without their terminator; a trailing `'\r'` is
    /// stripped as well so CRLF streams behave like LF streams.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.decode_into_pending(chunk);

        let Some(last_newline) = self.pending.rfind('\n') else {
            return Vec::new();
        };

        let rest = self.pending.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.pending, rest);

        complete
            .split_terminator('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect()
    }

    /// Flush the buffer at end-of-stream.
    ///
    /// Returns the unterminated final line, if any. Leftover bytes of an
    /// incomplete character are flushed as U+FFFD.
    pub fn finish(&mut self) -> Option<String> {
        if !self.undecoded.is_empty() {
            self.undecoded.clear();
            self.pending.push(REPLACEMENT);
        }

        if self.pending.is_empty() {
            return None;
        }

        let mut line = std::mem::take(&mut self.pending);
        if line.ends_with('\r') {
            line.pop();
        }
        Some(line)
    }

    /// The partial line currently held back.
    pub fn pending(&self) -> &str {
        &self.pending
    }

    /// Drop all buffered state.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.undecoded.clear();
    }

    /// Decode `chunk` (prefixed by any carried bytes) into `pending`.
    fn decode_into_pending(&mut self, chunk: &[u8]) {
        let mut bytes = std::mem::take(&mut self.undecoded);
        bytes.extend_from_slice(chunk);

        let mut input = bytes.as_slice();
        loop {
            match std::str::from_utf8(input) {
                Ok(text) => {
                    self.pending.push_str(text);
                    return;
                }
                Err(e) => {
                    let (valid, after) = input.split_at(e.valid_up_to());
                    if let Ok(text) = std::str::from_utf8(valid) {
                        self.pending.push_str(text);
                    }

                    match e.error_len() {
                        Some(len) => {
                            self.pending.push(REPLACEMENT);
                            input = &after[len..];
                        }
                        None => {
                            // Incomplete sequence at the end; wait for more bytes
                            self.undecoded = after.to_vec();
                            return;
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all(chunks: &[&[u8]]) -> Vec<String> {
        let mut buffer = FrameBuffer::new();
        let mut lines = Vec::new();
        for chunk in chunks {
            lines.extend(buffer.feed(chunk));
        }
        lines.extend(buffer.finish());
        lines
    }

    #[test]
    fn test_single_complete_line() {
        let mut buffer = FrameBuffer::new();
        assert_eq!(buffer.feed(b"data: hello\n"), vec!["data: hello"]);
        assert_eq!(buffer.pending(), "");
    }

    #[test]
    fn test_partial_line_is_held_back() {
        let mut buffer = FrameBuffer::new();
        assert!(buffer.feed(b"data: hel").is_empty());
        assert_eq!(buffer.pending(), "data: hel");
        assert_eq!(buffer.feed(b"lo\n"), vec!["data: hello"]);
        assert_eq!(buffer.pending(), "");
    }

    #[test]
    fn test_multiple_lines_in_one_chunk() {
        let mut buffer = FrameBuffer::new();
        let lines = buffer.feed(b"data: a\n\ndata: b\ndata: c");
        assert_eq!(lines, vec!["data: a", "", "data: b"]);
        assert_eq!(buffer.pending(), "data: c");
    }

    #[test]
    fn test_pending_never_contains_newline() {
        let mut buffer = FrameBuffer::new();
        for chunk in [&b"a\nb"[..], b"\n\n", b"c", b"\nd\n", b"e"] {
            buffer.feed(chunk);
            assert!(!buffer.pending().contains('\n'));
        }
    }

    #[test]
    fn test_crlf_split_across_chunks() {
        let lines = feed_all(&[&b"data: one\r"[..], &b"\ndata: two\r\n"[..]]);
        assert_eq!(lines, vec!["data: one", "data: two"]);
    }

    #[test]
    fn test_multibyte_char_split_across_chunks() {
        let text = "data: caf\u{e9} \u{1F40E}\n".as_bytes();
        // Split inside the 2-byte é and inside the 4-byte horse
        let e_start = text.iter().position(|&b| b == 0xC3).unwrap();
        let horse_start = text.iter().position(|&b| b == 0xF0).unwrap();
        let chunks = [
            &text[..e_start + 1],
            &text[e_start + 1..horse_start + 2],
            &text[horse_start + 2..],
        ];
        assert_eq!(feed_all(&chunks), vec!["data: caf\u{e9} \u{1F40E}"]);
    }

    #[test]
    fn test_invalid_bytes_become_replacement_char() {
        let lines = feed_all(&[&b"data: a\xFFb\n"[..]]);
        assert_eq!(lines, vec!["data: a\u{FFFD}b"]);
    }

    #[test]
    fn test_truncated_char_at_end_of_stream() {
        let mut buffer = FrameBuffer::new();
        assert!(buffer.feed(b"data: x\xE2\x82").is_empty());
        assert_eq!(buffer.finish(), Some("data: x\u{FFFD}".to_string()));
    }

    #[test]
    fn test_finish_emits_unterminated_line() {
        let mut buffer = FrameBuffer::new();
        buffer.feed(b"data: tail");
        assert_eq!(buffer.finish(), Some("data: tail".to_string()));
        assert_eq!(buffer.finish(), None);
    }

    #[test]
    fn test_finish_on_empty_buffer() {
        let mut buffer = FrameBuffer::new();
        buffer.feed(b"data: x\n");
        assert_eq!(buffer.finish(), None);
    }

    #[test]
    fn test_reset_drops_state() {
        let mut buffer = FrameBuffer::new();
        buffer.feed(b"data: partial\xE2");
        buffer.reset();
        assert_eq!(buffer.pending(), "");
        assert_eq!(buffer.finish(), None);
    }

    #[test]
    fn test_chunk_boundary_invariance() {
        let reference = "data: {\"response\":\"h\u{e9}llo\"}\r\n\ndata: second\n: comment\ndata: [DONE]\nno newline";
        let bytes = reference.as_bytes();
        let whole = feed_all(&[bytes]);

        for size in 1..=7 {
            let chunks: Vec<&[u8]> = bytes.chunks(size).collect();
            assert_eq!(feed_all(&chunks), whole, "chunk size {}", size);
        }

        for split in 0..=bytes.len() {
            let (a, b) = bytes.split_at(split);
            assert_eq!(feed_all(&[a, b]), whole, "split at {}", split);
        }
    }
}
