//! Common test utilities for integration tests.
//!
//! Builders for answer streams in the backend's wire format and helpers for
//! running a whole stream through a session.

#![allow(dead_code)]

use shopbot::sse::EventExtractor;
use shopbot::{StreamSession, Transcript};

/// Builds an answer body line by line.
#[derive(Debug, Default, Clone)]
pub struct StreamBody {
    body: String,
}

impl StreamBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// A `data:` line carrying a JSON payload.
    pub fn frame(mut self, payload: serde_json::Value) -> Self {
        self.body.push_str(&format!("data: {}\n", payload));
        self
    }

    /// A `data:` line carrying raw text.
    pub fn raw(mut self, payload: &str) -> Self {
        self.body.push_str(&format!("data: {}\n", payload));
        self
    }

    /// A non-data line the client must skip.
    pub fn noise(mut self, line: &str) -> Self {
        self.body.push_str(line);
        self.body.push('\n');
        self
    }

    /// The terminator the backend writes after the last frame.
    pub fn done(mut self) -> Self {
        self.body.push_str("event: DONE\ndata: [DONE]\n");
        self
    }

    pub fn build(self) -> String {
        self.body
    }
}

/// Feed `chunks` through a fresh session, then signal end of stream.
pub fn run_chunks<C: AsRef<[u8]>>(chunks: &[C]) -> Transcript {
    let mut transcript = Transcript::new();
    let mut session = StreamSession::new(EventExtractor::default(), &mut transcript);
    for chunk in chunks {
        session.feed(chunk.as_ref());
    }
    session.end_of_stream();
    drop(session);
    transcript
}

/// Split `bytes` into chunks of `size` bytes.
pub fn chunked(bytes: &[u8], size: usize) -> Vec<Vec<u8>> {
    bytes.chunks(size).map(<[u8]>::to_vec).collect()
}
