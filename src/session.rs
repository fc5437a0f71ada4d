//! Stream session
//!
//! Drives one answer stream from the first chunk to `Closed`, pushing every
//! chunk through the whole pipeline before the next one is read:
//!
//! ```text
//! chunk -> FrameBuffer -> EventExtractor -> PayloadDecoder -> MessageRenderer -> sink
//! ```
//!
//! A session closes on the sentinel, on transport close, on transport failure
//! or when abandoned. Once closed, anything still arriving is discarded.

use std::fmt;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::decode::{log_issues, PayloadDecoder};
use crate::models::{DecodedMessage, Sender};
use crate::render::MessageRenderer;
use crate::sse::{EventExtractor, EventFrame, ExtractedLine, FrameBuffer};
use crate::traits::{ChunkSource, HttpError, TranscriptSink};

/// Externally visible session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Open,
    Closed,
}

/// Why a session closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The sentinel frame arrived
    Sentinel,
    /// The transport ended without a sentinel
    TransportClosed,
    /// The transport failed; one error message was emitted
    TransportFailed,
    /// The consumer stopped listening; nothing further was emitted
    Abandoned,
}

impl Completion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Completion::Sentinel => "sentinel",
            Completion::TransportClosed => "transport_closed",
            Completion::TransportFailed => "transport_failed",
            Completion::Abandoned => "abandoned",
        }
    }
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of [`StreamSession::run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub id: Uuid,
    pub completion: Completion,
    /// Messages delivered to the sink, including a transport error message
    pub messages: usize,
    /// Segments delivered to the sink
    pub segments: usize,
}

/// One request/stream lifecycle.
///
/// The session borrows its sink for its whole life and owns its frame buffer;
/// nothing is shared between sessions.
pub struct StreamSession<'s, S: TranscriptSink + ?Sized> {
    id: Uuid,
    buffer: FrameBuffer,
    extractor: EventExtractor,
    decoder: PayloadDecoder,
    renderer: MessageRenderer,
    sink: &'s mut S,
    completion: Option<Completion>,
    messages: usize,
    segments: usize,
}

impl<'s, S: TranscriptSink + ?Sized> StreamSession<'s, S> {
    /// Open a session that delivers into `sink`.
    pub fn new(extractor: EventExtractor, sink: &'s mut S) -> Self {
        let id = Uuid::new_v4();
        info!(session_id = %id, "Stream session opened");
        Self {
            id,
            buffer: FrameBuffer::new(),
            extractor,
            decoder: PayloadDecoder::new(),
            renderer: MessageRenderer::new(),
            sink,
            completion: None,
            messages: 0,
            segments: 0,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> SessionState {
        if self.completion.is_some() {
            SessionState::Closed
        } else {
            SessionState::Open
        }
    }

    pub fn is_open(&self) -> bool {
        self.completion.is_none()
    }

    /// Why the session closed, or `None` while it is open.
    pub fn completion(&self) -> Option<Completion> {
        self.completion
    }

    /// Messages delivered so far.
    pub fn messages(&self) -> usize {
        self.messages
    }

    /// Process one raw chunk.
    ///
    /// Lines after the sentinel, in this chunk or any later one, are dropped.
    pub fn feed(&mut self, chunk: &[u8]) {
        if !self.is_open() {
            debug!(session_id = %self.id, bytes = chunk.len(), "Discarding chunk after close");
            return;
        }

        for line in self.buffer.feed(chunk) {
            self.process_line(&line);
            if !self.is_open() {
                break;
            }
        }
    }

    /// The transport closed normally. A trailing unterminated line is
    /// processed as the final line.
    pub fn end_of_stream(&mut self) {
        if !self.is_open() {
            return;
        }
        if let Some(line) = self.buffer.finish() {
            self.process_line(&line);
        }
        if self.is_open() {
            self.close(Completion::TransportClosed);
        }
    }

    /// The transport failed. Emits exactly one error message, drops any
    /// partial line, and closes.
    pub fn fail(&mut self, error: &HttpError) {
        if !self.is_open() {
            return;
        }
        warn!(session_id = %self.id, error = %error, "Stream transport failed");
        self.buffer.reset();
        let message = DecodedMessage::server_error(format!("Error: {}", error.detail()));
        self.deliver(&message, Sender::Error);
        self.close(Completion::TransportFailed);
    }

    /// Stop without emitting anything further.
    pub fn abandon(&mut self) {
        if !self.is_open() {
            return;
        }
        self.buffer.reset();
        self.close(Completion::Abandoned);
    }

    /// Read `source` until the session closes.
    ///
    /// Cancelling `cancel` abandons the session at the next suspension point.
    /// Dropping the returned future has the same effect.
    pub async fn run<C>(mut self, source: &mut C, cancel: &CancellationToken) -> SessionSummary
    where
        C: ChunkSource + ?Sized,
    {
        while self.is_open() {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => self.abandon(),
                read = source.read() => match read {
                    Ok(Some(chunk)) => self.feed(&chunk),
                    Ok(None) => self.end_of_stream(),
                    Err(err) => self.fail(&err),
                },
            }
        }

        self.summary()
    }

    /// Counters so far. A session that is still open reports `Abandoned`,
    /// which is what it becomes if dropped now.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id,
            completion: self.completion.unwrap_or(Completion::Abandoned),
            messages: self.messages,
            segments: self.segments,
        }
    }

    fn process_line(&mut self, line: &str) {
        match self.extractor.extract(line) {
            ExtractedLine::Frame(frame) => self.emit(&frame),
            ExtractedLine::Sentinel => self.close(Completion::Sentinel),
            ExtractedLine::Ignored => {}
        }
    }

    fn emit(&mut self, frame: &EventFrame) {
        let (message, issues) = self.decoder.decode_with_issues(frame);
        log_issues(&issues);
        debug!(
            session_id = %self.id,
            products = message.products.len(),
            error = message.is_error(),
            "Decoded frame"
        );
        self.deliver(&message, message.sender());
    }

    fn deliver(&mut self, message: &DecodedMessage, sender: Sender) {
        let segments = self.renderer.render(message, sender);
        self.messages += 1;
        self.segments += segments.len();
        for segment in segments {
            self.sink.append(segment, sender);
        }
    }

    fn close(&mut self, completion: Completion) {
        self.completion = Some(completion);
        info!(
            session_id = %self.id,
            completion = %completion,
            messages = self.messages,
            segments = self.segments,
            "Stream session closed"
        );
    }
}

impl<S: TranscriptSink + ?Sized> Drop for StreamSession<'_, S> {
    fn drop(&mut self) {
        if self.is_open() {
            debug!(session_id = %self.id, "Stream session dropped while open");
        }
    }
}

impl<S: TranscriptSink + ?Sized> fmt::Debug for StreamSession<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamSession")
            .field("id", &self.id)
            .field("state", &self.state())
            .field("completion", &self.completion)
            .field("messages", &self.messages)
            .field("pending", &self.buffer.pending())
            .finish()
    }
}
