//! Transcript sink trait.
//!
//! The end of the rendering pipeline. A sink receives display-ready segments
//! in order and decides where they go: a DOM, a terminal, a test buffer.

use crate::models::{RenderedSegment, Sender};

/// Receives rendered segments in display order.
///
/// Implemented by [`Transcript`](crate::transcript::Transcript) and by
/// closures taking `(RenderedSegment, Sender)`. Consumers borrow the sink
/// mutably, so the caller keeps ownership of what was collected.
///
/// # Example
///
/// ```ignore
/// use shopbot::models::{RenderedSegment, Sender};
///
/// let mut lines = Vec::new();
/// let mut sink = |segment: RenderedSegment, sender: Sender| {
///     lines.push(format!("[{}] {}", sender, segment.html()));
/// };
/// ```
pub trait TranscriptSink {
    /// Append one segment attributed to `sender`.
    fn append(&mut self, segment: RenderedSegment, sender: Sender);
}

impl<F> TranscriptSink for F
where
    F: FnMut(RenderedSegment, Sender),
{
    fn append(&mut self, segment: RenderedSegment, sender: Sender) {
        self(segment, sender)
    }
}
