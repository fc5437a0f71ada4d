//! SSE (Server-Sent Events) stream framing
//!
//! Turns the raw response body of the chat backend into event frames.
//! The backend writes one event per line:
//! - `data: <payload>` - a message payload (usually JSON)
//! - `data: [DONE]` - end of stream
//! - anything else (blank keep-alives, `event:` lines) - ignored
//!
//! # Module structure
//! - `buffer` - Chunk-to-line buffering with stateful UTF-8 decoding (FrameBuffer)
//! - `extractor` - Line classification (EventExtractor, EventFrame, ExtractedLine)

mod buffer;
mod extractor;

pub use buffer::FrameBuffer;
pub use extractor::{
    EventExtractor, EventFrame, ExtractedLine, DEFAULT_EVENT_PREFIX, DEFAULT_SENTINEL,
};
