//! Chunk source trait.
//!
//! A [`StreamSession`](crate::session::StreamSession) pulls response body
//! chunks through this trait so it can be driven by a live HTTP stream or by
//! a scripted sequence in tests.

use async_trait::async_trait;
use bytes::Bytes;

use super::http::HttpError;

/// Pull-based source of raw body chunks.
#[async_trait]
pub trait ChunkSource: Send {
    /// Wait for the next chunk.
    ///
    /// Returns `Ok(None)` when the transport closed normally and `Err` when it
    /// failed. Chunk boundaries carry no meaning.
    async fn read(&mut self) -> Result<Option<Bytes>, HttpError>;
}
