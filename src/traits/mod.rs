//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP client operations (GET, POST, streaming POST)
//! - [`ChunkSource`] - Pull-based body chunks for a stream session
//! - [`TranscriptSink`] - Destination for rendered segments

pub mod http;
pub mod sink;
pub mod transport;

pub use http::{ByteStream, Headers, HttpClient, HttpError, Response};
pub use sink::TranscriptSink;
pub use transport::ChunkSource;
