//! shopbot - client for a streaming shop assistant chat.
//!
//! Turns the chunked answer stream of the assistant backend into display-safe
//! HTML segments:
//!
//! ```text
//! bytes -> sse::FrameBuffer -> sse::EventExtractor -> decode::PayloadDecoder
//!       -> render::MessageRenderer -> traits::TranscriptSink
//! ```
//!
//! [`session::StreamSession`] drives that pipeline for one answer and
//! [`client::ChatClient`] issues the greeting and question requests.

pub mod adapters;
pub mod cli;
pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod models;
pub mod render;
pub mod session;
pub mod sse;
pub mod traits;
pub mod transcript;

pub use client::{ChatClient, Welcome};
pub use config::ChatConfig;
pub use error::{ChatError, ChatResult};
pub use session::{Completion, SessionState, SessionSummary, StreamSession};
pub use transcript::Transcript;
