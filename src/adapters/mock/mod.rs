//! Mock implementations for testing.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//! - [`ScriptedSource`] - Chunk source replaying chunks and a final outcome

pub mod http;
pub mod source;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use source::ScriptedSource;
