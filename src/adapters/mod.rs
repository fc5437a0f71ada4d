//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`ByteStreamSource`] - Chunk source over a streamed response body
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - Scripted HTTP responses and answer streams
//! - [`mock::ScriptedSource`] - Chunk source replaying a fixed script

pub mod byte_stream;
pub mod mock;
pub mod reqwest_http;

pub use byte_stream::ByteStreamSource;
pub use mock::{MockHttpClient, MockResponse, ScriptedSource};
pub use reqwest_http::ReqwestHttpClient;
