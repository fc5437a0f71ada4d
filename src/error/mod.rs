//! Error types for the chat pipeline and client.
//!
//! Errors fall into three tiers, each handled at a different level:
//!
//! | Tier | Type | Handling |
//! |------|------|----------|
//! | Transport | [`HttpError`](crate::traits::HttpError) | Ends the session with one error message |
//! | Decode | [`DecodeIssue`] | Absorbed and logged, decoding continues |
//! | Client | [`ChatError`] | Returned to the caller |
//!
//! Rendering has no error tier: missing fields render blank.

mod category;
mod chat_error;
mod decode;
mod result;

pub use category::ErrorCategory;
pub use chat_error::ChatError;
pub use decode::DecodeIssue;
pub use result::ChatResult;
