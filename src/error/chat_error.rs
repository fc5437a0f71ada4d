//! Crate-level error for chat client operations.

use thiserror::Error;

use super::category::ErrorCategory;
use crate::traits::HttpError;

/// Errors returned by [`ChatClient`](crate::client::ChatClient) and
/// [`ChatConfig`](crate::config::ChatConfig).
///
/// Streaming failures are not reported through this type: once a session is
/// open they become an error message in the transcript.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("{0}")]
    Http(#[from] HttpError),

    #[error("Question is empty")]
    EmptyQuestion,

    #[error("Invalid greeting: {0}")]
    InvalidGreeting(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ChatError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ChatError::Http(err) => match err {
                HttpError::ServerError { status, .. } if *status >= 500 => ErrorCategory::Server,
                HttpError::ServerError { .. } => ErrorCategory::Client,
                HttpError::InvalidUrl(_) => ErrorCategory::Configuration,
                _ => ErrorCategory::Network,
            },
            ChatError::EmptyQuestion => ErrorCategory::User,
            ChatError::InvalidGreeting(_) => ErrorCategory::Server,
            ChatError::Config(_) => ErrorCategory::Configuration,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }

    /// Message suitable for showing to the shopper.
    pub fn user_message(&self) -> String {
        match self {
            ChatError::Http(err) => format!("Error: {}", err.detail()),
            ChatError::EmptyQuestion => "Please enter a question.".to_string(),
            ChatError::InvalidGreeting(_) => {
                "The assistant could not be reached. Please try again later.".to_string()
            }
            ChatError::Config(msg) => format!("Configuration error: {}", msg),
        }
    }

    /// Short code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ChatError::Http(_) => "CHAT_HTTP",
            ChatError::EmptyQuestion => "CHAT_EMPTY_QUESTION",
            ChatError::InvalidGreeting(_) => "CHAT_INVALID_GREETING",
            ChatError::Config(_) => "CHAT_CONFIG",
        }
    }
}
