//! Error category classification.
//!
//! Categories group client errors by how the caller should react to them:
//! retry, fix the input, or fix the configuration.

use std::fmt;

/// High-level categorization of errors for handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection, DNS, timeout or a broken body stream.
    /// Generally transient and retryable.
    Network,

    /// The backend failed (HTTP 5xx) or answered with something unusable.
    /// Retryable after a delay.
    Server,

    /// The backend rejected the request (HTTP 4xx, e.g. a stale CSRF token).
    Client,

    /// User action required (empty question).
    User,

    /// Missing or invalid settings (bad base URL, bad timeout).
    Configuration,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Network | ErrorCategory::Server)
    }

    /// Short label for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::User => "user",
            ErrorCategory::Configuration => "configuration",
        }
    }

    /// Suggested recovery action shown next to the error.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "Check your internet connection and try again",
            ErrorCategory::Server => "The shop assistant is having trouble. Please try again later",
            ErrorCategory::Client => "Reload the chat and try again",
            ErrorCategory::User => "Please type a question first",
            ErrorCategory::Configuration => "Check the SHOPBOT_* environment settings",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
