//! Chat client configuration.

use std::time::Duration;

use crate::error::{ChatError, ChatResult};
use crate::sse::{EventExtractor, DEFAULT_EVENT_PREFIX, DEFAULT_SENTINEL};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_ASK_PATH: &str = "/ask";
pub const DEFAULT_WELCOME_PATH: &str = "/welcome";
/// Must exceed the backend's 60 s run limit so its timeout frame can arrive.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub const ENV_BASE_URL: &str = "SHOPBOT_BASE_URL";
pub const ENV_CSRF_TOKEN: &str = "SHOPBOT_CSRF_TOKEN";
pub const ENV_TIMEOUT_SECS: &str = "SHOPBOT_TIMEOUT_SECS";

/// Configuration for [`ChatClient`](crate::client::ChatClient).
///
/// # Example
///
/// ```ignore
/// use shopbot::config::ChatConfig;
///
/// let config = ChatConfig::default()
///     .with_base_url("https://shop.example.com/chatbot")
///     .with_csrf_token("abc123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Backend root, without a trailing slash
    pub base_url: String,
    /// Path of the streaming question endpoint
    pub ask_path: String,
    /// Path of the greeting endpoint
    pub welcome_path: String,
    /// Line prefix marking an event frame
    pub event_prefix: String,
    /// Payload marking the end of the stream
    pub sentinel: String,
    /// CSRF token to send before the greeting supplies one
    pub csrf_token: Option<String>,
    /// Upper bound for a whole request, streamed body included
    pub timeout: Duration,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            ask_path: DEFAULT_ASK_PATH.to_string(),
            welcome_path: DEFAULT_WELCOME_PATH.to_string(),
            event_prefix: DEFAULT_EVENT_PREFIX.to_string(),
            sentinel: DEFAULT_SENTINEL.to_string(),
            csrf_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ChatConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_ask_path(mut self, path: impl Into<String>) -> Self {
        self.ask_path = path.into();
        self
    }

    pub fn with_welcome_path(mut self, path: impl Into<String>) -> Self {
        self.welcome_path = path.into();
        self
    }

    pub fn with_event_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.event_prefix = prefix.into();
        self
    }

    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = sentinel.into();
        self
    }

    pub fn with_csrf_token(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read `SHOPBOT_BASE_URL`, `SHOPBOT_CSRF_TOKEN` and
    /// `SHOPBOT_TIMEOUT_SECS`, falling back to defaults for unset variables.
    pub fn from_env() -> ChatResult<Self> {
        let mut config = Self::default();

        if let Some(url) = non_empty_var(ENV_BASE_URL) {
            config = config.with_base_url(url);
        }

        if let Some(token) = non_empty_var(ENV_CSRF_TOKEN) {
            config = config.with_csrf_token(token);
        }

        if let Some(raw) = non_empty_var(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                ChatError::Config(format!("{} is not a number of seconds: {:?}", ENV_TIMEOUT_SECS, raw))
            })?;
            if secs == 0 {
                return Err(ChatError::Config(format!("{} must be positive", ENV_TIMEOUT_SECS)));
            }
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    /// Check the settings the client cannot work without.
    pub fn validate(&self) -> ChatResult<()> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ChatError::Config(format!(
                "base URL must start with http:// or https://: {}",
                self.base_url
            )));
        }
        if self.event_prefix.is_empty() {
            return Err(ChatError::Config("event prefix must not be empty".to_string()));
        }
        if self.sentinel.is_empty() {
            return Err(ChatError::Config("sentinel must not be empty".to_string()));
        }
        Ok(())
    }

    pub fn ask_url(&self) -> String {
        join_url(&self.base_url, &self.ask_path)
    }

    pub fn welcome_url(&self) -> String {
        join_url(&self.base_url, &self.welcome_path)
    }

    /// Extractor matching this configuration's prefix and sentinel.
    pub fn extractor(&self) -> EventExtractor {
        EventExtractor::new(self.event_prefix.clone(), self.sentinel.clone())
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
