//! Per-line classification of the SSE stream.

/// Prefix that marks a data line.
pub const DEFAULT_EVENT_PREFIX: &str = "data: ";

/// Payload that terminates the stream.
pub const DEFAULT_SENTINEL: &str = "[DONE]";

/// A data frame extracted from one line of the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFrame {
    /// Payload with the prefix and surrounding whitespace removed
    pub payload: String,
}

impl EventFrame {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }
}

/// Result of classifying a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractedLine {
    /// A data line carrying a payload
    Frame(EventFrame),
    /// The terminal sentinel; the stream is complete
    Sentinel,
    /// Anything else: blank keep-alives, `event:` lines, comments
    Ignored,
}

/// Stateless classifier that turns lines into [`EventFrame`]s.
///
/// Only lines that start with the configured prefix are recognized. The
/// extractor keeps no state between calls, so frame order is exactly line
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventExtractor {
    prefix: String,
    sentinel: String,
}

impl Default for EventExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_PREFIX, DEFAULT_SENTINEL)
    }
}

impl EventExtractor {
    /// Create an extractor with a custom prefix and sentinel.
    pub fn new(prefix: impl Into<String>, sentinel: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            sentinel: sentinel.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn sentinel(&self) -> &str {
        &self.sentinel
    }

    /// Classify one line (without its terminator).
    pub fn extract(&self, line: &str) -> ExtractedLine {
        let Some(rest) = line.strip_prefix(self.prefix.as_str()) else {
            return ExtractedLine::Ignored;
        };

        let payload = rest.trim();
        if payload == self.sentinel {
            return ExtractedLine::Sentinel;
        }

        ExtractedLine::Frame(EventFrame::new(payload))
    }
}
