use serde::{Deserialize, Serialize};
use std::fmt;

use super::product::Product;

/// Who a rendered message is attributed to.
///
/// The sender decides the trust level of the text: user and error text is
/// escaped before rendering, assistant text is not.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
    Error,
}

impl Sender {
    /// Lowercase label, also used as the CSS class prefix (`user-message`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Assistant => "assistant",
            Sender::Error => "error",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Origin of a decoded message.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// A regular reply from the assistant
    #[default]
    Reply,
    /// The backend reported a failure inside the stream (`{"error": ...}`)
    ServerError,
}

/// A chat message decoded from one event frame.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedMessage {
    /// Message text; empty when the frame only carried products
    #[serde(default)]
    pub text: String,
    /// Product recommendations, in display order
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub kind: MessageKind,
}

impl DecodedMessage {
    /// A text-only reply.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// A reply with products.
    pub fn with_products(text: impl Into<String>, products: Vec<Product>) -> Self {
        Self {
            text: text.into(),
            products,
            kind: MessageKind::Reply,
        }
    }

    /// An error reported by the backend.
    pub fn server_error(message: impl Into<String>) -> Self {
        Self {
            text: message.into(),
            products: Vec::new(),
            kind: MessageKind::ServerError,
        }
    }

    pub fn has_products(&self) -> bool {
        !self.products.is_empty()
    }

    pub fn is_error(&self) -> bool {
        self.kind == MessageKind::ServerError
    }

    /// The sender this message should be rendered as when it came from the backend.
    pub fn sender(&self) -> Sender {
        match self.kind {
            MessageKind::Reply => Sender::Assistant,
            MessageKind::ServerError => Sender::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sender_labels() {
        assert_eq!(Sender::User.as_str(), "user");
        assert_eq!(Sender::Assistant.to_string(), "assistant");
        assert_eq!(
            serde_json::to_string(&Sender::Error).unwrap(),
            r#""error""#
        );
    }

    #[test]
    fn test_text_message() {
        let msg = DecodedMessage::text("Hello");
        assert_eq!(msg.text, "Hello");
        assert!(!msg.has_products());
        assert_eq!(msg.sender(), Sender::Assistant);
    }

    #[test]
    fn test_server_error_message() {
        let msg = DecodedMessage::server_error("Request timed out");
        assert!(msg.is_error());
        assert_eq!(msg.sender(), Sender::Error);
    }

    #[test]
    fn test_with_products() {
        let msg = DecodedMessage::with_products("Try these", vec![Product::default()]);
        assert!(msg.has_products());
        assert_eq!(msg.kind, MessageKind::Reply);
    }
}
