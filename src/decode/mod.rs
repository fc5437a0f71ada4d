//! Payload decoding
//!
//! Turns the payload of one event frame into a [`DecodedMessage`]. Decoding is
//! total: every input, including garbage, produces a message. Each step below
//! is the fallback for the one before it:
//!
//! 1. Payload is not JSON: the raw payload is the message text.
//! 2. `response` is a string: strip a code fence and re-parse it. If that
//!    yields an object with its own string `response`, the inner object wins
//!    (double-encoded payload). Otherwise the outer string is the text.
//! 3. `response` is some other JSON value: its compact serialization is the text.
//!
//! Backend failures arrive as `{"error": "..."}` and decode to
//! [`MessageKind::ServerError`](crate::models::MessageKind::ServerError).

mod fence;

pub use fence::strip_code_fence;

use serde_json::{Map, Value};

use crate::error::DecodeIssue;
use crate::models::{DecodedMessage, Product};
use crate::sse::EventFrame;

/// Field carrying the greeting in the welcome endpoint body.
const WELCOME_FIELD: &str = "welcome_message";

/// Decoder for event frame payloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct PayloadDecoder;

impl PayloadDecoder {
    pub fn new() -> Self {
        Self
    }

    /// Decode a frame into a message. Never fails.
    pub fn decode(&self, frame: &EventFrame) -> DecodedMessage {
        self.decode_with_issues(frame).0
    }

    /// Decode a frame and report what had to be degraded along the way.
    pub fn decode_with_issues(&self, frame: &EventFrame) -> (DecodedMessage, Vec<DecodeIssue>) {
        let mut issues = Vec::new();
        let message = decode_payload(&frame.payload, &mut issues);
        (message, issues)
    }

    /// Decode the body of the greeting endpoint.
    ///
    /// The body is either `{"welcome_message": <payload>, ...}`, where the
    /// payload is decoded like a frame, or a message-shaped object.
    pub fn decode_greeting(&self, body: &str) -> DecodedMessage {
        let mut issues = Vec::new();
        let message = match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(map)) => match map.get(WELCOME_FIELD) {
                Some(Value::String(greeting)) => decode_payload(greeting.trim(), &mut issues),
                _ => decode_object(&map, &mut issues),
            },
            _ => decode_payload(body.trim(), &mut issues),
        };
        log_issues(&issues);
        message
    }
}

/// Convenience wrapper around [`PayloadDecoder::decode`].
pub fn decode(frame: &EventFrame) -> DecodedMessage {
    PayloadDecoder.decode(frame)
}

/// Emit absorbed decode issues to the log.
pub(crate) fn log_issues(issues: &[DecodeIssue]) {
    for issue in issues {
        if issue.is_lossy() {
            tracing::warn!(code = issue.code(), "{}", issue);
        } else {
            tracing::debug!(code = issue.code(), "{}", issue);
        }
    }
}

fn decode_payload(payload: &str, issues: &mut Vec<DecodeIssue>) -> DecodedMessage {
    let value = match serde_json::from_str::<Value>(payload) {
        Ok(value) => value,
        Err(e) => {
            issues.push(DecodeIssue::NotJson {
                message: e.to_string(),
            });
            return DecodedMessage::text(payload);
        }
    };

    match value {
        Value::Object(map) => decode_object(&map, issues),
        Value::String(text) => DecodedMessage::text(text),
        other => {
            issues.push(DecodeIssue::UnsupportedShape {
                kind: json_kind(&other),
            });
            DecodedMessage::text(payload)
        }
    }
}

fn decode_object(map: &Map<String, Value>, issues: &mut Vec<DecodeIssue>) -> DecodedMessage {
    match map.get("response") {
        Some(Value::String(outer)) => match parse_inner(outer) {
            Some(inner) => {
                let products = extract_products(&inner, issues);
                DecodedMessage::with_products(response_text(&inner), products)
            }
            None => DecodedMessage::with_products(outer.clone(), extract_products(map, issues)),
        },
        Some(Value::Null) | None => match map.get("error") {
            Some(Value::String(error)) => DecodedMessage::server_error(error.clone()),
            Some(error) if !error.is_null() => DecodedMessage::server_error(error.to_string()),
            _ => DecodedMessage::with_products(String::new(), extract_products(map, issues)),
        },
        Some(other) => DecodedMessage::with_products(other.to_string(), extract_products(map, issues)),
    }
}

/// Re-parse a `response` string as a double-encoded message object.
///
/// Only an object that carries its own string `response` counts; anything
/// else means the outer string is the real text.
fn parse_inner(outer: &str) -> Option<Map<String, Value>> {
    let candidate = strip_code_fence(outer);
    match serde_json::from_str::<Value>(candidate) {
        Ok(Value::Object(inner)) if matches!(inner.get("response"), Some(Value::String(_))) => {
            Some(inner)
        }
        _ => None,
    }
}

fn response_text(map: &Map<String, Value>) -> String {
    map.get("response")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

fn extract_products(map: &Map<String, Value>, issues: &mut Vec<DecodeIssue>) -> Vec<Product> {
    let products = match map.get("products") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .filter_map(|(index, item)| match item {
                Value::Object(fields) => {
                    issues.extend(
                        Product::blanked_fields(fields)
                            .into_iter()
                            .map(|field| DecodeIssue::ProductFieldBlanked { index, field }),
                    );
                    Some(Product::from_fields(fields))
                }
                other => {
                    issues.push(DecodeIssue::ProductSkipped {
                        index,
                        reason: format!("expected an object, found a {}", json_kind(other)),
                    });
                    None
                }
            })
            .collect(),
        Some(other) => {
            issues.push(DecodeIssue::ProductsNotArray {
                kind: json_kind(other),
            });
            Vec::new()
        }
    };

    // Informational only; observed payloads carry products without the flag
    if let Some(flag) = map.get("includes_products").and_then(Value::as_bool) {
        if flag != !products.is_empty() {
            issues.push(DecodeIssue::ProductFlagMismatch {
                flag,
                count: products.len(),
            });
        }
    }

    products
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
