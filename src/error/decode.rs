//! Problems absorbed while decoding a payload.
//!
//! None of these abort decoding. They are collected so the caller can log
//! what was degraded and why.

use std::fmt;

/// A recoverable problem found while decoding one event frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeIssue {
    /// The payload is not JSON; it was shown as plain text.
    NotJson { message: String },

    /// The payload is JSON but neither an object nor a string.
    UnsupportedShape { kind: &'static str },

    /// The `products` field is present but not an array.
    ProductsNotArray { kind: &'static str },

    /// One entry of `products` could not be read and was dropped.
    ProductSkipped { index: usize, reason: String },

    /// A display field of a kept product was an object or array; it renders blank.
    ProductFieldBlanked { index: usize, field: &'static str },

    /// `includes_products` disagrees with the products actually present.
    ProductFlagMismatch { flag: bool, count: usize },
}

impl DecodeIssue {
    /// Whether the issue means content was lost, rather than just reinterpreted.
    pub fn is_lossy(&self) -> bool {
        matches!(
            self,
            DecodeIssue::ProductsNotArray { .. }
                | DecodeIssue::ProductSkipped { .. }
                | DecodeIssue::ProductFieldBlanked { .. }
        )
    }

    /// Short code for structured logging.
    pub fn code(&self) -> &'static str {
        match self {
            DecodeIssue::NotJson { .. } => "DECODE_NOT_JSON",
            DecodeIssue::UnsupportedShape { .. } => "DECODE_UNSUPPORTED_SHAPE",
            DecodeIssue::ProductsNotArray { .. } => "DECODE_PRODUCTS_NOT_ARRAY",
            DecodeIssue::ProductSkipped { .. } => "DECODE_PRODUCT_SKIPPED",
            DecodeIssue::ProductFieldBlanked { .. } => "DECODE_PRODUCT_FIELD_BLANKED",
            DecodeIssue::ProductFlagMismatch { .. } => "DECODE_PRODUCT_FLAG_MISMATCH",
        }
    }
}

impl fmt::Display for DecodeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeIssue::NotJson { message } => {
                write!(f, "Payload is not JSON, using raw text: {}", message)
            }
            DecodeIssue::UnsupportedShape { kind } => {
                write!(f, "Payload is a JSON {}, using raw text", kind)
            }
            DecodeIssue::ProductsNotArray { kind } => {
                write!(f, "Field 'products' is a JSON {}, ignoring it", kind)
            }
            DecodeIssue::ProductSkipped { index, reason } => {
                write!(f, "Dropped product #{}: {}", index, reason)
            }
            DecodeIssue::ProductFieldBlanked { index, field } => {
                write!(f, "Product #{} field '{}' is not a scalar, left blank", index, field)
            }
            DecodeIssue::ProductFlagMismatch { flag, count } => {
                write!(
                    f,
                    "includes_products is {} but {} product(s) are present",
                    flag, count
                )
            }
        }
    }
}
