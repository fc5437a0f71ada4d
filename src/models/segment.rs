use serde::{Deserialize, Serialize};

/// A display-ready piece of a rendered message.
///
/// Both variants carry HTML that is safe to mount as-is, under the trust
/// rules documented on [`MessageRenderer`](crate::render::MessageRenderer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderedSegment {
    /// The message text after escaping and markdown-lite
    Text { html: String },
    /// One product card
    Product { html: String },
}

impl RenderedSegment {
    pub fn html(&self) -> &str {
        match self {
            RenderedSegment::Text { html } | RenderedSegment::Product { html } => html,
        }
    }

    pub fn into_html(self) -> String {
        match self {
            RenderedSegment::Text { html } | RenderedSegment::Product { html } => html,
        }
    }

    pub fn is_product(&self) -> bool {
        matches!(self, RenderedSegment::Product { .. })
    }
}
