//! Message rendering
//!
//! Converts a [`DecodedMessage`] into [`RenderedSegment`]s that a transcript
//! can mount directly.
//!
//! # Trust boundary
//!
//! | Input | Treatment |
//! |-------|-----------|
//! | user text | escaped, then markdown-lite |
//! | error text | escaped, then markdown-lite |
//! | assistant text | markdown-lite only (trusted backend) |
//! | product title/price/description | escaped |
//! | product `link`/`image` | verbatim (catalog URLs from the backend) |
//!
//! # Module structure
//! - `escape` - HTML escaping
//! - `markdown` - Markdown-lite formatting rules
//! - `product` - Product card markup

mod escape;
mod markdown;
mod product;

pub use escape::escape_html;
pub use markdown::format_markdown_lite;
pub use product::render_product_card;

use crate::models::{DecodedMessage, RenderedSegment, Sender};

/// Pure renderer from decoded messages to display segments.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageRenderer;

impl MessageRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render a message as the given sender.
    ///
    /// Produces the text segment first (omitted when the text is blank),
    /// followed by one product segment per product in order.
    pub fn render(&self, message: &DecodedMessage, sender: Sender) -> Vec<RenderedSegment> {
        let mut segments = Vec::with_capacity(1 + message.products.len());

        if let Some(html) = render_text(&message.text, sender) {
            segments.push(RenderedSegment::Text { html });
        }

        segments.extend(message.products.iter().map(|product| RenderedSegment::Product {
            html: render_product_card(product),
        }));

        segments
    }
}

/// Convenience wrapper around [`MessageRenderer::render`].
pub fn render(message: &DecodedMessage, sender: Sender) -> Vec<RenderedSegment> {
    MessageRenderer.render(message, sender)
}

fn render_text(text: &str, sender: Sender) -> Option<String> {
    if text.trim().is_empty() {
        return None;
    }

    let formatted = match sender {
        Sender::Assistant => format_markdown_lite(text),
        Sender::User | Sender::Error => format_markdown_lite(&escape_html(text)),
    };

    if formatted.is_empty() {
        None
    } else {
        Some(format!("<p>{}</p>", formatted))
    }
}
