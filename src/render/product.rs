//! Product card markup.

use std::fmt::Write;

use super::escape::escape_html;
use crate::models::Product;

/// Render one product as a card.
///
/// Text fields are escaped. `link` and `image` are inserted verbatim: they are
/// catalog URLs produced by the store backend, not user input. Empty fields
/// are left out of the card instead of failing the render.
pub fn render_product_card(product: &Product) -> String {
    let title = escape_html(&product.title);
    let mut html = String::from(r#"<div class="product-card">"#);

    // Writing into a String cannot fail
    if !product.image.is_empty() {
        let _ = write!(
            html,
            r#"<img src="{}" alt="{}" class="product-image">"#,
            product.image, title
        );
    }

    html.push_str(r#"<div class="product-info">"#);
    let _ = write!(html, r#"<h3 class="product-title">{}</h3>"#, title);

    match &product.sale_price {
        Some(sale) => {
            let _ = write!(
                html,
                r#"<p class="product-price"><del>{}</del> <ins class="product-sale-price">{}</ins></p>"#,
                escape_html(&product.price),
                escape_html(sale)
            );
        }
        None => {
            let _ = write!(
                html,
                r#"<p class="product-price">{}</p>"#,
                escape_html(&product.price)
            );
        }
    }

    if let Some(stock) = &product.stock_status {
        let _ = write!(
            html,
            r#"<p class="product-stock">{}</p>"#,
            escape_html(stock)
        );
    }

    if !product.link.is_empty() {
        let _ = write!(
            html,
            r#"<a href="{}" class="product-link" target="_blank">View Product</a>"#,
            product.link
        );
    }
    html.push_str("</div>");

    if !product.description.is_empty() {
        let _ = write!(
            html,
            r#"<p class="product-description">{}</p>"#,
            escape_html(&product.description)
        );
    }

    html.push_str("</div>");
    html
}
