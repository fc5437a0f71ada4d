use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Wire names of the display fields. Optional fields also accept a
/// camelCase spelling; the snake_case one wins when both carry a value.
const TITLE: &str = "title";
const IMAGE: &str = "image";
const LINK: &str = "link";
const PRICE: &str = "price";
const DESCRIPTION: &str = "description";
const STOCK_STATUS: (&str, &str) = ("stock_status", "stockStatus");
const SALE_PRICE: (&str, &str) = ("sale_price", "salePrice");

/// A product recommendation attached to an assistant reply.
///
/// Every field is read on its own and is optional on the wire. Catalog feeds
/// are inconsistent: prices arrive as `"19.99"` or `19.99`, stock flags as
/// `"instock"` or `true`. Strings pass through, numbers and booleans use
/// their canonical form, and anything else (missing, `null`, an object, an
/// array) reads as empty, so one odd field never drops the whole card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Product {
    pub title: String,
    /// Image URL from the catalog
    pub image: String,
    /// Product page URL from the catalog
    pub link: String,
    pub price: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price: Option<String>,
}

impl Product {
    /// Create a product with the required display fields.
    pub fn new(
        title: impl Into<String>,
        image: impl Into<String>,
        link: impl Into<String>,
        price: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            image: image.into(),
            link: link.into(),
            price: price.into(),
            description: description.into(),
            stock_status: None,
            sale_price: None,
        }
    }

    pub fn with_stock_status(mut self, status: impl Into<String>) -> Self {
        self.stock_status = Some(status.into());
        self
    }

    pub fn with_sale_price(mut self, price: impl Into<String>) -> Self {
        self.sale_price = Some(price.into());
        self
    }

    /// Build a product from the fields of one catalog entry. Never fails.
    pub fn from_fields(fields: &Map<String, Value>) -> Self {
        Self {
            title: scalar(fields.get(TITLE)),
            image: scalar(fields.get(IMAGE)),
            link: scalar(fields.get(LINK)),
            price: scalar(fields.get(PRICE)),
            description: scalar(fields.get(DESCRIPTION)),
            stock_status: optional_scalar(either(fields, STOCK_STATUS)),
            sale_price: optional_scalar(either(fields, SALE_PRICE)),
        }
    }

    /// Display fields of `fields` that hold an object or array and so read
    /// as empty.
    pub fn blanked_fields(fields: &Map<String, Value>) -> Vec<&'static str> {
        [
            TITLE,
            IMAGE,
            LINK,
            PRICE,
            DESCRIPTION,
            STOCK_STATUS.0,
            STOCK_STATUS.1,
            SALE_PRICE.0,
            SALE_PRICE.1,
        ]
        .into_iter()
        .filter(|name| matches!(fields.get(*name), Some(Value::Object(_) | Value::Array(_))))
        .collect()
    }
}

impl<'de> Deserialize<'de> for Product {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let fields = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_fields(&fields))
    }
}

/// The snake_case field if it carries a value, else the camelCase one.
fn either<'a>(fields: &'a Map<String, Value>, (snake, camel): (&str, &str)) -> Option<&'a Value> {
    match fields.get(snake) {
        Some(value) if !value.is_null() => Some(value),
        _ => fields.get(camel),
    }
}

fn scalar(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        Some(Value::Bool(flag)) => flag.to_string(),
        Some(Value::Null | Value::Object(_) | Value::Array(_)) | None => String::new(),
    }
}

/// Like [`scalar`] but an empty result is `None`.
fn optional_scalar(value: Option<&Value>) -> Option<String> {
    Some(scalar(value)).filter(|text| !text.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_product() {
        let product: Product = serde_json::from_str(
            r#"{
                "title": "Saddle Pad",
                "image": "https://shop.test/pad.jpg",
                "link": "https://shop.test/pad",
                "price": "$49.99",
                "description": "Quilted cotton pad",
                "stock_status": "instock",
                "sale_price": "$39.99"
            }"#,
        )
        .unwrap();

        assert_eq!(
            product,
            Product::new(
                "Saddle Pad",
                "https://shop.test/pad.jpg",
                "https://shop.test/pad",
                "$49.99",
                "Quilted cotton pad",
            )
            .with_stock_status("instock")
            .with_sale_price("$39.99")
        );
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let product: Product = serde_json::from_str(r#"{"title": "Bridle"}"#).unwrap();
        assert_eq!(product.title, "Bridle");
        assert_eq!(product.image, "");
        assert_eq!(product.link, "");
        assert_eq!(product.stock_status, None);
    }

    #[test]
    fn test_numeric_and_null_scalars() {
        let product: Product =
            serde_json::from_str(r#"{"title": null, "price": 19.5, "salePrice": 15, "stockStatus": true}"#)
                .unwrap();
        assert_eq!(product.title, "");
        assert_eq!(product.price, "19.5");
        assert_eq!(product.sale_price, Some("15".to_string()));
        assert_eq!(product.stock_status, Some("true".to_string()));
    }

    #[test]
    fn test_empty_optional_is_none() {
        let product: Product = serde_json::from_str(r#"{"sale_price": ""}"#).unwrap();
        assert_eq!(product.sale_price, None);
    }

    #[test]
    fn test_nested_value_reads_as_empty() {
        let product: Product = serde_json::from_str(
            r#"{"title": "Fly Mask", "image": {"src": "https://shop.test/m.jpg"}, "price": ["$24"]}"#,
        )
        .unwrap();
        assert_eq!(product.title, "Fly Mask");
        assert_eq!(product.image, "");
        assert_eq!(product.price, "");
    }

    #[test]
    fn test_both_spellings_prefer_snake_case() {
        let product: Product = serde_json::from_str(
            r#"{"title": "Fly Mask", "stock_status": "instock", "stockStatus": "outofstock",
                "sale_price": null, "salePrice": "$19"}"#,
        )
        .unwrap();
        assert_eq!(product.stock_status.as_deref(), Some("instock"));
        assert_eq!(product.sale_price.as_deref(), Some("$19"));
    }

    #[test]
    fn test_blanked_fields() {
        let fields = serde_json::json!({
            "title": "ok",
            "image": {"src": "x"},
            "stockStatus": [1],
            "extra": {"ignored": true}
        });
        let fields = fields.as_object().unwrap();
        assert_eq!(Product::blanked_fields(fields), vec!["image", "stockStatus"]);
    }

    #[test]
    fn test_non_object_is_rejected() {
        assert!(serde_json::from_str::<Product>("\"Fly Mask\"").is_err());
    }
}
