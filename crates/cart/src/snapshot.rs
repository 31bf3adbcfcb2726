//! Cart snapshot wire format.
//!
//! The cart is persisted as one value under the storage key [`KEY`]:
//!
//! ```json
//! {"version": 1,
//!  "items": [{"id": "p1", "name": "Lamp", "price": 19.99,
//!             "image_url": "https://...", "quantity": 2}]}
//! ```
//!
//! `price` is a JSON number, `image_url` is omitted for products without
//! an image. Earlier deployments persisted the bare items array with no
//! envelope; [`decode`] still accepts that shape so existing carts survive
//! the upgrade. Anything else - invalid JSON, an unknown version, a line
//! violating the cart invariants - is malformed, and the store treats a
//! malformed snapshot as an empty cart that the next persist overwrites.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use perch_core::{Cart, CartLine, Price, ProductId};

/// Storage key the cart snapshot is persisted under.
pub const KEY: &str = "cart";

/// Version written in every new snapshot envelope.
pub const VERSION: u32 = 1;

/// Reasons a persisted snapshot cannot be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The value is not valid JSON.
    #[error("invalid snapshot JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The value is valid JSON but neither an envelope nor a bare array.
    #[error("unexpected snapshot shape")]
    Shape,

    /// The envelope carries a version this build does not understand.
    #[error("unsupported snapshot version {0}")]
    Version(u32),

    /// A line item violates the cart invariants.
    #[error("invalid line item: {0}")]
    Line(String),
}

/// One persisted line item.
#[derive(Debug, Serialize, Deserialize)]
struct LineRecord {
    id: String,
    name: String,
    #[serde(with = "rust_decimal::serde::float")]
    price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
    quantity: u32,
}

/// The versioned snapshot envelope.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotDoc {
    version: u32,
    items: Vec<LineRecord>,
}

impl From<&CartLine> for LineRecord {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.product_id.as_str().to_owned(),
            name: line.name.clone(),
            price: line.unit_price.amount(),
            image_url: line.image_url.clone(),
            quantity: line.quantity,
        }
    }
}

/// Serialize a cart into the versioned snapshot envelope.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn encode(cart: &Cart) -> Result<String, serde_json::Error> {
    let doc = SnapshotDoc {
        version: VERSION,
        items: cart.lines().iter().map(LineRecord::from).collect(),
    };
    serde_json::to_string(&doc)
}

/// Parse a persisted snapshot back into a cart.
///
/// Accepts the current envelope and the legacy bare-array shape.
///
/// # Errors
///
/// Returns a [`DecodeError`] for anything that is not a well-formed
/// snapshot of a valid cart.
pub fn decode(raw: &str) -> Result<Cart, DecodeError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let records: Vec<LineRecord> = match value {
        serde_json::Value::Array(_) => serde_json::from_value(value)?,
        serde_json::Value::Object(_) => {
            let doc: SnapshotDoc = serde_json::from_value(value)?;
            if doc.version != VERSION {
                return Err(DecodeError::Version(doc.version));
            }
            doc.items
        }
        _ => return Err(DecodeError::Shape),
    };

    let mut lines = Vec::with_capacity(records.len());
    for record in records {
        let line = line_from_record(record)?;
        if lines.iter().any(|l: &CartLine| l.product_id == line.product_id) {
            return Err(DecodeError::Line(format!(
                "duplicate product id {}",
                line.product_id
            )));
        }
        lines.push(line);
    }
    Ok(Cart::from_lines(lines))
}

fn line_from_record(record: LineRecord) -> Result<CartLine, DecodeError> {
    if record.quantity == 0 {
        return Err(DecodeError::Line(format!(
            "product {} has zero quantity",
            record.id
        )));
    }
    let unit_price = Price::new(record.price)
        .ok_or_else(|| DecodeError::Line(format!("product {} has negative price", record.id)))?;
    Ok(CartLine {
        product_id: ProductId::from(record.id),
        name: record.name,
        unit_price,
        image_url: record.image_url,
        quantity: record.quantity,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn line(id: &str, price: &str, quantity: u32) -> CartLine {
        CartLine {
            product_id: ProductId::from(id),
            name: format!("Product {id}"),
            unit_price: Price::new(price.parse().unwrap()).unwrap(),
            image_url: None,
            quantity,
        }
    }

    #[test]
    fn test_round_trip_preserves_lines_and_order() {
        let mut cart = Cart::new();
        cart.add(CartLine {
            image_url: Some("https://img.example/a.jpg".to_owned()),
            ..line("p1", "19.99", 2)
        });
        cart.add(line("p2", "5", 1));

        let decoded = decode(&encode(&cart).unwrap()).unwrap();
        assert_eq!(decoded, cart);
    }

    #[test]
    fn test_encode_writes_versioned_envelope() {
        let mut cart = Cart::new();
        cart.add(line("p1", "19.99", 1));

        let raw = encode(&cart).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], 1);
        // Price is a JSON number, not a string.
        assert!(value["items"][0]["price"].is_number());
    }

    #[test]
    fn test_encode_omits_absent_image_url() {
        let mut cart = Cart::new();
        cart.add(line("p1", "5", 1));

        let raw = encode(&cart).unwrap();
        assert!(!raw.contains("image_url"));
    }

    #[test]
    fn test_decode_accepts_legacy_bare_array() {
        let raw = r#"[{"id":"p1","name":"Lamp","price":19.99,"quantity":2}]"#;
        let cart = decode(raw).unwrap();
        assert_eq!(cart.lines().len(), 1);
        let l = cart.line(&ProductId::from("p1")).unwrap();
        assert_eq!(l.quantity, 2);
        assert_eq!(l.unit_price.display(), "$19.99");
    }

    #[test]
    fn test_decode_rejects_invalid_json() {
        assert!(matches!(decode("{{nope"), Err(DecodeError::Json(_))));
    }

    #[test]
    fn test_decode_rejects_non_cart_shapes() {
        assert!(matches!(decode("42"), Err(DecodeError::Shape)));
        assert!(matches!(decode("\"cart\""), Err(DecodeError::Shape)));
        // An object without the envelope fields is a JSON-level mismatch.
        assert!(decode(r#"{"hello":"world"}"#).is_err());
    }

    #[test]
    fn test_decode_rejects_unknown_version() {
        let raw = r#"{"version":2,"items":[]}"#;
        assert!(matches!(decode(raw), Err(DecodeError::Version(2))));
    }

    #[test]
    fn test_decode_rejects_zero_quantity() {
        let raw = r#"[{"id":"p1","name":"Lamp","price":5,"quantity":0}]"#;
        assert!(matches!(decode(raw), Err(DecodeError::Line(_))));
    }

    #[test]
    fn test_decode_rejects_negative_price() {
        let raw = r#"[{"id":"p1","name":"Lamp","price":-5,"quantity":1}]"#;
        assert!(matches!(decode(raw), Err(DecodeError::Line(_))));
    }

    #[test]
    fn test_decode_rejects_duplicate_ids() {
        let raw = r#"[{"id":"p1","name":"A","price":1,"quantity":1},
                      {"id":"p1","name":"B","price":2,"quantity":1}]"#;
        assert!(matches!(decode(raw), Err(DecodeError::Line(_))));
    }

    #[test]
    fn test_decode_empty_array_is_empty_cart() {
        assert!(decode("[]").unwrap().is_empty());
    }
}
