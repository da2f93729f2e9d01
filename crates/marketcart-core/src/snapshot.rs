//! # Snapshot Codec
//!
//! Serializes a cart to the bytes persisted under the storage key, and back.
//!
//! ## Wire Format
//! A JSON array of cart item records, in cart order:
//!
//! ```json
//! [
//!   {"id": "prod-1", "title": "Linen Shirt", "image_url": "https://cdn/s.png",
//!    "price_cents": 4990, "quantity": 2}
//! ]
//! ```
//!
//! The snapshot is always the whole cart; there are no partial or delta
//! documents. Decoding re-validates the cart invariants so corrupt stored
//! bytes surface as [`SnapshotError`] instead of producing an invalid cart.

use crate::cart::Cart;
use crate::error::SnapshotError;
use crate::item::CartItem;

/// Encodes the full cart as snapshot bytes.
pub fn encode(cart: &Cart) -> Result<Vec<u8>, SnapshotError> {
    serde_json::to_vec(cart.items()).map_err(SnapshotError::Encode)
}

/// Decodes snapshot bytes back into a cart.
///
/// ## Errors
/// - [`SnapshotError::Decode`] if the bytes are not a JSON array of item
///   records with all fields present.
/// - [`SnapshotError::Invariant`] if the document parsed but holds a
///   duplicate id or a quantity below 1.
pub fn decode(bytes: &[u8]) -> Result<Cart, SnapshotError> {
    let items: Vec<CartItem> = serde_json::from_slice(bytes).map_err(SnapshotError::Decode)?;
    Cart::from_items(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::NewItem;

    fn sample_cart() -> Cart {
        let mut cart = Cart::new();
        cart.add(NewItem::new("prod-1", "Linen Shirt", "https://cdn/shirt.png", 4990).unwrap());
        cart.add(NewItem::new("prod-2", "Mug", "https://cdn/mug.png", 1250).unwrap());
        cart.increment("prod-2").unwrap();
        cart.add(NewItem::new("prod-3", "Sticker", "", 0).unwrap());
        cart
    }

    #[test]
    fn test_round_trip_preserves_entries_and_order() {
        let cart = sample_cart();

        let bytes = encode(&cart).unwrap();
        let decoded = decode(&bytes).unwrap();

        assert_eq!(decoded, cart);
        let ids: Vec<&str> = decoded.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["prod-1", "prod-2", "prod-3"]);
        assert_eq!(decoded.get("prod-2").unwrap().quantity, 2);
        assert_eq!(decoded.get("prod-1").unwrap().price_cents, 4990);
    }

    #[test]
    fn test_empty_cart_round_trips() {
        let bytes = encode(&Cart::new()).unwrap();
        assert_eq!(bytes, b"[]");

        let decoded = decode(&bytes).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn test_decode_rejects_malformed_bytes() {
        assert!(matches!(
            decode(b"not json at all"),
            Err(SnapshotError::Decode(_))
        ));
        assert!(matches!(
            decode(br#"{"id": "object-not-array"}"#),
            Err(SnapshotError::Decode(_))
        ));
        // Missing required fields
        assert!(matches!(
            decode(br#"[{"id": "prod-1"}]"#),
            Err(SnapshotError::Decode(_))
        ));
    }

    #[test]
    fn test_decode_rejects_invariant_violations() {
        let dup = br#"[
            {"id":"A","title":"t","image_url":"u","price_cents":1,"quantity":1},
            {"id":"A","title":"t","image_url":"u","price_cents":1,"quantity":1}
        ]"#;
        assert!(matches!(decode(dup), Err(SnapshotError::Invariant(_))));

        let zero = br#"[{"id":"A","title":"t","image_url":"u","price_cents":1,"quantity":0}]"#;
        assert!(matches!(decode(zero), Err(SnapshotError::Invariant(_))));
    }
}
