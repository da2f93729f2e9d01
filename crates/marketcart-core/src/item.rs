//! # Cart Item Types
//!
//! The line-item types held by a cart.
//!
//! ## Two Shapes
//! - [`NewItem`]: what callers hand to `add_to_cart`. Carries no quantity;
//!   validated on construction so malformed input is rejected with a typed
//!   error instead of being accepted partially.
//! - [`CartItem`]: an item materialized in the cart, quantity >= 1. This is
//!   the record shape that round-trips through the persisted snapshot.

use serde::{Deserialize, Serialize};

use crate::error::ValidationResult;
use crate::validation;

// =============================================================================
// Cart Item
// =============================================================================

/// One product's presence in the cart.
///
/// Prices are integer cents and opaque to cart logic: no arithmetic is
/// performed on them here, they only ride along for display and persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Caller-supplied unique identifier, stable across sessions.
    pub id: String,

    /// Display name (opaque to cart logic).
    pub title: String,

    /// Display image URL (opaque to cart logic).
    pub image_url: String,

    /// Price in cents. No arithmetic is performed on it here.
    pub price_cents: i64,

    /// Quantity in cart. Always >= 1 while the item is present; an item
    /// whose quantity would drop below 1 is removed, never kept at zero.
    pub quantity: i64,
}

// =============================================================================
// New Item
// =============================================================================

/// A validated candidate for `add_to_cart`.
///
/// The shape of [`CartItem`] minus `quantity`: a new entry always enters the
/// cart with quantity 1, so there is no quantity field to ignore.
///
/// ## Example
/// ```rust
/// use marketcart_core::NewItem;
///
/// let item = NewItem::new("prod-1", "Linen Shirt", "https://cdn/shirt.png", 4990).unwrap();
/// assert_eq!(item.id(), "prod-1");
///
/// assert!(NewItem::new("", "No id", "", 100).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    id: String,
    title: String,
    image_url: String,
    price_cents: i64,
}

impl NewItem {
    /// Validates the fields and constructs a `NewItem`.
    ///
    /// ## Errors
    /// Returns a [`ValidationError`](crate::ValidationError) for an empty
    /// id or title, over-long fields, or a negative price.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price_cents: i64,
    ) -> ValidationResult<Self> {
        let id = id.into();
        let title = title.into();
        let image_url = image_url.into();

        validation::validate_item_id(&id)?;
        validation::validate_title(&title)?;
        validation::validate_image_url(&image_url)?;
        validation::validate_price_cents(price_cents)?;

        Ok(NewItem {
            id,
            title,
            image_url,
            price_cents,
        })
    }

    /// The item id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The display title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The display image URL.
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// The price in cents.
    pub fn price_cents(&self) -> i64 {
        self.price_cents
    }

    /// Materializes this item as a cart entry with quantity 1.
    pub(crate) fn into_cart_item(self) -> CartItem {
        CartItem {
            id: self.id,
            title: self.title,
            image_url: self.image_url,
            price_cents: self.price_cents,
            quantity: 1,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_validates_fields() {
        assert!(NewItem::new("prod-1", "Shirt", "u", 1000).is_ok());
        assert!(NewItem::new("", "Shirt", "u", 1000).is_err());
        assert!(NewItem::new("prod-1", "", "u", 1000).is_err());
        assert!(NewItem::new("prod-1", "Shirt", "u", -5).is_err());
    }

    #[test]
    fn test_new_item_materializes_with_quantity_one() {
        let item = NewItem::new("prod-1", "Shirt", "u", 1000)
            .unwrap()
            .into_cart_item();

        assert_eq!(item.id, "prod-1");
        assert_eq!(item.quantity, 1);
    }
}
