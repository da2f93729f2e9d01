//! # Validation Module
//!
//! Boundary input validation for marketcart.
//!
//! ## Validation Strategy
//! Input is validated once, when a [`NewItem`](crate::item::NewItem) is
//! constructed. Everything past that boundary works with already-valid
//! values, so cart mutations never have to re-check field shapes.
//!
//! ## Usage
//! ```rust
//! use marketcart_core::validation::{validate_item_id, validate_price_cents};
//!
//! validate_item_id("prod-330").unwrap();
//! validate_price_cents(1099).unwrap();
//! ```

use crate::error::{ValidationError, ValidationResult};

/// Maximum length of an item id.
pub const MAX_ID_LEN: usize = 64;

/// Maximum length of an item title.
pub const MAX_TITLE_LEN: usize = 200;

/// Maximum length of an item image URL.
pub const MAX_IMAGE_URL_LEN: usize = 2048;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an item id.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 64 characters
///
/// Ids are otherwise opaque: callers supply them and they only need to be
/// stable across sessions.
///
/// ## Example
/// ```rust
/// use marketcart_core::validation::validate_item_id;
///
/// assert!(validate_item_id("prod-330").is_ok());
/// assert!(validate_item_id("").is_err());
/// ```
pub fn validate_item_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required { field: "id" });
    }

    if id.len() > MAX_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "id",
            max: MAX_ID_LEN,
        });
    }

    Ok(())
}

/// Validates an item title.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
pub fn validate_title(title: &str) -> ValidationResult<()> {
    if title.trim().is_empty() {
        return Err(ValidationError::Required { field: "title" });
    }

    if title.len() > MAX_TITLE_LEN {
        return Err(ValidationError::TooLong {
            field: "title",
            max: MAX_TITLE_LEN,
        });
    }

    Ok(())
}

/// Validates an item image URL.
///
/// ## Rules
/// - May be empty (the URL is opaque display data)
/// - Must be at most 2048 characters
pub fn validate_image_url(url: &str) -> ValidationResult<()> {
    if url.len() > MAX_IMAGE_URL_LEN {
        return Err(ValidationError::TooLong {
            field: "image_url",
            max: MAX_IMAGE_URL_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// The cart performs no arithmetic on prices; this only rejects values
/// that could never describe a real product.
///
/// ## Example
/// ```rust
/// use marketcart_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1099).is_ok());  // $10.99
/// assert!(validate_price_cents(0).is_ok());     // Free item
/// assert!(validate_price_cents(-100).is_err()); // Invalid
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price",
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_id() {
        assert!(validate_item_id("prod-330").is_ok());
        assert!(validate_item_id("a").is_ok());

        assert!(validate_item_id("").is_err());
        assert!(validate_item_id("   ").is_err());
        assert!(validate_item_id(&"x".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_title() {
        assert!(validate_title("Linen Shirt").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title(&"a".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_image_url() {
        assert!(validate_image_url("https://cdn.example.com/shirt.png").is_ok());
        assert!(validate_image_url("").is_ok());
        assert!(validate_image_url(&"u".repeat(3000)).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1099).is_ok());
        assert!(validate_price_cents(-1).is_err());
    }
}
