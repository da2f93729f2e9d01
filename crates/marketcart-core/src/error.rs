//! # Error Types
//!
//! Domain-specific error types for marketcart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  marketcart-core errors (this file)                                 │
//! │  ├── CartError        - Cart mutation failures                     │
//! │  ├── ValidationError  - Boundary input validation failures         │
//! │  └── SnapshotError    - Snapshot encode/decode failures            │
//! │                                                                     │
//! │  marketcart-store errors (separate crate)                           │
//! │  └── StoreError       - Durable storage failures                   │
//! │                                                                     │
//! │  marketcart-manager errors (separate crate)                         │
//! │  └── ManagerError     - Lifecycle and propagated failures          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (item id, field name)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Cart Error
// =============================================================================

/// Cart mutation errors.
///
/// A failed mutation leaves the cart unchanged.
#[derive(Debug, Error)]
pub enum CartError {
    /// `increment` or `decrement` referenced an id with no entry in the
    /// cart. This signals a stale id held by the caller.
    #[error("item not found in cart: {0}")]
    ItemNotFound(String),

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when boundary input does not meet requirements. Used for
/// early validation before any cart state is touched.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },
}

// =============================================================================
// Snapshot Error
// =============================================================================

/// Snapshot codec errors.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Serializing the cart to snapshot bytes failed.
    #[error("snapshot encoding failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// The stored bytes are not a valid snapshot document.
    #[error("snapshot decoding failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// The stored document parsed but violates a cart invariant
    /// (duplicate id or a quantity below 1).
    #[error("snapshot violates cart invariant: {0}")]
    Invariant(String),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

/// Convenience type alias for validation results.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CartError::ItemNotFound("prod-42".to_string());
        assert_eq!(err.to_string(), "item not found in cart: prod-42");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required { field: "id" };
        assert_eq!(err.to_string(), "id is required");

        let err = ValidationError::TooLong {
            field: "title",
            max: 200,
        };
        assert_eq!(err.to_string(), "title must be at most 200 characters");
    }

    #[test]
    fn test_validation_converts_to_cart_error() {
        let validation_err = ValidationError::Required { field: "id" };
        let cart_err: CartError = validation_err.into();
        assert!(matches!(cart_err, CartError::Validation(_)));
    }
}
