//! # Manager Error Types
//!
//! Lifecycle and propagated errors for the cart manager.
//!
//! ## Error Classes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                   Manager Error Classes                             │
//! │                                                                     │
//! │  Configuration (caller wiring)     NotLoaded, AlreadyLoaded,        │
//! │   surfaced synchronously           Closed                           │
//! │                                                                     │
//! │  Caller misuse                     Cart(ItemNotFound)               │
//! │   surfaced synchronously                                            │
//! │                                                                     │
//! │  Infrastructure at load            Store(..), CorruptSnapshot       │
//! │   handled per CorruptionPolicy                                      │
//! │                                                                     │
//! │  Infrastructure at write-through   PersistError via the failure     │
//! │   surfaced out-of-band             channel, never rolls back the    │
//! │                                    in-memory cart                   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use marketcart_core::{CartError, SnapshotError};
use marketcart_store::StoreError;

/// Errors returned by [`CartManager`](crate::CartManager) operations.
#[derive(Debug, Error)]
pub enum ManagerError {
    /// The manager was used before its one-shot `load` completed.
    #[error("cart manager is not loaded; await load() before use")]
    NotLoaded,

    /// `load` was called on a manager that already hydrated. The cart is
    /// rebuilt from storage once per process lifetime.
    #[error("cart manager is already loaded")]
    AlreadyLoaded,

    /// The manager was closed.
    #[error("cart manager is closed")]
    Closed,

    /// The write-through persister task is no longer running.
    #[error("persister task stopped unexpectedly")]
    PersisterStopped,

    /// The stored snapshot failed to decode and the configured policy is
    /// to preserve it. `raw` carries the stored bytes untouched so the
    /// embedding application can offer recovery (e.g. "reset cart")
    /// instead of silently wiping them.
    #[error("stored snapshot under '{key}' is corrupt: {source}")]
    CorruptSnapshot {
        key: String,
        raw: Vec<u8>,
        #[source]
        source: SnapshotError,
    },

    /// A cart mutation failed (stale id, invalid input).
    #[error(transparent)]
    Cart(#[from] CartError),

    /// Storage failed at load time.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failure of one write-through attempt, reported out-of-band.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Serializing the snapshot failed.
    #[error("snapshot encoding failed: {0}")]
    Encode(#[from] SnapshotError),

    /// The storage write failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Convenience type alias for Results with ManagerError.
pub type ManagerResult<T> = Result<T, ManagerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrupt_snapshot_preserves_raw_bytes() {
        let err = ManagerError::CorruptSnapshot {
            key: "marketcart:cart".to_string(),
            raw: b"not json".to_vec(),
            source: SnapshotError::Invariant("duplicate item id 'A'".to_string()),
        };

        match err {
            ManagerError::CorruptSnapshot { raw, .. } => assert_eq!(raw, b"not json"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_cart_error_converts() {
        let err: ManagerError = CartError::ItemNotFound("A".to_string()).into();
        assert!(matches!(err, ManagerError::Cart(_)));
    }
}
