//! # SnapshotStore Trait
//!
//! The persistent-store adapter contract consumed by the cart manager.
//!
//! The manager only requires this minimal key-value shape: fetch the bytes
//! under a key, or durably overwrite them. Implementations decide what
//! "durable" means (SQLite file, in-process map, platform storage).

use async_trait::async_trait;

use crate::error::StoreResult;

/// Asynchronous key-value storage for serialized snapshots.
///
/// ## Contract
/// - `read` returns `Ok(None)` for a key that was never written; "not
///   present" is not an error.
/// - `write` durably stores the value under the key, overwriting any prior
///   contents in full. There are no partial updates.
/// - Either operation may fail with a [`StoreError`](crate::StoreError)
///   (storage unavailable, I/O failure). Callers decide the retry policy;
///   implementations do not retry.
///
/// The trait is object-safe so embedders can inject any backend as
/// `Arc<dyn SnapshotStore>`.
#[async_trait]
pub trait SnapshotStore: Send + Sync + 'static {
    /// Returns the stored bytes for `key`, or `None` if never written.
    async fn read(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Durably stores `value` under `key`, overwriting prior contents.
    async fn write(&self, key: &str, value: Vec<u8>) -> StoreResult<()>;
}
