//! # Storage Error Types
//!
//! Error types for snapshot storage operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Error Propagation                             │
//! │                                                                     │
//! │  SQLite Error (sqlx::Error)                                         │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  StoreError (this module) ← adds context and categorization         │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  ManagerError (marketcart-manager)                                  │
//! │       ├── at load: handled per CorruptionPolicy                     │
//! │       └── at write-through: surfaced out-of-band, never rolls       │
//! │           back the in-memory cart                                   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Snapshot storage errors.
///
/// A missing key is NOT an error: [`SnapshotStore::read`] returns
/// `Ok(None)` for a key that was never written. These variants cover the
/// infrastructure failing underneath the contract.
///
/// [`SnapshotStore::read`]: crate::store::SnapshotStore::read
#[derive(Debug, Error)]
pub enum StoreError {
    /// Opening or reaching the backing storage failed.
    #[error("storage connection failed: {0}")]
    ConnectionFailed(String),

    /// Schema migration failed.
    #[error("storage migration failed: {0}")]
    MigrationFailed(String),

    /// A read or write query failed.
    #[error("storage query failed: {0}")]
    QueryFailed(String),

    /// All pooled connections are in use.
    #[error("storage connection pool exhausted")]
    PoolExhausted,

    /// The store was closed before the operation ran.
    #[error("storage is closed")]
    Closed,

    /// Internal storage error.
    #[error("internal storage error: {0}")]
    Internal(String),
}

/// Convert sqlx errors to StoreError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::PoolTimedOut  → StoreError::PoolExhausted
/// sqlx::Error::PoolClosed    → StoreError::Closed
/// sqlx::Error::Database      → StoreError::QueryFailed
/// Other                      → StoreError::Internal
/// ```
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => StoreError::PoolExhausted,
            sqlx::Error::PoolClosed => StoreError::Closed,
            sqlx::Error::Database(db_err) => StoreError::QueryFailed(db_err.message().to_string()),
            sqlx::Error::Io(io_err) => StoreError::QueryFailed(io_err.to_string()),
            _ => StoreError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::MigrationFailed(err.to_string())
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
