//! # marketcart-store: Snapshot Storage for marketcart
//!
//! Durable key-value storage for serialized cart snapshots.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     marketcart Data Flow                            │
//! │                                                                     │
//! │  CartManager (marketcart-manager)                                   │
//! │       │  read(key) at load, write(key, bytes) after each mutation   │
//! │       ▼                                                             │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                marketcart-store (THIS CRATE)                │   │
//! │  │                                                             │   │
//! │  │   ┌──────────────────┐      ┌──────────────────────────┐   │   │
//! │  │   │  SnapshotStore   │◄─────│  SqliteStore             │   │   │
//! │  │   │  (trait)         │      │  pool, WAL, migrations   │   │   │
//! │  │   │                  │◄─────│  MemoryStore             │   │   │
//! │  │   │  read / write    │      │  HashMap (tests)         │   │   │
//! │  │   └──────────────────┘      └──────────────────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The [`SnapshotStore`] adapter contract
//! - [`sqlite`] - Device-local durable backend ([`SqliteStore`])
//! - [`memory`] - Volatile backend for tests ([`MemoryStore`])
//! - [`migrations`] - Embedded schema migrations
//! - [`error`] - Storage error types
//!
//! ## Usage
//! ```rust,ignore
//! use marketcart_store::{SnapshotStore, SqliteConfig, SqliteStore};
//!
//! let store = SqliteStore::new(SqliteConfig::new("./marketcart.db")).await?;
//! store.write("marketcart:cart", b"[]".to_vec()).await?;
//! let bytes = store.read("marketcart:cart").await?;
//! ```

pub mod error;
pub mod memory;
pub mod migrations;
pub mod sqlite;
pub mod store;

// Re-exports
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use sqlite::{SqliteConfig, SqliteStore};
pub use store::SnapshotStore;
