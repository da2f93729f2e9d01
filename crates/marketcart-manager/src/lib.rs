//! # marketcart-manager: The Cart Manager
//!
//! The stateful orchestration layer of marketcart: owns the authoritative
//! in-memory cart, hydrates it from durable storage at startup, and keeps
//! the stored snapshot synchronized after every mutation.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                  marketcart-manager (THIS CRATE)                    │
//! │                                                                     │
//! │  Embedding App                CartManager              Persister    │
//! │  ─────────────                ───────────              ─────────    │
//! │                                                                     │
//! │  open(store, cfg) ──────────► load snapshot ─────────► (idle)       │
//! │                                                                     │
//! │  add_to_cart(item) ─────────► mutate memory                         │
//! │  increment(id)                publish to subscribers                │
//! │  decrement(id)                enqueue snapshot ──────► write whole  │
//! │  clear()                      (fire-and-forget)        cart to key  │
//! │                                                                     │
//! │  items() / subscribe() ◄───── post-mutation state                   │
//! │  persist_failures()  ◄─────────────────────────────── write errors │
//! │                                                                     │
//! │  close() ───────────────────► flush + stop ──────────► (exit)       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`manager`] - [`CartManager`]: lifecycle, mutations, consumer access
//! - [`persister`] - Single-writer write-through task
//! - [`config`] - [`ManagerConfig`] and [`CorruptionPolicy`]
//! - [`error`] - [`ManagerError`] and the out-of-band [`PersistError`]

pub mod config;
pub mod error;
pub mod manager;
pub mod persister;

// Re-exports
pub use config::{CorruptionPolicy, ManagerConfig, DEFAULT_STORAGE_KEY};
pub use error::{ManagerError, ManagerResult, PersistError};
pub use manager::CartManager;
pub use persister::PersistFailure;
