//! # marketcart-core: Pure Cart Logic for marketcart
//!
//! This crate is the heart of marketcart. It contains every cart state
//! transition as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     marketcart Architecture                         │
//! │                                                                     │
//! │  ┌─────────────────────────────────────────────────────────────┐   │
//! │  │                 Embedding Application (UI)                  │   │
//! │  └────────────────────────────┬────────────────────────────────┘   │
//! │                               │                                     │
//! │  ┌────────────────────────────▼────────────────────────────────┐   │
//! │  │                   marketcart-manager                        │   │
//! │  │     hydration, write-through persistence, subscribers       │   │
//! │  └────────────────────────────┬────────────────────────────────┘   │
//! │                               │                                     │
//! │  ┌────────────────────────────▼────────────────────────────────┐   │
//! │  │              ★ marketcart-core (THIS CRATE) ★               │   │
//! │  │                                                             │   │
//! │  │   ┌─────────┐  ┌─────────┐  ┌──────────┐  ┌────────────┐   │   │
//! │  │   │  item   │  │  cart   │  │ snapshot │  │ validation │   │   │
//! │  │   │ CartItem│  │  Cart   │  │  codec   │  │   rules    │   │   │
//! │  │   │ NewItem │  │ add/inc │  │  (JSON)  │  │   checks   │   │   │
//! │  │   └─────────┘  └─────────┘  └──────────┘  └────────────┘   │   │
//! │  │                                                             │   │
//! │  │   NO I/O • NO CHANNELS • NO RUNTIME • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`item`] - Cart line-item types ([`CartItem`], validated [`NewItem`])
//! - [`cart`] - The [`Cart`] collection and its mutations
//! - [`snapshot`] - Codec between a cart and its persisted byte form
//! - [`validation`] - Boundary input validation
//! - [`error`] - Domain error types
//!
//! ## Example
//! ```rust
//! use marketcart_core::{Cart, NewItem};
//!
//! let mut cart = Cart::new();
//! cart.add(NewItem::new("prod-1", "Linen Shirt", "https://cdn/s.png", 4990)?);
//! cart.add(NewItem::new("prod-1", "Linen Shirt", "https://cdn/s.png", 4990)?);
//!
//! // Same id merged, no duplicate entry
//! assert_eq!(cart.len(), 1);
//! assert_eq!(cart.get("prod-1").unwrap().quantity, 2);
//!
//! // Decrementing to zero removes the entry
//! cart.decrement("prod-1")?;
//! cart.decrement("prod-1")?;
//! assert!(cart.is_empty());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cart;
pub mod error;
pub mod item;
pub mod snapshot;
pub mod validation;

// Re-exports for convenience
pub use cart::Cart;
pub use error::{CartError, CartResult, SnapshotError, ValidationError};
pub use item::{CartItem, NewItem};
