//! # Cart
//!
//! The in-memory cart collection and its state transitions.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Cart State Transitions                          │
//! │                                                                     │
//! │  add(item)       id present ──► quantity += 1   (same as increment) │
//! │                  id absent  ──► push entry with quantity = 1        │
//! │                                                                     │
//! │  increment(id)   id present ──► quantity += 1                       │
//! │                  id absent  ──► Err(ItemNotFound), cart unchanged   │
//! │                                                                     │
//! │  decrement(id)   id present ──► quantity -= 1;                      │
//! │                                 result < 1 ──► entry removed        │
//! │                  id absent  ──► Err(ItemNotFound), cart unchanged   │
//! │                                                                     │
//! │  clear()         all entries removed                                │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Entries are unique by `id`
//! - Every entry's quantity is >= 1; nothing is ever kept at quantity 0
//! - Insertion order is preserved (display order, no semantic weight)

use serde::Serialize;

use crate::error::{CartError, CartResult, SnapshotError};
use crate::item::{CartItem, NewItem};

/// The ordered, id-unique collection of cart entries.
///
/// Entries live in a `Vec`: carts are small, lookups are a linear scan by
/// id, and insertion order is the display order.
///
/// Serializes as a plain array of entries. Deliberately NOT `Deserialize`:
/// deserialization goes through [`snapshot::decode`](crate::snapshot::decode)
/// / [`Cart::from_items`] so stored bytes cannot bypass the invariant checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Rebuilds a cart from already-materialized entries, enforcing the
    /// cart invariants on the way in.
    ///
    /// Used by the snapshot decoder; stored bytes that violate an
    /// invariant are a corrupt snapshot, not a usable cart.
    pub fn from_items(items: Vec<CartItem>) -> Result<Self, SnapshotError> {
        for (idx, item) in items.iter().enumerate() {
            if item.quantity < 1 {
                return Err(SnapshotError::Invariant(format!(
                    "item '{}' has quantity {}",
                    item.id, item.quantity
                )));
            }
            if items[..idx].iter().any(|other| other.id == item.id) {
                return Err(SnapshotError::Invariant(format!(
                    "duplicate item id '{}'",
                    item.id
                )));
            }
        }

        Ok(Cart { items })
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds an item to the cart, merging with an existing entry by id.
    ///
    /// ## Behavior
    /// - If an entry with the same id exists: its quantity increases by 1,
    ///   exactly as [`increment`](Cart::increment) would. The incoming
    ///   title/image/price are not applied; the existing entry stays frozen.
    /// - Otherwise: the item is appended with quantity 1.
    pub fn add(&mut self, item: NewItem) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id()) {
            existing.quantity += 1;
            return;
        }

        self.items.push(item.into_cart_item());
    }

    /// Increases the quantity of the entry with `id` by 1.
    ///
    /// ## Errors
    /// [`CartError::ItemNotFound`] if no entry has that id; the cart is
    /// left unchanged.
    pub fn increment(&mut self, id: &str) -> CartResult<()> {
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| CartError::ItemNotFound(id.to_string()))?;

        item.quantity += 1;
        Ok(())
    }

    /// Decreases the quantity of the entry with `id` by 1.
    ///
    /// An entry whose quantity would drop below 1 is removed entirely; the
    /// cart never holds an entry at quantity 0.
    ///
    /// ## Errors
    /// [`CartError::ItemNotFound`] if no entry has that id; the cart is
    /// left unchanged.
    pub fn decrement(&mut self, id: &str) -> CartResult<()> {
        let index = self
            .items
            .iter()
            .position(|i| i.id == id)
            .ok_or_else(|| CartError::ItemNotFound(id.to_string()))?;

        let item = &mut self.items[index];
        item.quantity -= 1;

        if item.quantity < 1 {
            self.items.remove(index);
        }

        Ok(())
    }

    /// Removes all entries from the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    /// The entries in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Looks up an entry by id.
    pub fn get(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Number of distinct entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all entry quantities.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
