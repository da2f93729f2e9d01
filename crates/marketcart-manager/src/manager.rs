//! # Cart Manager
//!
//! Owns the authoritative in-memory cart and keeps the durable snapshot
//! synchronized with it.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     Cart Manager Lifecycle                          │
//! │                                                                     │
//! │  CartManager::new(store, config)                                    │
//! │       │            COLD: every cart operation fails NotLoaded       │
//! │       ▼                                                             │
//! │  load().await      one-shot hydration: read key, decode snapshot,   │
//! │       │            replace state (once per process lifetime)        │
//! │       ▼                                                             │
//! │  LOADED            add_to_cart / increment / decrement / clear      │
//! │       │            each mutation: update memory synchronously,      │
//! │       │            publish to subscribers, enqueue snapshot write   │
//! │       ▼                                                             │
//! │  close().await     flush pending write, stop the persister          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `CartManager::open` is `new` + `load` and is the recommended
//! construction path.
//!
//! ## Thread Safety
//! The cart sits behind a `std::sync::Mutex`. Mutations update memory
//! without suspending while the lock is held; only the background
//! persister does I/O, after the new state is already visible. Readers
//! therefore never observe a torn or stale state mid-mutation.

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use marketcart_core::{snapshot, Cart, CartItem, NewItem};
use marketcart_store::SnapshotStore;

use crate::config::{CorruptionPolicy, ManagerConfig};
use crate::error::{ManagerError, ManagerResult};
use crate::persister::{PendingSnapshot, Persister, PersistFailure};

/// In-memory manager state behind the mutex.
#[derive(Debug)]
struct Inner {
    cart: Cart,
    loaded: bool,
    closed: bool,
    /// Mutation sequence, bumped once per applied mutation.
    seq: u64,
}

/// The cart manager.
///
/// Construct one per cart, hand it an injected [`SnapshotStore`], await
/// initialization, and share it by reference with whatever consumes it.
///
/// ## Example
/// ```rust
/// use std::sync::Arc;
/// use marketcart_core::NewItem;
/// use marketcart_manager::{CartManager, ManagerConfig};
/// use marketcart_store::MemoryStore;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let store = Arc::new(MemoryStore::new());
/// let manager = CartManager::open(store, ManagerConfig::default()).await?;
///
/// manager.add_to_cart(NewItem::new("prod-1", "Shirt", "https://cdn/s.png", 4990)?)?;
/// assert_eq!(manager.items()?.len(), 1);
///
/// manager.close().await?;
/// # Ok(())
/// # }
/// ```
pub struct CartManager {
    store: Arc<dyn SnapshotStore>,
    config: ManagerConfig,
    inner: Mutex<Inner>,

    /// Current items, published to subscribers after load and after every
    /// mutation.
    items_tx: watch::Sender<Vec<CartItem>>,

    /// Latest snapshot queued for the persister.
    snapshot_tx: watch::Sender<Option<PendingSnapshot>>,

    /// Highest sequence whose write attempt has completed.
    acked_rx: watch::Receiver<u64>,

    /// Out-of-band persist failures, claimed once via `persist_failures`.
    failure_rx: Mutex<Option<mpsc::Receiver<PersistFailure>>>,

    shutdown_tx: mpsc::Sender<()>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl CartManager {
    /// Creates a COLD manager and spawns its write-through persister.
    ///
    /// Every cart operation fails with [`ManagerError::NotLoaded`] until
    /// [`load`](CartManager::load) completes. Must be called within a
    /// tokio runtime.
    pub fn new(store: Arc<dyn SnapshotStore>, config: ManagerConfig) -> Self {
        let (items_tx, _) = watch::channel(Vec::new());
        let (snapshot_tx, snapshot_rx) = watch::channel(None);
        let (acked_tx, acked_rx) = watch::channel(0);
        let (failure_tx, failure_rx) = mpsc::channel(config.failure_channel_capacity.max(1));
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        let persister = Persister::new(
            Arc::clone(&store),
            config.storage_key.clone(),
            snapshot_rx,
            acked_tx,
            failure_tx,
            shutdown_rx,
        );
        let task = tokio::spawn(persister.run());

        CartManager {
            store,
            config,
            inner: Mutex::new(Inner {
                cart: Cart::new(),
                loaded: false,
                closed: false,
                seq: 0,
            }),
            items_tx,
            snapshot_tx,
            acked_rx,
            failure_rx: Mutex::new(Some(failure_rx)),
            shutdown_tx,
            task: Mutex::new(Some(task)),
        }
    }

    /// Creates a manager and awaits hydration: `new` + `load`.
    pub async fn open(store: Arc<dyn SnapshotStore>, config: ManagerConfig) -> ManagerResult<Self> {
        let manager = CartManager::new(store, config);
        manager.load().await?;
        Ok(manager)
    }

    // =========================================================================
    // Initialization
    // =========================================================================

    /// One-shot hydration from the snapshot store.
    ///
    /// ## Behavior
    /// - Key never written: the cart stays empty.
    /// - Snapshot present: decoded and installed as the in-memory state.
    /// - Unreadable storage or corrupt bytes: handled per the configured
    ///   [`CorruptionPolicy`] (fail with the evidence preserved, or warn
    ///   and start empty).
    ///
    /// ## Errors
    /// [`ManagerError::AlreadyLoaded`] on a second call: the cart is
    /// rebuilt from storage once per process lifetime and is the single
    /// source of truth afterwards.
    pub async fn load(&self) -> ManagerResult<()> {
        {
            let inner = self.lock_inner();
            if inner.closed {
                return Err(ManagerError::Closed);
            }
            if inner.loaded {
                return Err(ManagerError::AlreadyLoaded);
            }
        }

        let key = &self.config.storage_key;

        let bytes = match self.store.read(key).await {
            Ok(bytes) => bytes,
            Err(e) => match self.config.corruption_policy {
                CorruptionPolicy::ResetToEmpty => {
                    warn!(key = %key, error = %e, "Snapshot read failed; starting with an empty cart");
                    None
                }
                CorruptionPolicy::Preserve => return Err(ManagerError::Store(e)),
            },
        };

        let cart = match bytes {
            None => Cart::new(),
            Some(raw) => match snapshot::decode(&raw) {
                Ok(cart) => cart,
                Err(source) => match self.config.corruption_policy {
                    CorruptionPolicy::ResetToEmpty => {
                        warn!(
                            key = %key,
                            error = %source,
                            "Stored snapshot is corrupt; starting with an empty cart"
                        );
                        Cart::new()
                    }
                    CorruptionPolicy::Preserve => {
                        return Err(ManagerError::CorruptSnapshot {
                            key: key.clone(),
                            raw,
                            source,
                        });
                    }
                },
            },
        };

        let mut inner = self.lock_inner();
        if inner.loaded {
            return Err(ManagerError::AlreadyLoaded);
        }

        info!(key = %key, items = cart.len(), "Cart hydrated from storage");
        inner.cart = cart;
        inner.loaded = true;
        self.items_tx.send_replace(inner.cart.items().to_vec());

        Ok(())
    }

    /// Whether hydration has completed.
    pub fn is_loaded(&self) -> bool {
        self.lock_inner().loaded
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds an item to the cart.
    ///
    /// An existing entry with the same id gains quantity 1 (exactly as
    /// [`increment`](CartManager::increment) would); otherwise the item
    /// is appended with quantity 1. The in-memory update is visible to
    /// readers immediately; the snapshot write happens in the background.
    pub fn add_to_cart(&self, item: NewItem) -> ManagerResult<()> {
        debug!(id = %item.id(), "add_to_cart");
        self.mutate(|cart| {
            cart.add(item);
            Ok(())
        })
    }

    /// Increases the quantity of the entry with `id` by 1.
    ///
    /// ## Errors
    /// [`CartError::ItemNotFound`](marketcart_core::CartError::ItemNotFound)
    /// if no entry has that id; the cart is unchanged and nothing is
    /// persisted.
    pub fn increment(&self, id: &str) -> ManagerResult<()> {
        debug!(id = %id, "increment");
        self.mutate(|cart| cart.increment(id))
    }

    /// Decreases the quantity of the entry with `id` by 1, removing the
    /// entry entirely when the quantity would drop below 1.
    ///
    /// ## Errors
    /// [`CartError::ItemNotFound`](marketcart_core::CartError::ItemNotFound)
    /// if no entry has that id; the cart is unchanged and nothing is
    /// persisted.
    pub fn decrement(&self, id: &str) -> ManagerResult<()> {
        debug!(id = %id, "decrement");
        self.mutate(|cart| cart.decrement(id))
    }

    /// Removes every entry from the cart and persists the empty snapshot.
    pub fn clear(&self) -> ManagerResult<()> {
        debug!("clear");
        self.mutate(|cart| {
            cart.clear();
            Ok(())
        })
    }

    /// Applies a cart mutation and, on success, publishes the new state
    /// and enqueues the write-through snapshot.
    ///
    /// The state transition runs synchronously under the lock; channel
    /// publication happens after the lock is released.
    fn mutate<F>(&self, f: F) -> ManagerResult<()>
    where
        F: FnOnce(&mut Cart) -> Result<(), marketcart_core::CartError>,
    {
        let (items, pending) = {
            let mut inner = self.lock_inner();
            if !inner.loaded {
                return Err(ManagerError::NotLoaded);
            }
            if inner.closed {
                return Err(ManagerError::Closed);
            }

            // A failed mutation leaves the cart unchanged; nothing is
            // published or persisted for it.
            f(&mut inner.cart)?;

            inner.seq += 1;
            (
                inner.cart.items().to_vec(),
                PendingSnapshot {
                    seq: inner.seq,
                    cart: inner.cart.clone(),
                },
            )
        };

        self.items_tx.send_replace(items);
        self.snapshot_tx.send_replace(Some(pending));
        Ok(())
    }

    // =========================================================================
    // Consumer Access
    // =========================================================================

    /// The current cart entries, in insertion order.
    ///
    /// Any read after a mutation returns the post-mutation state.
    pub fn items(&self) -> ManagerResult<Vec<CartItem>> {
        let inner = self.lock_inner();
        if !inner.loaded {
            return Err(ManagerError::NotLoaded);
        }
        Ok(inner.cart.items().to_vec())
    }

    /// Subscribes to cart state. The receiver holds the current items and
    /// is notified after every mutation.
    pub fn subscribe(&self) -> ManagerResult<watch::Receiver<Vec<CartItem>>> {
        let inner = self.lock_inner();
        if !inner.loaded {
            return Err(ManagerError::NotLoaded);
        }
        Ok(self.items_tx.subscribe())
    }

    /// Claims the out-of-band persist-failure receiver.
    ///
    /// Returns `None` after the first call. Unclaimed failures are logged
    /// by the persister and dropped once the channel fills.
    pub fn persist_failures(&self) -> Option<mpsc::Receiver<PersistFailure>> {
        self.failure_rx
            .lock()
            .expect("failure receiver mutex poisoned")
            .take()
    }

    // =========================================================================
    // Shutdown
    // =========================================================================

    /// Waits until the write attempt for the newest snapshot has
    /// completed.
    ///
    /// Completion is not success: a failed write also resolves `flush`,
    /// with the failure reported on the failure channel.
    pub async fn flush(&self) -> ManagerResult<()> {
        let target = self.lock_inner().seq;
        if target == 0 {
            return Ok(());
        }

        let mut acked = self.acked_rx.clone();
        loop {
            if *acked.borrow_and_update() >= target {
                return Ok(());
            }
            acked
                .changed()
                .await
                .map_err(|_| ManagerError::PersisterStopped)?;
        }
    }

    /// Flushes the newest snapshot and stops the persister. Further
    /// mutations fail with [`ManagerError::Closed`]. Idempotent.
    pub async fn close(&self) -> ManagerResult<()> {
        let first_close = {
            let mut inner = self.lock_inner();
            !std::mem::replace(&mut inner.closed, true)
        };

        let flush_result = if first_close { self.flush().await } else { Ok(()) };

        if first_close {
            let _ = self.shutdown_tx.try_send(());
        }

        let task = self
            .task
            .lock()
            .expect("persister task mutex poisoned")
            .take();
        if let Some(task) = task {
            let _ = task.await;
        }

        flush_result
    }

    fn lock_inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("cart state mutex poisoned")
    }
}

impl std::fmt::Debug for CartManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartManager")
            .field("config", &self.config)
            .field("inner", &self.inner)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use marketcart_store::{MemoryStore, SnapshotStore, StoreError, StoreResult};

    fn new_item(id: &str) -> NewItem {
        NewItem::new(
            id,
            format!("Item {}", id),
            format!("https://cdn/{}.png", id),
            1000,
        )
        .expect("valid test item")
    }

    async fn open_with_memory() -> (Arc<MemoryStore>, CartManager) {
        let store = Arc::new(MemoryStore::new());
        let manager = CartManager::open(Arc::clone(&store) as Arc<dyn SnapshotStore>, ManagerConfig::default())
            .await
            .expect("open");
        (store, manager)
    }

    /// Store double with switchable read/write failures.
    struct FailingStore {
        inner: MemoryStore,
        fail_reads: bool,
        fail_writes: bool,
    }

    #[async_trait]
    impl SnapshotStore for FailingStore {
        async fn read(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
            if self.fail_reads {
                return Err(StoreError::QueryFailed("injected read failure".into()));
            }
            self.inner.read(key).await
        }

        async fn write(&self, key: &str, value: Vec<u8>) -> StoreResult<()> {
            if self.fail_writes {
                return Err(StoreError::QueryFailed("injected write failure".into()));
            }
            self.inner.write(key, value).await
        }
    }

    // -------------------------------------------------------------------------
    // Initialization
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_open_with_empty_storage_starts_empty() {
        let (_, manager) = open_with_memory().await;
        assert!(manager.is_loaded());
        assert!(manager.items().unwrap().is_empty());
        manager.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_cold_manager_rejects_cart_access() {
        let store = Arc::new(MemoryStore::new());
        let manager = CartManager::new(store, ManagerConfig::default());

        assert!(matches!(manager.items(), Err(ManagerError::NotLoaded)));
        assert!(matches!(manager.subscribe(), Err(ManagerError::NotLoaded)));
        assert!(matches!(
            manager.add_to_cart(new_item("A")),
            Err(ManagerError::NotLoaded)
        ));
        assert!(matches!(
            manager.increment("A"),
            Err(ManagerError::NotLoaded)
        ));
    }

    #[tokio::test]
    async fn test_second_load_is_rejected() {
        let (_, manager) = open_with_memory().await;
        assert!(matches!(
            manager.load().await,
            Err(ManagerError::AlreadyLoaded)
        ));
        manager.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_hydration_across_restart() {
        let store = Arc::new(MemoryStore::new());

        // First "process": fill the cart and shut down cleanly
        let manager = CartManager::open(
            Arc::clone(&store) as Arc<dyn SnapshotStore>,
            ManagerConfig::default(),
        )
        .await
        .unwrap();
        manager.add_to_cart(new_item("A")).unwrap();
        manager.add_to_cart(new_item("B")).unwrap();
        manager.increment("B").unwrap();
        manager.close().await.unwrap();

        // Second "process": hydrates the same state, same order
        let manager = CartManager::open(
            Arc::clone(&store) as Arc<dyn SnapshotStore>,
            ManagerConfig::default(),
        )
        .await
        .unwrap();
        let items = manager.items().unwrap();
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
        assert_eq!(items[1].quantity, 2);
        manager.close().await.unwrap();
    }

    // -------------------------------------------------------------------------
    // Mutation Scenarios
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_add_to_empty_cart() {
        let (_, manager) = open_with_memory().await;
        manager
            .add_to_cart(NewItem::new("A", "Shirt", "u", 1000).unwrap())
            .unwrap();

        let items = manager.items().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, "A");
        assert_eq!(items[0].quantity, 1);
        manager.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_add_existing_id_merges() {
        let (_, manager) = open_with_memory().await;
        manager.add_to_cart(new_item("A")).unwrap();
        manager.add_to_cart(new_item("A")).unwrap();

        let items = manager.items().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);
        manager.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_decrement_to_zero_removes_entry() {
        let (_, manager) = open_with_memory().await;
        manager.add_to_cart(new_item("A")).unwrap();

        manager.decrement("A").unwrap();
        assert!(manager.items().unwrap().is_empty());
        manager.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_decrement_above_one_keeps_entry() {
        let (_, manager) = open_with_memory().await;
        manager.add_to_cart(new_item("A")).unwrap();
        manager.increment("A").unwrap();
        manager.increment("A").unwrap();

        manager.decrement("A").unwrap();
        assert_eq!(manager.items().unwrap()[0].quantity, 2);
        manager.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_increment_missing_id_fails_and_persists_nothing() {
        let (store, manager) = open_with_memory().await;

        let err = manager.increment("A").unwrap_err();
        assert!(matches!(
            err,
            ManagerError::Cart(marketcart_core::CartError::ItemNotFound(_))
        ));
        assert!(manager.items().unwrap().is_empty());

        // No mutation was applied, so nothing was ever written
        manager.flush().await.unwrap();
        assert_eq!(store.read("marketcart:cart").await.unwrap(), None);
        manager.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_decrement_missing_id_fails() {
        let (_, manager) = open_with_memory().await;
        manager.add_to_cart(new_item("A")).unwrap();

        assert!(matches!(
            manager.decrement("B").unwrap_err(),
            ManagerError::Cart(marketcart_core::CartError::ItemNotFound(_))
        ));
        assert_eq!(manager.items().unwrap().len(), 1);
        manager.close().await.unwrap();
    }

    // -------------------------------------------------------------------------
    // Write-Through Persistence
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_write_through_persists_post_mutation_snapshot() {
        let (store, manager) = open_with_memory().await;
        manager.add_to_cart(new_item("A")).unwrap();
        manager.increment("A").unwrap();
        manager.flush().await.unwrap();

        let raw = store
            .read("marketcart:cart")
            .await
            .unwrap()
            .expect("snapshot written");
        let persisted = snapshot::decode(&raw).unwrap();
        assert_eq!(persisted.get("A").unwrap().quantity, 2);
        manager.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_burst_of_mutations_lands_on_newest_snapshot() {
        let (store, manager) = open_with_memory().await;

        for _ in 0..20 {
            manager.add_to_cart(new_item("A")).unwrap();
        }
        manager.add_to_cart(new_item("B")).unwrap();
        manager.decrement("B").unwrap();
        manager.flush().await.unwrap();

        let raw = store.read("marketcart:cart").await.unwrap().unwrap();
        let persisted = snapshot::decode(&raw).unwrap();
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted.get("A").unwrap().quantity, 20);
        manager.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_clear_persists_empty_snapshot() {
        let (store, manager) = open_with_memory().await;
        manager.add_to_cart(new_item("A")).unwrap();
        manager.clear().unwrap();
        manager.flush().await.unwrap();

        let raw = store.read("marketcart:cart").await.unwrap().unwrap();
        assert!(snapshot::decode(&raw).unwrap().is_empty());
        manager.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_write_failure_surfaces_out_of_band_and_memory_stays_authoritative() {
        let store = Arc::new(FailingStore {
            inner: MemoryStore::new(),
            fail_reads: false,
            fail_writes: true,
        });
        let manager = CartManager::open(store, ManagerConfig::default())
            .await
            .unwrap();
        let mut failures = manager.persist_failures().expect("first claim");

        // The mutation succeeds from the caller's perspective
        manager.add_to_cart(new_item("A")).unwrap();
        manager.flush().await.unwrap();

        let failure = failures.recv().await.expect("failure reported");
        assert_eq!(failure.seq, 1);
        assert_eq!(failure.key, "marketcart:cart");

        // In-memory state was not rolled back
        assert_eq!(manager.items().unwrap().len(), 1);
        manager.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_persist_failures_claimable_once() {
        let (_, manager) = open_with_memory().await;
        assert!(manager.persist_failures().is_some());
        assert!(manager.persist_failures().is_none());
        manager.close().await.unwrap();
    }

    // -------------------------------------------------------------------------
    // Load Failure Policy
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_corrupt_snapshot_preserve_fails_load_with_raw_bytes() {
        let store = Arc::new(MemoryStore::new());
        store
            .write("marketcart:cart", b"not a snapshot".to_vec())
            .await
            .unwrap();

        let err = CartManager::open(
            Arc::clone(&store) as Arc<dyn SnapshotStore>,
            ManagerConfig::default(),
        )
        .await
        .unwrap_err();

        match err {
            ManagerError::CorruptSnapshot { key, raw, .. } => {
                assert_eq!(key, "marketcart:cart");
                assert_eq!(raw, b"not a snapshot");
            }
            other => panic!("unexpected error: {other}"),
        }

        // The stored bytes were not wiped
        assert_eq!(
            store.read("marketcart:cart").await.unwrap(),
            Some(b"not a snapshot".to_vec())
        );
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_reset_policy_starts_empty() {
        let store = Arc::new(MemoryStore::new());
        store
            .write("marketcart:cart", b"not a snapshot".to_vec())
            .await
            .unwrap();

        let config = ManagerConfig::default().corruption_policy(CorruptionPolicy::ResetToEmpty);
        let manager = CartManager::open(Arc::clone(&store) as Arc<dyn SnapshotStore>, config)
            .await
            .unwrap();
        assert!(manager.items().unwrap().is_empty());

        // The first mutation overwrites the corrupt snapshot
        manager.add_to_cart(new_item("A")).unwrap();
        manager.flush().await.unwrap();
        let raw = store.read("marketcart:cart").await.unwrap().unwrap();
        assert!(snapshot::decode(&raw).is_ok());
        manager.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_read_failure_honors_policy() {
        let failing = || {
            Arc::new(FailingStore {
                inner: MemoryStore::new(),
                fail_reads: true,
                fail_writes: false,
            })
        };

        let err = CartManager::open(failing(), ManagerConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ManagerError::Store(_)));

        let config = ManagerConfig::default().corruption_policy(CorruptionPolicy::ResetToEmpty);
        let manager = CartManager::open(failing(), config).await.unwrap();
        assert!(manager.items().unwrap().is_empty());
        manager.close().await.unwrap();
    }

    // -------------------------------------------------------------------------
    // Subscribers and Shutdown
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_subscriber_observes_post_mutation_state() {
        let (_, manager) = open_with_memory().await;
        let mut rx = manager.subscribe().unwrap();
        assert!(rx.borrow().is_empty());

        manager.add_to_cart(new_item("A")).unwrap();
        rx.changed().await.unwrap();
        {
            let items = rx.borrow_and_update();
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].id, "A");
        }

        manager.decrement("A").unwrap();
        rx.changed().await.unwrap();
        assert!(rx.borrow_and_update().is_empty());
        manager.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_close_is_idempotent_and_rejects_later_mutations() {
        let (_, manager) = open_with_memory().await;
        manager.add_to_cart(new_item("A")).unwrap();

        manager.close().await.unwrap();
        manager.close().await.unwrap();

        assert!(matches!(
            manager.add_to_cart(new_item("B")),
            Err(ManagerError::Closed)
        ));
        // Reads still serve the final in-memory state
        assert_eq!(manager.items().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_close_flushes_pending_snapshot() {
        let store = Arc::new(MemoryStore::new());
        let manager = CartManager::open(
            Arc::clone(&store) as Arc<dyn SnapshotStore>,
            ManagerConfig::default(),
        )
        .await
        .unwrap();

        manager.add_to_cart(new_item("A")).unwrap();
        manager.close().await.unwrap();

        let raw = store.read("marketcart:cart").await.unwrap().unwrap();
        assert_eq!(snapshot::decode(&raw).unwrap().len(), 1);
    }
}
