//! # Write-Through Persister
//!
//! The single-writer task that owns the storage write path.
//!
//! ## Persistence Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                  Write-Through Persister Flow                       │
//! │                                                                     │
//! │  CartManager mutation                                               │
//! │       │  send_replace(PendingSnapshot { seq, cart })                │
//! │       ▼                                                             │
//! │  ┌──────────────────────────┐                                       │
//! │  │  watch channel (latest   │  a snapshot that is superseded        │
//! │  │  value only)             │  before the writer picks it up is     │
//! │  └────────────┬─────────────┘  simply never written                 │
//! │               ▼                                                     │
//! │  ┌──────────────────────────┐                                       │
//! │  │  Persister task          │  1. borrow_and_update latest          │
//! │  │  (one write in flight)   │  2. encode snapshot                   │
//! │  │                          │  3. store.write(key, bytes)           │
//! │  │                          │  4. publish acked seq (for flush)     │
//! │  └────────────┬─────────────┘                                       │
//! │               ▼                                                     │
//! │  failure? → tracing::warn + failure channel (out-of-band);          │
//! │             the in-memory cart is never rolled back                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Because only this task writes the snapshot key, and it only ever
//! observes the newest snapshot, completions cannot reorder an older
//! snapshot over a newer one.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, warn};

use marketcart_core::{snapshot, Cart};
use marketcart_store::SnapshotStore;

use crate::error::PersistError;

/// A sequenced snapshot queued for write-through.
#[derive(Debug, Clone)]
pub(crate) struct PendingSnapshot {
    /// Mutation sequence number, monotonically increasing per manager.
    pub(crate) seq: u64,

    /// The full cart state at that sequence.
    pub(crate) cart: Cart,
}

/// One failed write-through attempt.
///
/// Delivered on the manager's failure channel. The mutation that produced
/// the snapshot already succeeded in memory; this only reports that
/// durability lagged behind.
#[derive(Debug)]
pub struct PersistFailure {
    /// Sequence of the snapshot whose write failed.
    pub seq: u64,

    /// Storage key the write targeted.
    pub key: String,

    /// What went wrong.
    pub error: PersistError,
}

/// The background write-through task.
pub(crate) struct Persister {
    store: Arc<dyn SnapshotStore>,
    key: String,
    snapshot_rx: watch::Receiver<Option<PendingSnapshot>>,
    acked_tx: watch::Sender<u64>,
    failure_tx: mpsc::Sender<PersistFailure>,
    shutdown_rx: mpsc::Receiver<()>,
}

impl Persister {
    pub(crate) fn new(
        store: Arc<dyn SnapshotStore>,
        key: String,
        snapshot_rx: watch::Receiver<Option<PendingSnapshot>>,
        acked_tx: watch::Sender<u64>,
        failure_tx: mpsc::Sender<PersistFailure>,
        shutdown_rx: mpsc::Receiver<()>,
    ) -> Self {
        Persister {
            store,
            key,
            snapshot_rx,
            acked_tx,
            failure_tx,
            shutdown_rx,
        }
    }

    /// Runs the persister loop. Spawned as a background task by the
    /// manager; exits on shutdown signal or when the manager is dropped.
    pub(crate) async fn run(mut self) {
        debug!(key = %self.key, "Write-through persister starting");

        loop {
            tokio::select! {
                changed = self.snapshot_rx.changed() => {
                    match changed {
                        Ok(()) => self.persist_latest().await,
                        // Manager dropped; drain below and stop
                        Err(_) => break,
                    }
                }
                _ = self.shutdown_rx.recv() => break,
            }
        }

        // Drain: a snapshot published right before shutdown must still land
        self.persist_latest().await;

        debug!(key = %self.key, "Write-through persister stopped");
    }

    /// Writes the newest unwritten snapshot, if any.
    ///
    /// One attempt per sequence: success and failure both advance the
    /// acked sequence so `flush` never waits on a write that already ran.
    async fn persist_latest(&mut self) {
        let pending = {
            let borrowed = self.snapshot_rx.borrow_and_update();
            borrowed.clone()
        };
        let Some(snapshot) = pending else { return };

        if snapshot.seq <= *self.acked_tx.borrow() {
            return;
        }

        let result = match snapshot::encode(&snapshot.cart) {
            Ok(bytes) => self
                .store
                .write(&self.key, bytes)
                .await
                .map_err(PersistError::Store),
            Err(e) => Err(PersistError::Encode(e)),
        };

        match result {
            Ok(()) => {
                debug!(
                    seq = snapshot.seq,
                    items = snapshot.cart.len(),
                    "Snapshot persisted"
                );
            }
            Err(error) => {
                warn!(
                    seq = snapshot.seq,
                    key = %self.key,
                    error = %error,
                    "Snapshot write failed; in-memory cart remains authoritative"
                );

                let failure = PersistFailure {
                    seq: snapshot.seq,
                    key: self.key.clone(),
                    error,
                };
                if self.failure_tx.try_send(failure).is_err() {
                    debug!("Failure channel full or unclaimed; failure dropped after logging");
                }
            }
        }

        self.acked_tx.send_replace(snapshot.seq);
    }
}
