//! Background writer that mirrors cart snapshots into storage.
//!
//! Mutations publish a new [`CartSnapshot`] through a watch channel. A single
//! task consumes the channel and always writes the newest snapshot, so
//! durable writes land in mutation order and bursts of mutations collapse
//! into fewer writes. Each completed write is published as a [`WriteReport`]
//! that [`PendingWrite`] handles wait on.

use std::sync::Arc;
use std::time::Duration;

use go_marketplace_core::CartLineItem;
use tokio::sync::watch;
use tracing::{debug, error};

use super::CartError;
use crate::storage::KeyValueStore;

/// A versioned view of the cart contents.
#[derive(Debug, Clone, Default)]
pub struct CartSnapshot {
    /// Incremented by every mutation. The loaded cart is version 0.
    pub version: u64,
    /// Line items at this version.
    pub items: Arc<Vec<CartLineItem>>,
}

/// Progress of the background writer.
#[derive(Debug, Clone)]
pub struct WriteReport {
    /// Snapshot version of the most recent write attempt.
    pub version: u64,
    /// Highest snapshot version known to be in storage.
    pub persisted: u64,
    /// Whether the most recent write attempt succeeded.
    pub outcome: Result<(), CartError>,
}

impl WriteReport {
    /// Outcome for a mutation at `version`, or `None` while no write has
    /// covered it yet.
    ///
    /// Once storage holds `version` or a later one this is always `Ok`, so
    /// the answer never changes from success to failure.
    fn outcome_for(&self, version: u64) -> Option<Result<(), CartError>> {
        if self.persisted >= version {
            Some(Ok(()))
        } else if self.version >= version {
            Some(self.outcome.clone())
        } else {
            None
        }
    }
}

/// Handle to the durable write of one mutation.
///
/// Dropping the handle does not cancel the write.
#[derive(Debug, Clone)]
pub struct PendingWrite {
    version: u64,
    reports: watch::Receiver<WriteReport>,
}

impl PendingWrite {
    pub(super) fn new(version: u64, reports: watch::Receiver<WriteReport>) -> Self {
        Self { version, reports }
    }

    /// Cart version this handle waits for.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    /// Wait until storage holds this version of the cart or a later one.
    ///
    /// When several mutations are coalesced into one write, every handle up
    /// to that version receives the outcome of that write. A handle whose
    /// version is already in storage resolves `Ok` even if a later write
    /// failed.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Persist` or `CartError::Serialize` if the latest
    /// write covering this version failed and nothing newer is in storage,
    /// and `CartError::WriterStopped` if the writer exited first.
    pub async fn wait(mut self) -> Result<(), CartError> {
        let version = self.version;
        let waited = self
            .reports
            .wait_for(|report| report.outcome_for(version).is_some())
            .await
            .map(|report| report.outcome_for(version));

        match waited {
            Ok(Some(outcome)) => outcome,
            Ok(None) | Err(_) => self
                .reports
                .borrow()
                .outcome_for(version)
                .unwrap_or(Err(CartError::WriterStopped { version })),
        }
    }
}

/// Spawn the writer task for `key`.
///
/// The task runs until every sender of `snapshots` is dropped and the last
/// published snapshot has been written.
pub(super) fn spawn(
    storage: Arc<dyn KeyValueStore>,
    key: String,
    mut snapshots: watch::Receiver<CartSnapshot>,
    debounce: Duration,
) -> watch::Receiver<WriteReport> {
    let loaded = snapshots.borrow_and_update().version;
    let initial = WriteReport {
        version: loaded,
        persisted: loaded,
        outcome: Ok(()),
    };
    let (reports_tx, reports_rx) = watch::channel(initial);

    tokio::spawn(async move {
        let mut persisted = loaded;
        while snapshots.changed().await.is_ok() {
            if !debounce.is_zero() {
                tokio::time::sleep(debounce).await;
            }

            let snapshot = snapshots.borrow_and_update().clone();
            let outcome = write(storage.as_ref(), &key, &snapshot.items).await;
            match &outcome {
                Ok(()) => {
                    persisted = snapshot.version;
                    debug!(key = %key, version = snapshot.version, "Persisted cart");
                }
                Err(e) => error!(key = %key, version = snapshot.version, error = %e, "Failed to persist cart"),
            }

            reports_tx.send_replace(WriteReport {
                version: snapshot.version,
                persisted,
                outcome,
            });
        }
        debug!(key = %key, "Cart writer stopped");
    });

    reports_rx
}

async fn write(
    storage: &dyn KeyValueStore,
    key: &str,
    items: &[CartLineItem],
) -> Result<(), CartError> {
    let document = serde_json::to_string(items).map_err(|e| CartError::Serialize(Arc::new(e)))?;
    storage
        .set(key, document)
        .await
        .map_err(|e| CartError::Persist(Arc::new(e)))
}
