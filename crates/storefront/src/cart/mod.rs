//! Shopping cart store.
//!
//! The [`CartStore`] owns the authoritative list of line items for the
//! session and mirrors it into a [`KeyValueStore`] under a single key.
//!
//! # Updates
//!
//! Every mutation runs through one serialized update on a watch channel, so
//! it always reads the current list and no concurrent update is lost. The
//! mutation is visible to readers as soon as the call returns; the durable
//! write happens on a background task and is tracked by the returned
//! [`PendingWrite`].
//!
//! # Persisted Format
//!
//! A JSON array of line items:
//!
//! ```json
//! [{"id":"1","title":"Shirt","image_url":"http://x/1.png","price":29.9,"quantity":2}]
//! ```

mod error;
mod writer;

use std::sync::Arc;
use std::time::Duration;

use go_marketplace_core::{CartLineItem, CartSummary, ProductId};
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::storage::KeyValueStore;

pub use error::CartError;
pub use writer::{CartSnapshot, PendingWrite, WriteReport};

/// Storage key the cart is persisted under unless configured otherwise.
pub const DEFAULT_CART_KEY: &str = "@GoMarketPlace:cart";

/// Options for loading a [`CartStore`].
#[derive(Debug, Clone)]
pub struct CartOptions {
    /// Storage key holding the serialized cart.
    pub key: String,
    /// Delay before each write, letting rapid mutations coalesce.
    pub persist_debounce: Duration,
}

impl Default for CartOptions {
    fn default() -> Self {
        Self {
            key: DEFAULT_CART_KEY.to_owned(),
            persist_debounce: Duration::ZERO,
        }
    }
}

/// The session's shopping cart.
#[derive(Debug)]
pub struct CartStore {
    key: String,
    state: watch::Sender<CartSnapshot>,
    reports: watch::Receiver<WriteReport>,
}

impl CartStore {
    /// Load the cart from `storage` and start its background writer.
    ///
    /// A missing document yields an empty cart. Must be called from within a
    /// Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the read fails and
    /// `CartError::Malformed` if the stored document is not a list of line
    /// items. Neither is recovered from: the stored cart is left untouched.
    #[instrument(skip(storage, options), fields(key = %options.key))]
    pub async fn load(
        storage: Arc<dyn KeyValueStore>,
        options: CartOptions,
    ) -> Result<Self, CartError> {
        let items = match storage
            .get(&options.key)
            .await
            .map_err(|e| CartError::Storage(Arc::new(e)))?
        {
            Some(document) => decode(&document)?,
            None => Vec::new(),
        };
        info!(items = items.len(), "Loaded cart");

        let (state, snapshots) = watch::channel(CartSnapshot {
            version: 0,
            items: Arc::new(items),
        });
        let reports = writer::spawn(
            storage,
            options.key.clone(),
            snapshots,
            options.persist_debounce,
        );

        Ok(Self {
            key: options.key,
            state,
            reports,
        })
    }

    /// Storage key this cart is persisted under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current line items.
    #[must_use]
    pub fn items(&self) -> Arc<Vec<CartLineItem>> {
        Arc::clone(&self.state.borrow().items)
    }

    /// Current snapshot, including its version.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        self.state.borrow().clone()
    }

    /// Look up a single line item.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<CartLineItem> {
        self.state
            .borrow()
            .items
            .iter()
            .find(|item| &item.id == id)
            .cloned()
    }

    /// Item count and total of the current cart.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Summary` if the count or total is out of range.
    pub fn summary(&self) -> Result<CartSummary, CartError> {
        Ok(CartSummary::from_items(&self.state.borrow().items)?)
    }

    /// Receive a notification after every mutation.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.state.subscribe()
    }

    /// Add a product to the cart.
    ///
    /// If the product is already in the cart this is exactly
    /// [`increment`](Self::increment). Otherwise the item is appended with
    /// its quantity set to 1, whatever quantity it carried.
    #[instrument(skip(self, item), fields(id = %item.id))]
    pub fn add_to_cart(&self, item: CartLineItem) -> PendingWrite {
        self.mutate(move |items| {
            if items.iter().any(|existing| existing.id == item.id) {
                increment_in(items, &item.id);
            } else {
                debug!("Adding new line item");
                items.push(item.with_quantity(1));
            }
        })
    }

    /// Raise the quantity of the matching item by one.
    ///
    /// An unknown id leaves the items unchanged but still rewrites storage.
    /// A quantity already at `i64::MAX` stays there.
    #[instrument(skip(self), fields(id = %id))]
    pub fn increment(&self, id: &ProductId) -> PendingWrite {
        self.mutate(|items| increment_in(items, id))
    }

    /// Lower the quantity of the matching item by one.
    ///
    /// Applies whenever the current quantity is zero or more, so an item at
    /// zero drops to `-1`. Items are never removed.
    #[instrument(skip(self), fields(id = %id))]
    pub fn decrement(&self, id: &ProductId) -> PendingWrite {
        self.mutate(|items| {
            for item in items.iter_mut() {
                if &item.id == id && item.quantity >= 0 {
                    item.quantity -= 1;
                }
            }
        })
    }

    /// Wait until the latest mutation has been written.
    ///
    /// # Errors
    ///
    /// Returns the failure of the write covering the latest version.
    pub async fn flush(&self) -> Result<(), CartError> {
        let version = self.state.borrow().version;
        PendingWrite::new(version, self.reports.clone()).wait().await
    }

    fn mutate(&self, update: impl FnOnce(&mut Vec<CartLineItem>)) -> PendingWrite {
        let mut version = 0;
        self.state.send_modify(|snapshot| {
            update(Arc::make_mut(&mut snapshot.items));
            snapshot.version += 1;
            version = snapshot.version;
        });
        debug!(version, "Cart updated");
        PendingWrite::new(version, self.reports.clone())
    }
}

fn increment_in(items: &mut [CartLineItem], id: &ProductId) {
    for item in items.iter_mut().filter(|item| &item.id == id) {
        if item.quantity == i64::MAX {
            warn!(id = %item.id, "Quantity at maximum, not incremented");
        }
        item.quantity = item.quantity.saturating_add(1);
    }
}

fn decode(document: &str) -> Result<Vec<CartLineItem>, CartError> {
    serde_json::from_str(document).map_err(|e| CartError::Malformed(Arc::new(e)))
}
