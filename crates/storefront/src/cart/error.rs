//! Cart store errors.

use std::sync::Arc;

use go_marketplace_core::SummaryError;
use thiserror::Error;

use crate::storage::StorageError;

/// Errors produced by the cart store.
///
/// Sources are reference-counted so one write outcome can be handed to every
/// caller waiting on it.
#[derive(Debug, Clone, Error)]
pub enum CartError {
    /// Reading the persisted cart failed.
    #[error("failed to read persisted cart: {0}")]
    Storage(#[source] Arc<StorageError>),

    /// The persisted cart document could not be decoded.
    #[error("persisted cart is malformed: {0}")]
    Malformed(#[source] Arc<serde_json::Error>),

    /// The cart could not be encoded for storage.
    #[error("failed to encode cart: {0}")]
    Serialize(#[source] Arc<serde_json::Error>),

    /// Writing the cart to storage failed.
    #[error("failed to persist cart: {0}")]
    Persist(#[source] Arc<StorageError>),

    /// The cart's figures do not fit their types.
    #[error("cannot summarize cart: {0}")]
    Summary(#[from] SummaryError),

    /// The background writer ended before the requested version was written.
    #[error("cart writer stopped before version {version} was persisted")]
    WriterStopped {
        /// Cart version the caller was waiting on.
        version: u64,
    },
}

impl CartError {
    /// Returns true if the error comes from reading or decoding the stored
    /// cart at startup.
    #[must_use]
    pub const fn is_load_error(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Malformed(_))
    }
}
