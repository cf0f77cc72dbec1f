//! Persistence gateways: asynchronous string key-value storage.
//!
//! The cart store mirrors its state into a [`KeyValueStore`]. The store is a
//! passive collaborator: it holds whatever document it was last given under
//! a key and hands it back on request.
//!
//! # Implementations
//!
//! - [`MemoryStore`] - Process-local map, for tests and throwaway sessions
//! - [`FileStore`] - One file per key inside a storage directory

mod file;
mod memory;

use async_trait::async_trait;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors returned by a persistence gateway.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key cannot be mapped onto the backing storage.
    #[error("invalid storage key: {0:?}")]
    InvalidKey(String),

    /// The backing storage cannot currently be used.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Asynchronous key-value storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    /// Read the value stored under `key`, or `None` if nothing was stored.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;
}
