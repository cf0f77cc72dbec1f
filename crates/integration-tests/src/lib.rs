//! Integration tests for Go Marketplace.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p go-marketplace-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - Cart behavior through the application context
//! - `cart_persistence` - Carts surviving restarts on file storage
//!
//! Shared fixtures live in this library so each test file stays focused on
//! its scenario.

use std::sync::Arc;

use go_marketplace_core::{CartLineItem, Price};
use go_marketplace_storefront::storage::{FileStore, KeyValueStore};
use go_marketplace_storefront::{AppState, StorefrontConfig};
use tempfile::TempDir;

/// A product as the catalog would hand it to the cart.
#[must_use]
pub fn product(id: &str, title: &str, cents: i64) -> CartLineItem {
    CartLineItem::new(
        id,
        title,
        format!("http://x/{id}.png"),
        Price::from_cents(cents),
    )
}

/// Application context rooted in a fresh temporary storage directory.
pub struct TestContext {
    pub dir: TempDir,
    pub state: AppState,
}

impl TestContext {
    /// Create a context with no cart provided.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let state = AppState::new(config_for(&dir));
        Self { dir, state }
    }

    /// Start a new session on the same storage directory, as a relaunch would.
    #[must_use]
    pub fn relaunch(&self) -> AppState {
        AppState::new(config_for(&self.dir))
    }

    /// The file store the context persists into.
    #[must_use]
    pub fn storage(&self) -> Arc<dyn KeyValueStore> {
        Arc::new(FileStore::new(self.dir.path()))
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

fn config_for(dir: &TempDir) -> StorefrontConfig {
    StorefrontConfig {
        storage_dir: dir.path().to_path_buf(),
        ..StorefrontConfig::default()
    }
}
