//! Application state shared across front-end components.

use std::sync::{Arc, RwLock};

use go_marketplace_core::Theme;
use tokio::sync::OnceCell;
use tracing::info;

use crate::cart::CartStore;
use crate::config::StorefrontConfig;
use crate::error::{AppError, Result};
use crate::storage::{FileStore, KeyValueStore};

/// Application state shared across all components.
///
/// This struct is cheaply cloneable via `Arc`. It is built once at startup
/// and handed to every component that needs the cart or the theme; the cart
/// is installed separately with [`provide_cart`](Self::provide_cart) because
/// loading it touches storage.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    cart: OnceCell<CartStore>,
    theme: RwLock<Theme>,
}

impl AppState {
    /// Create a new application state with no cart provided yet.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let theme = RwLock::new(config.theme);
        Self {
            inner: Arc::new(AppStateInner {
                config,
                cart: OnceCell::new(),
                theme,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Load the cart from `storage` and install it in this context.
    ///
    /// Concurrent calls are serialized: exactly one of them loads the cart,
    /// and storage is read only once.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Cart` if the stored cart cannot be read or decoded,
    /// and `AppError::CartAlreadyProvided` if a cart is already installed.
    pub async fn provide_cart(&self, storage: Arc<dyn KeyValueStore>) -> Result<&CartStore> {
        let mut loaded = false;
        let cart = self
            .inner
            .cart
            .get_or_try_init(|| {
                loaded = true;
                CartStore::load(storage, self.inner.config.cart_options())
            })
            .await?;
        if !loaded {
            return Err(AppError::CartAlreadyProvided);
        }

        info!(key = %self.inner.config.cart_key, "Cart provided");
        Ok(cart)
    }

    /// Load the cart from a [`FileStore`] in the configured storage directory.
    ///
    /// # Errors
    ///
    /// See [`provide_cart`](Self::provide_cart).
    pub async fn provide_file_cart(&self) -> Result<&CartStore> {
        let storage = FileStore::new(self.inner.config.storage_dir.clone());
        self.provide_cart(Arc::new(storage)).await
    }

    /// Get the cart.
    ///
    /// # Errors
    ///
    /// Returns `AppError::CartNotProvided` if no cart has been provided yet.
    pub fn cart(&self) -> Result<&CartStore> {
        self.inner
            .cart
            .get()
            .ok_or(AppError::CartNotProvided("AppState::cart"))
    }

    /// Current theme.
    #[must_use]
    pub fn theme(&self) -> Theme {
        *self
            .inner
            .theme
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Switch between the light and dark theme, returning the new theme.
    pub fn toggle_theme(&self) -> Theme {
        let mut theme = self
            .inner
            .theme
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let toggled = theme.toggled();
        *theme = toggled;
        info!(theme = %toggled, "Theme changed");
        toggled
    }
}
