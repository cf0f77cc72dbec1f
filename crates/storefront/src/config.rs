//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `GO_MARKETPLACE_STORAGE_DIR` - Directory for persisted documents (default: .go-marketplace)
//! - `GO_MARKETPLACE_CART_KEY` - Storage key of the cart document (default: @GoMarketPlace:cart)
//! - `GO_MARKETPLACE_PERSIST_DEBOUNCE_MS` - Delay before each cart write (default: 0)
//! - `GO_MARKETPLACE_THEME` - Initial theme, `light` or `dark` (default: light)

use std::path::PathBuf;
use std::time::Duration;

use go_marketplace_core::Theme;
use thiserror::Error;

use crate::cart::{CartOptions, DEFAULT_CART_KEY};

const DEFAULT_STORAGE_DIR: &str = ".go-marketplace";

/// Upper bound on the write debounce.
const MAX_PERSIST_DEBOUNCE_MS: u64 = 10_000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory the file store writes into
    pub storage_dir: PathBuf,
    /// Storage key of the cart document
    pub cart_key: String,
    /// Delay before each cart write
    pub persist_debounce: Duration,
    /// Theme the shell starts with
    pub theme: Theme,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(DEFAULT_STORAGE_DIR),
            cart_key: DEFAULT_CART_KEY.to_owned(),
            persist_debounce: Duration::ZERO,
            theme: Theme::default(),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage_dir = PathBuf::from(get_or_default(
            &lookup,
            "GO_MARKETPLACE_STORAGE_DIR",
            DEFAULT_STORAGE_DIR,
        ));

        let cart_key = get_or_default(&lookup, "GO_MARKETPLACE_CART_KEY", DEFAULT_CART_KEY);
        if cart_key.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "GO_MARKETPLACE_CART_KEY".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let debounce_ms = get_or_default(&lookup, "GO_MARKETPLACE_PERSIST_DEBOUNCE_MS", "0")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar(
                    "GO_MARKETPLACE_PERSIST_DEBOUNCE_MS".to_string(),
                    e.to_string(),
                )
            })?;
        if debounce_ms > MAX_PERSIST_DEBOUNCE_MS {
            return Err(ConfigError::InvalidEnvVar(
                "GO_MARKETPLACE_PERSIST_DEBOUNCE_MS".to_string(),
                format!("must be at most {MAX_PERSIST_DEBOUNCE_MS}"),
            ));
        }

        let theme = get_or_default(&lookup, "GO_MARKETPLACE_THEME", "light")
            .parse::<Theme>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("GO_MARKETPLACE_THEME".to_string(), e.to_string())
            })?;

        Ok(Self {
            storage_dir,
            cart_key,
            persist_debounce: Duration::from_millis(debounce_ms),
            theme,
        })
    }

    /// Options for loading the cart store.
    #[must_use]
    pub fn cart_options(&self) -> CartOptions {
        CartOptions {
            key: self.cart_key.clone(),
            persist_debounce: self.persist_debounce,
        }
    }
}

/// Get a variable with a default value.
fn get_or_default(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> String {
    lookup(key).unwrap_or_else(|| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.storage_dir, PathBuf::from(".go-marketplace"));
        assert_eq!(config.cart_key, "@GoMarketPlace:cart");
        assert_eq!(config.persist_debounce, Duration::ZERO);
        assert_eq!(config.theme, Theme::Light);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("GO_MARKETPLACE_STORAGE_DIR", "/var/lib/gm"),
            ("GO_MARKETPLACE_CART_KEY", "@Test:cart"),
            ("GO_MARKETPLACE_PERSIST_DEBOUNCE_MS", "250"),
            ("GO_MARKETPLACE_THEME", "dark"),
        ])
        .unwrap();

        assert_eq!(config.storage_dir, PathBuf::from("/var/lib/gm"));
        assert_eq!(config.persist_debounce, Duration::from_millis(250));
        assert_eq!(config.theme, Theme::Dark);

        let options = config.cart_options();
        assert_eq!(options.key, "@Test:cart");
        assert_eq!(options.persist_debounce, Duration::from_millis(250));
    }

    #[test]
    fn test_invalid_debounce() {
        let err = load(&[("GO_MARKETPLACE_PERSIST_DEBOUNCE_MS", "soon")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref name, _) if name == "GO_MARKETPLACE_PERSIST_DEBOUNCE_MS"));
    }

    #[test]
    fn test_debounce_too_long() {
        assert!(load(&[("GO_MARKETPLACE_PERSIST_DEBOUNCE_MS", "60000")]).is_err());
    }

    #[test]
    fn test_invalid_theme() {
        let err = load(&[("GO_MARKETPLACE_THEME", "neon")]).unwrap_err();
        assert!(err.to_string().contains("GO_MARKETPLACE_THEME"));
    }

    #[test]
    fn test_empty_cart_key() {
        assert!(load(&[("GO_MARKETPLACE_CART_KEY", "  ")]).is_err());
    }
}
