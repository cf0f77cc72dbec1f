//! Unified error handling.
//!
//! Provides a unified `AppError` type for everything that goes through the
//! application context. Front ends should return `Result<T, AppError>`.

use thiserror::Error;

use crate::cart::CartError;
use crate::config::ConfigError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Cart operation failed.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// The cart was requested before one was provided to the context.
    #[error("{0} must be used within a context that has a cart provided")]
    CartNotProvided(&'static str),

    /// A cart was provided to a context that already has one.
    #[error("a cart has already been provided to this context")]
    CartAlreadyProvided,
}

impl AppError {
    /// Returns true for errors caused by calling the context incorrectly
    /// rather than by storage or data problems.
    #[must_use]
    pub const fn is_programming_error(&self) -> bool {
        matches!(self, Self::CartNotProvided(_) | Self::CartAlreadyProvided)
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
