//! Go Marketplace Storefront library.
//!
//! Holds the shopping cart, the persistence gateways that mirror it to
//! local storage, and the application context front ends share.
//!
//! # Modules
//!
//! - [`cart`] - Cart store and its background writer
//! - [`storage`] - Key-value persistence gateways
//! - [`state`] - Application context handing out the cart and theme
//! - [`config`] - Environment configuration
//! - [`error`] - Application error type

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod error;
pub mod state;
pub mod storage;

pub use cart::{CartError, CartOptions, CartStore, PendingWrite};
pub use config::StorefrontConfig;
pub use error::AppError;
pub use state::AppState;
