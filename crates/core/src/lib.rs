//! Go Marketplace Core - Shared types library.
//!
//! This crate provides common types used across all Go Marketplace components:
//! - `storefront` - Cart store, persistence gateways and application context
//! - `cli` - Command-line front end for driving a local cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no async
//! runtime. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product IDs, prices, cart line items and themes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
