//! Core types for Go Marketplace.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod line_item;
pub mod price;
pub mod theme;

pub use id::*;
pub use line_item::{CartLineItem, CartSummary, SummaryError};
pub use price::{Price, PriceError};
pub use theme::{Palette, StatusBarStyle, Theme, ThemeParseError};
