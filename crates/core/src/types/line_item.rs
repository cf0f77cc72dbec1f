//! Cart line items.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// One product entry in the cart.
///
/// Field names match the persisted document format: `id`, `title`,
/// `image_url`, `price`, `quantity`.
///
/// `quantity` is signed. Decrementing an item that sits at zero yields `-1`
/// and zero-quantity items are kept in the cart; callers that need a floor
/// apply it themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub id: ProductId,
    pub title: String,
    pub image_url: String,
    pub price: Price,
    pub quantity: i64,
}

impl CartLineItem {
    /// Create a line item with a quantity of zero.
    ///
    /// The cart sets the quantity itself when the item is added.
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: Price,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price,
            quantity: 0,
        }
    }

    /// Builder-style quantity override.
    #[must_use]
    pub const fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Unit price multiplied by quantity, or `None` if the product does not
    /// fit in a [`Price`].
    #[must_use]
    pub fn line_total(&self) -> Option<Price> {
        self.price.checked_mul(self.quantity)
    }
}

/// Errors that can occur when summarizing a cart.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryError {
    /// The quantities add up to more than an `i64` holds.
    #[error("cart item count is out of range")]
    ItemCountOverflow,
    /// A line total or the cart total is out of range for a price.
    #[error("cart total is out of range")]
    TotalOverflow,
}

/// Aggregate figures for a cart, as shown in the floating cart badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CartSummary {
    /// Sum of all quantities.
    pub item_count: i64,
    /// Sum of all line totals.
    pub total: Price,
}

impl CartSummary {
    /// Summarize a list of line items.
    ///
    /// # Errors
    ///
    /// Returns a [`SummaryError`] if the item count or the total does not
    /// fit its type.
    pub fn from_items(items: &[CartLineItem]) -> Result<Self, SummaryError> {
        items.iter().try_fold(Self::default(), |summary, item| {
            let item_count = summary
                .item_count
                .checked_add(item.quantity)
                .ok_or(SummaryError::ItemCountOverflow)?;
            let total = item
                .line_total()
                .and_then(|line| summary.total.checked_add(line))
                .ok_or(SummaryError::TotalOverflow)?;
            Ok(Self { item_count, total })
        })
    }
}
