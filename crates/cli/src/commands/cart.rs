//! Cart commands.
//!
//! Every mutation waits for its write to reach storage before printing the
//! resulting cart, so the process can exit right after.

use go_marketplace_core::{CartLineItem, CartSummary, Price, ProductId};
use go_marketplace_storefront::{AppError, AppState};
use tracing::info;

use super::OutputFormat;

/// Errors from cart commands.
#[derive(Debug, thiserror::Error)]
pub enum CartCommandError {
    #[error(transparent)]
    App(#[from] AppError),

    #[error("failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

/// Print every line item.
///
/// # Errors
///
/// Returns an error if the cart has not been provided or output encoding fails.
pub fn list(state: &AppState, format: OutputFormat) -> Result<(), CartCommandError> {
    let items = state.cart()?.items();
    print_items(&items, format)
}

/// Print the item count and total.
///
/// # Errors
///
/// Returns an error if the cart has not been provided, its figures are out
/// of range, or output encoding fails.
pub fn summary(state: &AppState, format: OutputFormat) -> Result<(), CartCommandError> {
    let summary = state.cart()?.summary().map_err(AppError::from)?;
    print_summary(summary, format)
}

/// Add a product and print the cart.
///
/// # Errors
///
/// Returns an error if the write to storage fails.
pub async fn add(
    state: &AppState,
    format: OutputFormat,
    id: &str,
    title: &str,
    image_url: &str,
    price: Price,
) -> Result<(), CartCommandError> {
    let cart = state.cart()?;
    cart.add_to_cart(CartLineItem::new(id, title, image_url, price))
        .wait()
        .await
        .map_err(AppError::from)?;
    info!(id, "Added to cart");
    list(state, format)
}

/// Increment a product's quantity and print the cart.
///
/// # Errors
///
/// Returns an error if the write to storage fails.
pub async fn increment(
    state: &AppState,
    format: OutputFormat,
    id: &str,
) -> Result<(), CartCommandError> {
    let cart = state.cart()?;
    let id = ProductId::new(id);
    if cart.get(&id).is_none() {
        tracing::warn!(id = %id, "Product is not in the cart");
    }
    cart.increment(&id).wait().await.map_err(AppError::from)?;
    list(state, format)
}

/// Decrement a product's quantity and print the cart.
///
/// # Errors
///
/// Returns an error if the write to storage fails.
pub async fn decrement(
    state: &AppState,
    format: OutputFormat,
    id: &str,
) -> Result<(), CartCommandError> {
    let cart = state.cart()?;
    let id = ProductId::new(id);
    if cart.get(&id).is_none() {
        tracing::warn!(id = %id, "Product is not in the cart");
    }
    cart.decrement(&id).wait().await.map_err(AppError::from)?;
    list(state, format)
}

#[allow(clippy::print_stdout)]
fn print_items(items: &[CartLineItem], format: OutputFormat) -> Result<(), CartCommandError> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(items)?),
        OutputFormat::Text => {
            if items.is_empty() {
                println!("Cart is empty");
            }
            for item in items {
                println!("{}", format_line(item));
            }
        }
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_summary(summary: CartSummary, format: OutputFormat) -> Result<(), CartCommandError> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Text => println!("{} items, total {}", summary.item_count, summary.total),
    }
    Ok(())
}

fn format_line(item: &CartLineItem) -> String {
    let total = item
        .line_total()
        .map_or_else(|| "out of range".to_owned(), |total| total.to_string());
    format!(
        "{:>4} x {} ({}) @ {} = {total}",
        item.quantity, item.title, item.id, item.price,
    )
}
