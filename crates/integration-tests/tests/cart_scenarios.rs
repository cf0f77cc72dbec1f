//! Integration tests for cart behavior through the application context.
//!
//! These tests drive the cart the way a front end does: build the context,
//! provide the cart, then mutate it through `AppState::cart()`.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use go_marketplace_core::{CartSummary, Price, ProductId};
use go_marketplace_integration_tests::{TestContext, product};
use go_marketplace_storefront::AppError;

// =============================================================================
// Context Access
// =============================================================================

#[tokio::test]
async fn test_cart_access_before_provider_is_programming_error() {
    let ctx = TestContext::new();
    let err = ctx.state.cart().unwrap_err();
    assert!(matches!(err, AppError::CartNotProvided(_)));
    assert!(err.to_string().contains("must be used within"));
}

// =============================================================================
// Operations
// =============================================================================

#[tokio::test]
async fn test_shopping_session() {
    let ctx = TestContext::new();
    let cart = ctx.state.provide_cart(ctx.storage()).await.unwrap();
    let a = ProductId::new("a");

    cart.add_to_cart(product("a", "Shirt", 2990)).wait().await.unwrap();
    assert_eq!(cart.items().len(), 1);
    assert_eq!(cart.get(&a).unwrap().quantity, 1);

    cart.increment(&a).wait().await.unwrap();
    assert_eq!(cart.get(&a).unwrap().quantity, 2);

    for expected in [1, 0, -1] {
        cart.decrement(&a).wait().await.unwrap();
        assert_eq!(cart.get(&a).unwrap().quantity, expected);
    }
    assert_eq!(cart.items().len(), 1);
}

#[tokio::test]
async fn test_adding_same_product_twice_keeps_one_entry() {
    let ctx = TestContext::new();
    let cart = ctx.state.provide_cart(ctx.storage()).await.unwrap();

    drop(cart.add_to_cart(product("a", "Shirt", 2990)));
    cart.add_to_cart(product("a", "Shirt", 2990)).wait().await.unwrap();

    let items = cart.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 2);
}

#[tokio::test]
async fn test_re_add_matches_increment() {
    let ctx = TestContext::new();
    let cart = ctx.state.provide_cart(ctx.storage()).await.unwrap();
    drop(cart.add_to_cart(product("a", "Shirt", 2990)));
    drop(cart.add_to_cart(product("b", "Cap", 1000)));

    drop(cart.add_to_cart(product("a", "Renamed", 1)));
    let via_add = cart.items();

    let other = TestContext::new();
    let reference = other.state.provide_cart(other.storage()).await.unwrap();
    drop(reference.add_to_cart(product("a", "Shirt", 2990)));
    drop(reference.add_to_cart(product("b", "Cap", 1000)));
    drop(reference.increment(&ProductId::new("a")));

    assert_eq!(*via_add, *reference.items());
}

#[tokio::test]
async fn test_distinct_products_each_added_once() {
    let ctx = TestContext::new();
    let cart = ctx.state.provide_cart(ctx.storage()).await.unwrap();

    let ids = ["1", "2", "3", "4", "5"];
    for id in ids {
        drop(cart.add_to_cart(product(id, "Item", 500)));
    }
    cart.flush().await.unwrap();

    let items = cart.items();
    assert_eq!(items.len(), ids.len());
    assert!(items.iter().all(|item| item.quantity == 1));
    assert_eq!(
        cart.summary().unwrap(),
        CartSummary {
            item_count: 5,
            total: Price::from_cents(2500),
        }
    );
}
