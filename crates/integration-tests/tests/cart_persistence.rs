//! Integration tests for carts surviving restarts on file storage.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::sync::Arc;

use async_trait::async_trait;
use go_marketplace_core::{CartLineItem, ProductId};
use go_marketplace_integration_tests::{TestContext, product};
use go_marketplace_storefront::storage::{KeyValueStore, MemoryStore, StorageError};
use go_marketplace_storefront::{AppError, CartError, CartOptions, CartStore};

const SHIRT_DOCUMENT: &str =
    r#"[{"id":"1","title":"Shirt","image_url":"http://x/1.png","price":29.9,"quantity":2}]"#;

#[tokio::test]
async fn test_cart_survives_relaunch() {
    let ctx = TestContext::new();
    {
        let cart = ctx.state.provide_file_cart().await.unwrap();
        drop(cart.add_to_cart(product("a", "Shirt", 2990)));
        drop(cart.add_to_cart(product("b", "Cap", 1000)));
        drop(cart.increment(&ProductId::new("b")));
        cart.flush().await.unwrap();
    }

    let relaunched = ctx.relaunch();
    let cart = relaunched.provide_file_cart().await.unwrap();

    let items = cart.items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].id, ProductId::new("a"));
    assert_eq!(items[0].quantity, 1);
    assert_eq!(items[1].quantity, 2);
}

#[tokio::test]
async fn test_round_trip_reproduces_document() {
    let ctx = TestContext::new();
    let storage = ctx.storage();
    storage
        .set("@GoMarketPlace:cart", SHIRT_DOCUMENT.to_owned())
        .await
        .unwrap();

    let original: Vec<CartLineItem> = serde_json::from_str(SHIRT_DOCUMENT).unwrap();
    let cart = ctx.state.provide_cart(storage.clone()).await.unwrap();
    assert_eq!(*cart.items(), original);

    // A no-op increment rewrites the document from memory.
    cart.increment(&ProductId::new("missing"))
        .wait()
        .await
        .unwrap();
    let rewritten = storage.get("@GoMarketPlace:cart").await.unwrap().unwrap();
    let reloaded: Vec<CartLineItem> = serde_json::from_str(&rewritten).unwrap();
    assert_eq!(reloaded, original);
}

#[tokio::test]
async fn test_last_write_wins_in_mutation_order() {
    let storage = Arc::new(MemoryStore::new());
    let cart = CartStore::load(storage.clone(), CartOptions::default())
        .await
        .unwrap();

    let writes: Vec<_> = (0..20)
        .map(|_| cart.add_to_cart(product("a", "Shirt", 2990)))
        .collect();
    for write in writes {
        write.wait().await.unwrap();
    }

    let document = storage.get("@GoMarketPlace:cart").await.unwrap().unwrap();
    let stored: Vec<CartLineItem> = serde_json::from_str(&document).unwrap();
    assert_eq!(stored[0].quantity, 20);
}

#[tokio::test]
async fn test_malformed_document_fails_startup() {
    let ctx = TestContext::new();
    let storage = ctx.storage();
    storage
        .set("@GoMarketPlace:cart", r#"{"id":"1"}"#.to_owned())
        .await
        .unwrap();

    let err = ctx.state.provide_cart(storage.clone()).await.unwrap_err();
    assert!(matches!(err, AppError::Cart(CartError::Malformed(_))));

    // The stored document is left for inspection.
    assert_eq!(
        storage.get("@GoMarketPlace:cart").await.unwrap().as_deref(),
        Some(r#"{"id":"1"}"#)
    );
}

struct ReadOnlyStore(MemoryStore);

#[async_trait]
impl KeyValueStore for ReadOnlyStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.0.get(key).await
    }

    async fn set(&self, _key: &str, _value: String) -> Result<(), StorageError> {
        Err(StorageError::Unavailable("read-only".to_owned()))
    }
}

#[tokio::test]
async fn test_write_failure_keeps_memory_state() {
    let storage = Arc::new(ReadOnlyStore(MemoryStore::with_entry(
        "@GoMarketPlace:cart",
        SHIRT_DOCUMENT,
    )));
    let cart = CartStore::load(storage, CartOptions::default())
        .await
        .unwrap();

    let write = cart.increment(&ProductId::new("1"));
    assert_eq!(cart.get(&ProductId::new("1")).unwrap().quantity, 3);

    let err = write.wait().await.unwrap_err();
    assert!(matches!(err, CartError::Persist(_)));
    assert!(err.to_string().contains("read-only"));
}

#[tokio::test]
async fn test_writer_outlives_store_until_last_snapshot() {
    let storage = Arc::new(MemoryStore::new());
    let write = {
        let cart = CartStore::load(storage.clone(), CartOptions::default())
            .await
            .unwrap();
        cart.add_to_cart(product("a", "Shirt", 2990))
    };

    write.wait().await.unwrap();
    assert!(storage.get("@GoMarketPlace:cart").await.unwrap().is_some());
}
