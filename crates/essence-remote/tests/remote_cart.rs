//! Integration tests for the remote cart client against an in-process
//! mock of the cart API.

use std::sync::Arc;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use essence_remote::{RemoteCartStore, RemoteConfig, RemoteError, SharedSession};

// =============================================================================
// Mock Server
// =============================================================================

/// Binds the router on an ephemeral port and returns its origin URL.
async fn spawn_mock(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock listener");
    let addr = listener.local_addr().expect("mock local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve mock");
    });
    format!("http://{}", addr)
}

fn authed_store(base_url: &str) -> RemoteCartStore {
    let session = Arc::new(SharedSession::with_token("token-123"));
    RemoteCartStore::new(RemoteConfig::new(base_url), session).expect("build client")
}

fn server_cart_body() -> Value {
    json!({
        "items": [ {
            "id": 1,
            "quantity": 2,
            "total": 90000,
            "perfume_details": {
                "id": 7,
                "name": "Oud Royal",
                "price": 50000,
                "discount_price": 45000,
                "stock": 12,
                "brand": { "name": "Essence" },
                "images": [ { "image": "/media/oud.jpg" } ]
            }
        } ],
        "subtotal": 90000,
        "total_items": 2
    })
}

// =============================================================================
// Fetch
// =============================================================================

#[tokio::test]
async fn test_fetch_normalizes_server_cart() {
    let router = Router::new().route(
        "/api/orders/cart/my_cart/",
        get(|headers: HeaderMap| async move {
            assert_eq!(
                headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default(),
                "Bearer token-123"
            );
            Json(server_cart_body())
        }),
    );
    let base_url = spawn_mock(router).await;

    let cart = authed_store(&base_url).fetch().await.expect("fetch cart");

    assert!(!cart.is_guest);
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].product.name, "Oud Royal");
    assert_eq!(cart.items[0].product.brand, "Essence");
    assert_eq!(cart.items[0].product.image_url.as_deref(), Some("/media/oud.jpg"));
    // Server aggregate is trusted as-is.
    assert_eq!(cart.subtotal.minor(), 90_000);
    assert_eq!(cart.item_count, 2);
}

#[tokio::test]
async fn test_fetch_without_token_skips_the_network() {
    // Nothing is listening here; a missing token must fail before any
    // connection attempt.
    let session = Arc::new(SharedSession::new());
    let store =
        RemoteCartStore::new(RemoteConfig::new("http://127.0.0.1:1"), session).expect("build");

    let err = store.fetch().await.expect_err("must fail");
    assert!(matches!(err, RemoteError::AuthExpired));
}

// =============================================================================
// Error Mapping
// =============================================================================

#[tokio::test]
async fn test_unauthorized_maps_to_auth_expired() {
    let router = Router::new().route(
        "/api/orders/cart/my_cart/",
        get(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "detail": "Token expired" })),
            )
        }),
    );
    let base_url = spawn_mock(router).await;

    let err = authed_store(&base_url).fetch().await.expect_err("401");
    assert!(err.is_auth_expired());
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_server_message_is_surfaced() {
    let router = Router::new().route(
        "/api/orders/cart/add_item/",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "Insufficient stock" })),
            )
        }),
    );
    let base_url = spawn_mock(router).await;

    let err = authed_store(&base_url)
        .add_item(7, 99)
        .await
        .expect_err("400");

    match err {
        RemoteError::Server { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Insufficient stock");
        }
        other => panic!("expected Server error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connection_refused_is_retryable_network_error() {
    // Port 1 is never listening.
    let store = authed_store("http://127.0.0.1:1");

    let err = store.fetch().await.expect_err("refused");
    assert!(matches!(err, RemoteError::Network(_)));
    assert!(err.is_retryable());
}

// =============================================================================
// Mutations
// =============================================================================

#[tokio::test]
async fn test_add_item_posts_perfume_id_and_quantity() {
    let router = Router::new().route(
        "/api/orders/cart/add_item/",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body, json!({ "perfume_id": 7, "quantity": 2 }));
            Json(server_cart_body())
        }),
    );
    let base_url = spawn_mock(router).await;

    let cart = authed_store(&base_url).add_item(7, 2).await.expect("add");
    assert_eq!(cart.item_count, 2);
}

#[tokio::test]
async fn test_update_item_posts_item_id_and_quantity() {
    let router = Router::new().route(
        "/api/orders/cart/update_item/",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body, json!({ "item_id": 1, "quantity": 3 }));
            Json(server_cart_body())
        }),
    );
    let base_url = spawn_mock(router).await;

    authed_store(&base_url).update_item(1, 3).await.expect("update");
}

#[tokio::test]
async fn test_remove_item_echoes_the_removed_id() {
    // The endpoint answers success only; the id comes back so the caller
    // can filter its snapshot locally.
    let router = Router::new().route(
        "/api/orders/cart/remove_item/",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body, json!({ "item_id": 1 }));
            Json(json!({ "message": "Item removed" }))
        }),
    );
    let base_url = spawn_mock(router).await;

    let removed = authed_store(&base_url).remove_item(1).await.expect("remove");
    assert_eq!(removed, 1);
}

#[tokio::test]
async fn test_clear_posts_empty_body() {
    let router = Router::new().route(
        "/api/orders/cart/clear/",
        post(|Json(body): Json<Value>| async move {
            assert_eq!(body, json!({}));
            Json(json!({ "message": "Cart cleared" }))
        }),
    );
    let base_url = spawn_mock(router).await;

    authed_store(&base_url).clear().await.expect("clear");
}
