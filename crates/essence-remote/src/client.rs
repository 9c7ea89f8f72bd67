//! # Remote Cart Client
//!
//! Typed wrapper over the server cart endpoints.
//!
//! ## Endpoint Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Cart API (all require Bearer auth)                 │
//! │                                                                         │
//! │  fetch()         GET  /api/orders/cart/my_cart/      → full cart       │
//! │  add_item()      POST /api/orders/cart/add_item/     → full cart       │
//! │  update_item()   POST /api/orders/cart/update_item/  → full cart       │
//! │  remove_item()   POST /api/orders/cart/remove_item/  → removed id ONLY │
//! │  clear()         POST /api/orders/cart/clear/        → (empty)         │
//! │                                                                         │
//! │  remove_item is asymmetric by backend contract: the caller filters     │
//! │  its snapshot locally and recomputes the aggregate.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The server is authoritative: add/update perform their own stock checks
//! and return the updated cart. The client never assumes success before
//! the response resolves, and never retries on its own.

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde_json::json;
use tracing::debug;

use essence_core::cart::Cart;
use essence_core::wire::{normalize_cart, WireCart};

use crate::error::{RemoteError, RemoteResult};
use crate::session::Session;

// =============================================================================
// Endpoint Paths
// =============================================================================

const MY_CART_PATH: &str = "/api/orders/cart/my_cart/";
const ADD_ITEM_PATH: &str = "/api/orders/cart/add_item/";
const UPDATE_ITEM_PATH: &str = "/api/orders/cart/update_item/";
const REMOVE_ITEM_PATH: &str = "/api/orders/cart/remove_item/";
const CLEAR_PATH: &str = "/api/orders/cart/clear/";

// =============================================================================
// Configuration
// =============================================================================

/// Remote cart client configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = RemoteConfig::new("https://api.essence.example")
///     .timeout(Duration::from_secs(10));
/// ```
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// API origin, e.g. `"https://api.essence.example"`. Trailing slashes
    /// are stripped so endpoint paths can be appended directly.
    pub base_url: String,

    /// Per-request timeout.
    /// Default: 30 seconds
    pub timeout: Duration,
}

impl RemoteConfig {
    /// Creates a configuration for the given API origin.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url: String = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        RemoteConfig {
            base_url,
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// =============================================================================
// Remote Cart Store
// =============================================================================

/// Client for the server cart; the authoritative store for authenticated
/// sessions.
pub struct RemoteCartStore {
    config: RemoteConfig,
    session: Arc<dyn Session>,
    http: Client,
}

impl RemoteCartStore {
    /// Creates a client with a shared connection pool.
    pub fn new(config: RemoteConfig, session: Arc<dyn Session>) -> RemoteResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RemoteError::InvalidConfig(e.to_string()))?;

        Ok(RemoteCartStore {
            config,
            session,
            http,
        })
    }

    /// Fetches the current user's cart.
    pub async fn fetch(&self) -> RemoteResult<Cart> {
        debug!("Fetching remote cart");
        let response = self.send(self.http.get(self.url(MY_CART_PATH))).await?;
        self.decode_cart(response).await
    }

    /// Adds `quantity` units of a perfume; the server merges quantities if
    /// the product is already in the cart and validates stock itself.
    ///
    /// Returns the authoritative updated cart.
    pub async fn add_item(&self, perfume_id: i64, quantity: i64) -> RemoteResult<Cart> {
        debug!(perfume_id, quantity, "Adding item to remote cart");
        let response = self
            .send(
                self.http
                    .post(self.url(ADD_ITEM_PATH))
                    .json(&json!({ "perfume_id": perfume_id, "quantity": quantity })),
            )
            .await?;
        self.decode_cart(response).await
    }

    /// Sets the quantity of an existing cart item.
    ///
    /// Returns the authoritative updated cart.
    pub async fn update_item(&self, item_id: i64, quantity: i64) -> RemoteResult<Cart> {
        debug!(item_id, quantity, "Updating remote cart item");
        let response = self
            .send(
                self.http
                    .post(self.url(UPDATE_ITEM_PATH))
                    .json(&json!({ "item_id": item_id, "quantity": quantity })),
            )
            .await?;
        self.decode_cart(response).await
    }

    /// Removes a cart item.
    ///
    /// The endpoint returns no cart, only success; the removed id is echoed
    /// back so the caller can filter its snapshot and recompute the
    /// aggregate locally.
    pub async fn remove_item(&self, item_id: i64) -> RemoteResult<i64> {
        debug!(item_id, "Removing remote cart item");
        self.send(
            self.http
                .post(self.url(REMOVE_ITEM_PATH))
                .json(&json!({ "item_id": item_id })),
        )
        .await?;
        Ok(item_id)
    }

    /// Empties the server cart. The caller resets its snapshot to the
    /// canonical empty shape.
    pub async fn clear(&self) -> RemoteResult<()> {
        debug!("Clearing remote cart");
        self.send(self.http.post(self.url(CLEAR_PATH)).json(&json!({})))
            .await?;
        Ok(())
    }

    // =========================================================================
    // Request Plumbing
    // =========================================================================

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Attaches the bearer token, sends, and maps failures onto the error
    /// taxonomy. A missing token short-circuits to `AuthExpired` without a
    /// network round trip.
    async fn send(&self, builder: RequestBuilder) -> RemoteResult<Response> {
        let token = self
            .session
            .current_token()
            .ok_or(RemoteError::AuthExpired)?;

        let response = builder
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| RemoteError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(RemoteError::AuthExpired);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Server {
                status: status.as_u16(),
                message: extract_message(&body),
            });
        }

        Ok(response)
    }

    async fn decode_cart(&self, response: Response) -> RemoteResult<Cart> {
        let wire: WireCart = response
            .json()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))?;
        Ok(normalize_cart(&wire, false))
    }
}

/// Pulls the user-facing message out of an error payload.
///
/// The backend answers with `{"message": ...}`; its framework-level
/// rejections use `{"detail": ...}`. Anything else is surfaced raw.
fn extract_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for field in ["message", "detail"] {
            if let Some(message) = value.get(field).and_then(|v| v.as_str()) {
                return message.to_string();
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "request failed".to_string()
    } else {
        trimmed.to_string()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let config = RemoteConfig::new("https://api.essence.example/");
        assert_eq!(config.base_url, "https://api.essence.example");

        let config = RemoteConfig::new("https://api.essence.example");
        assert_eq!(config.base_url, "https://api.essence.example");
    }

    #[test]
    fn test_extract_message_variants() {
        assert_eq!(
            extract_message(r#"{"message": "Insufficient stock"}"#),
            "Insufficient stock"
        );
        assert_eq!(
            extract_message(r#"{"detail": "Not found."}"#),
            "Not found."
        );
        assert_eq!(extract_message("plain text error"), "plain text error");
        assert_eq!(extract_message(""), "request failed");
    }
}
