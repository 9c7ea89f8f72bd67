//! # Guest Cart Store
//!
//! Durable cart state for unauthenticated sessions.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Guest Cart Operations                                │
//! │                                                                         │
//! │  UI Intent              GuestCartStore            Effect                │
//! │  ─────────              ──────────────            ──────                │
//! │                                                                         │
//! │  Add product ──────────► add_item() ────────────► merge or append      │
//! │  Change quantity ──────► update_item() ─────────► set qty (0 removes)  │
//! │  Remove line ──────────► remove_item() ─────────► filter by id         │
//! │  Clear ────────────────► clear() ───────────────► canonical empty cart │
//! │                                                                         │
//! │  Every mutation: lock → mutate in memory → recompute aggregate →       │
//! │  best-effort persist → return snapshot.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Source of Truth
//! The in-memory cart behind the mutex is authoritative for the session.
//! Persistence under `perfumes_guest_cart` is best-effort: failures are
//! logged and swallowed, a corrupt stored document loads as an empty cart.
//! The mutex also serializes mutations, so a rapid double-click cannot
//! interleave a stale load with a newer save within this process. Two
//! separate processes over the same database still race (last write wins).
//!
//! ## Stock Validation
//! None here. The caller (CartService) validates quantity against stock
//! before invoking this store, matching the remote store's contract where
//! the server validates.

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use essence_core::cart::{Cart, CartItem, ItemSource};
use essence_core::product::ProductSnapshot;
use essence_core::wire::{normalize_item, to_wire_cart, WireCart};

use crate::error::StoreResult;
use crate::local::LocalStore;

/// Fixed storage key of the guest cart document.
///
/// Shared with the original web client so both read the same cart.
pub const GUEST_CART_KEY: &str = "perfumes_guest_cart";

/// Durable cart store for unauthenticated sessions.
pub struct GuestCartStore {
    store: LocalStore,
    /// Session-authoritative cart. The lock serializes mutations.
    cart: Mutex<Cart>,
}

impl GuestCartStore {
    /// Opens the guest cart store, loading any persisted cart.
    ///
    /// A missing document, an unreadable store, or corrupt JSON all load
    /// as the canonical empty cart; none of them is fatal.
    pub async fn open(store: LocalStore) -> Self {
        let cart = Self::load_persisted(&store).await;
        GuestCartStore {
            store,
            cart: Mutex::new(cart),
        }
    }

    /// Returns the current guest cart snapshot.
    pub async fn load(&self) -> Cart {
        self.cart.lock().await.clone()
    }

    /// Adds a product to the cart, merging with an existing line.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity is incremented (merge semantics,
    ///   matching the server's behavior on add)
    /// - Otherwise: a new line is appended with a locally generated
    ///   millisecond-timestamp id and a snapshot of the product
    ///
    /// No stock validation happens here; validate first.
    pub async fn add_item(&self, product: &ProductSnapshot, quantity: i64) -> Cart {
        let mut cart = self.cart.lock().await;

        if let Some(item) = cart.items.iter_mut().find(|i| i.product.id == product.id) {
            item.quantity += quantity;
        } else {
            let id = next_local_id(&cart);
            cart.items.push(CartItem {
                id,
                product: product.clone(),
                quantity,
                server_total: None,
                source: ItemSource::Guest,
            });
        }

        cart.recompute();
        self.persist(&cart).await;
        cart.clone()
    }

    /// Updates the quantity of a line.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: the line is removed entirely (deliberate: zero is
    ///   "remove", not an error)
    /// - Unknown `item_id`: no-op, the unchanged cart is returned
    pub async fn update_item(&self, item_id: i64, quantity: i64) -> Cart {
        if quantity <= 0 {
            return self.remove_item(item_id).await;
        }

        let mut cart = self.cart.lock().await;
        if let Some(item) = cart.items.iter_mut().find(|i| i.id == item_id) {
            item.quantity = quantity;
            cart.recompute();
            self.persist(&cart).await;
        } else {
            debug!(item_id, "Update for unknown guest cart item ignored");
        }
        cart.clone()
    }

    /// Removes a line by id. Unknown ids are a no-op.
    pub async fn remove_item(&self, item_id: i64) -> Cart {
        let mut cart = self.cart.lock().await;
        let before = cart.items.len();
        cart.items.retain(|i| i.id != item_id);

        if cart.items.len() != before {
            cart.recompute();
            self.persist(&cart).await;
        } else {
            debug!(item_id, "Remove for unknown guest cart item ignored");
        }
        cart.clone()
    }

    /// Resets the cart to the canonical empty shape.
    pub async fn clear(&self) -> Cart {
        let mut cart = self.cart.lock().await;
        *cart = Cart::empty(true);
        self.persist(&cart).await;
        cart.clone()
    }

    // =========================================================================
    // Persistence (best-effort)
    // =========================================================================

    /// Writes the cart document. Failures are logged, never propagated:
    /// the in-memory cart carries the session through storage outages.
    async fn persist(&self, cart: &Cart) {
        if let Err(error) = self.try_persist(cart).await {
            warn!(%error, "Failed to persist guest cart; keeping in-memory state");
        }
    }

    async fn try_persist(&self, cart: &Cart) -> StoreResult<()> {
        let document = serde_json::to_string(&to_wire_cart(cart))?;
        self.store.put(GUEST_CART_KEY, &document).await
    }

    /// Loads the persisted cart, degrading to empty on any failure.
    async fn load_persisted(store: &LocalStore) -> Cart {
        let document = match store.get(GUEST_CART_KEY).await {
            Ok(Some(document)) => document,
            Ok(None) => return Cart::empty(true),
            Err(error) => {
                warn!(%error, "Failed to read guest cart; starting empty");
                return Cart::empty(true);
            }
        };

        match serde_json::from_str::<WireCart>(&document) {
            Ok(wire) => {
                // Stored totals are never trusted; the aggregate is derived
                // from the items on every load.
                let items = wire.items.iter().map(normalize_item).collect();
                Cart::from_items(items, true)
            }
            Err(error) => {
                warn!(%error, "Corrupt guest cart document; starting empty");
                Cart::empty(true)
            }
        }
    }
}

/// Generates a cart-local line id from the current time, as the original
/// client did with `Date.now()`.
///
/// Millisecond ids can collide when two lines are created within the same
/// tick; colliding candidates are bumped until unique within the cart.
/// They remain neither globally unique nor stable across sessions.
fn next_local_id(cart: &Cart) -> i64 {
    let mut candidate = Utc::now().timestamp_millis();
    while cart.items.iter().any(|item| item.id == candidate) {
        candidate += 1;
    }
    candidate
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local::StoreConfig;
    use essence_core::money::Money;

    fn test_product(id: i64, price: i64) -> ProductSnapshot {
        ProductSnapshot {
            id,
            name: format!("Perfume {}", id),
            brand: "Essence".into(),
            price: Money::from_minor(price),
            discount_price: None,
            stock: 99,
            image_url: None,
        }
    }

    async fn open_store() -> (LocalStore, GuestCartStore) {
        let local = LocalStore::new(StoreConfig::in_memory()).await.unwrap();
        let guest = GuestCartStore::open(local.clone()).await;
        (local, guest)
    }

    #[tokio::test]
    async fn test_starts_empty() {
        let (_, guest) = open_store().await;
        let cart = guest.load().await;
        assert!(cart.is_empty());
        assert!(cart.is_guest);
        assert_eq!(cart.item_count, 0);
        assert!(cart.subtotal.is_zero());
    }

    #[tokio::test]
    async fn test_add_merges_same_product() {
        let (_, guest) = open_store().await;
        let product = test_product(7, 45_000);

        guest.add_item(&product, 1).await;
        let cart = guest.add_item(&product, 2).await;

        // One line, merged quantity; never two lines for one product.
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 3);
        assert_eq!(cart.item_count, 3);
        assert_eq!(cart.subtotal.minor(), 135_000);
    }

    #[tokio::test]
    async fn test_save_load_round_trip() {
        let (local, guest) = open_store().await;
        let before = guest.add_item(&test_product(7, 45_000), 2).await;

        // A fresh store over the same database sees the same cart.
        let reopened = GuestCartStore::open(local).await;
        let after = reopened.load().await;
        assert_eq!(after, before);
    }

    #[tokio::test]
    async fn test_update_quantity() {
        let (_, guest) = open_store().await;
        let cart = guest.add_item(&test_product(7, 10_000), 1).await;
        let item_id = cart.items[0].id;

        let cart = guest.update_item(item_id, 4).await;
        assert_eq!(cart.items[0].quantity, 4);
        assert_eq!(cart.subtotal.minor(), 40_000);
    }

    #[tokio::test]
    async fn test_update_to_zero_removes() {
        let (_, guest) = open_store().await;
        let cart = guest.add_item(&test_product(7, 10_000), 2).await;
        let item_id = cart.items[0].id;

        let cart = guest.update_item(item_id, 0).await;
        assert!(cart.is_empty());
        assert_eq!(cart.item_count, 0);
        assert!(cart.subtotal.is_zero());
    }

    #[tokio::test]
    async fn test_update_unknown_item_is_noop() {
        let (_, guest) = open_store().await;
        let before = guest.add_item(&test_product(7, 10_000), 2).await;
        let after = guest.update_item(999, 5).await;
        assert_eq!(after, before);
    }

    #[tokio::test]
    async fn test_remove_unknown_item_is_noop() {
        let (_, guest) = open_store().await;
        let before = guest.add_item(&test_product(7, 10_000), 2).await;
        let after = guest.remove_item(999).await;
        assert_eq!(after, before);
    }

    #[tokio::test]
    async fn test_remove_item() {
        let (_, guest) = open_store().await;
        guest.add_item(&test_product(7, 10_000), 2).await;
        let cart = guest.add_item(&test_product(8, 5_000), 1).await;
        let first_id = cart.items[0].id;

        let cart = guest.remove_item(first_id).await;
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].product.id, 8);
        assert_eq!(cart.subtotal.minor(), 5_000);
    }

    #[tokio::test]
    async fn test_clear() {
        let (local, guest) = open_store().await;
        guest.add_item(&test_product(7, 10_000), 2).await;
        let cart = guest.clear().await;
        assert!(cart.is_empty());

        // The empty shape is persisted, not just held in memory.
        let stored = local.get(GUEST_CART_KEY).await.unwrap().unwrap();
        let wire: WireCart = serde_json::from_str(&stored).unwrap();
        assert!(wire.items.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_document_loads_as_empty() {
        let local = LocalStore::new(StoreConfig::in_memory()).await.unwrap();
        local.put(GUEST_CART_KEY, "{not valid json").await.unwrap();

        let guest = GuestCartStore::open(local).await;
        assert!(guest.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_storage_outage_degrades_to_memory() {
        let (local, guest) = open_store().await;
        local.close().await;

        // Persistence fails silently; the session cart still works.
        let cart = guest.add_item(&test_product(7, 10_000), 2).await;
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.subtotal.minor(), 20_000);

        let cart = guest.update_item(cart.items[0].id, 3).await;
        assert_eq!(cart.item_count, 3);
    }

    #[tokio::test]
    async fn test_insertion_order_is_stable() {
        let (_, guest) = open_store().await;
        guest.add_item(&test_product(1, 1_000), 1).await;
        guest.add_item(&test_product(2, 2_000), 1).await;
        let cart = guest.add_item(&test_product(3, 3_000), 1).await;

        let product_ids: Vec<i64> = cart.items.iter().map(|i| i.product.id).collect();
        assert_eq!(product_ids, vec![1, 2, 3]);
    }
}
