//! # Cart Service
//!
//! Orchestrator for the two cart stores. Every UI intent enters here and
//! is routed by the auth session.
//!
//! ## Routing
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        CartService Routing                              │
//! │                                                                         │
//! │  UI intent ──► CartService ──► Session.is_authenticated() ?            │
//! │                     │                                                   │
//! │          ┌──────────┴───────────┐                                       │
//! │          ▼ guest                ▼ authenticated                         │
//! │  ┌────────────────┐     ┌────────────────┐                              │
//! │  │ GuestCartStore │     │ RemoteCartStore│                              │
//! │  │ (local SQLite) │     │ (REST, bearer) │                              │
//! │  └────────┬───────┘     └───────┬────────┘                              │
//! │           └──────────┬──────────┘                                       │
//! │                      ▼                                                  │
//! │            Mutex<Cart> snapshot  ──► UI renders                         │
//! │                                                                         │
//! │  AUTH TRANSITIONS:                                                      │
//! │  ─────────────────                                                      │
//! │  on_login()   guest items pushed to the server one by one              │
//! │               (failures skipped), guest cart cleared, remote fetched   │
//! │  on_logout()  snapshot flips back to the guest store; the remote       │
//! │               cart is NEVER copied into guest storage                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Concurrency
//! The snapshot mutex is held across each whole mutation, including the
//! network call, so intents are applied strictly one at a time. A rapid
//! double-click produces two sequential adds, never an interleaving.
//!
//! ## Validation
//! Quantity and stock are validated here, against the current snapshot,
//! before any store is touched. The server still re-validates remote
//! mutations; a local pass is a UX courtesy, not an authority.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

use essence_core::cart::Cart;
use essence_core::error::CoreError;
use essence_core::product::ProductSnapshot;
use essence_core::validation::validate_quantity_change;
use essence_remote::{RemoteCartStore, Session};
use essence_store::GuestCartStore;

use crate::error::ServiceResult;

// =============================================================================
// Authority
// =============================================================================

/// Which store is authoritative for the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authority {
    /// Unauthenticated: the local guest store owns the cart.
    Guest,
    /// Authenticated: the server owns the cart.
    Remote,
}

// =============================================================================
// Cart Service
// =============================================================================

/// The cart facade the UI talks to.
pub struct CartService {
    guest: GuestCartStore,
    remote: RemoteCartStore,
    session: Arc<dyn Session>,
    /// Rendered snapshot; the lock serializes mutations end to end.
    state: Mutex<Cart>,
}

impl CartService {
    /// Wires the service over its stores. Call [`refresh`](Self::refresh)
    /// afterwards to load the authoritative snapshot.
    pub fn new(guest: GuestCartStore, remote: RemoteCartStore, session: Arc<dyn Session>) -> Self {
        CartService {
            guest,
            remote,
            session,
            state: Mutex::new(Cart::empty(true)),
        }
    }

    /// Which store currently owns the cart.
    pub fn authority(&self) -> Authority {
        if self.session.is_authenticated() {
            Authority::Remote
        } else {
            Authority::Guest
        }
    }

    /// Returns the current snapshot without touching any store.
    pub async fn cart(&self) -> Cart {
        self.state.lock().await.clone()
    }

    /// Reloads the snapshot from the authoritative store.
    pub async fn refresh(&self) -> ServiceResult<Cart> {
        let mut state = self.state.lock().await;
        let cart = match self.authority() {
            Authority::Remote => self.remote.fetch().await?,
            Authority::Guest => self.guest.load().await,
        };
        *state = cart.clone();
        Ok(cart)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds `quantity` units of a product to the cart.
    ///
    /// The merged quantity (existing line + requested) is validated against
    /// the product's stock before any store is touched; an over-ask is
    /// rejected whole, never clamped.
    pub async fn add_item(&self, product: &ProductSnapshot, quantity: i64) -> ServiceResult<Cart> {
        let mut state = self.state.lock().await;

        validate_quantity_change(product.stock, quantity)?;
        let existing = state
            .item_for_product(product.id)
            .map(|item| item.quantity)
            .unwrap_or(0);
        let merged = existing + quantity;
        if merged > product.stock {
            return Err(CoreError::StockExceeded {
                requested: merged,
                available: product.stock,
            }
            .into());
        }

        let cart = match self.authority() {
            Authority::Remote => self.remote.add_item(product.id, quantity).await?,
            Authority::Guest => self.guest.add_item(product, quantity).await,
        };
        *state = cart.clone();
        Ok(cart)
    }

    /// Sets the quantity of an existing line.
    ///
    /// `quantity <= 0` removes the line (deliberate: zero is "remove", not
    /// an error). Quantities above the line's known stock are rejected.
    pub async fn update_item(&self, item_id: i64, quantity: i64) -> ServiceResult<Cart> {
        let mut state = self.state.lock().await;

        if quantity <= 0 {
            debug!(item_id, quantity, "Non-positive quantity treated as remove");
            return self.remove_locked(&mut state, item_id).await;
        }

        if let Some(item) = state.item(item_id) {
            validate_quantity_change(item.product.stock, quantity)?;
        }

        let cart = match self.authority() {
            Authority::Remote => self.remote.update_item(item_id, quantity).await?,
            Authority::Guest => self.guest.update_item(item_id, quantity).await,
        };
        *state = cart.clone();
        Ok(cart)
    }

    /// Removes a line from the cart.
    pub async fn remove_item(&self, item_id: i64) -> ServiceResult<Cart> {
        let mut state = self.state.lock().await;
        self.remove_locked(&mut state, item_id).await
    }

    /// Empties the cart.
    pub async fn clear(&self) -> ServiceResult<Cart> {
        let mut state = self.state.lock().await;
        let cart = match self.authority() {
            Authority::Remote => {
                self.remote.clear().await?;
                Cart::empty(false)
            }
            Authority::Guest => self.guest.clear().await,
        };
        *state = cart.clone();
        Ok(cart)
    }

    /// Shared removal path.
    ///
    /// The remove endpoint answers with the removed id only, so on the
    /// remote path the snapshot is filtered locally and the aggregate
    /// re-derived from the surviving lines.
    async fn remove_locked(
        &self,
        state: &mut MutexGuard<'_, Cart>,
        item_id: i64,
    ) -> ServiceResult<Cart> {
        let cart = match self.authority() {
            Authority::Remote => {
                let removed_id = self.remote.remove_item(item_id).await?;
                let mut cart = (**state).clone();
                cart.items.retain(|item| item.id != removed_id);
                cart.recompute();
                cart
            }
            Authority::Guest => self.guest.remove_item(item_id).await,
        };
        **state = cart.clone();
        Ok(cart)
    }

    // =========================================================================
    // Auth Transitions
    // =========================================================================

    /// Reconciles the carts after a successful login.
    ///
    /// ## Sequence
    /// 1. Each guest line is pushed to the server as an add (the server
    ///    merges and re-validates stock). A failed line is logged and
    ///    skipped; it does not abort the transfer.
    /// 2. The guest cart is cleared unconditionally.
    /// 3. The server cart is fetched as the new snapshot.
    pub async fn on_login(&self) -> ServiceResult<Cart> {
        let mut state = self.state.lock().await;
        let guest_cart = self.guest.load().await;

        if guest_cart.is_empty() {
            debug!("No guest cart to transfer");
        } else {
            info!(lines = guest_cart.items.len(), "Transferring guest cart");
            for item in &guest_cart.items {
                if let Err(error) = self
                    .remote
                    .add_item(item.product.id, item.quantity)
                    .await
                {
                    warn!(
                        product_id = item.product.id,
                        quantity = item.quantity,
                        %error,
                        "Skipping guest cart line that failed to transfer"
                    );
                }
            }
            self.guest.clear().await;
        }

        let cart = self.remote.fetch().await?;
        *state = cart.clone();
        Ok(cart)
    }

    /// Flips the snapshot back to the guest store after logout.
    ///
    /// The remote cart stays on the server untouched; it is never copied
    /// into guest storage. Whatever guest cart existed before login (now
    /// empty, post-transfer) is what the user sees.
    pub async fn on_logout(&self) -> Cart {
        let mut state = self.state.lock().await;
        let cart = self.guest.load().await;
        *state = cart.clone();
        cart
    }
}
