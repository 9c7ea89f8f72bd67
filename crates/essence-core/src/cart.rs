//! # Cart Model
//!
//! The normalized cart item and cart aggregate.
//!
//! ## Invariants
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cart Invariants                                 │
//! │                                                                         │
//! │  item_count == sum(items[].quantity)          (units, not lines)       │
//! │  subtotal   == sum(items[].line_total())                                │
//! │  one item per product (both stores merge quantities on add)            │
//! │  quantity <= product.stock at mutation time (rejected, never clamped)  │
//! │                                                                         │
//! │  Items whose price cannot be resolved still count their quantity;      │
//! │  they are excluded from the subtotal only.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Derived Totals
//! `line_total` is a method, not a field. The original client cached
//! `item.total` alongside the data it was derived from and the two could
//! silently disagree; here a server-provided total is an explicit
//! `Option<Money>` consulted only for remote items.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::Money;
use crate::pricing::resolve_unit_price;
use crate::product::ProductSnapshot;

// =============================================================================
// Item Source
// =============================================================================

/// Which store an item came from.
///
/// Remote items carry server-resolved product data and may carry a
/// server-computed total; guest items carry an add-time snapshot and never
/// trust a stored total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ItemSource {
    /// Server cart item (`perfume_details` wire shape).
    Remote,
    /// Locally persisted guest cart item (`perfume` wire shape).
    Guest,
}

// =============================================================================
// Cart Item
// =============================================================================

/// A line in the cart, normalized from either wire shape.
///
/// ## Design Notes
/// - `id` is server-issued for remote items and a locally generated
///   millisecond timestamp for guest items. Guest ids are NOT stable across
///   sessions and not guaranteed globally unique.
/// - `server_total` is the server's own line total, present only on remote
///   items. The server is authoritative on promotions/tax the client cannot
///   see, so it wins over local derivation when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    /// Identifier unique within this cart.
    pub id: i64,

    /// The product being purchased.
    pub product: ProductSnapshot,

    /// Units of the product. Positive; bounded by `product.stock` at
    /// mutation time.
    pub quantity: i64,

    /// Server-computed line total, when the server provided one.
    pub server_total: Option<Money>,

    /// Which store this item came from.
    pub source: ItemSource,
}

impl CartItem {
    /// Computes the line total for this item.
    ///
    /// ## Resolution
    /// - Remote item with a `server_total`: the server value wins.
    /// - Otherwise: `quantity × resolve_unit_price(product)`.
    ///
    /// Fails with `InvalidProduct` when the product carries no usable
    /// price; such items contribute nothing to the subtotal.
    pub fn line_total(&self) -> CoreResult<Money> {
        if self.source == ItemSource::Remote {
            if let Some(total) = self.server_total {
                return Ok(total);
            }
        }

        Ok(resolve_unit_price(&self.product)?.multiply_quantity(self.quantity))
    }

    /// The effective unit price of this item.
    pub fn unit_price(&self) -> CoreResult<Money> {
        resolve_unit_price(&self.product)
    }
}

// =============================================================================
// Cart Aggregate
// =============================================================================

/// Totals derived from an item sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Aggregate {
    /// Total units across all lines (not the number of lines).
    pub item_count: i64,
    /// Sum of line totals.
    pub subtotal: Money,
}

/// Sums quantities and line totals over the full item sequence.
///
/// An empty sequence yields zeros. Every line's quantity counts; items
/// without a resolvable price contribute nothing to the subtotal, and the
/// caller decides whether to log them.
///
/// ## Example
/// ```rust
/// use essence_core::cart::compute_aggregate;
///
/// let agg = compute_aggregate(&[]);
/// assert_eq!(agg.item_count, 0);
/// assert!(agg.subtotal.is_zero());
/// ```
pub fn compute_aggregate(items: &[CartItem]) -> Aggregate {
    let mut aggregate = Aggregate::default();
    for item in items {
        aggregate.item_count += item.quantity;
        if let Ok(line_total) = item.line_total() {
            aggregate.subtotal += line_total;
        }
    }
    aggregate
}

// =============================================================================
// Cart
// =============================================================================

/// The cart snapshot the UI renders from.
///
/// ## Ownership
/// For authenticated sessions this is a read-through cache of the server
/// cart; for guests it mirrors local storage. `is_guest` records which
/// store produced the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    /// Lines in insertion order (display stability).
    pub items: Vec<CartItem>,

    /// Total units across all lines.
    pub item_count: i64,

    /// Sum of line totals.
    pub subtotal: Money,

    /// Whether the guest store is authoritative for this snapshot.
    pub is_guest: bool,
}

impl Cart {
    /// The canonical empty cart.
    pub fn empty(is_guest: bool) -> Self {
        Cart {
            items: Vec::new(),
            item_count: 0,
            subtotal: Money::zero(),
            is_guest,
        }
    }

    /// Builds a cart from items, deriving the aggregate.
    pub fn from_items(items: Vec<CartItem>, is_guest: bool) -> Self {
        let aggregate = compute_aggregate(&items);
        Cart {
            items,
            item_count: aggregate.item_count,
            subtotal: aggregate.subtotal,
            is_guest,
        }
    }

    /// Re-derives `item_count` and `subtotal` from the current items.
    ///
    /// Call after any in-place mutation of `items`.
    pub fn recompute(&mut self) {
        let aggregate = compute_aggregate(&self.items);
        self.item_count = aggregate.item_count;
        self.subtotal = aggregate.subtotal;
    }

    /// Checks if the cart has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Finds an item by its cart-local id.
    pub fn item(&self, item_id: i64) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    /// Finds the item holding a given product, if any.
    pub fn item_for_product(&self, product_id: i64) -> Option<&CartItem> {
        self.items.iter().find(|item| item.product.id == product_id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
