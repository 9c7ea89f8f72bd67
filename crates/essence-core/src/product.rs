//! # Product Snapshot
//!
//! The product data a cart item carries.
//!
//! ## Snapshot Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Two Freshness Regimes                               │
//! │                                                                         │
//! │  GUEST cart item                     REMOTE cart item                   │
//! │  ───────────────                     ────────────────                   │
//! │  ProductSnapshot captured at         ProductSnapshot resolved by the    │
//! │  add-time from the catalog page.     server on every fetch.            │
//! │  Can go STALE (price/stock may       Always FRESH.                     │
//! │  change while it sits in            │                                  │
//! │  local storage).                    │                                  │
//! │                                                                         │
//! │  Both normalize into the same type; `ItemSource` records which         │
//! │  regime an item came from.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Product data attached to a cart item.
///
/// ## Design Notes
/// - `brand` is a plain name; the nested brand object of the catalog API is
///   flattened during normalization and defaults to empty when absent.
/// - `image_url` is the first usable image reference, or `None` when the
///   product carries no media (the UI substitutes a placeholder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductSnapshot {
    /// Catalog identifier of the perfume.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Brand name. Empty when the catalog entry has no brand.
    pub brand: String,

    /// List price in minor units.
    pub price: Money,

    /// Discounted price, when a promotion applies.
    ///
    /// A zero discount means "no discount"; price resolution falls through
    /// to `price`.
    pub discount_price: Option<Money>,

    /// Units available. Bounds the quantity of any mutation.
    pub stock: i64,

    /// First image reference, if any.
    pub image_url: Option<String>,
}
