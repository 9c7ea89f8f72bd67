//! # Price Resolution
//!
//! Unit-price resolution over a product snapshot.
//!
//! ## Resolution Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  resolve_unit_price(product)                                            │
//! │                                                                         │
//! │  discount_price present AND > 0 ──► discount_price                      │
//! │  otherwise, price > 0           ──► price                               │
//! │  otherwise                      ──► InvalidProduct                      │
//! │                                                                         │
//! │  A zero discount is "no discount", not "free".                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This must be re-derived whenever price-affecting fields change; it is a
//! computed property, never stored.

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::product::ProductSnapshot;

/// Resolves the effective unit price of a product.
///
/// ## Example
/// ```rust
/// use essence_core::{money::Money, product::ProductSnapshot};
/// use essence_core::pricing::resolve_unit_price;
///
/// let mut product = ProductSnapshot {
///     id: 1,
///     name: "Noir".into(),
///     brand: String::new(),
///     price: Money::from_minor(50_000),
///     discount_price: Some(Money::from_minor(45_000)),
///     stock: 5,
///     image_url: None,
/// };
/// assert_eq!(resolve_unit_price(&product).unwrap().minor(), 45_000);
///
/// product.discount_price = None;
/// assert_eq!(resolve_unit_price(&product).unwrap().minor(), 50_000);
/// ```
pub fn resolve_unit_price(product: &ProductSnapshot) -> CoreResult<Money> {
    if let Some(discount) = product.discount_price {
        if discount.is_positive() {
            return Ok(discount);
        }
    }

    if product.price.is_positive() {
        return Ok(product.price);
    }

    Err(CoreError::InvalidProduct {
        product_id: product.id,
    })
}
