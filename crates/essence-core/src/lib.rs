//! # essence-core: Pure Cart Model for the Essence Storefront
//!
//! This crate is the **heart** of the cart subsystem. It contains the cart
//! math and shape normalization as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Essence Cart Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront SPA                               │   │
//! │  │    Catalog UI ──► Cart UI ──► Checkout UI                       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    essence-service                              │   │
//! │  │    CartService: authority selection + guest→remote transfer    │   │
//! │  └──────────────┬─────────────────────────────┬────────────────────┘   │
//! │                 │                             │                         │
//! │  ┌──────────────▼──────────┐   ┌──────────────▼──────────┐             │
//! │  │    essence-store        │   │    essence-remote       │             │
//! │  │    guest cart (SQLite)  │   │    cart API (HTTP)      │             │
//! │  └──────────────┬──────────┘   └──────────────┬──────────┘             │
//! │                 │                             │                         │
//! │  ┌──────────────▼─────────────────────────────▼──────────┐             │
//! │  │              ★ essence-core (THIS CRATE) ★             │             │
//! │  │                                                        │             │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────────────┐ │             │
//! │  │   │   money   │  │   cart    │  │  wire/validation  │ │             │
//! │  │   │   Money   │  │   Cart    │  │  normalize_item   │ │             │
//! │  │   │           │  │ CartItem  │  │  quantity checks  │ │             │
//! │  │   └───────────┘  └───────────┘  └───────────────────┘ │             │
//! │  │                                                        │             │
//! │  │   NO I/O • NO NETWORK • NO STORAGE • PURE FUNCTIONS   │             │
//! │  └────────────────────────────────────────────────────────┘             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer minor-unit arithmetic
//! - [`product`] - Product snapshot consumed by cart items
//! - [`cart`] - CartItem / Cart aggregate and total computation
//! - [`wire`] - Wire shapes of the cart API and guest storage + normalization
//! - [`validation`] - Quantity/stock validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, always
//! 2. **No I/O**: network and storage access is FORBIDDEN here
//! 3. **Integer Money**: all amounts in minor units (i64), never floats
//! 4. **Derived Totals**: `line_total` is computed, never a stored field
//!    that can silently desync
//!
//! ## Example Usage
//!
//! ```rust
//! use essence_core::{money::Money, product::ProductSnapshot};
//! use essence_core::pricing::resolve_unit_price;
//!
//! let product = ProductSnapshot {
//!     id: 1,
//!     name: "Oud Royal".into(),
//!     brand: "Essence".into(),
//!     price: Money::from_minor(50_000),
//!     discount_price: Some(Money::from_minor(45_000)),
//!     stock: 10,
//!     image_url: None,
//! };
//!
//! // Discounted price wins when present and positive
//! assert_eq!(resolve_unit_price(&product).unwrap(), Money::from_minor(45_000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod pricing;
pub mod product;
pub mod validation;
pub mod wire;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use essence_core::Money` instead of
// `use essence_core::money::Money`

pub use cart::{Cart, CartItem, ItemSource};
pub use error::{CoreError, CoreResult};
pub use money::Money;
pub use product::ProductSnapshot;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Image shown when a product carries no usable image reference.
///
/// The normalizer leaves `image_url` as `None`; the UI substitutes this
/// placeholder. Kept here so both stores and the frontend agree on it.
pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder.svg";
