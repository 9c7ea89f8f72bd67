//! # Wire Shapes & Normalization
//!
//! The raw shapes carried by the cart API and by persisted guest carts,
//! plus the normalization into the canonical [`CartItem`] the UI consumes.
//!
//! ## The Two Item Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Item, Two Dialects                               │
//! │                                                                         │
//! │  SERVER item (remote cart)          GUEST item (local storage)          │
//! │  ─────────────────────────          ───────────────────────────         │
//! │  { id, quantity, total,             { id, quantity, total,              │
//! │    perfume_details: {                 perfume: {                        │
//! │      ..., images: [{image}] } }         ..., image: "..." } }           │
//! │                                                                         │
//! │            │                                   │                        │
//! │            └────────────► normalize_item ◄─────┘                        │
//! │                                │                                        │
//! │                                ▼                                        │
//! │        CartItem { id, product: ProductSnapshot, quantity,               │
//! │                   server_total, source }                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Normalization never fails: missing brand, images, or even the whole
//! product object degrade to placeholder defaults. Only the subtotal
//! reacts to a priceless item (it contributes nothing to it).

use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartItem, ItemSource};
use crate::money::Money;
use crate::product::ProductSnapshot;

// =============================================================================
// Wire Types
// =============================================================================

/// Nested brand object of the catalog API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireBrand {
    #[serde(default)]
    pub name: String,
}

/// One entry of a product's `images` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireImage {
    pub image: String,
}

/// Product as carried on the wire, in either dialect.
///
/// Server products carry `images[]`; guest snapshots persisted by older
/// clients carry a singular `image`. Both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WireProduct {
    #[serde(default)]
    pub id: i64,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub price: Money,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<Money>,

    #[serde(default)]
    pub stock: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<WireBrand>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<WireImage>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Cart item as carried on the wire.
///
/// Exactly one of `perfume_details` (server) or `perfume` (guest) is
/// normally present; neither being present still normalizes (to a
/// placeholder product) rather than failing the whole cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireCartItem {
    pub id: i64,

    #[serde(default)]
    pub quantity: i64,

    /// Line total as computed by whichever side wrote this item.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<Money>,

    /// Server dialect: product resolved fresh on every fetch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perfume_details: Option<WireProduct>,

    /// Guest dialect: product snapshot captured at add-time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perfume: Option<WireProduct>,
}

/// Cart payload: `GET my_cart` response and the persisted guest layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct WireCart {
    #[serde(default)]
    pub items: Vec<WireCartItem>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtotal: Option<Money>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_items: Option<i64>,
}

// =============================================================================
// Normalization (wire → model)
// =============================================================================

/// Flattens a wire product into the canonical snapshot.
///
/// Missing brand becomes an empty name; the image is the first entry of
/// `images[]`, else the singular `image`, else `None`.
pub fn normalize_product(wire: &WireProduct) -> ProductSnapshot {
    let image_url = wire
        .images
        .as_ref()
        .and_then(|images| images.first())
        .map(|entry| entry.image.clone())
        .or_else(|| wire.image.clone());

    ProductSnapshot {
        id: wire.id,
        name: wire.name.clone(),
        brand: wire
            .brand
            .as_ref()
            .map(|brand| brand.name.clone())
            .unwrap_or_default(),
        price: wire.price,
        discount_price: wire.discount_price,
        stock: wire.stock,
        image_url,
    }
}

/// Normalizes a wire item from either dialect into a [`CartItem`].
///
/// Precedence follows the original client: `perfume_details` wins over
/// `perfume`; with neither present the item gets a priceless placeholder
/// product (excluded from totals, still rendered).
pub fn normalize_item(wire: &WireCartItem) -> CartItem {
    let (product, source) = match (&wire.perfume_details, &wire.perfume) {
        (Some(details), _) => (normalize_product(details), ItemSource::Remote),
        (None, Some(snapshot)) => (normalize_product(snapshot), ItemSource::Guest),
        (None, None) => (
            ProductSnapshot {
                id: 0,
                name: "Unknown Product".into(),
                brand: String::new(),
                price: Money::zero(),
                discount_price: None,
                stock: 0,
                image_url: None,
            },
            ItemSource::Remote,
        ),
    };

    CartItem {
        id: wire.id,
        product,
        quantity: wire.quantity,
        server_total: wire.total,
        source,
    }
}

/// Normalizes a whole wire cart.
///
/// Wire-provided totals are trusted when present (the server is
/// authoritative on promotions/tax the client cannot see); otherwise the
/// aggregate is derived from the items.
pub fn normalize_cart(wire: &WireCart, is_guest: bool) -> Cart {
    let items: Vec<CartItem> = wire.items.iter().map(normalize_item).collect();
    let mut cart = Cart::from_items(items, is_guest);

    if let Some(subtotal) = wire.subtotal {
        cart.subtotal = subtotal;
    }
    if let Some(total_items) = wire.total_items {
        cart.item_count = total_items;
    }

    cart
}

// =============================================================================
// Denormalization (model → guest persistence)
// =============================================================================

impl From<&ProductSnapshot> for WireProduct {
    fn from(snapshot: &ProductSnapshot) -> Self {
        WireProduct {
            id: snapshot.id,
            name: snapshot.name.clone(),
            price: snapshot.price,
            discount_price: snapshot.discount_price,
            stock: snapshot.stock,
            brand: if snapshot.brand.is_empty() {
                None
            } else {
                Some(WireBrand {
                    name: snapshot.brand.clone(),
                })
            },
            images: None,
            image: snapshot.image_url.clone(),
        }
    }
}

/// Serializes a cart item into the persisted guest layout
/// (`{ id, perfume, quantity, total }`).
///
/// The `total` field is written as the derived line total so the stored
/// JSON stays readable by older clients; it is never trusted on load.
pub fn to_wire_item(item: &CartItem) -> WireCartItem {
    WireCartItem {
        id: item.id,
        quantity: item.quantity,
        total: item.line_total().ok(),
        perfume_details: None,
        perfume: Some(WireProduct::from(&item.product)),
    }
}

/// Serializes a cart into the persisted guest layout
/// (`{ items, subtotal, total_items }`).
pub fn to_wire_cart(cart: &Cart) -> WireCart {
    WireCart {
        items: cart.items.iter().map(to_wire_item).collect(),
        subtotal: Some(cart.subtotal),
        total_items: Some(cart.item_count),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_server_item() {
        let json = serde_json::json!({
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
                "images": [ { "image": "/media/oud-1.jpg" }, { "image": "/media/oud-2.jpg" } ]
            }
        });
        let wire: WireCartItem = serde_json::from_value(json).unwrap();
        let item = normalize_item(&wire);

        assert_eq!(item.source, ItemSource::Remote);
        assert_eq!(item.product.id, 7);
        assert_eq!(item.product.brand, "Essence");
        assert_eq!(item.product.image_url.as_deref(), Some("/media/oud-1.jpg"));
        assert_eq!(item.server_total, Some(Money::from_minor(90_000)));
        assert_eq!(item.line_total().unwrap().minor(), 90_000);
    }

    #[test]
    fn test_normalize_guest_item_with_singular_image() {
        let json = serde_json::json!({
            "id": 1724967190000i64,
            "quantity": 1,
            "total": 45000,
            "perfume": {
                "id": 7,
                "name": "Oud Royal",
                "price": 50000,
                "discount_price": 45000,
                "stock": 12,
                "image": "/media/oud.jpg"
            }
        });
        let wire: WireCartItem = serde_json::from_value(json).unwrap();
        let item = normalize_item(&wire);

        assert_eq!(item.source, ItemSource::Guest);
        assert_eq!(item.product.brand, "");
        assert_eq!(item.product.image_url.as_deref(), Some("/media/oud.jpg"));
        // Guest totals are always derived, never trusted from storage.
        assert_eq!(item.line_total().unwrap().minor(), 45_000);
    }

    #[test]
    fn test_normalize_item_without_product_does_not_fail() {
        let json = serde_json::json!({ "id": 3, "quantity": 2 });
        let wire: WireCartItem = serde_json::from_value(json).unwrap();
        let item = normalize_item(&wire);

        assert_eq!(item.product.name, "Unknown Product");
        assert!(item.line_total().is_err());

        // Priced at nothing, but its units still count.
        let cart = Cart::from_items(vec![item], false);
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.item_count, 2);
        assert!(cart.subtotal.is_zero());
    }

    #[test]
    fn test_normalize_cart_trusts_server_totals() {
        // Server-side subtotal and count win over local derivation.
        let json = serde_json::json!({
            "items": [ {
                "id": 1,
                "quantity": 2,
                "perfume_details": { "id": 7, "name": "Oud", "price": 50000, "discount_price": 45000, "stock": 5 }
            } ],
            "subtotal": 90000,
            "total_items": 2
        });
        let wire: WireCart = serde_json::from_value(json).unwrap();
        let cart = normalize_cart(&wire, false);

        assert!(!cart.is_guest);
        assert_eq!(cart.subtotal.minor(), 90_000);
        assert_eq!(cart.item_count, 2);
    }

    #[test]
    fn test_normalize_cart_computes_missing_totals() {
        let json = serde_json::json!({
            "items": [ {
                "id": 1,
                "quantity": 3,
                "perfume": { "id": 7, "name": "Oud", "price": 10000, "stock": 5 }
            } ]
        });
        let wire: WireCart = serde_json::from_value(json).unwrap();
        let cart = normalize_cart(&wire, true);

        assert_eq!(cart.subtotal.minor(), 30_000);
        assert_eq!(cart.item_count, 3);
    }

    #[test]
    fn test_guest_persistence_round_trip() {
        let wire = WireCartItem {
            id: 42,
            quantity: 2,
            total: None,
            perfume_details: None,
            perfume: Some(WireProduct {
                id: 7,
                name: "Oud Royal".into(),
                price: Money::from_minor(50_000),
                discount_price: Some(Money::from_minor(45_000)),
                stock: 12,
                brand: Some(WireBrand {
                    name: "Essence".into(),
                }),
                images: None,
                image: Some("/media/oud.jpg".into()),
            }),
        };
        let item = normalize_item(&wire);
        let back = to_wire_item(&item);

        assert_eq!(back.id, 42);
        assert_eq!(back.quantity, 2);
        assert_eq!(back.total, Some(Money::from_minor(90_000)));
        let perfume = back.perfume.unwrap();
        assert_eq!(perfume.id, 7);
        assert_eq!(perfume.brand.unwrap().name, "Essence");
        assert_eq!(perfume.image.as_deref(), Some("/media/oud.jpg"));
    }
}
