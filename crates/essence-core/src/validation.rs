//! # Validation Module
//!
//! Quantity validation for cart mutations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: UI                                                            │
//! │  ├── Disables +/- buttons at the stock boundary                         │
//! │  └── Immediate user feedback                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: CartService (Rust)                                            │
//! │  └── THIS MODULE: reject before any store is touched                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Server (remote carts only)                                    │
//! │  └── Authoritative stock check on add/update                            │
//! │                                                                         │
//! │  The guest store performs NO validation of its own; the caller must     │
//! │  validate first. Violations are REJECTED, never silently clamped.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use essence_core::validation::validate_quantity_change;
//!
//! assert!(validate_quantity_change(10, 3).is_ok());
//! assert!(validate_quantity_change(10, 0).is_err());
//! assert!(validate_quantity_change(10, 11).is_err());
//! ```

use crate::error::{CoreError, CoreResult};

/// Validates a requested quantity against available stock.
///
/// ## Rules
/// - `requested >= 1` (zero/negative is a *removal* at the store layer,
///   never a valid quantity here)
/// - `requested <= stock`
///
/// Returns the validated quantity unchanged on success.
///
/// ## Example
/// ```rust
/// use essence_core::validation::validate_quantity_change;
///
/// assert_eq!(validate_quantity_change(5, 5).unwrap(), 5);
/// assert!(validate_quantity_change(5, 6).is_err());
/// ```
pub fn validate_quantity_change(stock: i64, requested: i64) -> CoreResult<i64> {
    if requested < 1 {
        return Err(CoreError::InvalidQuantity { requested });
    }

    if requested > stock {
        return Err(CoreError::StockExceeded {
            requested,
            available: stock,
        });
    }

    Ok(requested)
}

// =============================================================================
// Unit Tests
// =============================================================================
