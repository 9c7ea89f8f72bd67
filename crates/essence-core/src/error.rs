//! # Error Types
//!
//! Domain-specific error types for essence-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  essence-core errors (this file)                                       │
//! │  └── CoreError        - Cart math / validation failures                │
//! │                                                                         │
//! │  essence-store errors (separate crate)                                 │
//! │  └── StoreError       - Local storage failures (swallowed at the       │
//! │                         store boundary, logged, never fatal)           │
//! │                                                                         │
//! │  essence-remote errors (separate crate)                                │
//! │  └── RemoteError      - Network / server / auth failures               │
//! │                                                                         │
//! │  essence-service errors                                                │
//! │  └── ServiceError     - What the UI sees                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, stock, quantity)
//! 3. Errors are enum variants, never String
//! 4. Validation rejects, it never clamps

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Cart domain errors.
///
/// These represent business rule violations detected before any store is
/// touched. They are caught by the UI layer and shown inline.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Product snapshot carries no usable price.
    ///
    /// ## When This Occurs
    /// - Neither `price` nor `discount_price` is a positive amount
    /// - A malformed wire item was normalized into a priceless placeholder
    ///
    /// Items in this state are excluded from total computation rather than
    /// failing the whole cart.
    #[error("Product {product_id} has no valid price")]
    InvalidProduct { product_id: i64 },

    /// Requested quantity exceeds available stock.
    ///
    /// ## User Workflow
    /// ```text
    /// Increase quantity (qty: 5)
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// StockExceeded { requested: 5, available: 3 }
    ///      │
    ///      ▼
    /// UI shows: "Only 3 left in stock"
    /// ```
    #[error("Insufficient stock: available {available}, requested {requested}")]
    StockExceeded { requested: i64, available: i64 },

    /// Quantity is below the minimum of one unit.
    ///
    /// Zero is not an error everywhere: the stores treat `update(id, 0)` as
    /// removal. This variant fires only where a positive quantity is
    /// required, i.e. quantity validation before an add/update intent.
    #[error("Quantity must be at least 1, got {requested}")]
    InvalidQuantity { requested: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::StockExceeded {
            requested: 5,
            available: 3,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock: available 3, requested 5"
        );

        let err = CoreError::InvalidProduct { product_id: 42 };
        assert_eq!(err.to_string(), "Product 42 has no valid price");
    }
}
