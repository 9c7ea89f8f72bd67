//! # essence-service: Cart Reconciliation
//!
//! The single cart entry point for the UI.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CartService                                                            │
//! │    • routes every intent by Session.is_authenticated()                  │
//! │    • validates quantity/stock before touching a store                   │
//! │    • holds the rendered snapshot behind a mutex (one writer at a time)  │
//! │    • on_login: guest lines → server adds → guest cleared → fetch        │
//! │    • on_logout: back to the guest store, remote cart left server-side   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//! - [`service`] - The cart service and routing authority
//! - [`error`] - Service error types

pub mod error;
pub mod service;

pub use error::{ServiceError, ServiceResult};
pub use service::{Authority, CartService};
