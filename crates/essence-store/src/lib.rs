//! # essence-store: Guest Cart Persistence
//!
//! Durable local storage for unauthenticated sessions, layered as:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GuestCartStore  ← cart semantics (merge, zero-removes, degradation)   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  LocalStore      ← SQLite key/value table (WAL, embedded migrations)   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  "perfumes_guest_cart" → { items, subtotal, total_items }              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The persisted document uses the same key and JSON layout as the
//! storefront web client, so either side can read a cart the other wrote.
//!
//! ## Modules
//! - [`local`] - SQLite key/value store and its configuration
//! - [`guest`] - The guest cart store
//! - [`error`] - Storage error types

pub mod error;
pub mod guest;
pub mod local;

pub use error::{StoreError, StoreResult};
pub use guest::{GuestCartStore, GUEST_CART_KEY};
pub use local::{LocalStore, StoreConfig};
