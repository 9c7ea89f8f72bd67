//! # essence-remote: Remote Cart REST Client
//!
//! The authoritative cart store for authenticated sessions.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RemoteCartStore ── bearer auth ──► /api/orders/cart/*                  │
//! │        │                                                                 │
//! │        │  WireCart → normalize_cart → Cart (server totals trusted)      │
//! │        │                                                                 │
//! │        └── failures → RemoteError { Network | Server | AuthExpired }    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation is a single request; nothing retries automatically and
//! nothing is applied optimistically before the server answers.
//!
//! ## Modules
//! - [`client`] - The REST client and its configuration
//! - [`session`] - The auth session boundary
//! - [`error`] - Remote error taxonomy

pub mod client;
pub mod error;
pub mod session;

pub use client::{RemoteCartStore, RemoteConfig};
pub use error::{RemoteError, RemoteResult};
pub use session::{Session, SharedSession};
