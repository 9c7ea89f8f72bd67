//! # Auth Session
//!
//! The auth collaborator the cart subsystem consumes.
//!
//! Authentication itself (login requests, token issuance, refresh) is out
//! of scope; the cart layer only needs to know *whether* a session exists
//! and *which* bearer token to attach. [`Session`] is that boundary, and
//! [`SharedSession`] is the in-memory implementation the app wires in.

use std::sync::{Arc, RwLock};

/// Read-only view of the current auth session.
///
/// Implementations must be cheap to query; both methods are consulted on
/// every cart intent.
pub trait Session: Send + Sync {
    /// The current bearer token, if a session exists.
    fn current_token(&self) -> Option<String>;

    /// Whether cart intents should route to the remote store.
    fn is_authenticated(&self) -> bool {
        self.current_token().is_some()
    }
}

/// Shared mutable session handle.
///
/// Clones share the same token slot, so the auth module can `login`/
/// `logout` while the cart layer reads through its own clone.
#[derive(Debug, Clone, Default)]
pub struct SharedSession {
    token: Arc<RwLock<Option<String>>>,
}

impl SharedSession {
    /// Creates an unauthenticated session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session that already holds a token (app load with a
    /// stored session).
    pub fn with_token(token: impl Into<String>) -> Self {
        SharedSession {
            token: Arc::new(RwLock::new(Some(token.into()))),
        }
    }

    /// Installs a token after successful login/registration.
    pub fn login(&self, token: impl Into<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token.into());
        }
    }

    /// Drops the token. The remote cart is intentionally NOT snapshotted
    /// anywhere on logout; the authority simply flips to the guest store.
    pub fn logout(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }
}

impl Session for SharedSession {
    fn current_token(&self) -> Option<String> {
        self.token.read().ok().and_then(|guard| guard.clone())
    }
}
