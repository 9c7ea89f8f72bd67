//! # Remote Cart Error Types
//!
//! Error taxonomy for the cart API client.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Remote Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │   Network       │  │   Server        │  │   AuthExpired           │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  no response    │  │  4xx/5xx with   │  │  HTTP 401 or missing    │ │
//! │  │  (DNS, refused, │  │  a payload      │  │  token                  │ │
//! │  │  timeout)       │  │                 │  │                         │ │
//! │  │                 │  │  show server    │  │  forced logout +        │ │
//! │  │  retryable by   │  │  message, user  │  │  redirect; NEVER        │ │
//! │  │  the user       │  │  may retry      │  │  retried                │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  No operation retries automatically within the store.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for remote cart operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Remote cart API errors.
///
/// ## Design Principles
/// - Each variant maps to one UI reaction (retry hint, server message,
///   forced logout)
/// - Errors are returned, never silently converted to empty success states
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The request never produced a response.
    ///
    /// ## When This Occurs
    /// - Connection refused / DNS failure
    /// - Request timeout
    ///
    /// The UI shows "check your connection" and lets the user re-fire the
    /// action.
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status (other than 401).
    ///
    /// `message` is the payload's `message`/`detail` field when present,
    /// the raw body otherwise; it is shown to the user verbatim.
    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The session token is missing or was rejected (HTTP 401).
    ///
    /// The caller must log the user out and redirect; retrying with the
    /// same token cannot succeed.
    #[error("Session expired")]
    AuthExpired,

    /// A success response carried a body the client could not decode.
    #[error("Unexpected response body: {0}")]
    Decode(String),

    /// The client could not be constructed from its configuration.
    #[error("Invalid remote configuration: {0}")]
    InvalidConfig(String),
}

// =============================================================================
// Error Categorization
// =============================================================================

impl RemoteError {
    /// Returns true if re-firing the same request can plausibly succeed.
    ///
    /// Only transport-level failures qualify; an `AuthExpired` must go
    /// through logout, and a `Server` rejection needs a changed request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RemoteError::Network(_))
    }

    /// Returns true if this error must trigger a forced logout.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, RemoteError::AuthExpired)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_categorization() {
        assert!(RemoteError::Network("connection refused".into()).is_retryable());
        assert!(!RemoteError::AuthExpired.is_retryable());
        assert!(!RemoteError::Server {
            status: 400,
            message: "Insufficient stock".into()
        }
        .is_retryable());
    }

    #[test]
    fn test_error_display() {
        let err = RemoteError::Server {
            status: 400,
            message: "Insufficient stock".into(),
        };
        assert_eq!(err.to_string(), "Server error (400): Insufficient stock");
    }
}
