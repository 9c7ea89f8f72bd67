//! # Service Error Types
//!
//! Errors surfaced to the UI by the cart service.
//!
//! Storage failures never appear here: the guest store degrades to its
//! in-memory cart and logs, so guest operations are infallible from the
//! caller's point of view. What remains is validation (rejected before any
//! side effect) and the remote taxonomy passed through unchanged.

use thiserror::Error;

use essence_core::CoreError;
use essence_remote::RemoteError;

/// Result type alias for cart service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Cart service errors.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The intent was rejected by local validation; no store was touched.
    #[error("Cart validation failed: {0}")]
    Validation(#[from] CoreError),

    /// The remote store failed; the snapshot is unchanged.
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

impl ServiceError {
    /// Returns true if re-firing the same intent can plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ServiceError::Remote(remote) if remote.is_retryable())
    }

    /// Returns true if this error must trigger a forced logout.
    pub fn is_auth_expired(&self) -> bool {
        matches!(self, ServiceError::Remote(remote) if remote.is_auth_expired())
    }
}
