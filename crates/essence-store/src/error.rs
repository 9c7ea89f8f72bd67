//! # Storage Error Types
//!
//! Error types for the local key/value store.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  GuestCartStore boundary: logged via tracing::warn and SWALLOWED.      │
//! │  The in-memory cart remains the source of truth for the session;      │
//! │  persistence is best-effort.                                           │
//! │                                                                         │
//! │  Only setup errors (open/migrate) propagate to the caller.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Local storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Could not open or create the backing database.
    ///
    /// ## When This Occurs
    /// - Database file path is not writable
    /// - Disk full
    #[error("Storage connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed while preparing the key/value table.
    #[error("Storage migration failed: {0}")]
    MigrationFailed(String),

    /// A read or write against the key/value table failed.
    ///
    /// The guest store treats this as session-scoped degradation, not a
    /// crash: the operation proceeds on the in-memory cart.
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The stored document could not be serialized.
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

/// Convert sqlx errors to StoreError.
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolClosed => {
                StoreError::StorageUnavailable("pool is closed".to_string())
            }
            sqlx::Error::PoolTimedOut => {
                StoreError::StorageUnavailable("pool timed out".to_string())
            }
            other => StoreError::StorageUnavailable(other.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::MigrationFailed(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_error_maps_to_serialization() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let store_err = StoreError::from(err);
        assert!(matches!(store_err, StoreError::Serialization(_)));
        assert!(store_err.to_string().starts_with("Serialization failed"));
    }

    #[test]
    fn test_closed_pool_maps_to_unavailable() {
        let store_err = StoreError::from(sqlx::Error::PoolClosed);
        assert!(matches!(store_err, StoreError::StorageUnavailable(_)));
    }
}
