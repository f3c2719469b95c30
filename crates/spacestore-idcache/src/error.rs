//! Error types for identifier cache operations.

use thiserror::Error;

/// Errors that can occur while writing to the identifier cache or opening
/// its backend.
///
/// Read paths never surface these: a failed lookup is reported as a miss.
#[derive(Debug, Error)]
pub enum IdCacheError {
    /// A space or node ID cannot be encoded into a cache key.
    #[error("invalid identifier {id:?}: {reason}")]
    InvalidIdentifier { id: String, reason: String },

    /// The sled database failed.
    #[error("sled store error: {0}")]
    Database(#[from] sled::Error),

    /// A backend reported a failure.
    #[error("{store} store error: {reason}")]
    Backend { store: String, reason: String },

    /// A lock protecting backend state was poisoned by a panicking thread.
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),
}

impl IdCacheError {
    /// Shorthand for a [`IdCacheError::Backend`] error.
    pub fn backend(store: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Backend {
            store: store.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for identifier cache operations.
pub type IdCacheResult<T> = std::result::Result<T, IdCacheError>;
