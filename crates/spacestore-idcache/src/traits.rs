//! The [`KvStore`] backend trait and the [`IdCache`] interface.
//!
//! Backends (in-memory, persistent, networked) implement [`KvStore`]; the
//! identifier cache only ever talks to that trait, so a backend can be
//! swapped through configuration without touching callers.

use crate::error::IdCacheResult;

/// Key-value storage backend for the identifier cache.
///
/// Implementations must be thread-safe. Eviction and expiry are entirely up
/// to the backend: a key written earlier may read back as `None` at any time.
pub trait KvStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key does not exist.
    fn read(&self, key: &str) -> IdCacheResult<Option<Vec<u8>>>;

    /// Create or replace the value stored under `key`.
    fn write(&self, key: &str, value: &[u8]) -> IdCacheResult<()>;

    /// Delete `key`. Returns `true` if it existed.
    fn delete(&self, key: &str) -> IdCacheResult<bool>;
}

/// Bidirectional cache between `(space_id, node_id)` pairs and opaque values.
///
/// The cache only accelerates lookups. Callers must treat every miss as
/// normal and resolve the identifiers authoritatively elsewhere.
pub trait IdCache: Send + Sync {
    /// Associate `value` with `(space_id, node_id)` in both directions.
    ///
    /// The forward and reverse records are written one after the other,
    /// not atomically. If the second write fails the forward record stays
    /// in place without its reverse counterpart and the error is returned.
    fn set(&self, space_id: &str, node_id: &str, value: &str) -> IdCacheResult<()>;

    /// Look up the value for `(space_id, node_id)`.
    ///
    /// Backend failures are reported as a miss.
    fn get(&self, space_id: &str, node_id: &str) -> Option<String>;

    /// Look up the `(space_id, node_id)` pair that produced `value`.
    ///
    /// Backend failures and malformed reverse records are reported as a miss.
    fn get_reverse(&self, value: &str) -> Option<(String, String)>;

    /// Drop the forward record for `(space_id, node_id)` and the reverse
    /// record pointing back to it.
    fn invalidate(&self, space_id: &str, node_id: &str) -> IdCacheResult<()>;
}
