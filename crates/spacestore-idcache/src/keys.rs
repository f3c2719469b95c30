//! Cache key construction.
//!
//! Forward records are keyed `{space_id}!{node_id}` and hold the cached
//! value. Reverse records are keyed `!{value}` and hold the forward key.
//!
//! Identifiers must be non-empty and must not contain the separator, so a
//! forward key contains exactly one `!` and never starts with one. Reverse
//! keys always start with `!`, which keeps the two key spaces disjoint even
//! when a value happens to look like a forward key.

use crate::error::{IdCacheError, IdCacheResult};

/// Separator between the space ID and node ID in a forward key.
pub const SEPARATOR: char = '!';

/// Check that `id` can be embedded in a cache key.
///
/// # Examples
///
/// ```
/// use spacestore_idcache::keys::validate_identifier;
///
/// assert!(validate_identifier("4c510ada-c86b-4815-8820-42cdf82c3d51").is_ok());
/// assert!(validate_identifier("").is_err());
/// assert!(validate_identifier("a!b").is_err());
/// ```
pub fn validate_identifier(id: &str) -> IdCacheResult<()> {
    if id.is_empty() {
        return Err(IdCacheError::InvalidIdentifier {
            id: id.to_string(),
            reason: "identifier must not be empty".into(),
        });
    }
    if id.contains(SEPARATOR) {
        return Err(IdCacheError::InvalidIdentifier {
            id: id.to_string(),
            reason: format!("identifier must not contain {SEPARATOR:?}"),
        });
    }
    Ok(())
}

/// Forward key for `(space_id, node_id)`.
pub fn cache_key(space_id: &str, node_id: &str) -> String {
    format!("{space_id}{SEPARATOR}{node_id}")
}

/// Reverse key for a cached value.
pub fn reverse_cache_key(value: &str) -> String {
    format!("{SEPARATOR}{value}")
}

/// Split a forward key back into `(space_id, node_id)`.
///
/// Returns `None` unless the key consists of exactly two non-empty parts.
pub fn split_cache_key(key: &str) -> Option<(&str, &str)> {
    let (space_id, node_id) = key.split_once(SEPARATOR)?;
    if space_id.is_empty() || node_id.is_empty() || node_id.contains(SEPARATOR) {
        return None;
    }
    Some((space_id, node_id))
}
