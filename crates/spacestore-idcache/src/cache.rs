use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::IdCacheConfig;
use crate::error::IdCacheResult;
use crate::keys::{cache_key, reverse_cache_key, split_cache_key, validate_identifier, SEPARATOR};
use crate::traits::{IdCache, KvStore};

/// [`IdCache`] over any [`KvStore`] backend.
///
/// Each association is stored as two independent records, a forward record
/// `{space_id}!{node_id} -> value` and a reverse record
/// `!{value} -> {space_id}!{node_id}`. They are not written in a
/// transaction, so concurrent readers may observe one without the other.
#[derive(Clone)]
pub struct StoreIdCache {
    store: Arc<dyn KvStore>,
}

impl StoreIdCache {
    /// Build the cache on the backend selected by `config`.
    pub fn new(config: &IdCacheConfig) -> IdCacheResult<Self> {
        Ok(Self::with_store(config.open_store()?))
    }

    /// Build the cache on a caller-supplied backend.
    pub fn with_store(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// The underlying backend.
    pub fn store(&self) -> &Arc<dyn KvStore> {
        &self.store
    }

    fn read_string(&self, key: &str) -> Option<String> {
        match self.store.read(key) {
            Ok(Some(bytes)) => match String::from_utf8(bytes) {
                Ok(s) => Some(s),
                Err(_) => {
                    warn!(key, "id cache record is not valid UTF-8; treating as miss");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(key, error = %e, "id cache read failed; treating as miss");
                None
            }
        }
    }
}

fn is_key_safe(id: &str) -> bool {
    !id.is_empty() && !id.contains(SEPARATOR)
}

impl IdCache for StoreIdCache {
    fn set(&self, space_id: &str, node_id: &str, value: &str) -> IdCacheResult<()> {
        validate_identifier(space_id)?;
        validate_identifier(node_id)?;

        let key = cache_key(space_id, node_id);
        self.store.write(&key, value.as_bytes())?;

        // The forward record is already in place; a failure here leaves it
        // without a reverse counterpart. It is not rolled back.
        if let Err(e) = self.store.write(&reverse_cache_key(value), key.as_bytes()) {
            warn!(key = %key, error = %e, "id cache reverse write failed after forward write");
            return Err(e);
        }

        debug!(space_id, node_id, "id cache set");
        Ok(())
    }

    fn get(&self, space_id: &str, node_id: &str) -> Option<String> {
        if !is_key_safe(space_id) || !is_key_safe(node_id) {
            return None;
        }
        let value = self.read_string(&cache_key(space_id, node_id));
        debug!(space_id, node_id, hit = value.is_some(), "id cache get");
        value
    }

    fn get_reverse(&self, value: &str) -> Option<(String, String)> {
        let key = self.read_string(&reverse_cache_key(value))?;
        match split_cache_key(&key) {
            Some((space_id, node_id)) => Some((space_id.to_string(), node_id.to_string())),
            None => {
                warn!(record = %key, "malformed reverse id cache record; treating as miss");
                None
            }
        }
    }

    fn invalidate(&self, space_id: &str, node_id: &str) -> IdCacheResult<()> {
        validate_identifier(space_id)?;
        validate_identifier(node_id)?;

        let key = cache_key(space_id, node_id);
        let value = self
            .store
            .read(&key)?
            .and_then(|bytes| String::from_utf8(bytes).ok());
        self.store.delete(&key)?;

        if let Some(value) = value {
            let reverse = reverse_cache_key(&value);
            // Only drop the reverse record if it still points at this pair;
            // a later set may have re-pointed it.
            let points_here = self.store.read(&reverse)?.as_deref() == Some(key.as_bytes());
            if points_here {
                self.store.delete(&reverse)?;
            }
        }

        debug!(space_id, node_id, "id cache invalidated");
        Ok(())
    }
}

impl std::fmt::Debug for StoreIdCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreIdCache").finish_non_exhaustive()
    }
}
