//! In-memory key-value backend.
//!
//! [`MemoryStore`] keeps records in a `HashMap` behind a `RwLock`. It can be
//! bounded to a maximum number of entries, in which case the least recently
//! written entry is evicted first. Data is lost when the store is dropped.

use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use tracing::trace;

use crate::error::{IdCacheError, IdCacheResult};
use crate::traits::KvStore;

#[derive(Debug, Default)]
struct Inner {
    /// key -> (value, write sequence number)
    entries: HashMap<String, (Vec<u8>, u64)>,
    /// write sequence number -> key, oldest first
    order: BTreeMap<u64, String>,
    next_seq: u64,
}

/// An in-memory implementation of [`KvStore`].
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    /// Maximum number of entries; `0` means unbounded.
    capacity: usize,
}

impl MemoryStore {
    /// Create an unbounded store.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a store holding at most `capacity` entries (`0` = unbounded).
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            capacity,
        }
    }

    /// The configured entry limit (`0` = unbounded).
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.inner.read().map(|i| i.entries.len()).unwrap_or(0)
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> IdCacheError {
    IdCacheError::LockPoisoned(e.to_string())
}

impl KvStore for MemoryStore {
    fn read(&self, key: &str) -> IdCacheResult<Option<Vec<u8>>> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.entries.get(key).map(|(value, _)| value.clone()))
    }

    fn write(&self, key: &str, value: &[u8]) -> IdCacheResult<()> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        let seq = inner.next_seq;
        inner.next_seq += 1;

        if let Some((_, old_seq)) = inner.entries.insert(key.to_string(), (value.to_vec(), seq)) {
            inner.order.remove(&old_seq);
        }
        inner.order.insert(seq, key.to_string());

        while self.capacity > 0 && inner.entries.len() > self.capacity {
            let Some((_, evicted)) = inner.order.pop_first() else {
                break;
            };
            inner.entries.remove(&evicted);
            trace!(key = %evicted, "evicted cache entry");
        }
        Ok(())
    }

    fn delete(&self, key: &str) -> IdCacheResult<bool> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        match inner.entries.remove(key) {
            Some((_, seq)) => {
                inner.order.remove(&seq);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_and_read() {
        let store = MemoryStore::new();
        store.write("k", b"v").unwrap();
        assert_eq!(store.read("k").unwrap(), Some(b"v".to_vec()));
    }

    #[test]
    fn read_missing_returns_none() {
        let store = MemoryStore::new();
        assert_eq!(store.read("missing").unwrap(), None);
    }

    #[test]
    fn write_replaces() {
        let store = MemoryStore::new();
        store.write("k", b"one").unwrap();
        store.write("k", b"two").unwrap();
        assert_eq!(store.read("k").unwrap(), Some(b"two".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn delete_reports_presence() {
        let store = MemoryStore::new();
        store.write("k", b"v").unwrap();
        assert!(store.delete("k").unwrap());
        assert!(!store.delete("k").unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn bounded_store_evicts_oldest_write() {
        let store = MemoryStore::with_capacity(2);
        store.write("a", b"1").unwrap();
        store.write("b", b"2").unwrap();
        // Rewriting `a` makes `b` the oldest entry.
        store.write("a", b"1'").unwrap();
        store.write("c", b"3").unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.read("b").unwrap(), None);
        assert_eq!(store.read("a").unwrap(), Some(b"1'".to_vec()));
        assert_eq!(store.read("c").unwrap(), Some(b"3".to_vec()));
    }

    #[test]
    fn unbounded_store_keeps_everything() {
        let store = MemoryStore::new();
        for i in 0..1000 {
            store.write(&format!("k{i}"), b"v").unwrap();
        }
        assert_eq!(store.len(), 1000);
        assert_eq!(store.capacity(), 0);
    }

    #[test]
    fn delete_then_evict_keeps_order_consistent() {
        let store = MemoryStore::with_capacity(2);
        store.write("a", b"1").unwrap();
        store.write("b", b"2").unwrap();
        store.delete("a").unwrap();
        store.write("c", b"3").unwrap();
        store.write("d", b"4").unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.read("b").unwrap(), None);
        assert!(store.read("c").unwrap().is_some());
        assert!(store.read("d").unwrap().is_some());
    }
}
