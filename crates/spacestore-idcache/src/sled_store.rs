//! Persistent key-value backend on top of sled.

use std::path::Path;

use tracing::{info, warn};

use crate::error::IdCacheResult;
use crate::traits::KvStore;

/// A [`KvStore`] persisted in a named sled tree.
pub struct SledStore {
    db: sled::Db,
    tree: sled::Tree,
}

impl SledStore {
    /// Open (or create) the database at `path` and the tree `table` inside it.
    ///
    /// With `temporary` set the database is deleted when the store is dropped.
    pub fn open(path: impl AsRef<Path>, table: &str, temporary: bool) -> IdCacheResult<Self> {
        let path = path.as_ref();
        let db = sled::Config::new()
            .path(path)
            .temporary(temporary)
            .open()?;
        let tree = db.open_tree(table)?;
        info!(path = %path.display(), table, temporary, "sled id cache opened");
        Ok(Self { db, tree })
    }

    /// Open a throwaway database in a fresh temporary location.
    pub fn temporary(table: &str) -> IdCacheResult<Self> {
        let db = sled::Config::new().temporary(true).open()?;
        let tree = db.open_tree(table)?;
        Ok(Self { db, tree })
    }

    /// Flush dirty buffers to disk. Returns the number of bytes flushed.
    pub fn flush(&self) -> IdCacheResult<usize> {
        Ok(self.db.flush()?)
    }

    /// Number of records in the tree.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the tree holds no records.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}

impl KvStore for SledStore {
    fn read(&self, key: &str) -> IdCacheResult<Option<Vec<u8>>> {
        Ok(self.tree.get(key.as_bytes())?.map(|v| v.to_vec()))
    }

    fn write(&self, key: &str, value: &[u8]) -> IdCacheResult<()> {
        self.tree.insert(key.as_bytes(), value)?;
        Ok(())
    }

    fn delete(&self, key: &str) -> IdCacheResult<bool> {
        Ok(self.tree.remove(key.as_bytes())?.is_some())
    }
}

impl Drop for SledStore {
    fn drop(&mut self) {
        if let Err(e) = self.db.flush() {
            warn!(error = %e, "failed to flush sled id cache on close");
        }
    }
}

impl std::fmt::Debug for SledStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SledStore")
            .field("tree", &String::from_utf8_lossy(&self.tree.name()))
            .field("records", &self.tree.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn write_read_delete() {
        let store = SledStore::temporary("idcache").unwrap();
        store.write("k", b"v").unwrap();
        assert_eq!(store.read("k").unwrap(), Some(b"v".to_vec()));
        assert_eq!(store.len(), 1);
        assert!(store.delete("k").unwrap());
        assert!(!store.delete("k").unwrap());
        assert_eq!(store.read("k").unwrap(), None);
    }

    #[test]
    fn records_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ids");
        {
            let store = SledStore::open(&path, "idcache", false).unwrap();
            store.write("space!node", b"value").unwrap();
            store.flush().unwrap();
        }
        let store = SledStore::open(&path, "idcache", false).unwrap();
        assert_eq!(store.read("space!node").unwrap(), Some(b"value".to_vec()));
    }

    #[test]
    fn tables_are_separate() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ids");
        let store = SledStore::open(&path, "one", false).unwrap();
        store.write("k", b"v").unwrap();
        drop(store);

        let other = SledStore::open(&path, "two", false).unwrap();
        assert_eq!(other.read("k").unwrap(), None);
    }

    #[test]
    fn debug_format() {
        let store = SledStore::temporary("idcache").unwrap();
        let debug = format!("{store:?}");
        assert!(debug.contains("SledStore"));
        assert!(debug.contains("idcache"));
    }
}
