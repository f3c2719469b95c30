use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::IdCacheResult;
use crate::memory::MemoryStore;
use crate::noop::NoopStore;
use crate::sled_store::SledStore;
use crate::traits::KvStore;

/// Which backend the identifier cache is built on.
///
/// Networked backends are not selectable here; construct them yourself and
/// hand them to [`StoreIdCache::with_store`](crate::StoreIdCache::with_store).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StoreKind {
    /// Process-local [`MemoryStore`].
    #[default]
    Memory,
    /// On-disk [`SledStore`].
    Sled,
    /// [`NoopStore`]: caching disabled.
    Noop,
}

impl std::fmt::Display for StoreKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::Sled => write!(f, "sled"),
            Self::Noop => write!(f, "noop"),
        }
    }
}

/// Configuration for the identifier cache backend.
///
/// Only `store` is interpreted by this crate; the remaining fields are
/// passed to whichever backend it selects.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IdCacheConfig {
    /// Backend selector.
    pub store: StoreKind,
    /// Backend node addresses. For `sled`, the first entry is the directory
    /// holding the database.
    pub nodes: Vec<String>,
    /// Database name (for `sled`, the database directory under the node).
    pub database: String,
    /// Table or namespace name (for `sled`, the tree name).
    pub table: String,
    /// Maximum number of cached entries, `0` for no limit.
    pub size: usize,
    /// Keep entries in a temporary location only.
    pub disable_persistence: bool,
    /// Optional backend user name.
    pub auth_username: Option<String>,
    /// Optional backend password.
    pub auth_password: Option<String>,
}

impl Default for IdCacheConfig {
    fn default() -> Self {
        Self {
            store: StoreKind::default(),
            nodes: Vec::new(),
            database: "spacestore".into(),
            table: "idcache".into(),
            size: 0,
            disable_persistence: false,
            auth_username: None,
            auth_password: None,
        }
    }
}

impl std::fmt::Debug for IdCacheConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdCacheConfig")
            .field("store", &self.store)
            .field("nodes", &self.nodes)
            .field("database", &self.database)
            .field("table", &self.table)
            .field("size", &self.size)
            .field("disable_persistence", &self.disable_persistence)
            .field("auth_username", &self.auth_username)
            .field("auth_password", &self.auth_password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl IdCacheConfig {
    /// Config selecting `store` with all other fields at their defaults.
    pub fn new(store: StoreKind) -> Self {
        Self {
            store,
            ..Default::default()
        }
    }

    /// Location of the sled database: `<nodes[0] or .>/<database>`.
    pub fn sled_path(&self) -> PathBuf {
        let node = self.nodes.first().map(String::as_str).unwrap_or(".");
        PathBuf::from(node).join(&self.database)
    }

    /// Build the backend this configuration selects.
    pub fn open_store(&self) -> IdCacheResult<Arc<dyn KvStore>> {
        if self.auth_username.is_some() || self.auth_password.is_some() {
            debug!(store = %self.store, "local backend ignores authentication credentials");
        }
        let store: Arc<dyn KvStore> = match self.store {
            StoreKind::Memory => Arc::new(MemoryStore::with_capacity(self.size)),
            StoreKind::Sled => Arc::new(SledStore::open(
                self.sled_path(),
                &self.table,
                self.disable_persistence,
            )?),
            StoreKind::Noop => Arc::new(NoopStore),
        };
        Ok(store)
    }
}
