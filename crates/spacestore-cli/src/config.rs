use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use spacestore_blob::BlobstoreConfig;
use spacestore_idcache::IdCacheConfig;

/// Top-level configuration file.
///
/// ```toml
/// [blobstore]
/// root = "/var/lib/spacestore"
/// placement = "rename-or-copy"
///
/// [idcache]
/// store = "sled"
/// nodes = ["/var/cache/spacestore"]
/// table = "ids"
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub blobstore: BlobstoreConfig,
    pub idcache: IdCacheConfig,
}

impl Config {
    /// Load `path`, or fall back to defaults when no file is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
