use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How an upload moves its source file into the blob location.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    /// Rename the source into place, stream-copy if the rename fails
    /// (for example across filesystems).
    #[default]
    RenameOrCopy,
    /// Always stream-copy and leave the source file untouched.
    CopyOnly,
}

/// Configuration for a [`Blobstore`](crate::Blobstore).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlobstoreConfig {
    /// Directory under which the `spaces/` tree is created.
    pub root: PathBuf,
    /// Upload placement strategy.
    pub placement: Placement,
}

impl Default for BlobstoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("blobstore"),
            placement: Placement::default(),
        }
    }
}

impl BlobstoreConfig {
    /// Config rooted at `root` with the default placement.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }
}
