use std::fs::{self, DirBuilder, File};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::{BlobstoreConfig, Placement};
use crate::error::{BlobError, BlobResult};
use crate::placement::{copy_into, rename_or_copy};
use crate::shard::{confine, shard};

/// Directory mode for the root and every shard directory.
#[cfg(unix)]
const DIR_MODE: u32 = 0o700;

/// Filesystem blob store.
///
/// Blobs are addressed by `(space_id, blob_id)` and live at
///
/// ```text
/// <root>/spaces/<shard(space_id, 1, 2)>/blobs/<shard(blob_id, 4, 2)>
/// ```
///
/// The store keeps no state besides its root: the filesystem is the only
/// source of truth and no locking is done. Concurrent uploads to the same
/// blob race at the filesystem level and the last completed write wins.
#[derive(Clone, Debug)]
pub struct Blobstore {
    root: PathBuf,
    placement: Placement,
}

impl Blobstore {
    /// Open a blob store rooted at `root`, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> BlobResult<Self> {
        Self::with_config(BlobstoreConfig::new(root))
    }

    /// Open a blob store from an explicit configuration.
    pub fn with_config(config: BlobstoreConfig) -> BlobResult<Self> {
        create_dirs(&config.root).map_err(|e| BlobError::CreateRoot {
            path: config.root.clone(),
            source: e,
        })?;
        info!(root = %config.root.display(), placement = ?config.placement, "blobstore opened");
        Ok(Self {
            root: config.root,
            placement: config.placement,
        })
    }

    /// The root directory of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The placement strategy used by [`upload`](Self::upload).
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Derive the on-disk location of a blob.
    ///
    /// Fails with a validation error if either identifier is empty. The
    /// result always lies beneath [`root`](Self::root).
    pub fn path(&self, space_id: &str, blob_id: &str) -> BlobResult<PathBuf> {
        if space_id.is_empty() {
            return Err(BlobError::EmptySpaceId);
        }
        if blob_id.is_empty() {
            return Err(BlobError::EmptyBlobId);
        }
        let relative = format!(
            "spaces/{}/blobs/{}",
            shard(space_id, 1, 2),
            shard(blob_id, 4, 2)
        );
        Ok(confine(&self.root, Path::new(&relative)))
    }

    /// Store the content of `source` as the blob `(space_id, blob_id)`.
    ///
    /// Any existing blob is replaced. `blob_size` is not checked here; it is
    /// verified by [`download`](Self::download).
    pub fn upload(
        &self,
        space_id: &str,
        blob_id: &str,
        blob_size: u64,
        source: &Path,
    ) -> BlobResult<()> {
        let dest = self.path(space_id, blob_id)?;
        if let Some(parent) = dest.parent() {
            create_dirs(parent).map_err(|e| BlobError::CreateParent {
                path: dest.clone(),
                source: e,
            })?;
        }

        debug!(space_id, blob_id, blob_size, dest = %dest.display(), "uploading blob");
        match self.placement {
            Placement::RenameOrCopy => rename_or_copy(source, &dest),
            Placement::CopyOnly => copy_into(source, &dest),
        }
    }

    /// Open the blob `(space_id, blob_id)` for reading.
    ///
    /// The on-disk size must equal `blob_size`; a mismatch means the blob was
    /// truncated, corrupted, or is not the one the caller expects, and fails
    /// the call. The returned handle is closed when dropped.
    pub fn download(&self, space_id: &str, blob_id: &str, blob_size: u64) -> BlobResult<File> {
        let path = self.path(space_id, blob_id)?;
        let file = File::open(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => BlobError::NotFound { path: path.clone() },
            _ => BlobError::Read {
                path: path.clone(),
                source: e,
            },
        })?;

        let actual = file
            .metadata()
            .map_err(|e| BlobError::Stat {
                path: path.clone(),
                source: e,
            })?
            .len();
        if actual != blob_size {
            return Err(BlobError::SizeMismatch {
                path,
                expected: blob_size,
                actual,
            });
        }

        Ok(file)
    }

    /// Remove the blob `(space_id, blob_id)`.
    ///
    /// Removing a blob that does not exist succeeds. Emptied shard
    /// directories are left behind.
    pub fn delete(&self, space_id: &str, blob_id: &str) -> BlobResult<()> {
        let path = self.path(space_id, blob_id)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                debug!(space_id, blob_id, path = %path.display(), "blob deleted");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(space_id, blob_id, path = %path.display(), "blob already absent");
                Ok(())
            }
            Err(e) => Err(BlobError::Delete { path, source: e }),
        }
    }
}

fn create_dirs(path: &Path) -> io::Result<()> {
    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(DIR_MODE);
    }
    builder.create(path)
}
