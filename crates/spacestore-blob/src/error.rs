use std::io;
use std::path::PathBuf;

/// Errors from blob store operations.
///
/// Validation errors (`EmptySpaceId`, `EmptyBlobId`) indicate a caller bug.
/// Everything else is caused by the environment and carries the blob path
/// that was being operated on.
#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    /// Path derivation was called with an empty space ID.
    #[error("blobstore: spaceID is empty")]
    EmptySpaceId,

    /// Path derivation was called with an empty blob ID.
    #[error("blobstore: blobID is empty")]
    EmptyBlobId,

    /// The blob store root could not be created.
    #[error("could not create blobstore root '{path}': {source}")]
    CreateRoot { path: PathBuf, source: io::Error },

    /// Parent shard directories for a blob could not be created.
    #[error("error creating parent folders for blob '{path}': {source}")]
    CreateParent { path: PathBuf, source: io::Error },

    /// The upload source could not be opened.
    #[error("can not open source file '{path}' to upload: {source}")]
    OpenSource { path: PathBuf, source: io::Error },

    /// The blob file could not be opened for writing.
    #[error("could not open blob '{path}' for writing: {source}")]
    OpenForWrite { path: PathBuf, source: io::Error },

    /// Copying bytes into the blob file failed.
    #[error("could not write blob '{path}': {source}")]
    Write { path: PathBuf, source: io::Error },

    /// No blob exists at the derived path.
    #[error("blob '{path}' not found")]
    NotFound { path: PathBuf },

    /// The blob file exists but could not be opened for reading.
    #[error("could not read blob '{path}': {source}")]
    Read { path: PathBuf, source: io::Error },

    /// The blob file could not be stat'ed.
    #[error("could not stat blob '{path}': {source}")]
    Stat { path: PathBuf, source: io::Error },

    /// The stored blob does not have the size the caller declared.
    #[error("blob '{path}' has unexpected size. {expected} bytes expected, got {actual} bytes")]
    SizeMismatch {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },

    /// The blob file could not be removed.
    #[error("could not delete blob '{path}': {source}")]
    Delete { path: PathBuf, source: io::Error },
}

impl BlobError {
    /// Returns `true` for errors caused by invalid caller input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::EmptySpaceId | Self::EmptyBlobId)
    }

    /// Returns `true` if the blob does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Returns `true` if the stored size disagreed with the declared size.
    pub fn is_integrity(&self) -> bool {
        matches!(self, Self::SizeMismatch { .. })
    }
}

/// Result alias for blob store operations.
pub type BlobResult<T> = Result<T, BlobError>;
