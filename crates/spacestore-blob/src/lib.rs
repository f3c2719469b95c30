//! Sharded filesystem blob storage for Spacestore.
//!
//! Blob content is persisted as plain files beneath a configured root. Each
//! blob is addressed by the pair `(space_id, blob_id)`; its location is a
//! pure function of that pair:
//!
//! ```text
//! <root>/spaces/<shard(space_id, 1, 2)>/blobs/<shard(blob_id, 4, 2)>
//! ```
//!
//! # Operations
//!
//! - [`Blobstore::upload`] -- move or copy a source file into place,
//!   replacing any previous blob
//! - [`Blobstore::download`] -- open a blob after checking its size against
//!   the size the caller expects
//! - [`Blobstore::delete`] -- remove a blob file
//!
//! # Design Rules
//!
//! 1. The filesystem is the only source of truth; nothing is cached.
//! 2. Uploads rename when possible and stream-copy otherwise.
//! 3. No locking: concurrent writers race and the last write wins.
//! 4. Failures are returned with the blob path attached and never retried.

pub mod config;
pub mod error;
pub mod placement;
pub mod shard;
pub mod store;

pub use config::{BlobstoreConfig, Placement};
pub use error::{BlobError, BlobResult};
pub use placement::{copy_into, rename_or_copy};
pub use shard::shard;
pub use store::Blobstore;
