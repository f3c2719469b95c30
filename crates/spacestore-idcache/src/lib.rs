//! Bidirectional identifier cache for Spacestore.
//!
//! The metadata layer repeatedly resolves `(space_id, node_id)` pairs to
//! opaque values and back. This crate caches both directions on top of a
//! swappable key-value backend so those lookups can skip a metadata scan.
//!
//! The cache is an accelerator, never a source of truth: lookups return
//! `None` on absence *and* on backend failure, and callers fall back to
//! authoritative resolution.
//!
//! # Modules
//!
//! - [`error`] — Error types for cache writes and backend setup
//! - [`traits`] — The [`KvStore`] backend trait and the [`IdCache`] interface
//! - [`keys`] — Forward/reverse key construction and parsing
//! - [`cache`] — [`StoreIdCache`], the [`IdCache`] implementation
//! - [`config`] — [`IdCacheConfig`] and backend selection
//! - [`memory`] — Bounded in-memory [`MemoryStore`]
//! - [`sled_store`] — Persistent [`SledStore`]
//! - [`noop`] — [`NoopStore`], which disables caching

pub mod cache;
pub mod config;
pub mod error;
pub mod keys;
pub mod memory;
pub mod noop;
pub mod sled_store;
pub mod traits;

pub use cache::StoreIdCache;
pub use config::{IdCacheConfig, StoreKind};
pub use error::{IdCacheError, IdCacheResult};
pub use memory::MemoryStore;
pub use noop::NoopStore;
pub use sled_store::SledStore;
pub use traits::{IdCache, KvStore};
