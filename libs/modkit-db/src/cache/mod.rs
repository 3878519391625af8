//! Query result caching.
//!
//! The cache is reached only through canonical keys produced by a
//! [`CacheKeyGenerator`]; values are opaque bytes.

mod key;
mod memory;

use std::time::Duration;

use async_trait::async_trait;

pub use key::{CacheKeyGenerator, LeafKey, id_filter_key, tenant_key};
pub use memory::InMemoryQueryCache;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    #[error("cache unavailable: {0}")]
    Unavailable(String),

    #[error("cache ttl {0:?} is out of range")]
    TtlOutOfRange(Duration),
}

/// Cache collaborator.
///
/// Concurrent writers of the same key overwrite each other; values stored
/// under one key are interchangeable.
#[async_trait]
pub trait QueryCache: Send + Sync {
    /// Fetch a live entry.
    ///
    /// # Errors
    ///
    /// [`CacheError::Unavailable`] if the backend cannot be reached.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError>;

    /// Store `value` under `key` for `ttl`.
    ///
    /// # Errors
    ///
    /// [`CacheError::Unavailable`] if the backend cannot be reached,
    /// [`CacheError::TtlOutOfRange`] if `ttl` cannot be represented as an
    /// expiry.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError>;
}
