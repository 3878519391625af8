use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::time::Instant;

use super::{CacheError, QueryCache};

#[derive(Debug, Clone)]
struct CachedEntry {
    value: Vec<u8>,
    expires_at: Instant,
}

/// Process-local [`QueryCache`] with per-entry expiry.
///
/// Expired entries are dropped lazily on read or by [`purge_expired`](Self::purge_expired).
#[derive(Debug, Default)]
pub struct InMemoryQueryCache {
    entries: DashMap<String, CachedEntry>,
}

impl InMemoryQueryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, live or not yet purged.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every expired entry.
    pub fn purge_expired(&self) {
        let now = Instant::now();
        self.entries.retain(|_, entry| entry.expires_at > now);
    }
}

#[async_trait]
impl QueryCache for InMemoryQueryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let now = Instant::now();
        if let Some(entry) = self.entries.get(key)
            && entry.expires_at > now
        {
            return Ok(Some(entry.value.clone()));
        }
        self.entries
            .remove_if(key, |_, entry| entry.expires_at <= now);
        Ok(None)
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError> {
        let expires_at = Instant::now()
            .checked_add(ttl)
            .ok_or(CacheError::TtlOutOfRange(ttl))?;
        self.entries
            .insert(key.to_owned(), CachedEntry { value, expires_at });
        Ok(())
    }
}
