use super::{CacheBackend, CacheError};
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Clone)]
struct Entry {
    value: Arc<[u8]>,
    expires_at: Instant,
}

/// In-process cache for running without Redis.
///
/// Expiry is checked against tokio's clock on every read, so an entry set at
/// `T0` with a 10s TTL is gone for any read at or after `T0 + 10s`. moka's
/// own `time_to_live` runs on a separate clock that paused tokio time cannot
/// drive.
pub struct MemoryCache {
    entries: Cache<String, Entry>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self {
            entries: Cache::builder().max_capacity(1_000).build(),
        }
    }
}

impl Default for MemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheBackend for MemoryCache {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let Some(entry) = self.entries.get(key).await else {
            return Ok(None);
        };
        if Instant::now() >= entry.expires_at {
            self.entries.invalidate(key).await;
            return Ok(None);
        }
        Ok(Some(entry.value.to_vec()))
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), CacheError> {
        let entry = Entry {
            value: Arc::from(value),
            expires_at: Instant::now() + ttl,
        };
        self.entries.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.entries.invalidate(key).await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(10);

    #[tokio::test(start_paused = true)]
    async fn test_entry_visible_until_ttl() {
        let cache = MemoryCache::new();
        cache.set("meals", b"[1]", TTL).await.unwrap();

        tokio::time::advance(Duration::from_millis(9_999)).await;
        assert_eq!(cache.get("meals").await.unwrap(), Some(b"[1]".to_vec()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_entry_absent_at_ttl() {
        let cache = MemoryCache::new();
        cache.set("meals", b"[1]", TTL).await.unwrap();

        tokio::time::advance(TTL).await;
        assert_eq!(cache.get("meals").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_replaces_value_and_resets_ttl() {
        let cache = MemoryCache::new();
        cache.set("meals", b"[1]", TTL).await.unwrap();
        tokio::time::advance(Duration::from_secs(6)).await;
        cache.set("meals", b"[2,1]", TTL).await.unwrap();
        tokio::time::advance(Duration::from_secs(6)).await;

        assert_eq!(cache.get("meals").await.unwrap(), Some(b"[2,1]".to_vec()));
    }

    #[tokio::test]
    async fn test_delete_removes_entry() {
        let cache = MemoryCache::new();
        cache.set("meals", b"[]", TTL).await.unwrap();
        cache.delete("meals").await.unwrap();
        assert_eq!(cache.get("meals").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_missing_key_is_ok() {
        let cache = MemoryCache::new();
        assert!(cache.delete("meals").await.is_ok());
    }
}
