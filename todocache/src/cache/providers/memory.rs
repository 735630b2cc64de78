//! In-memory cache provider using moka.
//!
//! Wraps `moka::future::Cache` for an async-safe, lock-free cache with
//! byte-weighted LRU eviction and optional TTL expiry. Moka handles
//! eviction automatically when the cache exceeds its capacity; `gc()` runs
//! pending maintenance tasks, which tests also use to make the eventually
//! consistent size counters observable.

use std::time::Duration;

use moka::future::Cache as MokaCache;

use crate::cache::traits::{BoxFuture, Cache, CacheError, GcResult};

/// In-memory cache provider backed by moka.
///
/// Entries are weighted by value size so the configured capacity is a byte
/// budget, not an entry count.
pub struct MemoryCacheProvider {
    cache: MokaCache<String, Vec<u8>>,
}

impl MemoryCacheProvider {
    /// Create a provider with the given byte capacity and optional TTL.
    pub fn new(max_size_bytes: u64, ttl: Option<Duration>) -> Self {
        let mut builder = MokaCache::builder()
            .weigher(|_key: &String, value: &Vec<u8>| -> u32 {
                // moka weights are u32; cap oversized values
                value.len().min(u32::MAX as usize) as u32
            })
            .max_capacity(max_size_bytes);

        if let Some(ttl) = ttl {
            builder = builder.time_to_live(ttl);
        }

        Self {
            cache: builder.build(),
        }
    }
}

impl Cache for MemoryCacheProvider {
    fn set(&self, key: &str, value: Vec<u8>) -> BoxFuture<'_, Result<(), CacheError>> {
        let key = key.to_string();
        Box::pin(async move {
            self.cache.insert(key, value).await;
            Ok(())
        })
    }

    fn get(&self, key: &str) -> BoxFuture<'_, Result<Option<Vec<u8>>, CacheError>> {
        let key = key.to_string();
        Box::pin(async move { Ok(self.cache.get(&key).await) })
    }

    fn delete(&self, key: &str) -> BoxFuture<'_, Result<bool, CacheError>> {
        let key = key.to_string();
        Box::pin(async move { Ok(self.cache.remove(&key).await.is_some()) })
    }

    fn contains(&self, key: &str) -> BoxFuture<'_, Result<bool, CacheError>> {
        let key = key.to_string();
        Box::pin(async move { Ok(self.cache.contains_key(&key)) })
    }

    fn size_bytes(&self) -> u64 {
        self.cache.weighted_size()
    }

    fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }

    fn gc(&self) -> BoxFuture<'_, Result<GcResult, CacheError>> {
        Box::pin(async move {
            let start = std::time::Instant::now();
            let size_before = self.cache.weighted_size();
            let count_before = self.cache.entry_count();

            self.cache.run_pending_tasks().await;

            Ok(GcResult {
                entries_removed: count_before.saturating_sub(self.cache.entry_count()) as usize,
                bytes_freed: size_before.saturating_sub(self.cache.weighted_size()),
                duration_ms: start.elapsed().as_millis() as u64,
            })
        })
    }
}
