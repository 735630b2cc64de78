//! No-op cache provider.
//!
//! Used when caching is disabled by configuration: every read misses and
//! every write is discarded, so the coordinator runs against the record
//! store alone without a special code path.

use crate::cache::traits::{BoxFuture, Cache, CacheError, GcResult};

/// Cache provider that stores nothing.
pub struct NoopCacheProvider;

impl Cache for NoopCacheProvider {
    fn set(&self, _key: &str, _value: Vec<u8>) -> BoxFuture<'_, Result<(), CacheError>> {
        Box::pin(async { Ok(()) })
    }

    fn get(&self, _key: &str) -> BoxFuture<'_, Result<Option<Vec<u8>>, CacheError>> {
        Box::pin(async { Ok(None) })
    }

    fn delete(&self, _key: &str) -> BoxFuture<'_, Result<bool, CacheError>> {
        Box::pin(async { Ok(false) })
    }

    fn contains(&self, _key: &str) -> BoxFuture<'_, Result<bool, CacheError>> {
        Box::pin(async { Ok(false) })
    }

    fn size_bytes(&self) -> u64 {
        0
    }

    fn entry_count(&self) -> u64 {
        0
    }

    fn gc(&self) -> BoxFuture<'_, Result<GcResult, CacheError>> {
        Box::pin(async { Ok(GcResult::default()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_everything_misses() {
        let provider = NoopCacheProvider;

        provider.set("todo:1", vec![1, 2, 3]).await.unwrap();
        assert!(provider.get("todo:1").await.unwrap().is_none());
        assert!(!provider.contains("todo:1").await.unwrap());
        assert!(!provider.delete("todo:1").await.unwrap());
        assert_eq!(provider.entry_count(), 0);
    }
}
