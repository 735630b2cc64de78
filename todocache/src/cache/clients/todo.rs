//! Todo cache client.
//!
//! Wraps a generic `Cache` with:
//! - Key translation: `TodoId` → `"todo:{id}"`, collection → `"todos:all"`
//! - Serialization through the codec module
//! - A per-operation latency bound
//! - Telemetry injection: hit/miss and degradation reporting
//!
//! This is where the cache layer's failure contract lives: every backend
//! error, timeout or decode failure is logged at `warn` and degraded to a
//! miss (reads) or no-op (writes). Nothing below this layer can fail a
//! caller's request.
//!
//! # Key Format
//!
//! Keys follow the format `todo:{id}` for single items, e.g. `todo:42`.
//! The full collection lives under `todos:all`.

use std::sync::Arc;
use std::time::Duration;

use tracing::warn;

use crate::cache::codec;
use crate::cache::service::DEFAULT_OP_TIMEOUT;
use crate::cache::traits::{Cache, CacheError};
use crate::telemetry::CacheMetrics;
use crate::todo::{Todo, TodoId};

/// Cache key holding the serialized full collection.
pub const COLLECTION_KEY: &str = "todos:all";

/// Cache client for todo storage.
///
/// Cheap to clone; clones share the underlying cache and counters.
#[derive(Clone)]
pub struct TodoCacheClient {
    /// The underlying generic cache.
    cache: Arc<dyn Cache>,

    /// Latency bound applied to each cache call.
    op_timeout: Duration,

    /// Optional telemetry counters.
    metrics: Option<CacheMetrics>,
}

impl TodoCacheClient {
    /// Create a client with the default operation timeout and no telemetry.
    pub fn new(cache: Arc<dyn Cache>) -> Self {
        Self {
            cache,
            op_timeout: DEFAULT_OP_TIMEOUT,
            metrics: None,
        }
    }

    /// Set the per-operation latency bound.
    pub fn with_op_timeout(mut self, timeout: Duration) -> Self {
        self.op_timeout = timeout;
        self
    }

    /// Attach telemetry counters.
    pub fn with_metrics(mut self, metrics: CacheMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Fetch a single todo from cache.
    ///
    /// Any backend error, timeout or decode failure is reported as a miss.
    pub async fn get_item(&self, id: TodoId) -> Option<Todo> {
        let key = Self::item_key(id);
        let result = match self.bounded(self.cache.get(&key)).await {
            Ok(Some(bytes)) => codec::decode_todo(&bytes).map(Some),
            Ok(None) => Ok(None),
            Err(e) => Err(e),
        };

        match result {
            Ok(Some(todo)) => {
                self.record(CacheMetrics::item_hit);
                Some(todo)
            }
            Ok(None) => {
                self.record(CacheMetrics::item_miss);
                None
            }
            Err(e) => {
                warn!(error = %e, key = %key, "Todo cache get failed");
                self.degraded();
                self.record(CacheMetrics::item_miss);
                None
            }
        }
    }

    /// Store a single todo in cache.
    pub async fn set_item(&self, todo: &Todo) {
        let key = Self::item_key(todo.id);
        let outcome = match codec::encode_todo(todo) {
            Ok(bytes) => self.bounded(self.cache.set(&key, bytes)).await,
            Err(e) => Err(e),
        };
        if let Err(e) = outcome {
            warn!(error = %e, key = %key, "Todo cache set failed");
            self.degraded();
        }
    }

    /// Remove a single todo from cache.
    pub async fn delete_item(&self, id: TodoId) {
        let key = Self::item_key(id);
        if let Err(e) = self.bounded(self.cache.delete(&key)).await {
            warn!(error = %e, key = %key, "Todo cache delete failed");
            self.degraded();
        }
    }

    /// Fetch the cached collection, in store listing order.
    pub async fn get_list(&self) -> Option<Vec<Todo>> {
        let result = match self.bounded(self.cache.get(COLLECTION_KEY)).await {
            Ok(Some(bytes)) => codec::decode_todo_list(&bytes).map(Some),
            Ok(None) => Ok(None),
            Err(e) => Err(e),
        };

        match result {
            Ok(Some(todos)) => {
                self.record(CacheMetrics::list_hit);
                Some(todos)
            }
            Ok(None) => {
                self.record(CacheMetrics::list_miss);
                None
            }
            Err(e) => {
                warn!(error = %e, key = COLLECTION_KEY, "Todo collection cache get failed");
                self.degraded();
                self.record(CacheMetrics::list_miss);
                None
            }
        }
    }

    /// Overwrite the cached collection.
    pub async fn set_list(&self, todos: &[Todo]) {
        let outcome = match codec::encode_todo_list(todos) {
            Ok(bytes) => self.bounded(self.cache.set(COLLECTION_KEY, bytes)).await,
            Err(e) => Err(e),
        };
        if let Err(e) = outcome {
            warn!(error = %e, key = COLLECTION_KEY, "Todo collection cache set failed");
            self.degraded();
        }
    }

    /// Invalidate the cached collection.
    pub async fn delete_list(&self) {
        if let Err(e) = self.bounded(self.cache.delete(COLLECTION_KEY)).await {
            warn!(error = %e, key = COLLECTION_KEY, "Todo collection cache delete failed");
            self.degraded();
        }
    }

    /// Convert a todo id to its cache key.
    ///
    /// Format: `todo:{id}`
    fn item_key(id: TodoId) -> String {
        format!("todo:{}", id)
    }

    /// Apply the latency bound to a cache call, mapping elapsed time to a
    /// `CacheError::Timeout`.
    async fn bounded<T>(
        &self,
        op: impl std::future::Future<Output = Result<T, CacheError>>,
    ) -> Result<T, CacheError> {
        match tokio::time::timeout(self.op_timeout, op).await {
            Ok(result) => result,
            Err(_) => Err(CacheError::Timeout {
                elapsed_ms: self.op_timeout.as_millis() as u64,
            }),
        }
    }

    fn record(&self, counter: impl Fn(&CacheMetrics)) {
        if let Some(ref m) = self.metrics {
            counter(m);
        }
    }

    fn degraded(&self) {
        if let Some(ref m) = self.metrics {
            m.swallowed_error();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::traits::BoxFuture;
    use crate::cache::{CacheConfig, CacheService, GcResult};
    use chrono::Utc;

    fn sample(id: u64) -> Todo {
        Todo {
            id: TodoId(id),
            title: format!("todo {}", id),
            description: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// Cache that fails every operation, for degradation tests.
    struct FailingCache;

    impl Cache for FailingCache {
        fn set(&self, _key: &str, _value: Vec<u8>) -> BoxFuture<'_, Result<(), CacheError>> {
            Box::pin(async { Err(CacheError::Provider("down".into())) })
        }

        fn get(&self, _key: &str) -> BoxFuture<'_, Result<Option<Vec<u8>>, CacheError>> {
            Box::pin(async { Err(CacheError::Provider("down".into())) })
        }

        fn delete(&self, _key: &str) -> BoxFuture<'_, Result<bool, CacheError>> {
            Box::pin(async { Err(CacheError::Provider("down".into())) })
        }

        fn contains(&self, _key: &str) -> BoxFuture<'_, Result<bool, CacheError>> {
            Box::pin(async { Err(CacheError::Provider("down".into())) })
        }

        fn size_bytes(&self) -> u64 {
            0
        }

        fn entry_count(&self) -> u64 {
            0
        }

        fn gc(&self) -> BoxFuture<'_, Result<GcResult, CacheError>> {
            Box::pin(async { Err(CacheError::Provider("down".into())) })
        }
    }

    /// Cache whose get never resolves, for timeout tests.
    struct StalledCache;

    impl Cache for StalledCache {
        fn set(&self, _key: &str, _value: Vec<u8>) -> BoxFuture<'_, Result<(), CacheError>> {
            Box::pin(std::future::pending())
        }

        fn get(&self, _key: &str) -> BoxFuture<'_, Result<Option<Vec<u8>>, CacheError>> {
            Box::pin(std::future::pending())
        }

        fn delete(&self, _key: &str) -> BoxFuture<'_, Result<bool, CacheError>> {
            Box::pin(std::future::pending())
        }

        fn contains(&self, _key: &str) -> BoxFuture<'_, Result<bool, CacheError>> {
            Box::pin(std::future::pending())
        }

        fn size_bytes(&self) -> u64 {
            0
        }

        fn entry_count(&self) -> u64 {
            0
        }

        fn gc(&self) -> BoxFuture<'_, Result<GcResult, CacheError>> {
            Box::pin(std::future::pending())
        }
    }

    #[test]
    fn test_item_key_format() {
        assert_eq!(TodoCacheClient::item_key(TodoId(42)), "todo:42");
    }

    #[tokio::test]
    async fn test_item_roundtrip() {
        let service = CacheService::start(CacheConfig::memory(1_000_000, None))
            .await
            .unwrap();
        let client = TodoCacheClient::new(service.cache());

        let todo = sample(1);
        client.set_item(&todo).await;
        assert_eq!(client.get_item(TodoId(1)).await, Some(todo));

        service.shutdown().await;
    }

    #[tokio::test]
    async fn test_get_missing_item() {
        let service = CacheService::start(CacheConfig::memory(1_000_000, None))
            .await
            .unwrap();
        let client = TodoCacheClient::new(service.cache());

        assert!(client.get_item(TodoId(404)).await.is_none());

        service.shutdown().await;
    }

    #[tokio::test]
    async fn test_delete_item() {
        let service = CacheService::start(CacheConfig::memory(1_000_000, None))
            .await
            .unwrap();
        let client = TodoCacheClient::new(service.cache());

        let todo = sample(1);
        client.set_item(&todo).await;
        client.delete_item(TodoId(1)).await;
        assert!(client.get_item(TodoId(1)).await.is_none());

        service.shutdown().await;
    }

    #[tokio::test]
    async fn test_list_roundtrip_preserves_order() {
        let service = CacheService::start(CacheConfig::memory(1_000_000, None))
            .await
            .unwrap();
        let client = TodoCacheClient::new(service.cache());

        let todos = vec![sample(1), sample(2), sample(3)];
        client.set_list(&todos).await;
        assert_eq!(client.get_list().await, Some(todos));

        client.delete_list().await;
        assert!(client.get_list().await.is_none());

        service.shutdown().await;
    }

    #[tokio::test]
    async fn test_corrupt_entry_degrades_to_miss() {
        let service = CacheService::start(CacheConfig::memory(1_000_000, None))
            .await
            .unwrap();
        let cache = service.cache();
        cache.set("todo:1", b"not json".to_vec()).await.unwrap();

        let client = TodoCacheClient::new(Arc::clone(&cache));
        assert!(client.get_item(TodoId(1)).await.is_none());

        service.shutdown().await;
    }

    #[tokio::test]
    async fn test_failing_cache_degrades_and_counts() {
        let metrics = CacheMetrics::new();
        let client =
            TodoCacheClient::new(Arc::new(FailingCache)).with_metrics(metrics.clone());

        let todo = sample(1);
        client.set_item(&todo).await;
        assert!(client.get_item(TodoId(1)).await.is_none());
        client.delete_item(TodoId(1)).await;
        client.set_list(&[todo]).await;
        assert!(client.get_list().await.is_none());
        client.delete_list().await;

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.swallowed_errors, 6);
        assert_eq!(snapshot.item_misses, 1);
        assert_eq!(snapshot.list_misses, 1);
    }

    #[tokio::test]
    async fn test_stalled_cache_times_out_as_miss() {
        let metrics = CacheMetrics::new();
        let client = TodoCacheClient::new(Arc::new(StalledCache))
            .with_op_timeout(Duration::from_millis(10))
            .with_metrics(metrics.clone());

        assert!(client.get_item(TodoId(1)).await.is_none());
        assert_eq!(metrics.snapshot().swallowed_errors, 1);
    }

    #[tokio::test]
    async fn test_metrics_hit_and_miss_counts() {
        let service = CacheService::start(CacheConfig::memory(1_000_000, None))
            .await
            .unwrap();
        let metrics = CacheMetrics::new();
        let client = TodoCacheClient::new(service.cache()).with_metrics(metrics.clone());

        let todo = sample(1);
        client.get_item(TodoId(1)).await; // miss
        client.set_item(&todo).await;
        client.get_item(TodoId(1)).await; // hit

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.item_hits, 1);
        assert_eq!(snapshot.item_misses, 1);

        service.shutdown().await;
    }
}
