//! Atomic counters for cache behavior.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use super::snapshot::TelemetrySnapshot;

/// Shared, lock-free counters recording how the cache layer behaves.
///
/// Cloning is cheap: all clones share the same counters.
#[derive(Clone, Default)]
pub struct CacheMetrics {
    inner: Arc<Counters>,
}

#[derive(Default)]
struct Counters {
    item_hits: AtomicU64,
    item_misses: AtomicU64,
    list_hits: AtomicU64,
    list_misses: AtomicU64,
    swallowed_errors: AtomicU64,
}

impl CacheMetrics {
    /// Create a fresh set of counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// A single-item cache lookup was served from cache.
    pub fn item_hit(&self) {
        self.inner.item_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// A single-item cache lookup missed.
    pub fn item_miss(&self) {
        self.inner.item_misses.fetch_add(1, Ordering::Relaxed);
    }

    /// A collection cache lookup was served from cache.
    pub fn list_hit(&self) {
        self.inner.list_hits.fetch_add(1, Ordering::Relaxed);
    }

    /// A collection cache lookup missed.
    pub fn list_miss(&self) {
        self.inner.list_misses.fetch_add(1, Ordering::Relaxed);
    }

    /// A cache error or timeout was logged and degraded to a miss/no-op.
    pub fn swallowed_error(&self) {
        self.inner.swallowed_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a point-in-time copy of all counters.
    pub fn snapshot(&self) -> TelemetrySnapshot {
        TelemetrySnapshot {
            item_hits: self.inner.item_hits.load(Ordering::Relaxed),
            item_misses: self.inner.item_misses.load(Ordering::Relaxed),
            list_hits: self.inner.list_hits.load(Ordering::Relaxed),
            list_misses: self.inner.list_misses.load(Ordering::Relaxed),
            swallowed_errors: self.inner.swallowed_errors.load(Ordering::Relaxed),
        }
    }
}
