//! Cache service lifecycle.
//!
//! `CacheService` owns a cache provider and its periodic maintenance daemon.
//! Starting the service spawns the daemon; shutting it down cancels the
//! daemon and waits for it to exit. Consumers only ever see the provider as
//! an `Arc<dyn Cache>`, so the service can swap backends without touching
//! callers.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::providers::MemoryCacheProvider;
use super::traits::{Cache, CacheError};

/// Default per-operation latency bound for cache calls.
pub const DEFAULT_OP_TIMEOUT: Duration = Duration::from_millis(250);

/// Default interval between maintenance passes.
pub const DEFAULT_MAINTENANCE_INTERVAL: Duration = Duration::from_secs(60);

/// Configuration for a cache service instance.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum cache size in bytes.
    pub max_size_bytes: u64,

    /// Optional time-to-live for entries.
    pub entry_ttl: Option<Duration>,

    /// Latency bound applied to each cache operation by client layers.
    pub op_timeout: Duration,

    /// How often the maintenance daemon runs pending eviction/expiry work.
    pub maintenance_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            // 64 MB holds far more todo payloads than any realistic set
            max_size_bytes: 64 * 1024 * 1024,
            entry_ttl: None,
            op_timeout: DEFAULT_OP_TIMEOUT,
            maintenance_interval: DEFAULT_MAINTENANCE_INTERVAL,
        }
    }
}

impl CacheConfig {
    /// Create a config with the given byte capacity and optional TTL.
    pub fn memory(max_size_bytes: u64, entry_ttl: Option<Duration>) -> Self {
        Self {
            max_size_bytes,
            entry_ttl,
            ..Self::default()
        }
    }

    /// Set the per-operation latency bound.
    pub fn with_op_timeout(mut self, timeout: Duration) -> Self {
        self.op_timeout = timeout;
        self
    }

    /// Set the maintenance interval.
    pub fn with_maintenance_interval(mut self, interval: Duration) -> Self {
        self.maintenance_interval = interval;
        self
    }

    /// Set the entry TTL.
    pub fn with_entry_ttl(mut self, ttl: Duration) -> Self {
        self.entry_ttl = Some(ttl);
        self
    }
}

/// A running cache service: provider plus maintenance daemon.
pub struct CacheService {
    cache: Arc<dyn Cache>,
    config: CacheConfig,
    cancellation: CancellationToken,
    daemon: Option<JoinHandle<()>>,
}

impl CacheService {
    /// Start the service: build the provider and spawn the maintenance daemon.
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn start(config: CacheConfig) -> Result<Self, CacheError> {
        let cache: Arc<dyn Cache> = Arc::new(MemoryCacheProvider::new(
            config.max_size_bytes,
            config.entry_ttl,
        ));

        let cancellation = CancellationToken::new();
        let daemon = spawn_maintenance_daemon(
            Arc::clone(&cache),
            config.maintenance_interval,
            cancellation.clone(),
        );

        info!(
            max_size_bytes = config.max_size_bytes,
            maintenance_interval_secs = config.maintenance_interval.as_secs(),
            "Cache service started"
        );

        Ok(Self {
            cache,
            config,
            cancellation,
            daemon: Some(daemon),
        })
    }

    /// Handle to the underlying cache.
    pub fn cache(&self) -> Arc<dyn Cache> {
        Arc::clone(&self.cache)
    }

    /// The configuration the service was started with.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Stop the maintenance daemon and release the provider.
    pub async fn shutdown(mut self) {
        self.cancellation.cancel();
        if let Some(daemon) = self.daemon.take() {
            if let Err(e) = daemon.await {
                warn!(error = %e, "Cache maintenance daemon did not shut down cleanly");
            }
        }
        info!("Cache service shut down");
    }
}

/// Spawn the periodic maintenance task.
fn spawn_maintenance_daemon(
    cache: Arc<dyn Cache>,
    interval: Duration,
    cancellation: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately; skip it so startup isn't
        // followed by a pointless maintenance pass.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = cancellation.cancelled() => {
                    debug!("Cache maintenance daemon cancelled");
                    break;
                }
                _ = ticker.tick() => {
                    match cache.gc().await {
                        Ok(result) if result.entries_removed > 0 => {
                            debug!(
                                entries_removed = result.entries_removed,
                                bytes_freed = result.bytes_freed,
                                "Cache maintenance pass complete"
                            );
                        }
                        Ok(_) => {}
                        Err(e) => {
                            warn!(error = %e, "Cache maintenance pass failed");
                        }
                    }
                }
            }
        }
    })
}
