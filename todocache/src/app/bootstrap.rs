//! Application bootstrap implementation.
//!
//! `TodoApp` performs the startup sequence in order: cache service first,
//! then the store handle, then the coordinator wired over both. The
//! coordinator never owns either lifecycle: it receives handles and the
//! app keeps ownership, mirroring how the process shuts the pieces down in
//! reverse order.

use std::sync::Arc;

use tracing::info;

use crate::cache::clients::TodoCacheClient;
use crate::cache::providers::NoopCacheProvider;
use crate::cache::{Cache, CacheService};
use crate::coordinator::TodoCoordinator;
use crate::store::{MemoryRecordStore, RecordStore};
use crate::telemetry::{CacheMetrics, TelemetrySnapshot};

use super::config::AppConfig;
use super::error::AppError;

/// A fully wired todo application.
///
/// # Example
///
/// ```ignore
/// use todocache::app::{AppConfig, TodoApp};
///
/// let app = TodoApp::start(AppConfig::new()).await?;
/// let todo = app.coordinator().create(draft).await?;
/// app.shutdown().await;
/// ```
pub struct TodoApp {
    /// Cache service, present when caching is enabled.
    cache_service: Option<CacheService>,

    /// The coordinator exposed to callers.
    coordinator: Arc<TodoCoordinator>,

    /// Cache telemetry counters.
    metrics: CacheMetrics,
}

impl std::fmt::Debug for TodoApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TodoApp")
            .field("cache_enabled", &self.cache_service.is_some())
            .finish()
    }
}

impl TodoApp {
    /// Start the application with the bundled in-memory record store.
    pub async fn start(config: AppConfig) -> Result<Self, AppError> {
        Self::start_with_store(config, Arc::new(MemoryRecordStore::new())).await
    }

    /// Start the application over an injected record store.
    ///
    /// The store handle is shared; the caller may keep a reference for
    /// direct access (tests do).
    pub async fn start_with_store(
        config: AppConfig,
        store: Arc<dyn RecordStore>,
    ) -> Result<Self, AppError> {
        if config.cache_enabled && config.cache.max_size_bytes == 0 {
            return Err(AppError::Config(
                "cache enabled with zero capacity".to_string(),
            ));
        }

        let metrics = CacheMetrics::new();

        // 1. Cache service first, so its maintenance daemon is running
        //    before any traffic arrives
        let (cache_service, cache_handle): (Option<CacheService>, Arc<dyn Cache>) =
            if config.cache_enabled {
                let service = CacheService::start(config.cache.clone()).await?;
                let handle = service.cache();
                (Some(service), handle)
            } else {
                info!("Cache disabled by configuration; running store-only");
                (None, Arc::new(NoopCacheProvider))
            };

        // 2. Coordinator over the injected handles
        let client = TodoCacheClient::new(cache_handle)
            .with_op_timeout(config.cache.op_timeout)
            .with_metrics(metrics.clone());
        let coordinator = Arc::new(TodoCoordinator::new(store, client));

        info!(cache_enabled = config.cache_enabled, "TodoApp started");

        Ok(Self {
            cache_service,
            coordinator,
            metrics,
        })
    }

    /// The coordinator handle callers issue operations through.
    pub fn coordinator(&self) -> Arc<TodoCoordinator> {
        Arc::clone(&self.coordinator)
    }

    /// Point-in-time cache telemetry.
    pub fn telemetry(&self) -> TelemetrySnapshot {
        self.metrics.snapshot()
    }

    /// Shut the application down, stopping the cache service last-started
    /// first.
    pub async fn shutdown(self) {
        if let Some(service) = self.cache_service {
            service.shutdown().await;
        }
        info!("TodoApp shutdown complete");
    }
}
