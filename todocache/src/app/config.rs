//! Application configuration.
//!
//! `AppConfig` is the single configuration surface handed to
//! `TodoApp::start()`; component configs hang off it so every part of the
//! process is configured consistently.

use std::time::Duration;

use crate::cache::CacheConfig;

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Whether the cache layer is active at all.
    ///
    /// When false the coordinator runs store-only; no cache service is
    /// started and every lookup goes to the record store.
    pub cache_enabled: bool,

    /// Cache service configuration, ignored when the cache is disabled.
    pub cache: CacheConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            cache: CacheConfig::default(),
        }
    }
}

impl AppConfig {
    /// Config with defaults: cache enabled at default capacity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cache configuration.
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }

    /// Disable the cache layer entirely.
    pub fn with_cache_disabled(mut self) -> Self {
        self.cache_enabled = false;
        self
    }

    /// Set the per-operation cache latency bound.
    pub fn with_cache_op_timeout(mut self, timeout: Duration) -> Self {
        self.cache.op_timeout = timeout;
        self
    }
}
