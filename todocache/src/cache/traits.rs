//! Core trait for the generic cache service.
//!
//! The `Cache` trait provides a domain-agnostic key-value interface. All
//! cache providers implement this trait, so callers can use any backend
//! through a consistent interface.
//!
//! # Design Principles
//!
//! - **String keys**: Human-readable for debugging, flexible for any domain
//! - **Vec<u8> values**: Raw bytes, no serialization opinions imposed
//! - **Minimal interface**: Only essential operations
//! - **Dyn-compatible**: Uses `Pin<Box<dyn Future>>` for trait object support
//!
//! Domain concepts (todo ids, collection keys) are handled by client layers,
//! never here.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

/// Boxed future type for dyn-compatible async methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Result of a maintenance (garbage collection) pass.
#[derive(Debug, Clone, Default)]
pub struct GcResult {
    /// Number of entries removed.
    pub entries_removed: usize,
    /// Total bytes freed.
    pub bytes_freed: u64,
    /// Duration of the pass in milliseconds.
    pub duration_ms: u64,
}

impl fmt::Display for GcResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GC: removed {} entries, freed {} bytes in {}ms",
            self.entries_removed, self.bytes_freed, self.duration_ms
        )
    }
}

/// Errors that can occur during cache operations.
///
/// None of these ever reach a coordinator caller: the todo cache client logs
/// them and degrades to a miss or no-op.
#[derive(Debug, Error)]
pub enum CacheError {
    /// I/O error from a backend that touches the network or disk.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The cache service is shutting down.
    #[error("cache is shutting down")]
    ShuttingDown,

    /// The operation exceeded its latency bound.
    #[error("cache operation timed out after {elapsed_ms}ms")]
    Timeout { elapsed_ms: u64 },

    /// A cached value failed to encode or decode.
    #[error("codec error: {0}")]
    Codec(String),

    /// Provider-specific error.
    #[error("provider error: {0}")]
    Provider(String),
}

/// Generic cache interface for key-value storage.
///
/// # Garbage Collection
///
/// Each provider manages its own eviction strategy; `gc()` runs pending
/// maintenance on demand (the cache service also drives it periodically).
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` for use across async tasks.
pub trait Cache: Send + Sync {
    /// Store a value under the given key, replacing any existing value.
    fn set(&self, key: &str, value: Vec<u8>) -> BoxFuture<'_, Result<(), CacheError>>;

    /// Retrieve a value by key.
    ///
    /// `Ok(None)` means the key is not present; `Err` means the backend
    /// itself failed.
    fn get(&self, key: &str) -> BoxFuture<'_, Result<Option<Vec<u8>>, CacheError>>;

    /// Delete a value by key.
    ///
    /// Returns `Ok(true)` if the key existed.
    fn delete(&self, key: &str) -> BoxFuture<'_, Result<bool, CacheError>>;

    /// Check if a key exists without retrieving the value.
    fn contains(&self, key: &str) -> BoxFuture<'_, Result<bool, CacheError>>;

    /// Current weighted size of the cache in bytes.
    fn size_bytes(&self) -> u64;

    /// Current number of entries.
    fn entry_count(&self) -> u64;

    /// Run pending maintenance (eviction, expiry) immediately.
    fn gc(&self) -> BoxFuture<'_, Result<GcResult, CacheError>>;
}
