//! Cache telemetry for observability and the demo CLI.
//!
//! Lock-free atomic counters recorded by the cache client, copied out as a
//! point-in-time snapshot for display.
//!
//! ```text
//! TodoCacheClient ─────► CacheMetrics ─────► TelemetrySnapshot ─────► Views
//!                        (atomic counters)   (point-in-time copy)     (CLI, etc.)
//! ```

mod metrics;
mod snapshot;

pub use metrics::CacheMetrics;
pub use snapshot::TelemetrySnapshot;
