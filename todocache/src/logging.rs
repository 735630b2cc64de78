//! Logging bootstrap.
//!
//! One process-wide tracing subscriber, initialized by the binary during
//! startup. `RUST_LOG` overrides the default filter when set. Initialization
//! is best-effort and idempotent: a second call (tests, embedding) is a
//! no-op rather than an error.

use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `default_filter` applies when `RUST_LOG` is unset, e.g. `"info"` or
/// `"todocache=debug"`.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(LocalTime::rfc_3339())
        .with_target(true)
        .try_init();
}
