//! Point-in-time view of cache telemetry.

use std::fmt;

/// A copy of the cache counters at one instant, safe to hold across awaits
/// and cheap to pass to display code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TelemetrySnapshot {
    /// Single-item lookups served from cache.
    pub item_hits: u64,
    /// Single-item lookups that fell through to the store.
    pub item_misses: u64,
    /// Collection lookups served from cache.
    pub list_hits: u64,
    /// Collection lookups that fell through to the store.
    pub list_misses: u64,
    /// Cache errors/timeouts that were logged and degraded.
    pub swallowed_errors: u64,
}

impl TelemetrySnapshot {
    /// Overall cache hit rate across item and collection lookups, 0.0 to 1.0.
    pub fn hit_rate(&self) -> f64 {
        let hits = self.item_hits + self.list_hits;
        let total = hits + self.item_misses + self.list_misses;
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }
}

impl fmt::Display for TelemetrySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "item {}/{} hit/miss, list {}/{} hit/miss, {} degraded ({}% hit rate)",
            self.item_hits,
            self.item_misses,
            self.list_hits,
            self.list_misses,
            self.swallowed_errors,
            (self.hit_rate() * 100.0).round() as u64
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_rate_empty_is_zero() {
        assert_eq!(TelemetrySnapshot::default().hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_mixed() {
        let snapshot = TelemetrySnapshot {
            item_hits: 3,
            item_misses: 1,
            list_hits: 1,
            list_misses: 0,
            swallowed_errors: 0,
        };
        assert!((snapshot.hit_rate() - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_display_contains_counts() {
        let snapshot = TelemetrySnapshot {
            item_hits: 2,
            item_misses: 1,
            list_hits: 0,
            list_misses: 1,
            swallowed_errors: 3,
        };
        let text = snapshot.to_string();
        assert!(text.contains("2/1"));
        assert!(text.contains("3 degraded"));
    }
}
