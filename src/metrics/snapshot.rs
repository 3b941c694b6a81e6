/// Point-in-time copy of a cache's counters and gauges.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CacheMetricsSnapshot {
    pub get_hits: u64,
    pub get_misses: u64,
    pub stale_hits: u64, // vetoed by the strategy, included in get_misses

    pub inserts: u64,
    pub evictions: u64, // occupied slots recycled or displaced by a rebind
    pub removes: u64,
    pub purges: u64,

    pub miss_fills: u64,
    pub miss_fill_errors: u64,

    // gauges captured at snapshot time
    pub len: usize,
    pub key_count: usize,
    pub capacity: usize,
}

impl CacheMetricsSnapshot {
    /// Total `get` calls observed (hits + misses).
    #[inline]
    pub fn get_calls(&self) -> u64 {
        self.get_hits + self.get_misses
    }

    /// Hit ratio in `[0, 1]`; `0.0` before any `get`.
    pub fn hit_ratio(&self) -> f64 {
        let calls = self.get_calls();
        if calls == 0 {
            0.0
        } else {
            self.get_hits as f64 / calls as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_ratio_handles_empty() {
        assert_eq!(CacheMetricsSnapshot::default().hit_ratio(), 0.0);
    }

    #[test]
    fn hit_ratio_counts_hits_over_calls() {
        let snapshot = CacheMetricsSnapshot {
            get_hits: 3,
            get_misses: 1,
            ..Default::default()
        };
        assert_eq!(snapshot.get_calls(), 4);
        assert_eq!(snapshot.hit_ratio(), 0.75);
    }
}
