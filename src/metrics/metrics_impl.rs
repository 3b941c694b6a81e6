use std::sync::atomic::{AtomicU64, Ordering};

use crate::metrics::snapshot::CacheMetricsSnapshot;
use crate::metrics::traits::{CoreMetricsRecorder, MetricsReset};

/// Lock-free counters owned by one cache.
#[derive(Debug, Default)]
pub struct CacheMetrics {
    get_hits: AtomicU64,
    get_misses: AtomicU64,
    stale_hits: AtomicU64,
    inserts: AtomicU64,
    evictions: AtomicU64,
    removes: AtomicU64,
    purges: AtomicU64,
    miss_fills: AtomicU64,
    miss_fill_errors: AtomicU64,
}

#[inline]
fn incr(counter: &AtomicU64) {
    counter.fetch_add(1, Ordering::Relaxed);
}

impl CacheMetrics {
    /// Copies the counters; gauges are filled in by the cache.
    pub fn snapshot_counters(&self) -> CacheMetricsSnapshot {
        CacheMetricsSnapshot {
            get_hits: self.get_hits.load(Ordering::Relaxed),
            get_misses: self.get_misses.load(Ordering::Relaxed),
            stale_hits: self.stale_hits.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            removes: self.removes.load(Ordering::Relaxed),
            purges: self.purges.load(Ordering::Relaxed),
            miss_fills: self.miss_fills.load(Ordering::Relaxed),
            miss_fill_errors: self.miss_fill_errors.load(Ordering::Relaxed),
            ..CacheMetricsSnapshot::default()
        }
    }
}

impl CoreMetricsRecorder for CacheMetrics {
    fn record_get_hit(&self) {
        incr(&self.get_hits);
    }

    fn record_get_miss(&self) {
        incr(&self.get_misses);
    }

    fn record_stale_hit(&self) {
        incr(&self.stale_hits);
        incr(&self.get_misses);
    }

    fn record_insert(&self) {
        incr(&self.inserts);
    }

    fn record_eviction(&self) {
        incr(&self.evictions);
    }

    fn record_remove(&self) {
        incr(&self.removes);
    }

    fn record_purge(&self) {
        incr(&self.purges);
    }

    fn record_miss_fill(&self) {
        incr(&self.miss_fills);
    }

    fn record_miss_fill_error(&self) {
        incr(&self.miss_fill_errors);
    }
}

impl MetricsReset for CacheMetrics {
    fn reset_metrics(&self) {
        for counter in [
            &self.get_hits,
            &self.get_misses,
            &self.stale_hits,
            &self.inserts,
            &self.evictions,
            &self.removes,
            &self.purges,
            &self.miss_fills,
            &self.miss_fill_errors,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}
