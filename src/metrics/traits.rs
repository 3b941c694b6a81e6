//! # Metrics Traits
//!
//! Mirrors the split used by the rest of the crate: the cache *records*,
//! callers *snapshot*, and exporters *publish*.
//!
//! ```text
//!   ┌─────────────────────────────┐
//!   │     CoreMetricsRecorder     │   written by Cache operations (&self)
//!   └──────────────┬──────────────┘
//!                  │
//!   ┌──────────────┴───────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (tests, benches, dashboards) │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```
//!
//! Recorders take `&self` because hits on a non-mutating strategy are
//! recorded while only the shared lock is held.

/// Counters recorded by every cache operation.
pub trait CoreMetricsRecorder {
    fn record_get_hit(&self);
    fn record_get_miss(&self);
    /// A hit that the strategy vetoed (stale entry); also counted as a miss.
    fn record_stale_hit(&self);
    fn record_insert(&self);
    fn record_eviction(&self);
    fn record_remove(&self);
    fn record_purge(&self);
    fn record_miss_fill(&self);
    fn record_miss_fill_error(&self);
}

/// Produce a point-in-time copy of the counters.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Reset metrics between tests or benchmark iterations.
pub trait MetricsReset {
    fn reset_metrics(&self);
}

/// Publish a snapshot to an external system.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
