//! Optional cache metrics (feature `metrics`).
//!
//! Recording, snapshotting and exporting are separate concerns:
//!
//! ```text
//!   Cache ──record_*──► CacheMetrics (AtomicU64 counters)
//!                            │
//!                            ▼ snapshot()
//!                    CacheMetricsSnapshot ──export()──► PrometheusTextExporter
//! ```
//!
//! Counters are atomics because `get` may run under the shared lock.

pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use exporter::PrometheusTextExporter;
pub use metrics_impl::CacheMetrics;
pub use snapshot::CacheMetricsSnapshot;
pub use traits::{CoreMetricsRecorder, MetricsExporter, MetricsReset, MetricsSnapshotProvider};
