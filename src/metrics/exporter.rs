use std::io::Write;

use parking_lot::Mutex;

use crate::metrics::snapshot::CacheMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for cache metrics snapshots.
///
/// Writes the Prometheus text exposition format so the output can be scraped
/// directly or forwarded to an OpenTelemetry collector. Write errors are
/// dropped; metrics are observational.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Consumes the exporter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_metric(&self, kind: &str, name: &str, value: u64) {
        let mut writer = self.writer.lock();
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<CacheMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &CacheMetricsSnapshot) {
        let counters = [
            ("get_hits_total", snapshot.get_hits),
            ("get_misses_total", snapshot.get_misses),
            ("stale_hits_total", snapshot.stale_hits),
            ("inserts_total", snapshot.inserts),
            ("evictions_total", snapshot.evictions),
            ("removes_total", snapshot.removes),
            ("purges_total", snapshot.purges),
            ("miss_fills_total", snapshot.miss_fills),
            ("miss_fill_errors_total", snapshot.miss_fill_errors),
        ];
        for (suffix, value) in counters {
            self.write_metric("counter", &self.metric_name(suffix), value);
        }

        let gauges = [
            ("len", snapshot.len),
            ("key_count", snapshot.key_count),
            ("capacity", snapshot.capacity),
        ];
        for (suffix, value) in gauges {
            self.write_metric("gauge", &self.metric_name(suffix), value as u64);
        }
    }
}
