//! Prometheus text rendering of controller snapshots.
//!
//! Each export renders the whole snapshot into one buffer and hands it to the
//! writer in a single `write_all`, so concurrent exports never interleave
//! their lines.
//!
//! ```
//! use clockpro::metrics::ClockProMetricsSnapshot;
//! use clockpro::metrics::exporter::PrometheusTextExporter;
//! use clockpro::metrics::traits::MetricsExporter;
//!
//! let exporter = PrometheusTextExporter::new("eviction", Vec::new());
//! exporter.export(&ClockProMetricsSnapshot { ghost_hits: 2, ..Default::default() });
//! let text = String::from_utf8(exporter.into_inner()).unwrap();
//! assert!(text.contains("eviction_ghost_hits_total 2\n"));
//! ```

use std::fmt::Write as _;
use std::io;
use std::sync::{Mutex, PoisonError};

use crate::metrics::snapshot::ClockProMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Writes snapshots in the Prometheus text exposition format.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: io::Write + Send> {
    namespace: String,
    sink: Mutex<W>,
}

impl<W: io::Write + Send> PrometheusTextExporter<W> {
    /// `namespace` is prepended to every metric name as `namespace_`; an
    /// empty namespace leaves names bare.
    pub fn new(namespace: impl Into<String>, sink: W) -> Self {
        Self {
            namespace: namespace.into(),
            sink: Mutex::new(sink),
        }
    }

    pub fn into_inner(self) -> W {
        self.sink.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// Renders `snapshot` without writing it anywhere.
    pub fn render(&self, snapshot: &ClockProMetricsSnapshot) -> String {
        let counters = [
            ("admissions_total", snapshot.admissions),
            ("evicted_entries_total", snapshot.evicted_entries),
            ("removed_entries_total", snapshot.removed_entries),
            ("cleared_entries_total", snapshot.cleared_entries),
            ("ghost_hits_total", snapshot.ghost_hits),
            ("cold_to_hot_promotions_total", snapshot.cold_to_hot_promotions),
            ("hot_to_cold_demotions_total", snapshot.hot_to_cold_demotions),
            ("hot_runs_total", snapshot.hot_runs),
            ("hot_scans_total", snapshot.hot_scans),
            ("hot_full_cycles_total", snapshot.hot_full_cycles),
            ("cold_runs_total", snapshot.cold_runs),
            ("cold_scans_total", snapshot.cold_scans),
            ("cold_full_cycles_total", snapshot.cold_full_cycles),
            ("hot_hits_total", snapshot.hot_hits),
            ("cold_hits_total", snapshot.cold_hits),
        ];
        let gauges = [
            ("hot_size", snapshot.hot_size),
            ("cold_size", snapshot.cold_size),
            ("ghost_size", snapshot.ghost_size),
            ("hot_max", snapshot.hot_max),
            ("max_size", snapshot.max_size),
        ];

        let mut out = String::new();
        for (suffix, value) in counters {
            self.push_metric(&mut out, "counter", suffix, value);
        }
        for (suffix, value) in gauges {
            self.push_metric(&mut out, "gauge", suffix, value as u64);
        }
        out
    }

    fn push_metric(&self, out: &mut String, kind: &str, suffix: &str, value: u64) {
        let name = if self.namespace.is_empty() {
            suffix.to_owned()
        } else {
            format!("{}_{suffix}", self.namespace)
        };
        // writing into a String cannot fail
        let _ = writeln!(out, "# TYPE {name} {kind}");
        let _ = writeln!(out, "{name} {value}");
    }
}

impl<W: io::Write + Send> MetricsExporter<ClockProMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &ClockProMetricsSnapshot) {
        let text = self.render(snapshot);
        let mut sink = self.sink.lock().unwrap_or_else(PoisonError::into_inner);
        // a failing sink drops this sample
        let _ = sink.write_all(text.as_bytes());
    }
}
