//! Diagnostic counters, snapshots and exporters.

pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

#[cfg(feature = "metrics")]
pub mod exporter;

pub use metrics_impl::ClockProMetrics;
pub use snapshot::ClockProMetricsSnapshot;
