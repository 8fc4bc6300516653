//! # Metrics Traits
//!
//! Recording, snapshotting and export are split into small traits so the
//! eviction controller only ever writes counters, while tests, benches and
//! monitoring read them through a snapshot.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────┐
//!   │     EvictionMetricsRecorder  │  admission / eviction / removal
//!   └──────────────┬───────────────┘
//!                  │
//!                  ▼
//!   ┌──────────────────────────────┐
//!   │    ClockProMetricsRecorder   │  hand runs, scans, full cycles,
//!   │                              │  promotions, demotions, ghost hits
//!   └──────────────────────────────┘
//!
//!   Consumption (decoupled from recording):
//!   ┌──────────────────────────────┐    ┌──────────────────────────────┐
//!   │ MetricsSnapshotProvider<S>   │    │ MetricsExporter<S>           │
//!   │ (tests/bench/diagnostics)    │    │ (production monitoring)      │
//!   └──────────────────────────────┘    └──────────────────────────────┘
//! ```

/// Counters shared by any eviction policy.
pub trait EvictionMetricsRecorder {
    fn record_admission(&mut self);
    fn record_evicted_entry(&mut self);
    fn record_removed_entry(&mut self);
    fn record_clear(&mut self, removed: u64);
}

/// CLOCK-Pro specific counters.
pub trait ClockProMetricsRecorder: EvictionMetricsRecorder {
    fn record_ghost_hit(&mut self);
    fn record_cold_to_hot_promotion(&mut self);
    fn record_hot_to_cold_demotion(&mut self);
    /// One hot-hand pass that visited `scanned` entries, counting the entry
    /// the hand stopped on. `full_cycle` is set when every hot entry was
    /// visited.
    fn record_hot_run(&mut self, scanned: u64, full_cycle: bool);
    /// One victim selection that promoted `scanned` cold entries.
    fn record_cold_run(&mut self, scanned: u64, full_cycle: bool);
}

/// Snapshot provider for tests, benches and diagnostics.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Export/publish metrics to production monitoring backends.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
