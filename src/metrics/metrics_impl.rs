use crate::metrics::traits::{ClockProMetricsRecorder, EvictionMetricsRecorder};

/// Diagnostic counters of one CLOCK-Pro controller.
///
/// Purely observational: nothing in victim selection reads them.
#[derive(Debug, Default, Clone)]
pub struct ClockProMetrics {
    pub admissions: u64,
    pub evicted_entries: u64,
    pub removed_entries: u64,
    pub clears: u64,
    pub cleared_entries: u64,

    pub ghost_hits: u64,
    pub cold_to_hot_promotions: u64,
    pub hot_to_cold_demotions: u64,

    pub hot_runs: u64,
    pub hot_scans: u64,
    pub hot_full_cycles: u64,
    pub cold_runs: u64,
    pub cold_scans: u64,
    pub cold_full_cycles: u64,
}

impl ClockProMetrics {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EvictionMetricsRecorder for ClockProMetrics {
    fn record_admission(&mut self) {
        self.admissions += 1;
    }
    fn record_evicted_entry(&mut self) {
        self.evicted_entries += 1;
    }
    fn record_removed_entry(&mut self) {
        self.removed_entries += 1;
    }
    fn record_clear(&mut self, removed: u64) {
        self.clears += 1;
        self.cleared_entries += removed;
    }
}

impl ClockProMetricsRecorder for ClockProMetrics {
    fn record_ghost_hit(&mut self) {
        self.ghost_hits += 1;
    }
    fn record_cold_to_hot_promotion(&mut self) {
        self.cold_to_hot_promotions += 1;
    }
    fn record_hot_to_cold_demotion(&mut self) {
        self.hot_to_cold_demotions += 1;
    }
    fn record_hot_run(&mut self, scanned: u64, full_cycle: bool) {
        self.hot_runs += 1;
        self.hot_scans += scanned;
        if full_cycle {
            self.hot_full_cycles += 1;
        }
    }
    fn record_cold_run(&mut self, scanned: u64, full_cycle: bool) {
        self.cold_runs += 1;
        self.cold_scans += scanned;
        if full_cycle {
            self.cold_full_cycles += 1;
        }
    }
}
