use std::ops::AddAssign;

/// Point-in-time view of a controller's counters and gauges.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ClockProMetricsSnapshot {
    pub admissions: u64,
    pub evicted_entries: u64,
    pub removed_entries: u64,
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

    // hit totals including live entries
    pub hot_hits: u64,
    pub cold_hits: u64,

    // gauges captured at snapshot time
    pub hot_size: usize,
    pub cold_size: usize,
    pub ghost_size: usize,
    pub hot_max: usize,
    pub max_size: usize,
}

impl ClockProMetricsSnapshot {
    /// Aggregate hit count, see `ClockProEviction::hit_count`.
    pub fn hit_count(&self) -> u64 {
        self.hot_hits + self.cold_hits
    }

    pub fn size(&self) -> usize {
        self.hot_size + self.cold_size
    }
}

/// Sums snapshots of several segments into one cache-wide view.
impl AddAssign for ClockProMetricsSnapshot {
    fn add_assign(&mut self, other: Self) {
        self.admissions += other.admissions;
        self.evicted_entries += other.evicted_entries;
        self.removed_entries += other.removed_entries;
        self.cleared_entries += other.cleared_entries;
        self.ghost_hits += other.ghost_hits;
        self.cold_to_hot_promotions += other.cold_to_hot_promotions;
        self.hot_to_cold_demotions += other.hot_to_cold_demotions;
        self.hot_runs += other.hot_runs;
        self.hot_scans += other.hot_scans;
        self.hot_full_cycles += other.hot_full_cycles;
        self.cold_runs += other.cold_runs;
        self.cold_scans += other.cold_scans;
        self.cold_full_cycles += other.cold_full_cycles;
        self.hot_hits += other.hot_hits;
        self.cold_hits += other.cold_hits;
        self.hot_size += other.hot_size;
        self.cold_size += other.cold_size;
        self.ghost_size += other.ghost_size;
        self.hot_max += other.hot_max;
        self.max_size += other.max_size;
    }
}
