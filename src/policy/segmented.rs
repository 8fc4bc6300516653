//! Lock-per-segment front over several CLOCK-Pro controllers.
//!
//! Capacity is split evenly across segments and every fingerprint is routed
//! to one segment by a seeded [`SegmentSelector`]. Each segment is an
//! independent [`ClockProEviction`] behind its own `parking_lot::Mutex`, so
//! admissions and victim selection in different segments never contend.
//!
//! ## Architecture
//!
//! ```text
//!   fingerprint ──► SegmentSelector ──► segment index
//!                                            │
//!   ┌────────────────────┬───────────────────┼────────────────────┐
//!   ▼                    ▼                   ▼                    ▼
//!   Mutex<ClockPro>      Mutex<ClockPro>     Mutex<ClockPro>      Mutex<ClockPro>
//!   hot │ cold │ ghosts  hot │ cold │ ghosts ...
//!
//!   SegmentedEntryId { segment, id } routes later calls without re-hashing
//! ```
//!
//! Every call holds exactly one segment lock, except the cache-wide
//! aggregates (`size`, `hit_count`, `remove_all`, `snapshot`,
//! `check_integrity`) which visit segments one after another and therefore
//! are not an atomic cut across segments.
//!
//! ## Example Usage
//!
//! ```
//! use clockpro::builder::ClockProBuilder;
//!
//! let cache = ClockProBuilder::new(64).segment_count(4).try_build_segmented().unwrap();
//! let id = cache.insert_into_replacement_list(7);
//! cache.record_hit(id);
//! assert_eq!(cache.size(), 1);
//! assert!(cache.evict_excess(id.segment).is_empty());
//! ```

use parking_lot::Mutex;
use tracing::debug;

use crate::builder::ClockProConfig;
use crate::ds::SegmentSelector;
use crate::error::ConfigError;
use crate::integrity::IntegrityReport;
use crate::metrics::ClockProMetricsSnapshot;
use crate::metrics::traits::MetricsSnapshotProvider;
use crate::policy::clock_pro::{ClockProEviction, DetachedEntry, EntryId, EntryState};
use crate::traits::{ConcurrentEviction, Eviction};

/// Handle of a resident entry in a segmented front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentedEntryId {
    pub segment: usize,
    pub id: EntryId,
}

/// Thread-safe CLOCK-Pro front with one locked controller per segment.
#[derive(Debug)]
pub struct SegmentedClockPro {
    segments: Vec<Mutex<ClockProEviction>>,
    selector: SegmentSelector,
}

impl SegmentedClockPro {
    /// Splits `config.capacity` over `config.segment_count` segments.
    pub fn try_new(config: ClockProConfig) -> Result<Self, ConfigError> {
        Self::try_with_seed(config, 0)
    }

    /// Like [`try_new`](Self::try_new) with an explicit segment-selection seed.
    pub fn try_with_seed(config: ClockProConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut segments = Vec::with_capacity(config.segment_count);
        for _ in 0..config.segment_count {
            segments.push(Mutex::new(ClockProEviction::try_new(config)?));
        }
        debug!(
            segments = config.segment_count,
            segment_capacity = config.segment_capacity(),
            seed,
            "segmented clock-pro created"
        );
        Ok(Self {
            segments,
            selector: SegmentSelector::new(config.segment_count, seed),
        })
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// Segment responsible for `fingerprint`.
    pub fn segment_for(&self, fingerprint: u32) -> usize {
        self.selector.segment_for(fingerprint)
    }

    /// Runs `f` with exclusive access to one segment's controller.
    ///
    /// # Panics
    ///
    /// Panics if `segment` is out of range.
    pub fn with_segment<R>(
        &self,
        segment: usize,
        f: impl FnOnce(&mut ClockProEviction) -> R,
    ) -> R {
        let mut eviction = self.segments[segment].lock();
        f(&mut eviction)
    }

    pub fn insert_into_replacement_list(&self, fingerprint: u32) -> SegmentedEntryId {
        let segment = self.segment_for(fingerprint);
        let id = self.with_segment(segment, |ev| ev.insert_into_replacement_list(fingerprint));
        SegmentedEntryId { segment, id }
    }

    /// Admits `fingerprint` and evicts from its segment until it is back
    /// within capacity, under a single lock acquisition.
    pub fn insert_and_evict(&self, fingerprint: u32) -> (SegmentedEntryId, Vec<DetachedEntry>) {
        let segment = self.segment_for(fingerprint);
        self.with_segment(segment, |ev| {
            let id = ev.insert_into_replacement_list(fingerprint);
            let evicted = ev.evict_excess();
            (SegmentedEntryId { segment, id }, evicted)
        })
    }

    pub fn record_hit(&self, id: SegmentedEntryId) {
        self.with_segment(id.segment, |ev| ev.record_hit(id.id));
    }

    pub fn entry_state(&self, id: SegmentedEntryId) -> EntryState {
        self.with_segment(id.segment, |ev| ev.entry_state(id.id))
    }

    pub fn find_eviction_candidate(&self, segment: usize) -> SegmentedEntryId {
        let id = self.with_segment(segment, |ev| ev.find_eviction_candidate());
        SegmentedEntryId { segment, id }
    }

    /// Evicts from `segment` until it is within its capacity.
    pub fn evict_excess(&self, segment: usize) -> Vec<DetachedEntry> {
        self.with_segment(segment, |ev| ev.evict_excess())
    }

    pub fn evict_entry(&self, id: SegmentedEntryId) -> DetachedEntry {
        self.with_segment(id.segment, |ev| ev.evict_entry(id.id))
    }

    pub fn remove_entry_from_replacement_list(&self, id: SegmentedEntryId) -> DetachedEntry {
        self.with_segment(id.segment, |ev| ev.remove_entry_from_replacement_list(id.id))
    }

    /// Clears every segment; returns the number of entries detached.
    pub fn remove_all(&self) -> usize {
        self.segments.iter().map(|segment| segment.lock().remove_all()).sum()
    }

    pub fn size(&self) -> usize {
        self.segments.iter().map(|segment| segment.lock().size()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Sum of all segment capacities.
    pub fn max_size(&self) -> usize {
        self.segments.iter().map(|segment| segment.lock().max_size()).sum()
    }

    pub fn hit_count(&self) -> u64 {
        self.segments.iter().map(|segment| segment.lock().hit_count()).sum()
    }

    /// One `extra_statistics` line per segment, prefixed with its index.
    pub fn extra_statistics(&self) -> Vec<String> {
        self.segments
            .iter()
            .enumerate()
            .map(|(idx, segment)| {
                format!("segment[{idx}] {}", segment.lock().extra_statistics())
            })
            .collect()
    }

    /// Audits every segment; assertion names are prefixed with the segment index.
    pub fn check_integrity(&self, report: &mut IntegrityReport) {
        for (idx, segment) in self.segments.iter().enumerate() {
            let mut segment_report = IntegrityReport::new();
            segment.lock().check_integrity(&mut segment_report);
            report.absorb(&format!("segment[{idx}] "), segment_report);
        }
    }
}

impl MetricsSnapshotProvider<ClockProMetricsSnapshot> for SegmentedClockPro {
    /// Sum of all segment snapshots.
    fn snapshot(&self) -> ClockProMetricsSnapshot {
        let mut total = ClockProMetricsSnapshot::default();
        for segment in &self.segments {
            total += segment.lock().snapshot();
        }
        total
    }
}

impl ConcurrentEviction for SegmentedClockPro {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::ClockProBuilder;
    use std::sync::Arc;
    use std::thread;

    fn segmented(capacity: usize, segments: usize) -> SegmentedClockPro {
        ClockProBuilder::new(capacity)
            .segment_count(segments)
            .try_build_segmented()
            .unwrap()
    }

    #[test]
    fn capacity_is_split_across_segments() {
        let cache = segmented(100, 4);
        assert_eq!(cache.segment_count(), 4);
        assert_eq!(cache.max_size(), 100);
        cache.with_segment(0, |ev| {
            assert_eq!(ev.max_size(), 25);
            assert_eq!(ev.hot_max(), 24);
        });
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = ClockProBuilder::new(10)
            .segment_count(0)
            .try_build_segmented()
            .unwrap_err();
        assert_eq!(err.parameter(), "segment_count");
    }

    #[test]
    fn handles_route_to_owning_segment() {
        let cache = segmented(64, 4);
        for fp in 0..32u32 {
            let id = cache.insert_into_replacement_list(fp);
            assert_eq!(id.segment, cache.segment_for(fp));
            cache.record_hit(id);
        }
        assert_eq!(cache.size(), 32);
        assert_eq!(cache.hit_count(), 32);
    }

    #[test]
    fn insert_and_evict_bounds_each_segment() {
        let cache = segmented(16, 4);
        let mut evicted = 0;
        for fp in 0..200u32 {
            let (_, detached) = cache.insert_and_evict(fp);
            evicted += detached.len();
        }
        for segment in 0..cache.segment_count() {
            cache.with_segment(segment, |ev| assert!(ev.size() <= ev.max_size()));
        }
        assert_eq!(cache.size() + evicted, 200);
        assert_eq!(cache.snapshot().evicted_entries as usize, evicted);
    }

    #[test]
    fn remove_all_sums_segments() {
        let cache = segmented(32, 2);
        for fp in 0..10u32 {
            cache.insert_into_replacement_list(fp);
        }
        assert_eq!(cache.remove_all(), 10);
        assert!(cache.is_empty());
    }

    #[test]
    fn integrity_prefixes_segment_index() {
        let cache = segmented(32, 2);
        for fp in 0..10u32 {
            cache.insert_into_replacement_list(fp);
        }
        let mut report = IntegrityReport::new();
        cache.check_integrity(&mut report);
        assert!(report.is_ok());
        assert!(report.assertions().iter().any(|a| a.name.starts_with("segment[1] ")));
    }

    #[test]
    fn extra_statistics_has_one_line_per_segment() {
        let cache = segmented(32, 4);
        let lines = cache.extra_statistics();
        assert_eq!(lines.len(), 4);
        assert!(lines[3].starts_with("segment[3] coldSize=0"));
    }

    #[test]
    fn test_send_sync() {
        fn assert_concurrent<T: ConcurrentEviction>() {}
        assert_concurrent::<SegmentedClockPro>();
    }

    #[test]
    fn concurrent_admission_keeps_segments_consistent() {
        let cache = Arc::new(segmented(256, 8));
        let handles: Vec<_> = (0..4u32)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..500u32 {
                        let fp = t * 10_000 + i % 300;
                        let (id, _) = cache.insert_and_evict(fp);
                        if i % 3 == 0 {
                            // the new entry may already be gone if it was picked as a victim
                            cache.with_segment(id.segment, |ev| {
                                if ev.entry_state(id.id) != EntryState::Absent {
                                    ev.record_hit(id.id);
                                }
                            });
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert!(cache.size() <= cache.max_size());
        let mut report = IntegrityReport::new();
        cache.check_integrity(&mut report);
        assert!(report.is_ok(), "{:?}", report.failures().collect::<Vec<_>>());
        assert_eq!(cache.snapshot().admissions, 2_000);
    }
}
