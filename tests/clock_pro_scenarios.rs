// ==============================================
// CLOCK-PRO BEHAVIOR SCENARIOS (integration)
// ==============================================
//
// End-to-end scenarios driven only through the public API: a small keyed
// cache front admits, reads and evicts through the `Eviction` trait.

use std::collections::HashMap;

use clockpro::prelude::*;

/// Key → handle bookkeeping of a cache embedding the core.
struct Front {
    eviction: ClockProEviction,
    resident: HashMap<u32, EntryId>,
}

impl Front {
    fn new(capacity: usize) -> Self {
        Self {
            eviction: ClockProBuilder::new(capacity).build(),
            resident: HashMap::new(),
        }
    }

    fn admit(&mut self, key: u32) -> EntryId {
        let id = self.eviction.insert_into_replacement_list(key);
        self.resident.insert(key, id);
        id
    }

    fn read(&mut self, key: u32) -> bool {
        match self.resident.get(&key) {
            Some(&id) => {
                self.eviction.record_hit(id);
                true
            },
            None => false,
        }
    }

    /// Admits on miss and evicts back down to capacity.
    fn access(&mut self, key: u32) -> bool {
        if self.read(key) {
            return true;
        }
        self.admit(key);
        for detached in self.eviction.evict_excess() {
            self.resident.remove(&detached.fingerprint);
        }
        false
    }

    fn evict_one(&mut self) -> DetachedEntry {
        let victim = self.eviction.find_eviction_candidate();
        let detached = self.eviction.evict_entry(victim);
        self.resident.remove(&detached.fingerprint);
        detached
    }

    fn assert_intact(&self) {
        let mut report = IntegrityReport::new();
        self.eviction.check_integrity(&mut report);
        if let Err(err) = report.into_result() {
            panic!("integrity violated: {err}");
        }
    }
}

mod derived_limits {
    use super::*;

    #[test]
    fn capacity_100_defaults() {
        let front = Front::new(100);
        assert_eq!(front.eviction.hot_max(), 97);
        assert_eq!(front.eviction.ghost_max(), 51);
    }

    #[test]
    fn full_cold_clock_needs_no_hot_pass() {
        let mut front = Front::new(100);
        for key in 0..100 {
            front.admit(key);
        }
        front.evict_one();
        assert_eq!(front.eviction.metrics().hot_runs, 0);
        assert_eq!(front.eviction.size(), 99);
        front.assert_intact();
    }
}

mod ghost_history {
    use super::*;

    #[test]
    fn oldest_ghost_drops_when_registry_overflows() {
        let mut front = Front::new(100);
        for key in 1..=52 {
            let id = front.admit(key);
            front.eviction.evict_entry(id);
        }
        assert_eq!(front.eviction.ghost_size(), 51);
        assert!(!front.eviction.contains_ghost(1));
        assert!(front.eviction.contains_ghost(52));
        front.assert_intact();
    }

    #[test]
    fn returning_entry_is_admitted_hot() {
        let mut front = Front::new(100);
        let id = front.admit(7);
        front.eviction.evict_entry(id);

        let again = front.admit(7);
        assert_eq!(
            front.eviction.entry_state(again),
            EntryState::Resident(Region::Hot)
        );
        assert_eq!(front.eviction.snapshot().ghost_hits, 1);
    }

    #[test]
    fn explicit_removal_leaves_no_ghost() {
        let mut front = Front::new(10);
        let id = front.admit(3);
        front.eviction.remove_entry_from_replacement_list(id);
        assert_eq!(front.eviction.ghost_size(), 0);

        let again = front.admit(3);
        assert_eq!(
            front.eviction.entry_state(again),
            EntryState::Resident(Region::Cold)
        );
    }

    #[test]
    fn ghosts_survive_remove_all() {
        let mut front = Front::new(10);
        for key in 0..15 {
            front.access(key);
        }
        let ghosts = front.eviction.ghost_size();
        assert!(ghosts > 0);
        assert_eq!(front.eviction.remove_all(), 10);
        assert_eq!(front.eviction.ghost_size(), ghosts);
        front.assert_intact();
    }
}

mod replacement {
    use super::*;

    #[test]
    fn frequently_read_keys_survive_a_scan() {
        let mut front = Front::new(64);
        for key in 0..16 {
            front.access(key);
        }
        for _ in 0..4 {
            for key in 0..16 {
                assert!(front.access(key));
            }
        }

        // one-off scan twice the cache size
        for key in 1_000..1_128 {
            front.access(key);
        }

        let survivors = (0..16).filter(|key| front.resident.contains_key(key)).count();
        assert_eq!(survivors, 16, "hot working set was flushed by a scan");
        front.assert_intact();
    }

    #[test]
    fn victims_never_carry_hits() {
        let mut front = Front::new(32);
        for round in 0..20u32 {
            for key in 0..48u32 {
                if (key + round) % 3 == 0 {
                    front.read(key);
                }
                front.access(key);
            }
        }
        for _ in 0..10 {
            assert_eq!(front.evict_one().hit_count, 0);
        }
        front.assert_intact();
    }

    #[test]
    fn hits_are_conserved_across_evictions() {
        let mut front = Front::new(16);
        let mut reads = 0u64;
        for step in 0..2_000u32 {
            let key = (step * 7) % 40;
            if front.read(key) {
                reads += 1;
            } else {
                front.access(key);
            }
        }
        assert_eq!(front.eviction.hit_count(), reads);
        front.assert_intact();
    }

    #[test]
    fn remove_all_reports_hot_plus_cold() {
        let mut front = Front::new(100);
        for key in 0..5 {
            let id = front.admit(key);
            front.eviction.evict_entry(id);
        }
        for key in 0..30 {
            front.admit(key);
        }
        let hot = front.eviction.hot_size();
        let cold = front.eviction.cold_size();
        assert_eq!(hot, 5);
        assert_eq!(front.eviction.remove_all(), hot + cold);
        assert_eq!(front.eviction.size(), 0);
    }
}

mod diagnostics {
    use super::*;

    #[test]
    fn exporter_writes_snapshot() {
        let mut front = Front::new(8);
        for key in 0..20 {
            front.access(key);
        }
        let exporter = PrometheusTextExporter::new("clockpro", Vec::new());
        exporter.export(&front.eviction.snapshot());
        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.contains("clockpro_evicted_entries_total 12"));
        assert!(text.contains("# TYPE clockpro_ghost_size gauge"));
    }

    #[test]
    fn extra_statistics_tracks_runs() {
        let mut front = Front::new(4);
        for key in 0..6 {
            front.access(key);
        }
        let stats = front.eviction.extra_statistics();
        assert!(stats.contains("coldRunCnt=2"), "{stats}");
        assert!(stats.contains("ghostSize=2"), "{stats}");
    }
}
