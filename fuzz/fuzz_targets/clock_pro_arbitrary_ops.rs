#![no_main]

use clockpro::builder::ClockProBuilder;
use clockpro::integrity::IntegrityReport;
use clockpro::policy::clock_pro::{EntryId, EntryState};
use clockpro::traits::Eviction;
use libfuzzer_sys::fuzz_target;

// Arbitrary admission / hit / eviction / removal sequences against one
// controller. Hits must be conserved, victims must have no outstanding hits
// and the self-audit must pass after every step.
fuzz_target!(|data: &[u8]| {
    if data.len() < 3 {
        return;
    }

    let capacity = (data[0] as usize) % 40 + 1;
    let percentage = u32::from(data[1]) % 101;
    let mut eviction = ClockProBuilder::new(capacity)
        .hot_max_percentage(percentage)
        .hit_counter_decrease_shift(u32::from(data[2]) % 8)
        .build();

    let mut resident: Vec<EntryId> = Vec::new();
    let mut hits = 0u64;

    for pair in data[3..].chunks_exact(2) {
        let arg = pair[1];
        match pair[0] % 6 {
            0 | 1 => {
                resident.push(eviction.insert_into_replacement_list(u32::from(arg % 96)));
                for detached in eviction.evict_excess() {
                    assert_eq!(detached.hit_count, 0);
                    resident.retain(|&id| id != detached.id);
                }
            },
            2 | 3 => {
                if !resident.is_empty() {
                    let id = resident[arg as usize % resident.len()];
                    for _ in 0..=(arg % 4) {
                        eviction.record_hit(id);
                        hits += 1;
                    }
                }
            },
            4 => {
                if !resident.is_empty() {
                    let victim = eviction.find_eviction_candidate();
                    assert_eq!(eviction.entry_hit_count(victim), Some(0));
                    eviction.evict_entry(victim);
                    resident.retain(|&id| id != victim);
                }
            },
            5 => {
                if arg == 0 {
                    assert_eq!(eviction.remove_all(), resident.len());
                    resident.clear();
                } else if !resident.is_empty() {
                    let id = resident.swap_remove(arg as usize % resident.len());
                    eviction.remove_entry_from_replacement_list(id);
                    assert_eq!(eviction.entry_state(id), EntryState::Absent);
                }
            },
            _ => unreachable!(),
        }

        assert_eq!(eviction.size(), resident.len());
        assert_eq!(eviction.hit_count(), hits);
        let mut report = IntegrityReport::new();
        eviction.check_integrity(&mut report);
        assert!(report.is_ok(), "{:?}", report.failures().collect::<Vec<_>>());
    }
});
