#![no_main]

use clockpro::ds::GhostTable;
use libfuzzer_sys::fuzz_target;

// Arbitrary record / insert / remove / clear sequences against the ghost
// table, validating hash chains and the recency ring after every step.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let capacity = (data[0] as usize) % 65;
    let mut ghosts = GhostTable::new(capacity);

    for pair in data[1..].chunks_exact(2) {
        // few distinct fingerprints so touches and chain collisions happen
        let fingerprint = u32::from(pair[1]) << 3;
        match pair[0] % 5 {
            0 => {
                ghosts.record(fingerprint);
                if capacity > 0 {
                    assert!(ghosts.contains(fingerprint));
                    assert_eq!(ghosts.newest().and_then(|g| ghosts.fingerprint(g)), Some(fingerprint));
                }
            },
            1 => {
                if !ghosts.contains(fingerprint) {
                    ghosts.insert(fingerprint);
                }
            },
            2 => {
                if let Some(id) = ghosts.lookup(fingerprint) {
                    assert_eq!(ghosts.remove(id), Some(fingerprint));
                    assert!(!ghosts.contains(fingerprint));
                }
            },
            3 => {
                if let Some(id) = ghosts.oldest() {
                    ghosts.touch(id);
                }
            },
            4 => ghosts.clear(),
            _ => unreachable!(),
        }

        ghosts.debug_validate_invariants();
        assert!(ghosts.len() <= ghosts.capacity());
        assert_eq!(ghosts.count_in_buckets(), ghosts.len());
        assert_eq!(ghosts.recency_len(), ghosts.len());
    }
});
