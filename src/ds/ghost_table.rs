//! Bounded registry of fingerprints of recently evicted entries.
//!
//! Ghosts remember *that* an entry was evicted, not what it held. Each ghost
//! is reachable two ways: through a separately chained hash table keyed by
//! the 32-bit fingerprint, and through a cyclic recency ring ordered from
//! most- to least-recently touched. When the registry is full, inserting a
//! new fingerprint recycles the least-recently touched ghost.
//!
//! ## Architecture
//!
//! ```text
//!   buckets: Vec<Option<SlotId>>        ghosts: SlotArena<Ghost>
//!   ┌────┐                              Ghost { fingerprint, chain, link }
//!   │ 0  │──► g3 ──► g7 ──► ∅
//!   │ 1  │──► ∅                         recency ring (cyclic_list):
//!   │ 2  │──► g1 ──► ∅                    head (MRU) ─► g7 ◄──► g1 ◄──► g3 ◄── tail (LRU)
//!   │ 3  │──► g5 ──► ∅                                 (tail == head.prev)
//!   └────┘
//!   bucket = fingerprint & (buckets.len() - 1)
//! ```
//!
//! ## Behavior
//! - `lookup(fp)`: first chain member with a matching fingerprint; distinct
//!   keys sharing a fingerprint count as the same ghost
//! - `touch(g)`: moves `g` to the MRU end
//! - `insert(fp)`: recycles the LRU ghost when full, otherwise allocates
//! - `record(fp)`: `touch` if tracked, else `insert`
//! - growth: buckets double once `len > buckets * 80 / 100`
//!
//! ## Performance
//! - `lookup` / `touch` / `insert` / `remove`: O(1) average
//! - growth: O(len), amortized O(1) per insert

use tracing::debug;

use crate::ds::cyclic_list::{self, CyclicLinks, Link, Linked};
use crate::ds::slot_arena::{SlotArena, SlotId};

const INITIAL_BUCKETS: usize = 4;
const LOAD_PERCENT: usize = 80;
const PREALLOC_LIMIT: usize = 1 << 15;

/// Handle to a tracked ghost.
pub type GhostId = SlotId;

#[derive(Debug)]
struct Ghost {
    fingerprint: u32,
    chain: Option<SlotId>,
    link: Link,
}

impl Linked for Ghost {
    fn link(&self) -> &Link {
        &self.link
    }

    fn link_mut(&mut self) -> &mut Link {
        &mut self.link
    }
}

/// Chained hash table of ghost fingerprints with an LRU recency ring.
#[derive(Debug)]
pub struct GhostTable {
    ghosts: SlotArena<Ghost>,
    buckets: Vec<Option<SlotId>>,
    recency: Option<SlotId>,
    len: usize,
    capacity: usize,
}

impl GhostTable {
    /// Creates an empty registry holding at most `capacity` ghosts.
    pub fn new(capacity: usize) -> Self {
        Self {
            ghosts: SlotArena::with_capacity(capacity.min(PREALLOC_LIMIT)),
            buckets: vec![None; INITIAL_BUCKETS],
            recency: None,
            len: 0,
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of tracked ghosts.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current size of the bucket vector (always a power of two).
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    #[inline]
    fn bucket_of(&self, fingerprint: u32) -> usize {
        fingerprint as usize & (self.buckets.len() - 1)
    }

    /// Finds a ghost whose fingerprint equals `fingerprint`.
    pub fn lookup(&self, fingerprint: u32) -> Option<GhostId> {
        let mut current = self.buckets[self.bucket_of(fingerprint)];
        while let Some(id) = current {
            let ghost = &self.ghosts[id];
            if ghost.fingerprint == fingerprint {
                return Some(id);
            }
            current = ghost.chain;
        }
        None
    }

    /// Returns `true` if `fingerprint` is tracked.
    pub fn contains(&self, fingerprint: u32) -> bool {
        self.lookup(fingerprint).is_some()
    }

    /// Fingerprint stored under `id`, if the ghost is still tracked.
    pub fn fingerprint(&self, id: GhostId) -> Option<u32> {
        self.ghosts.get(id).map(|ghost| ghost.fingerprint)
    }

    /// Marks `id` as most recently touched.
    pub fn touch(&mut self, id: GhostId) {
        self.recency = Some(cyclic_list::move_to_front(&mut self.ghosts, self.recency, id));
    }

    /// Starts tracking `fingerprint`, recycling the least recently touched
    /// ghost when the registry is full.
    ///
    /// Does not check for an existing ghost with the same fingerprint; use
    /// [`record`](Self::record) for insert-or-touch.
    pub fn insert(&mut self, fingerprint: u32) -> Option<GhostId> {
        if self.capacity == 0 {
            return None;
        }
        let id = if self.len >= self.capacity {
            let oldest = self.oldest()?;
            self.recency = cyclic_list::remove(&mut self.ghosts, self.recency, oldest);
            self.unchain(oldest);
            let ghost = &mut self.ghosts[oldest];
            ghost.fingerprint = fingerprint;
            ghost.chain = None;
            oldest
        } else {
            self.ghosts.insert_with(|me| Ghost {
                fingerprint,
                chain: None,
                link: Link::detached(me),
            })
        };
        self.chain(id);
        self.push_front(id);
        Some(id)
    }

    /// Touches the ghost for `fingerprint` if tracked, otherwise inserts one.
    ///
    /// Returns `true` when an existing ghost was touched.
    pub fn record(&mut self, fingerprint: u32) -> bool {
        match self.lookup(fingerprint) {
            Some(id) => {
                self.touch(id);
                true
            },
            None => {
                self.insert(fingerprint);
                false
            },
        }
    }

    /// Stops tracking `id`; returns its fingerprint, or `None` if `id` is stale.
    pub fn remove(&mut self, id: GhostId) -> Option<u32> {
        if !self.ghosts.contains(id) {
            return None;
        }
        self.recency = cyclic_list::remove(&mut self.ghosts, self.recency, id);
        self.unchain(id);
        self.ghosts.remove(id).map(|ghost| ghost.fingerprint)
    }

    /// Least recently touched ghost.
    pub fn oldest(&self) -> Option<GhostId> {
        self.recency.map(|head| self.ghosts.prev(head))
    }

    /// Most recently touched ghost.
    pub fn newest(&self) -> Option<GhostId> {
        self.recency
    }

    /// Forgets every ghost. The bucket vector keeps its grown size.
    pub fn clear(&mut self) {
        self.ghosts.clear();
        self.buckets.iter_mut().for_each(|bucket| *bucket = None);
        self.recency = None;
        self.len = 0;
    }

    /// Fingerprints from most to least recently touched.
    pub fn fingerprints_mru(&self) -> Vec<u32> {
        cyclic_list::iter(&self.ghosts, self.recency)
            .map(|id| self.ghosts[id].fingerprint)
            .collect()
    }

    /// Number of ghosts reachable through the hash chains.
    pub fn count_in_buckets(&self) -> usize {
        let mut count = 0;
        for &bucket in &self.buckets {
            let mut current = bucket;
            while let Some(id) = current {
                count += 1;
                current = self.ghosts.get(id).and_then(|ghost| ghost.chain);
                if count > self.ghosts.len() {
                    return count;
                }
            }
        }
        count
    }

    /// Number of ghosts reachable through the recency ring.
    pub fn recency_len(&self) -> usize {
        if !cyclic_list::check_integrity(&self.ghosts, self.recency, self.ghosts.len()) {
            return usize::MAX;
        }
        cyclic_list::len(&self.ghosts, self.recency)
    }

    fn push_front(&mut self, id: SlotId) {
        cyclic_list::insert_at_tail(&mut self.ghosts, self.recency, id);
        self.recency = Some(id);
    }

    fn chain(&mut self, id: SlotId) {
        let bucket = self.bucket_of(self.ghosts[id].fingerprint);
        self.ghosts[id].chain = self.buckets[bucket];
        self.buckets[bucket] = Some(id);
        self.len += 1;
        if self.len > self.buckets.len() * LOAD_PERCENT / 100 {
            self.grow();
        }
    }

    fn unchain(&mut self, id: SlotId) {
        let bucket = self.bucket_of(self.ghosts[id].fingerprint);
        let after = self.ghosts[id].chain;
        if self.buckets[bucket] == Some(id) {
            self.buckets[bucket] = after;
            self.len -= 1;
            return;
        }
        let mut current = self.buckets[bucket];
        while let Some(prev) = current {
            let next = self.ghosts[prev].chain;
            if next == Some(id) {
                self.ghosts[prev].chain = after;
                self.len -= 1;
                return;
            }
            current = next;
        }
        panic!("ghost {id:?} missing from bucket {bucket}");
    }

    fn grow(&mut self) {
        let mut buckets = vec![None; self.buckets.len() * 2];
        let mask = buckets.len() - 1;
        for bucket in std::mem::take(&mut self.buckets) {
            let mut current = bucket;
            while let Some(id) = current {
                let ghost = &mut self.ghosts[id];
                current = ghost.chain;
                let idx = ghost.fingerprint as usize & mask;
                ghost.chain = buckets[idx];
                buckets[idx] = Some(id);
            }
        }
        debug!(buckets = buckets.len(), ghosts = self.len, "ghost table grown");
        self.buckets = buckets;
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        assert!(self.len <= self.capacity);
        assert!(self.buckets.len().is_power_of_two());
        assert_eq!(self.ghosts.len(), self.len);
        assert_eq!(self.count_in_buckets(), self.len);
        assert_eq!(self.recency_len(), self.len);
        for (id, ghost) in self.ghosts.iter() {
            let mut current = self.buckets[self.bucket_of(ghost.fingerprint)];
            let mut found = false;
            while let Some(member) = current {
                if member == id {
                    found = true;
                    break;
                }
                current = self.ghosts[member].chain;
            }
            assert!(found, "ghost {id:?} chained into the wrong bucket");
        }
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::VecDeque;

    proptest! {
        /// Property: the table behaves like an LRU set of fingerprints and its
        /// three views (arena, chains, ring) never disagree.
        #[cfg_attr(miri, ignore)]
        #[test]
        fn prop_matches_reference_lru(
            capacity in 1usize..24,
            fingerprints in prop::collection::vec(0u32..64, 0..300)
        ) {
            let mut ghosts = GhostTable::new(capacity);
            let mut reference: VecDeque<u32> = VecDeque::new();

            for fp in fingerprints {
                ghosts.record(fp);
                if let Some(pos) = reference.iter().position(|&k| k == fp) {
                    reference.remove(pos);
                } else if reference.len() >= capacity {
                    reference.pop_back();
                }
                reference.push_front(fp);

                ghosts.debug_validate_invariants();
                prop_assert_eq!(ghosts.fingerprints_mru(), reference.iter().copied().collect::<Vec<_>>());
            }
        }
    }
}
