//! # Eviction Trait
//!
//! The contract between a cache and its replacement policy. The cache owns
//! keys, values and its hash table; the policy owns only replacement state and
//! talks to the cache through fingerprints and [`EntryId`] handles.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────┐           ┌──────────────────────────────┐
//!   │           Cache              │           │       impl Eviction          │
//!   │                              │  admit    │                              │
//!   │  key ──► fingerprint_of ─────┼──────────►│ insert_into_replacement_list │
//!   │  entry.slot = EntryId ◄──────┼───────────│          → EntryId           │
//!   │                              │  read     │                              │
//!   │  get(key) ───────────────────┼──────────►│ record_hit(EntryId)          │
//!   │                              │  full     │                              │
//!   │  insert over capacity ───────┼──────────►│ find_eviction_candidate()    │
//!   │  drop key/value ◄────────────┼───────────│   → victim, then evict_entry │
//!   │                              │  delete   │                              │
//!   │  remove(key) / expiry ───────┼──────────►│ remove_entry_from_repl...    │
//!   └──────────────────────────────┘           └──────────────────────────────┘
//! ```
//!
//! ## Handle Contract
//!
//! An [`EntryId`] is valid from admission until the entry is evicted, removed
//! or cleared. Passing a handle after that point, or a handle issued by a
//! different controller, is a caller bug and panics.
//!
//! ## Thread Safety
//!
//! `Eviction` methods take `&mut self`; implementations are not internally
//! synchronized. The segmented front
//! ([`SegmentedClockPro`](crate::policy::segmented::SegmentedClockPro)) wraps
//! one controller per segment in a lock and is marked [`ConcurrentEviction`].
//!
//! ## Example
//!
//! ```
//! use clockpro::builder::ClockProBuilder;
//! use clockpro::policy::clock_pro::fingerprint_of;
//! use clockpro::traits::Eviction;
//!
//! fn admit_all<E: Eviction>(eviction: &mut E, keys: &[&str]) -> usize {
//!     for key in keys {
//!         eviction.insert_into_replacement_list(fingerprint_of(key));
//!     }
//!     eviction.evict_excess().len()
//! }
//!
//! let mut eviction = ClockProBuilder::new(2).build();
//! assert_eq!(admit_all(&mut eviction, &["a", "b", "c"]), 1);
//! assert_eq!(eviction.size(), 2);
//! ```

use crate::integrity::IntegrityReport;
use crate::policy::clock_pro::{DetachedEntry, EntryId};

/// Replacement policy driven by a fingerprint-keyed cache.
pub trait Eviction {
    /// Admits a newly resident entry and returns its handle.
    fn insert_into_replacement_list(&mut self, fingerprint: u32) -> EntryId;

    /// Records one read of a resident entry.
    fn record_hit(&mut self, id: EntryId);

    /// Selects the next entry to evict. The entry stays resident until
    /// [`evict_entry`](Self::evict_entry) is called.
    fn find_eviction_candidate(&mut self) -> EntryId;

    /// Detaches an entry because it is being evicted for space.
    fn evict_entry(&mut self, id: EntryId) -> DetachedEntry;

    /// Detaches an entry removed for any reason other than space.
    fn remove_entry_from_replacement_list(&mut self, id: EntryId) -> DetachedEntry;

    /// Detaches every resident entry and returns how many there were.
    fn remove_all(&mut self) -> usize;

    /// Number of resident entries.
    fn size(&self) -> usize;

    /// Capacity after which [`evict_excess`](Self::evict_excess) evicts.
    fn max_size(&self) -> usize;

    /// Total hits recorded, including hits of entries no longer resident.
    fn hit_count(&self) -> u64;

    /// Policy-specific statistics as a single human-readable line.
    fn extra_statistics(&self) -> String;

    /// Appends one named assertion per structural invariant to `report`.
    fn check_integrity(&self, report: &mut IntegrityReport);

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Evicts until the resident count is back within [`max_size`](Self::max_size).
    fn evict_excess(&mut self) -> Vec<DetachedEntry> {
        let mut evicted = Vec::new();
        while self.size() > self.max_size() {
            let victim = self.find_eviction_candidate();
            evicted.push(self.evict_entry(victim));
        }
        evicted
    }
}

/// Marker for eviction fronts that may be shared across threads.
pub trait ConcurrentEviction: Send + Sync {}
