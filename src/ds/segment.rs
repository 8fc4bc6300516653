//! Deterministic fingerprint-to-segment mapping.
//!
//! ## Architecture
//!
//! ```text
//!   fingerprint (u32)
//!       │
//!       ▼
//!   ┌───────────────────────────────────────────────┐
//!   │  SegmentSelector { segments: 4, seed: 7 }     │
//!   │                                               │
//!   │  1. FxHasher::default()                       │
//!   │  2. hash seed, then fingerprint               │
//!   │  3. hasher.finish() % 4                       │
//!   └───────────────────────────────────────────────┘
//!       │
//!       ▼
//!   ┌───────────┬───────────┬───────────┬───────────┐
//!   │ segment 0 │ segment 1 │ segment 2 │ segment 3 │
//!   └───────────┴───────────┴───────────┴───────────┘
//! ```
//!
//! The fingerprint is re-hashed rather than masked so that segment choice
//! stays independent of the low bits the ghost table uses for its buckets.
//!
//! ## Example Usage
//!
//! ```
//! use clockpro::ds::SegmentSelector;
//!
//! let selector = SegmentSelector::new(4, 0);
//! let segment = selector.segment_for(0xdead_beef);
//! assert!(segment < 4);
//! assert_eq!(selector.segment_for(0xdead_beef), segment);
//! ```

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

/// Seeded selector mapping fingerprints to segment indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SegmentSelector {
    segments: usize,
    seed: u64,
}

impl SegmentSelector {
    /// Creates a selector over `segments` segments, clamped to at least one.
    pub fn new(segments: usize, seed: u64) -> Self {
        Self {
            segments: segments.max(1),
            seed,
        }
    }

    pub fn segment_count(&self) -> usize {
        self.segments
    }

    /// Segment index in `[0, segments)` for `fingerprint`.
    pub fn segment_for(&self, fingerprint: u32) -> usize {
        if self.segments == 1 {
            return 0;
        }
        let mut hasher = FxHasher::default();
        self.seed.hash(&mut hasher);
        fingerprint.hash(&mut hasher);
        (hasher.finish() as usize) % self.segments
    }
}

impl Default for SegmentSelector {
    fn default() -> Self {
        Self::new(1, 0)
    }
}
