pub mod cyclic_list;
pub mod ghost_table;
pub mod segment;
pub mod slot_arena;

pub use cyclic_list::{CyclicLinks, Link, Linked};
pub use ghost_table::{GhostId, GhostTable};
pub use segment::SegmentSelector;
pub use slot_arena::{SlotArena, SlotId};
