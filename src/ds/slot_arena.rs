//! Slot arena with generation-checked handles.
//!
//! Values live in a `Vec` of slots; freed slots go onto a free list and are
//! reused by later inserts. Every slot carries a generation that is bumped
//! when the slot is freed, so a [`SlotId`] that outlived its value is
//! recognised as stale instead of silently aliasing the new occupant.
//!
//! ## Architecture
//!
//! ```text
//!   slots: Vec<Slot<T>>                       free_list: Vec<usize>
//!   ┌───────┬────────────┬──────────────┐     ┌───┐
//!   │ index │ generation │ value        │     │ 1 │ ◄── next insert reuses 1
//!   ├───────┼────────────┼──────────────┤     └───┘
//!   │   0   │     0      │ Some(A)      │
//!   │   1   │     1      │ None         │     SlotId { index: 1, gen: 0 } → stale
//!   │   2   │     0      │ Some(C)      │     SlotId { index: 1, gen: 1 } → next occupant
//!   └───────┴────────────┴──────────────┘
//! ```
//!
//! Indexing (`arena[id]`) panics on a stale or foreign id; the callers in this
//! crate only index with handles they are required to hold, so a panic there
//! is a broken caller contract rather than a runtime condition.

use std::ops::{Index, IndexMut};

/// Handle to a value stored in a [`SlotArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId {
    index: u32,
    generation: u32,
}

impl SlotId {
    pub(crate) fn new(index: usize, generation: u32) -> Self {
        Self {
            index: index as u32,
            generation,
        }
    }

    /// Position of the slot inside the arena.
    pub fn index(self) -> usize {
        self.index as usize
    }

    /// Generation of the slot at the time the handle was issued.
    pub fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

#[derive(Debug)]
pub struct SlotArena<T> {
    slots: Vec<Slot<T>>,
    free_list: Vec<usize>,
    len: usize,
}

impl<T> SlotArena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_list: Vec::new(),
            len: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            len: 0,
        }
    }

    /// Stores `value` and returns its handle.
    pub fn insert(&mut self, value: T) -> SlotId {
        self.insert_with(|_| value)
    }

    /// Stores the value built by `f`, which receives the handle the value
    /// will live under. Used by self-referencing nodes (cyclic lists).
    pub fn insert_with(&mut self, f: impl FnOnce(SlotId) -> T) -> SlotId {
        let id = if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx];
            let id = SlotId::new(idx, slot.generation);
            slot.value = Some(f(id));
            id
        } else {
            let idx = self.slots.len();
            let id = SlotId::new(idx, 0);
            self.slots.push(Slot {
                generation: 0,
                value: Some(f(id)),
            });
            id
        };
        self.len += 1;
        id
    }

    /// Frees the slot behind `id`; returns `None` for stale handles.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.index())?;
        if slot.generation != id.generation {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(id.index());
        self.len -= 1;
        Some(value)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots
            .get(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_ref())
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots
            .get_mut(id.index())
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.value.as_mut())
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Frees every slot. Generations are bumped so older handles stay stale.
    pub fn clear(&mut self) {
        self.free_list.clear();
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            if slot.value.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
            self.free_list.push(idx);
        }
        self.len = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> {
        self.slots.iter().enumerate().filter_map(|(idx, slot)| {
            slot.value
                .as_ref()
                .map(|value| (SlotId::new(idx, slot.generation), value))
        })
    }
}

impl<T> Default for SlotArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<SlotId> for SlotArena<T> {
    type Output = T;

    fn index(&self, id: SlotId) -> &T {
        match self.get(id) {
            Some(value) => value,
            None => panic!("stale or foreign slot id {id:?}"),
        }
    }
}

impl<T> IndexMut<SlotId> for SlotArena<T> {
    fn index_mut(&mut self, id: SlotId) -> &mut T {
        match self.get_mut(id) {
            Some(value) => value,
            None => panic!("stale or foreign slot id {id:?}"),
        }
    }
}
