//! Intrusive cyclic doubly linked lists over a [`SlotArena`].
//!
//! The hot clock, the cold clock and the ghost recency ring are all circular
//! lists whose nodes live in an arena and link to each other by [`SlotId`].
//! A list is represented only by its head (`Option<SlotId>`); the functions
//! here splice nodes in and out and hand back the new head, the way a clock
//! hand is re-pointed after the node under it goes away.
//!
//! ## Architecture
//!
//! ```text
//!            head
//!             │
//!             ▼
//!   ┌──────► [A] ◄──► [B] ◄──► [C] ◄──┐
//!   │                                 │
//!   └─────────────────────────────────┘
//!     C.next == A, A.prev == C (tail is head.prev)
//!
//!   insert_at_tail(head=A, D):  A ◄──► B ◄──► C ◄──► D ◄──► (A)
//! ```
//!
//! A detached node links to itself; a fresh node is built that way by
//! [`Link::detached`].
//!
//! ## Performance
//! - `insert_at_tail` / `remove` / `unlink` / `move_to_front`: O(1)
//! - `len` / `iter` / `check_integrity`: O(n)

use crate::ds::slot_arena::{SlotArena, SlotId};

/// `prev`/`next` pair embedded in every list node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Link {
    pub prev: SlotId,
    pub next: SlotId,
}

impl Link {
    /// Link of a node that is not a member of any list.
    pub fn detached(me: SlotId) -> Self {
        Self { prev: me, next: me }
    }
}

/// A node type that embeds a [`Link`].
pub trait Linked {
    fn link(&self) -> &Link;
    fn link_mut(&mut self) -> &mut Link;
}

/// Storage that can read and rewrite the links of its nodes.
pub trait CyclicLinks {
    fn next(&self, id: SlotId) -> SlotId;
    fn prev(&self, id: SlotId) -> SlotId;
    fn set_next(&mut self, id: SlotId, next: SlotId);
    fn set_prev(&mut self, id: SlotId, prev: SlotId);

    /// `true` if `id` names a live node in this storage.
    fn is_live(&self, id: SlotId) -> bool;
}

impl<T: Linked> CyclicLinks for SlotArena<T> {
    #[inline]
    fn next(&self, id: SlotId) -> SlotId {
        self[id].link().next
    }

    #[inline]
    fn prev(&self, id: SlotId) -> SlotId {
        self[id].link().prev
    }

    #[inline]
    fn set_next(&mut self, id: SlotId, next: SlotId) {
        self[id].link_mut().next = next;
    }

    #[inline]
    fn set_prev(&mut self, id: SlotId, prev: SlotId) {
        self[id].link_mut().prev = prev;
    }

    #[inline]
    fn is_live(&self, id: SlotId) -> bool {
        self.contains(id)
    }
}

/// Inserts the detached `node` just before `head`, i.e. at the tail.
///
/// Returns the head of the resulting list: `node` itself when the list was
/// empty, otherwise the unchanged `head`.
pub fn insert_at_tail<L: CyclicLinks + ?Sized>(
    links: &mut L,
    head: Option<SlotId>,
    node: SlotId,
) -> SlotId {
    let Some(head) = head else {
        links.set_next(node, node);
        links.set_prev(node, node);
        return node;
    };
    let tail = links.prev(head);
    links.set_prev(node, tail);
    links.set_next(node, head);
    links.set_next(tail, node);
    links.set_prev(head, node);
    head
}

/// Unlinks `node` and leaves it self-referencing.
///
/// Returns the former successor of `node`, or `None` if `node` was the only
/// member of its list.
pub fn unlink<L: CyclicLinks + ?Sized>(links: &mut L, node: SlotId) -> Option<SlotId> {
    let next = links.next(node);
    if next == node {
        return None;
    }
    let prev = links.prev(node);
    links.set_next(prev, next);
    links.set_prev(next, prev);
    links.set_next(node, node);
    links.set_prev(node, node);
    Some(next)
}

/// Removes `node` from the list headed by `head` and returns the new head.
///
/// The head only moves when `node` is the head: it then advances to the
/// successor, or becomes `None` when the list is now empty.
pub fn remove<L: CyclicLinks + ?Sized>(
    links: &mut L,
    head: Option<SlotId>,
    node: SlotId,
) -> Option<SlotId> {
    let next = unlink(links, node);
    match head {
        Some(h) if h == node => next,
        other => other,
    }
}

/// Moves `node` (a member of the list) so it becomes the new head.
pub fn move_to_front<L: CyclicLinks + ?Sized>(
    links: &mut L,
    head: Option<SlotId>,
    node: SlotId,
) -> SlotId {
    if head == Some(node) {
        return node;
    }
    let rest = remove(links, head, node);
    insert_at_tail(links, rest, node);
    node
}

/// Number of members, walking from `head` back around to it.
pub fn len<L: CyclicLinks + ?Sized>(links: &L, head: Option<SlotId>) -> usize {
    iter(links, head).count()
}

/// Iterates member ids starting at `head` and following `next`.
pub fn iter<L: CyclicLinks + ?Sized>(links: &L, head: Option<SlotId>) -> CyclicIter<'_, L> {
    CyclicIter {
        links,
        head,
        current: head,
    }
}

/// Verifies the list is a closed, bidirectionally consistent cycle.
///
/// Every member must be live, satisfy `x.next.prev == x`, and the walk must
/// return to `head` within `limit` steps. An empty list is always intact.
pub fn check_integrity<L: CyclicLinks + ?Sized>(
    links: &L,
    head: Option<SlotId>,
    limit: usize,
) -> bool {
    let Some(head) = head else {
        return true;
    };
    let mut current = head;
    for _ in 0..=limit {
        if !links.is_live(current) {
            return false;
        }
        let next = links.next(current);
        if !links.is_live(next) || links.prev(next) != current {
            return false;
        }
        current = next;
        if current == head {
            return true;
        }
    }
    false
}

/// Iterator over the ids of a cyclic list.
pub struct CyclicIter<'a, L: ?Sized> {
    links: &'a L,
    head: Option<SlotId>,
    current: Option<SlotId>,
}

impl<L: CyclicLinks + ?Sized> Iterator for CyclicIter<'_, L> {
    type Item = SlotId;

    fn next(&mut self) -> Option<SlotId> {
        let id = self.current?;
        let next = self.links.next(id);
        self.current = if Some(next) == self.head {
            None
        } else {
            Some(next)
        };
        Some(id)
    }
}
