//! Recency list for [`OrderedMap`](crate::ds::OrderedMap).
//!
//! Entries live in a [`SlotArena`] and point at their neighbours by
//! [`SlotId`], so a caller holding an id can unlink or re-append an entry in
//! O(1) without raw pointers.
//!
//! ```text
//!   head ─► [id_1] ◄──► [id_2] ◄──► [id_3] ◄── tail
//!          (oldest)                 (newest)
//! ```
//!
//! The list only grows at the tail and only shrinks by `pop_front` or by
//! unlinking a known id. That is all an append-ordered map needs: new and
//! refreshed entries go to the tail, eviction takes the head.

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

#[derive(Debug, Clone)]
struct Link<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Doubly linked list whose links are arena handles.
#[derive(Debug, Clone)]
pub struct IntrusiveList<T> {
    links: SlotArena<Link<T>>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
}

impl<T> IntrusiveList<T> {
    pub fn new() -> Self {
        Self::from_arena(SlotArena::new())
    }

    /// Creates an empty list with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_arena(SlotArena::with_capacity(capacity))
    }

    fn from_arena(links: SlotArena<Link<T>>) -> Self {
        Self {
            links,
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Number of arena slots allocated so far, including free ones.
    pub fn slot_count(&self) -> usize {
        self.links.slot_count()
    }

    /// Oldest value.
    pub fn front(&self) -> Option<&T> {
        self.get(self.head?)
    }

    /// Newest value.
    pub fn back(&self) -> Option<&T> {
        self.get(self.tail?)
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.links.get(id).map(|link| &link.value)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.links.get_mut(id).map(|link| &mut link.value)
    }

    /// Appends `value` at the tail and returns its handle.
    pub fn push_back(&mut self, value: T) -> SlotId {
        let id = self.links.insert(Link {
            value,
            prev: None,
            next: None,
        });
        self.link_at_tail(id);
        id
    }

    /// Removes the head entry.
    pub fn pop_front(&mut self) -> Option<T> {
        self.remove(self.head?)
    }

    /// Unlinks `id` and returns its value; stale ids yield `None`.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.unlink(id)?;
        self.links.remove(id).map(|link| link.value)
    }

    /// Re-appends a live entry at the tail. Returns `false` for a stale id.
    pub fn move_to_back(&mut self, id: SlotId) -> bool {
        if !self.links.contains(id) {
            return false;
        }
        if self.tail != Some(id) {
            self.unlink(id);
            self.link_at_tail(id);
        }
        true
    }

    pub fn clear(&mut self) {
        self.links.clear();
        self.head = None;
        self.tail = None;
    }

    /// Values from head to tail.
    pub fn iter(&self) -> IntrusiveListIter<'_, T> {
        IntrusiveListIter {
            list: self,
            cursor: self.head,
        }
    }

    /// Handles from head to tail.
    pub fn iter_ids(&self) -> IntrusiveListIdIter<'_, T> {
        IntrusiveListIdIter {
            list: self,
            cursor: self.head,
        }
    }

    /// Walks the list from head to tail and checks that every back link
    /// agrees with the forward walk and that the walk covers every live entry.
    pub fn check_links(&self) -> Result<(), InvariantError> {
        let Some(head) = self.head else {
            if self.tail.is_some() || !self.is_empty() {
                return Err(InvariantError::new(
                    "list has a dangling head/tail or nodes without a head",
                ));
            }
            return Ok(());
        };

        let mut visited = 0usize;
        let mut expected_prev = None;
        let mut cursor = Some(head);

        while let Some(id) = cursor {
            let link = self
                .links
                .get(id)
                .ok_or_else(|| InvariantError::new(format!("slot {} is linked but free", id.0)))?;
            if link.prev != expected_prev {
                return Err(InvariantError::new(format!(
                    "slot {} has a stale back link",
                    id.0
                )));
            }
            visited += 1;
            if visited > self.len() {
                return Err(InvariantError::new("list contains a cycle"));
            }
            expected_prev = Some(id);
            cursor = link.next;
        }

        if self.tail != expected_prev {
            return Err(InvariantError::new("list walk ended before the tail"));
        }
        if visited != self.len() {
            return Err(InvariantError::new(format!(
                "list walk visited {} nodes but arena holds {}",
                visited,
                self.len()
            )));
        }
        Ok(())
    }

    // `id` must be live and currently unlinked.
    fn link_at_tail(&mut self, id: SlotId) {
        let old_tail = self.tail.replace(id);
        if let Some(link) = self.links.get_mut(id) {
            link.prev = old_tail;
            link.next = None;
        }
        match old_tail.and_then(|tail| self.links.get_mut(tail)) {
            Some(tail_link) => tail_link.next = Some(id),
            None => self.head = Some(id),
        }
    }

    fn unlink(&mut self, id: SlotId) -> Option<()> {
        let link = self.links.get_mut(id)?;
        let (prev, next) = (link.prev.take(), link.next.take());

        match prev.and_then(|p| self.links.get_mut(p)) {
            Some(prev_link) => prev_link.next = next,
            None => self.head = next,
        }
        match next.and_then(|n| self.links.get_mut(n)) {
            Some(next_link) => next_link.prev = prev,
            None => self.tail = prev,
        }
        Some(())
    }
}

impl<T> Default for IntrusiveList<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over values, oldest first.
pub struct IntrusiveListIter<'a, T> {
    list: &'a IntrusiveList<T>,
    cursor: Option<SlotId>,
}

impl<'a, T> Iterator for IntrusiveListIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let link = self.list.links.get(self.cursor?)?;
        self.cursor = link.next;
        Some(&link.value)
    }
}

impl<T> Clone for IntrusiveListIter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            list: self.list,
            cursor: self.cursor,
        }
    }
}

/// Iterator over handles, oldest first.
pub struct IntrusiveListIdIter<'a, T> {
    list: &'a IntrusiveList<T>,
    cursor: Option<SlotId>,
}

impl<T> Iterator for IntrusiveListIdIter<'_, T> {
    type Item = SlotId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.cursor?;
        self.cursor = self.list.links.get(id)?.next;
        Some(id)
    }
}
