//! Recency List Module
//!
//! Doubly linked MRU -> LRU ordering of cache entries, stored in an arena.
//!
//! ```text
//!   nodes[0]          nodes[i] ... nodes[j]          nodes[1]
//!   HEAD  <-> most recent <-> ... <-> least recent <-> TAIL
//! ```
//!
//! Links are arena indices rather than pointers, so the index can hold
//! plain [`EntryId`] handles into entries the list owns.

use super::entry::Entry;

const HEAD: usize = 0;
const TAIL: usize = 1;

// == Entry Handle ==
/// Stable handle to an entry slot in an [`OrderList`].
///
/// Only the list hands these out, so a handle never names a sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntryId(usize);

#[derive(Debug)]
struct Node<K, V> {
    prev: usize,
    next: usize,
    /// None for the two sentinels and for free slots
    entry: Option<Entry<K, V>>,
}

impl<K, V> Node<K, V> {
    fn sentinel() -> Self {
        Self {
            prev: HEAD,
            next: TAIL,
            entry: None,
        }
    }
}

// == Order List ==
/// Recency ordering between head and tail sentinels.
#[derive(Debug)]
pub struct OrderList<K, V> {
    nodes: Vec<Node<K, V>>,
    free: Vec<usize>,
    len: usize,
}

impl<K, V> OrderList<K, V> {
    // == Constructor ==
    /// Creates an empty list with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.saturating_add(2));
        nodes.push(Node::sentinel());
        nodes.push(Node::sentinel());
        Self {
            nodes,
            free: Vec::new(),
            len: 0,
        }
    }

    // == Insert ==
    /// Stores `entry` in a fresh slot and links it as most recent.
    pub fn insert(&mut self, entry: Entry<K, V>) -> EntryId {
        let idx = match self.free.pop() {
            Some(idx) => {
                let node = &mut self.nodes[idx];
                node.prev = idx;
                node.next = idx;
                node.entry = Some(entry);
                idx
            }
            None => {
                let idx = self.nodes.len();
                self.nodes.push(Node {
                    prev: idx,
                    next: idx,
                    entry: Some(entry),
                });
                idx
            }
        };
        self.len += 1;
        let id = EntryId(idx);
        self.link_to_most_recent(id);
        id
    }

    // == Remove ==
    /// Unlinks the entry and frees its slot, returning the entry.
    pub fn remove(&mut self, id: EntryId) -> Option<Entry<K, V>> {
        if self.get(id).is_none() {
            return None;
        }
        self.unlink(id);
        let entry = self.nodes[id.0].entry.take();
        self.free.push(id.0);
        self.len -= 1;
        entry
    }

    // == Unlink ==
    /// Detaches a linked entry by joining its neighbours.
    ///
    /// The entry keeps its slot; the caller either relinks or frees it.
    pub fn unlink(&mut self, id: EntryId) {
        let idx = id.0;
        debug_assert!(idx > TAIL, "sentinels are never unlinked");
        let (prev, next) = (self.nodes[idx].prev, self.nodes[idx].next);
        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;
        self.nodes[idx].prev = idx;
        self.nodes[idx].next = idx;
    }

    // == Link To Most Recent ==
    /// Inserts an unlinked entry directly after the head sentinel.
    pub fn link_to_most_recent(&mut self, id: EntryId) {
        let idx = id.0;
        debug_assert!(idx > TAIL, "sentinels are never relinked");
        let first = self.nodes[HEAD].next;
        self.nodes[idx].prev = HEAD;
        self.nodes[idx].next = first;
        self.nodes[first].prev = idx;
        self.nodes[HEAD].next = idx;
    }

    // == Promote ==
    /// Moves a linked entry to the most recent position.
    pub fn promote(&mut self, id: EntryId) {
        if self.most_recent() == Some(id) {
            return;
        }
        self.unlink(id);
        self.link_to_most_recent(id);
    }

    // == Least Recent ==
    /// Returns the entry just before the tail sentinel.
    pub fn least_recent(&self) -> Option<EntryId> {
        let idx = self.nodes[TAIL].prev;
        (idx != HEAD).then_some(EntryId(idx))
    }

    // == Most Recent ==
    /// Returns the entry just after the head sentinel.
    pub fn most_recent(&self) -> Option<EntryId> {
        let idx = self.nodes[HEAD].next;
        (idx != TAIL).then_some(EntryId(idx))
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry<K, V>> {
        self.nodes.get(id.0).and_then(|node| node.entry.as_ref())
    }

    pub fn get_mut(&mut self, id: EntryId) -> Option<&mut Entry<K, V>> {
        self.nodes
            .get_mut(id.0)
            .and_then(|node| node.entry.as_mut())
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Iterate ==
    /// Walks entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.nodes[HEAD].next,
        }
    }

    // == Clear ==
    /// Drops every entry and resets the sentinels.
    pub fn clear(&mut self) {
        self.nodes.truncate(2);
        self.nodes[HEAD] = Node::sentinel();
        self.nodes[TAIL] = Node::sentinel();
        self.free.clear();
        self.len = 0;
    }

    /// Checks link symmetry and that the chain holds exactly `len` entries.
    #[cfg(test)]
    pub(crate) fn check_links(&self) -> std::result::Result<(), String> {
        let mut count = 0;
        let mut prev = HEAD;
        let mut cursor = self.nodes[HEAD].next;
        while cursor != TAIL {
            let node = &self.nodes[cursor];
            if node.prev != prev {
                return Err(format!("node {cursor} has prev {} not {prev}", node.prev));
            }
            if node.entry.is_none() {
                return Err(format!("node {cursor} is linked without an entry"));
            }
            count += 1;
            if count > self.len {
                return Err("chain is longer than len".to_string());
            }
            prev = cursor;
            cursor = node.next;
        }
        if self.nodes[TAIL].prev != prev {
            return Err("tail sentinel does not point at the last node".to_string());
        }
        if count != self.len {
            return Err(format!("chain holds {count} entries, len is {}", self.len));
        }
        Ok(())
    }
}

// == Iterator ==
/// MRU -> LRU iterator over `(EntryId, &Entry)`.
pub struct Iter<'a, K, V> {
    list: &'a OrderList<K, V>,
    cursor: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (EntryId, &'a Entry<K, V>);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == TAIL {
            return None;
        }
        let node = &self.list.nodes[self.cursor];
        let id = EntryId(self.cursor);
        self.cursor = node.next;
        node.entry.as_ref().map(|entry| (id, entry))
    }
}
