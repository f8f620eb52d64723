use crate::cache::RandomState;
use crate::cache::node::{Node, NodeIndex};
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::ops::ControlFlow;
use tracing::trace;

/// Upper bound on the key index size reserved up front. Larger partitions grow on demand.
const MAX_PRESIZED_ENTRIES: usize = 1024;

/// Fixed-capacity LRU store with O(1) put, get and delete.
///
/// Nodes live in an arena and are linked by index. The most-recently-used end is `head`, the
/// least-recently-used end is `tail`. Once the partition is full, inserting a new key reuses the
/// tail node in place instead of allocating, and slots freed by [`Partition::delete`] are kept on
/// a free list for the next insert.
///
/// A partition with a capacity of zero never holds any entries.
///
/// The partition does no locking of its own. [`crate::Cache`] keeps each one behind its shard's
/// lock.
#[derive(Debug)]
pub struct Partition<K, V> {
    capacity: usize,
    index: HashMap<K, NodeIndex, RandomState>,
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<NodeIndex>,
    head: Option<NodeIndex>,
    tail: Option<NodeIndex>,
}

impl<K, V> Partition<K, V> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            index: HashMap::with_capacity_and_hasher(
                capacity.min(MAX_PRESIZED_ENTRIES),
                RandomState::default(),
            ),
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Iterates over the entries from most to least recently used.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            partition: self,
            cursor: self.head,
            remaining: self.len(),
        }
    }

    /// Visits entries from most to least recently used until `visitor` breaks.
    pub fn for_each<F>(&self, mut visitor: F)
    where
        F: FnMut(&K, &V) -> ControlFlow<()>,
    {
        for (key, value) in self.iter() {
            if visitor(key, value).is_break() {
                break;
            }
        }
    }

    fn node(&self, index: NodeIndex) -> &Node<K, V> {
        self.slots[index]
            .as_ref()
            .expect("a linked index must point at an occupied slot")
    }

    fn node_mut(&mut self, index: NodeIndex) -> &mut Node<K, V> {
        self.slots[index]
            .as_mut()
            .expect("a linked index must point at an occupied slot")
    }

    fn allocate(&mut self, node: Node<K, V>) -> NodeIndex {
        match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(node);
                index
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }

    /// Links a detached node in at the most-recently-used end.
    fn push_front(&mut self, index: NodeIndex) {
        let old_head = self.head;
        {
            let node = self.node_mut(index);
            node.prev = None;
            node.next = old_head;
        }

        match old_head {
            Some(head) => self.node_mut(head).prev = Some(index),
            None => self.tail = Some(index),
        }

        self.head = Some(index);
    }

    /// Detaches a node from the list. The key index is left untouched.
    fn unlink(&mut self, index: NodeIndex) {
        let (prev, next) = {
            let node = self.node_mut(index);
            let links = (node.prev, node.next);
            node.prev = None;
            node.next = None;
            links
        };

        match prev {
            Some(prev) => self.node_mut(prev).next = next,
            None => self.head = next,
        }

        match next {
            Some(next) => self.node_mut(next).prev = prev,
            None => self.tail = prev,
        }
    }

    /// Moves a linked node to the most-recently-used end.
    fn refresh(&mut self, index: NodeIndex) {
        if self.head == Some(index) {
            return;
        }

        self.unlink(index);
        self.push_front(index);
    }
}

impl<K, V> Partition<K, V>
where
    K: Clone + Eq + Hash,
{
    /// Inserts or overwrites `key`, making it the most recently used entry.
    ///
    /// If the key was present, its previous value is returned. A full partition recycles its
    /// least recently used node for the new key; a zero-capacity partition drops the write.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some(&index) = self.index.get(&key) {
            let previous = std::mem::replace(&mut self.node_mut(index).value, value);
            self.refresh(index);
            return Some(previous);
        }

        if self.capacity == 0 {
            return None;
        }

        if self.index.len() >= self.capacity {
            let index = self
                .tail
                .expect("a full partition must have a least recently used node");
            let evicted = self.node_mut(index).reuse(key.clone(), value);
            self.index.remove(&evicted);
            self.index.insert(key, index);
            self.refresh(index);
            trace!(slot = index, "reused least recently used node");
            return None;
        }

        let index = self.allocate(Node::new(key.clone(), value));
        self.index.insert(key, index);
        self.push_front(index);
        None
    }

    /// Returns the value for `key` and marks it as most recently used.
    pub fn get<Q>(&mut self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = *self.index.get(key)?;
        self.refresh(index);
        Some(&self.node(index).value)
    }

    /// Returns `true` if `key` is present, without touching recency.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.index.contains_key(key)
    }

    /// Removes `key`, returning its value. The freed slot is kept for reuse.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.delete_entry(key).map(|(_, value)| value)
    }

    /// Removes `key`, returning the stored key along with its value.
    pub fn delete_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let index = self.index.remove(key)?;
        self.unlink(index);
        let node = self.slots[index]
            .take()
            .expect("an indexed key must point at an occupied slot");
        self.free.push(index);
        Some((node.key, node.value))
    }

    /// Mutates the value for `key` in place and marks it as most recently used.
    ///
    /// Returns `false` without calling `mutator` if the key is absent.
    pub fn update<Q, F>(&mut self, key: &Q, mutator: F) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        F: FnOnce(&mut V),
    {
        let Some(&index) = self.index.get(key) else {
            return false;
        };

        mutator(&mut self.node_mut(index).value);
        self.refresh(index);
        true
    }
}

/// Borrowing iterator over a [`Partition`], most recently used first.
#[derive(Debug)]
pub struct Iter<'a, K, V> {
    partition: &'a Partition<K, V>,
    cursor: Option<NodeIndex>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.partition.node(self.cursor?);
        self.cursor = node.next;
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V> IntoIterator for &'a Partition<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
