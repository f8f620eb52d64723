/// Index of a node inside a partition's arena.
pub(crate) type NodeIndex = usize;

/// A single cache slot. Links point at neighbouring slots in the same arena, never outside it.
#[derive(Debug)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    /// Neighbour towards the most-recently-used end.
    pub(crate) prev: Option<NodeIndex>,
    /// Neighbour towards the least-recently-used end.
    pub(crate) next: Option<NodeIndex>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            prev: None,
            next: None,
        }
    }

    /// Overwrites key and value in place, handing back the old key.
    pub(crate) fn reuse(&mut self, key: K, value: V) -> K {
        self.value = value;
        std::mem::replace(&mut self.key, key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_starts_unlinked() {
        // when
        let node = Node::new("key", 1);

        // then
        assert_eq!(node.prev, None);
        assert_eq!(node.next, None);
    }

    #[test]
    fn it_reuses_slot_and_returns_old_key() {
        // given
        let mut node = Node::new("old", 1);
        node.prev = Some(3);

        // when
        let old_key = node.reuse("new", 2);

        // then
        assert_eq!(old_key, "old");
        assert_eq!(node.key, "new");
        assert_eq!(node.value, 2);
        assert_eq!(node.prev, Some(3));
    }
}
