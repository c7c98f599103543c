use std::iter::FusedIterator;

use crate::keys::BitKey;
use crate::node::NodeId;
use crate::trie::BinaryTrie;

/// Entry node ids in prefix order, stepped with successor/predecessor links.
///
/// `remaining` bounds both ends, so the two cursors never cross.
struct EntryIds<'a, K: BitKey, V> {
    trie: &'a BinaryTrie<K, V>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

impl<K: BitKey, V> Clone for EntryIds<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: BitKey, V> Copy for EntryIds<'_, K, V> {}

impl<'a, K: BitKey, V> EntryIds<'a, K, V> {
    fn new(trie: &'a BinaryTrie<K, V>) -> Self {
        Self {
            trie,
            front: trie.first_node().map(|n| n.id()),
            back: trie.last_node().map(|n| n.id()),
            remaining: trie.len(),
        }
    }
}

impl<K: BitKey, V> Iterator for EntryIds<'_, K, V> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front?;
        self.remaining -= 1;
        self.front = self.trie.successor_id(id);
        Some(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: BitKey, V> DoubleEndedIterator for EntryIds<'_, K, V> {
    fn next_back(&mut self) -> Option<NodeId> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back?;
        self.remaining -= 1;
        self.back = self.trie.predecessor_id(id);
        Some(id)
    }
}

/// Iterator over `(key, &value)` in prefix order. Keys are rebuilt from node positions.
pub struct Iter<'a, K: BitKey, V> {
    ids: EntryIds<'a, K, V>,
}

impl<K: BitKey, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            ids: self.ids.clone(),
        }
    }
}

impl<'a, K: BitKey, V> Iter<'a, K, V> {
    pub(crate) fn new(trie: &'a BinaryTrie<K, V>) -> Self {
        Self {
            ids: EntryIds::new(trie),
        }
    }

    fn entry(&self, id: NodeId) -> Option<(K, &'a V)> {
        let trie = self.ids.trie;
        Some((trie.resolve_key(id)?, trie.arena().get(id).value()?))
    }
}

impl<'a, K: BitKey, V> Iterator for Iter<'a, K, V> {
    type Item = (K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.ids.next()?;
        self.entry(id)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl<K: BitKey, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let id = self.ids.next_back()?;
        self.entry(id)
    }
}

impl<K: BitKey, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K: BitKey, V> FusedIterator for Iter<'_, K, V> {}

/// Iterator over keys in prefix order.
pub struct Keys<'a, K: BitKey, V> {
    inner: Iter<'a, K, V>,
}

impl<K: BitKey, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K: BitKey, V> Keys<'a, K, V> {
    pub(crate) fn new(trie: &'a BinaryTrie<K, V>) -> Self {
        Self {
            inner: Iter::new(trie),
        }
    }
}

impl<K: BitKey, V> Iterator for Keys<'_, K, V> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: BitKey, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<K> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K: BitKey, V> ExactSizeIterator for Keys<'_, K, V> {}
impl<K: BitKey, V> FusedIterator for Keys<'_, K, V> {}

/// Iterator over values in prefix order. Skips key reconstruction entirely.
pub struct Values<'a, K: BitKey, V> {
    ids: EntryIds<'a, K, V>,
}

impl<K: BitKey, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            ids: self.ids.clone(),
        }
    }
}

impl<'a, K: BitKey, V> Values<'a, K, V> {
    pub(crate) fn new(trie: &'a BinaryTrie<K, V>) -> Self {
        Self {
            ids: EntryIds::new(trie),
        }
    }
}

impl<'a, K: BitKey, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        let id = self.ids.next()?;
        self.ids.trie.arena().get(id).value()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl<K: BitKey, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let id = self.ids.next_back()?;
        self.ids.trie.arena().get(id).value()
    }
}

impl<K: BitKey, V> ExactSizeIterator for Values<'_, K, V> {}
impl<K: BitKey, V> FusedIterator for Values<'_, K, V> {}
