//! Read-only handles onto individual trie nodes.

use std::fmt;

use crate::keys::BitKey;
use crate::node::{NodeId, ROOT};
use crate::trie::BinaryTrie;

/// A borrowed position in a [`BinaryTrie`]: an entry node or a branch node.
///
/// `NodeRef`s navigate the tree directly (`left`, `right`, `parent`) or in prefix order
/// (`successor`, `predecessor`). Each step is O(depth) at worst and allocates nothing.
pub struct NodeRef<'a, K: BitKey, V> {
    trie: &'a BinaryTrie<K, V>,
    id: NodeId,
}

impl<K: BitKey, V> Clone for NodeRef<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: BitKey, V> Copy for NodeRef<'_, K, V> {}

impl<'a, K: BitKey, V> NodeRef<'a, K, V> {
    pub(crate) fn new(trie: &'a BinaryTrie<K, V>, id: NodeId) -> Self {
        Self { trie, id }
    }

    pub(crate) fn id(&self) -> NodeId {
        self.id
    }

    fn at(&self, id: Option<NodeId>) -> Option<Self> {
        id.map(|id| Self::new(self.trie, id))
    }

    /// Whether this position holds an inserted key.
    pub fn is_entry(&self) -> bool {
        self.trie.arena().get(self.id).is_entry()
    }

    pub fn is_root(&self) -> bool {
        self.id == ROOT
    }

    /// Distance from the root, equal to the bit length of the key this node stands for.
    pub fn depth(&self) -> usize {
        self.trie.arena().get(self.id).depth
    }

    /// The stored value, or `None` for a branch node.
    pub fn value(&self) -> Option<&'a V> {
        self.trie.arena().get(self.id).value()
    }

    /// The key of this node if it is an entry.
    pub fn stored_key(&self) -> Option<K> {
        if self.is_entry() {
            self.resolve_key()
        } else {
            None
        }
    }

    /// The key this position would hold, whether or not anything is stored here.
    ///
    /// Always `Some` for entries. Branch nodes resolve only when the key type has keys of
    /// their length: bit strings and CIDR blocks do, full-width integers do not.
    pub fn resolve_key(&self) -> Option<K> {
        self.trie.resolve_key(self.id)
    }

    pub fn left(&self) -> Option<Self> {
        self.at(self.trie.arena().get(self.id).left())
    }

    pub fn right(&self) -> Option<Self> {
        self.at(self.trie.arena().get(self.id).right())
    }

    pub fn parent(&self) -> Option<Self> {
        self.at(self.trie.arena().get(self.id).parent)
    }

    /// The next entry in prefix order.
    pub fn successor(&self) -> Option<Self> {
        self.at(self.trie.successor_id(self.id))
    }

    /// The previous entry in prefix order.
    pub fn predecessor(&self) -> Option<Self> {
        self.at(self.trie.predecessor_id(self.id))
    }
}

impl<K: BitKey, V> PartialEq for NodeRef<'_, K, V> {
    /// Same node of the same trie.
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.trie, other.trie) && self.id == other.id
    }
}

impl<K: BitKey, V> Eq for NodeRef<'_, K, V> {}

impl<K, V> fmt::Display for NodeRef<'_, K, V>
where
    K: BitKey + fmt::Display,
    V: fmt::Display,
{
    /// `key=value` for entries; branch nodes have neither and print `null=null`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.stored_key(), self.value()) {
            (Some(key), Some(value)) => write!(f, "{key}={value}"),
            _ => f.write_str("null=null"),
        }
    }
}

impl<K, V> fmt::Debug for NodeRef<'_, K, V>
where
    K: BitKey + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", &self.resolve_key())
            .field("depth", &self.depth())
            .field("value", &self.value())
            .finish()
    }
}
