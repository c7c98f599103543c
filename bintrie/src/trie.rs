//! Binary prefix trie implementation.
//!
//! This module contains [`BinaryTrie`], an ordered map from bit-addressable keys to
//! values that also answers "which stored prefixes contain this key" queries.

use std::fmt;
use std::marker::PhantomData;

use crate::cursor::NodeRef;
use crate::error::{Result, TrieError};
use crate::iter::{Iter, Keys, Values};
use crate::keys::BitKey;
use crate::node::{Arena, NodeId, ROOT};
use crate::utils::bit_path::BitPath;
use crate::views::{EntriesView, KeysView, ValuesView};

/// An order-preserving binary prefix trie.
///
/// Every key is a path of `bit_len()` left/right steps from the root, one step per bit.
/// Nodes that only fork the path toward deeper keys are not entries; only positions
/// written by [`insert`](BinaryTrie::insert) are. The root is always present and is
/// never an entry, so zero-length keys cannot be stored.
///
/// Iteration runs in *prefix order*: a pre-order walk (node, left subtree, right
/// subtree), so a supernet always precedes its subnets and siblings are ordered 0
/// before 1.
///
/// ## Examples
///
/// Longest-prefix match over CIDR blocks:
///
/// ```rust
/// use bintrie::{BinaryTrie, Ipv4Cidr};
///
/// let mut routes = BinaryTrie::<Ipv4Cidr, &str>::new();
/// routes.insert("10.0.0.0/8".parse().unwrap(), "corp");
/// routes.insert("10.20.0.0/16".parse().unwrap(), "lab");
/// routes.insert("192.168.0.0/16".parse().unwrap(), "home");
///
/// let dst: Ipv4Cidr = "10.20.30.40".parse().unwrap();
/// let candidates = routes.values_along_prefix(&dst, true);
/// assert_eq!(candidates, vec![&"corp", &"lab"]);
/// assert_eq!(candidates.last(), Some(&&"lab"));
/// ```
///
/// ## Concurrency
///
/// The trie is a plain single-threaded structure. Borrowing rules already keep an
/// iterator and a mutation from overlapping; callers sharing a trie across threads must
/// serialize access themselves or hand out [`Clone`]s.
pub struct BinaryTrie<K, V>
where
    K: BitKey,
{
    arena: Arena<V>,
    len: usize,
    _phantom: PhantomData<K>,
}

impl<K: BitKey, V> Default for BinaryTrie<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> BinaryTrie<K, V>
where
    K: BitKey,
{
    /// Create an empty trie. The root node always exists.
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            len: 0,
            _phantom: Default::default(),
        }
    }

    /// Create an empty trie with room for `nodes` nodes (entries plus branch nodes).
    pub fn with_capacity(nodes: usize) -> Self {
        Self {
            arena: Arena::with_capacity(nodes),
            len: 0,
            _phantom: Default::default(),
        }
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert a key-value pair, returning the value previously stored at that key.
    ///
    /// # Panics
    ///
    /// If `key.bit_len()` is zero or exceeds `K::MAX_BIT_LEN`. Use
    /// [`try_insert`](BinaryTrie::try_insert) when keys come from untrusted codecs.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bintrie::BinaryTrie;
    ///
    /// let mut trie = BinaryTrie::<u32, i32>::new();
    /// assert_eq!(trie.insert(7, 100), None);
    /// assert_eq!(trie.insert(7, 200), Some(100));
    /// assert_eq!(trie.get(&7), Some(&200));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.try_insert(key, value) {
            Ok(previous) => previous,
            Err(e) => panic!("{e}"),
        }
    }

    /// Insert a key-value pair, rejecting zero-length keys and keys longer than
    /// `K::MAX_BIT_LEN`.
    ///
    /// A rejected key leaves the trie untouched.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<Option<V>> {
        let len = Self::checked_len(&key)?;
        if len == 0 {
            return Err(TrieError::EmptyKey);
        }
        let mut cur = ROOT;
        for i in 0..len {
            let bit = key.bit_at(i);
            cur = match self.arena.get(cur).child(bit) {
                Some(child) => child,
                None => self.arena.attach_branch(cur, bit),
            };
        }
        let previous = self.arena.get_mut(cur).set_value(value);
        if previous.is_none() {
            self.len += 1;
        }
        Ok(previous)
    }

    pub fn get(&self, key: &K) -> Option<&V> {
        self.arena.get(self.find(key)?).value()
    }

    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = self.find(key)?;
        self.arena.get_mut(id).value_mut()
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().any(|v| v == value)
    }

    /// Remove the entry at `key`, returning its value.
    ///
    /// Branch nodes left without children or an entry are pruned on the way back up,
    /// so every leaf of the tree is always an entry.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let id = self.find(key)?;
        let value = self.arena.get_mut(id).take_value()?;
        self.len -= 1;
        self.prune_from(id);
        Some(value)
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        tracing::debug!(entries = self.len, "clearing trie");
        self.arena.clear();
        self.len = 0;
    }

    /// The root node: the zero-length position. It is never an entry.
    pub fn root(&self) -> NodeRef<'_, K, V> {
        NodeRef::new(self, ROOT)
    }

    /// The first entry in prefix order.
    pub fn first_node(&self) -> Option<NodeRef<'_, K, V>> {
        self.first_entry_in(ROOT).map(|id| NodeRef::new(self, id))
    }

    /// The last entry in prefix order: the deepest node down the right-most path.
    pub fn last_node(&self) -> Option<NodeRef<'_, K, V>> {
        let id = self.last_in(ROOT);
        self.arena
            .get(id)
            .is_entry()
            .then(|| NodeRef::new(self, id))
    }

    /// The node at `key`'s position, whether or not it is an entry.
    pub fn node_for(&self, key: &K) -> Option<NodeRef<'_, K, V>> {
        self.find(key).map(|id| NodeRef::new(self, id))
    }

    /// Values of every entry whose key is a prefix of `key`, shortest prefix first.
    ///
    /// With `include_exact` false the entry at `key` itself is left out. The last
    /// element, if any, is the longest-prefix match.
    pub fn values_along_prefix(&self, key: &K, include_exact: bool) -> Vec<&V> {
        self.ancestors(key, include_exact)
            .into_iter()
            .filter_map(|id| self.arena.get(id).value())
            .collect()
    }

    /// Like [`values_along_prefix`](BinaryTrie::values_along_prefix), paired with each
    /// matching entry's key.
    pub fn entries_along_prefix(&self, key: &K, include_exact: bool) -> Vec<(K, &V)> {
        self.ancestors(key, include_exact)
            .into_iter()
            .filter_map(|id| Some((self.resolve_key(id)?, self.arena.get(id).value()?)))
            .collect()
    }

    /// Entries in prefix order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self)
    }

    /// Keys in prefix order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self)
    }

    /// Values in prefix order, without rebuilding keys.
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self)
    }

    /// Restartable, displayable view of the keys.
    pub fn key_view(&self) -> KeysView<'_, K, V> {
        KeysView::new(self)
    }

    /// Restartable, displayable view of the values.
    pub fn value_view(&self) -> ValuesView<'_, K, V> {
        ValuesView::new(self)
    }

    /// Restartable, displayable view of the entries.
    pub fn entries(&self) -> EntriesView<'_, K, V> {
        EntriesView::new(self)
    }
}

// Internals implementation
impl<K, V> BinaryTrie<K, V>
where
    K: BitKey,
{
    pub(crate) fn arena(&self) -> &Arena<V> {
        &self.arena
    }

    fn checked_len(key: &K) -> Result<usize> {
        let len = key.bit_len();
        if let Some(max) = K::MAX_BIT_LEN
            && len > max
        {
            return Err(TrieError::PrefixTooLong { len, max });
        }
        Ok(len)
    }

    /// Walk to `key`'s position without creating nodes.
    fn find(&self, key: &K) -> Option<NodeId> {
        let len = match Self::checked_len(key) {
            Ok(len) => len,
            Err(e) => {
                tracing::debug!(error = %e, "rejecting key");
                return None;
            }
        };
        let mut cur = ROOT;
        for i in 0..len {
            cur = self.arena.get(cur).child(key.bit_at(i))?;
        }
        Some(cur)
    }

    /// Nodes passed while walking toward `key` that hold entries, root first.
    fn ancestors(&self, key: &K, include_exact: bool) -> Vec<NodeId> {
        let Ok(len) = Self::checked_len(key) else {
            tracing::debug!(len = key.bit_len(), "rejecting over-long prefix query");
            return Vec::new();
        };
        let mut found = Vec::new();
        let mut cur = ROOT;
        for depth in 0..=len {
            let node = self.arena.get(cur);
            if node.is_entry() && (depth < len || include_exact) {
                found.push(cur);
            }
            if depth == len {
                break;
            }
            match node.child(key.bit_at(depth)) {
                Some(child) => cur = child,
                None => break,
            }
        }
        found
    }

    fn prune_from(&mut self, id: NodeId) {
        let mut cur = id;
        while cur != ROOT {
            let node = self.arena.get(cur);
            if node.is_entry() || node.has_children() {
                break;
            }
            tracing::trace!(depth = node.depth, "pruning empty branch node");
            match self.arena.detach(cur) {
                Some(parent) => cur = parent,
                None => break,
            }
        }
    }

    /// First entry of the subtree rooted at `id`, in prefix order.
    fn first_entry_in(&self, mut id: NodeId) -> Option<NodeId> {
        loop {
            let node = self.arena.get(id);
            if node.is_entry() {
                return Some(id);
            }
            id = node.left().or(node.right())?;
        }
    }

    /// Last node of the subtree rooted at `id`, in prefix order. Outside of an empty
    /// trie this is always an entry, because pruning leaves no entry-less leaves.
    fn last_in(&self, mut id: NodeId) -> NodeId {
        loop {
            let node = self.arena.get(id);
            match node.right().or(node.left()) {
                Some(child) => id = child,
                None => return id,
            }
        }
    }

    /// Next entry after position `id` in prefix order.
    pub(crate) fn successor_id(&self, id: NodeId) -> Option<NodeId> {
        let node = self.arena.get(id);
        if let Some(child) = node.left().or(node.right()) {
            return self.first_entry_in(child);
        }
        // Climb until we leave a left subtree whose parent also has a right subtree.
        let mut cur = id;
        while let Some(parent) = self.arena.get(cur).parent {
            if self.arena.side_of(cur) == Some(false)
                && let Some(right) = self.arena.get(parent).right()
            {
                return self.first_entry_in(right);
            }
            cur = parent;
        }
        None
    }

    /// Previous entry before position `id` in prefix order.
    pub(crate) fn predecessor_id(&self, id: NodeId) -> Option<NodeId> {
        let mut cur = id;
        loop {
            let parent = self.arena.get(cur).parent?;
            if self.arena.side_of(cur) == Some(true)
                && let Some(left) = self.arena.get(parent).left()
            {
                return Some(self.last_in(left));
            }
            if self.arena.get(parent).is_entry() {
                return Some(parent);
            }
            cur = parent;
        }
    }

    /// The key position `id` stands for, entry or not. `None` when the codec has no key
    /// of that length; entry positions always resolve.
    pub(crate) fn resolve_key(&self, id: NodeId) -> Option<K> {
        let mut sides = Vec::with_capacity(self.arena.get(id).depth);
        let mut cur = id;
        while let Some(side) = self.arena.side_of(cur) {
            sides.push(side);
            cur = self.arena.get(cur).parent.unwrap_or(ROOT);
        }
        let path: BitPath = sides.into_iter().rev().collect();
        let key = K::from_bits(&path)?;
        debug_assert_eq!(key.bit_len(), path.len());
        Some(key)
    }
}

impl<K, V> Clone for BinaryTrie<K, V>
where
    K: BitKey,
    V: Clone,
{
    /// Copies the node graph node by node into a fresh, compact arena. Values are
    /// cloned; nothing is shared with the source afterwards.
    fn clone(&self) -> Self {
        let live = self.arena.slots() - self.arena.free_slots();
        let mut arena = Arena::with_capacity(live);
        arena.get_mut(ROOT).content = self.arena.get(ROOT).content.clone();

        let mut stack = vec![(ROOT, ROOT)];
        while let Some((src, dst)) = stack.pop() {
            for bit in [false, true] {
                if let Some(child) = self.arena.get(src).child(bit) {
                    let copy = arena.attach_branch(dst, bit);
                    arena.get_mut(copy).content = self.arena.get(child).content.clone();
                    stack.push((child, copy));
                }
            }
        }

        Self {
            arena,
            len: self.len,
            _phantom: Default::default(),
        }
    }
}

impl<K, V> PartialEq for BinaryTrie<K, V>
where
    K: BitKey + PartialEq,
    V: PartialEq,
{
    /// Equal when both hold the same entries; node shape and arena layout are ignored.
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<K, V> Eq for BinaryTrie<K, V>
where
    K: BitKey + Eq,
    V: Eq,
{
}

impl<K, V> fmt::Debug for BinaryTrie<K, V>
where
    K: BitKey + fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> fmt::Display for BinaryTrie<K, V>
where
    K: BitKey + fmt::Display,
    V: fmt::Display,
{
    /// `{k=v, k=v}` in prefix order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{k}={v}")?;
        }
        f.write_str("}")
    }
}

impl<K: BitKey, V> FromIterator<(K, V)> for BinaryTrie<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut trie = Self::new();
        trie.extend(iter);
        trie
    }
}

impl<K: BitKey, V> Extend<(K, V)> for BinaryTrie<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K: BitKey, V> IntoIterator for &'a BinaryTrie<K, V> {
    type Item = (K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
