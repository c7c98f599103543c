//! Statistics and introspection for binary tries.
//!
//! Statistics are useful for:
//! - Checking that removal prunes dead branches
//! - Understanding memory usage (branch nodes per entry, recycled arena slots)
//! - Reporting tree depth in benchmarks

use crate::keys::BitKey;
use crate::node::ROOT;
use crate::trie::BinaryTrie;

pub trait TrieStatsTrait {
    fn get_trie_stats(&self) -> TrieStats;
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TrieStats {
    /// Nodes reachable from the root, the root included.
    pub num_nodes: usize,
    pub num_entries: usize,
    /// Reachable nodes that only fork the path, the root included when it is not an entry.
    pub num_branches: usize,
    /// Arena slots freed by pruning and not yet reused.
    pub free_slots: usize,
    /// Depth of the deepest node.
    pub max_depth: usize,
}

impl<K, V> TrieStatsTrait for BinaryTrie<K, V>
where
    K: BitKey,
{
    fn get_trie_stats(&self) -> TrieStats {
        let arena = self.arena();
        let mut stats = TrieStats {
            free_slots: arena.free_slots(),
            ..Default::default()
        };

        let mut stack = vec![ROOT];
        while let Some(id) = stack.pop() {
            let node = arena.get(id);
            stats.num_nodes += 1;
            if node.is_entry() {
                stats.num_entries += 1;
            } else {
                stats.num_branches += 1;
            }
            stats.max_depth = stats.max_depth.max(node.depth);
            stack.extend(node.children.iter().flatten());
        }

        stats
    }
}
