/// Index of a node in the trie's arena.
pub(crate) type NodeId = usize;

pub(crate) const ROOT: NodeId = 0;

/// Whether a node is a stored map entry or only forks the path toward deeper entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Content<V> {
    Branch,
    Entry(V),
}

/// One position in the binary path space.
///
/// Children are owned through the arena: a node is reachable from the root only through
/// `children` links. `parent` is positional and is never used to decide ownership.
#[derive(Clone, Debug)]
pub(crate) struct Node<V> {
    pub(crate) parent: Option<NodeId>,
    /// `[left (bit 0), right (bit 1)]`
    pub(crate) children: [Option<NodeId>; 2],
    pub(crate) depth: usize,
    pub(crate) content: Content<V>,
}

impl<V> Node<V> {
    #[inline]
    pub(crate) fn new_root() -> Self {
        Self {
            parent: None,
            children: [None, None],
            depth: 0,
            content: Content::Branch,
        }
    }

    #[inline]
    pub(crate) fn new_branch(parent: NodeId, depth: usize) -> Self {
        Self {
            parent: Some(parent),
            children: [None, None],
            depth,
            content: Content::Branch,
        }
    }

    #[inline]
    pub(crate) fn child(&self, bit: bool) -> Option<NodeId> {
        self.children[bit as usize]
    }

    #[inline]
    pub(crate) fn left(&self) -> Option<NodeId> {
        self.children[0]
    }

    #[inline]
    pub(crate) fn right(&self) -> Option<NodeId> {
        self.children[1]
    }

    pub(crate) fn is_entry(&self) -> bool {
        matches!(&self.content, Content::Entry(_))
    }

    pub(crate) fn has_children(&self) -> bool {
        self.children[0].is_some() || self.children[1].is_some()
    }

    pub(crate) fn value(&self) -> Option<&V> {
        let Content::Entry(value) = &self.content else {
            return None;
        };
        Some(value)
    }

    pub(crate) fn value_mut(&mut self) -> Option<&mut V> {
        let Content::Entry(value) = &mut self.content else {
            return None;
        };
        Some(value)
    }

    /// Store `value`, returning the one it replaces if this was already an entry.
    pub(crate) fn set_value(&mut self, value: V) -> Option<V> {
        match std::mem::replace(&mut self.content, Content::Entry(value)) {
            Content::Entry(old) => Some(old),
            Content::Branch => None,
        }
    }

    /// Demote to a branch node, handing back the stored value.
    pub(crate) fn take_value(&mut self) -> Option<V> {
        match std::mem::replace(&mut self.content, Content::Branch) {
            Content::Entry(old) => Some(old),
            Content::Branch => None,
        }
    }
}

/// Slab of nodes with slot reuse. Slot [`ROOT`] always holds the root.
#[derive(Debug)]
pub(crate) struct Arena<V> {
    nodes: Vec<Node<V>>,
    free: Vec<NodeId>,
}

impl<V> Arena<V> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: vec![Node::new_root()],
            free: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(Node::new_root());
        Self {
            nodes,
            free: Vec::new(),
        }
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> &Node<V> {
        &self.nodes[id]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node<V> {
        &mut self.nodes[id]
    }

    /// Create a branch child of `parent` on side `bit` and link it in.
    pub(crate) fn attach_branch(&mut self, parent: NodeId, bit: bool) -> NodeId {
        debug_assert!(self.nodes[parent].child(bit).is_none());
        let node = Node::new_branch(parent, self.nodes[parent].depth + 1);
        let id = match self.free.pop() {
            Some(id) => {
                tracing::trace!(slot = id, "reusing freed arena slot");
                self.nodes[id] = node;
                id
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };
        self.nodes[parent].children[bit as usize] = Some(id);
        id
    }

    /// Unlink the childless, non-entry node `id` from its parent and recycle its slot.
    /// Returns the parent.
    pub(crate) fn detach(&mut self, id: NodeId) -> Option<NodeId> {
        debug_assert!(id != ROOT);
        debug_assert!(!self.nodes[id].has_children() && !self.nodes[id].is_entry());
        let parent = self.nodes[id].parent.take()?;
        let siblings = &mut self.nodes[parent].children;
        if siblings[0] == Some(id) {
            siblings[0] = None;
        } else {
            debug_assert_eq!(siblings[1], Some(id));
            siblings[1] = None;
        }
        self.free.push(id);
        Some(parent)
    }

    /// Which side of its parent `id` hangs on; `None` for the root.
    pub(crate) fn side_of(&self, id: NodeId) -> Option<bool> {
        let parent = self.nodes[id].parent?;
        Some(self.nodes[parent].right() == Some(id))
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.truncate(1);
        self.nodes[ROOT] = Node::new_root();
        self.free.clear();
    }

    /// Slots allocated, including the root and recycled ones.
    pub(crate) fn slots(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn free_slots(&self) -> usize {
        self.free.len()
    }
}
