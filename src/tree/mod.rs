//! Threaded binary tree
//!
//! Nodes live in an arena owned by the tree; ownership flows from the root
//! along Child edges only. Threads and parent links are plain handles and
//! never take part in allocation or release.
//!
//! Removal leaves a tombstone (`None`) in the arena, slots are not reused
//! until the next build or clear.

mod builder;
mod node;
mod removal;
mod threading;
mod traversal;
mod walk;

pub use node::{Label, Link, NodeId, Side, Tag, ThreadedNode};
pub use threading::{ThreadEdge, ThreadState};
pub use traversal::{format_labels, TraversalOrder};
pub use walk::{InorderThreadedWalk, PreorderThreadedWalk};

use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::{TreeConfig, TreeError};

/// Epochs are unique per process, so handles never match across trees or builds.
static NEXT_EPOCH: AtomicU64 = AtomicU64::new(1);

fn next_epoch() -> u64 {
    NEXT_EPOCH.fetch_add(1, Ordering::Relaxed)
}

/// Binary tree whose empty child slots can carry traversal threads
///
/// A tree without root is the valid empty state.
#[derive(Debug)]
pub struct ThreadedTree {
    /// Arena; `None` marks a removed node
    nodes: Vec<Option<ThreadedNode>>,

    /// Root handle (None = empty tree)
    root: Option<NodeId>,

    /// Build generation stamped into every handle
    epoch: u64,

    /// Number of live nodes
    live: usize,

    /// Order of the installed threads, if any
    state: ThreadState,

    config: TreeConfig,
}

impl ThreadedTree {
    /// Create empty tree with default configuration
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    /// Create empty tree with custom configuration
    pub fn with_config(config: TreeConfig) -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
            epoch: next_epoch(),
            live: 0,
            state: ThreadState::Unthreaded,
            config,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Root handle, `None` for the empty tree
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.live
    }

    /// True if the tree has no nodes
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// True if `id` names a live node of this tree
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Look up a node
    pub fn node(&self, id: NodeId) -> Result<&ThreadedNode, TreeError> {
        self.get(id).ok_or(TreeError::NodeNotFound(id))
    }

    /// Live nodes in arena (construction) order
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &ThreadedNode)> + '_ {
        let epoch = self.epoch;
        self.nodes
            .iter()
            .enumerate()
            .filter_map(move |(slot, node)| node.as_ref().map(|n| (NodeId::new(slot, epoch), n)))
    }

    /// First live node carrying `label`
    pub fn find(&self, label: Label) -> Option<NodeId> {
        self.nodes()
            .find(|(_, node)| node.value() == label)
            .map(|(id, _)| id)
    }

    /// Release every node
    ///
    /// The arena is dropped as a whole; no edge is followed, so threads
    /// (including cyclic ones) can never cause a double release.
    pub fn clear(&mut self) {
        if self.live > 0 {
            debug!(nodes = self.live, "clearing tree");
        }
        self.nodes.clear();
        self.root = None;
        self.live = 0;
        self.epoch = next_epoch();
        self.state = ThreadState::Unthreaded;
    }

    #[inline]
    pub(crate) fn get(&self, id: NodeId) -> Option<&ThreadedNode> {
        if id.epoch() != self.epoch {
            return None;
        }
        self.nodes.get(id.slot()).and_then(Option::as_ref)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut ThreadedNode> {
        if id.epoch() != self.epoch {
            return None;
        }
        self.nodes.get_mut(id.slot()).and_then(Option::as_mut)
    }

    /// Content of one side; `Absent` for unknown handles
    #[inline]
    pub(crate) fn link(&self, id: NodeId, side: Side) -> Link {
        self.get(id).map_or(Link::Absent, |node| node.link(side))
    }

    pub(crate) fn alloc(&mut self, value: Label, parent: Option<NodeId>) -> NodeId {
        let id = NodeId::new(self.nodes.len(), self.epoch);
        self.nodes.push(Some(ThreadedNode::new(value, parent)));
        self.live += 1;
        id
    }

    pub(crate) fn release(&mut self, id: NodeId) -> Option<ThreadedNode> {
        if id.epoch() != self.epoch {
            return None;
        }
        let node = self.nodes.get_mut(id.slot())?.take()?;
        self.live -= 1;
        Some(node)
    }

    pub(crate) fn set_state(&mut self, state: ThreadState) {
        self.state = state;
    }

    /// Put `child` on `side` of `parent` as a real edge
    ///
    /// Overwrites whatever was on that side; callers reusing a threaded slot
    /// must clear the thread first.
    pub(crate) fn set_child(&mut self, parent: NodeId, side: Side, child: Option<NodeId>) {
        let link = child.map_or(Link::Absent, Link::Child);
        if let Some(node) = self.get_mut(parent) {
            node.set_link(side, link);
        }
        if let Some(child) = child.and_then(|c| self.get_mut(c)) {
            child.set_parent(Some(parent));
        }
    }

    pub(crate) fn set_thread(&mut self, id: NodeId, side: Side, target: Option<NodeId>) {
        if let Some(node) = self.get_mut(id) {
            node.set_thread(side, target);
        }
    }

    /// Turn a thread on `side` of `id` back into "no child"; real children are kept
    pub(crate) fn clear_thread(&mut self, id: NodeId, side: Side) {
        if let Some(node) = self.get_mut(id) {
            node.clear_thread(side);
        }
    }

    // ------------------------------------------------------------------
    // In-order navigation (children and threads combined)
    // ------------------------------------------------------------------

    /// Leftmost node of the subtree at `id`, following Child edges only
    pub fn first_inorder(&self, id: NodeId) -> Option<NodeId> {
        self.extreme(id, Side::Left)
    }

    /// Rightmost node of the subtree at `id`, following Child edges only
    pub fn last_inorder(&self, id: NodeId) -> Option<NodeId> {
        self.extreme(id, Side::Right)
    }

    fn extreme(&self, id: NodeId, side: Side) -> Option<NodeId> {
        let mut current = id;
        let mut node = self.get(current)?;
        while let Some(next) = node.child(side) {
            match self.get(next) {
                Some(next_node) => {
                    current = next;
                    node = next_node;
                }
                None => break,
            }
        }
        Some(current)
    }

    /// In-order successor: right thread if present, else leftmost of the right subtree
    pub fn inorder_successor(&self, id: NodeId) -> Option<NodeId> {
        self.neighbour(id, Side::Right)
    }

    /// In-order predecessor: left thread if present, else rightmost of the left subtree
    pub fn inorder_predecessor(&self, id: NodeId) -> Option<NodeId> {
        self.neighbour(id, Side::Left)
    }

    fn neighbour(&self, id: NodeId, side: Side) -> Option<NodeId> {
        match self.get(id)?.link(side) {
            Link::Thread(target) => target,
            Link::Child(child) => self.extreme(child, side.opposite()),
            Link::Absent => None,
        }
    }

    // ------------------------------------------------------------------
    // Structural maintenance
    // ------------------------------------------------------------------

    /// Recompute every `parent` along Child edges from the root
    pub fn relink_parents(&mut self) {
        if let Some(root) = self.root {
            self.relink(root, None);
        }
    }

    fn relink(&mut self, id: NodeId, parent: Option<NodeId>) {
        let Some(node) = self.get_mut(id) else {
            return;
        };
        node.set_parent(parent);
        let children = [node.child(Side::Left), node.child(Side::Right)];
        for child in children.into_iter().flatten() {
            self.relink(child, Some(id));
        }
    }

    /// Check structural and threading invariants
    ///
    /// - Root has no parent; every Child edge is mirrored by the child's `parent`
    /// - Every live node is reached exactly once from the root via Child edges
    /// - Thread targets are live nodes
    /// - Unthreaded trees carry no thread; a current threading matches its order
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        let Some(root) = self.root else {
            return self.live == 0 && self.nodes().next().is_none();
        };

        match self.get(root) {
            Some(node) if node.parent().is_none() => {}
            _ => return false,
        }

        // Reachability: each live node exactly once along Child edges
        let mut seen = vec![false; self.nodes.len()];
        let mut stack = vec![root];
        let mut reached = 0;
        while let Some(id) = stack.pop() {
            let Some(node) = self.get(id) else {
                return false;
            };
            if std::mem::replace(&mut seen[id.slot()], true) {
                return false;
            }
            reached += 1;

            for side in Side::BOTH {
                match node.link(side) {
                    Link::Child(child) => {
                        match self.get(child) {
                            Some(c) if c.parent() == Some(id) => stack.push(child),
                            _ => return false,
                        }
                    }
                    Link::Thread(Some(target)) if !self.contains(target) => return false,
                    _ => {}
                }
            }
        }
        if reached != self.live || self.nodes().count() != self.live {
            return false;
        }

        match self.state {
            ThreadState::Unthreaded => self
                .nodes()
                .all(|(_, node)| Side::BOTH.iter().all(|&side| node.tag(side) == Tag::Child)),
            ThreadState::Threaded(order) => self.threads_match(order),
            ThreadState::Stale(_) => true,
        }
    }

    /// Every empty slot holds the predecessor/successor `order` dictates
    fn threads_match(&self, order: TraversalOrder) -> bool {
        let sequence = self.traverse_nodes(order);
        sequence.iter().enumerate().all(|(i, &id)| {
            let Some(node) = self.get(id) else {
                return false;
            };
            let predecessor = i.checked_sub(1).map(|p| sequence[p]);
            let successor = sequence.get(i + 1).copied();

            let left_ok = match node.link(Side::Left) {
                Link::Child(_) => true,
                Link::Thread(target) => target == predecessor,
                Link::Absent => false,
            };
            let right_ok = match node.link(Side::Right) {
                Link::Child(_) => true,
                Link::Thread(target) => successor.is_some() && target == successor,
                Link::Absent => successor.is_none(),
            };
            left_ok && right_ok
        })
    }
}
