//! Threading engine
//!
//! Every order uses the same visit rule, applied at that order's visit point:
//!
//! 1. `p` has no left edge       -> left  = Thread(prev)
//! 2. `prev` has no right edge   -> prev.right = Thread(p)
//! 3. prev = p
//!
//! The last visited node keeps an empty right side; walks treat it as the end.
//! Old threads are always cleared first, so re-threading never leaves stale tags.

use tracing::{debug, trace};

use super::{Link, NodeId, Side, Tag, ThreadedTree, TraversalOrder};

/// Which threading the tree currently carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum ThreadState {
    /// No threads installed
    #[default]
    Unthreaded,

    /// Threads match this order
    Threaded(TraversalOrder),

    /// Threaded for this order, then structurally modified; re-thread before walking
    Stale(TraversalOrder),
}

impl ThreadState {
    /// Order of the installed threads, current or stale
    pub fn order(&self) -> Option<TraversalOrder> {
        match *self {
            ThreadState::Unthreaded => None,
            ThreadState::Threaded(order) | ThreadState::Stale(order) => Some(order),
        }
    }

    /// True if threads are installed and still match their order
    pub fn is_current(&self) -> bool {
        matches!(self, ThreadState::Threaded(_))
    }
}

/// One installed, non-null thread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct ThreadEdge {
    /// Node owning the slot
    pub source: NodeId,

    /// Left = predecessor, Right = successor
    pub side: Side,

    /// Node the thread points at
    pub target: NodeId,
}

/// Accumulator carried through one threading pass
#[derive(Debug, Default)]
struct ThreadCursor {
    /// Previously visited node
    prev: Option<NodeId>,

    /// Threads written so far
    installed: usize,
}

impl ThreadedTree {
    /// Current threading
    pub fn thread_state(&self) -> ThreadState {
        self.state
    }

    /// Install threads for `order`; no-op on the empty tree
    pub fn thread(&mut self, order: TraversalOrder) {
        let Some(root) = self.root() else {
            return;
        };

        self.clear_threads_rec(root);

        let mut cursor = ThreadCursor::default();
        self.thread_rec(root, order, &mut cursor);
        self.set_state(ThreadState::Threaded(order));

        debug!(%order, nodes = self.len(), threads = cursor.installed, "threaded tree");
    }

    /// Install pre-order threads
    pub fn thread_preorder(&mut self) {
        self.thread(TraversalOrder::Pre);
    }

    /// Install in-order threads
    pub fn thread_inorder(&mut self) {
        self.thread(TraversalOrder::In);
    }

    /// Install post-order threads
    ///
    /// There is no matching threaded walk, see [`ThreadedTree::threaded_walk`].
    pub fn thread_postorder(&mut self) {
        self.thread(TraversalOrder::Post);
    }

    /// Turn every thread back into "no child"
    pub fn clear_threads(&mut self) {
        if let Some(root) = self.root() {
            self.clear_threads_rec(root);
        }
        self.set_state(ThreadState::Unthreaded);
    }

    fn clear_threads_rec(&mut self, id: NodeId) {
        for side in Side::BOTH {
            self.clear_thread(id, side);
        }

        let Some(node) = self.get(id) else {
            return;
        };
        let children = [node.child(Side::Left), node.child(Side::Right)];
        for child in children.into_iter().flatten() {
            self.clear_threads_rec(child);
        }
    }

    fn thread_rec(&mut self, id: NodeId, order: TraversalOrder, cursor: &mut ThreadCursor) {
        let Some(node) = self.get(id) else {
            return;
        };
        // Visiting only fills empty slots, so children read here stay valid.
        let left = node.child(Side::Left);
        let right = node.child(Side::Right);

        if order == TraversalOrder::Pre {
            self.visit(id, cursor);
        }
        if let Some(left) = left {
            self.thread_rec(left, order, cursor);
        }
        if order == TraversalOrder::In {
            self.visit(id, cursor);
        }
        if let Some(right) = right {
            self.thread_rec(right, order, cursor);
        }
        if order == TraversalOrder::Post {
            self.visit(id, cursor);
        }
    }

    fn visit(&mut self, p: NodeId, cursor: &mut ThreadCursor) {
        if self.link(p, Side::Left) == Link::Absent {
            self.set_thread(p, Side::Left, cursor.prev);
            cursor.installed += 1;
            trace!(node = %p, predecessor = ?cursor.prev, "left thread");
        }

        if let Some(prev) = cursor.prev {
            if self.link(prev, Side::Right) == Link::Absent {
                self.set_thread(prev, Side::Right, Some(p));
                cursor.installed += 1;
                trace!(node = %prev, successor = %p, "right thread");
            }
        }

        cursor.prev = Some(p);
    }

    /// Every non-null thread, in arena order, left before right
    pub fn threads(&self) -> Vec<ThreadEdge> {
        self.nodes()
            .flat_map(|(source, node)| {
                Side::BOTH.into_iter().filter_map(move |side| {
                    node.thread(side).map(|target| ThreadEdge { source, side, target })
                })
            })
            .collect()
    }

    /// Number of Thread-tagged slots, including null threads
    pub fn thread_tag_count(&self) -> usize {
        self.nodes()
            .map(|(_, node)| {
                Side::BOTH
                    .iter()
                    .filter(|&&side| node.tag(side) == Tag::Thread)
                    .count()
            })
            .sum()
    }
}
