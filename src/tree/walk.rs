//! Stack-free threaded walks
//!
//! Both walks hold a single cursor and derive the next node from the
//! current node's links. They never visit more than `len()` nodes, so a
//! stale threading ends the walk early instead of looping.

use super::{Link, NodeId, Side, ThreadedTree, TraversalOrder};
use crate::TreeError;

/// In-order walk over in-order threads
///
/// Starts at the leftmost node; next is the right thread's target, or the
/// leftmost node of the real right subtree.
#[derive(Debug)]
pub struct InorderThreadedWalk<'a> {
    tree: &'a ThreadedTree,
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a> InorderThreadedWalk<'a> {
    fn new(tree: &'a ThreadedTree) -> Self {
        InorderThreadedWalk {
            tree,
            next: tree.root().and_then(|root| tree.first_inorder(root)),
            remaining: tree.len(),
        }
    }
}

impl<'a> Iterator for InorderThreadedWalk<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if self.remaining == 0 || !self.tree.contains(current) {
            return None;
        }
        self.remaining -= 1;
        self.next = self.tree.inorder_successor(current);
        Some(current)
    }
}

/// Pre-order walk over pre-order threads
///
/// Next is the real left child if there is one; otherwise whatever the right
/// slot holds, child or successor thread alike.
#[derive(Debug)]
pub struct PreorderThreadedWalk<'a> {
    tree: &'a ThreadedTree,
    next: Option<NodeId>,
    remaining: usize,
}

impl<'a> PreorderThreadedWalk<'a> {
    fn new(tree: &'a ThreadedTree) -> Self {
        PreorderThreadedWalk {
            tree,
            next: tree.root(),
            remaining: tree.len(),
        }
    }
}

impl<'a> Iterator for PreorderThreadedWalk<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        if self.remaining == 0 {
            return None;
        }
        let node = self.tree.get(current)?;
        self.remaining -= 1;
        self.next = match node.link(Side::Left) {
            Link::Child(left) => Some(left),
            _ => node.link(Side::Right).target(),
        };
        Some(current)
    }
}

impl ThreadedTree {
    /// Iterator form of the in-order threaded walk
    pub fn inorder_walk(&self) -> InorderThreadedWalk<'_> {
        InorderThreadedWalk::new(self)
    }

    /// Iterator form of the pre-order threaded walk
    pub fn preorder_walk(&self) -> PreorderThreadedWalk<'_> {
        PreorderThreadedWalk::new(self)
    }

    /// Nodes in in-order, following the installed threads
    pub fn inorder_threaded_walk(&self) -> Vec<NodeId> {
        self.inorder_walk().collect()
    }

    /// Nodes in pre-order, following the installed threads
    pub fn preorder_threaded_walk(&self) -> Vec<NodeId> {
        self.preorder_walk().collect()
    }

    /// Threaded walk for `order`
    ///
    /// Post-order has no stack-free walk: at a node with a real right child,
    /// a left/right thread pair cannot tell whether that subtree is done.
    pub fn threaded_walk(&self, order: TraversalOrder) -> Result<Vec<NodeId>, TreeError> {
        match order {
            TraversalOrder::Pre => Ok(self.preorder_threaded_walk()),
            TraversalOrder::In => Ok(self.inorder_threaded_walk()),
            TraversalOrder::Post => Err(TreeError::UnsupportedWalk(order)),
        }
    }
}
