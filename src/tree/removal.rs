//! Leaf removal
//!
//! Works on real-child semantics: a node whose sides are only threads is
//! still a leaf. Threads elsewhere that pointed at the removed node are
//! reset to "no child", and an installed threading is marked stale.

use tracing::{debug, warn};

use super::{Label, Link, NodeId, Side, ThreadState, ThreadedTree};
use crate::TreeError;

impl ThreadedTree {
    /// Detach and release a leaf
    ///
    /// Fails without touching the tree if it is empty, if `id` is not a live
    /// node of this tree, or if the node still has a real child. Removing the
    /// parentless root empties the tree.
    ///
    /// # Returns
    /// The label of the removed node.
    pub fn remove_leaf(&mut self, id: NodeId) -> Result<Label, TreeError> {
        if self.is_empty() {
            return Err(TreeError::EmptyTree);
        }
        let node = self.get(id).ok_or(TreeError::NodeNotFound(id))?;
        if !node.is_leaf() {
            return Err(TreeError::NotALeaf(id));
        }
        let value = node.value();

        match node.parent() {
            None if self.root() == Some(id) => {
                self.clear();
                debug!(label = value, "removed root, tree is now empty");
                return Ok(value);
            }
            None => return Err(TreeError::NodeNotFound(id)),
            Some(parent) => {
                for side in Side::BOTH {
                    if self.link(parent, side).target() == Some(id) {
                        if let Some(parent_node) = self.get_mut(parent) {
                            parent_node.set_link(side, Link::Absent);
                        }
                    }
                }
            }
        }

        self.release(id);
        let dangling = self.drop_threads_to(id);

        if let ThreadState::Threaded(order) = self.thread_state() {
            self.set_state(ThreadState::Stale(order));
            warn!(
                label = value,
                %order,
                "removed a leaf from a threaded tree; re-thread before walking"
            );
        }
        debug!(label = value, dangling, nodes = self.len(), "removed leaf");
        Ok(value)
    }

    /// Reset every thread targeting `id` to "no child"
    fn drop_threads_to(&mut self, id: NodeId) -> usize {
        let mut dropped = 0;
        for node in self.nodes.iter_mut().flatten() {
            for side in Side::BOTH {
                if node.thread(side) == Some(id) {
                    node.set_link(side, Link::Absent);
                    dropped += 1;
                }
            }
        }
        dropped
    }
}
