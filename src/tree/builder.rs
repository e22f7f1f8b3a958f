//! Complete tree construction
//!
//! Depth d (root at 1) gets two children while d < height.
//! Labels run 1.. in pre-order: a node is labelled before either subtree.

use tracing::debug;

use super::{Label, NodeId, Side, ThreadedTree};
use crate::{TreeConfig, TreeError};

impl ThreadedTree {
    /// Replace the tree with a complete tree of `height` levels
    ///
    /// `height <= 0` leaves the tree empty and returns `Ok(None)`.
    /// A height above the configured maximum (never more than
    /// [`crate::HEIGHT_LIMIT`]) is rejected before anything is released, so
    /// the previous tree survives the error.
    ///
    /// # Returns
    /// The new root.
    pub fn build_complete(&mut self, height: i32) -> Result<Option<NodeId>, TreeError> {
        let max = self.config().effective_max_height();
        if height > 0 && height as u32 > max {
            return Err(TreeError::InvalidHeight { height, max });
        }

        self.clear();
        if height <= 0 {
            debug!(height, "requested non-positive height, tree left empty");
            return Ok(None);
        }

        let height = height as u32;
        if let Some(bound) = TreeConfig::node_bound(height) {
            // Capacity hint only
            let _ = self.nodes.try_reserve_exact(bound);
        }

        let mut next_label: Label = 1;
        let root = self.build_rec(1, height, None, &mut next_label);
        self.root = Some(root);

        debug!(height, nodes = self.len(), "built complete tree");
        Ok(self.root)
    }

    fn build_rec(
        &mut self,
        depth: u32,
        height: u32,
        parent: Option<NodeId>,
        next_label: &mut Label,
    ) -> NodeId {
        let id = self.alloc(*next_label, parent);
        *next_label += 1;

        if depth < height {
            let left = self.build_rec(depth + 1, height, Some(id), next_label);
            self.set_child(id, Side::Left, Some(left));
            let right = self.build_rec(depth + 1, height, Some(id), next_label);
            self.set_child(id, Side::Right, Some(right));
        }

        id
    }
}
