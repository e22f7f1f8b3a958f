//! # Threaded Binary Trees
//!
//! This library builds complete binary trees and threads them: every empty
//! child slot is rewritten into a predecessor (left) or successor (right)
//! link for a chosen traversal order, so the tree can then be walked
//! without recursion and without an explicit stack.
//!
//! ## Core Pieces
//!
//! 1. **Tagged edges**: each side of a node is `Absent`, a real `Child`, or a `Thread`
//! 2. **Builder**: complete tree of a given height, labelled 1.. in pre-order
//! 3. **Threading engine**: clear old threads, then one visit rule per order
//! 4. **Threaded walks**: in-order and pre-order, driven purely by the links
//! 5. **Leaf removal**: detach a node with no real children
//!
//! ## Usage Example
//!
//! ```
//! use threadtree::{ThreadedTree, TraversalOrder};
//!
//! let mut tree = ThreadedTree::new();
//! tree.build_complete(3).unwrap();
//! tree.thread(TraversalOrder::In);
//!
//! let walked = tree.labels(&tree.inorder_threaded_walk());
//! assert_eq!(walked, tree.inorder());
//! ```

#![warn(missing_docs, missing_debug_implementations)]
#![allow(clippy::new_without_default)]

pub mod tree; // Arena, nodes, builder, traversal, threading, walks
pub mod view; // Renderer-facing edge lists and snapshots

// Re-exports for convenience
pub use tree::{
    format_labels, InorderThreadedWalk, Label, Link, NodeId, PreorderThreadedWalk, Side, Tag,
    ThreadEdge, ThreadState, ThreadedNode, ThreadedTree, TraversalOrder,
};
pub use view::{EdgeKind, EdgeView, NodeView, TreeSnapshot};

use thiserror::Error;

/// Default cap on `build_complete` heights: 2^20 - 1 nodes.
pub const DEFAULT_MAX_HEIGHT: u32 = 20;

/// Hard ceiling on heights: pre-order labels of a height-31 tree still fit a `u32`.
pub const HEIGHT_LIMIT: u32 = 31;

/// Configuration parameters for a tree instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeConfig {
    /// Largest height `build_complete` accepts
    pub max_height: u32,
}

impl TreeConfig {
    /// Configuration with a custom height cap
    pub fn with_max_height(max_height: u32) -> Self {
        Self { max_height }
    }

    /// Cap actually enforced: `max_height`, clamped to [`HEIGHT_LIMIT`]
    pub fn effective_max_height(&self) -> u32 {
        self.max_height.min(HEIGHT_LIMIT)
    }

    /// Number of nodes a complete tree of `height` holds: 2^height - 1
    ///
    /// `None` if the count does not fit a `usize`.
    pub fn node_bound(height: u32) -> Option<usize> {
        1usize.checked_shl(height)?.checked_sub(1)
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_height: DEFAULT_MAX_HEIGHT,
        }
    }
}

/// Errors reported by tree operations
///
/// Every failure is local: the tree is left exactly as it was before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Requested height exceeds the configured cap
    #[error("Invalid height {height}: maximum is {max}")]
    InvalidHeight {
        /// Height that was requested
        height: i32,
        /// Configured maximum
        max: u32,
    },

    /// Leaf removal attempted on a node that still has a real child
    #[error("Node {0} is not a leaf")]
    NotALeaf(NodeId),

    /// Handle does not name a live node of this tree
    #[error("Node {0} not found in tree")]
    NodeNotFound(NodeId),

    /// Operation needs at least one node
    #[error("Tree is empty")]
    EmptyTree,

    /// No stack-free walk exists for this order
    #[error("No threaded walk for {0}-order")]
    UnsupportedWalk(TraversalOrder),
}
