//! Plain recursive traversal
//!
//! Follows Child edges only; a thread is never descended into, even if it
//! points somewhere. Sequences are fully materialized.

use std::fmt;
use std::str::FromStr;

use super::{Label, NodeId, Side, ThreadedTree};

/// Depth-first visiting order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum TraversalOrder {
    /// Node, left subtree, right subtree
    Pre,

    /// Left subtree, node, right subtree
    In,

    /// Left subtree, right subtree, node
    Post,
}

impl TraversalOrder {
    /// All three orders
    pub const ALL: [TraversalOrder; 3] = [
        TraversalOrder::Pre,
        TraversalOrder::In,
        TraversalOrder::Post,
    ];
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TraversalOrder::Pre => "pre",
            TraversalOrder::In => "in",
            TraversalOrder::Post => "post",
        };
        f.write_str(name)
    }
}

impl FromStr for TraversalOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pre" | "preorder" => Ok(TraversalOrder::Pre),
            "in" | "inorder" => Ok(TraversalOrder::In),
            "post" | "postorder" => Ok(TraversalOrder::Post),
            other => Err(format!("unknown traversal order '{}' (expected pre, in or post)", other)),
        }
    }
}

/// Space-separated labels, as shown in textual displays
pub fn format_labels(labels: &[Label]) -> String {
    labels
        .iter()
        .map(|label| label.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

impl ThreadedTree {
    /// Node handles in `order`
    pub fn traverse_nodes(&self, order: TraversalOrder) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.len());
        if let Some(root) = self.root() {
            self.collect(root, order, &mut out);
        }
        out
    }

    /// Labels in `order`
    pub fn traverse(&self, order: TraversalOrder) -> Vec<Label> {
        self.labels(&self.traverse_nodes(order))
    }

    /// Labels in pre-order
    pub fn preorder(&self) -> Vec<Label> {
        self.traverse(TraversalOrder::Pre)
    }

    /// Labels in in-order
    pub fn inorder(&self) -> Vec<Label> {
        self.traverse(TraversalOrder::In)
    }

    /// Labels in post-order
    pub fn postorder(&self) -> Vec<Label> {
        self.traverse(TraversalOrder::Post)
    }

    /// Resolve handles to labels, skipping unknown ones
    pub fn labels(&self, ids: &[NodeId]) -> Vec<Label> {
        ids.iter()
            .filter_map(|&id| self.get(id).map(|node| node.value()))
            .collect()
    }

    fn collect(&self, id: NodeId, order: TraversalOrder, out: &mut Vec<NodeId>) {
        let Some(node) = self.get(id) else {
            return;
        };
        let left = node.child(Side::Left);
        let right = node.child(Side::Right);

        if order == TraversalOrder::Pre {
            out.push(id);
        }
        if let Some(left) = left {
            self.collect(left, order, out);
        }
        if order == TraversalOrder::In {
            out.push(id);
        }
        if let Some(right) = right {
            self.collect(right, order, out);
        }
        if order == TraversalOrder::Post {
            out.push(id);
        }
    }

    /// Number of nodes without a real child
    pub fn leaf_count(&self) -> usize {
        self.root().map_or(0, |root| self.leaf_count_rec(root))
    }

    fn leaf_count_rec(&self, id: NodeId) -> usize {
        let Some(node) = self.get(id) else {
            return 0;
        };
        if node.is_leaf() {
            return 1;
        }
        Side::BOTH
            .iter()
            .filter_map(|&side| node.child(side))
            .map(|child| self.leaf_count_rec(child))
            .sum()
    }

    /// Number of levels along Child edges (0 for the empty tree)
    pub fn height(&self) -> usize {
        self.root().map_or(0, |root| self.height_rec(root))
    }

    fn height_rec(&self, id: NodeId) -> usize {
        let Some(node) = self.get(id) else {
            return 0;
        };
        1 + Side::BOTH
            .iter()
            .filter_map(|&side| node.child(side))
            .map(|child| self.height_rec(child))
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_height_two_orders() {
        let mut tree = ThreadedTree::new();
        tree.build_complete(2).unwrap();

        assert_eq!(tree.preorder(), vec![1, 2, 3]);
        assert_eq!(tree.inorder(), vec![2, 1, 3]);
        assert_eq!(tree.postorder(), vec![2, 3, 1]);
    }

    #[test]
    fn test_height_three_orders() {
        let mut tree = ThreadedTree::new();
        tree.build_complete(3).unwrap();

        assert_eq!(tree.preorder(), vec![1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(tree.inorder(), vec![3, 2, 4, 1, 6, 5, 7]);
        assert_eq!(tree.postorder(), vec![3, 4, 2, 6, 7, 5, 1]);
        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn test_threads_are_not_followed() {
        let mut tree = ThreadedTree::new();
        tree.build_complete(3).unwrap();
        let before = tree.postorder();

        tree.thread_preorder();
        assert_eq!(tree.postorder(), before);
        assert_eq!(tree.leaf_count(), 4);
        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn test_order_parsing() {
        assert_eq!("pre".parse::<TraversalOrder>(), Ok(TraversalOrder::Pre));
        assert_eq!("InOrder".parse::<TraversalOrder>(), Ok(TraversalOrder::In));
        assert_eq!(" post ".parse::<TraversalOrder>(), Ok(TraversalOrder::Post));
        assert!("level".parse::<TraversalOrder>().is_err());

        for order in TraversalOrder::ALL {
            assert_eq!(order.to_string().parse::<TraversalOrder>(), Ok(order));
        }
    }

    #[test]
    fn test_format_labels() {
        assert_eq!(format_labels(&[]), "");
        assert_eq!(format_labels(&[2, 1, 3]), "2 1 3");
    }
}
