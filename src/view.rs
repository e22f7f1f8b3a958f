//! Renderer-facing views
//!
//! What a drawing layer needs and nothing more: labels, leaf flags, tags,
//! and the edge list with each edge classified as a real child edge or a
//! predecessor/successor thread. Layout, colours and animation timing stay
//! with the caller.

use std::fmt::Write as _;

use crate::tree::{Label, Link, NodeId, Side, Tag, ThreadState, ThreadedTree, TraversalOrder};

/// How an edge should be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub enum EdgeKind {
    /// Structural parent -> child edge (solid)
    Child,

    /// Left thread to the predecessor (dashed)
    Predecessor,

    /// Right thread to the successor (dashed)
    Successor,
}

/// One drawable edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct EdgeView {
    /// Node owning the slot
    pub from: NodeId,
    /// Node pointed at
    pub to: NodeId,
    /// Slot the edge lives in
    pub side: Side,
    /// Child or thread
    pub kind: EdgeKind,
}

/// Per-node state exposed to a renderer
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct NodeView {
    /// Handle for click-back (e.g. leaf removal)
    pub id: NodeId,
    /// Label
    pub label: Label,
    /// Structural parent
    pub parent: Option<NodeId>,
    /// No real children
    pub is_leaf: bool,
    /// Tag of the left slot
    pub left_tag: Tag,
    /// Tag of the right slot
    pub right_tag: Tag,
    /// Depth along Child edges, root at 0
    pub depth: usize,
}

/// Full picture of a tree at one moment
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "visualize", derive(serde::Serialize))]
pub struct TreeSnapshot {
    /// Root handle
    pub root: Option<NodeId>,
    /// Nodes in pre-order
    pub nodes: Vec<NodeView>,
    /// Child edges and non-null threads
    pub edges: Vec<EdgeView>,
    /// Installed threading
    pub thread_state: ThreadState,
}

impl TreeSnapshot {
    /// Number of thread edges in the snapshot
    pub fn thread_edge_count(&self) -> usize {
        self.edges
            .iter()
            .filter(|edge| edge.kind != EdgeKind::Child)
            .count()
    }
}

impl ThreadedTree {
    /// Drawable edges, nodes in pre-order, left slot before right
    pub fn edges(&self) -> Vec<EdgeView> {
        let mut edges = Vec::new();
        for from in self.traverse_nodes(TraversalOrder::Pre) {
            let Ok(node) = self.node(from) else {
                continue;
            };
            for side in Side::BOTH {
                let (to, kind) = match (node.link(side), side) {
                    (Link::Child(to), _) => (to, EdgeKind::Child),
                    (Link::Thread(Some(to)), Side::Left) => (to, EdgeKind::Predecessor),
                    (Link::Thread(Some(to)), Side::Right) => (to, EdgeKind::Successor),
                    _ => continue,
                };
                edges.push(EdgeView { from, to, side, kind });
            }
        }
        edges
    }

    /// Node views and edges in one structure
    pub fn snapshot(&self) -> TreeSnapshot {
        let mut nodes = Vec::with_capacity(self.len());
        if let Some(root) = self.root() {
            self.collect_views(root, 0, &mut nodes);
        }
        TreeSnapshot {
            root: self.root(),
            nodes,
            edges: self.edges(),
            thread_state: self.thread_state(),
        }
    }

    fn collect_views(&self, id: NodeId, depth: usize, out: &mut Vec<NodeView>) {
        let Ok(node) = self.node(id) else {
            return;
        };
        out.push(NodeView {
            id,
            label: node.value(),
            parent: node.parent(),
            is_leaf: node.is_leaf(),
            left_tag: node.tag(Side::Left),
            right_tag: node.tag(Side::Right),
            depth,
        });
        for child in Side::BOTH.iter().filter_map(|&side| node.child(side)) {
            self.collect_views(child, depth + 1, out);
        }
    }

    /// Box-drawing dump of the Child structure with thread annotations
    ///
    /// ```text
    /// 1
    /// ├─ L 2  (pred: -, succ: 1)
    /// └─ R 3  (pred: 1)
    /// ```
    pub fn render_ascii(&self) -> String {
        let mut out = String::new();
        match self.root() {
            Some(root) => self.render_node(&mut out, root, "", None),
            None => out.push_str("(empty)\n"),
        }
        out
    }

    fn render_node(
        &self,
        out: &mut String,
        id: NodeId,
        prefix: &str,
        position: Option<(Side, bool)>,
    ) {
        let Ok(node) = self.node(id) else {
            return;
        };

        let connector = match position {
            None => String::new(),
            Some((side, is_last)) => {
                let branch = if is_last { "└─ " } else { "├─ " };
                let letter = if side == Side::Left { "L " } else { "R " };
                format!("{}{}", branch, letter)
            }
        };

        let mut annotations = Vec::new();
        if let Link::Thread(target) = node.link(Side::Left) {
            annotations.push(format!("pred: {}", self.label_or_dash(target)));
        }
        if let Link::Thread(target) = node.link(Side::Right) {
            annotations.push(format!("succ: {}", self.label_or_dash(target)));
        }
        let annotation = if annotations.is_empty() {
            String::new()
        } else {
            format!("  ({})", annotations.join(", "))
        };

        // Writing into a String cannot fail
        let _ = writeln!(out, "{}{}{}{}", prefix, connector, node.value(), annotation);

        let child_prefix = match position {
            None => String::new(),
            Some((_, true)) => format!("{}   ", prefix),
            Some((_, false)) => format!("{}│  ", prefix),
        };
        let children: Vec<(Side, NodeId)> = Side::BOTH
            .iter()
            .filter_map(|&side| node.child(side).map(|child| (side, child)))
            .collect();
        let last = children.len().saturating_sub(1);
        for (i, (side, child)) in children.into_iter().enumerate() {
            self.render_node(out, child, &child_prefix, Some((side, i == last)));
        }
    }

    fn label_or_dash(&self, target: Option<NodeId>) -> String {
        target
            .and_then(|id| self.node(id).ok())
            .map_or_else(|| "-".to_string(), |node| node.value().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_unthreaded() {
        let mut tree = ThreadedTree::new();
        tree.build_complete(3).unwrap();

        let edges = tree.edges();
        assert_eq!(edges.len(), 6);
        assert!(edges.iter().all(|edge| edge.kind == EdgeKind::Child));
    }

    #[test]
    fn test_edges_threaded() {
        let mut tree = ThreadedTree::new();
        tree.build_complete(2).unwrap();
        tree.thread_inorder();

        let one = tree.find(1).unwrap();
        let two = tree.find(2).unwrap();
        let three = tree.find(3).unwrap();
        let edges = tree.edges();

        assert_eq!(edges.len(), 4);
        assert!(edges.contains(&EdgeView {
            from: two,
            to: one,
            side: Side::Right,
            kind: EdgeKind::Successor,
        }));
        assert!(edges.contains(&EdgeView {
            from: three,
            to: one,
            side: Side::Left,
            kind: EdgeKind::Predecessor,
        }));
    }

    #[test]
    fn test_snapshot() {
        let mut tree = ThreadedTree::new();
        tree.build_complete(3).unwrap();
        tree.thread_preorder();

        let snapshot = tree.snapshot();
        assert_eq!(snapshot.nodes.len(), 7);
        assert_eq!(snapshot.thread_state, ThreadState::Threaded(TraversalOrder::Pre));

        let labels: Vec<_> = snapshot.nodes.iter().map(|n| n.label).collect();
        assert_eq!(labels, vec![1, 2, 3, 4, 5, 6, 7]);
        let depths: Vec<_> = snapshot.nodes.iter().map(|n| n.depth).collect();
        assert_eq!(depths, vec![0, 1, 2, 2, 1, 2, 2]);

        let leaf = &snapshot.nodes[2];
        assert!(leaf.is_leaf);
        assert_eq!(leaf.left_tag, Tag::Thread);
        assert_eq!(leaf.right_tag, Tag::Thread);

        // 4 leaves: 4 predecessors + 3 successors (the last node has none)
        assert_eq!(snapshot.thread_edge_count(), 7);
    }

    #[test]
    fn test_render_ascii() {
        let mut tree = ThreadedTree::new();
        assert_eq!(tree.render_ascii(), "(empty)\n");

        tree.build_complete(2).unwrap();
        tree.thread_inorder();
        let expected = "1\n├─ L 2  (pred: -, succ: 1)\n└─ R 3  (pred: 1)\n";
        assert_eq!(tree.render_ascii(), expected);
    }

    #[test]
    fn test_render_ascii_nested_prefixes() {
        let mut tree = ThreadedTree::new();
        tree.build_complete(3).unwrap();
        tree.remove_leaf(tree.find(7).unwrap()).unwrap();

        let expected = "\
1
├─ L 2
│  ├─ L 3
│  └─ R 4
└─ R 5
   └─ L 6
";
        assert_eq!(tree.render_ascii(), expected);
    }
}
