#![allow(dead_code)]

use threadtree::{Label, NodeId, Side, ThreadedTree, TraversalOrder};

/// Complete tree of `height` with default configuration
pub fn built(height: i32) -> ThreadedTree {
    let mut tree = ThreadedTree::new();
    tree.build_complete(height).expect("height within default cap");
    tree
}

/// Leaves of the tree in in-order
pub fn leaves(tree: &ThreadedTree) -> Vec<NodeId> {
    tree.traverse_nodes(TraversalOrder::In)
        .into_iter()
        .filter(|&id| tree.node(id).map(|n| n.is_leaf()).unwrap_or(false))
        .collect()
}

/// Left/right thread targets of every node, by label
pub fn thread_table(tree: &ThreadedTree) -> Vec<(Label, Option<Label>, Option<Label>)> {
    let label = |id: Option<NodeId>| id.and_then(|id| tree.node(id).ok()).map(|n| n.value());
    tree.traverse_nodes(TraversalOrder::Pre)
        .into_iter()
        .map(|id| {
            let node = tree.node(id).expect("live node");
            (
                node.value(),
                label(node.thread(Side::Left)),
                label(node.thread(Side::Right)),
            )
        })
        .collect()
}

/// Textbook recursive traversal over (label, left, right) nested tuples
pub fn textbook(order: TraversalOrder, height: u32) -> Vec<Label> {
    fn rec(order: TraversalOrder, depth: u32, height: u32, next: &mut Label, out: &mut Vec<Label>) {
        let me = *next;
        *next += 1;
        let mut left = Vec::new();
        let mut right = Vec::new();
        if depth < height {
            rec(order, depth + 1, height, next, &mut left);
            rec(order, depth + 1, height, next, &mut right);
        }
        match order {
            TraversalOrder::Pre => {
                out.push(me);
                out.extend(left);
                out.extend(right);
            }
            TraversalOrder::In => {
                out.extend(left);
                out.push(me);
                out.extend(right);
            }
            TraversalOrder::Post => {
                out.extend(left);
                out.extend(right);
                out.push(me);
            }
        }
    }

    let mut out = Vec::new();
    if height > 0 {
        let mut next = 1;
        rec(order, 1, height, &mut next, &mut out);
    }
    out
}
