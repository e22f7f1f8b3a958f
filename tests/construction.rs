//! Construction and plain traversal tests

use test_case::test_case;
use threadtree::{Side, ThreadedTree, TraversalOrder, TreeConfig, TreeError, HEIGHT_LIMIT};

mod common;
use common::*;

#[test_case(1, 1, 1 ; "single node")]
#[test_case(2, 3, 2 ; "height two")]
#[test_case(3, 7, 4 ; "height three")]
#[test_case(5, 31, 16 ; "height five")]
#[test_case(8, 255, 128 ; "height eight")]
fn complete_tree_shape(height: i32, nodes: usize, leaf_total: usize) {
    let tree = built(height);

    assert_eq!(tree.len(), nodes);
    assert_eq!(tree.leaf_count(), leaf_total);
    assert_eq!(tree.height(), height as usize);
    assert!(tree.is_valid());

    // Every node above the last level has two real children, the last level is all leaves
    let snapshot = tree.snapshot();
    for view in &snapshot.nodes {
        let node = tree.node(view.id).unwrap();
        if view.depth + 1 < height as usize {
            assert!(node.has_child(Side::Left) && node.has_child(Side::Right));
        } else {
            assert!(node.is_leaf(), "node {} at last level must be a leaf", view.label);
        }
    }
}

#[test]
fn height_two_textbook_orders() {
    let tree = built(2);
    assert_eq!(tree.preorder(), vec![1, 2, 3]);
    assert_eq!(tree.inorder(), vec![2, 1, 3]);
    assert_eq!(tree.postorder(), vec![2, 3, 1]);
}

#[test_case(TraversalOrder::Pre)]
#[test_case(TraversalOrder::In)]
#[test_case(TraversalOrder::Post)]
fn traversals_agree_with_textbook(order: TraversalOrder) {
    for height in 0..=6 {
        let tree = built(height);
        let labels = tree.traverse(order);
        assert_eq!(labels, textbook(order, height as u32), "height {}", height);

        // Each node exactly once
        let mut sorted = labels.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (1..=tree.len() as u32).collect::<Vec<_>>());
    }
}

#[test]
fn labels_follow_preorder_construction() {
    let tree = built(4);
    let expected: Vec<u32> = (1..=15).collect();
    assert_eq!(tree.preorder(), expected);
}

#[test]
fn rebuild_discards_previous_tree() {
    let mut tree = built(4);
    tree.thread_inorder();
    let old_root = tree.root().unwrap();

    tree.build_complete(2).unwrap();
    assert_eq!(tree.len(), 3);
    assert_eq!(tree.thread_tag_count(), 0);
    assert!(!tree.contains(old_root));
    assert!(tree.is_valid());
}

#[test]
fn empty_tree_operations_are_noops() {
    let mut tree = ThreadedTree::new();
    assert_eq!(tree.build_complete(0), Ok(None));

    assert!(tree.preorder().is_empty());
    assert!(tree.inorder().is_empty());
    assert!(tree.postorder().is_empty());
    assert_eq!(tree.leaf_count(), 0);
    assert_eq!(tree.height(), 0);

    tree.thread_inorder();
    tree.thread_postorder();
    assert!(tree.inorder_threaded_walk().is_empty());
    assert!(tree.is_valid());
}

#[test]
fn height_above_cap_is_rejected() {
    let mut tree = ThreadedTree::with_config(TreeConfig::with_max_height(3));
    assert_eq!(
        tree.build_complete(4),
        Err(TreeError::InvalidHeight { height: 4, max: 3 })
    );
    assert!(tree.is_empty());
    assert!(tree.build_complete(3).unwrap().is_some());
}

#[test_case(32 ; "one above limit")]
#[test_case(64 ; "shift width")]
#[test_case(i32::MAX ; "largest height")]
fn oversized_cap_is_clamped_to_height_limit(height: i32) {
    let mut tree = ThreadedTree::with_config(TreeConfig::with_max_height(64));
    tree.build_complete(3).unwrap();
    let before = tree.snapshot();

    assert_eq!(
        tree.build_complete(height),
        Err(TreeError::InvalidHeight { height, max: HEIGHT_LIMIT })
    );
    assert_eq!(tree.snapshot(), before);
    assert_eq!(TreeConfig::node_bound(64), None);
}
