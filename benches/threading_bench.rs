//! Threading and walk benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use threadtree::{ThreadedTree, TraversalOrder};

fn benchmark_threading(c: &mut Criterion) {
    let mut tree = ThreadedTree::new();
    tree.build_complete(16).expect("height within default cap");

    for order in TraversalOrder::ALL {
        c.bench_function(&format!("thread_{}order_h16", order), |b| {
            b.iter(|| {
                tree.thread(black_box(order));
            });
        });
    }
}

fn benchmark_walks(c: &mut Criterion) {
    let mut tree = ThreadedTree::new();
    tree.build_complete(16).expect("height within default cap");

    tree.thread_inorder();
    c.bench_function("inorder_threaded_walk_h16", |b| {
        b.iter(|| black_box(tree.inorder_walk().count()));
    });
    c.bench_function("inorder_recursive_h16", |b| {
        b.iter(|| black_box(tree.traverse_nodes(TraversalOrder::In).len()));
    });

    tree.thread_preorder();
    c.bench_function("preorder_threaded_walk_h16", |b| {
        b.iter(|| black_box(tree.preorder_walk().count()));
    });
}

fn benchmark_build(c: &mut Criterion) {
    let mut tree = ThreadedTree::new();
    c.bench_function("build_complete_h16", |b| {
        b.iter(|| tree.build_complete(black_box(16)).map(|root| root.is_some()));
    });
}

criterion_group!(benches, benchmark_threading, benchmark_walks, benchmark_build);
criterion_main!(benches);
