//! Layout benchmarks.
//!
//! Measures reconciliation and the two layout passes over a grid of text
//! leaves, the shape of a typical settings panel or table.

#![allow(missing_docs)]

use arbor_ui::widget::{hstack, vstack, Text};
use arbor_ui::{Insets, Rect, ViewNode, ViewTree};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const VIEWPORT: Rect = Rect::new(0, 0, 1920, 1080);

/// `rows` horizontal stacks of `cols` labels each.
fn grid(rows: usize, cols: usize) -> ViewNode {
    vstack((0..rows).map(|row| {
        hstack((0..cols).map(move |col| {
            ViewNode::new(Text::new(format!("r{row}c{col}"))).padding(Insets::all(2))
        }))
    }))
}

/// A chain of single-child containers `depth` levels deep.
fn chain(depth: usize) -> ViewNode {
    let mut node = ViewNode::new(Text::new("leaf"));
    for _ in 0..depth {
        node = vstack([node]).padding(Insets::all(1));
    }
    node
}

// ============================================================================
// FULL BUILD
// ============================================================================

fn bench_build_and_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_and_layout");

    for rows in [10, 50, 100] {
        let root = grid(rows, 10);
        group.bench_with_input(BenchmarkId::new("grid", rows * 10), &root, |b, root| {
            b.iter(|| {
                let mut tree = ViewTree::new(root.clone());
                let id = tree.root();
                tree.layout(id, VIEWPORT).ok();
                black_box(tree.len())
            });
        });
    }

    group.finish();
}

// ============================================================================
// RELAYOUT (tree already reconciled)
// ============================================================================

fn bench_relayout(c: &mut Criterion) {
    let mut tree = ViewTree::new(grid(100, 10));
    let root = tree.root();
    tree.layout(root, VIEWPORT).ok();

    c.bench_function("relayout_grid_1000", |b| {
        b.iter(|| {
            tree.mark_dirty();
            tree.layout(root, black_box(VIEWPORT)).ok();
            black_box(tree.is_dirty())
        });
    });
}

fn bench_rebuild(c: &mut Criterion) {
    let mut tree = ViewTree::new(grid(100, 10));
    let root = tree.root();
    tree.layout(root, VIEWPORT).ok();

    c.bench_function("rebuild_grid_1000", |b| {
        b.iter(|| {
            let discarded = tree.rebuild(root).map(|ids| ids.len()).unwrap_or(0);
            black_box(discarded)
        });
    });
}

// ============================================================================
// DEEP NESTING
// ============================================================================

fn bench_deep_chain(c: &mut Criterion) {
    let mut tree = ViewTree::new(chain(64));
    let root = tree.root();
    tree.layout(root, VIEWPORT).ok();

    c.bench_function("minimum_size_chain_64", |b| {
        b.iter(|| black_box(tree.minimum_size(root).ok()));
    });
}

criterion_group!(
    benches,
    bench_build_and_layout,
    bench_relayout,
    bench_rebuild,
    bench_deep_chain,
);

criterion_main!(benches);
