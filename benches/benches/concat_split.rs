//! SplitHash concat/split benchmarks
//!
//! Measures the cost of building sequences via repeated `concat`, and of
//! `split` at various positions, across a range of sequence sizes.

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use splithash::{concat, leaf, split, NodeRef};

fn build_sequence(n: i32) -> NodeRef<i32> {
    let mut tree = leaf(0_i32);
    for i in 1..n {
        tree = concat(Some(&tree), Some(&leaf(i))).expect("non-empty");
    }
    tree
}

fn bench_concat(c: &mut Criterion) {
    let mut group = c.benchmark_group("concat");

    for &n in &[100, 1_000, 10_000] {
        group.throughput(Throughput::Elements(n as u64));
        let leaves: Vec<NodeRef<i32>> = (0..n).map(leaf).collect();

        group.bench_with_input(BenchmarkId::from_parameter(n), &leaves, |b, leaves| {
            b.iter(|| {
                let mut tree: Option<NodeRef<i32>> = None;
                for leaf_node in leaves {
                    tree = concat(tree.as_ref(), Some(black_box(leaf_node)));
                }
                tree
            });
        });
    }
    group.finish();
}

fn bench_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("split");

    for &n in &[100, 1_000, 10_000] {
        let tree = build_sequence(n);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::from_parameter(n), &tree, |b, tree| {
            b.iter(|| split(black_box(tree), black_box(i64::from(n) / 2)));
        });
    }
    group.finish();
}

fn bench_split_then_concat(c: &mut Criterion) {
    let mut group = c.benchmark_group("split_then_concat");

    for &n in &[100, 1_000, 10_000] {
        let tree = build_sequence(n);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::from_parameter(n), &tree, |b, tree| {
            b.iter(|| {
                let (left, right) = split(black_box(tree), i64::from(n) / 3);
                concat(left.as_ref(), right.as_ref())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_concat, bench_split, bench_split_then_concat);
criterion_main!(benches);
