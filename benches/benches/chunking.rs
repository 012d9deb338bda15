//! SplitHash chunking benchmarks
//!
//! Measures the cost of packing a sequence into its chunked form, and of
//! the deep-hash derivations that dominate `hashAt` at high indices.

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use splithash::{chunk, concat, hash_at, leaf, NodeRef};

fn build_sequence(n: i32) -> NodeRef<i32> {
    let mut tree = leaf(0_i32);
    for i in 1..n {
        tree = concat(Some(&tree), Some(&leaf(i))).expect("non-empty");
    }
    tree
}

fn bench_chunk(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunk");

    for &n in &[100, 1_000, 10_000] {
        let tree = build_sequence(n);
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::from_parameter(n), &tree, |b, tree| {
            b.iter(|| chunk(black_box(tree)));
        });
    }
    group.finish();
}

fn bench_deep_hash_at(c: &mut Criterion) {
    let mut group = c.benchmark_group("deep_hash_at");
    let tree = build_sequence(1_000);

    for &i in &[2_u32, 8, 32, 128] {
        group.bench_with_input(BenchmarkId::from_parameter(i), &i, |b, &i| {
            b.iter(|| hash_at(black_box(&tree), black_box(i)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_chunk, bench_deep_hash_at);
criterion_main!(benches);
