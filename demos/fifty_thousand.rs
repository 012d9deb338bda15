//! Fifty-thousand-element demonstration driver.
//!
//! Exercises SplitHash at a scale too slow for the library's own test
//! suite: builds a 50,000-integer sequence several different ways and
//! confirms they all converge to the same canonical tree, then runs a
//! full split/re-concat/chunk sweep over it. Timing and reporting only —
//! no assertions about the library's internals live here.

use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use splithash::{build, chunk, concat, equal_to, first, hash_code, last, leaf, size, split, NodeRef};

const N: i32 = 50_000;

#[derive(Parser)]
#[command(name = "fifty_thousand")]
#[command(about = "SplitHash 50,000-element demonstration", long_about = None)]
struct Args {
    /// Skip the O(n) split-then-reconcat sweep (scenario C), which is the
    /// slowest part of the demo.
    #[arg(long)]
    skip_split_sweep: bool,
}

fn timed<T>(label: &str, f: impl FnOnce() -> T) -> T {
    let start = Instant::now();
    let result = f();
    println!("{label}: {:?}", start.elapsed());
    result
}

/// Scenario A: left-to-right and right-to-left folds converge to the same
/// canonical tree.
fn scenario_a() -> NodeRef<i32> {
    let left_to_right = timed("A: fold left-to-right", || {
        let mut tree = leaf(0);
        for i in 1..N {
            tree = concat(Some(&tree), Some(&leaf(i))).expect("non-empty");
        }
        tree
    });

    let right_to_left = timed("A: fold right-to-left", || {
        let mut tree = leaf(N - 1);
        for i in (0..N - 1).rev() {
            tree = concat(Some(&leaf(i)), Some(&tree)).expect("non-empty");
        }
        tree
    });

    assert!(equal_to(&left_to_right, &right_to_left), "fold order changed the canonical tree");
    assert_eq!(size(&left_to_right), i64::from(N));
    assert_eq!(*first(&left_to_right), 0);
    assert_eq!(*last(&left_to_right), N - 1);
    println!(
        "A: hashCode(S1) = hashCode(S2) = {:08x}, size = {}",
        hash_code(&left_to_right),
        size(&left_to_right)
    );

    left_to_right
}

/// Scenario B: a sequence built from a repeating pattern accumulates RLE
/// nodes and still converges to a stable hash.
fn scenario_b() {
    let s3 = timed("B: fold [i mod 63]", || {
        let mut tree = leaf(0_i32 % 63);
        for i in 1..N {
            tree = concat(Some(&tree), Some(&leaf(i % 63))).expect("non-empty");
        }
        tree
    });
    println!("B: hashCode(S3) = {:08x}", hash_code(&s3));
}

/// Scenario C: splitting at every position and re-concatenating always
/// reproduces the original canonical tree.
fn scenario_c(s1: &NodeRef<i32>) {
    timed("C: split/concat/chunk sweep", || {
        for i in 1..N {
            let (left, right) = split(s1, i64::from(i));
            let rebuilt = concat(left.as_ref(), right.as_ref()).expect("non-empty");
            let chunked = chunk(&rebuilt);
            assert!(equal_to(&chunked, s1), "split/concat/chunk diverged at index {i}");
        }
    });
    println!("C: all {} split points reproduced the original tree", N - 1);
}

/// Scenario D: building in 1000-element blocks via the bulk `build`
/// helper converges to the same tree as a plain left-to-right fold.
fn scenario_d(s1: &NodeRef<i32>) {
    let blocked = timed("D: build in 1000-element blocks", || {
        let mut whole: Option<NodeRef<i32>> = None;
        for block_start in (0..N).step_by(1000) {
            let block_end = (block_start + 1000).min(N);
            let block: Vec<i32> = (block_start..block_end).collect();
            let block_tree = build(block).expect("non-empty block");
            whole = concat(whole.as_ref(), Some(&block_tree));
        }
        whole.expect("non-empty")
    });
    assert!(equal_to(&blocked, s1), "block-wise build diverged from the left-to-right fold");
    println!("D: block-wise build is canonical-equal to S1");
}

fn main() -> Result<()> {
    let args = Args::parse();

    let s1 = scenario_a();
    scenario_b();
    if args.skip_split_sweep {
        println!("C: skipped (--skip-split-sweep)");
    } else {
        scenario_c(&s1);
    }
    scenario_d(&s1);

    Ok(())
}
