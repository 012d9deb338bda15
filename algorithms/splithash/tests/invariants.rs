//! Property-style tests for `spec.md` §8's universally-quantified
//! invariants (1, 3, 4, 5, 6), plus targeted randomized cases built on top
//! of them.
//!
//! Invariant 2 (split/concat round-trips across `chunk`) and the scenario
//! table live in `tests/scenarios.rs`; this file sticks to the properties
//! that hold for *any* sequence/bracketing rather than a fixed scenario.

#![allow(clippy::pedantic, clippy::nursery)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use rand::Rng;
use splithash::{build, chunk, concat, equal_to, hash_at, hash_code, height, leaf, size, NodeRef};

fn fold_left_to_right(n: i32) -> NodeRef<i32> {
    let mut tree = leaf(0);
    for i in 1..n {
        tree = concat(Some(&tree), Some(&leaf(i))).expect("non-empty");
    }
    tree
}

fn fold_right_to_left(n: i32) -> NodeRef<i32> {
    let mut tree = leaf(n - 1);
    for i in (0..n - 1).rev() {
        tree = concat(Some(&leaf(i)), Some(&tree)).expect("non-empty");
    }
    tree
}

/// Recursively concatenates `elements[lo..hi]` by splitting at a random
/// midpoint each time, so two calls over the same slice can (and usually
/// will) produce differently-bracketed trees.
fn fold_random_bracketing(elements: &[i32], rng: &mut impl Rng) -> NodeRef<i32> {
    if elements.len() == 1 {
        return leaf(elements[0]);
    }
    let mid = rng.random_range(1..elements.len());
    let left = fold_random_bracketing(&elements[..mid], rng);
    let right = fold_random_bracketing(&elements[mid..], rng);
    concat(Some(&left), Some(&right)).expect("non-empty")
}

// =============================================================================
// INVARIANT 1 — fold order independence
// =============================================================================

#[test]
fn invariant_1_fold_order_independence() {
    for &n in &[1, 2, 3, 10, 137, 2_000] {
        let forward = fold_left_to_right(n);
        let backward = fold_right_to_left(n);
        assert_eq!(
            hash_code(&forward),
            hash_code(&backward),
            "fold order changed hashCode at n={n}"
        );
        assert_eq!(size(&forward), size(&backward));
        assert!(equal_to(&forward, &backward));
    }
}

#[test]
fn invariant_1_random_bracketings_converge() {
    let mut rng = rand::rng();
    let elements: Vec<i32> = (0..500).collect();
    let reference = fold_left_to_right(500);

    for _ in 0..8 {
        let bracketed = fold_random_bracketing(&elements, &mut rng);
        assert_eq!(hash_code(&bracketed), hash_code(&reference));
        assert!(equal_to(&bracketed, &reference));
    }
}

// =============================================================================
// INVARIANT 3 — chunk is idempotent, unchunk is hash-preserving
// =============================================================================

#[test]
fn invariant_3_chunk_is_idempotent() {
    for &n in &[1, 5, 64, 701] {
        let tree = fold_left_to_right(n);
        let once = chunk(&tree);
        let twice = chunk(&once);
        assert_eq!(hash_code(&once), hash_code(&twice));
        assert_eq!(hash_code(&tree), hash_code(&once));
        assert_eq!(size(&tree), size(&once));
    }
}

#[test]
fn invariant_3_unchunk_recovers_original_hash() {
    let tree = fold_left_to_right(2_500);
    let chunked = chunk(&tree);
    // `equal_to` walks the reconstructed (unchunked) element sequence, so
    // this exercises the weak-cache reconstruction without a public
    // `unchunk()` entry point.
    assert!(equal_to(&chunked, &tree));
    assert_eq!(hash_code(&chunked), hash_code(&tree));
}

// =============================================================================
// INVARIANT 4 — hashCode(concat(a, b)) is bracketing-independent
// =============================================================================

#[test]
fn invariant_4_bracketing_independence() {
    let a = fold_left_to_right(17);
    let b = fold_left_to_right(29);
    let direct = concat(Some(&a), Some(&b)).expect("non-empty");

    // Split `a` and `b` each into two pieces and re-concat in four steps
    // instead of one; the canonical result must be identical.
    let (a1, a2) = splithash::split(&a, 7);
    let (b1, b2) = splithash::split(&b, 12);
    let via_pieces = concat(
        concat(a1.as_ref(), a2.as_ref()).as_ref(),
        concat(b1.as_ref(), b2.as_ref()).as_ref(),
    )
    .expect("non-empty");

    assert_eq!(hash_code(&direct), hash_code(&via_pieces));
}

#[test]
fn invariant_4_build_matches_incremental_concat() {
    let elements: Vec<i32> = (0..321).collect();
    let built = build(elements).expect("non-empty");
    let folded = fold_left_to_right(321);
    assert_eq!(hash_code(&built), hash_code(&folded));
}

// =============================================================================
// INVARIANT 5 — hashAt(t, 0) == hashCode(t)
// =============================================================================

#[test]
fn invariant_5_hash_at_zero_is_hash_code() {
    for &n in &[1, 2, 50, 999] {
        let tree = fold_left_to_right(n);
        assert_eq!(hash_at(&tree, 0), hash_code(&tree));
        let chunked = chunk(&tree);
        assert_eq!(hash_at(&chunked, 0), hash_code(&chunked));
    }
}

#[test]
fn invariant_5_hash_at_sequence_is_deterministic() {
    let tree = fold_left_to_right(400);
    for i in [0_u32, 1, 2, 3, 7, 16, 64] {
        assert_eq!(hash_at(&tree, i), hash_at(&tree, i), "hashAt({i}) not deterministic");
    }
}

// =============================================================================
// INVARIANT 6 — repeats stay compact under RLE
// =============================================================================

#[test]
fn invariant_6_uniform_repeat_collapses_to_rle() {
    for &m in &[10, 1_000, 50_000] {
        let mut tree = leaf(7_i32);
        for _ in 1..m {
            tree = concat(Some(&tree), Some(&leaf(7))).expect("non-empty");
        }
        assert_eq!(size(&tree), i64::from(m));
        // A pure run of one repeated element collapses into a single RLE
        // node wrapping the leaf: no binary nesting accumulates, so the
        // tree height stays at the RLE's inner height regardless of `m`.
        assert_eq!(height(&tree), 0, "uniform repeat of length {m} grew binary structure");
    }
}

#[test]
fn invariant_6_mixed_repeat_still_bounded() {
    // [i mod 63 for i in 0..5000]: a short repeating pattern, not a single
    // uniform run, but still dense in RLE-able adjacent duplicates.
    let n = 5_000;
    let mut tree = leaf(0_i32);
    for i in 1..n {
        tree = concat(Some(&tree), Some(&leaf(i % 63))).expect("non-empty");
    }
    assert_eq!(size(&tree), i64::from(n));
    // A tree built from O(64) distinct values folded over n elements stays
    // logarithmic in height; it must not degenerate toward O(n).
    assert!(height(&tree) < 32, "height {} suspiciously large for n={n}", height(&tree));
}

// =============================================================================
// RANDOMIZED SPLIT ROUND-TRIPS
// =============================================================================

#[test]
fn random_split_points_round_trip() {
    let mut rng = rand::rng();
    let n = 1_000;
    let tree = fold_left_to_right(n);

    for _ in 0..50 {
        let i = rng.random_range(0..=i64::from(n));
        let (left, right) = splithash::split(&tree, i);
        let rebuilt = concat(left.as_ref(), right.as_ref()).expect("non-empty");
        assert_eq!(
            hash_code(&rebuilt),
            hash_code(&tree),
            "split/concat mismatch at i={i}: got {}, want {}",
            hex::encode(hash_code(&rebuilt).to_be_bytes()),
            hex::encode(hash_code(&tree).to_be_bytes())
        );
        assert_eq!(size(&rebuilt), size(&tree));
    }
}
