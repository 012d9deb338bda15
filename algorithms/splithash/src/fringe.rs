//! Fringe machinery (`spec.md` §4.4, §4.5): decomposes a canonical tree
//! into a fringe representation stripped from one side, and recombines
//! two opposite fringes into a canonical tree. This is what makes
//! `concat`/`split` asymptotically efficient instead of rebuilding the
//! whole tree from its leaves on every call.

use crate::constants::FRINGE_SCAN_WIDTH;
use crate::error;
use crate::hash::bit_at;
use crate::iter::{Direction, HeightBand};
use crate::merge::merge_round;
use crate::node::{combine, is_multiple_of, NodeRef};

/// A tree decomposed into a top-level node array at some height, plus one
/// "fringe" layer per height below it, each layer holding the nodes
/// stripped from one side at that height. Used for both `RightFringe`
/// (stripped from the right, built by [`transform_right`]) and
/// `LeftFringe` (stripped from the left, built by [`transform_left`]) —
/// `spec.md` §4.4 describes them as mirror images of one another, and
/// once stored here both sides are normalized to plain left-to-right
/// tree order, so one struct serves both.
pub(crate) struct Fringe<X> {
    top: Vec<NodeRef<X>>,
    top_height: i32,
    layers: Vec<Vec<NodeRef<X>>>,
}

impl<X> Fringe<X> {
    /// The fringe of an empty tree: `H = -1`, no layers (`spec.md` §4.4).
    pub(crate) fn empty() -> Self {
        Self {
            top: Vec::new(),
            top_height: -1,
            layers: Vec::new(),
        }
    }

    fn layer_at(&self, h: usize) -> &[NodeRef<X>] {
        &self.layers[h]
    }
}

impl<X: Eq + Clone> Fringe<X> {
    /// `transformRight(tree)` (`spec.md` §4.4): strips the tree layer by
    /// layer from the right.
    pub(crate) fn transform_right(tree: &NodeRef<X>) -> Self {
        Self::transform(tree, Direction::Right, true)
    }

    /// `transformLeft(tree)` (`spec.md` §4.4): strips the tree layer by
    /// layer from the left.
    pub(crate) fn transform_left(tree: &NodeRef<X>) -> Self {
        Self::transform(tree, Direction::Left, false)
    }

    fn transform(tree: &NodeRef<X>, direction: Direction, direction_bit: bool) -> Self {
        let mut current = tree.clone();
        let mut layers: Vec<Vec<NodeRef<X>>> = Vec::new();
        let mut h: u8 = 0;
        loop {
            // Pull height-`h` band elements on demand (`spec.md` §4.5):
            // only as many as the stability scan needs, never the whole
            // level. Whatever the scan never touched stays untouched on
            // the iterator's stack, still at its own real height.
            let mut band_iter = HeightBand::new(&current, h, direction);
            let (boundary, pulled) = fringe_boundary(&mut band_iter, direction_bit);
            let fringe_band = &pulled[..boundary];
            let leftover_pulled = &pulled[boundary..];
            let unvisited = band_iter.into_remaining_in_pull_order();

            // `leftover_pulled` was already popped off the iterator before
            // `unvisited`, so in pull order it comes first.
            let mut remainder_pull_order = leftover_pulled.to_vec();
            remainder_pull_order.extend(unvisited);

            // Both sequences are in fringe-edge-first (pull) order;
            // normalize to plain left-to-right tree order before
            // storing/folding, same as a fully materialized band would be.
            let fringe_natural = to_natural_order(fringe_band, direction);
            let remainder_natural = to_natural_order(&remainder_pull_order, direction);

            match fold_combine2(&remainder_natural) {
                Some(next) => {
                    layers.push(fringe_natural);
                    current = next;
                    h = h
                        .checked_add(1)
                        .unwrap_or_else(|| error::invariant("fringe transform exceeded u8 height"));
                }
                None => {
                    return Self {
                        top: fringe_natural,
                        top_height: i32::from(h),
                        layers,
                    };
                }
            }
        }
    }
}

/// Converts a height-band slice from fringe-edge-first (band-local) order
/// to plain left-to-right tree order: a no-op for [`Direction::Left`]
/// (already left-to-right), a reversal for [`Direction::Right`].
fn to_natural_order<X: Clone>(band: &[NodeRef<X>], direction: Direction) -> Vec<NodeRef<X>> {
    match direction {
        Direction::Left => band.to_vec(),
        Direction::Right => band.iter().rev().cloned().collect(),
    }
}

/// Folds a left-to-right ordered slice with `combine2`, the non-canonical
/// merge used only by fringe reconstruction (`spec.md` §4.2, §4.4).
pub(crate) fn fold_combine2<X: Eq + Clone>(nodes: &[NodeRef<X>]) -> Option<NodeRef<X>> {
    let mut iter = nodes.iter();
    let first = iter.next()?.clone();
    Some(iter.fold(first, |acc, n| crate::node::combine2(&acc, n)))
}

/// `concatFringes(right, left)` (`spec.md` §4.4): interleaves two
/// opposite fringes layer by layer, running a merge round between each
/// layer, until a single canonical root remains.
pub(crate) fn concat_fringes<X: Eq + Clone>(right: Fringe<X>, left: Fringe<X>) -> Option<NodeRef<X>> {
    let mut e: Vec<NodeRef<X>> = Vec::new();
    let mut h: i32 = 0;
    const MAX_ROUNDS: i32 = 1_000_000;

    loop {
        if h < right.top_height {
            #[allow(clippy::cast_sign_loss)]
            let layer = right.layer_at(h as usize);
            e = prepend(layer, e);
        } else if h == right.top_height {
            e = prepend(&right.top, e);
        }

        if h < left.top_height {
            #[allow(clippy::cast_sign_loss)]
            let layer = left.layer_at(h as usize);
            e = append(e, layer);
        } else if h == left.top_height {
            e = append(e, &left.top);
        }

        let right_exhausted = h >= right.top_height;
        let left_exhausted = h >= left.top_height;

        if right_exhausted && left_exhausted {
            match e.len() {
                0 => return None,
                1 => return e.into_iter().next(),
                _ => {}
            }
        }

        e = merge_round(e);
        h += 1;
        if h > MAX_ROUNDS {
            error::invariant("concatFringes did not converge within the round bound");
        }
    }
}

fn prepend<X: Clone>(layer: &[NodeRef<X>], rest: Vec<NodeRef<X>>) -> Vec<NodeRef<X>> {
    let mut out = Vec::with_capacity(layer.len() + rest.len());
    out.extend_from_slice(layer);
    out.extend(rest);
    out
}

fn append<X: Clone>(mut rest: Vec<NodeRef<X>>, layer: &[NodeRef<X>]) -> Vec<NodeRef<X>> {
    rest.extend_from_slice(layer);
    rest
}

// =============================================================================
// FRINGE-BOUNDARY DETECTION (spec.md §4.5)
// =============================================================================

/// Pulls more elements from `iter` into `pulled` until it holds at least
/// `n`, or `iter` is exhausted first. Returns whether `n` was reached.
fn pull_at_least<X: Clone>(iter: &mut HeightBand<X>, pulled: &mut Vec<NodeRef<X>>, n: usize) -> bool {
    while pulled.len() < n {
        match iter.next() {
            Some(node) => pulled.push(node),
            None => return false,
        }
    }
    true
}

/// Finds the stable fringe boundary by pulling from `iter` (fringe-edge-
/// first order) for the given direction bit (`true` = right/1, `false` =
/// left/0): the scanning algorithm of `spec.md` §4.5, starting at
/// `FRINGE_SCAN_WIDTH` and widening until the boundary stops moving when
/// one extra element is added. Only pulls as many nodes from `iter` as
/// the scan actually needs — the rest of the level is never visited, so
/// a stable fringe is found in `O(log n)` rather than scanning the whole
/// tree. Returns the boundary plus every node pulled along the way, so
/// the caller can reuse the already-pulled tail as part of the remainder
/// instead of re-scanning.
fn fringe_boundary<X: Eq + Clone>(iter: &mut HeightBand<X>, direction_bit: bool) -> (usize, Vec<NodeRef<X>>) {
    let mut pulled: Vec<NodeRef<X>> = Vec::new();
    pull_at_least(iter, &mut pulled, FRINGE_SCAN_WIDTH);
    if pulled.is_empty() {
        return (0, pulled);
    }
    let mut width = pulled.len();
    loop {
        let boundary_a = classify_window(&pulled[..width], direction_bit);
        if !pull_at_least(iter, &mut pulled, width + 1) {
            // Nothing more exists beyond `width`: this is the whole
            // remaining tree, so the boundary can't move any further.
            return (boundary_a, pulled);
        }
        let width_b = width + 1;
        let boundary_b = classify_window(&pulled[..width_b], direction_bit);
        if boundary_a == boundary_b {
            return (boundary_a, pulled);
        }
        let target = width + FRINGE_SCAN_WIDTH;
        pull_at_least(iter, &mut pulled, target);
        width = pulled.len().min(target);
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Status {
    Unknown,
    MergeStart,
    MergeConsumed,
}

/// Classifies one window and returns the boundary, measured in original
/// (uncompressed) node count, at which the first merge pair was found —
/// `window.len()` if none was found within the window.
///
/// RLE-compresses the window first: fringe detection uses the same
/// hash-bit scan as a merge round, and without collapsing adjacent
/// content-equal nodes first, a run of equal nodes would have identical
/// hash bits at every index and could scan forever. An RLE node is still
/// a valid height-`h` band member, so folding runs before classifying is
/// sound, not just a workaround.
fn classify_window<X: Eq + Clone>(window: &[NodeRef<X>], direction_bit: bool) -> usize {
    let (compressed, counts) = rle_compress_with_counts(window);
    let n = compressed.len();
    if n < 2 {
        return window.len();
    }

    let mut status = vec![Status::Unknown; n];
    let mut int_index: u32 = 0;
    let mut words: Vec<u32> = compressed.iter().map(|node| node.hash_at(0)).collect();
    let mut bit: u32 = 0;
    let mut words_fetched: u32 = 1;
    const MAX_HASH_WORDS: u32 = 4096;

    loop {
        let mut undecided = false;
        let mut k = 0;
        while k + 1 < n {
            if status[k] == Status::Unknown && status[k + 1] == Status::Unknown {
                let a = bit_at(words[k], bit);
                let b = bit_at(words[k + 1], bit);
                // Merge pattern: opposite-of-direction then direction
                // (`spec.md` §4.5) — the band-local mirror of the
                // ordinary merge round's (1, 0) pattern.
                if a != direction_bit && b == direction_bit {
                    status[k] = Status::MergeStart;
                    status[k + 1] = Status::MergeConsumed;
                    k += 2;
                    continue;
                }
                undecided = true;
            }
            k += 1;
        }
        if !undecided {
            break;
        }
        bit += 1;
        if bit == 32 {
            bit = 0;
            int_index += 1;
            words_fetched += 1;
            if words_fetched > MAX_HASH_WORDS {
                error::invariant("fringe boundary scan did not converge within the hash-word bound");
            }
            for (idx, word) in words.iter_mut().enumerate() {
                if status[idx] == Status::Unknown {
                    *word = compressed[idx].hash_at(int_index);
                }
            }
        }
    }

    let compressed_boundary = status.iter().position(|s| *s == Status::MergeStart).unwrap_or(n);
    counts[..compressed_boundary].iter().sum()
}

/// Like [`rle_compress`], but also returns how many original elements
/// each compressed output position folded together, so a boundary index
/// into the compressed array can be mapped back to an original count.
fn rle_compress_with_counts<X: Eq + Clone>(nodes: &[NodeRef<X>]) -> (Vec<NodeRef<X>>, Vec<usize>) {
    let mut values: Vec<NodeRef<X>> = Vec::with_capacity(nodes.len());
    let mut counts: Vec<usize> = Vec::with_capacity(nodes.len());
    for n in nodes {
        if let Some(last) = values.last() {
            if is_multiple_of(last, n) {
                let combined = combine(last, n);
                *values.last_mut().unwrap_or_else(|| error::invariant("rle_compress_with_counts: empty values")) = combined;
                *counts.last_mut().unwrap_or_else(|| error::invariant("rle_compress_with_counts: empty counts")) += 1;
                continue;
            }
        }
        values.push(n.clone());
        counts.push(1);
    }
    (values, counts)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::node::leaf;
    use crate::ops;

    #[test]
    fn empty_fringe_concat_is_none() {
        let result: Option<NodeRef<i32>> = concat_fringes(Fringe::empty(), Fringe::empty());
        assert!(result.is_none());
    }

    #[test]
    fn transform_right_then_concat_roundtrips_single_leaf() {
        let l = leaf(42_i32);
        let right = Fringe::transform_right(&l);
        let result = concat_fringes(right, Fringe::empty()).expect("non-empty");
        assert_eq!(result.hash_code(), l.hash_code());
        assert_eq!(ops::size(&result), 1);
    }

    #[test]
    fn transform_left_then_concat_roundtrips_single_leaf() {
        let l = leaf(7_i32);
        let left = Fringe::transform_left(&l);
        let result = concat_fringes(Fringe::empty(), left).expect("non-empty");
        assert_eq!(result.hash_code(), l.hash_code());
    }
}
