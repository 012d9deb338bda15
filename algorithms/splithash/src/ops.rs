//! Public operations (`spec.md` §6): the only surface that touches
//! `Node<X>` directly from outside the `node` module. Every function here
//! takes and returns [`NodeRef`], never `Node` by value, so callers never
//! see the sum type itself.

use std::hash::Hash;
use std::sync::Arc;

#[cfg(feature = "multithread")]
use rayon::prelude::*;

use crate::fringe::{concat_fringes, fold_combine2, Fringe};
use crate::merge::merge_round;
use crate::node::{self, Node, NodeRef, RleNode};

/// Builds a single-element tree (`spec.md` §3, §6).
pub fn leaf<X: Hash>(value: X) -> NodeRef<X> {
    node::leaf(value)
}

/// `hashCode` (`spec.md` §3, §4.2): the canonical content hash.
#[must_use]
pub fn hash_code<X: Clone>(tree: &NodeRef<X>) -> u32 {
    tree.hash_code()
}

/// `hashAt(i)` (`spec.md` §4.2): the infinite hash-sequence extension.
#[must_use]
pub fn hash_at<X: Clone>(tree: &NodeRef<X>, i: u32) -> u32 {
    tree.hash_at(i)
}

/// Element count.
#[must_use]
pub fn size<X>(tree: &NodeRef<X>) -> i64 {
    tree.size()
}

/// Tree height.
#[must_use]
pub fn height<X>(tree: &NodeRef<X>) -> u8 {
    tree.height()
}

/// The first (leftmost) element.
#[must_use]
pub fn first<X>(tree: &NodeRef<X>) -> &X {
    tree.first()
}

/// The last (rightmost) element.
#[must_use]
pub fn last<X>(tree: &NodeRef<X>) -> &X {
    tree.last()
}

/// Content equality (`spec.md` §3, §4.2): hash-first, full fallback only
/// on a hash match.
#[must_use]
pub fn equal_to<X: Eq + Clone>(a: &NodeRef<X>, b: &NodeRef<X>) -> bool {
    a.equal_to(b)
}

/// A random-access cursor over a tree's elements (`spec.md` §2's "lazy
/// indexable iterator"): a cache built on top of a one-shot traversal, so
/// a sequence of `get` calls against increasing indices amortizes to a
/// single walk of the tree instead of re-walking it from the start on
/// every call.
pub struct Cursor<'a, X> {
    inner: crate::iter::IndexableIterator<'a, X>,
}

impl<'a, X> Cursor<'a, X> {
    /// Returns the element at `index`, or `None` if `index >= size(tree)`.
    #[must_use]
    pub fn get(&mut self, index: usize) -> Option<&X> {
        self.inner.get(index)
    }
}

/// Opens a [`Cursor`] over `tree` for repeated indexed access.
#[must_use]
pub fn cursor<X>(tree: &NodeRef<X>) -> Cursor<'_, X> {
    Cursor {
        inner: crate::iter::IndexableIterator::from_node(tree),
    }
}

/// Packs `tree` into its chunked form (`spec.md` §4.8). Idempotent.
#[must_use]
pub fn chunk<X: Eq + Clone>(tree: &NodeRef<X>) -> NodeRef<X> {
    crate::chunk_codec::chunk(tree)
}

/// `concat(a, b)` (`spec.md` §4.4, §6): builds the canonical tree holding
/// `a`'s elements followed by `b`'s. `None` represents the empty sequence
/// on either side; concatenating two empty sequences is empty.
#[must_use]
pub fn concat<X: Eq + Clone>(a: Option<&NodeRef<X>>, b: Option<&NodeRef<X>>) -> Option<NodeRef<X>> {
    match (a, b) {
        (None, None) => None,
        (Some(only), None) | (None, Some(only)) => Some(only.clone()),
        (Some(a), Some(b)) => {
            let right = Fringe::transform_right(a);
            let left = Fringe::transform_left(b);
            concat_fringes(right, left)
        }
    }
}

/// `split(t, i)` (`spec.md` §4.6, §6): divides `t` into the first `i`
/// elements and the rest. `i <= 0` yields `(None, Some(t))`; `i >= size`
/// yields `(Some(t), None)`.
#[must_use]
pub fn split<X: Eq + Clone>(tree: &NodeRef<X>, i: i64) -> (Option<NodeRef<X>>, Option<NodeRef<X>>) {
    let total = tree.size();
    if i <= 0 {
        return (None, Some(tree.clone()));
    }
    if i >= total {
        return (Some(tree.clone()), None);
    }

    let mut left_pieces = Vec::new();
    let mut right_pieces = Vec::new();
    collect(tree, i, &mut left_pieces, &mut right_pieces);

    (assemble_left(left_pieces), assemble_right(right_pieces))
}

/// Walks `tree` top-down, collecting an ordered list of subtrees that
/// together cover the first `i` elements into `left`, and the remaining
/// subtrees covering the rest into `right` (`spec.md` §4.6's `leftSplit`
/// / `rightSplit`, unified into one descent since both sides fall out of
/// the same walk).
fn collect<X: Eq + Clone>(
    node: &NodeRef<X>,
    index: i64,
    left: &mut Vec<NodeRef<X>>,
    right: &mut Vec<NodeRef<X>>,
) {
    debug_assert!(index > 0 && index < node.size());
    match node.as_ref() {
        Node::Leaf(_) => {
            crate::error::invariant("collect descended into a leaf with a strictly interior index")
        }
        Node::Binary(b) => {
            let left_size = b.left.size();
            if index < left_size {
                collect(&b.left, index, left, right);
                right.push(b.right.clone());
            } else if index == left_size {
                left.push(b.left.clone());
                right.push(b.right.clone());
            } else {
                left.push(b.left.clone());
                collect(&b.right, index - left_size, left, right);
            }
        }
        Node::Rle(r) => collect_rle(r, index, left, right),
        Node::Chunked(c) => collect(&c.unchunked(), index, left, right),
        Node::Temp(_) => crate::error::invariant("collect encountered a transient Temp node"),
    }
}

fn collect_rle<X: Eq + Clone>(
    r: &RleNode<X>,
    index: i64,
    left: &mut Vec<NodeRef<X>>,
    right: &mut Vec<NodeRef<X>>,
) {
    let base_size = r.inner.size();
    let full = index / base_size;
    let rem = index % base_size;

    if full > 0 {
        left.push(repeat(&r.inner, full.unsigned_abs()));
    }
    if rem == 0 {
        let remaining = r.mult - full.unsigned_abs();
        if remaining > 0 {
            right.push(repeat(&r.inner, remaining));
        }
    } else {
        collect(&r.inner, rem, left, right);
        let remaining = r.mult - full.unsigned_abs() - 1;
        if remaining > 0 {
            right.push(repeat(&r.inner, remaining));
        }
    }
}

/// `mult` copies of `inner`, collapsing to `inner` itself when `mult == 1`
/// (an RLE node is never built to hold a single repeat, `spec.md` §3).
fn repeat<X: Clone>(inner: &NodeRef<X>, mult: u64) -> NodeRef<X> {
    if mult == 1 {
        inner.clone()
    } else {
        Arc::new(Node::Rle(RleNode::new(inner.clone(), mult)))
    }
}

/// Assembles a collected left-hand piece list into the canonical left
/// side of a split (`spec.md` §4.6's `leftSplit`): fold the pieces into a
/// temporary tree with `combine2`, transform it into a `RightFringe`, and
/// concatenate with the empty `LeftFringe`.
fn assemble_left<X: Eq + Clone>(pieces: Vec<NodeRef<X>>) -> Option<NodeRef<X>> {
    let temp = fold_combine2(&pieces)?;
    let right = Fringe::transform_right(&temp);
    concat_fringes(right, Fringe::empty())
}

/// Symmetric to [`assemble_left`]: transforms into a `LeftFringe` and
/// concatenates with the empty `RightFringe` (`spec.md` §4.6's
/// `rightSplit`).
fn assemble_right<X: Eq + Clone>(pieces: Vec<NodeRef<X>>) -> Option<NodeRef<X>> {
    let temp = fold_combine2(&pieces)?;
    let left = Fringe::transform_left(&temp);
    concat_fringes(Fringe::empty(), left)
}

/// Folds an arbitrary left-to-right ordered run of subtrees into a single
/// canonical tree by repeated merge rounds. Used by bulk-construction
/// helpers (the `multithread` feature's parallel fold) rather than by
/// `split`/`concat`, which go through the fringe machinery instead so
/// they stay sublinear in the unaffected part of the tree.
#[must_use]
pub(crate) fn assemble<X: Eq + Clone>(mut nodes: Vec<NodeRef<X>>) -> Option<NodeRef<X>> {
    const MAX_ROUNDS: u32 = 1_000_000;
    let mut round = 0;
    loop {
        match nodes.len() {
            0 => return None,
            1 => return nodes.into_iter().next(),
            _ => {
                nodes = merge_round(nodes);
                round += 1;
                if round > MAX_ROUNDS {
                    crate::error::invariant("assemble did not converge within the round bound");
                }
            }
        }
    }
}

/// Bulk-builds a canonical tree holding `elements` in order (`spec.md`
/// §5): sequential element-by-element folding without the `multithread`
/// feature, a `rayon`-parallel fold-then-reduce when it's enabled. Either
/// way the result is the same canonical tree, since canonicalization
/// never depends on fold order.
#[must_use]
pub fn build<X>(elements: Vec<X>) -> Option<NodeRef<X>>
where
    X: Eq + Clone + Hash + Send + Sync,
{
    #[cfg(feature = "multithread")]
    {
        build_parallel(elements)
    }
    #[cfg(not(feature = "multithread"))]
    {
        let leaves: Vec<NodeRef<X>> = elements.into_iter().map(leaf).collect();
        assemble(leaves)
    }
}

#[cfg(feature = "multithread")]
fn build_parallel<X>(elements: Vec<X>) -> Option<NodeRef<X>>
where
    X: Eq + Clone + Hash + Send + Sync,
{
    elements
        .into_par_iter()
        .map(leaf)
        .fold(|| None, |acc: Option<NodeRef<X>>, n| concat(acc.as_ref(), Some(&n)))
        .reduce(|| None, |a, b| concat(a.as_ref(), b.as_ref()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn seq(range: std::ops::Range<i32>) -> NodeRef<i32> {
        let mut pieces: Vec<NodeRef<i32>> = range.map(leaf).collect();
        let mut tree = pieces.remove(0);
        for p in pieces {
            tree = concat(Some(&tree), Some(&p)).expect("non-empty concat");
        }
        tree
    }

    fn to_vec(tree: &NodeRef<i32>) -> Vec<i32> {
        crate::iter::Leaves::from_node(tree.as_ref()).copied().collect()
    }

    #[test]
    fn concat_with_none_returns_the_other_side() {
        let t = leaf(1);
        assert!(equal_to(&concat(Some(&t), None).unwrap(), &t));
        assert!(equal_to(&concat(None, Some(&t)).unwrap(), &t));
        assert!(concat::<i32>(None, None).is_none());
    }

    #[test]
    fn concat_preserves_element_order() {
        let a = seq(0..10);
        let b = seq(10..20);
        let whole = concat(Some(&a), Some(&b)).expect("non-empty");
        assert_eq!(to_vec(&whole), (0..20).collect::<Vec<_>>());
        assert_eq!(size(&whole), 20);
    }

    #[test]
    fn split_boundary_cases() {
        let t = seq(0..10);
        let (l, r) = split(&t, 0);
        assert!(l.is_none());
        assert!(equal_to(&r.expect("full remainder"), &t));

        let (l, r) = split(&t, 10);
        assert!(r.is_none());
        assert!(equal_to(&l.expect("full prefix"), &t));

        let (l, r) = split(&t, -5);
        assert!(l.is_none());
        assert!(equal_to(&r.expect("full remainder"), &t));
    }

    #[test]
    fn split_then_concat_is_identity() {
        let t = seq(0..37);
        for i in 1..37 {
            let (l, r) = split(&t, i);
            let rebuilt = concat(l.as_ref(), r.as_ref()).expect("non-empty");
            assert_eq!(rebuilt.hash_code(), t.hash_code(), "mismatch at split index {i}");
            assert_eq!(to_vec(&rebuilt), to_vec(&t));
        }
    }

    #[test]
    fn split_partitions_elements_correctly() {
        let t = seq(0..23);
        let (l, r) = split(&t, 9);
        let left = l.expect("non-empty left");
        let right = r.expect("non-empty right");
        assert_eq!(to_vec(&left), (0..9).collect::<Vec<_>>());
        assert_eq!(to_vec(&right), (9..23).collect::<Vec<_>>());
    }

    #[test]
    fn split_through_repeated_elements() {
        let mut tree = leaf(5);
        for _ in 0..9 {
            tree = concat(Some(&tree), Some(&leaf(5))).expect("non-empty");
        }
        assert_eq!(size(&tree), 10);
        let (l, r) = split(&tree, 4);
        let left = l.expect("non-empty left");
        let right = r.expect("non-empty right");
        assert_eq!(size(&left), 4);
        assert_eq!(size(&right), 6);
        assert!(to_vec(&left).iter().all(|&v| v == 5));
        assert!(to_vec(&right).iter().all(|&v| v == 5));
    }

    #[test]
    fn chunk_roundtrips_through_ops() {
        let t = seq(0..40);
        let chunked = chunk(&t);
        assert_eq!(hash_code(&chunked), hash_code(&t));
        assert_eq!(to_vec(&chunked), to_vec(&t));
    }

    #[test]
    fn build_matches_folded_concat() {
        let elements: Vec<i32> = (0..200).collect();
        let folded = seq(0..200);
        let built = build(elements).expect("non-empty");
        assert_eq!(hash_code(&built), hash_code(&folded));
        assert_eq!(to_vec(&built), to_vec(&folded));
    }

    #[test]
    fn build_of_empty_vec_is_none() {
        assert!(build::<i32>(Vec::new()).is_none());
    }

    #[test]
    fn cursor_random_access_matches_leaves_order() {
        let t = seq(0..50);
        let mut c = cursor(&t);
        assert_eq!(c.get(49), Some(&49));
        assert_eq!(c.get(0), Some(&0));
        assert_eq!(c.get(25), Some(&25));
        assert_eq!(c.get(50), None);
    }
}
