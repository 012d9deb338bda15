#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use splithash::{concat, equal_to, hash_code, leaf, NodeRef};

/// A short element sequence plus a bracketing schedule: one "fold from the
/// left" bit per internal merge point, so the fuzzer can explore different
/// tree shapes over the same elements without ever producing an invalid
/// bracketing.
#[derive(Debug, Arbitrary)]
struct Data {
    elements: Vec<i8>,
    bracket_bits: Vec<u8>,
}

/// Folds `elements[lo..hi]` into a tree, picking the split point for each
/// internal merge from `bits` (wrapping around if exhausted) instead of
/// always splitting at the midpoint, so repeated fuzz runs explore
/// different bracketings of the same input.
fn fold_with_schedule(elements: &[i8], bits: &[u8], cursor: &mut usize) -> NodeRef<i8> {
    if elements.len() == 1 {
        return leaf(elements[0]);
    }
    let choice = if bits.is_empty() {
        0
    } else {
        bits[*cursor % bits.len()]
    };
    *cursor += 1;
    // Map the byte onto a valid interior split point, 1..elements.len().
    let mid = 1 + (choice as usize % (elements.len() - 1));
    let left = fold_with_schedule(&elements[..mid], bits, cursor);
    let right = fold_with_schedule(&elements[mid..], bits, cursor);
    concat(Some(&left), Some(&right)).unwrap_or_else(|| unreachable!("both sides non-empty"))
}

fn fold_left_to_right(elements: &[i8]) -> Option<NodeRef<i8>> {
    let mut tree: Option<NodeRef<i8>> = None;
    for &e in elements {
        tree = concat(tree.as_ref(), Some(&leaf(e)));
    }
    tree
}

fuzz_target!(|data: Data| {
    if data.elements.is_empty() {
        return;
    }

    let reference = fold_left_to_right(&data.elements).expect("non-empty elements");

    let mut cursor = 0;
    let bracketed = fold_with_schedule(&data.elements, &data.bracket_bits, &mut cursor);

    assert_eq!(
        hash_code(&reference),
        hash_code(&bracketed),
        "fold order/bracketing changed the canonical hash for {:?}",
        data.elements
    );
    assert!(equal_to(&reference, &bracketed));
});
