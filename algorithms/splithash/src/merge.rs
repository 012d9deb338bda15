//! The merge-round engine (`spec.md` §4.3): one level of canonical
//! merging over an array of same-height-band nodes. This is the heart of
//! history-independence — the merge decision at each position depends
//! only on hash bits of the participating nodes, never on position within
//! a larger sequence.

use crate::error;
use crate::hash::bit_at;
use crate::node::{combine, is_multiple_of, NodeRef};

/// An intentionally generous bound on hash-word fetches per merge round.
/// `spec.md` §3 requires `{hashAt(i)}` to have exponentially decaying
/// collision probability; exceeding this would mean that invariant has
/// been violated somewhere, not that a larger legitimate input exists.
const MAX_HASH_WORDS: u32 = 4096;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Status {
    Unknown,
    MergedStart,
    MergedConsumed,
}

/// Step 1 of a merge round: collapse adjacent content-equal runs into RLE
/// nodes. A cheap prescan skips allocation entirely when no adjacent
/// duplicates exist.
pub(crate) fn rle_compress<X: Eq + Clone>(nodes: &[NodeRef<X>]) -> Vec<NodeRef<X>> {
    let has_duplicate = nodes.windows(2).any(|w| is_multiple_of(&w[0], &w[1]));
    if !has_duplicate {
        return nodes.to_vec();
    }
    let mut stack: Vec<NodeRef<X>> = Vec::with_capacity(nodes.len());
    for n in nodes {
        if let Some(last) = stack.last() {
            if is_multiple_of(last, n) {
                let combined = combine(last, n);
                stack.pop();
                stack.push(combined);
                continue;
            }
        }
        stack.push(n.clone());
    }
    stack
}

/// Step 2 of a merge round: hash-bit-driven adjacent pairing, scanning
/// bit positions across the nodes' `hashAt` word sequence until every
/// still-undecided adjacent pair has resolved.
fn hash_bit_merge<X: Eq + Clone>(nodes: Vec<NodeRef<X>>) -> Vec<NodeRef<X>> {
    let n = nodes.len();
    if n < 2 {
        return nodes;
    }

    let mut status = vec![Status::Unknown; n];
    let mut int_index: u32 = 0;
    let mut words: Vec<u32> = nodes.iter().map(|node| node.hash_at(0)).collect();
    let mut bit: u32 = 0;
    let mut words_fetched: u32 = 1;

    loop {
        let mut undecided_remaining = false;
        let mut k = 0;
        while k + 1 < n {
            if status[k] == Status::Unknown && status[k + 1] == Status::Unknown {
                let lhs = bit_at(words[k], bit);
                let rhs = bit_at(words[k + 1], bit);
                if lhs && !rhs {
                    status[k] = Status::MergedStart;
                    status[k + 1] = Status::MergedConsumed;
                    k += 2;
                    continue;
                }
                undecided_remaining = true;
            }
            k += 1;
        }

        if !undecided_remaining {
            break;
        }

        bit += 1;
        if bit == 32 {
            bit = 0;
            int_index += 1;
            words_fetched += 1;
            if words_fetched > MAX_HASH_WORDS {
                error::invariant("merge round did not converge within the hash-word bound");
            }
            for (idx, word) in words.iter_mut().enumerate() {
                if status[idx] == Status::Unknown {
                    *word = nodes[idx].hash_at(int_index);
                }
            }
        }
    }

    let mut output = Vec::with_capacity(n);
    let mut k = 0;
    while k < n {
        match status[k] {
            Status::MergedStart => {
                output.push(combine(&nodes[k], &nodes[k + 1]));
                k += 2;
            }
            Status::Unknown => {
                output.push(nodes[k].clone());
                k += 1;
            }
            Status::MergedConsumed => error::invariant("unreachable merge-status transition"),
        }
    }
    output
}

/// Runs one full merge round (RLE pre-compression, then hash-bit merge)
/// over `nodes`.
pub(crate) fn merge_round<X: Eq + Clone>(nodes: Vec<NodeRef<X>>) -> Vec<NodeRef<X>> {
    if nodes.len() < 2 {
        return nodes;
    }
    let compressed = rle_compress(&nodes);
    hash_bit_merge(compressed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::leaf;

    #[test]
    fn single_node_passes_through() {
        let nodes = vec![leaf(1_i32)];
        let result = merge_round(nodes.clone());
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].hash_code(), nodes[0].hash_code());
    }

    #[test]
    fn equal_adjacent_leaves_rle_compress() {
        let nodes = vec![leaf(7_i32), leaf(7_i32), leaf(7_i32)];
        let result = merge_round(nodes);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].size(), 3);
    }

    #[test]
    fn shrinks_a_larger_array() {
        let nodes: Vec<_> = (0..64_i32).map(leaf).collect();
        let result = merge_round(nodes.clone());
        assert!(result.len() < nodes.len());
    }
}
