//! Chunking codec (`spec.md` §4.8): packs a binary subtree into two flat
//! arrays (leaf-of-chunk nodes, pre-order internal/leaf structure bits)
//! and decodes back on demand.

use std::sync::Arc;

use crate::node::{BinaryNode, ChunkedNode, Node, NodeRef};

fn encode<X: Clone>(node: &NodeRef<X>, leaves: &mut Vec<NodeRef<X>>, structure: &mut Vec<bool>) {
    if node.chunk_height() == 0 {
        structure.push(false);
        leaves.push(node.clone());
    } else {
        structure.push(true);
        encode(&node.left(), leaves, structure);
        encode(&node.right(), leaves, structure);
    }
}

/// The public, unconditional `chunk(tree)` operation (`spec.md` §6):
/// idempotent — re-chunking an already-`Chunked` node returns it
/// unchanged.
pub(crate) fn chunk<X: Eq + Clone>(tree: &NodeRef<X>) -> NodeRef<X> {
    if matches!(tree.as_ref(), Node::Chunked(_)) {
        return tree.clone();
    }
    let hash = tree.hash_code();
    let size = tree.size();
    let height = tree.height();
    let mut leaves = Vec::new();
    let mut structure = Vec::new();
    encode(tree, &mut leaves, &mut structure);
    Arc::new(Node::Chunked(ChunkedNode::new(leaves, structure, hash, size, height)))
}

/// Internal auto-chunking trigger (`spec.md` §3, §4.8): once a freshly
/// combined binary's `chunkHeight` would exceed `MAX_CHUNK_HEIGHT`, it is
/// replaced by its chunked form so deep binary structure never
/// accumulates unbounded.
pub(crate) fn maybe_rechunk<X: Eq + Clone>(tree: NodeRef<X>) -> NodeRef<X> {
    if tree.chunk_height() > crate::constants::MAX_CHUNK_HEIGHT {
        chunk(&tree)
    } else {
        tree
    }
}

fn decode<X: Clone>(
    leaves: &[NodeRef<X>],
    structure: &[bool],
    node_idx: &mut usize,
    tree_idx: &mut usize,
    is_root: bool,
) -> NodeRef<X> {
    let is_internal = structure[*tree_idx];
    *tree_idx += 1;
    if is_internal {
        let left = decode(leaves, structure, node_idx, tree_idx, false);
        let right = decode(leaves, structure, node_idx, tree_idx, false);
        let binary = if is_root {
            BinaryNode::new_chunk_root(left, right)
        } else {
            BinaryNode::new(left, right)
        };
        Arc::new(Node::Binary(binary))
    } else {
        let node = leaves[*node_idx].clone();
        *node_idx += 1;
        node
    }
}

/// Recursive decoder (`spec.md` §4.8): walks `(leaves, structure)` and
/// rebuilds the binary tree they encode. Only the top-level call is
/// flagged as a chunk-root boundary; nodes rebuilt beneath it are
/// ordinary binaries.
pub(crate) fn unchunk<X: Clone>(leaves: &[NodeRef<X>], structure: &[bool]) -> NodeRef<X> {
    let mut node_idx = 0;
    let mut tree_idx = 0;
    decode(leaves, structure, &mut node_idx, &mut tree_idx, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{combine, leaf};

    #[test]
    fn chunk_then_unchunk_is_hash_equal() {
        let mut tree = leaf(0_i32);
        for i in 1..40 {
            tree = combine(&tree, &leaf(i));
        }
        let original_hash = tree.hash_code();
        let chunked = chunk(&tree);
        assert!(matches!(chunked.as_ref(), Node::Chunked(_)));
        assert_eq!(chunked.hash_code(), original_hash);
    }

    #[test]
    fn chunk_is_idempotent() {
        let mut tree = leaf(0_i32);
        for i in 1..10 {
            tree = combine(&tree, &leaf(i));
        }
        let once = chunk(&tree);
        let twice = chunk(&once);
        assert_eq!(once.hash_code(), twice.hash_code());
        assert!(Arc::ptr_eq(&once, &twice));
    }
}
