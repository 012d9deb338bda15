//! The `Chunked` node variant (`spec.md` §3, §4.8): a binary subtree
//! packed into two flat arrays — a leaf-of-chunk node list and a
//! pre-order structure bit-sequence — plus a weak-referenced cache of the
//! reconstructed binary form.

use std::sync::{Arc, Mutex, Weak};

use arc_swap::ArcSwapWeak;

use crate::error;

use super::{Node, NodeRef};

pub struct ChunkedNode<X> {
    /// Leaf-of-chunk nodes in pre-order traversal order. Despite the name,
    /// an entry need not be a `Leaf` — any node with `chunkHeight == 0`
    /// (a leaf, an RLE of one, or a nested `Chunked` node) qualifies.
    pub(crate) leaves: Vec<NodeRef<X>>,
    /// `true` marks an internal node, `false` marks a leaf-of-chunk, in
    /// pre-order.
    pub(crate) structure: Vec<bool>,
    hash: u32,
    size: i64,
    height: u8,
    /// Lock-free cache of the reconstructed binary form (`spec.md` §5):
    /// readers try an atomic load-and-upgrade before ever touching
    /// `rebuild_lock`.
    unchunked: ArcSwapWeak<Node<X>>,
    /// Serializes the rebuild-and-publish step on a cache miss so
    /// concurrent misses don't all redo the reconstruction; not needed
    /// for correctness, since reconstruction is deterministic and racing
    /// rebuilds would publish equal trees regardless.
    rebuild_lock: Mutex<()>,
}

impl<X> ChunkedNode<X> {
    pub(crate) fn new(leaves: Vec<NodeRef<X>>, structure: Vec<bool>, hash: u32, size: i64, height: u8) -> Self {
        Self {
            leaves,
            structure,
            hash,
            size,
            height,
            unchunked: ArcSwapWeak::from(Weak::new()),
            rebuild_lock: Mutex::new(()),
        }
    }

    pub(crate) fn size(&self) -> i64 {
        self.size
    }

    pub(crate) fn height(&self) -> u8 {
        self.height
    }

    pub(crate) fn hash_code(&self) -> u32 {
        self.hash
    }

    pub(crate) fn first(&self) -> &X {
        self.leaves
            .first()
            .unwrap_or_else(|| error::invariant("a chunk always holds at least one leaf"))
            .first()
    }

    pub(crate) fn last(&self) -> &X {
        self.leaves
            .last()
            .unwrap_or_else(|| error::invariant("a chunk always holds at least one leaf"))
            .last()
    }

    /// Double-checked reconstruction (`spec.md` §5): a lock-free fast
    /// path reads the cached weak reference and tries to upgrade it; only
    /// on a miss does a reader acquire `rebuild_lock`, re-check, rebuild,
    /// and publish. Reconstruction is deterministic, so racing readers
    /// that both miss and both rebuild still publish equal trees.
    pub(crate) fn unchunked(&self) -> NodeRef<X>
    where
        X: Clone,
    {
        if let Some(strong) = self.unchunked.load_full().upgrade() {
            return strong;
        }
        let _guard = self
            .rebuild_lock
            .lock()
            .unwrap_or_else(|_| error::invariant("chunked rebuild mutex poisoned"));
        if let Some(strong) = self.unchunked.load_full().upgrade() {
            return strong;
        }
        let rebuilt = crate::chunk_codec::unchunk(&self.leaves, &self.structure);
        self.unchunked.store(Arc::downgrade(&rebuilt));
        rebuilt
    }
}
