//! The `Binary` node variant (`spec.md` §3): an internal node with two
//! children, a lazily-cached hash, and two space-optimized encodings
//! (signed size, packed height/chunk-height) the reference implementation
//! uses and `spec.md` §9 explicitly permits splitting apart for clarity.
//! We keep them packed, since that's the shape a reader coming from the
//! reference would expect.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::constants::{P1, P2, P3};
use crate::hash::siphash24;

use super::NodeRef;

/// `height` in the high byte, `chunkHeight` in the low byte.
#[inline]
const fn pack_hc(height: u8, chunk_height: u8) -> u16 {
    ((height as u16) << 8) | (chunk_height as u16)
}

pub struct BinaryNode<X> {
    pub(crate) left: NodeRef<X>,
    pub(crate) right: NodeRef<X>,
    /// Negative iff this node is exactly the reconstructed root of a
    /// `Chunked` node's subtree; `size()` always returns `.unsigned_abs()`.
    size: i64,
    /// Packed (height, chunkHeight); see [`pack_hc`].
    hc: u16,
    /// `0` means "not yet computed"; see `spec.md` §5 on the benign race.
    hash: AtomicU32,
}

impl<X: Clone> BinaryNode<X> {
    pub(crate) fn new(left: NodeRef<X>, right: NodeRef<X>) -> Self {
        let size = left.size() + right.size();
        let height = 1 + left.height().max(right.height());
        let chunk_height = 1 + left.chunk_height().max(right.chunk_height());
        Self {
            left,
            right,
            size,
            hc: pack_hc(height, chunk_height),
            hash: AtomicU32::new(0),
        }
    }

    /// Builds a binary node flagged as the reconstructed root of a chunk
    /// boundary (used only by the chunking codec's `unchunk`).
    pub(crate) fn new_chunk_root(left: NodeRef<X>, right: NodeRef<X>) -> Self {
        let mut node = Self::new(left, right);
        node.size = -node.size;
        node
    }

    pub(crate) fn size(&self) -> i64 {
        self.size.unsigned_abs() as i64
    }

    pub(crate) fn is_chunked(&self) -> bool {
        self.size < 0
    }

    pub(crate) fn height(&self) -> u8 {
        (self.hc >> 8) as u8
    }

    pub(crate) fn chunk_height(&self) -> u8 {
        (self.hc & 0xff) as u8
    }

    fn compute_hash(&self) -> u32 {
        siphash24(
            self.left.hash_code().wrapping_sub(P2),
            self.right.hash_code().wrapping_add(P3),
        )
    }

    pub(crate) fn hash_code(&self) -> u32 {
        let cached = self.hash.load(Ordering::Relaxed);
        if cached != 0 {
            return cached;
        }
        let computed = self.compute_hash();
        // A sentinel of 0 for "uncomputed" means a genuine hash of 0 gets
        // recomputed on every call; harmless, since recomputation is
        // idempotent (`spec.md` §3, §9).
        self.hash.store(computed, Ordering::Relaxed);
        computed
    }

    pub(crate) fn hash_at(&self, i: u32) -> u32 {
        let hash = self.hash_code();
        if i == 0 {
            return hash;
        }
        if i == 1 {
            return (self
                .left
                .hash_code()
                .wrapping_sub(self.right.hash_code()))
                ^ hash;
        }
        crate::stats::record_deep_hash_derivation();
        let lo = i / 2;
        let hi = i - lo;
        let l = self.left.hash_at(lo);
        let r = self.right.hash_at(hi);
        siphash24(
            l.wrapping_add(P1),
            r.wrapping_mul(P3).wrapping_add(P2),
        )
    }
}

impl<X: Clone> Clone for BinaryNode<X> {
    fn clone(&self) -> Self {
        Self {
            left: self.left.clone(),
            right: self.right.clone(),
            size: self.size,
            hc: self.hc,
            hash: AtomicU32::new(self.hash.load(Ordering::Relaxed)),
        }
    }
}
