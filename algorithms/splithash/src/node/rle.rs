//! The `Rle` node variant (`spec.md` §3): a run-length-encoded repetition
//! of an inner subtree. `size = inner.size * m`; `height = inner.height`.
//! The inner node is never itself an RLE of the same base — `combine`
//! always folds multiplicities together instead of nesting RLEs.

use crate::constants::{P1, P2, P3};
use crate::hash::siphash24;

use super::NodeRef;

pub struct RleNode<X> {
    pub(crate) inner: NodeRef<X>,
    pub(crate) mult: u64,
    hash: u32,
}

impl<X: Clone> RleNode<X> {
    pub(crate) fn new(inner: NodeRef<X>, mult: u64) -> Self {
        debug_assert!(mult >= 2, "an RLE node must represent at least two repeats");
        let hash = Self::compute_hash(inner.hash_code(), mult);
        Self { inner, mult, hash }
    }

    /// Folds `mult` into the inner hash so two RLEs over the same base but
    /// different multiplicities never share a `hashAt(0)` — `spec.md` §4.2
    /// gives an explicit `hashAt(1)` formula for RLE but leaves `hashAt(0)`
    /// unstated; a `hashAt(0)` that ignored `mult` would let unequal
    /// sequences collide deterministically at the root hash whenever such
    /// nodes end up as non-adjacent siblings, rather than with the
    /// exponentially-decaying probability `spec.md` §3 requires of the
    /// `hashAt` family.
    fn compute_hash(inner_hash: u32, mult: u64) -> u32 {
        siphash24(inner_hash.wrapping_add(P1), (mult as u32).wrapping_mul(P3) ^ P2)
    }

    pub(crate) fn size(&self) -> i64 {
        self.inner.size() * self.mult as i64
    }

    pub(crate) fn height(&self) -> u8 {
        self.inner.height()
    }

    pub(crate) fn hash_code(&self) -> u32 {
        self.hash
    }

    pub(crate) fn hash_at(&self, i: u32) -> u32 {
        if i == 0 {
            return self.hash;
        }
        if i == 1 {
            return siphash24(
                self.hash.wrapping_add(P2),
                (self.mult as u32).wrapping_sub(P3),
            );
        }
        crate::stats::record_deep_hash_derivation();
        let lo = i / 2;
        let hi = i - lo;
        let a = self.inner.hash_at(lo);
        let b = self.inner.hash_at(hi);
        siphash24(
            a.wrapping_add(self.mult as u32),
            b.wrapping_add(P3).wrapping_sub(P2),
        )
    }
}

impl<X: Clone> Clone for RleNode<X> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            mult: self.mult,
            hash: self.hash,
        }
    }
}
