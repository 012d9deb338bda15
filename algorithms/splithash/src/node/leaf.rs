//! The `Leaf` node variant (`spec.md` §3): a single element with a cached
//! base hash. `size = 1`, `height = 0`, `chunkHeight = 0`, `isChunked = false`.

use core::hash::Hash;

use crate::constants::{P1, P2};
use crate::hash::{seed_of, siphash24};

pub struct LeafNode<X> {
    pub(crate) value: X,
    pub(crate) hash: u32,
}

impl<X: Hash> LeafNode<X> {
    pub(crate) fn new(value: X) -> Self {
        let hash = seed_of(&value);
        Self { value, hash }
    }

    pub(crate) fn hash_at(&self, i: u32) -> u32 {
        if i == 0 {
            return self.hash;
        }
        let seed = seed_of(&self.value);
        if i == 1 {
            return siphash24(seed.wrapping_add(P2), self.hash.wrapping_mul(P1));
        }
        crate::stats::record_deep_hash_derivation();
        let lo = i / 2;
        let hi = i - lo;
        let a = self.hash_at(lo);
        let b = self.hash_at(hi);
        siphash24(a.wrapping_add(seed), b.wrapping_add(P1).wrapping_mul(P2))
    }
}

impl<X: Clone> Clone for LeafNode<X> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            hash: self.hash,
        }
    }
}
