//! The hash oracle (`spec.md` §4.1): a deterministic 32-bit derivation
//! consumed by every node kind, plus the bit-indexing primitive the
//! merge-round engine and fringe machinery scan over.

mod siphash;

use core::hash::{Hash, Hasher};

pub(crate) use siphash::siphash24;

/// Returns bit `j` of `h`, numbered from the most significant bit (`j = 0`).
#[inline]
#[must_use]
pub(crate) const fn bit_at(h: u32, j: u32) -> bool {
    (h >> (31 - j)) & 1 == 1
}

/// FNV-1a accumulator used only to fold an arbitrary `Hash` element down to
/// a 64-bit seed before it enters the SipHash oracle; not itself part of
/// the canonicalization algorithm, so its exact constants don't need to
/// match across implementations the way [`siphash24`]'s do.
struct SeedHasher(u64);

impl Hasher for SeedHasher {
    fn write(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.0 = self.0.wrapping_mul(0x0000_0100_0000_01b3).wrapping_add(u64::from(b));
        }
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

/// Derives a 32-bit seed for a leaf element, used as the base of a leaf's
/// cached hash and of its `hashAt(1)` derivation (`spec.md` §4.2).
#[must_use]
pub(crate) fn seed_of<X: Hash>(value: &X) -> u32 {
    let mut hasher = SeedHasher(0xcbf2_9ce4_8422_2325);
    value.hash(&mut hasher);
    let folded = hasher.finish();
    siphash24((folded >> 32) as u32, folded as u32)
}
