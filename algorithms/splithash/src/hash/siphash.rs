//! SipHash-2-4 variant over two 32-bit inputs (`spec.md` §4.1).
//!
//! This is not general-purpose SipHash over a byte stream: SplitHash only
//! ever hashes a single 64-bit message assembled from two 32-bit node-hash
//! halves, so the streaming buffer/tail machinery a general SipHash needs
//! is absent — just the four-lane state, one compression block, and the
//! finalization rounds.

use crate::constants::{SIP_V0, SIP_V1, SIP_V2, SIP_V3};

/// One SipRound: the standard add/rotate/XOR sequence on the four lanes,
/// rotation constants (13, 32, 16, 21, 17, 32).
macro_rules! sip_round {
    ($v0:expr, $v1:expr, $v2:expr, $v3:expr) => {{
        $v0 = $v0.wrapping_add($v1);
        $v1 = $v1.rotate_left(13);
        $v1 ^= $v0;
        $v0 = $v0.rotate_left(32);
        $v2 = $v2.wrapping_add($v3);
        $v3 = $v3.rotate_left(16);
        $v3 ^= $v2;
        $v0 = $v0.wrapping_add($v3);
        $v3 = $v3.rotate_left(21);
        $v3 ^= $v0;
        $v2 = $v2.wrapping_add($v1);
        $v1 = $v1.rotate_left(17);
        $v1 ^= $v2;
        $v2 = $v2.rotate_left(32);
    }};
}

/// Derives a 32-bit hash from two 32-bit inputs.
#[must_use]
pub(crate) fn siphash24(x1: u32, x2: u32) -> u32 {
    let mut v0 = SIP_V0;
    let mut v1 = SIP_V1;
    let mut v2 = SIP_V2;
    let mut v3 = SIP_V3;

    let message = (u64::from(x1).rotate_left(32)).wrapping_add(u64::from(x2));

    v3 ^= message;
    sip_round!(v0, v1, v2, v3);
    sip_round!(v0, v1, v2, v3);
    v0 ^= message;

    v2 ^= 0xff;
    sip_round!(v0, v1, v2, v3);
    sip_round!(v0, v1, v2, v3);
    sip_round!(v0, v1, v2, v3);
    sip_round!(v0, v1, v2, v3);

    let r = v0 ^ v1 ^ v2 ^ v3;
    (r.rotate_left(32) ^ r) as u32
}

#[cfg(test)]
mod tests {
    use super::siphash24;

    #[test]
    fn deterministic() {
        assert_eq!(siphash24(1, 2), siphash24(1, 2));
    }

    #[test]
    fn sensitive_to_each_input() {
        assert_ne!(siphash24(1, 2), siphash24(2, 2));
        assert_ne!(siphash24(1, 2), siphash24(1, 3));
    }

    #[test]
    fn order_matters() {
        assert_ne!(siphash24(1, 2), siphash24(2, 1));
    }
}
