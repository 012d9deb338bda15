//! SplitHash tuning constants.
//!
//! All constants here are compile-time knobs referenced directly by
//! `spec.md` §6: changing them changes the canonical tree shape a given
//! sequence converges to, so two implementations that want to agree on
//! `hashCode`/`hashAt` byte-for-byte must share these values.

// =============================================================================
// STRUCTURAL THRESHOLDS
// =============================================================================

/// Re-chunk threshold: once a binary node's `chunkHeight` would exceed this,
/// the chunking codec packs it into a flat `Chunked` node instead.
pub const MAX_CHUNK_HEIGHT: u8 = 5;

/// Frontier stride used by the fringe-boundary stability scan (`§4.5`):
/// the tentative window starts at this width and grows by this amount on
/// every unstable classification.
pub const FRINGE_SCAN_WIDTH: usize = 5;

// =============================================================================
// SIPHASH LANES
// =============================================================================

/// SipHash-2-4 initial lane constants. These are the four standard ASCII
/// constants from the reference algorithm ("somepseudorandomlygeneratedbytes"
/// split into four 64-bit little-endian words) — nothing-up-my-sleeve values
/// shared by every SipHash implementation, not SplitHash-specific.
pub const SIP_V0: u64 = 0x736f_6d65_7073_6575;
pub const SIP_V1: u64 = 0x646f_7261_6e64_6f6d;
pub const SIP_V2: u64 = 0x6c79_6765_6e65_7261;
pub const SIP_V3: u64 = 0x7465_6462_7974_6573;

// =============================================================================
// MAGIC PRIMES
// =============================================================================

/// Mixed into leaf/RLE secondary hash derivations (`hashAt(1)`, `§4.2`) to
/// decorrelate them from the primary `hashCode`.
pub const P1: u32 = 1_664_525;
/// Mixed into binary/leaf secondary derivations alongside [`P1`].
pub const P2: u32 = 22_695_477;
/// Mixed into RLE secondary derivations alongside [`P2`].
pub const P3: u32 = 1_103_515_245;
