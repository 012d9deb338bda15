//! Diagnostic counter for the `hashAt(i >= 2)` recursion path (`spec.md`
//! §4.2, §5, §9): a process-wide counter that exists purely for
//! observability. `spec.md` §9 leaves "what to do when this path is taken
//! pathologically often" as an open question and directs implementations
//! to surface the statistic without acting on it; see `DESIGN.md`.
//!
//! Compiled to a no-op unless the crate's `stats` feature is enabled,
//! mirroring the teacher's own `#[cfg(feature = "multithread")]` pattern
//! of zero-cost optional instrumentation.

#[cfg(feature = "stats")]
use core::sync::atomic::{AtomicU64, Ordering};

#[cfg(feature = "stats")]
static DEEP_HASH_DERIVATIONS: AtomicU64 = AtomicU64::new(0);

/// Records one traversal into the `i >= 2` branch of `hashAt`. A no-op
/// unless the `stats` feature is on.
#[inline]
pub(crate) fn record_deep_hash_derivation() {
    #[cfg(feature = "stats")]
    DEEP_HASH_DERIVATIONS.fetch_add(1, Ordering::Relaxed);
}

/// Returns how many times `hashAt` has recursed past `i == 1` since
/// process start. Only available when built with the `stats` feature.
#[cfg(feature = "stats")]
#[must_use]
pub fn deep_hash_derivations() -> u64 {
    DEEP_HASH_DERIVATIONS.load(Ordering::Relaxed)
}
