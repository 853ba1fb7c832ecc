//! Readiness gate for the support indexer.
//!
//! A process-wide flag that starts `false` and is flipped to `true` exactly
//! once, after the initial batch load finishes. The orchestrator is the only
//! writer; HTTP handlers read it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable handle to the shared readiness flag.
///
/// All clones observe the same flag. The flip uses release ordering and reads
/// use acquire ordering, so anything written before `mark_ready` is visible to
/// a reader that sees `true`.
#[derive(Debug, Clone, Default)]
pub struct ReadinessGate {
    ready: Arc<AtomicBool>,
}

impl ReadinessGate {
    /// Create a gate in the not-ready state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the initial load has completed.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Flip the gate to ready.
    ///
    /// Returns `true` if this call performed the flip, `false` if the gate was
    /// already ready.
    pub fn mark_ready(&self) -> bool {
        self.ready
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}
