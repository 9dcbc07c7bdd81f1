//! Engine state and host probes.

use super::super::ledger::{ContextLedger, DedupLedger};

/// Both per-event ledgers of one tracking session.
///
/// Owned by a single tracker and never shared between sessions.
#[derive(Debug)]
pub struct Ledgers {
    pub dedup: DedupLedger,
    pub context: ContextLedger,
}

impl Ledgers {
    pub fn new(capacity: usize) -> Self {
        Self {
            dedup: DedupLedger::new(capacity),
            context: ContextLedger::new(capacity),
        }
    }
}

/// Reports whether the host can currently route key events.
///
/// Key presses seen while the host's key dispatcher is still initializing
/// are dropped rather than logged.
pub trait DispatchProbe {
    fn key_dispatch_ready(&self) -> bool;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysReady;

impl DispatchProbe for AlwaysReady {
    fn key_dispatch_ready(&self) -> bool {
        true
    }
}

impl<F: Fn() -> bool> DispatchProbe for F {
    fn key_dispatch_ready(&self) -> bool {
        self()
    }
}
