//! Bounded per-event ledgers shared by the observation points.
//!
//! Entries live only between the pre-dispatch and post-dispatch callbacks of
//! one gesture, so the ledgers never evict selectively: once full they are
//! cleared wholesale before the next insert. A very bursty sequence may
//! therefore lose an entry and log one gesture twice (dedup) or without its
//! selection (context).

use std::collections::HashMap;

use tracing::debug;

use super::input_event::EventId;

pub const DEFAULT_CAPACITY: usize = 100;

#[derive(Debug)]
struct BoundedLedger<V> {
    entries: HashMap<EventId, V>,
    capacity: usize,
    name: &'static str,
}

impl<V> BoundedLedger<V> {
    fn new(name: &'static str, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: HashMap::with_capacity(capacity),
            capacity,
            name,
        }
    }

    fn insert(&mut self, id: EventId, value: V) {
        if !self.entries.contains_key(&id) && self.entries.len() >= self.capacity {
            debug!(
                ledger = self.name,
                evicted = self.entries.len(),
                "ledger full, clearing"
            );
            self.entries.clear();
        }
        self.entries.insert(id, value);
    }

    fn take(&mut self, id: EventId) -> Option<V> {
        self.entries.remove(&id)
    }
}

/// Raw events already logged through a command invocation.
#[derive(Debug)]
pub struct DedupLedger {
    inner: BoundedLedger<()>,
}

impl DedupLedger {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: BoundedLedger::new("dedup", capacity),
        }
    }

    pub fn mark(&mut self, id: EventId) {
        self.inner.insert(id, ());
    }

    /// Removes the id, reporting whether it was marked.
    pub fn take(&mut self, id: EventId) -> bool {
        self.inner.take(id).is_some()
    }

    pub fn contains(&self, id: EventId) -> bool {
        self.inner.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }
}

/// Selection snapshots taken before dispatch, keyed by raw event.
#[derive(Debug)]
pub struct ContextLedger {
    inner: BoundedLedger<String>,
}

impl ContextLedger {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: BoundedLedger::new("context", capacity),
        }
    }

    pub fn store(&mut self, id: EventId, selection: String) {
        self.inner.insert(id, selection);
    }

    pub fn take(&mut self, id: EventId) -> Option<String> {
        self.inner.take(id)
    }

    pub fn contains(&self, id: EventId) -> bool {
        self.inner.entries.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.inner.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.entries.is_empty()
    }
}
