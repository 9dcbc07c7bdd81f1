//! Correlation engine that merges raw input and command invocations into records.
//!
//! The host reports every gesture at up to three points, always in this order:
//! - before dispatch: a selection snapshot is taken for context-sensitive input
//! - command invocation: the gesture is recorded as a named command and its raw
//!   event is marked so the fallback pass skips it
//! - after dispatch: raw input not claimed by a command is recorded directly
//!
//! Whichever recorder sees an event first consumes its selection snapshot, so
//! one gesture yields exactly one record.

mod helpers;
mod types;

pub use helpers::{is_anonymous_implementation, is_own_command, resolve_command_label};
pub use types::*;

use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, trace};

use super::classifier;
use super::clock::Clock;
use super::input_event::{CommandInvocation, EventId, InputKind, RawInputEvent};
use super::selection::SelectionResolver;
use super::session::Session;
use super::types::ActionData;
use crate::config::TrackerConfig;
use crate::host::InputObserver;

pub struct ActionTracker {
    session: Session,
    ledgers: Ledgers,
    resolver: Rc<dyn SelectionResolver>,
    dispatch: Rc<dyn DispatchProbe>,
    clock: Rc<dyn Clock>,
    own_command_prefix: String,
    marker_label: String,
    known_labels: HashMap<String, String>,
}

impl ActionTracker {
    pub fn new(
        config: &TrackerConfig,
        resolver: Rc<dyn SelectionResolver>,
        dispatch: Rc<dyn DispatchProbe>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        Self {
            session: Session::new(clock.now_ms()),
            ledgers: Ledgers::new(config.ledger_capacity),
            resolver,
            dispatch,
            clock,
            own_command_prefix: config.own_command_prefix.clone(),
            marker_label: config.marker_label.clone(),
            known_labels: config.known_labels.clone(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Ends tracking and hands over the recorded session.
    pub fn finish(self) -> Session {
        self.session
    }

    /// Whether a selection snapshot is waiting for this event.
    pub fn has_snapshot(&self, id: EventId) -> bool {
        self.ledgers.context.contains(id)
    }

    /// Whether this event was claimed by a command and not yet seen after dispatch.
    pub fn is_attributed(&self, id: EventId) -> bool {
        self.ledgers.dedup.contains(id)
    }

    pub fn pending_snapshots(&self) -> usize {
        self.ledgers.context.len()
    }

    pub fn pending_attributions(&self) -> usize {
        self.ledgers.dedup.len()
    }

    pub fn insert_marker(&mut self) {
        let label = self.marker_label.clone();
        self.insert_marker_labeled(label);
    }

    pub fn insert_marker_labeled(&mut self, label: impl Into<String>) {
        self.append(ActionData::Marker { label: label.into() }, None);
    }

    /// Snapshot the selection for a context-sensitive event before the host routes it.
    pub fn before_dispatch(&mut self, event: &RawInputEvent) {
        if !classifier::is_context_sensitive(event) {
            return;
        }
        let Some(component) = event.component else {
            return;
        };

        let editable = classifier::wants_editable_text(event);
        if let Some(selection) = self.resolver.resolve(component, editable) {
            trace!(event = event.id.0, %selection, editable, "selection captured");
            self.ledgers.context.store(event.id, selection);
        }
    }

    /// Record a named command and claim its raw event.
    pub fn command_invoked(&mut self, invocation: &CommandInvocation) {
        let input = invocation.input.as_ref();
        let trigger = input.and_then(classifier::trigger_source);
        // Claim before the namespace check so the tracker's own shortcut
        // is not logged by the fallback pass either. Events the fallback
        // pass never records are not claimed.
        if let (Some(event), Some(_)) = (input, &trigger) {
            self.ledgers.dedup.mark(event.id);
        }

        if is_own_command(invocation, &self.own_command_prefix) {
            trace!(command = ?invocation.command_id, "ignoring own command");
            return;
        }

        let label = resolve_command_label(invocation, &self.known_labels);
        debug!(%label, event = ?input.map(|e| e.id.0), "command invoked");
        self.append(ActionData::command(label, trigger), input.map(|e| e.id));
    }

    /// Record raw input the host finished processing, unless a command claimed it.
    pub fn after_dispatch(&mut self, event: &RawInputEvent) {
        if matches!(event.kind, InputKind::Other) {
            return;
        }

        if self.ledgers.dedup.take(event.id) {
            trace!(event = event.id.0, "already recorded as command");
            return;
        }

        if event.key_press().is_some() {
            if classifier::is_modifier_only(event) {
                return;
            }
            if !self.dispatch.key_dispatch_ready() {
                debug!(event = event.id.0, "key dispatcher not ready, dropping event");
                return;
            }
        }

        if let Some(action) = classifier::classify(event) {
            self.append(action, Some(event.id));
        }
    }

    fn append(&mut self, data: ActionData, source: Option<EventId>) {
        let data = match source.and_then(|id| self.ledgers.context.take(id)) {
            Some(selection) => data.with_selection(selection),
            None => data,
        };
        let now = self.clock.now_ms();
        trace!(session = %self.session.id, record = %data, "record appended");
        self.session.add_record(now, data);
    }
}

impl InputObserver for ActionTracker {
    fn before_dispatch(&mut self, event: &RawInputEvent) {
        ActionTracker::before_dispatch(self, event);
    }

    fn command_invoked(&mut self, invocation: &CommandInvocation) {
        ActionTracker::command_invoked(self, invocation);
    }

    fn after_dispatch(&mut self, event: &RawInputEvent) {
        ActionTracker::after_dispatch(self, event);
    }
}
