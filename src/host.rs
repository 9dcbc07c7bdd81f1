//! Seams between the tracker and the host's event facilities.
//!
//! Everything here runs on the host's single dispatch thread, hence `Rc` and
//! `RefCell` rather than locks.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::trace;

use crate::recorder::input_event::{CommandInvocation, RawInputEvent};

/// Receives the three observation points of a gesture.
pub trait InputObserver {
    fn before_dispatch(&mut self, event: &RawInputEvent);
    fn command_invoked(&mut self, invocation: &CommandInvocation);
    fn after_dispatch(&mut self, event: &RawInputEvent);
}

pub type SharedObserver = Rc<RefCell<dyn InputObserver>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    /// Before the host routes a raw event anywhere.
    PreDispatch,
    /// When the host recognizes a gesture as a named command.
    CommandInvocation,
    /// After the host fully processed a raw event.
    PostDispatch,
}

impl Hook {
    pub const ALL: [Hook; 3] = [Hook::PreDispatch, Hook::CommandInvocation, Hook::PostDispatch];
}

/// Handle returned by [`EventHost::subscribe`]; give it back to unsubscribe.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct Subscription {
    id: u64,
    hook: Hook,
}

impl Subscription {
    pub fn new(id: u64, hook: Hook) -> Self {
        Self { id, hook }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn hook(&self) -> Hook {
        self.hook
    }
}

/// Registration surface of a host that delivers input and command events.
///
/// After `unsubscribe` returns the observer must not be called again.
pub trait EventHost {
    fn subscribe(&mut self, hook: Hook, observer: SharedObserver) -> Subscription;
    fn unsubscribe(&mut self, subscription: Subscription);
}

/// Host that forwards gestures it is handed, in hook order.
///
/// For hosts that own their dispatch loop and call into the tracker
/// explicitly.
#[derive(Default)]
pub struct ManualDispatcher {
    next_id: u64,
    observers: Vec<(Subscription, SharedObserver)>,
}

impl ManualDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    fn observers_for(&self, hook: Hook) -> Vec<SharedObserver> {
        self.observers
            .iter()
            .filter(|(sub, _)| sub.hook == hook)
            .map(|(_, observer)| Rc::clone(observer))
            .collect()
    }

    /// Deliver one gesture: pre-dispatch, the command it maps to (if any),
    /// then post-dispatch.
    pub fn dispatch(&self, event: &RawInputEvent, command: Option<&CommandInvocation>) {
        for observer in self.observers_for(Hook::PreDispatch) {
            observer.borrow_mut().before_dispatch(event);
        }
        if let Some(invocation) = command {
            self.invoke_command(invocation);
        }
        for observer in self.observers_for(Hook::PostDispatch) {
            observer.borrow_mut().after_dispatch(event);
        }
    }

    /// Deliver a gesture the host did not map to any command.
    pub fn dispatch_input(&self, event: &RawInputEvent) {
        self.dispatch(event, None);
    }

    /// Deliver a command, with the raw event attached as its trigger.
    pub fn dispatch_command(&self, event: RawInputEvent, invocation: CommandInvocation) {
        let invocation = invocation.with_input(event.clone());
        self.dispatch(&event, Some(&invocation));
    }

    /// Deliver a command that was not fired by raw input (toolbar, API).
    pub fn invoke_command(&self, invocation: &CommandInvocation) {
        for observer in self.observers_for(Hook::CommandInvocation) {
            observer.borrow_mut().command_invoked(invocation);
        }
    }
}

impl EventHost for ManualDispatcher {
    fn subscribe(&mut self, hook: Hook, observer: SharedObserver) -> Subscription {
        self.next_id += 1;
        trace!(id = self.next_id, ?hook, "observer subscribed");
        self.observers.push((Subscription::new(self.next_id, hook), observer));
        Subscription::new(self.next_id, hook)
    }

    fn unsubscribe(&mut self, subscription: Subscription) {
        trace!(id = subscription.id, hook = ?subscription.hook, "observer unsubscribed");
        self.observers.retain(|(sub, _)| *sub != subscription);
    }
}
