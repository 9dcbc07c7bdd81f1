//! Start/stop lifecycle of a tracking session on top of an [`EventHost`].

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::config::TrackerConfig;
use crate::error::{ExportError, TrackingError};
use crate::export::{self, transcript};
use crate::host::{EventHost, Hook, SharedObserver, Subscription};
use crate::recorder::clock::{Clock, SystemClock};
use crate::recorder::pipeline::{ActionTracker, AlwaysReady, DispatchProbe};
use crate::recorder::selection::{NoSelection, SelectionResolver};
use crate::recorder::session::Session;
use crate::recorder::state::{TrackerAction, TrackerState};

/// What a finished session leaves behind.
#[derive(Debug, Clone)]
pub struct TrackingReport {
    pub transcript: String,
    pub started_at: DateTime<Local>,
    pub default_file_name: String,
    pub record_count: usize,
}

struct ActiveTracking {
    tracker: Rc<RefCell<ActionTracker>>,
    subscriptions: Vec<Subscription>,
}

pub struct TrackingService<H: EventHost> {
    host: H,
    config: TrackerConfig,
    resolver: Rc<dyn SelectionResolver>,
    dispatch: Rc<dyn DispatchProbe>,
    clock: Rc<dyn Clock>,
    state: TrackerState,
    active: Option<ActiveTracking>,
}

impl<H: EventHost> TrackingService<H> {
    pub fn new(host: H, config: TrackerConfig) -> Self {
        Self {
            host,
            config,
            resolver: Rc::new(NoSelection),
            dispatch: Rc::new(AlwaysReady),
            clock: Rc::new(SystemClock),
            state: TrackerState::new(),
            active: None,
        }
    }

    pub fn with_resolver(mut self, resolver: Rc<dyn SelectionResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_clock(mut self, clock: Rc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_dispatch_probe(mut self, dispatch: Rc<dyn DispatchProbe>) -> Self {
        self.dispatch = dispatch;
        self
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn is_tracking(&self) -> bool {
        self.state.is_tracking()
    }

    /// Records of the running session, if any.
    pub fn record_count(&self) -> Option<usize> {
        self.active
            .as_ref()
            .map(|active| active.tracker.borrow().session().len())
    }

    /// Begin a new session and attach it to all three host hooks.
    pub fn start(&mut self) -> Result<(), TrackingError> {
        self.state.start()?;

        let tracker = Rc::new(RefCell::new(ActionTracker::new(
            &self.config,
            Rc::clone(&self.resolver),
            Rc::clone(&self.dispatch),
            Rc::clone(&self.clock),
        )));
        let observer: SharedObserver = tracker.clone();
        let subscriptions = Hook::ALL
            .iter()
            .map(|hook| self.host.subscribe(*hook, Rc::clone(&observer)))
            .collect();

        info!(session = %tracker.borrow().session().id, "tracking started");
        self.active = Some(ActiveTracking {
            tracker,
            subscriptions,
        });
        Ok(())
    }

    /// Detach from the host and render the finished session.
    pub fn stop(&mut self) -> Result<TrackingReport, TrackingError> {
        let Some(active) = self.active.take() else {
            return Err(TrackingError::InvalidTransition {
                from: self.state.current(),
                action: TrackerAction::Stop,
            });
        };
        self.state.stop()?;

        for subscription in active.subscriptions {
            self.host.unsubscribe(subscription);
        }
        let session = match Rc::try_unwrap(active.tracker) {
            Ok(tracker) => tracker.into_inner().finish(),
            Err(shared) => {
                warn!("host still holds the tracker after unsubscribe");
                let session = shared.borrow().session().clone();
                drop(shared);
                session
            }
        };

        let report = self.report(&session);
        info!(session = %session.id, records = report.record_count, "tracking stopped");
        Ok(report)
    }

    /// Start when idle, stop when tracking.
    pub fn toggle(&mut self) -> Result<Option<TrackingReport>, TrackingError> {
        if self.is_tracking() {
            self.stop().map(Some)
        } else {
            self.start().map(|()| None)
        }
    }

    /// Append the configured marker; `false` when no session is running.
    pub fn insert_marker(&mut self) -> bool {
        match &self.active {
            Some(active) => {
                active.tracker.borrow_mut().insert_marker();
                true
            }
            None => false,
        }
    }

    /// Save a report into the configured output folder.
    pub fn save(&self, report: &TrackingReport) -> Result<PathBuf, ExportError> {
        export::save_report(report, &self.config)
    }

    fn report(&self, session: &Session) -> TrackingReport {
        let start_text = transcript::start_time_text(session, &Local);
        TrackingReport {
            transcript: transcript::build(session),
            started_at: transcript::at(session.started_at_ms, &Local),
            default_file_name: transcript::default_file_name(
                &self.config.product_name,
                &start_text,
            ),
            record_count: session.len(),
        }
    }
}

impl<H: EventHost> Drop for TrackingService<H> {
    fn drop(&mut self) {
        if let Some(active) = self.active.take() {
            for subscription in active.subscriptions {
                self.host.unsubscribe(subscription);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ManualDispatcher;
    use crate::recorder::clock::ManualClock;
    use crate::recorder::input_event::{CommandInvocation, RawInputEvent};
    use crate::recorder::state::SessionState;

    fn service() -> (TrackingService<ManualDispatcher>, ManualClock) {
        let clock = ManualClock::new(1_792_418_703_007);
        let config = TrackerConfig {
            product_name: "My IDE".to_string(),
            ..TrackerConfig::default()
        };
        let service = TrackingService::new(ManualDispatcher::new(), config)
            .with_clock(Rc::new(clock.clone()));
        (service, clock)
    }

    #[test]
    fn start_subscribes_all_hooks() {
        let (mut service, _) = service();
        service.start().expect("start");
        assert!(service.is_tracking());
        assert_eq!(service.host().observer_count(), 3);
    }

    #[test]
    fn start_twice_is_rejected() {
        let (mut service, _) = service();
        service.start().expect("start");
        assert_eq!(
            service.start(),
            Err(TrackingError::InvalidTransition {
                from: SessionState::Tracking,
                action: TrackerAction::Start,
            })
        );
        assert_eq!(service.host().observer_count(), 3);
    }

    #[test]
    fn stop_while_idle_is_rejected() {
        let (mut service, _) = service();
        assert_eq!(
            service.stop().map(|_| ()),
            Err(TrackingError::InvalidTransition {
                from: SessionState::Idle,
                action: TrackerAction::Stop,
            })
        );
        assert!(!service.is_tracking());
    }

    #[test]
    fn stop_returns_to_idle() {
        let (mut service, _) = service();
        service.start().expect("start");
        service.stop().expect("stop");
        assert_eq!(service.state.current(), SessionState::Idle);
        assert!(service.stop().is_err());
    }

    #[test]
    fn stop_detaches_and_reports() {
        let (mut service, clock) = service();
        service.start().expect("start");
        clock.advance(500);
        service.host().dispatch_input(&RawInputEvent::char_key('a'));
        service
            .host()
            .dispatch_command(RawInputEvent::char_key('s'), CommandInvocation::new("SaveAll"));

        let report = service.stop().expect("stop");
        assert_eq!(service.host().observer_count(), 0);
        assert_eq!(report.record_count, 2);
        assert_eq!(report.transcript.lines().count(), 3);
        assert!(report.default_file_name.starts_with("My_IDE_action_tracker_"));
        assert!(report.default_file_name.ends_with(".txt"));

        service.host().dispatch_input(&RawInputEvent::char_key('b'));
        assert_eq!(service.record_count(), None);
    }

    #[test]
    fn toggle_alternates() {
        let (mut service, _) = service();
        assert!(service.toggle().expect("start").is_none());
        assert!(service.toggle().expect("stop").is_some());
        assert!(!service.is_tracking());
        assert!(service.toggle().expect("restart").is_none());
        assert!(service.is_tracking());
    }

    #[test]
    fn marker_needs_running_session() {
        let (mut service, _) = service();
        assert!(!service.insert_marker());

        service.start().expect("start");
        assert!(service.insert_marker());
        let report = service.stop().expect("stop");
        assert!(report.transcript.ends_with(": >>> Next Task <<<"));
    }
}
