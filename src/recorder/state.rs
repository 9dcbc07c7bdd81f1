use crate::error::TrackingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Tracking,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerAction {
    Start,
    Stop,
}

pub struct TrackerState {
    state: SessionState,
}

impl TrackerState {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
        }
    }

    pub fn current(&self) -> SessionState {
        self.state
    }

    pub fn is_tracking(&self) -> bool {
        self.state == SessionState::Tracking
    }

    fn transition(
        &mut self,
        allowed: &[SessionState],
        to: SessionState,
        action: TrackerAction,
    ) -> Result<(), TrackingError> {
        if allowed.contains(&self.state) {
            self.state = to;
            Ok(())
        } else {
            Err(TrackingError::InvalidTransition {
                from: self.state,
                action,
            })
        }
    }

    pub fn start(&mut self) -> Result<(), TrackingError> {
        self.transition(
            &[SessionState::Idle],
            SessionState::Tracking,
            TrackerAction::Start,
        )
    }

    pub fn stop(&mut self) -> Result<(), TrackingError> {
        self.transition(
            &[SessionState::Tracking],
            SessionState::Idle,
            TrackerAction::Stop,
        )
    }
}

impl Default for TrackerState {
    fn default() -> Self {
        Self::new()
    }
}
