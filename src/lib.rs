//! Records what a user does in a host application as a human-readable
//! transcript, merging raw input with the commands it triggers.

pub mod config;
pub mod error;
pub mod export;
pub mod host;
pub mod recorder;
pub mod service;

pub use config::TrackerConfig;
pub use error::{ConfigError, ExportError, TrackingError};
pub use host::{EventHost, Hook, InputObserver, ManualDispatcher, Subscription};
pub use recorder::pipeline::ActionTracker;
pub use recorder::types::{ActionData, Record};
pub use service::{TrackingReport, TrackingService};

use tracing_subscriber::EnvFilter;

/// Install a `tracing` subscriber honoring `RUST_LOG`.
///
/// Does nothing when the host already installed one.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("action_tracker=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
