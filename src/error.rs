use thiserror::Error;

use crate::recorder::state::{SessionState, TrackerAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TrackingError {
    #[error("cannot {action:?} tracking while {from:?}")]
    InvalidTransition {
        from: SessionState,
        action: TrackerAction,
    },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("The report has no file name.")]
    EmptyFileName,
    #[error("No output folder configured and no home directory found.")]
    NoOutputDir,
    #[error("The folder \"{0}\" does not exist.")]
    MissingFolder(String),
    #[error("Cannot write to folder \"{folder}\": {reason}")]
    NotWritable { folder: String, reason: String },
    #[error("{message}")]
    Write {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config dir not found")]
    NoConfigDir,
}
