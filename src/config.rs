use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::ConfigError;
use crate::recorder::ledger::DEFAULT_CAPACITY;

pub const DEFAULT_COMMAND_PREFIX: &str = "action.tracker.";
pub const DEFAULT_MARKER_LABEL: &str = "Next Task";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Entries each ledger holds before it is cleared.
    pub ledger_capacity: usize,
    /// Commands whose id starts with this prefix belong to the tracker itself.
    pub own_command_prefix: String,
    pub marker_label: String,
    /// Product name used as the transcript file name prefix.
    pub product_name: String,
    /// Where transcripts are saved; the home directory when unset.
    pub output_dir: Option<PathBuf>,
    /// Labels for command implementations that present no text of their own.
    pub known_labels: HashMap<String, String>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            ledger_capacity: DEFAULT_CAPACITY,
            own_command_prefix: DEFAULT_COMMAND_PREFIX.to_string(),
            marker_label: DEFAULT_MARKER_LABEL.to_string(),
            product_name: "Application".to_string(),
            output_dir: None,
            known_labels: HashMap::new(),
        }
    }
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("action-tracker").join("config.json"))
}

/// Load the user config, falling back to defaults when missing or broken.
pub fn load() -> TrackerConfig {
    match config_path() {
        Some(path) => load_or_default(&path),
        None => TrackerConfig::default(),
    }
}

pub fn load_or_default(path: &Path) -> TrackerConfig {
    if !path.exists() {
        return TrackerConfig::default();
    }
    match load_from(path) {
        Ok(config) => config,
        Err(err) => {
            warn!(path = %path.display(), "ignoring tracker config: {err}");
            TrackerConfig::default()
        }
    }
}

pub fn load_from(path: &Path) -> Result<TrackerConfig, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

pub fn save(config: &TrackerConfig) -> Result<PathBuf, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(&path, config)?;
    Ok(path)
}

pub fn save_to(path: &Path, config: &TrackerConfig) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_tracker_conventions() {
        let config = TrackerConfig::default();
        assert_eq!(config.ledger_capacity, 100);
        assert_eq!(config.own_command_prefix, "action.tracker.");
        assert_eq!(config.marker_label, "Next Task");
        assert!(config.known_labels.is_empty());
    }

    #[test]
    fn save_load_roundtrip() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("nested").join("config.json");

        let config = TrackerConfig {
            ledger_capacity: 10,
            product_name: "My IDE".to_string(),
            output_dir: Some(dir.path().to_path_buf()),
            known_labels: HashMap::from([(
                "ui.DialogPeer$CancelAction".to_string(),
                "Cancel".to_string(),
            )]),
            ..TrackerConfig::default()
        };
        save_to(&path, &config).expect("save");

        let loaded = load_from(&path).expect("load");
        assert_eq!(loaded, config);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let json = r#"{"product_name": "Editor"}"#;
        let config: TrackerConfig = serde_json::from_str(json).expect("deserialize");
        assert_eq!(config.product_name, "Editor");
        assert_eq!(config.ledger_capacity, 100);
        assert!(config.output_dir.is_none());
    }

    #[test]
    fn broken_json_is_parse_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").expect("write");
        assert!(matches!(load_from(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = load_or_default(&dir.path().join("config.json"));
        assert_eq!(config, TrackerConfig::default());
    }

    #[test]
    fn broken_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ \"ledger_capacity\": \"many\" }").expect("write");
        assert_eq!(load_or_default(&path), TrackerConfig::default());
    }

    #[test]
    fn valid_file_is_loaded() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"marker_label": "Step"}"#).expect("write");
        assert_eq!(load_or_default(&path).marker_label, "Step");
    }

    #[test]
    fn config_lives_under_app_folder() {
        if let Some(path) = config_path() {
            assert!(path.ends_with("action-tracker/config.json"));
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("nonexistent.json");
        assert!(matches!(load_from(&path), Err(ConfigError::Io(_))));
    }
}
