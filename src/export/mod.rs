pub mod transcript;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::TrackerConfig;
use crate::error::ExportError;
use crate::service::TrackingReport;

/// Folder transcripts go to when none is configured.
pub fn default_output_dir() -> Option<PathBuf> {
    dirs::home_dir()
}

/// The configured output folder, else the home directory.
pub fn output_dir(config: &TrackerConfig) -> Option<PathBuf> {
    config.output_dir.clone().or_else(default_output_dir)
}

fn write_error(e: std::io::Error, dir: &Path, path: &Path) -> ExportError {
    match e.kind() {
        ErrorKind::PermissionDenied => ExportError::NotWritable {
            folder: dir.display().to_string(),
            reason: "permission denied".to_string(),
        },
        ErrorKind::NotFound => ExportError::MissingFolder(dir.display().to_string()),
        _ => ExportError::Write {
            message: format!("Could not save \"{}\": {e}", path.display()),
            source: e,
        },
    }
}

/// Write the transcript as UTF-8 text into `dir`, named after the session start.
pub fn save_transcript(report: &TrackingReport, dir: &Path) -> Result<PathBuf, ExportError> {
    if report.default_file_name.is_empty() {
        return Err(ExportError::EmptyFileName);
    }
    if !dir.is_dir() {
        return Err(ExportError::MissingFolder(dir.display().to_string()));
    }

    let path = dir.join(&report.default_file_name);
    std::fs::write(&path, &report.transcript).map_err(|e| write_error(e, dir, &path))?;
    info!(path = %path.display(), records = report.record_count, "transcript saved");
    Ok(path)
}

/// Save into the folder the config points at.
pub fn save_report(
    report: &TrackingReport,
    config: &TrackerConfig,
) -> Result<PathBuf, ExportError> {
    let dir = output_dir(config).ok_or(ExportError::NoOutputDir)?;
    save_transcript(report, &dir)
}
