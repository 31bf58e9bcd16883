//! Platform-specific configuration paths.

use crate::constants::APP_NAME;
use crate::error::{Error, Result};
use directories::ProjectDirs;
use std::path::PathBuf;

/// File name of the per-species threshold table inside the config directory.
const THRESHOLDS_FILE_NAME: &str = "species_confidence.csv";

/// Get the configuration directory for the current platform.
///
/// - Linux: `~/.config/birda-monitor/`
/// - macOS: `~/Library/Application Support/birda-monitor/`
/// - Windows: `%APPDATA%\birda-monitor\`
pub fn config_dir() -> Result<PathBuf> {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or(Error::ConfigDirNotFound)
}

/// Get the full path to the config file.
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Threshold table used when neither the CLI nor the config names one.
pub fn default_thresholds_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(THRESHOLDS_FILE_NAME))
}
