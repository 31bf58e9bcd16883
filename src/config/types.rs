//! Configuration type definitions.

use crate::constants::{
    DEFAULT_THRESHOLD, DEFAULT_TIMEZONE, NO_CALL_LABELS, NON_SPECIES_PREFIXES, api,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Per-species threshold settings.
    #[serde(default)]
    pub thresholds: ThresholdsConfig,

    /// Detection filtering settings.
    #[serde(default)]
    pub filter: FilterConfig,

    /// Classifier backend settings.
    #[serde(default)]
    pub source: SourceConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,
}

/// Threshold source settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdsConfig {
    /// CSV file with `species,threshold` rows.
    pub path: Option<PathBuf>,

    /// Threshold for species missing from the file.
    pub default: f32,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            path: None,
            default: DEFAULT_THRESHOLD,
        }
    }
}

/// Detection filtering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Labels of the no-call and noise classes used for the veto rule.
    pub no_call_labels: Vec<String>,

    /// Label prefixes removed when non-species hiding is enabled.
    pub non_species_prefixes: Vec<String>,

    /// Hide non-species classes from the output by default.
    pub hide_non_species: bool,

    /// IANA time zone of the sensor.
    pub timezone: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            no_call_labels: NO_CALL_LABELS.iter().map(ToString::to_string).collect(),
            non_species_prefixes: NON_SPECIES_PREFIXES
                .iter()
                .map(ToString::to_string)
                .collect(),
            hide_non_species: false,
            timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

/// Classifier backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Base URL of the backend API, e.g. `http://10.0.0.5:5001/api`.
    pub api_base: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            api_base: None,
            timeout_secs: api::DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format.
    pub format: OutputFormat,

    /// Prepend a UTF-8 BOM to CSV output.
    pub csv_bom: bool,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned human-readable table.
    #[default]
    Table,
    /// CSV rows.
    Csv,
    /// JSON document with summary.
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Csv => write!(f, "csv"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Ok(Self::Table),
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}
