//! Error types for birda-monitor.

/// Result type alias for birda-monitor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for birda-monitor.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Threshold file does not exist.
    #[error("threshold file not found: {path}")]
    ThresholdsMissing {
        /// Path to the threshold file.
        path: std::path::PathBuf,
    },

    /// Threshold file exists but could not be read.
    #[error("failed to read threshold file '{path}'")]
    ThresholdsRead {
        /// Path to the threshold file.
        path: std::path::PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// A detection record lacks a required field or carries an unusable value.
    #[error("malformed detection record #{index}: {reason}")]
    MalformedRecord {
        /// Position of the record in the source sequence.
        index: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// Failed to read a detections file.
    #[error("failed to read detections file '{path}'")]
    DetectionsRead {
        /// Path to the detections file.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Detections payload is not valid JSON.
    #[error("failed to parse detections from {origin}")]
    DetectionsParse {
        /// File path or URL the payload came from.
        origin: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// System metrics payload could not be decoded.
    #[error("failed to parse system metrics from {origin}")]
    MetricsParse {
        /// URL the payload came from.
        origin: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// HTTP request to the classifier backend failed.
    #[error("request to '{url}' failed")]
    Fetch {
        /// Requested URL.
        url: String,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// No detection source was configured.
    #[error("no detection source: pass --input <FILE> or set an API base URL")]
    NoDetectionSource,

    /// A command needs the sensor API but no base URL is configured.
    #[error("no sensor API configured: pass --api-base <URL> or set [source] api_base")]
    ApiBaseMissing,

    /// Time zone name is not recognised.
    #[error("invalid time zone '{name}': {reason}")]
    InvalidTimezone {
        /// The rejected name.
        name: String,
        /// Parser message.
        reason: String,
    },

    /// Threshold override argument could not be parsed.
    #[error("invalid threshold override '{value}': expected SPECIES=THRESHOLD")]
    InvalidOverride {
        /// The rejected argument.
        value: String,
    },

    /// Failed to write CSV output.
    #[error("failed to write CSV output")]
    CsvWrite(#[from] csv::Error),

    /// Failed to serialize JSON output.
    #[error("failed to serialize JSON output")]
    JsonWrite(#[source] serde_json::Error),

    /// Internal error.
    #[error("internal error: {message}")]
    Internal {
        /// Error description.
        message: String,
    },
}
