//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "birda-monitor";

/// Threshold applied to species without an explicit entry.
pub const DEFAULT_THRESHOLD: f32 = 0.2;

/// Labels the classifier emits when a segment holds no biological signal
/// or a specific noise source.
pub const NO_CALL_LABELS: &[&str] = &["None_", "Wind_", "Rain_", "Insect_", "Vegetation_"];

/// Species label prefixes that mark non-biological noise classes.
pub const NON_SPECIES_PREFIXES: &[&str] = &["None_", "Wind_", "Rain_", "Insect_", "Vegetation_"];

/// Time zone the sensor reports local times in.
pub const DEFAULT_TIMEZONE: &str = "Europe/Rome";

/// Confidence banding boundaries, as percent deviation from the threshold.
pub mod bands {
    /// At or below this deviation a detection is `very_low`.
    pub const VERY_LOW_MAX: f32 = -15.0;
    /// At or below this deviation a detection is `low`.
    pub const LOW_MAX: f32 = -5.0;
    /// At or below this deviation a detection is `medium`.
    pub const MEDIUM_MAX: f32 = 5.0;
    /// At or below this deviation a detection is `high`; above it `very_high`.
    pub const HIGH_MAX: f32 = 15.0;
    /// Tolerance applied at band boundaries to absorb f32 rounding
    /// (0.23 vs 0.20 lands a hair above +15%).
    pub const EPSILON: f32 = 1e-3;
}

/// Confidence value bounds.
pub mod confidence {
    /// Minimum valid confidence value.
    pub const MIN: f32 = 0.0;
    /// Maximum valid confidence value.
    pub const MAX: f32 = 1.0;
    /// Decimal places for confidence and threshold formatting.
    pub const DECIMAL_PLACES: usize = 3;
}

/// Classifier backend API constants.
pub mod api {
    /// Detections endpoint, relative to the API base.
    pub const CLASSIFICATIONS_PATH: &str = "/birds/classifications";
    /// Health metrics endpoint, relative to the API base.
    pub const SYSTEM_METRICS_PATH: &str = "/system_metrics";
    /// Query parameter carrying the window start (epoch seconds).
    pub const SINCE_PARAM: &str = "since";
    /// Default request timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 5;
}

/// UTF-8 Byte Order Mark for Excel compatibility in CSV files.
pub const UTF8_BOM: &[u8; 3] = b"\xEF\xBB\xBF";
