//! CLI argument validators.
//!
//! Value parsers handed to clap; they return `String` errors so clap can
//! render them next to the offending flag.

use crate::constants::confidence;
use chrono::NaiveDate;

/// Parse and validate a threshold value (greater than 0.0, at most 1.0).
pub fn parse_threshold(s: &str) -> Result<f32, String> {
    let value: f32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !(value > confidence::MIN && value <= confidence::MAX) {
        return Err(format!(
            "threshold must be greater than {} and at most {}, got {value}",
            confidence::MIN,
            confidence::MAX
        ));
    }

    Ok(value)
}

/// Parse a `SPECIES=THRESHOLD` override.
pub fn parse_threshold_override(s: &str) -> Result<(String, f32), String> {
    crate::thresholds::parse_override(s).map_err(|e| e.to_string())
}

/// Parse a calendar date in `YYYY-MM-DD` form.
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("'{s}' is not a valid date (expected YYYY-MM-DD)"))
}
