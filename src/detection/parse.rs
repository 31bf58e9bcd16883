//! Conversion of raw backend payloads into detection records.
//!
//! The backend has shipped two position conventions: `timestamp` + `offset`
//! and `timestamp` + `start_time`/`duration` with an absolute `start_time`.
//! Both are normalized here to the offset form
//! (`offset = start_time - timestamp`) so the filter engine only sees one.

use super::DetectionRecord;
use crate::constants::confidence;
use crate::error::{Error, Result};
use crate::utils::time::to_local;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

/// Record shape accepted from the backend, every field optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawDetection {
    species: Option<String>,
    confidence: Option<f64>,
    timestamp: Option<f64>,
    offset: Option<f64>,
    start_time: Option<f64>,
    duration: Option<f64>,
}

/// Parse every payload element, excluding malformed ones.
///
/// A malformed element is logged and skipped; it never aborts the batch.
pub fn parse_records(values: &[Value]) -> Vec<DetectionRecord> {
    let mut records = Vec::with_capacity(values.len());
    let mut rejected = 0usize;

    for (index, value) in values.iter().enumerate() {
        match parse_record(index, value) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!("Skipping record: {e}");
                rejected += 1;
            }
        }
    }

    if rejected > 0 {
        warn!(
            "{rejected} of {} detection record(s) were malformed",
            values.len()
        );
    }
    debug!("Parsed {} detection record(s)", records.len());

    records
}

/// Parse a single payload element.
pub fn parse_record(index: usize, value: &Value) -> Result<DetectionRecord> {
    let malformed = |reason: String| Error::MalformedRecord { index, reason };

    let raw = RawDetection::deserialize(value).map_err(|e| malformed(e.to_string()))?;

    let species = raw
        .species
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| malformed("missing species".to_string()))?;

    let confidence = raw
        .confidence
        .filter(|c| c.is_finite())
        .ok_or_else(|| malformed("missing or non-finite confidence".to_string()))?;
    if !(f64::from(confidence::MIN)..=f64::from(confidence::MAX)).contains(&confidence) {
        return Err(malformed(format!("confidence {confidence} outside 0..1")));
    }

    let timestamp = raw
        .timestamp
        .or(raw.start_time)
        .ok_or_else(|| malformed("missing time fields".to_string()))?;
    let timestamp =
        whole_seconds(timestamp).ok_or_else(|| malformed("timestamp out of range".to_string()))?;

    #[allow(clippy::cast_precision_loss)]
    let offset = match (raw.offset, raw.start_time) {
        (Some(offset), _) => offset,
        (None, Some(start)) => start - timestamp as f64,
        (None, None) => return Err(malformed("missing offset or start_time".to_string())),
    };
    if !offset.is_finite() || offset < 0.0 {
        return Err(malformed(format!("invalid clip offset {offset}")));
    }

    #[allow(clippy::cast_possible_truncation)]
    let record = DetectionRecord {
        species,
        confidence: confidence as f32,
        timestamp,
        offset,
        duration: raw.duration.filter(|d| d.is_finite() && *d >= 0.0),
    };

    if to_local(record.event_time(), chrono_tz::UTC).is_none() {
        return Err(malformed(format!(
            "event time {} not representable",
            record.event_time()
        )));
    }

    Ok(record)
}

/// Truncate a JSON number to whole epoch seconds.
#[allow(clippy::cast_possible_truncation)]
fn whole_seconds(value: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up, so compare strictly below it
    #[allow(clippy::cast_precision_loss)]
    let limit = i64::MAX as f64;
    (value.is_finite() && value.abs() < limit).then(|| value.floor() as i64)
}
