//! Detection type definitions.

use crate::filter::ConfidenceLevel;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Anything carrying a classifier species label.
pub trait HasSpecies {
    /// The raw species label, e.g. `Turdus merula_Eurasian Blackbird`.
    fn species(&self) -> &str;
}

/// A single classifier output for one audio segment.
///
/// Positions are always expressed as an offset into the clip named by
/// `timestamp`; legacy `start_time` payloads are converted when parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionRecord {
    /// Species label as emitted by the classifier.
    pub species: String,
    /// Raw classifier confidence (0.0 - 1.0).
    pub confidence: f32,
    /// Epoch seconds of the source clip; also its file name on the sensor.
    pub timestamp: i64,
    /// Seconds from the start of the clip to the detected segment.
    pub offset: f64,
    /// Segment length in seconds, when the source reports it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl DetectionRecord {
    /// Absolute event time in whole epoch seconds.
    ///
    /// This is the grouping key: every record sharing it came out of the
    /// same classification pass.
    #[allow(clippy::cast_possible_truncation)]
    pub fn event_time(&self) -> i64 {
        self.timestamp.saturating_add(self.offset.floor() as i64)
    }

    /// Split the label into `(scientific, common)` names.
    ///
    /// Labels are formatted as `ScientificName_CommonName`; a label without
    /// an underscore is used for both.
    pub fn names(&self) -> (&str, &str) {
        self.species
            .split_once('_')
            .map_or((self.species.as_str(), self.species.as_str()), |(sci, common)| {
                (sci, common)
            })
    }
}

impl HasSpecies for DetectionRecord {
    fn species(&self) -> &str {
        &self.species
    }
}

/// A detection that passed filtering, annotated for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredDetection {
    /// The underlying classifier record.
    #[serde(flatten)]
    pub record: DetectionRecord,
    /// Absolute event time in epoch seconds.
    pub event_time: i64,
    /// Event time in the sensor's local time zone.
    pub local_time: NaiveDateTime,
    /// Threshold the record was judged against.
    pub threshold: f32,
    /// Quality band of the confidence relative to the threshold.
    pub confidence_level: ConfidenceLevel,
}

impl FilteredDetection {
    /// Local calendar date of the event.
    pub fn date(&self) -> NaiveDate {
        self.local_time.date()
    }

    /// Local wall-clock time of the event.
    pub fn time(&self) -> NaiveTime {
        self.local_time.time()
    }
}

impl HasSpecies for FilteredDetection {
    fn species(&self) -> &str {
        &self.record.species
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(timestamp: i64, offset: f64) -> DetectionRecord {
        DetectionRecord {
            species: "Parus major_Great Tit".to_string(),
            confidence: 0.8,
            timestamp,
            offset,
            duration: None,
        }
    }

    #[test]
    fn test_event_time_adds_whole_offset_seconds() {
        assert_eq!(record(1_700_000_000, 0.0).event_time(), 1_700_000_000);
        assert_eq!(record(1_700_000_000, 3.0).event_time(), 1_700_000_003);
        assert_eq!(record(1_700_000_000, 4.9).event_time(), 1_700_000_004);
    }

    #[test]
    fn test_names_split_on_first_underscore() {
        let r = record(0, 0.0);
        assert_eq!(r.names(), ("Parus major", "Great Tit"));
    }

    #[test]
    fn test_names_without_underscore() {
        let mut r = record(0, 0.0);
        r.species = "Unknown".to_string();
        assert_eq!(r.names(), ("Unknown", "Unknown"));
    }

    #[test]
    fn test_noise_label_has_empty_common_name() {
        let mut r = record(0, 0.0);
        r.species = "None_".to_string();
        assert_eq!(r.names(), ("None", ""));
    }
}
