//! Output type definitions.

use crate::detection::FilteredDetection;
use crate::filter::ConfidenceLevel;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Quick statistics over a filtered detection set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetectionSummary {
    /// Number of detections.
    pub total_detections: usize,
    /// Number of distinct species labels.
    pub unique_species: usize,
    /// Local time of the most recent detection.
    pub latest_detection: Option<NaiveDateTime>,
    /// Detections per confidence level.
    pub by_level: BTreeMap<ConfidenceLevel, usize>,
}

impl DetectionSummary {
    /// Summarize detections already sorted most recent first.
    pub fn from_detections(detections: &[FilteredDetection]) -> Self {
        let unique_species: HashSet<&str> = detections
            .iter()
            .map(|d| d.record.species.as_str())
            .collect();

        let mut by_level = BTreeMap::new();
        for d in detections {
            *by_level.entry(d.confidence_level).or_insert(0) += 1;
        }

        Self {
            total_detections: detections.len(),
            unique_species: unique_species.len(),
            latest_detection: detections
                .iter()
                .max_by_key(|d| d.event_time)
                .map(|d| d.local_time),
            by_level,
        }
    }
}

/// Species label as shown to operators: `Genus species - Common Name`.
pub fn display_species(species: &str) -> String {
    species.replace('_', " - ")
}
