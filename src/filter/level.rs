//! Confidence quality banding.

use crate::constants::{DEFAULT_THRESHOLD, bands};
use crate::thresholds::ThresholdMap;
use serde::{Deserialize, Serialize};

/// How far a confidence sits above or below its species threshold.
///
/// Purely descriptive: the band never decides whether a detection is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    /// 15% or more below the threshold.
    VeryLow,
    /// Between 15% and 5% below the threshold.
    Low,
    /// Within 5% of the threshold.
    Medium,
    /// Between 5% and 15% above the threshold.
    High,
    /// More than 15% above the threshold.
    VeryHigh,
}

impl ConfidenceLevel {
    /// All levels, lowest first.
    pub const ALL: [Self; 5] = [
        Self::VeryLow,
        Self::Low,
        Self::Medium,
        Self::High,
        Self::VeryHigh,
    ];

    /// Stable identifier used in tables and exports.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VeryLow => "very_low",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::VeryHigh => "very_high",
        }
    }
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Percent deviation of `confidence` from `threshold`.
///
/// A threshold of zero (or any unusable value) is replaced by
/// [`DEFAULT_THRESHOLD`] before dividing.
pub fn deviation_percent(confidence: f32, threshold: f32) -> f32 {
    let threshold = if threshold.is_finite() && threshold > 0.0 {
        threshold
    } else {
        DEFAULT_THRESHOLD
    };
    (confidence - threshold) / threshold * 100.0
}

/// Band a confidence score against its threshold.
///
/// | deviation d (%) | level       |
/// |-----------------|-------------|
/// | d ≤ −15         | `very_low`  |
/// | −15 < d ≤ −5    | `low`       |
/// | −5 < d ≤ 5      | `medium`    |
/// | 5 < d ≤ 15      | `high`      |
/// | d > 15          | `very_high` |
///
/// Upper bounds are inclusive, with [`bands::EPSILON`] slack so that values
/// landing on a boundary in decimal land there in binary too.
pub fn classify(confidence: f32, threshold: f32) -> ConfidenceLevel {
    let d = deviation_percent(confidence, threshold);

    if d.is_nan() || d <= bands::VERY_LOW_MAX + bands::EPSILON {
        ConfidenceLevel::VeryLow
    } else if d <= bands::LOW_MAX + bands::EPSILON {
        ConfidenceLevel::Low
    } else if d <= bands::MEDIUM_MAX + bands::EPSILON {
        ConfidenceLevel::Medium
    } else if d <= bands::HIGH_MAX + bands::EPSILON {
        ConfidenceLevel::High
    } else {
        ConfidenceLevel::VeryHigh
    }
}

/// Band a confidence against the threshold resolved for `species`.
pub fn classify_species(confidence: f32, species: &str, thresholds: &ThresholdMap) -> ConfidenceLevel {
    classify(confidence, thresholds.resolve(species))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_threshold_is_medium() {
        assert_eq!(classify(0.20, 0.20), ConfidenceLevel::Medium);
        assert_eq!(classify(0.7, 0.7), ConfidenceLevel::Medium);
    }

    #[test]
    fn test_half_threshold_is_very_low() {
        assert_eq!(classify(0.10, 0.20), ConfidenceLevel::VeryLow);
    }

    #[test]
    fn test_upper_boundaries_are_inclusive() {
        // +15% exactly
        assert_eq!(classify(0.23, 0.20), ConfidenceLevel::High);
        // +5% exactly
        assert_eq!(classify(0.21, 0.20), ConfidenceLevel::Medium);
        // -5% exactly
        assert_eq!(classify(0.19, 0.20), ConfidenceLevel::Low);
        // -15% exactly
        assert_eq!(classify(0.17, 0.20), ConfidenceLevel::VeryLow);
    }

    #[test]
    fn test_each_band_interior() {
        assert_eq!(classify(0.12, 0.20), ConfidenceLevel::VeryLow);
        assert_eq!(classify(0.18, 0.20), ConfidenceLevel::Low);
        assert_eq!(classify(0.202, 0.20), ConfidenceLevel::Medium);
        assert_eq!(classify(0.22, 0.20), ConfidenceLevel::High);
        assert_eq!(classify(0.5, 0.3), ConfidenceLevel::VeryHigh);
    }

    #[test]
    fn test_depends_only_on_ratio() {
        assert_eq!(classify(0.46, 0.40), classify(0.23, 0.20));
        assert_eq!(classify(0.8, 0.4), ConfidenceLevel::VeryHigh);
    }

    #[test]
    fn test_zero_threshold_uses_default() {
        assert_eq!(classify(0.20, 0.0), ConfidenceLevel::Medium);
        assert_eq!(classify(0.20, f32::NAN), ConfidenceLevel::Medium);
    }

    #[test]
    fn test_nan_confidence_is_very_low() {
        assert_eq!(classify(f32::NAN, 0.2), ConfidenceLevel::VeryLow);
    }

    #[test]
    fn test_levels_are_ordered() {
        let mut sorted = ConfidenceLevel::ALL;
        sorted.sort();
        assert_eq!(sorted, ConfidenceLevel::ALL);
        assert!(ConfidenceLevel::VeryLow < ConfidenceLevel::VeryHigh);
    }

    #[test]
    fn test_display_matches_serde() {
        for level in ConfidenceLevel::ALL {
            let json = serde_json::to_string(&level).unwrap_or_default();
            assert_eq!(json, format!("\"{level}\""));
        }
    }

    #[test]
    fn test_classify_species_uses_resolved_threshold() {
        let mut thresholds = ThresholdMap::default();
        thresholds.insert("Turdus merula_Eurasian Blackbird", 0.3);
        assert_eq!(
            classify_species(0.5, "Turdus merula_Eurasian Blackbird", &thresholds),
            ConfidenceLevel::VeryHigh
        );
        assert_eq!(
            classify_species(0.2, "Parus major_Great Tit", &thresholds),
            ConfidenceLevel::Medium
        );
    }
}
