//! Detection filtering: event grouping, threshold rules, confidence banding
//! and noise-class hiding.

mod engine;
mod level;
mod noise;

pub use engine::{FilterOptions, filter_detections};
pub use level::{ConfidenceLevel, classify, classify_species, deviation_percent};
pub use noise::{exclude_non_species, is_non_species};
