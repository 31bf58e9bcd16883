//! Detection records and their parsing from backend payloads.

mod parse;
mod types;

pub use parse::{parse_record, parse_records};
pub use types::{DetectionRecord, FilteredDetection, HasSpecies};
