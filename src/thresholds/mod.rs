//! Per-species confidence thresholds.
//!
//! Thresholds are read fresh from a two-column CSV on every request so an
//! operator can tune them while the monitor runs. Nothing here is cached
//! process-wide; callers pass the resulting [`ThresholdMap`] into the filter.

mod loader;
mod map;

pub use loader::{load_thresholds, parse_override, try_load_thresholds};
pub use map::ThresholdMap;
