//! Output writer trait definition.

use crate::detection::FilteredDetection;
use crate::error::Result;

/// Trait for writing filtered detections.
pub trait OutputWriter {
    /// Write the header (if applicable).
    fn write_header(&mut self) -> Result<()>;

    /// Write a single detection.
    fn write_detection(&mut self, detection: &FilteredDetection) -> Result<()>;

    /// Finalize the output (flush, trailing summary, etc.).
    fn finalize(&mut self) -> Result<()>;
}
