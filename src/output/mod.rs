//! Output format writers.

mod csv;
mod json;
mod status;
mod table;
mod types;
mod writer;

pub use csv::CsvWriter;
pub use json::{JsonReport, JsonWriter};
pub use status::write_status;
pub use table::TableWriter;
pub use types::{DetectionSummary, display_species};
pub use writer::OutputWriter;

use crate::config::OutputFormat;
use crate::detection::FilteredDetection;
use crate::error::Result;
use std::io::Write;

/// Create a writer for `format` over `out`.
pub fn create_writer<'a, W: Write + 'a>(
    format: OutputFormat,
    out: W,
    csv_bom: bool,
) -> Result<Box<dyn OutputWriter + 'a>> {
    Ok(match format {
        OutputFormat::Table => Box::new(TableWriter::new(out)),
        OutputFormat::Csv => Box::new(CsvWriter::new(out, csv_bom)?),
        OutputFormat::Json => Box::new(JsonWriter::new(out)),
    })
}

/// Write a full detection set through `writer`.
pub fn write_detections(
    writer: &mut dyn OutputWriter,
    detections: &[FilteredDetection],
) -> Result<()> {
    writer.write_header()?;
    for detection in detections {
        writer.write_detection(detection)?;
    }
    writer.finalize()
}
