//! CSV output format writer.

use crate::constants::UTF8_BOM;
use crate::constants::confidence::DECIMAL_PLACES;
use crate::detection::FilteredDetection;
use crate::error::Result;
use crate::output::OutputWriter;
use std::io::Write;

const HEADER: [&str; 12] = [
    "Date",
    "Time",
    "Scientific name",
    "Common name",
    "Confidence",
    "Threshold",
    "Confidence level",
    "Species",
    "Event time",
    "Clip",
    "Offset (s)",
    "Duration (s)",
];

/// CSV format output writer.
pub struct CsvWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvWriter<W> {
    /// Create a new CSV writer, optionally starting with a UTF-8 BOM.
    pub fn new(mut inner: W, bom: bool) -> Result<Self> {
        if bom {
            inner.write_all(UTF8_BOM)?;
        }

        Ok(Self {
            writer: csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(inner),
        })
    }
}

impl<W: Write> OutputWriter for CsvWriter<W> {
    fn write_header(&mut self) -> Result<()> {
        self.writer.write_record(HEADER)?;
        Ok(())
    }

    fn write_detection(&mut self, detection: &FilteredDetection) -> Result<()> {
        let (scientific, common) = detection.record.names();
        let record = [
            detection.date().to_string(),
            detection.time().format("%H:%M:%S").to_string(),
            scientific.to_string(),
            common.to_string(),
            format!("{:.prec$}", detection.record.confidence, prec = DECIMAL_PLACES),
            format!("{:.prec$}", detection.threshold, prec = DECIMAL_PLACES),
            detection.confidence_level.to_string(),
            detection.record.species.clone(),
            detection.event_time.to_string(),
            detection.record.timestamp.to_string(),
            format!("{:.1}", detection.record.offset),
            detection
                .record
                .duration
                .map(|d| format!("{d:.1}"))
                .unwrap_or_default(),
        ];
        self.writer.write_record(&record)?;
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
