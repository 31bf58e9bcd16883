//! Human-readable table output.

use super::types::{DetectionSummary, display_species};
use crate::constants::confidence::DECIMAL_PLACES;
use crate::detection::FilteredDetection;
use crate::error::Result;
use crate::output::OutputWriter;
use std::io::Write;

/// Aligned plain-text table with a trailing summary.
pub struct TableWriter<W: Write> {
    writer: W,
    detections: Vec<FilteredDetection>,
}

impl<W: Write> TableWriter<W> {
    /// Create a table writer over `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            detections: Vec::new(),
        }
    }
}

impl<W: Write> OutputWriter for TableWriter<W> {
    fn write_header(&mut self) -> Result<()> {
        // Column widths depend on the rows, so everything is written at finalize
        Ok(())
    }

    fn write_detection(&mut self, detection: &FilteredDetection) -> Result<()> {
        self.detections.push(detection.clone());
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        if self.detections.is_empty() {
            writeln!(self.writer, "No detections for this date.")?;
            self.writer.flush()?;
            return Ok(());
        }

        let species: Vec<String> = self
            .detections
            .iter()
            .map(|d| display_species(&d.record.species))
            .collect();
        let width = species
            .iter()
            .map(|s| s.chars().count())
            .max()
            .unwrap_or(0)
            .max("Species".len());

        writeln!(
            self.writer,
            "{:<10}  {:<8}  {:<width$}  {:>10}  {:>9}  Level",
            "Date", "Time", "Species", "Confidence", "Threshold"
        )?;

        for (d, name) in self.detections.iter().zip(&species) {
            writeln!(
                self.writer,
                "{:<10}  {:<8}  {:<width$}  {:>10.prec$}  {:>9.prec$}  {}",
                d.date().to_string(),
                d.time().format("%H:%M:%S").to_string(),
                name,
                d.record.confidence,
                d.threshold,
                d.confidence_level,
                prec = DECIMAL_PLACES,
            )?;
        }

        let summary = DetectionSummary::from_detections(&self.detections);
        writeln!(self.writer)?;
        write!(
            self.writer,
            "Total detections: {}  Unique species: {}",
            summary.total_detections, summary.unique_species
        )?;
        if let Some(latest) = summary.latest_detection {
            write!(self.writer, "  Latest: {}", latest.format("%H:%M:%S"))?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
