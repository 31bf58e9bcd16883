//! JSON output format writer.

use super::types::DetectionSummary;
use crate::detection::FilteredDetection;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// JSON document structure.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    /// When the report was produced.
    pub generated_at: DateTime<Utc>,
    /// Summary statistics.
    pub summary: DetectionSummary,
    /// Detections, most recent first.
    pub detections: &'a [FilteredDetection],
}

/// Writer collecting detections into one JSON document.
pub struct JsonWriter<W: Write> {
    writer: W,
    detections: Vec<FilteredDetection>,
}

impl<W: Write> JsonWriter<W> {
    /// Create a JSON writer over `writer`.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            detections: Vec::new(),
        }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_header(&mut self) -> Result<()> {
        // No header for JSON - written at finalize
        Ok(())
    }

    fn write_detection(&mut self, detection: &FilteredDetection) -> Result<()> {
        self.detections.push(detection.clone());
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        let report = JsonReport {
            generated_at: Utc::now(),
            summary: DetectionSummary::from_detections(&self.detections),
            detections: &self.detections,
        };

        serde_json::to_writer_pretty(&mut self.writer, &report).map_err(Error::JsonWrite)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::detection::DetectionRecord;
    use crate::filter::ConfidenceLevel;
    use chrono::NaiveDate;
    use serde_json::Value;

    #[test]
    fn test_json_report_shape() {
        let detection = FilteredDetection {
            record: DetectionRecord {
                species: "Parus major_Great Tit".to_string(),
                confidence: 0.5,
                timestamp: 1_717_236_000,
                offset: 3.0,
                duration: None,
            },
            event_time: 1_717_236_003,
            local_time: NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(12, 0, 3)
                .unwrap(),
            threshold: 0.2,
            confidence_level: ConfidenceLevel::VeryHigh,
        };

        let mut buf = Vec::new();
        {
            let mut writer = JsonWriter::new(&mut buf);
            writer.write_header().unwrap();
            writer.write_detection(&detection).unwrap();
            writer.finalize().unwrap();
        }

        let json: Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(json["summary"]["total_detections"], 1);
        assert_eq!(json["summary"]["by_level"]["very_high"], 1);

        let first = &json["detections"][0];
        assert_eq!(first["species"], "Parus major_Great Tit");
        assert_eq!(first["timestamp"], 1_717_236_000);
        assert_eq!(first["offset"], 3.0);
        assert_eq!(first["confidence_level"], "very_high");
        assert_eq!(first["local_time"], "2024-06-01T12:00:03");
        assert!(first.get("duration").is_none());
    }
}
