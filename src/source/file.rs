//! Detections stored as a JSON file.

use crate::error::{Error, Result};
use serde_json::Value;
use std::path::Path;
use tracing::debug;

/// Read a JSON array of detection objects from disk.
pub fn read_detections_file(path: &Path) -> Result<Vec<Value>> {
    let contents = std::fs::read(path).map_err(|e| Error::DetectionsRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let values = parse_detections_payload(&contents, &path.display().to_string())?;
    debug!("Read {} detection(s) from {}", values.len(), path.display());
    Ok(values)
}

/// Decode a detections payload.
///
/// The backend answers with a JSON array; an empty body counts as no detections.
pub fn parse_detections_payload(bytes: &[u8], origin: &str) -> Result<Vec<Value>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    serde_json::from_slice(bytes).map_err(|e| Error::DetectionsParse {
        origin: origin.to_string(),
        source: e,
    })
}
