//! Threshold file reading.

use super::ThresholdMap;
use super::map::is_usable;
use crate::error::{Error, Result};
use std::path::Path;
use tracing::{debug, warn};

/// Read a threshold file, reporting why it could not be used.
///
/// # File Format
/// - CSV with a header row, then `species,threshold` rows
/// - Species labels match classifier labels exactly (e.g. `Parus major_Great Tit`)
/// - Duplicate species: the last row wins
/// - Rows with a missing, unparsable or out-of-range threshold (outside
///   `(0, 1]`) are skipped with a warning
///
/// # Errors
/// - [`Error::ThresholdsMissing`] if the file does not exist
/// - [`Error::ThresholdsRead`] if the file cannot be opened or decoded
pub fn try_load_thresholds(path: &Path, default: f32) -> Result<ThresholdMap> {
    if !path.exists() {
        return Err(Error::ThresholdsMissing {
            path: path.to_path_buf(),
        });
    }

    let read_error = |e: csv::Error| Error::ThresholdsRead {
        path: path.to_path_buf(),
        source: e,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(read_error)?;

    let mut thresholds = ThresholdMap::new(default);

    for (line_num, result) in reader.records().enumerate() {
        let row = result.map_err(read_error)?;
        let line = line_num + 2;

        let Some(species) = row.get(0).filter(|s| !s.is_empty()) else {
            warn!("{}:{line}: missing species, row skipped", path.display());
            continue;
        };

        match row.get(1).map(str::parse::<f32>) {
            Some(Ok(value)) if is_usable(value) => thresholds.insert(species, value),
            Some(Ok(value)) => {
                warn!(
                    "{}:{line}: threshold {value} for '{species}' must be in (0, 1], row skipped",
                    path.display()
                );
            }
            Some(Err(_)) | None => {
                warn!(
                    "{}:{line}: no valid threshold for '{species}', row skipped",
                    path.display()
                );
            }
        }
    }

    debug!(
        "Loaded {} species threshold(s) from {}",
        thresholds.len(),
        path.display()
    );

    Ok(thresholds)
}

/// Read a threshold file, degrading to an empty map on any failure.
///
/// The failure is logged; every species then resolves to `default`.
pub fn load_thresholds(path: &Path, default: f32) -> ThresholdMap {
    match try_load_thresholds(path, default) {
        Ok(thresholds) => thresholds,
        Err(e) => {
            warn!("{e}, using default threshold {default}");
            if let Some(source) = std::error::Error::source(&e) {
                debug!("Threshold file error detail: {source}");
            }
            ThresholdMap::new(default)
        }
    }
}

/// Parse a `SPECIES=THRESHOLD` override argument.
pub fn parse_override(arg: &str) -> Result<(String, f32)> {
    let invalid = || Error::InvalidOverride {
        value: arg.to_string(),
    };

    let (species, value) = arg.rsplit_once('=').ok_or_else(invalid)?;
    let species = species.trim();
    let value: f32 = value.trim().parse().map_err(|_| invalid())?;

    if species.is_empty() || !is_usable(value) {
        return Err(invalid());
    }

    Ok((species.to_string(), value))
}
