//! Configuration validation.

use crate::config::Config;
use crate::constants::confidence;
use crate::error::{Error, Result};
use crate::utils::time::parse_timezone;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_thresholds(config)?;
    validate_filter(config)?;
    validate_source(config)?;
    Ok(())
}

/// Validate threshold settings.
fn validate_thresholds(config: &Config) -> Result<()> {
    let default = config.thresholds.default;

    // A zero default would make confidence banding divide by zero
    if !(default > confidence::MIN && default <= confidence::MAX) {
        return Err(Error::ConfigValidation {
            message: format!(
                "default threshold must be in ({}, {}], got {default}",
                confidence::MIN,
                confidence::MAX,
            ),
        });
    }

    Ok(())
}

/// Validate filter settings.
fn validate_filter(config: &Config) -> Result<()> {
    if config
        .filter
        .no_call_labels
        .iter()
        .any(|l| l.trim().is_empty())
    {
        return Err(Error::ConfigValidation {
            message: "no_call_labels must not contain empty labels".to_string(),
        });
    }

    if config
        .filter
        .non_species_prefixes
        .iter()
        .any(|p| p.is_empty())
    {
        return Err(Error::ConfigValidation {
            message: "non_species_prefixes must not contain empty prefixes".to_string(),
        });
    }

    parse_timezone(&config.filter.timezone)?;

    Ok(())
}

/// Validate classifier backend settings.
fn validate_source(config: &Config) -> Result<()> {
    if config.source.timeout_secs == 0 {
        return Err(Error::ConfigValidation {
            message: "timeout_secs must be at least 1".to_string(),
        });
    }

    if let Some(ref base) = config.source.api_base
        && !(base.starts_with("http://") || base.starts_with("https://"))
    {
        return Err(Error::ConfigValidation {
            message: format!("api_base must be an http(s) URL, got '{base}'"),
        });
    }

    Ok(())
}
