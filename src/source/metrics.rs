//! Sensor health readings.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Resource usage reported by the sensor, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SystemMetrics {
    /// CPU usage.
    pub cpu_usage: f32,
    /// RAM usage.
    pub ram_usage: f32,
    /// Disk usage.
    pub disk_usage: f32,
    /// SoC temperature in °C; not every board exposes one.
    #[serde(default)]
    pub temperature: Option<f32>,
}

/// Decode a system metrics payload.
pub fn parse_metrics_payload(bytes: &[u8], origin: &str) -> Result<SystemMetrics> {
    serde_json::from_slice(bytes).map_err(|e| Error::MetricsParse {
        origin: origin.to_string(),
        source: e,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_payload() {
        let body = br#"{"cpu_usage": 12.5, "ram_usage": 41.0, "disk_usage": 63.2, "temperature": 48.7}"#;

        let metrics = parse_metrics_payload(body, "test").unwrap();
        assert_eq!(metrics.cpu_usage, 12.5);
        assert_eq!(metrics.ram_usage, 41.0);
        assert_eq!(metrics.disk_usage, 63.2);
        assert_eq!(metrics.temperature, Some(48.7));
    }

    #[test]
    fn test_missing_temperature() {
        let body = br#"{"cpu_usage": 3, "ram_usage": 20, "disk_usage": 50}"#;

        let metrics = parse_metrics_payload(body, "test").unwrap();
        assert_eq!(metrics.cpu_usage, 3.0);
        assert_eq!(metrics.temperature, None);
    }

    #[test]
    fn test_null_temperature() {
        let body = br#"{"cpu_usage": 3, "ram_usage": 20, "disk_usage": 50, "temperature": null}"#;
        assert_eq!(parse_metrics_payload(body, "test").unwrap().temperature, None);
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let body = br#"{"cpu_usage": 3, "ram_usage": 20, "disk_usage": 50, "uptime": 86400}"#;
        assert!(parse_metrics_payload(body, "test").is_ok());
    }

    #[test]
    fn test_missing_usage_is_an_error() {
        let body = br#"{"cpu_usage": 3, "temperature": 40}"#;
        let result = parse_metrics_payload(body, "http://sensor/api/system_metrics");
        assert!(matches!(result, Err(Error::MetricsParse { .. })));
    }
}
