//! Classifier backend HTTP client.

use super::metrics::{SystemMetrics, parse_metrics_payload};
use super::parse_detections_payload;
use crate::constants::api;
use crate::error::{Error, Result};
use crate::utils::time::local_midnight_epoch;
use chrono::NaiveDate;
use chrono_tz::Tz;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, info};

/// Client for the sensor's classification API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base: String,
}

impl ApiClient {
    /// Build a client for `base` (e.g. `http://10.0.0.5:5001/api`).
    pub fn new(base: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Internal {
                message: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base: base.trim_end_matches('/').to_string(),
        })
    }

    /// URL listing classifications at or after `since` (epoch seconds).
    pub fn classifications_url(&self, since: i64) -> String {
        format!(
            "{}{}?{}={since}",
            self.base,
            api::CLASSIFICATIONS_PATH,
            api::SINCE_PARAM
        )
    }

    /// URL reporting the sensor's health metrics.
    pub fn system_metrics_url(&self) -> String {
        format!("{}{}", self.base, api::SYSTEM_METRICS_PATH)
    }

    /// Fetch every classification at or after `since`.
    pub async fn fetch_detections(&self, since: i64) -> Result<Vec<Value>> {
        let url = self.classifications_url(since);
        let body = self.get(&url).await?;
        parse_detections_payload(&body, &url)
    }

    /// Fetch the sensor's current CPU, RAM, disk and temperature readings.
    pub async fn fetch_system_metrics(&self) -> Result<SystemMetrics> {
        let url = self.system_metrics_url();
        let body = self.get(&url).await?;
        parse_metrics_payload(&body, &url)
    }

    /// GET `url` and return the body of a successful response.
    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        debug!("GET {url}");

        let fetch_error = |source: Box<dyn std::error::Error + Send + Sync>| Error::Fetch {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_error(Box::new(e)))?;

        if !response.status().is_success() {
            return Err(fetch_error(format!("HTTP {}", response.status()).into()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| fetch_error(Box::new(e)))?;

        Ok(body.to_vec())
    }
}

/// Fetch the detections of one local calendar day, blocking until done.
///
/// The backend is asked for everything since local midnight of `date`;
/// trimming to the day itself happens after filtering.
pub fn fetch_day(client: &ApiClient, date: NaiveDate, tz: Tz) -> Result<Vec<Value>> {
    let since = local_midnight_epoch(date, tz);
    info!("Fetching detections for {date} (since {since})");

    let runtime = tokio::runtime::Runtime::new().map_err(|e| Error::Internal {
        message: format!("Failed to create async runtime: {e}"),
    })?;

    let values = runtime.block_on(client.fetch_detections(since))?;
    info!("Received {} detection record(s)", values.len());
    Ok(values)
}

/// Fetch the sensor's health metrics, blocking until done.
pub fn fetch_status(client: &ApiClient) -> Result<SystemMetrics> {
    let runtime = tokio::runtime::Runtime::new().map_err(|e| Error::Internal {
        message: format!("Failed to create async runtime: {e}"),
    })?;

    runtime.block_on(client.fetch_system_metrics())
}
