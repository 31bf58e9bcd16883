//! Where raw detection payloads and sensor health readings come from.
//!
//! Both sources hand back the untyped JSON elements; turning them into
//! [`crate::detection::DetectionRecord`]s (and discarding malformed ones)
//! is done by [`crate::detection::parse_records`].

mod api;
mod file;
mod metrics;

pub use api::{ApiClient, fetch_day, fetch_status};
pub use file::{parse_detections_payload, read_detections_file};
pub use metrics::{SystemMetrics, parse_metrics_payload};
