//! Threshold filtering of classifier detections.
//!
//! Records are grouped into events: every record sharing an absolute event
//! second came out of one classification pass over one audio segment. Each
//! event is then judged as a whole before its species rows are judged
//! individually.

use super::level::classify;
use crate::constants::{DEFAULT_TIMEZONE, NO_CALL_LABELS};
use crate::detection::{DetectionRecord, FilteredDetection};
use crate::thresholds::ThresholdMap;
use crate::utils::time::to_local;
use chrono_tz::Tz;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Options for a filtering pass.
#[derive(Debug, Clone)]
pub struct FilterOptions {
    /// Annotate every record and skip all rejection rules.
    pub keep_all: bool,
    /// Labels of the no-call and noise classes (no signal, wind, rain...).
    pub no_call_labels: Vec<String>,
    /// Time zone used for the local date and time of each detection.
    pub timezone: Tz,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            keep_all: false,
            no_call_labels: NO_CALL_LABELS.iter().map(ToString::to_string).collect(),
            timezone: DEFAULT_TIMEZONE.parse().unwrap_or(chrono_tz::Europe::Rome),
        }
    }
}

/// Verdict on one event.
#[derive(Debug)]
enum EventOutcome<'a> {
    /// Only no-call or noise classes were reported.
    NoCallOnly,
    /// A no-call or noise class met its own threshold.
    Vetoed,
    /// Candidates were judged individually; holds the survivors.
    Judged(Vec<&'a DetectionRecord>),
}

/// Filter raw detections down to the ones worth showing.
///
/// 1. Records are ordered by event time, most recent first.
/// 2. With `keep_all`, every record is annotated and returned.
/// 3. Otherwise records are grouped by event time. An event is dropped when
///    it holds only no-call rows (any of `no_call_labels`), or when any
///    no-call row reaches its own threshold. Surviving events keep the
///    remaining rows whose confidence is at or above their species threshold.
///
/// Output is sorted by event time descending; records sharing an event time
/// keep their input order. An empty input yields an empty output.
pub fn filter_detections(
    records: &[DetectionRecord],
    thresholds: &ThresholdMap,
    options: &FilterOptions,
) -> Vec<FilteredDetection> {
    if records.is_empty() {
        return Vec::new();
    }

    let mut ordered: Vec<&DetectionRecord> = records.iter().collect();
    ordered.sort_by_key(|r| Reverse(r.event_time()));

    let to_output = |record: &DetectionRecord| annotate(record, thresholds, options.timezone);

    if options.keep_all {
        debug!("Keeping all {} record(s) unfiltered", ordered.len());
        return ordered.into_iter().map(to_output).collect();
    }

    let mut events: BTreeMap<i64, Vec<&DetectionRecord>> = BTreeMap::new();
    for record in ordered {
        events.entry(record.event_time()).or_default().push(record);
    }

    let event_count = events.len();
    let mut vetoed = 0usize;
    let mut kept: Vec<FilteredDetection> = Vec::new();

    for (event_time, rows) in events.into_iter().rev() {
        match judge_event(&rows, thresholds, &options.no_call_labels) {
            EventOutcome::NoCallOnly => {
                trace!("Event {event_time}: no-call only, dropped");
                vetoed += 1;
            }
            EventOutcome::Vetoed => {
                trace!("Event {event_time}: vetoed by confident no-call");
                vetoed += 1;
            }
            EventOutcome::Judged(survivors) => {
                trace!(
                    "Event {event_time}: kept {} of {} row(s)",
                    survivors.len(),
                    rows.len()
                );
                kept.extend(survivors.into_iter().map(&to_output));
            }
        }
    }

    kept.sort_by_key(|d| Reverse(d.event_time));

    debug!(
        "Kept {} of {} record(s) across {event_count} event(s), {vetoed} event(s) dropped as noise",
        kept.len(),
        records.len(),
    );

    kept
}

/// Apply the no-call rules and per-species thresholds to one event.
fn judge_event<'a>(
    rows: &[&'a DetectionRecord],
    thresholds: &ThresholdMap,
    no_call_labels: &[String],
) -> EventOutcome<'a> {
    let (no_call, candidates): (Vec<&'a DetectionRecord>, Vec<&'a DetectionRecord>) = rows
        .iter()
        .copied()
        .partition(|r| no_call_labels.iter().any(|label| *label == r.species));

    if candidates.is_empty() {
        return EventOutcome::NoCallOnly;
    }

    if no_call.iter().any(|r| passes(r, thresholds)) {
        return EventOutcome::Vetoed;
    }

    EventOutcome::Judged(
        candidates
            .into_iter()
            .filter(|r| passes(r, thresholds))
            .collect(),
    )
}

/// Whether a record reaches its species threshold.
fn passes(record: &DetectionRecord, thresholds: &ThresholdMap) -> bool {
    record.confidence >= thresholds.resolve(&record.species)
}

fn annotate(record: &DetectionRecord, thresholds: &ThresholdMap, tz: Tz) -> FilteredDetection {
    let threshold = thresholds.resolve(&record.species);
    let event_time = record.event_time();

    FilteredDetection {
        record: record.clone(),
        event_time,
        local_time: to_local(event_time, tz)
            .map(|dt| dt.naive_local())
            .unwrap_or_default(),
        threshold,
        confidence_level: classify(record.confidence, threshold),
    }
}
