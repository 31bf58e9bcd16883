//! End-to-end tests of the parse, threshold, filter and noise-hiding stages.

use birda_monitor::constants::NON_SPECIES_PREFIXES;
use birda_monitor::detection::{FilteredDetection, parse_records};
use birda_monitor::filter::{
    ConfidenceLevel, FilterOptions, classify, exclude_non_species, filter_detections,
};
use birda_monitor::thresholds::{ThresholdMap, load_thresholds};
use serde_json::{Value, json};
use std::io::Write;
use tempfile::NamedTempFile;

const BLACKBIRD: &str = "Turdus merula_Eurasian Blackbird";
const ROBIN: &str = "Erithacus rubecula_European Robin";

fn utc_options() -> FilterOptions {
    FilterOptions {
        timezone: chrono_tz::UTC,
        ..FilterOptions::default()
    }
}

fn row(species: &str, confidence: f64, timestamp: i64, offset: f64) -> Value {
    json!({
        "species": species,
        "confidence": confidence,
        "timestamp": timestamp,
        "offset": offset,
    })
}

fn thresholds_file() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "species,threshold").unwrap();
    writeln!(file, "{BLACKBIRD},0.3").unwrap();
    writeln!(file, "{ROBIN},0.6").unwrap();
    file.flush().unwrap();
    file
}

fn run(values: &[Value], thresholds: &ThresholdMap) -> Vec<FilteredDetection> {
    let records = parse_records(values);
    filter_detections(&records, thresholds, &utc_options())
}

#[test]
fn test_quiet_no_call_lets_species_through() {
    let thresholds = load_thresholds(thresholds_file().path(), 0.2);
    let values = [
        row("None_", 0.1, 1_717_236_000, 0.0),
        row(BLACKBIRD, 0.5, 1_717_236_000, 0.0),
    ];

    let out = run(&values, &thresholds);

    assert_eq!(out.len(), 1);
    assert_eq!(out[0].record.species, BLACKBIRD);
    assert!((out[0].threshold - 0.3).abs() < f32::EPSILON);
    assert_eq!(out[0].confidence_level, ConfidenceLevel::VeryHigh);
}

#[test]
fn test_confident_no_call_vetoes_whole_event() {
    let thresholds = load_thresholds(thresholds_file().path(), 0.2);
    let values = [
        row("None_", 0.9, 1_717_236_000, 0.0),
        row(BLACKBIRD, 0.9, 1_717_236_000, 0.0),
    ];

    assert!(run(&values, &thresholds).is_empty());
}

#[test]
fn test_noise_only_event_never_appears() {
    let values = [
        row("Rain_", 0.95, 1_717_236_000, 0.0),
        row("Wind_", 0.05, 1_717_236_003, 0.0),
    ];
    let thresholds = ThresholdMap::default();

    // Dropped before any threshold check under the default options
    assert!(run(&values, &thresholds).is_empty());

    // Even when every row is kept, the noise filter removes them
    let options = FilterOptions {
        keep_all: true,
        ..utc_options()
    };
    let out = filter_detections(&parse_records(&values), &thresholds, &options);
    assert_eq!(out.len(), 2);
    assert!(exclude_non_species(out, NON_SPECIES_PREFIXES).is_empty());
}

#[test]
fn test_survivors_meet_thresholds_and_are_sorted() {
    let thresholds = load_thresholds(thresholds_file().path(), 0.2);
    let values = [
        row(ROBIN, 0.59, 1_717_236_000, 0.0),
        row(ROBIN, 0.61, 1_717_236_000, 3.0),
        row(BLACKBIRD, 0.31, 1_717_239_600, 0.0),
        row("Parus major_Great Tit", 0.2, 1_717_233_000, 9.0),
        row("Parus major_Great Tit", 0.15, 1_717_233_000, 12.0),
    ];

    let out = run(&values, &thresholds);

    assert_eq!(out.len(), 3);
    for d in &out {
        assert!(d.record.confidence >= d.threshold);
    }
    for pair in out.windows(2) {
        assert!(pair[0].event_time >= pair[1].event_time);
    }
    assert_eq!(out[0].record.species, BLACKBIRD);
    assert_eq!(out[2].record.species, "Parus major_Great Tit");
}

#[test]
fn test_overrides_change_the_outcome() {
    let loaded = load_thresholds(thresholds_file().path(), 0.2);
    let values = [row(ROBIN, 0.5, 1_717_236_000, 0.0)];

    assert!(run(&values, &loaded).is_empty());

    let tuned = loaded.with_overrides([(ROBIN, 0.45)]);
    let out = run(&values, &tuned);
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].confidence_level, classify(0.5, 0.45));
}

#[test]
fn test_missing_threshold_file_falls_back_to_default() {
    let thresholds = load_thresholds(std::path::Path::new("/nonexistent/species.csv"), 0.2);
    let values = [
        row(BLACKBIRD, 0.25, 1_717_236_000, 0.0),
        row(BLACKBIRD, 0.15, 1_717_236_000, 3.0),
    ];

    let out = run(&values, &thresholds);
    assert_eq!(out.len(), 1);
    assert!((out[0].threshold - 0.2).abs() < f32::EPSILON);
}

#[test]
fn test_malformed_record_does_not_disturb_its_event() {
    let values = [
        json!({"species": "None_", "timestamp": 1_717_236_000, "offset": 0.0}),
        row(BLACKBIRD, 0.9, 1_717_236_000, 0.0),
    ];

    // The no-call row lacks a confidence, so it is excluded rather than vetoing
    let out = run(&values, &ThresholdMap::default());
    assert_eq!(out.len(), 1);
}

#[test]
fn test_legacy_start_time_records_group_with_offset_records() {
    let values = [
        json!({
            "species": "None_",
            "confidence": 0.8,
            "timestamp": 1_717_236_000,
            "start_time": 1_717_236_003,
            "duration": 3
        }),
        row(BLACKBIRD, 0.9, 1_717_236_000, 3.0),
    ];

    assert!(run(&values, &ThresholdMap::default()).is_empty());
}

#[test]
fn test_local_date_and_time() {
    let values = [row(BLACKBIRD, 0.9, 1_717_279_200, 0.0)];
    let records = parse_records(&values);

    // 2024-06-01 22:00 UTC is already June 2nd in Rome
    let out = filter_detections(&records, &ThresholdMap::default(), &FilterOptions::default());
    assert_eq!(out[0].date().to_string(), "2024-06-02");
    assert_eq!(out[0].time().to_string(), "00:00:00");
}
