//! Birda Monitor - review of acoustic bird detections.
//!
//! This crate turns the raw per-segment species classifications reported by
//! a sensor into a curated list of detections, using per-species confidence
//! thresholds, a no-call veto and a confidence-quality banding.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod constants;
pub mod detection;
pub mod error;
pub mod filter;
pub mod output;
pub mod source;
pub mod thresholds;
pub mod utils;

use clap::Parser;
use cli::{Cli, Command, FilterArgs};
use config::{Config, OutputFormat, config_file_path, load_default_config, save_default_config};
use detection::FilteredDetection;
use filter::{FilterOptions, exclude_non_species, filter_detections};
use source::ApiClient;
use std::path::PathBuf;
use std::time::Duration;
use thresholds::{ThresholdMap, load_thresholds};
use tracing::{debug, info, warn};

pub use error::{Error, Result};

/// Main entry point for birda-monitor CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.filter.verbose, cli.filter.quiet);

    // `config` subcommands must work even when the config file is broken
    if let Some(command) = cli.command {
        return handle_command(command);
    }

    let config = load_default_config()?;
    run_filter(&cli.filter, &config)
}

/// Fetch, filter and print detections according to CLI args and config.
fn run_filter(args: &FilterArgs, config: &Config) -> Result<()> {
    let timezone_name = args
        .timezone
        .as_deref()
        .unwrap_or(&config.filter.timezone);
    let timezone = utils::time::parse_timezone(timezone_name)?;

    // Raw payload: local file wins over the API
    let (values, date) = if let Some(ref input) = args.input {
        info!("Reading detections from {}", input.display());
        (source::read_detections_file(input)?, args.date)
    } else {
        let api_base = args
            .api_base
            .as_ref()
            .or(config.source.api_base.as_ref())
            .ok_or(Error::NoDetectionSource)?;
        let client = ApiClient::new(api_base, Duration::from_secs(config.source.timeout_secs))?;
        let date = args
            .date
            .unwrap_or_else(|| chrono::Utc::now().with_timezone(&timezone).date_naive());
        (source::fetch_day(&client, date, timezone)?, Some(date))
    };

    let records = detection::parse_records(&values);
    let thresholds = resolve_thresholds(args, config);
    let options = FilterOptions {
        keep_all: args.keep_all,
        no_call_labels: config.filter.no_call_labels.clone(),
        timezone,
    };

    let mut detections = filter_detections(&records, &thresholds, &options);

    if let Some(date) = date {
        detections = select_date(detections, date);
    }

    let hide_non_species = if args.show_non_species {
        false
    } else {
        args.hide_non_species || config.filter.hide_non_species
    };
    if hide_non_species {
        detections = exclude_non_species(detections, &config.filter.non_species_prefixes);
    }

    info!(
        "{} detection(s) from {} record(s)",
        detections.len(),
        records.len()
    );

    write_output(args, config, &detections)
}

/// Build the threshold map for this request.
///
/// The file is re-read on every call; CLI overrides are applied on top.
fn resolve_thresholds(args: &FilterArgs, config: &Config) -> ThresholdMap {
    let default = args.default_threshold.unwrap_or(config.thresholds.default);

    let path: Option<PathBuf> = args
        .thresholds
        .clone()
        .or_else(|| config.thresholds.path.clone())
        .or_else(|| config::default_thresholds_path().ok());

    let loaded = path.map_or_else(
        || {
            warn!("No threshold file location available, using default {default}");
            ThresholdMap::new(default)
        },
        |path| load_thresholds(&path, default),
    );

    if args.overrides.is_empty() {
        return loaded;
    }

    debug!("Applying {} threshold override(s)", args.overrides.len());
    loaded.with_overrides(args.overrides.iter().cloned())
}

/// Keep detections whose local date is `date`.
fn select_date(detections: Vec<FilteredDetection>, date: chrono::NaiveDate) -> Vec<FilteredDetection> {
    let before = detections.len();
    let selected: Vec<FilteredDetection> = detections
        .into_iter()
        .filter(|d| d.date() == date)
        .collect();
    debug!(
        "{} of {before} detection(s) fall on {date}",
        selected.len()
    );
    selected
}

fn write_output(args: &FilterArgs, config: &Config, detections: &[FilteredDetection]) -> Result<()> {
    let format = args.format.unwrap_or(config.output.format);
    let csv_bom = config.output.csv_bom && !args.no_csv_bom;

    if let Some(ref path) = args.output {
        let file = std::io::BufWriter::new(std::fs::File::create(path)?);
        let mut writer = output::create_writer(format, file, csv_bom)?;
        output::write_detections(writer.as_mut(), detections)?;
        info!("Wrote {} detection(s) to {}", detections.len(), path.display());
    } else {
        let stdout = std::io::stdout().lock();
        let mut writer = output::create_writer(format, stdout, csv_bom)?;
        output::write_detections(writer.as_mut(), detections)?;
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter_str = if quiet {
        "warn"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter_str));

    // stdout carries the detections; logs go to stderr
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn handle_command(command: Command) -> Result<()> {
    match command {
        Command::Config { action } => handle_config_command(action),
        Command::Status { api_base, format } => {
            let config = load_default_config()?;
            run_status(api_base.as_ref(), format, &config)
        }
    }
}

/// Fetch and print the sensor's health metrics.
fn run_status(api_base: Option<&String>, format: Option<OutputFormat>, config: &Config) -> Result<()> {
    let api_base = api_base
        .or(config.source.api_base.as_ref())
        .ok_or(Error::ApiBaseMissing)?;
    let client = ApiClient::new(api_base, Duration::from_secs(config.source.timeout_secs))?;

    info!("Fetching system metrics from {api_base}");
    let metrics = source::fetch_status(&client)?;

    let format = format.unwrap_or(config.output.format);
    output::write_status(std::io::stdout().lock(), &metrics, format, config.output.csv_bom)
}

#[allow(clippy::print_stdout)]
fn handle_config_command(action: cli::ConfigAction) -> Result<()> {
    use cli::ConfigAction;

    match action {
        ConfigAction::Init => {
            let path = config_file_path()?;
            if path.exists() {
                println!("Configuration file already exists: {}", path.display());
            } else {
                let config = Config::default();
                let saved_path = save_default_config(&config)?;
                println!("Created configuration file: {}", saved_path.display());
                println!("\nNext steps:");
                println!("  set [source] api_base to your sensor's API URL");
                if let Ok(thresholds) = config::default_thresholds_path() {
                    println!(
                        "  put per-species thresholds in {} (species,threshold)",
                        thresholds.display()
                    );
                }
            }
            Ok(())
        }
        ConfigAction::Show => {
            let config = load_default_config()?;
            println!("{config:#?}");
            Ok(())
        }
        ConfigAction::Path => {
            let path = config_file_path()?;
            println!("{}", path.display());
            Ok(())
        }
    }
}
