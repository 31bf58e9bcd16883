//! CLI argument definitions.

use super::validators::{parse_date, parse_threshold, parse_threshold_override};
use crate::config::OutputFormat;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Review bird detections from an acoustic sensor, filtered by per-species
/// confidence thresholds.
#[derive(Debug, Parser)]
#[command(name = "birda-monitor")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Options for filtering detections.
    #[command(flatten)]
    pub filter: FilterArgs,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Show the sensor's CPU, RAM, disk and temperature readings.
    Status {
        /// Base URL of the sensor API (overrides config).
        #[arg(long, env = "BIRDA_MONITOR_API")]
        api_base: Option<String>,

        /// Output format (table, csv, json).
        #[arg(short, long)]
        format: Option<OutputFormat>,
    },
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Arguments for filtering detections.
#[derive(Debug, Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct FilterArgs {
    /// JSON file of raw detections (instead of querying the sensor API).
    #[arg(short, long, env = "BIRDA_MONITOR_INPUT")]
    pub input: Option<PathBuf>,

    /// Local date to show (YYYY-MM-DD). Defaults to today when querying the API.
    #[arg(short, long, value_parser = parse_date)]
    pub date: Option<NaiveDate>,

    /// Base URL of the sensor API (overrides config).
    #[arg(long, env = "BIRDA_MONITOR_API")]
    pub api_base: Option<String>,

    /// CSV file of per-species thresholds (overrides config).
    #[arg(short, long, env = "BIRDA_MONITOR_THRESHOLDS")]
    pub thresholds: Option<PathBuf>,

    /// Threshold for species without an entry (0.0-1.0].
    #[arg(long, value_parser = parse_threshold)]
    pub default_threshold: Option<f32>,

    /// Override one species threshold, e.g. `--set "Parus major_Great Tit=0.4"`.
    #[arg(short = 's', long = "set", value_name = "SPECIES=THRESHOLD",
          value_parser = parse_threshold_override)]
    pub overrides: Vec<(String, f32)>,

    /// Show every record, skipping threshold and no-call rules.
    #[arg(long)]
    pub keep_all: bool,

    /// Hide wind, rain, insect and other non-species classes.
    #[arg(long, conflicts_with = "show_non_species")]
    pub hide_non_species: bool,

    /// Show non-species classes even if the config hides them.
    #[arg(long)]
    pub show_non_species: bool,

    /// IANA time zone of the sensor (overrides config).
    #[arg(long, env = "BIRDA_MONITOR_TZ")]
    pub timezone: Option<String>,

    /// Output format (table, csv, json).
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Write output to a file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Omit the UTF-8 BOM from CSV output.
    #[arg(long)]
    pub no_csv_bom: bool,

    /// Only log warnings and errors.
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
