//! CLI argument parsing.

mod args;
mod validators;

pub use args::{Cli, Command, ConfigAction, FilterArgs};
