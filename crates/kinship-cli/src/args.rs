//! Command-line argument definitions for the Kinship CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the output format,
//! configuration file selection, and logging verbosity.

use std::str::FromStr;

use clap::Parser;
use log::LevelFilter;

use kinship::export::OutputFormat;

/// Command-line arguments for the Kinship family tree layout tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input family document (TOML)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output file; prints to stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format (toml, text)
    #[arg(short, long, default_value = "toml")]
    pub format: OutputFormat,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// The requested log filter, or `None` when `--log-level` names no level.
    pub fn log_filter(&self) -> Option<LevelFilter> {
        LevelFilter::from_str(self.log_level.trim()).ok()
    }
}
