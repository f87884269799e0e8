//! Kinship CLI entry point.

use std::process;

use clap::Parser;
use log::{LevelFilter, debug, info};

use kinship_cli::{Args, error_adapter::render_reports};

/// Logs go to stderr so that stdout carries only the exported document.
fn init_logger(args: &Args) -> LevelFilter {
    let level = args.log_filter().unwrap_or_else(|| {
        eprintln!("Unknown log level '{}', falling back to 'warn'", args.log_level);
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(level)
        .target(env_logger::Target::Stderr)
        .init();

    level
}

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();
    let level = init_logger(&args);
    debug!(level:?, args:?; "Kinship starting");

    match kinship_cli::run(&args) {
        Ok(()) => info!(input = args.input; "Family laid out"),
        Err(err) => {
            // Diagnostics bypass the logger so `--log-level off` still shows them.
            for report in render_reports(&err) {
                eprintln!("{report}");
            }
            process::exit(1);
        }
    }
}
