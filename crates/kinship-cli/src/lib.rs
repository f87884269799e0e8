//! CLI logic for the Kinship family tree layout tool.
//!
//! This module contains the core CLI logic: read a family document, lay it
//! out, and write the placement to a file or stdout.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    io::{self, Write},
};

use log::info;

use kinship::{KinshipError, TreeBuilder};

/// Run the Kinship CLI application
///
/// # Errors
///
/// Returns `KinshipError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Family document parsing errors
/// - Export errors
pub fn run(args: &Args) -> Result<(), KinshipError> {
    info!(
        input_path = args.input,
        output_path:? = args.output,
        format:% = args.format;
        "Processing family"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let builder = TreeBuilder::new(app_config);
    let family = builder.parse(&source)?;
    let layout = builder.layout(&family);
    let output = builder.export(&layout, args.format)?;

    match &args.output {
        Some(path) => {
            fs::write(path, output)?;
            info!(output_file = path; "Layout exported successfully");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            stdout.flush()?;
        }
    }

    Ok(())
}
