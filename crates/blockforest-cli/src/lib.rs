//! Blockforest CLI library
//!
//! This module contains the core CLI logic for the Blockforest model
//! inspector.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;
pub use error_adapter::{ErrorAdapter, to_reportable};

use std::{fs, io};

use log::info;

use blockforest::{BlockforestError, Model, ModelBuilder, export};

/// Run the Blockforest CLI application
///
/// Loads the model package, optionally narrows it to the first block matching
/// `--find`, and writes the export to the output file or standard output.
///
/// # Errors
///
/// Returns `BlockforestError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Archive errors
/// - Parsing errors
/// - A `--find` query that matches no block
pub fn run(args: &Args) -> Result<(), BlockforestError> {
    info!(input_path = args.input; "Processing model");

    let app_config = config::load_config(args.config.as_ref())?;
    let format = args.format.unwrap_or(app_config.output().format());

    let builder = ModelBuilder::new(app_config);
    let model = builder.open(&args.input)?;
    info!(blocks = model.block_count(); "Model loaded");

    let model = match &args.find {
        Some((attribute, value)) => {
            let block = model.find_block(attribute, value).ok_or_else(|| {
                io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no block with {attribute} = `{value}`"),
                )
            })?;
            Model::new(vec![block.clone()], Vec::new())
        }
        None => model,
    };

    let rendered = export::render(&model, format)?;

    match &args.output {
        Some(output) => {
            fs::write(output, rendered)?;
            info!(output_file = output.as_str(), format:% = format; "Model exported successfully");
        }
        None => print!("{rendered}"),
    }

    Ok(())
}
