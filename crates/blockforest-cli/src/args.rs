//! Command-line argument definitions for the Blockforest CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the input package, output destination
//! and format, an optional block lookup, configuration file selection, and
//! logging verbosity.

use clap::Parser;

use blockforest::config::OutputFormat;

/// Command-line arguments for the Blockforest model inspector
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input model package
    #[arg(help = "Path to the model package (.slx)")]
    pub input: String,

    /// Path to the output file; standard output if omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format (outline, json); defaults to the configured format
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Only export the first block whose attribute matches, e.g. `Name=Controller`
    #[arg(long, value_name = "ATTR=VALUE", value_parser = parse_find)]
    pub find: Option<(String, String)>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

/// Splits an `ATTR=VALUE` query at the first `=`.
fn parse_find(query: &str) -> Result<(String, String), String> {
    match query.split_once('=') {
        Some((attribute, value)) if !attribute.is_empty() => {
            Ok((attribute.to_string(), value.to_string()))
        }
        _ => Err(format!("expected ATTR=VALUE, got `{query}`")),
    }
}
