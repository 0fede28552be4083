//! Error types for Blockforest operations.
//!
//! This module provides the main error type [`BlockforestError`] which wraps
//! the error conditions of loading, parsing and exporting a model.

use std::io;

use thiserror::Error;

use blockforest_parser::ParseError;

use crate::archive::ArchiveError;

/// The main error type for Blockforest operations.
///
/// # Diagnostic Variants
///
/// The `Config` variant is raised by front ends that load an
/// [`AppConfig`](crate::config::AppConfig) from a file.
///
/// The `Parse` variant carries the parser's [`ParseError`], which holds the
/// name and text of the offending document for snippet rendering.
#[derive(Debug, Error)]
pub enum BlockforestError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Archive(#[from] ArchiveError),

    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("Configuration error: {0}")]
    Config(Box<dyn std::error::Error + Send + Sync>),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl From<crate::export::Error> for BlockforestError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}
