//! Blockforest - reconstructs packaged hierarchical block diagram models.
//!
//! A model package is a zip archive holding one XML document per subsystem
//! level. [`ModelBuilder`] loads the package into memory, parses it starting
//! from the root document and returns a [`Model`]: a forest of normalized
//! blocks whose ports are resolved from the nets of their own scope.

pub mod archive;
pub mod config;
pub mod export;

mod error;
mod model;

pub use blockforest_core::{block, net, query, value};
pub use blockforest_parser::{DocumentSource, ParseError};

pub use error::BlockforestError;
pub use model::Model;

use std::{
    io::{Read, Seek},
    path::Path,
};

use log::{debug, info, trace};

use archive::{Archive, ArchiveError};
use config::AppConfig;

/// Builder for loading models.
///
/// # Examples
///
/// ```rust,no_run
/// use blockforest::{ModelBuilder, config::AppConfig};
///
/// let builder = ModelBuilder::new(AppConfig::default());
/// let model = builder.open("controller.slx").expect("Failed to load model");
///
/// if let Some(block) = model.find_block("Name", "Controller") {
///     println!("{:?}", block.ports());
/// }
/// ```
#[derive(Debug, Default)]
pub struct ModelBuilder {
    config: AppConfig,
}

impl ModelBuilder {
    /// Create a new model builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Load and build the model package at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`BlockforestError::Archive`] if the package cannot be read or
    /// lacks the root document, and [`BlockforestError::Parse`] if any of its
    /// documents fails to parse.
    pub fn open(&self, path: impl AsRef<Path>) -> Result<Model, BlockforestError> {
        let archive = Archive::open(path, self.config.archive().subsystem_suffix())?;
        self.build_archive(&archive)
    }

    /// Load and build a model package from a seekable reader.
    ///
    /// # Errors
    ///
    /// Same as [`ModelBuilder::open`].
    pub fn from_reader<R: Read + Seek>(&self, reader: R) -> Result<Model, BlockforestError> {
        let archive = Archive::from_reader(reader, self.config.archive().subsystem_suffix())?;
        self.build_archive(&archive)
    }

    /// Build a model from any [`DocumentSource`].
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use blockforest::ModelBuilder;
    ///
    /// let mut documents = HashMap::new();
    /// documents.insert(
    ///     "system_root.xml".to_string(),
    ///     r#"<System><Block BlockType="Constant" Name="one" SID="1"/></System>"#.to_string(),
    /// );
    ///
    /// let model = ModelBuilder::default().build(&documents).unwrap();
    /// assert_eq!(model.block_count(), 1);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`BlockforestError::Parse`] if a document is missing,
    /// malformed, part of a reference cycle or lacks a required field.
    pub fn build<S>(&self, source: &S) -> Result<Model, BlockforestError>
    where
        S: DocumentSource + ?Sized,
    {
        let archive_config = self.config.archive();
        info!(root = archive_config.root_document(); "Building model");

        let scope = blockforest_parser::parse(
            source,
            archive_config.root_document(),
            &archive_config.parse_config(),
        )?;
        let model = Model::from(scope);

        debug!(blocks = model.block_count(); "Model built successfully");
        trace!(model:?; "Built model");

        Ok(model)
    }

    fn build_archive(&self, archive: &Archive) -> Result<Model, BlockforestError> {
        let root = self.config.archive().root_document();
        if !archive.contains(root) {
            return Err(ArchiveError::MissingRoot {
                name: root.to_string(),
            }
            .into());
        }
        self.build(archive)
    }
}
