//! Configuration types for model loading and output.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file by the CLI. Every field has a default, so an empty file is a
//! valid configuration.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining archive and output settings.
//! - [`ArchiveConfig`] - Root document name and subsystem document suffix.
//! - [`OutputConfig`] - Default [`OutputFormat`] for exports.
//!
//! # Example
//!
//! ```
//! # use blockforest::config::{AppConfig, OutputFormat};
//! let config = AppConfig::default();
//! assert_eq!(config.archive().root_document(), "system_root.xml");
//! assert_eq!(config.archive().subsystem_suffix(), ".xml");
//! assert_eq!(config.output().format(), OutputFormat::Outline);
//! ```

use std::{fmt, str::FromStr};

use serde::Deserialize;

use blockforest_parser::{DEFAULT_SUBSYSTEM_SUFFIX, ParseConfig};

/// Name of the root document inside a model package.
pub const DEFAULT_ROOT_DOCUMENT: &str = "system_root.xml";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Archive configuration section.
    #[serde(default)]
    archive: ArchiveConfig,

    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    pub fn new(archive: ArchiveConfig, output: OutputConfig) -> Self {
        Self { archive, output }
    }

    /// Returns the archive configuration.
    pub fn archive(&self) -> &ArchiveConfig {
        &self.archive
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }
}

/// Where the model builder looks for documents.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArchiveConfig {
    /// Document parsing starts from.
    root_document: String,

    /// Suffix appended to subsystem references to form document names.
    subsystem_suffix: String,
}

impl ArchiveConfig {
    /// Creates a new [`ArchiveConfig`].
    ///
    /// # Arguments
    ///
    /// * `root_document` - Name of the document parsing starts from.
    /// * `subsystem_suffix` - Suffix that turns a subsystem reference into a document name.
    pub fn new(root_document: impl Into<String>, subsystem_suffix: impl Into<String>) -> Self {
        Self {
            root_document: root_document.into(),
            subsystem_suffix: subsystem_suffix.into(),
        }
    }

    pub fn root_document(&self) -> &str {
        &self.root_document
    }

    pub fn subsystem_suffix(&self) -> &str {
        &self.subsystem_suffix
    }

    /// Parser settings derived from this section.
    pub fn parse_config(&self) -> ParseConfig {
        ParseConfig::new(self.subsystem_suffix.as_str())
    }
}

impl Default for ArchiveConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ROOT_DOCUMENT, DEFAULT_SUBSYSTEM_SUFFIX)
    }
}

/// Export format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented text outline of the block forest.
    #[default]
    Outline,
    /// Pretty-printed JSON dump of the model.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Outline => write!(f, "outline"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "outline" => Ok(Self::Outline),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown output format `{s}`")),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    /// Default [`OutputFormat`] when none is given on the command line.
    #[serde(default)]
    format: OutputFormat,
}

impl OutputConfig {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Returns the default [`OutputFormat`].
    pub fn format(&self) -> OutputFormat {
        self.format
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("outline".parse::<OutputFormat>(), Ok(OutputFormat::Outline));
        assert!("svg".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_parse_config_uses_suffix() {
        let archive = ArchiveConfig::new("top.model", ".model");

        assert_eq!(archive.parse_config().document_name("child"), "child.model");
    }
}
