//! # Blockforest Parser
//!
//! Turns a set of named XML model documents into a forest of normalized
//! blocks with resolved ports. Parsing starts at a root document and follows
//! every subsystem reference into the document it names.
//!
//! ## Usage
//!
//! ```
//! # use std::collections::HashMap;
//! # use blockforest_parser::{parse, ParseConfig, ParseError};
//!
//! fn main() -> Result<(), ParseError> {
//!     let mut documents = HashMap::new();
//!     documents.insert(
//!         "system_root.xml".to_string(),
//!         r#"<System>
//!             <Block BlockType="Inport" Name="In1" SID="1"/>
//!             <Block BlockType="Outport" Name="Out1" SID="2"/>
//!             <Line><P Name="Src">1#out:1</P><P Name="Dst">2#in:1</P></Line>
//!         </System>"#
//!             .to_string(),
//!     );
//!
//!     let scope = parse(&documents, "system_root.xml", &ParseConfig::default())?;
//!     assert_eq!(scope.blocks()[1].ports().inputs(), ["1".to_string()]);
//!     Ok(())
//! }
//! ```

mod error;
mod net;
mod normalize;
pub mod resolve;
mod scope;
mod source;
mod span;

pub use error::{Diagnostic, ErrorCode, Label, ParseError, SourceDocument};
pub use source::DocumentSource;
pub use span::Span;

use log::info;

use blockforest_core::{block::Block, net::Net};

use scope::ScopeParser;

/// Suffix appended to subsystem references by default.
pub const DEFAULT_SUBSYSTEM_SUFFIX: &str = ".xml";

/// Parser settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConfig {
    subsystem_suffix: String,
}

impl ParseConfig {
    /// Create a config that maps subsystem references to documents with the
    /// given suffix.
    pub fn new(subsystem_suffix: impl Into<String>) -> Self {
        Self {
            subsystem_suffix: subsystem_suffix.into(),
        }
    }

    pub fn subsystem_suffix(&self) -> &str {
        &self.subsystem_suffix
    }

    /// Document name for a subsystem reference.
    ///
    /// The suffix is not appended again if the reference already ends with it.
    ///
    /// ```
    /// # use blockforest_parser::ParseConfig;
    /// let config = ParseConfig::default();
    /// assert_eq!(config.document_name("system_7"), "system_7.xml");
    /// assert_eq!(config.document_name("system_7.xml"), "system_7.xml");
    /// ```
    pub fn document_name(&self, reference: &str) -> String {
        if reference.ends_with(&self.subsystem_suffix) {
            reference.to_string()
        } else {
            format!("{reference}{}", self.subsystem_suffix)
        }
    }
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SUBSYSTEM_SUFFIX)
    }
}

/// The blocks and nets of one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    blocks: Vec<Block>,
    nets: Vec<Net>,
}

impl Scope {
    pub(crate) fn new(blocks: Vec<Block>, nets: Vec<Net>) -> Self {
        Self { blocks, nets }
    }

    /// Blocks in document order, each with its ports and children.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Raw nets of this document, suffixes stripped.
    pub fn nets(&self) -> &[Net] {
        &self.nets
    }

    pub fn into_parts(self) -> (Vec<Block>, Vec<Net>) {
        (self.blocks, self.nets)
    }
}

/// Parse the model rooted at `root` into a block forest.
///
/// Every `System` reference found on a block is looked up in `source` as a
/// document name built by [`ParseConfig::document_name`], parsed the same way,
/// and attached to the block as its children. Blocks of the root document get
/// the `Parent_SID` value `"root"`.
///
/// # Errors
///
/// Returns a [`ParseError`] if a document is missing ([`ErrorCode::E001`]),
/// is not well-formed XML ([`ErrorCode::E002`]), takes part in a reference
/// cycle ([`ErrorCode::E003`]), or lacks a required field
/// ([`ErrorCode::E100`]).
pub fn parse<S>(source: &S, root: &str, config: &ParseConfig) -> Result<Scope, ParseError>
where
    S: DocumentSource + ?Sized,
{
    info!(root, suffix = config.subsystem_suffix(); "Parsing model");
    let scope = ScopeParser::new(source, config).parse_root(root)?;
    info!(blocks = scope.blocks().len(), nets = scope.nets().len(); "Model parsed");
    Ok(scope)
}
