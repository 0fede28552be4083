//! The ParseError type returned by a failed model build.
//!
//! [`ParseError`] wraps the [`Diagnostic`] that aborted the build and, when the
//! diagnostic points into a document, that document's name and text.

use std::fmt;

use crate::error::Diagnostic;

/// A type alias for `Result<T, ParseError>`.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Name and full text of the document a diagnostic points into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    name: String,
    text: String,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }

    /// Logical document name (e.g. `system_root.xml`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Document text the diagnostic spans refer to.
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Error type for the model build.
#[derive(Debug)]
pub struct ParseError {
    diagnostic: Box<Diagnostic>,
    document: Option<SourceDocument>,
}

impl ParseError {
    /// Create a parse error that is not tied to a document.
    pub fn new(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostic: Box::new(diagnostic),
            document: None,
        }
    }

    /// Create a parse error whose labels point into `document`.
    pub fn in_document(diagnostic: Diagnostic, document: SourceDocument) -> Self {
        Self {
            diagnostic: Box::new(diagnostic),
            document: Some(document),
        }
    }

    /// The diagnostic that aborted the build.
    pub fn diagnostic(&self) -> &Diagnostic {
        &self.diagnostic
    }

    /// The document the diagnostic's labels point into, if any.
    pub fn document(&self) -> Option<&SourceDocument> {
        self.document.as_ref()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diagnostic)?;
        if let Some(document) = &self.document {
            write!(f, " (in `{}`)", document.name)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self::new(diagnostic)
    }
}
