//! Labeled source spans for diagnostic messages.

use crate::span::Span;

/// A labeled span in a model document.
///
/// ```text
/// error[E001]: subsystem document `system_7.xml` not found
///    ╭─[system_root.xml:4:5]
///  4 │     <System Ref="system_7"/>
///    ·     ────────────┬───────────
///    ·                 ╰── referenced here
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    span: Span,
    message: String,
}

impl Label {
    /// Create a new label.
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }

    /// Get the span this label applies to.
    pub fn span(&self) -> Span {
        self.span
    }

    /// Get the label message.
    pub fn message(&self) -> &str {
        &self.message
    }
}
