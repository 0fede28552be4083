//! Error adapter for converting BlockforestError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Parse errors are
//! rendered with a snippet of the document they point into, titled with the
//! document's name.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, NamedSource, SourceSpan};

use blockforest::BlockforestError;
use blockforest_parser::{Diagnostic, ParseError, Span};

/// Adapter for a parser diagnostic.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
    /// Offending document, for displaying snippets
    src: Option<NamedSource<String>>,
}

impl<'a> DiagnosticAdapter<'a> {
    /// Create a new diagnostic adapter for the diagnostic of `err`.
    pub fn new(err: &'a ParseError) -> Self {
        let src = err
            .document()
            .map(|doc| NamedSource::new(doc.name(), doc.text().to_string()));
        Self {
            diag: err.diagnostic(),
            src,
        }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.src.as_ref().map(|src| src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        // Without the document there is nothing to point into.
        self.src.as_ref()?;
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().enumerate().map(|(idx, label)| {
            let span = span_to_miette(label.span());
            let message = Some(label.message().to_string());
            if idx == 0 {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// Adapter for non-diagnostic [`BlockforestError`] variants.
///
/// This adapter handles errors that don't carry document locations, such as
/// I/O, archive and export errors.
pub struct ErrorAdapter<'a>(pub &'a BlockforestError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            BlockforestError::Io(_) => "blockforest::io",
            BlockforestError::Archive(_) => "blockforest::archive",
            BlockforestError::Parse(_) => return None,
            BlockforestError::Config(_) => "blockforest::config",
            BlockforestError::Export(_) => "blockforest::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            BlockforestError::Archive(_) => Some(Box::new(
                "the input must be a zip package containing the model's XML documents",
            )),
            BlockforestError::Config(_) => Some(Box::new(
                "pass a valid TOML file with `--config` or remove the local configuration",
            )),
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
///
/// This enum wraps either a parser diagnostic or a non-diagnostic error,
/// providing a uniform interface for error rendering.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A rich diagnostic with document location information.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A simple error without document location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a blockforest [`Span`] to a miette [`SourceSpan`].
fn span_to_miette(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Convert a [`BlockforestError`] into a reportable error.
pub fn to_reportable(err: &BlockforestError) -> Reportable<'_> {
    match err {
        BlockforestError::Parse(parse_err) => {
            Reportable::Diagnostic(DiagnosticAdapter::new(parse_err))
        }
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}

#[cfg(test)]
mod tests {
    use blockforest::archive::ArchiveError;
    use blockforest_parser::{ErrorCode, SourceDocument};

    use super::*;

    fn parse_error() -> BlockforestError {
        let diag = Diagnostic::error("subsystem document `system_9.xml` not found")
            .with_code(ErrorCode::E001)
            .with_label(Span::new(8..32), "referenced here")
            .with_help("check that the archive contains the referenced document");
        let document = SourceDocument::new(
            "system_root.xml",
            r#"<System><System Ref="system_9"/></System>"#,
        );
        BlockforestError::Parse(ParseError::in_document(diag, document))
    }

    #[test]
    fn test_parse_error_is_a_diagnostic() {
        let err = parse_error();

        let reportable = to_reportable(&err);
        match &reportable {
            Reportable::Diagnostic(d) => {
                assert_eq!(d.to_string(), "subsystem document `system_9.xml` not found");
            }
            Reportable::Error(_) => panic!("Expected Diagnostic"),
        }
        assert_eq!(
            reportable.code().map(|code| code.to_string()),
            Some("E001".to_string())
        );
        assert!(reportable.source_code().is_some());
    }

    #[test]
    fn test_labels_are_primary_first() {
        let err = parse_error();
        let reportable = to_reportable(&err);

        let labels: Vec<_> = reportable.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert!(labels[0].primary());
        assert_eq!(labels[0].label(), Some("referenced here"));
        assert_eq!(labels[0].offset(), 8);
        assert_eq!(labels[0].len(), 24);
    }

    #[test]
    fn test_diagnostic_without_document_has_no_labels() {
        let err = BlockforestError::Parse(ParseError::new(
            Diagnostic::error("root document `system_root.xml` not found")
                .with_code(ErrorCode::E001),
        ));

        let reportable = to_reportable(&err);
        assert!(reportable.source_code().is_none());
        assert!(reportable.labels().is_none());
    }

    #[test]
    fn test_non_parse_error() {
        let err = BlockforestError::Archive(ArchiveError::MissingRoot {
            name: "system_root.xml".to_string(),
        });

        let reportable = to_reportable(&err);
        match &reportable {
            Reportable::Error(e) => {
                assert_eq!(
                    e.to_string(),
                    "model package has no root document `system_root.xml`"
                );
            }
            Reportable::Diagnostic(_) => panic!("Expected Error"),
        }
        assert_eq!(
            reportable.code().map(|code| code.to_string()),
            Some("blockforest::archive".to_string())
        );
    }

    #[test]
    fn test_config_error_code() {
        let err = BlockforestError::Config("Missing configuration file: absent.toml".into());

        let reportable = to_reportable(&err);
        assert!(matches!(reportable, Reportable::Error(_)));
        assert_eq!(
            reportable.code().map(|code| code.to_string()),
            Some("blockforest::config".to_string())
        );
        assert!(reportable.help().is_some());
    }

    #[test]
    fn test_report_renders_document_name() {
        let err = parse_error();
        let reportable = to_reportable(&err);

        let mut out = String::new();
        miette::GraphicalReportHandler::new_themed(miette::GraphicalTheme::unicode_nocolor())
            .render_report(&mut out, &reportable)
            .unwrap();

        assert!(out.contains("system_root.xml"));
        assert!(out.contains("referenced here"));
    }
}
