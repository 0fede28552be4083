//! Error and diagnostic system for the Blockforest parser.
//!
//! This module provides an error handling system with:
//! - Error codes for documentation and searchability
//! - Labeled spans pointing into the offending document
//! - The name and text of that document, for snippet rendering
//!
//! # Overview
//!
//! The error system is built around the [`Diagnostic`] type, which represents
//! a single error message with an error code, source locations, and help text.
//! A failed build returns a [`ParseError`] wrapping the diagnostic together
//! with the document it points into.
//!
//! # Example
//!
//! ```
//! # use blockforest_parser::{Diagnostic, ErrorCode};
//! # use blockforest_parser::Span;
//!
//! let span = Span::new(120..158);
//!
//! let diag = Diagnostic::error("subsystem document `system_7.xml` not found")
//!     .with_code(ErrorCode::E001)
//!     .with_label(span, "referenced here")
//!     .with_help("check that the archive contains the referenced document");
//! ```

mod diagnostic;
mod error_code;
mod label;
mod parse_error;

pub(crate) use parse_error::Result;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::{ParseError, SourceDocument};
