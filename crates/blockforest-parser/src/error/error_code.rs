//! Error codes for the Blockforest diagnostic system.
//!
//! Error codes are organized by phase:
//! - `E0xx` - Document errors (lookup, XML syntax, reference graph)
//! - `E1xx` - Record normalization errors

use std::fmt;

/// Error codes for categorizing diagnostic errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Document Errors (E0xx)
    // =========================================================================
    /// Missing document.
    ///
    /// The root document or a subsystem reference names a document the
    /// document source does not contain.
    E001,

    /// Malformed document.
    ///
    /// A document is not well-formed XML.
    E002,

    /// Subsystem reference cycle.
    ///
    /// A subsystem document references, directly or indirectly, a document
    /// that is still being resolved.
    E003,

    // =========================================================================
    // Normalization Errors (E1xx)
    // =========================================================================
    /// Missing required field.
    ///
    /// An element whose presence implies a mandatory child lacks it, e.g. a
    /// mask parameter without a `Value`.
    E100,
}

impl ErrorCode {
    /// Returns the numeric code as a string (e.g., "E001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E003 => "E003",
            ErrorCode::E100 => "E100",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "missing document",
            ErrorCode::E002 => "malformed document",
            ErrorCode::E003 => "subsystem reference cycle",
            ErrorCode::E100 => "missing required field",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E003.to_string(), "E003");
        assert_eq!(ErrorCode::E100.to_string(), "E100");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E001.description(), "missing document");
        assert_eq!(ErrorCode::E003.description(), "subsystem reference cycle");
        assert_eq!(ErrorCode::E100.description(), "missing required field");
    }
}
