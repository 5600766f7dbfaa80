//! Structured errors for display by a UI host
//!
//! Engine failures are typed at the source and converted into this shape at
//! the boundary, so every host renders the same code, message and hint.

use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const UNKNOWN_CATEGORY: &str = "UNKNOWN_CATEGORY";
    pub const UNIT_NOT_IN_CATEGORY: &str = "UNIT_NOT_IN_CATEGORY";
    pub const INVALID_VALUE: &str = "INVALID_VALUE";
    pub const PARSE_ERROR: &str = "PARSE_ERROR";
    pub const ARG_TYPE: &str = "ARG_TYPE";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Request failed; the caller can fix the input and retry
    Error,
    /// Host cannot continue serving
    Fatal,
}

/// Structured, user-facing error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitconvError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Severity level
    pub severity: Severity,
}

impl UnitconvError {
    /// Create a new error
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            severity: Severity::Error,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: set severity
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    // ========== Common Error Constructors ==========

    pub fn unknown_category(name: &str) -> Self {
        Self::new(codes::UNKNOWN_CATEGORY, format!("Unknown category: {}", name))
            .with_suggestion("Use list_categories to see the supported categories")
    }

    pub fn unit_not_in_category(unit: &str, category: &str) -> Self {
        Self::new(
            codes::UNIT_NOT_IN_CATEGORY,
            format!("Unit '{}' is not a {} unit", unit, category),
        )
        .with_suggestion(format!("Use list_units(\"{}\") to see valid units", category))
    }

    pub fn invalid_value(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_VALUE, format!("Invalid value: {}", details.into()))
            .with_suggestion("Enter a finite number")
    }

    pub fn parse_error(details: impl Into<String>) -> Self {
        Self::new(codes::PARSE_ERROR, format!("Parse error: {}", details.into()))
            .with_suggestion("Write queries like \"5 km to mi\"")
    }

    pub fn arg_type(tool: &str, arg: &str, expected: &str) -> Self {
        Self::new(
            codes::ARG_TYPE,
            format!("{}: argument '{}' must be {}", tool, arg, expected),
        )
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(codes::INTERNAL, format!("Internal error: {}", details.into()))
            .with_suggestion("This is a bug, please report it")
            .with_severity(Severity::Fatal)
    }
}

impl std::fmt::Display for UnitconvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for UnitconvError {}
