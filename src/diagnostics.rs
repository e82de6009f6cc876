//! Diagnostics reported alongside every compile, parse and translate result
//!
//! Diagnostics are data, not errors: a successful compile may still carry
//! warnings, and a failed one carries the errors that stopped it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Non-fatal notice; output is still produced
    Warning,
    /// Stops the request at the stage that reported it
    Error,
}

/// Stable diagnostic codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticCode {
    InvalidAction,
    InvalidRoleValue,
    InvalidValueType,
    MissingValue,
    InvalidTrigger,
    CompileWarning,
    CompileError,
    NotInitialized,
    TranslateError,
    InvalidRequest,
    UnsupportedLanguage,
    TokenizeError,
    NoMatch,
    ParseError,
    MissingRole,
    UnexpectedRole,
    LowConfidence,
}

impl DiagnosticCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::InvalidAction => "INVALID_ACTION",
            DiagnosticCode::InvalidRoleValue => "INVALID_ROLE_VALUE",
            DiagnosticCode::InvalidValueType => "INVALID_VALUE_TYPE",
            DiagnosticCode::MissingValue => "MISSING_VALUE",
            DiagnosticCode::InvalidTrigger => "INVALID_TRIGGER",
            DiagnosticCode::CompileWarning => "COMPILE_WARNING",
            DiagnosticCode::CompileError => "COMPILE_ERROR",
            DiagnosticCode::NotInitialized => "NOT_INITIALIZED",
            DiagnosticCode::TranslateError => "TRANSLATE_ERROR",
            DiagnosticCode::InvalidRequest => "INVALID_REQUEST",
            DiagnosticCode::UnsupportedLanguage => "UNSUPPORTED_LANGUAGE",
            DiagnosticCode::TokenizeError => "TOKENIZE_ERROR",
            DiagnosticCode::NoMatch => "NO_MATCH",
            DiagnosticCode::ParseError => "PARSE_ERROR",
            DiagnosticCode::MissingRole => "MISSING_ROLE",
            DiagnosticCode::UnexpectedRole => "UNEXPECTED_ROLE",
            DiagnosticCode::LowConfidence => "LOW_CONFIDENCE",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity level
    pub severity: Severity,
    /// Stable machine-readable code
    pub code: DiagnosticCode,
    /// Human-readable message
    pub message: String,
    /// Optional fix suggestion
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Diagnostic {
    pub fn error(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn warning(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            suggestion: None,
        }
    }

    /// Attach a fix suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let level = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}[{}]: {}", level, self.code, self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

/// True if any diagnostic has error severity
pub fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_serialization() {
        let json = serde_json::to_string(&DiagnosticCode::InvalidAction).unwrap();
        assert_eq!(json, "\"INVALID_ACTION\"");

        let code: DiagnosticCode = serde_json::from_str("\"NOT_INITIALIZED\"").unwrap();
        assert_eq!(code, DiagnosticCode::NotInitialized);
    }

    #[test]
    fn test_diagnostic_json_shape() {
        let diag = Diagnostic::warning(DiagnosticCode::CompileWarning, "unused helper");
        let value = serde_json::to_value(&diag).unwrap();

        assert_eq!(value["severity"], "warning");
        assert_eq!(value["code"], "COMPILE_WARNING");
        assert!(value.get("suggestion").is_none());
    }

    #[test]
    fn test_display_with_suggestion() {
        let diag = Diagnostic::error(DiagnosticCode::MissingRole, "toggle needs a patient")
            .with_suggestion("add a selector such as .active");
        assert_eq!(
            diag.to_string(),
            "error[MISSING_ROLE]: toggle needs a patient (suggestion: add a selector such as .active)"
        );
    }

    #[test]
    fn test_has_errors() {
        let warnings = vec![Diagnostic::warning(DiagnosticCode::UnexpectedRole, "x")];
        assert!(!has_errors(&warnings));

        let mixed = vec![
            Diagnostic::warning(DiagnosticCode::UnexpectedRole, "x"),
            Diagnostic::error(DiagnosticCode::NoMatch, "y"),
        ];
        assert!(has_errors(&mixed));
    }
}
