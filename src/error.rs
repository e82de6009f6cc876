//! Error types for the HyperFixi compiler core
//!
//! Structured errors are defined with thiserror; the `hyperfixi` binary
//! propagates them with anyhow. The request pipeline itself never hands
//! these to callers: the orchestrator downgrades every failure into
//! diagnostics on the compile response.

use thiserror::Error;

/// Main error type for HyperFixi operations
#[derive(Error, Debug)]
pub enum HyperfixiError {
    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// No tables are registered for the requested language
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Input could not be split into tokens
    #[error("Tokenize error: {0}")]
    Tokenize(#[from] crate::tokenizer::TokenizeError),

    /// Bracketed explicit syntax was malformed
    #[error("Explicit syntax error: {0}")]
    ExplicitSyntax(#[from] crate::explicit::ExplicitSyntaxError),

    /// Registry construction rejected a pattern or language table
    #[error("Registry error: {0}")]
    Registry(String),

    /// No pattern matched the input
    #[error("No match: {0}")]
    NoMatch(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Result type alias for HyperFixi operations
pub type Result<T> = std::result::Result<T, HyperfixiError>;

/// Convert anyhow::Error to HyperfixiError
impl From<anyhow::Error> for HyperfixiError {
    fn from(err: anyhow::Error) -> Self {
        HyperfixiError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = HyperfixiError::UnsupportedLanguage("xx".to_string());
        assert_eq!(err.to_string(), "Unsupported language: xx");
    }

    #[test]
    fn test_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json");
        assert!(json_err.is_err());

        let err: HyperfixiError = json_err.unwrap_err().into();
        assert!(matches!(err, HyperfixiError::Serialization(_)));
    }
}
