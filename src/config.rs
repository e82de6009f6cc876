// Compiler Configuration
//
// Service-wide settings: confidence threshold, cache size, enabled
// languages and the compile options applied when a request leaves them unset.

use crate::cache::DEFAULT_CACHE_SIZE;
use crate::language::SUPPORTED_LANGUAGES;
use crate::types::CompileOptions;
use crate::validation::DEFAULT_CONFIDENCE_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Main compiler configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Minimum parser confidence accepted by the validation gate
    pub confidence_threshold: f32,

    /// Maximum number of cached compile responses
    pub cache_max_size: usize,

    /// Language assumed for natural-language requests that name none
    pub default_language: String,

    /// Languages whose tables are built at startup
    pub languages: Vec<String>,

    /// Options applied when a request leaves them unset
    pub compile: CompileOptions,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            cache_max_size: DEFAULT_CACHE_SIZE,
            default_language: "en".to_string(),
            languages: SUPPORTED_LANGUAGES.iter().map(|l| l.to_string()).collect(),
            compile: CompileOptions::default(),
        }
    }
}

impl CompilerConfig {
    /// Load configuration from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: CompilerConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(ConfigError::ValidationError(format!(
                "confidence_threshold must be between 0 and 1, got {}",
                self.confidence_threshold
            )));
        }

        if self.cache_max_size == 0 {
            return Err(ConfigError::ValidationError(
                "cache_max_size must be at least 1".to_string(),
            ));
        }

        if self.languages.is_empty() {
            return Err(ConfigError::ValidationError(
                "at least one language must be enabled".to_string(),
            ));
        }

        for language in &self.languages {
            if !SUPPORTED_LANGUAGES.contains(&language.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "unsupported language '{}' (supported: {})",
                    language,
                    SUPPORTED_LANGUAGES.join(", ")
                )));
            }
        }

        if !self.languages.contains(&self.default_language) {
            return Err(ConfigError::ValidationError(format!(
                "default_language '{}' is not in languages",
                self.default_language
            )));
        }

        if let Some(level) = self.compile.optimization {
            if level > 3 {
                return Err(ConfigError::ValidationError(format!(
                    "compile.optimization must be 0-3, got {}",
                    level
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = CompilerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.confidence_threshold, 0.7);
        assert_eq!(config.cache_max_size, 500);
        assert_eq!(config.default_language, "en");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CompilerConfig::from_toml(
            r#"
            confidence_threshold = 0.5
            languages = ["es", "tr"]
            default_language = "es"

            [compile]
            minify = true
            "#,
        )
        .unwrap();
        assert_eq!(config.confidence_threshold, 0.5);
        assert_eq!(config.cache_max_size, 500);
        assert_eq!(config.compile.minify, Some(true));
        assert_eq!(config.compile.target, None);
    }

    #[test]
    fn test_invalid_values_rejected() {
        for toml in [
            "confidence_threshold = 1.5",
            "cache_max_size = 0",
            "languages = []",
            "languages = [\"en\", \"xx\"]",
            "default_language = \"ja\"\nlanguages = [\"en\"]",
            "[compile]\noptimization = 9",
        ] {
            assert!(
                matches!(CompilerConfig::from_toml(toml), Err(ConfigError::ValidationError(_))),
                "{}",
                toml
            );
        }
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            CompilerConfig::from_toml("confidence_threshold = "),
            Err(ConfigError::ParseError(_))
        ));
    }
}
