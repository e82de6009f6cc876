//! Shared, immutable language tables and patterns
//!
//! A [`Registry`] is built once at startup and then only read. It owns one
//! [`LanguageTables`] per enabled language (profile, keyword table,
//! normalizer and extractor list, all inside the tokenizer) plus the
//! [`PatternRegistry`] generated from the command schemas. Wrap it in an
//! `Arc` to share it between threads; no locking is needed.

use crate::error::{HyperfixiError, Result};
use crate::keywords::KeywordResolver;
use crate::language::{self, LanguageProfile, SUPPORTED_LANGUAGES};
use crate::patterns::{generate_patterns, PatternRegistry};
use crate::tokenizer::Tokenizer;
use std::collections::HashMap;
use tracing::{debug, info};

/// Per-language lookup tables
pub struct LanguageTables {
    tokenizer: Tokenizer,
}

impl LanguageTables {
    fn new(profile: LanguageProfile) -> Self {
        Self {
            tokenizer: Tokenizer::new(profile),
        }
    }

    pub fn profile(&self) -> &LanguageProfile {
        self.tokenizer.profile()
    }

    pub fn keywords(&self) -> &KeywordResolver {
        self.tokenizer.keywords()
    }

    pub fn tokenizer(&self) -> &Tokenizer {
        &self.tokenizer
    }
}

/// Every table the pipeline reads
pub struct Registry {
    languages: HashMap<String, LanguageTables>,
    patterns: PatternRegistry,
}

impl Registry {
    /// Build tables for the given language codes
    ///
    /// Fails on a code with no language profile.
    pub fn with_languages<S: AsRef<str>>(codes: &[S]) -> Result<Self> {
        let mut languages = HashMap::new();
        let mut patterns = PatternRegistry::new();

        for code in codes {
            let code = code.as_ref();
            if languages.contains_key(code) {
                continue;
            }
            let profile = language::profile(code)
                .ok_or_else(|| HyperfixiError::UnsupportedLanguage(code.to_string()))?;

            let generated = generate_patterns(&profile);
            debug!("Generated {} patterns for {}", generated.len(), code);
            patterns.register_all(generated)?;
            languages.insert(code.to_string(), LanguageTables::new(profile));
        }

        info!(
            "Registry built: {} languages, {} patterns",
            languages.len(),
            patterns.len()
        );

        Ok(Self { languages, patterns })
    }

    /// Tables for every bundled language
    pub fn all() -> Result<Self> {
        Self::with_languages(&SUPPORTED_LANGUAGES)
    }

    pub fn language(&self, code: &str) -> Option<&LanguageTables> {
        self.languages.get(code)
    }

    pub fn supports(&self, code: &str) -> bool {
        self.languages.contains_key(code)
    }

    /// Enabled language codes, sorted
    pub fn languages(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        codes.sort_unstable();
        codes
    }

    pub fn patterns(&self) -> &PatternRegistry {
        &self.patterns
    }
}
