//! Morphological normalization of inflected verb forms
//!
//! Reduces an inflected word (conjugated, polite, progressive, past) to the
//! base form that keyword tables are keyed on. Three steps, in order of
//! trust:
//!
//! 1. Exact lookup in a hand-built irregular-form table
//! 2. Suffix rules, longest suffix first so a short present-tense ending
//!    never masks a longer past-tense one
//! 3. No change (not a failure: the word is simply returned as-is)
//!
//! Normalization feeds keyword lookup only. The tokenizer never passes
//! selectors, numbers or strings through here.

use crate::utils::string::{contains_script, fold_diacritics, Script};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Confidence of an exact table hit
pub const LOOKUP_CONFIDENCE: f32 = 0.95;

/// Confidence of an unchanged word (no penalty)
pub const UNCHANGED_CONFIDENCE: f32 = 1.0;

/// Lower bound for suffix-rule confidence
pub const MIN_RULE_CONFIDENCE: f32 = 0.70;

/// Upper bound for suffix-rule confidence
pub const MAX_RULE_CONFIDENCE: f32 = 0.85;

/// How a normalization result was produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum NormalizationMethod {
    /// Irregular-form table hit
    Lookup,
    /// Suffix rule stripped `removed` and appended `appended`
    Suffix { removed: String, appended: String },
    /// Nothing applied
    Unchanged,
}

/// Extra information about a normalization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizationMetadata {
    pub method: NormalizationMethod,
    /// Human-readable rule label, e.g. "past tense"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
}

/// Result of normalizing one word
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizationResult {
    pub normalized: String,
    pub confidence: f32,
    pub metadata: NormalizationMetadata,
}

impl NormalizationResult {
    pub fn unchanged(word: &str) -> Self {
        Self {
            normalized: word.to_string(),
            confidence: UNCHANGED_CONFIDENCE,
            metadata: NormalizationMetadata {
                method: NormalizationMethod::Unchanged,
                rule: None,
            },
        }
    }

    pub fn was_changed(&self) -> bool {
        self.metadata.method != NormalizationMethod::Unchanged
    }
}

/// Per-language normalizer
pub trait MorphologicalNormalizer: Send + Sync {
    /// Language code this normalizer serves
    fn language(&self) -> &str;

    /// Quick script-membership check
    fn is_normalizable(&self, word: &str) -> bool;

    /// Reduce `word` to its base form
    fn normalize(&self, word: &str) -> NormalizationResult;
}

/// One suffix-stripping rule
#[derive(Debug, Clone, PartialEq)]
pub struct SuffixRule {
    pub suffix: String,
    pub replacement: String,
    pub confidence: f32,
    pub label: &'static str,
    /// Minimum number of characters that must remain before the suffix
    pub min_stem: usize,
}

impl SuffixRule {
    pub fn new(suffix: &str, replacement: &str, confidence: f32, label: &'static str) -> Self {
        Self {
            suffix: fold_diacritics(suffix),
            replacement: replacement.to_string(),
            confidence: confidence.clamp(MIN_RULE_CONFIDENCE, MAX_RULE_CONFIDENCE),
            label,
            min_stem: 1,
        }
    }

    pub fn with_min_stem(mut self, min_stem: usize) -> Self {
        self.min_stem = min_stem;
        self
    }

    fn apply(&self, folded: &str) -> Option<String> {
        let stem = folded.strip_suffix(self.suffix.as_str())?;
        if stem.chars().count() < self.min_stem {
            return None;
        }
        Some(format!("{}{}", stem, self.replacement))
    }
}

/// Table-and-suffix normalizer, configured per language
///
/// Tables and rules are folded and sorted once at construction; `normalize`
/// does no allocation beyond the result string.
pub struct RuleNormalizer {
    language: String,
    script: Script,
    table: HashMap<String, String>,
    rules: Vec<SuffixRule>,
}

impl RuleNormalizer {
    pub fn new(language: impl Into<String>, script: Script) -> Self {
        Self {
            language: language.into(),
            script,
            table: HashMap::new(),
            rules: Vec::new(),
        }
    }

    /// Register irregular `form -> base` pairs
    pub fn with_table(mut self, entries: &[(&str, &str)]) -> Self {
        for (form, base) in entries {
            self.table.insert(fold_diacritics(form), base.to_string());
        }
        self
    }

    /// Register suffix rules; they are re-sorted longest suffix first
    pub fn with_rules(mut self, rules: Vec<SuffixRule>) -> Self {
        self.rules.extend(rules);
        // Stable sort keeps declaration order among equal-length suffixes
        self.rules
            .sort_by(|a, b| b.suffix.chars().count().cmp(&a.suffix.chars().count()));
        self
    }

    pub fn rules(&self) -> &[SuffixRule] {
        &self.rules
    }
}

impl MorphologicalNormalizer for RuleNormalizer {
    fn language(&self) -> &str {
        &self.language
    }

    fn is_normalizable(&self, word: &str) -> bool {
        contains_script(word, self.script)
    }

    fn normalize(&self, word: &str) -> NormalizationResult {
        if !self.is_normalizable(word) {
            return NormalizationResult::unchanged(word);
        }

        let folded = fold_diacritics(word);

        if let Some(base) = self.table.get(&folded) {
            return NormalizationResult {
                normalized: base.clone(),
                confidence: LOOKUP_CONFIDENCE,
                metadata: NormalizationMetadata {
                    method: NormalizationMethod::Lookup,
                    rule: None,
                },
            };
        }

        for rule in &self.rules {
            if let Some(normalized) = rule.apply(&folded) {
                return NormalizationResult {
                    normalized,
                    confidence: rule.confidence,
                    metadata: NormalizationMetadata {
                        method: NormalizationMethod::Suffix {
                            removed: rule.suffix.clone(),
                            appended: rule.replacement.clone(),
                        },
                        rule: Some(rule.label.to_string()),
                    },
                };
            }
        }

        NormalizationResult::unchanged(word)
    }
}
