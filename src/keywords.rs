//! Keyword tables and cross-category conflict resolution
//!
//! Each language maps native lexemes to one or more `(category, english)`
//! pairs. A lexeme can legitimately mean different things in different
//! grammatical categories (Spanish `en` is both the event keyword "on" and
//! the preposition "in"); resolution picks the mapping from the
//! highest-priority category:
//!
//! ```text
//! commands > logical > events > values > temporal > modifiers > attributes
//! ```
//!
//! Mappings in different categories that agree on the English word are not
//! conflicts.

use crate::utils::string::fold_diacritics;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Keyword category, declared in resolution priority order (highest first)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeywordCategory {
    Commands,
    Logical,
    Events,
    Values,
    Temporal,
    Modifiers,
    Attributes,
}

impl KeywordCategory {
    /// All categories, highest priority first
    pub const PRIORITY_ORDER: [KeywordCategory; 7] = [
        KeywordCategory::Commands,
        KeywordCategory::Logical,
        KeywordCategory::Events,
        KeywordCategory::Values,
        KeywordCategory::Temporal,
        KeywordCategory::Modifiers,
        KeywordCategory::Attributes,
    ];

    /// Priority rank; 0 is the highest
    pub fn rank(&self) -> usize {
        *self as usize
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            KeywordCategory::Commands => "commands",
            KeywordCategory::Logical => "logical",
            KeywordCategory::Events => "events",
            KeywordCategory::Values => "values",
            KeywordCategory::Temporal => "temporal",
            KeywordCategory::Modifiers => "modifiers",
            KeywordCategory::Attributes => "attributes",
        }
    }
}

impl fmt::Display for KeywordCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One meaning of a lexeme
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeywordMapping {
    pub category: KeywordCategory,
    pub english: String,
}

/// Outcome of resolving a lexeme
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedKeyword {
    pub lexeme: String,
    pub category: KeywordCategory,
    pub english: String,
    /// True if the lexeme had mappings to other English words
    pub conflicted: bool,
}

/// A lexeme with competing meanings, for diagnostics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordConflict {
    pub lexeme: String,
    pub mappings: Vec<KeywordMapping>,
    pub winner: KeywordMapping,
}

/// Per-language lexeme table with conflict resolution
#[derive(Debug, Clone)]
pub struct KeywordResolver {
    language: String,
    case_sensitive: bool,
    /// Folded lexeme -> mappings, kept sorted by category priority
    entries: HashMap<String, Vec<KeywordMapping>>,
    /// Folded lexeme -> first surface form registered
    surfaces: HashMap<String, String>,
}

impl KeywordResolver {
    pub fn new(language: impl Into<String>, case_sensitive: bool) -> Self {
        Self {
            language: language.into(),
            case_sensitive,
            entries: HashMap::new(),
            surfaces: HashMap::new(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Key used for storage and lookup
    pub fn lookup_key(&self, lexeme: &str) -> String {
        if self.case_sensitive {
            lexeme.to_string()
        } else {
            fold_diacritics(lexeme)
        }
    }

    /// Register a mapping; duplicates are ignored
    pub fn register(&mut self, lexeme: &str, category: KeywordCategory, english: &str) {
        let key = self.lookup_key(lexeme);
        self.surfaces
            .entry(key.clone())
            .or_insert_with(|| lexeme.to_string());

        let mapping = KeywordMapping {
            category,
            english: english.to_string(),
        };
        let mappings = self.entries.entry(key).or_default();
        if !mappings.contains(&mapping) {
            mappings.push(mapping);
            mappings.sort_by(|a, b| {
                a.category
                    .cmp(&b.category)
                    .then_with(|| a.english.cmp(&b.english))
            });
        }
    }

    /// All mappings of a lexeme, highest priority first
    pub fn mappings(&self, lexeme: &str) -> &[KeywordMapping] {
        self.entries
            .get(&self.lookup_key(lexeme))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Resolve a lexeme to its single canonical meaning
    pub fn resolve(&self, lexeme: &str) -> Option<ResolvedKeyword> {
        let mappings = self.mappings(lexeme);
        let winner = mappings.first()?;
        let conflicted = mappings.iter().any(|m| m.english != winner.english);

        Some(ResolvedKeyword {
            lexeme: lexeme.to_string(),
            category: winner.category,
            english: winner.english.clone(),
            conflicted,
        })
    }

    pub fn contains(&self, lexeme: &str) -> bool {
        self.entries.contains_key(&self.lookup_key(lexeme))
    }

    /// Every lexeme whose mappings disagree on the English word, sorted by lexeme
    pub fn conflicts(&self) -> Vec<KeywordConflict> {
        let mut conflicts: Vec<KeywordConflict> = self
            .entries
            .iter()
            .filter_map(|(key, mappings)| {
                let winner = mappings.first()?;
                if mappings.iter().all(|m| m.english == winner.english) {
                    return None;
                }
                Some(KeywordConflict {
                    lexeme: self.surfaces.get(key).cloned().unwrap_or_else(|| key.clone()),
                    mappings: mappings.clone(),
                    winner: winner.clone(),
                })
            })
            .collect();
        conflicts.sort_by(|a, b| a.lexeme.cmp(&b.lexeme));
        conflicts
    }

    /// Surface lexemes mapping to `english` in `category`, sorted
    pub fn lexemes_for(&self, category: KeywordCategory, english: &str) -> Vec<&str> {
        let mut lexemes: Vec<&str> = self
            .entries
            .iter()
            .filter(|(_, mappings)| {
                mappings
                    .iter()
                    .any(|m| m.category == category && m.english == english)
            })
            .filter_map(|(key, _)| self.surfaces.get(key).map(String::as_str))
            .collect();
        lexemes.sort_unstable();
        lexemes
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spanish() -> KeywordResolver {
        let mut resolver = KeywordResolver::new("es", false);
        resolver.register("en", KeywordCategory::Modifiers, "in");
        resolver.register("en", KeywordCategory::Commands, "on");
        resolver.register("alternar", KeywordCategory::Commands, "toggle");
        resolver.register("clic", KeywordCategory::Events, "click");
        resolver.register("clic", KeywordCategory::Attributes, "click");
        resolver
    }

    #[test]
    fn test_commands_beat_modifiers() {
        let resolved = spanish().resolve("en").unwrap();
        assert_eq!(resolved.english, "on");
        assert_eq!(resolved.category, KeywordCategory::Commands);
        assert!(resolved.conflicted);
    }

    #[test]
    fn test_registration_order_irrelevant() {
        let mut resolver = KeywordResolver::new("es", false);
        resolver.register("en", KeywordCategory::Commands, "on");
        resolver.register("en", KeywordCategory::Modifiers, "in");
        assert_eq!(resolver.resolve("en").unwrap().english, "on");
    }

    #[test]
    fn test_same_english_is_not_conflict() {
        let resolved = spanish().resolve("clic").unwrap();
        assert_eq!(resolved.category, KeywordCategory::Events);
        assert!(!resolved.conflicted);
    }

    #[test]
    fn test_conflicts_listing() {
        let conflicts = spanish().conflicts();
        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].lexeme, "en");
        assert_eq!(conflicts[0].winner.english, "on");
        assert_eq!(conflicts[0].mappings.len(), 2);
    }

    #[test]
    fn test_lookup_is_accent_and_case_insensitive() {
        let mut resolver = KeywordResolver::new("es", false);
        resolver.register("añadir", KeywordCategory::Commands, "add");
        assert_eq!(resolver.resolve("AÑADIR").unwrap().english, "add");
        assert_eq!(resolver.resolve("anadir").unwrap().english, "add");
    }

    #[test]
    fn test_case_sensitive_language() {
        let mut resolver = KeywordResolver::new("xx", true);
        resolver.register("Toggle", KeywordCategory::Commands, "toggle");
        assert!(resolver.resolve("toggle").is_none());
        assert!(resolver.resolve("Toggle").is_some());
    }

    #[test]
    fn test_category_priority_order() {
        let ranks: Vec<_> = KeywordCategory::PRIORITY_ORDER
            .iter()
            .map(|c| c.rank())
            .collect();
        assert_eq!(ranks, vec![0, 1, 2, 3, 4, 5, 6]);
        assert!(KeywordCategory::Commands < KeywordCategory::Attributes);
    }

    #[test]
    fn test_lexemes_for() {
        let resolver = spanish();
        assert_eq!(
            resolver.lexemes_for(KeywordCategory::Commands, "toggle"),
            vec!["alternar"]
        );
    }
}
