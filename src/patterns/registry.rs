//! Pattern registry
//!
//! Patterns are grouped by language and kept sorted by descending priority,
//! then by id, so lookups never sort. Built once at startup and read-only
//! afterwards.

use super::LanguagePattern;
use crate::error::{HyperfixiError, Result};
use crate::types::Action;
use std::collections::{HashMap, HashSet};

/// Store of language patterns
#[derive(Debug, Default, Clone)]
pub struct PatternRegistry {
    by_language: HashMap<String, Vec<LanguagePattern>>,
    ids: HashSet<String>,
}

impl PatternRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pattern; ids must be unique
    pub fn register(&mut self, pattern: LanguagePattern) -> Result<()> {
        if !self.ids.insert(pattern.id.clone()) {
            return Err(HyperfixiError::Registry(format!(
                "Duplicate pattern id '{}'",
                pattern.id
            )));
        }

        let patterns = self.by_language.entry(pattern.language.clone()).or_default();
        patterns.push(pattern);
        patterns.sort_by(|a, b| b.priority.cmp(&a.priority).then_with(|| a.id.cmp(&b.id)));
        Ok(())
    }

    pub fn register_all(&mut self, patterns: impl IntoIterator<Item = LanguagePattern>) -> Result<()> {
        for pattern in patterns {
            self.register(pattern)?;
        }
        Ok(())
    }

    /// Patterns for a language, optionally narrowed to one command,
    /// highest priority first
    pub fn patterns_for(&self, language: &str, command: Option<&Action>) -> Vec<&LanguagePattern> {
        self.by_language
            .get(language)
            .map(|patterns| {
                patterns
                    .iter()
                    .filter(|p| command.map_or(true, |c| &p.command == c))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn get(&self, id: &str) -> Option<&LanguagePattern> {
        self.by_language
            .values()
            .flat_map(|patterns| patterns.iter())
            .find(|p| p.id == id)
    }

    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.by_language.keys().map(String::as_str).collect();
        languages.sort_unstable();
        languages
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn pattern(id: &str, command: Action, priority: i32) -> LanguagePattern {
        LanguagePattern {
            id: id.to_string(),
            language: "en".to_string(),
            command,
            priority,
            template: Vec::new(),
            extraction: BTreeMap::new(),
            defaults: BTreeMap::new(),
        }
    }

    #[test]
    fn test_sorted_by_priority_then_id() {
        let mut registry = PatternRegistry::new();
        registry.register(pattern("b-low", Action::Toggle, 10)).unwrap();
        registry.register(pattern("z-high", Action::Toggle, 100)).unwrap();
        registry.register(pattern("a-low", Action::Toggle, 10)).unwrap();

        let ids: Vec<_> = registry
            .patterns_for("en", None)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, vec!["z-high", "a-low", "b-low"]);
    }

    #[test]
    fn test_registration_order_irrelevant() {
        let mut forward = PatternRegistry::new();
        forward.register(pattern("x", Action::Add, 1)).unwrap();
        forward.register(pattern("y", Action::Add, 2)).unwrap();

        let mut backward = PatternRegistry::new();
        backward.register(pattern("y", Action::Add, 2)).unwrap();
        backward.register(pattern("x", Action::Add, 1)).unwrap();

        let a: Vec<_> = forward.patterns_for("en", None).iter().map(|p| p.id.clone()).collect();
        let b: Vec<_> = backward.patterns_for("en", None).iter().map(|p| p.id.clone()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_command_filter() {
        let mut registry = PatternRegistry::new();
        registry.register(pattern("t", Action::Toggle, 1)).unwrap();
        registry.register(pattern("a", Action::Add, 1)).unwrap();

        let toggles = registry.patterns_for("en", Some(&Action::Toggle));
        assert_eq!(toggles.len(), 1);
        assert_eq!(toggles[0].id, "t");
        assert!(registry.patterns_for("xx", None).is_empty());
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut registry = PatternRegistry::new();
        registry.register(pattern("dup", Action::Toggle, 1)).unwrap();
        assert!(registry.register(pattern("dup", Action::Add, 5)).is_err());
        assert_eq!(registry.len(), 1);
    }
}
