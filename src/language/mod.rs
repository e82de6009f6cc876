//! Per-language profiles
//!
//! A profile is pure data: word order, marker placement, keyword lexemes per
//! category, role markers, attachable particles and the normalizer for
//! inflected verbs. Everything derived from it (keyword resolver,
//! tokenizer, patterns) is built once by [`crate::registry::Registry`].

mod ar;
mod en;
mod es;
mod ja;
mod ko;
mod tr;

use crate::keywords::{KeywordCategory, KeywordResolver};
use crate::morphology::RuleNormalizer;
use crate::utils::string::{fold_diacritics, Script};
use serde::{Deserialize, Serialize};

/// Basic clause order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum WordOrder {
    Svo,
    Sov,
    Vso,
}

impl WordOrder {
    /// Verb after its arguments
    pub fn verb_final(&self) -> bool {
        matches!(self, WordOrder::Sov)
    }
}

/// Whether role markers precede or follow their value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerPlacement {
    /// Prepositions: `to #box`
    Pre,
    /// Postpositions and case particles: `#box に`
    Post,
}

/// Writing direction; informational only, tokens are always in logical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

/// `(category, english, native lexemes)`
pub type KeywordEntry = (KeywordCategory, &'static str, &'static [&'static str]);

/// `(canonical marker, native forms)`; the first native form is rendered
pub type MarkerEntry = (&'static str, &'static [&'static str]);

/// Static description of one language
#[derive(Debug, Clone)]
pub struct LanguageProfile {
    pub code: &'static str,
    pub name: &'static str,
    pub word_order: WordOrder,
    pub direction: TextDirection,
    pub marker_placement: MarkerPlacement,
    pub case_sensitive: bool,
    pub script: Script,
    pub keywords: &'static [KeywordEntry],
    pub markers: &'static [MarkerEntry],
    /// Direct-object markers (SOV languages only)
    pub object_markers: &'static [&'static str],
    /// Postpositions that close an event clause (SOV languages only)
    pub event_markers: &'static [&'static str],
    /// Particles that may be written attached to the preceding word
    pub particles: &'static [&'static str],
    /// Case suffixes are written after an apostrophe (`#box'a`)
    pub apostrophe_suffixes: bool,
    normalizer: Option<fn() -> RuleNormalizer>,
}

impl LanguageProfile {
    /// Build the keyword resolver for this language
    pub fn keyword_resolver(&self) -> KeywordResolver {
        let mut resolver = KeywordResolver::new(self.code, self.case_sensitive);
        for (category, english, lexemes) in self.keywords {
            for lexeme in *lexemes {
                resolver.register(lexeme, *category, english);
            }
        }
        resolver
    }

    /// Build the morphological normalizer, if the language has one
    pub fn normalizer(&self) -> Option<RuleNormalizer> {
        self.normalizer.map(|build| build())
    }

    /// Native forms of a canonical marker
    ///
    /// Falls back to the canonical English word when the language has no entry.
    pub fn marker_forms(&self, canonical: &str) -> Vec<String> {
        self.markers
            .iter()
            .find(|(name, _)| *name == canonical)
            .map(|(_, forms)| forms.iter().map(|f| f.to_string()).collect())
            .unwrap_or_else(|| vec![canonical.to_string()])
    }

    /// Lexemes for one English keyword in one category, declaration order
    pub fn lexemes(&self, category: KeywordCategory, english: &str) -> Vec<&'static str> {
        self.keywords
            .iter()
            .filter(|(c, e, _)| *c == category && *e == english)
            .flat_map(|(_, _, lexemes)| lexemes.iter().copied())
            .collect()
    }

    /// Preferred native lexeme for rendering
    pub fn preferred_lexeme(&self, category: KeywordCategory, english: &str) -> Option<&'static str> {
        self.lexemes(category, english).into_iter().next()
    }

    /// True if `word` is one of this language's attachable particles
    pub fn is_particle(&self, word: &str) -> bool {
        let folded = fold_diacritics(word);
        self.particles.iter().any(|p| fold_diacritics(p) == folded)
    }
}

/// Codes of every built-in language
pub const SUPPORTED_LANGUAGES: [&str; 6] = ["en", "es", "ja", "ko", "tr", "ar"];

/// Look up a built-in profile by language code
pub fn profile(code: &str) -> Option<LanguageProfile> {
    match code {
        "en" => Some(en::profile()),
        "es" => Some(es::profile()),
        "ja" => Some(ja::profile()),
        "ko" => Some(ko::profile()),
        "tr" => Some(tr::profile()),
        "ar" => Some(ar::profile()),
        _ => None,
    }
}
