//! Language-aware tokenizer
//!
//! Turns surface text into tokens in logical order. Words are classified
//! against the language's keyword table, first as written, then after
//! morphological normalization; keyword tokens carry their canonical
//! English value. Particles written attached to a word (`カウンターを`,
//! `카운터를`) are split off when the whole word is not itself a keyword.

pub mod extractors;

use crate::keywords::{KeywordCategory, KeywordResolver};
use crate::language::{LanguageProfile, TextDirection};
use crate::morphology::{MorphologicalNormalizer, UNCHANGED_CONFIDENCE};
use crate::utils::string::{fold_diacritics, truncate_at_char_boundary};
use extractors::{default_extractors, Extractor, RawKind};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, trace};

/// Tokenization failure
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenizeError {
    #[error("No token can be read at byte {position} (near '{snippet}')")]
    NoLexableToken { position: usize, snippet: String },
}

/// Classified token kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "category", rename_all = "lowercase")]
pub enum TokenKind {
    Keyword(KeywordCategory),
    Selector,
    Identifier,
    Number,
    String,
    Particle,
    Expression,
    Punctuation,
}

/// Byte range in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// One token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    /// Canonical value: English keyword, unquoted string, selector text
    pub value: String,
    /// Surface form as written
    pub original: String,
    pub span: Span,
    /// Normalization confidence; 1.0 unless an inflected form was reduced
    pub confidence: f32,
    pub direction: TextDirection,
}

impl Token {
    pub fn is_keyword(&self, category: KeywordCategory) -> bool {
        self.kind == TokenKind::Keyword(category)
    }

    /// Folded surface form, for marker and literal comparison
    pub fn folded(&self) -> String {
        fold_diacritics(&self.original)
    }
}

/// Tokenizer for one language
///
/// Owns the language's keyword resolver, normalizer and extractor list,
/// all built once.
pub struct Tokenizer {
    profile: LanguageProfile,
    keywords: KeywordResolver,
    normalizer: Option<Box<dyn MorphologicalNormalizer>>,
    extractors: Vec<Box<dyn Extractor>>,
    /// Attachable particles, longest first
    particles: Vec<&'static str>,
}

impl Tokenizer {
    pub fn new(profile: LanguageProfile) -> Self {
        let keywords = profile.keyword_resolver();
        let normalizer = profile
            .normalizer()
            .map(|n| Box::new(n) as Box<dyn MorphologicalNormalizer>);
        let extractors = default_extractors(&profile);
        let mut particles = profile.particles.to_vec();
        particles.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));

        Self {
            profile,
            keywords,
            normalizer,
            extractors,
            particles,
        }
    }

    pub fn profile(&self) -> &LanguageProfile {
        &self.profile
    }

    pub fn keywords(&self) -> &KeywordResolver {
        &self.keywords
    }

    pub fn normalizer(&self) -> Option<&dyn MorphologicalNormalizer> {
        self.normalizer.as_deref()
    }

    pub fn extractor_names(&self) -> Vec<&'static str> {
        self.extractors.iter().map(|e| e.name()).collect()
    }

    /// Tokenize `input`
    ///
    /// Fails only if some non-whitespace character cannot start any token.
    pub fn tokenize(&self, input: &str) -> Result<Vec<Token>, TokenizeError> {
        let mut tokens = Vec::new();
        let mut pos = 0;

        while let Some(c) = input[pos..].chars().next() {
            if c.is_whitespace() {
                pos += c.len_utf8();
                continue;
            }

            let extraction = self
                .extractors
                .iter()
                .filter(|e| e.can_extract(input, pos))
                .find_map(|e| e.extract(input, pos));

            let Some(extraction) = extraction else {
                let snippet = truncate_at_char_boundary(&input[pos..], 12);
                debug!("Tokenize failed in {} at byte {}: '{}'", self.profile.code, pos, snippet);
                return Err(TokenizeError::NoLexableToken {
                    position: pos,
                    snippet,
                });
            };

            let span = Span {
                start: pos,
                end: pos + extraction.length,
            };
            let original = input[span.start..span.end].to_string();

            match extraction.kind {
                RawKind::Word => tokens.extend(self.classify_word(&original, span)),
                raw => {
                    let kind = match raw {
                        RawKind::Selector => TokenKind::Selector,
                        RawKind::String => TokenKind::String,
                        RawKind::Number => TokenKind::Number,
                        RawKind::Variable => TokenKind::Identifier,
                        RawKind::Expression => TokenKind::Expression,
                        RawKind::Particle => TokenKind::Particle,
                        RawKind::Punctuation | RawKind::Word => TokenKind::Punctuation,
                    };
                    tokens.push(self.token(kind, extraction.value, original, span, UNCHANGED_CONFIDENCE));
                }
            }

            pos = span.end;
        }

        trace!("Tokenized {} tokens ({})", tokens.len(), self.profile.code);
        Ok(tokens)
    }

    fn token(&self, kind: TokenKind, value: String, original: String, span: Span, confidence: f32) -> Token {
        Token {
            kind,
            value,
            original,
            span,
            confidence,
            direction: self.profile.direction,
        }
    }

    /// Keyword lookup as written, then after normalization
    fn lookup(&self, word: &str) -> Option<(KeywordCategory, String, f32)> {
        if let Some(resolved) = self.keywords.resolve(word) {
            return Some((resolved.category, resolved.english, UNCHANGED_CONFIDENCE));
        }

        let normalizer = self.normalizer.as_ref()?;
        if !normalizer.is_normalizable(word) {
            return None;
        }
        let result = normalizer.normalize(word);
        if !result.was_changed() {
            return None;
        }
        self.keywords
            .resolve(&result.normalized)
            .map(|resolved| (resolved.category, resolved.english, result.confidence))
    }

    fn classify_word(&self, word: &str, span: Span) -> Vec<Token> {
        if self.profile.is_particle(word) {
            return vec![self.token(TokenKind::Particle, word.to_string(), word.to_string(), span, UNCHANGED_CONFIDENCE)];
        }

        if let Some((category, english, confidence)) = self.lookup(word) {
            return vec![self.token(TokenKind::Keyword(category), english, word.to_string(), span, confidence)];
        }

        for particle in &self.particles {
            let Some(stem) = word.strip_suffix(particle) else {
                continue;
            };
            if stem.is_empty() {
                continue;
            }
            let split = span.start + stem.len();
            let stem_span = Span {
                start: span.start,
                end: split,
            };
            let particle_span = Span {
                start: split,
                end: span.end,
            };
            let stem_token = match self.lookup(stem) {
                Some((category, english, confidence)) => {
                    self.token(TokenKind::Keyword(category), english, stem.to_string(), stem_span, confidence)
                }
                None => self.token(TokenKind::Identifier, stem.to_string(), stem.to_string(), stem_span, UNCHANGED_CONFIDENCE),
            };
            return vec![
                stem_token,
                self.token(TokenKind::Particle, particle.to_string(), particle.to_string(), particle_span, UNCHANGED_CONFIDENCE),
            ];
        }

        vec![self.token(TokenKind::Identifier, word.to_string(), word.to_string(), span, UNCHANGED_CONFIDENCE)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language;

    fn tokenizer(code: &str) -> Tokenizer {
        Tokenizer::new(language::profile(code).unwrap())
    }

    fn values(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.value.as_str()).collect()
    }

    #[test]
    fn test_english_command() {
        let tokens = tokenizer("en").tokenize("on click toggle .active").unwrap();
        assert_eq!(values(&tokens), vec!["on", "click", "toggle", ".active"]);
        assert_eq!(tokens[1].kind, TokenKind::Keyword(KeywordCategory::Events));
        assert_eq!(tokens[3].kind, TokenKind::Selector);
        assert_eq!(tokens[3].span, Span { start: 16, end: 23 });
    }

    #[test]
    fn test_spanish_ambiguous_en_resolves_to_on() {
        let tokens = tokenizer("es").tokenize("en clic alternar .active").unwrap();
        assert_eq!(values(&tokens), vec!["on", "click", "toggle", ".active"]);
        assert_eq!(tokens[0].kind, TokenKind::Keyword(KeywordCategory::Commands));
    }

    #[test]
    fn test_normalized_keyword_carries_confidence() {
        let tokens = tokenizer("es").tokenize("alterna .active").unwrap();
        assert_eq!(tokens[0].value, "toggle");
        assert_eq!(tokens[0].original, "alterna");
        assert!(tokens[0].confidence < 1.0);
        assert!(tokens[0].confidence >= 0.70);
    }

    #[test]
    fn test_turkish_apostrophe_suffix() {
        let tokens = tokenizer("tr").tokenize("#kutu'ya .aktif'i ekle").unwrap();
        assert_eq!(values(&tokens), vec!["#kutu", "ya", ".aktif", "i", "add"]);
        assert_eq!(tokens[1].kind, TokenKind::Particle);
    }

    #[test]
    fn test_turkish_identifier_not_mangled() {
        let tokens = tokenizer("tr").tokenize("counter azalt").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::Identifier);
        assert_eq!(tokens[0].value, "counter");
        assert_eq!(tokens[1].value, "decrement");
    }

    #[test]
    fn test_japanese_attached_particle() {
        let tokens = tokenizer("ja").tokenize("カウンターを 増やして").unwrap();
        assert_eq!(values(&tokens), vec!["カウンター", "を", "increment"]);
        assert_eq!(tokens[1].kind, TokenKind::Particle);
        assert_eq!(tokens[1].span.start, "カウンター".len());
    }

    #[test]
    fn test_script_boundary_particle() {
        let tokens = tokenizer("ja").tokenize("counterを 減らす").unwrap();
        assert_eq!(values(&tokens), vec!["counter", "を", "decrement"]);
    }

    #[test]
    fn test_korean_polite_form() {
        let tokens = tokenizer("ko").tokenize(".active를 토글하세요").unwrap();
        assert_eq!(values(&tokens), vec![".active", "를", "toggle"]);
    }

    #[test]
    fn test_arabic_harakat_folded() {
        let tokens = tokenizer("ar").tokenize("بَدِّلْ .active").unwrap();
        assert_eq!(tokens[0].value, "toggle");
        assert_eq!(tokens[0].direction, TextDirection::Rtl);
    }

    #[test]
    fn test_strings_numbers_expressions() {
        let tokens = tokenizer("en").tokenize("put \"hi there\" into #out wait 2s log (x + 1) :count 5").unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Keyword(KeywordCategory::Commands),
                TokenKind::String,
                TokenKind::Keyword(KeywordCategory::Modifiers),
                TokenKind::Selector,
                TokenKind::Keyword(KeywordCategory::Commands),
                TokenKind::String,
                TokenKind::Keyword(KeywordCategory::Commands),
                TokenKind::Expression,
                TokenKind::Identifier,
                TokenKind::Number,
            ]
        );
        assert_eq!(tokens[1].value, "hi there");
        assert_eq!(tokens[7].value, "x + 1");
    }

    #[test]
    fn test_unterminated_string_fails() {
        let err = tokenizer("en").tokenize("log \"oops").unwrap_err();
        assert_eq!(
            err,
            TokenizeError::NoLexableToken {
                position: 4,
                snippet: "\"oops".to_string()
            }
        );
    }

    #[test]
    fn test_spanish_inverted_marks_and_mixed_identifiers() {
        let tokens = tokenizer("es").tokenize("¿alternar item2?").unwrap();
        assert_eq!(values(&tokens), vec!["¿", "toggle", "item2", "?"]);
        assert_eq!(tokens[0].kind, TokenKind::Punctuation);
        assert_eq!(tokens[2].kind, TokenKind::Identifier);
    }

    #[test]
    fn test_arabic_indic_number() {
        let tokens = tokenizer("ar").tokenize("بدّل .active ٣").unwrap();
        let number = tokens.last().unwrap();
        assert_eq!(number.kind, TokenKind::Number);
        assert_eq!(number.value, "3");
        assert_eq!(number.original, "٣");
    }

    #[test]
    fn test_selector_before_identifier() {
        let names = tokenizer("tr").extractor_names();
        let selector = names.iter().position(|n| *n == "selector").unwrap();
        let word = names.iter().position(|n| *n == "word").unwrap();
        assert!(selector < word);
    }
}
