//! Pattern matcher
//!
//! Walks a pattern template over a token stream with a single cursor.
//! Literal mismatches abort the pattern immediately (no backtracking), so
//! matching costs at most patterns × tokens. Role slots are filled by their
//! extraction rule:
//!
//! * `Position { index }` reads the token `index` places past the anchor.
//!   The anchor starts at the sequence start and moves to the cursor after
//!   each group and each marker run.
//! * `Marker` roles that appear back to back form a run whose members may be
//!   written in any order (`put "x" into #out` or, in Japanese, either
//!   particle phrase first). A marker may sit up to [`MAX_MARKER_SKIP`]
//!   unrecognized tokens past the cursor; skipped tokens are not consumed.
//!
//! Confidence is `0.6 * literal_score + 0.4 * role_score`, scaled by the
//! fraction of tokens consumed.

use super::{ExtractionRule, LanguagePattern, PatternRegistry, PatternToken};
use crate::keywords::KeywordCategory;
use crate::language::MarkerPlacement;
use crate::tokenizer::{Token, TokenKind};
use crate::types::{Action, Role, SemanticNode, SemanticValue, ValueType};
use crate::utils::string::fold_diacritics;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Weight of literal words in the confidence score
pub const LITERAL_WEIGHT: f32 = 0.6;

/// Weight of role slots in the confidence score
pub const ROLE_WEIGHT: f32 = 0.4;

/// Role credit for a value whose type the pattern does not expect
pub const TYPE_MISMATCH_CREDIT: f32 = 0.5;

/// Tokens a marker search may step over
pub const MAX_MARKER_SKIP: usize = 2;

/// A successful pattern match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    /// Flat command node with every captured role, `event` included
    pub node: SemanticNode,
    pub confidence: f32,
    pub pattern_id: String,
    pub priority: i32,
}

#[derive(Debug, Clone, Default)]
struct MatchState {
    cursor: usize,
    anchor: usize,
    consumed: usize,
    literal_score: f32,
    literal_count: usize,
    role_score: f32,
    role_count: usize,
    roles: BTreeMap<Role, SemanticValue>,
}

impl MatchState {
    fn literal_hit(&mut self, token: &Token) {
        self.literal_score += token.confidence;
        self.literal_count += 1;
        self.cursor += 1;
        self.consumed += 1;
    }

    fn confidence(&self, total_tokens: usize) -> f32 {
        let literal = if self.literal_count == 0 {
            1.0
        } else {
            self.literal_score / self.literal_count as f32
        };
        let role = if self.role_count == 0 {
            1.0
        } else {
            self.role_score / self.role_count as f32
        };
        let coverage = (self.consumed as f32 / total_tokens as f32).min(1.0);
        ((LITERAL_WEIGHT * literal + ROLE_WEIGHT * role) * coverage).clamp(0.0, 1.0)
    }
}

/// Role slot as seen by the matcher
struct Slot<'p> {
    role: Role,
    expected_types: &'p [ValueType],
    optional: bool,
}

impl Slot<'_> {
    fn is_strict(&self, pattern: &LanguagePattern) -> bool {
        !self.optional && pattern.default_for(self.role).is_none()
    }
}

/// Convert a token into a role value, if it can carry one
pub fn value_from_token(token: &Token, role: Role) -> Option<SemanticValue> {
    match token.kind {
        TokenKind::Selector => Some(SemanticValue::selector(token.value.clone())),
        TokenKind::Number => token.value.parse::<f64>().ok().map(SemanticValue::number),
        TokenKind::String => Some(SemanticValue::string(token.value.clone())),
        TokenKind::Expression => Some(SemanticValue::expression(token.value.clone())),
        TokenKind::Identifier if role == Role::Event => Some(SemanticValue::string(token.value.clone())),
        TokenKind::Identifier => Some(SemanticValue::reference(token.value.clone())),
        TokenKind::Keyword(KeywordCategory::Values) => match token.value.as_str() {
            "true" => Some(SemanticValue::boolean(true)),
            "false" => Some(SemanticValue::boolean(false)),
            _ if role == Role::Event => Some(SemanticValue::string(token.value.clone())),
            other => Some(SemanticValue::reference(other)),
        },
        TokenKind::Keyword(KeywordCategory::Events) => Some(SemanticValue::string(token.value.clone())),
        // `on focus ...`: command words double as event names
        TokenKind::Keyword(_) if role == Role::Event => Some(SemanticValue::string(token.value.clone())),
        _ => None,
    }
}

fn is_value_kind(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Selector | TokenKind::Number | TokenKind::String | TokenKind::Expression
    )
}

fn same_word(a: &str, b: &str, case_sensitive: bool) -> bool {
    if case_sensitive {
        a == b
    } else {
        fold_diacritics(a) == fold_diacritics(b)
    }
}

/// Literal word match: canonical value or a native alternative
fn literal_matches(token: &Token, value: &str, alternatives: &[String], case_sensitive: bool) -> bool {
    if is_value_kind(token.kind) {
        return false;
    }
    same_word(&token.value, value, case_sensitive)
        || alternatives
            .iter()
            .any(|alt| same_word(&token.original, alt, case_sensitive) || same_word(&token.value, alt, case_sensitive))
}

/// Marker match: native form as written, or the canonical word for keywords
fn marker_matches(token: &Token, marker: &str, alternatives: &[String], case_sensitive: bool) -> bool {
    if is_value_kind(token.kind) {
        return false;
    }
    let by_form = alternatives.iter().any(|alt| {
        same_word(&token.original, alt, case_sensitive) || same_word(&token.value, alt, case_sensitive)
    });
    let by_keyword = matches!(token.kind, TokenKind::Keyword(_)) && same_word(&token.value, marker, case_sensitive);
    by_form || by_keyword
}

/// Evaluates patterns from a registry against token streams
pub struct PatternMatcher<'r> {
    registry: &'r PatternRegistry,
}

impl<'r> PatternMatcher<'r> {
    pub fn new(registry: &'r PatternRegistry) -> Self {
        Self { registry }
    }

    /// Best match among the patterns of `candidates` in `language`
    ///
    /// Highest priority wins, then highest confidence, then the
    /// lexicographically smallest pattern id.
    pub fn best_match(
        &self,
        language: &str,
        tokens: &[Token],
        candidates: &[Action],
        case_sensitive: bool,
    ) -> Option<MatchResult> {
        let mut matches: Vec<MatchResult> = candidates
            .iter()
            .flat_map(|action| self.registry.patterns_for(language, Some(action)))
            .filter_map(|pattern| self.match_pattern(pattern, tokens, case_sensitive))
            .collect();

        matches.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then_with(|| b.confidence.total_cmp(&a.confidence))
                .then_with(|| a.pattern_id.cmp(&b.pattern_id))
        });

        let winner = matches.into_iter().next();
        if let Some(result) = &winner {
            debug!(
                "Matched {} (priority {}, confidence {:.2})",
                result.pattern_id, result.priority, result.confidence
            );
        }
        winner
    }

    /// Match one pattern from the start of `tokens`
    pub fn match_pattern(&self, pattern: &LanguagePattern, tokens: &[Token], case_sensitive: bool) -> Option<MatchResult> {
        let total = tokens
            .iter()
            .filter(|t| t.kind != TokenKind::Punctuation)
            .count();
        if total == 0 {
            return None;
        }

        let mut state = MatchState::default();
        if !self.match_sequence(pattern, &pattern.template, tokens, &mut state, case_sensitive) {
            trace!("Pattern {} rejected", pattern.id);
            return None;
        }

        let mut node = SemanticNode::command(pattern.command.clone());
        node.roles = state.roles.clone();
        Some(MatchResult {
            node,
            confidence: state.confidence(total),
            pattern_id: pattern.id.clone(),
            priority: pattern.priority,
        })
    }

    fn match_sequence(
        &self,
        pattern: &LanguagePattern,
        template: &[PatternToken],
        tokens: &[Token],
        state: &mut MatchState,
        case_sensitive: bool,
    ) -> bool {
        let mut i = 0;
        while i < template.len() {
            match &template[i] {
                PatternToken::Literal { value, alternatives } => {
                    let Some(token) = tokens.get(state.cursor) else {
                        return false;
                    };
                    if !literal_matches(token, value, alternatives, case_sensitive) {
                        return false;
                    }
                    state.literal_hit(token);
                    i += 1;
                }
                PatternToken::Group { tokens: inner } => {
                    let mut trial = state.clone();
                    trial.anchor = trial.cursor;
                    if self.match_sequence(pattern, inner, tokens, &mut trial, case_sensitive) {
                        *state = trial;
                    }
                    state.anchor = state.cursor;
                    i += 1;
                }
                PatternToken::Role { role, expected_types, optional } => {
                    let slot = Slot {
                        role: *role,
                        expected_types,
                        optional: *optional,
                    };
                    match pattern.extraction.get(role) {
                        Some(ExtractionRule::Marker { .. }) => {
                            let end = Self::marker_run_end(pattern, template, i);
                            let slots: Vec<Slot> = template[i..end]
                                .iter()
                                .filter_map(|t| match t {
                                    PatternToken::Role { role, expected_types, optional } => Some(Slot {
                                        role: *role,
                                        expected_types,
                                        optional: *optional,
                                    }),
                                    _ => None,
                                })
                                .collect();
                            let stop = template.get(end);
                            if !self.match_marker_run(pattern, &slots, stop, tokens, state, case_sensitive) {
                                return false;
                            }
                            state.anchor = state.cursor;
                            i = end;
                        }
                        Some(ExtractionRule::Position { index }) => {
                            let target = (state.anchor + index).max(state.cursor);
                            if !self.match_positional(pattern, &slot, target, tokens, state) {
                                return false;
                            }
                            i += 1;
                        }
                        None => {
                            let target = state.cursor;
                            if !self.match_positional(pattern, &slot, target, tokens, state) {
                                return false;
                            }
                            i += 1;
                        }
                    }
                }
            }
        }
        true
    }

    /// Index one past the run of consecutive marker roles starting at `start`
    fn marker_run_end(pattern: &LanguagePattern, template: &[PatternToken], start: usize) -> usize {
        let mut end = start;
        while let Some(PatternToken::Role { role, .. }) = template.get(end) {
            if !matches!(pattern.extraction.get(role), Some(ExtractionRule::Marker { .. })) {
                break;
            }
            end += 1;
        }
        end
    }

    fn match_positional(
        &self,
        pattern: &LanguagePattern,
        slot: &Slot,
        target: usize,
        tokens: &[Token],
        state: &mut MatchState,
    ) -> bool {
        match tokens.get(target).and_then(|t| value_from_token(t, slot.role)) {
            Some(value) => {
                if !Self::accept(pattern, slot, value, state) {
                    return false;
                }
                state.cursor = target + 1;
                state.consumed += 1;
                true
            }
            None => Self::fill_missing(pattern, slot, state),
        }
    }

    /// Value and marker confidence if `slot`'s marker phrase starts at `at`
    fn marker_hit(
        pattern: &LanguagePattern,
        slot: &Slot,
        tokens: &[Token],
        at: usize,
        case_sensitive: bool,
    ) -> Option<(SemanticValue, f32)> {
        let Some(ExtractionRule::Marker { marker, alternatives, placement, .. }) = pattern.extraction.get(&slot.role)
        else {
            return None;
        };
        let (marker_at, value_at) = match placement {
            MarkerPlacement::Pre => (at, at + 1),
            MarkerPlacement::Post => (at + 1, at),
        };
        let marker_token = tokens.get(marker_at)?;
        let value_token = tokens.get(value_at)?;
        if !marker_matches(marker_token, marker, alternatives, case_sensitive) {
            return None;
        }
        value_from_token(value_token, slot.role).map(|value| (value, marker_token.confidence))
    }

    /// A token a marker search may step over: no value, no command word and
    /// not the literal that follows the run
    fn skippable(token: Option<&Token>, stop: Option<&PatternToken>, case_sensitive: bool) -> bool {
        let Some(token) = token else {
            return false;
        };
        if is_value_kind(token.kind) || token.kind == TokenKind::Keyword(KeywordCategory::Commands) {
            return false;
        }
        match stop {
            Some(PatternToken::Literal { value, alternatives }) => {
                !literal_matches(token, value, alternatives, case_sensitive)
            }
            _ => true,
        }
    }

    fn match_marker_run(
        &self,
        pattern: &LanguagePattern,
        slots: &[Slot],
        stop: Option<&PatternToken>,
        tokens: &[Token],
        state: &mut MatchState,
        case_sensitive: bool,
    ) -> bool {
        let mut filled = vec![false; slots.len()];

        loop {
            let cursor = state.cursor;
            let found = (0..=MAX_MARKER_SKIP)
                .take_while(|skip| *skip == 0 || Self::skippable(tokens.get(cursor + skip - 1), stop, case_sensitive))
                .find_map(|skip| {
                    slots
                        .iter()
                        .enumerate()
                        .filter(|(k, _)| !filled[*k])
                        .find_map(|(k, slot)| {
                            Self::marker_hit(pattern, slot, tokens, cursor + skip, case_sensitive)
                                .map(|(value, marker_confidence)| (skip, k, value, marker_confidence))
                        })
                });
            let Some((skip, k, value, marker_confidence)) = found else {
                break;
            };

            if !Self::accept(pattern, &slots[k], value, state) {
                return false;
            }
            if skip > 0 {
                trace!("Pattern {} skipped {} token(s) before {}", pattern.id, skip, slots[k].role);
            }
            state.literal_score += marker_confidence;
            state.literal_count += 1;
            state.cursor = cursor + skip + 2;
            state.consumed += 2;
            filled[k] = true;
        }

        slots
            .iter()
            .zip(filled)
            .filter(|(_, filled)| !filled)
            .all(|(slot, _)| Self::fill_missing(pattern, slot, state))
    }

    /// Record a captured value; false if a strict role gets the wrong type
    fn accept(pattern: &LanguagePattern, slot: &Slot, value: SemanticValue, state: &mut MatchState) -> bool {
        let type_ok = slot.expected_types.is_empty() || slot.expected_types.contains(&value.value_type());
        if !type_ok && slot.is_strict(pattern) {
            return false;
        }
        state.role_score += if type_ok { 1.0 } else { TYPE_MISMATCH_CREDIT };
        state.role_count += 1;
        state.roles.insert(slot.role, value);
        true
    }

    /// Default, skip or fail for a role with no value in the input
    fn fill_missing(pattern: &LanguagePattern, slot: &Slot, state: &mut MatchState) -> bool {
        if let Some(default) = pattern.default_for(slot.role) {
            state.roles.insert(slot.role, default.clone());
            state.role_score += 1.0;
            state.role_count += 1;
            return true;
        }
        slot.optional
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language;
    use crate::patterns::generate_patterns;
    use crate::tokenizer::Tokenizer;

    fn setup(code: &str) -> (Tokenizer, PatternRegistry) {
        let profile = language::profile(code).unwrap();
        let mut registry = PatternRegistry::new();
        registry.register_all(generate_patterns(&profile)).unwrap();
        (Tokenizer::new(profile), registry)
    }

    fn best(code: &str, input: &str, action: Action) -> Option<MatchResult> {
        let (tokenizer, registry) = setup(code);
        let tokens = tokenizer.tokenize(input).unwrap();
        PatternMatcher::new(&registry).best_match(code, &tokens, &[action], false)
    }

    #[test]
    fn test_svo_positional_and_marker() {
        let result = best("en", "add .active to #box", Action::Add).unwrap();
        assert_eq!(result.node.role(Role::Patient), Some(&SemanticValue::selector(".active")));
        assert_eq!(result.node.role(Role::Destination), Some(&SemanticValue::selector("#box")));
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn test_event_group_entered_only_when_present() {
        let with = best("en", "on click toggle .active", Action::Toggle).unwrap();
        assert_eq!(with.node.role(Role::Event), Some(&SemanticValue::string("click")));

        let without = best("en", "toggle .active", Action::Toggle).unwrap();
        assert!(without.node.role(Role::Event).is_none());
    }

    #[test]
    fn test_literal_mismatch_aborts() {
        assert!(best("en", "show .x", Action::Toggle).is_none());
    }

    #[test]
    fn test_sov_particles_any_order() {
        let a = best("ja", "\"hi\" を #out に 置く", Action::Put).unwrap();
        let b = best("ja", "#out に \"hi\" を 置く", Action::Put).unwrap();
        assert_eq!(a.node, b.node);
        assert_eq!(a.node.role(Role::Destination), Some(&SemanticValue::selector("#out")));
        assert_eq!(a.pattern_id, "put-ja-sov");
    }

    #[test]
    fn test_marker_found_past_unknown_token() {
        let exact = best("en", "put \"x\" into #out", Action::Put).unwrap();
        let result = best("en", "put \"x\" junk into #out", Action::Put).unwrap();
        assert_eq!(result.node.role(Role::Destination), Some(&SemanticValue::selector("#out")));
        assert_eq!(result.node.role(Role::Patient), Some(&SemanticValue::string("x")));
        assert!(result.confidence < exact.confidence);

        let sov = best("ja", "\"hi\" を junk #out に 置く", Action::Put).unwrap();
        assert_eq!(sov.node.role(Role::Destination), Some(&SemanticValue::selector("#out")));
        assert!(sov.confidence < 1.0);
    }

    #[test]
    fn test_marker_search_stops_at_values() {
        // A selector is never stepped over, so the destination stays unfilled
        assert!(best("en", "put \"x\" #stray into #out", Action::Put).is_none());
    }

    #[test]
    fn test_bare_sov_variant() {
        let result = best("tr", "counter azalt", Action::Decrement).unwrap();
        assert_eq!(result.pattern_id, "decrement-tr-sov-bare");
        assert_eq!(result.node.role(Role::Patient), Some(&SemanticValue::reference("counter")));
    }

    #[test]
    fn test_default_fills_optional_role() {
        let result = best("en", "show", Action::Show).unwrap();
        assert_eq!(result.node.role(Role::Patient), Some(&SemanticValue::reference("me")));
    }

    #[test]
    fn test_missing_required_role_fails() {
        assert!(best("en", "put \"x\"", Action::Put).is_none());
    }

    #[test]
    fn test_strict_type_mismatch_fails() {
        // add requires a selector patient
        assert!(best("en", "add 5", Action::Add).is_none());
    }

    #[test]
    fn test_optional_type_mismatch_degrades() {
        let result = best("en", "increment :count by #step", Action::Increment).unwrap();
        assert!(result.confidence < 1.0);
        assert!(result.node.role(Role::Quantity).is_some());
    }

    #[test]
    fn test_leftover_tokens_reduce_confidence() {
        let full = best("en", "toggle .a", Action::Toggle).unwrap();
        let partial = best("en", "toggle .a .b", Action::Toggle).unwrap();
        assert!(partial.confidence < full.confidence);
    }

    #[test]
    fn test_priority_beats_confidence() {
        let mut registry = PatternRegistry::new();
        let profile = language::profile("en").unwrap();
        let mut low = generate_patterns(&profile)
            .into_iter()
            .find(|p| p.id == "toggle-en-svo")
            .unwrap();
        let mut high = low.clone();
        low.id = "a-low".to_string();
        low.priority = 1;
        high.id = "z-high".to_string();
        high.priority = 50;
        registry.register(low).unwrap();
        registry.register(high).unwrap();

        let tokens = Tokenizer::new(profile).tokenize("toggle .a").unwrap();
        let result = PatternMatcher::new(&registry)
            .best_match("en", &tokens, &[Action::Toggle], false)
            .unwrap();
        assert_eq!(result.pattern_id, "z-high");
    }

    #[test]
    fn test_equal_priority_ties_break_on_id() {
        let mut registry = PatternRegistry::new();
        let profile = language::profile("en").unwrap();
        let base = generate_patterns(&profile)
            .into_iter()
            .find(|p| p.id == "toggle-en-svo")
            .unwrap();
        for id in ["m-pattern", "b-pattern"] {
            let mut pattern = base.clone();
            pattern.id = id.to_string();
            registry.register(pattern).unwrap();
        }

        let tokens = Tokenizer::new(profile).tokenize("toggle .a").unwrap();
        let result = PatternMatcher::new(&registry)
            .best_match("en", &tokens, &[Action::Toggle], false)
            .unwrap();
        assert_eq!(result.pattern_id, "b-pattern");
    }
}
