//! Semantic node builder and natural-language parse entry point

use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::keywords::KeywordCategory;
use crate::patterns::{MatchResult, PatternMatcher};
use crate::registry::Registry;
use crate::tokenizer::Token;
use crate::types::{Action, Role, SemanticNode};
use serde::Serialize;
use tracing::debug;

/// Result of parsing one natural-language input
///
/// Failures never surface as errors: `node` is `None` and `diagnostics`
/// says why.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseOutcome {
    pub node: Option<SemanticNode>,
    pub confidence: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern_id: Option<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseOutcome {
    fn failed(diagnostic: Diagnostic) -> Self {
        Self {
            diagnostics: vec![diagnostic],
            ..Default::default()
        }
    }
}

/// Assemble the canonical node for a match
///
/// A captured `event` role is lifted out of the command: the result is an
/// event handler whose body is the command alone.
pub fn build_node(result: &MatchResult) -> SemanticNode {
    let mut command = result.node.clone();
    match command.roles.remove(&Role::Event) {
        Some(event) => SemanticNode::event_handler(event.text(), vec![command]),
        None => command,
    }
}

/// Commands named by keyword tokens, in order of appearance
fn candidate_actions(tokens: &[Token]) -> Vec<Action> {
    let mut actions: Vec<Action> = Vec::new();
    for token in tokens.iter().filter(|t| t.is_keyword(KeywordCategory::Commands)) {
        let action = Action::from_name(&token.value);
        if action != Action::On && !actions.contains(&action) {
            actions.push(action);
        }
    }
    actions
}

/// Parse natural-language `code` written in `language`
pub fn parse(registry: &Registry, code: &str, language: &str) -> ParseOutcome {
    let tables = match registry.language(language) {
        Some(tables) => tables,
        None => {
            return ParseOutcome::failed(
                Diagnostic::error(
                    DiagnosticCode::UnsupportedLanguage,
                    format!("Language '{}' is not enabled", language),
                )
                .with_suggestion(format!("Use one of: {}", registry.languages().join(", "))),
            )
        }
    };

    let code = code.trim();
    if code.is_empty() {
        return ParseOutcome::failed(Diagnostic::error(DiagnosticCode::ParseError, "Input is empty"));
    }

    let tokens = match tables.tokenizer().tokenize(code) {
        Ok(tokens) => tokens,
        Err(err) => {
            debug!("Tokenization failed for {}: {}", language, err);
            return ParseOutcome::failed(Diagnostic::error(DiagnosticCode::TokenizeError, err.to_string()));
        }
    };

    let candidates = candidate_actions(&tokens);
    if candidates.is_empty() {
        return ParseOutcome::failed(
            Diagnostic::error(
                DiagnosticCode::NoMatch,
                format!("No command keyword found in '{}'", code),
            )
            .with_suggestion("Start from a command such as toggle, add or put"),
        );
    }

    let matcher = PatternMatcher::new(registry.patterns());
    match matcher.best_match(language, &tokens, &candidates, tables.profile().case_sensitive) {
        Some(result) => ParseOutcome {
            node: Some(build_node(&result)),
            confidence: result.confidence,
            pattern_id: Some(result.pattern_id),
            diagnostics: Vec::new(),
        },
        None => {
            let names: Vec<&str> = candidates.iter().map(Action::as_str).collect();
            debug!("No pattern matched {:?} in {}", code, language);
            ParseOutcome::failed(Diagnostic::error(
                DiagnosticCode::NoMatch,
                format!("No {} pattern for {} matched '{}'", language, names.join("/"), code),
            ))
        }
    }
}
