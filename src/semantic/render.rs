//! Render canonical nodes as native text
//!
//! Rendering walks the highest-priority pattern of the node's command in the
//! target language, so whatever it writes is something that language's
//! patterns parse back to the same node. Event handlers render their event
//! clause in front of the first body command; further body commands follow
//! the language's word for `then`.

use crate::error::{HyperfixiError, Result};
use crate::keywords::KeywordCategory;
use crate::language::{LanguageProfile, MarkerPlacement};
use crate::patterns::{ExtractionRule, LanguagePattern, PatternRegistry, PatternToken};
use crate::registry::Registry;
use crate::types::{LiteralValue, Role, SemanticNode, SemanticValue};
use std::collections::BTreeMap;
use tracing::debug;

/// Canonical markers written as apostrophe suffixes where the language uses them
const CASE_MARKERS: [&str; 4] = ["to", "into", "from", "on"];

/// Render `node` as `language` text
pub fn render(registry: &Registry, node: &SemanticNode, language: &str) -> Result<String> {
    let tables = registry
        .language(language)
        .ok_or_else(|| HyperfixiError::UnsupportedLanguage(language.to_string()))?;

    Renderer {
        patterns: registry.patterns(),
        profile: tables.profile(),
    }
    .node(node)
}

struct Renderer<'a> {
    patterns: &'a PatternRegistry,
    profile: &'a LanguageProfile,
}

impl Renderer<'_> {
    fn node(&self, node: &SemanticNode) -> Result<String> {
        if !node.is_event_handler() {
            return self.command(node, None);
        }

        let event = node
            .event
            .as_deref()
            .filter(|e| !e.is_empty())
            .ok_or_else(|| HyperfixiError::Other("Event handler has no event".to_string()))?;
        if node.body.is_empty() {
            return Err(HyperfixiError::Other(format!(
                "Event handler for '{}' has an empty body",
                event
            )));
        }
        if !node.event_modifiers.is_empty() {
            debug!("Event modifiers are not rendered in {}", self.profile.code);
        }

        let mut parts = Vec::with_capacity(node.body.len());
        for (i, command) in node.body.iter().enumerate() {
            parts.push(self.command(command, (i == 0).then_some(event))?);
        }

        let then = self
            .profile
            .preferred_lexeme(KeywordCategory::Temporal, "then")
            .unwrap_or("then");
        Ok(parts.join(&format!(" {} ", then)))
    }

    fn command(&self, node: &SemanticNode, event: Option<&str>) -> Result<String> {
        let pattern = self
            .patterns
            .patterns_for(self.profile.code, Some(&node.action))
            .into_iter()
            .next()
            .ok_or_else(|| {
                HyperfixiError::NoMatch(format!(
                    "No {} pattern renders '{}'",
                    self.profile.code, node.action
                ))
            })?;

        let mut values = node.roles.clone();
        if let Some(event) = event {
            values.insert(Role::Event, SemanticValue::string(event));
        }

        let mut words = Vec::new();
        self.template(pattern, &pattern.template, &values, &mut words)?;
        Ok(words.join(" "))
    }

    fn template(
        &self,
        pattern: &LanguagePattern,
        tokens: &[PatternToken],
        values: &BTreeMap<Role, SemanticValue>,
        words: &mut Vec<String>,
    ) -> Result<()> {
        for token in tokens {
            match token {
                PatternToken::Literal { value, alternatives } => {
                    words.push(alternatives.first().unwrap_or(value).clone());
                }
                PatternToken::Group { tokens } => {
                    let filled = tokens.iter().all(|t| match t {
                        PatternToken::Role { role, .. } => values.contains_key(role),
                        _ => true,
                    });
                    if filled {
                        self.template(pattern, tokens, values, words)?;
                    }
                }
                PatternToken::Role { role, optional, .. } => match values.get(role) {
                    Some(value) => words.push(self.role(pattern, *role, value)),
                    None if *optional || pattern.default_for(*role).is_some() => {}
                    None => {
                        return Err(HyperfixiError::Other(format!(
                            "Cannot render {}: missing {}",
                            pattern.command, role
                        )))
                    }
                },
            }
        }
        Ok(())
    }

    fn role(&self, pattern: &LanguagePattern, role: Role, value: &SemanticValue) -> String {
        let text = self.value(role, value);
        match pattern.extraction.get(&role) {
            Some(ExtractionRule::Marker {
                marker,
                alternatives,
                placement,
                ..
            }) => {
                let form = alternatives.first().unwrap_or(marker);
                match placement {
                    MarkerPlacement::Pre => format!("{} {}", form, text),
                    MarkerPlacement::Post if self.is_case_suffix(form) => format!("{}'{}", text, form),
                    MarkerPlacement::Post => format!("{} {}", text, form),
                }
            }
            _ => text,
        }
    }

    fn is_case_suffix(&self, form: &str) -> bool {
        self.profile.apostrophe_suffixes
            && (self.profile.object_markers.contains(&form)
                || CASE_MARKERS
                    .iter()
                    .any(|m| self.profile.marker_forms(m).iter().any(|f| f == form)))
    }

    fn value(&self, role: Role, value: &SemanticValue) -> String {
        match value {
            SemanticValue::Selector { value, .. } => value.clone(),
            SemanticValue::Literal {
                value: LiteralValue::String(s),
            } if role == Role::Event => self.event_word(s),
            SemanticValue::Literal {
                value: LiteralValue::String(s),
            } => quote(s),
            SemanticValue::Literal {
                value: LiteralValue::Boolean(b),
            } => {
                let english = if *b { "true" } else { "false" };
                self.profile
                    .preferred_lexeme(KeywordCategory::Values, english)
                    .unwrap_or(english)
                    .to_string()
            }
            SemanticValue::Literal { value } => value.to_string(),
            SemanticValue::Reference { value } => self
                .profile
                .preferred_lexeme(KeywordCategory::Values, value)
                .map(str::to_string)
                .unwrap_or_else(|| value.clone()),
            SemanticValue::Expression { raw } => format!("({})", raw),
        }
    }

    fn event_word(&self, event: &str) -> String {
        self.profile
            .preferred_lexeme(KeywordCategory::Events, event)
            .or_else(|| self.profile.preferred_lexeme(KeywordCategory::Commands, event))
            .unwrap_or(event)
            .to_string()
    }
}

fn quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::semantic::parse;
    use crate::types::Action;
    use once_cell::sync::Lazy;

    static REGISTRY: Lazy<Registry> = Lazy::new(|| Registry::all().unwrap());

    fn toggle_on_click() -> SemanticNode {
        SemanticNode::event_handler(
            "click",
            vec![SemanticNode::command(Action::Toggle).with_role(Role::Patient, SemanticValue::selector(".active"))],
        )
    }

    #[test]
    fn test_render_per_word_order() {
        let node = toggle_on_click();
        assert_eq!(render(&REGISTRY, &node, "en").unwrap(), "on click toggle .active");
        assert_eq!(render(&REGISTRY, &node, "es").unwrap(), "en clic alternar .active");
        assert_eq!(render(&REGISTRY, &node, "ja").unwrap(), "クリック で .active を 切り替え");
        assert_eq!(render(&REGISTRY, &node, "tr").unwrap(), "tıklama üzerine .active'ı değiştir");
        assert_eq!(render(&REGISTRY, &node, "ar").unwrap(), "عند النقر بدّل .active");
    }

    #[test]
    fn test_marked_roles_and_quoting() {
        let node = SemanticNode::command(Action::Put)
            .with_role(Role::Patient, SemanticValue::string("say \"hi\""))
            .with_role(Role::Destination, SemanticValue::selector("#out"));
        assert_eq!(
            render(&REGISTRY, &node, "en").unwrap(),
            "put \"say \\\"hi\\\"\" into #out"
        );
    }

    #[test]
    fn test_references_use_native_words() {
        let node = SemanticNode::command(Action::Show).with_role(Role::Patient, SemanticValue::reference("me"));
        assert_eq!(render(&REGISTRY, &node, "es").unwrap(), "mostrar yo");
    }

    #[test]
    fn test_round_trip() {
        let inputs = [
            ("en", "add .active to #box"),
            ("en", "increment :count by 2"),
            ("en", "set :flag to true"),
            ("es", "en clic alternar .active"),
            ("ja", "\"hi\" を #out に 置く"),
            ("ko", "counter 를 증가"),
            ("tr", "counter azalt"),
            ("ar", "أرسل \"done\" إلى #panel"),
        ];
        for (code, text) in inputs {
            let first = parse(&REGISTRY, text, code).node.unwrap();
            for target in REGISTRY.languages() {
                let rendered = render(&REGISTRY, &first, target).unwrap();
                let again = parse(&REGISTRY, &rendered, target);
                assert_eq!(again.node.as_ref(), Some(&first), "{} -> {}: {}", code, target, rendered);
            }
        }
    }

    #[test]
    fn test_unrenderable_nodes() {
        let unknown = SemanticNode::command(Action::from_name("frobnicate"));
        assert!(matches!(render(&REGISTRY, &unknown, "en"), Err(HyperfixiError::NoMatch(_))));

        let missing = SemanticNode::command(Action::Put).with_role(Role::Patient, SemanticValue::string("x"));
        assert!(render(&REGISTRY, &missing, "en").is_err());

        assert!(matches!(
            render(&REGISTRY, &toggle_on_click(), "xx"),
            Err(HyperfixiError::UnsupportedLanguage(_))
        ));
    }
}
