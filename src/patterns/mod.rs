//! Language patterns: templates that map token sequences to commands
//!
//! A pattern is an ordered template of literal words, role slots and
//! optional groups, plus one extraction rule per role. Patterns are built by
//! [`generator`] from command schemas and language profiles, stored in a
//! [`registry::PatternRegistry`] and evaluated by [`matcher::PatternMatcher`].

pub mod generator;
pub mod matcher;
pub mod registry;

pub use generator::generate_patterns;
pub use matcher::{MatchResult, PatternMatcher};
pub use registry::PatternRegistry;

use crate::language::MarkerPlacement;
use crate::types::{Action, Role, SemanticValue, ValueType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One element of a pattern template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PatternToken {
    /// A fixed word: matches a token whose canonical value is `value`, or
    /// whose surface form is one of `alternatives`
    Literal {
        value: String,
        #[serde(default)]
        alternatives: Vec<String>,
    },
    /// A role slot, filled according to the pattern's extraction rule
    Role {
        role: Role,
        #[serde(default)]
        expected_types: Vec<ValueType>,
        #[serde(default)]
        optional: bool,
    },
    /// Optional sub-sequence, entered only if it matches entirely
    Group { tokens: Vec<PatternToken> },
}

impl PatternToken {
    pub fn literal(value: impl Into<String>, alternatives: Vec<String>) -> Self {
        PatternToken::Literal {
            value: value.into(),
            alternatives,
        }
    }

    pub fn role(role: Role, expected_types: Vec<ValueType>, optional: bool) -> Self {
        PatternToken::Role {
            role,
            expected_types,
            optional,
        }
    }
}

/// How a role's value is located in the token stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ExtractionRule {
    /// Token at `index` past the current anchor
    Position { index: usize },
    /// Value introduced by a marker word or particle
    Marker {
        marker: String,
        #[serde(default)]
        alternatives: Vec<String>,
        placement: MarkerPlacement,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        default: Option<SemanticValue>,
    },
}

impl ExtractionRule {
    pub fn default_value(&self) -> Option<&SemanticValue> {
        match self {
            ExtractionRule::Marker { default, .. } => default.as_ref(),
            ExtractionRule::Position { .. } => None,
        }
    }
}

/// A registered template for one command in one language
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguagePattern {
    /// Unique id, also the last-resort tie-break
    pub id: String,
    pub language: String,
    pub command: Action,
    /// Higher wins
    pub priority: i32,
    pub template: Vec<PatternToken>,
    pub extraction: BTreeMap<Role, ExtractionRule>,
    /// Defaults applied to positional roles left unfilled
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub defaults: BTreeMap<Role, SemanticValue>,
}

impl LanguagePattern {
    /// Default for an unfilled role, from its extraction rule or the pattern
    pub fn default_for(&self, role: Role) -> Option<&SemanticValue> {
        self.extraction
            .get(&role)
            .and_then(ExtractionRule::default_value)
            .or_else(|| self.defaults.get(&role))
    }

    /// Every role slot in the template, groups included
    pub fn roles(&self) -> Vec<Role> {
        fn collect(tokens: &[PatternToken], out: &mut Vec<Role>) {
            for token in tokens {
                match token {
                    PatternToken::Role { role, .. } => out.push(*role),
                    PatternToken::Group { tokens } => collect(tokens, out),
                    PatternToken::Literal { .. } => {}
                }
            }
        }
        let mut roles = Vec::new();
        collect(&self.template, &mut roles);
        roles
    }
}
