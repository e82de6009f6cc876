//! Pattern generation from command schemas and language profiles
//!
//! Every command schema yields one pattern per language shaped by the
//! language's word order:
//!
//! ```text
//! SVO / VSO   [on <event>]  VERB  <primary>  <marked roles...>
//! SOV         [<event> MARK]  <primary> OBJ  <marked roles...>  VERB
//! ```
//!
//! SOV languages also get a lower-priority variant whose primary role carries
//! no object particle (`counter azalt`).

use super::{ExtractionRule, LanguagePattern, PatternToken};
use crate::keywords::KeywordCategory;
use crate::language::{LanguageProfile, MarkerPlacement, WordOrder};
use crate::schema::{all_schemas, CommandSchema, RoleSpec};
use crate::types::{Role, ValueType};
use std::collections::BTreeMap;

/// Priority of the main pattern of each command
pub const BASE_PRIORITY: i32 = 100;

/// Priority of the SOV variant without an object particle
pub const BARE_OBJECT_PRIORITY: i32 = 90;

fn owned(forms: &[&str]) -> Vec<String> {
    forms.iter().map(|f| f.to_string()).collect()
}

fn role_token(spec: &RoleSpec) -> PatternToken {
    PatternToken::role(spec.role, spec.expected_types.clone(), !spec.required)
}

fn marker_rule(profile: &LanguageProfile, spec: &RoleSpec, marker: &str) -> ExtractionRule {
    ExtractionRule::Marker {
        marker: marker.to_string(),
        alternatives: profile.marker_forms(marker),
        placement: profile.marker_placement,
        default: spec.default.clone(),
    }
}

/// Optional event clause and its extraction rule
fn event_group(profile: &LanguageProfile) -> (PatternToken, ExtractionRule) {
    let event = PatternToken::role(Role::Event, vec![ValueType::Literal], false);
    match profile.marker_placement {
        MarkerPlacement::Pre => {
            let keyword = PatternToken::literal(
                "on",
                owned(&profile.lexemes(KeywordCategory::Commands, "on")),
            );
            (
                PatternToken::Group {
                    tokens: vec![keyword, event],
                },
                ExtractionRule::Position { index: 1 },
            )
        }
        MarkerPlacement::Post => {
            let marker = PatternToken::literal("on", owned(profile.event_markers));
            (
                PatternToken::Group {
                    tokens: vec![event, marker],
                },
                ExtractionRule::Position { index: 0 },
            )
        }
    }
}

fn verb(profile: &LanguageProfile, schema: &CommandSchema) -> PatternToken {
    let action = schema.action.as_str();
    PatternToken::literal(
        action,
        owned(&profile.lexemes(KeywordCategory::Commands, action)),
    )
}

/// Pattern skeleton shared by every variant
fn skeleton(profile: &LanguageProfile, schema: &CommandSchema, variant: &str, priority: i32) -> LanguagePattern {
    let (group, event_rule) = event_group(profile);
    let mut extraction = BTreeMap::new();
    extraction.insert(Role::Event, event_rule);

    LanguagePattern {
        id: format!("{}-{}-{}", schema.action, profile.code, variant),
        language: profile.code.to_string(),
        command: schema.action.clone(),
        priority,
        template: vec![group],
        extraction,
        defaults: BTreeMap::new(),
    }
}

fn push_marked_roles(profile: &LanguageProfile, schema: &CommandSchema, pattern: &mut LanguagePattern) {
    for spec in schema.marked_roles() {
        if let Some(marker) = spec.marker {
            pattern.template.push(role_token(spec));
            pattern.extraction.insert(spec.role, marker_rule(profile, spec, marker));
        }
    }
}

fn push_positional(spec: &RoleSpec, index: usize, pattern: &mut LanguagePattern) {
    pattern.template.push(role_token(spec));
    pattern
        .extraction
        .insert(spec.role, ExtractionRule::Position { index });
    if let Some(default) = &spec.default {
        pattern.defaults.insert(spec.role, default.clone());
    }
}

fn verb_initial(profile: &LanguageProfile, schema: &CommandSchema) -> LanguagePattern {
    let variant = match profile.word_order {
        WordOrder::Vso => "vso",
        _ => "svo",
    };
    let mut pattern = skeleton(profile, schema, variant, BASE_PRIORITY);
    pattern.template.push(verb(profile, schema));
    if let Some(primary) = schema.primary() {
        push_positional(primary, 1, &mut pattern);
    }
    push_marked_roles(profile, schema, &mut pattern);
    pattern
}

fn verb_final(profile: &LanguageProfile, schema: &CommandSchema) -> Vec<LanguagePattern> {
    let mut patterns = Vec::new();

    let mut marked = skeleton(profile, schema, "sov", BASE_PRIORITY);
    if let Some(primary) = schema.primary() {
        marked.template.push(role_token(primary));
        marked.extraction.insert(
            primary.role,
            ExtractionRule::Marker {
                marker: "object".to_string(),
                alternatives: owned(profile.object_markers),
                placement: MarkerPlacement::Post,
                default: primary.default.clone(),
            },
        );
    }
    push_marked_roles(profile, schema, &mut marked);
    marked.template.push(verb(profile, schema));
    patterns.push(marked);

    if let Some(primary) = schema.primary() {
        let mut bare = skeleton(profile, schema, "sov-bare", BARE_OBJECT_PRIORITY);
        push_positional(primary, 0, &mut bare);
        push_marked_roles(profile, schema, &mut bare);
        bare.template.push(verb(profile, schema));
        patterns.push(bare);
    }

    patterns
}

/// Patterns for every command schema in one language
pub fn generate_patterns(profile: &LanguageProfile) -> Vec<LanguagePattern> {
    all_schemas()
        .into_iter()
        .flat_map(|schema| {
            if profile.word_order.verb_final() {
                verb_final(profile, schema)
            } else {
                vec![verb_initial(profile, schema)]
            }
        })
        .collect()
}
