//! Command schemas
//!
//! For each known command: which roles it takes, which are required, the
//! value types each accepts, how the role is introduced (positionally or by
//! a canonical marker such as `to` or `from`) and its default. Schemas drive
//! both pattern generation and the validation gate.

use crate::types::ValueType::{Expression as Expr, Literal as Lit, Reference as Ref, Selector as Sel};
use crate::types::{Action, Role, SemanticValue, ValueType};
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// One role slot of a command
#[derive(Debug, Clone, PartialEq)]
pub struct RoleSpec {
    pub role: Role,
    pub required: bool,
    /// Accepted value types; empty accepts anything
    pub expected_types: Vec<ValueType>,
    /// Canonical marker introducing the role; `None` for the positional role
    pub marker: Option<&'static str>,
    pub default: Option<SemanticValue>,
}

impl RoleSpec {
    fn positional(role: Role, required: bool, types: &[ValueType]) -> Self {
        Self {
            role,
            required,
            expected_types: types.to_vec(),
            marker: None,
            default: None,
        }
    }

    fn marked(role: Role, marker: &'static str, required: bool, types: &[ValueType]) -> Self {
        Self {
            role,
            required,
            expected_types: types.to_vec(),
            marker: Some(marker),
            default: None,
        }
    }

    fn with_default(mut self, default: SemanticValue) -> Self {
        self.default = Some(default);
        self
    }

    pub fn accepts(&self, value_type: ValueType) -> bool {
        self.expected_types.is_empty() || self.expected_types.contains(&value_type)
    }

    /// Required with no default: a missing or mistyped value is fatal
    pub fn is_strict(&self) -> bool {
        self.required && self.default.is_none()
    }
}

/// Role layout of one command
#[derive(Debug, Clone, PartialEq)]
pub struct CommandSchema {
    pub action: Action,
    pub roles: Vec<RoleSpec>,
}

impl CommandSchema {
    pub fn role(&self, role: Role) -> Option<&RoleSpec> {
        self.roles.iter().find(|spec| spec.role == role)
    }

    /// The role written without a marker, directly after (or before) the verb
    pub fn primary(&self) -> Option<&RoleSpec> {
        self.roles.iter().find(|spec| spec.marker.is_none())
    }

    /// Roles introduced by markers, in declaration order
    pub fn marked_roles(&self) -> impl Iterator<Item = &RoleSpec> {
        self.roles.iter().filter(|spec| spec.marker.is_some())
    }

    pub fn required_roles(&self) -> impl Iterator<Item = &RoleSpec> {
        self.roles.iter().filter(|spec| spec.required)
    }
}

fn schema(action: Action, roles: Vec<RoleSpec>) -> CommandSchema {
    CommandSchema { action, roles }
}

fn me() -> SemanticValue {
    SemanticValue::reference("me")
}

fn build_schemas() -> Vec<CommandSchema> {
    vec![
        schema(
            Action::Toggle,
            vec![
                RoleSpec::positional(Role::Patient, true, &[Sel, Ref]),
                RoleSpec::marked(Role::Destination, "on", false, &[Sel, Ref]),
            ],
        ),
        schema(
            Action::Add,
            vec![
                RoleSpec::positional(Role::Patient, true, &[Sel]),
                RoleSpec::marked(Role::Destination, "to", false, &[Sel, Ref]),
            ],
        ),
        schema(
            Action::Remove,
            vec![
                RoleSpec::positional(Role::Patient, true, &[Sel, Ref]),
                RoleSpec::marked(Role::Source, "from", false, &[Sel, Ref]),
            ],
        ),
        schema(
            Action::Show,
            vec![RoleSpec::positional(Role::Patient, false, &[Sel, Ref]).with_default(me())],
        ),
        schema(
            Action::Hide,
            vec![RoleSpec::positional(Role::Patient, false, &[Sel, Ref]).with_default(me())],
        ),
        schema(
            Action::Set,
            vec![
                RoleSpec::positional(Role::Destination, true, &[Ref, Sel, Expr]),
                RoleSpec::marked(Role::Patient, "to", true, &[Lit, Ref, Expr, Sel]),
            ],
        ),
        schema(
            Action::Get,
            vec![RoleSpec::positional(Role::Patient, true, &[Sel, Ref, Expr])],
        ),
        schema(
            Action::Put,
            vec![
                RoleSpec::positional(Role::Patient, true, &[Lit, Ref, Expr, Sel]),
                RoleSpec::marked(Role::Destination, "into", true, &[Sel, Ref]),
            ],
        ),
        schema(
            Action::Append,
            vec![
                RoleSpec::positional(Role::Patient, true, &[Lit, Ref, Expr, Sel]),
                RoleSpec::marked(Role::Destination, "to", false, &[Sel, Ref]),
            ],
        ),
        schema(
            Action::Take,
            vec![
                RoleSpec::positional(Role::Patient, true, &[Sel]),
                RoleSpec::marked(Role::Source, "from", false, &[Sel, Ref]),
            ],
        ),
        schema(
            Action::Increment,
            vec![
                RoleSpec::positional(Role::Patient, true, &[Ref, Sel]),
                RoleSpec::marked(Role::Quantity, "by", false, &[Lit, Ref, Expr]),
            ],
        ),
        schema(
            Action::Decrement,
            vec![
                RoleSpec::positional(Role::Patient, true, &[Ref, Sel]),
                RoleSpec::marked(Role::Quantity, "by", false, &[Lit, Ref, Expr]),
            ],
        ),
        schema(
            Action::Log,
            vec![RoleSpec::positional(Role::Patient, true, &[Lit, Ref, Expr, Sel])],
        ),
        schema(
            Action::Send,
            vec![
                RoleSpec::positional(Role::Patient, true, &[Lit, Ref]),
                RoleSpec::marked(Role::Destination, "to", false, &[Sel, Ref]),
            ],
        ),
        schema(
            Action::Trigger,
            vec![
                RoleSpec::positional(Role::Patient, true, &[Lit, Ref]),
                RoleSpec::marked(Role::Destination, "on", false, &[Sel, Ref]),
            ],
        ),
        schema(
            Action::Wait,
            vec![RoleSpec::positional(Role::Duration, true, &[Lit, Ref, Expr])],
        ),
        schema(
            Action::Go,
            vec![RoleSpec::marked(Role::Destination, "to", true, &[Lit, Sel, Ref, Expr])],
        ),
        schema(
            Action::Call,
            vec![RoleSpec::positional(Role::Patient, true, &[Expr, Ref])],
        ),
        schema(
            Action::Focus,
            vec![RoleSpec::positional(Role::Patient, false, &[Sel, Ref]).with_default(me())],
        ),
        schema(
            Action::Blur,
            vec![RoleSpec::positional(Role::Patient, false, &[Sel, Ref]).with_default(me())],
        ),
        schema(
            Action::Return,
            vec![RoleSpec::positional(Role::Patient, false, &[])],
        ),
        schema(
            Action::Fetch,
            vec![
                RoleSpec::positional(Role::Source, true, &[Lit, Expr, Ref]),
                RoleSpec::marked(Role::ResponseType, "as", false, &[Lit, Ref]),
            ],
        ),
    ]
}

static SCHEMAS: Lazy<HashMap<Action, CommandSchema>> = Lazy::new(|| {
    build_schemas()
        .into_iter()
        .map(|schema| (schema.action.clone(), schema))
        .collect()
});

/// Schema of a known command
pub fn schema_for(action: &Action) -> Option<&'static CommandSchema> {
    SCHEMAS.get(action)
}

/// Every schema, in a stable order
pub fn all_schemas() -> Vec<&'static CommandSchema> {
    let mut schemas: Vec<_> = SCHEMAS.values().collect();
    schemas.sort_by(|a, b| a.action.as_str().cmp(b.action.as_str()));
    schemas
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_known_command_but_on_has_schema() {
        for action in Action::KNOWN.iter().filter(|a| **a != Action::On) {
            assert!(schema_for(action).is_some(), "no schema for {}", action);
        }
        assert!(schema_for(&Action::On).is_none());
    }

    #[test]
    fn test_at_most_one_positional_role() {
        for schema in all_schemas() {
            let positional = schema.roles.iter().filter(|r| r.marker.is_none()).count();
            assert!(positional <= 1, "{} has {} positional roles", schema.action, positional);
        }
    }

    #[test]
    fn test_toggle_layout() {
        let toggle = schema_for(&Action::Toggle).unwrap();
        let primary = toggle.primary().unwrap();
        assert_eq!(primary.role, Role::Patient);
        assert!(primary.is_strict());
        assert!(primary.accepts(ValueType::Selector));
        assert!(!primary.accepts(ValueType::Literal));

        let destination = toggle.role(Role::Destination).unwrap();
        assert_eq!(destination.marker, Some("on"));
        assert!(destination.default.is_none());
    }

    #[test]
    fn test_show_defaults_to_me() {
        let show = schema_for(&Action::Show).unwrap();
        let patient = show.role(Role::Patient).unwrap();
        assert_eq!(patient.default, Some(SemanticValue::reference("me")));
        assert!(!patient.is_strict());
    }

    #[test]
    fn test_go_has_no_positional_role() {
        let go = schema_for(&Action::Go).unwrap();
        assert!(go.primary().is_none());
        assert_eq!(go.marked_roles().count(), 1);
    }
}
