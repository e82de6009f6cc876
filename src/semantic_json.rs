//! Structured JSON input
//!
//! Accepts the shape an LLM is asked to produce:
//!
//! ```json
//! {
//!   "action": "toggle",
//!   "roles": { "patient": { "type": "selector", "value": ".active" } },
//!   "trigger": { "event": "click", "modifiers": { "once": true } }
//! }
//! ```
//!
//! Validation reports every problem it finds as a diagnostic, except a
//! missing or malformed `action`: that is reported once and nothing else is
//! examined.

use crate::diagnostics::{has_errors, Diagnostic, DiagnosticCode};
use crate::types::{Action, Role, SemanticNode, SemanticValue, ValueType};
use serde_json::Value;
use std::collections::BTreeMap;

fn role_value(name: &str, raw: &Value, diagnostics: &mut Vec<Diagnostic>) -> Option<SemanticValue> {
    let object = match raw.as_object() {
        Some(object) => object,
        None => {
            diagnostics.push(Diagnostic::error(
                DiagnosticCode::InvalidRoleValue,
                format!("Role '{}' must be an object with 'type' and 'value'", name),
            ));
            return None;
        }
    };

    let value_type = match object.get("type").and_then(Value::as_str).and_then(ValueType::from_name) {
        Some(value_type) => value_type,
        None => {
            diagnostics.push(
                Diagnostic::error(
                    DiagnosticCode::InvalidValueType,
                    format!("Role '{}' has an invalid type", name),
                )
                .with_suggestion("Use one of: selector, literal, reference, expression"),
            );
            return None;
        }
    };

    let value = match object.get("value") {
        Some(Value::Null) | None => {
            diagnostics.push(Diagnostic::error(
                DiagnosticCode::MissingValue,
                format!("Role '{}' has no value", name),
            ));
            return None;
        }
        Some(value) => value,
    };

    let typed = match (value_type, value) {
        (ValueType::Selector, Value::String(s)) if !s.is_empty() => Some(SemanticValue::selector(s.clone())),
        (ValueType::Literal, Value::String(s)) => Some(SemanticValue::string(s.clone())),
        (ValueType::Literal, Value::Bool(b)) => Some(SemanticValue::boolean(*b)),
        (ValueType::Literal, Value::Number(n)) => n.as_f64().map(SemanticValue::number),
        (ValueType::Reference, Value::String(s)) if !s.is_empty() => Some(SemanticValue::reference(s.clone())),
        (ValueType::Expression, Value::String(s)) if !s.is_empty() => Some(SemanticValue::expression(s.clone())),
        _ => None,
    };

    if typed.is_none() {
        diagnostics.push(Diagnostic::error(
            DiagnosticCode::InvalidRoleValue,
            format!("Role '{}' has a value that is not a valid {}", name, value_type),
        ));
    }
    typed
}

fn trigger(raw: &Value, diagnostics: &mut Vec<Diagnostic>) -> Option<(String, BTreeMap<String, Value>)> {
    let event = raw
        .get("event")
        .and_then(Value::as_str)
        .filter(|e| !e.trim().is_empty());
    let event = match event {
        Some(event) => event.to_string(),
        None => {
            diagnostics.push(
                Diagnostic::error(DiagnosticCode::InvalidTrigger, "Trigger needs a non-empty 'event'")
                    .with_suggestion("e.g. {\"event\": \"click\"}"),
            );
            return None;
        }
    };

    let modifiers = match raw.get("modifiers") {
        None | Some(Value::Null) => BTreeMap::new(),
        Some(Value::Object(map)) => map.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        Some(_) => {
            diagnostics.push(Diagnostic::error(
                DiagnosticCode::InvalidTrigger,
                "Trigger 'modifiers' must be an object",
            ));
            return None;
        }
    };

    Some((event, modifiers))
}

/// Validate structured input and build its node
///
/// Returns `None` for the node whenever an error diagnostic was emitted.
pub fn validate_semantic_json(input: &Value) -> (Option<SemanticNode>, Vec<Diagnostic>) {
    let mut diagnostics = Vec::new();

    let action = input
        .get("action")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|a| !a.is_empty());
    let action = match action {
        Some(action) => Action::from_name(action),
        None => {
            diagnostics.push(
                Diagnostic::error(DiagnosticCode::InvalidAction, "Missing or invalid 'action'")
                    .with_suggestion("Provide the command name as a string, e.g. \"toggle\""),
            );
            return (None, diagnostics);
        }
    };

    let mut roles = BTreeMap::new();
    match input.get("roles") {
        None | Some(Value::Null) => {}
        Some(Value::Object(map)) => {
            for (name, raw) in map {
                match Role::from_name(name) {
                    Some(role) => {
                        if let Some(value) = role_value(name, raw, &mut diagnostics) {
                            roles.insert(role, value);
                        }
                    }
                    None => diagnostics.push(Diagnostic::error(
                        DiagnosticCode::InvalidRoleValue,
                        format!("Unknown role '{}'", name),
                    )),
                }
            }
        }
        Some(_) => diagnostics.push(Diagnostic::error(
            DiagnosticCode::InvalidRoleValue,
            "'roles' must be an object",
        )),
    }

    let trigger = match input.get("trigger") {
        None | Some(Value::Null) => None,
        Some(raw) => trigger(raw, &mut diagnostics),
    };

    if has_errors(&diagnostics) {
        return (None, diagnostics);
    }

    let event_role = roles.remove(&Role::Event);
    let mut command = SemanticNode::command(action);
    command.roles = roles;

    let node = match (trigger, event_role) {
        (Some((event, modifiers)), _) => {
            let mut handler = SemanticNode::event_handler(event, vec![command]);
            handler.event_modifiers = modifiers;
            handler
        }
        (None, Some(event)) => SemanticNode::event_handler(event.text(), vec![command]),
        (None, None) => command,
    };

    (Some(node), diagnostics)
}
