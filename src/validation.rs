//! Validation gate
//!
//! Checks a node against its command schema and gates it on confidence.
//! Missing or mistyped required roles are errors; mistyped optional roles
//! and roles the schema does not know are warnings, each costing
//! [`WARNING_PENALTY`] confidence. The gate is pure: same input, same report.

use crate::diagnostics::{Diagnostic, DiagnosticCode, Severity};
use crate::schema::schema_for;
use crate::types::{Action, SemanticNode};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Threshold used when neither the request nor the config sets one
pub const DEFAULT_CONFIDENCE_THRESHOLD: f32 = 0.7;

/// Confidence removed per warning
pub const WARNING_PENALTY: f32 = 0.05;

/// Outcome of the gate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub pass: bool,
    pub adjusted_confidence: f32,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidationGate {
    threshold: f32,
}

impl Default for ValidationGate {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIDENCE_THRESHOLD)
    }
}

impl ValidationGate {
    pub fn new(threshold: f32) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Validate `node` parsed with `confidence`
    pub fn validate(&self, node: &SemanticNode, confidence: f32) -> ValidationReport {
        let mut diagnostics = Vec::new();
        check_node(node, &mut diagnostics);

        let warnings = diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count();
        let adjusted_confidence = (confidence - warnings as f32 * WARNING_PENALTY).clamp(0.0, 1.0);

        if adjusted_confidence < self.threshold {
            diagnostics.push(
                Diagnostic::error(
                    DiagnosticCode::LowConfidence,
                    format!(
                        "Confidence {:.2} is below the threshold {:.2}",
                        adjusted_confidence, self.threshold
                    ),
                )
                .with_suggestion("Rephrase the command or use explicit syntax"),
            );
        }

        let pass = !diagnostics.iter().any(Diagnostic::is_error);
        if !pass {
            debug!(
                "Validation failed for {} ({} diagnostics)",
                node.action,
                diagnostics.len()
            );
        }

        ValidationReport {
            pass,
            adjusted_confidence,
            diagnostics,
        }
    }
}

fn check_node(node: &SemanticNode, diagnostics: &mut Vec<Diagnostic>) {
    if node.is_event_handler() {
        check_handler(node, diagnostics);
    } else if node.action == Action::On {
        diagnostics.push(Diagnostic::error(
            DiagnosticCode::InvalidTrigger,
            "'on' must be an event handler with an event and a body",
        ));
    } else {
        check_command(node, diagnostics);
    }
}

fn check_handler(node: &SemanticNode, diagnostics: &mut Vec<Diagnostic>) {
    if node.event.as_deref().map_or(true, |e| e.trim().is_empty()) {
        diagnostics.push(Diagnostic::error(
            DiagnosticCode::InvalidTrigger,
            "Event handler has no event",
        ));
    }
    if node.body.is_empty() {
        diagnostics.push(Diagnostic::error(
            DiagnosticCode::MissingRole,
            "Event handler has an empty body",
        ));
    }
    for role in node.roles.keys() {
        diagnostics.push(Diagnostic::warning(
            DiagnosticCode::UnexpectedRole,
            format!("Event handler carries role '{}'", role),
        ));
    }
    for child in &node.body {
        check_node(child, diagnostics);
    }
}

fn check_command(node: &SemanticNode, diagnostics: &mut Vec<Diagnostic>) {
    // Unknown commands are left to the code generation bridge
    let schema = match schema_for(&node.action) {
        Some(schema) => schema,
        None => return,
    };

    for spec in &schema.roles {
        match node.role(spec.role) {
            None if spec.is_strict() => diagnostics.push(
                Diagnostic::error(
                    DiagnosticCode::MissingRole,
                    format!("'{}' requires a {}", node.action, spec.role),
                )
                .with_suggestion(match spec.marker {
                    Some(marker) => format!("Add '{} <value>'", marker),
                    None => format!("Add the {} after the command", spec.role),
                }),
            ),
            None => {}
            Some(value) if !spec.accepts(value.value_type()) => {
                let message = format!(
                    "'{}' does not take a {} as {}",
                    node.action,
                    value.value_type(),
                    spec.role
                );
                diagnostics.push(if spec.required {
                    Diagnostic::error(DiagnosticCode::InvalidValueType, message)
                } else {
                    Diagnostic::warning(DiagnosticCode::InvalidValueType, message)
                });
            }
            Some(_) => {}
        }
    }

    for role in node.roles.keys() {
        if schema.role(*role).is_none() {
            diagnostics.push(Diagnostic::warning(
                DiagnosticCode::UnexpectedRole,
                format!("'{}' does not use {}", node.action, role),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Role, SemanticValue};

    fn toggle() -> SemanticNode {
        SemanticNode::command(Action::Toggle).with_role(Role::Patient, SemanticValue::selector(".active"))
    }

    fn codes(report: &ValidationReport) -> Vec<DiagnosticCode> {
        report.diagnostics.iter().map(|d| d.code).collect()
    }

    #[test]
    fn test_valid_node_passes() {
        let report = ValidationGate::default().validate(&toggle(), 1.0);
        assert!(report.pass);
        assert_eq!(report.adjusted_confidence, 1.0);
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn test_low_confidence_fails_well_formed_node() {
        let report = ValidationGate::new(0.7).validate(&toggle(), 0.5);
        assert!(!report.pass);
        assert_eq!(codes(&report), vec![DiagnosticCode::LowConfidence]);
        assert_eq!(report.adjusted_confidence, 0.5);
    }

    #[test]
    fn test_missing_required_role() {
        let node = SemanticNode::command(Action::Put).with_role(Role::Patient, SemanticValue::string("x"));
        let report = ValidationGate::default().validate(&node, 1.0);
        assert!(!report.pass);
        assert_eq!(codes(&report), vec![DiagnosticCode::MissingRole]);
    }

    #[test]
    fn test_defaulted_role_may_be_absent() {
        let report = ValidationGate::default().validate(&SemanticNode::command(Action::Show), 1.0);
        assert!(report.pass);
    }

    #[test]
    fn test_type_checks() {
        let required = SemanticNode::command(Action::Add).with_role(Role::Patient, SemanticValue::number(5.0));
        let report = ValidationGate::default().validate(&required, 1.0);
        assert!(!report.pass);
        assert_eq!(report.diagnostics[0].severity, Severity::Error);

        let optional = toggle().with_role(Role::Destination, SemanticValue::number(1.0));
        let report = ValidationGate::default().validate(&optional, 1.0);
        assert!(report.pass);
        assert_eq!(report.diagnostics[0].severity, Severity::Warning);
        assert!((report.adjusted_confidence - (1.0 - WARNING_PENALTY)).abs() < 1e-6);
    }

    #[test]
    fn test_unexpected_role_warns() {
        let node = toggle().with_role(Role::Style, SemanticValue::string("x"));
        let report = ValidationGate::default().validate(&node, 0.72);
        assert_eq!(codes(&report), vec![DiagnosticCode::UnexpectedRole, DiagnosticCode::LowConfidence]);
    }

    #[test]
    fn test_handler_checks() {
        let good = SemanticNode::event_handler("click", vec![toggle()]);
        assert!(ValidationGate::default().validate(&good, 1.0).pass);

        let empty = SemanticNode::event_handler("", Vec::new());
        let report = ValidationGate::default().validate(&empty, 1.0);
        assert_eq!(codes(&report), vec![DiagnosticCode::InvalidTrigger, DiagnosticCode::MissingRole]);

        let bad_body = SemanticNode::event_handler("click", vec![SemanticNode::command(Action::Put)]);
        assert!(!ValidationGate::default().validate(&bad_body, 1.0).pass);

        let bare_on = SemanticNode::command(Action::On);
        assert_eq!(
            codes(&ValidationGate::default().validate(&bare_on, 1.0)),
            vec![DiagnosticCode::InvalidTrigger]
        );
    }

    #[test]
    fn test_unknown_action_passes() {
        let node = SemanticNode::command(Action::from_name("frobnicate"))
            .with_role(Role::Patient, SemanticValue::selector("#a"));
        assert!(ValidationGate::default().validate(&node, 1.0).pass);
    }
}
