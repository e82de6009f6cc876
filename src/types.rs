//! Core types for the canonical semantic representation
//!
//! Every surface syntax (natural language, explicit brackets, semantic
//! JSON) lowers into a [`SemanticNode`]. Two nodes with the same meaning
//! compare equal and canonicalize to the same cache key regardless of the
//! language or the order in which their roles were written.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// Kind of CSS-like selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectorKind {
    /// `#id`
    Id,
    /// `.class`
    Class,
    /// `[attr]` or `[attr=value]`
    Attribute,
    /// Anything else: `<button/>`, `#a .b`, `.a.b`
    Complex,
}

impl SelectorKind {
    /// Classify a selector string
    pub fn classify(selector: &str) -> Self {
        fn simple_name(s: &str) -> bool {
            !s.is_empty()
                && s
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        }

        if let Some(rest) = selector.strip_prefix('#') {
            if simple_name(rest) {
                return SelectorKind::Id;
            }
        } else if let Some(rest) = selector.strip_prefix('.') {
            if simple_name(rest) {
                return SelectorKind::Class;
            }
        } else if selector.starts_with('[')
            && selector.ends_with(']')
            && selector.matches('[').count() == 1
        {
            return SelectorKind::Attribute;
        }

        SelectorKind::Complex
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SelectorKind::Id => "id",
            SelectorKind::Class => "class",
            SelectorKind::Attribute => "attribute",
            SelectorKind::Complex => "complex",
        }
    }
}

/// Primitive literal value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Boolean(bool),
    Number(f64),
    String(String),
}

impl LiteralValue {
    pub fn data_type(&self) -> &'static str {
        match self {
            LiteralValue::Boolean(_) => "boolean",
            LiteralValue::Number(_) => "number",
            LiteralValue::String(_) => "string",
        }
    }
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Boolean(b) => write!(f, "{}", b),
            LiteralValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            LiteralValue::String(s) => f.write_str(s),
        }
    }
}

/// Tag of a [`SemanticValue`], used for expected-type checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    Selector,
    Literal,
    Reference,
    Expression,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Selector => "selector",
            ValueType::Literal => "literal",
            ValueType::Reference => "reference",
            ValueType::Expression => "expression",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "selector" => Some(ValueType::Selector),
            "literal" => Some(ValueType::Literal),
            "reference" => Some(ValueType::Reference),
            "expression" => Some(ValueType::Expression),
            _ => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value held by a role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SemanticValue {
    /// CSS-like target
    Selector { value: String, kind: SelectorKind },
    /// Number, boolean or string
    Literal { value: LiteralValue },
    /// Built-in (`me`, `it`, `result`) or variable name
    Reference { value: String },
    /// Opaque sub-expression, passed through untouched
    Expression {
        #[serde(rename = "value")]
        raw: String,
    },
}

impl SemanticValue {
    pub fn selector(value: impl Into<String>) -> Self {
        let value = value.into();
        let kind = SelectorKind::classify(&value);
        SemanticValue::Selector { value, kind }
    }

    pub fn number(n: f64) -> Self {
        SemanticValue::Literal {
            value: LiteralValue::Number(n),
        }
    }

    pub fn boolean(b: bool) -> Self {
        SemanticValue::Literal {
            value: LiteralValue::Boolean(b),
        }
    }

    pub fn string(s: impl Into<String>) -> Self {
        SemanticValue::Literal {
            value: LiteralValue::String(s.into()),
        }
    }

    pub fn reference(name: impl Into<String>) -> Self {
        SemanticValue::Reference { value: name.into() }
    }

    pub fn expression(raw: impl Into<String>) -> Self {
        SemanticValue::Expression { raw: raw.into() }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            SemanticValue::Selector { .. } => ValueType::Selector,
            SemanticValue::Literal { .. } => ValueType::Literal,
            SemanticValue::Reference { .. } => ValueType::Reference,
            SemanticValue::Expression { .. } => ValueType::Expression,
        }
    }

    /// Plain text of the value, without quoting
    pub fn text(&self) -> String {
        match self {
            SemanticValue::Selector { value, .. } => value.clone(),
            SemanticValue::Literal { value } => value.to_string(),
            SemanticValue::Reference { value } => value.clone(),
            SemanticValue::Expression { raw } => raw.clone(),
        }
    }
}

/// Canonical command name
///
/// Known commands are a closed set; anything else parses as
/// [`Action::Unknown`] and is left for the code generation bridge to accept
/// or reject.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Action {
    Toggle,
    Add,
    Remove,
    Show,
    Hide,
    Set,
    Get,
    Put,
    Append,
    Take,
    Increment,
    Decrement,
    Log,
    Send,
    Trigger,
    Wait,
    Go,
    Call,
    Focus,
    Blur,
    Return,
    Fetch,
    /// Event handler wrapper
    On,
    Unknown(String),
}

impl Action {
    /// Every known command, in a fixed order
    pub const KNOWN: [Action; 23] = [
        Action::Toggle,
        Action::Add,
        Action::Remove,
        Action::Show,
        Action::Hide,
        Action::Set,
        Action::Get,
        Action::Put,
        Action::Append,
        Action::Take,
        Action::Increment,
        Action::Decrement,
        Action::Log,
        Action::Send,
        Action::Trigger,
        Action::Wait,
        Action::Go,
        Action::Call,
        Action::Focus,
        Action::Blur,
        Action::Return,
        Action::Fetch,
        Action::On,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Action::Toggle => "toggle",
            Action::Add => "add",
            Action::Remove => "remove",
            Action::Show => "show",
            Action::Hide => "hide",
            Action::Set => "set",
            Action::Get => "get",
            Action::Put => "put",
            Action::Append => "append",
            Action::Take => "take",
            Action::Increment => "increment",
            Action::Decrement => "decrement",
            Action::Log => "log",
            Action::Send => "send",
            Action::Trigger => "trigger",
            Action::Wait => "wait",
            Action::Go => "go",
            Action::Call => "call",
            Action::Focus => "focus",
            Action::Blur => "blur",
            Action::Return => "return",
            Action::Fetch => "fetch",
            Action::On => "on",
            Action::Unknown(name) => name,
        }
    }

    /// Parse a command name (case-insensitive; `removeClass` is an alias of `remove`)
    pub fn from_name(name: &str) -> Self {
        let lower = name.trim().to_lowercase();
        if lower == "removeclass" {
            return Action::Remove;
        }
        Action::KNOWN
            .iter()
            .find(|a| a.as_str() == lower)
            .cloned()
            .unwrap_or_else(|| Action::Unknown(name.trim().to_string()))
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Action::Unknown(_))
    }
}

impl From<String> for Action {
    fn from(name: String) -> Self {
        Action::from_name(&name)
    }
}

impl From<Action> for String {
    fn from(action: Action) -> Self {
        action.as_str().to_string()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named semantic slot on a node
///
/// Ordered by name so that role maps iterate (and canonicalize) sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    Agent,
    Patient,
    Destination,
    Source,
    Goal,
    Event,
    Quantity,
    Duration,
    Style,
    Manner,
    Method,
    Condition,
    Instrument,
    ResponseType,
}

impl Role {
    pub const ALL: [Role; 14] = [
        Role::Agent,
        Role::Patient,
        Role::Destination,
        Role::Source,
        Role::Goal,
        Role::Event,
        Role::Quantity,
        Role::Duration,
        Role::Style,
        Role::Manner,
        Role::Method,
        Role::Condition,
        Role::Instrument,
        Role::ResponseType,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Agent => "agent",
            Role::Patient => "patient",
            Role::Destination => "destination",
            Role::Source => "source",
            Role::Goal => "goal",
            Role::Event => "event",
            Role::Quantity => "quantity",
            Role::Duration => "duration",
            Role::Style => "style",
            Role::Manner => "manner",
            Role::Method => "method",
            Role::Condition => "condition",
            Role::Instrument => "instrument",
            Role::ResponseType => "responseType",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Role::ALL.iter().copied().find(|r| r.as_str() == name)
    }
}

impl PartialOrd for Role {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Role {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Role::from_name(&name).ok_or_else(|| format!("unknown role '{}'", name))
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a node is a plain command or an event handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    #[serde(rename = "command")]
    Command,
    #[serde(rename = "event-handler")]
    EventHandler,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Command => "command",
            NodeKind::EventHandler => "event-handler",
        }
    }
}

/// Canonical, language-independent representation of one command or handler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticNode {
    pub action: Action,
    pub kind: NodeKind,
    #[serde(default)]
    pub roles: BTreeMap<Role, SemanticValue>,
    /// Child commands of an event handler, in order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub body: Vec<SemanticNode>,
    /// Event name of an event handler
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub event_modifiers: BTreeMap<String, serde_json::Value>,
}

impl SemanticNode {
    /// A command node with no roles
    pub fn command(action: Action) -> Self {
        Self {
            action,
            kind: NodeKind::Command,
            roles: BTreeMap::new(),
            body: Vec::new(),
            event: None,
            event_modifiers: BTreeMap::new(),
        }
    }

    /// An event handler running `body` when `event` fires
    pub fn event_handler(event: impl Into<String>, body: Vec<SemanticNode>) -> Self {
        Self {
            action: Action::On,
            kind: NodeKind::EventHandler,
            roles: BTreeMap::new(),
            body,
            event: Some(event.into()),
            event_modifiers: BTreeMap::new(),
        }
    }

    pub fn with_role(mut self, role: Role, value: SemanticValue) -> Self {
        self.roles.insert(role, value);
        self
    }

    pub fn with_modifier(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.event_modifiers.insert(name.into(), value);
        self
    }

    pub fn role(&self, role: Role) -> Option<&SemanticValue> {
        self.roles.get(&role)
    }

    pub fn is_event_handler(&self) -> bool {
        self.kind == NodeKind::EventHandler
    }
}

/// Default optimization level when a request does not specify one
pub const DEFAULT_OPTIMIZATION: u8 = 1;

/// Default output target
pub const DEFAULT_TARGET: &str = "esm";

/// Options passed through to the code generation bridge
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimization: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minify: Option<bool>,
}

impl CompileOptions {
    /// Fill unset fields from `defaults`
    pub fn or(&self, defaults: &CompileOptions) -> CompileOptions {
        CompileOptions {
            optimization: self.optimization.or(defaults.optimization),
            target: self.target.clone().or_else(|| defaults.target.clone()),
            minify: self.minify.or(defaults.minify),
        }
    }

    pub fn optimization_level(&self) -> u8 {
        self.optimization.unwrap_or(DEFAULT_OPTIMIZATION)
    }

    pub fn target_name(&self) -> &str {
        self.target.as_deref().unwrap_or(DEFAULT_TARGET)
    }

    pub fn minify_enabled(&self) -> bool {
        self.minify.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_classification() {
        assert_eq!(SelectorKind::classify("#button"), SelectorKind::Id);
        assert_eq!(SelectorKind::classify(".active"), SelectorKind::Class);
        assert_eq!(SelectorKind::classify("[disabled]"), SelectorKind::Attribute);
        assert_eq!(SelectorKind::classify("<button/>"), SelectorKind::Complex);
        assert_eq!(SelectorKind::classify(".a.b"), SelectorKind::Complex);
    }

    #[test]
    fn test_value_json_shape() {
        let value = SemanticValue::selector(".active");
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json["type"], "selector");
        assert_eq!(json["value"], ".active");
        assert_eq!(json["kind"], "class");

        let expr = SemanticValue::expression("x + 1");
        let json = serde_json::to_value(&expr).unwrap();
        assert_eq!(json["type"], "expression");
        assert_eq!(json["value"], "x + 1");
    }

    #[test]
    fn test_literal_display() {
        assert_eq!(LiteralValue::Number(5.0).to_string(), "5");
        assert_eq!(LiteralValue::Number(2.5).to_string(), "2.5");
        assert_eq!(LiteralValue::Boolean(true).to_string(), "true");
    }

    #[test]
    fn test_action_names() {
        assert_eq!(Action::from_name("Toggle"), Action::Toggle);
        assert_eq!(Action::from_name("removeClass"), Action::Remove);
        assert_eq!(
            Action::from_name("frobnicate"),
            Action::Unknown("frobnicate".to_string())
        );
        assert!(!Action::from_name("frobnicate").is_known());
    }

    #[test]
    fn test_roles_iterate_by_name() {
        let node = SemanticNode::command(Action::Put)
            .with_role(Role::Patient, SemanticValue::string("x"))
            .with_role(Role::Destination, SemanticValue::selector("#out"));

        let names: Vec<_> = node.roles.keys().map(|r| r.as_str()).collect();
        assert_eq!(names, vec!["destination", "patient"]);
    }

    #[test]
    fn test_node_serialization() {
        let node = SemanticNode::event_handler(
            "click",
            vec![SemanticNode::command(Action::Toggle)
                .with_role(Role::Patient, SemanticValue::selector(".active"))],
        );
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["action"], "on");
        assert_eq!(json["kind"], "event-handler");
        assert_eq!(json["event"], "click");
        assert_eq!(json["body"][0]["roles"]["patient"]["value"], ".active");

        let back: SemanticNode = serde_json::from_value(json).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn test_options_defaults() {
        let options = CompileOptions {
            optimization: Some(2),
            ..Default::default()
        };
        assert_eq!(options.optimization_level(), 2);
        assert_eq!(options.target_name(), "esm");
        assert!(!options.minify_enabled());

        let defaults = CompileOptions {
            optimization: Some(3),
            target: Some("iife".to_string()),
            minify: Some(true),
        };
        let merged = options.or(&defaults);
        assert_eq!(merged.optimization, Some(2));
        assert_eq!(merged.target.as_deref(), Some("iife"));
        assert_eq!(merged.minify, Some(true));
    }
}
