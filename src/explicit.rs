//! Bracketed explicit syntax
//!
//! ```text
//! [toggle patient:.active destination:#box]
//! [put patient:"hello" destination:#out]
//! [on event:click once:true body:[toggle patient:.active]]
//! ```
//!
//! The first word names the command; every other entry is `role:value`.
//! On `on`, `event` names the event, each `body:[...]` appends a child
//! command and any other key becomes an event modifier. A command carrying
//! `event:` is lifted into a handler wrapping it.
//!
//! Values are typed by shape: `#id`, `.class`, `<tag/>`, `[attr]` and
//! anything carrying an attribute part (`input[type=checkbox]`) are
//! selectors, quoted text is a string, numbers and `true`/`false` are
//! literals, `(...)` is an expression, and bare names (`me`, `:count`) are
//! references. Anything else (`2s`, `/api/items`) is a string literal.
//! Selectors that do not fit one word are written `sel(#list li)`.

use crate::types::{Action, Role, SemanticNode, SemanticValue};
use logos::Logos;
use std::collections::BTreeMap;
use std::ops::Range;
use thiserror::Error;

/// Malformed explicit syntax
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExplicitSyntaxError {
    #[error("Unexpected character at position {position}")]
    UnexpectedChar { position: usize },

    #[error("Unexpected end of input")]
    UnexpectedEnd,

    #[error("Expected {expected} at position {position}, found '{found}'")]
    Expected {
        expected: &'static str,
        found: String,
        position: usize,
    },

    #[error("Unknown role '{0}'")]
    UnknownRole(String),

    #[error("Role '{0}' given twice")]
    DuplicateRole(String),

    #[error("Event handler has no event")]
    MissingEvent,

    #[error("Unexpected input after command at position {position}")]
    TrailingInput { position: usize },
}

type Result<T> = std::result::Result<T, ExplicitSyntaxError>;

/// Prefix of the selector form for selectors with spaces or parentheses
const SELECTOR_FORM: &str = "sel";

fn unquote(lex: &mut logos::Lexer<Lexeme>) -> String {
    let slice = lex.slice();
    let mut value = String::with_capacity(slice.len());
    let mut escaped = false;
    for c in slice[1..slice.len() - 1].chars() {
        if escaped {
            value.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else {
            value.push(c);
        }
    }
    value
}

/// Inner text of a parenthesized expression, nesting allowed
fn balanced(lex: &mut logos::Lexer<Lexeme>) -> Option<String> {
    let rest = lex.remainder();
    let mut depth = 1;
    for (i, c) in rest.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    lex.bump(i + 1);
                    return Some(rest[..i].trim().to_string());
                }
            }
            _ => {}
        }
    }
    None
}

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n\f]+")]
enum Lexeme {
    #[token("[")]
    Open,

    #[token("]")]
    Close,

    #[regex(r#""([^"\\]|\\.)*""#, unquote)]
    #[regex(r#"'([^'\\]|\\.)*'"#, unquote)]
    Quoted(String),

    #[token("(", balanced)]
    Parenthesized(String),

    #[regex(r#"[^\s\[\]"'()]+(\[[^\]\s]*\][^\s\[\]"'()]*)*"#, |lex| lex.slice().to_string())]
    Word(String),
}

impl Lexeme {
    fn describe(&self) -> String {
        match self {
            Lexeme::Open => "[".to_string(),
            Lexeme::Close => "]".to_string(),
            Lexeme::Quoted(s) => format!("\"{}\"", s),
            Lexeme::Parenthesized(s) => format!("({})", s),
            Lexeme::Word(w) => w.clone(),
        }
    }
}

/// Value of one `key:value` entry before it is typed
enum RawValue {
    Word(String),
    Quoted(String),
    Expression(String),
    Selector(String),
    Node(SemanticNode),
}

impl RawValue {
    fn text(&self) -> Option<&str> {
        match self {
            RawValue::Word(s) | RawValue::Quoted(s) => Some(s),
            _ => None,
        }
    }
}

fn is_name(word: &str) -> bool {
    let mut chars = word.chars();
    chars.next().map_or(false, |c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_' || c == '-')
}

fn looks_numeric(word: &str) -> bool {
    word.chars()
        .next()
        .map_or(false, |c| c.is_ascii_digit() || c == '-' || c == '+')
        && word.parse::<f64>().is_ok()
}

fn is_selector_word(word: &str) -> bool {
    word.starts_with(&['#', '.', '<', '*'][..]) || word.contains('[')
}

/// True if every `[` closes before the next one opens
fn brackets_closed(word: &str) -> bool {
    let mut open = false;
    for c in word.chars() {
        match c {
            '[' if open => return false,
            '[' => open = true,
            ']' if !open => return false,
            ']' => open = false,
            _ => {}
        }
    }
    !open
}

fn type_word(role: Role, word: &str) -> SemanticValue {
    if is_selector_word(word) {
        return SemanticValue::selector(word);
    }
    if looks_numeric(word) {
        if let Ok(n) = word.parse::<f64>() {
            return SemanticValue::number(n);
        }
    }
    match word {
        "true" => SemanticValue::boolean(true),
        "false" => SemanticValue::boolean(false),
        _ if role == Role::Event => SemanticValue::string(word),
        _ if word.starts_with(&[':', '$'][..]) || is_name(word) => SemanticValue::reference(word),
        _ => SemanticValue::string(word),
    }
}

fn type_value(role: Role, raw: RawValue) -> Option<SemanticValue> {
    match raw {
        RawValue::Word(word) => Some(type_word(role, &word)),
        RawValue::Quoted(s) => Some(SemanticValue::string(s)),
        RawValue::Expression(raw) => Some(SemanticValue::expression(raw)),
        RawValue::Selector(selector) => Some(SemanticValue::selector(selector)),
        RawValue::Node(_) => None,
    }
}

fn modifier_value(raw: &RawValue) -> serde_json::Value {
    match raw {
        RawValue::Word(word) => {
            if let Ok(i) = word.parse::<i64>() {
                serde_json::Value::from(i)
            } else if looks_numeric(word) {
                word.parse::<f64>()
                    .map(serde_json::Value::from)
                    .unwrap_or_else(|_| serde_json::Value::String(word.clone()))
            } else {
                match word.as_str() {
                    "true" => serde_json::Value::Bool(true),
                    "false" => serde_json::Value::Bool(false),
                    _ => serde_json::Value::String(word.clone()),
                }
            }
        }
        RawValue::Quoted(s) | RawValue::Expression(s) | RawValue::Selector(s) => {
            serde_json::Value::String(s.clone())
        }
        RawValue::Node(_) => serde_json::Value::Null,
    }
}

struct Parser {
    tokens: Vec<(Lexeme, Range<usize>)>,
    pos: usize,
}

impl Parser {
    fn next(&mut self) -> Option<(Lexeme, Range<usize>)> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect_open(&mut self) -> Result<()> {
        match self.next() {
            Some((Lexeme::Open, _)) => Ok(()),
            Some((other, span)) => Err(ExplicitSyntaxError::Expected {
                expected: "'['",
                found: other.describe(),
                position: span.start,
            }),
            None => Err(ExplicitSyntaxError::UnexpectedEnd),
        }
    }

    fn value_after(&mut self, key: &str) -> Result<RawValue> {
        match self.next() {
            Some((Lexeme::Word(w), _)) => Ok(RawValue::Word(w)),
            Some((Lexeme::Quoted(s), _)) => Ok(RawValue::Quoted(s)),
            Some((Lexeme::Parenthesized(s), _)) => Ok(RawValue::Expression(s)),
            Some((Lexeme::Open, _)) if key == "body" => {
                self.pos -= 1;
                Ok(RawValue::Node(self.node()?))
            }
            Some((Lexeme::Open, _)) => {
                let inner = match self.next() {
                    Some((Lexeme::Word(w), _)) => w,
                    Some((other, span)) => {
                        return Err(ExplicitSyntaxError::Expected {
                            expected: "attribute name",
                            found: other.describe(),
                            position: span.start,
                        })
                    }
                    None => return Err(ExplicitSyntaxError::UnexpectedEnd),
                };
                match self.next() {
                    Some((Lexeme::Close, _)) => Ok(RawValue::Selector(format!("[{}]", inner))),
                    Some((other, span)) => Err(ExplicitSyntaxError::Expected {
                        expected: "']'",
                        found: other.describe(),
                        position: span.start,
                    }),
                    None => Err(ExplicitSyntaxError::UnexpectedEnd),
                }
            }
            Some((other, span)) => Err(ExplicitSyntaxError::Expected {
                expected: "value",
                found: other.describe(),
                position: span.start,
            }),
            None => Err(ExplicitSyntaxError::UnexpectedEnd),
        }
    }

    /// `sel` directly followed by `(...)` reads as one selector
    fn selector_form(&mut self, raw: RawValue) -> RawValue {
        let word_end = self
            .pos
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(|(_, span)| span.end);
        match raw {
            RawValue::Word(word) if word == SELECTOR_FORM => match self.tokens.get(self.pos) {
                Some((Lexeme::Parenthesized(inner), span)) if Some(span.start) == word_end => {
                    let selector = inner.clone();
                    self.pos += 1;
                    RawValue::Selector(selector)
                }
                _ => RawValue::Word(word),
            },
            other => other,
        }
    }

    fn node(&mut self) -> Result<SemanticNode> {
        self.expect_open()?;

        let action = match self.next() {
            Some((Lexeme::Word(name), span)) if name.contains(':') => {
                return Err(ExplicitSyntaxError::Expected {
                    expected: "command name",
                    found: name,
                    position: span.start,
                })
            }
            Some((Lexeme::Word(name), _)) => Action::from_name(&name),
            Some((other, span)) => {
                return Err(ExplicitSyntaxError::Expected {
                    expected: "command name",
                    found: other.describe(),
                    position: span.start,
                })
            }
            None => return Err(ExplicitSyntaxError::UnexpectedEnd),
        };

        let mut roles = BTreeMap::new();
        let mut body = Vec::new();
        let mut event: Option<String> = None;
        let mut modifiers = BTreeMap::new();

        loop {
            let (word, span) = match self.next() {
                Some((Lexeme::Close, _)) => break,
                Some((Lexeme::Word(word), span)) => (word, span),
                Some((other, span)) => {
                    return Err(ExplicitSyntaxError::Expected {
                        expected: "role:value or ']'",
                        found: other.describe(),
                        position: span.start,
                    })
                }
                None => return Err(ExplicitSyntaxError::UnexpectedEnd),
            };

            let (key, inline) = match word.split_once(':') {
                Some((key, inline)) if !key.is_empty() => (key.to_string(), inline.to_string()),
                _ => {
                    return Err(ExplicitSyntaxError::Expected {
                        expected: "role:value",
                        found: word,
                        position: span.start,
                    })
                }
            };
            let raw = if inline.is_empty() {
                self.value_after(&key)?
            } else if key == "body" && inline.starts_with('[') {
                // A child without roles lexes as one word: `body:[blur]`
                RawValue::Node(parse_explicit(&inline)?)
            } else {
                RawValue::Word(inline)
            };
            let raw = self.selector_form(raw);

            if key == "body" {
                match raw {
                    RawValue::Node(child) if action == Action::On => body.push(child),
                    _ => {
                        return Err(ExplicitSyntaxError::Expected {
                            expected: "body:[command ...] on 'on'",
                            found: key,
                            position: span.start,
                        })
                    }
                }
                continue;
            }
            if matches!(raw, RawValue::Node(_)) {
                return Err(ExplicitSyntaxError::Expected {
                    expected: "value",
                    found: format!("{}:[...]", key),
                    position: span.start,
                });
            }

            if key == "event" {
                match raw.text() {
                    Some(name) if !name.is_empty() => event = Some(name.to_string()),
                    _ => {
                        return Err(ExplicitSyntaxError::Expected {
                            expected: "event name",
                            found: key,
                            position: span.start,
                        })
                    }
                }
            } else if action == Action::On {
                modifiers.insert(key, modifier_value(&raw));
            } else {
                let role = Role::from_name(&key).ok_or_else(|| ExplicitSyntaxError::UnknownRole(key.clone()))?;
                if roles.contains_key(&role) {
                    return Err(ExplicitSyntaxError::DuplicateRole(key));
                }
                if let Some(value) = type_value(role, raw) {
                    roles.insert(role, value);
                }
            }
        }

        if action == Action::On {
            let event = event.ok_or(ExplicitSyntaxError::MissingEvent)?;
            let mut handler = SemanticNode::event_handler(event, body);
            handler.event_modifiers = modifiers;
            return Ok(handler);
        }

        let mut command = SemanticNode::command(action);
        command.roles = roles;
        Ok(match event {
            Some(event) => SemanticNode::event_handler(event, vec![command]),
            None => command,
        })
    }
}

/// True if `code` is written in explicit syntax
pub fn is_explicit(code: &str) -> bool {
    code.trim_start().starts_with('[')
}

/// Parse one bracketed command or handler
pub fn parse_explicit(input: &str) -> Result<SemanticNode> {
    let mut tokens = Vec::new();
    let mut lexer = Lexeme::lexer(input);
    while let Some(token) = lexer.next() {
        match token {
            Ok(lexeme) => tokens.push((lexeme, lexer.span())),
            Err(()) => {
                return Err(ExplicitSyntaxError::UnexpectedChar {
                    position: lexer.span().start,
                })
            }
        }
    }

    let mut parser = Parser { tokens, pos: 0 };
    let node = parser.node()?;
    if let Some((_, span)) = parser.tokens.get(parser.pos) {
        return Err(ExplicitSyntaxError::TrailingInput { position: span.start });
    }
    Ok(node)
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

fn render_value(value: &SemanticValue) -> String {
    match value {
        SemanticValue::Selector { value, .. }
            if is_selector_word(value)
                && brackets_closed(value)
                && !value.contains(|c: char| c.is_whitespace() || "()\"'".contains(c)) =>
        {
            value.clone()
        }
        SemanticValue::Selector { value, .. } => format!("{}({})", SELECTOR_FORM, value),
        SemanticValue::Literal {
            value: crate::types::LiteralValue::String(s),
        } => quote(s),
        SemanticValue::Literal { value } => value.to_string(),
        SemanticValue::Reference { value } => value.clone(),
        SemanticValue::Expression { raw } => format!("({})", raw),
    }
}

fn render_modifier(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) if is_name(s) && s != "true" && s != "false" => s.clone(),
        serde_json::Value::String(s) => quote(s),
        other => other.to_string(),
    }
}

/// Write `node` back out in explicit syntax
pub fn render_explicit(node: &SemanticNode) -> String {
    let mut out = format!("[{}", node.action);

    if let Some(event) = &node.event {
        if is_name(event) {
            out.push_str(&format!(" event:{}", event));
        } else {
            out.push_str(&format!(" event:{}", quote(event)));
        }
    }
    for (name, value) in &node.event_modifiers {
        out.push_str(&format!(" {}:{}", name, render_modifier(value)));
    }
    for (role, value) in &node.roles {
        out.push_str(&format!(" {}:{}", role, render_value(value)));
    }
    for child in &node.body {
        out.push_str(" body:");
        out.push_str(&render_explicit(child));
    }

    out.push(']');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SelectorKind;

    #[test]
    fn test_simple_command() {
        let node = parse_explicit("[toggle patient:.active destination:#box]").unwrap();
        assert_eq!(node.action, Action::Toggle);
        assert_eq!(node.role(Role::Patient), Some(&SemanticValue::selector(".active")));
        assert_eq!(node.role(Role::Destination), Some(&SemanticValue::selector("#box")));
    }

    #[test]
    fn test_value_typing() {
        let node = parse_explicit(
            r#"[put patient:"a \"quoted\" text" destination:[data-out] quantity:5 style:true manner:me method:(x + 1) source:/api/items duration:2s]"#,
        )
        .unwrap();
        assert_eq!(node.role(Role::Patient), Some(&SemanticValue::string("a \"quoted\" text")));
        assert!(matches!(
            node.role(Role::Destination),
            Some(SemanticValue::Selector { kind: SelectorKind::Attribute, .. })
        ));
        assert_eq!(node.role(Role::Quantity), Some(&SemanticValue::number(5.0)));
        assert_eq!(node.role(Role::Style), Some(&SemanticValue::boolean(true)));
        assert_eq!(node.role(Role::Manner), Some(&SemanticValue::reference("me")));
        assert_eq!(node.role(Role::Method), Some(&SemanticValue::expression("x + 1")));
        assert_eq!(node.role(Role::Source), Some(&SemanticValue::string("/api/items")));
        assert_eq!(node.role(Role::Duration), Some(&SemanticValue::string("2s")));
    }

    #[test]
    fn test_variable_after_colon() {
        let node = parse_explicit("[increment patient::count quantity: 2]").unwrap();
        assert_eq!(node.role(Role::Patient), Some(&SemanticValue::reference(":count")));
        assert_eq!(node.role(Role::Quantity), Some(&SemanticValue::number(2.0)));
    }

    #[test]
    fn test_event_handler() {
        let node = parse_explicit("[on event:click once:true body:[toggle patient:.x] body:[log patient:\"hi\"]]").unwrap();
        assert!(node.is_event_handler());
        assert_eq!(node.event.as_deref(), Some("click"));
        assert_eq!(node.event_modifiers["once"], serde_json::Value::Bool(true));
        assert_eq!(node.body.len(), 2);
        assert_eq!(node.body[1].action, Action::Log);
    }

    #[test]
    fn test_command_event_lifts_to_handler() {
        let node = parse_explicit("[toggle patient:.x event:click]").unwrap();
        assert!(node.is_event_handler());
        assert!(node.body[0].role(Role::Event).is_none());
    }

    #[test]
    fn test_unknown_command_accepted() {
        let node = parse_explicit("[frobnicate patient:#a]").unwrap();
        assert!(!node.action.is_known());
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_explicit("[toggle patient:.x"), Err(ExplicitSyntaxError::UnexpectedEnd));
        assert_eq!(
            parse_explicit("[toggle colour:red]"),
            Err(ExplicitSyntaxError::UnknownRole("colour".to_string()))
        );
        assert_eq!(
            parse_explicit("[toggle patient:.a patient:.b]"),
            Err(ExplicitSyntaxError::DuplicateRole("patient".to_string()))
        );
        assert_eq!(parse_explicit("[on body:[toggle patient:.x]]"), Err(ExplicitSyntaxError::MissingEvent));
        assert!(matches!(
            parse_explicit("[toggle patient:.x] extra"),
            Err(ExplicitSyntaxError::TrailingInput { position: 20 })
        ));
        assert!(matches!(
            parse_explicit("toggle patient:.x"),
            Err(ExplicitSyntaxError::Expected { position: 0, .. })
        ));
        assert!(matches!(
            parse_explicit("[toggle .x]"),
            Err(ExplicitSyntaxError::Expected { expected: "role:value", .. })
        ));
    }

    #[test]
    fn test_selector_forms() {
        let node = parse_explicit("[toggle patient:#form[disabled] destination:input[type=checkbox]]").unwrap();
        assert_eq!(node.role(Role::Patient), Some(&SemanticValue::selector("#form[disabled]")));
        assert_eq!(node.role(Role::Destination), Some(&SemanticValue::selector("input[type=checkbox]")));

        let node = parse_explicit("[hide patient:sel(#list li:nth-child(2)) destination: sel(button)]").unwrap();
        assert_eq!(node.role(Role::Patient), Some(&SemanticValue::selector("#list li:nth-child(2)")));
        assert_eq!(node.role(Role::Destination), Some(&SemanticValue::selector("button")));

        // Detached parentheses stay an expression on the next key
        assert!(parse_explicit("[call patient:sel (x)]").is_err());
    }

    #[test]
    fn test_selectors_survive_render() {
        for selector in ["#a .b", "#form[disabled]", "input[type=checkbox]", "button", "[data-x]", "li:nth-child(2)", "#a[x"] {
            let node = SemanticNode::command(Action::Toggle).with_role(Role::Patient, SemanticValue::selector(selector));
            let rendered = render_explicit(&node);
            assert_eq!(parse_explicit(&rendered).unwrap(), node, "{}", rendered);
        }
        let node = SemanticNode::command(Action::Toggle).with_role(Role::Patient, SemanticValue::selector("#a .b"));
        assert_eq!(render_explicit(&node), "[toggle patient:sel(#a .b)]");
    }

    #[test]
    fn test_child_without_roles() {
        let node = parse_explicit("[on event:click body:[blur] body:[toggle patient:.x]]").unwrap();
        assert_eq!(node.body.len(), 2);
        assert_eq!(parse_explicit(&render_explicit(&node)).unwrap(), node);
    }

    #[test]
    fn test_render_round_trip() {
        for input in [
            "[toggle destination:#box patient:.active]",
            "[put destination:#out patient:\"hello world\"]",
            "[on event:click once:true body:[increment patient::count quantity:2]]",
            "[call patient:(alert(1))]",
        ] {
            let node = parse_explicit(input).unwrap();
            assert_eq!(parse_explicit(&render_explicit(&node)).unwrap(), node, "{}", input);
        }
        assert_eq!(
            render_explicit(&parse_explicit("[toggle patient:.active destination:#box]").unwrap()),
            "[toggle destination:#box patient:.active]"
        );
    }
}
