//! English

use super::{KeywordEntry, LanguageProfile, MarkerEntry, MarkerPlacement, TextDirection, WordOrder};
use crate::keywords::KeywordCategory::*;
use crate::utils::string::Script;

const KEYWORDS: &[KeywordEntry] = &[
    (Commands, "toggle", &["toggle"]),
    (Commands, "add", &["add"]),
    (Commands, "remove", &["remove", "removeClass"]),
    (Commands, "show", &["show"]),
    (Commands, "hide", &["hide"]),
    (Commands, "set", &["set"]),
    (Commands, "get", &["get"]),
    (Commands, "put", &["put"]),
    (Commands, "append", &["append"]),
    (Commands, "take", &["take"]),
    (Commands, "increment", &["increment"]),
    (Commands, "decrement", &["decrement"]),
    (Commands, "log", &["log"]),
    (Commands, "send", &["send"]),
    (Commands, "trigger", &["trigger"]),
    (Commands, "wait", &["wait"]),
    (Commands, "go", &["go"]),
    (Commands, "call", &["call"]),
    (Commands, "focus", &["focus"]),
    (Commands, "blur", &["blur"]),
    (Commands, "return", &["return"]),
    (Commands, "fetch", &["fetch"]),
    (Commands, "on", &["on"]),
    (Logical, "and", &["and"]),
    (Logical, "or", &["or"]),
    (Logical, "not", &["not"]),
    (Logical, "if", &["if"]),
    (Logical, "unless", &["unless"]),
    (Logical, "else", &["else"]),
    (Events, "click", &["click"]),
    (Events, "dblclick", &["dblclick"]),
    (Events, "input", &["input"]),
    (Events, "change", &["change"]),
    (Events, "submit", &["submit"]),
    (Events, "load", &["load"]),
    (Events, "keydown", &["keydown"]),
    (Events, "keyup", &["keyup"]),
    (Events, "mouseover", &["mouseover"]),
    (Events, "mouseout", &["mouseout"]),
    (Events, "focus", &["focus"]),
    (Events, "blur", &["blur"]),
    (Values, "me", &["me"]),
    (Values, "it", &["it"]),
    (Values, "you", &["you"]),
    (Values, "result", &["result"]),
    (Values, "true", &["true"]),
    (Values, "false", &["false"]),
    (Values, "null", &["null"]),
    (Temporal, "then", &["then"]),
    (Temporal, "after", &["after"]),
    (Temporal, "before", &["before"]),
    (Temporal, "while", &["while"]),
    (Modifiers, "to", &["to"]),
    (Modifiers, "from", &["from"]),
    (Modifiers, "into", &["into"]),
    (Modifiers, "in", &["in"]),
    (Modifiers, "by", &["by"]),
    (Modifiers, "as", &["as"]),
    (Modifiers, "with", &["with"]),
    (Modifiers, "for", &["for"]),
    (Attributes, "class", &["class"]),
    (Attributes, "attribute", &["attribute"]),
    (Attributes, "style", &["style"]),
];

const MARKERS: &[MarkerEntry] = &[
    ("to", &["to"]),
    ("from", &["from"]),
    ("into", &["into"]),
    ("on", &["on"]),
    ("by", &["by"]),
    ("as", &["as"]),
    ("with", &["with"]),
    ("for", &["for"]),
];

pub(super) fn profile() -> LanguageProfile {
    LanguageProfile {
        code: "en",
        name: "English",
        word_order: WordOrder::Svo,
        direction: TextDirection::Ltr,
        marker_placement: MarkerPlacement::Pre,
        case_sensitive: false,
        script: Script::Latin,
        keywords: KEYWORDS,
        markers: MARKERS,
        object_markers: &[],
        event_markers: &[],
        particles: &[],
        apostrophe_suffixes: false,
        normalizer: None,
    }
}
