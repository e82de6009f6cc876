//! Pre-compiled regex patterns for finding hyperscript in templates
//!
//! Used by the usage scanner. Each pattern captures the script text in
//! group 1.

use once_cell::sync::Lazy;
use regex::Regex;

/// Patterns for locating and analyzing embedded hyperscript
pub struct ScriptPatterns;

impl ScriptPatterns {
    /// Every pattern that extracts a script body from template text
    pub fn embedded() -> &'static [Regex] {
        static PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
            [
                // _="..." / _='...' / _=`...`
                r#"_="([^"]*)""#,
                r"_='([^']*)'",
                r"_=`([^`]*)`",
                // JSX: _={`...`} / _={"..."}
                r"_=\{`([^`]+)`\}",
                r#"_=\{['"]([^'"]+)['"]\}"#,
                // data-hs="..."
                r#"data-hs="([^"]*)""#,
                r"data-hs='([^']*)'",
                // {% hs %}...{% endhs %}
                r"(?s)\{%\s*hs\s*%\}(.*?)\{%\s*endhs\s*%\}",
                r#"\{%\s*hs_attr\s+"([^"]+)"\s*%\}"#,
                r"\{%\s*hs_attr\s+'([^']+)'\s*%\}",
                r#"\{%\s*hs_script\s+"([^"]+)"\s*%\}"#,
                r"\{%\s*hs_script\s+'([^']+)'\s*%\}",
                // <script type="text/hyperscript">
                r#"(?is)<script[^>]*type=["']?text/hyperscript["']?[^>]*>(.*?)</script>"#,
            ]
            .iter()
            .map(|p| Regex::new(p).expect("Valid embedded hyperscript regex"))
            .collect()
        });
        &PATTERNS
    }

    /// Command words that a bundle can tree-shake
    pub fn command() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(
                r"(?i)\b(toggle|add|remove|removeClass|show|hide|set|get|put|append|take|increment|decrement|log|send|trigger|wait|transition|go|call|focus|blur|return)\b",
            )
            .expect("Valid command regex")
        });
        &PATTERN
    }

    /// Block constructs, keyed by the block they require
    ///
    /// `unless` shares the `if` implementation.
    pub fn blocks() -> &'static [(&'static str, Regex)] {
        static PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
            [
                ("if", r"(?i)\bif\b"),
                ("if", r"(?i)\bunless\b"),
                ("repeat", r"(?i)\brepeat\s+(\d+|:\w+|\$\w+|[\w.]+)\s+times?\b"),
                ("for", r"(?i)\bfor\s+(each|every)\b"),
                ("while", r"(?i)\bwhile\b"),
                ("fetch", r"(?i)\bfetch\b"),
                ("async", r"(?i)\basync\b"),
            ]
            .iter()
            .map(|(name, p)| (*name, Regex::new(p).expect("Valid block regex")))
            .collect()
        });
        &PATTERNS
    }

    /// Positional expressions (`first`, `closest`, ...)
    pub fn positional() -> &'static Regex {
        static PATTERN: Lazy<Regex> = Lazy::new(|| {
            Regex::new(r"(?i)\b(first|last|next|previous|closest|parent)\b")
                .expect("Valid positional regex")
        });
        &PATTERN
    }
}
