//! Token extractors
//!
//! Each extractor recognizes one lexical shape at a byte offset. The
//! tokenizer tries them in order and takes the first that produces an
//! [`Extraction`], so order matters: selectors before words, apostrophe
//! suffixes before quoted strings.

use crate::language::LanguageProfile;
use crate::utils::string::{script_of, Script};

/// Lexical shape of an extraction, before keyword classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawKind {
    Selector,
    String,
    Number,
    Variable,
    Expression,
    Particle,
    Word,
    Punctuation,
}

/// A recognized lexeme
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Token text with delimiters removed (quotes, parentheses, apostrophe)
    pub value: String,
    /// Bytes consumed from the input
    pub length: usize,
    pub kind: RawKind,
}

/// Recognizer for one lexical shape
pub trait Extractor: Send + Sync {
    fn name(&self) -> &'static str;

    /// Cheap check on the first character(s)
    fn can_extract(&self, input: &str, pos: usize) -> bool;

    /// Full recognition; `None` if the shape turns out malformed
    fn extract(&self, input: &str, pos: usize) -> Option<Extraction>;
}

/// Extractors for a language, in priority order
pub fn default_extractors(profile: &LanguageProfile) -> Vec<Box<dyn Extractor>> {
    let mut extractors: Vec<Box<dyn Extractor>> = vec![Box::new(SelectorExtractor)];
    if profile.apostrophe_suffixes {
        extractors.push(Box::new(ApostropheSuffixExtractor));
    }
    extractors.push(Box::new(StringExtractor));
    extractors.push(Box::new(NumberExtractor));
    extractors.push(Box::new(VariableExtractor));
    extractors.push(Box::new(ExpressionExtractor));
    extractors.push(Box::new(WordExtractor));
    extractors.push(Box::new(PunctuationExtractor));
    extractors
}

fn char_at(input: &str, pos: usize) -> Option<char> {
    input.get(pos..).and_then(|rest| rest.chars().next())
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '-' || c == '_'
}

/// Length in bytes of the name run starting at `pos`
fn name_len(input: &str, pos: usize) -> usize {
    input[pos..]
        .chars()
        .take_while(|c| is_name_char(*c))
        .map(char::len_utf8)
        .sum()
}

/// `#id`, `.class`, `[attr=value]`, `<tag/>` and compounds like `.a.b` or `#form[disabled]`
pub struct SelectorExtractor;

impl SelectorExtractor {
    /// One simple selector part at `pos`, returning its byte length
    fn part_len(input: &str, pos: usize) -> Option<usize> {
        let first = char_at(input, pos)?;
        match first {
            '#' | '.' => {
                let next = char_at(input, pos + 1)?;
                if !is_name_start(next) {
                    return None;
                }
                Some(1 + name_len(input, pos + 1))
            }
            '[' => {
                let close = input[pos..].find(']')?;
                let inner = &input[pos + 1..pos + close];
                if inner.is_empty() || inner.contains('[') || inner.contains(char::is_whitespace) {
                    return None;
                }
                Some(close + 1)
            }
            _ => None,
        }
    }

    fn tag_len(input: &str, pos: usize) -> Option<usize> {
        let rest = &input[pos..];
        let next = rest.chars().nth(1)?;
        if !next.is_ascii_alphabetic() {
            return None;
        }
        let close = rest.find("/>")?;
        let inner = &rest[1..close];
        if inner.contains('<') || inner.contains('>') {
            return None;
        }
        Some(close + 2)
    }
}

impl Extractor for SelectorExtractor {
    fn name(&self) -> &'static str {
        "selector"
    }

    fn can_extract(&self, input: &str, pos: usize) -> bool {
        matches!(char_at(input, pos), Some('#' | '.' | '[' | '<'))
    }

    fn extract(&self, input: &str, pos: usize) -> Option<Extraction> {
        let mut end = if char_at(input, pos) == Some('<') {
            pos + Self::tag_len(input, pos)?
        } else {
            pos + Self::part_len(input, pos)?
        };

        // Compound selectors: parts written back to back
        while let Some(len) = Self::part_len(input, end) {
            end += len;
        }

        Some(Extraction {
            value: input[pos..end].to_string(),
            length: end - pos,
            kind: RawKind::Selector,
        })
    }
}

/// Quoted strings: `"..."`, `'...'`, `` `...` `` with backslash escapes
pub struct StringExtractor;

impl Extractor for StringExtractor {
    fn name(&self) -> &'static str {
        "string"
    }

    fn can_extract(&self, input: &str, pos: usize) -> bool {
        matches!(char_at(input, pos), Some('"' | '\'' | '`'))
    }

    fn extract(&self, input: &str, pos: usize) -> Option<Extraction> {
        let quote = char_at(input, pos)?;
        let mut value = String::new();
        let mut escaped = false;

        for (offset, c) in input[pos + 1..].char_indices() {
            if escaped {
                value.push(c);
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == quote {
                return Some(Extraction {
                    value,
                    length: 1 + offset + c.len_utf8(),
                    kind: RawKind::String,
                });
            } else {
                value.push(c);
            }
        }

        None
    }
}

/// Time units a number may carry; a unit turns the number into a string literal
const UNITS: [&str; 6] = ["ms", "s", "m", "h", "秒", "초"];

/// ASCII value of a decimal digit, including Arabic-Indic and Persian digits
fn decimal_digit(c: char) -> Option<char> {
    let offset = match c as u32 {
        0x30..=0x39 => return Some(c),
        d @ 0x0660..=0x0669 => d - 0x0660,
        d @ 0x06F0..=0x06F9 => d - 0x06F0,
        _ => return None,
    };
    char::from_digit(offset, 10)
}

/// Integers and decimals, optionally signed, optionally with a time unit
///
/// Arabic-Indic digits and the Arabic decimal separator are read as their
/// ASCII counterparts.
pub struct NumberExtractor;

impl Extractor for NumberExtractor {
    fn name(&self) -> &'static str {
        "number"
    }

    fn can_extract(&self, input: &str, pos: usize) -> bool {
        match char_at(input, pos) {
            Some('-') => char_at(input, pos + 1).is_some_and(|c| decimal_digit(c).is_some()),
            Some(c) => decimal_digit(c).is_some(),
            None => false,
        }
    }

    fn extract(&self, input: &str, pos: usize) -> Option<Extraction> {
        let mut number = String::new();
        let mut end = pos;
        let mut chars = input[pos..].chars().peekable();
        if chars.peek() == Some(&'-') {
            number.push('-');
            end += 1;
            chars.next();
        }
        let mut seen_point = false;
        while let Some(&c) = chars.peek() {
            if let Some(digit) = decimal_digit(c) {
                number.push(digit);
            } else if matches!(c, '.' | '٫') && !seen_point {
                // A point only belongs to the number when a digit follows
                let after = input[end + c.len_utf8()..].chars().next();
                if !after.is_some_and(|d| decimal_digit(d).is_some()) {
                    break;
                }
                seen_point = true;
                number.push('.');
            } else {
                break;
            }
            end += c.len_utf8();
            chars.next();
        }

        let rest = &input[end..];
        let unit = UNITS
            .iter()
            .filter(|unit| rest.starts_with(**unit))
            .filter(|unit| {
                // `5min` is not `5m` followed by `in`
                rest[unit.len()..]
                    .chars()
                    .next()
                    .map_or(true, |c| !c.is_alphanumeric())
            })
            .max_by_key(|unit| unit.len());

        match unit {
            Some(unit) => Some(Extraction {
                value: format!("{}{}", number, unit),
                length: end - pos + unit.len(),
                kind: RawKind::String,
            }),
            None => {
                // A number glued to letters is not a number
                if rest.chars().next().is_some_and(|c| c.is_alphabetic()) {
                    return None;
                }
                Some(Extraction {
                    value: number,
                    length: end - pos,
                    kind: RawKind::Number,
                })
            }
        }
    }
}

/// `:local` and `$global` variables
pub struct VariableExtractor;

impl Extractor for VariableExtractor {
    fn name(&self) -> &'static str {
        "variable"
    }

    fn can_extract(&self, input: &str, pos: usize) -> bool {
        matches!(char_at(input, pos), Some(':' | '$'))
            && char_at(input, pos + 1).is_some_and(is_name_start)
    }

    fn extract(&self, input: &str, pos: usize) -> Option<Extraction> {
        let length = 1 + name_len(input, pos + 1);
        Some(Extraction {
            value: input[pos..pos + length].to_string(),
            length,
            kind: RawKind::Variable,
        })
    }
}

/// Balanced parenthesized expression, passed through as opaque text
pub struct ExpressionExtractor;

impl Extractor for ExpressionExtractor {
    fn name(&self) -> &'static str {
        "expression"
    }

    fn can_extract(&self, input: &str, pos: usize) -> bool {
        char_at(input, pos) == Some('(')
    }

    fn extract(&self, input: &str, pos: usize) -> Option<Extraction> {
        let mut depth = 0usize;
        for (offset, c) in input[pos..].char_indices() {
            match c {
                '(' => depth += 1,
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        let end = pos + offset + 1;
                        return Some(Extraction {
                            value: input[pos + 1..end - 1].trim().to_string(),
                            length: end - pos,
                            kind: RawKind::Expression,
                        });
                    }
                }
                _ => {}
            }
        }
        None
    }
}

/// Turkish case suffix after an apostrophe: `#kutu'ya` yields `ya`
pub struct ApostropheSuffixExtractor;

impl Extractor for ApostropheSuffixExtractor {
    fn name(&self) -> &'static str {
        "apostrophe-suffix"
    }

    fn can_extract(&self, input: &str, pos: usize) -> bool {
        let glued = input[..pos]
            .chars()
            .next_back()
            .is_some_and(|c| !c.is_whitespace());
        matches!(char_at(input, pos), Some('\'' | '’'))
            && glued
            && char_at(input, pos + 1).is_some_and(char::is_alphabetic)
    }

    fn extract(&self, input: &str, pos: usize) -> Option<Extraction> {
        let apostrophe = char_at(input, pos)?.len_utf8();
        let letters: usize = input[pos + apostrophe..]
            .chars()
            .take_while(|c| c.is_alphabetic())
            .map(char::len_utf8)
            .sum();
        if letters == 0 {
            return None;
        }
        Some(Extraction {
            value: input[pos + apostrophe..pos + apostrophe + letters].to_string(),
            length: apostrophe + letters,
            kind: RawKind::Particle,
        })
    }
}

/// A run of letters in one script
///
/// Stops at a script change, so `counterを` yields `counter` and then `を`.
/// Digits after a letter stay in the word (`item2`, `항목2`) except in CJK
/// text, where a digit starts a counter.
pub struct WordExtractor;

impl Extractor for WordExtractor {
    fn name(&self) -> &'static str {
        "word"
    }

    fn can_extract(&self, input: &str, pos: usize) -> bool {
        char_at(input, pos).is_some_and(|c| c.is_alphabetic() || c == '_')
    }

    fn extract(&self, input: &str, pos: usize) -> Option<Extraction> {
        let first = char_at(input, pos)?;
        let script = script_of(first);
        if script == Script::Other && !first.is_alphabetic() {
            return None;
        }

        let length: usize = input[pos..]
            .chars()
            .take_while(|c| {
                let s = script_of(*c);
                (s == script && !is_arabic_punctuation(*c))
                    || (script == Script::Arabic && is_arabic_mark(*c))
                    || (script != Script::Cjk && c.is_ascii_digit())
            })
            .map(char::len_utf8)
            .sum();
        if length == 0 {
            return None;
        }

        Some(Extraction {
            value: input[pos..pos + length].to_string(),
            length,
            kind: RawKind::Word,
        })
    }
}

fn is_arabic_mark(c: char) -> bool {
    matches!(c as u32, 0x064B..=0x065F | 0x0670 | 0x0640)
}

fn is_arabic_punctuation(c: char) -> bool {
    matches!(c, '،' | '؛' | '؟')
}

/// Single punctuation characters; quotes are excluded so an unterminated
/// string is a tokenize error rather than a stray token
pub struct PunctuationExtractor;

impl Extractor for PunctuationExtractor {
    fn name(&self) -> &'static str {
        "punctuation"
    }

    fn can_extract(&self, input: &str, pos: usize) -> bool {
        char_at(input, pos).is_some_and(|c| {
            (c.is_ascii_punctuation() && !matches!(c, '"' | '\'' | '`')) || matches!(c, '、' | '。' | '،' | '؛' | '¿' | '¡' | '؟')
        })
    }

    fn extract(&self, input: &str, pos: usize) -> Option<Extraction> {
        let c = char_at(input, pos)?;
        Some(Extraction {
            value: c.to_string(),
            length: c.len_utf8(),
            kind: RawKind::Punctuation,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_with(extractor: &dyn Extractor, input: &str) -> Option<Extraction> {
        if extractor.can_extract(input, 0) {
            extractor.extract(input, 0)
        } else {
            None
        }
    }

    #[test]
    fn test_selector_shapes() {
        let ex = SelectorExtractor;
        assert_eq!(extract_with(&ex, "#button rest").unwrap().value, "#button");
        assert_eq!(extract_with(&ex, ".active").unwrap().value, ".active");
        assert_eq!(extract_with(&ex, ".a.b").unwrap().value, ".a.b");
        assert_eq!(extract_with(&ex, "[disabled]").unwrap().value, "[disabled]");
        assert_eq!(extract_with(&ex, "<button/>").unwrap().value, "<button/>");
        assert_eq!(extract_with(&ex, ".5"), None);
    }

    #[test]
    fn test_selector_stops_at_apostrophe_and_cjk() {
        let ex = SelectorExtractor;
        assert_eq!(extract_with(&ex, "#kutu'ya").unwrap().value, "#kutu");
        assert_eq!(extract_with(&ex, ".activeを").unwrap().value, ".active");
    }

    #[test]
    fn test_string_escapes() {
        let ex = StringExtractor;
        let extraction = extract_with(&ex, r#""say \"hi\"" rest"#).unwrap();
        assert_eq!(extraction.value, r#"say "hi""#);
        assert_eq!(extraction.length, 12);
        assert_eq!(extract_with(&ex, "\"unterminated"), None);
    }

    #[test]
    fn test_number_units() {
        let ex = NumberExtractor;
        let plain = extract_with(&ex, "42").unwrap();
        assert_eq!((plain.value.as_str(), plain.kind), ("42", RawKind::Number));

        let timed = extract_with(&ex, "500ms").unwrap();
        assert_eq!((timed.value.as_str(), timed.kind), ("500ms", RawKind::String));

        let seconds = extract_with(&ex, "2秒").unwrap();
        assert_eq!(seconds.value, "2秒");
        assert_eq!(seconds.length, "2秒".len());

        assert_eq!(extract_with(&ex, "-1.5").unwrap().value, "-1.5");
        assert_eq!(extract_with(&ex, "5min"), None);
        assert_eq!(extract_with(&ex, "3. then").unwrap().value, "3");
    }

    #[test]
    fn test_arabic_indic_digits() {
        let ex = NumberExtractor;
        let input = "٣٠ ثانية";
        let extraction = extract_with(&ex, input).unwrap();
        assert_eq!((extraction.value.as_str(), extraction.kind), ("30", RawKind::Number));
        assert_eq!(extraction.length, "٣٠".len());

        assert_eq!(extract_with(&ex, "١٫٥").unwrap().value, "1.5");
        assert_eq!(extract_with(&ex, "۴۲").unwrap().value, "42");
    }

    #[test]
    fn test_inverted_marks_are_punctuation() {
        let ex = PunctuationExtractor;
        for mark in ["¿", "¡", "؟"] {
            let extraction = extract_with(&ex, mark).unwrap();
            assert_eq!(extraction.kind, RawKind::Punctuation);
            assert_eq!(extraction.length, mark.len());
        }
    }

    #[test]
    fn test_word_keeps_trailing_digits() {
        let ex = WordExtractor;
        assert_eq!(extract_with(&ex, "item2 rest").unwrap().value, "item2");
        assert_eq!(extract_with(&ex, "항목2를").unwrap().value, "항목2를");
        assert_eq!(extract_with(&ex, "カウンター3").unwrap().value, "カウンター");
        assert_eq!(extract_with(&ex, "بدّل؟").unwrap().value, "بدّل");
    }

    #[test]
    fn test_expression_balanced() {
        let ex = ExpressionExtractor;
        let extraction = extract_with(&ex, "(a + (b * 2)) then").unwrap();
        assert_eq!(extraction.value, "a + (b * 2)");
        assert_eq!(extraction.length, 13);
        assert_eq!(extract_with(&ex, "(open"), None);
    }

    #[test]
    fn test_apostrophe_suffix_needs_glued_word() {
        let ex = ApostropheSuffixExtractor;
        let input = "#kutu'ya";
        assert!(ex.can_extract(input, 5));
        assert_eq!(ex.extract(input, 5).unwrap().value, "ya");

        let spaced = "koy 'merhaba'";
        assert!(!ex.can_extract(spaced, 4));
    }

    #[test]
    fn test_word_splits_on_script_boundary() {
        let ex = WordExtractor;
        assert_eq!(extract_with(&ex, "counterを").unwrap().value, "counter");
        assert_eq!(extract_with(&ex, "カウンターを 増やす").unwrap().value, "カウンターを");
        assert_eq!(extract_with(&ex, "بَدِّلْ .x").unwrap().value, "بَدِّلْ");
    }
}
