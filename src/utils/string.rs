//! String utilities for multilingual keyword lookup
//!
//! Keyword tables are keyed on *folded* text: Unicode-decomposed, combining
//! marks removed (Latin accents, Arabic harakat), recomposed and lowercased.
//! Input words go through the same fold before lookup, so `añadir`,
//! `anadir` and `AÑADIR` all hit the same entry.

use unicode_normalization::UnicodeNormalization;

/// Coarse script classes used for word splitting and normalizer gating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    /// Latin letters, ASCII digits, `_` and `-`
    Latin,
    /// Han, Hiragana, Katakana
    Cjk,
    Hangul,
    Arabic,
    Other,
}

/// Classify a character into a [`Script`]
pub fn script_of(c: char) -> Script {
    match c as u32 {
        0x0041..=0x005A | 0x0061..=0x007A | 0x0030..=0x0039 | 0x005F | 0x002D => Script::Latin,
        0x00C0..=0x024F | 0x1E00..=0x1EFF => Script::Latin,
        0x3040..=0x309F | 0x30A0..=0x30FF | 0x31F0..=0x31FF | 0x4E00..=0x9FFF | 0x3400..=0x4DBF
        | 0xFF66..=0xFF9F | 0x3005 => Script::Cjk,
        0xAC00..=0xD7AF | 0x1100..=0x11FF | 0x3130..=0x318F => Script::Hangul,
        0x0600..=0x06FF | 0x0750..=0x077F | 0xFB50..=0xFDFF | 0xFE70..=0xFEFF => Script::Arabic,
        _ => Script::Other,
    }
}

/// True if the word contains at least one character of `script`
pub fn contains_script(word: &str, script: Script) -> bool {
    word.chars().any(|c| script_of(c) == script)
}

/// Combining marks that carry no keyword identity
fn is_strippable_mark(c: char) -> bool {
    matches!(c as u32,
        0x0300..=0x036F   // Latin combining diacritics
        | 0x064B..=0x065F // Arabic harakat, shadda, sukun
        | 0x0670          // Arabic superscript alef
        | 0x0640          // Arabic tatweel
    )
}

/// Fold a word for keyword lookup
///
/// Decomposes, strips accents and harakat, recomposes (so Japanese voiced
/// kana survive intact), normalizes Arabic alef variants and lowercases.
pub fn fold_diacritics(word: &str) -> String {
    let stripped: String = word.nfd().filter(|c| !is_strippable_mark(*c)).collect();
    stripped
        .nfc()
        .map(|c| match c {
            'أ' | 'إ' | 'آ' | 'ٱ' => 'ا',
            'ى' => 'ي',
            other => other,
        })
        .flat_map(char::to_lowercase)
        .filter(|c| !is_strippable_mark(*c))
        .collect()
}

/// Safely truncate a string at a character boundary, adding ellipsis if truncated.
///
/// Used when quoting user input inside diagnostic messages.
pub fn truncate_at_char_boundary(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();

    if char_count <= max_chars {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}
