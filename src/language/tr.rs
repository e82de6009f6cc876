//! Turkish
//!
//! Case suffixes on selectors and variables are written after an apostrophe
//! (`#kutu'ya`, `sayaç'ı`); the tokenizer splits them into particle tokens.

use super::{KeywordEntry, LanguageProfile, MarkerEntry, MarkerPlacement, TextDirection, WordOrder};
use crate::keywords::KeywordCategory::*;
use crate::morphology::{RuleNormalizer, SuffixRule};
use crate::utils::string::Script;

const KEYWORDS: &[KeywordEntry] = &[
    (Commands, "toggle", &["değiştir"]),
    (Commands, "add", &["ekle"]),
    (Commands, "remove", &["kaldır"]),
    (Commands, "show", &["göster"]),
    (Commands, "hide", &["gizle"]),
    (Commands, "set", &["ayarla"]),
    (Commands, "get", &["al"]),
    (Commands, "put", &["koy"]),
    (Commands, "append", &["iliştir"]),
    (Commands, "take", &["çek"]),
    (Commands, "increment", &["artır", "arttır"]),
    (Commands, "decrement", &["azalt"]),
    (Commands, "log", &["yazdır"]),
    (Commands, "send", &["gönder"]),
    (Commands, "trigger", &["tetikle"]),
    (Commands, "wait", &["bekle"]),
    (Commands, "go", &["git"]),
    (Commands, "call", &["çağır"]),
    (Commands, "focus", &["odakla"]),
    (Commands, "blur", &["bulanıklaştır"]),
    (Commands, "return", &["döndür"]),
    (Commands, "fetch", &["getir"]),
    (Logical, "and", &["ve"]),
    (Logical, "or", &["veya"]),
    (Logical, "not", &["değil"]),
    (Logical, "if", &["eğer"]),
    (Events, "click", &["tıklama", "tık"]),
    (Events, "input", &["giriş"]),
    (Events, "change", &["değişim"]),
    (Events, "submit", &["gönderim"]),
    (Events, "load", &["yükleme"]),
    (Values, "me", &["ben"]),
    (Values, "it", &["o"]),
    (Values, "result", &["sonuç"]),
    (Values, "true", &["doğru"]),
    (Values, "false", &["yanlış"]),
    (Temporal, "then", &["sonra"]),
    (Temporal, "before", &["önce"]),
    (Modifiers, "with", &["ile"]),
    (Modifiers, "as", &["olarak"]),
    (Attributes, "class", &["sınıf"]),
    (Attributes, "attribute", &["öznitelik"]),
    (Attributes, "style", &["stil"]),
];

const MARKERS: &[MarkerEntry] = &[
    ("to", &["a", "e", "ya", "ye"]),
    ("into", &["a", "e", "ya", "ye"]),
    ("from", &["dan", "den", "tan", "ten"]),
    ("on", &["da", "de", "ta", "te"]),
    ("by", &["kadar"]),
    ("as", &["olarak"]),
    ("with", &["ile"]),
    ("for", &["boyunca"]),
];

/// Vowel-dropping progressives (`ekle` + `iyor` is `ekliyor`)
const IRREGULAR: &[(&str, &str)] = &[
    ("ekliyor", "ekle"),
    ("gizliyor", "gizle"),
    ("bekliyor", "bekle"),
    ("ayarlıyor", "ayarla"),
    ("odaklıyor", "odakla"),
    ("tetikliyor", "tetikle"),
    ("gidiyor", "git"),
    ("gidin", "git"),
];

fn normalizer() -> RuleNormalizer {
    RuleNormalizer::new("tr", Script::Latin)
        .with_table(IRREGULAR)
        .with_rules(vec![
            SuffixRule::new("ıyor", "", 0.85, "progressive").with_min_stem(2),
            SuffixRule::new("iyor", "", 0.85, "progressive").with_min_stem(2),
            SuffixRule::new("uyor", "", 0.85, "progressive").with_min_stem(2),
            SuffixRule::new("üyor", "", 0.85, "progressive").with_min_stem(2),
            SuffixRule::new("ınız", "", 0.80, "plural imperative").with_min_stem(2),
            SuffixRule::new("iniz", "", 0.80, "plural imperative").with_min_stem(2),
            SuffixRule::new("mak", "", 0.80, "infinitive").with_min_stem(2),
            SuffixRule::new("mek", "", 0.80, "infinitive").with_min_stem(2),
            SuffixRule::new("yın", "", 0.80, "polite imperative").with_min_stem(2),
            SuffixRule::new("yin", "", 0.80, "polite imperative").with_min_stem(2),
            SuffixRule::new("ın", "", 0.75, "polite imperative").with_min_stem(3),
            SuffixRule::new("in", "", 0.75, "polite imperative").with_min_stem(3),
            SuffixRule::new("dı", "", 0.75, "past").with_min_stem(3),
            SuffixRule::new("di", "", 0.75, "past").with_min_stem(3),
            SuffixRule::new("tı", "", 0.75, "past").with_min_stem(3),
            SuffixRule::new("ti", "", 0.75, "past").with_min_stem(3),
            SuffixRule::new("ır", "", 0.70, "aorist").with_min_stem(3),
            SuffixRule::new("ir", "", 0.70, "aorist").with_min_stem(3),
            SuffixRule::new("ar", "", 0.70, "aorist").with_min_stem(3),
            SuffixRule::new("er", "", 0.70, "aorist").with_min_stem(3),
        ])
}

pub(super) fn profile() -> LanguageProfile {
    LanguageProfile {
        code: "tr",
        name: "Türkçe",
        word_order: WordOrder::Sov,
        direction: TextDirection::Ltr,
        marker_placement: MarkerPlacement::Post,
        case_sensitive: false,
        script: Script::Latin,
        keywords: KEYWORDS,
        markers: MARKERS,
        object_markers: &["ı", "i", "u", "ü", "yı", "yi", "yu", "yü", "nı", "ni"],
        event_markers: &["üzerine", "olunca"],
        particles: &[],
        apostrophe_suffixes: true,
        normalizer: Some(normalizer),
    }
}
