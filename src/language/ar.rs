//! Arabic
//!
//! Lexemes are folded before lookup: harakat and tatweel are stripped and
//! alef variants unified, so `بَدِّلْ`, `بدّل` and `بدل` are the same key.

use super::{KeywordEntry, LanguageProfile, MarkerEntry, MarkerPlacement, TextDirection, WordOrder};
use crate::keywords::KeywordCategory::*;
use crate::morphology::{RuleNormalizer, SuffixRule};
use crate::utils::string::Script;

const KEYWORDS: &[KeywordEntry] = &[
    (Commands, "toggle", &["بدّل", "بدل"]),
    (Commands, "add", &["أضف"]),
    (Commands, "remove", &["أزل", "احذف"]),
    (Commands, "show", &["أظهر", "اعرض"]),
    (Commands, "hide", &["أخف", "اخفِ"]),
    (Commands, "set", &["عيّن"]),
    (Commands, "get", &["احصل"]),
    (Commands, "put", &["ضع"]),
    (Commands, "append", &["ألحق"]),
    (Commands, "take", &["خذ"]),
    (Commands, "increment", &["زد"]),
    (Commands, "decrement", &["أنقص"]),
    (Commands, "log", &["سجّل"]),
    (Commands, "send", &["أرسل"]),
    (Commands, "trigger", &["أطلق"]),
    (Commands, "wait", &["انتظر"]),
    (Commands, "go", &["اذهب"]),
    (Commands, "call", &["استدع"]),
    (Commands, "focus", &["ركّز"]),
    (Commands, "blur", &["اطمس"]),
    (Commands, "return", &["أعد"]),
    (Commands, "fetch", &["اجلب"]),
    (Commands, "on", &["عند", "لدى"]),
    (Logical, "and", &["و"]),
    (Logical, "or", &["أو"]),
    (Logical, "not", &["ليس"]),
    (Logical, "if", &["إذا"]),
    (Events, "click", &["النقر", "نقر"]),
    (Events, "input", &["الإدخال"]),
    (Events, "change", &["التغيير"]),
    (Events, "submit", &["الإرسال"]),
    (Events, "load", &["التحميل"]),
    (Values, "me", &["أنا"]),
    (Values, "it", &["ذلك"]),
    (Values, "result", &["النتيجة"]),
    (Values, "true", &["صحيح"]),
    (Values, "false", &["خطأ"]),
    (Temporal, "then", &["ثم"]),
    (Temporal, "after", &["بعد"]),
    (Temporal, "before", &["قبل"]),
    (Modifiers, "in", &["في"]),
    (Modifiers, "to", &["إلى"]),
    (Modifiers, "from", &["من"]),
    (Modifiers, "with", &["مع"]),
    (Attributes, "class", &["الفئة"]),
    (Attributes, "attribute", &["السمة"]),
    (Attributes, "style", &["النمط"]),
];

const MARKERS: &[MarkerEntry] = &[
    ("to", &["إلى"]),
    ("into", &["في"]),
    ("from", &["من"]),
    ("on", &["على"]),
    ("by", &["بمقدار"]),
    ("as", &["كـ", "ك"]),
    ("with", &["مع"]),
    ("for", &["لمدة"]),
];

/// Present-tense and verbal-noun forms
const IRREGULAR: &[(&str, &str)] = &[
    ("يبدل", "بدل"),
    ("تبديل", "بدل"),
    ("يضيف", "أضف"),
    ("إضافة", "أضف"),
    ("يزيل", "أزل"),
    ("إزالة", "أزل"),
    ("يظهر", "أظهر"),
    ("إظهار", "أظهر"),
    ("يخفي", "أخف"),
    ("إخفاء", "أخف"),
    ("زيادة", "زد"),
    ("إنقاص", "أنقص"),
    ("ينتظر", "انتظر"),
];

fn normalizer() -> RuleNormalizer {
    RuleNormalizer::new("ar", Script::Arabic)
        .with_table(IRREGULAR)
        .with_rules(vec![
            SuffixRule::new("وا", "", 0.75, "plural imperative").with_min_stem(2),
            SuffixRule::new("ي", "", 0.70, "feminine imperative").with_min_stem(2),
        ])
}

pub(super) fn profile() -> LanguageProfile {
    LanguageProfile {
        code: "ar",
        name: "العربية",
        word_order: WordOrder::Vso,
        direction: TextDirection::Rtl,
        marker_placement: MarkerPlacement::Pre,
        case_sensitive: false,
        script: Script::Arabic,
        keywords: KEYWORDS,
        markers: MARKERS,
        object_markers: &[],
        event_markers: &[],
        particles: &[],
        apostrophe_suffixes: false,
        normalizer: Some(normalizer),
    }
}
