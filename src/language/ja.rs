//! Japanese

use super::{KeywordEntry, LanguageProfile, MarkerEntry, MarkerPlacement, TextDirection, WordOrder};
use crate::keywords::KeywordCategory::*;
use crate::morphology::{RuleNormalizer, SuffixRule};
use crate::utils::string::Script;

const KEYWORDS: &[KeywordEntry] = &[
    (Commands, "toggle", &["切り替え", "トグル"]),
    (Commands, "add", &["追加"]),
    (Commands, "remove", &["削除"]),
    (Commands, "show", &["表示"]),
    (Commands, "hide", &["隠す", "非表示"]),
    (Commands, "set", &["設定"]),
    (Commands, "get", &["取得"]),
    (Commands, "put", &["置く"]),
    (Commands, "append", &["末尾追加"]),
    (Commands, "take", &["取る"]),
    (Commands, "increment", &["増やす", "増加"]),
    (Commands, "decrement", &["減らす", "減少"]),
    (Commands, "log", &["ログ"]),
    // 送信 is also the submit event; the command reading wins
    (Commands, "send", &["送信"]),
    (Commands, "trigger", &["発火"]),
    (Commands, "wait", &["待つ", "待機"]),
    (Commands, "go", &["移動"]),
    (Commands, "call", &["呼び出し"]),
    (Commands, "focus", &["フォーカス"]),
    (Commands, "blur", &["ぼかす"]),
    (Commands, "return", &["返す"]),
    (Commands, "fetch", &["フェッチ"]),
    (Logical, "and", &["かつ"]),
    (Logical, "or", &["または"]),
    (Logical, "not", &["でない"]),
    (Logical, "if", &["もし"]),
    (Events, "click", &["クリック"]),
    (Events, "input", &["入力"]),
    (Events, "change", &["変更"]),
    (Events, "submit", &["送信"]),
    (Events, "load", &["読み込み"]),
    (Events, "keydown", &["キー押下"]),
    (Values, "me", &["自分"]),
    (Values, "it", &["それ"]),
    (Values, "result", &["結果"]),
    (Values, "true", &["真"]),
    (Values, "false", &["偽"]),
    (Temporal, "then", &["それから"]),
    (Temporal, "after", &["後"]),
    (Temporal, "before", &["前"]),
    (Modifiers, "in", &["中"]),
    (Attributes, "class", &["クラス"]),
    (Attributes, "attribute", &["属性"]),
    (Attributes, "style", &["スタイル"]),
];

const MARKERS: &[MarkerEntry] = &[
    ("to", &["に", "へ"]),
    ("from", &["から"]),
    ("into", &["に"]),
    ("on", &["で"]),
    ("by", &["ずつ", "だけ"]),
    ("as", &["として"]),
    ("with", &["と"]),
    ("for", &["の間"]),
];

const IRREGULAR: &[(&str, &str)] = &[
    ("切り替える", "切り替え"),
    ("切り替えて", "切り替え"),
    ("切り替えます", "切り替え"),
    ("隠して", "隠す"),
    ("隠します", "隠す"),
    ("増やして", "増やす"),
    ("増やします", "増やす"),
    ("減らして", "減らす"),
    ("減らします", "減らす"),
    ("待って", "待つ"),
    ("待ちます", "待つ"),
    ("置いて", "置く"),
    ("置きます", "置く"),
    ("取って", "取る"),
    ("返して", "返す"),
];

fn normalizer() -> RuleNormalizer {
    RuleNormalizer::new("ja", Script::Cjk)
        .with_table(IRREGULAR)
        .with_rules(vec![
            SuffixRule::new("してください", "", 0.85, "polite request"),
            SuffixRule::new("しなさい", "", 0.80, "command form"),
            SuffixRule::new("します", "", 0.85, "polite"),
            SuffixRule::new("する", "", 0.80, "dictionary form"),
            SuffixRule::new("して", "", 0.80, "te-form"),
            SuffixRule::new("した", "", 0.75, "past"),
        ])
}

pub(super) fn profile() -> LanguageProfile {
    LanguageProfile {
        code: "ja",
        name: "日本語",
        word_order: WordOrder::Sov,
        direction: TextDirection::Ltr,
        marker_placement: MarkerPlacement::Post,
        case_sensitive: false,
        script: Script::Cjk,
        keywords: KEYWORDS,
        markers: MARKERS,
        object_markers: &["を"],
        event_markers: &["で", "時"],
        particles: &["を", "に", "へ", "から", "で", "と", "まで", "が", "は", "として", "ずつ", "だけ", "時"],
        apostrophe_suffixes: false,
        normalizer: Some(normalizer),
    }
}
