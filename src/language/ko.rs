//! Korean

use super::{KeywordEntry, LanguageProfile, MarkerEntry, MarkerPlacement, TextDirection, WordOrder};
use crate::keywords::KeywordCategory::*;
use crate::morphology::{RuleNormalizer, SuffixRule};
use crate::utils::string::Script;

const KEYWORDS: &[KeywordEntry] = &[
    (Commands, "toggle", &["토글", "전환"]),
    (Commands, "add", &["추가"]),
    (Commands, "remove", &["제거", "삭제"]),
    (Commands, "show", &["표시", "보이기"]),
    (Commands, "hide", &["숨기기", "숨김"]),
    (Commands, "set", &["설정"]),
    (Commands, "get", &["가져오기"]),
    (Commands, "put", &["넣기"]),
    (Commands, "append", &["덧붙이기"]),
    (Commands, "take", &["가져가기"]),
    (Commands, "increment", &["증가"]),
    (Commands, "decrement", &["감소"]),
    (Commands, "log", &["로그"]),
    (Commands, "send", &["보내기"]),
    (Commands, "trigger", &["트리거"]),
    (Commands, "wait", &["대기"]),
    (Commands, "go", &["이동"]),
    (Commands, "call", &["호출"]),
    (Commands, "focus", &["포커스"]),
    (Commands, "blur", &["블러"]),
    (Commands, "return", &["반환"]),
    (Commands, "fetch", &["페치"]),
    (Logical, "and", &["그리고"]),
    (Logical, "or", &["또는"]),
    (Logical, "not", &["아님"]),
    (Logical, "if", &["만약"]),
    (Events, "click", &["클릭"]),
    (Events, "input", &["입력"]),
    (Events, "change", &["변경"]),
    (Events, "submit", &["제출"]),
    (Events, "load", &["로드"]),
    (Events, "keydown", &["키다운"]),
    (Values, "me", &["나"]),
    (Values, "it", &["그것"]),
    (Values, "result", &["결과"]),
    (Values, "true", &["참"]),
    (Values, "false", &["거짓"]),
    (Temporal, "then", &["그다음"]),
    (Temporal, "after", &["후"]),
    (Temporal, "before", &["전"]),
    (Modifiers, "in", &["안"]),
    (Attributes, "class", &["클래스"]),
    (Attributes, "attribute", &["속성"]),
    (Attributes, "style", &["스타일"]),
];

const MARKERS: &[MarkerEntry] = &[
    ("to", &["에", "에게", "로", "으로"]),
    ("from", &["에서"]),
    ("into", &["에"]),
    ("on", &["에서", "에"]),
    ("by", &["만큼"]),
    ("as", &["로서"]),
    ("with", &["와", "과"]),
    ("for", &["동안"]),
];

const IRREGULAR: &[(&str, &str)] = &[
    ("숨겨", "숨기기"),
    ("숨기세요", "숨기기"),
    ("보여", "보이기"),
    ("보여주세요", "보이기"),
    ("넣어", "넣기"),
    ("넣으세요", "넣기"),
    ("보내", "보내기"),
    ("보내세요", "보내기"),
    ("기다려", "대기"),
];

fn normalizer() -> RuleNormalizer {
    RuleNormalizer::new("ko", Script::Hangul)
        .with_table(IRREGULAR)
        .with_rules(vec![
            SuffixRule::new("하세요", "", 0.85, "polite imperative"),
            SuffixRule::new("합니다", "", 0.85, "formal"),
            SuffixRule::new("해요", "", 0.80, "polite"),
            SuffixRule::new("하다", "", 0.80, "dictionary form"),
            SuffixRule::new("하기", "", 0.75, "nominal"),
            SuffixRule::new("해", "", 0.75, "plain imperative"),
        ])
}

pub(super) fn profile() -> LanguageProfile {
    LanguageProfile {
        code: "ko",
        name: "한국어",
        word_order: WordOrder::Sov,
        direction: TextDirection::Ltr,
        marker_placement: MarkerPlacement::Post,
        case_sensitive: false,
        script: Script::Hangul,
        keywords: KEYWORDS,
        markers: MARKERS,
        object_markers: &["을", "를"],
        event_markers: &["시", "때"],
        particles: &[
            "을", "를", "이", "가", "은", "는", "에", "에서", "에게", "로", "으로", "만큼", "와", "과",
            "로서", "동안", "시", "때",
        ],
        apostrophe_suffixes: false,
        normalizer: Some(normalizer),
    }
}
