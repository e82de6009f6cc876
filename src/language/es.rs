//! Spanish

use super::{KeywordEntry, LanguageProfile, MarkerEntry, MarkerPlacement, TextDirection, WordOrder};
use crate::keywords::KeywordCategory::*;
use crate::morphology::{RuleNormalizer, SuffixRule};
use crate::utils::string::Script;

const KEYWORDS: &[KeywordEntry] = &[
    (Commands, "toggle", &["alternar", "conmutar"]),
    (Commands, "add", &["añadir", "agregar"]),
    (Commands, "remove", &["quitar", "eliminar"]),
    (Commands, "show", &["mostrar"]),
    (Commands, "hide", &["ocultar"]),
    (Commands, "set", &["establecer", "fijar"]),
    (Commands, "get", &["obtener"]),
    (Commands, "put", &["poner", "colocar"]),
    (Commands, "append", &["anexar"]),
    (Commands, "take", &["tomar"]),
    (Commands, "increment", &["incrementar", "aumentar"]),
    (Commands, "decrement", &["decrementar", "disminuir"]),
    (Commands, "log", &["registrar"]),
    (Commands, "send", &["enviar"]),
    (Commands, "trigger", &["disparar"]),
    (Commands, "wait", &["esperar"]),
    (Commands, "go", &["ir"]),
    (Commands, "call", &["llamar"]),
    (Commands, "focus", &["enfocar"]),
    (Commands, "blur", &["desenfocar"]),
    (Commands, "return", &["devolver"]),
    (Commands, "fetch", &["traer"]),
    // "en" doubles as the preposition "in"; the command reading wins
    (Commands, "on", &["en", "cuando"]),
    (Logical, "and", &["y"]),
    (Logical, "or", &["o"]),
    (Logical, "not", &["no"]),
    (Logical, "if", &["si"]),
    (Logical, "unless", &["salvo"]),
    (Logical, "else", &["sino"]),
    (Events, "click", &["clic"]),
    (Events, "input", &["entrada"]),
    (Events, "change", &["cambio"]),
    (Events, "submit", &["envío"]),
    (Events, "load", &["carga"]),
    (Events, "keydown", &["tecla"]),
    (Events, "focus", &["enfoque"]),
    (Values, "me", &["yo"]),
    (Values, "it", &["ello"]),
    (Values, "result", &["resultado"]),
    (Values, "true", &["verdadero"]),
    (Values, "false", &["falso"]),
    (Values, "null", &["nulo"]),
    (Temporal, "then", &["entonces"]),
    (Temporal, "after", &["después"]),
    (Temporal, "before", &["antes"]),
    (Temporal, "while", &["mientras"]),
    (Modifiers, "in", &["en"]),
    (Modifiers, "to", &["a"]),
    (Modifiers, "from", &["de", "desde"]),
    (Modifiers, "with", &["con"]),
    (Modifiers, "by", &["por"]),
    (Modifiers, "as", &["como"]),
    (Attributes, "class", &["clase"]),
    (Attributes, "attribute", &["atributo"]),
    (Attributes, "style", &["estilo"]),
];

const MARKERS: &[MarkerEntry] = &[
    ("to", &["a"]),
    ("from", &["de", "desde"]),
    ("into", &["en", "dentro"]),
    ("on", &["en", "sobre"]),
    ("by", &["por"]),
    ("as", &["como"]),
    ("with", &["con"]),
    ("for", &["durante"]),
];

/// Imperative and conjugated forms that suffix rules get wrong
const IRREGULAR: &[(&str, &str)] = &[
    ("pon", "poner"),
    ("ponga", "poner"),
    ("muestra", "mostrar"),
    ("muestre", "mostrar"),
    ("añade", "añadir"),
    ("agrega", "agregar"),
    ("quita", "quitar"),
    ("elimina", "eliminar"),
    ("establece", "establecer"),
    ("obtén", "obtener"),
    ("obten", "obtener"),
    ("anexa", "anexar"),
    ("disminuye", "disminuir"),
    ("envía", "enviar"),
    ("ve", "ir"),
    ("vaya", "ir"),
    ("devuelve", "devolver"),
    ("trae", "traer"),
];

fn normalizer() -> RuleNormalizer {
    RuleNormalizer::new("es", Script::Latin)
        .with_table(IRREGULAR)
        .with_rules(vec![
            SuffixRule::new("ando", "ar", 0.80, "gerund").with_min_stem(3),
            SuffixRule::new("iendo", "er", 0.75, "gerund").with_min_stem(3),
            SuffixRule::new("amos", "ar", 0.75, "first person plural").with_min_stem(3),
            SuffixRule::new("ad", "ar", 0.75, "plural imperative").with_min_stem(3),
            SuffixRule::new("ed", "er", 0.75, "plural imperative").with_min_stem(3),
            SuffixRule::new("a", "ar", 0.75, "imperative").with_min_stem(3),
            SuffixRule::new("e", "er", 0.70, "imperative").with_min_stem(3),
        ])
}

pub(super) fn profile() -> LanguageProfile {
    LanguageProfile {
        code: "es",
        name: "Español",
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
        normalizer: Some(normalizer),
    }
}
