//! Parse, render and translate across every built-in language

mod common;

use common::shared_registry;
use hyperfixi_core::{
    parse, render, render_explicit, parse_explicit, Action, CompilerConfig, CompilerService, Role,
    SemanticNode, SemanticValue,
};

const LANGUAGES: [&str; 6] = ["en", "es", "ja", "ko", "tr", "ar"];

fn toggle_on_click() -> SemanticNode {
    SemanticNode::event_handler(
        "click",
        vec![SemanticNode::command(Action::Toggle).with_role(Role::Patient, SemanticValue::selector(".active"))],
    )
}

#[test]
fn test_render_then_parse_in_every_language() {
    let registry = shared_registry();
    let node = toggle_on_click();

    for lang in LANGUAGES {
        let text = render(&registry, &node, lang).unwrap();
        let outcome = parse(&registry, &text, lang);
        assert_eq!(outcome.node.as_ref(), Some(&node), "{}: {}", lang, text);
        assert!(outcome.confidence > 0.9, "{}: {}", lang, outcome.confidence);
    }
}

#[test]
fn test_translation_between_every_pair() {
    let service = CompilerService::with_registry(shared_registry(), CompilerConfig::default())
        .with_native_translator();
    let english = "on click toggle .active";

    for from in LANGUAGES {
        let source = service.translate(english, "en", from);
        assert!(source.ok, "en -> {}: {:?}", from, source.diagnostics);
        let source = source.code.unwrap();

        for to in LANGUAGES {
            let target = service.translate(&source, from, to);
            assert!(target.ok, "{} -> {}: {:?}", from, to, target.diagnostics);

            let back = service.translate(&target.code.unwrap(), to, "en");
            assert_eq!(back.code.as_deref(), Some(english), "{} -> {} -> en", from, to);
        }
    }
}

#[test]
fn test_english_commands_survive_round_trip() {
    let registry = shared_registry();
    for text in [
        "toggle .active",
        "add .active to #box",
        "remove .active from #box",
        "put \"hello\" into #out",
        "increment :count by 2",
        "set :flag to true",
        "log \"ready\"",
    ] {
        let node = parse(&registry, text, "en").node.unwrap();
        let rendered = render(&registry, &node, "en").unwrap();
        let reparsed = parse(&registry, &rendered, "en").node.unwrap();
        assert_eq!(reparsed, node, "{} -> {}", text, rendered);
    }
}

#[test]
fn test_explicit_syntax_round_trip() {
    for syntax in [
        "[toggle patient:.active]",
        "[put patient:\"hi there\" destination:#out]",
        "[increment patient::count quantity:5]",
        "[on event:click once:true body:[add patient:.active destination:#box]]",
    ] {
        let node = parse_explicit(syntax).unwrap();
        let rendered = render_explicit(&node);
        assert_eq!(parse_explicit(&rendered).unwrap(), node, "{} -> {}", syntax, rendered);
    }
}

#[test]
fn test_natural_and_explicit_nodes_match() {
    let registry = shared_registry();
    let natural = parse(&registry, "alternar .active", "es").node.unwrap();
    let explicit = parse_explicit("[toggle patient:.active]").unwrap();
    assert_eq!(natural, explicit);
}
