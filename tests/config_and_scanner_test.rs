//! File-backed configuration and template scanning

mod common;

use hyperfixi_core::{
    scanner::AggregatedUsage, CompileRequest, CompilerConfig, CompilerService, ConfigError,
    DiagnosticCode, HyperfixiError, UsageScanner,
};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_file_drives_service() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("hyperfixi.toml");
    fs::write(
        &path,
        r#"
        confidence_threshold = 0.5
        cache_max_size = 2
        default_language = "es"
        languages = ["es", "en"]

        [compile]
        target = "iife"
        "#,
    )
    .unwrap();

    let config = CompilerConfig::from_file(&path).unwrap();
    assert_eq!(config.compile.target.as_deref(), Some("iife"));

    let service = CompilerService::new(config)
        .unwrap()
        .with_generator(common::echo_generator());

    // No language on the request: the configured default applies
    let request = CompileRequest {
        code: Some("alternar .active".to_string()),
        ..Default::default()
    };
    assert!(service.compile(&request).ok);

    let japanese = service.compile(&CompileRequest::natural(".active を 切り替え", "ja"));
    assert_eq!(japanese.diagnostics[0].code, DiagnosticCode::UnsupportedLanguage);

    for code in ["toggle .a", "toggle .b", "toggle .c"] {
        service.compile(&CompileRequest::natural(code, "en"));
    }
    assert_eq!(service.cache_stats().size, 2);
}

#[test]
fn test_invalid_config_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bad.toml");
    fs::write(&path, "cache_max_size = 0\n").unwrap();
    assert!(matches!(
        CompilerConfig::from_file(&path),
        Err(ConfigError::ValidationError(_))
    ));

    assert!(matches!(
        CompilerConfig::from_file(&temp_dir.path().join("missing.toml")),
        Err(ConfigError::IoError(_))
    ));

    let config = CompilerConfig {
        languages: vec!["en".to_string(), "xx".to_string()],
        ..Default::default()
    };
    assert!(matches!(CompilerService::new(config), Err(HyperfixiError::Config(_))));
}

#[test]
fn test_scan_template_tree() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("templates/partials")).unwrap();
    fs::create_dir_all(root.join("node_modules/pkg")).unwrap();

    fs::write(
        root.join("templates/base.html"),
        r#"<body _="on load wait 1s then hide #splash"><div data-hs="on click toggle .dark"></div></body>"#,
    )
    .unwrap();
    fs::write(
        root.join("templates/partials/list.jinja2"),
        "{% hs %}on click for each item in items log item{% endhs %}",
    )
    .unwrap();
    fs::write(
        root.join("templates/partials/page.htm"),
        "<script type=\"text/hyperscript\">def go() put 'x' into the next <p/> end</script>",
    )
    .unwrap();
    fs::write(root.join("node_modules/pkg/index.html"), r#"<a _="on click fetch /x">x</a>"#).unwrap();

    let files = UsageScanner::new().scan_directories(&[root.join("templates"), root.join("node_modules")]).unwrap();
    assert_eq!(files.len(), 3);

    let total = AggregatedUsage::from_files(&files);
    for command in ["wait", "hide", "toggle", "log", "go", "put"] {
        assert!(total.usage.commands.contains(command), "{}", command);
    }
    assert!(total.usage.blocks.contains("for"));
    assert!(!total.usage.blocks.contains("fetch"));
    assert!(total.usage.positional);

    let json = serde_json::to_value(&total).unwrap();
    assert_eq!(json["fileCount"], 3);
    assert_eq!(json["positional"], true);
}
