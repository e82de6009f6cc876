//! HyperFixi - command-line harness for the multilingual compiler core
//!
//! Parses, translates and validates scripts, inspects keyword tables and
//! scans templates for usage. Logs go to stderr; results go to stdout.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use hyperfixi_core::{
    diagnostics::has_errors, explicit::is_explicit, parse_explicit, render_explicit,
    scanner::AggregatedUsage, validate_semantic_json, CompilerConfig, CompilerService, Diagnostic,
    UsageScanner, ValidationGate,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, Level};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hyperfixi")]
#[command(about = "Multilingual parser and canonicalizer for DOM interactivity scripts", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML)
    #[arg(short, long, global = true, env = "HYPERFIXI_CONFIG")]
    config: Option<PathBuf>,

    /// Set log level
    #[arg(short, long, global = true, env = "HYPERFIXI_LOG", default_value = "warn")]
    log_level: String,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse natural-language code into a semantic node
    Parse {
        /// Source code
        code: String,

        /// Language code (defaults to the configured language)
        #[arg(short = 'L', long)]
        lang: Option<String>,
    },

    /// Parse bracketed explicit syntax and print its normalized form
    Explicit {
        /// Explicit syntax, e.g. "[toggle patient:.active]"
        code: String,
    },

    /// Translate code from one language to another
    Translate {
        /// Source code
        code: String,

        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,
    },

    /// Show how a lexeme resolves in a language
    Resolve {
        lexeme: String,

        #[arg(short = 'L', long)]
        lang: String,
    },

    /// List lexemes with competing meanings
    Conflicts {
        /// Language code (all enabled languages when omitted)
        #[arg(short = 'L', long)]
        lang: Option<String>,
    },

    /// Run input through normalization and the validation gate
    Validate {
        /// Natural-language or explicit code, or a JSON file with --json
        input: String,

        /// Treat the input as a path to a semantic JSON file
        #[arg(long)]
        json: bool,

        #[arg(short = 'L', long)]
        lang: Option<String>,

        /// Confidence threshold (defaults to the configured threshold)
        #[arg(long)]
        threshold: Option<f32>,
    },

    /// Scan template directories for hyperscript usage
    Scan {
        /// Directories to scan
        #[arg(required = true)]
        dirs: Vec<PathBuf>,

        /// File extensions to scan (comma-separated)
        #[arg(long, value_delimiter = ',')]
        extensions: Option<Vec<String>>,

        /// Path substrings to skip (comma-separated)
        #[arg(long, value_delimiter = ',')]
        exclude: Option<Vec<String>>,
    },

    /// List enabled languages
    Languages,
}

fn load_config(path: Option<&Path>) -> anyhow::Result<CompilerConfig> {
    match path {
        Some(path) => CompilerConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(CompilerConfig::default()),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_diagnostics(diagnostics: &[Diagnostic]) {
    for diagnostic in diagnostics {
        println!("  {}", diagnostic);
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let filter = EnvFilter::new(format!(
        "hyperfixi_core={level},hyperfixi={level}",
        level = level.as_str().to_lowercase()
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    debug!("HyperFixi v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = load_config(cli.config.as_deref())?;
    let format = cli.format;

    match cli.command {
        Commands::Parse { code, lang } => {
            let service = CompilerService::new(config)?;
            let lang = lang.unwrap_or_else(|| service.config().default_language.clone());
            let outcome = service.parse(&code, &lang);

            if format == OutputFormat::Json {
                print_json(&outcome)?;
            } else if let Some(node) = &outcome.node {
                println!("{}", render_explicit(node));
                println!(
                    "  pattern: {}  confidence: {:.2}",
                    outcome.pattern_id.as_deref().unwrap_or("-"),
                    outcome.confidence
                );
                print_diagnostics(&outcome.diagnostics);
            } else {
                print_diagnostics(&outcome.diagnostics);
            }

            if outcome.node.is_none() {
                bail!("Could not parse input");
            }
            Ok(())
        }
        Commands::Explicit { code } => {
            let node = parse_explicit(&code)?;
            if format == OutputFormat::Json {
                print_json(&node)?;
            } else {
                println!("{}", render_explicit(&node));
            }
            Ok(())
        }
        Commands::Translate { code, from, to } => {
            let service = CompilerService::new(config)?.with_native_translator();
            let response = service.translate(&code, &from, &to);

            if format == OutputFormat::Json {
                print_json(&response)?;
            } else if let Some(translated) = &response.code {
                println!("{}", translated);
            } else {
                print_diagnostics(&response.diagnostics);
            }

            if !response.ok {
                bail!("Translation failed");
            }
            Ok(())
        }
        Commands::Resolve { lexeme, lang } => {
            let service = CompilerService::new(config)?;
            let tables = match service.registry().language(&lang) {
                Some(tables) => tables,
                None => bail!("Unsupported language: {}", lang),
            };
            let resolver = tables.keywords();
            let resolved = resolver.resolve(&lexeme);

            if format == OutputFormat::Json {
                print_json(&resolved)?;
            } else {
                match &resolved {
                    Some(r) => {
                        println!("{} -> {} ({})", r.lexeme, r.english, r.category);
                        if r.conflicted {
                            for mapping in resolver.mappings(&lexeme) {
                                println!("  also: {} ({})", mapping.english, mapping.category);
                            }
                        }
                    }
                    None => println!("{}: not a keyword in {}", lexeme, lang),
                }
            }
            Ok(())
        }
        Commands::Conflicts { lang } => {
            let service = CompilerService::new(config)?;
            let languages: Vec<String> = match lang {
                Some(lang) => vec![lang],
                None => service.registry().languages().iter().map(|l| l.to_string()).collect(),
            };

            let mut report = Vec::new();
            for lang in &languages {
                let tables = match service.registry().language(lang) {
                    Some(tables) => tables,
                    None => bail!("Unsupported language: {}", lang),
                };
                report.push((lang.clone(), tables.keywords().conflicts()));
            }

            if format == OutputFormat::Json {
                let map: serde_json::Map<String, serde_json::Value> = report
                    .into_iter()
                    .map(|(lang, conflicts)| Ok((lang, serde_json::to_value(conflicts)?)))
                    .collect::<serde_json::Result<_>>()?;
                print_json(&map)?;
            } else {
                for (lang, conflicts) in &report {
                    println!("{} ({} conflicts)", lang, conflicts.len());
                    for conflict in conflicts {
                        let others: Vec<String> = conflict
                            .mappings
                            .iter()
                            .skip(1)
                            .map(|m| format!("{} ({})", m.english, m.category))
                            .collect();
                        println!(
                            "  {} -> {} ({}), over {}",
                            conflict.lexeme,
                            conflict.winner.english,
                            conflict.winner.category,
                            others.join(", ")
                        );
                    }
                }
            }
            Ok(())
        }
        Commands::Validate {
            input,
            json,
            lang,
            threshold,
        } => {
            let service = CompilerService::new(config)?;
            let (node, confidence, mut diagnostics) = if json {
                let text = std::fs::read_to_string(&input)
                    .with_context(|| format!("Failed to read {}", input))?;
                let value: serde_json::Value = serde_json::from_str(&text)?;
                let (node, diagnostics) = validate_semantic_json(&value);
                (node, 1.0, diagnostics)
            } else if is_explicit(&input) {
                (Some(parse_explicit(&input)?), 1.0, Vec::new())
            } else {
                let lang = lang.unwrap_or_else(|| service.config().default_language.clone());
                let outcome = service.parse(&input, &lang);
                (outcome.node, outcome.confidence, outcome.diagnostics)
            };

            let gate = ValidationGate::new(threshold.unwrap_or(service.config().confidence_threshold));
            let report = node.as_ref().map(|node| gate.validate(node, confidence));
            if let Some(report) = &report {
                diagnostics.extend(report.diagnostics.iter().cloned());
            }
            let pass = report.as_ref().map_or(false, |r| r.pass) && !has_errors(&diagnostics);

            if format == OutputFormat::Json {
                print_json(&serde_json::json!({
                    "pass": pass,
                    "confidence": report.as_ref().map(|r| r.adjusted_confidence),
                    "semantic": node,
                    "diagnostics": diagnostics,
                }))?;
            } else {
                match &report {
                    Some(report) => println!(
                        "{} (confidence {:.2})",
                        if pass { "pass" } else { "fail" },
                        report.adjusted_confidence
                    ),
                    None => println!("fail"),
                }
                print_diagnostics(&diagnostics);
            }

            if !pass {
                bail!("Validation failed");
            }
            Ok(())
        }
        Commands::Scan {
            dirs,
            extensions,
            exclude,
        } => {
            let mut scanner = UsageScanner::new();
            if let Some(extensions) = &extensions {
                scanner = scanner.with_extensions(extensions);
            }
            if let Some(exclude) = &exclude {
                scanner = scanner.with_excludes(exclude);
            }

            let files = scanner.scan_directories(&dirs)?;
            let total = AggregatedUsage::from_files(&files);

            if format == OutputFormat::Json {
                print_json(&total)?;
            } else {
                for (path, usage) in &files {
                    let commands: Vec<&str> = usage.commands.iter().map(String::as_str).collect();
                    println!("{}: {}", path.display(), commands.join(", "));
                }
                let commands: Vec<&str> = total.usage.commands.iter().map(String::as_str).collect();
                let blocks: Vec<&str> = total.usage.blocks.iter().map(String::as_str).collect();
                println!();
                println!("Files:      {}", total.file_count);
                println!("Commands:   {}", commands.join(", "));
                println!("Blocks:     {}", blocks.join(", "));
                println!("Positional: {}", total.usage.positional);
            }
            Ok(())
        }
        Commands::Languages => {
            let service = CompilerService::new(config)?;
            let registry = service.registry();

            let mut rows = Vec::new();
            for code in registry.languages() {
                if let Some(tables) = registry.language(code) {
                    let profile = tables.profile();
                    rows.push(serde_json::json!({
                        "code": profile.code,
                        "name": profile.name,
                        "wordOrder": profile.word_order,
                        "direction": profile.direction,
                        "patterns": registry.patterns().patterns_for(code, None).len(),
                        "keywords": tables.keywords().len(),
                    }));
                }
            }

            if format == OutputFormat::Json {
                print_json(&rows)?;
            } else {
                for row in &rows {
                    println!(
                        "{:<4} {:<10} {:<4} {:<4} {:>3} patterns  {:>3} keywords",
                        row["code"].as_str().unwrap_or(""),
                        row["name"].as_str().unwrap_or(""),
                        row["wordOrder"].as_str().unwrap_or(""),
                        row["direction"].as_str().unwrap_or(""),
                        row["patterns"],
                        row["keywords"]
                    );
                }
            }
            Ok(())
        }
    }
}
