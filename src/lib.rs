//! HyperFixi - Multilingual DOM-Scripting Compiler Core
//!
//! Parses short DOM-interactivity scripts written in several natural
//! languages and surface syntaxes into one canonical [`SemanticNode`]:
//! - Per-language tokenization with morphological normalization
//! - Template pattern matching with confidence scoring (SVO, SOV, VSO)
//! - Cross-category keyword conflict resolution
//! - Bracketed explicit syntax and LLM-produced JSON input
//! - Confidence-gated validation and an LRU cache keyed on meaning
//!
//! # Architecture
//!
//! - **Language tables**: keyword lexemes, markers and normalizers per language
//! - **Registry**: tokenizers and generated patterns, built once and shared
//! - **Semantic**: matching, node building and rendering back to text
//! - **Service**: the request pipeline in front of an external code generator
//!
//! # Example
//!
//! ```ignore
//! use hyperfixi_core::{CompileRequest, CompilerConfig, CompilerService};
//!
//! let service = CompilerService::new(CompilerConfig::default())?;
//! let outcome = service.parse("alternar .active", "es");
//! assert_eq!(outcome.node.unwrap().action.as_str(), "toggle");
//!
//! let response = service.compile(&CompileRequest::explicit("[toggle patient:.active]"));
//! ```

pub mod bridge;
pub mod cache;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod explicit;
pub mod keywords;
pub mod language;
pub mod morphology;
pub mod patterns;
pub mod registry;
pub mod request;
pub mod scanner;
pub mod schema;
pub mod semantic;
pub mod semantic_json;
pub mod service;
pub mod tokenizer;
pub mod types;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use bridge::{CodeGenerator, GenerationResult, RegistryTranslator, Translator};
pub use cache::{canonicalize, generate_cache_key, CacheStats, SemanticCache};
pub use config::{CompilerConfig, ConfigError};
pub use diagnostics::{Diagnostic, DiagnosticCode, Severity};
pub use error::{HyperfixiError, Result};
pub use explicit::{parse_explicit, render_explicit};
pub use registry::Registry;
pub use request::{CompileRequest, CompileResponse, TranslateResponse};
pub use scanner::{FileUsage, UsageScanner};
pub use semantic::{parse, render, ParseOutcome};
pub use semantic_json::validate_semantic_json;
pub use service::CompilerService;
pub use types::{Action, CompileOptions, Role, SemanticNode, SemanticValue};
pub use validation::{ValidationGate, ValidationReport};
