//! Compile orchestrator
//!
//! One request runs straight through:
//!
//! 1. normalize the input (semantic JSON, explicit syntax or natural
//!    language) to a node and a parser confidence;
//! 2. run the validation gate;
//! 3. look the canonical key up in the cache;
//! 4. on a miss, call the code generator and cache a successful result
//!    together with the generator's warnings.
//!
//! Every failure comes back as `ok: false` plus diagnostics; nothing panics
//! or returns an error across this boundary.

use crate::bridge::{CodeGenerator, RegistryTranslator, Translator};
use crate::cache::{generate_cache_key, CacheStats, SemanticCache};
use crate::config::CompilerConfig;
use crate::diagnostics::{Diagnostic, DiagnosticCode};
use crate::error::Result;
use crate::explicit::parse_explicit;
use crate::registry::Registry;
use crate::request::{CompileRequest, CompileResponse, RequestInput, TranslateResponse};
use crate::semantic::{self, ParseOutcome};
use crate::semantic_json::validate_semantic_json;
use crate::types::SemanticNode;
use crate::validation::ValidationGate;
use std::sync::Arc;
use tracing::{debug, warn};

/// Confidence of inputs that are already structured
const STRUCTURED_CONFIDENCE: f32 = 1.0;

/// Node, parser confidence and diagnostics from input normalization
struct Normalized {
    node: Option<SemanticNode>,
    confidence: f32,
    diagnostics: Vec<Diagnostic>,
}

/// Entry point for compile, parse and translate requests
pub struct CompilerService {
    registry: Arc<Registry>,
    config: CompilerConfig,
    cache: SemanticCache,
    generator: Option<Arc<dyn CodeGenerator>>,
    translator: Option<Arc<dyn Translator>>,
}

impl CompilerService {
    /// Validate `config` and build the registry for its languages
    pub fn new(config: CompilerConfig) -> Result<Self> {
        config.validate()?;
        let registry = Arc::new(Registry::with_languages(&config.languages)?);
        Ok(Self::with_registry(registry, config))
    }

    /// Service over an existing registry
    pub fn with_registry(registry: Arc<Registry>, config: CompilerConfig) -> Self {
        let cache = SemanticCache::new(config.cache_max_size);
        Self {
            registry,
            config,
            cache,
            generator: None,
            translator: None,
        }
    }

    pub fn with_generator(mut self, generator: Arc<dyn CodeGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Use the registry's own patterns for translation
    pub fn with_native_translator(self) -> Self {
        let translator = Arc::new(RegistryTranslator::new(Arc::clone(&self.registry)));
        self.with_translator(translator)
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    fn normalize(&self, request: &CompileRequest) -> Normalized {
        match request.input() {
            None => Normalized {
                node: None,
                confidence: 0.0,
                diagnostics: vec![Diagnostic::error(
                    DiagnosticCode::InvalidRequest,
                    "Request has no code, explicit or semantic input",
                )],
            },
            Some(RequestInput::Semantic(value)) => {
                let (node, diagnostics) = validate_semantic_json(value);
                Normalized {
                    node,
                    confidence: STRUCTURED_CONFIDENCE,
                    diagnostics,
                }
            }
            Some(RequestInput::Explicit(syntax)) => match parse_explicit(syntax) {
                Ok(node) => Normalized {
                    node: Some(node),
                    confidence: STRUCTURED_CONFIDENCE,
                    diagnostics: Vec::new(),
                },
                Err(err) => Normalized {
                    node: None,
                    confidence: 0.0,
                    diagnostics: vec![Diagnostic::error(DiagnosticCode::ParseError, err.to_string())],
                },
            },
            Some(RequestInput::Natural { code, language }) => {
                let language = language.unwrap_or(&self.config.default_language);
                let outcome = semantic::parse(&self.registry, code, language);
                Normalized {
                    node: outcome.node,
                    confidence: outcome.confidence,
                    diagnostics: outcome.diagnostics,
                }
            }
        }
    }

    /// Compile one request
    pub fn compile(&self, request: &CompileRequest) -> CompileResponse {
        let Normalized {
            node,
            confidence,
            mut diagnostics,
        } = self.normalize(request);

        let node = match node {
            Some(node) => node,
            None => return CompileResponse::failure(diagnostics),
        };

        let threshold = request.confidence.unwrap_or(self.config.confidence_threshold);
        if !(0.0..=1.0).contains(&threshold) {
            diagnostics.push(Diagnostic::error(
                DiagnosticCode::InvalidRequest,
                format!("Confidence threshold {} is outside 0..1", threshold),
            ));
            return CompileResponse::failure(diagnostics);
        }

        let report = ValidationGate::new(threshold).validate(&node, confidence);
        let adjusted = report.adjusted_confidence;
        diagnostics.extend(report.diagnostics);
        if !report.pass {
            return CompileResponse {
                ok: false,
                semantic: Some(node),
                confidence: Some(adjusted),
                diagnostics,
                ..Default::default()
            };
        }

        let options = request.options.or(&self.config.compile);
        let key = generate_cache_key(&node, &options);

        if let Some(mut cached) = self.cache.get(&key) {
            cached.confidence = Some(adjusted);
            // Cached entries hold generator diagnostics only
            diagnostics.extend(cached.diagnostics);
            cached.diagnostics = diagnostics;
            return cached;
        }

        let generator = match &self.generator {
            Some(generator) => generator,
            None => {
                diagnostics.push(Diagnostic::error(
                    DiagnosticCode::NotInitialized,
                    "No code generator is configured",
                ));
                return CompileResponse {
                    ok: false,
                    semantic: Some(node),
                    confidence: Some(adjusted),
                    diagnostics,
                    ..Default::default()
                };
            }
        };

        let result = generator.generate(&node, &options);
        diagnostics.extend(
            result
                .warnings
                .iter()
                .map(|w| Diagnostic::warning(DiagnosticCode::CompileWarning, w.clone())),
        );
        diagnostics.extend(
            result
                .errors
                .iter()
                .map(|e| Diagnostic::error(DiagnosticCode::CompileError, e.clone())),
        );

        if !result.success || !result.errors.is_empty() {
            if result.errors.is_empty() {
                diagnostics.push(Diagnostic::error(
                    DiagnosticCode::CompileError,
                    "Code generation failed",
                ));
            }
            warn!("Code generation failed for {}", node.action);
            return CompileResponse {
                ok: false,
                semantic: Some(node),
                confidence: Some(adjusted),
                diagnostics,
                ..Default::default()
            };
        }

        let mut response = CompileResponse {
            ok: true,
            size: Some(result.code.len()),
            js: Some(result.code),
            helpers: Some(result.helpers),
            semantic: Some(node),
            confidence: Some(adjusted),
            diagnostics: Vec::new(),
        };
        response.diagnostics = diagnostics
            .iter()
            .filter(|d| d.code == DiagnosticCode::CompileWarning)
            .cloned()
            .collect();
        if !self.cache.set(key, response.clone()) {
            debug!("Response not cached (confidence {:.2})", adjusted);
        }
        response.diagnostics = diagnostics;
        response
    }

    /// Parse natural-language `code` without compiling it
    pub fn parse(&self, code: &str, language: &str) -> ParseOutcome {
        semantic::parse(&self.registry, code, language)
    }

    /// Translate `code` between languages through the configured translator
    pub fn translate(&self, code: &str, from: &str, to: &str) -> TranslateResponse {
        let translator = match &self.translator {
            Some(translator) => translator,
            None => {
                return TranslateResponse {
                    ok: false,
                    code: None,
                    diagnostics: vec![Diagnostic::error(
                        DiagnosticCode::NotInitialized,
                        "No translator is configured",
                    )],
                }
            }
        };

        match translator.translate(code, from, to) {
            Ok(translated) => TranslateResponse {
                ok: true,
                code: Some(translated),
                diagnostics: Vec::new(),
            },
            Err(message) => TranslateResponse {
                ok: false,
                code: None,
                diagnostics: vec![Diagnostic::error(DiagnosticCode::TranslateError, message)],
            },
        }
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn clear_cache(&self) {
        self.cache.clear();
    }
}
