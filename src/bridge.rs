//! Boundaries to external collaborators
//!
//! The core never generates target code itself: a [`CodeGenerator`] is
//! plugged into the orchestrator and handed canonical nodes. Translation is
//! likewise a [`Translator`]; [`RegistryTranslator`] implements it natively
//! by parsing in one language and rendering in another.

use crate::registry::Registry;
use crate::semantic::{parse, render};
use crate::types::{CompileOptions, SemanticNode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// What a code generator returns
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationResult {
    pub success: bool,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub helpers: Vec<String>,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub errors: Vec<String>,
}

impl GenerationResult {
    pub fn success(code: impl Into<String>) -> Self {
        Self {
            success: true,
            code: code.into(),
            ..Default::default()
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            errors: vec![error.into()],
            ..Default::default()
        }
    }
}

/// Turns a canonical node into target code
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    fn generate(&self, node: &SemanticNode, options: &CompileOptions) -> GenerationResult;
}

/// Translates source text between languages
#[cfg_attr(test, mockall::automock)]
pub trait Translator: Send + Sync {
    fn translate(&self, code: &str, from: &str, to: &str) -> Result<String, String>;
}

/// Translator backed by the registry's own patterns
pub struct RegistryTranslator {
    registry: Arc<Registry>,
}

impl RegistryTranslator {
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }
}

impl Translator for RegistryTranslator {
    fn translate(&self, code: &str, from: &str, to: &str) -> Result<String, String> {
        let outcome = parse(&self.registry, code, from);
        let node = match outcome.node {
            Some(node) => node,
            None => {
                let reasons: Vec<String> = outcome.diagnostics.iter().map(|d| d.message.clone()).collect();
                return Err(reasons.join("; "));
            }
        };
        render(&self.registry, &node, to).map_err(|e| e.to_string())
    }
}
