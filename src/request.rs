//! Compile and translate request/response shapes

use crate::diagnostics::Diagnostic;
use crate::explicit::is_explicit;
use crate::types::{CompileOptions, SemanticNode};
use serde::{Deserialize, Serialize};

/// A compile request
///
/// Exactly one input is used, checked in this order: `semantic`, then
/// `explicit`, then `code` (which is itself treated as explicit syntax when
/// it starts with `[`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explicit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic: Option<serde_json::Value>,
    /// Overrides the service's confidence threshold
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    #[serde(flatten)]
    pub options: CompileOptions,
}

/// The input a request carries, after format detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RequestInput<'a> {
    Semantic(&'a serde_json::Value),
    Explicit(&'a str),
    Natural {
        code: &'a str,
        language: Option<&'a str>,
    },
}

impl CompileRequest {
    pub fn natural(code: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            language: Some(language.into()),
            ..Default::default()
        }
    }

    pub fn explicit(syntax: impl Into<String>) -> Self {
        Self {
            explicit: Some(syntax.into()),
            ..Default::default()
        }
    }

    pub fn semantic(value: serde_json::Value) -> Self {
        Self {
            semantic: Some(value),
            ..Default::default()
        }
    }

    pub fn with_confidence(mut self, threshold: f32) -> Self {
        self.confidence = Some(threshold);
        self
    }

    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }

    /// Detect which input format this request uses
    pub fn input(&self) -> Option<RequestInput<'_>> {
        if let Some(semantic) = &self.semantic {
            return Some(RequestInput::Semantic(semantic));
        }
        if let Some(explicit) = &self.explicit {
            return Some(RequestInput::Explicit(explicit));
        }
        match &self.code {
            Some(code) if is_explicit(code) => Some(RequestInput::Explicit(code)),
            Some(code) => Some(RequestInput::Natural {
                code,
                language: self.language.as_deref(),
            }),
            None => None,
        }
    }
}

/// Result of a compile request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub js: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helpers: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic: Option<SemanticNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}

impl CompileResponse {
    /// A failed response carrying `diagnostics`
    pub fn failure(diagnostics: Vec<Diagnostic>) -> Self {
        Self {
            ok: false,
            diagnostics,
            ..Default::default()
        }
    }
}

/// Result of a translate request
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslateResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}
