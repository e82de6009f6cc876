//! Semantic cache
//!
//! Compiled responses are keyed on the canonical form of the node plus the
//! normalized compile options, so the same meaning written in any language,
//! syntax or role order shares one entry.

use crate::request::CompileResponse;
use crate::types::{CompileOptions, LiteralValue, SemanticNode, SemanticValue};
use lru::LruCache;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::trace;

/// Entries kept when no size is configured
pub const DEFAULT_CACHE_SIZE: usize = 500;

/// Cache statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub size: usize,
    pub hits: u64,
    pub misses: u64,
    /// `hits / (hits + misses)`, 0 before the first lookup
    pub hit_rate: f64,
}

fn quoted(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}

fn write_value(value: &SemanticValue, out: &mut String) {
    match value {
        SemanticValue::Selector { value, .. } => {
            out.push_str("selector:");
            out.push_str(&quoted(value));
        }
        SemanticValue::Literal { value } => {
            out.push_str("literal:");
            out.push_str(value.data_type());
            out.push(':');
            match value {
                LiteralValue::String(s) => out.push_str(&quoted(s)),
                other => out.push_str(&other.to_string()),
            }
        }
        SemanticValue::Reference { value } => {
            out.push_str("reference:");
            out.push_str(&quoted(value));
        }
        SemanticValue::Expression { raw } => {
            out.push_str("expression:");
            out.push_str(&quoted(raw));
        }
    }
}

fn write_node(node: &SemanticNode, out: &mut String) {
    out.push_str(node.action.as_str());
    out.push('/');
    out.push_str(node.kind.as_str());

    if let Some(event) = &node.event {
        out.push('@');
        out.push_str(&quoted(event));
    }

    if !node.event_modifiers.is_empty() {
        let modifiers: Vec<String> = node
            .event_modifiers
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect();
        out.push('<');
        out.push_str(&modifiers.join(","));
        out.push('>');
    }

    out.push('{');
    for (i, (role, value)) in node.roles.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(role.as_str());
        out.push('=');
        write_value(value, out);
    }
    out.push('}');

    if !node.body.is_empty() {
        out.push('[');
        for (i, child) in node.body.iter().enumerate() {
            if i > 0 {
                out.push(';');
            }
            write_node(child, out);
        }
        out.push(']');
    }
}

/// Deterministic serialization of a node
///
/// Roles and modifiers are written sorted by name and the body
/// recursively, so structurally equal nodes always produce the same string.
pub fn canonicalize(node: &SemanticNode) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

/// Cache key for `node` compiled with `options`, unset options defaulted
pub fn generate_cache_key(node: &SemanticNode, options: &CompileOptions) -> String {
    format!(
        "{}::opt={};target={};minify={}",
        canonicalize(node),
        options.optimization_level(),
        options.target_name(),
        options.minify_enabled()
    )
}

/// LRU cache of compile responses
pub struct SemanticCache {
    entries: Mutex<LruCache<String, CompileResponse>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for SemanticCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_SIZE)
    }
}

impl SemanticCache {
    /// Cache holding at most `max_size` entries (at least one)
    pub fn new(max_size: usize) -> Self {
        let capacity = NonZeroUsize::new(max_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(capacity)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn max_size(&self) -> usize {
        self.entries.lock().map(|cache| cache.cap().get()).unwrap_or(0)
    }

    /// Look up `key`, marking it most recently used
    pub fn get(&self, key: &str) -> Option<CompileResponse> {
        let found = self
            .entries
            .lock()
            .ok()
            .and_then(|mut cache| cache.get(key).cloned());

        match found {
            Some(response) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                trace!("Cache hit: {}", key);
                Some(response)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                trace!("Cache miss: {}", key);
                None
            }
        }
    }

    /// Store `response`, evicting the least recently used entry when full
    ///
    /// Responses without positive confidence are refused; returns whether
    /// the response was stored.
    pub fn set(&self, key: impl Into<String>, response: CompileResponse) -> bool {
        if response.confidence.map_or(true, |c| c <= 0.0) {
            return false;
        }
        match self.entries.lock() {
            Ok(mut cache) => {
                cache.put(key.into(), response);
                true
            }
            Err(_) => false,
        }
    }

    /// True if `key` is cached; does not touch LRU order or counters
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .lock()
            .map(|cache| cache.contains(key))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|cache| cache.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let lookups = hits + misses;
        CacheStats {
            size: self.len(),
            hits,
            misses,
            hit_rate: if lookups == 0 {
                0.0
            } else {
                hits as f64 / lookups as f64
            },
        }
    }

    /// Drop every entry and reset the counters
    pub fn clear(&self) {
        if let Ok(mut cache) = self.entries.lock() {
            cache.clear();
        }
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Action, Role};

    fn response(confidence: f32) -> CompileResponse {
        CompileResponse {
            ok: true,
            js: Some("code".to_string()),
            confidence: Some(confidence),
            ..Default::default()
        }
    }

    #[test]
    fn test_role_order_does_not_change_key() {
        let a = SemanticNode::command(Action::Put)
            .with_role(Role::Patient, SemanticValue::string("x"))
            .with_role(Role::Destination, SemanticValue::selector("#out"));
        let b = SemanticNode::command(Action::Put)
            .with_role(Role::Destination, SemanticValue::selector("#out"))
            .with_role(Role::Patient, SemanticValue::string("x"));
        let options = CompileOptions {
            optimization: Some(2),
            ..Default::default()
        };
        assert_eq!(generate_cache_key(&a, &options), generate_cache_key(&b, &options));
    }

    #[test]
    fn test_key_distinguishes_value_types_and_options() {
        let number = SemanticNode::command(Action::Log).with_role(Role::Patient, SemanticValue::number(5.0));
        let string = SemanticNode::command(Action::Log).with_role(Role::Patient, SemanticValue::string("5"));
        assert_ne!(canonicalize(&number), canonicalize(&string));

        let defaults = CompileOptions::default();
        let explicit = CompileOptions {
            optimization: Some(1),
            target: Some("esm".to_string()),
            minify: Some(false),
        };
        let minified = CompileOptions {
            minify: Some(true),
            ..Default::default()
        };
        assert_eq!(generate_cache_key(&number, &defaults), generate_cache_key(&number, &explicit));
        assert_ne!(generate_cache_key(&number, &defaults), generate_cache_key(&number, &minified));
    }

    #[test]
    fn test_canonical_handler_shape() {
        let handler = SemanticNode::event_handler(
            "click",
            vec![SemanticNode::command(Action::Toggle).with_role(Role::Patient, SemanticValue::selector(".a"))],
        )
        .with_modifier("once", serde_json::Value::Bool(true));
        assert_eq!(
            canonicalize(&handler),
            "on/event-handler@\"click\"<once=true>{}[toggle/command{patient=selector:\".a\"}]"
        );
    }

    #[test]
    fn test_lru_eviction_and_refresh() {
        let cache = SemanticCache::new(2);
        cache.set("a", response(1.0));
        cache.set("b", response(1.0));
        assert!(cache.get("a").is_some());
        cache.set("c", response(1.0));

        assert!(cache.contains("a"));
        assert!(!cache.contains("b"));
        assert!(cache.contains("c"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_zero_confidence_never_cached() {
        let cache = SemanticCache::new(4);
        assert!(!cache.set("zero", response(0.0)));
        assert!(!cache.set("none", CompileResponse::default()));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_stats() {
        let cache = SemanticCache::new(4);
        assert_eq!(cache.stats().hit_rate, 0.0);
        cache.set("a", response(0.9));
        cache.get("a");
        cache.get("a");
        cache.get("b");
        let stats = cache.stats();
        assert_eq!((stats.size, stats.hits, stats.misses), (1, 2, 1));
        assert!((stats.hit_rate - 2.0 / 3.0).abs() < 1e-9);

        cache.clear();
        assert_eq!(cache.stats(), CacheStats { size: 0, hits: 0, misses: 0, hit_rate: 0.0 });
    }
}
