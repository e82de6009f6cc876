//! Common test utilities and helpers

#![allow(dead_code)]

use hyperfixi_core::{
    canonicalize, CodeGenerator, CompileOptions, CompilerConfig, CompilerService, GenerationResult,
    Registry, SemanticNode,
};
use once_cell::sync::Lazy;
use std::sync::Arc;

mockall::mock! {
    pub Generator {}

    impl CodeGenerator for Generator {
        fn generate(&self, node: &SemanticNode, options: &CompileOptions) -> GenerationResult;
    }
}

static REGISTRY: Lazy<Arc<Registry>> =
    Lazy::new(|| Arc::new(Registry::all().expect("Failed to build registry")));

/// Registry with every built-in language, built once per test binary
pub fn shared_registry() -> Arc<Registry> {
    Arc::clone(&REGISTRY)
}

/// Generator that emits the canonical form of the node as a comment
pub fn echo_generator() -> Arc<MockGenerator> {
    let mut generator = MockGenerator::new();
    generator
        .expect_generate()
        .returning(|node, _| GenerationResult::success(format!("/* {} */", canonicalize(node))));
    Arc::new(generator)
}

/// Service over the shared registry with default config and an echo generator
pub fn create_test_service() -> CompilerService {
    create_test_service_with(CompilerConfig::default())
}

pub fn create_test_service_with(config: CompilerConfig) -> CompilerService {
    CompilerService::with_registry(shared_registry(), config).with_generator(echo_generator())
}
