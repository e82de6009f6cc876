//! Property tests for canonicalization and the LRU cache

use hyperfixi_core::{
    canonicalize, generate_cache_key, Action, CompileOptions, CompileResponse, Role, SemanticCache,
    SemanticNode, SemanticValue,
};
use proptest::prelude::*;

fn response() -> CompileResponse {
    CompileResponse {
        ok: true,
        js: Some("x()".to_string()),
        confidence: Some(1.0),
        ..Default::default()
    }
}

proptest! {
    #[test]
    fn cache_never_exceeds_capacity(max in 1usize..32, extra in 1usize..16) {
        let cache = SemanticCache::new(max);
        for i in 0..max + extra {
            cache.set(format!("key-{}", i), response());
        }

        prop_assert_eq!(cache.len(), max);
        prop_assert!(!cache.contains("key-0"));
        let last = format!("key-{}", max + extra - 1);
        prop_assert!(cache.contains(&last));
    }

    #[test]
    fn one_past_capacity_evicts_the_first_key(max in 1usize..64) {
        let cache = SemanticCache::new(max);
        for i in 0..=max {
            cache.set(format!("key-{}", i), response());
        }
        prop_assert_eq!(cache.stats().size, max);
        prop_assert!(!cache.contains("key-0"));
    }

    #[test]
    fn key_ignores_role_insertion_order(patient in "[a-z]{1,8}", destination in "#[a-z]{1,8}") {
        let forward = SemanticNode::command(Action::Put)
            .with_role(Role::Patient, SemanticValue::string(patient.clone()))
            .with_role(Role::Destination, SemanticValue::selector(destination.clone()));
        let backward = SemanticNode::command(Action::Put)
            .with_role(Role::Destination, SemanticValue::selector(destination))
            .with_role(Role::Patient, SemanticValue::string(patient));

        let options = CompileOptions::default();
        prop_assert_eq!(generate_cache_key(&forward, &options), generate_cache_key(&backward, &options));
    }

    #[test]
    fn distinct_values_give_distinct_keys(a in "\\.[a-z]{1,6}", b in "\\.[a-z]{1,6}") {
        prop_assume!(a != b);
        let first = SemanticNode::command(Action::Toggle).with_role(Role::Patient, SemanticValue::selector(a));
        let second = SemanticNode::command(Action::Toggle).with_role(Role::Patient, SemanticValue::selector(b));
        prop_assert_ne!(canonicalize(&first), canonicalize(&second));
    }

    #[test]
    fn canonical_form_is_stable_under_clone(event in "[a-z]{1,8}", n in -1000i32..1000) {
        let node = SemanticNode::event_handler(
            event,
            vec![SemanticNode::command(Action::Increment)
                .with_role(Role::Patient, SemanticValue::reference("count"))
                .with_role(Role::Quantity, SemanticValue::number(n as f64))],
        );
        prop_assert_eq!(canonicalize(&node), canonicalize(&node.clone()));
    }
}
