//! Replay the shipped vector files against the default policy.

use std::path::{Path, PathBuf};

use transport_core::vectors::{self, VectorFile};
use transport_core::Policy;

fn vector_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("vectors")
        .join(name)
}

fn assert_clean(name: &str) {
    let file = VectorFile::load(&vector_path(name)).expect("load vectors");
    assert!(!file.cases.is_empty(), "{name} has no cases");
    let report = vectors::run(&Policy::default(), &file);
    assert!(
        report.is_clean(),
        "{name}: {} of {} cases failed: {:#?}",
        report.mismatches.len(),
        report.total,
        report.mismatches
    );
}

#[test]
fn retry_vectors_match() {
    assert_clean("retry.json");
}

#[test]
fn auth_vectors_match() {
    assert_clean("auth.json");
}

#[test]
fn capped_policy_diverges_only_on_large_hints() {
    let file = VectorFile::load(&vector_path("retry.json")).expect("load vectors");
    let capped = Policy {
        max_retry_after_ms: Some(1000),
    };
    let report = vectors::run(&capped, &file);
    let names: Vec<_> = report.mismatches.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["get_rate_limited_forwards_hint"]);
}
