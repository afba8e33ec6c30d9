//! Tests for results artifact ingestion.

use std::path::PathBuf;

use rubric::{
    error::InputError,
    ingest::{self, CheckKind, CheckOutcome, CheckStatus},
};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("geospatial")
        .join(name)
}

#[test]
fn parses_checks_with_measurements() {
    let raw = r#"{"checks": [
        {"id": "test_alpha", "status": "passed", "kind": "correctness"},
        {"id": "bench_beta", "status": "passed", "kind": "performance", "measurement": 0.5}
    ]}"#;
    let outcomes = ingest::parse_results(raw).expect("parse artifact");
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].identifier, "test_alpha");
    assert_eq!(outcomes[0].status, CheckStatus::Passed);
    assert_eq!(outcomes[0].measurement, None);
    assert_eq!(outcomes[1].kind, CheckKind::Performance);
    assert_eq!(outcomes[1].measurement, Some(0.5));
}

#[test]
fn zero_checks_is_valid_not_an_error() {
    let outcomes = ingest::parse_results(r#"{"checks": []}"#).expect("empty artifact is valid");
    assert!(outcomes.is_empty());
}

#[test]
fn malformed_artifact_is_an_input_error() {
    let err = ingest::parse_results("not an artifact {").unwrap_err();
    assert!(matches!(err, InputError::Malformed(_)));
}

#[test]
fn duplicate_check_identifier_is_an_input_error() {
    let raw = r#"{"checks": [
        {"id": "test_alpha", "status": "passed", "kind": "correctness"},
        {"id": "test_alpha", "status": "failed", "kind": "correctness"}
    ]}"#;
    let err = ingest::parse_results(raw).unwrap_err();
    assert!(matches!(err, InputError::DuplicateCheck(id) if id == "test_alpha"));
}

#[test]
fn fill_missing_synthesizes_explicit_not_found_outcomes() {
    let reported = vec![
        CheckOutcome::builder()
            .identifier("test_alpha")
            .status(CheckStatus::Passed)
            .build(),
    ];
    let expected = vec!["test_alpha".to_string(), "test_beta".to_string()];

    let outcomes = ingest::fill_missing(reported, &expected);
    assert_eq!(outcomes.len(), 2);
    assert_eq!(outcomes[0].status, CheckStatus::Passed);
    assert_eq!(outcomes[1].identifier, "test_beta");
    assert_eq!(outcomes[1].status, CheckStatus::NotFound);
    assert_eq!(outcomes[1].measurement, None);
}

#[test]
fn fill_missing_never_overrides_reported_outcomes() {
    let reported = vec![
        CheckOutcome::builder()
            .identifier("test_alpha")
            .status(CheckStatus::Failed)
            .build(),
    ];
    let expected = vec!["test_alpha".to_string()];

    let outcomes = ingest::fill_missing(reported, &expected);
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].status, CheckStatus::Failed);
}

#[test]
fn load_results_completes_against_expectations() {
    let expected = vec!["test_never_ran".to_string()];
    let outcomes =
        ingest::load_results(&fixture("results-empty.json"), &expected).expect("load artifact");
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0].status, CheckStatus::NotFound);
}

#[test]
fn load_results_missing_file_is_a_read_error() {
    let err = ingest::load_results(&fixture("no-such-results.json"), &[]).unwrap_err();
    assert!(matches!(err, InputError::Read { .. }));
}

#[test]
fn load_results_malformed_fixture_is_rejected() {
    let err = ingest::load_results(&fixture("results-malformed.json"), &[]).unwrap_err();
    assert!(matches!(err, InputError::Malformed(_)));
}
