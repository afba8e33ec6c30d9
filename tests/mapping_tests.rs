//! Tests for partitioning outcomes into category buckets.

use std::sync::Arc;

use rubric::{
    config::{CategoryDefinition, MatchRule, ScoringPolicy},
    error::ConfigError,
    grade::map,
    ingest::{CheckOutcome, CheckStatus},
};

fn by_ids(name: &str, ids: &[&str]) -> Arc<CategoryDefinition> {
    Arc::new(CategoryDefinition {
        name:            name.into(),
        points_possible: 1.0,
        match_rule:      MatchRule::Identifiers(ids.iter().map(|s| s.to_string()).collect()),
        policy:          ScoringPolicy::Proportional,
    })
}

fn by_pattern(name: &str, pattern: &str) -> Arc<CategoryDefinition> {
    Arc::new(CategoryDefinition {
        name:            name.into(),
        points_possible: 1.0,
        match_rule:      MatchRule::Pattern(pattern.into()),
        policy:          ScoringPolicy::Proportional,
    })
}

fn outcome(id: &str) -> CheckOutcome {
    CheckOutcome::builder()
        .identifier(id)
        .status(CheckStatus::Passed)
        .build()
}

#[test]
fn outcomes_land_in_declaration_order_buckets() {
    let categories = vec![
        by_ids("first", &["t_a", "t_b"]),
        by_pattern("benches", "bench_*"),
    ];
    let outcomes = vec![outcome("bench_x"), outcome("t_b"), outcome("t_a")];

    let buckets = map::partition(&categories, outcomes).expect("partition");
    assert_eq!(buckets.len(), 2);
    let first: Vec<&str> = buckets[0].iter().map(|o| o.identifier.as_str()).collect();
    assert_eq!(first, vec!["t_b", "t_a"], "bucket keeps artifact order");
    assert_eq!(buckets[1][0].identifier, "bench_x");
}

#[test]
fn categories_with_no_matches_keep_empty_buckets() {
    let categories = vec![by_ids("first", &["t_a"]), by_ids("second", &["t_b"])];
    let buckets = map::partition(&categories, vec![outcome("t_a")]).expect("partition");
    assert_eq!(buckets[0].len(), 1);
    assert!(buckets[1].is_empty(), "unmatched category is retained, not omitted");
}

#[test]
fn unmatched_outcome_aborts_the_run() {
    let categories = vec![by_ids("first", &["t_a"])];
    let err = map::partition(&categories, vec![outcome("t_mystery")]).unwrap_err();
    assert!(matches!(err, ConfigError::UnmappedOutcome(id) if id == "t_mystery"));
}

#[test]
fn ambiguous_outcome_aborts_the_run_and_names_both_categories() {
    let categories = vec![by_ids("explicit", &["bench_x"]), by_pattern("benches", "bench_*")];
    let err = map::partition(&categories, vec![outcome("bench_x")]).unwrap_err();
    match err {
        ConfigError::AmbiguousMapping {
            identifier,
            categories,
        } => {
            assert_eq!(identifier, "bench_x");
            assert_eq!(categories, vec!["explicit".to_string(), "benches".to_string()]);
        }
        other => panic!("expected AmbiguousMapping, got {other}"),
    }
}
