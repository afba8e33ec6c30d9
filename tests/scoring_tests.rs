//! Tests for per-category scoring policies and their edge cases.

use std::sync::Arc;

use rubric::{
    config::{CategoryDefinition, MatchRule, ScoringPolicy},
    grade::{CategoryResult, StatusTag},
    ingest::{CheckKind, CheckOutcome, CheckStatus},
};

fn definition(points: f64, policy: ScoringPolicy) -> Arc<CategoryDefinition> {
    Arc::new(CategoryDefinition {
        name: "load_spatial_dataset".into(),
        points_possible: points,
        match_rule: MatchRule::Pattern("*".into()),
        policy,
    })
}

fn outcome(id: &str, status: CheckStatus) -> CheckOutcome {
    CheckOutcome::builder().identifier(id).status(status).build()
}

fn bench(id: &str, measurement: f64) -> CheckOutcome {
    CheckOutcome::builder()
        .identifier(id)
        .status(CheckStatus::Passed)
        .kind(CheckKind::Performance)
        .measurement(measurement)
        .build()
}

#[test]
fn all_or_nothing_awards_everything_when_all_pass() {
    // Scenario: 4 points, [passed, passed].
    let result = CategoryResult::score(
        definition(4.0, ScoringPolicy::AllOrNothing),
        vec![
            outcome("t1", CheckStatus::Passed),
            outcome("t2", CheckStatus::Passed),
        ],
    );
    assert_eq!(result.points_earned, 4.0);
    assert_eq!(result.status_tag, StatusTag::FullCredit);
}

#[test]
fn all_or_nothing_awards_nothing_on_any_failure() {
    // Scenario: same category, [passed, failed].
    let result = CategoryResult::score(
        definition(4.0, ScoringPolicy::AllOrNothing),
        vec![
            outcome("t1", CheckStatus::Passed),
            outcome("t2", CheckStatus::Failed),
        ],
    );
    assert_eq!(result.points_earned, 0.0);
    assert_eq!(result.status_tag, StatusTag::ZeroCredit);
}

#[test]
fn empty_bucket_is_not_attempted() {
    let result = CategoryResult::score(definition(4.0, ScoringPolicy::Proportional), vec![]);
    assert_eq!(result.points_earned, 0.0);
    assert_eq!(result.status_tag, StatusTag::NotAttempted);
}

#[test]
fn not_found_only_bucket_is_not_attempted_not_zero_credit() {
    let result = CategoryResult::score(
        definition(4.0, ScoringPolicy::Proportional),
        vec![
            outcome("t1", CheckStatus::NotFound),
            outcome("t2", CheckStatus::NotFound),
        ],
    );
    assert_eq!(result.points_earned, 0.0);
    assert_eq!(result.status_tag, StatusTag::NotAttempted);
}

#[test]
fn proportional_scales_with_pass_fraction() {
    let result = CategoryResult::score(
        definition(4.0, ScoringPolicy::Proportional),
        vec![
            outcome("t1", CheckStatus::Passed),
            outcome("t2", CheckStatus::Passed),
            outcome("t3", CheckStatus::Failed),
            outcome("t4", CheckStatus::Errored),
        ],
    );
    assert!((result.points_earned - 2.0).abs() < 1e-9);
    assert_eq!(result.status_tag, StatusTag::PartialCredit);
}

#[test]
fn proportional_is_monotonic_in_passed_count() {
    // Holding total outcomes fixed at 5, more passes never earn less.
    let mut previous = -1.0;
    for passed in 0..=5 {
        let outcomes: Vec<CheckOutcome> = (0..5)
            .map(|i| {
                let status = if i < passed {
                    CheckStatus::Passed
                } else {
                    CheckStatus::Failed
                };
                outcome(&format!("t{i}"), status)
            })
            .collect();
        let result =
            CategoryResult::score(definition(7.0, ScoringPolicy::Proportional), outcomes);
        assert!(
            result.points_earned >= previous,
            "passed={passed} earned {} after {previous}",
            result.points_earned
        );
        previous = result.points_earned;
    }
}

#[test]
fn weighted_measurement_under_target_gets_full_credit_without_extrapolation() {
    // Scenario: target 1.0s, measured 0.5s.
    let result = CategoryResult::score(
        definition(
            3.0,
            ScoringPolicy::WeightedByMeasurement {
                target: 1.0,
                limit:  4.0,
            },
        ),
        vec![bench("bench_query", 0.5)],
    );
    assert_eq!(result.points_earned, 3.0, "clamped at 1.0, never above");
    assert_eq!(result.status_tag, StatusTag::FullCredit);
}

#[test]
fn weighted_measurement_interpolates_linearly_between_target_and_limit() {
    let result = CategoryResult::score(
        definition(
            3.0,
            ScoringPolicy::WeightedByMeasurement {
                target: 1.0,
                limit:  4.0,
            },
        ),
        vec![bench("bench_query", 2.5)],
    );
    // 2.5 sits halfway between target 1.0 and limit 4.0.
    assert!((result.points_earned - 1.5).abs() < 1e-9);
    assert_eq!(result.status_tag, StatusTag::PartialCredit);
}

#[test]
fn weighted_measurement_at_or_beyond_limit_earns_nothing() {
    let result = CategoryResult::score(
        definition(
            3.0,
            ScoringPolicy::WeightedByMeasurement {
                target: 1.0,
                limit:  4.0,
            },
        ),
        vec![bench("bench_query", 6.0)],
    );
    assert_eq!(result.points_earned, 0.0);
    assert_eq!(result.status_tag, StatusTag::ZeroCredit);
}

#[test]
fn weighted_without_any_measurement_is_missing_data_not_an_error() {
    let result = CategoryResult::score(
        definition(
            3.0,
            ScoringPolicy::WeightedByMeasurement {
                target: 1.0,
                limit:  4.0,
            },
        ),
        vec![outcome("bench_query", CheckStatus::Passed)],
    );
    assert_eq!(result.points_earned, 0.0);
    assert_eq!(result.status_tag, StatusTag::ZeroCredit);
}

#[test]
fn earned_points_stay_within_bounds_across_policies() {
    let cases = vec![
        (ScoringPolicy::AllOrNothing, vec![outcome("t1", CheckStatus::Passed)]),
        (
            ScoringPolicy::Proportional,
            vec![
                outcome("t1", CheckStatus::Passed),
                outcome("t2", CheckStatus::Failed),
            ],
        ),
        (
            ScoringPolicy::WeightedByMeasurement {
                target: 1.0,
                limit:  2.0,
            },
            vec![bench("b1", 0.0)],
        ),
        (
            ScoringPolicy::WeightedByMeasurement {
                target: 1.0,
                limit:  2.0,
            },
            vec![bench("b1", 100.0)],
        ),
    ];

    for (policy, outcomes) in cases {
        let result = CategoryResult::score(definition(5.0, policy), outcomes);
        assert!(result.points_earned >= 0.0);
        assert!(result.points_earned <= result.category.points_possible);
    }
}

#[test]
fn failing_identifiers_exclude_passes_and_not_found() {
    let result = CategoryResult::score(
        definition(4.0, ScoringPolicy::Proportional),
        vec![
            outcome("t_pass", CheckStatus::Passed),
            outcome("t_fail", CheckStatus::Failed),
            outcome("t_err", CheckStatus::Errored),
            outcome("t_gone", CheckStatus::NotFound),
        ],
    );
    assert_eq!(result.failing_identifiers(), vec!["t_fail", "t_err"]);
}

#[test]
fn all_errored_flags_import_failure_signature() {
    let errored = CategoryResult::score(
        definition(4.0, ScoringPolicy::Proportional),
        vec![
            outcome("t1", CheckStatus::Errored),
            outcome("t2", CheckStatus::Errored),
        ],
    );
    assert!(errored.all_errored());

    let mixed = CategoryResult::score(
        definition(4.0, ScoringPolicy::Proportional),
        vec![
            outcome("t1", CheckStatus::Errored),
            outcome("t2", CheckStatus::Failed),
        ],
    );
    assert!(!mixed.all_errored());
}
