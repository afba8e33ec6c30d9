#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! The grading pipeline: map, score, classify, feedback, report.
//!
//! [`grade_run`] runs the whole pipeline over already-ingested outcomes.
//! Every stage is pure; ordering of categories and feedback always follows
//! configuration declaration order, never score or completion order.

/// Maps percentages onto the configured letter grade bands
pub mod classify;
/// Derives rule-based feedback from category results
pub mod feedback;
/// Partitions check outcomes into category buckets
pub mod map;
/// Assembles and serializes the final grade report
pub mod report;
/// Reduces category outcomes into earned points
pub mod score;

use std::sync::Arc;

use chrono::{DateTime, Utc};

pub use self::{
    report::{CategoryBreakdown, GradeReport},
    score::{CategoryResult, StatusTag},
};
use crate::{
    config::{CategoryDefinition, GradingConfig},
    error::ConfigError,
    ingest::CheckOutcome,
};

/// Runs the full grading pipeline over parsed inputs.
///
/// Configuration errors (including ambiguous or unmapped outcomes, which
/// indicate a broken match-rule table) abort the run. Submission
/// deficiencies never do; an empty outcome set still yields a complete
/// report with a zero score.
pub fn grade_run(
    config: &GradingConfig,
    outcomes: Vec<CheckOutcome>,
    generated_at: DateTime<Utc>,
) -> Result<GradeReport, ConfigError> {
    config.validate()?;

    // Definitions are shared read-only across all category results.
    let definitions: Vec<Arc<CategoryDefinition>> =
        config.categories.iter().cloned().map(Arc::new).collect();

    let buckets = map::partition(&definitions, outcomes)?;

    let results: Vec<CategoryResult> = definitions
        .into_iter()
        .zip(buckets)
        .map(|(definition, bucket)| CategoryResult::score(definition, bucket))
        .collect();

    // Totals are the exact sum of unrounded per-category points; the
    // percentage is rounded exactly once, here.
    let total_points: f64 = results.iter().map(|r| r.points_earned).sum();
    let points_possible = config.total_points;
    let percentage = report::round1(if points_possible > 0.0 {
        total_points / points_possible * 100.0
    } else {
        0.0
    });

    let letter_grade = classify::letter_for(&config.grade_bands, percentage)
        .ok_or(ConfigError::UncoveredPercentage { percentage })?
        .to_string();

    let feedback =
        feedback::generate(&results, config.max_failures_listed, config.encouragement);

    let category_breakdown = results
        .iter()
        .map(CategoryBreakdown::from_result)
        .collect::<Vec<_>>();

    Ok(GradeReport::builder()
        .assignment(config.assignment.clone())
        .total_points(total_points)
        .points_possible(points_possible)
        .percentage(percentage)
        .letter_grade(letter_grade)
        .generated_at(generated_at)
        .category_breakdown(category_breakdown)
        .feedback(feedback)
        .build())
}
