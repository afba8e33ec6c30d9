#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Per-category scoring.
//!
//! Each category is reduced independently from its own outcome bucket, so
//! there is no shared accumulator and no order dependence; the final total
//! is a single explicit sum over the per-category results. Missing data is
//! the expected common case and never an error: it scores zero and is
//! tagged, not thrown.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    config::{CategoryDefinition, POINTS_EPSILON, ScoringPolicy},
    ingest::{CheckOutcome, CheckStatus},
};

/// Credit classification for a scored category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusTag {
    /// Every point was earned.
    FullCredit,
    /// Some, but not all, points were earned.
    PartialCredit,
    /// Outcomes exist but earned nothing.
    ZeroCredit,
    /// No effective outcomes exist for this category. Distinguished from
    /// [`StatusTag::ZeroCredit`] because the feedback differs.
    NotAttempted,
}

impl StatusTag {
    /// Status marker used in rendered summaries.
    pub fn marker(&self) -> &'static str {
        match self {
            StatusTag::FullCredit => "\u{2705}",
            StatusTag::PartialCredit => "\u{1f7e1}",
            StatusTag::ZeroCredit => "\u{274c}",
            StatusTag::NotAttempted => "\u{26aa}",
        }
    }

    /// Human label used in rendered summaries and tables.
    pub fn label(&self) -> &'static str {
        match self {
            StatusTag::FullCredit => "full credit",
            StatusTag::PartialCredit => "partial credit",
            StatusTag::ZeroCredit => "zero credit",
            StatusTag::NotAttempted => "not attempted",
        }
    }
}

/// The scored outcome of one grading category. Computed once, never
/// mutated.
#[derive(Debug, Clone)]
pub struct CategoryResult {
    /// The definition this result was scored against, shared read-only
    /// with the configuration.
    pub category:      Arc<CategoryDefinition>,
    /// The outcomes mapped to this category; possibly empty.
    pub outcomes:      Vec<CheckOutcome>,
    /// Points earned, always within `[0, points_possible]`.
    pub points_earned: f64,
    /// Credit classification, used to pick feedback.
    pub status_tag:    StatusTag,
}

impl CategoryResult {
    /// Scores one category bucket according to its policy.
    pub fn score(category: Arc<CategoryDefinition>, outcomes: Vec<CheckOutcome>) -> Self {
        let effective: Vec<&CheckOutcome> = outcomes
            .iter()
            .filter(|o| o.status != CheckStatus::NotFound)
            .collect();

        let (points_earned, status_tag) = if effective.is_empty() {
            (0.0, StatusTag::NotAttempted)
        } else {
            let earned = match &category.policy {
                ScoringPolicy::AllOrNothing => {
                    if effective.iter().all(|o| o.status == CheckStatus::Passed) {
                        category.points_possible
                    } else {
                        0.0
                    }
                }
                ScoringPolicy::Proportional => {
                    let passed = effective
                        .iter()
                        .filter(|o| o.status == CheckStatus::Passed)
                        .count();
                    category.points_possible * passed as f64 / effective.len() as f64
                }
                ScoringPolicy::WeightedByMeasurement { target, limit } => {
                    let measurements: Vec<f64> =
                        effective.iter().filter_map(|o| o.measurement).collect();
                    if measurements.is_empty() {
                        0.0
                    } else {
                        let mean =
                            measurements.iter().sum::<f64>() / measurements.len() as f64;
                        category.points_possible * measurement_factor(mean, *target, *limit)
                    }
                }
            };

            let earned = earned.clamp(0.0, category.points_possible);
            let tag = if (earned - category.points_possible).abs() < POINTS_EPSILON {
                StatusTag::FullCredit
            } else if earned < POINTS_EPSILON {
                StatusTag::ZeroCredit
            } else {
                StatusTag::PartialCredit
            };
            (earned, tag)
        };

        Self {
            category,
            outcomes,
            points_earned,
            status_tag,
        }
    }

    /// This category's earned points as a percentage of its possible
    /// points, rounded to one decimal.
    pub fn percentage(&self) -> f64 {
        if self.category.points_possible > 0.0 {
            super::report::round1(self.points_earned / self.category.points_possible * 100.0)
        } else {
            0.0
        }
    }

    /// Identifiers of outcomes that ran but did not pass, in bucket order.
    pub fn failing_identifiers(&self) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| !matches!(o.status, CheckStatus::Passed | CheckStatus::NotFound))
            .map(|o| o.identifier.as_str())
            .collect()
    }

    /// True if every effective outcome errored rather than merely failing,
    /// the signature of an import-time or syntax problem.
    pub fn all_errored(&self) -> bool {
        let effective: Vec<&CheckOutcome> = self
            .outcomes
            .iter()
            .filter(|o| o.status != CheckStatus::NotFound)
            .collect();
        !effective.is_empty() && effective.iter().all(|o| o.status == CheckStatus::Errored)
    }
}

/// Linear credit factor for a measured value: full credit at or below
/// `target`, none at or beyond `limit`, linear in between. Clamped so a
/// measurement better than the target is never extrapolated above 1.0.
fn measurement_factor(measured: f64, target: f64, limit: f64) -> f64 {
    if measured <= target {
        1.0
    } else if measured >= limit {
        0.0
    } else {
        ((limit - measured) / (limit - target)).clamp(0.0, 1.0)
    }
}
