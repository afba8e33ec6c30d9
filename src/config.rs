#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Declarative grading configuration.
//!
//! An assignment is described by a list of [`CategoryDefinition`]s (what to
//! grade and how), a grade band table (percentage to letter), and a declared
//! point total. The configuration is read-only at run time and validated
//! eagerly at load: a configuration that does not add up aborts the run
//! before any scoring happens.

use std::{fmt, fs, path::Path};

use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tolerance used when comparing point values for equality.
pub const POINTS_EPSILON: f64 = 1e-9;

/// Selects which check outcomes belong to a category.
///
/// Rules are declarative so that ambiguity and gaps can be caught up front
/// instead of discovered as misattributed points at run time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    /// An explicit set of check identifiers.
    Identifiers(Vec<String>),
    /// A glob-style pattern over check identifiers, e.g. `bench_*`.
    Pattern(String),
}

impl MatchRule {
    /// Returns true if the given check identifier is selected by this rule.
    ///
    /// Pattern rules are validated at configuration load, so a pattern that
    /// fails to compile here simply matches nothing.
    pub fn matches(&self, identifier: &str) -> bool {
        match self {
            MatchRule::Identifiers(ids) => ids.iter().any(|id| id == identifier),
            MatchRule::Pattern(pattern) => Pattern::new(pattern)
                .map(|p| p.matches(identifier))
                .unwrap_or(false),
        }
    }
}

impl fmt::Display for MatchRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchRule::Identifiers(ids) => write!(f, "{} identifier(s)", ids.len()),
            MatchRule::Pattern(pattern) => write!(f, "pattern `{pattern}`"),
        }
    }
}

/// The rule converting a category's outcomes into earned points.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringPolicy {
    /// Full points if every outcome passed, otherwise zero.
    AllOrNothing,
    /// Points scale with the fraction of outcomes that passed.
    Proportional,
    /// Points scale with a measured value (elapsed time, violation count)
    /// compared against a configured target, interpolating linearly down to
    /// zero at the configured limit.
    WeightedByMeasurement {
        /// Measurements at or below this value earn full credit.
        target: f64,
        /// Measurements at or beyond this value earn no credit.
        limit:  f64,
    },
}

impl fmt::Display for ScoringPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringPolicy::AllOrNothing => write!(f, "all-or-nothing"),
            ScoringPolicy::Proportional => write!(f, "proportional"),
            ScoringPolicy::WeightedByMeasurement { target, limit } => {
                write!(f, "weighted (target {target}, limit {limit})")
            }
        }
    }
}

/// One named, independently-scored unit of the assignment, typically a
/// required function or a quality dimension.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDefinition {
    /// Human label, e.g. `load_spatial_dataset`.
    pub name:            String,
    /// Maximum points this category can contribute.
    pub points_possible: f64,
    /// Which check outcomes belong here.
    pub match_rule:      MatchRule,
    /// How matched outcomes turn into points.
    pub policy:          ScoringPolicy,
}

/// One row of the letter grade threshold table: a closed lower bound on the
/// percentage and the letter awarded at or above it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeBand {
    /// The awarded letter, e.g. `A`.
    pub letter:         String,
    /// Closed lower bound on the percentage for this letter.
    pub min_percentage: f64,
}

/// Default cap on failing identifiers listed in partial-credit feedback.
fn default_max_failures_listed() -> usize {
    5
}

/// The full grading configuration for one assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradingConfig {
    /// Assignment title, used in report headings.
    pub assignment:          String,
    /// Declared point total; category points must sum to exactly this.
    pub total_points:        f64,
    /// Graded categories, in declaration order. Report ordering follows
    /// this order, never score order.
    pub categories:          Vec<CategoryDefinition>,
    /// Ordered letter grade threshold table, highest band first.
    pub grade_bands:         Vec<GradeBand>,
    /// Cap on failing identifiers listed per category in feedback.
    #[serde(default = "default_max_failures_listed")]
    pub max_failures_listed: usize,
    /// Whether full-credit categories get an encouragement message.
    #[serde(default)]
    pub encouragement:       bool,
}

impl GradingConfig {
    /// Reads and validates a grading configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Parses and validates a grading configuration from JSON text.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: GradingConfig = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration, failing fast on anything that would
    /// corrupt a score: mismatched point totals, malformed patterns,
    /// nonsensical measurement bounds, or a broken grade band table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.categories.is_empty() {
            return Err(ConfigError::NoCategories);
        }

        let mut seen = std::collections::HashSet::new();
        for category in &self.categories {
            if !seen.insert(category.name.as_str()) {
                return Err(ConfigError::DuplicateCategory(category.name.clone()));
            }
            if category.points_possible < 0.0 {
                return Err(ConfigError::NegativePoints(category.name.clone()));
            }
            if let MatchRule::Pattern(pattern) = &category.match_rule
                && let Err(source) = Pattern::new(pattern)
            {
                return Err(ConfigError::InvalidPattern {
                    name: category.name.clone(),
                    pattern: pattern.clone(),
                    source,
                });
            }
            if let ScoringPolicy::WeightedByMeasurement { target, limit } = category.policy
                && (target < 0.0 || limit <= target)
            {
                return Err(ConfigError::InvalidMeasurementBounds {
                    name: category.name.clone(),
                    target,
                    limit,
                });
            }
        }

        let actual: f64 = self.categories.iter().map(|c| c.points_possible).sum();
        if (actual - self.total_points).abs() > POINTS_EPSILON {
            return Err(ConfigError::PointsMismatch {
                declared: self.total_points,
                actual,
            });
        }

        self.validate_bands()
    }

    /// Validates the grade band table: strictly decreasing closed lower
    /// bounds, all within [0, 100], and exhaustive down to 0 so no
    /// percentage silently falls through.
    fn validate_bands(&self) -> Result<(), ConfigError> {
        let Some(last) = self.grade_bands.last() else {
            return Err(ConfigError::NoGradeBands);
        };

        let mut previous: Option<f64> = None;
        for band in &self.grade_bands {
            if !(0.0..=100.0).contains(&band.min_percentage) {
                return Err(ConfigError::BandOutOfRange {
                    letter:         band.letter.clone(),
                    min_percentage: band.min_percentage,
                });
            }
            if let Some(prev) = previous
                && band.min_percentage >= prev
            {
                return Err(ConfigError::BandsNotDecreasing {
                    letter:         band.letter.clone(),
                    min_percentage: band.min_percentage,
                });
            }
            previous = Some(band.min_percentage);
        }

        if last.min_percentage != 0.0 {
            return Err(ConfigError::BandsNotExhaustive {
                letter:         last.letter.clone(),
                min_percentage: last.min_percentage,
            });
        }

        Ok(())
    }

    /// Every check identifier the configuration explicitly expects, in
    /// declaration order. Checks in this list that never ran are surfaced
    /// as explicit `not_found` outcomes by the ingestor, never as silence.
    /// Pattern rules cannot be enumerated and contribute nothing here.
    pub fn expected_identifiers(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut expected = Vec::new();
        for category in &self.categories {
            if let MatchRule::Identifiers(ids) = &category.match_rule {
                for id in ids {
                    if seen.insert(id.as_str()) {
                        expected.push(id.clone());
                    }
                }
            }
        }
        expected
    }
}
