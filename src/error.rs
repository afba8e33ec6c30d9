#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Error taxonomy for the grading engine.
//!
//! Only two things can abort a run: a broken grading configuration
//! ([`ConfigError`]) and an unreadable results artifact ([`InputError`]).
//! Submission deficiencies (failing tests, missing functions, performance
//! misses) are never errors; they flow through the pipeline as data and
//! always end in a fully-formed report.

use std::path::PathBuf;

use thiserror::Error;

/// The assignment configuration itself is broken. Fatal; no report is
/// emitted, because the fault lies with the grading setup, not the student.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file at all.
    #[error("could not read grading configuration at `{path}`: {source}")]
    Read {
        /// Path that was attempted.
        path:   PathBuf,
        /// Underlying IO failure.
        source: std::io::Error,
    },

    /// The configuration file is not valid JSON for the expected schema.
    #[error("could not parse grading configuration: {0}")]
    Parse(#[source] serde_json::Error),

    /// The configuration declares no categories.
    #[error("grading configuration declares no categories")]
    NoCategories,

    /// Two categories share the same name.
    #[error("duplicate category name `{0}`")]
    DuplicateCategory(String),

    /// A category declares a negative `points_possible`.
    #[error("category `{0}` has a negative points_possible")]
    NegativePoints(String),

    /// Category point values do not add up to the declared total.
    #[error("category points sum to {actual}, but total_points declares {declared}")]
    PointsMismatch {
        /// The assignment's declared total.
        declared: f64,
        /// The actual sum over all categories.
        actual:   f64,
    },

    /// A `by-pattern` match rule fails to compile.
    #[error("category `{name}` has an invalid match pattern `{pattern}`: {source}")]
    InvalidPattern {
        /// Category carrying the bad rule.
        name:    String,
        /// The offending pattern text.
        pattern: String,
        /// Underlying pattern-compilation failure.
        source:  glob::PatternError,
    },

    /// A weighted-by-measurement policy has `limit <= target` or a negative
    /// target, which would make interpolation meaningless.
    #[error(
        "category `{name}` has invalid measurement bounds: limit {limit} must exceed target \
         {target}, and target must be non-negative"
    )]
    InvalidMeasurementBounds {
        /// Category carrying the bad policy.
        name:   String,
        /// Configured full-credit threshold.
        target: f64,
        /// Configured zero-credit bound.
        limit:  f64,
    },

    /// The grade band table is empty.
    #[error("grade band table is empty")]
    NoGradeBands,

    /// Grade band thresholds are not strictly decreasing.
    #[error("grade bands must be strictly decreasing: band `{letter}` at {min_percentage} is out of order")]
    BandsNotDecreasing {
        /// Letter of the out-of-order band.
        letter:         String,
        /// Its lower bound.
        min_percentage: f64,
    },

    /// The grade band table leaves a gap above 0%.
    #[error("grade bands must cover [0, 100]: last band `{letter}` starts at {min_percentage}, not 0")]
    BandsNotExhaustive {
        /// Letter of the lowest band.
        letter:         String,
        /// Its lower bound.
        min_percentage: f64,
    },

    /// A grade band lower bound lies outside [0, 100].
    #[error("grade band `{letter}` has min_percentage {min_percentage} outside [0, 100]")]
    BandOutOfRange {
        /// Letter of the offending band.
        letter:         String,
        /// Its lower bound.
        min_percentage: f64,
    },

    /// A check outcome matched more than one category's match rule. Scoring
    /// it would double-count, so the run is aborted instead.
    #[error("check `{identifier}` matches multiple categories: {}", .categories.join(", "))]
    AmbiguousMapping {
        /// Identifier of the multiply-matched check.
        identifier: String,
        /// Every category whose rule matched.
        categories: Vec<String>,
    },

    /// A check outcome matched no category's match rule. Dropping it would
    /// silently misattribute the score, so the run is aborted instead.
    #[error("check `{0}` matches no category")]
    UnmappedOutcome(String),

    /// A computed percentage fell outside every configured grade band.
    /// Unreachable after validation; kept so classification never defaults
    /// silently to a failing grade.
    #[error("percentage {percentage} is not covered by any grade band")]
    UncoveredPercentage {
        /// The percentage that could not be classified.
        percentage: f64,
    },
}

/// The upstream results artifact cannot be used. Fatal; no report is
/// emitted. Distinct from [`ConfigError`] so callers can tell a broken
/// assignment apart from a broken test run.
#[derive(Debug, Error)]
pub enum InputError {
    /// Failed to read the results artifact at all.
    #[error("could not read results artifact at `{path}`: {source}")]
    Read {
        /// Path that was attempted.
        path:   PathBuf,
        /// Underlying IO failure.
        source: std::io::Error,
    },

    /// The artifact exists but cannot be parsed. Note that an artifact with
    /// zero checks is valid and does not produce this error.
    #[error("malformed results artifact: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The artifact reports the same check identifier twice; outcomes must
    /// be unique within a run.
    #[error("results artifact reports check `{0}` more than once")]
    DuplicateCheck(String),
}

/// Top-level error for CLI dispatch. Carries the process exit code so the
/// binary can distinguish configuration faults from input faults.
#[derive(Debug, Error)]
pub enum RubricError {
    /// The grading configuration is broken.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The results artifact is broken.
    #[error(transparent)]
    Input(#[from] InputError),
    /// Anything else (IO while writing artifacts, etc.).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RubricError {
    /// Exit code reported by the CLI for this error class.
    pub fn exit_code(&self) -> i32 {
        match self {
            RubricError::Config(_) => 2,
            RubricError::Input(_) => 3,
            RubricError::Other(_) => 1,
        }
    }
}
