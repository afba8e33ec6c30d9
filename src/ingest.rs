#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Result ingestion.
//!
//! Parses the upstream test runner's results artifact into a normalized
//! sequence of [`CheckOutcome`]s. This stage makes no scoring decisions; it
//! only guarantees downstream stages a complete, consistent snapshot. A
//! check the configuration expected but the runner never reported becomes
//! an explicit `not_found` outcome, never silence, because "no tests found"
//! feedback depends on that being observable.

use std::{collections::HashSet, fs, path::Path};

use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Execution status reported for a single check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    /// The check ran and its assertion held.
    Passed,
    /// The check ran and its assertion failed.
    Failed,
    /// The check could not run to completion (import error, crash).
    Errored,
    /// The check was expected but never discovered by the runner.
    NotFound,
}

/// The grading dimension a check exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// Functional correctness assertions.
    Correctness,
    /// Benchmark timings and other performance probes.
    Performance,
    /// Static-analysis and lint findings.
    CodeQuality,
    /// Coverage measurements.
    Coverage,
}

/// One atomic, independently-pass/fail-able fact about the submission.
///
/// Created once by ingestion and immutable thereafter; the mapper moves
/// each outcome into exactly one category bucket.
#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
#[builder(on(String, into))]
pub struct CheckOutcome {
    /// Unique identifier within a run, e.g. a fully-qualified test name.
    #[serde(rename = "id")]
    pub identifier:  String,
    /// How the check concluded.
    pub status:      CheckStatus,
    /// Which grading dimension the check belongs to.
    #[builder(default = CheckKind::Correctness)]
    pub kind:        CheckKind,
    /// Optional numeric payload (elapsed seconds, coverage percentage,
    /// violation count) consumed by kind-specific scoring rules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measurement: Option<f64>,
}

/// Wire shape of the results artifact.
#[derive(Debug, Serialize, Deserialize)]
struct RawResults {
    /// Every check the runner reported, in runner order.
    checks: Vec<CheckOutcome>,
}

/// Parses the raw results artifact text.
///
/// Zero checks is a valid (if sad) result set; only an unparseable artifact
/// or a duplicated check identifier is an input error.
pub fn parse_results(raw: &str) -> Result<Vec<CheckOutcome>, InputError> {
    let results: RawResults = serde_json::from_str(raw).map_err(InputError::Malformed)?;

    let mut seen = HashSet::new();
    for check in &results.checks {
        if !seen.insert(check.identifier.as_str()) {
            return Err(InputError::DuplicateCheck(check.identifier.clone()));
        }
    }

    Ok(results.checks)
}

/// Appends an explicit `not_found` outcome for every expected check the
/// runner never reported. Synthesized outcomes carry no measurement and
/// default to the correctness kind; mapping works off the identifier alone.
pub fn fill_missing(mut outcomes: Vec<CheckOutcome>, expected: &[String]) -> Vec<CheckOutcome> {
    let reported: HashSet<&str> = outcomes.iter().map(|o| o.identifier.as_str()).collect();

    let missing: Vec<CheckOutcome> = expected
        .iter()
        .filter(|id| !reported.contains(id.as_str()))
        .map(|id| {
            CheckOutcome::builder()
                .identifier(id.clone())
                .status(CheckStatus::NotFound)
                .build()
        })
        .collect();

    outcomes.extend(missing);
    outcomes
}

/// Reads, parses, and completes the results artifact at `path` against the
/// configuration's expected identifiers.
pub fn load_results(path: &Path, expected: &[String]) -> Result<Vec<CheckOutcome>, InputError> {
    let raw = fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let outcomes = parse_results(&raw)?;
    Ok(fill_missing(outcomes, expected))
}
