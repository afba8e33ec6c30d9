#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Rule-based feedback generation.
//!
//! Feedback is generated, never free text: for each category, in
//! declaration order, a fixed precedence of rules is evaluated top to
//! bottom and the first match wins, so a category emits at most one
//! primary message and never contradicts itself. Run-level advice is
//! derived afterwards from the final category results.

use itertools::Itertools;

use super::score::{CategoryResult, StatusTag};

/// Message emitted when a category has no effective outcomes at all.
pub const NO_TESTS_FOUND: &str =
    "No tests found for this function. Ensure function is properly implemented and named.";

/// Run-level message emitted when some categories earned nothing while
/// others earned points.
pub const FOCUS_ON_ZEROES: &str = "Focus on functions with 0 points first.";

/// Generates the ordered feedback list for a run.
///
/// `max_failures_listed` caps how many failing identifiers a
/// partial-credit message names; `encouragement` opts full-credit
/// categories into a congratulatory line.
pub fn generate(
    results: &[CategoryResult],
    max_failures_listed: usize,
    encouragement: bool,
) -> Vec<String> {
    let mut feedback: Vec<String> = results
        .iter()
        .filter_map(|result| primary_message(result, max_failures_listed, encouragement))
        .collect();

    // Prioritization advice only helps when there is something to
    // prioritize: at least one zero-point category next to at least one
    // category that earned points.
    let any_zero = results.iter().any(|r| {
        matches!(r.status_tag, StatusTag::ZeroCredit | StatusTag::NotAttempted)
    });
    let any_earned = results.iter().any(|r| r.points_earned > 0.0);
    if any_zero && any_earned {
        feedback.push(FOCUS_ON_ZEROES.to_string());
    }

    feedback
}

/// Picks the single primary message for one category, first matching rule
/// wins.
fn primary_message(
    result: &CategoryResult,
    max_failures_listed: usize,
    encouragement: bool,
) -> Option<String> {
    let name = &result.category.name;
    match result.status_tag {
        StatusTag::NotAttempted => Some(NO_TESTS_FOUND.to_string()),
        StatusTag::ZeroCredit => {
            if result.all_errored() {
                Some(format!(
                    "`{name}`: all checks errored; likely a syntax or import error. Fix the \
                     file so it imports cleanly, then re-run."
                ))
            } else {
                Some(format!(
                    "`{name}`: all checks failed. Review the requirements for this function \
                     and try again."
                ))
            }
        }
        StatusTag::PartialCredit => {
            let failing = result.failing_identifiers();
            if failing.is_empty() {
                // Partial credit without a failing check means a measured
                // value fell short of its target.
                return Some(format!(
                    "`{name}`: measured result missed the configured target. Optimize and \
                     re-run this category's checks."
                ));
            }
            let shown = failing.iter().take(max_failures_listed).join(", ");
            let overflow = failing.len().saturating_sub(max_failures_listed);
            let suffix = if overflow > 0 {
                format!(" and {overflow} more")
            } else {
                String::new()
            };
            Some(format!(
                "`{name}`: failing checks: {shown}{suffix}. Re-run this category's checks in \
                 isolation to iterate quickly."
            ))
        }
        StatusTag::FullCredit => {
            encouragement.then(|| format!("`{name}`: all checks passed. Nice work!"))
        }
    }
}
