#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Category mapping.
//!
//! Partitions the ingested outcome sequence into one bucket per category,
//! in declaration order. Every outcome must land in exactly one bucket: a
//! zero-match or multi-match outcome is a configuration fault and aborts
//! the run, because silently dropping or double-counting a check would
//! corrupt the score. Categories that match nothing keep an empty bucket
//! so the report always lists every graded category.

use std::sync::Arc;

use crate::{config::CategoryDefinition, error::ConfigError, ingest::CheckOutcome};

/// Moves each outcome into the bucket of the single category whose match
/// rule selects it. Returned buckets are positionally aligned with
/// `categories`.
pub fn partition(
    categories: &[Arc<CategoryDefinition>],
    outcomes: Vec<CheckOutcome>,
) -> Result<Vec<Vec<CheckOutcome>>, ConfigError> {
    let mut buckets: Vec<Vec<CheckOutcome>> = categories.iter().map(|_| Vec::new()).collect();

    for outcome in outcomes {
        let matches: Vec<usize> = categories
            .iter()
            .enumerate()
            .filter(|(_, category)| category.match_rule.matches(&outcome.identifier))
            .map(|(index, _)| index)
            .collect();

        match matches.as_slice() {
            [] => return Err(ConfigError::UnmappedOutcome(outcome.identifier)),
            [index] => buckets[*index].push(outcome),
            many => {
                return Err(ConfigError::AmbiguousMapping {
                    identifier: outcome.identifier,
                    categories: many
                        .iter()
                        .map(|&index| categories[index].name.clone())
                        .collect(),
                });
            }
        }
    }

    Ok(buckets)
}
