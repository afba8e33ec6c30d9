#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Letter grade classification.
//!
//! A pure lookup over the configured, validated grade band table. Bands
//! use closed lower bounds and are ordered highest first, so the first
//! band whose bound the percentage meets wins.

use crate::config::GradeBand;

/// Returns the letter for `percentage`, or `None` if no band covers it.
/// With a validated table (strictly decreasing, last bound 0) every
/// non-negative percentage is covered; callers surface `None` as a
/// configuration error rather than defaulting to a failing grade.
pub fn letter_for(bands: &[GradeBand], percentage: f64) -> Option<&str> {
    bands
        .iter()
        .find(|band| percentage >= band.min_percentage)
        .map(|band| band.letter.as_str())
}
