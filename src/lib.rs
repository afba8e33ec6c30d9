//! # rubric
//!
//! A grading engine that turns raw test-execution results for a student
//! submission into a deterministic weighted score, a letter grade, and
//! structured feedback.
//!
//! The pipeline is a single synchronous pass: ingest the results artifact,
//! map each check outcome onto a grading category, score every category,
//! classify the percentage into a letter grade, generate feedback, and emit
//! a structured report plus a rendered summary. Each stage builds a new
//! immutable value from the previous stage's output.

#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Assignment grading configuration: categories, policies, grade bands
pub mod config;
/// Typed error taxonomy separating broken configuration from broken input
pub mod error;
/// For all things related to grading
pub mod grade;
/// Normalizes raw test-run artifacts into check outcomes
pub mod ingest;
