#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Report assembly and emission.
//!
//! The [`GradeReport`] is the engine's sole externally visible artifact.
//! It is serialized once to canonical JSON (struct field order gives the
//! stable key order), and the human-readable summary is rendered strictly
//! from the same value, never recomputed, so the two can never disagree.
//! A handful of scalars are exposed as `key=value` lines for CI.

use std::{fs::OpenOptions, io::Write, path::Path};

use anyhow::{Context, Result};
use bon::Builder;
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Panel, Style, Width, object::Rows},
};

use super::score::{CategoryResult, StatusTag};

/// Rounds to one decimal place. All percentage rounding in the engine
/// happens through this single function, exactly once per value.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// One category's line in the structured report.
#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
#[builder(on(String, into))]
pub struct CategoryBreakdown {
    /// Category name, from the definition.
    pub name:       String,
    /// Points earned.
    pub earned:     f64,
    /// Points possible.
    pub possible:   f64,
    /// Earned over possible, rounded to one decimal.
    pub percentage: f64,
    /// Credit classification.
    pub status:     StatusTag,
}

impl CategoryBreakdown {
    /// Projects a scored category result into its report line.
    pub fn from_result(result: &CategoryResult) -> Self {
        Self {
            name:       result.category.name.clone(),
            earned:     result.points_earned,
            possible:   result.category.points_possible,
            percentage: result.percentage(),
            status:     result.status_tag,
        }
    }
}

/// The final aggregate for one grading run. Constructed exactly once per
/// invocation and never updated in place; a re-run produces a new report.
#[derive(Debug, Clone, Serialize, Deserialize, Builder)]
#[builder(on(String, into))]
pub struct GradeReport {
    /// Assignment title, from the configuration.
    pub assignment:         String,
    /// Exact sum of per-category earned points.
    pub total_points:       f64,
    /// The assignment's declared point total.
    pub points_possible:    f64,
    /// Total over possible, rounded once to one decimal.
    pub percentage:         f64,
    /// Letter classification of the percentage.
    pub letter_grade:       String,
    /// When this report was generated. Excluded from idempotence
    /// comparisons; byte-identical inputs otherwise produce byte-identical
    /// reports.
    pub generated_at:       DateTime<Utc>,
    /// Per-category results, in configuration declaration order.
    pub category_breakdown: Vec<CategoryBreakdown>,
    /// Feedback lines, ordered by category then run-level advice.
    pub feedback:           Vec<String>,
}

impl GradeReport {
    /// Serializes the report to its canonical JSON form. Key order follows
    /// struct declaration order and is stable across runs, so reports on
    /// identical inputs diff cleanly.
    pub fn to_canonical_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize grade report")
    }

    /// Renders the human-readable Markdown summary. Strictly a formatting
    /// of this report's fields; nothing is rescored here.
    pub fn render_summary(&self) -> String {
        let mut lines = vec![
            "# Grade Summary".to_string(),
            String::new(),
            format!("**Assignment:** {}", self.assignment),
            format!(
                "**Score:** {:.2}/{:.2} ({:.1}%)",
                self.total_points, self.points_possible, self.percentage
            ),
            format!("**Grade:** {}", self.letter_grade),
            String::new(),
            "## Categories".to_string(),
            String::new(),
        ];

        for entry in &self.category_breakdown {
            lines.push(format!(
                "- {} `{}`: {:.2}/{:.2} ({})",
                entry.status.marker(),
                entry.name,
                entry.earned,
                entry.possible,
                entry.status.label()
            ));
        }

        if !self.feedback.is_empty() {
            lines.push(String::new());
            lines.push("## Feedback".to_string());
            lines.push(String::new());
            for line in &self.feedback {
                lines.push(format!("- {line}"));
            }
        }

        lines.push(String::new());
        lines.push(format!("_Generated at {}_", self.generated_at.to_rfc3339()));
        lines.push(String::new());
        lines.join("\n")
    }

    /// The named scalars exposed to a calling CI pipeline.
    pub fn ci_outputs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("total_points", format!("{:.2}", self.total_points)),
            ("points_possible", format!("{:.2}", self.points_possible)),
            ("percentage", format!("{:.1}", self.percentage)),
            ("letter_grade", self.letter_grade.clone()),
        ]
    }

    /// Appends the CI scalars as `key=value` lines to `path`, the
    /// GITHUB_OUTPUT convention.
    pub fn write_ci_outputs(&self, path: &Path) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .with_context(|| format!("Could not open CI output file {}", path.display()))?;
        for (key, value) in self.ci_outputs() {
            writeln!(file, "{key}={value}")
                .with_context(|| format!("Could not write CI output {key}"))?;
        }
        Ok(())
    }

    /// Prints the grading overview table to stderr.
    pub fn show_table(&self) {
        /// Row shape for the terminal grading overview.
        #[derive(Tabled)]
        struct OverviewRow {
            /// Category name.
            #[tabled(rename = "Category")]
            category: String,
            /// Earned/possible points.
            #[tabled(rename = "Score")]
            score:    String,
            /// Credit classification label.
            #[tabled(rename = "Status")]
            status:   String,
        }

        let rows: Vec<OverviewRow> = self
            .category_breakdown
            .iter()
            .map(|entry| OverviewRow {
                category: entry.name.clone(),
                score:    format!("{:.2}/{:.2}", entry.earned, entry.possible),
                status:   colored_label(entry.status),
            })
            .collect();

        eprintln!(
            "{}",
            Table::new(&rows)
                .with(Panel::header("Grading Overview"))
                .with(Panel::footer(format!(
                    "Total: {:.2}/{:.2} ({:.1}%) Grade: {}",
                    self.total_points, self.points_possible, self.percentage, self.letter_grade
                )))
                .with(Modify::new(Rows::new(1..)).with(Width::wrap(36).keep_words(true)))
                .with(
                    Modify::new(Rows::first())
                        .with(Alignment::center())
                        .with(Alignment::center_vertical()),
                )
                .with(
                    Modify::new(Rows::last())
                        .with(Alignment::center())
                        .with(Alignment::center_vertical()),
                )
                .with(Style::modern())
        );
    }
}

/// Colors a status label for terminal display.
fn colored_label(status: StatusTag) -> String {
    match status {
        StatusTag::FullCredit => status.label().green().to_string(),
        StatusTag::PartialCredit => status.label().yellow().to_string(),
        StatusTag::ZeroCredit => status.label().red().to_string(),
        StatusTag::NotAttempted => status.label().dimmed().to_string(),
    }
}
