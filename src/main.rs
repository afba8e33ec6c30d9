#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # rubric
//!
//! Command-line front end for the grading engine. A single invocation
//! reads a test-run results artifact and a grading configuration, runs the
//! pipeline, and writes the structured report, the Markdown summary, and
//! optional CI outputs.
//!
//! Exit codes: 0 whenever a report was emitted (even for a zero score),
//! 2 for configuration errors, 3 for input errors, 1 otherwise.

use std::{fs, path::PathBuf};

use anyhow::Context;
use bpaf::*;
use chrono::Utc;
use colored::Colorize;
use dotenvy::dotenv;
use rubric::{config::GradingConfig, error::RubricError, grade, ingest};
use tracing::{Level, info, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// Grade a submission from a results artifact.
    Grade {
        /// Path to the test-run results artifact.
        results:   PathBuf,
        /// Path to the grading configuration.
        config:    PathBuf,
        /// Where to write the structured JSON report.
        output:    PathBuf,
        /// Where to write the Markdown summary.
        summary:   PathBuf,
        /// Where to append CI `key=value` outputs, if anywhere.
        ci_output: Option<PathBuf>,
        /// Suppress the terminal overview table.
        no_table:  bool,
    },
    /// Validate a grading configuration without grading anything.
    CheckConfig {
        /// Path to the grading configuration.
        config: PathBuf,
    },
}

/// Parse the command line arguments and return a `Cmd` enum
fn options() -> Cmd {
    /// parses the results artifact path
    fn results() -> impl Parser<PathBuf> {
        long("results")
            .short('r')
            .help("Path to the test-run results artifact (JSON)")
            .argument("PATH")
    }

    /// parses the grading configuration path
    fn config() -> impl Parser<PathBuf> {
        long("config")
            .short('c')
            .help("Path to the grading configuration (JSON)")
            .argument("PATH")
    }

    /// parses the structured report output path
    fn output() -> impl Parser<PathBuf> {
        long("output")
            .short('o')
            .help("Where to write the structured JSON report")
            .argument("PATH")
            .fallback(PathBuf::from("grade-report.json"))
    }

    /// parses the Markdown summary output path
    fn summary() -> impl Parser<PathBuf> {
        long("summary")
            .short('s')
            .help("Where to write the Markdown grade summary")
            .argument("PATH")
            .fallback(PathBuf::from("grade-summary.md"))
    }

    /// parses the optional CI output path
    fn ci_output() -> impl Parser<Option<PathBuf>> {
        long("ci-output")
            .help("Append key=value outputs here (defaults to $GITHUB_OUTPUT when set)")
            .argument("PATH")
            .optional()
    }

    /// parses the table-suppression switch
    fn no_table() -> impl Parser<bool> {
        long("no-table")
            .help("Do not print the grading overview table")
            .switch()
    }

    let grade = construct!(Cmd::Grade {
        results(),
        config(),
        output(),
        summary(),
        ci_output(),
        no_table(),
    })
    .to_options()
    .command("grade")
    .help("Grade a submission from a test-run results artifact");

    let check_config = construct!(Cmd::CheckConfig { config() })
        .to_options()
        .command("check-config")
        .help("Validate a grading configuration and print its categories");

    let cmd = construct!([grade, check_config]);

    cmd.to_options()
        .descr("Turns test results into scores, letter grades, and feedback")
        .run()
}

/// Runs the grade command end to end.
fn run_grade(
    results: PathBuf,
    config: PathBuf,
    output: PathBuf,
    summary: PathBuf,
    ci_output: Option<PathBuf>,
    no_table: bool,
) -> Result<(), RubricError> {
    let config = GradingConfig::load(&config)?;
    let expected = config.expected_identifiers();
    let outcomes = ingest::load_results(&results, &expected)?;

    let report = grade::grade_run(&config, outcomes, Utc::now())?;

    fs::write(&output, report.to_canonical_json()?)
        .with_context(|| format!("Could not write report to {}", output.display()))?;
    info!(path = %output.display(), "wrote structured report");

    fs::write(&summary, report.render_summary())
        .with_context(|| format!("Could not write summary to {}", summary.display()))?;
    info!(path = %summary.display(), "wrote grade summary");

    let ci_path = ci_output.or_else(|| std::env::var_os("GITHUB_OUTPUT").map(PathBuf::from));
    if let Some(path) = ci_path {
        report.write_ci_outputs(&path)?;
        info!(path = %path.display(), "wrote CI outputs");
    }

    if !no_table {
        report.show_table();
    }

    Ok(())
}

/// Runs the check-config command.
fn run_check_config(config: PathBuf) -> Result<(), RubricError> {
    let config = GradingConfig::load(&config)?;

    println!("{}: {:.2} points", config.assignment, config.total_points);
    for category in &config.categories {
        println!(
            "  {:.2}  {}  [{}] via {}",
            category.points_possible, category.name, category.policy, category.match_rule
        );
    }
    println!("{}", "Configuration is valid.".green());

    Ok(())
}

fn main() {
    dotenv().ok();

    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false);
    let filter_layer = LevelFilter::from_level(Level::INFO);
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    let cmd = options();

    let outcome = match cmd {
        Cmd::Grade {
            results,
            config,
            output,
            summary,
            ci_output,
            no_table,
        } => run_grade(results, config, output, summary, ci_output, no_table),
        Cmd::CheckConfig { config } => run_check_config(config),
    };

    if let Err(e) = outcome {
        eprintln!("{} {e:#}", "error:".red());
        std::process::exit(e.exit_code());
    }
}
