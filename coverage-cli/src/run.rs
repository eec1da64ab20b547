//! The `run` command: analyze a cover profile and check it against the standard.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use coverage_analysis::{CoverageStandard, ProjectSummary};
use tracing::debug;

use crate::output::{self, OutputFormat};

/// Arguments for `run`
#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// The name of the coverage profile file to analyze
    #[arg(
        short = 'c',
        long,
        value_name = "PATH",
        env = "COVERAGE_PROFILE",
        default_value = "coverage.out"
    )]
    pub coverprofile: PathBuf,

    /// Minimum coverage percentage required (exit with error if not met)
    #[arg(
        short,
        long,
        value_name = "PERCENT",
        env = "COVERAGE_STANDARD",
        default_value = "75",
        value_parser = parse_standard
    )]
    pub standard: f64,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Debug, Clone)]
pub struct RunConfig {
    pub coverprofile: PathBuf,
    pub standard: CoverageStandard,
    pub format: OutputFormat,
}

impl From<RunArgs> for RunConfig {
    fn from(value: RunArgs) -> Self {
        Self {
            coverprofile: value.coverprofile,
            standard: CoverageStandard::new(value.standard),
            format: value.format,
        }
    }
}

fn parse_standard(value: &str) -> Result<f64, String> {
    let percent: f64 = value
        .parse()
        .map_err(|_| format!("'{}' is not a number", value))?;
    if !(0.0..=100.0).contains(&percent) {
        return Err(format!("{} is outside 0-100", percent));
    }
    Ok(percent)
}

/// Analyze the configured profile and print the report.
///
/// Returns whether the coverage standard was met.
// LCOV_EXCL_START - Reads the working directory, covered by the analysis crate tests
pub fn run(config: RunConfig) -> Result<bool> {
    debug!(
        coverprofile = %config.coverprofile.display(),
        standard = config.standard.percent(),
        "Running coverage analysis",
    );

    if config.format == OutputFormat::Text {
        println!("\nChecking coverage...\n");
    }

    let summary: ProjectSummary = coverage_analysis::run(&config.coverprofile, config.standard)
        .with_context(|| {
            format!(
                "failed to analyze cover profile {}",
                config.coverprofile.display()
            )
        })?;

    println!("{}", output::format_summary(&summary, config.format));
    Ok(summary.standard_met)
}
// LCOV_EXCL_STOP
