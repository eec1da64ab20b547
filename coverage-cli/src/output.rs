//! Output formatters for coverage summaries
//!
//! Supports text and JSON output formats.

use coverage_analysis::ProjectSummary;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format '{}'. Use 'text' or 'json'", s)),
        }
    }
}

/// Format a project summary
pub fn format_summary(summary: &ProjectSummary, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_summary_text(summary),
        OutputFormat::Json => format_summary_json(summary),
    }
}

fn format_summary_text(summary: &ProjectSummary) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<48} {:>8} {:>8} {:>9}\n",
        "PACKAGE", "BLOCKS", "COVERED", "COVERAGE"
    ));
    output.push_str(&format!("{}\n", "-".repeat(76)));

    for package in &summary.package_summaries {
        output.push_str(&format!(
            "{:<48} {:>8} {:>8} {:>8.2}%\n",
            package.package_name,
            package.block_count,
            package.covered_block_count,
            package.coverage_percentage
        ));
    }

    if summary.package_summaries.is_empty() {
        output.push_str("(no blocks)\n");
    }

    output.push_str("\nProject Summary\n");
    output.push_str(&format!("Packages: {}\n", summary.package_count));
    output.push_str(&format!(
        "Blocks:   {} ({} covered, {} not covered)\n",
        summary.block_count, summary.covered_block_count, summary.uncovered_block_count
    ));
    output.push_str(&format!("Coverage: {:.2}%\n", summary.coverage_percentage));

    output.push_str("\nChecking coverage against standard...\n");
    output.push_str(&format!("Actual:   {:.2}\n", summary.coverage_percentage));
    output.push_str(&format!("Standard: {}\n", summary.coverage_standard));

    if summary.standard_met {
        output.push_str("\nCoverage standard met!\n");
    } else {
        output.push_str("\nCoverage percentage doesn't meet standard.\n");
    }

    output
}

fn format_summary_json(summary: &ProjectSummary) -> String {
    serde_json::to_string_pretty(summary).unwrap_or_else(|_| "{}".to_string())
}
