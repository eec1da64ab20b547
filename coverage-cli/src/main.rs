//! Go Coverage Analysis Command Line Interface
//!
//! Condenses a coverage profile so that each code block is represented a
//! single time, which matters when tests ran with cross-package
//! instrumentation. Coverage statistics are then compiled per package and
//! across the whole codebase.
//!
//! # Commands
//!
//! - `go-coverage-analysis run` - Conduct codebase coverage analysis

mod output;
mod run;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

/// Go Coverage Analysis
///
/// Deduplicating coverage profile analyzer with a minimum coverage gate.
#[derive(Parser)]
#[command(name = "go-coverage-analysis")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Conduct codebase coverage analysis
    ///
    /// Examples:
    ///   go-coverage-analysis run
    ///   go-coverage-analysis run --coverprofile reports/coverage.out --standard 80
    ///   go-coverage-analysis run -c coverage.out -s 60 --format json
    Run(run::RunArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Process exit status for a coverage verdict: `0` when the standard is met.
fn verdict_status(standard_met: bool) -> u8 {
    if standard_met {
        0
    } else {
        1
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run(args) => {
            // The report is already on stdout; only the exit status carries the verdict.
            let standard_met = run::run(args.into())?;
            Ok(ExitCode::from(verdict_status(standard_met)))
        }
    }
}
