//! Coverage profile analysis
//!
//! Reads a block coverage profile, merges blocks reported more than once,
//! summarizes coverage per package and for the whole project, and checks the
//! project percentage against a minimum standard.
//!
//! ```no_run
//! let summary = coverage_analysis::run("coverage.out", 75.0)?;
//! if !summary.standard_met {
//!     eprintln!("coverage {:.2}% is below the standard", summary.coverage_percentage);
//! }
//! # Ok::<(), coverage_analysis::AnalysisError>(())
//! ```

pub mod aggregate;
pub mod block;
pub mod driver;
pub mod error;
pub mod math;
pub mod standard;

pub use aggregate::{aggregate, merge_blocks, PackageSummary, ProjectSummary};
pub use block::Block;
pub use driver::{analyze_lines, run, Analyzer};
pub use error::{AnalysisError, Result};
pub use standard::CoverageStandard;
