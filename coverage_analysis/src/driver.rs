//! Profile loading and the parse → aggregate → evaluate pipeline.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Component, Path, PathBuf};

use tracing::{debug, info};

use crate::aggregate::{aggregate, ProjectSummary};
use crate::block::Block;
use crate::error::{AnalysisError, Result};
use crate::standard::CoverageStandard;

/// Runs coverage analysis on profiles located under a fixed root directory.
#[derive(Debug, Clone)]
pub struct Analyzer {
    root: PathBuf,
}

impl Analyzer {
    /// Confine profile paths to `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Confine profile paths to the process working directory.
    pub fn from_current_dir() -> Result<Self> {
        let root = std::env::current_dir().map_err(|err| AnalysisError::io(".", err))?;
        Ok(Self::new(root))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a caller supplied relative path onto the root.
    ///
    /// Rejected with [`AnalysisError::PathTraversal`]: empty paths, absolute
    /// paths, and paths whose `..` components climb above the root. The check
    /// is lexical; symlinks are not resolved.
    pub fn resolve(&self, path: &Path) -> Result<PathBuf> {
        if path.as_os_str().is_empty() {
            return Err(AnalysisError::path_traversal(path));
        }

        let mut relative = PathBuf::new();
        for component in path.components() {
            match component {
                Component::Prefix(_) | Component::RootDir => {
                    return Err(AnalysisError::path_traversal(path));
                }
                Component::CurDir => {}
                Component::ParentDir => {
                    if !relative.pop() {
                        return Err(AnalysisError::path_traversal(path));
                    }
                }
                Component::Normal(part) => relative.push(part),
            }
        }

        Ok(self.root.join(relative))
    }

    /// Analyze the profile at `path` (relative to the root).
    pub fn run(
        &self,
        path: impl AsRef<Path>,
        standard: impl Into<CoverageStandard>,
    ) -> Result<ProjectSummary> {
        let path = path.as_ref();
        let resolved = self.resolve(path)?;
        debug!(path = %resolved.display(), "Reading cover profile");

        let lines = read_lines(&resolved).map_err(|err| AnalysisError::io(path, err))?;
        analyze_lines(lines, standard)
    }
}

/// The file is closed when this returns, before any line is parsed.
fn read_lines(path: &Path) -> io::Result<Vec<String>> {
    let file = File::open(path)?;
    BufReader::new(file).lines().collect()
}

/// Analyze profile lines that are already in memory.
///
/// The first line is the `mode:` header and is skipped without inspection.
/// Parsing stops at the first malformed line.
pub fn analyze_lines<I, S>(lines: I, standard: impl Into<CoverageStandard>) -> Result<ProjectSummary>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let blocks = lines
        .into_iter()
        .skip(1)
        .map(|line| {
            let line = line.as_ref();
            Block::parse(line.strip_suffix('\r').unwrap_or(line))
        })
        .collect::<Result<Vec<Block>>>()?;
    debug!(raw_blocks = blocks.len(), "Parsed cover profile");

    let summary = aggregate(blocks).evaluate(standard);
    info!(
        packages = summary.package_count,
        blocks = summary.block_count,
        covered = summary.covered_block_count,
        coverage = summary.coverage_percentage,
        standard = summary.coverage_standard.percent(),
        met = summary.standard_met,
        "Coverage analysis complete",
    );

    Ok(summary)
}

/// Analyze the profile at `path`, which must lie within the working directory.
pub fn run(
    path: impl AsRef<Path>,
    standard: impl Into<CoverageStandard>,
) -> Result<ProjectSummary> {
    Analyzer::from_current_dir()?.run(path, standard)
}
