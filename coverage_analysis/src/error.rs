use std::{fmt, io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("cover profile path must stay within the working directory: {path:?}")]
    PathTraversal { path: PathBuf },
    #[error("error reading coverage file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed profile line {line:?}: {reason}")]
    MalformedLine { line: String, reason: String },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

impl AnalysisError {
    pub fn path_traversal(path: impl Into<PathBuf>) -> Self {
        Self::PathTraversal { path: path.into() }
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(line: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::MalformedLine {
            line: line.into(),
            reason: reason.to_string(),
        }
    }
}
