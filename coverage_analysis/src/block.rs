//! Coverage profile line parser
//!
//! Each non-header profile line describes one code block:
//!
//! ```text
//! github.com/example/pkg/file.go:10.20,15.30 2 1
//! ^ identity (file:startLine.startCol,endLine.endCol)  ^ statements ^ calls
//! ```

use std::str::FromStr;

use crate::error::{AnalysisError, Result};

/// A single block entry read from a coverage profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    /// The unmodified profile line this block was read from.
    pub raw_line: String,
    /// File path plus coordinate range; identifies the block across occurrences.
    pub identity: String,
    /// Directory portion of `file_name`.
    pub package_name: String,
    /// File path portion of `identity`.
    pub file_name: String,
    /// Number of statements in the block.
    pub statement_count: u64,
    /// Number of times the block executed.
    pub call_count: u64,
}

impl Block {
    /// Parse one profile line (the mode header must already be skipped).
    pub fn parse(line: &str) -> Result<Self> {
        let tokens: Vec<&str> = line.split(' ').collect();
        let &[identity, statements, calls] = tokens.as_slice() else {
            return Err(AnalysisError::malformed(
                line,
                format!("expected 3 space separated fields, found {}", tokens.len()),
            ));
        };

        let Some((file_name, _range)) = identity.split_once(':') else {
            return Err(AnalysisError::malformed(
                line,
                "block identity has no coordinate range",
            ));
        };

        let statement_count = parse_count(line, statements, "statement count")?;
        let call_count = parse_count(line, calls, "call count")?;

        Ok(Block {
            raw_line: line.to_string(),
            identity: identity.to_string(),
            package_name: package_of(file_name),
            file_name: file_name.to_string(),
            statement_count,
            call_count,
        })
    }

    pub fn is_covered(&self) -> bool {
        self.call_count > 0
    }
}

impl FromStr for Block {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        Block::parse(s)
    }
}

fn parse_count(line: &str, token: &str, what: &str) -> Result<u64> {
    token
        .parse::<u64>()
        .map_err(|err| AnalysisError::malformed(line, format!("invalid {what} {token:?}: {err}")))
}

/// Directory part of a slash separated file path, lexically cleaned:
/// repeated separators collapse, `.` elements drop and `..` pops a parent.
/// An empty result is `.`; a rooted one is at least `/`.
fn package_of(file_name: &str) -> String {
    let dir = match file_name.rfind('/') {
        Some(idx) => &file_name[..=idx],
        None => "",
    };
    let rooted = dir.starts_with('/');

    let mut parts: Vec<&str> = Vec::new();
    for part in dir.split('/') {
        match part {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if rooted => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    match (rooted, parts.is_empty()) {
        (true, _) => format!("/{}", parts.join("/")),
        (false, true) => ".".to_string(),
        (false, false) => parts.join("/"),
    }
}
