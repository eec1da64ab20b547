//! Minimum coverage threshold

use std::fmt;

use serde::Serialize;

use crate::aggregate::ProjectSummary;

/// Minimum acceptable project coverage, in percent.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
#[serde(transparent)]
pub struct CoverageStandard(f64);

impl CoverageStandard {
    pub const fn new(percent: f64) -> Self {
        Self(percent)
    }

    pub const fn percent(self) -> f64 {
        self.0
    }

    /// Inclusive: a percentage equal to the standard meets it.
    pub fn is_met_by(self, coverage_percentage: f64) -> bool {
        coverage_percentage >= self.0
    }
}

impl From<f64> for CoverageStandard {
    fn from(percent: f64) -> Self {
        Self(percent)
    }
}

impl fmt::Display for CoverageStandard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl ProjectSummary {
    /// Record `standard` on the summary and whether the project meets it.
    pub fn evaluate(mut self, standard: impl Into<CoverageStandard>) -> Self {
        let standard = standard.into();
        self.coverage_standard = standard;
        self.standard_met = standard.is_met_by(self.coverage_percentage);
        self
    }
}
