//! Coverage summary report types and loading.
//!
//! Reports are the `coverage-summary.json` shape produced by istanbul-style
//! tooling: a `total` object carrying one `{pct, covered, total}` triple per
//! metric. Per-file entries alongside `total` are ignored. Reports are read
//! fresh from disk on every run and never cached.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Coverage counts for a single metric.
///
/// `pct` is taken verbatim from the report and never recomputed from the
/// counts; the tools that produce these files apply their own rounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricCoverage {
    pub pct: f64,
    pub covered: u64,
    pub total: u64,
}

/// The four-metric coverage summary published in a comment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageSummary {
    pub statements: MetricCoverage,
    pub branches: MetricCoverage,
    pub functions: MetricCoverage,
    pub lines: MetricCoverage,
}

impl CoverageSummary {
    /// Returns the metrics in publication order, paired with their labels.
    pub fn metrics(&self) -> [(&'static str, MetricCoverage); 4] {
        [
            ("Statements", self.statements),
            ("Branches", self.branches),
            ("Functions", self.functions),
            ("Lines", self.lines),
        ]
    }
}

/// The on-disk report shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageReport {
    pub total: CoverageSummary,
}

/// Errors that can occur when loading a coverage report.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to read coverage report {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in coverage report {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// A metric claims more covered units than exist.
    #[error("coverage report {path}: {metric} covered count {covered} exceeds total {total}")]
    CoveredExceedsTotal {
        path: PathBuf,
        metric: &'static str,
        covered: u64,
        total: u64,
    },
}

/// Reads and validates one coverage report from disk.
pub fn load_report(path: &Path) -> Result<CoverageReport, ReportError> {
    let data = std::fs::read_to_string(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let report: CoverageReport =
        serde_json::from_str(&data).map_err(|source| ReportError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    for (metric, counts) in report.total.metrics() {
        if counts.covered > counts.total {
            return Err(ReportError::CoveredExceedsTotal {
                path: path.to_path_buf(),
                metric,
                covered: counts.covered,
                total: counts.total,
            });
        }
    }

    Ok(report)
}
