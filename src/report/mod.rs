//! Reporting on the finished analytic table
//!
//! The codebook covers per-column cardinality, missingness, and descriptive
//! summaries; the diagnostics cover the birth-rate distribution as
//! plot-ready data (histogram, log-scale box summary, normal Q-Q points,
//! and a Box-Cox profile). Rendering is a downstream concern; this module
//! only computes.

pub mod codebook;
pub mod diagnostics;

use serde::Serialize;

use crate::error::Result;
use crate::models::AnalyticRecord;

pub use codebook::{Codebook, ColumnStats, ColumnSummary, LevelCount};
pub use diagnostics::{BoxCoxProfile, DistributionDiagnostics, FiveNumber, HistogramBin, QqPoint};

/// The full report artifact persisted next to the analytic table
#[derive(Debug, Serialize)]
pub struct Report {
    /// Per-column codebook
    pub codebook: Codebook,
    /// Birth-rate distribution diagnostics
    pub diagnostics: DistributionDiagnostics,
}

impl Report {
    /// Build the report from the finished analytic table
    pub fn build(records: &[AnalyticRecord]) -> Result<Self> {
        Ok(Self {
            codebook: Codebook::build(records),
            diagnostics: DistributionDiagnostics::build(records)?,
        })
    }
}
