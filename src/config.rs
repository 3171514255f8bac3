//! Configuration for a pipeline run.

use std::path::PathBuf;

/// National-average child poverty percentage used as the binary cutoff
pub const POVERTY_THRESHOLD: f64 = 16.3;

/// Row count of the analytic table for the reference 2022 inputs
pub const REFERENCE_ROW_COUNT: usize = 569;

/// Configuration for the pipeline
///
/// Paths are fixed per run; this is a one-shot batch transformation with no
/// CLI surface. The poverty threshold and expected row count are exposed so
/// tests can exercise the invariant machinery on synthetic inputs.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Path to the tab-separated natality extract
    pub natality_path: PathBuf,
    /// Path to the comma-separated county health rankings extract
    pub rankings_path: PathBuf,
    /// Destination for the analytic parquet artifact
    pub output_path: PathBuf,
    /// Destination for the JSON codebook and diagnostics
    pub codebook_path: PathBuf,
    /// Child-poverty percentage above which a county is flagged high-poverty
    pub poverty_threshold: f64,
    /// When set, the run fails unless the final table has exactly this many rows
    pub expected_rows: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            natality_path: PathBuf::from("data/natality_2022.txt"),
            rankings_path: PathBuf::from("data/analytic_data2022.csv"),
            output_path: PathBuf::from("output/analytic.parquet"),
            codebook_path: PathBuf::from("output/codebook.json"),
            poverty_threshold: POVERTY_THRESHOLD,
            expected_rows: Some(REFERENCE_ROW_COUNT),
        }
    }
}
