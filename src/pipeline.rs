//! End-to-end pipeline orchestration
//!
//! `prepare` runs the in-memory stages (load, clean, merge, derive,
//! validate) and is what the integration tests exercise; `run` adds the
//! reporting and persistence tail. Stages are pure functions chained in a
//! fixed order; each failure is terminal.

use std::fs::{self, File};
use std::io::BufWriter;

use crate::config::PipelineConfig;
use crate::conversion::to_record_batch;
use crate::error::Result;
use crate::loader::{load_natality, load_rankings};
use crate::models::AnalyticRecord;
use crate::persist::write_parquet;
use crate::report::{Codebook, Report};
use crate::transform::{
    clean_natality, clean_rankings, derive_analytic, merge_records, validate_invariants,
};

/// Everything a run produces, before persistence
#[derive(Debug)]
pub struct PipelineOutput {
    /// The finished analytic table
    pub records: Vec<AnalyticRecord>,
    /// The codebook and distribution diagnostics
    pub report: Report,
}

/// Run the in-memory pipeline: load through invariant validation
pub fn prepare(config: &PipelineConfig) -> Result<Vec<AnalyticRecord>> {
    let raw_natality = load_natality(&config.natality_path)?;
    let raw_rankings = load_rankings(&config.rankings_path)?;

    let natality = clean_natality(raw_natality)?;
    let rankings = clean_rankings(raw_rankings);

    let merged = merge_records(natality, rankings);
    let records = derive_analytic(merged, config.poverty_threshold)?;

    validate_invariants(&records, config.expected_rows)?;
    Ok(records)
}

/// Run the full pipeline and persist the artifacts
///
/// Writes the analytic table as parquet and the report as JSON, then logs
/// the codebook so a run leaves a human-readable trace.
pub fn run(config: &PipelineConfig) -> Result<PipelineOutput> {
    let records = prepare(config)?;

    let report = Report::build(&records)?;
    let batch = to_record_batch(&records)?;
    write_parquet(&batch, &config.output_path)?;
    write_report(&report, config)?;

    log_codebook(&report.codebook);
    Ok(PipelineOutput { records, report })
}

fn write_report(report: &Report, config: &PipelineConfig) -> Result<()> {
    if let Some(parent) = config.codebook_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(&config.codebook_path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), report)
        .map_err(std::io::Error::other)?;
    log::info!("wrote report to {}", config.codebook_path.display());
    Ok(())
}

fn log_codebook(codebook: &Codebook) {
    for line in codebook.to_string().lines() {
        log::info!("{line}");
    }
}
