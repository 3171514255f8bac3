//! Parquet persistence for the analytic table
//!
//! Parquet keeps the Arrow schema in its metadata, so the dictionary
//! encoding of the categorical columns survives a save/reload round trip.

use std::fs::{self, File};
use std::path::Path;

use arrow::compute::concat_batches;
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::error::{PipelineError, Result};

/// Write the analytic table to a parquet file
///
/// Parent directories are created as needed. Any existing file at the path
/// is replaced; a run either produces the whole artifact or nothing.
pub fn write_parquet(batch: &RecordBatch, path: &Path) -> Result<()> {
    log::info!("writing analytic table to {}", path.display());

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None)?;
    writer.write(batch)?;
    writer.close()?;

    log::info!("wrote {} rows to {}", batch.num_rows(), path.display());
    Ok(())
}

/// Read the analytic table back from a parquet file
///
/// Concatenates however many batches the file holds into one, under the
/// schema the writer recorded.
pub fn read_parquet(path: &Path) -> Result<RecordBatch> {
    let file = File::open(path).map_err(|source| PipelineError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;
    let mut batches = Vec::new();
    for batch in reader {
        batches.push(batch?);
    }

    let schema = batches.first().map(RecordBatch::schema).ok_or_else(|| {
        PipelineError::SchemaMismatch {
            stage: "parquet reload",
            detail: format!("{} holds no record batches", path.display()),
        }
    })?;
    Ok(concat_batches(&schema, batches.iter())?)
}
