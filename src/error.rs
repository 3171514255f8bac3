//! Error handling for the natality preparation pipeline.
//!
//! Every failure is terminal for a run: no stage recovers from another
//! stage's failure and there is no partial output. Errors carry enough
//! context to name the offending stage and record.

use std::path::PathBuf;

/// Specialized error type for pipeline failures
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// An input source could not be opened or read
    #[error("source unavailable: {path}: {source}")]
    SourceUnavailable {
        /// Path of the unreachable source
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// A source did not match its declared schema
    #[error("schema mismatch in {stage}: {detail}")]
    SchemaMismatch {
        /// Pipeline stage that detected the mismatch
        stage: &'static str,
        /// Description of the mismatch
        detail: String,
    },

    /// A field could not be coerced to its declared type
    #[error("parse failure in column {column} for record {key}: {value:?}")]
    ParseFailure {
        /// Column whose value failed to parse
        column: &'static str,
        /// Identifier of the offending record
        key: String,
        /// The raw value that could not be coerced
        value: String,
    },

    /// A data-quality invariant check failed
    #[error("data quality violation: {0}")]
    DataQuality(String),

    /// Error reading delimited text data
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Arrow error
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Parquet error
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;
