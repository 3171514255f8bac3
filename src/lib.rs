//! A data-preparation pipeline that merges a county natality extract with a
//! county health rankings extract into one per-county analytic table, with
//! derived categorical outcomes, a codebook, distribution diagnostics, and
//! parquet persistence.

pub mod config;
pub mod conversion;
pub mod error;
pub mod loader;
pub mod models;
pub mod persist;
pub mod pipeline;
pub mod report;
pub mod schema;
pub mod transform;

// Re-export the most common types for easier use
// Core types
pub use config::PipelineConfig;
pub use error::{PipelineError, Result};
pub use models::{AnalyticRecord, PovertyFlag, Urbanicity};
pub use pipeline::{PipelineOutput, prepare, run};
pub use schema::analytic_schema;

// Arrow types
pub use arrow::datatypes::Schema as ArrowSchema;
pub use arrow::record_batch::RecordBatch;
