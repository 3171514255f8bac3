//! Source loaders for the two raw extracts
//!
//! Each source has a loader that knows its delimiter, its header quirks,
//! and its raw record type. Loading is a single blocking attempt with no
//! retry: an unreachable source or a schema mismatch aborts the run.

pub mod natality;
pub mod rankings;

use std::fs::File;
use std::path::Path;

use crate::error::{PipelineError, Result};

pub use natality::load_natality;
pub use rankings::load_rankings;

/// Open a source file, mapping failure to a `SourceUnavailable` error
pub(crate) fn open_source(path: &Path) -> Result<File> {
    File::open(path).map_err(|source| PipelineError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })
}

/// Check that every required column is present in a source header
///
/// Extra columns are allowed; serde ignores them during deserialization.
/// A missing column is fatal and names the stage and the column.
pub(crate) fn check_header(
    stage: &'static str,
    headers: &csv::StringRecord,
    required: &[&str],
) -> Result<()> {
    let missing: Vec<&str> = required
        .iter()
        .filter(|name| !headers.iter().any(|h| h == **name))
        .copied()
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(PipelineError::SchemaMismatch {
            stage,
            detail: format!("missing expected columns: {}", missing.join(", ")),
        })
    }
}
