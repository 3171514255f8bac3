//! Loader for the tab-separated natality extract

use std::path::Path;

use crate::error::Result;
use crate::models::RawNatalityRecord;

use super::{check_header, open_source};

/// Load the natality extract into raw records
///
/// The extract is tab-separated with a regular header line. Rows with an
/// inconsistent field count (WONDER footnote trailers, truncated downloads)
/// surface as a fatal CSV error rather than being skipped.
pub fn load_natality(path: &Path) -> Result<Vec<RawNatalityRecord>> {
    log::info!("loading natality extract from {}", path.display());

    let file = open_source(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_reader(file);

    check_header(
        "natality loader",
        reader.headers()?,
        &RawNatalityRecord::REQUIRED_COLUMNS,
    )?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: RawNatalityRecord = row?;
        records.push(record);
    }

    log::info!("loaded {} natality rows", records.len());
    Ok(records)
}
