//! Loader for the comma-separated county health rankings extract

use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{PipelineError, Result};
use crate::models::RawHealthRankingRecord;

use super::{check_header, open_source};

/// Load the health rankings extract into raw records
///
/// The first line of the extract is a human-readable measure-name banner,
/// not part of the header; it is consumed before the CSV reader sees the
/// real header line.
pub fn load_rankings(path: &Path) -> Result<Vec<RawHealthRankingRecord>> {
    log::info!("loading health rankings extract from {}", path.display());

    let file = open_source(path)?;
    let mut buffered = BufReader::new(file);

    let mut banner = String::new();
    let banner_len = buffered.read_line(&mut banner)?;
    if banner_len == 0 {
        return Err(PipelineError::SchemaMismatch {
            stage: "rankings loader",
            detail: "source is empty, expected banner and header lines".to_string(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(buffered);

    check_header(
        "rankings loader",
        reader.headers()?,
        &RawHealthRankingRecord::REQUIRED_COLUMNS,
    )?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let record: RawHealthRankingRecord = row?;
        records.push(record);
    }

    log::info!("loaded {} health rankings rows", records.len());
    Ok(records)
}
