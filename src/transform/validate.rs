//! Post-pipeline invariant checks
//!
//! The analytic table claims FIPS uniqueness and in-range percentages as
//! evidence of correctness, so a violation here is a loud failure rather
//! than a silently propagated anomaly.

use itertools::Itertools as _;

use crate::error::{PipelineError, Result};
use crate::models::AnalyticRecord;

/// Validate the invariants of the finished analytic table
///
/// Checks FIPS uniqueness (row count versus distinct count), percentage
/// ranges, non-negative birth rates, and, when configured, the expected row
/// count for the reference inputs.
pub fn validate_invariants(
    records: &[AnalyticRecord],
    expected_rows: Option<usize>,
) -> Result<()> {
    let distinct_fips = records.iter().map(|r| r.fips.as_str()).unique().count();
    if distinct_fips != records.len() {
        return Err(PipelineError::DataQuality(format!(
            "{} rows but only {distinct_fips} distinct FIPS codes",
            records.len()
        )));
    }

    for record in records {
        for (column, value) in [
            ("pct_single_parent", record.pct_single_parent),
            ("pct_child_uninsured", record.pct_child_uninsured),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(PipelineError::DataQuality(format!(
                    "{column} = {value} for FIPS {} is outside [0, 100]",
                    record.fips
                )));
            }
        }
        if record.birth_rate < 0.0 || record.birth_rate.is_nan() {
            return Err(PipelineError::DataQuality(format!(
                "birth_rate = {} for FIPS {} is not a non-negative number",
                record.birth_rate, record.fips
            )));
        }
    }

    if let Some(expected) = expected_rows {
        if records.len() != expected {
            return Err(PipelineError::DataQuality(format!(
                "expected {expected} rows in the analytic table, found {}",
                records.len()
            )));
        }
    }

    log::info!(
        "validated analytic table: {} rows, {} columns",
        records.len(),
        AnalyticRecord::COLUMNS.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PovertyFlag, Urbanicity};

    fn record(fips: &str) -> AnalyticRecord {
        AnalyticRecord {
            fips: fips.to_string(),
            county: "Alpha".to_string(),
            state: "AL".to_string(),
            birth_rate: 10.0,
            mother_age: 29.0,
            birth_weight: 3200.0,
            bmi: 26.0,
            birth_interval: 30.0,
            pct_single_parent: 25.0,
            prenatal_visits: 11.0,
            urbanicity: Urbanicity::Medium,
            hi_chld_pov: PovertyFlag::No,
            child_mortality: 50.0,
            pct_child_uninsured: 5.0,
        }
    }

    #[test]
    fn unique_complete_records_pass() {
        let records = vec![record("01001"), record("01003")];
        assert!(validate_invariants(&records, Some(2)).is_ok());
    }

    #[test]
    fn duplicate_fips_is_rejected() {
        let records = vec![record("01001"), record("01001")];
        let err = validate_invariants(&records, None).unwrap_err();
        assert!(matches!(err, PipelineError::DataQuality(_)));
    }

    #[test]
    fn out_of_range_percentage_is_rejected() {
        let mut bad = record("01001");
        bad.pct_single_parent = 101.0;
        let err = validate_invariants(&[bad], None).unwrap_err();
        assert!(matches!(err, PipelineError::DataQuality(_)));
    }

    #[test]
    fn unexpected_row_count_is_rejected() {
        let records = vec![record("01001")];
        let err = validate_invariants(&records, Some(569)).unwrap_err();
        assert!(matches!(err, PipelineError::DataQuality(_)));
    }
}
