//! Derivation of the final analytic record
//!
//! Rescales the four fraction measures to percentages, derives the binary
//! poverty flag and the urbanicity ordinal through the shared bucketizer,
//! coerces the remaining textual fields to their canonical types, and emits
//! records in the final column layout. The source poverty and rural
//! percentages are consumed here and do not appear in the output.

use crate::error::{PipelineError, Result};
use crate::models::{AnalyticRecord, MergedRecord, PovertyFlag, Urbanicity};

use super::bucket::Bins;

/// Break table for the urbanicity ordinal over percent rural
///
/// The lower bound sits below zero so a rural share of exactly 0 lands in
/// the first interval instead of falling out of range.
#[must_use]
pub fn urbanicity_bins() -> Bins<Urbanicity> {
    Bins::new(
        vec![-1.0, 10.0, 20.0, 30.0, 100.0],
        Urbanicity::LEVELS.to_vec(),
    )
}

/// Break table for the binary poverty flag over child poverty percentage
///
/// A value exactly at the threshold falls in the closed upper end of the
/// first interval and is flagged `No`.
#[must_use]
pub fn poverty_bins(threshold: f64) -> Bins<PovertyFlag> {
    Bins::new(vec![-1.0, threshold, 100.0], PovertyFlag::LEVELS.to_vec())
}

/// Rescale a fraction in [0, 1] to a percentage in [0, 100]
#[must_use]
pub fn rescale_fraction(fraction: f64) -> f64 {
    fraction * 100.0
}

/// Normalize a FIPS code to its fixed five-digit width
///
/// Source extracts drop leading zeros on codes below 10000; padding
/// restores the canonical identifier without touching full-width codes.
#[must_use]
pub fn pad_fips(raw: &str) -> String {
    format!("{raw:0>5}")
}

/// Derive the analytic table from the merged records
///
/// Fails with a `ParseFailure` if a birth rate does not parse (the sentinel
/// removal upstream should have left only numeric text) and with a
/// `DataQuality` error if a rescaled percentage falls outside its partition.
pub fn derive_analytic(
    merged: Vec<MergedRecord>,
    poverty_threshold: f64,
) -> Result<Vec<AnalyticRecord>> {
    let poverty = poverty_bins(poverty_threshold);
    let urbanicity = urbanicity_bins();

    let mut records = Vec::with_capacity(merged.len());
    for row in merged {
        let birth_rate: f64 = row.birth_rate.trim().parse().map_err(|_| {
            PipelineError::ParseFailure {
                column: "birth_rate",
                key: format!("{}, {}", row.county, row.state),
                value: row.birth_rate.clone(),
            }
        })?;

        let pct_poverty = rescale_fraction(row.child_poverty);
        let pct_rural = rescale_fraction(row.pct_rural);

        let hi_chld_pov = poverty.classify(pct_poverty).ok_or_else(|| {
            PipelineError::DataQuality(format!(
                "child poverty percentage {pct_poverty} for {}, {} is outside (0, 100]",
                row.county, row.state
            ))
        })?;
        let urbanicity_level = urbanicity.classify(pct_rural).ok_or_else(|| {
            PipelineError::DataQuality(format!(
                "rural percentage {pct_rural} for {}, {} is outside (-1, 100]",
                row.county, row.state
            ))
        })?;

        records.push(AnalyticRecord {
            fips: pad_fips(&row.fips),
            county: row.county,
            state: row.state,
            birth_rate,
            mother_age: row.mother_age,
            birth_weight: row.birth_weight,
            bmi: row.bmi,
            birth_interval: row.birth_interval,
            pct_single_parent: rescale_fraction(row.single_parent),
            prenatal_visits: row.prenatal_visits,
            urbanicity: urbanicity_level,
            hi_chld_pov,
            child_mortality: row.child_mortality,
            pct_child_uninsured: rescale_fraction(row.child_uninsured),
        });
    }

    log::info!("derived {} analytic records", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn merged(birth_rate: &str) -> MergedRecord {
        MergedRecord {
            fips: "1001".to_string(),
            county: "Autauga County".to_string(),
            state: "AL".to_string(),
            birth_rate: birth_rate.to_string(),
            mother_age: 28.6,
            birth_weight: 3210.0,
            bmi: 27.0,
            prenatal_visits: 10.8,
            birth_interval: 31.5,
            child_poverty: 0.163,
            single_parent: 0.245,
            child_mortality: 62.0,
            child_uninsured: 0.048,
            pct_rural: 0.42,
        }
    }

    #[test]
    fn rescale_maps_fractions_to_percentages() {
        assert!((rescale_fraction(0.163) - 16.3).abs() < 1e-9);
        assert!((rescale_fraction(0.0) - 0.0).abs() < 1e-12);
        assert!((rescale_fraction(1.0) - 100.0).abs() < 1e-12);
    }

    #[test]
    fn fips_codes_are_zero_padded_to_five_digits() {
        assert_eq!(pad_fips("1001"), "01001");
        assert_eq!(pad_fips("53033"), "53033");
    }

    #[test]
    fn poverty_boundary_is_classified_no() {
        let bins = poverty_bins(16.3);
        assert_eq!(bins.classify(16.3), Some(PovertyFlag::No));
        assert_eq!(bins.classify(16.29999), Some(PovertyFlag::No));
        assert_eq!(bins.classify(16.30001), Some(PovertyFlag::Yes));
    }

    #[test]
    fn urbanicity_partition_is_total_over_the_percent_domain() {
        let bins = urbanicity_bins();
        let mut pct = 0.0;
        while pct <= 100.0 {
            assert!(bins.classify(pct).is_some(), "no level for {pct}");
            pct += 0.25;
        }
        assert_eq!(bins.classify(0.0), Some(Urbanicity::VeryHigh));
        assert_eq!(bins.classify(10.0), Some(Urbanicity::VeryHigh));
        assert_eq!(bins.classify(20.0), Some(Urbanicity::High));
        assert_eq!(bins.classify(30.0), Some(Urbanicity::Medium));
        assert_eq!(bins.classify(100.0), Some(Urbanicity::Low));
    }

    #[test]
    fn derivation_builds_the_final_layout() {
        let records = derive_analytic(vec![merged("11.2")], 16.3).unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.fips, "01001");
        assert!((record.birth_rate - 11.2).abs() < 1e-12);
        assert!((record.pct_single_parent - 24.5).abs() < 1e-9);
        assert!((record.pct_child_uninsured - 4.8).abs() < 1e-9);
        assert_eq!(record.urbanicity, Urbanicity::Low);
        // 0.163 rescales to a hair under 16.3, squarely in the No interval.
        assert_eq!(record.hi_chld_pov, PovertyFlag::No);
    }

    #[test]
    fn unparseable_birth_rate_is_a_parse_failure() {
        let err = derive_analytic(vec![merged("Suppressed")], 16.3).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::ParseFailure { column: "birth_rate", .. }
        ));
    }
}
