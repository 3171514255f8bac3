//! Cleaning of the two raw tables
//!
//! Natality: sentinel conversion, completeness filtering, pseudo-county
//! removal, and the "County, State" split. Health rankings: removal of
//! state/nation aggregate rows and unranked counties.

use crate::error::{PipelineError, Result};
use crate::models::{NatalityRecord, RankingRecord, RawHealthRankingRecord, RawNatalityRecord};

/// Sentinel text the natality source uses for suppressed birth rates
pub const NOT_AVAILABLE: &str = "Not Available";

/// Pseudo-county row representing births not attributed to a county
pub const UNIDENTIFIED_COUNTIES: &str = "Unidentified Counties, CT";

/// The fifty US state names plus the national aggregate label, as they
/// appear in the county column of aggregate rows
pub const AGGREGATE_LABELS: [&str; 51] = [
    "Alabama",
    "Alaska",
    "Arizona",
    "Arkansas",
    "California",
    "Colorado",
    "Connecticut",
    "Delaware",
    "Florida",
    "Georgia",
    "Hawaii",
    "Idaho",
    "Illinois",
    "Indiana",
    "Iowa",
    "Kansas",
    "Kentucky",
    "Louisiana",
    "Maine",
    "Maryland",
    "Massachusetts",
    "Michigan",
    "Minnesota",
    "Mississippi",
    "Missouri",
    "Montana",
    "Nebraska",
    "Nevada",
    "New Hampshire",
    "New Jersey",
    "New Mexico",
    "New York",
    "North Carolina",
    "North Dakota",
    "Ohio",
    "Oklahoma",
    "Oregon",
    "Pennsylvania",
    "Rhode Island",
    "South Carolina",
    "South Dakota",
    "Tennessee",
    "Texas",
    "Utah",
    "Vermont",
    "Virginia",
    "Washington",
    "West Virginia",
    "Wisconsin",
    "Wyoming",
    "United States",
];

/// Clean the raw natality table
///
/// Order matters: the "Not Available" sentinel in the birth rate column is
/// converted to a missing value before the completeness filter runs, so
/// suppressed counties are removed by the same rule as any other incomplete
/// row. The notes column is discarded by omission. A location field without
/// the ", " separator is a data-quality assertion failure, not a
/// recoverable branch.
pub fn clean_natality(raw: Vec<RawNatalityRecord>) -> Result<Vec<NatalityRecord>> {
    let total = raw.len();
    let mut cleaned = Vec::with_capacity(total);

    for record in raw {
        let Some(location) = record.county_of_residence else {
            continue;
        };
        if location == UNIDENTIFIED_COUNTIES {
            continue;
        }

        // Sentinel-to-missing conversion, then the completeness filter.
        let birth_rate = record.birth_rate.filter(|v| v != NOT_AVAILABLE);
        let (Some(birth_rate), Some(mother_age), Some(birth_weight), Some(bmi)) =
            (birth_rate, record.mother_age, record.birth_weight, record.bmi)
        else {
            continue;
        };
        let (Some(prenatal_visits), Some(birth_interval)) =
            (record.prenatal_visits, record.birth_interval)
        else {
            continue;
        };

        let Some((county, state)) = location.split_once(", ") else {
            return Err(PipelineError::DataQuality(format!(
                "natality location {location:?} does not split into county and state"
            )));
        };

        cleaned.push(NatalityRecord {
            county: county.to_string(),
            state: state.to_string(),
            birth_rate,
            mother_age,
            birth_weight,
            bmi,
            prenatal_visits,
            birth_interval,
        });
    }

    log::info!(
        "cleaned natality table: {} of {} rows retained",
        cleaned.len(),
        total
    );
    Ok(cleaned)
}

/// Clean the raw health rankings table
///
/// Drops state/nation aggregate rows (county field holds a state name or
/// "United States"), rows whose ranked flag is not exactly 1, and rows
/// missing any identifier. Measure values stay optional; the post-join
/// completeness rule handles those.
pub fn clean_rankings(raw: Vec<RawHealthRankingRecord>) -> Vec<RankingRecord> {
    let total = raw.len();
    let mut cleaned = Vec::with_capacity(total);

    for record in raw {
        let (Some(fips), Some(county), Some(state)) = (record.fips, record.county, record.state)
        else {
            continue;
        };
        if AGGREGATE_LABELS.contains(&county.as_str()) {
            continue;
        }
        if record.county_ranked != Some(1) {
            continue;
        }

        cleaned.push(RankingRecord {
            fips,
            county,
            state,
            child_poverty: record.child_poverty,
            single_parent: record.single_parent,
            child_mortality: record.child_mortality,
            child_uninsured: record.child_uninsured,
            pct_rural: record.pct_rural,
        });
    }

    log::info!(
        "cleaned health rankings table: {} of {} rows retained",
        cleaned.len(),
        total
    );
    cleaned
}
