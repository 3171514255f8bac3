//! Inner join of the cleaned natality and health rankings tables

use std::collections::HashMap;

use crate::models::{MergedRecord, NatalityRecord, RankingRecord};

/// Inner-join the two cleaned tables on (county, state code)
///
/// Only counties present in both tables survive, and the post-join
/// completeness rule drops any pair whose ranking measures are missing.
/// Duplicate ranking keys keep the last occurrence and log a warning;
/// ranked county rows are expected to be unique per (county, state).
pub fn merge_records(
    natality: Vec<NatalityRecord>,
    rankings: Vec<RankingRecord>,
) -> Vec<MergedRecord> {
    let natality_rows = natality.len();
    let ranking_rows = rankings.len();

    let mut by_key: HashMap<(String, String), RankingRecord> =
        HashMap::with_capacity(ranking_rows);
    for record in rankings {
        let key = (record.county.clone(), record.state.clone());
        if let Some(previous) = by_key.insert(key, record) {
            log::warn!(
                "duplicate ranking row for {}, {}; keeping the later one",
                previous.county,
                previous.state
            );
        }
    }

    let mut merged = Vec::with_capacity(natality_rows);
    for record in natality {
        let key = (record.county.clone(), record.state.clone());
        let Some(ranking) = by_key.get(&key) else {
            continue;
        };

        // Post-join completeness: every retained column must be present.
        let (Some(child_poverty), Some(single_parent), Some(child_mortality)) = (
            ranking.child_poverty,
            ranking.single_parent,
            ranking.child_mortality,
        ) else {
            continue;
        };
        let (Some(child_uninsured), Some(pct_rural)) =
            (ranking.child_uninsured, ranking.pct_rural)
        else {
            continue;
        };

        merged.push(MergedRecord {
            fips: ranking.fips.clone(),
            county: record.county,
            state: record.state,
            birth_rate: record.birth_rate,
            mother_age: record.mother_age,
            birth_weight: record.birth_weight,
            bmi: record.bmi,
            prenatal_visits: record.prenatal_visits,
            birth_interval: record.birth_interval,
            child_poverty,
            single_parent,
            child_mortality,
            child_uninsured,
            pct_rural,
        });
    }

    log::info!(
        "merged tables: {} rows from {} natality x {} ranking",
        merged.len(),
        natality_rows,
        ranking_rows
    );
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn natality(county: &str, state: &str) -> NatalityRecord {
        NatalityRecord {
            county: county.to_string(),
            state: state.to_string(),
            birth_rate: "10".to_string(),
            mother_age: 29.0,
            birth_weight: 3200.0,
            bmi: 26.0,
            prenatal_visits: 11.0,
            birth_interval: 30.0,
        }
    }

    fn ranking(county: &str, state: &str) -> RankingRecord {
        RankingRecord {
            fips: "00001".to_string(),
            county: county.to_string(),
            state: state.to_string(),
            child_poverty: Some(0.1),
            single_parent: Some(0.2),
            child_mortality: Some(50.0),
            child_uninsured: Some(0.06),
            pct_rural: Some(0.35),
        }
    }

    #[test]
    fn matching_keys_join_into_one_row() {
        let merged = merge_records(vec![natality("Alpha", "AL")], vec![ranking("Alpha", "AL")]);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].fips, "00001");
        assert_eq!(merged[0].birth_rate, "10");
        assert!((merged[0].child_poverty - 0.1).abs() < 1e-12);
    }

    #[test]
    fn unmatched_keys_are_dropped_from_both_sides() {
        let merged = merge_records(
            vec![natality("Alpha", "AL"), natality("Beta", "AL")],
            vec![ranking("Alpha", "AL"), ranking("Gamma", "GA")],
        );
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].county, "Alpha");
    }

    #[test]
    fn same_county_name_in_another_state_does_not_join() {
        let merged = merge_records(vec![natality("Alpha", "AL")], vec![ranking("Alpha", "AK")]);
        assert!(merged.is_empty());
    }

    #[test]
    fn rows_with_missing_measures_are_dropped_after_the_join() {
        let mut incomplete = ranking("Alpha", "AL");
        incomplete.pct_rural = None;
        let merged = merge_records(vec![natality("Alpha", "AL")], vec![incomplete]);
        assert!(merged.is_empty());
    }
}
