//! Per-column codebook for the analytic table

use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools as _;
use serde::Serialize;

use crate::models::{AnalyticRecord, PovertyFlag, Urbanicity};

/// Count of one categorical level
#[derive(Debug, Clone, Serialize)]
pub struct LevelCount {
    /// Level label
    pub level: String,
    /// Number of rows at this level
    pub count: usize,
}

/// Descriptive statistics for one column
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ColumnStats {
    /// Median and range of a continuous column
    Continuous {
        /// Sample median
        median: f64,
        /// Smallest observed value
        min: f64,
        /// Largest observed value
        max: f64,
    },
    /// Level counts of a categorical column, in level order
    Categorical {
        /// Per-level row counts
        levels: Vec<LevelCount>,
    },
    /// Free-text identifier column, summarized by cardinality alone
    Identifier,
}

/// Cardinality, missingness, and descriptive summary for one column
#[derive(Debug, Clone, Serialize)]
pub struct ColumnSummary {
    /// Canonical column name
    pub name: &'static str,
    /// Count of non-missing values
    pub non_missing: usize,
    /// Count of distinct values
    pub distinct: usize,
    /// Count of missing values; zero for every column of a finished table
    pub missing: usize,
    /// Descriptive statistics
    pub stats: ColumnStats,
}

/// The codebook: one summary per column of the analytic table
#[derive(Debug, Clone, Serialize)]
pub struct Codebook {
    /// Row count of the table
    pub rows: usize,
    /// Per-column summaries in canonical column order
    pub columns: Vec<ColumnSummary>,
}

impl Codebook {
    /// Build the codebook from the finished analytic table
    ///
    /// The typed record makes missingness structurally impossible, so every
    /// `missing` count is zero; the column is kept because downstream
    /// consumers read it as evidence of completeness.
    #[must_use]
    pub fn build(records: &[AnalyticRecord]) -> Self {
        let rows = records.len();

        let columns = vec![
            identifier_summary("fips", records.iter().map(|r| r.fips.as_str())),
            identifier_summary("county", records.iter().map(|r| r.county.as_str())),
            observed_categorical_summary("state", records.iter().map(|r| r.state.as_str())),
            continuous_summary("birth_rate", records.iter().map(|r| r.birth_rate)),
            continuous_summary("mother_age", records.iter().map(|r| r.mother_age)),
            continuous_summary("birth_weight", records.iter().map(|r| r.birth_weight)),
            continuous_summary("bmi", records.iter().map(|r| r.bmi)),
            continuous_summary("birth_interval", records.iter().map(|r| r.birth_interval)),
            continuous_summary(
                "pct_single_parent",
                records.iter().map(|r| r.pct_single_parent),
            ),
            continuous_summary("prenatal_visits", records.iter().map(|r| r.prenatal_visits)),
            leveled_categorical_summary(
                "urbanicity",
                &Urbanicity::LEVELS.map(Urbanicity::label),
                records.iter().map(|r| r.urbanicity.label()),
            ),
            leveled_categorical_summary(
                "hi_chld_pov",
                &PovertyFlag::LEVELS.map(PovertyFlag::label),
                records.iter().map(|r| r.hi_chld_pov.label()),
            ),
            continuous_summary("child_mortality", records.iter().map(|r| r.child_mortality)),
            continuous_summary(
                "pct_child_uninsured",
                records.iter().map(|r| r.pct_child_uninsured),
            ),
        ];

        Self { rows, columns }
    }
}

impl fmt::Display for Codebook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "codebook ({} rows)", self.rows)?;
        writeln!(
            f,
            "{:<22} {:>8} {:>9} {:>8}  summary",
            "column", "n", "distinct", "missing"
        )?;
        for column in &self.columns {
            let summary = match &column.stats {
                ColumnStats::Continuous { median, min, max } => {
                    format!("median {median:.2} [{min:.2}, {max:.2}]")
                }
                ColumnStats::Categorical { levels } => levels
                    .iter()
                    .map(|l| format!("{} = {}", l.level, l.count))
                    .join(", "),
                ColumnStats::Identifier => String::from("identifier"),
            };
            writeln!(
                f,
                "{:<22} {:>8} {:>9} {:>8}  {summary}",
                column.name, column.non_missing, column.distinct, column.missing
            )?;
        }
        Ok(())
    }
}

/// Sample median of already-collected values; NaN-free input expected
fn median(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

fn continuous_summary(
    name: &'static str,
    values: impl Iterator<Item = f64>,
) -> ColumnSummary {
    let mut values: Vec<f64> = values.collect();
    values.sort_by(f64::total_cmp);

    let distinct = values.iter().map(|v| v.to_bits()).unique().count();
    let non_missing = values.len();
    let stats = ColumnStats::Continuous {
        median: median(&values),
        min: values.first().copied().unwrap_or(f64::NAN),
        max: values.last().copied().unwrap_or(f64::NAN),
    };

    ColumnSummary {
        name,
        non_missing,
        distinct,
        missing: 0,
        stats,
    }
}

fn identifier_summary<'a>(
    name: &'static str,
    values: impl Iterator<Item = &'a str>,
) -> ColumnSummary {
    let values: Vec<&str> = values.collect();
    ColumnSummary {
        name,
        non_missing: values.len(),
        distinct: values.iter().unique().count(),
        missing: 0,
        stats: ColumnStats::Identifier,
    }
}

/// Categorical summary over the levels actually observed, in sorted order
fn observed_categorical_summary<'a>(
    name: &'static str,
    values: impl Iterator<Item = &'a str>,
) -> ColumnSummary {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    let mut non_missing = 0;
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
        non_missing += 1;
    }

    let levels: Vec<LevelCount> = counts
        .into_iter()
        .map(|(level, count)| LevelCount {
            level: level.to_string(),
            count,
        })
        .collect();

    ColumnSummary {
        name,
        non_missing,
        distinct: levels.len(),
        missing: 0,
        stats: ColumnStats::Categorical { levels },
    }
}

/// Categorical summary over a declared level set, zero counts included
fn leveled_categorical_summary<'a>(
    name: &'static str,
    declared_levels: &[&str],
    values: impl Iterator<Item = &'a str>,
) -> ColumnSummary {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    let mut non_missing = 0;
    for value in values {
        *counts.entry(value).or_insert(0) += 1;
        non_missing += 1;
    }

    let distinct = counts.len();
    let levels: Vec<LevelCount> = declared_levels
        .iter()
        .map(|level| LevelCount {
            level: (*level).to_string(),
            count: counts.get(level).copied().unwrap_or(0),
        })
        .collect();

    ColumnSummary {
        name,
        non_missing,
        distinct,
        missing: 0,
        stats: ColumnStats::Categorical { levels },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(fips: &str, state: &str, birth_rate: f64, flag: PovertyFlag) -> AnalyticRecord {
        AnalyticRecord {
            fips: fips.to_string(),
            county: format!("County {fips}"),
            state: state.to_string(),
            birth_rate,
            mother_age: 29.0,
            birth_weight: 3200.0,
            bmi: 26.0,
            birth_interval: 30.0,
            pct_single_parent: 25.0,
            prenatal_visits: 11.0,
            urbanicity: Urbanicity::Medium,
            hi_chld_pov: flag,
            child_mortality: 50.0,
            pct_child_uninsured: 5.0,
        }
    }

    #[test]
    fn codebook_covers_every_column_with_zero_missing() {
        let records = vec![
            record("01001", "AL", 9.0, PovertyFlag::No),
            record("01003", "AL", 11.0, PovertyFlag::Yes),
            record("02013", "AK", 13.0, PovertyFlag::No),
        ];
        let codebook = Codebook::build(&records);

        assert_eq!(codebook.rows, 3);
        assert_eq!(codebook.columns.len(), AnalyticRecord::COLUMNS.len());
        for column in &codebook.columns {
            assert_eq!(column.missing, 0);
            assert_eq!(column.non_missing, 3);
        }
    }

    #[test]
    fn continuous_summary_reports_median_and_range() {
        let records = vec![
            record("01001", "AL", 9.0, PovertyFlag::No),
            record("01003", "AL", 11.0, PovertyFlag::No),
            record("02013", "AK", 13.0, PovertyFlag::No),
        ];
        let codebook = Codebook::build(&records);
        let birth_rate = codebook
            .columns
            .iter()
            .find(|c| c.name == "birth_rate")
            .unwrap();

        match &birth_rate.stats {
            ColumnStats::Continuous { median, min, max } => {
                assert!((median - 11.0).abs() < 1e-12);
                assert!((min - 9.0).abs() < 1e-12);
                assert!((max - 13.0).abs() < 1e-12);
            }
            other => panic!("expected continuous stats, got {other:?}"),
        }
        assert_eq!(birth_rate.distinct, 3);
    }

    #[test]
    fn declared_levels_appear_even_with_zero_counts() {
        let records = vec![record("01001", "AL", 9.0, PovertyFlag::No)];
        let codebook = Codebook::build(&records);
        let flag = codebook
            .columns
            .iter()
            .find(|c| c.name == "hi_chld_pov")
            .unwrap();

        match &flag.stats {
            ColumnStats::Categorical { levels } => {
                assert_eq!(levels.len(), 2);
                assert_eq!(levels[0].level, "no");
                assert_eq!(levels[0].count, 1);
                assert_eq!(levels[1].level, "yes");
                assert_eq!(levels[1].count, 0);
            }
            other => panic!("expected categorical stats, got {other:?}"),
        }
        assert_eq!(flag.distinct, 1);
    }

    #[test]
    fn even_sample_median_averages_the_middle_pair() {
        assert!((median(&[1.0, 2.0, 3.0, 4.0]) - 2.5).abs() < 1e-12);
        assert!((median(&[1.0, 2.0, 3.0]) - 2.0).abs() < 1e-12);
    }
}
