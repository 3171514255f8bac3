//! Merged and analytic record models
//!
//! `MergedRecord` is the immediate result of the inner join, with the
//! proportion measures still in fraction form and the birth rate still
//! textual. `AnalyticRecord` is the final per-county entity with derived
//! categories, held in memory for reporting and persisted as the pipeline's
//! terminal artifact.

use serde::{Deserialize, Serialize};

/// Four-level urbanicity ordinal derived from percent rural population
///
/// Levels are in descending urbanicity / ascending rurality order. The
/// partition over percent rural uses right-closed intervals
/// (-1, 10], (10, 20], (20, 30], (30, 100], with the lower bound extended
/// below zero so an exactly-zero rural share lands in `VeryHigh`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Urbanicity {
    /// Rural share in (-1, 10]
    VeryHigh,
    /// Rural share in (10, 20]
    High,
    /// Rural share in (20, 30]
    Medium,
    /// Rural share in (30, 100]
    Low,
}

impl Urbanicity {
    /// All levels in declared ordinal order
    pub const LEVELS: [Self; 4] = [Self::VeryHigh, Self::High, Self::Medium, Self::Low];

    /// Human-readable level label, as it appears in the persisted table
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::VeryHigh => "Very High",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }

    /// Parse a persisted level label back to the enum
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Very High" => Some(Self::VeryHigh),
            "High" => Some(Self::High),
            "Medium" => Some(Self::Medium),
            "Low" => Some(Self::Low),
            _ => None,
        }
    }

    /// Numeric score used when the ordinal enters a linear design matrix
    #[must_use]
    pub const fn ordinal_score(self) -> f64 {
        match self {
            Self::VeryHigh => 0.0,
            Self::High => 1.0,
            Self::Medium => 2.0,
            Self::Low => 3.0,
        }
    }
}

/// Binary high-child-poverty flag
///
/// `Yes` when the county child-poverty percentage exceeds the national
/// average cutoff; a value exactly at the cutoff is `No` under the
/// right-closed interval convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PovertyFlag {
    /// Child poverty percentage at or below the cutoff
    No,
    /// Child poverty percentage above the cutoff
    Yes,
}

impl PovertyFlag {
    /// All levels in declared order
    pub const LEVELS: [Self; 2] = [Self::No, Self::Yes];

    /// Level label as it appears in the persisted table
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::No => "no",
            Self::Yes => "yes",
        }
    }

    /// Parse a persisted level label back to the enum
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "no" => Some(Self::No),
            "yes" => Some(Self::Yes),
            _ => None,
        }
    }
}

/// Result of the inner join, before derivation
///
/// Proportion measures are still fractions in [0, 1] and the birth rate is
/// still numeric-as-text. Complete on every field: the post-join
/// completeness rule has already discarded rows with missing measures.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedRecord {
    /// FIPS county identifier, not yet width-normalized
    pub fips: String,
    /// County name
    pub county: String,
    /// Two-letter state code
    pub state: String,
    /// Births per 1000 population, numeric text
    pub birth_rate: String,
    /// Average maternal age in years
    pub mother_age: f64,
    /// Average birth weight in grams
    pub birth_weight: f64,
    /// Average pre-pregnancy body mass index
    pub bmi: f64,
    /// Average number of prenatal visits
    pub prenatal_visits: f64,
    /// Average inter-birth interval in months
    pub birth_interval: f64,
    /// Children in poverty, fraction
    pub child_poverty: f64,
    /// Children in single-parent households, fraction
    pub single_parent: f64,
    /// Child mortality per 100,000
    pub child_mortality: f64,
    /// Uninsured children, fraction
    pub child_uninsured: f64,
    /// Rural population, fraction
    pub pct_rural: f64,
}

/// The final analytic entity, one per county
///
/// Field order matches the canonical column layout of the persisted table:
/// identifiers, then the linear-outcome group, then the shared predictors,
/// then the logistic-outcome group. Never mutated after derivation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticRecord {
    /// Five-digit FIPS county identifier, zero-padded
    pub fips: String,
    /// County name
    pub county: String,
    /// Two-letter state code
    pub state: String,
    /// Births per 1000 population
    pub birth_rate: f64,
    /// Average maternal age in years
    pub mother_age: f64,
    /// Average birth weight in grams
    pub birth_weight: f64,
    /// Average pre-pregnancy body mass index
    pub bmi: f64,
    /// Average inter-birth interval in months
    pub birth_interval: f64,
    /// Children in single-parent households, percentage
    pub pct_single_parent: f64,
    /// Average number of prenatal visits
    pub prenatal_visits: f64,
    /// Urbanicity ordinal derived from percent rural
    pub urbanicity: Urbanicity,
    /// High-child-poverty flag
    pub hi_chld_pov: PovertyFlag,
    /// Child mortality per 100,000
    pub child_mortality: f64,
    /// Uninsured children, percentage
    pub pct_child_uninsured: f64,
}

impl AnalyticRecord {
    /// Canonical column names of the persisted table, in order
    pub const COLUMNS: [&'static str; 14] = [
        "fips",
        "county",
        "state",
        "birth_rate",
        "mother_age",
        "birth_weight",
        "bmi",
        "birth_interval",
        "pct_single_parent",
        "prenatal_visits",
        "urbanicity",
        "hi_chld_pov",
        "child_mortality",
        "pct_child_uninsured",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urbanicity_labels_round_trip() {
        for level in Urbanicity::LEVELS {
            assert_eq!(Urbanicity::from_label(level.label()), Some(level));
        }
        assert_eq!(Urbanicity::from_label("Suburban"), None);
    }

    #[test]
    fn urbanicity_order_is_descending_urbanicity() {
        assert!(Urbanicity::VeryHigh < Urbanicity::High);
        assert!(Urbanicity::High < Urbanicity::Medium);
        assert!(Urbanicity::Medium < Urbanicity::Low);
    }

    #[test]
    fn poverty_flag_labels_round_trip() {
        for level in PovertyFlag::LEVELS {
            assert_eq!(PovertyFlag::from_label(level.label()), Some(level));
        }
        assert_eq!(PovertyFlag::from_label("maybe"), None);
    }
}
