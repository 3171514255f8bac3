//! Natality record models
//!
//! The raw model mirrors one row of the tab-separated CDC WONDER county
//! natality extract. The cleaned model is what survives sentinel removal,
//! completeness filtering, and the "County, State" split.

use serde::Deserialize;

/// One row of the natality extract, as shipped
///
/// Every field is optional at this stage: WONDER extracts carry footnote
/// rows where only `notes` is populated, and the birth rate column holds a
/// "Not Available" sentinel for suppressed counties. The birth rate stays
/// textual until the derivation stage coerces it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawNatalityRecord {
    /// Free-text notes column, discarded by the cleaner
    #[serde(rename = "Notes")]
    pub notes: Option<String>,
    /// Composite "County, State" location text
    #[serde(rename = "County of Residence")]
    pub county_of_residence: Option<String>,
    /// Births per 1000 population, numeric-as-text with sentinel
    #[serde(rename = "Birth Rate")]
    pub birth_rate: Option<String>,
    /// Average maternal age in years
    #[serde(rename = "Average Age of Mother (years)")]
    pub mother_age: Option<f64>,
    /// Average birth weight in grams
    #[serde(rename = "Average Birth Weight (grams)")]
    pub birth_weight: Option<f64>,
    /// Average pre-pregnancy body mass index
    #[serde(rename = "Average Pre-pregnancy BMI")]
    pub bmi: Option<f64>,
    /// Average number of prenatal visits
    #[serde(rename = "Average Number of Prenatal Visits")]
    pub prenatal_visits: Option<f64>,
    /// Average inter-birth interval in months
    #[serde(rename = "Average Birth Interval (months)")]
    pub birth_interval: Option<f64>,
}

impl RawNatalityRecord {
    /// Column names the loader requires in the source header
    pub const REQUIRED_COLUMNS: [&'static str; 8] = [
        "Notes",
        "County of Residence",
        "Birth Rate",
        "Average Age of Mother (years)",
        "Average Birth Weight (grams)",
        "Average Pre-pregnancy BMI",
        "Average Number of Prenatal Visits",
        "Average Birth Interval (months)",
    ];
}

/// A cleaned natality record, complete on every retained field
///
/// The birth rate is still text here; all sentinel values have been removed
/// so the derivation stage can require it to parse.
#[derive(Debug, Clone, PartialEq)]
pub struct NatalityRecord {
    /// County name, split off the composite location
    pub county: String,
    /// Two-letter state code, split off the composite location
    pub state: String,
    /// Births per 1000 population, sentinel-free numeric text
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
}
