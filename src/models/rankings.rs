//! County health rankings record models
//!
//! The raw model mirrors one row of the comma-separated County Health
//! Rankings analytic extract, keyed by the `vNNN_rawvalue` measure columns.
//! Rows exist for counties, states, and the nation; only ranked county rows
//! are valid.

use serde::Deserialize;

/// One row of the health rankings extract, as shipped
///
/// State and nation aggregate rows leave `county_ranked` blank, so every
/// field is optional at this stage. The five retained measures are raw
/// fractions in [0, 1] except child mortality, which is a rate per 100,000.
#[derive(Debug, Clone, Deserialize)]
pub struct RawHealthRankingRecord {
    /// Five-digit FIPS county identifier, fixed-width numeric-as-text
    #[serde(rename = "fipscode")]
    pub fips: Option<String>,
    /// County name, or a state/nation name on aggregate rows
    #[serde(rename = "county")]
    pub county: Option<String>,
    /// Two-letter state code
    #[serde(rename = "state")]
    pub state: Option<String>,
    /// Ranking-eligibility flag, 1 for ranked counties
    #[serde(rename = "county_ranked")]
    pub county_ranked: Option<u8>,
    /// Children in poverty, fraction
    #[serde(rename = "v024_rawvalue")]
    pub child_poverty: Option<f64>,
    /// Children in single-parent households, fraction
    #[serde(rename = "v082_rawvalue")]
    pub single_parent: Option<f64>,
    /// Child mortality per 100,000
    #[serde(rename = "v128_rawvalue")]
    pub child_mortality: Option<f64>,
    /// Uninsured children, fraction
    #[serde(rename = "v122_rawvalue")]
    pub child_uninsured: Option<f64>,
    /// Rural population, fraction
    #[serde(rename = "v058_rawvalue")]
    pub pct_rural: Option<f64>,
}

impl RawHealthRankingRecord {
    /// Column names the loader requires in the source header
    pub const REQUIRED_COLUMNS: [&'static str; 9] = [
        "fipscode",
        "county",
        "state",
        "county_ranked",
        "v024_rawvalue",
        "v082_rawvalue",
        "v128_rawvalue",
        "v122_rawvalue",
        "v058_rawvalue",
    ];
}

/// A cleaned health rankings record for a ranked county
///
/// Identifiers are required; the measure fields stay optional because the
/// post-join completeness rule is what removes counties with missing
/// measures.
#[derive(Debug, Clone, PartialEq)]
pub struct RankingRecord {
    /// Five-digit FIPS county identifier
    pub fips: String,
    /// County name
    pub county: String,
    /// Two-letter state code
    pub state: String,
    /// Children in poverty, fraction
    pub child_poverty: Option<f64>,
    /// Children in single-parent households, fraction
    pub single_parent: Option<f64>,
    /// Child mortality per 100,000
    pub child_mortality: Option<f64>,
    /// Uninsured children, fraction
    pub child_uninsured: Option<f64>,
    /// Rural population, fraction
    pub pct_rural: Option<f64>,
}
