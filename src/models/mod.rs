//! Record models for the pipeline stages
//!
//! Each stage of the pipeline has its own record type: raw records mirror
//! the source extracts field-for-field (with serde renames doing the
//! projection onto canonical snake_case identifiers), cleaned records are
//! complete on every retained field, and the analytic record is the final
//! merged entity with its derived categorical variables.

pub mod analytic;
pub mod natality;
pub mod rankings;

pub use analytic::{AnalyticRecord, MergedRecord, PovertyFlag, Urbanicity};
pub use natality::{NatalityRecord, RawNatalityRecord};
pub use rankings::{RankingRecord, RawHealthRankingRecord};
