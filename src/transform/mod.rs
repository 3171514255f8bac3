//! Pipeline transformations
//!
//! The stages between loading and reporting: cleaning, merging, and
//! derivation, plus the post-pipeline invariant checks. Every stage is a
//! pure function taking the prior stage's records and returning new ones;
//! there is no shared mutable state beyond the value flowing through.

pub mod bucket;
pub mod clean;
pub mod derive;
pub mod merge;
pub mod validate;

pub use bucket::Bins;
pub use clean::{clean_natality, clean_rankings};
pub use derive::derive_analytic;
pub use merge::merge_records;
pub use validate::validate_invariants;
