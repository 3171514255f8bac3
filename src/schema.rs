//! Arrow schema for the analytic table
//!
//! Column names are the canonical lower-case, underscore-separated
//! identifiers. The categorical columns (state, urbanicity, poverty flag)
//! are dictionary-encoded so their level sets survive a parquet round trip.

use arrow::datatypes::{DataType, Field, Schema};
use std::sync::Arc;

fn categorical() -> DataType {
    DataType::Dictionary(Box::new(DataType::Int32), Box::new(DataType::Utf8))
}

/// Get the Arrow schema for the analytic table
///
/// Column order is the canonical layout: identifiers, linear-outcome group,
/// shared predictors, logistic-outcome group.
#[must_use]
pub fn analytic_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("fips", DataType::Utf8, false),
        Field::new("county", DataType::Utf8, false),
        Field::new("state", categorical(), false),
        Field::new("birth_rate", DataType::Float64, false),
        Field::new("mother_age", DataType::Float64, false),
        Field::new("birth_weight", DataType::Float64, false),
        Field::new("bmi", DataType::Float64, false),
        Field::new("birth_interval", DataType::Float64, false),
        Field::new("pct_single_parent", DataType::Float64, false),
        Field::new("prenatal_visits", DataType::Float64, false),
        Field::new("urbanicity", categorical(), false),
        Field::new("hi_chld_pov", categorical(), false),
        Field::new("child_mortality", DataType::Float64, false),
        Field::new("pct_child_uninsured", DataType::Float64, false),
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AnalyticRecord;

    #[test]
    fn schema_matches_the_canonical_column_layout() {
        let schema = analytic_schema();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(names, AnalyticRecord::COLUMNS);
    }

    #[test]
    fn categorical_columns_are_dictionary_encoded() {
        let schema = analytic_schema();
        for name in ["state", "urbanicity", "hi_chld_pov"] {
            let field = schema.field_with_name(name).unwrap();
            assert!(
                matches!(field.data_type(), DataType::Dictionary(_, _)),
                "{name} should be dictionary encoded"
            );
        }
    }
}
