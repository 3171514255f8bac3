//! Conversion between analytic records and Arrow record batches
//!
//! The analytic table is built with typed builders so the categorical
//! columns come out dictionary-encoded, and read back with the usual
//! downcast-and-extract pattern. Both directions enforce the declared
//! schema.

use std::sync::Arc;

use arrow::array::{
    Array, ArrayRef, DictionaryArray, Float64Array, Float64Builder, StringArray, StringBuilder,
    StringDictionaryBuilder,
};
use arrow::datatypes::Int32Type;
use arrow::record_batch::RecordBatch;

use crate::error::{PipelineError, Result};
use crate::models::{AnalyticRecord, PovertyFlag, Urbanicity};
use crate::schema::analytic_schema;

/// Build a record batch from analytic records, in the canonical column order
pub fn to_record_batch(records: &[AnalyticRecord]) -> Result<RecordBatch> {
    let mut fips = StringBuilder::new();
    let mut county = StringBuilder::new();
    let mut state = StringDictionaryBuilder::<Int32Type>::new();
    let mut birth_rate = Float64Builder::new();
    let mut mother_age = Float64Builder::new();
    let mut birth_weight = Float64Builder::new();
    let mut bmi = Float64Builder::new();
    let mut birth_interval = Float64Builder::new();
    let mut pct_single_parent = Float64Builder::new();
    let mut prenatal_visits = Float64Builder::new();
    let mut urbanicity = StringDictionaryBuilder::<Int32Type>::new();
    let mut hi_chld_pov = StringDictionaryBuilder::<Int32Type>::new();
    let mut child_mortality = Float64Builder::new();
    let mut pct_child_uninsured = Float64Builder::new();

    for record in records {
        fips.append_value(&record.fips);
        county.append_value(&record.county);
        state.append(&record.state)?;
        birth_rate.append_value(record.birth_rate);
        mother_age.append_value(record.mother_age);
        birth_weight.append_value(record.birth_weight);
        bmi.append_value(record.bmi);
        birth_interval.append_value(record.birth_interval);
        pct_single_parent.append_value(record.pct_single_parent);
        prenatal_visits.append_value(record.prenatal_visits);
        urbanicity.append(record.urbanicity.label())?;
        hi_chld_pov.append(record.hi_chld_pov.label())?;
        child_mortality.append_value(record.child_mortality);
        pct_child_uninsured.append_value(record.pct_child_uninsured);
    }

    let columns: Vec<ArrayRef> = vec![
        Arc::new(fips.finish()),
        Arc::new(county.finish()),
        Arc::new(state.finish()),
        Arc::new(birth_rate.finish()),
        Arc::new(mother_age.finish()),
        Arc::new(birth_weight.finish()),
        Arc::new(bmi.finish()),
        Arc::new(birth_interval.finish()),
        Arc::new(pct_single_parent.finish()),
        Arc::new(prenatal_visits.finish()),
        Arc::new(urbanicity.finish()),
        Arc::new(hi_chld_pov.finish()),
        Arc::new(child_mortality.finish()),
        Arc::new(pct_child_uninsured.finish()),
    ];

    Ok(RecordBatch::try_new(analytic_schema(), columns)?)
}

/// Read analytic records back out of a record batch
///
/// Used after a parquet reload to confirm the round trip preserves both
/// values and the categorical level sets.
pub fn from_record_batch(batch: &RecordBatch) -> Result<Vec<AnalyticRecord>> {
    let fips = string_column(batch, "fips")?;
    let county = string_column(batch, "county")?;
    let state = dict_column(batch, "state")?;
    let birth_rate = float_column(batch, "birth_rate")?;
    let mother_age = float_column(batch, "mother_age")?;
    let birth_weight = float_column(batch, "birth_weight")?;
    let bmi = float_column(batch, "bmi")?;
    let birth_interval = float_column(batch, "birth_interval")?;
    let pct_single_parent = float_column(batch, "pct_single_parent")?;
    let prenatal_visits = float_column(batch, "prenatal_visits")?;
    let urbanicity = dict_column(batch, "urbanicity")?;
    let hi_chld_pov = dict_column(batch, "hi_chld_pov")?;
    let child_mortality = float_column(batch, "child_mortality")?;
    let pct_child_uninsured = float_column(batch, "pct_child_uninsured")?;

    let mut records = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        let urbanicity_label = dict_value(urbanicity, row)?;
        let poverty_label = dict_value(hi_chld_pov, row)?;

        records.push(AnalyticRecord {
            fips: fips.value(row).to_string(),
            county: county.value(row).to_string(),
            state: dict_value(state, row)?.to_string(),
            birth_rate: birth_rate.value(row),
            mother_age: mother_age.value(row),
            birth_weight: birth_weight.value(row),
            bmi: bmi.value(row),
            birth_interval: birth_interval.value(row),
            pct_single_parent: pct_single_parent.value(row),
            prenatal_visits: prenatal_visits.value(row),
            urbanicity: Urbanicity::from_label(urbanicity_label).ok_or_else(|| {
                PipelineError::ParseFailure {
                    column: "urbanicity",
                    key: format!("row {row}"),
                    value: urbanicity_label.to_string(),
                }
            })?,
            hi_chld_pov: PovertyFlag::from_label(poverty_label).ok_or_else(|| {
                PipelineError::ParseFailure {
                    column: "hi_chld_pov",
                    key: format!("row {row}"),
                    value: poverty_label.to_string(),
                }
            })?,
            child_mortality: child_mortality.value(row),
            pct_child_uninsured: pct_child_uninsured.value(row),
        });
    }

    Ok(records)
}

fn column<'a>(batch: &'a RecordBatch, name: &'static str) -> Result<&'a ArrayRef> {
    let index =
        batch
            .schema()
            .index_of(name)
            .map_err(|_| PipelineError::SchemaMismatch {
                stage: "batch conversion",
                detail: format!("column {name} not found in record batch"),
            })?;
    let array = batch.column(index);
    if array.null_count() > 0 {
        return Err(PipelineError::DataQuality(format!(
            "column {name} holds {} null values, expected none",
            array.null_count()
        )));
    }
    Ok(array)
}

fn string_column<'a>(batch: &'a RecordBatch, name: &'static str) -> Result<&'a StringArray> {
    column(batch, name)?
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| PipelineError::SchemaMismatch {
            stage: "batch conversion",
            detail: format!("column {name} is not a string array"),
        })
}

fn float_column<'a>(batch: &'a RecordBatch, name: &'static str) -> Result<&'a Float64Array> {
    column(batch, name)?
        .as_any()
        .downcast_ref::<Float64Array>()
        .ok_or_else(|| PipelineError::SchemaMismatch {
            stage: "batch conversion",
            detail: format!("column {name} is not a float64 array"),
        })
}

fn dict_column<'a>(
    batch: &'a RecordBatch,
    name: &'static str,
) -> Result<&'a DictionaryArray<Int32Type>> {
    column(batch, name)?
        .as_any()
        .downcast_ref::<DictionaryArray<Int32Type>>()
        .ok_or_else(|| PipelineError::SchemaMismatch {
            stage: "batch conversion",
            detail: format!("column {name} is not a dictionary array"),
        })
}

fn dict_value(array: &DictionaryArray<Int32Type>, row: usize) -> Result<&str> {
    let values = array
        .values()
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| PipelineError::SchemaMismatch {
            stage: "batch conversion",
            detail: "dictionary values are not strings".to_string(),
        })?;
    let key = array.keys().value(row);
    Ok(values.value(key as usize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::datatypes::DataType;

    fn record(fips: &str, urbanicity: Urbanicity) -> AnalyticRecord {
        AnalyticRecord {
            fips: fips.to_string(),
            county: "Alpha".to_string(),
            state: "AL".to_string(),
            birth_rate: 10.5,
            mother_age: 29.0,
            birth_weight: 3200.0,
            bmi: 26.0,
            birth_interval: 30.0,
            pct_single_parent: 25.0,
            prenatal_visits: 11.0,
            urbanicity,
            hi_chld_pov: PovertyFlag::Yes,
            child_mortality: 50.0,
            pct_child_uninsured: 5.0,
        }
    }

    #[test]
    fn records_convert_to_a_batch_and_back() {
        let records = vec![
            record("01001", Urbanicity::VeryHigh),
            record("01003", Urbanicity::Low),
        ];
        let batch = to_record_batch(&records).unwrap();
        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), AnalyticRecord::COLUMNS.len());

        let restored = from_record_batch(&batch).unwrap();
        assert_eq!(restored, records);
    }

    #[test]
    fn categorical_columns_come_out_dictionary_encoded() {
        let batch = to_record_batch(&[record("01001", Urbanicity::Medium)]).unwrap();
        let state = batch.column(batch.schema().index_of("state").unwrap()).clone();
        assert!(matches!(state.data_type(), DataType::Dictionary(_, _)));
    }
}
