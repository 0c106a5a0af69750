//! Typed column access on survey DataFrames.
//!
//! Correctors read whole columns into vectors, repair them record by record
//! and write them back under the same name. Writing back into a clone of the
//! input keeps row order, row count and pass-through columns intact.

use polars::prelude::{Column, DataFrame, DataType};

use crate::error::{Result, TransformError};

/// Returns true for the integer and float dtypes accepted as measurements.
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Fail with [`TransformError::MissingColumn`] for the first absent column.
pub fn require_columns(df: &DataFrame, names: &[&str]) -> Result<()> {
    for name in names {
        if df.column(name).is_err() {
            return Err(TransformError::MissingColumn {
                column: (*name).to_string(),
            });
        }
    }
    Ok(())
}

/// Read a numeric column as floats. Nulls and NaN both come back as `None`.
pub fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let column = df.column(name).map_err(|_| TransformError::MissingColumn {
        column: name.to_string(),
    })?;
    if !is_numeric_dtype(column.dtype()) {
        return Err(TransformError::NonNumericColumn {
            column: name.to_string(),
            dtype: column.dtype().to_string(),
        });
    }
    let floats = column.cast(&DataType::Float64)?;
    let values = floats
        .f64()?
        .into_iter()
        .map(|value| value.filter(|v| !v.is_nan()))
        .collect();
    Ok(values)
}

/// Read a categorical code column. Codes must be whole numbers; anything
/// else is treated as missing.
pub fn code_column(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
    let values = numeric_column(df, name)?;
    Ok(values.into_iter().map(|value| value.and_then(to_code)).collect())
}

fn to_code(value: f64) -> Option<i64> {
    if value.is_finite() && value.fract() == 0.0 {
        Some(value as i64)
    } else {
        None
    }
}

/// Build one composite key per record. A record with any missing component
/// has no key.
pub fn group_keys(df: &DataFrame, key_columns: &[&str]) -> Result<Vec<Option<Vec<i64>>>> {
    let columns = key_columns
        .iter()
        .map(|name| code_column(df, name))
        .collect::<Result<Vec<_>>>()?;
    let keys = (0..df.height())
        .map(|row| columns.iter().map(|column| column[row]).collect())
        .collect();
    Ok(keys)
}

/// Replace or append a Float64 column.
pub fn write_float_column(df: &mut DataFrame, name: &str, values: Vec<Option<f64>>) -> Result<()> {
    df.with_column(Column::new(name.into(), values))?;
    Ok(())
}

/// Replace or append an Int64 column.
pub fn write_int_column(df: &mut DataFrame, name: &str, values: Vec<Option<i64>>) -> Result<()> {
    df.with_column(Column::new(name.into(), values))?;
    Ok(())
}
