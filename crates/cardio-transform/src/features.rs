//! Stateless derived features.

use cardio_model::columns::{AGE, AP, AP_HI, AP_LO};
use polars::prelude::{DataFrame, DataType, IntoLazy, col, lit};

use crate::error::Result;
use crate::frame::{numeric_column, require_columns};

/// Survey ages are recorded in days; convert them to (fractional) years.
pub fn age_to_years(df: &DataFrame) -> Result<DataFrame> {
    // type check only; the conversion runs in the lazy engine
    numeric_column(df, AGE)?;
    let out = df
        .clone()
        .lazy()
        .with_column((col(AGE).cast(DataType::Float64) / lit(365.0)).alias(AGE))
        .collect()?;
    Ok(out)
}

/// Add `ap` = `ap_hi` + `ap_lo`. Missing on either side gives missing.
pub fn add_pressure_sum(df: &DataFrame) -> Result<DataFrame> {
    require_columns(df, &[AP_HI, AP_LO])?;
    numeric_column(df, AP_HI)?;
    numeric_column(df, AP_LO)?;
    let out = df
        .clone()
        .lazy()
        .with_column(
            (col(AP_HI).cast(DataType::Float64) + col(AP_LO).cast(DataType::Float64)).alias(AP),
        )
        .collect()?;
    Ok(out)
}
