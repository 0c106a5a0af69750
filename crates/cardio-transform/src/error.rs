//! Error types for correction transforms.
//!
//! Only structurally wrong input fails a transform. Out-of-range values are
//! repaired, and unseen groups leave values missing without an error.

use cardio_model::ConfigError;
use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransformError {
    /// A required column is absent from the record set.
    #[error("required column '{column}' not found")]
    MissingColumn { column: String },

    /// A column expected to hold numbers has another type.
    #[error("column '{column}' must be numeric, found {dtype}")]
    NonNumericColumn { column: String, dtype: String },

    /// A fill target has no statistic in the fitted table.
    #[error("no fitted statistic for column '{column}'")]
    UnknownStatistic { column: String },

    /// Lookup keys do not have the shape the table was fitted with.
    #[error("group key has {found} columns, table was fitted with {expected}")]
    KeyArity { expected: usize, found: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, TransformError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TransformError::NonNumericColumn {
            column: "ap_hi".to_string(),
            dtype: "str".to_string(),
        };
        assert_eq!(err.to_string(), "column 'ap_hi' must be numeric, found str");
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = PolarsError::ColumnNotFound("weight".into());
        let err: TransformError = polars_err.into();
        assert!(matches!(err, TransformError::Polars(_)));
    }
}
