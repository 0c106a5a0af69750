//! Survey data ingestion.
//!
//! Loads survey CSV files into Polars DataFrames and writes corrected record
//! sets back out. Row order is kept as read, since it is the record identity
//! the correctors preserve.
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use cardio_ingest::{IngestOptions, read_survey_csv};
//!
//! let options = IngestOptions::default().with_separator(b';');
//! let df = read_survey_csv(Path::new("cardio_train.csv"), &options)?;
//! ```

mod csv;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading / Writing ===
pub use csv::{IngestOptions, read_survey_csv, write_survey_csv};
