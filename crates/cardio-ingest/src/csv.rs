//! CSV reading and writing for survey record sets.

use std::fs::File;
use std::path::Path;

use polars::prelude::{CsvReadOptions, CsvWriter, DataFrame, SerReader, SerWriter};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{IngestError, Result};

/// Options for reading and writing survey CSV files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestOptions {
    /// Field separator. The public cardio survey ships with `;`.
    pub separator: u8,
    /// Rows sampled for schema inference.
    pub infer_schema_rows: usize,
    /// Reject files that contain a header but no records.
    pub require_records: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            separator: b',',
            infer_schema_rows: 1000,
            require_records: false,
        }
    }
}

impl IngestOptions {
    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    pub fn with_require_records(mut self, require: bool) -> Self {
        self.require_records = require;
        self
    }
}

/// Reads a survey CSV file into a DataFrame.
///
/// Empty cells load as nulls. Column types are inferred; numeric survey
/// columns come back as integer or float columns.
pub fn read_survey_csv(path: &Path, options: &IngestOptions) -> Result<DataFrame> {
    if !path.exists() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let separator = options.separator;
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(options.infer_schema_rows))
        .map_parse_options(|parse| parse.with_separator(separator))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    if options.require_records && df.height() == 0 {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }

    debug!(columns = ?df.get_column_names(), "inferred survey schema");
    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "loaded survey file"
    );
    Ok(df)
}

/// Writes a record set to CSV with a header row.
pub fn write_survey_csv(df: &mut DataFrame, path: &Path, options: &IngestOptions) -> Result<()> {
    let mut file = File::create(path).map_err(|e| IngestError::FileAccess {
        path: path.to_path_buf(),
        source: e,
    })?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(options.separator)
        .finish(df)
        .map_err(|e| IngestError::CsvWrite {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
    info!(path = %path.display(), rows = df.height(), "wrote survey file");
    Ok(())
}
