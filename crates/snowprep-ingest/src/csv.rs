//! CSV reading for the export table.

use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};
use snowprep_model::REQUIRED_COLUMNS;

use crate::error::{IngestError, Result};

/// Reads the export CSV into a DataFrame.
///
/// Every column is read as a string so values are written back exactly as
/// they arrived; empty fields become nulls. Fails if any required column is
/// missing.
pub fn read_export_table(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
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

    ensure_required_columns(&df, path)?;

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read export table"
    );

    Ok(df)
}

/// Checks that every required column is present.
pub fn ensure_required_columns(df: &DataFrame, path: &Path) -> Result<()> {
    for column in REQUIRED_COLUMNS {
        if df.column(column).is_err() {
            return Err(IngestError::MissingColumn {
                column: column.to_string(),
                path: path.to_path_buf(),
            });
        }
    }
    Ok(())
}
