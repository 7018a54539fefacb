//! DataFrame value extraction.

use polars::prelude::{DataFrame, DataType};
use snowprep_model::EMPTY_ARRAY;

use crate::error::{Result, TransformError};

/// Extract a column as owned optional strings, one per row.
pub fn column_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let column = df
        .column(name)
        .map_err(|_| TransformError::MissingColumn {
            column: name.to_string(),
        })?;
    let as_text = column.cast(&DataType::String)?;
    let chunked = as_text.str()?;
    Ok(chunked
        .iter()
        .map(|value| value.map(str::to_string))
        .collect())
}

/// First cell in `name` that is not the empty-array marker.
///
/// A null cell qualifies and is returned as `Some(None)`. Returns `Ok(None)`
/// when the column is absent or every cell holds `"[]"`.
pub fn first_example_value(df: &DataFrame, name: &str) -> Result<Option<Option<String>>> {
    if df.column(name).is_err() {
        return Ok(None);
    }
    Ok(column_values(df, name)?
        .into_iter()
        .find(|value| value.as_deref() != Some(EMPTY_ARRAY)))
}
