use std::collections::HashMap;

use polars::prelude::DataFrame;

use crate::data_utils::column_values;
use crate::error::Result;

/// A value that appears on more than one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateValue {
    pub value: String,
    pub count: usize,
}

/// Finds values of `column` that occur more than once, in first-seen order.
///
/// Blank and null values are ignored. Rows are never removed.
pub fn find_duplicates(df: &DataFrame, column: &str) -> Result<Vec<DuplicateValue>> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for value in column_values(df, column)?.into_iter().flatten() {
        let key = value.trim();
        if key.is_empty() {
            continue;
        }
        let count = counts.entry(key.to_string()).or_insert_with(|| {
            order.push(key.to_string());
            0
        });
        *count += 1;
    }

    Ok(order
        .into_iter()
        .filter_map(|value| {
            let count = counts.get(&value).copied().unwrap_or(0);
            (count > 1).then_some(DuplicateValue { value, count })
        })
        .collect())
}
