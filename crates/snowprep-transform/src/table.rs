//! Row-wise translation of an export DataFrame.
//!
//! | Column                      | Null input | Otherwise                   |
//! |-----------------------------|------------|-----------------------------|
//! | `Codes`                     | `"[]"`     | `translate_codes`           |
//! | `Product Type Sub Category` | null       | `translate_subcategories`   |
//! | `Code Category` (optional)  | `"[]"`     | unchanged                   |
//!
//! Every other column, the row count, and the row order are untouched.

use polars::prelude::{DataFrame, NamedFrom, Series};
use snowprep_model::{CODE_CATEGORY, CODES, CodeMapping, EMPTY_ARRAY, SUBCATEGORY};
use tracing::debug;

use crate::data_utils::column_values;
use crate::error::Result;
use crate::translate::{
    CodesTranslation, SubcategoryTranslation, classify_codes, classify_subcategories,
};

/// Counts gathered while translating an export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationStats {
    pub rows: usize,
    /// `Codes` fields that produced a label array.
    pub codes_translated: usize,
    /// Individual codes found in the mapping.
    pub codes_mapped: usize,
    /// Individual codes passed through unchanged.
    pub codes_unmapped: usize,
    pub codes_empty: usize,
    pub codes_malformed: usize,
    pub codes_missing: usize,
    pub subcategories_joined: usize,
    pub subcategories_empty: usize,
    pub subcategories_malformed: usize,
    pub subcategories_missing: usize,
    pub has_code_category: bool,
    /// Null `Code Category` values replaced by `"[]"`.
    pub code_categories_filled: usize,
}

impl TranslationStats {
    /// Fields normalized because they failed to decode.
    pub fn malformed_fields(&self) -> usize {
        self.codes_malformed + self.subcategories_malformed
    }
}

/// Translates `Codes` and `Product Type Sub Category` on every row.
pub fn translate_export(
    mut df: DataFrame,
    mapping: &CodeMapping,
) -> Result<(DataFrame, TranslationStats)> {
    let mut stats = TranslationStats {
        rows: df.height(),
        ..TranslationStats::default()
    };

    let codes: Vec<Option<String>> = column_values(&df, CODES)?
        .into_iter()
        .map(|raw| match raw {
            None => {
                stats.codes_missing += 1;
                Some(EMPTY_ARRAY.to_string())
            }
            Some(raw) => {
                let outcome = classify_codes(&raw, mapping);
                match &outcome {
                    CodesTranslation::Translated {
                        mapped, unmapped, ..
                    } => {
                        stats.codes_translated += 1;
                        stats.codes_mapped += mapped;
                        stats.codes_unmapped += unmapped;
                    }
                    CodesTranslation::Empty => stats.codes_empty += 1,
                    CodesTranslation::Malformed => {
                        debug!(len = raw.len(), "codes field is not a JSON string array");
                        stats.codes_malformed += 1;
                    }
                }
                outcome.into_value()
            }
        })
        .collect();
    df.with_column(Series::new(CODES.into(), codes))?;

    let subcategories: Vec<Option<String>> = column_values(&df, SUBCATEGORY)?
        .into_iter()
        .map(|raw| match raw {
            None => {
                stats.subcategories_missing += 1;
                None
            }
            Some(raw) => {
                let outcome = classify_subcategories(&raw);
                match &outcome {
                    SubcategoryTranslation::Joined(_) => stats.subcategories_joined += 1,
                    SubcategoryTranslation::Empty => stats.subcategories_empty += 1,
                    SubcategoryTranslation::Malformed => stats.subcategories_malformed += 1,
                }
                outcome.into_value()
            }
        })
        .collect();
    df.with_column(Series::new(SUBCATEGORY.into(), subcategories))?;

    if df.column(CODE_CATEGORY).is_ok() {
        stats.has_code_category = true;
        let categories: Vec<Option<String>> = column_values(&df, CODE_CATEGORY)?
            .into_iter()
            .map(|raw| {
                Some(raw.unwrap_or_else(|| {
                    stats.code_categories_filled += 1;
                    EMPTY_ARRAY.to_string()
                }))
            })
            .collect();
        df.with_column(Series::new(CODE_CATEGORY.into(), categories))?;
    }

    Ok((df, stats))
}
