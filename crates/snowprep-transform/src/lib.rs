//! Complaint export transformation.
//!
//! - **translate**: pure per-field translators for `Codes` and
//!   `Product Type Sub Category`
//! - **table**: applies the translators to every row of an export DataFrame
//! - **duplicates**: repeated identifier detection
//! - **data_utils**: DataFrame value extraction

pub mod data_utils;
pub mod duplicates;
pub mod error;
pub mod table;
pub mod translate;

pub use data_utils::{column_values, first_example_value};
pub use duplicates::{DuplicateValue, find_duplicates};
pub use error::{Result, TransformError};
pub use table::{TranslationStats, translate_export};
pub use translate::{
    CodesTranslation, SubcategoryTranslation, classify_codes, classify_subcategories,
    translate_codes, translate_subcategories,
};
