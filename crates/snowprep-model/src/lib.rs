//! Shared types for the complaint export translator.
//!
//! - [`columns`]: column names and file names shared by every stage
//! - [`mapping`]: the read-only code → label lookup table
//! - [`paths`]: application directory layout

pub mod columns;
pub mod mapping;
pub mod paths;

pub use columns::{
    CODE_CATEGORY, CODES, COMPLAINT_NUMBER, DATA_DIR_NAME, EMPTY_ARRAY, EXPORT_FILE_NAME,
    IMPORT_FILE_NAME, MAPPING_FILE_NAME, REQUIRED_COLUMNS, SUBCATEGORY,
    SUBCATEGORY_MAPPING_FILE_NAME,
};
pub use mapping::CodeMapping;
pub use paths::{APP_DIR_ENV_VAR, AppPaths};
