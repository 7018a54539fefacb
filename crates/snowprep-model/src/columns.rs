//! Column and file names used across the pipeline.

/// Complaint identifier column.
pub const COMPLAINT_NUMBER: &str = "Complaint Number";

/// JSON array of code identifiers.
pub const CODES: &str = "Codes";

/// JSON array of subcategory names.
pub const SUBCATEGORY: &str = "Product Type Sub Category";

/// Optional JSON array of code categories.
pub const CODE_CATEGORY: &str = "Code Category";

/// Columns that must be present in every export.
pub const REQUIRED_COLUMNS: [&str; 3] = [COMPLAINT_NUMBER, CODES, SUBCATEGORY];

/// Serialized empty sequence.
pub const EMPTY_ARRAY: &str = "[]";

/// File name of the upstream export.
pub const EXPORT_FILE_NAME: &str = "airtable_export_final.csv";

/// File name of the translated table.
pub const IMPORT_FILE_NAME: &str = "snowflake_import.csv";

/// File name of the code mapping configuration.
pub const MAPPING_FILE_NAME: &str = "code_mapping.json";

/// File name of the subcategory mapping written by the exporter.
pub const SUBCATEGORY_MAPPING_FILE_NAME: &str = "subcategory_mapping.json";

/// Directory under the application directory holding exports and imports.
pub const DATA_DIR_NAME: &str = "data";
