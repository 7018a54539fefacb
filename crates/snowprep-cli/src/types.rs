use std::path::PathBuf;

use polars::prelude::DataFrame;
use snowprep_ingest::LocatedExport;
use snowprep_transform::{DuplicateValue, TranslationStats};

#[derive(Debug)]
pub struct TranslateResult {
    pub mapping_path: PathBuf,
    pub mapping_entries: usize,
    pub export: LocatedExport,
    pub output_path: PathBuf,
    pub table: DataFrame,
    pub stats: TranslationStats,
    pub duplicates: Vec<DuplicateValue>,
}

#[derive(Debug, Default)]
pub struct ExportSummary {
    pub subcategory_mapping: PathBuf,
    pub subcategories: usize,
    pub code_mapping: PathBuf,
    pub codes: usize,
    pub fetched_records: usize,
    pub duplicate_numbers: usize,
    pub exported_records: usize,
    /// `None` when no complaint matched the review-status filter.
    pub export_file: Option<PathBuf>,
    pub file_size_mb: f64,
}
