//! Translation pipeline with explicit stages.
//!
//! The pipeline follows these stages in order:
//! 1. **Load mapping**: Read `code_mapping.json`
//! 2. **Locate**: Find the export (local data dir, else newest in temp)
//! 3. **Read**: Load the export CSV
//! 4. **Transform**: Translate `Codes` and `Product Type Sub Category`
//! 5. **Write**: Save the import CSV
//!
//! Every stage is fatal on failure. Reporting happens after the write, so a
//! report failure never loses output.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use tracing::{info, info_span, warn};

use snowprep_ingest::{ExportLocator, ExportSource, LocatedExport, load_code_mapping, read_export_table};
use snowprep_model::{AppPaths, COMPLAINT_NUMBER, CodeMapping};
use snowprep_output::write_import_csv;
use snowprep_transform::{DuplicateValue, TranslationStats, find_duplicates, translate_export};

use crate::logging::redact_value;
use crate::types::TranslateResult;

/// Duplicate complaint numbers listed in the warning.
const DUPLICATE_EXAMPLES: usize = 5;

/// Inputs of one translation run.
#[derive(Debug, Clone)]
pub struct TranslateConfig {
    pub mapping_path: PathBuf,
    pub paths: AppPaths,
    /// Root scanned when the local export is absent; `None` uses the system
    /// temp directory.
    pub temp_root: Option<PathBuf>,
    /// Output CSV; `None` uses `<app-dir>/data/snowflake_import.csv`.
    pub output_path: Option<PathBuf>,
}

impl TranslateConfig {
    pub fn new(mapping_path: impl Into<PathBuf>, paths: AppPaths) -> Self {
        Self {
            mapping_path: mapping_path.into(),
            paths,
            temp_root: None,
            output_path: None,
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .clone()
            .unwrap_or_else(|| self.paths.import_output())
    }

    pub fn locator(&self) -> ExportLocator {
        let locator = ExportLocator::new(&self.paths);
        match &self.temp_root {
            Some(root) => locator.with_temp_root(root),
            None => locator,
        }
    }
}

// ============================================================================
// Stage 1: Load mapping
// ============================================================================

pub fn load_mapping(path: &Path) -> Result<CodeMapping> {
    info!("Loading code mapping from {}", path.display());
    let mapping = load_code_mapping(path).context("load code mapping")?;
    info!(entries = mapping.len(), "code mapping loaded");
    Ok(mapping)
}

// ============================================================================
// Stage 2: Locate
// ============================================================================

pub fn locate_export(locator: &ExportLocator) -> Result<LocatedExport> {
    let located = locator.locate().context("locate export file")?;
    match located.source {
        ExportSource::Local => info!("Using local export file: {}", located.path.display()),
        ExportSource::TempScan => info!(
            "Found export file in temp directory: {}",
            located.path.display()
        ),
    }
    Ok(located)
}

// ============================================================================
// Stage 3: Read
// ============================================================================

pub fn read_table(path: &Path) -> Result<DataFrame> {
    info!("Processing export file: {}", path.display());
    let df = read_export_table(path).with_context(|| format!("read {}", path.display()))?;
    info!(rows = df.height(), columns = df.width(), "export loaded");
    Ok(df)
}

/// Warns about complaint numbers that appear on more than one row.
pub fn check_duplicates(df: &DataFrame) -> Result<Vec<DuplicateValue>> {
    let duplicates = find_duplicates(df, COMPLAINT_NUMBER).context("scan complaint numbers")?;
    if !duplicates.is_empty() {
        let examples: Vec<String> = duplicates
            .iter()
            .take(DUPLICATE_EXAMPLES)
            .map(|dup| format!("{} (x{})", redact_value(&dup.value), dup.count))
            .collect();
        warn!(
            duplicates = duplicates.len(),
            examples = %examples.join(", "),
            "export contains duplicate complaint numbers"
        );
    }
    Ok(duplicates)
}

// ============================================================================
// Stage 4: Transform
// ============================================================================

pub fn transform(df: DataFrame, mapping: &CodeMapping) -> Result<(DataFrame, TranslationStats)> {
    info!("Translating codes and subcategories...");
    let (df, stats) = translate_export(df, mapping).context("translate export")?;
    info!(
        rows = stats.rows,
        codes_mapped = stats.codes_mapped,
        codes_unmapped = stats.codes_unmapped,
        subcategories = stats.subcategories_joined,
        "translation complete"
    );
    if stats.malformed_fields() > 0 {
        warn!(
            codes = stats.codes_malformed,
            subcategories = stats.subcategories_malformed,
            "normalized fields that were not JSON string arrays"
        );
    }
    Ok((df, stats))
}

// ============================================================================
// Stage 5: Write
// ============================================================================

pub fn write_output(df: &mut DataFrame, path: &Path) -> Result<PathBuf> {
    let written = write_import_csv(df, path).context("write import CSV")?;
    info!("Processed CSV saved to: {}", written.display());
    Ok(written)
}

/// Runs all five stages.
pub fn run_translate(config: &TranslateConfig) -> Result<TranslateResult> {
    let run_span = info_span!("translate", mapping = %config.mapping_path.display());
    let _run_guard = run_span.enter();
    let start = Instant::now();

    let mapping = info_span!("load_mapping").in_scope(|| load_mapping(&config.mapping_path))?;

    let locator = config.locator();
    let export = info_span!("locate").in_scope(|| locate_export(&locator))?;

    let (df, duplicates) = info_span!("read", path = %export.path.display()).in_scope(|| {
        let df = read_table(&export.path)?;
        let duplicates = check_duplicates(&df)?;
        Ok::<_, anyhow::Error>((df, duplicates))
    })?;

    let (mut table, stats) = info_span!("transform").in_scope(|| transform(df, &mapping))?;

    let output_path = config.output_path();
    let output_path =
        info_span!("write", path = %output_path.display()).in_scope(|| write_output(&mut table, &output_path))?;

    info!(elapsed_ms = start.elapsed().as_millis() as u64, "pipeline finished");

    Ok(TranslateResult {
        mapping_path: config.mapping_path.clone(),
        mapping_entries: mapping.len(),
        export,
        output_path,
        table,
        stats,
        duplicates,
    })
}
