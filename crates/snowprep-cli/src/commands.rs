use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Local;
use comfy_table::Table;
use tracing::{debug, info, info_span, warn};

use snowprep_airtable::{
    AirtableClient, AirtableRecord, DuplicateGroup, REVIEW_STATUS_FILTER, build_name_map,
    dedupe_records, subcategory_names, write_export_csv, write_mapping_json,
};
use snowprep_cli::logging::redact_value;
use snowprep_cli::pipeline::{TranslateConfig, run_translate as run_translate_pipeline};
use snowprep_cli::types::{ExportSummary, TranslateResult};
use snowprep_model::{
    AppPaths, COMPLAINT_NUMBER, CodeMapping, MAPPING_FILE_NAME, SUBCATEGORY_MAPPING_FILE_NAME,
};

use crate::cli::{ExportArgs, TranslateArgs};

/// Duplicate groups described in detail in the export warning.
const DUPLICATE_DETAILS: usize = 5;

/// Records shown in the subcategory mapping debug sample.
const SUBCATEGORY_SAMPLE: usize = 5;

fn app_paths(app_dir: Option<&PathBuf>) -> AppPaths {
    match app_dir {
        Some(dir) => AppPaths::new(dir),
        None => AppPaths::from_env(),
    }
}

pub fn run_translate(args: &TranslateArgs) -> Result<TranslateResult> {
    let config = TranslateConfig {
        mapping_path: args.mapping.clone(),
        paths: app_paths(args.app_dir.as_ref()),
        temp_root: args.temp_root.clone(),
        output_path: args.output.clone(),
    };
    run_translate_pipeline(&config)
}

pub fn run_export(args: &ExportArgs) -> Result<ExportSummary> {
    let config = args.airtable_config();
    let paths = app_paths(args.app_dir.as_ref());
    let export_span = info_span!("export", base = %config.base_id);
    let _export_guard = export_span.enter();
    let start = Instant::now();
    info!(
        "Starting Airtable export at {}",
        Local::now().format("%Y-%m-%d %H:%M:%S")
    );

    let client = AirtableClient::new(args.api_key.clone()).context("create Airtable client")?;
    let mut summary = ExportSummary::default();

    let subcategories = info_span!("subcategories").in_scope(|| {
        info!("Fetching product type subcategories...");
        let records = client
            .fetch_records(&config.base_id, &config.subcategories_table_id, None)
            .context("fetch subcategories")?;
        let mapping = build_name_map(&records, "Name");
        let path = args.mapping_dir.join(SUBCATEGORY_MAPPING_FILE_NAME);
        write_mapping_json(&path, &mapping).context("write subcategory mapping")?;
        info!(entries = mapping.len(), "Saved subcategory mapping to {}", path.display());
        summary.subcategory_mapping = path;
        summary.subcategories = mapping.len();
        Ok::<_, anyhow::Error>(mapping)
    })?;

    let codes = info_span!("codes").in_scope(|| {
        info!("Fetching codes...");
        let records = client
            .fetch_records(&config.base_id, &config.codes_table_id, None)
            .context("fetch codes")?;
        let mapping = build_name_map(&records, "Code Name");
        let path = args.mapping_dir.join(MAPPING_FILE_NAME);
        write_mapping_json(&path, &mapping).context("write code mapping")?;
        info!(entries = mapping.len(), "Saved code mapping to {}", path.display());
        summary.code_mapping = path;
        summary.codes = mapping.len();
        Ok::<_, anyhow::Error>(mapping)
    })?;

    let records = info_span!("complaints").in_scope(|| {
        info!("Fetching complaints...");
        client
            .fetch_records(
                &config.base_id,
                &config.complaints_table_id,
                Some(REVIEW_STATUS_FILTER),
            )
            .context("fetch complaints")
    })?;
    summary.fetched_records = records.len();
    info!(records = records.len(), "Received complaint records");

    if records.is_empty() {
        warn!("No complaint records matched the review status filter");
        return Ok(summary);
    }

    let outcome = dedupe_records(records);
    summary.duplicate_numbers = outcome.duplicates.len();
    if !outcome.duplicates.is_empty() {
        warn_duplicates(&outcome.duplicates);
    }
    summary.exported_records = outcome.records.len();

    let output = paths.local_export();
    info_span!("write", path = %output.display())
        .in_scope(|| write_export_csv(&output, &outcome.records, &codes, &subcategories))
        .context("write export CSV")?;
    log_subcategory_sample(&outcome.records, &subcategories);
    summary.file_size_mb = file_size_mb(&output)?;
    info!(
        records = summary.exported_records,
        size_mb = summary.file_size_mb,
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Export saved to {}",
        output.display()
    );
    summary.export_file = Some(output);
    Ok(summary)
}

fn warn_duplicates(duplicates: &[DuplicateGroup]) {
    let extra: usize = duplicates.iter().map(|group| group.records.len() - 1).sum();
    warn!(
        complaint_numbers = duplicates.len(),
        extra_records = extra,
        "complaint numbers appear on more than one record; keeping the latest"
    );
    for group in duplicates.iter().take(DUPLICATE_DETAILS) {
        for record in &group.records {
            warn!(
                complaint_number = redact_value(&group.complaint_number),
                id = %record.id,
                created = record
                    .text("Created")
                    .or(record.created_time.as_deref())
                    .unwrap_or(""),
                last_modified = text_field(record, "Last Modified"),
                review_status = text_field(record, "Review Status"),
                "duplicate record"
            );
        }
    }
}

fn log_subcategory_sample(records: &[AirtableRecord], subcategories: &CodeMapping) {
    for record in records.iter().take(SUBCATEGORY_SAMPLE) {
        if let Some((ids, names)) = subcategory_names(record, subcategories) {
            debug!(
                complaint_number = redact_value(text_field(record, COMPLAINT_NUMBER)),
                ids = ?ids,
                names = ?names,
                "subcategory mapping sample"
            );
        }
    }
}

fn text_field<'a>(record: &'a AirtableRecord, name: &str) -> &'a str {
    record.text(name).unwrap_or("")
}

fn file_size_mb(path: &Path) -> Result<f64> {
    let metadata =
        std::fs::metadata(path).with_context(|| format!("stat {}", path.display()))?;
    Ok(metadata.len() as f64 / (1024.0 * 1024.0))
}

pub fn export_summary_table(summary: &ExportSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Item", "Value"]);
    snowprep_cli::report::apply_table_style(&mut table);
    table.add_row(vec![
        "Subcategory mapping".to_string(),
        format!(
            "{} ({} entries)",
            summary.subcategory_mapping.display(),
            summary.subcategories
        ),
    ]);
    table.add_row(vec![
        "Code mapping".to_string(),
        format!("{} ({} entries)", summary.code_mapping.display(), summary.codes),
    ]);
    table.add_row(vec![
        "Complaints fetched".to_string(),
        summary.fetched_records.to_string(),
    ]);
    table.add_row(vec![
        "Duplicate complaint numbers".to_string(),
        summary.duplicate_numbers.to_string(),
    ]);
    table.add_row(vec![
        "Complaints exported".to_string(),
        summary.exported_records.to_string(),
    ]);
    let file = match &summary.export_file {
        Some(path) => format!("{} ({:.2} MB)", path.display(), summary.file_size_mb),
        None => "-".to_string(),
    };
    table.add_row(vec!["Export file".to_string(), file]);
    table
}
