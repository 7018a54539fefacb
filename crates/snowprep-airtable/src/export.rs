//! Flattening Airtable records into the export CSV.

use std::collections::HashMap;
use std::path::Path;

use serde_json::Value;
use snowprep_model::{CODE_CATEGORY, CODES, COMPLAINT_NUMBER, CodeMapping, SUBCATEGORY};

use crate::error::{AirtableError, Result};
use crate::types::AirtableRecord;

const LAST_MODIFIED: &str = "Last Modified";

/// Column order of `airtable_export_final.csv`.
pub const EXPORT_HEADERS: [&str; 32] = [
    COMPLAINT_NUMBER,
    "Assignee",
    "Review Status",
    "Case Number",
    "Complaint Link",
    "Primary Issue Root Cause",
    CODES,
    SUBCATEGORY,
    "Insights Review Notes",
    "Created",
    LAST_MODIFIED,
    "Complaint Statements",
    "Substantiation",
    "Redress Required",
    "Regulatory Case Spend",
    "Month Closed",
    "Product Type",
    "Primary Issue",
    "Spirit Bucket",
    "Workflow",
    "Resulting Action",
    CODE_CATEGORY,
    "Secondary Issue",
    "Secondary Issue Root Cause",
    "Redress Requested",
    "Review Completed At",
    "Redress Paid",
    "Edge Case Fields",
    "Edge Case Notes",
    "Edge Case",
    "Edge Case Reviewed",
    "Required Fields Complete",
];

/// Builds a record id → field value lookup (e.g. subcategory `Name`).
///
/// Records without a text value for `field` are skipped.
pub fn build_name_map(records: &[AirtableRecord], field: &str) -> CodeMapping {
    records
        .iter()
        .filter_map(|record| Some((record.id.clone(), record.text(field)?.to_string())))
        .collect()
}

/// Records sharing one complaint number.
#[derive(Debug, Clone, PartialEq)]
pub struct DuplicateGroup {
    pub complaint_number: String,
    pub records: Vec<AirtableRecord>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DedupeOutcome {
    /// One record per complaint number, in first-seen order.
    pub records: Vec<AirtableRecord>,
    /// Complaint numbers that appeared more than once, in first-seen order.
    pub duplicates: Vec<DuplicateGroup>,
}

/// Keeps the most recently modified record for each complaint number.
///
/// `Last Modified` values are compared as ISO-8601 strings; a later value
/// replaces the kept record in place. Records without a complaint number
/// share the empty key.
pub fn dedupe_records(records: Vec<AirtableRecord>) -> DedupeOutcome {
    let mut groups: Vec<DuplicateGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let key = render_value(record.field(COMPLAINT_NUMBER));
        match index.get(&key) {
            Some(&pos) => groups[pos].records.push(record),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(DuplicateGroup {
                    complaint_number: key,
                    records: vec![record],
                });
            }
        }
    }

    let mut outcome = DedupeOutcome::default();
    for group in groups {
        let keep = group
            .records
            .iter()
            .fold(None::<&AirtableRecord>, |kept, record| match kept {
                Some(current) if last_modified(current) >= last_modified(record) => Some(current),
                _ => Some(record),
            })
            .cloned();
        if let Some(record) = keep {
            outcome.records.push(record);
        }
        if group.records.len() > 1 {
            outcome.duplicates.push(group);
        }
    }
    outcome
}

fn last_modified(record: &AirtableRecord) -> Option<&str> {
    record.text(LAST_MODIFIED)
}

/// Renders a field value as CSV text.
///
/// Strings are written raw, numbers and booleans via their JSON form,
/// arrays and objects as compact JSON, and missing values as empty.
fn render_value(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

/// JSON array of looked-up names; non-array fields become `[]`.
fn mapped_id_array(value: Option<&Value>, mapping: &CodeMapping) -> String {
    let mapped: Vec<Value> = match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(id) => Value::String(mapping.translate(id).to_string()),
                other => other.clone(),
            })
            .collect(),
        _ => Vec::new(),
    };
    Value::Array(mapped).to_string()
}

/// Subcategory ids of a record and their mapped names, in field order.
///
/// `None` when the record has no `Product Type Sub Category` array.
pub fn subcategory_names(
    record: &AirtableRecord,
    subcategories: &CodeMapping,
) -> Option<(Vec<String>, Vec<String>)> {
    let Some(Value::Array(items)) = record.field(SUBCATEGORY) else {
        return None;
    };
    let ids: Vec<String> = items.iter().map(|item| render_value(Some(item))).collect();
    let names = ids
        .iter()
        .map(|id| subcategories.translate(id).to_string())
        .collect();
    Some((ids, names))
}

/// First element of an array field, or the field itself.
fn first_or_value(value: Option<&Value>) -> Option<&Value> {
    match value {
        Some(Value::Array(items)) => items.first(),
        other => other,
    }
}

/// Flattens one complaint record into [`EXPORT_HEADERS`] order.
pub fn export_row(
    record: &AirtableRecord,
    codes: &CodeMapping,
    subcategories: &CodeMapping,
) -> Vec<String> {
    EXPORT_HEADERS
        .iter()
        .map(|header| match *header {
            "Assignee" => render_value(record.field("Assignee").and_then(|a| a.get("name"))),
            "Primary Issue Root Cause" | "Secondary Issue Root Cause" => {
                render_value(first_or_value(record.field(header)))
            }
            CODES => mapped_id_array(record.field(CODES), codes),
            SUBCATEGORY => mapped_id_array(record.field(SUBCATEGORY), subcategories),
            CODE_CATEGORY => record
                .field(CODE_CATEGORY)
                .map(Value::to_string)
                .unwrap_or_default(),
            "Edge Case Fields" => {
                render_value(record.field("Which Field/s make this an edge case?"))
            }
            "Required Fields Complete" => {
                render_value(record.field("Required Fields Complete?"))
            }
            other => render_value(record.field(other)),
        })
        .collect()
}

/// Writes the export CSV with [`EXPORT_HEADERS`] as the header row.
pub fn write_export_csv(
    path: &Path,
    records: &[AirtableRecord],
    codes: &CodeMapping,
    subcategories: &CodeMapping,
) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| AirtableError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let csv_error = |e: csv::Error| AirtableError::Csv {
        path: path.to_path_buf(),
        source: e,
    };

    let mut writer = csv::Writer::from_path(path).map_err(csv_error)?;
    writer.write_record(EXPORT_HEADERS).map_err(csv_error)?;
    for record in records {
        writer
            .write_record(export_row(record, codes, subcategories))
            .map_err(csv_error)?;
    }
    writer.flush().map_err(|e| AirtableError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

/// Writes a lookup table as pretty-printed JSON.
pub fn write_mapping_json(path: &Path, mapping: &CodeMapping) -> Result<()> {
    let json = serde_json::to_string_pretty(mapping)?;
    std::fs::write(path, json).map_err(|e| AirtableError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: &str, fields: Value) -> AirtableRecord {
        AirtableRecord {
            id: id.to_string(),
            fields: fields.as_object().cloned().unwrap_or_default(),
            created_time: None,
        }
    }

    fn column<'a>(row: &'a [String], header: &str) -> &'a str {
        let idx = EXPORT_HEADERS.iter().position(|h| *h == header).unwrap();
        &row[idx]
    }

    #[test]
    fn build_name_map_skips_records_without_the_field() {
        let records = vec![
            record("rec1", json!({"Name": "Loans"})),
            record("rec2", json!({"Other": "x"})),
            record("rec3", json!({"Name": 7})),
        ];
        let map = build_name_map(&records, "Name");
        assert_eq!(map.len(), 1);
        assert_eq!(map.label("rec1"), Some("Loans"));
    }

    #[test]
    fn dedupe_keeps_latest_modified_in_first_seen_position() {
        let records = vec![
            record("a1", json!({"Complaint Number": "C-1", "Last Modified": "2024-01-01T00:00:00Z"})),
            record("b1", json!({"Complaint Number": "C-2", "Last Modified": "2024-01-01T00:00:00Z"})),
            record("a2", json!({"Complaint Number": "C-1", "Last Modified": "2024-03-01T00:00:00Z"})),
            record("a3", json!({"Complaint Number": "C-1", "Last Modified": "2024-02-01T00:00:00Z"})),
        ];

        let outcome = dedupe_records(records);

        let ids: Vec<&str> = outcome.records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a2", "b1"]);
        assert_eq!(outcome.duplicates.len(), 1);
        assert_eq!(outcome.duplicates[0].complaint_number, "C-1");
        assert_eq!(outcome.duplicates[0].records.len(), 3);
    }

    #[test]
    fn dedupe_equal_timestamps_keep_first_record() {
        let records = vec![
            record("first", json!({"Complaint Number": 12, "Last Modified": "2024-01-01"})),
            record("second", json!({"Complaint Number": 12, "Last Modified": "2024-01-01"})),
        ];
        let outcome = dedupe_records(records);
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.records[0].id, "first");
        assert_eq!(outcome.duplicates[0].complaint_number, "12");
    }

    #[test]
    fn export_row_maps_ids_and_flattens_fields() {
        let codes: CodeMapping = [("recC1", "Billing Error")].into_iter().collect();
        let subs: CodeMapping = [("recS1", "Mortgage")].into_iter().collect();
        let rec = record(
            "rec1",
            json!({
                "Complaint Number": 1001,
                "Assignee": {"id": "usr1", "name": "Dana Lee"},
                "Codes": ["recC1", "recC9"],
                "Product Type Sub Category": ["recS1"],
                "Primary Issue Root Cause": ["Process", "People"],
                "Code Category": ["Fees"],
                "Redress Required": true,
                "Which Field/s make this an edge case?": "Codes",
                "Required Fields Complete?": 1
            }),
        );

        let row = export_row(&rec, &codes, &subs);

        assert_eq!(row.len(), EXPORT_HEADERS.len());
        assert_eq!(column(&row, "Complaint Number"), "1001");
        assert_eq!(column(&row, "Assignee"), "Dana Lee");
        assert_eq!(column(&row, "Codes"), r#"["Billing Error","recC9"]"#);
        assert_eq!(column(&row, "Product Type Sub Category"), r#"["Mortgage"]"#);
        assert_eq!(column(&row, "Primary Issue Root Cause"), "Process");
        assert_eq!(column(&row, "Code Category"), r#"["Fees"]"#);
        assert_eq!(column(&row, "Redress Required"), "true");
        assert_eq!(column(&row, "Edge Case Fields"), "Codes");
        assert_eq!(column(&row, "Required Fields Complete"), "1");
        assert_eq!(column(&row, "Secondary Issue"), "");
    }

    #[test]
    fn subcategory_names_pair_ids_with_labels() {
        let subs: CodeMapping = [("recS1", "Mortgage")].into_iter().collect();
        let rec = record(
            "rec1",
            json!({"Product Type Sub Category": ["recS1", "recS9"]}),
        );

        let (ids, names) = subcategory_names(&rec, &subs).unwrap();

        assert_eq!(ids, vec!["recS1", "recS9"]);
        assert_eq!(names, vec!["Mortgage", "recS9"]);
        assert!(subcategory_names(&record("rec2", json!({})), &subs).is_none());
    }

    #[test]
    fn export_row_missing_arrays_become_empty_json() {
        let rec = record("rec1", json!({"Complaint Number": "C-1"}));
        let row = export_row(&rec, &CodeMapping::new(), &CodeMapping::new());

        assert_eq!(column(&row, "Codes"), "[]");
        assert_eq!(column(&row, "Product Type Sub Category"), "[]");
        assert_eq!(column(&row, "Code Category"), "");
        assert_eq!(column(&row, "Assignee"), "");
    }
}
