//! Integration tests for export file writing.

use serde_json::json;
use tempfile::TempDir;

use snowprep_airtable::{AirtableRecord, build_name_map, write_export_csv, write_mapping_json};
use snowprep_model::CodeMapping;

fn record(id: &str, fields: serde_json::Value) -> AirtableRecord {
    AirtableRecord {
        id: id.to_string(),
        fields: fields.as_object().cloned().unwrap_or_default(),
        created_time: None,
    }
}

#[test]
fn export_csv_has_fixed_header_and_one_row_per_record() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("data/airtable_export_final.csv");
    let codes: CodeMapping = [("recC1", "Billing Error")].into_iter().collect();
    let records = vec![
        record("rec1", json!({"Complaint Number": "C-1", "Codes": ["recC1"]})),
        record("rec2", json!({"Complaint Number": "C-2"})),
    ];

    write_export_csv(&path, &records, &codes, &CodeMapping::new()).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 3);
    insta::assert_snapshot!(lines[0], @"Complaint Number,Assignee,Review Status,Case Number,Complaint Link,Primary Issue Root Cause,Codes,Product Type Sub Category,Insights Review Notes,Created,Last Modified,Complaint Statements,Substantiation,Redress Required,Regulatory Case Spend,Month Closed,Product Type,Primary Issue,Spirit Bucket,Workflow,Resulting Action,Code Category,Secondary Issue,Secondary Issue Root Cause,Redress Requested,Review Completed At,Redress Paid,Edge Case Fields,Edge Case Notes,Edge Case,Edge Case Reviewed,Required Fields Complete");
    assert!(lines[1].starts_with(r#"C-1,,,,,,"[""Billing Error""]",[],"#));
    assert!(lines[2].starts_with("C-2,,,,,,[],[],"));
}

#[test]
fn mapping_json_is_readable_as_code_mapping() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("code_mapping.json");
    let records = vec![
        record("recC1", json!({"Code Name": "Billing Error"})),
        record("recC2", json!({"Code Name": "Late Fee"})),
    ];
    let mapping = build_name_map(&records, "Code Name");

    write_mapping_json(&path, &mapping).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("\n  \"recC1\": \"Billing Error\""));
    let reloaded: CodeMapping = serde_json::from_str(&contents).unwrap();
    assert_eq!(reloaded, mapping);
}
