//! Airtable export for complaint records.
//!
//! This crate produces the two files the translator consumes:
//!
//! - `code_mapping.json` (record id → code name)
//! - `data/airtable_export_final.csv` (one row per complaint)
//!
//! Requests are blocking and paginated with Airtable's `offset` cursor.

pub mod client;
pub mod config;
pub mod error;
pub mod export;
pub mod types;

pub use client::AirtableClient;
pub use config::{AirtableConfig, REVIEW_STATUS_FILTER};
pub use error::{AirtableError, Result};
pub use export::{
    DuplicateGroup, DedupeOutcome, EXPORT_HEADERS, build_name_map, dedupe_records, export_row,
    subcategory_names, write_export_csv, write_mapping_json,
};
pub use types::{AirtableRecord, RecordPage};
