//! Ingestion for the complaint export translator.
//!
//! # Features
//!
//! - **Code Mapping**: Load the code → label table from `code_mapping.json`
//! - **Export Discovery**: Find the export at the fixed local path, else the
//!   newest copy anywhere under the temp root
//! - **CSV Loading**: Read the export into a Polars DataFrame with every
//!   column kept as text
//!
//! # Example
//!
//! ```ignore
//! use snowprep_ingest::{ExportLocator, load_code_mapping, read_export_table};
//! use snowprep_model::AppPaths;
//!
//! let mapping = load_code_mapping("code_mapping.json".as_ref())?;
//! let located = ExportLocator::new(&AppPaths::from_env()).locate()?;
//! let df = read_export_table(&located.path)?;
//! ```

mod csv;
mod error;
mod locator;
mod mapping;

// === Error Types ===
pub use error::{IngestError, Result};

// === Code Mapping ===
pub use mapping::load_code_mapping;

// === Export Discovery ===
pub use locator::{ExportCandidate, ExportLocator, ExportSource, LocatedExport, newest_candidate};

// === CSV Reading ===
pub use csv::{ensure_required_columns, read_export_table};
