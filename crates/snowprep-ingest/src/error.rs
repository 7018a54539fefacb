//! Error types for export ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the mapping or the export.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Configuration Errors ===
    /// Mapping file missing or unreadable.
    #[error("failed to read code mapping {path}: {source}")]
    MappingRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Mapping file is not a JSON object of strings.
    #[error("failed to parse code mapping {path}: {source}")]
    MappingParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    // === File System Errors ===
    /// Failed to create the data directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// No export found at the local path or under the temp root.
    #[error("could not find {file_name} at {local} or anywhere under {temp_root}")]
    ExportNotFound {
        file_name: String,
        local: PathBuf,
        temp_root: PathBuf,
    },

    /// CSV file not found.
    #[error("CSV file not found: {path}")]
    FileNotFound { path: PathBuf },

    // === CSV Parsing Errors ===
    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {path}: {message}")]
    CsvParse { path: PathBuf, message: String },

    /// Required column not found in the export.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
