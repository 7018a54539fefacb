//! Error types for the Airtable export.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AirtableError {
    /// Request could not be sent or the body could not be read.
    #[error("network error: {0}")]
    Network(String),

    /// Non-success HTTP status.
    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response carried an `error` object.
    #[error("API error: {0}")]
    Api(String),

    /// The response had no `records` array.
    #[error("unexpected response format: {0}")]
    UnexpectedFormat(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl From<reqwest::Error> for AirtableError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AirtableError>;
