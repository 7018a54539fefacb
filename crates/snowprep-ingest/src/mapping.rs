//! Code mapping loader.

use std::path::Path;

use snowprep_model::CodeMapping;

use crate::error::{IngestError, Result};

/// Loads the code → label mapping from a JSON object file.
///
/// There is no fallback: a missing, unreadable, or malformed file is an error.
pub fn load_code_mapping(path: &Path) -> Result<CodeMapping> {
    let contents = std::fs::read_to_string(path).map_err(|e| IngestError::MappingRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mapping: CodeMapping =
        serde_json::from_str(&contents).map_err(|e| IngestError::MappingParse {
            path: path.to_path_buf(),
            source: e,
        })?;
    tracing::debug!(path = %path.display(), entries = mapping.len(), "loaded code mapping");
    Ok(mapping)
}
