//! Application directory layout.

use std::path::{Path, PathBuf};

use crate::columns::{DATA_DIR_NAME, EXPORT_FILE_NAME, IMPORT_FILE_NAME};

/// Environment variable for overriding the application directory.
pub const APP_DIR_ENV_VAR: &str = "SNOWPREP_APP_DIR";

/// Paths derived from the application directory.
///
/// ```text
/// <app-dir>/data/airtable_export_final.csv   (local export)
/// <app-dir>/data/snowflake_import.csv        (translated output)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    app_dir: PathBuf,
}

impl AppPaths {
    pub fn new(app_dir: impl Into<PathBuf>) -> Self {
        Self {
            app_dir: app_dir.into(),
        }
    }

    /// Resolve the application directory.
    ///
    /// Resolution order:
    /// 1. `SNOWPREP_APP_DIR` environment variable
    /// 2. the current working directory
    pub fn from_env() -> Self {
        match std::env::var_os(APP_DIR_ENV_VAR) {
            Some(dir) if !dir.is_empty() => Self::new(dir),
            _ => Self::new("."),
        }
    }

    pub fn app_dir(&self) -> &Path {
        &self.app_dir
    }

    pub fn data_dir(&self) -> PathBuf {
        self.app_dir.join(DATA_DIR_NAME)
    }

    /// Fixed local location checked before any temp scan.
    pub fn local_export(&self) -> PathBuf {
        self.data_dir().join(EXPORT_FILE_NAME)
    }

    pub fn import_output(&self) -> PathBuf {
        self.data_dir().join(IMPORT_FILE_NAME)
    }
}
