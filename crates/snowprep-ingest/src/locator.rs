//! Export file discovery.
//!
//! Search order:
//! 1. `<app-dir>/data/airtable_export_final.csv` (returned as soon as it exists)
//! 2. the newest file with the same name anywhere under the temp root
//!
//! Only regular files count: a directory at the local path falls through to
//! the temp scan.

use std::path::PathBuf;
use std::time::SystemTime;

use snowprep_model::{AppPaths, EXPORT_FILE_NAME};
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{IngestError, Result};

/// Which search location produced the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportSource {
    /// The fixed path under the application data directory.
    Local,
    /// A recursive scan of the temp root.
    TempScan,
}

/// An export file chosen by [`ExportLocator::locate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocatedExport {
    pub path: PathBuf,
    pub source: ExportSource,
}

/// A file found by the temp scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportCandidate {
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// Returns the most recently modified candidate.
///
/// Ties keep the candidate discovered first.
pub fn newest_candidate(candidates: &[ExportCandidate]) -> Option<&ExportCandidate> {
    candidates.iter().fold(None, |best, candidate| match best {
        Some(current) if candidate.modified <= current.modified => Some(current),
        _ => Some(candidate),
    })
}

/// Ordered search for the export file.
#[derive(Debug, Clone)]
pub struct ExportLocator {
    local_export: PathBuf,
    temp_root: PathBuf,
    file_name: String,
}

impl ExportLocator {
    /// Locator for the application's local export with the system temp
    /// directory as the fallback root.
    pub fn new(paths: &AppPaths) -> Self {
        Self {
            local_export: paths.local_export(),
            temp_root: std::env::temp_dir(),
            file_name: EXPORT_FILE_NAME.to_string(),
        }
    }

    #[must_use]
    pub fn with_temp_root(mut self, temp_root: impl Into<PathBuf>) -> Self {
        self.temp_root = temp_root.into();
        self
    }

    /// Finds the export, creating the local data directory if it is absent.
    pub fn locate(&self) -> Result<LocatedExport> {
        if let Some(parent) = self.local_export.parent() {
            std::fs::create_dir_all(parent).map_err(|e| IngestError::DirectoryCreate {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        if self.local_export.is_file() {
            return Ok(LocatedExport {
                path: self.local_export.clone(),
                source: ExportSource::Local,
            });
        }

        let candidates = self.scan_temp_root();
        debug!(
            temp_root = %self.temp_root.display(),
            candidates = candidates.len(),
            "scanned temp root for exports"
        );

        match newest_candidate(&candidates) {
            Some(candidate) => Ok(LocatedExport {
                path: candidate.path.clone(),
                source: ExportSource::TempScan,
            }),
            None => Err(IngestError::ExportNotFound {
                file_name: self.file_name.clone(),
                local: self.local_export.clone(),
                temp_root: self.temp_root.clone(),
            }),
        }
    }

    /// Lists every file under the temp root named like the export, in
    /// discovery order. Unreadable entries are skipped.
    pub fn scan_temp_root(&self) -> Vec<ExportCandidate> {
        let mut candidates = Vec::new();

        let walker = WalkDir::new(&self.temp_root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter();

        for entry_result in walker {
            let entry = match entry_result {
                Ok(entry) => entry,
                Err(error) => {
                    debug!(%error, "skipping unreadable temp entry");
                    continue;
                }
            };

            if !entry.file_type().is_file() || entry.file_name() != self.file_name.as_str() {
                continue;
            }

            let Some(modified) = entry.metadata().ok().and_then(|m| m.modified().ok()) else {
                debug!(path = %entry.path().display(), "skipping candidate without mtime");
                continue;
            };

            candidates.push(ExportCandidate {
                path: entry.into_path(),
                modified,
            });
        }

        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn candidate(path: &str, secs: u64) -> ExportCandidate {
        ExportCandidate {
            path: PathBuf::from(path),
            modified: SystemTime::UNIX_EPOCH + Duration::from_secs(secs),
        }
    }

    #[test]
    fn test_newest_candidate_picks_latest_mtime() {
        let candidates = vec![
            candidate("/tmp/a/airtable_export_final.csv", 100),
            candidate("/tmp/b/airtable_export_final.csv", 300),
            candidate("/tmp/c/airtable_export_final.csv", 200),
        ];

        let newest = newest_candidate(&candidates).unwrap();
        assert_eq!(newest.path, PathBuf::from("/tmp/b/airtable_export_final.csv"));
    }

    #[test]
    fn test_newest_candidate_tie_keeps_first_discovered() {
        let candidates = vec![
            candidate("/tmp/first/airtable_export_final.csv", 500),
            candidate("/tmp/second/airtable_export_final.csv", 500),
        ];

        let newest = newest_candidate(&candidates).unwrap();
        assert_eq!(
            newest.path,
            PathBuf::from("/tmp/first/airtable_export_final.csv")
        );
    }

    #[test]
    fn test_newest_candidate_empty() {
        assert!(newest_candidate(&[]).is_none());
    }
}
