//! Import table output.
//!
//! Writes the translated DataFrame as a headed CSV. Null cells are written
//! as empty fields and quoting is applied only where needed.

use std::fs::File;
use std::path::{Path, PathBuf};

use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to create {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write CSV {path}: {message}")]
    Write { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, OutputError>;

/// Writes `df` to `path`, creating the parent directory if needed.
///
/// Returns the path written.
pub fn write_import_csv(df: &mut DataFrame, path: &Path) -> Result<PathBuf> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| OutputError::Create {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut file = File::create(path).map_err(|e| OutputError::Create {
        path: path.to_path_buf(),
        source: e,
    })?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(df)
        .map_err(|e| OutputError::Write {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    tracing::debug!(
        path = %path.display(),
        rows = df.height(),
        "wrote import table"
    );

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{Column, IntoColumn, NamedFrom, Series};
    use tempfile::TempDir;

    fn test_df() -> DataFrame {
        let cols: Vec<Column> = vec![
            Series::new("Complaint Number".into(), vec![Some("1"), Some("2")]).into_column(),
            Series::new(
                "Codes".into(),
                vec![Some(r#"["Billing Error","Z9"]"#), None],
            )
            .into_column(),
            Series::new(
                "Product Type Sub Category".into(),
                vec![Some("Loans,Mortgage"), None],
            )
            .into_column(),
        ];
        DataFrame::new(cols).unwrap()
    }

    #[test]
    fn test_write_import_csv_quotes_and_nulls() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data/snowflake_import.csv");
        let mut df = test_df();

        let written = write_import_csv(&mut df, &path).unwrap();
        assert_eq!(written, path);

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "Complaint Number,Codes,Product Type Sub Category");
        assert_eq!(
            lines[1],
            r#"1,"[""Billing Error"",""Z9""]","Loans,Mortgage""#
        );
        assert_eq!(lines[2], "2,,");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_write_import_csv_overwrites_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("snowflake_import.csv");
        std::fs::write(&path, "stale\nstale\nstale\nstale\n").unwrap();

        let mut df = test_df();
        write_import_csv(&mut df, &path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 3);
        assert!(!contents.contains("stale"));
    }
}
