//! Error types for spreadsheet ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Why a single file could not be turned into a table.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The workbook container could not be opened or parsed.
    #[error("failed to open workbook: {0}")]
    Workbook(#[from] calamine::Error),

    /// The workbook has no worksheet to read.
    #[error("workbook has no worksheets")]
    NoWorksheet,

    /// The file uses an encoding the CSV reader cannot handle.
    #[error("unsupported encoding {encoding}")]
    UnsupportedEncoding { encoding: &'static str },

    /// Failed to read the file from disk.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Failed to build or parse the table with Polars.
    #[error("{0}")]
    DataFrame(#[from] polars::prelude::PolarsError),
}

/// Errors that can occur while discovering and loading input tables.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Input directory could not be created.
    #[error("failed to create input directory {path}: {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Discovery Errors ===
    /// No file with the configured extension exists in the input directory.
    #[error("no .{extension} files found in {path}")]
    NoInputFound { path: PathBuf, extension: String },

    /// The configured extension has no reader.
    #[error("unsupported input extension .{extension}")]
    UnsupportedFormat { extension: String },

    // === Load Errors ===
    /// A discovered file could not be loaded; the whole load is aborted.
    #[error("failed to load {path}: {source}")]
    LoadFailure {
        path: PathBuf,
        #[source]
        source: ReadError,
    },

    /// Two files normalize to the same table name.
    #[error("{first} and {second} both map to table '{name}'")]
    DuplicateTableName {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },
}

impl IngestError {
    /// True when discovery simply found nothing to do.
    pub fn is_no_input(&self) -> bool {
        matches!(self, Self::NoInputFound { .. })
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::NoInputFound {
            path: PathBuf::from("dados_entrada"),
            extension: "xlsx".to_string(),
        };
        assert_eq!(err.to_string(), "no .xlsx files found in dados_entrada");
        assert!(err.is_no_input());
    }

    #[test]
    fn test_load_failure_keeps_cause() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("matricula".into());
        let err = IngestError::LoadFailure {
            path: PathBuf::from("dados_entrada/Ativos.xlsx"),
            source: polars_err.into(),
        };
        assert!(!err.is_no_input());
        let source = std::error::Error::source(&err).expect("cause");
        assert!(source.to_string().contains("matricula"));
    }
}
