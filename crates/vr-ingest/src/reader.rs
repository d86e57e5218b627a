//! Chooses a reader from the input extension.

use std::path::Path;

use polars::prelude::DataFrame;

use crate::csv::read_csv_table;
use crate::error::ReadError;
use crate::xlsx::read_workbook_table;

/// Source file formats the loader can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// Excel or OpenDocument workbook; the first worksheet is read.
    Workbook,
    /// Comma-separated text with a header row.
    Csv,
}

impl SourceFormat {
    /// Maps a file extension (case-insensitive, with or without dot) to a format.
    pub fn from_extension(extension: &str) -> Option<Self> {
        let extension = extension.trim_start_matches('.').to_ascii_lowercase();
        match extension.as_str() {
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Some(Self::Workbook),
            "csv" => Some(Self::Csv),
            _ => None,
        }
    }

    /// Reads one file of this format into a DataFrame.
    pub fn read(self, path: &Path) -> Result<DataFrame, ReadError> {
        match self {
            Self::Workbook => read_workbook_table(path),
            Self::Csv => read_csv_table(path),
        }
    }
}
