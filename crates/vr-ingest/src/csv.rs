//! CSV reading for exports that arrive as plain text instead of workbooks.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};

use crate::error::ReadError;

/// Rejects UTF-16 files, which the CSV reader would misparse silently.
///
/// A UTF-8 BOM is accepted.
pub fn validate_encoding(path: &Path) -> Result<(), ReadError> {
    let mut file = File::open(path)?;
    let mut buffer = [0u8; 2];
    let bytes_read = file.read(&mut buffer)?;

    if bytes_read == 2 {
        if buffer == [0xFF, 0xFE] {
            return Err(ReadError::UnsupportedEncoding {
                encoding: "UTF-16 LE",
            });
        }
        if buffer == [0xFE, 0xFF] {
            return Err(ReadError::UnsupportedEncoding {
                encoding: "UTF-16 BE",
            });
        }
    }

    Ok(())
}

/// Reads a CSV file with a single header row into a DataFrame.
pub fn read_csv_table(path: &Path) -> Result<DataFrame, ReadError> {
    validate_encoding(path)?;

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    Ok(df)
}
