//! Descriptive profiles of input tables.
//!
//! Profiling inspects each input file on its own, so a file that fails to
//! read is reported next to the others instead of aborting the run.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use polars::prelude::{Column, DataFrame, DataType};
use tracing::{info, info_span, warn};
use vr_common::{any_to_f64, key_text};
use vr_ingest::{
    IngestError, ReadError, SourceFormat, ensure_input_dir, list_spreadsheet_files,
    table_name_for,
};

/// Shape and per-column summaries of one table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableProfile {
    pub rows: usize,
    pub columns: usize,
    pub column_profiles: Vec<ColumnProfile>,
}

/// Summary of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnProfile {
    pub name: String,
    pub dtype: String,
    pub null_count: usize,
    /// Share of null cells, in percent of the row count.
    pub null_percent: f64,
    /// Distinct non-null values.
    pub unique_count: usize,
    pub stats: ColumnStats,
}

/// Descriptive statistics, by column kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnStats {
    Numeric {
        count: usize,
        mean: Option<f64>,
        /// Sample standard deviation; needs at least two values.
        std: Option<f64>,
        min: Option<f64>,
        max: Option<f64>,
    },
    Text {
        count: usize,
        /// Most frequent value; ties go to the value seen first.
        top: Option<String>,
        frequency: usize,
    },
}

/// Profile of one input file, or the reason it could not be read.
#[derive(Debug)]
pub struct FileProfile {
    pub path: PathBuf,
    pub table: String,
    pub outcome: Result<(TableProfile, DataFrame), ReadError>,
}

/// Profiles every input file of `dir` with the given extension.
///
/// Only discovery errors are returned as `Err`; per-file read failures are
/// recorded in [`FileProfile::outcome`].
pub fn profile_directory(dir: &Path, extension: &str) -> Result<Vec<FileProfile>, IngestError> {
    let span = info_span!("profile", input_dir = %dir.display(), extension = %extension);
    let _guard = span.enter();

    let format =
        SourceFormat::from_extension(extension).ok_or_else(|| IngestError::UnsupportedFormat {
            extension: extension.trim_start_matches('.').to_string(),
        })?;
    ensure_input_dir(dir)?;
    let files = list_spreadsheet_files(dir, extension)?;
    if files.is_empty() {
        return Err(IngestError::NoInputFound {
            path: dir.to_path_buf(),
            extension: extension.trim_start_matches('.').to_string(),
        });
    }

    let profiles = files
        .into_iter()
        .map(|path| {
            let table = table_name_for(&path);
            let outcome = format.read(&path).map(|df| (profile_table(&df), df));
            match &outcome {
                Ok((profile, _)) => {
                    info!(table = %table, rows = profile.rows, columns = profile.columns, "profiled table");
                }
                Err(error) => warn!(table = %table, %error, "could not read file"),
            }
            FileProfile {
                path,
                table,
                outcome,
            }
        })
        .collect();
    Ok(profiles)
}

/// Builds the profile of a DataFrame.
pub fn profile_table(df: &DataFrame) -> TableProfile {
    let rows = df.height();
    TableProfile {
        rows,
        columns: df.width(),
        column_profiles: df
            .get_columns()
            .iter()
            .map(|column| profile_column(column, rows))
            .collect(),
    }
}

fn profile_column(column: &Column, rows: usize) -> ColumnProfile {
    let null_count = column.null_count();
    let null_percent = if rows == 0 {
        0.0
    } else {
        null_count as f64 * 100.0 / rows as f64
    };

    let values: Vec<Option<String>> = (0..column.len())
        .map(|row| column.get(row).ok().and_then(key_text))
        .collect();
    let frequencies = frequencies(&values);

    let stats = if is_numeric(column.dtype()) {
        let numbers: Vec<f64> = (0..column.len())
            .filter_map(|row| column.get(row).ok().and_then(any_to_f64))
            .collect();
        numeric_stats(&numbers)
    } else {
        let count = values.iter().flatten().count();
        let (top, frequency) = frequencies
            .iter()
            .max_by(|a, b| a.1.0.cmp(&b.1.0).then(b.1.1.cmp(&a.1.1)))
            .map(|(value, (count, _))| (Some(value.clone()), *count))
            .unwrap_or((None, 0));
        ColumnStats::Text {
            count,
            top,
            frequency,
        }
    };

    ColumnProfile {
        name: column.name().to_string(),
        dtype: column.dtype().to_string(),
        null_count,
        null_percent,
        unique_count: frequencies.len(),
        stats,
    }
}

/// Value → (occurrences, first row seen).
fn frequencies(values: &[Option<String>]) -> HashMap<String, (usize, usize)> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    for (row, value) in values.iter().enumerate() {
        if let Some(value) = value {
            counts.entry(value.clone()).or_insert((0, row)).0 += 1;
        }
    }
    counts
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

fn numeric_stats(values: &[f64]) -> ColumnStats {
    let count = values.len();
    if count == 0 {
        return ColumnStats::Numeric {
            count,
            mean: None,
            std: None,
            min: None,
            max: None,
        };
    }
    let mean = values.iter().sum::<f64>() / count as f64;
    let std = (count > 1).then(|| {
        let variance =
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
        variance.sqrt()
    });
    ColumnStats::Numeric {
        count,
        mean: Some(mean),
        std,
        min: values.iter().copied().reduce(f64::min),
        max: values.iter().copied().reduce(f64::max),
    }
}
