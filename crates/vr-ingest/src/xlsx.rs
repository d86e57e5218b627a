//! Workbook reading: the first worksheet becomes one typed table.
//!
//! The first row of the used range is the header row. Each column gets a
//! single dtype from its cells:
//!
//! - integral numbers only → `Int64`
//! - numbers → `Float64`
//! - booleans only → `Boolean`
//! - anything else (text, dates, mixed) → `String`
//!
//! Empty cells, blank strings and cell errors are nulls.

use std::path::Path;

use calamine::{Data, DataType as _, Range, Reader, open_workbook_auto};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, PlSmallStr, Series};
use vr_common::{dedupe_name, format_numeric};

use crate::error::ReadError;

/// Largest magnitude at which an `f64` still holds every integer exactly.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Reads the first worksheet of a workbook into a DataFrame.
pub fn read_workbook_table(path: &Path) -> Result<DataFrame, ReadError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(ReadError::NoWorksheet)??;
    frame_from_range(&range)
}

/// Builds a DataFrame from a worksheet range whose first row is the header.
pub fn frame_from_range(range: &Range<Data>) -> Result<DataFrame, ReadError> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Ok(DataFrame::empty());
    };
    let headers = header_names(header_row);
    let body: Vec<&[Data]> = rows.filter(|row| !row.iter().all(is_blank)).collect();

    let columns: Vec<Column> = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let cells: Vec<&Data> = body
                .iter()
                .map(|row| row.get(idx).unwrap_or(&Data::Empty))
                .collect();
            build_column(name, &cells)
        })
        .collect();

    Ok(DataFrame::new(columns)?)
}

/// Header texts, with blank headers named by position and duplicates suffixed.
fn header_names(row: &[Data]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(row.len());
    for (idx, cell) in row.iter().enumerate() {
        let raw = cell_text(cell).unwrap_or_default();
        let base = if raw.is_empty() {
            format!("Unnamed: {idx}")
        } else {
            raw
        };
        let name = dedupe_name(&base, |candidate| names.iter().any(|n| n == candidate));
        names.push(name);
    }
    names
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Int,
    Float,
    Bool,
    Text,
}

fn infer_kind(cells: &[&Data]) -> ColumnKind {
    let mut integral = false;
    let mut fractional = false;
    let mut boolean = false;
    for cell in cells {
        match cell {
            Data::Int(_) => integral = true,
            Data::Float(v) if is_integral(*v) => integral = true,
            Data::Float(_) => fractional = true,
            Data::Bool(_) => boolean = true,
            cell if is_blank(cell) => {}
            _ => return ColumnKind::Text,
        }
    }
    let numeric = integral || fractional;
    match (numeric, boolean) {
        (true, true) | (false, false) => ColumnKind::Text,
        (false, true) => ColumnKind::Bool,
        (true, false) if fractional => ColumnKind::Float,
        (true, false) => ColumnKind::Int,
    }
}

fn build_column(name: &str, cells: &[&Data]) -> Column {
    let name: PlSmallStr = name.into();
    match infer_kind(cells) {
        ColumnKind::Int => {
            let values: Vec<Option<i64>> = cells.iter().map(|cell| cell_i64(cell)).collect();
            Series::new(name, values).into_column()
        }
        ColumnKind::Float => {
            let values: Vec<Option<f64>> = cells.iter().map(|cell| cell_f64(cell)).collect();
            Series::new(name, values).into_column()
        }
        ColumnKind::Bool => {
            let values: Vec<Option<bool>> = cells
                .iter()
                .map(|cell| match cell {
                    Data::Bool(b) => Some(*b),
                    _ => None,
                })
                .collect();
            Series::new(name, values).into_column()
        }
        ColumnKind::Text => {
            let values: Vec<Option<String>> = cells.iter().map(|cell| cell_text(cell)).collect();
            Series::new(name, values).into_column()
        }
    }
}

fn is_integral(value: f64) -> bool {
    value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_EXACT_INTEGER
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty | Data::Error(_) => true,
        Data::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

fn cell_i64(cell: &Data) -> Option<i64> {
    match cell {
        Data::Int(v) => Some(*v),
        Data::Float(v) if is_integral(*v) => Some(*v as i64),
        _ => None,
    }
}

fn cell_f64(cell: &Data) -> Option<f64> {
    match cell {
        Data::Int(v) => Some(*v as f64),
        Data::Float(v) => Some(*v),
        _ => None,
    }
}

/// Text form of a cell; `None` for blanks.
fn cell_text(cell: &Data) -> Option<String> {
    if is_blank(cell) {
        return None;
    }
    let text = match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Int(v) => v.to_string(),
        Data::Float(v) => format_numeric(*v),
        Data::Bool(b) => b.to_string(),
        Data::DateTime(_) => match cell.as_datetime() {
            Some(dt) if dt.time() == chrono::NaiveTime::MIN => dt.format("%Y-%m-%d").to_string(),
            Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => cell.to_string(),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Empty | Data::Error(_) => return None,
    };
    Some(text)
}
