use std::error::Error;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use polars::prelude::{AnyValue, DataFrame};

use vr_common::{any_to_string, format_numeric};
use vr_core::{ColumnStats, Consolidation, ConsolidationWarning, FileProfile, TableProfile};
use vr_model::TableSet;

/// Loaded tables with their source file and shape.
pub fn print_tables(tables: &TableSet) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Source"),
        header_cell("Rows"),
        header_cell("Columns"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    for loaded in tables {
        let source = loaded
            .source()
            .and_then(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned());
        table.add_row(vec![
            name_cell(&loaded.name),
            source.map_or_else(|| dim_cell("-"), Cell::new),
            Cell::new(loaded.height()),
            Cell::new(loaded.width()),
        ]);
    }
    println!("Loaded tables:");
    println!("{table}");
}

/// Consolidated shape, joined tables, warnings and a row preview.
pub fn print_consolidation(consolidation: &Consolidation, preview_rows: usize) {
    let result = &consolidation.table;
    println!();
    println!(
        "Consolidated '{}': {} rows x {} columns",
        result.name,
        result.height(),
        result.width()
    );
    if consolidation.joined.is_empty() {
        println!("Joined tables: none");
    } else {
        println!("Joined tables: {}", consolidation.joined.join(", "));
    }
    println!("Columns: {}", result.column_names().join(", "));
    print_warnings(&consolidation.warnings);

    if preview_rows > 0 && result.height() > 0 {
        println!();
        println!("First {} rows:", preview_rows.min(result.height()));
        println!("{}", frame_table(&result.data, preview_rows));
    }
}

fn print_warnings(warnings: &[ConsolidationWarning]) {
    if warnings.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Table"), header_cell("Warning")]);
    apply_table_style(&mut table);
    for warning in warnings {
        table.add_row(vec![
            name_cell(warning.table()),
            Cell::new(warning.to_string()).fg(Color::Yellow),
        ]);
    }
    println!();
    println!("Warnings:");
    println!("{table}");
}

/// Prints an error and its chain of causes to stderr.
pub fn print_failure(label: &str, error: &dyn Error) {
    eprintln!("{label}: {error}");
    let mut source = error.source();
    while let Some(cause) = source {
        eprintln!("  caused by: {cause}");
        source = cause.source();
    }
}

/// Per-file profiles: shape, head sample, column summary and statistics.
pub fn print_profiles(profiles: &[FileProfile], head_rows: usize) {
    for profile in profiles {
        let filename = profile
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        println!();
        println!("== {filename} (table '{}') ==", profile.table);
        match &profile.outcome {
            Ok((summary, data)) => {
                println!("Shape: {} rows x {} columns", summary.rows, summary.columns);
                if head_rows > 0 && summary.rows > 0 {
                    println!("{}", frame_table(data, head_rows));
                }
                println!("{}", column_table(summary));
            }
            Err(error) => print_failure("Could not read file", error),
        }
    }
}

fn column_table(profile: &TableProfile) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("Nulls"),
        header_cell("Null %"),
        header_cell("Unique"),
        header_cell("Count"),
        header_cell("Mean / Top"),
        header_cell("Std / Freq"),
        header_cell("Min"),
        header_cell("Max"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..10 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for column in &profile.column_profiles {
        let mut row = vec![
            name_cell(&column.name),
            dim_cell(&column.dtype),
            count_cell(column.null_count),
            Cell::new(format!("{:.1}", column.null_percent)),
            Cell::new(column.unique_count),
        ];
        match &column.stats {
            ColumnStats::Numeric {
                count,
                mean,
                std,
                min,
                max,
            } => row.extend([
                Cell::new(count),
                stat_cell(*mean),
                stat_cell(*std),
                stat_cell(*min),
                stat_cell(*max),
            ]),
            ColumnStats::Text {
                count,
                top,
                frequency,
            } => row.extend([
                Cell::new(count),
                top.as_deref().map_or_else(|| dim_cell("-"), Cell::new),
                Cell::new(frequency),
                dim_cell("-"),
                dim_cell("-"),
            ]),
        }
        table.add_row(row);
    }
    table
}

/// Renders the first `limit` rows of a DataFrame; nulls show as a dimmed `null`.
pub fn frame_table(data: &DataFrame, limit: usize) -> Table {
    let mut table = Table::new();
    table.set_header(
        data.get_column_names()
            .into_iter()
            .map(|name| header_cell(name.as_str()))
            .collect::<Vec<_>>(),
    );
    apply_table_style(&mut table);
    for row in 0..data.height().min(limit) {
        let cells: Vec<Cell> = data
            .get_columns()
            .iter()
            .map(|column| match column.get(row) {
                Ok(AnyValue::Null) | Err(_) => dim_cell("null"),
                Ok(value) => Cell::new(any_to_string(value)),
            })
            .collect();
        table.add_row(cells);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn name_cell(name: &str) -> Cell {
    Cell::new(name)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Yellow)
    } else {
        dim_cell(count)
    }
}

fn stat_cell(value: Option<f64>) -> Cell {
    match value {
        Some(value) => Cell::new(format_numeric((value * 100.0).round() / 100.0)),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{IntoColumn, NamedFrom, Series};

    #[test]
    fn frame_table_limits_rows() {
        let data = DataFrame::new(vec![
            Series::new("matricula".into(), &[1i64, 2, 3]).into_column(),
            Series::new("dias".into(), &[Some(10i64), None, Some(5)]).into_column(),
        ])
        .unwrap();
        let mut table = frame_table(&data, 2);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column_count(), 2);
    }

    #[test]
    fn stat_cell_rounds_to_two_places() {
        let cell = stat_cell(Some(2.0 / 3.0));
        assert_eq!(cell.content(), "0.67");
    }
}
