//! Tests for loading an input directory into a table set.

use std::fs;
use std::path::Path;

use polars::prelude::{AnyValue, DataType};
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

use vr_ingest::{IngestError, ReadError, load_tables};

enum Cell {
    Num(f64),
    Text(&'static str),
    Blank,
}

fn write_workbook(path: &Path, headers: &[&str], rows: &[Vec<Cell>]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header).unwrap();
    }
    for (row_idx, row) in rows.iter().enumerate() {
        let row_num = row_idx as u32 + 1;
        for (col, cell) in row.iter().enumerate() {
            let col = col as u16;
            match cell {
                Cell::Num(value) => {
                    worksheet.write_number(row_num, col, *value).unwrap();
                }
                Cell::Text(value) => {
                    worksheet.write_string(row_num, col, *value).unwrap();
                }
                Cell::Blank => {}
            }
        }
    }
    workbook.save(path).unwrap();
}

fn scenario_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    write_workbook(
        &dir.path().join("Ativos.xlsx"),
        &["Matrícula", "Nome"],
        &[
            vec![Cell::Num(1.0), Cell::Text("Ana")],
            vec![Cell::Num(2.0), Cell::Text("Bo")],
        ],
    );
    write_workbook(
        &dir.path().join("Férias.xlsx"),
        &["matricula", "dias"],
        &[vec![Cell::Num(2.0), Cell::Num(10.0)]],
    );
    dir
}

#[test]
fn loads_every_workbook_under_its_normalized_name() {
    let dir = scenario_dir();
    let tables = load_tables(dir.path(), "xlsx").expect("load tables");

    assert_eq!(tables.len(), 2);
    assert_eq!(tables.names(), vec!["ativos", "ferias"]);

    let ativos = tables.get("ativos").unwrap();
    assert_eq!(ativos.height(), 2);
    assert_eq!(ativos.column_names(), vec!["Matrícula", "Nome"]);
    assert_eq!(
        ativos.data.column("Matrícula").unwrap().dtype(),
        &DataType::Int64
    );
    assert!(ativos.source().unwrap().ends_with("Ativos.xlsx"));

    let ferias = tables.get("ferias").unwrap();
    assert_eq!(
        ferias.data.column("dias").unwrap().get(0).unwrap(),
        AnyValue::Int64(10)
    );
}

#[test]
fn blank_cells_load_as_nulls() {
    let dir = TempDir::new().unwrap();
    write_workbook(
        &dir.path().join("Desligados.xlsx"),
        &["matricula", "data demissao", "comunicado"],
        &[
            vec![Cell::Num(7.0), Cell::Text("2025-04-10"), Cell::Blank],
            vec![Cell::Num(8.0), Cell::Blank, Cell::Text("OK")],
        ],
    );

    let tables = load_tables(dir.path(), "xlsx").unwrap();
    let desligados = tables.get("desligados").unwrap();
    assert_eq!(desligados.height(), 2);
    assert_eq!(desligados.data.column("comunicado").unwrap().null_count(), 1);
    assert_eq!(
        desligados.data.column("data demissao").unwrap().null_count(),
        1
    );
}

#[test]
fn empty_directory_is_no_input_found() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("leia-me.txt"), "nothing here").unwrap();

    let err = load_tables(dir.path(), "xlsx").unwrap_err();
    assert!(err.is_no_input());
}

#[test]
fn missing_directory_is_created() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("dados_entrada");

    let err = load_tables(&input, "xlsx").unwrap_err();
    assert!(matches!(err, IngestError::NoInputFound { .. }));
    assert!(input.is_dir());
}

#[test]
fn malformed_workbook_aborts_the_load() {
    let dir = scenario_dir();
    fs::write(dir.path().join("Desligados.xlsx"), b"not a zip archive").unwrap();

    let err = load_tables(dir.path(), "xlsx").unwrap_err();
    match err {
        IngestError::LoadFailure { path, source } => {
            assert!(path.ends_with("Desligados.xlsx"));
            assert!(matches!(source, ReadError::Workbook(_)));
        }
        other => panic!("expected load failure, got {other:?}"),
    }
}

#[test]
fn colliding_table_names_abort_the_load() {
    let dir = scenario_dir();
    write_workbook(
        &dir.path().join("FERIAS.xlsx"),
        &["matricula"],
        &[vec![Cell::Num(3.0)]],
    );

    let err = load_tables(dir.path(), "xlsx").unwrap_err();
    assert!(matches!(
        err,
        IngestError::DuplicateTableName { ref name, .. } if name == "ferias"
    ));
}

#[test]
fn csv_exports_load_with_the_same_naming() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("Admissão Abril.csv"),
        "Matrícula,Admissão\n15,2025-04-01\n16,2025-04-15\n",
    )
    .unwrap();

    let tables = load_tables(dir.path(), "csv").unwrap();
    let admissao = tables.get("admissaoabril").expect("admissaoabril table");
    assert_eq!(admissao.height(), 2);
    assert_eq!(admissao.width(), 2);
}

#[test]
fn csv_key_with_late_text_value_loads_as_text() {
    let dir = TempDir::new().unwrap();
    let mut content = String::from("matricula,nome\n");
    for id in 1..=150 {
        content.push_str(&format!("{id},pessoa {id}\n"));
    }
    content.push_str("A-11,late\n");
    fs::write(dir.path().join("Ativos.csv"), content).unwrap();

    let tables = load_tables(dir.path(), "csv").unwrap();
    let ativos = tables.get("ativos").expect("ativos table");
    assert_eq!(ativos.height(), 151);
    let keys = ativos.data.column("matricula").unwrap();
    assert_eq!(keys.dtype(), &DataType::String);
    assert_eq!(keys.get(150).unwrap(), AnyValue::String("A-11"));
}

#[test]
fn unsupported_extension_is_rejected() {
    let dir = TempDir::new().unwrap();
    let err = load_tables(dir.path(), "txt").unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedFormat { .. }));
}
