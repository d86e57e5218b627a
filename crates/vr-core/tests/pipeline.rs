//! End-to-end runs over workbook fixtures.

use std::fs;
use std::path::Path;

use polars::prelude::AnyValue;
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

use vr_core::{ConsolidationError, RunOutcome, profile_directory, run_pipeline};
use vr_model::RunConfig;

fn write_workbook(path: &Path, headers: &[&str], rows: &[&[f64]]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header).unwrap();
    }
    for (row_idx, row) in rows.iter().enumerate() {
        for (col, value) in row.iter().enumerate() {
            worksheet
                .write_number(row_idx as u32 + 1, col as u16, *value)
                .unwrap();
        }
    }
    workbook.save(path).unwrap();
}

fn write_ativos(dir: &Path) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "Matrícula").unwrap();
    worksheet.write_string(0, 1, "Nome").unwrap();
    worksheet.write_number(1, 0, 1.0).unwrap();
    worksheet.write_string(1, 1, "Ana").unwrap();
    worksheet.write_number(2, 0, 2.0).unwrap();
    worksheet.write_string(2, 1, "Bo").unwrap();
    workbook.save(dir.join("Ativos.xlsx")).unwrap();
}

fn config_for(dir: &Path) -> RunConfig {
    RunConfig::default().with_input_dir(dir)
}

#[test]
fn consolidates_active_employees_with_vacations() {
    let dir = TempDir::new().unwrap();
    write_ativos(dir.path());
    write_workbook(
        &dir.path().join("Férias.xlsx"),
        &["matricula", "dias"],
        &[&[2.0, 10.0]],
    );

    let outcome = run_pipeline(&config_for(dir.path()));
    assert_eq!(outcome.exit_code(), 0);

    let consolidated = outcome.consolidated().expect("consolidated outcome");
    let table = &consolidated.consolidation.table;
    assert_eq!(table.height(), 2);
    assert_eq!(table.column_names(), ["matricula", "nome", "dias"]);

    let dias = table.data.column("dias").unwrap();
    assert_eq!(dias.get(0).unwrap(), AnyValue::Null);
    assert_eq!(dias.get(1).unwrap(), AnyValue::Int64(10));
    assert_eq!(consolidated.consolidation.joined, ["ferias"]);
}

#[test]
fn prepared_tables_have_normalized_headers() {
    let dir = TempDir::new().unwrap();
    write_ativos(dir.path());

    let outcome = run_pipeline(&config_for(dir.path()));
    let tables = outcome.tables().expect("tables after run");
    let ativos = tables.get("ativos").unwrap();
    assert_eq!(ativos.column_names(), ["matricula", "nome"]);
}

#[test]
fn empty_input_directory_stops_gracefully() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("dados_entrada");

    let outcome = run_pipeline(&config_for(&input));

    assert!(matches!(outcome, RunOutcome::LoadFailed(ref err) if err.is_no_input()));
    assert_eq!(outcome.exit_code(), 2);
    assert!(outcome.tables().is_none());
    assert!(input.is_dir());
}

#[test]
fn unreadable_file_aborts_before_consolidation() {
    let dir = TempDir::new().unwrap();
    write_ativos(dir.path());
    fs::write(dir.path().join("Desligados.xlsx"), b"broken").unwrap();

    let outcome = run_pipeline(&config_for(dir.path()));

    assert!(matches!(outcome, RunOutcome::LoadFailed(_)));
    assert_eq!(outcome.exit_code(), 3);
}

#[test]
fn missing_base_table_keeps_prepared_tables() {
    let dir = TempDir::new().unwrap();
    write_workbook(
        &dir.path().join("Férias.xlsx"),
        &["Matrícula", "Dias"],
        &[&[2.0, 10.0]],
    );

    let outcome = run_pipeline(&config_for(dir.path()));
    assert_eq!(outcome.exit_code(), 4);

    match outcome {
        RunOutcome::ConsolidationFailed { prepared, error } => {
            assert!(matches!(error, ConsolidationError::MissingBaseTable { .. }));
            let ferias = prepared.tables.get("ferias").unwrap();
            assert_eq!(ferias.column_names(), ["matricula", "dias"]);
        }
        other => panic!("expected consolidation failure, got {other:?}"),
    }
}

#[test]
fn profiling_continues_past_unreadable_files() {
    let dir = TempDir::new().unwrap();
    write_ativos(dir.path());
    fs::write(dir.path().join("Desligados.xlsx"), b"broken").unwrap();

    let profiles = profile_directory(dir.path(), "xlsx").unwrap();

    assert_eq!(profiles.len(), 2);
    let ativos = profiles.iter().find(|p| p.table == "ativos").unwrap();
    let (profile, _) = ativos.outcome.as_ref().unwrap();
    assert_eq!(profile.rows, 2);
    assert_eq!(profile.columns, 2);

    let desligados = profiles.iter().find(|p| p.table == "desligados").unwrap();
    assert!(desligados.outcome.is_err());
}
