//! Tests for merging the TOML manifest with command-line overrides.

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;
use vr_cli::settings::{Overrides, resolve_config};
use vr_model::{ConfigError, DuplicateKeyPolicy};

fn write_manifest(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("vr-agent.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn manifest_values_are_used() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(
        &dir,
        r#"
input_dir = "exports/abril"
extension = "csv"
preview_rows = 10

[consolidation]
base_table = "Ativos"
join_tables = ["Férias", "Admissão Abril"]
duplicate_keys = "reject"
"#,
    );

    let config = resolve_config(&Overrides {
        config: Some(path),
        ..Overrides::default()
    })
    .unwrap();

    assert_eq!(config.input_dir, PathBuf::from("exports/abril"));
    assert_eq!(config.extension, "csv");
    assert_eq!(config.preview_rows, 10);
    assert_eq!(config.consolidation.join_tables, ["ferias", "admissaoabril"]);
    assert_eq!(config.consolidation.key, "matricula");
    assert_eq!(config.consolidation.duplicate_keys, DuplicateKeyPolicy::Reject);
}

#[test]
fn flags_override_manifest() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(
        &dir,
        r#"
input_dir = "exports"

[consolidation]
join_tables = ["ferias"]
duplicate_keys = "reject"
"#,
    );

    let config = resolve_config(&Overrides {
        config: Some(path),
        input_dir: Some(PathBuf::from("outro")),
        join_tables: vec!["Desligados".to_string()],
        duplicate_keys: Some(DuplicateKeyPolicy::KeepFirst),
        preview_rows: Some(0),
        ..Overrides::default()
    })
    .unwrap();

    assert_eq!(config.input_dir, PathBuf::from("outro"));
    assert_eq!(config.consolidation.join_tables, ["desligados"]);
    assert_eq!(
        config.consolidation.duplicate_keys,
        DuplicateKeyPolicy::KeepFirst
    );
    assert_eq!(config.preview_rows, 0);
}

#[test]
fn unknown_manifest_field_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(&dir, "input_directory = \"x\"\n");

    let err = resolve_config(&Overrides {
        config: Some(path),
        ..Overrides::default()
    })
    .unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn misspelled_consolidation_field_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(
        &dir,
        "[consolidation]\njoin_table = [\"x\"]\nbase_tabel = \"y\"\n",
    );

    let err = resolve_config(&Overrides {
        config: Some(path),
        ..Overrides::default()
    })
    .unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
}

#[test]
fn join_tables_may_not_include_the_base_table() {
    let dir = TempDir::new().unwrap();
    let path = write_manifest(
        &dir,
        r#"
[consolidation]
base_table = "Ativos"
join_tables = ["Férias", "ativos"]
"#,
    );

    let err = resolve_config(&Overrides {
        config: Some(path),
        ..Overrides::default()
    })
    .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidValue {
            field: "consolidation.join_tables",
            ..
        }
    ));
}

#[test]
fn missing_manifest_is_read_error() {
    let dir = TempDir::new().unwrap();

    let err = resolve_config(&Overrides {
        config: Some(dir.path().join("absent.toml")),
        ..Overrides::default()
    })
    .unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}
