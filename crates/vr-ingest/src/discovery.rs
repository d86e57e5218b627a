//! Input directory bootstrapping and spreadsheet discovery.

use std::path::{Path, PathBuf};

use vr_common::normalize_name;

use crate::error::{IngestError, Result};

/// Prefix Office uses for lock files next to an open workbook.
const LOCK_FILE_PREFIX: &str = "~$";

/// Creates the input directory if it does not exist yet.
///
/// Returns `true` when the directory was created by this call.
pub fn ensure_input_dir(dir: &Path) -> Result<bool> {
    if dir.is_dir() {
        return Ok(false);
    }
    std::fs::create_dir_all(dir).map_err(|e| IngestError::DirectoryCreate {
        path: dir.to_path_buf(),
        source: e,
    })?;
    tracing::info!(path = %dir.display(), "created input directory");
    Ok(true)
}

/// Lists all files with the given extension directly inside `dir`.
///
/// The extension match is case-insensitive; subdirectories and Office lock
/// files are skipped. Returns files sorted by filename.
pub fn list_spreadsheet_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let extension = extension.trim_start_matches('.');
    let mut files = Vec::new();

    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();

        if !path.is_file() {
            continue;
        }

        let is_lock_file = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(LOCK_FILE_PREFIX));
        if is_lock_file {
            tracing::debug!(path = %path.display(), "skipping office lock file");
            continue;
        }

        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));

        if matches {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}

/// Derives the table name for a file: its normalized stem.
///
/// `dados_entrada/Admissão Abril.xlsx` becomes `admissaoabril`.
pub fn table_name_for(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default();
    normalize_name(&stem)
}
