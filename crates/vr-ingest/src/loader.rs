//! Loads every spreadsheet of the input directory into a [`TableSet`].
//!
//! Loading is all-or-nothing: the first file that fails to read aborts the
//! load and the partially filled set is dropped.

use std::path::Path;

use tracing::{debug, info, info_span};
use vr_model::{Table, TableSet};

use crate::discovery::{ensure_input_dir, list_spreadsheet_files, table_name_for};
use crate::error::{IngestError, Result};
use crate::reader::SourceFormat;

/// Discovers and loads all files with `extension` in `dir`.
///
/// Creates `dir` when it does not exist. Fails with
/// [`IngestError::NoInputFound`] when no file matches.
pub fn load_tables(dir: &Path, extension: &str) -> Result<TableSet> {
    let span = info_span!("load", input_dir = %dir.display(), extension = %extension);
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
    debug!(file_count = files.len(), "discovered input files");

    let mut tables = TableSet::new();
    for path in files {
        let name = table_name_for(&path);
        if let Some(existing) = tables.get(&name) {
            return Err(IngestError::DuplicateTableName {
                name,
                first: existing.source.clone().unwrap_or_default(),
                second: path,
            });
        }

        let data = format
            .read(&path)
            .map_err(|source| IngestError::LoadFailure {
                path: path.clone(),
                source,
            })?;

        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string();
        info!(
            table = %name,
            source_filename = %filename,
            rows = data.height(),
            columns = data.width(),
            "loaded table"
        );
        tables.insert(Table::new(name, data).with_source(path));
    }

    info!(table_count = tables.len(), "all input files loaded");
    Ok(tables)
}
