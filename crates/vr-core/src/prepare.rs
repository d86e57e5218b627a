//! Header normalization for loaded tables.

use tracing::{debug, info_span, warn};
use vr_common::{dedupe_name, normalize_name};
use vr_model::{Table, TableSet};

/// Normalizes the column headers of every table in the set.
///
/// Column order and data are preserved. Headers that collapse to the same
/// normalized name keep the first occurrence as is and suffix later ones
/// (`nome`, `nome.1`).
pub fn prepare_tables(tables: TableSet) -> TableSet {
    let span = info_span!("prepare", table_count = tables.len());
    let _guard = span.enter();

    tables.into_iter().map(prepare_table).collect()
}

/// Normalizes the column headers of one table.
pub fn prepare_table(mut table: Table) -> Table {
    let names = normalized_headers(&table.column_names());
    if let Err(error) = table.data.set_column_names(names.iter().map(String::as_str)) {
        warn!(table = %table.name, %error, "column headers left unchanged");
        return table;
    }
    debug!(table = %table.name, columns = ?names, "normalized column headers");
    table
}

/// Normalized, collision-free header names in input order.
pub fn normalized_headers(headers: &[String]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(headers.len());
    for header in headers {
        let normalized = normalize_name(header);
        let name = dedupe_name(&normalized, |candidate| names.iter().any(|n| n == candidate));
        names.push(name);
    }
    names
}
