//! Left-join chain from the base table over the auxiliary tables.
//!
//! The base table fixes the output rows. Each auxiliary table that is present
//! and carries the join key contributes its non-key columns; base rows
//! without a match get nulls. Keys are matched on their textual form, so an
//! integer `1` in one export matches a float `1.0` or the text `"1"` in
//! another. Null keys never match.

use std::collections::HashMap;

use polars::prelude::{Column, DataFrame, IdxCa, IdxSize, NamedFrom, PlSmallStr};
use tracing::{debug, info, info_span, warn};
use vr_common::key_text;
use vr_model::{ConsolidationOptions, DuplicateKeyPolicy, Table, TableSet};

use crate::error::{ConsolidationError, ConsolidationWarning, Result};

/// Result of a successful consolidation.
#[derive(Debug, Clone)]
pub struct Consolidation {
    /// The consolidated table, named after the base table.
    pub table: Table,
    /// Auxiliary tables that were merged, in join order.
    pub joined: Vec<String>,
    /// Non-fatal conditions met along the way.
    pub warnings: Vec<ConsolidationWarning>,
}

impl Consolidation {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Joins the configured auxiliary tables onto the base table.
///
/// # Errors
///
/// - [`ConsolidationError::MissingBaseTable`] when the base table was not loaded
/// - [`ConsolidationError::MissingBaseKey`] when it lacks the key column
/// - [`ConsolidationError::DuplicateJoinKey`] when an auxiliary table repeats a
///   key under [`DuplicateKeyPolicy::Reject`]
pub fn consolidate(tables: &TableSet, options: &ConsolidationOptions) -> Result<Consolidation> {
    let span = info_span!(
        "consolidate",
        base_table = %options.base_table,
        key = %options.key
    );
    let _guard = span.enter();

    let mut warnings = unused_tables(tables, options);

    let base = tables
        .get(&options.base_table)
        .ok_or_else(|| ConsolidationError::MissingBaseTable {
            name: options.base_table.clone(),
            available: tables.names(),
        })?;
    if !base.has_column(&options.key) {
        return Err(ConsolidationError::MissingBaseKey {
            table: base.name.clone(),
            key: options.key.clone(),
        });
    }

    let mut data = base.data.clone();
    let mut joined = Vec::new();
    for name in &options.join_tables {
        let Some(aux) = tables.get(name) else {
            warn!(table = %name, "join table not loaded, skipping");
            warnings.push(ConsolidationWarning::MissingAuxiliaryTable {
                table: name.clone(),
            });
            continue;
        };
        if !aux.has_column(&options.key) {
            warn!(table = %name, key = %options.key, "join table lacks key column, skipping");
            warnings.push(ConsolidationWarning::MissingJoinKey {
                table: name.clone(),
                key: options.key.clone(),
            });
            continue;
        }

        data = left_join(&data, aux, options, &mut warnings)?;
        debug!(table = %name, rows = data.height(), columns = data.width(), "joined table");
        joined.push(name.clone());
    }

    info!(
        rows = data.height(),
        columns = data.width(),
        joined = joined.len(),
        warnings = warnings.len(),
        "consolidation complete"
    );

    let mut table = Table::new(base.name.clone(), data);
    if let Some(source) = base.source() {
        table = table.with_source(source);
    }
    Ok(Consolidation {
        table,
        joined,
        warnings,
    })
}

/// Tables loaded but configured as neither base nor join table.
fn unused_tables(tables: &TableSet, options: &ConsolidationOptions) -> Vec<ConsolidationWarning> {
    tables
        .iter()
        .filter(|table| options.role_of(&table.name).is_none())
        .map(|table| {
            warn!(table = %table.name, "table has no consolidation role, ignoring");
            ConsolidationWarning::UnusedTable {
                table: table.name.clone(),
            }
        })
        .collect()
}

/// Left outer join of `aux` onto `left` on the configured key.
fn left_join(
    left: &DataFrame,
    aux: &Table,
    options: &ConsolidationOptions,
    warnings: &mut Vec<ConsolidationWarning>,
) -> Result<DataFrame> {
    let key = options.key.as_str();
    let mut index = key_index(aux.data.column(key)?)?;

    let mut duplicated: Vec<&String> = index
        .iter()
        .filter(|(_, rows)| rows.len() > 1)
        .map(|(value, _)| value)
        .collect();
    if !duplicated.is_empty() {
        duplicated.sort();
        let duplicated_keys = duplicated.len();
        match options.duplicate_keys {
            DuplicateKeyPolicy::Reject => {
                return Err(ConsolidationError::DuplicateJoinKey {
                    table: aux.name.clone(),
                    key: key.to_string(),
                    value: duplicated[0].clone(),
                });
            }
            DuplicateKeyPolicy::FanOut => {
                warn!(table = %aux.name, duplicated_keys, "repeated join keys, fanning out rows");
                warnings.push(ConsolidationWarning::DuplicateJoinKeys {
                    table: aux.name.clone(),
                    duplicated_keys,
                    fanned_out: true,
                });
            }
            DuplicateKeyPolicy::KeepFirst => {
                warn!(table = %aux.name, duplicated_keys, "repeated join keys, keeping first match");
                warnings.push(ConsolidationWarning::DuplicateJoinKeys {
                    table: aux.name.clone(),
                    duplicated_keys,
                    fanned_out: false,
                });
                index.values_mut().for_each(|rows| rows.truncate(1));
            }
        }
    }

    let left_keys = left.column(key)?;
    let mut left_rows: Vec<Option<IdxSize>> = Vec::with_capacity(left.height());
    let mut aux_rows: Vec<Option<IdxSize>> = Vec::with_capacity(left.height());
    for row in 0..left.height() {
        let matches = key_text(left_keys.get(row)?).and_then(|value| index.get(&value));
        match matches {
            Some(rows) => {
                for &aux_row in rows {
                    left_rows.push(Some(row as IdxSize));
                    aux_rows.push(Some(aux_row));
                }
            }
            None => {
                left_rows.push(Some(row as IdxSize));
                aux_rows.push(None);
            }
        }
    }
    let left_idx = IdxCa::new(PlSmallStr::from_static("left"), &left_rows);
    let aux_idx = IdxCa::new(PlSmallStr::from_static("right"), &aux_rows);

    let mut taken: Vec<String> = left
        .get_column_names()
        .into_iter()
        .map(ToString::to_string)
        .collect();
    let mut columns: Vec<Column> = Vec::with_capacity(left.width() + aux.width());
    for column in left.get_columns() {
        columns.push(column.take(&left_idx)?);
    }
    for column in aux.data.get_columns() {
        let original = column.name().as_str();
        if original == key {
            continue;
        }
        let name = collision_free_name(original, &aux.name, &taken);
        if name != original {
            debug!(table = %aux.name, column = %original, renamed = %name, "renamed colliding column");
            warnings.push(ConsolidationWarning::RenamedColumn {
                table: aux.name.clone(),
                column: original.to_string(),
                renamed: name.clone(),
            });
        }
        let mut gathered = column.take(&aux_idx)?;
        gathered.rename(name.as_str().into());
        taken.push(name);
        columns.push(gathered);
    }

    Ok(DataFrame::new(columns)?)
}

/// Row positions of every non-null key, in row order.
fn key_index(keys: &Column) -> Result<HashMap<String, Vec<IdxSize>>> {
    let mut index: HashMap<String, Vec<IdxSize>> = HashMap::new();
    for row in 0..keys.len() {
        if let Some(value) = key_text(keys.get(row)?) {
            index.entry(value).or_default().push(row as IdxSize);
        }
    }
    Ok(index)
}

/// Name for an auxiliary column that does not clash with `taken`.
///
/// A clashing `column` becomes `<column>.<table>`, then `<column>.<table>2`,
/// `<column>.<table>3` and so on.
fn collision_free_name(column: &str, table: &str, taken: &[String]) -> String {
    let is_taken = |candidate: &str| taken.iter().any(|name| name == candidate);
    if !is_taken(column) {
        return column.to_string();
    }
    let base = format!("{column}.{table}");
    let mut candidate = base.clone();
    let mut counter = 2;
    while is_taken(&candidate) {
        candidate = format!("{base}{counter}");
        counter += 1;
    }
    candidate
}
