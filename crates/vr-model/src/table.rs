//! In-memory tables and the table set shared by the pipeline stages.

use std::collections::BTreeMap;
use std::collections::btree_map;
use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;

/// A named table loaded from one source file.
///
/// Columns are typed Polars columns decided at load time; missing cells are
/// explicit nulls.
#[derive(Debug, Clone)]
pub struct Table {
    /// Normalized table name (e.g., "ativos", "admissaoabril").
    pub name: String,
    /// The file the table was read from, when it came from disk.
    pub source: Option<PathBuf>,
    /// Table contents.
    pub data: DataFrame,
}

impl Table {
    /// Creates a table without source information.
    pub fn new(name: impl Into<String>, data: DataFrame) -> Self {
        Self {
            name: name.into(),
            source: None,
            data,
        }
    }

    /// Records the file the table was read from.
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn height(&self) -> usize {
        self.data.height()
    }

    pub fn width(&self) -> usize {
        self.data.width()
    }

    /// Column names in table order.
    pub fn column_names(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .into_iter()
            .map(ToString::to_string)
            .collect()
    }

    /// Whether the table carries a column with exactly this name.
    pub fn has_column(&self, name: &str) -> bool {
        self.data
            .get_column_names()
            .iter()
            .any(|column| column.as_str() == name)
    }
}

/// All tables of a run, keyed by normalized table name.
///
/// Iteration order is the sorted table name order.
#[derive(Debug, Clone, Default)]
pub struct TableSet {
    tables: BTreeMap<String, Table>,
}

impl TableSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a table under its own name, returning any table it replaced.
    pub fn insert(&mut self, table: Table) -> Option<Table> {
        self.tables.insert(table.name.clone(), table)
    }

    pub fn get(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Table names in sorted order.
    pub fn names(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }

    pub fn iter(&self) -> btree_map::Values<'_, String, Table> {
        self.tables.values()
    }

    pub fn iter_mut(&mut self) -> btree_map::ValuesMut<'_, String, Table> {
        self.tables.values_mut()
    }
}

impl IntoIterator for TableSet {
    type Item = Table;
    type IntoIter = btree_map::IntoValues<String, Table>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.into_values()
    }
}

impl<'a> IntoIterator for &'a TableSet {
    type Item = &'a Table;
    type IntoIter = btree_map::Values<'a, String, Table>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.values()
    }
}

impl FromIterator<Table> for TableSet {
    fn from_iter<I: IntoIterator<Item = Table>>(iter: I) -> Self {
        let mut set = Self::new();
        for table in iter {
            set.insert(table);
        }
        set
    }
}
