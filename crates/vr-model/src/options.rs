//! Configuration options for consolidation.

use serde::{Deserialize, Serialize};
use vr_common::normalize_name;

/// Join key shared by every HR export (employee registration number).
pub const DEFAULT_JOIN_KEY: &str = "matricula";

/// Table holding the active employees; its rows define the output rows.
pub const DEFAULT_BASE_TABLE: &str = "ativos";

/// Auxiliary tables joined onto the base table, in join order.
pub const DEFAULT_JOIN_TABLES: [&str; 3] = ["ferias", "desligados", "admissaoabril"];

/// What to do when an auxiliary table repeats a join key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicateKeyPolicy {
    /// Emit one output row per matching auxiliary row (plain left join).
    #[default]
    FanOut,
    /// Keep only the first matching auxiliary row.
    KeepFirst,
    /// Fail consolidation.
    Reject,
}

/// Role a table plays in consolidation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableRole {
    /// Anchor table whose rows define the consolidated rows.
    Base,
    /// Table merged onto the base, at the given position in the join order.
    Auxiliary(usize),
}

/// Options controlling how tables are consolidated.
///
/// Table and key names are stored normalized, so `"Admissão Abril"` and
/// `"admissaoabril"` configure the same table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsolidationOptions {
    /// Name of the base table.
    pub base_table: String,
    /// Auxiliary tables, joined in this order.
    pub join_tables: Vec<String>,
    /// Join key column.
    pub key: String,
    /// Handling of repeated keys in auxiliary tables.
    pub duplicate_keys: DuplicateKeyPolicy,
}

impl Default for ConsolidationOptions {
    fn default() -> Self {
        Self {
            base_table: DEFAULT_BASE_TABLE.to_string(),
            join_tables: DEFAULT_JOIN_TABLES.iter().map(ToString::to_string).collect(),
            key: DEFAULT_JOIN_KEY.to_string(),
            duplicate_keys: DuplicateKeyPolicy::default(),
        }
    }
}

impl ConsolidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_table(mut self, name: &str) -> Self {
        self.base_table = normalize_name(name);
        self
    }

    pub fn with_join_tables<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.join_tables = names
            .into_iter()
            .map(|name| normalize_name(name.as_ref()))
            .collect();
        self
    }

    pub fn with_key(mut self, key: &str) -> Self {
        self.key = normalize_name(key);
        self
    }

    pub fn with_duplicate_keys(mut self, policy: DuplicateKeyPolicy) -> Self {
        self.duplicate_keys = policy;
        self
    }

    /// Re-normalizes every name, for options that came from a manifest.
    pub fn normalized(self) -> Self {
        let join_tables = self.join_tables.clone();
        let base_table = self.base_table.clone();
        let key = self.key.clone();
        self.with_base_table(&base_table)
            .with_join_tables(join_tables)
            .with_key(&key)
    }

    /// The role a table name plays in this configuration, if any.
    pub fn role_of(&self, table: &str) -> Option<TableRole> {
        if table == self.base_table {
            return Some(TableRole::Base);
        }
        self.join_tables
            .iter()
            .position(|name| name == table)
            .map(TableRole::Auxiliary)
    }
}
