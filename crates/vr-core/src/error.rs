//! Consolidation errors and warnings.

use std::fmt;

use thiserror::Error;

/// Conditions that stop consolidation entirely.
#[derive(Debug, Error)]
pub enum ConsolidationError {
    /// The configured base table was not loaded.
    #[error("base table '{name}' not found (loaded tables: {})", available.join(", "))]
    MissingBaseTable { name: String, available: Vec<String> },

    /// The base table has no join key column.
    #[error("base table '{table}' has no '{key}' column")]
    MissingBaseKey { table: String, key: String },

    /// An auxiliary table repeats a key and the policy rejects duplicates.
    #[error("table '{table}' repeats {key} '{value}'")]
    DuplicateJoinKey {
        table: String,
        key: String,
        value: String,
    },

    /// Failed DataFrame operation while assembling the result.
    #[error("DataFrame operation failed: {0}")]
    DataFrame(#[from] polars::prelude::PolarsError),
}

/// Result type for consolidation.
pub type Result<T> = std::result::Result<T, ConsolidationError>;

/// Per-table conditions that are recorded but do not stop consolidation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsolidationWarning {
    /// A configured auxiliary table was not loaded; it was skipped.
    MissingAuxiliaryTable { table: String },
    /// An auxiliary table lacks the join key; it was skipped.
    MissingJoinKey { table: String, key: String },
    /// An auxiliary table repeats keys; rows were fanned out or trimmed.
    DuplicateJoinKeys {
        table: String,
        duplicated_keys: usize,
        fanned_out: bool,
    },
    /// A non-key column already existed and was renamed.
    RenamedColumn {
        table: String,
        column: String,
        renamed: String,
    },
    /// A loaded table plays no role in consolidation.
    UnusedTable { table: String },
}

impl ConsolidationWarning {
    /// The table the warning is about.
    pub fn table(&self) -> &str {
        match self {
            Self::MissingAuxiliaryTable { table }
            | Self::MissingJoinKey { table, .. }
            | Self::DuplicateJoinKeys { table, .. }
            | Self::RenamedColumn { table, .. }
            | Self::UnusedTable { table } => table,
        }
    }
}

impl fmt::Display for ConsolidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAuxiliaryTable { table } => {
                write!(f, "table '{table}' not loaded; skipped")
            }
            Self::MissingJoinKey { table, key } => {
                write!(f, "table '{table}' has no '{key}' column; skipped")
            }
            Self::DuplicateJoinKeys {
                table,
                duplicated_keys,
                fanned_out,
            } => {
                let effect = if *fanned_out {
                    "matching rows fanned out"
                } else {
                    "first match kept"
                };
                write!(
                    f,
                    "table '{table}' repeats {duplicated_keys} key(s); {effect}"
                )
            }
            Self::RenamedColumn {
                table,
                column,
                renamed,
            } => write!(f, "column '{column}' from '{table}' renamed to '{renamed}'"),
            Self::UnusedTable { table } => {
                write!(f, "table '{table}' is neither base nor join table; ignored")
            }
        }
    }
}
