//! Run configuration and the optional TOML manifest.
//!
//! A manifest looks like:
//!
//! ```toml
//! input_dir = "dados_entrada"
//! extension = "xlsx"
//! preview_rows = 5
//!
//! [consolidation]
//! base_table = "Ativos"
//! join_tables = ["Férias", "Desligados", "Admissão Abril"]
//! key = "Matrícula"
//! duplicate_keys = "fan-out"
//! ```
//!
//! Every field is optional; missing fields keep their defaults.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::options::ConsolidationOptions;

/// Directory scanned for HR exports when nothing else is configured.
pub const DEFAULT_INPUT_DIR: &str = "dados_entrada";

/// Spreadsheet extension recognized by default.
pub const DEFAULT_EXTENSION: &str = "xlsx";

/// Rows shown in the consolidated preview.
pub const DEFAULT_PREVIEW_ROWS: usize = 5;

/// Everything a pipeline run needs to know.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Directory holding the input spreadsheets (created when absent).
    pub input_dir: PathBuf,
    /// File extension of the input spreadsheets, without the dot.
    pub extension: String,
    /// Number of consolidated rows to preview.
    pub preview_rows: usize,
    /// Table roles and join behavior.
    pub consolidation: ConsolidationOptions,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from(DEFAULT_INPUT_DIR),
            extension: DEFAULT_EXTENSION.to_string(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
            consolidation: ConsolidationOptions::default(),
        }
    }
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a manifest from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        let config = config.validated()?;
        tracing::debug!(path = %path.display(), "loaded run config");
        Ok(config)
    }

    pub fn with_input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.input_dir = dir.into();
        self
    }

    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = rows;
        self
    }

    pub fn with_consolidation(mut self, options: ConsolidationOptions) -> Self {
        self.consolidation = options;
        self
    }

    /// Normalizes names and rejects values no run can use.
    pub fn validated(mut self) -> Result<Self> {
        self.extension = self.extension.trim().trim_start_matches('.').to_string();
        if self.extension.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "extension",
                reason: "must not be empty".to_string(),
            });
        }
        self.consolidation = self.consolidation.normalized();
        if self.consolidation.base_table.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "consolidation.base_table",
                reason: "must not be empty".to_string(),
            });
        }
        if self.consolidation.key.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "consolidation.key",
                reason: "must not be empty".to_string(),
            });
        }
        let mut seen: HashSet<&str> = HashSet::new();
        for name in &self.consolidation.join_tables {
            if *name == self.consolidation.base_table {
                return Err(ConfigError::InvalidValue {
                    field: "consolidation.join_tables",
                    reason: format!("contains the base table '{name}'"),
                });
            }
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: "consolidation.join_tables",
                    reason: format!("lists '{name}' more than once"),
                });
            }
        }
        Ok(self)
    }
}
