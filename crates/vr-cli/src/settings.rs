//! Resolves the run configuration from an optional manifest and CLI flags.
//!
//! Precedence, lowest to highest: built-in defaults, the `--config` manifest,
//! individual flags.

use std::path::PathBuf;

use vr_model::{ConfigError, DuplicateKeyPolicy, RunConfig};

/// Configuration values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub input_dir: Option<PathBuf>,
    pub extension: Option<String>,
    pub base_table: Option<String>,
    /// Replaces the manifest's join tables when non-empty.
    pub join_tables: Vec<String>,
    pub key: Option<String>,
    pub duplicate_keys: Option<DuplicateKeyPolicy>,
    pub preview_rows: Option<usize>,
}

/// Builds the effective [`RunConfig`].
///
/// # Errors
///
/// Returns [`ConfigError`] when the manifest cannot be read or parsed, or when
/// the merged values are unusable (empty extension, base table or key).
pub fn resolve_config(overrides: &Overrides) -> Result<RunConfig, ConfigError> {
    let mut config = match &overrides.config {
        Some(path) => RunConfig::load(path)?,
        None => RunConfig::default(),
    };

    if let Some(dir) = &overrides.input_dir {
        config = config.with_input_dir(dir.clone());
    }
    if let Some(extension) = &overrides.extension {
        config = config.with_extension(extension);
    }
    if let Some(rows) = overrides.preview_rows {
        config = config.with_preview_rows(rows);
    }

    let mut options = config.consolidation.clone();
    if let Some(base_table) = &overrides.base_table {
        options = options.with_base_table(base_table);
    }
    if !overrides.join_tables.is_empty() {
        options = options.with_join_tables(&overrides.join_tables);
    }
    if let Some(key) = &overrides.key {
        options = options.with_key(key);
    }
    if let Some(policy) = overrides.duplicate_keys {
        options = options.with_duplicate_keys(policy);
    }

    config.with_consolidation(options).validated()
}
