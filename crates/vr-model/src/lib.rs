//! Data model for the meal-voucher consolidation pipeline.

pub mod config;
pub mod error;
pub mod options;
pub mod table;

pub use config::{DEFAULT_EXTENSION, DEFAULT_INPUT_DIR, DEFAULT_PREVIEW_ROWS, RunConfig};
pub use error::{ConfigError, Result};
pub use options::{
    ConsolidationOptions, DEFAULT_BASE_TABLE, DEFAULT_JOIN_KEY, DEFAULT_JOIN_TABLES,
    DuplicateKeyPolicy, TableRole,
};
pub use table::{Table, TableSet};
