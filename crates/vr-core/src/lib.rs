//! Table preparation, consolidation and run sequencing.

pub mod consolidate;
pub mod error;
pub mod pipeline;
pub mod prepare;
pub mod profile;

pub use consolidate::{Consolidation, consolidate};
pub use error::{ConsolidationError, ConsolidationWarning, Result};
pub use pipeline::{
    Consolidated, EXIT_CONSOLIDATION_FAILURE, EXIT_FAILURE, EXIT_LOAD_FAILURE, EXIT_NO_INPUT,
    EXIT_SUCCESS, Loaded, Prepared, RunOutcome, run_pipeline,
};
pub use prepare::{normalized_headers, prepare_table, prepare_tables};
pub use profile::{
    ColumnProfile, ColumnStats, FileProfile, TableProfile, profile_directory, profile_table,
};
