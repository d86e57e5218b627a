//! Run sequencing with explicit, typed stages.
//!
//! # Stages
//!
//! 1. **Loaded** - every input file read into the table set
//! 2. **Prepared** - column headers normalized
//! 3. **Consolidated** - auxiliary tables joined onto the base table
//!
//! Each transition consumes the previous stage, so a later stage cannot run
//! without the earlier one having succeeded. A failed consolidation keeps the
//! prepared tables for inspection.
//!
//! # Example
//!
//! ```ignore
//! use vr_core::pipeline::run_pipeline;
//! use vr_model::RunConfig;
//!
//! let outcome = run_pipeline(&RunConfig::default());
//! std::process::exit(outcome.exit_code());
//! ```

use tracing::{error, info, warn};
use vr_ingest::{IngestError, load_tables};
use vr_model::{ConsolidationOptions, RunConfig, TableSet};

use crate::consolidate::{Consolidation, consolidate};
use crate::error::ConsolidationError;
use crate::prepare::prepare_tables;

/// Exit code for a completed run.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for unexpected failures (configuration, logging).
pub const EXIT_FAILURE: i32 = 1;
/// Exit code when no input file was found.
pub const EXIT_NO_INPUT: i32 = 2;
/// Exit code when an input file could not be loaded.
pub const EXIT_LOAD_FAILURE: i32 = 3;
/// Exit code when consolidation failed.
pub const EXIT_CONSOLIDATION_FAILURE: i32 = 4;

/// Tables as read from the input directory.
#[derive(Debug, Clone)]
pub struct Loaded {
    pub tables: TableSet,
}

/// Tables with normalized column headers.
#[derive(Debug, Clone)]
pub struct Prepared {
    pub tables: TableSet,
}

/// Prepared tables plus the consolidated result.
#[derive(Debug, Clone)]
pub struct Consolidated {
    pub tables: TableSet,
    pub consolidation: Consolidation,
}

impl Loaded {
    /// Discovers and loads the configured input files.
    pub fn load(config: &RunConfig) -> Result<Self, IngestError> {
        let tables = load_tables(&config.input_dir, &config.extension)?;
        Ok(Self { tables })
    }

    /// Normalizes every table's column headers.
    pub fn prepare(self) -> Prepared {
        Prepared {
            tables: prepare_tables(self.tables),
        }
    }
}

impl Prepared {
    /// Consolidates the prepared tables.
    ///
    /// On failure the prepared tables are handed back with the error.
    pub fn consolidate(
        self,
        options: &ConsolidationOptions,
    ) -> Result<Consolidated, (Self, ConsolidationError)> {
        match consolidate(&self.tables, options) {
            Ok(consolidation) => Ok(Consolidated {
                tables: self.tables,
                consolidation,
            }),
            Err(error) => Err((self, error)),
        }
    }
}

/// Final state of a run.
#[derive(Debug)]
pub enum RunOutcome {
    /// Every stage succeeded.
    Consolidated(Consolidated),
    /// Loading stopped the run; nothing was consolidated.
    LoadFailed(IngestError),
    /// Consolidation failed after the tables were prepared.
    ConsolidationFailed {
        prepared: Prepared,
        error: ConsolidationError,
    },
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Consolidated(_))
    }

    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Consolidated(_) => EXIT_SUCCESS,
            Self::LoadFailed(error) if error.is_no_input() => EXIT_NO_INPUT,
            Self::LoadFailed(_) => EXIT_LOAD_FAILURE,
            Self::ConsolidationFailed { .. } => EXIT_CONSOLIDATION_FAILURE,
        }
    }

    /// The consolidated result, when the run completed.
    pub fn consolidated(&self) -> Option<&Consolidated> {
        match self {
            Self::Consolidated(consolidated) => Some(consolidated),
            _ => None,
        }
    }

    /// The tables available at the end of the run, if any stage produced them.
    pub fn tables(&self) -> Option<&TableSet> {
        match self {
            Self::Consolidated(consolidated) => Some(&consolidated.tables),
            Self::ConsolidationFailed { prepared, .. } => Some(&prepared.tables),
            Self::LoadFailed(_) => None,
        }
    }
}

/// Runs load, prepare and consolidate in sequence.
pub fn run_pipeline(config: &RunConfig) -> RunOutcome {
    let loaded = match Loaded::load(config) {
        Ok(loaded) => loaded,
        Err(error) if error.is_no_input() => {
            warn!(%error, "no input files, nothing to consolidate");
            return RunOutcome::LoadFailed(error);
        }
        Err(error) => {
            error!(%error, "loading failed, aborting run");
            return RunOutcome::LoadFailed(error);
        }
    };

    let prepared = loaded.prepare();
    match prepared.consolidate(&config.consolidation) {
        Ok(consolidated) => {
            info!(
                rows = consolidated.consolidation.table.height(),
                columns = consolidated.consolidation.table.width(),
                "run complete"
            );
            RunOutcome::Consolidated(consolidated)
        }
        Err((prepared, error)) => {
            error!(%error, "consolidation failed");
            RunOutcome::ConsolidationFailed { prepared, error }
        }
    }
}
