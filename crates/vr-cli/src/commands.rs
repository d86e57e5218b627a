use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, trace, warn};

use vr_cli::logging::redact_value;
use vr_cli::settings::{Overrides, resolve_config};
use vr_common::any_to_string;
use vr_core::{
    EXIT_LOAD_FAILURE, EXIT_NO_INPUT, EXIT_SUCCESS, RunOutcome, profile_directory, run_pipeline,
};
use vr_model::Table;

use crate::summary::{print_consolidation, print_failure, print_profiles, print_tables};

/// Runs the full pipeline and prints its outcome; returns the exit code.
pub fn run_consolidation(overrides: &Overrides) -> Result<i32> {
    let config = resolve_config(overrides).context("resolve run configuration")?;
    let span = info_span!("run", input_dir = %config.input_dir.display());
    let _guard = span.enter();
    let started = Instant::now();

    let outcome = run_pipeline(&config);
    if let Some(tables) = outcome.tables() {
        print_tables(tables);
    }
    match &outcome {
        RunOutcome::Consolidated(consolidated) => {
            trace_rows(&consolidated.consolidation.table, config.preview_rows);
            print_consolidation(&consolidated.consolidation, config.preview_rows);
        }
        RunOutcome::LoadFailed(error) if error.is_no_input() => {
            println!(
                "No .{} files found in {}. Add the HR exports there and run again.",
                config.extension,
                config.input_dir.display()
            );
        }
        RunOutcome::LoadFailed(error) => print_failure("Loading failed", error),
        RunOutcome::ConsolidationFailed { error, .. } => {
            print_failure("Consolidation failed", error);
        }
    }

    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        exit_code = outcome.exit_code(),
        "run finished"
    );
    Ok(outcome.exit_code())
}

/// Profiles every input file; unreadable files are reported, not fatal.
pub fn run_profile(overrides: &Overrides) -> Result<i32> {
    let config = resolve_config(overrides).context("resolve run configuration")?;

    let profiles = match profile_directory(&config.input_dir, &config.extension) {
        Ok(profiles) => profiles,
        Err(error) if error.is_no_input() => {
            warn!(%error, "nothing to profile");
            println!(
                "No .{} files found in {}.",
                config.extension,
                config.input_dir.display()
            );
            return Ok(EXIT_NO_INPUT);
        }
        Err(error) => {
            print_failure("Discovery failed", &error);
            return Ok(EXIT_LOAD_FAILURE);
        }
    };

    print_profiles(&profiles, config.preview_rows);
    let failed = profiles.iter().filter(|p| p.outcome.is_err()).count();
    if failed > 0 {
        warn!(failed, total = profiles.len(), "some files could not be profiled");
    }
    Ok(EXIT_SUCCESS)
}

/// Emits the preview rows at trace level, redacted unless `--log-data` is set.
fn trace_rows(table: &Table, limit: usize) {
    if !tracing::enabled!(tracing::Level::TRACE) {
        return;
    }
    let columns = table.data.get_columns();
    for row in 0..table.height().min(limit) {
        let values: Vec<String> = columns
            .iter()
            .map(|column| {
                column
                    .get(row)
                    .map(any_to_string)
                    .unwrap_or_default()
            })
            .collect();
        let joined = values.join(" | ");
        trace!(table = %table.name, row, values = %redact_value(&joined), "consolidated row");
    }
}
