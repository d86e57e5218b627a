//! CLI argument definitions for the meal-voucher consolidation agent.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use vr_cli::settings::Overrides;
use vr_model::DuplicateKeyPolicy;

#[derive(Parser)]
#[command(
    name = "vr-agent",
    version,
    about = "Consolidate HR spreadsheets for meal-voucher (VR) purchasing",
    long_about = "Load the HR spreadsheet exports of an input directory, normalize their \
                  headers and join them onto the active-employee table.\n\n\
                  Running without a subcommand performs the full consolidation."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub input: InputArgs,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow employee values in trace logs (redacted by default).
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load, prepare and consolidate the input spreadsheets (default).
    Run,

    /// Profile every input spreadsheet without consolidating.
    Profile,
}

/// Where the inputs live and how they are consolidated.
#[derive(Args)]
pub struct InputArgs {
    /// TOML manifest with run settings; flags override its values.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the spreadsheets [default: dados_entrada].
    #[arg(long = "input-dir", value_name = "DIR", global = true)]
    pub input_dir: Option<PathBuf>,

    /// Spreadsheet extension to load [default: xlsx].
    #[arg(long = "extension", value_name = "EXT", global = true)]
    pub extension: Option<String>,

    /// Table whose rows define the consolidated rows [default: ativos].
    #[arg(long = "base-table", value_name = "NAME", global = true)]
    pub base_table: Option<String>,

    /// Table to join onto the base table; repeat to set the join order.
    #[arg(long = "join-table", value_name = "NAME", global = true)]
    pub join_tables: Vec<String>,

    /// Join key column [default: matricula].
    #[arg(long = "key", value_name = "COLUMN", global = true)]
    pub key: Option<String>,

    /// Handling of repeated keys in joined tables [default: fan-out].
    #[arg(long = "duplicate-keys", value_enum, global = true)]
    pub duplicate_keys: Option<DuplicateKeysArg>,

    /// Rows shown in previews [default: 5].
    #[arg(long = "preview-rows", value_name = "N", global = true)]
    pub preview_rows: Option<usize>,
}

impl InputArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            config: self.config.clone(),
            input_dir: self.input_dir.clone(),
            extension: self.extension.clone(),
            base_table: self.base_table.clone(),
            join_tables: self.join_tables.clone(),
            key: self.key.clone(),
            duplicate_keys: self.duplicate_keys.map(DuplicateKeyPolicy::from),
            preview_rows: self.preview_rows,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DuplicateKeysArg {
    FanOut,
    KeepFirst,
    Reject,
}

impl From<DuplicateKeysArg> for DuplicateKeyPolicy {
    fn from(arg: DuplicateKeysArg) -> Self {
        match arg {
            DuplicateKeysArg::FanOut => Self::FanOut,
            DuplicateKeysArg::KeepFirst => Self::KeepFirst,
            DuplicateKeysArg::Reject => Self::Reject,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
