//! Spreadsheet ingestion for the meal-voucher consolidation pipeline.
//!
//! This crate discovers the HR exports in an input directory and loads each
//! one into a typed Polars table.
//!
//! # Features
//!
//! - **Discovery**: List spreadsheets by extension, skipping Office lock files
//! - **Workbook Loading**: First worksheet, header row, per-column dtype inference
//! - **CSV Loading**: Same pipeline for exports saved as CSV
//! - **Table Naming**: Table names are the normalized file stems
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use vr_ingest::load_tables;
//!
//! let tables = load_tables(Path::new("dados_entrada"), "xlsx")?;
//! for table in &tables {
//!     println!("{}: {} rows", table.name, table.height());
//! }
//! ```

mod csv;
mod discovery;
mod error;
mod loader;
mod reader;
mod xlsx;

// === Error Types ===
pub use error::{IngestError, ReadError, Result};

// === File Discovery ===
pub use discovery::{ensure_input_dir, list_spreadsheet_files, table_name_for};

// === Readers ===
pub use csv::read_csv_table;
pub use reader::SourceFormat;
pub use xlsx::{frame_from_range, read_workbook_table};

// === Loading ===
pub use loader::load_tables;
