//! Shared utilities for the meal-voucher consolidation crates.
//!
//! This crate provides the identifier normalizer used for table and column
//! names, plus Polars value helpers shared by ingestion, consolidation and
//! reporting.

pub mod polars;
pub mod text;

// Re-export commonly used functions at crate root for convenience
pub use polars::{any_to_f64, any_to_string, format_numeric, key_text, parse_f64};
pub use text::{dedupe_name, normalize_name, normalize_value};
