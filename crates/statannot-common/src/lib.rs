//! Shared utilities for statannot crates.
//!
//! This crate provides the Polars `AnyValue` helpers used to turn results-table
//! cells into annotation text and axis coordinates.

pub mod values;

// Re-export commonly used functions at crate root for convenience
pub use values::{any_to_f64, any_to_string, format_numeric, is_blank, parse_f64};
