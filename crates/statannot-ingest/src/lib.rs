//! Loading of statistical-test results tables.
//!
//! A results table is a CSV file with one row per comparison, for example:
//!
//! ```text
//! group1,group2,p.adj,y.position
//! 0.5,1,0.001,29
//! 0.5,2,0.02,35
//! 1,2,0.04,39
//! ```
//!
//! Columns are read as text unless type inference is requested, so group
//! identifiers and labels keep their exact spelling.

pub mod csv;
pub mod error;

pub use csv::{
    INFER_SCHEMA_ROWS, ReadOptions, read_results_table, read_results_table_with_options,
};
pub use error::{IngestError, Result};
