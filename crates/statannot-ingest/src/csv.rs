//! CSV results-table reading.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use polars::prelude::{CsvReadOptions, DataFrame, SerReader};
use tracing::debug;

use crate::error::{IngestError, Result};

/// Options controlling how a results table is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadOptions {
    /// Field separator byte.
    pub separator: u8,
    /// Rows sampled for type inference. `Some(0)` reads every column as text,
    /// which keeps group labels such as `01` and p-values such as `0.050`
    /// verbatim.
    pub infer_schema_length: Option<usize>,
}

/// Rows sampled when numeric types are inferred.
pub const INFER_SCHEMA_ROWS: usize = 100;

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            separator: b',',
            infer_schema_length: Some(0),
        }
    }
}

impl ReadOptions {
    /// Infer numeric column types instead of reading every column as text.
    #[must_use]
    pub fn infer_types(mut self) -> Self {
        self.infer_schema_length = Some(INFER_SCHEMA_ROWS);
        self
    }

    pub fn is_all_text(&self) -> bool {
        self.infer_schema_length == Some(0)
    }

    #[must_use]
    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }
}

/// Reads the first line of a file, failing on missing or empty files.
fn read_header_line(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let mut reader = BufReader::new(file);
    let mut line = String::new();
    reader
        .read_line(&mut line)
        .map_err(|e| IngestError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
    // Skip BOM if present
    let cleaned = line.strip_prefix('\u{feff}').unwrap_or(&line).trim();
    if cleaned.is_empty() {
        return Err(IngestError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    Ok(cleaned.to_string())
}

/// Reads a results table with default options.
pub fn read_results_table(path: &Path) -> Result<DataFrame> {
    read_results_table_with_options(path, ReadOptions::default())
}

/// Reads a results table into a Polars DataFrame.
pub fn read_results_table_with_options(path: &Path, options: ReadOptions) -> Result<DataFrame> {
    let header = read_header_line(path)?;
    debug!(
        path = %path.display(),
        header = %header,
        all_text = options.is_all_text(),
        "reading results table"
    );

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(options.infer_schema_length)
        .map_parse_options(|parse| parse.with_separator(options.separator))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .finish()
        .map_err(|e| IngestError::CsvParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    debug!(
        rows = df.height(),
        columns = df.width(),
        "results table loaded"
    );
    Ok(df)
}
