//! Typed column access over a results table.
//!
//! Every accessor checks the column once and reports a missing column with
//! the role it was requested for.

use polars::prelude::{AnyValue, DataFrame};

use statannot_common::{any_to_f64, any_to_string, is_blank};
use statannot_model::{AnnotationError, ColumnRole, Result};

pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.column(name).is_ok()
}

pub fn require_column(df: &DataFrame, name: &str, role: ColumnRole) -> Result<()> {
    if has_column(df, name) {
        Ok(())
    } else {
        Err(AnnotationError::missing_column(name, role))
    }
}

/// All values of a column rendered as text. Nulls become empty strings.
pub fn string_column(df: &DataFrame, name: &str, role: ColumnRole) -> Result<Vec<String>> {
    let series = df
        .column(name)
        .map_err(|_| AnnotationError::missing_column(name, role))?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let value = series.get(idx).unwrap_or(AnyValue::Null);
        values.push(any_to_string(value));
    }
    Ok(values)
}

/// Position values: trimmed text, `None` for nulls and blank cells.
pub fn position_column(df: &DataFrame, name: &str, role: ColumnRole) -> Result<Vec<Option<String>>> {
    let series = df
        .column(name)
        .map_err(|_| AnnotationError::missing_column(name, role))?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let value = series.get(idx).unwrap_or(AnyValue::Null);
        if is_blank(&value) {
            values.push(None);
        } else {
            values.push(Some(any_to_string(value).trim().to_string()));
        }
    }
    Ok(values)
}

/// Numeric y-coordinates; every cell must parse as a number.
pub fn y_position_column(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    let series = df
        .column(name)
        .map_err(|_| AnnotationError::missing_column(name, ColumnRole::YPosition))?;
    let mut values = Vec::with_capacity(df.height());
    for idx in 0..df.height() {
        let value = series.get(idx).unwrap_or(AnyValue::Null);
        let Some(number) = any_to_f64(value.clone()) else {
            return Err(AnnotationError::InvalidYPosition {
                column: name.to_string(),
                row: idx,
                value: any_to_string(value),
            });
        };
        values.push(number);
    }
    Ok(values)
}

/// Distinct values in order of first appearance.
pub fn distinct_in_order<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = std::collections::HashSet::new();
    let mut ordered = Vec::new();
    for value in values {
        if seen.insert(value) {
            ordered.push(value.to_string());
        }
    }
    ordered
}
