//! Resolution of a results table into an annotation descriptor.

use polars::prelude::DataFrame;
use tracing::{debug, debug_span, warn};

use statannot_model::{
    AnnotationDescriptor, AnnotationError, AnnotationMode, AnnotationOptions, AnnotationRow,
    AnnotationWarning, ColumnRole, Result, YPosition,
};

use crate::columns::{
    distinct_in_order, position_column, require_column, string_column, y_position_column,
};
use crate::template::{Template, is_template};

/// Label used for non-significant comparisons.
pub const NOT_SIGNIFICANT: &str = "ns";

/// Resolves `options` against `df`.
///
/// Fails before producing anything when a referenced column is missing or
/// the y-positions cannot be matched to the rows. An ambiguous
/// `remove_bracket` request is not an error: brackets are kept and a warning
/// is recorded on the descriptor.
pub fn resolve(df: &DataFrame, options: &AnnotationOptions) -> Result<AnnotationDescriptor> {
    let span = debug_span!("resolve_annotations", rows = df.height(), label = %options.label);
    let _guard = span.enter();

    let labels = resolve_labels(df, &options.label)?;

    // An explicit `x` always means plain text labels.
    let (mut xmin_column, mut xmax_column, xmin_overridden) = match &options.x {
        Some(x) => (x.clone(), None, true),
        None => (
            options.xmin_column().to_string(),
            options.xmax.clone(),
            options.xmin.is_some(),
        ),
    };
    require_column(df, &xmin_column, ColumnRole::Xmin)?;

    let mut warnings = Vec::new();
    if options.remove_bracket
        && let Some(xmax) = xmax_column.take()
    {
        let xmin_values = position_column(df, &xmin_column, ColumnRole::Xmin)?;
        let distinct = distinct_in_order(xmin_values.iter().map(|v| v.as_deref().unwrap_or("")));
        if distinct.len() > 1 {
            let warning = AnnotationWarning::AmbiguousBracketRemoval {
                column: xmin_column.clone(),
                distinct: distinct.len(),
            };
            warn!(column = %xmin_column, distinct = distinct.len(), "{warning}");
            warnings.push(warning);
            xmax_column = Some(xmax);
        } else if !xmin_overridden {
            debug!(from = %xmin_column, to = %xmax, "removing brackets; labels move to xmax");
            require_column(df, &xmax, ColumnRole::Xmax)?;
            xmin_column = xmax;
        } else {
            debug!(column = %xmin_column, "removing brackets");
        }
    }

    let y_positions = resolve_y_positions(df, &options.y_position)?;

    let xmax_values = match &xmax_column {
        Some(column) => Some(position_column(df, column, ColumnRole::Xmax)?),
        None => None,
    };
    let mode = if xmax_values.is_some() {
        AnnotationMode::Bracket
    } else {
        AnnotationMode::Text
    };

    let xmin_values = position_column(df, &xmin_column, ColumnRole::Xmin)?;
    let mut rows = Vec::with_capacity(df.height());
    for (idx, (label, y_position)) in labels.into_iter().zip(y_positions).enumerate() {
        let xmax = match &xmax_values {
            Some(values) => Some(
                values[idx]
                    .clone()
                    .ok_or(AnnotationError::MissingValue {
                        role: ColumnRole::Xmax,
                        row: idx,
                    })?,
            ),
            None => None,
        };
        let xmin = xmin_values[idx]
            .clone()
            .ok_or(AnnotationError::MissingValue {
                role: ColumnRole::Xmin,
                row: idx,
            })?;
        rows.push(AnnotationRow {
            label,
            xmin,
            xmax,
            y_position,
        });
    }

    if options.hide_ns {
        let before = rows.len();
        rows.retain(|row| row.label.trim() != NOT_SIGNIFICANT);
        debug!(hidden = before - rows.len(), "hid non-significant comparisons");
    }

    let categories = match mode {
        AnnotationMode::Text => distinct_in_order(rows.iter().map(|row| row.xmin.as_str())),
        AnnotationMode::Bracket => Vec::new(),
    };

    debug!(%mode, annotations = rows.len(), "annotations resolved");
    Ok(AnnotationDescriptor {
        mode,
        rows,
        categories,
        style: options.style,
        warnings,
    })
}

/// Label text per row, from a column or a template.
pub fn resolve_labels(df: &DataFrame, spec: &str) -> Result<Vec<String>> {
    if is_template(spec) {
        let template = Template::parse(spec)?;
        debug!(template = %template.source(), fields = ?template.fields(), "rendering label template");
        template.render_rows(df)
    } else {
        string_column(df, spec, ColumnRole::Label)
    }
}

/// Y-coordinates per row.
pub fn resolve_y_positions(df: &DataFrame, spec: &YPosition) -> Result<Vec<f64>> {
    match spec {
        YPosition::Literal(values) => tile_y_positions(values, df.height()),
        YPosition::Column(name) => y_position_column(df, name),
    }
}

/// Repeats `values` to exactly `rows` entries. The length must divide `rows`.
pub fn tile_y_positions(values: &[f64], rows: usize) -> Result<Vec<f64>> {
    if values.is_empty() || !rows.is_multiple_of(values.len()) {
        return Err(AnnotationError::YPositionLength {
            len: values.len(),
            rows,
        });
    }
    Ok(values.iter().copied().cycle().take(rows).collect())
}
