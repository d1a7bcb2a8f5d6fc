//! Hand-off of resolved annotations to a chart renderer.

use polars::prelude::DataFrame;
use tracing::{debug, info};

use statannot_model::{
    AnnotationDescriptor, AnnotationError, AnnotationOptions, BracketLayer, ColumnRole, Result,
    TextLayer,
};

use crate::resolver::resolve;

/// A chart backend able to draw annotation layers.
///
/// `draw_brackets` is the manual-bracket primitive: each bracket spans
/// `xmin..xmax` at `y_position` with its label above. `draw_text` places
/// plain labels at categorical x positions.
pub trait AnnotationRenderer {
    type Error: std::error::Error + Send + Sync + 'static;

    fn draw_brackets(&mut self, layer: &BracketLayer<'_>) -> std::result::Result<(), Self::Error>;

    fn draw_text(&mut self, layer: &TextLayer<'_>) -> std::result::Result<(), Self::Error>;
}

/// Resolves `options` against `df` and draws the result with `renderer`.
///
/// Nothing is drawn when resolution fails.
pub fn annotate<R>(
    df: &DataFrame,
    options: &AnnotationOptions,
    renderer: &mut R,
) -> Result<AnnotationDescriptor>
where
    R: AnnotationRenderer + ?Sized,
{
    let descriptor = resolve(df, options)?;
    dispatch(&descriptor, renderer)?;
    info!(
        mode = %descriptor.mode,
        annotations = descriptor.len(),
        warnings = descriptor.warnings.len(),
        "annotations drawn"
    );
    Ok(descriptor)
}

/// Sends an already resolved descriptor to the matching renderer primitive.
///
/// Text descriptors go to `draw_text`. Bracket descriptors go to
/// `draw_brackets`, and fail with [`AnnotationError::MissingValue`] when a
/// row has no right position.
pub fn dispatch<R>(descriptor: &AnnotationDescriptor, renderer: &mut R) -> Result<()>
where
    R: AnnotationRenderer + ?Sized,
{
    if let Some(layer) = descriptor.text_layer() {
        debug!(
            labels = layer.labels.len(),
            categories = layer.categories.len(),
            "drawing text layer"
        );
        return renderer
            .draw_text(&layer)
            .map_err(|e| AnnotationError::Render(Box::new(e)));
    }

    let layer = descriptor.bracket_layer().ok_or_else(|| {
        let row = descriptor
            .rows
            .iter()
            .position(|row| row.xmax.is_none())
            .unwrap_or_default();
        AnnotationError::MissingValue {
            role: ColumnRole::Xmax,
            row,
        }
    })?;
    debug!(brackets = layer.brackets.len(), "drawing bracket layer");
    renderer
        .draw_brackets(&layer)
        .map_err(|e| AnnotationError::Render(Box::new(e)))
}
