//! Renderers used by the CLI: a JSON layer document and a terminal table.

use std::convert::Infallible;

use comfy_table::{Cell, CellAlignment, Table};
use serde::Serialize;
use thiserror::Error;

use statannot_common::format_numeric;
use statannot_core::AnnotationRenderer;
use statannot_model::{AnnotationDescriptor, AnnotationMode, AnnotationWarning, BracketLayer, TextLayer};

use crate::summary::{align_column, apply_table_style, dim_cell, header_cell};

/// Renderer primitive a layer was sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Primitive {
    ManualBracket,
    Text,
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to encode annotation layer: {0}")]
    Json(#[from] serde_json::Error),
}

/// Captures the drawn layer as JSON.
#[derive(Debug, Default)]
pub struct JsonLayerRenderer {
    pub drawn: Option<(Primitive, serde_json::Value)>,
}

impl AnnotationRenderer for JsonLayerRenderer {
    type Error = OutputError;

    fn draw_brackets(&mut self, layer: &BracketLayer<'_>) -> Result<(), Self::Error> {
        self.drawn = Some((Primitive::ManualBracket, serde_json::to_value(layer)?));
        Ok(())
    }

    fn draw_text(&mut self, layer: &TextLayer<'_>) -> Result<(), Self::Error> {
        self.drawn = Some((Primitive::Text, serde_json::to_value(layer)?));
        Ok(())
    }
}

/// The document written by `statannot resolve --format json`.
#[derive(Debug, Serialize)]
pub struct LayerDocument {
    pub mode: AnnotationMode,
    pub primitive: Primitive,
    pub layer: serde_json::Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<AnnotationWarning>,
}

impl JsonLayerRenderer {
    /// Pairs the drawn layer with the descriptor's mode and warnings.
    pub fn into_document(self, descriptor: &AnnotationDescriptor) -> Option<LayerDocument> {
        let (primitive, layer) = self.drawn?;
        Some(LayerDocument {
            mode: descriptor.mode,
            primitive,
            layer,
            warnings: descriptor.warnings.clone(),
        })
    }
}

/// Lays the drawn annotations out as a terminal table.
#[derive(Debug, Default)]
pub struct TableRenderer {
    pub table: Option<Table>,
}

impl AnnotationRenderer for TableRenderer {
    type Error = Infallible;

    fn draw_brackets(&mut self, layer: &BracketLayer<'_>) -> Result<(), Self::Error> {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Label"),
            header_cell("xmin"),
            header_cell("xmax"),
            header_cell("y"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 3, CellAlignment::Right);
        for bracket in &layer.brackets {
            table.add_row(vec![
                label_cell(bracket.label),
                Cell::new(bracket.xmin),
                Cell::new(bracket.xmax),
                Cell::new(format_numeric(bracket.y_position)),
            ]);
        }
        self.table = Some(table);
        Ok(())
    }

    fn draw_text(&mut self, layer: &TextLayer<'_>) -> Result<(), Self::Error> {
        let mut table = Table::new();
        table.set_header(vec![
            header_cell("Label"),
            header_cell("x"),
            header_cell("Axis slot"),
            header_cell("y"),
        ]);
        apply_table_style(&mut table);
        align_column(&mut table, 2, CellAlignment::Right);
        align_column(&mut table, 3, CellAlignment::Right);
        for label in &layer.labels {
            table.add_row(vec![
                label_cell(label.label),
                Cell::new(label.x),
                Cell::new(label.x_index + 1),
                Cell::new(format_numeric(label.y_position)),
            ]);
        }
        self.table = Some(table);
        Ok(())
    }
}

fn label_cell(label: &str) -> Cell {
    if label.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(label)
    }
}
