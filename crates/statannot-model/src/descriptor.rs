//! Resolved annotation descriptors and the layers handed to renderers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::options::StyleParams;

/// How the annotations are drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnnotationMode {
    /// A labelled span between two categorical positions.
    Bracket,
    /// A label at a single categorical position.
    Text,
}

impl AnnotationMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bracket => "bracket",
            Self::Text => "text",
        }
    }
}

impl fmt::Display for AnnotationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One resolved annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRow {
    pub label: String,
    pub xmin: String,
    pub xmax: Option<String>,
    pub y_position: f64,
}

/// Non-fatal conditions raised during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnnotationWarning {
    /// Bracket removal was requested but the comparisons do not share a
    /// single reference group, so the brackets were kept.
    AmbiguousBracketRemoval { column: String, distinct: usize },
}

impl fmt::Display for AnnotationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AmbiguousBracketRemoval { column, distinct } => write!(
                f,
                "bracket removal skipped: column '{column}' has {distinct} distinct groups; \
                 brackets can only be removed when all comparisons share one reference group"
            ),
        }
    }
}

/// The fully resolved output of an annotation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationDescriptor {
    pub mode: AnnotationMode,
    pub rows: Vec<AnnotationRow>,
    /// Ordered category axis for text labels; empty in bracket mode.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    pub style: StyleParams,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<AnnotationWarning>,
}

impl AnnotationDescriptor {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.rows.iter().map(|row| row.label.as_str()).collect()
    }

    pub fn y_positions(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.y_position).collect()
    }

    /// Builds the bracket layer; `None` unless every row has a right position.
    pub fn bracket_layer(&self) -> Option<BracketLayer<'_>> {
        if self.mode != AnnotationMode::Bracket {
            return None;
        }
        let brackets = self
            .rows
            .iter()
            .map(|row| {
                row.xmax.as_deref().map(|xmax| Bracket {
                    label: &row.label,
                    xmin: &row.xmin,
                    xmax,
                    y_position: row.y_position,
                })
            })
            .collect::<Option<Vec<_>>>()?;
        Some(BracketLayer {
            brackets,
            label_size: self.style.effective_label_size(),
            bracket_size: self.style.bracket_size,
            tip_length: self.style.tip_length,
            vjust: self.style.vjust,
        })
    }

    /// Builds the text layer; `None` in bracket mode.
    pub fn text_layer(&self) -> Option<TextLayer<'_>> {
        if self.mode != AnnotationMode::Text {
            return None;
        }
        let labels = self
            .rows
            .iter()
            .map(|row| TextLabel {
                label: &row.label,
                x: &row.xmin,
                x_index: self
                    .categories
                    .iter()
                    .position(|category| category == &row.xmin)
                    .unwrap_or_default(),
                y_position: row.y_position,
            })
            .collect();
        Some(TextLayer {
            labels,
            categories: &self.categories,
            size: self.style.effective_label_size(),
            vjust: self.style.vjust,
        })
    }
}

/// A single bracket: span `xmin..xmax` drawn at `y_position`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bracket<'a> {
    pub label: &'a str,
    pub xmin: &'a str,
    pub xmax: &'a str,
    pub y_position: f64,
}

/// Input for a renderer's manual-bracket primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BracketLayer<'a> {
    pub brackets: Vec<Bracket<'a>>,
    pub label_size: f64,
    pub bracket_size: f64,
    pub tip_length: f64,
    pub vjust: f64,
}

/// A text label at a categorical position. `x_index` is the zero-based
/// position of `x` on the category axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TextLabel<'a> {
    pub label: &'a str,
    pub x: &'a str,
    pub x_index: usize,
    pub y_position: f64,
}

/// Input for a renderer's text-label primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextLayer<'a> {
    pub labels: Vec<TextLabel<'a>>,
    pub categories: &'a [String],
    pub size: f64,
    pub vjust: f64,
}
