//! Annotation request options.
//!
//! Field names follow the snake_case Rust convention; the dotted spellings
//! used by R tooling (`y.position`, `remove.bracket`, ...) are accepted as
//! serde aliases so option files written for either style deserialize.

use serde::{Deserialize, Serialize};

pub const DEFAULT_LABEL: &str = "p";
pub const DEFAULT_Y_POSITION: &str = "y.position";
pub const DEFAULT_XMIN: &str = "group1";
pub const DEFAULT_XMAX: &str = "group2";

/// Where annotations sit on the value axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawYPosition", into = "RawYPosition")]
pub enum YPosition {
    /// Literal coordinates, tiled onto the rows.
    Literal(Vec<f64>),
    /// Name of a column holding one coordinate per row.
    Column(String),
}

impl Default for YPosition {
    fn default() -> Self {
        Self::Column(DEFAULT_Y_POSITION.to_string())
    }
}

impl From<f64> for YPosition {
    fn from(value: f64) -> Self {
        Self::Literal(vec![value])
    }
}

impl From<Vec<f64>> for YPosition {
    fn from(values: Vec<f64>) -> Self {
        Self::Literal(values)
    }
}

impl From<&str> for YPosition {
    fn from(column: &str) -> Self {
        Self::Column(column.to_string())
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawYPosition {
    Column(String),
    Scalar(f64),
    Sequence(Vec<f64>),
}

impl From<RawYPosition> for YPosition {
    fn from(raw: RawYPosition) -> Self {
        match raw {
            RawYPosition::Column(name) => Self::Column(name),
            RawYPosition::Scalar(value) => Self::Literal(vec![value]),
            RawYPosition::Sequence(values) => Self::Literal(values),
        }
    }
}

impl From<YPosition> for RawYPosition {
    fn from(position: YPosition) -> Self {
        match position {
            YPosition::Column(name) => Self::Column(name),
            YPosition::Literal(values) => Self::Sequence(values),
        }
    }
}

/// Rendering style parameters, passed through to the renderer unmodified.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleParams {
    /// Base text size.
    pub size: f64,
    /// Label text size; falls back to `size` when unset.
    #[serde(alias = "label.size")]
    pub label_size: Option<f64>,
    /// Bracket line width.
    #[serde(alias = "bracket.size")]
    pub bracket_size: f64,
    /// Length of the bracket end-ticks as a fraction of the plot height.
    #[serde(alias = "tip.length")]
    pub tip_length: f64,
    /// Vertical justification of the label text.
    pub vjust: f64,
}

impl Default for StyleParams {
    fn default() -> Self {
        Self {
            size: 3.88,
            label_size: None,
            bracket_size: 0.3,
            tip_length: 0.03,
            vjust: 0.0,
        }
    }
}

impl StyleParams {
    pub fn effective_label_size(&self) -> f64 {
        self.label_size.unwrap_or(self.size)
    }
}

/// Options for resolving a results table into annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotationOptions {
    /// Label column name, or a template such as `"p = {p.adj}"`.
    pub label: String,
    #[serde(alias = "y.position")]
    pub y_position: YPosition,
    /// Left bracket position column. `None` means the default `group1`
    /// column was not explicitly overridden.
    pub xmin: Option<String>,
    /// Right bracket position column; `None` renders text labels.
    pub xmax: Option<String>,
    /// Column overriding `xmin` for plain text labels.
    pub x: Option<String>,
    #[serde(flatten)]
    pub style: StyleParams,
    #[serde(alias = "remove.bracket")]
    pub remove_bracket: bool,
    /// Drop rows whose label is `ns`.
    #[serde(alias = "hide.ns")]
    pub hide_ns: bool,
}

impl Default for AnnotationOptions {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            y_position: YPosition::default(),
            xmin: None,
            xmax: Some(DEFAULT_XMAX.to_string()),
            x: None,
            style: StyleParams::default(),
            remove_bracket: false,
            hide_ns: false,
        }
    }
}

impl AnnotationOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    #[must_use]
    pub fn with_y_position(mut self, position: impl Into<YPosition>) -> Self {
        self.y_position = position.into();
        self
    }

    #[must_use]
    pub fn with_xmin(mut self, column: impl Into<String>) -> Self {
        self.xmin = Some(column.into());
        self
    }

    #[must_use]
    pub fn with_xmax(mut self, column: Option<String>) -> Self {
        self.xmax = column;
        self
    }

    #[must_use]
    pub fn with_x(mut self, column: impl Into<String>) -> Self {
        self.x = Some(column.into());
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: StyleParams) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_remove_bracket(mut self, enable: bool) -> Self {
        self.remove_bracket = enable;
        self
    }

    #[must_use]
    pub fn with_hide_ns(mut self, enable: bool) -> Self {
        self.hide_ns = enable;
        self
    }

    /// The left-position column, falling back to the default.
    pub fn xmin_column(&self) -> &str {
        self.xmin.as_deref().unwrap_or(DEFAULT_XMIN)
    }
}
