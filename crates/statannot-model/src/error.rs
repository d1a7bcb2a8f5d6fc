use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The role a column reference plays in an annotation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    Label,
    Xmin,
    Xmax,
    YPosition,
    TemplateField,
}

impl ColumnRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Label => "label",
            Self::Xmin => "xmin",
            Self::Xmax => "xmax",
            Self::YPosition => "y.position",
            Self::TemplateField => "template field",
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors raised while resolving an annotation request.
#[derive(Debug, Error)]
pub enum AnnotationError {
    /// A referenced column does not exist in the results table.
    #[error("can't find the {role} column '{column}' in the data")]
    MissingColumn { column: String, role: ColumnRole },

    /// Literal y-positions cannot be tiled onto the rows.
    #[error(
        "y.position has {len} value(s), which does not evenly divide the {rows} row(s) of the data"
    )]
    YPositionLength { len: usize, rows: usize },

    /// A y-position cell is null or not a number.
    #[error("y.position column '{column}' has a non-numeric value '{value}' at row {row}")]
    InvalidYPosition {
        column: String,
        row: usize,
        value: String,
    },

    /// A required position value is null.
    #[error("{role} value is missing at row {row}")]
    MissingValue { role: ColumnRole, row: usize },

    /// The label template could not be parsed.
    #[error("invalid label template '{template}': {reason}")]
    Template { template: String, reason: String },

    /// The rendering collaborator rejected the annotation layer.
    #[error("renderer failed: {0}")]
    Render(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl AnnotationError {
    pub fn missing_column(column: impl Into<String>, role: ColumnRole) -> Self {
        Self::MissingColumn {
            column: column.into(),
            role,
        }
    }
}

pub type Result<T> = std::result::Result<T, AnnotationError>;
