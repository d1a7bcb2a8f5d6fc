pub mod descriptor;
pub mod error;
pub mod options;

pub use descriptor::{
    AnnotationDescriptor, AnnotationMode, AnnotationRow, AnnotationWarning, Bracket, BracketLayer,
    TextLabel, TextLayer,
};
pub use error::{AnnotationError, ColumnRole, Result};
pub use options::{
    AnnotationOptions, DEFAULT_LABEL, DEFAULT_XMAX, DEFAULT_XMIN, DEFAULT_Y_POSITION,
    StyleParams, YPosition,
};
