//! Manual p-value annotations for charts.
//!
//! Turns a table of statistical-test results (one row per comparison) into
//! bracket or text annotation layers:
//!
//! 1. labels come from a column or a `{column}` template;
//! 2. positions come from the `group1`/`group2` columns (or overrides);
//! 3. y-positions come from a column or literal values tiled onto the rows;
//! 4. the resolved layer is handed to an [`AnnotationRenderer`].
//!
//! ```
//! use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};
//! use statannot_core::resolve;
//! use statannot_model::{AnnotationMode, AnnotationOptions};
//!
//! let df = DataFrame::new(vec![
//!     Series::new("group1".into(), ["ctrl", "ctrl"]).into_column(),
//!     Series::new("group2".into(), ["trt1", "trt2"]).into_column(),
//!     Series::new("p".into(), [0.01, 0.2]).into_column(),
//! ])
//! .unwrap();
//! let options = AnnotationOptions::new().with_y_position(vec![10.0, 12.0]);
//! let descriptor = resolve(&df, &options).unwrap();
//! assert_eq!(descriptor.mode, AnnotationMode::Bracket);
//! assert_eq!(descriptor.labels(), vec!["0.01", "0.2"]);
//! ```

pub mod columns;
pub mod render;
pub mod resolver;
pub mod template;

pub use render::{AnnotationRenderer, annotate, dispatch};
pub use resolver::{NOT_SIGNIFICANT, resolve, resolve_labels, resolve_y_positions, tile_y_positions};
pub use template::{Template, is_template};
