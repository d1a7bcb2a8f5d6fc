//! Tests for renderer dispatch.

use polars::prelude::{DataFrame, IntoColumn, NamedFrom, Series};
use proptest::prelude::*;

use statannot_core::{AnnotationRenderer, annotate, dispatch, resolve_labels, tile_y_positions};
use statannot_model::{
    AnnotationDescriptor, AnnotationError, AnnotationMode, AnnotationOptions, AnnotationRow,
    BracketLayer, ColumnRole, StyleParams, TextLayer,
};

#[derive(Debug, thiserror::Error)]
#[error("backend unavailable")]
struct BackendUnavailable;

#[derive(Default)]
struct RecordingRenderer {
    brackets: Vec<(String, String, String, f64)>,
    texts: Vec<(String, usize, f64)>,
    bracket_calls: usize,
    text_calls: usize,
    tip_length: Option<f64>,
    text_size: Option<f64>,
    fail: bool,
}

impl AnnotationRenderer for RecordingRenderer {
    type Error = BackendUnavailable;

    fn draw_brackets(&mut self, layer: &BracketLayer<'_>) -> Result<(), Self::Error> {
        if self.fail {
            return Err(BackendUnavailable);
        }
        self.bracket_calls += 1;
        self.tip_length = Some(layer.tip_length);
        for bracket in &layer.brackets {
            self.brackets.push((
                bracket.label.to_string(),
                bracket.xmin.to_string(),
                bracket.xmax.to_string(),
                bracket.y_position,
            ));
        }
        Ok(())
    }

    fn draw_text(&mut self, layer: &TextLayer<'_>) -> Result<(), Self::Error> {
        if self.fail {
            return Err(BackendUnavailable);
        }
        self.text_calls += 1;
        self.text_size = Some(layer.size);
        for label in &layer.labels {
            self.texts
                .push((label.label.to_string(), label.x_index, label.y_position));
        }
        Ok(())
    }
}

fn results() -> DataFrame {
    DataFrame::new(vec![
        Series::new("group1".into(), ["ctrl", "ctrl"]).into_column(),
        Series::new("group2".into(), ["trt1", "trt2"]).into_column(),
        Series::new("p.signif".into(), ["ns", "**"]).into_column(),
        Series::new("y.position".into(), [4.0, 5.5]).into_column(),
    ])
    .unwrap()
}

#[test]
fn bracket_mode_calls_bracket_primitive_with_style() {
    let df = results();
    let options = AnnotationOptions::new()
        .with_label("p.signif")
        .with_style(StyleParams {
            tip_length: 0.01,
            ..StyleParams::default()
        });
    let mut renderer = RecordingRenderer::default();

    let descriptor = annotate(&df, &options, &mut renderer).unwrap();

    assert_eq!(descriptor.mode, AnnotationMode::Bracket);
    assert_eq!(renderer.bracket_calls, 1);
    assert_eq!(renderer.text_calls, 0);
    assert_eq!(
        renderer.brackets,
        vec![
            ("ns".to_string(), "ctrl".to_string(), "trt1".to_string(), 4.0),
            ("**".to_string(), "ctrl".to_string(), "trt2".to_string(), 5.5),
        ]
    );
    assert_eq!(renderer.tip_length, Some(0.01));
}

#[test]
fn text_mode_calls_text_primitive_with_label_size() {
    let df = results();
    let options = AnnotationOptions::new()
        .with_label("p.signif")
        .with_remove_bracket(true)
        .with_style(StyleParams {
            size: 6.0,
            ..StyleParams::default()
        });
    let mut renderer = RecordingRenderer::default();

    annotate(&df, &options, &mut renderer).unwrap();

    assert_eq!(renderer.bracket_calls, 0);
    assert_eq!(renderer.text_calls, 1);
    assert_eq!(
        renderer.texts,
        vec![("ns".to_string(), 0, 4.0), ("**".to_string(), 1, 5.5)]
    );
    assert_eq!(renderer.text_size, Some(6.0));
}

#[test]
fn resolution_failure_draws_nothing() {
    let df = results();
    let options = AnnotationOptions::new().with_label("pp");
    let mut renderer = RecordingRenderer::default();

    let err = annotate(&df, &options, &mut renderer).unwrap_err();

    assert!(matches!(err, AnnotationError::MissingColumn { .. }));
    assert_eq!(renderer.bracket_calls + renderer.text_calls, 0);
}

#[test]
fn renderer_failure_is_wrapped() {
    let df = results();
    let options = AnnotationOptions::new().with_label("p.signif");
    let mut renderer = RecordingRenderer {
        fail: true,
        ..RecordingRenderer::default()
    };

    let err = annotate(&df, &options, &mut renderer).unwrap_err();

    assert!(matches!(err, AnnotationError::Render(_)));
    assert_eq!(err.to_string(), "renderer failed: backend unavailable");
}

fn descriptor(mode: AnnotationMode, xmaxes: &[Option<&str>]) -> AnnotationDescriptor {
    let rows: Vec<AnnotationRow> = xmaxes
        .iter()
        .enumerate()
        .map(|(idx, xmax)| AnnotationRow {
            label: format!("p{idx}"),
            xmin: "ctrl".to_string(),
            xmax: xmax.map(str::to_string),
            y_position: 10.0 + idx as f64,
        })
        .collect();
    let categories = match mode {
        AnnotationMode::Text => vec!["ctrl".to_string()],
        AnnotationMode::Bracket => Vec::new(),
    };
    AnnotationDescriptor {
        mode,
        rows,
        categories,
        style: StyleParams::default(),
        warnings: Vec::new(),
    }
}

#[test]
fn dispatch_text_descriptor_draws_text_once() {
    let descriptor = descriptor(AnnotationMode::Text, &[None, None]);
    let mut renderer = RecordingRenderer::default();

    dispatch(&descriptor, &mut renderer).unwrap();

    assert_eq!(renderer.text_calls, 1);
    assert_eq!(renderer.bracket_calls, 0);
    assert_eq!(
        renderer.texts,
        vec![("p0".to_string(), 0, 10.0), ("p1".to_string(), 0, 11.0)]
    );
}

#[test]
fn dispatch_empty_text_descriptor_still_draws() {
    let descriptor = descriptor(AnnotationMode::Text, &[]);
    let mut renderer = RecordingRenderer::default();

    dispatch(&descriptor, &mut renderer).unwrap();

    assert_eq!(renderer.text_calls, 1);
    assert!(renderer.texts.is_empty());
}

#[test]
fn dispatch_bracket_descriptor_without_xmax_fails_before_drawing() {
    let descriptor = descriptor(AnnotationMode::Bracket, &[Some("trt1"), None]);
    let mut renderer = RecordingRenderer::default();

    let err = dispatch(&descriptor, &mut renderer).unwrap_err();

    assert!(matches!(
        err,
        AnnotationError::MissingValue {
            role: ColumnRole::Xmax,
            row: 1
        }
    ));
    assert_eq!(renderer.bracket_calls + renderer.text_calls, 0);
}

proptest! {
    #[test]
    fn tiled_y_positions_repeat_the_input(
        values in prop::collection::vec(-100.0f64..100.0, 1..5),
        repeats in 0usize..6,
    ) {
        let rows = values.len() * repeats;
        let tiled = tile_y_positions(&values, rows).unwrap();
        prop_assert_eq!(tiled.len(), rows);
        for (idx, value) in tiled.iter().enumerate() {
            prop_assert_eq!(*value, values[idx % values.len()]);
        }
    }

    #[test]
    fn untemplated_labels_equal_column_values(
        labels in prop::collection::vec("[a-z*.0-9 ]{0,8}", 0..10),
    ) {
        let df = DataFrame::new(vec![
            Series::new("label".into(), labels.clone()).into_column(),
        ])
        .unwrap();
        let resolved = resolve_labels(&df, "label").unwrap();
        prop_assert_eq!(resolved, labels);
    }

    #[test]
    fn templated_labels_substitute_each_row(
        values in prop::collection::vec("[a-z0-9.]{1,6}", 1..10),
    ) {
        let df = DataFrame::new(vec![
            Series::new("p".into(), values.clone()).into_column(),
        ])
        .unwrap();
        let resolved = resolve_labels(&df, "p = {p}").unwrap();
        let expected: Vec<String> = values.iter().map(|v| format!("p = {v}")).collect();
        prop_assert_eq!(resolved, expected);
    }
}
