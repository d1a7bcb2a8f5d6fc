use std::fs;
use std::io::{self, Write};

use anyhow::{Context, Result, anyhow, bail};
use comfy_table::{Cell, CellAlignment, Table};
use polars::prelude::{AnyValue, DataFrame};
use tracing::{info, info_span};

use statannot_common::any_to_string;
use statannot_core::annotate;
use statannot_ingest::{ReadOptions, read_results_table_with_options};
use statannot_model::{AnnotationDescriptor, AnnotationOptions, StyleParams, YPosition};

use crate::cli::{OutputFormatArg, ResolveArgs, TableArgs};
use crate::output::{JsonLayerRenderer, TableRenderer};
use crate::summary::{align_column, apply_table_style, dim_cell, header_cell, print_annotation_table};

/// Builds annotation options from `resolve` flags.
pub fn options_from_args(args: &ResolveArgs) -> AnnotationOptions {
    let y_position = match (&args.y_values, &args.y_position) {
        (Some(values), _) => YPosition::Literal(values.clone()),
        (None, Some(column)) => YPosition::Column(column.clone()),
        (None, None) => YPosition::default(),
    };
    AnnotationOptions {
        label: args.label.clone(),
        y_position,
        xmin: args.xmin.clone(),
        xmax: if args.no_xmax {
            None
        } else {
            Some(args.xmax.clone())
        },
        x: args.x.clone(),
        style: StyleParams {
            size: args.size,
            label_size: args.label_size,
            bracket_size: args.bracket_size,
            tip_length: args.tip_length,
            vjust: args.vjust,
        },
        remove_bracket: args.remove_bracket,
        hide_ns: args.hide_ns,
    }
}

pub fn read_options(args: &TableArgs) -> Result<ReadOptions> {
    let separator = u8::try_from(args.separator)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| anyhow!("separator must be a single ASCII character"))?;
    let options = ReadOptions::default().with_separator(separator);
    Ok(if args.infer_types {
        options.infer_types()
    } else {
        options
    })
}

fn load_table(args: &TableArgs) -> Result<DataFrame> {
    let options = read_options(args)?;
    let df = read_results_table_with_options(&args.results, options)
        .with_context(|| format!("load results table {}", args.results.display()))?;
    info!(rows = df.height(), columns = df.width(), "results table loaded");
    Ok(df)
}

pub fn run_resolve(args: &ResolveArgs) -> Result<AnnotationDescriptor> {
    let span = info_span!("resolve", results = %args.table.results.display());
    let _guard = span.enter();

    let df = load_table(&args.table)?;
    let options = options_from_args(args);

    match args.format {
        OutputFormatArg::Json => {
            let mut renderer = JsonLayerRenderer::default();
            let descriptor =
                annotate(&df, &options, &mut renderer).context("resolve annotations")?;
            let document = renderer
                .into_document(&descriptor)
                .ok_or_else(|| anyhow!("no annotation layer was drawn"))?;
            let mut text = serde_json::to_string_pretty(&document).context("encode layer")?;
            text.push('\n');
            write_output(args, &text)?;
            Ok(descriptor)
        }
        OutputFormatArg::Table => {
            let mut renderer = TableRenderer::default();
            let descriptor =
                annotate(&df, &options, &mut renderer).context("resolve annotations")?;
            let table = renderer
                .table
                .ok_or_else(|| anyhow!("no annotation layer was drawn"))?;
            if args.output.is_some() {
                write_output(args, &format!("{table}\n"))?;
            } else {
                print_annotation_table(&descriptor, &table);
            }
            Ok(descriptor)
        }
    }
}

fn write_output(args: &ResolveArgs, text: &str) -> Result<()> {
    match &args.output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), "annotation layer written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .context("write annotation layer")?;
        }
    }
    Ok(())
}

pub fn run_columns(args: &TableArgs) -> Result<()> {
    let df = load_table(args)?;
    if df.width() == 0 {
        bail!("results table {} has no columns", args.results.display());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Type"),
        header_cell("First value"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for column in df.get_columns() {
        let first = column.get(0).unwrap_or(AnyValue::Null);
        let first = if matches!(first, AnyValue::Null) {
            dim_cell("-")
        } else {
            Cell::new(any_to_string(first))
        };
        table.add_row(vec![
            Cell::new(column.name().as_str()),
            Cell::new(column.dtype().to_string()),
            first,
        ]);
    }
    println!("{table}");
    Ok(())
}
