//! Integration tests for the statannot CLI.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::level_filters::LevelFilter;

use statannot_cli::cli::{Cli, Command, ResolveArgs};
use statannot_cli::commands::{options_from_args, read_options, run_resolve};
use statannot_cli::logging::LogFormat;
use statannot_model::{AnnotationMode, AnnotationWarning, YPosition};

const DOSE_RESULTS: &str = "group1,group2,p.adj,p.adj.signif,y.position\n\
                            0.5,1,0.001,**,29\n\
                            0.5,2,0.02,*,35\n\
                            1,2,0.04,*,39\n";

fn write_results(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("results.csv");
    fs::write(&path, contents).expect("write results");
    path
}

const PADDED_RESULTS: &str = "group1,group2,p,y.position\n\
                              01,02,0.050,10\n\
                              01,03,2.2e-16,12\n";

fn resolve_args(argv: &[&str]) -> ResolveArgs {
    let cli = Cli::try_parse_from(argv).expect("parse args");
    match cli.command {
        Command::Resolve(args) => args,
        Command::Columns(_) => panic!("expected resolve command"),
    }
}

#[test]
fn verbosity_flags_disable_env_filter() {
    let cli = Cli::try_parse_from(["statannot", "-vv", "columns", "results.csv"]).unwrap();
    let config = cli.log_config();
    assert_eq!(config.level_filter, LevelFilter::DEBUG);
    assert!(!config.use_env_filter);
}

#[test]
fn explicit_log_level_wins_over_verbosity() {
    let cli = Cli::try_parse_from([
        "statannot",
        "-v",
        "--log-level",
        "error",
        "--log-format",
        "json",
        "--color",
        "never",
        "columns",
        "results.csv",
    ])
    .unwrap();
    let config = cli.log_config();
    assert_eq!(config.level_filter, LevelFilter::ERROR);
    assert_eq!(config.format, LogFormat::Json);
    assert!(!config.with_ansi);
    assert!(!config.use_env_filter);
}

#[test]
fn default_logging_defers_to_env() {
    let cli = Cli::try_parse_from(["statannot", "columns", "results.csv"]).unwrap();
    let config = cli.log_config();
    assert_eq!(config.level_filter, LevelFilter::WARN);
    assert!(config.use_env_filter);
    assert!(config.log_file.is_none());
}

#[test]
fn resolve_flags_map_to_options() {
    let args = resolve_args(&[
        "statannot",
        "resolve",
        "results.csv",
        "--label",
        "p = {p.adj}",
        "--y-values",
        "29,35,39",
        "--remove-bracket",
        "--tip-length",
        "0.01",
        "--vjust",
        "-0.5",
    ]);
    let options = options_from_args(&args);
    assert_eq!(options.label, "p = {p.adj}");
    assert_eq!(options.y_position, YPosition::Literal(vec![29.0, 35.0, 39.0]));
    assert_eq!(options.xmin, None);
    assert_eq!(options.xmax.as_deref(), Some("group2"));
    assert!(options.remove_bracket);
    assert!((options.style.tip_length - 0.01).abs() < 1e-9);
    assert!((options.style.vjust + 0.5).abs() < 1e-9);
    assert_eq!(options.style.label_size, None);
}

#[test]
fn no_xmax_and_column_y_position() {
    let args = resolve_args(&[
        "statannot",
        "resolve",
        "results.csv",
        "--no-xmax",
        "--y-position",
        "ypos",
        "--xmin",
        "dose",
    ]);
    let options = options_from_args(&args);
    assert_eq!(options.xmax, None);
    assert_eq!(options.xmin.as_deref(), Some("dose"));
    assert_eq!(options.y_position, YPosition::Column("ypos".to_string()));
}

#[test]
fn y_position_and_y_values_conflict() {
    let result = Cli::try_parse_from([
        "statannot",
        "resolve",
        "results.csv",
        "--y-position",
        "ypos",
        "--y-values",
        "1",
    ]);
    assert!(result.is_err());
}

#[test]
fn resolve_writes_bracket_layer_json() {
    let dir = tempfile::tempdir().unwrap();
    let results = write_results(dir.path(), DOSE_RESULTS);
    let output = dir.path().join("layer.json");
    let args = resolve_args(&[
        "statannot",
        "resolve",
        results.to_str().unwrap(),
        "--label",
        "p.adj",
        "--y-values",
        "29,35,39",
        "--output",
        output.to_str().unwrap(),
    ]);

    let descriptor = run_resolve(&args).unwrap();
    assert_eq!(descriptor.mode, AnnotationMode::Bracket);

    let text = fs::read_to_string(&output).unwrap();
    insta::assert_snapshot!(text.trim_end(), @r#"
    {
      "mode": "bracket",
      "primitive": "manual_bracket",
      "layer": {
        "bracket_size": 0.3,
        "brackets": [
          {
            "label": "0.001",
            "xmax": "1",
            "xmin": "0.5",
            "y_position": 29.0
          },
          {
            "label": "0.02",
            "xmax": "2",
            "xmin": "0.5",
            "y_position": 35.0
          },
          {
            "label": "0.04",
            "xmax": "2",
            "xmin": "1",
            "y_position": 39.0
          }
        ],
        "label_size": 3.88,
        "tip_length": 0.03,
        "vjust": 0.0
      }
    }
    "#);
}

#[test]
fn resolve_reports_ambiguous_bracket_removal() {
    let dir = tempfile::tempdir().unwrap();
    let results = write_results(dir.path(), DOSE_RESULTS);
    let output = dir.path().join("layer.json");
    let args = resolve_args(&[
        "statannot",
        "resolve",
        results.to_str().unwrap(),
        "--label",
        "p.adj.signif",
        "--y-position",
        "y.position",
        "--remove-bracket",
        "--output",
        output.to_str().unwrap(),
    ]);

    let descriptor = run_resolve(&args).unwrap();
    assert_eq!(descriptor.mode, AnnotationMode::Bracket);
    assert!(matches!(
        descriptor.warnings.as_slice(),
        [AnnotationWarning::AmbiguousBracketRemoval { distinct: 2, .. }]
    ));

    let document: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(document["warnings"][0]["kind"], "ambiguous_bracket_removal");
    assert_eq!(document["layer"]["brackets"][2]["y_position"], 39.0);
}

#[test]
fn resolve_text_layer_table_output() {
    let dir = tempfile::tempdir().unwrap();
    let results = write_results(
        dir.path(),
        "group1,group2,p,y.position\nctrl,trt1,0.01,4\nctrl,trt2,0.2,5\n",
    );
    let output = dir.path().join("layer.txt");
    let args = resolve_args(&[
        "statannot",
        "resolve",
        results.to_str().unwrap(),
        "--remove-bracket",
        "--format",
        "table",
        "--output",
        output.to_str().unwrap(),
    ]);

    let descriptor = run_resolve(&args).unwrap();
    assert_eq!(descriptor.mode, AnnotationMode::Text);
    assert_eq!(descriptor.categories, vec!["trt1", "trt2"]);

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("trt1"));
    assert!(text.contains("0.2"));
}

#[test]
fn resolve_missing_column_fails() {
    let dir = tempfile::tempdir().unwrap();
    let results = write_results(dir.path(), DOSE_RESULTS);
    let args = resolve_args(&[
        "statannot",
        "resolve",
        results.to_str().unwrap(),
        "--label",
        "pp",
    ]);

    let err = run_resolve(&args).unwrap_err();
    assert!(format!("{err:#}").contains("can't find the label column 'pp'"));
}

#[test]
fn resolve_keeps_group_identifiers_and_labels_verbatim() {
    let dir = tempfile::tempdir().unwrap();
    let results = write_results(dir.path(), PADDED_RESULTS);
    let output = dir.path().join("layer.txt");
    let args = resolve_args(&[
        "statannot",
        "resolve",
        results.to_str().unwrap(),
        "--format",
        "table",
        "--output",
        output.to_str().unwrap(),
    ]);

    let descriptor = run_resolve(&args).unwrap();
    assert_eq!(descriptor.mode, AnnotationMode::Bracket);
    let rows: Vec<(&str, &str, Option<&str>)> = descriptor
        .rows
        .iter()
        .map(|row| (row.label.as_str(), row.xmin.as_str(), row.xmax.as_deref()))
        .collect();
    assert_eq!(
        rows,
        vec![("0.050", "01", Some("02")), ("2.2e-16", "01", Some("03"))]
    );
    assert_eq!(descriptor.y_positions(), vec![10.0, 12.0]);

    let text = fs::read_to_string(&output).unwrap();
    assert!(text.contains("0.050"));
    assert!(text.contains("02"));
}

#[test]
fn remove_bracket_keeps_zero_padded_categories() {
    let dir = tempfile::tempdir().unwrap();
    let results = write_results(dir.path(), PADDED_RESULTS);
    let output = dir.path().join("layer.json");
    let args = resolve_args(&[
        "statannot",
        "resolve",
        results.to_str().unwrap(),
        "--remove-bracket",
        "--output",
        output.to_str().unwrap(),
    ]);

    let descriptor = run_resolve(&args).unwrap();
    assert_eq!(descriptor.mode, AnnotationMode::Text);
    assert_eq!(descriptor.categories, vec!["02", "03"]);

    let document: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(document["primitive"], "text");
    assert_eq!(document["layer"]["categories"][0], "02");
    assert_eq!(document["layer"]["labels"][1]["label"], "2.2e-16");
}

#[test]
fn infer_types_is_opt_in() {
    let dir = tempfile::tempdir().unwrap();
    let results = write_results(dir.path(), PADDED_RESULTS);
    let output = dir.path().join("layer.json");
    let args = resolve_args(&[
        "statannot",
        "resolve",
        results.to_str().unwrap(),
        "--infer-types",
        "--output",
        output.to_str().unwrap(),
    ]);
    assert!(!read_options(&args.table).unwrap().is_all_text());

    let descriptor = run_resolve(&args).unwrap();
    assert_eq!(descriptor.labels(), vec!["0.05", "2.2e-16"]);
    assert_eq!(descriptor.rows[0].xmin, "1");
}

#[test]
fn read_options_default_to_text_and_reject_wide_separators() {
    let args = resolve_args(&["statannot", "resolve", "results.csv", "--separator", ";"]);
    let options = read_options(&args.table).unwrap();
    assert!(options.is_all_text());
    assert_eq!(options.separator, b';');

    let args = resolve_args(&["statannot", "resolve", "results.csv", "--separator", "§"]);
    assert!(read_options(&args.table).is_err());
}
