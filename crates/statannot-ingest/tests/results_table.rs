use std::fs;
use std::path::PathBuf;

use polars::prelude::{DataFrame, DataType};
use statannot_common::any_to_string;
use statannot_ingest::{ReadOptions, read_results_table, read_results_table_with_options};

fn temp_file(name: &str, contents: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    (dir, path)
}

fn cell(df: &DataFrame, column: &str, row: usize) -> String {
    let column = df.column(column).expect("column");
    any_to_string(column.get(row).expect("row"))
}

const RESULTS: &str = "group1,group2,p.adj,y.position\n0.5,1,0.001,29\n0.5,2,0.02,35\n1,2,0.04,39\n";

#[test]
fn reads_results_table_as_text_by_default() {
    let (_dir, path) = temp_file("results.csv", "group1,group2,p,y.position\n01,02,0.050,10\n01,03,2.2e-16,12\n");
    let df = read_results_table(&path).expect("read csv");
    let names: Vec<&str> = df.get_column_names().iter().map(|name| name.as_str()).collect();
    assert_eq!(names, vec!["group1", "group2", "p", "y.position"]);
    assert_eq!(df.height(), 2);

    for name in ["group1", "group2", "p", "y.position"] {
        assert_eq!(df.column(name).expect("column").dtype(), &DataType::String);
    }
    assert_eq!(cell(&df, "group1", 0), "01");
    assert_eq!(cell(&df, "group2", 1), "03");
    assert_eq!(cell(&df, "p", 0), "0.050");
    assert_eq!(cell(&df, "p", 1), "2.2e-16");
}

#[test]
fn reads_results_table_with_inferred_types() {
    let (_dir, path) = temp_file("results.csv", RESULTS);
    let df = read_results_table_with_options(&path, ReadOptions::default().infer_types())
        .expect("read csv");
    assert_eq!(df.height(), 3);

    let p = df.column("p.adj").expect("p.adj column");
    assert_eq!(p.dtype(), &DataType::Float64);
    assert_eq!(cell(&df, "p.adj", 1), "0.02");
    assert_eq!(cell(&df, "group1", 2), "1");
}
