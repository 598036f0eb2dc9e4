//! Integration tests for the exploration helpers.
//!
//! These tests load CSV fixtures from disk and drive the public API end to end.

use lex_explore::{
    Analyzer, ColumnAssignment, Description, ExploreConfig, ExploreError, Selection, SkipReason,
    read_csv_str,
};
use polars::prelude::*;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn quiet_config() -> ExploreConfig {
    ExploreConfig::builder().echo(false).build().unwrap()
}

fn load_analyzer(filename: &str) -> Analyzer {
    Analyzer::from_path(fixtures_path().join(filename), quiet_config())
        .expect("Failed to load fixture")
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_from_source_prefers_path() {
    let path = fixtures_path().join("customers.csv");
    let frame = df!["other" => [1, 2]].unwrap();

    let analyzer =
        Analyzer::from_source(Some(path.as_path()), Some(frame), quiet_config()).unwrap();
    assert_eq!(analyzer.dataset().shape(), (10, 7));
}

#[test]
fn test_from_source_without_any_input() {
    let result = Analyzer::from_source(None, None, quiet_config());
    assert!(matches!(result, Err(ExploreError::NoDataLoaded)));
}

#[test]
fn test_from_path_missing_file() {
    let result = Analyzer::from_path(fixtures_path().join("absent.csv"), quiet_config());
    let err = result.err().expect("Loading a missing file should fail");
    assert_eq!(err.error_code(), "IO_ERROR");
}

#[test]
fn test_config_from_json_file() {
    let config =
        ExploreConfig::from_json_file(fixtures_path().join("explore_config.json")).unwrap();
    assert_eq!(config.expected_cardinality, 10);
    assert_eq!(config.histogram_bins, 5);
    assert!(!config.echo);
    assert_eq!(config.zip_check_column, "Zip");
}

// ============================================================================
// Inspection Report
// ============================================================================

#[test]
fn test_identify_customers() {
    let mut analyzer = load_analyzer("customers.csv");
    let report = analyzer.identify().unwrap();

    assert_eq!(report.has_null, vec!["Income".to_string(), "Techie".to_string()]);
    assert!(report.display.is_complete());
    assert_eq!(
        report.display.boolean_columns,
        Some(vec!["Churn".to_string(), "Techie".to_string()])
    );

    let chart = report.display.histograms.expect("histograms should run");
    assert_eq!(chart.columns(), vec!["Income"]);
    assert_eq!(chart.layers[0].total(), 8);
    assert_eq!(chart.skipped.len(), 1);
    assert_eq!(chart.skipped[0].column, "Techie");
    assert_eq!(chart.skipped[0].reason, SkipReason::BooleanLike);

    let duplicates = report.display.duplicates.unwrap();
    assert_eq!(duplicates.duplicate_rows, 0);
    assert_eq!(duplicates.unique_rows, 10);
}

#[test]
fn test_identify_is_repeatable() {
    let mut analyzer = load_analyzer("customers.csv");
    let first = analyzer.identify().unwrap();
    let second = analyzer.identify().unwrap();

    assert_eq!(first.has_null, second.has_null);
    assert_eq!(
        first.display.boolean_columns,
        second.display.boolean_columns
    );
    assert_eq!(analyzer.has_null().len(), 2);
    assert_eq!(analyzer.boolean_columns().len(), 2);
}

#[test]
fn test_identify_three_column_table() {
    let df = df![
        "X" => [Some(1.0), Some(2.0), None, Some(4.0), Some(5.0), Some(6.0), None, Some(8.0), Some(9.0), Some(10.0)],
        "Y" => ["Yes", "No", "No", "Yes", "Yes", "No", "Yes", "Yes", "No", "No"],
        "Z" => [1.1, 2.2, 3.3, 4.4, 5.5, 6.6, 7.7, 8.8, 9.9, 10.1],
    ]
    .unwrap();
    let mut analyzer = Analyzer::from_frame(df, quiet_config()).unwrap();
    let report = analyzer.identify().unwrap();

    assert_eq!(report.has_null, vec!["X".to_string()]);
    assert_eq!(report.display.boolean_columns, Some(vec!["Y".to_string()]));
    assert_eq!(report.display.histograms.unwrap().columns(), vec!["X"]);
}

#[test]
fn test_duplicates_fixture() {
    let mut analyzer = load_analyzer("duplicates.csv");
    let report = analyzer.identify().unwrap();

    let duplicates = report.display.duplicates.unwrap();
    assert_eq!(duplicates.unique_rows, 3);
    assert_eq!(duplicates.duplicate_rows, 2);
    assert_eq!(report.has_null, vec!["score".to_string()]);
    assert_eq!(report.display.histograms.unwrap().layers[0].total(), 4);
}

#[test]
fn test_all_missing_column_is_boolean_like() {
    let df = read_csv_str("a,b\n1,\n2,\n3,\n").unwrap();
    let mut analyzer = Analyzer::from_frame(df, quiet_config()).unwrap();
    let report = analyzer.identify().unwrap();

    assert_eq!(report.has_null, vec!["b".to_string()]);
    assert_eq!(report.display.boolean_columns, Some(vec!["b".to_string()]));
    let chart = report.display.histograms.unwrap();
    assert!(chart.is_empty());
    assert_eq!(chart.skipped[0].reason, SkipReason::BooleanLike);
}

#[test]
fn test_display_info_null_matrix() {
    let mut analyzer = load_analyzer("customers.csv");
    analyzer.find_columns_with_nulls().unwrap();
    let report = analyzer.display_info();

    assert!(report.info.is_some());
    assert!(report.null_matrix.is_some());
    let matrix = report.null_matrix.unwrap();
    assert_eq!(matrix.columns.len(), 7);
    assert_eq!(matrix.columns[2].non_null, 8);
    assert_eq!(matrix.rows, 10);
}

// ============================================================================
// Category Dispatch
// ============================================================================

#[test]
fn test_category_assignment_on_fixture() {
    let analyzer = load_analyzer("customers.csv");
    let assignments = analyzer
        .determine_category_assignment(&["State", "Income"])
        .unwrap();

    match &assignments[0] {
        ColumnAssignment::ValueCounts(counts) => {
            assert_eq!(counts.column, "State");
            assert_eq!(counts.entries[0].value, "NY");
            assert_eq!(counts.entries[0].count, 4);
        }
        other => panic!("State should be tallied, got {:?}", other),
    }

    match &assignments[1] {
        ColumnAssignment::Described(Description::Numeric(d)) => {
            assert_eq!(d.column, "Income");
            assert_eq!(d.count, 8);
            assert_eq!(d.min, 39000.0);
            assert_eq!(d.max, 82000.75);
        }
        other => panic!("Income should be described, got {:?}", other),
    }
}

#[test]
fn test_category_assignment_skips_other_dtypes() {
    let df = df![
        "text" => ["a", "b"],
        "number" => [1i64, 2],
        "flag" => [true, false],
    ]
    .unwrap();
    let analyzer = Analyzer::from_frame(df, quiet_config()).unwrap();
    let assignments = analyzer
        .determine_category_assignment(&["text", "number", "flag"])
        .unwrap();

    let kinds: Vec<&str> = assignments
        .iter()
        .map(|a| match a {
            ColumnAssignment::ValueCounts(_) => "value_counts",
            ColumnAssignment::Described(_) => "describe",
            ColumnAssignment::Skipped { .. } => "skipped",
        })
        .collect();
    assert_eq!(kinds, vec!["value_counts", "describe", "skipped"]);
}

// ============================================================================
// Reporters
// ============================================================================

#[test]
fn test_individual_counts_on_fixture() {
    let config = ExploreConfig::builder()
        .expected_cardinality(10)
        .echo(false)
        .build()
        .unwrap();
    let analyzer = Analyzer::from_path(fixtures_path().join("customers.csv"), config).unwrap();

    let checks = analyzer
        .reporter()
        .verify_individual_counts(analyzer.dataset(), ["UID", "State"])
        .unwrap();
    assert!(checks[0].filled);
    assert_eq!(checks[1].distinct_count, 3);
    assert!(!checks[1].filled);
}

#[test]
fn test_reporters_without_selection() {
    let analyzer = load_analyzer("customers.csv");
    let reporter = analyzer.reporter();
    let df = analyzer.dataset();

    assert!(reporter.verify_value_counts(df, Selection::None).unwrap().is_empty());
    assert!(reporter.describe_variable(df, None::<&str>).unwrap().is_empty());
}

#[test]
fn test_unique_values_on_fixture() {
    let analyzer = load_analyzer("customers.csv");
    let unique = analyzer
        .reporter()
        .display_unique_values(analyzer.dataset(), "Techie")
        .unwrap();
    assert_eq!(
        unique[0].values,
        vec![Some("yes".to_string()), Some("no".to_string()), None]
    );
}

// ============================================================================
// Postal Codes
// ============================================================================

#[test]
fn test_check_zip_on_fixture() {
    let analyzer = load_analyzer("customers.csv");
    let issues = analyzer.check_zip().unwrap();
    let rows: Vec<usize> = issues.iter().map(|i| i.row).collect();
    assert_eq!(rows, vec![1, 2, 5]);
}

#[test]
fn test_fix_zip_on_fixture() {
    let mut analyzer = load_analyzer("customers.csv");
    analyzer.fix_zip().unwrap();

    let column = analyzer.dataset().column("zip_code").unwrap();
    assert_eq!(column.dtype(), &DataType::String);
    let codes: Vec<String> = column
        .as_materialized_series()
        .str()
        .unwrap()
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect();
    assert!(codes.iter().all(|c| c.len() == 5));
    assert_eq!(codes[1], "09021");
    assert_eq!(codes[5], "00501");

    // the check column keeps its original values
    assert_eq!(analyzer.check_zip().unwrap().len(), 3);
}

#[test]
fn test_fix_zip_missing_column() {
    let config = ExploreConfig::builder()
        .zip_fix_column("postal")
        .echo(false)
        .build()
        .unwrap();
    let mut analyzer = Analyzer::from_path(fixtures_path().join("customers.csv"), config).unwrap();
    let err = analyzer.fix_zip().unwrap_err();
    assert!(err.is_column_not_found());
}
