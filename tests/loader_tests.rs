//! File loader tests against real files on disk

use abtest::error::{DataFormatError, Error, ValidationError};
use abtest::loader::{load_aggregated, load_auto, load_row_level, DataFormat};
use abtest::Variant;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

fn csv_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_aggregated_two_rows() {
    let file = csv_file("group,success,total\nA,100,1000\nB,120,1000\n");
    let experiment = load_aggregated(file.path()).unwrap();
    assert_eq!(experiment.as_tuple(), (100, 1000, 120, 1000));
}

#[test]
fn test_aggregated_column_order_and_extra_columns() {
    let file = csv_file("total,note,group,success\n1000,control,A,100\n1000,\"new, shiny\",B,120\n");
    let experiment = load_aggregated(file.path()).unwrap();
    assert_eq!(experiment.as_tuple(), (100, 1000, 120, 1000));
}

#[test]
fn test_aggregated_missing_b() {
    let file = csv_file("group,success,total\nA,100,1000\n");
    match load_aggregated(file.path()).unwrap_err() {
        Error::DataFormat(DataFormatError::MissingVariant(variant)) => {
            assert_eq!(variant, Variant::B);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_aggregated_missing_columns_lists_them() {
    let file = csv_file("group,count\nA,1\nB,2\n");
    let err = load_aggregated(file.path()).unwrap_err();
    assert!(err.to_string().contains("success"));
    assert!(err.to_string().contains("total"));
}

#[test]
fn test_aggregated_invalid_counts_rejected() {
    let file = csv_file("group,success,total\nA,200,100\nB,10,100\n");
    assert!(matches!(
        load_aggregated(file.path()),
        Err(Error::Validation(ValidationError::SuccessExceedsTotal { .. }))
    ));
}

#[test]
fn test_row_level_aggregation() {
    let file = csv_file("user_id,group,converted\nu1,A,0\nu2,A,1\nu3,B,1\nu4,B,1\n");
    let experiment = load_row_level(file.path()).unwrap();
    assert_eq!(experiment.as_tuple(), (1, 2, 2, 2));
}

#[test]
fn test_row_level_invalid_outcome() {
    let file = csv_file("user_id,group,converted\nu1,A,0\nu2,B,3\n");
    let err = load_row_level(file.path()).unwrap_err();
    assert!(matches!(
        err,
        Error::DataFormat(DataFormatError::InvalidOutcome { line: 3, .. })
    ));
}

#[test]
fn test_row_level_windows_line_endings() {
    let file = csv_file("user_id,group,converted\r\nu1,A,1\r\nu2,B,0\r\n");
    let experiment = load_row_level(file.path()).unwrap();
    assert_eq!(experiment.as_tuple(), (1, 1, 0, 1));
}

#[test]
fn test_load_auto_detects_layout() {
    let aggregated = csv_file("group,success,total\nA,1,10\nB,2,10\n");
    let (format, experiment) = load_auto(aggregated.path()).unwrap();
    assert_eq!(format, DataFormat::Aggregated);
    assert_eq!(experiment.as_tuple(), (1, 10, 2, 10));

    let row_level = csv_file("user_id,group,converted\nu1,A,1\nu2,B,1\n");
    let (format, experiment) = load_auto(row_level.path()).unwrap();
    assert_eq!(format, DataFormat::RowLevel);
    assert_eq!(experiment.as_tuple(), (1, 1, 1, 1));
}

#[test]
fn test_missing_file_in_directory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("results.csv");
    assert!(matches!(
        load_auto(&path),
        Err(Error::DataFormat(DataFormatError::FileNotFound(p))) if p == path
    ));
}
