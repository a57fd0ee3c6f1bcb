//! Tests for loading wide measurement tables from disk.
//!
//! ## Test Organization
//!
//! 1. **CSV** - headers, missing markers, malformed cells
//! 2. **Excel** - first worksheet of an .xlsx workbook
//! 3. **JSON** - records and split orientation
//! 4. **Parquet** - numeric columns with nulls
//! 5. **Failures** - too few columns, duplicates, unsupported formats

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;

use tumour_kinetics::data::loader::load_table;
use tumour_kinetics::data::model::Measurement;
use tumour_kinetics::{load_dataset, LoadError};

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

// ============================================================================
// CSV
// ============================================================================

#[test]
fn csv_first_column_is_time() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "volumes.csv",
        "Time (Days) ,TP1-PT,C1\n0,52.1,\n7,80.4,NA\n14,120,61.2\n",
    );

    let table = load_table(&path).unwrap();
    assert_eq!(table.time_column, "Time (Days)");
    assert_eq!(table.times, [Some(0.0), Some(7.0), Some(14.0)]);
    let names: Vec<&str> = table.subject_names().collect();
    assert_eq!(names, ["TP1-PT", "C1"]);
    assert_eq!(table.subjects[1].values, [None, None, Some(61.2)]);
}

#[test]
fn csv_end_to_end_reshape() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "a.csv", "Day,A\n0,100\n7,\n14,300\n");

    let dataset = load_dataset(&path).unwrap();
    assert_eq!(
        dataset.measurements,
        [
            Measurement::new(0.0, "A", 100.0),
            Measurement::new(14.0, "A", 300.0),
        ]
    );
    assert!(dataset.registry.contains("A"));
    assert_eq!(dataset.source, path);
}

#[test]
fn csv_rejects_text_cells() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "bad.csv", "Day,A\n0,100\n7,large\n");

    let err = load_table(&path).unwrap_err();
    assert!(matches!(err, LoadError::Read(_)));
    let msg = format!("{err:#}");
    assert!(msg.contains("'large' is not a number"), "{msg}");
}

#[test]
fn csv_rejects_ragged_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "ragged.csv", "Day,A,B\n0,1,2\n7,3\n");
    assert!(matches!(load_table(&path), Err(LoadError::Read(_))));
}

#[test]
fn csv_rejects_infinite_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "inf.csv", "Day,A,B\n0,1,2\n7,3,inf\n");

    let msg = format!("{:#}", load_table(&path).unwrap_err());
    assert!(msg.contains("Row 1, column 'B'"), "{msg}");
    assert!(msg.contains("not a finite number"), "{msg}");
}

// ============================================================================
// Excel
// ============================================================================

#[test]
fn xlsx_first_sheet_is_read() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Multiome_GK.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, name) in ["Time (Days)", "TP1-PT", "C1"].iter().enumerate() {
        sheet.write_string(0, col as u16, *name).unwrap();
    }
    sheet.write_number(1, 0, 0.0).unwrap();
    sheet.write_number(1, 1, 45.5).unwrap();
    sheet.write_number(1, 2, 50.0).unwrap();
    sheet.write_number(2, 0, 7.0).unwrap();
    sheet.write_string(2, 1, "NA").unwrap();
    sheet.write_number(2, 2, 71.25).unwrap();
    sheet.write_number(3, 0, 14.0).unwrap();
    sheet.write_number(3, 1, 90.0).unwrap();
    workbook.save(&path).unwrap();

    let table = load_table(&path).unwrap();
    assert_eq!(table.time_column, "Time (Days)");
    assert_eq!(table.times, [Some(0.0), Some(7.0), Some(14.0)]);
    assert_eq!(table.subjects[0].name, "TP1-PT");
    assert_eq!(table.subjects[0].values, [Some(45.5), None, Some(90.0)]);
    assert_eq!(table.subjects[1].values, [Some(50.0), Some(71.25), None]);
}

#[test]
fn xlsx_text_cell_names_row_and_column() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Day").unwrap();
    sheet.write_string(0, 1, "A").unwrap();
    sheet.write_number(1, 0, 0.0).unwrap();
    sheet.write_string(1, 1, "large").unwrap();
    workbook.save(&path).unwrap();

    let msg = format!("{:#}", load_table(&path).unwrap_err());
    assert!(msg.contains("Row 0, column 'A': 'large' is not a number"), "{msg}");
}

// ============================================================================
// JSON
// ============================================================================

#[test]
fn json_records_keep_key_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "records.json",
        r#"[{"Time": 0, "Z9": 100, "A1": 5},
            {"Time": 7, "A1": 6},
            {"Time": 14, "Z9": 300, "A1": null}]"#,
    );

    let table = load_table(&path).unwrap();
    assert_eq!(table.time_column, "Time");
    let names: Vec<&str> = table.subject_names().collect();
    assert_eq!(names, ["Z9", "A1"]);
    assert_eq!(table.subjects[0].values, [Some(100.0), None, Some(300.0)]);
    assert_eq!(table.subjects[1].values, [Some(5.0), Some(6.0), None]);
}

#[test]
fn json_records_reject_unknown_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "extra.json",
        r#"[{"Time": 0, "A": 1}, {"Time": 7, "A": 2, "B": 3}]"#,
    );
    let msg = format!("{:#}", load_table(&path).unwrap_err());
    assert!(msg.contains("column 'B' is not in the first record"), "{msg}");
}

#[test]
fn json_split_orientation() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
        &dir,
        "volumes.json",
        r#"{"columns": ["Time (Days)", "TP3-V", "A"],
            "data": [[0, 48.0, null], [7, "NaN", 12.5], [14, 90, "13"]]}"#,
    );

    let table = load_table(&path).unwrap();
    assert_eq!(table.time_column, "Time (Days)");
    assert_eq!(table.subjects[0].name, "TP3-V");
    assert_eq!(table.subjects[0].values, [Some(48.0), None, Some(90.0)]);
    assert_eq!(table.subjects[1].values, [None, Some(12.5), Some(13.0)]);
}

#[test]
fn json_row_length_mismatch_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "short.json", r#"{"columns": ["t", "A"], "data": [[0]]}"#);
    let msg = format!("{:#}", load_table(&path).unwrap_err());
    assert!(msg.contains("expected 2 cells"), "{msg}");
}

// ============================================================================
// Parquet
// ============================================================================

fn write_parquet(path: &Path) {
    let schema = Arc::new(Schema::new(vec![
        Field::new("day", DataType::Int64, false),
        Field::new("TP1-PT", DataType::Float64, true),
        Field::new("C1", DataType::Float64, true),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(vec![0, 7, 14])),
            Arc::new(Float64Array::from(vec![Some(50.0), None, Some(75.0)])),
            Arc::new(Float64Array::from(vec![None, Some(20.0), Some(30.0)])),
        ],
    )
    .unwrap();
    let file = fs::File::create(path).unwrap();
    let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
}

#[test]
fn parquet_rejects_infinite_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inf.parquet");
    let schema = Arc::new(Schema::new(vec![
        Field::new("day", DataType::Int64, false),
        Field::new("A", DataType::Float64, true),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from(vec![0, 7])),
            Arc::new(Float64Array::from(vec![Some(1.0), Some(f64::INFINITY)])),
        ],
    )
    .unwrap();
    let mut writer = ArrowWriter::try_new(fs::File::create(&path).unwrap(), schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let msg = format!("{:#}", load_table(&path).unwrap_err());
    assert!(msg.contains("Row 1, column 'A'"), "{msg}");
}

#[test]
fn parquet_numeric_columns_with_nulls() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("volumes.parquet");
    write_parquet(&path);

    let dataset = load_dataset(&path).unwrap();
    assert_eq!(dataset.table.time_column, "day");
    assert_eq!(dataset.table.times, [Some(0.0), Some(7.0), Some(14.0)]);
    assert_eq!(dataset.len(), 4);
    assert_eq!(dataset.registry.declared(), ["TP1-PT", "C1"]);
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn single_column_is_too_few() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "time_only.csv", "Day\n0\n7\n");
    match load_table(&path) {
        Err(LoadError::TooFewColumns { found, .. }) => assert_eq!(found, 1),
        other => panic!("expected TooFewColumns, got {other:?}"),
    }
}

#[test]
fn duplicate_subject_names_fail() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "dup.csv", "Day,A,A\n0,1,2\n");
    match load_table(&path) {
        Err(LoadError::DuplicateColumn { name, .. }) => assert_eq!(name, "A"),
        other => panic!("expected DuplicateColumn, got {other:?}"),
    }
}

#[test]
fn unsupported_extension_fails() {
    let err = load_table(Path::new("volumes.txt")).unwrap_err();
    assert!(matches!(err, LoadError::UnsupportedFormat(ref ext) if ext == "txt"));
}

#[test]
fn missing_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_table(&dir.path().join("absent.csv")).unwrap_err();
    assert!(format!("{err:#}").contains("opening CSV"));
}
