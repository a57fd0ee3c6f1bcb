use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, AsArray, Float32Array, Float64Array, Int32Array, Int64Array};
use arrow::datatypes::DataType;
use calamine::{open_workbook_auto, Data, Reader};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::model::{SubjectColumn, WideTable};
use crate::error::LoadError;

/// Cell texts treated as "no measurement" (compared case-insensitively).
const MISSING_MARKERS: &[&str] = &["", "na", "n/a", "nan", "null", "-"];

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a wide measurement table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`          – header row, first column is time, one column per subject
/// * `.xlsx`/`.xls`  – first worksheet, laid out like the CSV
/// * `.json`         – records (`[{"Time": 0, "A": 1.5}, ...]`) or split
///                     (`{ "columns": [...], "data": [[...], ...] }`) orientation
/// * `.parquet`      – one numeric column per table column, nulls are missing
pub fn load_table(path: &Path) -> Result<WideTable, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let raw = match ext.as_str() {
        "csv" => load_csv(path)?,
        "xlsx" | "xls" => load_excel(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    let table = raw.into_wide_table(path)?;
    if table.is_empty() {
        log::warn!("{} has a header but no data rows", path.display());
    }
    log::info!(
        "Loaded {} rows × {} subjects from {} (time column '{}')",
        table.len(),
        table.subjects.len(),
        path.display(),
        table.time_column
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// Column-major intermediate shared by all formats
// ---------------------------------------------------------------------------

struct RawColumns {
    headers: Vec<String>,
    columns: Vec<Vec<Option<f64>>>,
}

impl RawColumns {
    fn with_headers(headers: Vec<String>) -> Self {
        let columns = vec![Vec::new(); headers.len()];
        RawColumns { headers, columns }
    }

    fn into_wide_table(self, path: &Path) -> Result<WideTable, LoadError> {
        if self.headers.len() < 2 {
            return Err(LoadError::TooFewColumns {
                path: path.to_path_buf(),
                found: self.headers.len(),
            });
        }

        let mut seen = BTreeSet::new();
        for name in &self.headers {
            if !seen.insert(name.as_str()) {
                return Err(LoadError::DuplicateColumn {
                    path: path.to_path_buf(),
                    name: name.clone(),
                });
            }
        }

        let mut names = self.headers.into_iter();
        let mut columns = self.columns.into_iter();
        let time_column = names.next().unwrap_or_default();
        let times = columns.next().unwrap_or_default();
        let subjects = names
            .zip(columns)
            .map(|(name, values)| SubjectColumn { name, values })
            .collect();

        Ok(WideTable {
            time_column,
            times,
            subjects,
        })
    }
}

fn parse_cell(raw: &str, row: usize, column: &str) -> Result<Option<f64>> {
    let s = raw.trim();
    if MISSING_MARKERS.iter().any(|m| s.eq_ignore_ascii_case(m)) {
        return Ok(None);
    }
    let value = s
        .parse::<f64>()
        .with_context(|| format!("Row {row}, column '{column}': '{s}' is not a number"))?;
    finite(value, row, column)
}

/// NaN is a missing value; infinities are rejected.
fn finite(value: f64, row: usize, column: &str) -> Result<Option<f64>> {
    if value.is_nan() {
        Ok(None)
    } else if value.is_infinite() {
        bail!("Row {row}, column '{column}': {value} is not a finite number")
    } else {
        Ok(Some(value))
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, then one row per time point.
///
/// ```text
/// Time (Days),TP1-PT,TP3-V,C1
/// 0,52.1,48.0,
/// 7,80.4,NA,61.2
/// ```
fn load_csv(path: &Path) -> Result<RawColumns> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut raw = RawColumns::with_headers(headers);

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        for (col_idx, name) in raw.headers.iter().enumerate() {
            let cell = parse_cell(record.get(col_idx).unwrap_or(""), row_no, name)?;
            raw.columns[col_idx].push(cell);
        }
    }

    Ok(raw)
}

// ---------------------------------------------------------------------------
// Excel loader
// ---------------------------------------------------------------------------

/// First worksheet of an `.xlsx`/`.xls` workbook: header row, then one row
/// per time point. Text cells go through the same missing-marker rules as
/// CSV.
fn load_excel(path: &Path) -> Result<RawColumns> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("opening workbook {}", path.display()))?;
    let range = workbook
        .worksheet_range_at(0)
        .context("workbook has no worksheets")?
        .context("reading first worksheet")?;

    let mut rows = range.rows();
    let headers: Vec<String> = match rows.next() {
        Some(header) => header
            .iter()
            .map(|cell| match cell {
                Data::String(s) => s.trim().to_string(),
                Data::Float(v) => v.to_string(),
                Data::Int(v) => v.to_string(),
                Data::Empty => String::new(),
                other => format!("{other:?}"),
            })
            .collect(),
        None => Vec::new(),
    };

    let mut raw = RawColumns::with_headers(headers);

    for (row_no, row) in rows.enumerate() {
        for (col_idx, name) in raw.headers.iter().enumerate() {
            let cell = excel_cell(row.get(col_idx).unwrap_or(&Data::Empty), row_no, name)?;
            raw.columns[col_idx].push(cell);
        }
    }

    Ok(raw)
}

fn excel_cell(cell: &Data, row: usize, column: &str) -> Result<Option<f64>> {
    match cell {
        Data::Empty => Ok(None),
        Data::Float(v) => finite(*v, row, column),
        Data::Int(v) => Ok(Some(*v as f64)),
        Data::String(s) => parse_cell(s, row, column),
        other => bail!("Row {row}, column '{column}': expected a number, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// The two pandas orientations that keep column order.
///
/// Records (`df.to_json(orient='records')`): columns in the key order of the
/// first record; later records may omit keys, which reads as missing.
///
/// ```json
/// [{"Time (Days)": 0, "TP1-PT": 52.1}, {"Time (Days)": 7, "TP1-PT": 80.4, "C1": 61.2}]
/// ```
///
/// Split (`df.to_json(orient='split')`):
///
/// ```json
/// {
///   "columns": ["Time (Days)", "TP1-PT", "C1"],
///   "data": [[0, 52.1, null], [7, 80.4, 61.2]]
/// }
/// ```
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonTable {
    Records(Vec<serde_json::Map<String, JsonValue>>),
    Split {
        columns: Vec<String>,
        data: Vec<Vec<JsonValue>>,
    },
}

fn load_json(path: &Path) -> Result<RawColumns> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading JSON file {}", path.display()))?;
    let table: JsonTable = serde_json::from_str(&text)
        .context("parsing JSON table (expected records or split orientation)")?;

    match table {
        JsonTable::Records(records) => json_records(records),
        JsonTable::Split { columns, data } => json_split(columns, data),
    }
}

fn json_records(records: Vec<serde_json::Map<String, JsonValue>>) -> Result<RawColumns> {
    let headers: Vec<String> = records
        .first()
        .map(|first| first.keys().cloned().collect())
        .unwrap_or_default();
    let mut raw = RawColumns::with_headers(headers);

    for (row_no, record) in records.iter().enumerate() {
        if let Some(extra) = record.keys().find(|k| !raw.headers.contains(k)) {
            bail!("Row {row_no}: column '{extra}' is not in the first record");
        }
        for (col_idx, name) in raw.headers.iter().enumerate() {
            let cell = match record.get(name) {
                Some(val) => json_cell(val, row_no, name)?,
                None => None,
            };
            raw.columns[col_idx].push(cell);
        }
    }

    Ok(raw)
}

fn json_split(columns: Vec<String>, data: Vec<Vec<JsonValue>>) -> Result<RawColumns> {
    let mut raw = RawColumns::with_headers(columns);

    for (row_no, row) in data.iter().enumerate() {
        if row.len() != raw.headers.len() {
            bail!(
                "Row {row_no}: expected {} cells, found {}",
                raw.headers.len(),
                row.len()
            );
        }
        for (col_idx, val) in row.iter().enumerate() {
            let cell = json_cell(val, row_no, &raw.headers[col_idx])?;
            raw.columns[col_idx].push(cell);
        }
    }

    Ok(raw)
}

fn json_cell(val: &JsonValue, row: usize, column: &str) -> Result<Option<f64>> {
    match val {
        JsonValue::Null => Ok(None),
        JsonValue::Number(n) => {
            let value = n
                .as_f64()
                .with_context(|| format!("Row {row}, column '{column}': {n} is out of range"))?;
            finite(value, row, column)
        }
        JsonValue::String(s) => parse_cell(s, row, column),
        other => bail!("Row {row}, column '{column}': expected a number, got {other}"),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one flat column per table column.
///
/// Numeric columns (Float64, Float32, Int64, Int32) are read directly,
/// string columns are parsed like CSV cells.  Nulls are missing values.
fn load_parquet(path: &Path) -> Result<RawColumns> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening parquet file {}", path.display()))?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut raw = RawColumns::with_headers(headers);
    let mut row_offset = 0;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for (col_idx, name) in raw.headers.iter().enumerate() {
            let col = batch.column(col_idx);
            for row in 0..batch.num_rows() {
                let cell = extract_cell(col, row_offset + row, row, name)?;
                raw.columns[col_idx].push(cell);
            }
        }
        row_offset += batch.num_rows();
    }

    Ok(raw)
}

/// Extract one numeric cell from an Arrow column.  `table_row` is only used
/// for error messages; `row` indexes into the current batch.
fn extract_cell(
    col: &Arc<dyn Array>,
    table_row: usize,
    row: usize,
    column: &str,
) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    match col.data_type() {
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?;
            finite(arr.value(row), table_row, column)
        }
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?;
            finite(arr.value(row) as f64, table_row, column)
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            Ok(Some(arr.value(row) as f64))
        }
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            Ok(Some(arr.value(row) as f64))
        }
        DataType::Utf8 => parse_cell(col.as_string::<i32>().value(row), table_row, column),
        DataType::LargeUtf8 => parse_cell(col.as_string::<i64>().value(row), table_row, column),
        other => bail!("Row {table_row}, column '{column}': unsupported column type {other:?}"),
    }
}
