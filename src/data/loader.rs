use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::DatasetError;
use super::model::{CellValue, ReviewTable};

type Row = BTreeMap<String, CellValue>;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a review table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one review per line (the deployment export)
/// * `.json`    – `[{ "make": "...", "model": "...", ... }, ...]`
/// * `.parquet` – flat scalar columns, as written by `df.to_parquet()`
///
/// A missing file and missing columns come back as [`DatasetError`] inside
/// the `anyhow::Error`, so callers can tell them apart with `downcast_ref`.
pub fn load_file(path: &Path) -> Result<ReviewTable> {
    if !path.is_file() {
        bail!(DatasetError::NotFound(path.to_path_buf()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let (columns, rows) = match ext.as_str() {
        "csv" => read_csv(path)?,
        "json" => read_json(path)?,
        "parquet" | "pq" => read_parquet(path)?,
        other => bail!(DatasetError::UnsupportedFormat(other.to_string())),
    };

    let table = ReviewTable::from_rows(columns, rows)?;
    log::info!(
        "Loaded {} reviews from {} ({} makes, {} topics)",
        table.len(),
        path.display(),
        table.makes.len(),
        table.topics.len()
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, quoted fields allowed, so
/// review text may contain commas and newlines.
///
/// Every column gets one type, picked from all of its cells (see
/// [`infer_column_kind`]), and the usual missing-value markers load as
/// [`CellValue::Null`].
fn read_csv(path: &Path) -> Result<(Vec<String>, Vec<Row>)> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        records.push(result.with_context(|| format!("CSV row {row_no}"))?);
    }

    let kinds: Vec<ColumnKind> = (0..headers.len())
        .map(|i| infer_column_kind(records.iter().filter_map(|r| r.get(i))))
        .collect();

    let rows: Vec<Row> = records
        .iter()
        .map(|record| {
            headers
                .iter()
                .zip(&kinds)
                .zip(record.iter())
                .map(|((col, kind), raw)| (col.clone(), typed_cell(raw, *kind)))
                .collect()
        })
        .collect();

    Ok((headers, rows))
}

/// Cell text a dataframe reader treats as missing by default.
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

pub(crate) fn is_na_token(s: &str) -> bool {
    NA_TOKENS.contains(&s)
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "True" | "TRUE" | "true" => Some(true),
        "False" | "FALSE" | "false" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColumnKind {
    Integer,
    Float,
    Bool,
    Text,
}

/// Pick a single type for a column from its raw cells, missing markers
/// ignored. An integer column with gaps widens to float.
pub(crate) fn infer_column_kind<'a>(cells: impl Iterator<Item = &'a str>) -> ColumnKind {
    let (mut has_na, mut all_int, mut all_float, mut all_bool) = (false, true, true, true);
    for s in cells {
        if is_na_token(s) {
            has_na = true;
            continue;
        }
        all_int &= s.parse::<i64>().is_ok();
        all_float &= s.parse::<f64>().is_ok();
        all_bool &= parse_bool(s).is_some();
    }
    if all_int && !has_na {
        ColumnKind::Integer
    } else if all_float {
        ColumnKind::Float
    } else if all_bool {
        ColumnKind::Bool
    } else {
        ColumnKind::Text
    }
}

/// Convert one raw cell to its column's type. Text columns keep the cell
/// verbatim, so `"007"` stays `"007"`.
pub(crate) fn typed_cell(raw: &str, kind: ColumnKind) -> CellValue {
    if is_na_token(raw) {
        return CellValue::Null;
    }
    match kind {
        ColumnKind::Integer => raw.parse().ok().map(CellValue::Integer),
        ColumnKind::Float => raw.parse().ok().map(CellValue::Float),
        ColumnKind::Bool => parse_bool(raw).map(CellValue::Bool),
        ColumnKind::Text => None,
    }
    .unwrap_or_else(|| CellValue::String(raw.to_string()))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`).
/// The column set is the union of keys over all records.
fn read_json(path: &Path) -> Result<(Vec<String>, Vec<Row>)> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut columns: BTreeSet<String> = BTreeSet::new();
    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let row: Row = obj
            .iter()
            .map(|(key, val)| (key.clone(), json_to_cell(val)))
            .collect();
        columns.extend(row.keys().cloned());
        rows.push(row);
    }

    Ok((columns.into_iter().collect(), rows))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with flat columns (strings, ints, floats, bools).
/// Works with files written by both Pandas and Polars.
fn read_parquet(path: &Path) -> Result<(Vec<String>, Vec<Row>)> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        for row in 0..batch.num_rows() {
            let cells: Row = schema
                .fields()
                .iter()
                .enumerate()
                .map(|(i, field)| (field.name().clone(), extract_cell(batch.column(i), row)))
                .collect();
            rows.push(cells);
        }
    }

    Ok((columns, rows))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &ArrayRef, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 => CellValue::String(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => CellValue::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => CellValue::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => CellValue::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => CellValue::Bool(col.as_boolean().value(row)),
        other => CellValue::String(format!("{other:?}")),
    }
}
