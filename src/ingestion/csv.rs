//! CSV ingestion implementation.
//!
//! CUR exports can also be delivered as CSV; the reader mirrors the Parquet
//! path, including schema inference so the import pipeline can default to
//! "read every column".

use std::path::Path;

use crate::error::{ImportError, ImportResult};
use crate::types::{DataSet, DataType, Field, Schema, Value};

/// How many records schema inference samples before settling on a type.
pub const SCHEMA_SAMPLE_ROWS: usize = 128;

/// Infer a [`Schema`] from the header row and a bounded sample of records.
///
/// Each column takes the narrowest type that fits every sampled non-empty
/// value (`Int64` widens to `Float64`; anything inconsistent falls back to
/// `Utf8`). Columns with no sampled values are `Utf8`.
pub fn read_csv_schema(path: impl AsRef<Path>, sample_rows: usize) -> ImportResult<Schema> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;

    let headers = rdr.headers()?.clone();
    let mut inferred: Vec<Option<DataType>> = vec![None; headers.len()];

    for result in rdr.records().take(sample_rows) {
        let record = result?;
        for (idx, raw) in record.iter().enumerate() {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            let candidate = sniff_type(trimmed);
            inferred[idx] = Some(match inferred[idx].take() {
                None => candidate,
                Some(prev) => merge_types(prev, candidate),
            });
        }
    }

    let fields = headers
        .iter()
        .zip(inferred)
        .map(|(name, dt)| Field::new(name, dt.unwrap_or(DataType::Utf8)))
        .collect();

    Ok(Schema::new(fields))
}

fn sniff_type(s: &str) -> DataType {
    if s.parse::<i64>().is_ok() {
        DataType::Int64
    } else if s.parse::<f64>().is_ok() {
        DataType::Float64
    } else if parse_bool(s).is_ok() {
        DataType::Bool
    } else {
        DataType::Utf8
    }
}

fn merge_types(a: DataType, b: DataType) -> DataType {
    use DataType::{Float64, Int64};
    match (a, b) {
        (a, b) if a == b => a,
        (Int64, Float64) | (Float64, Int64) => Float64,
        _ => DataType::Utf8,
    }
}

/// Ingest a CSV file into an in-memory [`DataSet`].
///
/// Rules:
///
/// - CSV must have headers.
/// - Headers must contain all schema fields (order can differ).
/// - Each value is parsed according to the schema field type.
pub fn ingest_csv_from_path(path: impl AsRef<Path>, schema: &Schema) -> ImportResult<DataSet> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)?;
    ingest_csv_from_reader(&mut rdr, schema)
}

/// Ingest CSV data from an existing CSV reader.
pub fn ingest_csv_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
    schema: &Schema,
) -> ImportResult<DataSet> {
    let headers = rdr.headers()?.clone();

    // Map schema fields -> CSV column indexes (allows re-ordered CSV columns).
    let mut col_idxs = Vec::with_capacity(schema.fields.len());
    for field in &schema.fields {
        match headers.iter().position(|h| h == field.name) {
            Some(idx) => col_idxs.push(idx),
            None => {
                return Err(ImportError::SchemaMismatch {
                    message: format!(
                        "missing required column '{field}'. headers={:?}",
                        headers.iter().collect::<Vec<_>>(),
                        field = field.name
                    ),
                });
            }
        }
    }

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // Report 1-based row number for users; +1 again because header is row 1.
        let user_row = row_idx0 + 2;
        let record = result?;

        let mut row: Vec<Value> = Vec::with_capacity(schema.fields.len());
        for (field, &csv_idx) in schema.fields.iter().zip(col_idxs.iter()) {
            let raw = record.get(csv_idx).unwrap_or("");
            row.push(parse_typed_value(user_row, &field.name, &field.data_type, raw)?);
        }
        rows.push(row);
    }

    Ok(DataSet::new(schema.clone(), rows))
}

fn parse_typed_value(
    row: usize,
    column: &str,
    data_type: &DataType,
    raw: &str,
) -> ImportResult<Value> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Value::Null);
    }

    match data_type {
        DataType::Utf8 => Ok(Value::Utf8(trimmed.to_owned())),
        DataType::Int64 => trimmed.parse::<i64>().map(Value::Int64).map_err(|e| {
            ImportError::ParseError {
                row,
                column: column.to_owned(),
                raw: raw.to_owned(),
                message: e.to_string(),
            }
        }),
        DataType::Float64 => trimmed.parse::<f64>().map(Value::Float64).map_err(|e| {
            ImportError::ParseError {
                row,
                column: column.to_owned(),
                raw: raw.to_owned(),
                message: e.to_string(),
            }
        }),
        DataType::Bool => parse_bool(trimmed).map(Value::Bool).map_err(|message| {
            ImportError::ParseError {
                row,
                column: column.to_owned(),
                raw: raw.to_owned(),
                message,
            }
        }),
    }
}

fn parse_bool(s: &str) -> Result<bool, String> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "t" | "yes" | "y" => Ok(true),
        "false" | "f" | "no" | "n" => Ok(false),
        _ => Err("expected bool (true/false/yes/no)".to_string()),
    }
}
