//! Parquet ingestion implementation.
//!
//! CUR exports delivered to S3 are Parquet; this reader handles both a
//! user-provided schema and schema inference from the file footer, so the
//! import pipeline can default to "read every column".

use std::collections::{HashMap, HashSet};
use std::path::Path;

use parquet::basic::Type as PhysicalType;
use parquet::file::reader::{ChunkReader, FileReader};
use parquet::file::serialized_reader::SerializedFileReader;
use parquet::record::Field as ParquetField;

use crate::error::{ImportError, ImportResult};
use crate::types::{DataSet, DataType, Field, Schema, Value};

/// Read the file footer and derive a [`Schema`] covering every leaf column.
///
/// Type mapping: BOOLEAN -> `Bool`; all integer widths (including
/// timestamps, which ingest as epoch milliseconds) -> `Int64`; FLOAT/DOUBLE
/// -> `Float64`; byte arrays -> `Utf8`.
pub fn read_parquet_schema(path: impl AsRef<Path>) -> ImportResult<Schema> {
    let reader = SerializedFileReader::try_from(path.as_ref())?;

    let mut fields = Vec::new();
    for col in reader.metadata().file_metadata().schema_descr().columns() {
        let data_type = match col.physical_type() {
            PhysicalType::BOOLEAN => DataType::Bool,
            PhysicalType::INT32 | PhysicalType::INT64 | PhysicalType::INT96 => DataType::Int64,
            PhysicalType::FLOAT | PhysicalType::DOUBLE => DataType::Float64,
            PhysicalType::BYTE_ARRAY | PhysicalType::FIXED_LEN_BYTE_ARRAY => DataType::Utf8,
        };
        fields.push(Field::new(col.path().string(), data_type));
    }

    Ok(Schema::new(fields))
}

/// Ingest a Parquet file into an in-memory `DataSet`.
///
/// Notes:
/// - Validates that all schema fields exist as Parquet leaf columns (by
///   column path string)
/// - Uses the Parquet record API (`RowIter`)
pub fn ingest_parquet_from_path(path: impl AsRef<Path>, schema: &Schema) -> ImportResult<DataSet> {
    let reader = SerializedFileReader::try_from(path.as_ref())?;

    let available_columns = parquet_leaf_column_paths(&reader);
    for field in &schema.fields {
        if !available_columns.contains(field.name.as_str()) {
            return Err(ImportError::SchemaMismatch {
                message: format!("missing required column '{}'", field.name),
            });
        }
    }

    let mut rows: Vec<Vec<Value>> = Vec::new();
    for (idx0, row_res) in reader.into_iter().enumerate() {
        let row_num = idx0 + 1;
        let row = row_res?;

        // Build a name->Field map for lookup.
        let mut map: HashMap<&str, &ParquetField> = HashMap::new();
        for (name, field) in row.get_column_iter() {
            map.insert(name.as_str(), field);
        }

        let mut out_row: Vec<Value> = Vec::with_capacity(schema.fields.len());
        for f in &schema.fields {
            let v = map.get(f.name.as_str()).ok_or_else(|| ImportError::SchemaMismatch {
                message: format!("row {row_num} missing required column '{}'", f.name),
            })?;
            out_row.push(convert_parquet_field(row_num, &f.name, &f.data_type, v)?);
        }
        rows.push(out_row);
    }

    Ok(DataSet::new(schema.clone(), rows))
}

fn parquet_leaf_column_paths<R: ChunkReader + 'static>(
    reader: &SerializedFileReader<R>,
) -> HashSet<String> {
    let mut set = HashSet::new();
    let cols = reader
        .metadata()
        .file_metadata()
        .schema_descr()
        .columns();
    for c in cols {
        set.insert(c.path().string());
    }
    set
}

const MILLIS_PER_DAY: i64 = 86_400_000;

fn convert_parquet_field(
    row: usize,
    column: &str,
    data_type: &DataType,
    f: &ParquetField,
) -> ImportResult<Value> {
    if matches!(f, ParquetField::Null) {
        return Ok(Value::Null);
    }

    match data_type {
        DataType::Utf8 => match f {
            ParquetField::Str(s) => Ok(Value::Utf8(s.clone())),
            ParquetField::Bytes(b) => Ok(Value::Utf8(String::from_utf8_lossy(b.data()).into_owned())),
            _ => Err(ImportError::ParseError {
                row,
                column: column.to_string(),
                raw: f.to_string(),
                message: "expected string".to_string(),
            }),
        },
        DataType::Bool => match f {
            ParquetField::Bool(b) => Ok(Value::Bool(*b)),
            _ => Err(ImportError::ParseError {
                row,
                column: column.to_string(),
                raw: f.to_string(),
                message: "expected bool".to_string(),
            }),
        },
        DataType::Int64 => match f {
            ParquetField::Byte(v) => Ok(Value::Int64(i64::from(*v))),
            ParquetField::Short(v) => Ok(Value::Int64(i64::from(*v))),
            ParquetField::Int(v) => Ok(Value::Int64(i64::from(*v))),
            ParquetField::Long(v) => Ok(Value::Int64(*v)),
            ParquetField::UByte(v) => Ok(Value::Int64(i64::from(*v))),
            ParquetField::UShort(v) => Ok(Value::Int64(i64::from(*v))),
            ParquetField::UInt(v) => Ok(Value::Int64(i64::from(*v))),
            ParquetField::ULong(v) => i64::try_from(*v)
                .map(Value::Int64)
                .map_err(|_| ImportError::ParseError {
                    row,
                    column: column.to_string(),
                    raw: f.to_string(),
                    message: "u64 out of range for i64".to_string(),
                }),
            // Temporal columns normalize to epoch milliseconds.
            ParquetField::TimestampMillis(v) => Ok(Value::Int64(*v)),
            ParquetField::TimestampMicros(v) => Ok(Value::Int64(*v / 1_000)),
            ParquetField::Date(days) => Ok(Value::Int64(i64::from(*days) * MILLIS_PER_DAY)),
            _ => Err(ImportError::ParseError {
                row,
                column: column.to_string(),
                raw: f.to_string(),
                message: "expected integer".to_string(),
            }),
        },
        DataType::Float64 => match f {
            ParquetField::Float(v) => Ok(Value::Float64(f64::from(*v))),
            ParquetField::Double(v) => Ok(Value::Float64(*v)),
            _ => Err(ImportError::ParseError {
                row,
                column: column.to_string(),
                raw: f.to_string(),
                message: "expected number".to_string(),
            }),
        },
    }
}
