use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use parquet::column::writer::ColumnWriter;
use parquet::data_type::ByteArray;
use parquet::file::properties::WriterProperties;
use parquet::file::writer::SerializedFileWriter;
use parquet::schema::parser::parse_message_type;

use cur_dataprep::ingestion::parquet::{ingest_parquet_from_path, read_parquet_schema};
use cur_dataprep::types::{DataType, Field, Schema, Value};

fn tmp_file(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("cur-dataprep-{name}-{nanos}.parquet"))
}

fn line_item_schema() -> Schema {
    Schema::new(vec![
        Field::new("line_item_resource_id", DataType::Utf8),
        Field::new("line_item_usage_start_date", DataType::Int64),
        Field::new("line_item_unblended_cost", DataType::Float64),
        Field::new("line_item_is_estimated", DataType::Bool),
    ])
}

fn write_line_items(path: &PathBuf, include_flag: bool, cost_as_binary: bool) {
    let schema_str = match (include_flag, cost_as_binary) {
        (true, false) => {
            r#"
            message schema {
              REQUIRED BINARY line_item_resource_id (UTF8);
              REQUIRED INT64 line_item_usage_start_date (TIMESTAMP_MILLIS);
              REQUIRED DOUBLE line_item_unblended_cost;
              REQUIRED BOOLEAN line_item_is_estimated;
            }
            "#
        }
        (true, true) => {
            r#"
            message schema {
              REQUIRED BINARY line_item_resource_id (UTF8);
              REQUIRED INT64 line_item_usage_start_date (TIMESTAMP_MILLIS);
              REQUIRED BINARY line_item_unblended_cost (UTF8);
              REQUIRED BOOLEAN line_item_is_estimated;
            }
            "#
        }
        _ => {
            r#"
            message schema {
              REQUIRED BINARY line_item_resource_id (UTF8);
              REQUIRED INT64 line_item_usage_start_date (TIMESTAMP_MILLIS);
              REQUIRED DOUBLE line_item_unblended_cost;
            }
            "#
        }
    };

    let schema = Arc::new(parse_message_type(schema_str).unwrap());
    let props = Arc::new(WriterProperties::builder().build());
    let file = File::create(path).unwrap();
    let mut writer = SerializedFileWriter::new(file, schema, props).unwrap();

    let mut rg = writer.next_row_group().unwrap();
    let mut col_idx: usize = 0;
    while let Some(mut col) = rg.next_column().unwrap() {
        match col.untyped() {
            ColumnWriter::ByteArrayColumnWriter(w) => {
                if col_idx == 0 {
                    let ids = [
                        ByteArray::from("arn:aws:s3:::my-bucket"),
                        ByteArray::from("i-0123456789abcdef0"),
                    ];
                    w.write_batch(&ids, None, None).unwrap();
                } else {
                    // cost_as_binary variant: stringly-typed cost column.
                    let costs = [ByteArray::from("1.5"), ByteArray::from("0.25")];
                    w.write_batch(&costs, None, None).unwrap();
                }
            }
            ColumnWriter::Int64ColumnWriter(w) => {
                w.write_batch(&[1_696_118_400_000_i64, 1_696_204_800_000_i64], None, None)
                    .unwrap();
            }
            ColumnWriter::DoubleColumnWriter(w) => {
                w.write_batch(&[1.5_f64, 0.25_f64], None, None).unwrap();
            }
            ColumnWriter::BoolColumnWriter(w) => {
                w.write_batch(&[false, true], None, None).unwrap();
            }
            _ => panic!("unexpected column writer in test"),
        }
        col.close().unwrap();
        col_idx += 1;
    }
    rg.close().unwrap();
    writer.close().unwrap();
}

#[test]
fn ingest_parquet_happy_path() {
    let schema = line_item_schema();
    let path = tmp_file("line-items");
    write_line_items(&path, true, false);

    let ds = ingest_parquet_from_path(&path, &schema).unwrap();
    assert_eq!(ds.row_count(), 2);
    assert_eq!(ds.rows[0][0], Value::Utf8("arn:aws:s3:::my-bucket".to_string()));
    // Timestamps surface as epoch milliseconds.
    assert_eq!(ds.rows[0][1], Value::Int64(1_696_118_400_000));
    assert_eq!(ds.rows[0][2], Value::Float64(1.5));
    assert_eq!(ds.rows[1][3], Value::Bool(true));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn read_parquet_schema_maps_physical_types() {
    let path = tmp_file("schema");
    write_line_items(&path, true, false);

    let schema = read_parquet_schema(&path).unwrap();
    assert_eq!(
        schema.fields,
        vec![
            Field::new("line_item_resource_id", DataType::Utf8),
            Field::new("line_item_usage_start_date", DataType::Int64),
            Field::new("line_item_unblended_cost", DataType::Float64),
            Field::new("line_item_is_estimated", DataType::Bool),
        ]
    );

    let _ = std::fs::remove_file(&path);
}

#[test]
fn ingest_parquet_errors_on_missing_required_column() {
    let schema = line_item_schema();
    let path = tmp_file("missing");
    write_line_items(&path, false, false);

    let err = ingest_parquet_from_path(&path, &schema).unwrap_err();
    assert!(err
        .to_string()
        .contains("missing required column 'line_item_is_estimated'"));
    let _ = std::fs::remove_file(&path);
}

#[test]
fn ingest_parquet_errors_on_type_mismatch() {
    let schema = line_item_schema();
    let path = tmp_file("type-mismatch");
    write_line_items(&path, true, true);

    let err = ingest_parquet_from_path(&path, &schema).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("failed to parse value"));
    assert!(msg.contains("column 'line_item_unblended_cost'"));
    let _ = std::fs::remove_file(&path);
}
