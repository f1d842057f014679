use cur_dataprep::ingestion::csv::{
    ingest_csv_from_path, ingest_csv_from_reader, read_csv_schema, SCHEMA_SAMPLE_ROWS,
};
use cur_dataprep::types::{DataType, Field, Schema, Value};

fn line_item_schema() -> Schema {
    Schema::new(vec![
        Field::new("line_item_resource_id", DataType::Utf8),
        Field::new("line_item_usage_type", DataType::Utf8),
        Field::new("line_item_unblended_cost", DataType::Float64),
        Field::new("line_item_is_estimated", DataType::Bool),
    ])
}

#[test]
fn ingest_csv_from_path_happy_path() {
    let schema = line_item_schema();
    let ds = ingest_csv_from_path("tests/fixtures/cur_sample.csv", &schema).unwrap();

    assert_eq!(ds.row_count(), 2);
    assert_eq!(
        ds.rows[0],
        vec![
            Value::Utf8("arn:aws:ecs:us-east-1:123456789012:task/my-cluster/abc123".to_string()),
            Value::Utf8("Fargate-GB-Hours".to_string()),
            Value::Float64(1.5),
            Value::Bool(false),
        ]
    );
}

#[test]
fn inferred_schema_matches_fixture_contents() {
    let schema = read_csv_schema("tests/fixtures/cur_sample.csv", SCHEMA_SAMPLE_ROWS).unwrap();
    assert_eq!(schema, line_item_schema());
}

#[test]
fn ingest_csv_allows_reordered_columns() {
    let schema = line_item_schema();
    let input = "line_item_usage_type,line_item_resource_id,line_item_is_estimated,line_item_unblended_cost\n\
                 Requests-Tier1,arn:aws:s3:::my-bucket,false,0.004\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let ds = ingest_csv_from_reader(&mut rdr, &schema).unwrap();
    assert_eq!(ds.row_count(), 1);
    assert_eq!(ds.rows[0][0], Value::Utf8("arn:aws:s3:::my-bucket".to_string()));
    assert_eq!(ds.rows[0][2], Value::Float64(0.004));
}

#[test]
fn ingest_csv_maps_empty_cells_to_null() {
    let schema = line_item_schema();
    let input = "line_item_resource_id,line_item_usage_type,line_item_unblended_cost,line_item_is_estimated\n\
                 ,Tax,0.1,false\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let ds = ingest_csv_from_reader(&mut rdr, &schema).unwrap();
    assert_eq!(ds.rows[0][0], Value::Null);
}

#[test]
fn ingest_csv_errors_on_missing_required_column() {
    let schema = line_item_schema();
    let input = "line_item_resource_id,line_item_usage_type,line_item_unblended_cost\nx,y,1.0\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let err = ingest_csv_from_reader(&mut rdr, &schema).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("schema mismatch"));
    assert!(msg.contains("missing required column 'line_item_is_estimated'"));
}

#[test]
fn ingest_csv_errors_on_type_parse() {
    let schema = line_item_schema();
    let input = "line_item_resource_id,line_item_usage_type,line_item_unblended_cost,line_item_is_estimated\n\
                 x,y,not_a_number,false\n";
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(input.as_bytes());

    let err = ingest_csv_from_reader(&mut rdr, &schema).unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("failed to parse value"));
    assert!(msg.contains("column 'line_item_unblended_cost'"));
}
