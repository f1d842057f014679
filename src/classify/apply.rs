//! Batch application of the classifier over a dataset.
//!
//! Adds `resource_type` and `short_resource_id` columns flanking the
//! identifier column. Only rows whose identifier is a string starting with
//! `arn:` are classified; every other row passes through untouched with null
//! classification values.

use crate::error::{ClassifyError, ClassifyResult};
use crate::execution::ExecutionEngine;
use crate::types::{DataSet, DataType, Field, Value};

use super::matcher::classify;
use super::rule::RuleTable;

/// Identifier prefix that makes a row eligible for classification.
pub const ARN_PREFIX: &str = "arn:";

/// Name of the derived resource-type column.
pub const RESOURCE_TYPE_COLUMN: &str = "resource_type";

/// Name of the derived short-resource-id column.
pub const SHORT_RESOURCE_ID_COLUMN: &str = "short_resource_id";

/// Augment `dataset` with `resource_type` and `short_resource_id` columns
/// derived from `id_column`.
///
/// - Rows whose identifier is a `Utf8` value starting with `arn:` run
///   through the matcher; an ARN no rule matches gets empty strings.
/// - All other rows (null, non-string, non-ARN) get `Null` in both derived
///   columns and are otherwise unchanged. Row order is preserved; this is an
///   augmentation, never a row filter.
/// - The derived columns are positioned immediately before and after the
///   identifier column. Existing derived columns from an earlier run are
///   replaced, so re-applying over the same identifier column is idempotent.
///
/// An empty dataset or a missing identifier column fails the precondition
/// before anything is mutated.
pub fn augment_resource_ids(
    dataset: &DataSet,
    id_column: &str,
    table: &RuleTable,
) -> ClassifyResult<DataSet> {
    let id_idx = check_preconditions(dataset, id_column)?;

    let mut resource_types = Vec::with_capacity(dataset.row_count());
    let mut short_ids = Vec::with_capacity(dataset.row_count());
    for row in &dataset.rows {
        let (rt, sid) = classify_cell(&row[id_idx], table)?;
        resource_types.push(rt);
        short_ids.push(sid);
    }

    Ok(merge_classification(dataset, id_column, resource_types, short_ids))
}

/// Like [`augment_resource_ids`], but derives the two columns across row
/// chunks on `engine`'s thread pool. Row alignment and every error/output
/// contract of the sequential path are preserved.
pub fn augment_resource_ids_parallel(
    engine: &ExecutionEngine,
    dataset: &DataSet,
    id_column: &str,
    table: &RuleTable,
) -> ClassifyResult<DataSet> {
    let id_idx = check_preconditions(dataset, id_column)?;

    let derived = engine.derive_parallel(dataset, |row| {
        let (rt, sid) = classify_cell(&row[id_idx], table)?;
        Ok(vec![rt, sid])
    })?;

    let mut resource_types = Vec::with_capacity(derived.len());
    let mut short_ids = Vec::with_capacity(derived.len());
    for mut pair in derived {
        let sid = pair.pop().unwrap_or(Value::Null);
        let rt = pair.pop().unwrap_or(Value::Null);
        resource_types.push(rt);
        short_ids.push(sid);
    }

    Ok(merge_classification(dataset, id_column, resource_types, short_ids))
}

fn check_preconditions(dataset: &DataSet, id_column: &str) -> ClassifyResult<usize> {
    if dataset.rows.is_empty() {
        return Err(ClassifyError::Precondition {
            message: "dataset is empty".to_string(),
        });
    }
    dataset
        .column_index(id_column)
        .ok_or_else(|| ClassifyError::Precondition {
            message: format!("dataset has no column '{id_column}'"),
        })
}

fn classify_cell(cell: &Value, table: &RuleTable) -> ClassifyResult<(Value, Value)> {
    match cell.as_utf8() {
        Some(id) if id.starts_with(ARN_PREFIX) => {
            let c = classify(id, table)?;
            Ok((Value::Utf8(c.resource_type), Value::Utf8(c.short_resource_id)))
        }
        _ => Ok((Value::Null, Value::Null)),
    }
}

/// Merge the derived columns into a copy of the dataset so that
/// `resource_type` sits immediately before the identifier column and
/// `short_resource_id` immediately after it.
///
/// Columns move one at a time, recomputing the anchor position after each
/// mutation: removals shift positions, so a precomputed anchor would go
/// stale.
fn merge_classification(
    dataset: &DataSet,
    id_column: &str,
    resource_types: Vec<Value>,
    short_ids: Vec<Value>,
) -> DataSet {
    let mut out = dataset.clone();
    out.remove_column(RESOURCE_TYPE_COLUMN);
    out.remove_column(SHORT_RESOURCE_ID_COLUMN);

    let anchor = out
        .column_index(id_column)
        .expect("identifier column checked before merge");
    out.insert_column(
        anchor,
        Field::new(RESOURCE_TYPE_COLUMN, DataType::Utf8),
        resource_types,
    );

    let anchor = out
        .column_index(id_column)
        .expect("identifier column checked before merge");
    out.insert_column(
        anchor + 1,
        Field::new(SHORT_RESOURCE_ID_COLUMN, DataType::Utf8),
        short_ids,
    );

    out
}
