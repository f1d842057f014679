//! Reduction operations for [`crate::types::DataSet`].
//!
//! The import summary and the profiler are both built on these: totals over
//! the unblended-cost column, min/max over the usage-period timestamps, and
//! per-column null accounting.

use crate::types::{DataSet, DataType, Value};

/// Built-in reduction operations over a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    /// Count all rows (including nulls).
    Count,
    /// Count non-null values. Empty strings count as null, matching how
    /// sparse CUR columns are reported.
    NonNullCount,
    /// Sum numeric values, ignoring nulls.
    Sum,
    /// Minimum numeric value, ignoring nulls.
    Min,
    /// Maximum numeric value, ignoring nulls.
    Max,
    /// Arithmetic mean of numeric values, ignoring nulls.
    Mean,
}

/// Reduce a column using a built-in [`ReduceOp`].
///
/// - Returns `None` if `column` does not exist in the schema.
/// - `Count` and `NonNullCount` always return `Some(Value::Int64(..))`.
/// - `Sum`/`Min`/`Max` preserve the column type; `Mean` is always `Float64`.
/// - Numeric ops return `Some(Value::Null)` if there are no non-null values
///   or the column is not numeric.
pub fn reduce(dataset: &DataSet, column: &str, op: ReduceOp) -> Option<Value> {
    let idx = dataset.schema.index_of(column)?;

    match op {
        ReduceOp::Count => Some(Value::Int64(dataset.row_count() as i64)),
        ReduceOp::NonNullCount => {
            let n = dataset
                .rows
                .iter()
                .filter(|row| !is_missing(row.get(idx)))
                .count();
            Some(Value::Int64(n as i64))
        }
        ReduceOp::Sum | ReduceOp::Min | ReduceOp::Max => {
            let field = dataset.schema.fields.get(idx)?;
            Some(reduce_numeric_typed(dataset, idx, &field.data_type, op))
        }
        ReduceOp::Mean => {
            let mut sum = 0.0;
            let mut n = 0u64;
            for row in &dataset.rows {
                if let Some(v) = row.get(idx).and_then(Value::as_f64) {
                    sum += v;
                    n += 1;
                }
            }
            if n == 0 {
                Some(Value::Null)
            } else {
                Some(Value::Float64(sum / n as f64))
            }
        }
    }
}

/// Missing means an explicit null or an empty string.
fn is_missing(v: Option<&Value>) -> bool {
    match v {
        None | Some(Value::Null) => true,
        Some(Value::Utf8(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn reduce_numeric_typed(dataset: &DataSet, idx: usize, data_type: &DataType, op: ReduceOp) -> Value {
    match data_type {
        DataType::Int64 => {
            let mut acc: Option<i64> = None;
            for row in &dataset.rows {
                if let Some(Value::Int64(v)) = row.get(idx) {
                    acc = Some(match (op, acc) {
                        (ReduceOp::Sum, Some(a)) => a + v,
                        (ReduceOp::Min, Some(a)) => a.min(*v),
                        (ReduceOp::Max, Some(a)) => a.max(*v),
                        (_, None) => *v,
                        _ => unreachable!("non-numeric op handled earlier"),
                    });
                }
            }
            acc.map(Value::Int64).unwrap_or(Value::Null)
        }
        DataType::Float64 => {
            let mut acc: Option<f64> = None;
            for row in &dataset.rows {
                if let Some(Value::Float64(v)) = row.get(idx) {
                    acc = Some(match (op, acc) {
                        (ReduceOp::Sum, Some(a)) => a + v,
                        (ReduceOp::Min, Some(a)) => a.min(*v),
                        (ReduceOp::Max, Some(a)) => a.max(*v),
                        (_, None) => *v,
                        _ => unreachable!("non-numeric op handled earlier"),
                    });
                }
            }
            acc.map(Value::Float64).unwrap_or(Value::Null)
        }
        _ => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::{reduce, ReduceOp};
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn numeric_dataset_with_nulls() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("id", DataType::Int64),
            Field::new("cost", DataType::Float64),
            Field::new("note", DataType::Utf8),
        ]);

        let rows = vec![
            vec![Value::Int64(1), Value::Float64(10.0), Value::Utf8("x".to_string())],
            vec![Value::Int64(2), Value::Null, Value::Utf8(String::new())],
            vec![Value::Int64(3), Value::Float64(5.5), Value::Null],
        ];

        DataSet::new(schema, rows)
    }

    #[test]
    fn reduce_count_counts_rows() {
        let ds = numeric_dataset_with_nulls();
        assert_eq!(reduce(&ds, "cost", ReduceOp::Count), Some(Value::Int64(3)));
    }

    #[test]
    fn non_null_count_treats_empty_strings_as_missing() {
        let ds = numeric_dataset_with_nulls();
        assert_eq!(
            reduce(&ds, "note", ReduceOp::NonNullCount),
            Some(Value::Int64(1))
        );
        assert_eq!(
            reduce(&ds, "cost", ReduceOp::NonNullCount),
            Some(Value::Int64(2))
        );
    }

    #[test]
    fn reduce_sum_ignores_nulls_and_preserves_type() {
        let ds = numeric_dataset_with_nulls();
        assert_eq!(reduce(&ds, "cost", ReduceOp::Sum), Some(Value::Float64(15.5)));
        assert_eq!(reduce(&ds, "id", ReduceOp::Sum), Some(Value::Int64(6)));
    }

    #[test]
    fn reduce_min_max_ignore_nulls() {
        let ds = numeric_dataset_with_nulls();
        assert_eq!(reduce(&ds, "cost", ReduceOp::Min), Some(Value::Float64(5.5)));
        assert_eq!(reduce(&ds, "cost", ReduceOp::Max), Some(Value::Float64(10.0)));
        assert_eq!(reduce(&ds, "id", ReduceOp::Min), Some(Value::Int64(1)));
        assert_eq!(reduce(&ds, "id", ReduceOp::Max), Some(Value::Int64(3)));
    }

    #[test]
    fn reduce_mean_ignores_nulls() {
        let ds = numeric_dataset_with_nulls();
        assert_eq!(reduce(&ds, "cost", ReduceOp::Mean), Some(Value::Float64(7.75)));
        assert_eq!(reduce(&ds, "id", ReduceOp::Mean), Some(Value::Float64(2.0)));
    }

    #[test]
    fn reduce_returns_none_for_missing_column() {
        let ds = numeric_dataset_with_nulls();
        assert_eq!(reduce(&ds, "missing", ReduceOp::Count), None);
        assert_eq!(reduce(&ds, "missing", ReduceOp::Sum), None);
    }

    #[test]
    fn reduce_numeric_returns_null_for_all_null_or_text_columns() {
        let schema = Schema::new(vec![Field::new("cost", DataType::Float64)]);
        let ds = DataSet::new(schema, vec![vec![Value::Null], vec![Value::Null]]);
        assert_eq!(reduce(&ds, "cost", ReduceOp::Sum), Some(Value::Null));
        assert_eq!(reduce(&ds, "cost", ReduceOp::Mean), Some(Value::Null));

        let text = numeric_dataset_with_nulls();
        assert_eq!(reduce(&text, "note", ReduceOp::Max), Some(Value::Null));
    }
}
