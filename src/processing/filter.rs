//! Row filtering for [`crate::types::DataSet`].
//!
//! Besides the generic predicate wrapper, this module defines the
//! [`RowFilter`] triples the import pipeline applies on read (column,
//! comparison operator, numeric threshold).

use crate::error::{ImportError, ImportResult};
use crate::types::{DataSet, Value};

/// Comparison operator for a [`RowFilter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    Lt,
    Le,
    Eq,
    Ne,
    Ge,
    Gt,
}

impl FilterOp {
    /// Parse the operator from its conventional spelling (`<`, `<=`, `==`,
    /// `!=`, `>=`, `>`).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "<" => Some(Self::Lt),
            "<=" => Some(Self::Le),
            "==" => Some(Self::Eq),
            "!=" => Some(Self::Ne),
            ">=" => Some(Self::Ge),
            ">" => Some(Self::Gt),
            _ => None,
        }
    }

    fn compare(self, lhs: f64, rhs: f64) -> bool {
        match self {
            Self::Lt => lhs < rhs,
            Self::Le => lhs <= rhs,
            Self::Eq => lhs == rhs,
            Self::Ne => lhs != rhs,
            Self::Ge => lhs >= rhs,
            Self::Gt => lhs > rhs,
        }
    }
}

/// A single numeric row predicate: keep rows where `column <op> threshold`.
///
/// Rows whose column value is null or non-numeric fail the predicate and are
/// dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct RowFilter {
    /// Column the predicate reads.
    pub column: String,
    /// Comparison operator.
    pub op: FilterOp,
    /// Right-hand side of the comparison.
    pub threshold: f64,
}

impl RowFilter {
    /// Create a new row filter.
    pub fn new(column: impl Into<String>, op: FilterOp, threshold: f64) -> Self {
        Self {
            column: column.into(),
            op,
            threshold,
        }
    }
}

/// Returns a new [`DataSet`] containing only rows for which `predicate`
/// returns `true`.
///
/// This is a convenience wrapper around [`DataSet::filter_rows`].
pub fn filter<F>(dataset: &DataSet, predicate: F) -> DataSet
where
    F: FnMut(&[Value]) -> bool,
{
    dataset.filter_rows(predicate)
}

/// Apply every [`RowFilter`] conjunctively, returning the surviving rows.
///
/// A filter naming a column the dataset does not have is a schema mismatch.
pub fn apply_row_filters(dataset: &DataSet, filters: &[RowFilter]) -> ImportResult<DataSet> {
    if filters.is_empty() {
        return Ok(dataset.clone());
    }

    let mut compiled = Vec::with_capacity(filters.len());
    for f in filters {
        let idx = dataset.column_index(&f.column).ok_or_else(|| {
            ImportError::SchemaMismatch {
                message: format!("row filter references unknown column '{}'", f.column),
            }
        })?;
        compiled.push((idx, f.op, f.threshold));
    }

    Ok(dataset.filter_rows(|row| {
        compiled.iter().all(|&(idx, op, threshold)| {
            row.get(idx)
                .and_then(Value::as_f64)
                .is_some_and(|v| op.compare(v, threshold))
        })
    }))
}

#[cfg(test)]
mod tests {
    use super::{apply_row_filters, filter, FilterOp, RowFilter};
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn cost_dataset() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("id", DataType::Int64),
            Field::new("cost", DataType::Float64),
        ]);
        let rows = vec![
            vec![Value::Int64(1), Value::Float64(0.0)],
            vec![Value::Int64(2), Value::Float64(12.5)],
            vec![Value::Int64(3), Value::Null],
            vec![Value::Int64(4), Value::Float64(3.0)],
        ];
        DataSet::new(schema, rows)
    }

    #[test]
    fn filter_rows_by_predicate() {
        let ds = cost_dataset();
        let out = filter(&ds, |row| matches!(row[0], Value::Int64(v) if v > 2));
        assert_eq!(out.row_count(), 2);
        assert_eq!(out.schema, ds.schema);
    }

    #[test]
    fn row_filters_keep_rows_satisfying_every_predicate() {
        let ds = cost_dataset();
        let filters = vec![
            RowFilter::new("cost", FilterOp::Gt, 0.0),
            RowFilter::new("cost", FilterOp::Lt, 10.0),
        ];

        let out = apply_row_filters(&ds, &filters).unwrap();
        assert_eq!(out.row_count(), 1);
        assert_eq!(out.rows[0][0], Value::Int64(4));
    }

    #[test]
    fn row_filters_drop_null_values() {
        let ds = cost_dataset();
        let filters = vec![RowFilter::new("cost", FilterOp::Ge, 0.0)];

        let out = apply_row_filters(&ds, &filters).unwrap();
        // Row 3 has a null cost and is excluded even by `>= 0`.
        assert_eq!(out.row_count(), 3);
    }

    #[test]
    fn row_filter_on_unknown_column_is_schema_mismatch() {
        let ds = cost_dataset();
        let filters = vec![RowFilter::new("missing", FilterOp::Eq, 1.0)];

        let err = apply_row_filters(&ds, &filters).unwrap_err();
        assert!(err.to_string().contains("unknown column 'missing'"));
    }

    #[test]
    fn filter_op_parses_conventional_spellings() {
        assert_eq!(FilterOp::parse("<"), Some(FilterOp::Lt));
        assert_eq!(FilterOp::parse(">="), Some(FilterOp::Ge));
        assert_eq!(FilterOp::parse("!="), Some(FilterOp::Ne));
        assert_eq!(FilterOp::parse("=>"), None);
    }

    #[test]
    fn no_filters_is_identity() {
        let ds = cost_dataset();
        let out = apply_row_filters(&ds, &[]).unwrap();
        assert_eq!(out, ds);
    }
}
