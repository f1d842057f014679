//! Per-column descriptive summaries.
//!
//! CUR columns are sparse, and in several places the report offers multiple
//! near-duplicate columns to choose from. The profile leads with a non-null
//! percentage per column (empty strings count as missing) so an analyst can
//! pick the usable one at a glance, plus min/max/mean/sum for numerics.

use std::fmt;

use crate::processing::{reduce, ReduceOp};
use crate::types::{DataSet, DataType, Value};

/// Summary statistics for one column.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnProfile {
    /// Column name.
    pub name: String,
    /// Column type.
    pub data_type: DataType,
    /// Total row count.
    pub count: usize,
    /// Non-null, non-empty value count.
    pub non_null: usize,
    /// `non_null / count`, as a percentage rounded to one decimal.
    pub non_null_pct: f64,
    /// Minimum, for numeric columns with at least one value.
    pub min: Option<f64>,
    /// Maximum, for numeric columns with at least one value.
    pub max: Option<f64>,
    /// Mean, for numeric columns with at least one value.
    pub mean: Option<f64>,
    /// Sum, for numeric columns with at least one value.
    pub sum: Option<f64>,
}

/// A profile of every column in a dataset, in schema order.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetProfile {
    /// Per-column summaries.
    pub columns: Vec<ColumnProfile>,
}

/// Profile every column of `dataset`.
pub fn describe(dataset: &DataSet) -> DatasetProfile {
    let count = dataset.row_count();
    let columns = dataset
        .schema
        .fields
        .iter()
        .map(|field| {
            let name = field.name.as_str();
            let non_null = match reduce(dataset, name, ReduceOp::NonNullCount) {
                Some(Value::Int64(n)) => n as usize,
                _ => 0,
            };
            let non_null_pct = if count == 0 {
                0.0
            } else {
                (non_null as f64 / count as f64 * 1000.0).round() / 10.0
            };

            ColumnProfile {
                name: name.to_string(),
                data_type: field.data_type.clone(),
                count,
                non_null,
                non_null_pct,
                min: reduce_f64(dataset, name, ReduceOp::Min),
                max: reduce_f64(dataset, name, ReduceOp::Max),
                mean: reduce_f64(dataset, name, ReduceOp::Mean),
                sum: reduce_f64(dataset, name, ReduceOp::Sum),
            }
        })
        .collect();

    DatasetProfile { columns }
}

fn reduce_f64(dataset: &DataSet, column: &str, op: ReduceOp) -> Option<f64> {
    reduce(dataset, column, op).and_then(|v| v.as_f64())
}

impl fmt::Display for DatasetProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name_width = self
            .columns
            .iter()
            .map(|c| c.name.len())
            .max()
            .unwrap_or(6)
            .max(6);

        writeln!(
            f,
            "{:<name_width$}  {:>10}  {:>12}  {:>12}  {:>12}  {:>12}",
            "column", "non_null%", "min", "max", "mean", "sum"
        )?;
        for c in &self.columns {
            writeln!(
                f,
                "{:<name_width$}  {:>10.1}  {:>12}  {:>12}  {:>12}  {:>12}",
                c.name,
                c.non_null_pct,
                fmt_opt(c.min),
                fmt_opt(c.max),
                fmt_opt(c.mean),
                fmt_opt(c.sum),
            )?;
        }
        Ok(())
    }
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(v) => format!("{v:.3}"),
        None => "-".to_string(),
    }
}
