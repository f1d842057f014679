//! The CUR import pipeline.
//!
//! [`import_cur`] is the analyst-facing entry point: it expands a path
//! pattern, merges every discovered CUR file into one [`DataSet`], applies
//! optional row filters and a column-rename mapping, and augments rows with
//! the derived resource classification columns.
//!
//! ```no_run
//! use cur_dataprep::import::{import_cur, CurImportOptions};
//!
//! # fn main() -> Result<(), cur_dataprep::ImportError> {
//! let opts = CurImportOptions::default();
//! let imported = import_cur("reports/**/*.parquet", &opts)?;
//! println!("{}", imported.summary);
//! println!("rows={}", imported.dataset.row_count());
//! # Ok(())
//! # }
//! ```

pub mod columns;
pub mod discover;
pub mod observability;
pub mod rename;

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::classify::{augment_resource_ids, augment_resource_ids_parallel, RuleTable};
use crate::error::{ImportError, ImportResult};
use crate::execution::{ExecutionEngine, ExecutionOptions};
use crate::ingestion::{infer_format_from_path, ingest_file, read_file_schema, IngestionFormat};
use crate::processing::{apply_row_filters, reduce, ReduceOp, RowFilter};
use crate::types::{DataSet, Schema, Value};

pub use columns::{is_known_cur_column, ALL_CUR_COLUMNS};
pub use discover::{discover_inputs, DiscoveredInputs, STATUS_TABLE_MARKER};
pub use observability::{
    severity_for_error, CompositeObserver, FileObserver, FileStats, ImportContext, ImportObserver,
    ImportSeverity, StdErrObserver,
};
pub use rename::{apply_rename_mapping, load_rename_mapping};

/// Canonical CUR column holding the usage interval start.
pub const USAGE_START_COLUMN: &str = "line_item_usage_start_date";

/// Canonical CUR column holding the usage interval end.
pub const USAGE_END_COLUMN: &str = "line_item_usage_end_date";

/// Canonical CUR column holding the unblended cost.
pub const UNBLENDED_COST_COLUMN: &str = "line_item_unblended_cost";

/// Canonical CUR column holding the resource identifier.
pub const DEFAULT_RESOURCE_ID_COLUMN: &str = "line_item_resource_id";

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Row count at and above which classification routes through the parallel
/// execution engine.
const PARALLEL_CLASSIFY_THRESHOLD: usize = 50_000;

/// Options controlling a CUR import. Use [`Default`] for common cases.
#[derive(Clone)]
pub struct CurImportOptions {
    /// Columns to import. `None` imports every column of the first file.
    pub columns: Option<Vec<String>>,
    /// Row filters applied per file on read; rows failing any predicate are
    /// excluded from the merge (and counted in the summary).
    pub row_filters: Vec<RowFilter>,
    /// Optional JSON file mapping original column names to preferred ones.
    pub rename_mapping: Option<PathBuf>,
    /// Whether to derive `resource_type`/`short_resource_id` columns.
    pub classify_resource_ids: bool,
    /// Identifier column to classify, by its ORIGINAL (pre-rename) name.
    pub resource_id_column: String,
    /// Rule table override; `None` uses [`RuleTable::builtin`].
    pub rule_table: Option<RuleTable>,
    /// Force an ingestion format instead of inferring from extensions.
    pub format: Option<IngestionFormat>,
    /// Optional observer for progress logging/alerts.
    pub observer: Option<Arc<dyn ImportObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: ImportSeverity,
}

impl Default for CurImportOptions {
    fn default() -> Self {
        Self {
            columns: None,
            row_filters: Vec::new(),
            rename_mapping: None,
            classify_resource_ids: true,
            resource_id_column: DEFAULT_RESOURCE_ID_COLUMN.to_string(),
            rule_table: None,
            format: None,
            observer: None,
            alert_at_or_above: ImportSeverity::Critical,
        }
    }
}

impl fmt::Debug for CurImportOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurImportOptions")
            .field("columns", &self.columns)
            .field("row_filters", &self.row_filters)
            .field("rename_mapping", &self.rename_mapping)
            .field("classify_resource_ids", &self.classify_resource_ids)
            .field("resource_id_column", &self.resource_id_column)
            .field("rule_table_set", &self.rule_table.is_some())
            .field("format", &self.format)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

/// Aggregate figures for one import, computed on the merged dataset before
/// renaming (so the canonical CUR column names apply).
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSummary {
    /// Data files merged into the output.
    pub files_loaded: usize,
    /// Status-table files set aside during discovery.
    pub files_skipped: usize,
    /// Rows in the merged dataset.
    pub rows_imported: usize,
    /// Rows dropped by row filters across all files.
    pub rows_excluded: usize,
    /// Earliest `line_item_usage_start_date`, epoch millis, when present.
    pub usage_start_ms: Option<i64>,
    /// Latest `line_item_usage_end_date`, epoch millis, when present.
    pub usage_end_ms: Option<i64>,
    /// Inclusive day count of the usage period, when both bounds are present.
    pub days_inclusive: Option<i64>,
    /// Sum of `line_item_unblended_cost`, when present.
    pub total_unblended_cost: Option<f64>,
}

impl fmt::Display for ImportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "files={} (skipped {}), rows={} ({} excluded by filters)",
            self.files_loaded, self.files_skipped, self.rows_imported, self.rows_excluded
        )?;
        if let Some(days) = self.days_inclusive {
            write!(f, ", {days} days of usage")?;
        }
        if let Some(cost) = self.total_unblended_cost {
            write!(f, ", total unblended cost = {cost:.3}")?;
        }
        Ok(())
    }
}

/// A merged CUR import: the dataset plus its summary.
#[derive(Debug, Clone, PartialEq)]
pub struct CurImport {
    /// The merged (and possibly renamed/augmented) dataset.
    pub dataset: DataSet,
    /// Aggregate import figures.
    pub summary: ImportSummary,
}

/// Import CUR files matching `pattern` (a glob pattern or a directory root)
/// into one merged, optionally renamed and classified [`DataSet`].
///
/// Errors follow a no-partial-success rule: any file that fails to ingest
/// aborts the whole import (after notifying the observer).
pub fn import_cur(pattern: &str, options: &CurImportOptions) -> ImportResult<CurImport> {
    let discovered = discover_inputs(pattern)?;
    if let Some(obs) = &options.observer {
        for path in &discovered.skipped {
            obs.on_file_skipped(path, "status table");
        }
    }
    if discovered.files.is_empty() {
        return Err(ImportError::NoInput {
            pattern: pattern.to_string(),
        });
    }

    let requested = options.columns.clone().map(|mut cols| {
        // The notebook sorted its requested columns before use; kept for
        // deterministic error messages and merge schemas.
        cols.sort();
        cols
    });
    if let (Some(obs), Some(cols)) = (&options.observer, &requested) {
        for col in cols {
            if !is_known_cur_column(col) {
                obs.on_warning(&format!("requested column '{col}' is not a known CUR column"));
            }
        }
    }

    let mut merged: Option<DataSet> = None;
    let mut rows_excluded = 0usize;

    for path in &discovered.files {
        let format = options.format.or_else(|| infer_format_from_path(path).ok());
        let ctx = ImportContext {
            path: path.clone(),
            format,
        };

        let loaded = load_one_file(path, format, requested.as_deref(), merged.as_ref(), options);
        let (ds, stats, excluded) = match loaded {
            Ok(v) => v,
            Err(e) => {
                if let Some(obs) = &options.observer {
                    let severity = severity_for_error(&e);
                    obs.on_failure(&ctx, severity, &e);
                    if severity >= options.alert_at_or_above {
                        obs.on_alert(&ctx, severity, &e);
                    }
                }
                return Err(e);
            }
        };

        rows_excluded += excluded;
        if let Some(obs) = &options.observer {
            obs.on_file_loaded(&ctx, stats);
        }

        match merged.as_mut() {
            None => merged = Some(ds),
            Some(m) => m.append(ds)?,
        }
    }

    let mut dataset = merged.expect("at least one discovered file was ingested");
    let summary = build_summary(
        &dataset,
        discovered.files.len(),
        discovered.skipped.len(),
        rows_excluded,
    );

    let mapping = match &options.rename_mapping {
        Some(path) => {
            let mapping = load_rename_mapping(path)?;
            apply_rename_mapping(&mut dataset, &mapping);
            mapping
        }
        None => HashMap::new(),
    };

    if options.classify_resource_ids && dataset.row_count() > 0 {
        let id_column = mapping
            .get(&options.resource_id_column)
            .cloned()
            .unwrap_or_else(|| options.resource_id_column.clone());
        let table = options
            .rule_table
            .as_ref()
            .unwrap_or_else(|| RuleTable::builtin());

        dataset = if dataset.row_count() >= PARALLEL_CLASSIFY_THRESHOLD {
            let engine = ExecutionEngine::new(ExecutionOptions::default());
            augment_resource_ids_parallel(&engine, &dataset, &id_column, table)?
        } else {
            augment_resource_ids(&dataset, &id_column, table)?
        };
    }

    if let Some(obs) = &options.observer {
        obs.on_import_complete(&summary);
    }

    Ok(CurImport { dataset, summary })
}

/// Ingest and filter one file. Returns the filtered dataset, per-file stats,
/// and the number of rows the filters excluded.
fn load_one_file(
    path: &Path,
    format: Option<IngestionFormat>,
    requested: Option<&[String]>,
    merged: Option<&DataSet>,
    options: &CurImportOptions,
) -> ImportResult<(DataSet, FileStats, usize)> {
    let file_schema = read_file_schema(path, format)?;

    // The first file fixes the merge schema; later files must conform to it.
    let schema = match merged {
        Some(m) => m.schema.clone(),
        None => match requested {
            Some(cols) => select_requested(&file_schema, cols)?,
            None => file_schema.clone(),
        },
    };

    let ds = ingest_file(path, &schema, format)?;
    let file_rows = ds.row_count();
    let ds = apply_row_filters(&ds, &options.row_filters)?;
    let excluded = file_rows - ds.row_count();

    let stats = FileStats {
        rows: ds.row_count(),
        columns_read: schema.fields.len(),
        columns_skipped: file_schema.fields.len().saturating_sub(schema.fields.len()),
    };
    Ok((ds, stats, excluded))
}

fn select_requested(file_schema: &Schema, requested: &[String]) -> ImportResult<Schema> {
    let missing: Vec<&str> = requested
        .iter()
        .filter(|name| file_schema.index_of(name).is_none())
        .map(String::as_str)
        .collect();
    if !missing.is_empty() {
        return Err(ImportError::SchemaMismatch {
            message: format!("requested columns not found in file: {missing:?}"),
        });
    }
    Ok(file_schema.select(requested))
}

fn build_summary(
    dataset: &DataSet,
    files_loaded: usize,
    files_skipped: usize,
    rows_excluded: usize,
) -> ImportSummary {
    let usage_start_ms = reduce_int(dataset, USAGE_START_COLUMN, ReduceOp::Min);
    let usage_end_ms = reduce_int(dataset, USAGE_END_COLUMN, ReduceOp::Max);
    let days_inclusive = match (usage_start_ms, usage_end_ms) {
        (Some(start), Some(end)) if end >= start => Some((end - start) / MILLIS_PER_DAY + 1),
        _ => None,
    };
    let total_unblended_cost =
        reduce(dataset, UNBLENDED_COST_COLUMN, ReduceOp::Sum).and_then(|v| v.as_f64());

    ImportSummary {
        files_loaded,
        files_skipped,
        rows_imported: dataset.row_count(),
        rows_excluded,
        usage_start_ms,
        usage_end_ms,
        days_inclusive,
        total_unblended_cost,
    }
}

fn reduce_int(dataset: &DataSet, column: &str, op: ReduceOp) -> Option<i64> {
    match reduce(dataset, column, op) {
        Some(Value::Int64(v)) => Some(v),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{build_summary, ImportSummary, MILLIS_PER_DAY};
    use crate::types::{DataSet, DataType, Field, Schema, Value};

    fn cur_dataset() -> DataSet {
        let schema = Schema::new(vec![
            Field::new("line_item_usage_start_date", DataType::Int64),
            Field::new("line_item_usage_end_date", DataType::Int64),
            Field::new("line_item_unblended_cost", DataType::Float64),
        ]);
        let rows = vec![
            vec![
                Value::Int64(0),
                Value::Int64(MILLIS_PER_DAY),
                Value::Float64(1.5),
            ],
            vec![
                Value::Int64(2 * MILLIS_PER_DAY),
                Value::Int64(3 * MILLIS_PER_DAY),
                Value::Float64(2.0),
            ],
        ];
        DataSet::new(schema, rows)
    }

    #[test]
    fn summary_computes_period_and_cost() {
        let ds = cur_dataset();
        let summary = build_summary(&ds, 2, 1, 3);

        assert_eq!(summary.files_loaded, 2);
        assert_eq!(summary.files_skipped, 1);
        assert_eq!(summary.rows_imported, 2);
        assert_eq!(summary.rows_excluded, 3);
        assert_eq!(summary.usage_start_ms, Some(0));
        assert_eq!(summary.usage_end_ms, Some(3 * MILLIS_PER_DAY));
        assert_eq!(summary.days_inclusive, Some(4));
        assert_eq!(summary.total_unblended_cost, Some(3.5));
    }

    #[test]
    fn summary_tolerates_missing_canonical_columns() {
        let schema = Schema::new(vec![Field::new("whatever", DataType::Utf8)]);
        let ds = DataSet::new(schema, vec![vec![Value::Null]]);
        let summary = build_summary(&ds, 1, 0, 0);

        assert_eq!(summary.usage_start_ms, None);
        assert_eq!(summary.days_inclusive, None);
        assert_eq!(summary.total_unblended_cost, None);
    }

    #[test]
    fn summary_display_is_stable() {
        let summary = ImportSummary {
            files_loaded: 2,
            files_skipped: 1,
            rows_imported: 10,
            rows_excluded: 3,
            usage_start_ms: Some(0),
            usage_end_ms: Some(MILLIS_PER_DAY),
            days_inclusive: Some(2),
            total_unblended_cost: Some(1.2345),
        };
        assert_eq!(
            summary.to_string(),
            "files=2 (skipped 1), rows=10 (3 excluded by filters), 2 days of usage, \
             total unblended cost = 1.234"
        );
    }
}
