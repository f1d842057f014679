//! Unified, format-dispatched ingestion entrypoints.
//!
//! The import pipeline calls these per discovered file:
//!
//! - [`read_file_schema`] inspects file metadata (Parquet footer, or CSV
//!   header plus a bounded sample) without ingesting rows
//! - [`ingest_file`] ingests into an in-memory [`crate::types::DataSet`]
//!
//! If `format` is `None`, the format is inferred from the file extension.

use std::path::Path;

use crate::error::{ImportError, ImportResult};
use crate::types::{DataSet, Schema};

use super::{csv, parquet};

/// Supported ingestion formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionFormat {
    /// Comma-separated values.
    Csv,
    /// Apache Parquet.
    Parquet,
}

impl IngestionFormat {
    /// Parse an ingestion format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "parquet" | "pq" => Some(Self::Parquet),
            _ => None,
        }
    }
}

/// Infer the ingestion format from a path's extension.
pub fn infer_format_from_path(path: &Path) -> ImportResult<IngestionFormat> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ImportError::SchemaMismatch {
            message: format!(
                "cannot infer format: path has no extension ({})",
                path.display()
            ),
        })?;

    IngestionFormat::from_extension(ext).ok_or_else(|| ImportError::SchemaMismatch {
        message: format!(
            "cannot infer format from extension '{ext}' for path ({})",
            path.display()
        ),
    })
}

/// Read the on-disk schema of a file without ingesting its rows.
pub fn read_file_schema(path: impl AsRef<Path>, format: Option<IngestionFormat>) -> ImportResult<Schema> {
    let path = path.as_ref();
    let fmt = match format {
        Some(f) => f,
        None => infer_format_from_path(path)?,
    };

    match fmt {
        IngestionFormat::Csv => csv::read_csv_schema(path, csv::SCHEMA_SAMPLE_ROWS),
        IngestionFormat::Parquet => parquet::read_parquet_schema(path),
    }
}

/// Ingest a file into a [`DataSet`] using the provided schema.
pub fn ingest_file(
    path: impl AsRef<Path>,
    schema: &Schema,
    format: Option<IngestionFormat>,
) -> ImportResult<DataSet> {
    let path = path.as_ref();
    let fmt = match format {
        Some(f) => f,
        None => infer_format_from_path(path)?,
    };

    match fmt {
        IngestionFormat::Csv => csv::ingest_csv_from_path(path, schema),
        IngestionFormat::Parquet => parquet::ingest_parquet_from_path(path, schema),
    }
}

#[cfg(test)]
mod tests {
    use super::{infer_format_from_path, IngestionFormat};
    use std::path::Path;

    #[test]
    fn format_inference_by_extension() {
        assert_eq!(
            infer_format_from_path(Path::new("a/b/report.parquet")).unwrap(),
            IngestionFormat::Parquet
        );
        assert_eq!(
            infer_format_from_path(Path::new("report.PQ")).unwrap(),
            IngestionFormat::Parquet
        );
        assert_eq!(
            infer_format_from_path(Path::new("report.csv")).unwrap(),
            IngestionFormat::Csv
        );
    }

    #[test]
    fn unknown_or_missing_extension_is_rejected() {
        assert!(infer_format_from_path(Path::new("report.xlsx")).is_err());
        assert!(infer_format_from_path(Path::new("report")).is_err());
    }
}
