//! Input file discovery.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::ImportResult;
use crate::ingestion::IngestionFormat;

/// Path marker for the status table AWS writes alongside CUR data files.
pub const STATUS_TABLE_MARKER: &str = "cost_and_usage_data_status";

/// Result of input discovery: data files to ingest and status-table paths
/// that were matched but set aside.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiscoveredInputs {
    /// Ingestable files, sorted for deterministic merge order.
    pub files: Vec<PathBuf>,
    /// Status-table files excluded from ingestion.
    pub skipped: Vec<PathBuf>,
}

/// Discover input files for an import.
///
/// `pattern` is either a glob pattern (`reports/**/*.parquet`) or a directory
/// root, in which case the tree is walked for files with a recognized
/// extension. Status-table files are reported in `skipped` rather than
/// silently dropped, so the pipeline can log them the way the notebook did.
pub fn discover_inputs(pattern: &str) -> ImportResult<DiscoveredInputs> {
    let root = Path::new(pattern);
    let mut out = DiscoveredInputs::default();

    if root.is_dir() {
        for entry in WalkDir::new(root).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            let has_known_ext = entry
                .path()
                .extension()
                .and_then(|e| e.to_str())
                .and_then(IngestionFormat::from_extension)
                .is_some();
            if has_known_ext {
                push_discovered(&mut out, entry.into_path());
            }
        }
    } else {
        for matched in glob::glob(pattern)? {
            let path = matched?;
            if path.is_file() {
                push_discovered(&mut out, path);
            }
        }
    }

    out.files.sort();
    out.skipped.sort();
    Ok(out)
}

fn push_discovered(out: &mut DiscoveredInputs, path: PathBuf) {
    if path.to_string_lossy().contains(STATUS_TABLE_MARKER) {
        out.skipped.push(path);
    } else {
        out.files.push(path);
    }
}
