use std::error::Error as StdError;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ImportError;
use crate::ingestion::IngestionFormat;

use super::ImportSummary;

/// Severity classification used for observer callbacks and alerting
/// thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ImportSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (operation failed).
    Error,
    /// Critical error (typically I/O or other infrastructure failures).
    Critical,
}

/// Context about one file within an import.
#[derive(Debug, Clone)]
pub struct ImportContext {
    /// The file being ingested.
    pub path: PathBuf,
    /// Format used for ingestion, when it was resolved before the event.
    pub format: Option<IngestionFormat>,
}

/// Per-file stats reported after a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStats {
    /// Rows kept from this file (after row filters).
    pub rows: usize,
    /// Columns ingested.
    pub columns_read: usize,
    /// Columns present in the file but not requested.
    pub columns_skipped: usize,
}

/// Observer interface for import progress and outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts. Every hook has a
/// no-op default, so observers implement only what they care about.
pub trait ImportObserver: Send + Sync {
    /// Called after each file is ingested and filtered.
    fn on_file_loaded(&self, _ctx: &ImportContext, _stats: FileStats) {}

    /// Called for each discovered file that is set aside (status tables).
    fn on_file_skipped(&self, _path: &Path, _reason: &str) {}

    /// Called for non-fatal oddities (e.g. a requested column that is not a
    /// known CUR column).
    fn on_warning(&self, _message: &str) {}

    /// Called when ingesting a file fails.
    fn on_failure(&self, _ctx: &ImportContext, _severity: ImportSeverity, _error: &ImportError) {}

    /// Called when a failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        self.on_failure(ctx, severity, error)
    }

    /// Called once after the merged dataset is assembled.
    fn on_import_complete(&self, _summary: &ImportSummary) {}
}

/// Classify an import error for alerting: infrastructure failures are
/// critical, data/schema problems are plain errors.
pub fn severity_for_error(e: &ImportError) -> ImportSeverity {
    match e {
        ImportError::Io(_) => ImportSeverity::Critical,
        ImportError::Parquet(err) => {
            // Parquet errors often wrap IO, but not always in a structured
            // way. If we can detect IO in the source chain, treat it as
            // Critical.
            if error_chain_contains_io(err) {
                ImportSeverity::Critical
            } else {
                ImportSeverity::Error
            }
        }
        ImportError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => ImportSeverity::Critical,
            _ => ImportSeverity::Error,
        },
        _ => ImportSeverity::Error,
    }
}

fn error_chain_contains_io(e: &(dyn StdError + 'static)) -> bool {
    let mut cur: Option<&(dyn StdError + 'static)> = Some(e);
    while let Some(err) = cur {
        if err.is::<std::io::Error>() {
            return true;
        }
        cur = err.source();
    }
    false
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn ImportObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn ImportObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl ImportObserver for CompositeObserver {
    fn on_file_loaded(&self, ctx: &ImportContext, stats: FileStats) {
        for o in &self.observers {
            o.on_file_loaded(ctx, stats);
        }
    }

    fn on_file_skipped(&self, path: &Path, reason: &str) {
        for o in &self.observers {
            o.on_file_skipped(path, reason);
        }
    }

    fn on_warning(&self, message: &str) {
        for o in &self.observers {
            o.on_warning(message);
        }
    }

    fn on_failure(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        for o in &self.observers {
            o.on_failure(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }

    fn on_import_complete(&self, summary: &ImportSummary) {
        for o in &self.observers {
            o.on_import_complete(summary);
        }
    }
}

/// Logs import events to stderr, echoing the progress the notebook printed.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl ImportObserver for StdErrObserver {
    fn on_file_loaded(&self, ctx: &ImportContext, stats: FileStats) {
        eprintln!(
            "[import][ok] path={} rows={} columns={} ({} ignored)",
            ctx.path.display(),
            stats.rows,
            stats.columns_read,
            stats.columns_skipped
        );
    }

    fn on_file_skipped(&self, path: &Path, reason: &str) {
        eprintln!("[import][skip] path={} reason={reason}", path.display());
    }

    fn on_warning(&self, message: &str) {
        eprintln!("[import][warn] {message}");
    }

    fn on_failure(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        eprintln!(
            "[import][{:?}] path={} err={}",
            severity,
            ctx.path.display(),
            error
        );
    }

    fn on_alert(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        eprintln!(
            "[ALERT][import][{:?}] path={} err={}",
            severity,
            ctx.path.display(),
            error
        );
    }

    fn on_import_complete(&self, summary: &ImportSummary) {
        eprintln!("[import][done] {summary}");
    }
}

/// Appends import events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are
    /// ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{line}");
        }
    }
}

impl ImportObserver for FileObserver {
    fn on_file_loaded(&self, ctx: &ImportContext, stats: FileStats) {
        self.append_line(&format!(
            "{} ok path={} rows={} columns={}/{}",
            unix_ts(),
            ctx.path.display(),
            stats.rows,
            stats.columns_read,
            stats.columns_read + stats.columns_skipped
        ));
    }

    fn on_file_skipped(&self, path: &Path, reason: &str) {
        self.append_line(&format!("{} skip path={} reason={reason}", unix_ts(), path.display()));
    }

    fn on_warning(&self, message: &str) {
        self.append_line(&format!("{} warn {message}", unix_ts()));
    }

    fn on_failure(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        self.append_line(&format!(
            "{} fail severity={:?} path={} err={}",
            unix_ts(),
            severity,
            ctx.path.display(),
            error
        ));
    }

    fn on_alert(&self, ctx: &ImportContext, severity: ImportSeverity, error: &ImportError) {
        self.append_line(&format!(
            "{} ALERT severity={:?} path={} err={}",
            unix_ts(),
            severity,
            ctx.path.display(),
            error
        ));
    }

    fn on_import_complete(&self, summary: &ImportSummary) {
        self.append_line(&format!("{} done {summary}", unix_ts()));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
