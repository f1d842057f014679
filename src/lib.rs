//! `cur-dataprep` prepares AWS Cost and Usage Report (CUR) exports for
//! ad-hoc analysis: it merges Parquet/CSV report files into an in-memory
//! [`types::DataSet`], optionally renames columns per an external JSON
//! mapping, and augments each row with a resource classification derived
//! from its ARN-like resource identifier.
//!
//! The primary entrypoint is [`import::import_cur`], which expands a glob
//! pattern (or walks a directory), merges every discovered report file, and
//! runs the classification step:
//!
//! ```no_run
//! use cur_dataprep::import::{import_cur, CurImportOptions};
//!
//! # fn main() -> Result<(), cur_dataprep::ImportError> {
//! let imported = import_cur("reports/**/*.parquet", &CurImportOptions::default())?;
//! println!("{}", imported.summary);
//! # Ok(())
//! # }
//! ```
//!
//! ## Resource classification
//!
//! The interesting part of the crate is [`classify`]: an ordered table of
//! declarative rules matched against a segmented identifier, first match
//! wins. Classification adds two columns — `resource_type` and
//! `short_resource_id` — positioned immediately around the identifier
//! column:
//!
//! ```rust
//! use cur_dataprep::classify::{classify, RuleTable};
//!
//! let c = classify(
//!     "arn:aws:ecs:us-east-1:123456789012:task/my-cluster/abc123",
//!     RuleTable::builtin(),
//! )
//! .unwrap();
//! assert_eq!(c.resource_type, "ecs:task");
//! assert_eq!(c.short_resource_id, "my-cluster");
//! ```
//!
//! Identifiers that are not ARNs are left untouched; ARNs no rule matches
//! classify to the empty pair. The rules are billing-data heuristics, not a
//! standards-compliant ARN parser.
//!
//! ## Modules
//!
//! - [`import`]: the CUR import pipeline (discovery, merge, rename, summary)
//! - [`classify`]: rule table, identifier segmenter, matcher, batch applier
//! - [`ingestion`]: per-format file readers (CSV, Parquet) + schema inference
//! - [`processing`]: row filters and column reductions
//! - [`execution`]: chunked parallel column derivation with metrics
//! - [`profile`]: per-column descriptive summaries (non-null %, min/max/...)
//! - [`display`]: plain-text dataset rendering
//! - [`types`]: schema + in-memory dataset types
//! - [`error`]: error types used across the crate

pub mod classify;
pub mod display;
pub mod error;
pub mod execution;
pub mod import;
pub mod ingestion;
pub mod processing;
pub mod profile;
pub mod types;

pub use error::{ClassifyError, ClassifyResult, ImportError, ImportResult};
