//! In-memory data transformations.
//!
//! The processing layer operates on [`crate::types::DataSet`] values produced
//! by ingestion. It is intentionally simple and purely in-memory.
//!
//! - [`filter()`] / [`apply_row_filters()`]: row filtering by predicate or by
//!   declarative [`RowFilter`] triples (the import pipeline's on-read filters)
//! - [`reduce()`]: common reductions (count/non-null count/sum/min/max/mean)
//!
//! ## Example: filter then reduce
//!
//! ```rust
//! use cur_dataprep::processing::{apply_row_filters, reduce, FilterOp, ReduceOp, RowFilter};
//! use cur_dataprep::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![
//!     Field::new("id", DataType::Int64),
//!     Field::new("cost", DataType::Float64),
//! ]);
//! let ds = DataSet::new(
//!     schema,
//!     vec![
//!         vec![Value::Int64(1), Value::Float64(10.0)],
//!         vec![Value::Int64(2), Value::Float64(0.0)],
//!         vec![Value::Int64(3), Value::Float64(20.0)],
//!     ],
//! );
//!
//! // Keep only rows that actually cost something.
//! let billed = apply_row_filters(&ds, &[RowFilter::new("cost", FilterOp::Gt, 0.0)]).unwrap();
//! let total = reduce(&billed, "cost", ReduceOp::Sum).unwrap();
//! assert_eq!(total, Value::Float64(30.0));
//! ```

pub mod filter;
pub mod reduce;

pub use filter::{apply_row_filters, filter, FilterOp, RowFilter};
pub use reduce::{reduce, ReduceOp};
