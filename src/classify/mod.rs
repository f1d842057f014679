//! Resource-identifier classification.
//!
//! The heart of the crate: a small rule-based pattern matcher that segments
//! an ARN-like identifier on `:` and `/`, and — based on delimiter counts and
//! the value at specific segment positions — derives a resource type and a
//! short, human-usable resource id.
//!
//! - [`rule`]: the declarative, ordered [`RuleTable`] (built-in or loaded
//!   from JSON), validated before use
//! - [`segment()`]: splits an identifier into [`SegmentedIdentifier`]
//! - [`classify()`]: first-match-wins evaluation producing a [`Classification`]
//! - [`augment_resource_ids`]: applies the matcher across a whole
//!   [`crate::types::DataSet`], adding `resource_type` and
//!   `short_resource_id` columns flanking the identifier column
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
//! The rules are heuristics tuned to billing data, not a standards-compliant
//! ARN parser.

pub mod apply;
pub mod matcher;
pub mod rule;
pub mod segment;

pub use apply::{
    augment_resource_ids, augment_resource_ids_parallel, ARN_PREFIX, RESOURCE_TYPE_COLUMN,
    SHORT_RESOURCE_ID_COLUMN,
};
pub use matcher::{classify, classify_segments, Classification};
pub use rule::{ClassificationRule, Condition, ConditionOp, RuleSpec, RuleTable, TypePart};
pub use segment::{segment, SegmentedIdentifier};
