//! The classification rule table.
//!
//! Rules are data, not code: each entry declares structural preconditions
//! (delimiter counts), an optional positional condition, and an extraction
//! recipe. One generic matcher interprets the table in order. The built-in
//! table covers the resource shapes seen in CUR exports; callers can also
//! load their own table from JSON.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use serde::Deserialize;

use crate::error::{ClassifyError, ClassifyResult};

/// Comparison operator for a rule condition. Closed set; anything else in a
/// rule file fails deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum ConditionOp {
    #[serde(rename = "==")]
    Equals,
    #[serde(rename = "!=")]
    NotEquals,
}

impl ConditionOp {
    pub(crate) fn evaluate(self, lhs: &str, rhs: &str) -> bool {
        match self {
            Self::Equals => lhs == rhs,
            Self::NotEquals => lhs != rhs,
        }
    }
}

/// One entry of a rule's resource-type recipe: either a literal string or a
/// segment index resolved against the segmented identifier.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum TypePart {
    Segment(usize),
    Literal(String),
}

/// A validated positional condition: compare the segment at `position`
/// against `value` using `op`.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub position: usize,
    pub value: String,
    pub op: ConditionOp,
}

/// Raw, serde-facing form of a rule. The three condition fields are
/// independent options here; [`RuleSpec::validate`] enforces the
/// all-or-nothing invariant before a rule can be used.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSpec {
    /// Required `:` count in the raw identifier.
    pub colon_count: usize,
    /// Required `/` count; `None` leaves the slash count unconstrained.
    #[serde(default)]
    pub slash_count: Option<usize>,
    #[serde(default)]
    pub condition_position: Option<usize>,
    #[serde(default)]
    pub condition_value: Option<String>,
    #[serde(default)]
    pub condition_operator: Option<ConditionOp>,
    /// Resource-type recipe, joined with `:`.
    #[serde(default)]
    pub type_parts: Vec<TypePart>,
    /// First segment index included in the short resource id.
    pub short_id_start: usize,
    /// Exclusive end index; `None` means through the last segment.
    #[serde(default)]
    pub short_id_end: Option<usize>,
}

impl RuleSpec {
    /// Validate the spec into a usable [`ClassificationRule`].
    ///
    /// A partial condition triple is a configuration defect: either all three
    /// condition fields are present or all three are absent.
    pub fn validate(self, index: usize) -> ClassifyResult<ClassificationRule> {
        let condition = match (
            self.condition_position,
            self.condition_value,
            self.condition_operator,
        ) {
            (Some(position), Some(value), Some(op)) => Some(Condition { position, value, op }),
            (None, None, None) => None,
            _ => {
                return Err(ClassifyError::RuleConfig {
                    rule: index,
                    message: "condition_position, condition_value, and condition_operator \
                              must be given together or omitted together"
                        .to_string(),
                });
            }
        };

        Ok(ClassificationRule {
            colon_count: self.colon_count,
            slash_count: self.slash_count,
            condition,
            type_parts: self.type_parts,
            short_id_start: self.short_id_start,
            short_id_end: self.short_id_end,
        })
    }
}

/// A validated classification rule. Construct via [`RuleSpec::validate`] or
/// [`RuleTable::from_specs`]; the partial-condition state is unrepresentable
/// here.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationRule {
    pub colon_count: usize,
    pub slash_count: Option<usize>,
    pub condition: Option<Condition>,
    pub type_parts: Vec<TypePart>,
    pub short_id_start: usize,
    pub short_id_end: Option<usize>,
}

/// An ordered, validated rule table. Order is significant: the matcher takes
/// the first rule that matches, never the "best" one.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTable {
    rules: Vec<ClassificationRule>,
}

impl RuleTable {
    /// Validate a list of specs into a table, in order.
    pub fn from_specs(specs: Vec<RuleSpec>) -> ClassifyResult<Self> {
        let rules = specs
            .into_iter()
            .enumerate()
            .map(|(i, spec)| spec.validate(i))
            .collect::<ClassifyResult<Vec<_>>>()?;
        Ok(Self { rules })
    }

    /// Parse a table from a JSON array of rule objects.
    pub fn from_json_str(json: &str) -> ClassifyResult<Self> {
        let specs: Vec<RuleSpec> =
            serde_json::from_str(json).map_err(|e| ClassifyError::RuleTable {
                message: e.to_string(),
            })?;
        Self::from_specs(specs)
    }

    /// Load a table from a JSON rule file.
    pub fn from_json_path(path: impl AsRef<Path>) -> ClassifyResult<Self> {
        let text = fs::read_to_string(path.as_ref()).map_err(|e| ClassifyError::RuleTable {
            message: format!("cannot read rule file {}: {e}", path.as_ref().display()),
        })?;
        Self::from_json_str(&text)
    }

    /// The built-in table: ECS tasks, SNS subjects, then per-arity
    /// catch-alls. Validated once on first use.
    pub fn builtin() -> &'static RuleTable {
        static TABLE: OnceLock<RuleTable> = OnceLock::new();
        TABLE.get_or_init(|| {
            RuleTable::from_specs(builtin_specs()).expect("built-in rule table is valid")
        })
    }

    /// Iterate rules in match order.
    pub fn iter(&self) -> impl Iterator<Item = &ClassificationRule> {
        self.rules.iter()
    }

    /// Number of rules in the table.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the table has no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Distinct segment positions read by any condition. Used by tests to
    /// sanity-check coverage of the built-in table.
    pub fn condition_positions(&self) -> HashSet<usize> {
        self.rules
            .iter()
            .filter_map(|r| r.condition.as_ref().map(|c| c.position))
            .collect()
    }
}

fn builtin_specs() -> Vec<RuleSpec> {
    vec![
        // ECS tasks: arn:aws:ecs:<region>:<account>:task/<cluster>/<task-id>
        RuleSpec {
            colon_count: 5,
            slash_count: Some(2),
            condition_position: Some(5),
            condition_value: Some("task".to_string()),
            condition_operator: Some(ConditionOp::Equals),
            type_parts: vec![TypePart::Segment(2), TypePart::Segment(5)],
            short_id_start: 6,
            short_id_end: Some(7),
        },
        // SNS: arn:aws:sns:<region>:<account>:sns/<topic>
        RuleSpec {
            colon_count: 5,
            slash_count: None,
            condition_position: Some(5),
            condition_value: Some("sns".to_string()),
            condition_operator: Some(ConditionOp::Equals),
            type_parts: vec![TypePart::Segment(2), TypePart::Segment(5)],
            short_id_start: 6,
            short_id_end: None,
        },
        // Catch-all for the common 5-colon ARN shape.
        RuleSpec {
            colon_count: 5,
            slash_count: None,
            condition_position: None,
            condition_value: None,
            condition_operator: None,
            type_parts: vec![TypePart::Segment(2), TypePart::Segment(5)],
            short_id_start: 3,
            short_id_end: None,
        },
        // 6-colon shape, e.g. arn:aws:lambda:<region>:<account>:function:<name>
        RuleSpec {
            colon_count: 6,
            slash_count: None,
            condition_position: None,
            condition_value: None,
            condition_operator: None,
            type_parts: vec![TypePart::Segment(2), TypePart::Segment(5)],
            short_id_start: 6,
            short_id_end: None,
        },
    ]
}
