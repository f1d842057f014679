//! The rule matcher: first matching rule wins.

use crate::error::{ClassifyError, ClassifyResult};

use super::rule::{ClassificationRule, RuleTable, TypePart};
use super::segment::{segment, SegmentedIdentifier};

/// The derived classification for one identifier. Both fields are empty when
/// no rule matched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Derived tag summarizing the kind of resource, e.g. `ecs:task`.
    pub resource_type: String,
    /// Trimmed, human-usable abbreviation of the identifier.
    pub short_resource_id: String,
}

impl Classification {
    /// Whether any rule matched.
    pub fn is_classified(&self) -> bool {
        !self.resource_type.is_empty() || !self.short_resource_id.is_empty()
    }
}

/// Classify a raw identifier string against a rule table.
///
/// Convenience wrapper: segments the identifier and delegates to
/// [`classify_segments`].
pub fn classify(raw: &str, table: &RuleTable) -> ClassifyResult<Classification> {
    classify_segments(&segment(raw), table)
}

/// Classify a segmented identifier against a rule table.
///
/// Rules are evaluated in table order and the first match is taken:
///
/// - structural match: the colon count must equal the rule's, and the slash
///   count too when the rule constrains it
/// - conditional match: when the rule carries a condition, the segment at the
///   condition position is compared with the rule's operator; a condition
///   position beyond the available segments means the rule simply does not
///   apply (soft no-match, not an error)
///
/// Extraction from the winning rule resolves each type part (literal, or
/// segment by index) joined with `:`, and joins the
/// `short_id_start..short_id_end` segment range with `/` (the range clamps to
/// the available segments). A type-part segment index that is out of range
/// for an identifier the rule already matched is a defect in the rule, not in
/// the data, and surfaces as [`ClassifyError::RuleConfig`].
///
/// If no rule matches, the empty [`Classification`] is returned.
pub fn classify_segments(
    segmented: &SegmentedIdentifier<'_>,
    table: &RuleTable,
) -> ClassifyResult<Classification> {
    for (index, rule) in table.iter().enumerate() {
        if !structural_match(segmented, rule) {
            continue;
        }

        if let Some(cond) = &rule.condition {
            match segmented.segments.get(cond.position) {
                Some(seg) => {
                    if !cond.op.evaluate(seg, &cond.value) {
                        continue;
                    }
                }
                // Identifier too short for this condition: rule doesn't apply.
                None => continue,
            }
        }

        return extract(segmented, rule, index);
    }

    Ok(Classification::default())
}

fn structural_match(segmented: &SegmentedIdentifier<'_>, rule: &ClassificationRule) -> bool {
    if segmented.colon_count != rule.colon_count {
        return false;
    }
    match rule.slash_count {
        Some(expected) => segmented.slash_count == expected,
        None => true,
    }
}

fn extract(
    segmented: &SegmentedIdentifier<'_>,
    rule: &ClassificationRule,
    index: usize,
) -> ClassifyResult<Classification> {
    let segments = &segmented.segments;

    let mut type_parts = Vec::with_capacity(rule.type_parts.len());
    for part in &rule.type_parts {
        match part {
            TypePart::Literal(s) => type_parts.push(s.as_str()),
            TypePart::Segment(i) => match segments.get(*i) {
                Some(seg) => type_parts.push(seg),
                None => {
                    return Err(ClassifyError::RuleConfig {
                        rule: index,
                        message: format!(
                            "type part references segment {i} but the matched identifier \
                             has only {} segments",
                            segments.len()
                        ),
                    });
                }
            },
        }
    }

    // Slice semantics: the short-id range clamps to the available segments,
    // so a start past the end yields an empty id rather than an error.
    let lo = rule.short_id_start.min(segments.len());
    let hi = rule.short_id_end.unwrap_or(segments.len()).clamp(lo, segments.len());

    Ok(Classification {
        resource_type: type_parts.join(":"),
        short_resource_id: segments[lo..hi].join("/"),
    })
}

#[cfg(test)]
mod tests {
    use super::{classify, Classification};
    use crate::classify::rule::RuleTable;
    use crate::error::ClassifyError;

    fn builtin() -> &'static RuleTable {
        RuleTable::builtin()
    }

    #[test]
    fn ecs_task_rule_extracts_cluster_name() {
        let c = classify(
            "arn:aws:ecs:us-east-1:123456789012:task/my-cluster/abc123",
            builtin(),
        )
        .unwrap();
        assert_eq!(c.resource_type, "ecs:task");
        assert_eq!(c.short_resource_id, "my-cluster");
    }

    #[test]
    fn sns_rule_matches_on_segment_five() {
        let c = classify("arn:aws:sns:us-east-1:123456789012:sns/my-topic", builtin()).unwrap();
        assert_eq!(c.resource_type, "sns:sns");
        assert_eq!(c.short_resource_id, "my-topic");
    }

    #[test]
    fn plain_topic_arn_falls_through_to_catch_all() {
        let c = classify("arn:aws:sns:us-east-1:123456789012:alerts", builtin()).unwrap();
        assert_eq!(c.resource_type, "sns:alerts");
        assert_eq!(c.short_resource_id, "us-east-1/123456789012/alerts");
    }

    #[test]
    fn s3_arn_keeps_empty_segments_in_short_id() {
        let c = classify("arn:aws:s3:::my-bucket", builtin()).unwrap();
        assert_eq!(c.resource_type, "s3:my-bucket");
        assert_eq!(c.short_resource_id, "//my-bucket");
    }

    #[test]
    fn six_colon_arn_uses_trailing_segments() {
        let c = classify(
            "arn:aws:lambda:us-east-1:123456789012:function:my-function",
            builtin(),
        )
        .unwrap();
        assert_eq!(c.resource_type, "lambda:function");
        assert_eq!(c.short_resource_id, "my-function");
    }

    #[test]
    fn unmatched_identifier_yields_empty_pair() {
        let c = classify("arn:aws:whatever", builtin()).unwrap();
        assert_eq!(c, Classification::default());
        assert!(!c.is_classified());
    }

    #[test]
    fn first_match_wins_over_later_rules() {
        // The ECS identifier also satisfies the 5-colon catch-all; the
        // earlier, more specific rule must be taken.
        let json = r#"[
            {"colon_count": 5, "slash_count": 2,
             "condition_position": 5, "condition_value": "task", "condition_operator": "==",
             "type_parts": ["first"], "short_id_start": 6, "short_id_end": 7},
            {"colon_count": 5, "type_parts": ["second"], "short_id_start": 3}
        ]"#;
        let table = RuleTable::from_json_str(json).unwrap();

        let c = classify(
            "arn:aws:ecs:us-east-1:123456789012:task/my-cluster/abc123",
            &table,
        )
        .unwrap();
        assert_eq!(c.resource_type, "first");
    }

    #[test]
    fn not_equals_condition_skips_matching_segment() {
        let json = r#"[
            {"colon_count": 5, "slash_count": 2,
             "condition_position": 5, "condition_value": "task", "condition_operator": "!=",
             "type_parts": ["not-a-task"], "short_id_start": 6}
        ]"#;
        let table = RuleTable::from_json_str(json).unwrap();

        let skipped = classify(
            "arn:aws:ecs:us-east-1:123456789012:task/my-cluster/abc123",
            &table,
        )
        .unwrap();
        assert!(!skipped.is_classified());

        let taken = classify(
            "arn:aws:ecs:us-east-1:123456789012:snapshot/my-cluster/abc123",
            &table,
        )
        .unwrap();
        assert_eq!(taken.resource_type, "not-a-task");
    }

    #[test]
    fn out_of_range_condition_position_is_soft_no_match() {
        let json = r#"[
            {"colon_count": 1,
             "condition_position": 9, "condition_value": "x", "condition_operator": "==",
             "type_parts": [0], "short_id_start": 1}
        ]"#;
        let table = RuleTable::from_json_str(json).unwrap();

        let c = classify("a:b", &table).unwrap();
        assert!(!c.is_classified());
    }

    #[test]
    fn out_of_range_type_part_on_winning_rule_is_a_config_error() {
        let json = r#"[
            {"colon_count": 1, "type_parts": [9], "short_id_start": 0}
        ]"#;
        let table = RuleTable::from_json_str(json).unwrap();

        let err = classify("a:b", &table).unwrap_err();
        match err {
            ClassifyError::RuleConfig { rule, message } => {
                assert_eq!(rule, 0);
                assert!(message.contains("segment 9"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn short_id_range_clamps_to_available_segments() {
        let json = r#"[
            {"colon_count": 1, "type_parts": [0], "short_id_start": 5}
        ]"#;
        let table = RuleTable::from_json_str(json).unwrap();

        let c = classify("a:b", &table).unwrap();
        assert_eq!(c.resource_type, "a");
        assert_eq!(c.short_resource_id, "");
    }

    #[test]
    fn literal_type_parts_join_with_segments() {
        let json = r#"[
            {"colon_count": 1, "type_parts": ["svc", 1], "short_id_start": 0, "short_id_end": 1}
        ]"#;
        let table = RuleTable::from_json_str(json).unwrap();

        let c = classify("a:b", &table).unwrap();
        assert_eq!(c.resource_type, "svc:b");
        assert_eq!(c.short_resource_id, "a");
    }
}
