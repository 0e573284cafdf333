//! Rule evaluator: one condition against one record.
//!
//! ## Fail-open policy
//!
//! A condition that cannot be evaluated as written evaluates as compliant
//! and comes back as [`Outcome::FailOpen`] carrying the reason, so the
//! caller can surface it. This covers malformed conditions, unsupported
//! operators and type mismatches (`contains` on a scalar or absent value,
//! ordering operators on non-numbers).
//!
//! Fail-open can mask a real misconfiguration: a typo in an operator name
//! silently turns the rule into a no-op. The engines report every fail-open
//! evaluation as a warning diagnostic; the policy itself is unchanged.

use crate::model::{Record, Value};
use crate::resolver::{resolve, Resolved};
use crate::rules::{Check, Condition, Operator};
use std::fmt;

/// Result of evaluating a condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Pass,
    Fail,
    /// Could not evaluate; treated as compliant
    FailOpen(FailOpenReason),
}

impl Outcome {
    /// `true` = compliant, `false` = violation
    pub fn is_compliant(&self) -> bool {
        !matches!(self, Outcome::Fail)
    }

    fn from_bool(pass: bool) -> Self {
        if pass {
            Outcome::Pass
        } else {
            Outcome::Fail
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FailOpenReason {
    MalformedRule {
        reason: String,
    },
    TypeMismatch {
        operator: Operator,
        actual: &'static str,
        expected: &'static str,
    },
}

impl fmt::Display for FailOpenReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailOpenReason::MalformedRule { reason } => write!(f, "malformed rule: {}", reason),
            FailOpenReason::TypeMismatch {
                operator,
                actual,
                expected,
            } => write!(
                f,
                "cannot apply {} to {} field with {} expected value",
                operator, actual, expected
            ),
        }
    }
}

/// Evaluate a compiled check. Malformed checks fail open.
pub fn evaluate_check(record: &Record, check: &Check) -> Outcome {
    match check {
        Check::Condition(condition) => evaluate(record, condition),
        Check::Malformed { reason } => Outcome::FailOpen(FailOpenReason::MalformedRule {
            reason: reason.clone(),
        }),
    }
}

/// Evaluate a well-formed condition against a record.
pub fn evaluate(record: &Record, condition: &Condition) -> Outcome {
    let resolved = resolve(record, &condition.field);
    let expected = &condition.expected;

    match condition.operator {
        Operator::Equals => Outcome::from_bool(equals(resolved, expected)),
        Operator::NotEquals => Outcome::from_bool(!equals(resolved, expected)),
        Operator::Exists => Outcome::from_bool(resolved.is_present()),
        Operator::NotExists => Outcome::from_bool(resolved.is_absent()),
        Operator::Contains => match contains(resolved, expected) {
            Some(found) => Outcome::from_bool(found),
            None => mismatch(condition.operator, resolved, expected),
        },
        Operator::NotContains => match contains(resolved, expected) {
            Some(found) => Outcome::from_bool(!found),
            None => mismatch(condition.operator, resolved, expected),
        },
        Operator::GreaterThan => match numeric_pair(resolved, expected) {
            Some((actual, bound)) => Outcome::from_bool(actual > bound),
            None => mismatch(condition.operator, resolved, expected),
        },
        Operator::LessThan => match numeric_pair(resolved, expected) {
            Some((actual, bound)) => Outcome::from_bool(actual < bound),
            None => mismatch(condition.operator, resolved, expected),
        },
    }
}

/// Absent only equals an expected null (a rule that omitted `value`).
fn equals(resolved: Resolved<'_>, expected: &Value) -> bool {
    match resolved {
        Resolved::Present(actual) => actual == expected,
        Resolved::Absent => expected.is_null(),
    }
}

/// Membership test. `None` means the shapes are incompatible.
fn contains(resolved: Resolved<'_>, expected: &Value) -> Option<bool> {
    match resolved.value()? {
        Value::List(items) => Some(items.iter().any(|item| item == expected)),
        Value::Map(fields) => match expected {
            Value::String(key) => Some(fields.contains_key(key)),
            Value::List(_) | Value::Map(_) => None,
            _ => Some(false),
        },
        Value::String(haystack) => expected.as_str().map(|needle| haystack.contains(needle)),
        _ => None,
    }
}

fn numeric_pair(resolved: Resolved<'_>, expected: &Value) -> Option<(f64, f64)> {
    Some((resolved.value()?.as_f64()?, expected.as_f64()?))
}

fn mismatch(operator: Operator, resolved: Resolved<'_>, expected: &Value) -> Outcome {
    Outcome::FailOpen(FailOpenReason::TypeMismatch {
        operator,
        actual: resolved.value().map_or("absent", Value::type_name),
        expected: expected.type_name(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(v: serde_json::Value) -> Record {
        Record::try_from(v).unwrap()
    }

    fn cond(field: &str, op: Operator, value: serde_json::Value) -> Condition {
        Condition::new(field, op, Value::from(value))
    }

    #[test]
    fn test_equals_and_not_equals() {
        let r = record(json!({"field": "value"}));
        assert_eq!(evaluate(&r, &cond("field", Operator::Equals, json!("value"))), Outcome::Pass);
        assert_eq!(evaluate(&r, &cond("field", Operator::Equals, json!("wrong"))), Outcome::Fail);
        assert_eq!(
            evaluate(&r, &cond("field", Operator::NotEquals, json!("wrong"))),
            Outcome::Pass
        );
    }

    #[test]
    fn test_equals_absent_field() {
        let r = record(json!({"a": {"b": {}}}));
        assert_eq!(evaluate(&r, &cond("a.b.c", Operator::Equals, json!(5))), Outcome::Fail);
        assert_eq!(evaluate(&r, &cond("a.b.c", Operator::NotEquals, json!(5))), Outcome::Pass);
        assert_eq!(
            evaluate(&r, &Condition::unary("a.b.c", Operator::Equals)),
            Outcome::Pass
        );
    }

    #[test]
    fn test_equals_nested_number() {
        let r = record(json!({"a": {"b": {"c": 5}}}));
        assert_eq!(evaluate(&r, &cond("a.b.c", Operator::Equals, json!(5))), Outcome::Pass);
        assert_eq!(evaluate(&r, &cond("a.b.c", Operator::Equals, json!("5"))), Outcome::Fail);
    }

    #[test]
    fn test_exists_and_not_exists() {
        let r = record(json!({"field": "value", "nothing": null}));
        assert!(evaluate(&r, &Condition::unary("field", Operator::Exists)).is_compliant());
        assert_eq!(
            evaluate(&r, &Condition::unary("other", Operator::Exists)),
            Outcome::Fail
        );
        assert_eq!(
            evaluate(&r, &Condition::unary("nothing", Operator::Exists)),
            Outcome::Fail
        );
        assert_eq!(
            evaluate(&r, &Condition::unary("nothing", Operator::NotExists)),
            Outcome::Pass
        );
    }

    #[test]
    fn test_contains_list_map_and_string() {
        let r = record(json!({
            "ports": [22, 443],
            "tags": {"owner": "ops"},
            "policy": "s3:GetObject,s3:PutObject"
        }));
        assert_eq!(evaluate(&r, &cond("ports", Operator::Contains, json!(443))), Outcome::Pass);
        assert_eq!(evaluate(&r, &cond("ports", Operator::NotContains, json!(22))), Outcome::Fail);
        assert_eq!(evaluate(&r, &cond("tags", Operator::Contains, json!("owner"))), Outcome::Pass);
        assert_eq!(evaluate(&r, &cond("tags", Operator::Contains, json!("ops"))), Outcome::Fail);
        assert_eq!(evaluate(&r, &cond("tags", Operator::Contains, json!(1))), Outcome::Fail);
        assert_eq!(
            evaluate(&r, &cond("policy", Operator::Contains, json!("PutObject"))),
            Outcome::Pass
        );
        assert_eq!(
            evaluate(&r, &cond("policy", Operator::NotContains, json!("Delete"))),
            Outcome::Pass
        );
    }

    #[test]
    fn test_contains_type_mismatch_fails_open() {
        let r = record(json!({"count": 3, "name": "x", "tags": {"a": 1}}));
        for c in [
            cond("count", Operator::Contains, json!(3)),
            cond("missing", Operator::Contains, json!("x")),
            cond("missing", Operator::NotContains, json!("x")),
            cond("name", Operator::Contains, json!(1)),
            cond("tags", Operator::Contains, json!(["a"])),
        ] {
            let outcome = evaluate(&r, &c);
            assert!(
                matches!(outcome, Outcome::FailOpen(FailOpenReason::TypeMismatch { .. })),
                "{:?} -> {:?}",
                c,
                outcome
            );
            assert!(outcome.is_compliant());
        }
    }

    #[test]
    fn test_numeric_comparisons() {
        let r = record(json!({"size": 100, "ratio": 0.5}));
        assert_eq!(
            evaluate(&r, &cond("size", Operator::GreaterThan, json!(50))),
            Outcome::Pass
        );
        assert_eq!(
            evaluate(&r, &cond("size", Operator::GreaterThan, json!(100))),
            Outcome::Fail
        );
        assert_eq!(evaluate(&r, &cond("ratio", Operator::LessThan, json!(1))), Outcome::Pass);
        assert_eq!(
            evaluate(&r, &cond("ratio", Operator::LessThan, json!(0.25))),
            Outcome::Fail
        );
    }

    #[test]
    fn test_numeric_comparison_type_mismatch_fails_open() {
        let r = record(json!({"size": "big", "flag": true, "n": 3}));
        for c in [
            cond("size", Operator::GreaterThan, json!(1)),
            cond("flag", Operator::LessThan, json!(2)),
            cond("n", Operator::GreaterThan, json!("2")),
            cond("absent", Operator::LessThan, json!(2)),
        ] {
            assert!(matches!(
                evaluate(&r, &c),
                Outcome::FailOpen(FailOpenReason::TypeMismatch { .. })
            ));
        }
    }

    #[test]
    fn test_mismatch_reason_describes_shapes() {
        let r = record(json!({"size": "big"}));
        let outcome = evaluate(&r, &cond("size", Operator::GreaterThan, json!(1)));
        let Outcome::FailOpen(reason) = outcome else {
            panic!("expected fail-open");
        };
        assert_eq!(
            reason.to_string(),
            "cannot apply greater_than to string field with number expected value"
        );
    }

    #[test]
    fn test_malformed_check_fails_open() {
        let r = record(json!({}));
        let outcome = evaluate_check(
            &r,
            &Check::Malformed {
                reason: "condition has no operator".to_string(),
            },
        );
        assert!(outcome.is_compliant());
        assert!(matches!(
            outcome,
            Outcome::FailOpen(FailOpenReason::MalformedRule { .. })
        ));
    }
}
