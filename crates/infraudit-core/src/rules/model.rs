use crate::errors::AuditError;
use crate::model::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rule severity. Rules without an explicit severity default to `Medium`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Medium
    }
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Severity::Low),
            "medium" => Ok(Severity::Medium),
            "high" => Ok(Severity::High),
            _ => Err(s.to_string()),
        }
    }
}

/// Comparison operator of a condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Equals,
    NotEquals,
    Exists,
    NotExists,
    Contains,
    NotContains,
    GreaterThan,
    LessThan,
}

impl Operator {
    pub const ALL: [Operator; 8] = [
        Operator::Equals,
        Operator::NotEquals,
        Operator::Exists,
        Operator::NotExists,
        Operator::Contains,
        Operator::NotContains,
        Operator::GreaterThan,
        Operator::LessThan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equals => "equals",
            Operator::NotEquals => "not_equals",
            Operator::Exists => "exists",
            Operator::NotExists => "not_exists",
            Operator::Contains => "contains",
            Operator::NotContains => "not_contains",
            Operator::GreaterThan => "greater_than",
            Operator::LessThan => "less_than",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .iter()
            .find(|op| op.as_str() == s)
            .copied()
            .ok_or_else(|| s.to_string())
    }
}

/// A well-formed condition: (field path, operator, expected value).
///
/// `expected` is `Value::Null` when the rule omits `value`, which is what
/// `exists`/`not_exists` rules normally do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub operator: Operator,
    #[serde(default = "null_value", rename = "value")]
    pub expected: Value,
}

fn null_value() -> Value {
    Value::Null
}

impl Condition {
    pub fn new(field: impl Into<String>, operator: Operator, expected: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            operator,
            expected: expected.into(),
        }
    }

    /// Condition with no expected value (for `exists` / `not_exists`)
    pub fn unary(field: impl Into<String>, operator: Operator) -> Self {
        Self {
            field: field.into(),
            operator,
            expected: Value::Null,
        }
    }
}

/// What a compiled rule evaluates.
#[derive(Debug, Clone, PartialEq)]
pub enum Check {
    /// A well-formed condition
    Condition(Condition),
    /// The rule's condition could not be interpreted; evaluates fail-open
    Malformed { reason: String },
}

/// A compiled rule scoped to one resource type.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub name: String,
    pub resource_type: String,
    pub description: String,
    pub severity: Severity,
    pub check: Check,
}

impl Rule {
    /// Interpret one raw rule body.
    ///
    /// # Errors
    ///
    /// Returns `AuditError::UnknownSeverity` when `severity` is present but is
    /// not one of low/medium/high. Every other structural problem compiles to
    /// [`Check::Malformed`].
    pub fn from_body(resource_type: &str, name: &str, body: &Value) -> Result<Self, AuditError> {
        let Some(fields) = body.as_map() else {
            return Ok(Self {
                name: name.to_string(),
                resource_type: resource_type.to_string(),
                description: String::new(),
                severity: Severity::default(),
                check: Check::Malformed {
                    reason: format!("rule body must be a mapping, got {}", body.type_name()),
                },
            });
        };

        let severity = match fields.get("severity") {
            None | Some(Value::Null) => Severity::default(),
            Some(Value::String(s)) => {
                s.parse::<Severity>()
                    .map_err(|severity| AuditError::UnknownSeverity {
                        resource_type: resource_type.to_string(),
                        rule: name.to_string(),
                        severity,
                    })?
            }
            Some(other) => {
                return Err(AuditError::UnknownSeverity {
                    resource_type: resource_type.to_string(),
                    rule: name.to_string(),
                    severity: other.to_canonical_string(),
                })
            }
        };

        let description = match fields.get("description") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_canonical_string(),
        };

        Ok(Self {
            name: name.to_string(),
            resource_type: resource_type.to_string(),
            description,
            severity,
            check: compile_check(fields.get("condition")),
        })
    }
}

fn compile_check(condition: Option<&Value>) -> Check {
    let malformed = |reason: String| Check::Malformed { reason };

    let Some(fields) = condition.and_then(Value::as_map) else {
        return malformed("condition is missing or is not a mapping".to_string());
    };

    let field = match fields.get("field") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        _ => return malformed("condition has no field".to_string()),
    };
    let operator = match fields.get("operator") {
        Some(Value::String(s)) if !s.is_empty() => s,
        _ => return malformed("condition has no operator".to_string()),
    };
    let operator = match operator.parse::<Operator>() {
        Ok(op) => op,
        Err(op) => return malformed(format!("unsupported operator: {}", op)),
    };

    Check::Condition(Condition {
        field,
        operator,
        expected: fields.get("value").cloned().unwrap_or(Value::Null),
    })
}
