//! Compliance evaluation over an inventory.

use crate::compliance::report::{
    ComplianceReport, ComplianceSummary, ResourceViolations, Violation,
};
use crate::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticsSink};
use crate::errors::AuditError;
use crate::evaluator::{evaluate_check, FailOpenReason, Outcome};
use crate::identity::report_identifier;
use crate::model::{Inventory, Record};
use crate::rules::{Check, CompiledRules, Rule, RuleSet};
use chrono::{DateTime, Utc};

const OP_CHECK: &str = "check";

/// Rule set compiled into a per-type dispatch table.
///
/// Construction is the only fallible step. Once built, an engine is
/// immutable and can be shared across threads to check many inventories.
#[derive(Debug, Clone)]
pub struct ComplianceEngine {
    rules: CompiledRules,
}

impl ComplianceEngine {
    /// Compile `rule_set` once.
    ///
    /// # Errors
    ///
    /// Returns `AuditError::UnknownSeverity` if any rule declares a severity
    /// other than low/medium/high.
    pub fn new(rule_set: &RuleSet) -> Result<Self, AuditError> {
        Ok(Self {
            rules: rule_set.compile()?,
        })
    }

    pub fn rules(&self) -> &CompiledRules {
        &self.rules
    }

    /// Check `inventory`, stamping the report with the current time.
    pub fn check(&self, inventory: &Inventory, sink: &dyn DiagnosticsSink) -> ComplianceReport {
        self.check_at(inventory, Utc::now(), sink)
    }

    /// Check `inventory` with a caller-supplied timestamp.
    pub fn check_at(
        &self,
        inventory: &Inventory,
        timestamp: DateTime<Utc>,
        sink: &dyn DiagnosticsSink,
    ) -> ComplianceReport {
        let mut summary = ComplianceSummary::default();
        let mut violations = Vec::new();

        for resource_type in self.rules.resource_types() {
            if !inventory.contains_type(resource_type)
                && !self.rules.for_type(resource_type).is_empty()
            {
                sink.emit(
                    Diagnostic::info(
                        OP_CHECK,
                        DiagnosticCode::TypeNotInInventory,
                        "resource type has rules but no resources in the inventory",
                    )
                    .with_resource_type(resource_type),
                );
            }
        }

        for (resource_type, records) in inventory.iter() {
            let rules = self.rules.for_type(resource_type);
            if rules.is_empty() {
                continue;
            }
            report_malformed(rules, sink);

            summary.total_resources += records.len();
            for record in records {
                match check_resource(resource_type, record, rules, sink) {
                    Some(group) => {
                        summary.non_compliant += 1;
                        violations.push(group);
                    }
                    None => summary.compliant += 1,
                }
            }
        }

        ComplianceReport {
            timestamp,
            summary,
            violations,
        }
    }
}

/// Malformed rules are reported once per check, not once per resource.
fn report_malformed(rules: &[Rule], sink: &dyn DiagnosticsSink) {
    for rule in rules {
        if let Check::Malformed { reason } = &rule.check {
            sink.emit(
                Diagnostic::warning(
                    OP_CHECK,
                    DiagnosticCode::MalformedRule,
                    format!("rule evaluates as compliant: {}", reason),
                )
                .with_resource_type(&rule.resource_type)
                .with_rule(&rule.name),
            );
        }
    }
}

/// Run every rule against one record. `None` means compliant.
fn check_resource(
    resource_type: &str,
    record: &Record,
    rules: &[Rule],
    sink: &dyn DiagnosticsSink,
) -> Option<ResourceViolations> {
    let mut failed = Vec::new();

    for rule in rules {
        match evaluate_check(record, &rule.check) {
            Outcome::Pass => {}
            Outcome::Fail => failed.push(Violation {
                rule: rule.name.clone(),
                description: rule.description.clone(),
                severity: rule.severity,
            }),
            Outcome::FailOpen(FailOpenReason::MalformedRule { .. }) => {}
            Outcome::FailOpen(reason @ FailOpenReason::TypeMismatch { .. }) => sink.emit(
                Diagnostic::warning(
                    OP_CHECK,
                    DiagnosticCode::TypeMismatch,
                    format!("rule evaluates as compliant: {}", reason),
                )
                .with_resource_type(resource_type)
                .with_resource_id(report_identifier(record))
                .with_rule(&rule.name),
            ),
        }
    }

    if failed.is_empty() {
        None
    } else {
        Some(ResourceViolations {
            resource_type: resource_type.to_string(),
            resource_id: report_identifier(record),
            violations: failed,
        })
    }
}
