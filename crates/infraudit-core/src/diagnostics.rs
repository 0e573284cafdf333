//! Caller-supplied diagnostics sink.
//!
//! The engines never log through process-wide state. Anything a caller
//! should know about a run that is not part of its result (a rule that
//! could not be evaluated as written, a duplicate resource identifier) is
//! handed to a [`DiagnosticsSink`] passed in by the caller.
//!
//! - [`TracingSink`] forwards diagnostics into the logging facility
//! - [`CollectingSink`] keeps them in memory for assertions or annotation
//! - [`NullSink`] drops them

use infraudit_core_types::schema::EVENT_DIAGNOSTIC;
use infraudit_core_types::{RunContext, RunId};
use serde::Serialize;
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    Info,
    Warning,
}

/// Stable classification of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticCode {
    /// Rule condition missing field/operator, not a mapping, or unsupported operator
    MalformedRule,
    /// Operator applied to a value of an incompatible shape
    TypeMismatch,
    /// Two records of the same type share an identifier; the later one wins
    DuplicateIdentifier,
    /// Resource type has rules but no resources in the inventory
    TypeNotInInventory,
}

impl DiagnosticCode {
    pub fn code(&self) -> &'static str {
        match self {
            DiagnosticCode::MalformedRule => "DIAG_MALFORMED_RULE",
            DiagnosticCode::TypeMismatch => "DIAG_TYPE_MISMATCH",
            DiagnosticCode::DuplicateIdentifier => "DIAG_DUPLICATE_IDENTIFIER",
            DiagnosticCode::TypeNotInInventory => "DIAG_TYPE_NOT_IN_INVENTORY",
        }
    }
}

/// A single structured diagnostic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub level: DiagnosticLevel,
    pub code: DiagnosticCode,
    /// Operation that produced it ("check", "diff")
    pub op: &'static str,
    pub resource_type: Option<String>,
    pub resource_id: Option<String>,
    pub rule: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn warning(op: &'static str, code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Warning,
            code,
            op,
            resource_type: None,
            resource_id: None,
            rule: None,
            message: message.into(),
        }
    }

    pub fn info(op: &'static str, code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            level: DiagnosticLevel::Info,
            ..Self::warning(op, code, message)
        }
    }

    pub fn with_resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = Some(resource_type.into());
        self
    }

    pub fn with_resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rule = Some(rule.into());
        self
    }
}

/// Receiver for diagnostics emitted by the engines.
///
/// Sinks must be shareable across threads: callers may fan out checks and
/// diffs over independent inventories with one sink.
pub trait DiagnosticsSink: Send + Sync {
    fn emit(&self, diagnostic: Diagnostic);
}

/// Sink that drops every diagnostic
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticsSink for NullSink {
    fn emit(&self, _diagnostic: Diagnostic) {}
}

/// Sink that records diagnostics in memory
#[derive(Debug, Default)]
pub struct CollectingSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics
            .lock()
            .map(|d| d.clone())
            .unwrap_or_default()
    }

    pub fn count(&self, code: DiagnosticCode) -> usize {
        self.diagnostics().iter().filter(|d| d.code == code).count()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics().is_empty()
    }
}

impl DiagnosticsSink for CollectingSink {
    fn emit(&self, diagnostic: Diagnostic) {
        self.diagnostics
            .lock()
            .map(|mut d| d.push(diagnostic))
            .ok();
    }
}

/// Sink that forwards diagnostics to `tracing`, tagged with a run id and
/// optional run label.
#[derive(Debug, Clone, Default)]
pub struct TracingSink {
    run_id: Option<RunId>,
    run_label: Option<String>,
}

impl TracingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_run_id(run_id: RunId) -> Self {
        Self {
            run_id: Some(run_id),
            run_label: None,
        }
    }

    pub fn for_run(ctx: &RunContext) -> Self {
        Self {
            run_id: Some(ctx.run_id.clone()),
            run_label: ctx.label.clone(),
        }
    }
}

impl DiagnosticsSink for TracingSink {
    fn emit(&self, d: Diagnostic) {
        let run_id = self.run_id.as_ref().map(RunId::as_str).unwrap_or("");
        let run_label = self.run_label.as_deref().unwrap_or("");
        let resource_type = d.resource_type.as_deref().unwrap_or("");
        let resource_id = d.resource_id.as_deref().unwrap_or("");
        let rule = d.rule.as_deref().unwrap_or("");
        match d.level {
            DiagnosticLevel::Warning => tracing::warn!(
                component = module_path!(),
                op = d.op,
                event = EVENT_DIAGNOSTIC,
                run_id,
                run_label,
                diag.code = d.code.code(),
                resource_type,
                resource_id,
                rule,
                "{}",
                d.message
            ),
            DiagnosticLevel::Info => tracing::info!(
                component = module_path!(),
                op = d.op,
                event = EVENT_DIAGNOSTIC,
                run_id,
                run_label,
                diag.code = d.code.code(),
                resource_type,
                resource_id,
                rule,
                "{}",
                d.message
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collecting_sink_records_in_order() {
        let sink = CollectingSink::new();
        sink.emit(Diagnostic::warning("check", DiagnosticCode::MalformedRule, "a"));
        sink.emit(Diagnostic::info("diff", DiagnosticCode::DuplicateIdentifier, "b"));

        let diags = sink.diagnostics();
        assert_eq!(diags.len(), 2);
        assert_eq!(diags[0].message, "a");
        assert_eq!(diags[1].level, DiagnosticLevel::Info);
        assert_eq!(sink.count(DiagnosticCode::MalformedRule), 1);
    }

    #[test]
    fn test_builder_attaches_context() {
        let d = Diagnostic::warning("check", DiagnosticCode::TypeMismatch, "x")
            .with_resource_type("s3")
            .with_resource_id("b1")
            .with_rule("r1");
        assert_eq!(d.resource_type.as_deref(), Some("s3"));
        assert_eq!(d.resource_id.as_deref(), Some("b1"));
        assert_eq!(d.rule.as_deref(), Some("r1"));
    }

    #[test]
    fn test_codes_are_distinct() {
        let codes = [
            DiagnosticCode::MalformedRule,
            DiagnosticCode::TypeMismatch,
            DiagnosticCode::DuplicateIdentifier,
            DiagnosticCode::TypeNotInInventory,
        ];
        let set: std::collections::HashSet<&str> = codes.iter().map(|c| c.code()).collect();
        assert_eq!(set.len(), codes.len());
    }
}
