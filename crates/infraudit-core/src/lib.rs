//! infraudit core - rule evaluation and snapshot diffing for cloud inventories
//!
//! This crate provides the pure, in-memory kernel of infraudit:
//! - A tagged value model for schema-less resource records
//! - Dotted-path field resolution with explicit absence
//! - Declarative compliance rules and a fail-open rule evaluator
//! - A compliance engine producing structured reports
//! - Stable resource identity and an inventory differ
//!
//! Nothing here performs I/O. Loading rule files, persisting snapshots and
//! rendering reports live in `infraudit-store` and `infraudit-cli`.

pub mod compliance;
pub mod diagnostics;
pub mod diff;
pub mod errors;
pub mod evaluator;
pub mod identity;
pub mod logging_facility;
pub mod model;
pub mod resolver;
pub mod rules;

#[doc(hidden)]
pub use infraudit_core_types;

// Re-export commonly used types
pub use compliance::{ComplianceEngine, ComplianceReport};
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticsSink, NullSink, TracingSink};
pub use diff::{diff, ChangeRecord, SnapshotDiffer};
pub use errors::{AuditError, ExError, ExErrorKind, Result};
pub use evaluator::{evaluate, Outcome};
pub use identity::{identify, report_identifier};
pub use model::{Inventory, Record, Snapshot, Value};
pub use resolver::{resolve, Resolved};
pub use rules::RuleSet;
