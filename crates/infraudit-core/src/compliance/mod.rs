//! Compliance engine.
//!
//! Applies a [`RuleSet`](crate::rules::RuleSet) across an
//! [`Inventory`](crate::model::Inventory) and produces a [`ComplianceReport`].
//!
//! ## Entry point
//!
//! ```
//! use infraudit_core::compliance::ComplianceEngine;
//! use infraudit_core::diagnostics::NullSink;
//! use infraudit_core::model::Inventory;
//! use infraudit_core::rules::RuleSet;
//!
//! let engine = ComplianceEngine::new(&RuleSet::new()).unwrap();
//! let report = engine.check(&Inventory::new(), &NullSink);
//! assert_eq!(report.summary.total_resources, 0);
//! ```
//!
//! ## Guarantees
//!
//! - Resource types without rules (or with an empty rule mapping) are
//!   skipped and excluded from every summary count.
//! - Every checked resource is counted exactly once, as compliant or
//!   non-compliant.
//! - Violations keep rule file order; groups follow inventory type order
//!   then record order.
//! - Apart from the timestamp the report is a pure function of its inputs;
//!   [`ComplianceEngine::check_at`] pins the timestamp.

pub mod engine;
pub mod report;

pub use engine::ComplianceEngine;
pub use report::{ComplianceReport, ComplianceSummary, ResourceViolations, Violation};
