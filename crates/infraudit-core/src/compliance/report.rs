//! Compliance report model.
//!
//! The serialized form is the stable external shape:
//!
//! ```json
//! {
//!   "timestamp": "2024-01-01T00:00:00Z",
//!   "summary": { "total_resources": 2, "compliant": 1, "non_compliant": 1 },
//!   "violations": [
//!     {
//!       "resource_type": "s3",
//!       "resource_id": "logs",
//!       "violations": [
//!         { "rule": "encryption_enabled", "description": "...", "severity": "high" }
//!       ]
//!     }
//!   ]
//! }
//! ```

use crate::rules::Severity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One failed rule for one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub rule: String,
    pub description: String,
    pub severity: Severity,
}

/// All violations of a single non-compliant resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceViolations {
    pub resource_type: String,
    pub resource_id: String,
    pub violations: Vec<Violation>,
}

impl ResourceViolations {
    /// Highest severity among the violations
    pub fn max_severity(&self) -> Option<Severity> {
        self.violations.iter().map(|v| v.severity).max()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceSummary {
    pub total_resources: usize,
    pub compliant: usize,
    pub non_compliant: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub timestamp: DateTime<Utc>,
    pub summary: ComplianceSummary,
    pub violations: Vec<ResourceViolations>,
}

impl ComplianceReport {
    pub fn is_compliant(&self) -> bool {
        self.summary.non_compliant == 0
    }

    /// Total number of individual rule violations
    pub fn violation_count(&self) -> usize {
        self.violations.iter().map(|g| g.violations.len()).sum()
    }

    /// Violation groups for one resource type
    pub fn for_type<'a>(
        &'a self,
        resource_type: &'a str,
    ) -> impl Iterator<Item = &'a ResourceViolations> + 'a {
        self.violations
            .iter()
            .filter(move |g| g.resource_type == resource_type)
    }
}
