//! Correlation types for tracking audit runs
//!
//! Every compliance check or snapshot diff driven by a collaborator can be
//! tagged with a `RunId` so that log events and diagnostics emitted during
//! the run can be joined afterwards.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a single audit run (one check or one diff)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(String);

impl RunId {
    /// Generate a new RunId using UUIDv7 (time-ordered)
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (for deserialization)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Context carried alongside a run: its id and an optional human label
/// (e.g. the rules file or snapshot pair being processed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    pub run_id: RunId,
    pub label: Option<String>,
}

impl RunContext {
    /// Create a context with a freshly generated RunId
    pub fn new() -> Self {
        Self {
            run_id: RunId::new(),
            label: None,
        }
    }

    /// Attach a label to the context
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_id_generation() {
        let id1 = RunId::new();
        let id2 = RunId::new();

        assert_ne!(id1, id2);
        assert!(!id1.as_str().is_empty());
    }

    #[test]
    fn test_run_id_display() {
        let id = RunId::new();
        assert_eq!(format!("{}", id), id.as_str());
    }

    #[test]
    fn test_run_id_serde_transparent_string() {
        let id = RunId::from_string("run-1".to_string());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"run-1\"");
    }

    #[test]
    fn test_run_context_with_label() {
        let ctx = RunContext::new().with_label("rules.yaml");
        assert_eq!(ctx.label.as_deref(), Some("rules.yaml"));
        assert!(!ctx.run_id.as_str().is_empty());
    }
}
