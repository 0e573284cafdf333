//! Error handling for infraudit-store
//!
//! Store failures are classified through `AuditError` and surface as
//! `ExError`, so callers match on one taxonomy of kinds and codes.

use infraudit_core::errors::{AuditError, ExError, ExErrorKind};

/// Result type alias using ExError
pub type Result<T> = std::result::Result<T, ExError>;

/// Rule file is not a valid rule set
pub fn rule_set_invalid(reason: &str) -> ExError {
    AuditError::RuleSetParse {
        reason: reason.to_string(),
    }
    .into()
}

/// Inventory document has the wrong shape
pub fn inventory_invalid(reason: &str) -> ExError {
    AuditError::InventoryParse {
        reason: reason.to_string(),
    }
    .into()
}

/// No snapshot stored under this key
pub fn snapshot_missing(key: &str) -> ExError {
    AuditError::SnapshotNotFound {
        timestamp: key.to_string(),
    }
    .into()
}

/// A different snapshot is already stored under this key
pub fn snapshot_conflict(key: &str) -> ExError {
    AuditError::SnapshotExists {
        timestamp: key.to_string(),
    }
    .into()
}

/// Stored snapshot could not be decoded
pub fn snapshot_invalid(key: &str, reason: &str) -> ExError {
    AuditError::SnapshotInvalid {
        timestamp: key.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

/// Create an IO error
pub fn io_error(operation: &str, err: std::io::Error) -> ExError {
    ExError::new(ExErrorKind::Io)
        .with_op(operation.to_string())
        .with_message(err.to_string())
}

/// Create a serialization error
pub fn serialization_error(operation: &str, err: serde_json::Error) -> ExError {
    ExError::from(AuditError::from(err)).with_op(operation.to_string())
}
