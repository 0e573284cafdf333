//! infraudit store - file-backed collaborators of the audit core
//!
//! Provides:
//! - YAML rule-set and JSON inventory loading with configuration validation
//! - Atomic file writes
//! - A filesystem snapshot store and a change tracker over stored snapshots

pub mod errors;
pub mod atomic;
pub mod loader;
pub mod snapshot;

// Re-export key types
pub use errors::Result;
pub use loader::{load_inventory, load_rule_set, parse_inventory_str, parse_rule_set_str};
pub use snapshot::{ChangeTracker, FsSnapshotStore, SnapshotStore};
