//! Snapshot differ.
//!
//! Compares two inventories and classifies every resource as added,
//! removed or modified.
//!
//! ## Entry point
//!
//! ```
//! use infraudit_core::diff::diff;
//! use infraudit_core::model::{Inventory, Record};
//!
//! let old = Inventory::new().with("ec2", vec![Record::new().with("id", "i-1")]);
//! let new = Inventory::new();
//! let changes = diff(&old, &new);
//! assert_eq!(changes.len(), 1);
//! ```
//!
//! ## Guarantees
//!
//! - Neither input is mutated.
//! - Records that are structurally equal produce no change record, so
//!   `diff(s, s)` is empty.
//! - Output is sorted by (resource type, resource identifier), so identical
//!   inputs always produce identical output.
//! - Within one type, records sharing an identifier collapse to the last one
//!   and a `DuplicateIdentifier` warning is emitted.

pub mod engine;
pub mod model;

pub use engine::{diff, diff_snapshots, SnapshotDiffer};
pub use model::{Change, ChangeCounts, ChangeKind, ChangeRecord};
