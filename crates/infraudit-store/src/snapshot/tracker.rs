//! Change tracking over stored snapshots.
//!
//! ## Logging
//!
//! - `log_op_start!` / `log_op_end!` around each public operation
//! - `log_op_error!` with the structured error code on failure

#![allow(clippy::result_large_err)]

use crate::errors::{snapshot_missing, Result};
use crate::snapshot::key::snapshot_key;
use crate::snapshot::SnapshotStore;
use chrono::{DateTime, SubsecRound, Utc};
use infraudit_core::diagnostics::DiagnosticsSink;
use infraudit_core::diff::{diff_snapshots, ChangeRecord};
use infraudit_core::model::{Inventory, Snapshot};
use infraudit_core::{log_op_end, log_op_error, log_op_start};
use std::time::Instant;

/// Result of persisting a snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedSnapshot {
    pub timestamp: DateTime<Utc>,
    pub digest: String,
}

/// Saves inventories as snapshots and reports changes between them.
pub struct ChangeTracker<S: SnapshotStore> {
    store: S,
}

impl<S: SnapshotStore> ChangeTracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Store `inventory` as a snapshot taken now.
    ///
    /// The timestamp is truncated to the microsecond precision of the
    /// storage key, so the returned timestamp loads the snapshot back.
    pub fn save_snapshot(&self, inventory: Inventory) -> Result<SavedSnapshot> {
        self.save_snapshot_at(inventory, Utc::now().trunc_subsecs(6))
    }

    /// Store `inventory` as a snapshot taken at `timestamp`.
    pub fn save_snapshot_at(
        &self,
        inventory: Inventory,
        timestamp: DateTime<Utc>,
    ) -> Result<SavedSnapshot> {
        let resource_count = inventory.total_resources() as u64;
        log_op_start!("snapshot_save", resource_count = resource_count);
        let start = Instant::now();

        let snapshot = Snapshot::new(timestamp, inventory);
        let digest = self.store.save(&snapshot).map_err(|e| {
            log_op_error!(
                "snapshot_save",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

        log_op_end!(
            "snapshot_save",
            duration_ms = start.elapsed().as_millis() as u64,
            snapshot = %snapshot_key(timestamp)
        );

        Ok(SavedSnapshot { timestamp, digest })
    }

    /// Changes between the snapshot at `start_time` and the one at
    /// `end_time`, or the latest stored snapshot when `end_time` is `None`.
    pub fn get_changes(
        &self,
        start_time: DateTime<Utc>,
        end_time: Option<DateTime<Utc>>,
        sink: &dyn DiagnosticsSink,
    ) -> Result<Vec<ChangeRecord>> {
        log_op_start!("snapshot_changes", since = %snapshot_key(start_time));
        let start = Instant::now();

        let changes = self.changes_impl(start_time, end_time, sink).map_err(|e| {
            log_op_error!(
                "snapshot_changes",
                e.clone(),
                duration_ms = start.elapsed().as_millis() as u64
            );
            e
        })?;

        log_op_end!(
            "snapshot_changes",
            duration_ms = start.elapsed().as_millis() as u64,
            change_count = changes.len() as u64
        );

        Ok(changes)
    }

    fn changes_impl(
        &self,
        start_time: DateTime<Utc>,
        end_time: Option<DateTime<Utc>>,
        sink: &dyn DiagnosticsSink,
    ) -> Result<Vec<ChangeRecord>> {
        let old = self.store.load(start_time)?;
        let new = match end_time {
            Some(end_time) => self.store.load(end_time)?,
            None => self
                .store
                .latest()?
                .ok_or_else(|| snapshot_missing("latest"))?,
        };
        Ok(diff_snapshots(&old, &new, sink))
    }
}
