//! Snapshot persistence and change tracking.
//!
//! Snapshots are stored one file per capture, keyed by their timestamp:
//!
//! ```text
//! <root>/snapshot_20240101T120000.000000Z.json
//! ```
//!
//! The key has microsecond precision and sorts lexicographically in time
//! order, so listing a directory yields snapshots oldest first.

mod fs_store;
mod key;
mod tracker;

pub use fs_store::FsSnapshotStore;
pub use key::{parse_timestamp, snapshot_key};
pub use tracker::{ChangeTracker, SavedSnapshot};

use crate::errors::Result;
use chrono::{DateTime, Utc};
use infraudit_core::model::Snapshot;

/// Storage backend for snapshots.
pub trait SnapshotStore {
    /// Persist `snapshot` and return the SHA-256 digest of its stored form.
    ///
    /// Saving an identical snapshot twice is a no-op; saving a different
    /// snapshot under an existing timestamp is `AlreadyExists`.
    fn save(&self, snapshot: &Snapshot) -> Result<String>;

    /// Load the snapshot stored for `timestamp` (`NotFound` if none).
    fn load(&self, timestamp: DateTime<Utc>) -> Result<Snapshot>;

    /// Timestamps of every stored snapshot, oldest first.
    fn list(&self) -> Result<Vec<DateTime<Utc>>>;

    /// Most recent snapshot, if any.
    fn latest(&self) -> Result<Option<Snapshot>> {
        match self.list()?.last() {
            Some(timestamp) => self.load(*timestamp).map(Some),
            None => Ok(None),
        }
    }
}
