//! Filesystem snapshot store

#![allow(clippy::result_large_err)]

use crate::atomic::atomic_write;
use crate::errors::{
    io_error, serialization_error, snapshot_conflict, snapshot_invalid, snapshot_missing, Result,
};
use crate::snapshot::key::{file_name, snapshot_key, timestamp_from_file_name};
use crate::snapshot::SnapshotStore;
use chrono::{DateTime, Utc};
use infraudit_core::model::Snapshot;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// One pretty-printed JSON file per snapshot under `root`.
#[derive(Debug, Clone)]
pub struct FsSnapshotStore {
    root: PathBuf,
}

impl FsSnapshotStore {
    /// The directory is created lazily on first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File that holds (or would hold) the snapshot for `timestamp`
    pub fn path_for(&self, timestamp: DateTime<Utc>) -> PathBuf {
        self.root.join(file_name(timestamp))
    }

    fn compute_digest(content: &[u8]) -> String {
        hex::encode(Sha256::digest(content))
    }
}

impl SnapshotStore for FsSnapshotStore {
    fn save(&self, snapshot: &Snapshot) -> Result<String> {
        let content =
            serde_json::to_vec_pretty(snapshot).map_err(|e| serialization_error("save_snapshot", e))?;
        let digest = Self::compute_digest(&content);
        let path = self.path_for(snapshot.timestamp);

        match fs::read(&path) {
            Ok(existing) if existing == content => return Ok(digest),
            Ok(_) => return Err(snapshot_conflict(&snapshot_key(snapshot.timestamp))),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(io_error("read_snapshot", e)),
        }

        atomic_write(&path, &content)?;
        Ok(digest)
    }

    fn load(&self, timestamp: DateTime<Utc>) -> Result<Snapshot> {
        let key = snapshot_key(timestamp);
        let content = match fs::read(self.path_for(timestamp)) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(snapshot_missing(&key)),
            Err(e) => return Err(io_error("read_snapshot", e)),
        };

        serde_json::from_slice(&content).map_err(|e| snapshot_invalid(&key, &e.to_string()))
    }

    fn list(&self) -> Result<Vec<DateTime<Utc>>> {
        let entries = match fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(io_error("list_snapshots", e)),
        };

        let mut timestamps = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| io_error("list_snapshots", e))?;
            if let Some(ts) = entry.file_name().to_str().and_then(timestamp_from_file_name) {
                timestamps.push(ts);
            }
        }
        timestamps.sort();
        Ok(timestamps)
    }
}
