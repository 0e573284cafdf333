//! Change list types.
//!
//! A change record serializes flat, with the change kind under `type`:
//!
//! ```json
//! {"type": "modified", "resource_type": "ec2", "resource_id": "i-1", "old": {..}, "new": {..}}
//! {"type": "added", "resource_type": "ec2", "resource_id": "i-2", "details": {..}}
//! ```

use crate::model::Record;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Removed,
    Modified,
}

impl ChangeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeKind::Added => "added",
            ChangeKind::Removed => "removed",
            ChangeKind::Modified => "modified",
        }
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened to a resource between two inventories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Change {
    /// Present only in the newer inventory
    Added { details: Record },
    /// Present only in the older inventory
    Removed { details: Record },
    /// Present in both with differing content
    Modified { old: Record, new: Record },
}

impl Change {
    pub fn kind(&self) -> ChangeKind {
        match self {
            Change::Added { .. } => ChangeKind::Added,
            Change::Removed { .. } => ChangeKind::Removed,
            Change::Modified { .. } => ChangeKind::Modified,
        }
    }

    /// The same change seen from the other direction
    pub fn inverted(&self) -> Change {
        match self {
            Change::Added { details } => Change::Removed {
                details: details.clone(),
            },
            Change::Removed { details } => Change::Added {
                details: details.clone(),
            },
            Change::Modified { old, new } => Change::Modified {
                old: new.clone(),
                new: old.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub resource_type: String,
    pub resource_id: String,
    #[serde(flatten)]
    pub change: Change,
}

impl ChangeRecord {
    pub fn kind(&self) -> ChangeKind {
        self.change.kind()
    }

    pub fn inverted(&self) -> ChangeRecord {
        ChangeRecord {
            resource_type: self.resource_type.clone(),
            resource_id: self.resource_id.clone(),
            change: self.change.inverted(),
        }
    }
}

/// Per-kind tallies of a change list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeCounts {
    pub added: usize,
    pub removed: usize,
    pub modified: usize,
}

impl ChangeCounts {
    pub fn from_changes(changes: &[ChangeRecord]) -> Self {
        changes.iter().fold(Self::default(), |mut counts, c| {
            match c.kind() {
                ChangeKind::Added => counts.added += 1,
                ChangeKind::Removed => counts.removed += 1,
                ChangeKind::Modified => counts.modified += 1,
            }
            counts
        })
    }

    pub fn total(&self) -> usize {
        self.added + self.removed + self.modified
    }
}
