//! Time-stamped inventories.

use crate::model::inventory::Inventory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An inventory captured at a specific instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub timestamp: DateTime<Utc>,
    pub resources: Inventory,
}

impl Snapshot {
    pub fn new(timestamp: DateTime<Utc>, resources: Inventory) -> Self {
        Self {
            timestamp,
            resources,
        }
    }

    /// Capture an inventory with the current time
    pub fn capture(resources: Inventory) -> Self {
        Self::new(Utc::now(), resources)
    }
}
