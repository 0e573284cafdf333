//! Inventories: every known resource at one instant, grouped by type.

use crate::errors::AuditError;
use crate::model::record::Record;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from resource-type name to the ordered records of that type.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory {
    resources: BTreeMap<String, Vec<Record>>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insertion of all records for one resource type
    pub fn with(mut self, resource_type: impl Into<String>, records: Vec<Record>) -> Self {
        self.resources.insert(resource_type.into(), records);
        self
    }

    /// Records of one type, or `None` when the type was not scanned
    pub fn get(&self, resource_type: &str) -> Option<&[Record]> {
        self.resources.get(resource_type).map(Vec::as_slice)
    }

    pub fn contains_type(&self, resource_type: &str) -> bool {
        self.resources.contains_key(resource_type)
    }

    /// Resource-type names in sorted order
    pub fn resource_types(&self) -> impl Iterator<Item = &str> {
        self.resources.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Record])> {
        self.resources
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Total number of records across every type
    pub fn total_resources(&self) -> usize {
        self.resources.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl FromIterator<(String, Vec<Record>)> for Inventory {
    fn from_iter<I: IntoIterator<Item = (String, Vec<Record>)>>(iter: I) -> Self {
        Self {
            resources: iter.into_iter().collect(),
        }
    }
}

impl TryFrom<serde_json::Value> for Inventory {
    type Error = AuditError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        let serde_json::Value::Object(types) = value else {
            return Err(AuditError::InventoryParse {
                reason: "inventory root must be a mapping of resource types".to_string(),
            });
        };

        let mut resources = BTreeMap::new();
        for (resource_type, records) in types {
            let serde_json::Value::Array(items) = records else {
                return Err(AuditError::InventoryParse {
                    reason: format!("resources for type {} must be a list", resource_type),
                });
            };
            let records = items
                .into_iter()
                .map(Record::try_from)
                .collect::<Result<Vec<_>, _>>()?;
            resources.insert(resource_type, records);
        }
        Ok(Self { resources })
    }
}
