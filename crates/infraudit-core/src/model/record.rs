//! Resource records.

use crate::errors::AuditError;
use crate::model::value::Value;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One scanned resource: a string-keyed mapping of field values.
///
/// Records are built once by the scanning collaborator and only read
/// afterwards; there are no mutating accessors beyond construction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion used while materializing a record
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Top-level field lookup (no path traversal, nulls included)
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Canonical JSON rendering, see [`Value::to_canonical_string`].
    pub fn to_canonical_string(&self) -> String {
        let fields: BTreeMap<&str, Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.normalized()))
            .collect();
        serde_json::to_string(&fields).unwrap_or_default()
    }
}

impl From<BTreeMap<String, Value>> for Record {
    fn from(fields: BTreeMap<String, Value>) -> Self {
        Self { fields }
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl TryFrom<serde_json::Value> for Record {
    type Error = AuditError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match Value::from(value) {
            Value::Map(fields) => Ok(Self { fields }),
            other => Err(AuditError::InventoryParse {
                reason: format!("resource record must be a mapping, got {}", other.type_name()),
            }),
        }
    }
}
