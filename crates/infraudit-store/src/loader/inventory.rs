#![allow(clippy::result_large_err)]

use crate::errors::{inventory_invalid, io_error, Result};
use infraudit_core::errors::ExError;
use infraudit_core::model::Inventory;
use std::fs;
use std::path::Path;

/// Read a JSON inventory document (`{"<type>": [{..}, ..]}`).
pub fn load_inventory(path: &Path) -> Result<Inventory> {
    let content = fs::read_to_string(path).map_err(|e| io_error("read_inventory", e))?;
    parse_inventory_str(&content).map_err(|e| e.with_path(path.display().to_string()))
}

/// Parse a JSON inventory document.
///
/// Accepts a bare inventory or a stored snapshot (`{"timestamp": .., "resources": {..}}`),
/// so snapshot files can be fed straight to `check` and `diff`.
pub fn parse_inventory_str(content: &str) -> Result<Inventory> {
    let mut document: serde_json::Value = serde_json::from_str(content)
        .map_err(|e| inventory_invalid(&format!("JSON parse error: {}", e)))?;

    if is_snapshot_document(&document) {
        document = document["resources"].take();
    }

    Inventory::try_from(document).map_err(ExError::from)
}

fn is_snapshot_document(document: &serde_json::Value) -> bool {
    document.as_object().is_some_and(|obj| {
        obj.len() == 2
            && obj.get("timestamp").is_some_and(serde_json::Value::is_string)
            && obj.get("resources").is_some_and(serde_json::Value::is_object)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use infraudit_core::errors::ExErrorKind;

    #[test]
    fn test_parse_inventory() {
        let inventory =
            parse_inventory_str(r#"{"ec2": [{"id": "i-1"}], "s3": []}"#).unwrap();
        assert_eq!(inventory.total_resources(), 1);
        assert!(inventory.contains_type("s3"));
    }

    #[test]
    fn test_parse_snapshot_document() {
        let inventory = parse_inventory_str(
            r#"{"timestamp": "2024-01-01T00:00:00Z", "resources": {"ec2": [{"id": "i-1"}]}}"#,
        )
        .unwrap();
        assert_eq!(inventory.get("ec2").map(<[_]>::len), Some(1));
    }

    #[test]
    fn test_invalid_json() {
        let err = parse_inventory_str("{not json").unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInventory);
    }

    #[test]
    fn test_type_entry_must_be_list() {
        let err = parse_inventory_str(r#"{"ec2": {"id": "i-1"}}"#).unwrap_err();
        assert_eq!(err.kind(), ExErrorKind::InvalidInventory);
        assert!(err.message().contains("ec2"));
    }
}
