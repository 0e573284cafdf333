//! Inventory diff computation.

use crate::diagnostics::{Diagnostic, DiagnosticCode, DiagnosticsSink, NullSink};
use crate::diff::model::{Change, ChangeRecord};
use crate::identity::identify;
use crate::model::{Inventory, Record, Snapshot};
use std::collections::{BTreeMap, BTreeSet};

const OP_DIFF: &str = "diff";

/// Stateless inventory differ.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotDiffer;

impl SnapshotDiffer {
    pub fn new() -> Self {
        Self
    }

    /// Compare `old` against `new`, reporting duplicate identifiers to `sink`.
    pub fn diff(
        &self,
        old: &Inventory,
        new: &Inventory,
        sink: &dyn DiagnosticsSink,
    ) -> Vec<ChangeRecord> {
        let resource_types: BTreeSet<&str> =
            old.resource_types().chain(new.resource_types()).collect();

        let mut changes = Vec::new();
        for resource_type in resource_types {
            let before = index(resource_type, old.get(resource_type), sink);
            let after = index(resource_type, new.get(resource_type), sink);
            diff_type(resource_type, &before, &after, &mut changes);
        }
        changes
    }
}

/// Diff two inventories, dropping diagnostics.
pub fn diff(old: &Inventory, new: &Inventory) -> Vec<ChangeRecord> {
    SnapshotDiffer.diff(old, new, &NullSink)
}

/// Diff the inventories of two snapshots.
pub fn diff_snapshots(
    old: &Snapshot,
    new: &Snapshot,
    sink: &dyn DiagnosticsSink,
) -> Vec<ChangeRecord> {
    SnapshotDiffer.diff(&old.resources, &new.resources, sink)
}

/// Identifier → record for one type. Later records replace earlier ones.
fn index<'a>(
    resource_type: &str,
    records: Option<&'a [Record]>,
    sink: &dyn DiagnosticsSink,
) -> BTreeMap<String, &'a Record> {
    let mut by_id = BTreeMap::new();
    for record in records.unwrap_or(&[]) {
        let id = identify(record);
        if by_id.insert(id.clone(), record).is_some() {
            sink.emit(
                Diagnostic::warning(
                    OP_DIFF,
                    DiagnosticCode::DuplicateIdentifier,
                    "duplicate resource identifier, keeping the last record",
                )
                .with_resource_type(resource_type)
                .with_resource_id(id),
            );
        }
    }
    by_id
}

fn diff_type(
    resource_type: &str,
    before: &BTreeMap<String, &Record>,
    after: &BTreeMap<String, &Record>,
    out: &mut Vec<ChangeRecord>,
) {
    let ids: BTreeSet<&String> = before.keys().chain(after.keys()).collect();

    for id in ids {
        let change = match (before.get(id), after.get(id)) {
            (None, Some(added)) => Change::Added {
                details: (*added).clone(),
            },
            (Some(removed), None) => Change::Removed {
                details: (*removed).clone(),
            },
            (Some(old), Some(new)) if old != new => Change::Modified {
                old: (*old).clone(),
                new: (*new).clone(),
            },
            _ => continue,
        };
        out.push(ChangeRecord {
            resource_type: resource_type.to_string(),
            resource_id: id.clone(),
            change,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;
    use crate::diff::model::ChangeKind;
    use serde_json::json;

    fn inventory(v: serde_json::Value) -> Inventory {
        Inventory::try_from(v).unwrap()
    }

    #[test]
    fn test_identical_inventories_have_no_changes() {
        let inv = inventory(json!({"ec2": [{"id": "i-1", "state": "running"}]}));
        assert!(diff(&inv, &inv).is_empty());
    }

    #[test]
    fn test_integral_float_id_matches_integer_id() {
        let old = inventory(json!({"ec2": [{"id": 1}]}));
        let new = inventory(json!({"ec2": [{"id": 1.0}]}));
        assert!(diff(&old, &new).is_empty());

        let old = inventory(json!({"ec2": [{"size": 8, "zone": "a"}]}));
        let new = inventory(json!({"ec2": [{"zone": "a", "size": 8.0}]}));
        assert!(diff(&old, &new).is_empty());
    }

    #[test]
    fn test_modified_and_added() {
        let old = inventory(json!({"ec2": [{"id": "i-1", "state": "running"}]}));
        let new = inventory(json!({"ec2": [
            {"id": "i-1", "state": "stopped"},
            {"id": "i-2", "state": "running"}
        ]}));

        let changes = diff(&old, &new);

        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].resource_id, "i-1");
        assert_eq!(changes[0].kind(), ChangeKind::Modified);
        assert_eq!(changes[1].resource_id, "i-2");
        assert_eq!(changes[1].kind(), ChangeKind::Added);
    }

    #[test]
    fn test_type_only_on_one_side() {
        let old = inventory(json!({"s3": [{"name": "logs"}]}));
        let new = inventory(json!({"rds": [{"identifier": "db"}]}));

        let changes = diff(&old, &new);

        assert_eq!(changes.len(), 2);
        assert_eq!(changes[0].resource_type, "rds");
        assert_eq!(changes[0].kind(), ChangeKind::Added);
        assert_eq!(changes[1].resource_type, "s3");
        assert_eq!(changes[1].kind(), ChangeKind::Removed);
    }

    #[test]
    fn test_key_order_does_not_cause_modification() {
        let old = inventory(json!({"ec2": [{"id": "i-1", "tags": {"a": "1", "b": "2"}}]}));
        let new: Inventory = serde_json::from_str(
            r#"{"ec2": [{"tags": {"b": "2", "a": "1"}, "id": "i-1"}]}"#,
        )
        .unwrap();
        assert!(diff(&old, &new).is_empty());
    }

    #[test]
    fn test_duplicate_identifier_last_wins() {
        let old = inventory(json!({"ec2": [{"id": "i-1", "v": 1}, {"id": "i-1", "v": 2}]}));
        let new = inventory(json!({"ec2": [{"id": "i-1", "v": 2}]}));
        let sink = CollectingSink::new();

        let changes = SnapshotDiffer::new().diff(&old, &new, &sink);

        assert!(changes.is_empty());
        assert_eq!(sink.count(DiagnosticCode::DuplicateIdentifier), 1);
        assert_eq!(sink.diagnostics()[0].resource_id.as_deref(), Some("i-1"));
    }

    #[test]
    fn test_records_without_identity_fields() {
        let old = inventory(json!({"sg": [{"port": 22}]}));
        let new = inventory(json!({"sg": [{"port": 443}]}));

        let changes = diff(&old, &new);

        assert_eq!(changes.len(), 2);
        assert!(changes.iter().all(|c| c.kind() != ChangeKind::Modified));
    }
}
