#![allow(clippy::unwrap_used, clippy::expect_used)]

use infraudit_core::diagnostics::{CollectingSink, DiagnosticCode};
use infraudit_core::diff::{diff, ChangeKind, SnapshotDiffer};
use infraudit_core::identity::identify;
use infraudit_core::model::{Inventory, Record, Value};
use proptest::prelude::*;
use proptest::test_runner::Config;
use serde_json::json;

fn record() -> impl Strategy<Value = Record> {
    (
        prop::option::of("i-[0-9]{1,2}"),
        prop::option::of("[a-z]{1,4}"),
        prop_oneof![Just("running"), Just("stopped")],
        0u32..4,
    )
        .prop_map(|(id, name, state, size)| {
            let mut r = Record::new()
                .with("state", state)
                .with("size", i64::from(size));
            if let Some(id) = id {
                r = r.with("id", id);
            }
            if let Some(name) = name {
                r = r.with("name", name);
            }
            r
        })
}

/// Inventories whose records have unique identifiers per type
fn inventory() -> impl Strategy<Value = Inventory> {
    prop::collection::btree_map(
        prop_oneof![Just("ec2".to_string()), Just("s3".to_string()), Just("rds".to_string())],
        prop::collection::vec(record(), 0..6),
        0..3,
    )
    .prop_map(|types| {
        types
            .into_iter()
            .map(|(t, records)| {
                let mut seen = std::collections::BTreeSet::new();
                let unique = records
                    .into_iter()
                    .filter(|r| seen.insert(identify(r)))
                    .collect();
                (t, unique)
            })
            .collect()
    })
}

proptest! {
    #![proptest_config(Config::with_cases(128))]

    #[test]
    fn diff_with_itself_is_empty(s in inventory()) {
        prop_assert!(diff(&s, &s).is_empty());
    }

    #[test]
    fn diff_is_symmetric(a in inventory(), b in inventory()) {
        let forward = diff(&a, &b);
        let backward: Vec<_> = diff(&b, &a).iter().map(|c| c.inverted()).collect();
        prop_assert_eq!(forward, backward);
    }

    #[test]
    fn diff_output_is_sorted(a in inventory(), b in inventory()) {
        let changes = diff(&a, &b);
        let keys: Vec<_> = changes.iter().map(|c| (c.resource_type.clone(), c.resource_id.clone())).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(keys, sorted);
    }

    #[test]
    fn identify_is_deterministic(r in record()) {
        prop_assert_eq!(identify(&r), identify(&r.clone()));
    }

    #[test]
    fn identify_ignores_key_order(state in "[a-z]{1,5}", size in 0i64..100, zone in "[a-z]{1,3}") {
        let forward: Record = serde_json::from_str(
            &format!(r#"{{"state":"{}","size":{},"zone":"{}"}}"#, state, size, zone)
        ).unwrap();
        let reverse: Record = serde_json::from_str(
            &format!(r#"{{"zone":"{}","size":{},"state":"{}"}}"#, zone, size, state)
        ).unwrap();
        prop_assert_eq!(identify(&forward), identify(&reverse));
    }
}

#[test]
fn test_ec2_instance_type_added_scenario() {
    let old = Inventory::try_from(json!({"ec2": [{"id": "i-1"}]})).unwrap();
    let new = Inventory::try_from(json!({"ec2": [
        {"id": "i-1", "type": "t3.micro"},
        {"id": "i-2"}
    ]}))
    .unwrap();

    let changes = diff(&old, &new);

    assert_eq!(changes.len(), 2);
    assert_eq!(changes[0].resource_type, "ec2");
    assert_eq!(changes[0].resource_id, "i-1");
    assert_eq!(changes[0].kind(), ChangeKind::Modified);
    assert_eq!(changes[1].resource_id, "i-2");
    assert_eq!(changes[1].kind(), ChangeKind::Added);

    let json = serde_json::to_value(&changes).unwrap();
    assert_eq!(json[0]["old"], json!({"id": "i-1"}));
    assert_eq!(json[0]["new"], json!({"id": "i-1", "type": "t3.micro"}));
    assert_eq!(json[1]["details"], json!({"id": "i-2"}));
}

#[test]
fn test_ec2_modified_and_added_scenario() {
    let old = Inventory::try_from(json!({"ec2": [{"id": "i-1", "state": "running"}]})).unwrap();
    let new = Inventory::try_from(json!({"ec2": [
        {"id": "i-1", "state": "stopped"},
        {"id": "i-2", "state": "running"}
    ]}))
    .unwrap();

    let changes = diff(&old, &new);

    assert_eq!(changes.len(), 2);
    assert_eq!(changes[0].kind(), ChangeKind::Modified);
    assert_eq!(changes[0].resource_id, "i-1");
    assert_eq!(changes[1].kind(), ChangeKind::Added);
    assert_eq!(changes[1].resource_id, "i-2");

    let json = serde_json::to_value(&changes).unwrap();
    assert_eq!(json[0]["old"]["state"], json!("running"));
    assert_eq!(json[0]["new"]["state"], json!("stopped"));
    assert_eq!(json[1]["details"]["id"], json!("i-2"));
}

#[test]
fn test_diff_does_not_mutate_inputs() {
    let old = Inventory::try_from(json!({"s3": [{"name": "a"}, {"name": "a", "v": 2}]})).unwrap();
    let new = Inventory::new();
    let (old_before, new_before) = (old.clone(), new.clone());
    let sink = CollectingSink::new();

    let changes = SnapshotDiffer::new().diff(&old, &new, &sink);

    assert_eq!(old, old_before);
    assert_eq!(new, new_before);
    assert_eq!(changes.len(), 1);
    assert_eq!(sink.count(DiagnosticCode::DuplicateIdentifier), 1);
    assert_eq!(
        changes[0].change,
        infraudit_core::diff::Change::Removed {
            details: Record::new().with("name", "a").with("v", Value::from(2))
        }
    );
}
