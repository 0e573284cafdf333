#![allow(clippy::unwrap_used, clippy::expect_used)]

use infraudit_core::compliance::ComplianceEngine;
use infraudit_core::diagnostics::{CollectingSink, DiagnosticCode};
use infraudit_core::diff::SnapshotDiffer;
use infraudit_core::model::{Inventory, Record};
use infraudit_core::rules::RuleSet;
use serde_json::json;

fn inventory(n: usize) -> Inventory {
    let records = (0..n)
        .map(|i| {
            Record::new()
                .with("id", format!("i-{}", i))
                .with("size", i as i64)
        })
        .collect();
    Inventory::new().with("ec2", records)
}

#[test]
fn test_engine_shared_across_threads() {
    let rules = RuleSet::new()
        .with_rule(
            "ec2",
            "small",
            json!({"condition": {"field": "size", "operator": "less_than", "value": 5}}),
        )
        .with_rule(
            "ec2",
            "tagged",
            json!({"condition": {"field": "tags", "operator": "contains", "value": "owner"}}),
        );
    let engine = ComplianceEngine::new(&rules).unwrap();
    let sink = CollectingSink::new();
    let inventories: Vec<Inventory> = (1..=8).map(|n| inventory(n * 2)).collect();

    let reports: Vec<_> = std::thread::scope(|scope| {
        let (engine, sink) = (&engine, &sink);
        let handles: Vec<_> = inventories
            .iter()
            .map(|inv| scope.spawn(move || engine.check(inv, sink)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    for (inv, report) in inventories.iter().zip(&reports) {
        let total = inv.total_resources();
        assert_eq!(report.summary.total_resources, total);
        assert_eq!(report.summary.compliant, total.min(5));
    }
    // every record lacks `tags`, each contains check fails open once
    let expected: usize = inventories.iter().map(Inventory::total_resources).sum();
    assert_eq!(sink.count(DiagnosticCode::TypeMismatch), expected);
}

#[test]
fn test_differ_shared_across_threads() {
    let differ = SnapshotDiffer::new();
    let sink = CollectingSink::new();
    let base = inventory(4);

    let counts: Vec<usize> = std::thread::scope(|scope| {
        let handles: Vec<_> = (0..6)
            .map(|n| {
                let (differ, sink, base) = (&differ, &sink, &base);
                scope.spawn(move || differ.diff(base, &inventory(4 + n), sink).len())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(counts, vec![0, 1, 2, 3, 4, 5]);
    assert!(sink.is_empty());
}
