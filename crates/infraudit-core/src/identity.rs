//! Resource identity.
//!
//! Both engines derive identifiers here so that a resource reported by a
//! compliance check and the same resource in a change list carry the same
//! identifier.

use crate::model::{Record, Value};

/// Fields probed by the snapshot differ, in priority order
pub const IDENTITY_FIELDS: [&str; 3] = ["id", "name", "identifier"];

/// Fields probed for compliance report identifiers, in priority order
pub const REPORT_IDENTITY_FIELDS: [&str; 4] = ["id", "name", "identifier", "arn"];

/// Stable identifier used to match a resource across snapshots.
///
/// Uses the first present, non-null field of `id`, `name`, `identifier`.
/// Records carrying none of them are identified by their canonical
/// serialization, so two structurally equal records always share an
/// identifier regardless of key order.
pub fn identify(record: &Record) -> String {
    probe(record, &IDENTITY_FIELDS)
}

/// Identifier used in compliance reports; additionally probes `arn`.
pub fn report_identifier(record: &Record) -> String {
    probe(record, &REPORT_IDENTITY_FIELDS)
}

fn probe(record: &Record, fields: &[&str]) -> String {
    fields
        .iter()
        .filter_map(|field| record.get(field))
        .find(|value| !value.is_null())
        .map(render)
        .unwrap_or_else(|| record.to_canonical_string())
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_canonical_string(),
    }
}
