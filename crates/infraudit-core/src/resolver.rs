//! Field resolver: dotted-path lookup into a resource record.
//!
//! Absence is an expected outcome, not a failure. Every way a path can fail
//! to land on a value (missing key, empty segment, non-mapping intermediate,
//! explicit null) resolves to [`Resolved::Absent`].

use crate::model::{Record, Value};

/// Result of resolving a field path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolved<'a> {
    Present(&'a Value),
    Absent,
}

impl<'a> Resolved<'a> {
    pub fn is_present(&self) -> bool {
        matches!(self, Resolved::Present(_))
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Resolved::Absent)
    }

    pub fn value(&self) -> Option<&'a Value> {
        match self {
            Resolved::Present(v) => Some(v),
            Resolved::Absent => None,
        }
    }
}

/// Resolve `path` (e.g. `"block_device_mappings.ebs.encrypted"`) in `record`.
pub fn resolve<'a>(record: &'a Record, path: &str) -> Resolved<'a> {
    let mut segments = path.split('.');

    let first = match segments.next() {
        Some(seg) if !seg.is_empty() => seg,
        _ => return Resolved::Absent,
    };
    let mut current = match record.get(first) {
        Some(v) => v,
        None => return Resolved::Absent,
    };

    for segment in segments {
        if segment.is_empty() {
            return Resolved::Absent;
        }
        current = match current.as_map().and_then(|m| m.get(segment)) {
            Some(v) => v,
            None => return Resolved::Absent,
        };
    }

    if current.is_null() {
        Resolved::Absent
    } else {
        Resolved::Present(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(v: serde_json::Value) -> Record {
        Record::try_from(v).unwrap()
    }

    #[test]
    fn test_resolves_nested_path() {
        let r = record(json!({"level1": {"level2": {"level3": "value"}}}));
        assert_eq!(
            resolve(&r, "level1.level2.level3"),
            Resolved::Present(&Value::from("value"))
        );
    }

    #[test]
    fn test_missing_segment_is_absent() {
        let r = record(json!({"level1": {"level2": {}}}));
        assert!(resolve(&r, "nonexistent.field").is_absent());
        assert!(resolve(&r, "level1.level2.level3").is_absent());
    }

    #[test]
    fn test_non_mapping_intermediate_is_absent() {
        let r = record(json!({"a": "scalar", "b": [{"c": 1}]}));
        assert!(resolve(&r, "a.b").is_absent());
        assert!(resolve(&r, "b.c").is_absent());
    }

    #[test]
    fn test_empty_segments_are_absent() {
        let r = record(json!({"a": {"b": 1}, "": 2}));
        assert!(resolve(&r, "").is_absent());
        assert!(resolve(&r, "a..b").is_absent());
        assert!(resolve(&r, "a.").is_absent());
        assert!(resolve(&r, ".a").is_absent());
    }

    #[test]
    fn test_null_is_absent() {
        let r = record(json!({"encryption": null, "a": {"b": null}}));
        assert!(resolve(&r, "encryption").is_absent());
        assert!(resolve(&r, "a.b").is_absent());
        assert!(resolve(&r, "encryption.type").is_absent());
    }

    #[test]
    fn test_intermediate_mapping_is_present() {
        let r = record(json!({"encryption": {"type": "AES256"}}));
        let resolved = resolve(&r, "encryption");
        assert!(resolved.is_present());
        assert_eq!(resolved.value().map(Value::type_name), Some("mapping"));
    }
}
