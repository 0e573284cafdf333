use crate::errors::AuditError;
use crate::model::Value;
use crate::rules::model::Rule;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Parsed rule configuration: resource type → ordered (rule name, raw body).
///
/// Rule order within a resource type is the document order, which is the
/// order violations are reported in.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuleSet {
    types: BTreeMap<String, Vec<(String, Value)>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a raw rule body under `resource_type`. A later rule with the
    /// same name replaces the earlier one in place.
    pub fn with_rule(
        mut self,
        resource_type: impl Into<String>,
        name: impl Into<String>,
        body: impl Into<Value>,
    ) -> Self {
        let rules = self.types.entry(resource_type.into()).or_default();
        upsert(rules, name.into(), body.into());
        self
    }

    pub fn resource_types(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }

    /// Raw rules for one type, in document order
    pub fn rules_for(&self, resource_type: &str) -> &[(String, Value)] {
        self.types
            .get(resource_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn rule_count(&self) -> usize {
        self.types.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Interpret every rule body into a per-type table of typed rules.
    ///
    /// # Errors
    ///
    /// Returns `AuditError::UnknownSeverity` for the first rule whose severity
    /// is not low/medium/high.
    pub fn compile(&self) -> Result<CompiledRules, AuditError> {
        let mut by_type = BTreeMap::new();
        for (resource_type, rules) in &self.types {
            let compiled = rules
                .iter()
                .map(|(name, body)| Rule::from_body(resource_type, name, body))
                .collect::<Result<Vec<_>, _>>()?;
            by_type.insert(resource_type.clone(), compiled);
        }
        Ok(CompiledRules { by_type })
    }
}

fn upsert(rules: &mut Vec<(String, Value)>, name: String, body: Value) {
    match rules.iter_mut().find(|(n, _)| *n == name) {
        Some(slot) => slot.1 = body,
        None => rules.push((name, body)),
    }
}

/// Type-name → rules lookup table built once per engine.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompiledRules {
    by_type: BTreeMap<String, Vec<Rule>>,
}

impl CompiledRules {
    /// Rules applicable to `resource_type`; empty when the type has none
    pub fn for_type(&self, resource_type: &str) -> &[Rule] {
        self.by_type
            .get(resource_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn resource_types(&self) -> impl Iterator<Item = &str> {
        self.by_type.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.by_type.values().flatten()
    }
}

// ---------------------------------------------------------------------------
// Serde: order-preserving nested mapping
// ---------------------------------------------------------------------------

struct OrderedRules(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for OrderedRules {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RulesVisitor;

        impl<'de> Visitor<'de> for RulesVisitor {
            type Value = OrderedRules;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping of rule names to rules")
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(OrderedRules(Vec::new()))
            }

            fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(OrderedRules(Vec::new()))
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut rules = Vec::new();
                while let Some((name, body)) = map.next_entry::<String, Value>()? {
                    upsert(&mut rules, name, body);
                }
                Ok(OrderedRules(rules))
            }
        }

        deserializer.deserialize_any(RulesVisitor)
    }
}

impl<'de> Deserialize<'de> for RuleSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RuleSetVisitor;

        impl<'de> Visitor<'de> for RuleSetVisitor {
            type Value = RuleSet;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping of resource types to rules")
            }

            fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(RuleSet::default())
            }

            fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
                Ok(RuleSet::default())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut types = BTreeMap::new();
                while let Some((resource_type, rules)) =
                    map.next_entry::<String, OrderedRules>()?
                {
                    types.insert(resource_type, rules.0);
                }
                Ok(RuleSet { types })
            }
        }

        deserializer.deserialize_any(RuleSetVisitor)
    }
}

struct OrderedRulesRef<'a>(&'a [(String, Value)]);

impl Serialize for OrderedRulesRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, body) in self.0 {
            map.serialize_entry(name, body)?;
        }
        map.end()
    }
}

impl Serialize for RuleSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.types.len()))?;
        for (resource_type, rules) in &self.types {
            map.serialize_entry(resource_type, &OrderedRulesRef(rules))?;
        }
        map.end()
    }
}
