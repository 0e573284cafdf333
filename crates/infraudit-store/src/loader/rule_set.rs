#![allow(clippy::result_large_err)]

use crate::errors::{io_error, rule_set_invalid, Result};
use infraudit_core::errors::ExError;
use infraudit_core::rules::RuleSet;
use std::fs;
use std::path::Path;

/// Read and validate a YAML rule file.
pub fn load_rule_set(path: &Path) -> Result<RuleSet> {
    let content = fs::read_to_string(path).map_err(|e| io_error("read_rule_set", e))?;
    parse_rule_set_str(&content).map_err(|e| e.with_path(path.display().to_string()))
}

/// Parse and validate a YAML rule set.
///
/// The document must be a mapping of resource type → mapping of rule name →
/// rule body, and every declared severity must be low/medium/high. An empty
/// document is an empty rule set.
pub fn parse_rule_set_str(content: &str) -> Result<RuleSet> {
    let rule_set: RuleSet = serde_yaml::from_str(content)
        .map_err(|e| rule_set_invalid(&format!("YAML parse error: {}", e)))?;

    rule_set.compile().map_err(ExError::from)?;

    Ok(rule_set)
}
