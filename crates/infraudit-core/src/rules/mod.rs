//! Declarative compliance rules.
//!
//! A [`RuleSet`] is the parsed configuration document: resource type → rule
//! name → raw rule body. It is consumed as-is; interpreting each body into a
//! typed [`Rule`] happens once, when an engine is constructed (see
//! [`RuleSet::compile`]).
//!
//! ## Configuration vs. data errors
//!
//! Only an unknown `severity` is a configuration error that stops
//! compilation. A body that is not a mapping, a missing or non-mapping
//! `condition`, a missing `field`/`operator` or an unsupported operator all
//! compile into a [`Check::Malformed`] which the evaluator treats as
//! compliant (fail-open) while emitting a warning diagnostic.

pub mod model;
mod ruleset;

pub use model::{Check, Condition, Operator, Rule, Severity};
pub use ruleset::{CompiledRules, RuleSet};
