//! Loading of rule sets and inventories from disk.
//!
//! Whole-document problems are configuration errors and fail the load.
//! Problems inside a single rule's condition are left for the engine, which
//! evaluates such rules fail-open.

mod inventory;
mod rule_set;

pub use inventory::{load_inventory, parse_inventory_str};
pub use rule_set::{load_rule_set, parse_rule_set_str};
