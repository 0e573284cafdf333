//! Resource data model: tagged values, records, inventories and snapshots.

pub mod inventory;
pub mod record;
pub mod snapshot;
pub mod value;

pub use inventory::Inventory;
pub use record::Record;
pub use snapshot::Snapshot;
pub use value::Value;
