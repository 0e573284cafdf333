//! Canonical schema constants for structured logging and diagnostics
//!
//! These constants keep field names consistent between the logging macros,
//! the tracing diagnostics sink and test assertions.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";
pub const FIELD_RUN_ID: &str = "run_id";
pub const FIELD_RUN_LABEL: &str = "run_label";

// Entity identifiers
pub const FIELD_RESOURCE_TYPE: &str = "resource_type";
pub const FIELD_RESOURCE_ID: &str = "resource_id";
pub const FIELD_RULE: &str = "rule";

// Diagnostics
pub const FIELD_DIAG_CODE: &str = "diag.code";

// Collection sizes
pub const FIELD_RESOURCE_COUNT: &str = "resource_count";
pub const FIELD_CHANGE_COUNT: &str = "change_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err.kind";
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_DIAGNOSTIC: &str = "diagnostic";
