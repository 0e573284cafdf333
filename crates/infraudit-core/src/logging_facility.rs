//! Structured logging facility for infraudit
//!
//! - Single initialization point via `init(profile)`
//! - Operation macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for assertions on emitted events
//!
//! The engines themselves do not log; they hand diagnostics to a
//! [`DiagnosticsSink`](crate::diagnostics::DiagnosticsSink). Binaries wire
//! [`TracingSink`](crate::diagnostics::TracingSink) to route those through
//! here.
//!
//! # Usage
//!
//! ```rust
//! use infraudit_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
