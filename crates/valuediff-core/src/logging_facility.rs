//! Structured logging for valuediff
//!
//! - `init(profile)` installs a global subscriber once per process
//! - `log_op_start!`, `log_op_end!` and `log_op_error!` emit the
//!   operation events
//! - `test_capture` records events in memory for assertions
//!
//! ```rust
//! use valuediff_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```
//!
//! Comparison entry points emit one `start` and one `end` event per call.
//! Per-node detail (recorded diffs, cycle-guard hits) is at `trace` level.

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
