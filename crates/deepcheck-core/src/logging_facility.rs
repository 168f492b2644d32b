//! Structured logging for deepcheck
//!
//! - `init(profile)` installs the global subscriber once
//! - `log_op_start!`, `log_op_end!` and `log_op_error!` emit the canonical
//!   per-operation events
//! - `test_capture` records events in memory for assertions in tests
//!
//! ```rust
//! use deepcheck_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
