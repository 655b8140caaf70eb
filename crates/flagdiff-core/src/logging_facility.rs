//! Structured logging facility for flagdiff
//!
//! - Single initialization point via `init(profile)`
//! - Structured logging macros (`log_op_start!`, `log_op_end!`, `log_op_error!`)
//! - Test capture mode for deterministic assertions
//!
//! Only comparison boundaries (change-request diffs, CLI commands) emit
//! start/end events. The pure diff functions below them use `tracing::debug!`
//! at most.
//!
//! # Usage
//!
//! ```rust
//! use flagdiff_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod macros;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, TestCapture};
