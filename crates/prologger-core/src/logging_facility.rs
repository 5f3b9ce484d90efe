//! Diagnostics facility
//!
//! The logger reports its own decisions (suppressed calls, level changes,
//! isolated listener panics, configuration problems) through `tracing`,
//! never through itself. This module wires a subscriber for those events:
//!
//! - `init(profile)`: one-time subscriber setup for applications
//! - `test_capture`: in-memory capture for assertions in tests
//!
//! # Usage
//!
//! ```rust
//! use prologger_core::logging_facility::{init, Profile};
//!
//! init(Profile::Development);
//! ```

pub mod init;
pub mod test_capture;

pub use init::{init, Profile};
pub use test_capture::{init_test_capture, CapturedEvent, DiagnosticsCapture};
