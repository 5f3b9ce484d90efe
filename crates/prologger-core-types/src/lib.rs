//! Core types shared across prologger facilities
//!
//! This crate provides the small value types that both the logger facade
//! and its diagnostics layer agree on:
//!
//! - **Severity**: the five emit operations and their fixed tag/stream/color
//! - **Stream / Color**: where a line goes and how it is painted
//! - **Schema constants**: canonical field keys and event names for diagnostics

pub mod color;
pub mod schema;
pub mod severity;

pub use color::Color;
pub use severity::{Severity, Stream};
