//! prologger core - leveled, colorized console logging
//!
//! This crate provides the [`Logger`] facade and everything it is built from:
//! - Five severity operations (`log`, `warn`, `error`, `info`, `success`),
//!   each with a fixed prefix tag and output stream, and a default color
//! - A named-level allow-list that drops tagged calls for inactive levels
//! - Payload conversion: timestamps, JSON for structured values, messages
//!   and traces for errors
//! - Per-severity listeners invoked synchronously with the final line
//! - Pluggable sinks and clocks, TOML/environment configuration
//! - `tracing` diagnostics for the logger's own decisions
//!
//! ```
//! use prologger_core::{Logger, LogOptions, MemorySink};
//!
//! let sink = MemorySink::new();
//! let logger = Logger::builder().sink(sink.clone()).noprefix(true).build();
//! logger.success_with("done", LogOptions::new().noconvert(true));
//! assert_eq!(sink.stdout(), vec!["done"]);
//! ```

pub mod color;
pub mod config;
pub mod errors;
pub mod events;
pub mod facade;
pub mod levels;
pub mod logging_facility;
pub mod options;
pub mod payload;
pub mod sink;
pub mod timestamp;

// Re-export commonly used types
pub use color::{colorize, paint};
pub use config::{ColorMode, LoggerConfig};
pub use errors::{LoggerError, LoggerErrorKind, Result};
pub use events::{noop, Listener, ListenerPolicy};
pub use facade::{global, Logger, LoggerBuilder};
pub use levels::Levels;
pub use options::{CallOptions, LogOptions};
pub use payload::{ErrorPayload, Payload};
pub use prologger_core_types::{Color, Severity, Stream};
pub use sink::{ConsoleSink, MemorySink, OutputLine, Sink};
pub use timestamp::{format_date, Clock, FixedClock, SystemClock, DEFAULT_DATE_FORMAT};
