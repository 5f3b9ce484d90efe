//! Canonical schema constants for the logger's own diagnostics
//!
//! The facade reports its internal decisions (suppressed calls, level
//! changes, listener panics) through `tracing`. These keys keep those
//! events consistent and assertable.
//!
//! `tracing` macros take field names as identifiers, so emitting call sites
//! spell the keys out (`levels_len = ..`). Consumers read events back
//! through these constants only; the diagnostics tests look up every
//! `FIELD_*` key this way, which keeps the two spellings in step.

// Canonical field keys
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_SEVERITY: &str = "severity";
pub const FIELD_LEVEL: &str = "level";
pub const FIELD_LISTENER_EVENT: &str = "listener_event";
pub const FIELD_LEVELS_LEN: &str = "levels_len";

// Error fields
pub const FIELD_ERR_CODE: &str = "err.code";

// Canonical event names
pub const EVENT_EMITTED: &str = "emitted";
pub const EVENT_SUPPRESSED: &str = "suppressed";
pub const EVENT_LEVELS_CHANGED: &str = "levels_changed";
pub const EVENT_LISTENER_PANICKED: &str = "listener_panicked";
pub const EVENT_CONFIG_LOADED: &str = "config_loaded";
pub const EVENT_CONFIG_REJECTED: &str = "config_rejected";
