//! Severity operations and the output streams they write to

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Color;

/// Standard stream a line is written to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stream {
    Stdout,
    Stderr,
}

/// One of the five emit operations
///
/// Each severity is bound to a fixed prefix tag, output stream, color and
/// listener event name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Log,
    Warn,
    Error,
    Info,
    Success,
}

impl Severity {
    /// All severities in declaration order
    pub const ALL: [Severity; 5] = [
        Severity::Log,
        Severity::Warn,
        Severity::Error,
        Severity::Info,
        Severity::Success,
    ];

    /// Event name listeners subscribe to
    pub fn event_name(&self) -> &'static str {
        match self {
            Severity::Log => "log",
            Severity::Warn => "warn",
            Severity::Error => "error",
            Severity::Info => "info",
            Severity::Success => "success",
        }
    }

    /// Inverse of [`Severity::event_name`]
    pub fn from_event_name(name: &str) -> Option<Severity> {
        Severity::ALL.into_iter().find(|s| s.event_name() == name)
    }

    /// Bracketed tag prepended to the output, including the trailing separator
    pub fn prefix(&self) -> &'static str {
        match self {
            Severity::Log => "[LOG]: ",
            Severity::Warn => "[WARN]: ",
            Severity::Error => "[ERROR]: ",
            Severity::Info => "[INFO]: ",
            Severity::Success => "[SUCCESS]: ",
        }
    }

    pub fn stream(&self) -> Stream {
        match self {
            Severity::Log | Severity::Info | Severity::Success => Stream::Stdout,
            Severity::Warn | Severity::Error => Stream::Stderr,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Severity::Log => Color::Cyan,
            Severity::Warn => Color::Yellow,
            Severity::Error => Color::Red,
            Severity::Info => Color::Blue,
            Severity::Success => Color::Green,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.event_name())
    }
}
