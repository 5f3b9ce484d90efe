use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using LoggerError
pub type Result<T> = std::result::Result<T, LoggerError>;

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code usable in tests and in the
/// diagnostics stream (`err.code`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoggerErrorKind {
    InvalidInput,
    Io,
    Serialization,
    Configuration,
    ListenerPanic,
}

impl LoggerErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            LoggerErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            LoggerErrorKind::Io => "ERR_IO",
            LoggerErrorKind::Serialization => "ERR_SERIALIZATION",
            LoggerErrorKind::Configuration => "ERR_CONFIGURATION",
            LoggerErrorKind::ListenerPanic => "ERR_LISTENER_PANIC",
        }
    }
}

/// Errors raised by the logger
///
/// Emit operations never return these; misuse of the facade is reported
/// through its own log channel. Only configuration loading surfaces them.
#[derive(Error, Debug)]
pub enum LoggerError {
    /// `set_levels_value` was given something other than an array of strings or a string
    #[error("Levels must be a Array or String")]
    InvalidLevels { found: String },

    /// Configuration file could not be read
    #[error("Failed to read config {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid TOML for `LoggerConfig`
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// An environment override could not be interpreted
    #[error("Invalid value for {key}: {value:?}")]
    InvalidEnv { key: String, value: String },

    /// Unknown color name in a color override
    #[error("Unknown color: {name}")]
    InvalidColor { name: String },

    /// Color override keyed by something other than a severity name
    #[error("Unknown severity: {name}")]
    UnknownSeverity { name: String },
}

impl LoggerError {
    pub fn kind(&self) -> LoggerErrorKind {
        match self {
            LoggerError::InvalidLevels { .. }
            | LoggerError::InvalidColor { .. }
            | LoggerError::UnknownSeverity { .. } => LoggerErrorKind::InvalidInput,
            LoggerError::ConfigRead { .. } => LoggerErrorKind::Io,
            LoggerError::ConfigParse(_) => LoggerErrorKind::Serialization,
            LoggerError::InvalidEnv { .. } => LoggerErrorKind::Configuration,
        }
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind().code()
    }
}

impl From<prologger_core_types::color::UnknownColor> for LoggerError {
    fn from(err: prologger_core_types::color::UnknownColor) -> Self {
        LoggerError::InvalidColor { name: err.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_levels_message() {
        let err = LoggerError::InvalidLevels {
            found: "number".to_string(),
        };
        assert_eq!(err.to_string(), "Levels must be a Array or String");
        assert_eq!(err.code(), "ERR_INVALID_INPUT");
    }

    #[test]
    fn test_kind_code_mapping() {
        let kinds = vec![
            (LoggerErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
            (LoggerErrorKind::Io, "ERR_IO"),
            (LoggerErrorKind::Serialization, "ERR_SERIALIZATION"),
            (LoggerErrorKind::Configuration, "ERR_CONFIGURATION"),
            (LoggerErrorKind::ListenerPanic, "ERR_LISTENER_PANIC"),
        ];

        for (kind, expected_code) in kinds {
            assert_eq!(kind.code(), expected_code);
        }
    }

    #[test]
    fn test_unknown_color_conversion() {
        let err: LoggerError = "teal".parse::<prologger_core_types::Color>().unwrap_err().into();
        assert_eq!(err.kind(), LoggerErrorKind::InvalidInput);
        assert_eq!(err.to_string(), "Unknown color: teal");
    }
}
