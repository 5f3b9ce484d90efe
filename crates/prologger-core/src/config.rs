//! Logger configuration
//!
//! Configuration comes from three layers, later ones winning:
//! built-in defaults, an optional TOML file, and `PROLOGGER_*` environment
//! variables.
//!
//! ```toml
//! levels = ["net", "db"]
//! noprefix = false
//! dateformat = "%H:%M:%S"
//! color = "auto"
//! isolate_listeners = true
//!
//! [colors]
//! warn = "magenta"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use prologger_core_types::schema::EVENT_CONFIG_LOADED;
use prologger_core_types::{Color, Severity};

use crate::errors::{LoggerError, Result};
use crate::timestamp::DEFAULT_DATE_FORMAT;

pub const ENV_LEVELS: &str = "PROLOGGER_LEVELS";
pub const ENV_NOPREFIX: &str = "PROLOGGER_NOPREFIX";
pub const ENV_DATEFORMAT: &str = "PROLOGGER_DATEFORMAT";
pub const ENV_ISOLATE_LISTENERS: &str = "PROLOGGER_ISOLATE_LISTENERS";
pub const ENV_NO_COLOR: &str = "NO_COLOR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when `colored` decides the terminal supports it
    #[default]
    Auto,
    /// Escape sequences even when stdout is not a terminal
    Always,
    Never,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggerConfig {
    pub levels: Vec<String>,
    pub noprefix: bool,
    pub dateformat: String,
    pub color: ColorMode,
    pub isolate_listeners: bool,
    /// Severity name to color name, replacing the severity's default color
    pub colors: BTreeMap<String, String>,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            levels: Vec::new(),
            noprefix: false,
            dateformat: DEFAULT_DATE_FORMAT.to_string(),
            color: ColorMode::Auto,
            isolate_listeners: false,
            colors: BTreeMap::new(),
        }
    }
}

impl LoggerConfig {
    /// Parse a TOML document; absent keys keep their defaults
    ///
    /// # Errors
    ///
    /// Returns `LoggerError::ConfigParse` on malformed TOML or unknown keys,
    /// and the errors of [`LoggerConfig::color_overrides`] for a bad
    /// `[colors]` table.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: LoggerConfig = toml::from_str(source)?;
        config.color_overrides()?;
        tracing::info!(
            component = module_path!(),
            op = "from_toml_str",
            event = EVENT_CONFIG_LOADED,
            levels_len = config.levels.len(),
        );
        Ok(config)
    }

    /// Read and parse a TOML file
    ///
    /// # Errors
    ///
    /// Returns `LoggerError::ConfigRead` if the file cannot be read and
    /// `LoggerError::ConfigParse` if its contents are invalid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| LoggerError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Resolve the `colors` table
    ///
    /// # Errors
    ///
    /// Returns `LoggerError::UnknownSeverity` for a key that is not one of
    /// `log/warn/error/info/success` and `LoggerError::InvalidColor` for an
    /// unrecognised color name.
    pub fn color_overrides(&self) -> Result<Vec<(Severity, Color)>> {
        self.colors
            .iter()
            .map(|(severity, color)| {
                let severity = Severity::from_event_name(severity).ok_or_else(|| {
                    LoggerError::UnknownSeverity {
                        name: severity.clone(),
                    }
                })?;
                Ok((severity, color.parse::<Color>()?))
            })
            .collect()
    }

    /// Overlay `PROLOGGER_*` variables from the process environment
    ///
    /// # Errors
    ///
    /// Returns `LoggerError::InvalidEnv` when a boolean variable holds
    /// something other than `1/0/true/false/yes/no/on/off`.
    pub fn apply_env(self) -> Result<Self> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Overlay variables obtained from `lookup`
    ///
    /// # Errors
    ///
    /// See [`LoggerConfig::apply_env`].
    pub fn apply_env_from<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(levels) = lookup(ENV_LEVELS) {
            self.levels = levels
                .split(',')
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(value) = lookup(ENV_NOPREFIX) {
            self.noprefix = parse_bool(ENV_NOPREFIX, &value)?;
        }
        if let Some(pattern) = lookup(ENV_DATEFORMAT) {
            self.dateformat = pattern;
        }
        if let Some(value) = lookup(ENV_ISOLATE_LISTENERS) {
            self.isolate_listeners = parse_bool(ENV_ISOLATE_LISTENERS, &value)?;
        }
        if self.color == ColorMode::Auto && lookup(ENV_NO_COLOR).is_some_and(|v| !v.is_empty()) {
            self.color = ColorMode::Never;
        }
        Ok(self)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(LoggerError::InvalidEnv {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::default();
        assert!(config.levels.is_empty());
        assert!(!config.noprefix);
        assert_eq!(config.dateformat, DEFAULT_DATE_FORMAT);
        assert_eq!(config.color, ColorMode::Auto);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = LoggerConfig::from_toml_str("noprefix = true").unwrap();
        assert!(config.noprefix);
        assert_eq!(config.dateformat, DEFAULT_DATE_FORMAT);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = LoggerConfig::from_toml_str("verbosity = 3").unwrap_err();
        assert_eq!(err.code(), "ERR_SERIALIZATION");
    }

    #[test]
    fn test_env_overrides() {
        let config = LoggerConfig::default()
            .apply_env_from(env(&[
                (ENV_LEVELS, "net, db,,"),
                (ENV_NOPREFIX, "yes"),
                (ENV_DATEFORMAT, "%H"),
                (ENV_NO_COLOR, "1"),
            ]))
            .unwrap();

        assert_eq!(config.levels, vec!["net", "db"]);
        assert!(config.noprefix);
        assert_eq!(config.dateformat, "%H");
        assert_eq!(config.color, ColorMode::Never);
    }

    #[test]
    fn test_no_color_does_not_override_always() {
        let config = LoggerConfig {
            color: ColorMode::Always,
            ..LoggerConfig::default()
        }
        .apply_env_from(env(&[(ENV_NO_COLOR, "1")]))
        .unwrap();
        assert_eq!(config.color, ColorMode::Always);
    }

    #[test]
    fn test_bad_bool_rejected() {
        let err = LoggerConfig::default()
            .apply_env_from(env(&[(ENV_ISOLATE_LISTENERS, "maybe")]))
            .unwrap_err();
        assert_eq!(err.code(), "ERR_CONFIGURATION");
        assert!(err.to_string().contains(ENV_ISOLATE_LISTENERS));
    }

    #[test]
    fn test_color_overrides_parse() {
        let config = LoggerConfig::from_toml_str(
            r#"
[colors]
warn = "Magenta"
success = "white"
"#,
        )
        .unwrap();

        assert_eq!(
            config.color_overrides().unwrap(),
            vec![
                (Severity::Success, Color::White),
                (Severity::Warn, Color::Magenta),
            ]
        );
    }

    #[test]
    fn test_unknown_color_rejected() {
        let err = LoggerConfig::from_toml_str("[colors]\nwarn = \"teal\"").unwrap_err();
        assert_eq!(err.code(), "ERR_INVALID_INPUT");
        assert_eq!(err.to_string(), "Unknown color: teal");
    }

    #[test]
    fn test_unknown_severity_rejected() {
        let err = LoggerConfig::from_toml_str("[colors]\ndebug = \"red\"").unwrap_err();
        assert!(matches!(err, LoggerError::UnknownSeverity { ref name } if name == "debug"));
    }

    #[test]
    fn test_missing_file() {
        let err = LoggerConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert_eq!(err.code(), "ERR_IO");
    }
}
