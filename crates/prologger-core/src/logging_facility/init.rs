//! Diagnostics subscriber initialization

use std::str::FromStr;
use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Environment variable selecting the profile for [`Profile::from_env`]
pub const ENV_PROFILE: &str = "PROLOGGER_DIAGNOSTICS";

/// Diagnostics profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable diagnostics at debug level
    Development,
    /// JSON diagnostics at info level
    Production,
    /// No output; tests attach `test_capture` instead
    Test,
}

impl FromStr for Profile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(Profile::Development),
            "prod" | "production" => Ok(Profile::Production),
            "test" => Ok(Profile::Test),
            other => Err(format!("unknown diagnostics profile: {}", other)),
        }
    }
}

impl Profile {
    /// Profile named by `PROLOGGER_DIAGNOSTICS`, `Production` when unset or unknown
    pub fn from_env() -> Self {
        std::env::var(ENV_PROFILE)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(Profile::Production)
    }

    fn default_directive(&self) -> &'static str {
        match self {
            Profile::Development => "prologger_core=debug",
            Profile::Production | Profile::Test => "prologger_core=info",
        }
    }
}

static INIT_ONCE: Once = Once::new();

/// Install the diagnostics subscriber
///
/// Only the first call has an effect. `RUST_LOG` overrides the profile's
/// default filter. If the host application already installed a global
/// subscriber, that one is kept.
///
/// # Example
///
/// ```
/// use prologger_core::logging_facility::{init, Profile};
///
/// init(Profile::Test);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(profile.default_directive()));
        let installed = match profile {
            Profile::Development => tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish()
                .try_init(),
            Profile::Production => tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .finish()
                .try_init(),
            Profile::Test => tracing_subscriber::registry().try_init(),
        };
        // Another global subscriber wins; nothing to report it through.
        let _ = installed;
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_idempotent() {
        init(Profile::Test);
        init(Profile::Test);
        init(Profile::Development);
    }

    #[test]
    fn test_profile_parsing() {
        assert_eq!("dev".parse::<Profile>(), Ok(Profile::Development));
        assert_eq!("Production".parse::<Profile>(), Ok(Profile::Production));
        assert_eq!("test".parse::<Profile>(), Ok(Profile::Test));
        assert!("loud".parse::<Profile>().is_err());
    }

    #[test]
    fn test_default_directives() {
        assert_eq!(Profile::Development.default_directive(), "prologger_core=debug");
        assert_eq!(Profile::Production.default_directive(), "prologger_core=info");
    }
}
