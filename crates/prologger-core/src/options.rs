//! Per-call options

/// Options accepted by every emit operation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogOptions {
    /// Named level; the call is dropped unless this level is active
    pub level: Option<String>,
    /// Skip timestamping and serialization
    pub noconvert: bool,
    /// Force the severity tag even when prefixes are suppressed
    pub prefix: bool,
}

impl LogOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    pub fn noconvert(mut self, noconvert: bool) -> Self {
        self.noconvert = noconvert;
        self
    }

    pub fn prefix(mut self, prefix: bool) -> Self {
        self.prefix = prefix;
        self
    }
}

/// Second argument of an emit call
///
/// `Passthrough` stands for a caller handing over something that is not an
/// options record: no filtering, no convert, no prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOptions {
    Options(LogOptions),
    Passthrough,
}

impl Default for CallOptions {
    fn default() -> Self {
        CallOptions::Options(LogOptions::default())
    }
}

impl From<LogOptions> for CallOptions {
    fn from(options: LogOptions) -> Self {
        CallOptions::Options(options)
    }
}

impl From<&LogOptions> for CallOptions {
    fn from(options: &LogOptions) -> Self {
        CallOptions::Options(options.clone())
    }
}

impl From<Option<LogOptions>> for CallOptions {
    fn from(options: Option<LogOptions>) -> Self {
        CallOptions::Options(options.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let options = LogOptions::new().level("net").noconvert(true).prefix(true);
        assert_eq!(options.level.as_deref(), Some("net"));
        assert!(options.noconvert);
        assert!(options.prefix);
    }

    #[test]
    fn test_none_means_default_options() {
        assert_eq!(CallOptions::from(None), CallOptions::default());
    }
}
