//! The logger facade
//!
//! Every emit operation runs the same pipeline:
//!
//! 1. a `Passthrough` call skips straight to output with the raw payload
//! 2. a call tagged with an inactive level is dropped silently
//! 3. the payload is converted (timestamp, JSON, error message) unless
//!    `noconvert` is set
//! 4. the severity tag is prepended unless prefixes are suppressed and the
//!    call did not force one
//! 5. the line goes to the severity's stream in its color
//! 6. listeners for the severity's event name receive the final string
//!
//! Untagged calls are never filtered, even when the level list is
//! non-empty. Callers relying on the allow-list must tag every call.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError, RwLock, RwLockReadGuard};

use prologger_core_types::schema::{
    EVENT_CONFIG_REJECTED, EVENT_EMITTED, EVENT_LEVELS_CHANGED, EVENT_SUPPRESSED,
};
use prologger_core_types::{Color, Severity, Stream};

use crate::config::{ColorMode, LoggerConfig};
use crate::errors::LoggerError;
use crate::events::{self, EventRegistry, Listener, ListenerPolicy};
use crate::levels::{LevelFilter, Levels};
use crate::options::{CallOptions, LogOptions};
use crate::payload::Payload;
use crate::sink::{ConsoleSink, OutputLine, Sink};
use crate::timestamp::{self, Clock, SystemClock, DEFAULT_DATE_FORMAT};

#[derive(Debug, Clone)]
struct Settings {
    levels: LevelFilter,
    noprefix: bool,
    dateformat: String,
    colors: HashMap<Severity, Color>,
}

/// Leveled, colorized console logger with per-severity listeners
///
/// All methods take `&self` and return `&Self`, so calls chain:
///
/// ```
/// use prologger_core::{Logger, LogOptions, MemorySink};
///
/// let sink = MemorySink::new();
/// let logger = Logger::builder().sink(sink.clone()).build();
///
/// logger
///     .set_levels(["net"])
///     .info_with("connected", LogOptions::new().level("net"))
///     .warn_with("dropped", LogOptions::new().level("db"));
///
/// assert_eq!(sink.len(), 1);
/// ```
pub struct Logger {
    settings: RwLock<Settings>,
    listeners: Mutex<EventRegistry>,
    sink: Arc<dyn Sink>,
    clock: Arc<dyn Clock>,
    listener_policy: ListenerPolicy,
}

/// Builder for [`Logger`]
pub struct LoggerBuilder {
    settings: Settings,
    sink: Arc<dyn Sink>,
    clock: Arc<dyn Clock>,
    listener_policy: ListenerPolicy,
}

impl LoggerBuilder {
    fn new() -> Self {
        Self {
            settings: Settings {
                levels: LevelFilter::new(),
                noprefix: false,
                dateformat: DEFAULT_DATE_FORMAT.to_string(),
                colors: HashMap::new(),
            },
            sink: Arc::new(ConsoleSink::new()),
            clock: Arc::new(SystemClock),
            listener_policy: ListenerPolicy::default(),
        }
    }

    pub fn sink(mut self, sink: impl Sink + 'static) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn levels(mut self, levels: impl Into<Levels>) -> Self {
        self.settings.levels.apply(levels.into());
        self
    }

    pub fn noprefix(mut self, noprefix: bool) -> Self {
        self.settings.noprefix = noprefix;
        self
    }

    pub fn dateformat(mut self, pattern: impl ToString) -> Self {
        self.settings.dateformat = pattern.to_string();
        self
    }

    pub fn listener_policy(mut self, policy: ListenerPolicy) -> Self {
        self.listener_policy = policy;
        self
    }

    /// Use `color` for `severity` instead of its default
    pub fn color(mut self, severity: Severity, color: Color) -> Self {
        self.settings.colors.insert(severity, color);
        self
    }

    /// Take levels, prefix, date format, colors and listener policy from `config`
    ///
    /// Output goes to a [`ConsoleSink`] in the configured [`ColorMode`].
    /// A `colors` table that does not resolve is reported through `tracing`
    /// and left out.
    pub fn config(mut self, config: &LoggerConfig) -> Self {
        self.settings.levels.apply(Levels::Replace(config.levels.clone()));
        self.settings.noprefix = config.noprefix;
        self.settings.dateformat = config.dateformat.clone();
        self.listener_policy = if config.isolate_listeners {
            ListenerPolicy::Isolate
        } else {
            ListenerPolicy::Propagate
        };
        match config.color_overrides() {
            Ok(overrides) => self.settings.colors.extend(overrides),
            Err(err) => tracing::warn!(
                component = module_path!(),
                op = "config",
                event = EVENT_CONFIG_REJECTED,
                err.code = err.code(),
                reason = %err,
            ),
        }
        self.sink = Arc::new(ConsoleSink::with_mode(config.color));
        self
    }

    pub fn build(self) -> Logger {
        let mut registry = EventRegistry::new();
        // An `error` listener always exists, so emitting `error` never lands
        // on an empty registry.
        registry.add(Severity::Error.event_name(), Arc::new(events::noop));

        Logger {
            settings: RwLock::new(self.settings),
            listeners: Mutex::new(registry),
            sink: self.sink,
            clock: self.clock,
            listener_policy: self.listener_policy,
        }
    }
}

impl Logger {
    /// Console logger with default settings
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Console logger configured from `config`
    pub fn from_config(config: &LoggerConfig) -> Self {
        Self::builder().config(config).build()
    }

    fn settings(&self) -> RwLockReadGuard<'_, Settings> {
        self.settings.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn update<R>(&self, f: impl FnOnce(&mut Settings) -> R) -> R {
        let mut settings = self.settings.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut settings)
    }

    fn registry(&self) -> MutexGuard<'_, EventRegistry> {
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run the emit pipeline for one call
    fn write(&self, severity: Severity, data: Payload, options: CallOptions) -> &Self {
        let out = match options {
            CallOptions::Passthrough => data.raw(),
            CallOptions::Options(options) => match self.format(severity, &data, &options) {
                Some(out) => out,
                None => return self,
            },
        };

        self.sink.write(&OutputLine::new(
            severity.stream(),
            Some(self.color(severity)),
            out.clone(),
        ));
        tracing::trace!(
            component = module_path!(),
            op = severity.event_name(),
            event = EVENT_EMITTED,
            severity = %severity,
        );
        self.emit(severity.event_name(), &out);
        self
    }

    /// Filter, convert and prefix; `None` when the level filter drops the call
    fn format(&self, severity: Severity, data: &Payload, options: &LogOptions) -> Option<String> {
        let (noprefix, dateformat) = {
            let settings = self.settings();
            if !settings.levels.allows(options.level.as_deref()) {
                tracing::debug!(
                    component = module_path!(),
                    op = severity.event_name(),
                    event = EVENT_SUPPRESSED,
                    severity = %severity,
                    level = options.level.as_deref().unwrap_or_default(),
                );
                return None;
            }
            (settings.noprefix, settings.dateformat.clone())
        };

        let out = if options.noconvert {
            data.raw()
        } else {
            self.convert(data, &dateformat)
        };

        if !noprefix || options.prefix {
            Some(format!("{}{}", severity.prefix(), out))
        } else {
            Some(out)
        }
    }

    /// Reduce the payload to text and stamp it with the current time
    ///
    /// Error payloads also dump their trace to stderr, uncolored, ahead of
    /// the main line.
    fn convert(&self, data: &Payload, dateformat: &str) -> String {
        if let Some(trace) = data.trace() {
            self.sink.write(&OutputLine::new(Stream::Stderr, None, trace));
        }
        timestamp::stamp(&data.converted_text(), &self.clock.now(), dateformat)
    }

    /// Replace (list) or extend (single name) the active levels
    pub fn set_levels(&self, levels: impl Into<Levels>) -> &Self {
        let len = self.update(|s| {
            s.levels.apply(levels.into());
            s.levels.len()
        });
        tracing::debug!(
            component = module_path!(),
            op = "set_levels",
            event = EVENT_LEVELS_CHANGED,
            levels_len = len,
        );
        self
    }

    /// Dynamically-typed `set_levels`
    ///
    /// A JSON array of strings replaces the levels, a JSON string is
    /// appended. Anything else is reported through [`Logger::log`] as an
    /// error payload and the levels stay as they were.
    pub fn set_levels_value(&self, levels: &serde_json::Value) -> &Self {
        match levels {
            serde_json::Value::String(level) => self.set_levels(level.clone()),
            serde_json::Value::Array(items) => {
                let names: Option<Vec<String>> = items
                    .iter()
                    .map(|item| item.as_str().map(str::to_string))
                    .collect();
                match names {
                    Some(names) => self.set_levels(names),
                    None => self.reject_levels("array with non-string items"),
                }
            }
            serde_json::Value::Null => self.reject_levels("null"),
            serde_json::Value::Bool(_) => self.reject_levels("boolean"),
            serde_json::Value::Number(_) => self.reject_levels("number"),
            serde_json::Value::Object(_) => self.reject_levels("object"),
        }
    }

    fn reject_levels(&self, found: &str) -> &Self {
        let err = LoggerError::InvalidLevels {
            found: found.to_string(),
        };
        self.log(Payload::error(&err))
    }

    /// Remove the first occurrence of `level`; absent levels are ignored
    pub fn remove_level(&self, level: &str) -> &Self {
        let removed = self.update(|s| s.levels.remove(level));
        if removed {
            tracing::debug!(
                component = module_path!(),
                op = "remove_level",
                event = EVENT_LEVELS_CHANGED,
                level = level,
            );
        }
        self
    }

    /// Active levels, in order
    pub fn levels(&self) -> Vec<String> {
        self.settings().levels.as_slice().to_vec()
    }

    /// Register `callback` for `event`
    ///
    /// Registrations accumulate and run in order. Pass [`events::noop`]
    /// where no callback is wanted.
    pub fn set_callback<F>(&self, event: impl Into<String>, callback: F) -> &Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.on(event, callback)
    }

    /// Subscribe to `event`; same registry as [`Logger::set_callback`]
    pub fn on<F>(&self, event: impl Into<String>, callback: F) -> &Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let listener: Listener = Arc::new(callback);
        self.registry().add(event, listener);
        self
    }

    /// Invoke every listener of `event` with `text`
    ///
    /// Listeners run after the registry lock is released, so they may log
    /// or subscribe themselves. Returns whether `event` had any listener.
    pub fn emit(&self, event: &str, text: &str) -> bool {
        let listeners = self.registry().snapshot(event);
        events::dispatch(event, &listeners, text, self.listener_policy);
        !listeners.is_empty()
    }

    pub fn listener_count(&self, event: &str) -> usize {
        self.registry().count(event)
    }

    pub fn listener_policy(&self) -> ListenerPolicy {
        self.listener_policy
    }

    pub fn noprefix(&self) -> bool {
        self.settings().noprefix
    }

    pub fn set_noprefix(&self, noprefix: bool) -> &Self {
        self.update(|s| s.noprefix = noprefix);
        self
    }

    pub fn dateformat(&self) -> String {
        self.settings().dateformat.clone()
    }

    pub fn set_dateformat(&self, pattern: impl ToString) -> &Self {
        let pattern = pattern.to_string();
        self.update(|s| s.dateformat = pattern);
        self
    }

    /// Color `severity` is written in
    pub fn color(&self, severity: Severity) -> Color {
        self.settings()
            .colors
            .get(&severity)
            .copied()
            .unwrap_or_else(|| severity.color())
    }

    pub fn set_color(&self, severity: Severity, color: Color) -> &Self {
        self.update(|s| s.colors.insert(severity, color));
        self
    }

    /// How the sink renders colors
    pub fn color_mode(&self) -> ColorMode {
        self.sink.color_mode()
    }
}

macro_rules! severity_ops {
    ($($severity:ident => $plain:ident, $with:ident, $raw:ident;)*) => {
        impl Logger {
            $(
                #[doc = concat!("Emit `data` as `", stringify!($plain), "` with default options")]
                pub fn $plain(&self, data: impl Into<Payload>) -> &Self {
                    self.write(Severity::$severity, data.into(), CallOptions::default())
                }

                #[doc = concat!("Emit `data` as `", stringify!($plain), "` with explicit options")]
                pub fn $with(&self, data: impl Into<Payload>, options: impl Into<CallOptions>) -> &Self {
                    self.write(Severity::$severity, data.into(), options.into())
                }

                #[doc = concat!("Emit `data` as `", stringify!($plain), "` untouched: no filter, timestamp or prefix")]
                pub fn $raw(&self, data: impl Into<Payload>) -> &Self {
                    self.write(Severity::$severity, data.into(), CallOptions::Passthrough)
                }
            )*
        }
    };
}

severity_ops! {
    Log => log, log_with, log_raw;
    Warn => warn, warn_with, warn_raw;
    Error => error, error_with, error_raw;
    Info => info, info_with, info_raw;
    Success => success, success_with, success_raw;
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("settings", &*self.settings())
            .field("listeners", &*self.registry())
            .field("listener_policy", &self.listener_policy)
            .finish_non_exhaustive()
    }
}

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// Process-wide shared logger
///
/// Built on first use from the `PROLOGGER_*` environment. A malformed
/// environment is reported through `tracing` and defaults are used.
pub fn global() -> &'static Logger {
    GLOBAL.get_or_init(|| Logger::from_config(&env_config(|key| std::env::var(key).ok())))
}

/// Defaults overlaid with `lookup`, or plain defaults if the overlay is rejected
fn env_config<F>(lookup: F) -> LoggerConfig
where
    F: Fn(&str) -> Option<String>,
{
    LoggerConfig::default()
        .apply_env_from(lookup)
        .unwrap_or_else(|err| {
            tracing::warn!(
                component = module_path!(),
                op = "global",
                event = EVENT_CONFIG_REJECTED,
                err.code = err.code(),
                reason = %err,
            );
            LoggerConfig::default()
        })
}
