//! Listener registry
//!
//! Maps an event name to the ordered list of callbacks registered for it.
//! Invocation is synchronous, in registration order, on the caller's thread.

use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use prologger_core_types::schema::EVENT_LISTENER_PANICKED;

use crate::errors::LoggerErrorKind;

/// A registered callback, invoked with the final formatted text
pub type Listener = Arc<dyn Fn(&str) + Send + Sync>;

/// Stand-in for an omitted callback
pub fn noop(_text: &str) {}

/// What happens when a listener panics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListenerPolicy {
    /// The panic unwinds out of the emitting call
    #[default]
    Propagate,
    /// Each listener runs under `catch_unwind`; a panic is reported through
    /// `tracing` and the remaining listeners still run
    Isolate,
}

#[derive(Default)]
pub struct EventRegistry {
    listeners: HashMap<String, Vec<Listener>>,
}

impl EventRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener for `event`; registration is additive only
    pub fn add(&mut self, event: impl Into<String>, listener: Listener) {
        self.listeners.entry(event.into()).or_default().push(listener);
    }

    /// Snapshot of the listeners for `event`
    ///
    /// Callers invoke the snapshot after releasing any lock around the
    /// registry, so a listener may register further listeners or log.
    pub fn snapshot(&self, event: &str) -> Vec<Listener> {
        self.listeners.get(event).cloned().unwrap_or_default()
    }

    pub fn count(&self, event: &str) -> usize {
        self.listeners.get(event).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let counts: HashMap<&str, usize> = self
            .listeners
            .iter()
            .map(|(event, list)| (event.as_str(), list.len()))
            .collect();
        f.debug_struct("EventRegistry")
            .field("listeners", &counts)
            .finish()
    }
}

/// Invoke `listeners` in order with `text`
///
/// Returns how many listeners completed without panicking.
pub fn dispatch(event: &str, listeners: &[Listener], text: &str, policy: ListenerPolicy) -> usize {
    match policy {
        ListenerPolicy::Propagate => {
            for listener in listeners {
                listener(text);
            }
            listeners.len()
        }
        ListenerPolicy::Isolate => {
            let mut completed = 0;
            for (index, listener) in listeners.iter().enumerate() {
                match panic::catch_unwind(AssertUnwindSafe(|| listener(text))) {
                    Ok(()) => completed += 1,
                    Err(cause) => {
                        let reason = panic_message(cause.as_ref());
                        tracing::error!(
                            component = module_path!(),
                            op = "dispatch",
                            event = EVENT_LISTENER_PANICKED,
                            listener_event = event,
                            listener_index = index,
                            reason = %reason,
                            err.code = LoggerErrorKind::ListenerPanic.code(),
                        );
                    }
                }
            }
            completed
        }
    }
}

fn panic_message(cause: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = cause.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = cause.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
