//! In-memory diagnostics capture
//!
//! Installs a global subscriber whose only layer records every event, so
//! tests can assert that the logger made a decision (for example, that a
//! call was suppressed) without scraping stderr.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::field::{Field, Visit};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use prologger_core_types::schema::{FIELD_EVENT, FIELD_OP, FIELD_SEVERITY};

/// One recorded diagnostics event
#[derive(Clone, Debug)]
pub struct CapturedEvent {
    pub level: Level,
    pub target: String,
    pub op: Option<String>,
    pub event: Option<String>,
    pub severity: Option<String>,
    pub fields: HashMap<String, String>,
}

impl CapturedEvent {
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}

#[derive(Default)]
struct FieldVisitor {
    fields: HashMap<String, String>,
}

impl Visit for FieldVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.fields
            .insert(field.name().to_string(), format!("{:?}", value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.fields
            .insert(field.name().to_string(), value.to_string());
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.fields
            .insert(field.name().to_string(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.fields
            .insert(field.name().to_string(), value.to_string());
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.fields
            .insert(field.name().to_string(), value.to_string());
    }
}

struct CaptureLayer {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl<S> Layer<S> for CaptureLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let captured = CapturedEvent {
            level: *metadata.level(),
            target: metadata.target().to_string(),
            op: visitor.fields.get(FIELD_OP).cloned(),
            event: visitor.fields.get(FIELD_EVENT).cloned(),
            severity: visitor.fields.get(FIELD_SEVERITY).cloned(),
            fields: visitor.fields,
        };

        self.events
            .lock()
            .map(|mut events| events.push(captured))
            .ok();
    }
}

/// Handle onto the captured events
///
/// The buffer is process-wide; tests running in parallel should filter by a
/// value unique to the test (an op name, a level name).
#[derive(Clone)]
pub struct DiagnosticsCapture {
    events: Arc<Mutex<Vec<CapturedEvent>>>,
}

impl DiagnosticsCapture {
    pub fn events(&self) -> Vec<CapturedEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Count events matching a predicate
    pub fn count_events<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CapturedEvent) -> bool,
    {
        self.events().iter().filter(|e| predicate(e)).count()
    }

    /// Assert that an event with the given op and event name was recorded
    ///
    /// # Panics
    ///
    /// Panics if no such event exists
    pub fn assert_event_exists(&self, op: &str, event: &str) {
        let events = self.events();
        let found = events
            .iter()
            .any(|e| e.op.as_deref() == Some(op) && e.event.as_deref() == Some(event));
        assert!(
            found,
            "Expected diagnostics op={} event={} not found in {} captured events",
            op,
            event,
            events.len()
        );
    }

    pub fn clear(&self) {
        self.events.lock().map(|mut e| e.clear()).ok();
    }
}

static GLOBAL_CAPTURE: OnceLock<DiagnosticsCapture> = OnceLock::new();

/// Install the capture subscriber (once) and return a handle to it
///
/// # Example
///
/// ```
/// use prologger_core::logging_facility::test_capture::init_test_capture;
/// use prologger_core::{Logger, LogOptions, MemorySink};
///
/// let capture = init_test_capture();
/// let logger = Logger::builder().sink(MemorySink::new()).build();
/// logger.log_with("hidden", LogOptions::new().level("doc-example"));
/// capture.assert_event_exists("log", "suppressed");
/// ```
pub fn init_test_capture() -> DiagnosticsCapture {
    GLOBAL_CAPTURE
        .get_or_init(|| {
            let events = Arc::new(Mutex::new(Vec::new()));
            let layer = CaptureLayer {
                events: events.clone(),
            };
            tracing_subscriber::registry().with(layer).try_init().ok();
            DiagnosticsCapture { events }
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_captured_event_field_lookup() {
        let mut fields = HashMap::new();
        fields.insert("level".to_string(), "net".to_string());
        let event = CapturedEvent {
            level: Level::DEBUG,
            target: "prologger_core::facade".to_string(),
            op: Some("log".to_string()),
            event: Some("suppressed".to_string()),
            severity: Some("log".to_string()),
            fields,
        };

        let cloned = event.clone();
        assert_eq!(cloned.field("level"), Some("net"));
        assert_eq!(cloned.field("missing"), None);
        assert_eq!(cloned.level, Level::DEBUG);
    }
}
