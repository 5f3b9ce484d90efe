//! Log call payloads
//!
//! A log call accepts loosely-typed data: plain text, anything serializable,
//! or an error value. `Payload` closes that set so the facade can apply the
//! convert pipeline uniformly.

use serde::Serialize;
use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt::{self, Debug, Display, Write as _};

/// An error value captured for logging
///
/// `message` is what ends up in the main output line; `trace` is written to
/// stderr separately as a debug side-channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPayload {
    message: String,
    trace: String,
}

impl ErrorPayload {
    pub fn new(message: impl Into<String>, trace: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            trace: trace.into(),
        }
    }

    /// Capture an error's message, its source chain, and a backtrace when
    /// `RUST_BACKTRACE`/`RUST_LIB_BACKTRACE` enables one
    pub fn from_error<E>(err: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        let message = err.to_string();
        let mut trace = format!("Error: {}", message);

        let mut source = err.source();
        while let Some(cause) = source {
            let _ = write!(trace, "\n    caused by: {}", cause);
            source = cause.source();
        }

        let backtrace = Backtrace::capture();
        if backtrace.status() == BacktraceStatus::Captured {
            let _ = write!(trace, "\n{}", backtrace);
        }

        Self { message, trace }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn trace(&self) -> &str {
        &self.trace
    }
}

impl Display for ErrorPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.message)
    }
}

/// Data handed to an emit operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    /// Strings, numbers, and anything else rendered through `Display`
    Text(String),
    /// A structured value
    ///
    /// `json` is the serde_json rendering, `None` when serialization failed.
    /// `raw` is the unconverted rendering, used by `noconvert` and as the
    /// fallback when serialization failed.
    Structured { json: Option<String>, raw: String },
    /// An error value
    Error(ErrorPayload),
}

impl Payload {
    pub fn text(value: impl Display) -> Self {
        Payload::Text(value.to_string())
    }

    /// Wrap a serializable value
    ///
    /// A serialization failure is not an error here: the value keeps its
    /// `Debug` rendering and convert falls back to it.
    pub fn structured<T>(value: &T) -> Self
    where
        T: Serialize + Debug + ?Sized,
    {
        Payload::Structured {
            json: serde_json::to_string(value).ok(),
            raw: format!("{:?}", value),
        }
    }

    pub fn error<E>(err: &E) -> Self
    where
        E: std::error::Error + ?Sized,
    {
        Payload::Error(ErrorPayload::from_error(err))
    }

    /// The rendering used when conversion is skipped
    pub fn raw(&self) -> String {
        match self {
            Payload::Text(text) => text.clone(),
            Payload::Structured { raw, .. } => raw.clone(),
            Payload::Error(err) => err.to_string(),
        }
    }

    /// The working string convert stamps a timestamp onto
    ///
    /// Errors reduce to their message; structured values to their JSON,
    /// or to the raw rendering if serialization failed.
    pub fn converted_text(&self) -> String {
        match self {
            Payload::Text(text) => text.clone(),
            Payload::Structured { json, raw } => json.clone().unwrap_or_else(|| raw.clone()),
            Payload::Error(err) => err.message.clone(),
        }
    }

    /// Diagnostic trace for error payloads
    pub fn trace(&self) -> Option<&str> {
        match self {
            Payload::Error(err) => Some(err.trace()),
            _ => None,
        }
    }
}

impl From<&str> for Payload {
    fn from(value: &str) -> Self {
        Payload::Text(value.to_string())
    }
}

impl From<String> for Payload {
    fn from(value: String) -> Self {
        Payload::Text(value)
    }
}

impl From<&String> for Payload {
    fn from(value: &String) -> Self {
        Payload::Text(value.clone())
    }
}

impl From<serde_json::Value> for Payload {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(text) => Payload::Text(text),
            other => {
                let rendered = other.to_string();
                Payload::Structured {
                    json: Some(rendered.clone()),
                    raw: rendered,
                }
            }
        }
    }
}

impl From<ErrorPayload> for Payload {
    fn from(value: ErrorPayload) -> Self {
        Payload::Error(value)
    }
}

macro_rules! text_payload_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Payload {
                fn from(value: $ty) -> Self {
                    Payload::Text(value.to_string())
                }
            }
        )*
    };
}

text_payload_from!(bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[derive(Debug)]
    struct Outer {
        inner: std::io::Error,
    }

    impl Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "outer failed")
        }
    }

    impl std::error::Error for Outer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.inner)
        }
    }

    #[test]
    fn test_text_is_unchanged() {
        let payload = Payload::from("hello");
        assert_eq!(payload.raw(), "hello");
        assert_eq!(payload.converted_text(), "hello");
        assert!(payload.trace().is_none());
    }

    #[test]
    fn test_numbers_render_as_text() {
        assert_eq!(Payload::from(42).converted_text(), "42");
        assert_eq!(Payload::from(1.5).converted_text(), "1.5");
        assert_eq!(Payload::from(false).converted_text(), "false");
    }

    #[test]
    fn test_json_object_serializes() {
        let payload = Payload::from(json!({"a": 1}));
        assert_eq!(payload.converted_text(), r#"{"a":1}"#);
    }

    #[test]
    fn test_json_string_is_text() {
        assert_eq!(Payload::from(json!("plain")), Payload::Text("plain".to_string()));
    }

    #[test]
    fn test_serialization_failure_falls_back_to_raw() {
        let mut map = HashMap::new();
        map.insert((1, 2), "tuple key");
        let payload = Payload::structured(&map);

        match &payload {
            Payload::Structured { json, .. } => assert!(json.is_none()),
            other => panic!("unexpected payload: {:?}", other),
        }
        assert_eq!(payload.converted_text(), payload.raw());
        assert!(payload.raw().contains("tuple key"));
    }

    #[test]
    fn test_error_extracts_message_and_chain() {
        let err = Outer {
            inner: std::io::Error::new(std::io::ErrorKind::NotFound, "missing file"),
        };
        let payload = Payload::error(&err);

        assert_eq!(payload.converted_text(), "outer failed");
        assert_eq!(payload.raw(), "Error: outer failed");
        let trace = payload.trace().unwrap();
        assert!(trace.starts_with("Error: outer failed"));
        assert!(trace.contains("caused by: missing file"));
    }
}
