//! Output sinks
//!
//! The facade never writes to the process streams directly; it hands each
//! finished line to a `Sink`.

use std::sync::{Arc, Mutex};

use prologger_core_types::{Color, Stream};

use crate::color::{colorize, paint};
use crate::config::ColorMode;

/// A finished line, before color is applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub stream: Stream,
    /// `None` for the uncolored error-trace side-channel
    pub color: Option<Color>,
    pub text: String,
}

impl OutputLine {
    pub fn new(stream: Stream, color: Option<Color>, text: impl Into<String>) -> Self {
        Self {
            stream,
            color,
            text: text.into(),
        }
    }
}

pub trait Sink: Send + Sync {
    fn write(&self, line: &OutputLine);

    /// How this sink turns `OutputLine::color` into terminal output
    fn color_mode(&self) -> ColorMode {
        ColorMode::Never
    }
}

/// Writes to stdout/stderr, colored according to its [`ColorMode`]
///
/// The mode belongs to the sink, so two loggers in one process can color
/// differently.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink {
    mode: ColorMode,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: ColorMode) -> Self {
        Self { mode }
    }

    pub fn render(&self, line: &OutputLine) -> String {
        match (line.color, self.mode) {
            (Some(color), ColorMode::Auto) => colorize(&line.text, color),
            (Some(color), ColorMode::Always) => paint(&line.text, color),
            (None, _) | (_, ColorMode::Never) => line.text.clone(),
        }
    }
}

impl Sink for ConsoleSink {
    fn write(&self, line: &OutputLine) {
        let rendered = self.render(line);
        match line.stream {
            Stream::Stdout => println!("{}", rendered),
            Stream::Stderr => eprintln!("{}", rendered),
        }
    }

    fn color_mode(&self) -> ColorMode {
        self.mode
    }
}

/// Records lines in memory
///
/// Clones share the same buffer, so a test keeps one handle and gives the
/// other to the logger.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    lines: Arc<Mutex<Vec<OutputLine>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<OutputLine> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    pub fn texts(&self, stream: Stream) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|l| l.stream == stream)
            .map(|l| l.text)
            .collect()
    }

    pub fn stdout(&self) -> Vec<String> {
        self.texts(Stream::Stdout)
    }

    pub fn stderr(&self) -> Vec<String> {
        self.texts(Stream::Stderr)
    }

    pub fn len(&self) -> usize {
        self.lines.lock().map(|l| l.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lines.lock().map(|mut l| l.clear()).ok();
    }
}

impl Sink for MemorySink {
    fn write(&self, line: &OutputLine) {
        self.lines
            .lock()
            .map(|mut lines| lines.push(line.clone()))
            .ok();
    }
}
