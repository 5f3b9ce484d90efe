//! Timestamp formatting and clocks

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};

/// `2024/03/09 14:05:07.042`: local time, 24-hour, millisecond precision
pub const DEFAULT_DATE_FORMAT: &str = "%Y/%m/%d %H:%M:%S%.3f";

/// Whether `pattern` is a valid strftime pattern
pub fn is_valid_pattern(pattern: &str) -> bool {
    !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

/// Render `date` with a strftime `pattern`
///
/// An invalid pattern falls back to [`DEFAULT_DATE_FORMAT`] instead of
/// panicking inside chrono's `Display`. Some specifiers (`%#z`) parse but
/// refuse to format; those fall back too.
pub fn format_date(date: &DateTime<Local>, pattern: &str) -> String {
    let mut out = String::new();
    if is_valid_pattern(pattern)
        && write!(out, "{}", date.format_with_items(StrftimeItems::new(pattern))).is_ok()
    {
        return out;
    }
    out.clear();
    let _ = write!(
        out,
        "{}",
        date.format_with_items(StrftimeItems::new(DEFAULT_DATE_FORMAT))
    );
    out
}

/// `"[<formatted-date>] <text>"`
pub fn stamp(text: &str, date: &DateTime<Local>, pattern: &str) -> String {
    format!("[{}] {}", format_date(date, pattern), text)
}

/// Source of "now"
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Always returns the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}
