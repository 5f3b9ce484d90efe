use chrono::{DateTime, Local, TimeZone};
use prologger_core::{CallOptions, FixedClock, Logger, MemorySink, Payload, Severity};

/// Timestamp every fixture logger stamps onto converted lines
#[allow(dead_code)]
pub const STAMP: &str = "[2024/01/02 03:04:05.000]";

#[allow(dead_code)]
pub fn fixed_time() -> DateTime<Local> {
    Local
        .with_ymd_and_hms(2024, 1, 2, 3, 4, 5)
        .earliest()
        .unwrap()
}

/// Logger writing to a fresh MemorySink with a fixed clock
#[allow(dead_code)]
pub fn fixture() -> (Logger, MemorySink) {
    let sink = MemorySink::new();
    let logger = Logger::builder()
        .sink(sink.clone())
        .clock(FixedClock(fixed_time()))
        .build();
    (logger, sink)
}

/// Dispatch to the emit operation for `severity`
#[allow(dead_code)]
pub fn emit(
    logger: &Logger,
    severity: Severity,
    data: impl Into<Payload>,
    options: impl Into<CallOptions>,
) {
    match severity {
        Severity::Log => logger.log_with(data, options),
        Severity::Warn => logger.warn_with(data, options),
        Severity::Error => logger.error_with(data, options),
        Severity::Info => logger.info_with(data, options),
        Severity::Success => logger.success_with(data, options),
    };
}
