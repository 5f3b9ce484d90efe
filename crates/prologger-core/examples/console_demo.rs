//! Console Logger Demonstration
//!
//! Walks through the facade against the real terminal.
//!
//! Key concepts illustrated:
//! 1. Severity operations and their streams/colors
//! 2. Level filtering (and the untagged-call bypass)
//! 3. Prefix suppression, noconvert and passthrough
//! 4. Listeners and custom events
//! 5. Error payloads with a trace side-channel

#![allow(clippy::unwrap_used, clippy::expect_used)]

use prologger_core::logging_facility::{init, Profile};
use prologger_core::{global, noop, Color, LogOptions, Payload, Severity};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init(Profile::from_env());
    let log = global();

    println!("=== prologger Demo ===\n");

    // ===== Part 1: Severities =====
    println!("## Part 1: Severities\n");
    log.log("plain log line")
        .info("info goes to stdout in blue")
        .success("success goes to stdout in green")
        .warn("warn goes to stderr in yellow")
        .error("error goes to stderr in red");
    log.set_color(Severity::Info, Color::Magenta)
        .info("info recolored to magenta")
        .set_color(Severity::Info, Color::Blue);

    // ===== Part 2: Level filtering =====
    println!("\n## Part 2: Level filtering\n");
    log.set_levels(["net"]);
    log.info_with("net is active, so this prints", LogOptions::new().level("net"));
    log.info_with("db is not, so this is dropped", LogOptions::new().level("db"));
    log.info("untagged calls always print");
    log.set_levels("db");
    log.info_with("db was appended", LogOptions::new().level("db"));
    log.remove_level("db");
    println!("active levels: {:?}", log.levels());

    // ===== Part 3: Formatting switches =====
    println!("\n## Part 3: Formatting\n");
    log.set_noprefix(true);
    log.log("no [LOG] tag");
    log.log_with("forced tag", LogOptions::new().prefix(true));
    log.log_with("no timestamp", LogOptions::new().noconvert(true));
    log.log_raw("passthrough: nothing added");
    log.set_noprefix(false);
    log.set_dateformat("%H:%M:%S");
    log.info(json!({"structured": true, "count": 3}));

    // ===== Part 4: Listeners =====
    println!("\n## Part 4: Listeners\n");
    log.set_callback("success", |line| println!("  -> listener saw: {}", line));
    log.set_callback("customLevel", noop);
    log.success("listeners run after the write");
    log.emit("customLevel", "only manual emits reach custom events");

    // ===== Part 5: Errors =====
    println!("\n## Part 5: Errors\n");
    let err = std::fs::read_to_string("/nonexistent/prologger.toml").unwrap_err();
    log.error(Payload::error(&err));
    log.set_levels_value(&json!(42));

    println!("\n=== Demo Complete ===");
    Ok(())
}
