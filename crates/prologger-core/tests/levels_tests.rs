//! Level Tests
//!
//! This test suite verifies the named-level allow-list.
//!
//! ## Scenarios Covered
//!
//! 1. Lists replace the active levels, single names append
//! 2. Removing present and absent levels
//! 3. Dynamically-typed level input, including invalid shapes
//! 4. Property checks over arbitrary level names

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{fixture, STAMP};
use prologger_core::{LogOptions, Logger, MemorySink};
use proptest::prelude::*;
use serde_json::json;

#[test]
fn test_set_then_remove() {
    let (logger, _sink) = fixture();
    logger.set_levels(["a", "b"]).remove_level("a");
    assert_eq!(logger.levels(), vec!["b"]);
}

#[test]
fn test_string_appends() {
    let (logger, _sink) = fixture();
    logger.set_levels(["b"]).set_levels("c");
    assert_eq!(logger.levels(), vec!["b", "c"]);
}

#[test]
fn test_list_replaces() {
    let (logger, _sink) = fixture();
    logger
        .set_levels(vec!["a".to_string()])
        .set_levels(vec!["x", "y"]);
    assert_eq!(logger.levels(), vec!["x", "y"]);
}

#[test]
fn test_remove_absent_is_noop() {
    let (logger, sink) = fixture();
    logger.set_levels(["a"]).remove_level("zzz");
    assert_eq!(logger.levels(), vec!["a"]);
    assert!(sink.is_empty());
}

#[test]
fn test_value_array_replaces_and_string_appends() {
    let (logger, _sink) = fixture();
    logger
        .set_levels_value(&json!(["net", "db"]))
        .set_levels_value(&json!("cache"));
    assert_eq!(logger.levels(), vec!["net", "db", "cache"]);
}

#[test]
fn test_value_invalid_is_logged_not_raised() {
    for bad in [json!(5), json!(null), json!({"a": 1}), json!(true), json!(["ok", 1])] {
        let (logger, sink) = fixture();
        logger.set_levels(["keep"]);

        logger.set_levels_value(&bad);

        assert_eq!(logger.levels(), vec!["keep"], "input {}", bad);
        let stdout = sink.stdout();
        assert_eq!(stdout, vec![format!("[LOG]: {} Levels must be a Array or String", STAMP)]);
        let stderr = sink.stderr();
        assert_eq!(stderr.len(), 1);
        assert!(stderr[0].starts_with("Error: Levels must be a Array or String"));
    }
}

#[test]
fn test_tagged_call_passes_after_level_added() {
    let (logger, sink) = fixture();
    logger.info_with("first", LogOptions::new().level("late"));
    logger.set_levels("late");
    logger.info_with("second", LogOptions::new().level("late"));
    logger.remove_level("late");
    logger.info_with("third", LogOptions::new().level("late"));

    assert_eq!(sink.stdout(), vec![format!("[INFO]: {} second", STAMP)]);
}

#[test]
fn test_builder_levels() {
    let logger = Logger::builder()
        .sink(MemorySink::new())
        .levels(["a", "b"])
        .levels("c")
        .build();
    assert_eq!(logger.levels(), vec!["a", "b", "c"]);
}

proptest! {
    #[test]
    fn prop_tagged_call_emits_iff_level_active(
        active in proptest::collection::vec("[a-d]{1,2}", 0..5),
        level in "[a-d]{1,2}",
    ) {
        let (logger, sink) = fixture();
        logger.set_levels(active.clone());

        logger.log_with("m", LogOptions::new().level(level.clone()));

        let expected = usize::from(active.contains(&level));
        prop_assert_eq!(sink.len(), expected);
    }

    #[test]
    fn prop_remove_drops_exactly_one_occurrence(
        active in proptest::collection::vec("[a-c]", 0..6),
        target in "[a-c]",
    ) {
        let (logger, _sink) = fixture();
        logger.set_levels(active.clone());
        logger.remove_level(&target);

        let before = active.iter().filter(|l| **l == target).count();
        let after = logger.levels().iter().filter(|l| **l == target).count();
        prop_assert_eq!(after, before.saturating_sub(1));
        prop_assert_eq!(logger.levels().len(), active.len() - usize::from(before > 0));
    }
}
