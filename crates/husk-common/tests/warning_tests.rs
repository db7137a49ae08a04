//! Tests for the deduplicated warning helper.

use husk_common::warning::{warn_once, warning_count};

// Each test uses its own component name: the store is process-wide and tests
// run in parallel.

#[test]
fn test_first_warning_is_emitted() {
    assert!(warn_once("test-first", "unexpected character"));
    assert_eq!(warning_count("test-first", "unexpected character"), 1);
}

#[test]
fn test_repeated_warning_is_suppressed_but_counted() {
    assert!(warn_once("test-repeat", "stray end tag"));
    assert!(!warn_once("test-repeat", "stray end tag"));
    assert!(!warn_once("test-repeat", "stray end tag"));
    assert_eq!(warning_count("test-repeat", "stray end tag"), 3);
}

#[test]
fn test_distinct_messages_are_tracked_separately() {
    assert!(warn_once("test-distinct", "a"));
    assert!(warn_once("test-distinct", "b"));
    assert!(warn_once("test-distinct-other", "a"));
    assert_eq!(warning_count("test-distinct", "a"), 1);
    assert_eq!(warning_count("test-distinct", "b"), 1);
}

#[test]
fn test_unknown_message_has_zero_count() {
    assert_eq!(warning_count("test-unknown", "never raised"), 0);
}
