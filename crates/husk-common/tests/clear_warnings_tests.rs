//! Tests for resetting the warning store.
//!
//! Clearing affects every component, so this lives in its own test binary.

use husk_common::warning::{clear_warnings, warn_once, warning_count};

#[test]
fn test_message_warns_again_after_clear() {
    assert!(warn_once("test-clear", "unclosed comment"));
    assert!(!warn_once("test-clear", "unclosed comment"));
    assert_eq!(warning_count("test-clear", "unclosed comment"), 2);

    clear_warnings();
    assert_eq!(warning_count("test-clear", "unclosed comment"), 0);
    assert!(warn_once("test-clear", "unclosed comment"));
    assert_eq!(warning_count("test-clear", "unclosed comment"), 1);
}
