//! Deduplicated warnings.
//!
//! Each distinct message is forwarded to [`log::warn!`] once; repeats only
//! bump a counter. The tokenizer reports parse errors here, so a page full of
//! the same mistake logs it once. The tree builder calls [`clear_warnings`]
//! before each document.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Messages already forwarded, with the number of times each was raised.
static WARNED: Mutex<Option<HashMap<String, usize>>> = Mutex::new(None);

/// Warn about a recoverable problem (logged once per unique message).
///
/// Returns `true` if this call emitted the warning, `false` if it was a repeat.
///
/// # Example
/// ```
/// use husk_common::warning::warn_once;
///
/// let _ = warn_once("Tokenizer", "eof-in-tag parse error");
/// ```
pub fn warn_once(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    let count = guard.get_or_insert_with(HashMap::new).entry(key).or_insert(0);
    *count += 1;

    if *count == 1 {
        log::warn!(target: "husk", "[{component}] {message}");
        true
    } else {
        false
    }
}

/// Number of times a message has been raised since the last [`clear_warnings`].
#[must_use]
pub fn warning_count(component: &str, message: &str) -> usize {
    let key = format!("[{component}] {message}");
    let guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    guard
        .as_ref()
        .and_then(|seen| seen.get(&key).copied())
        .unwrap_or(0)
}

/// Forget all recorded warnings, so every message warns again.
///
/// Call before processing an unrelated document.
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(seen) = guard.as_mut() {
        seen.clear();
    }
}
