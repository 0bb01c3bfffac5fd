//! Deduplicated warnings for unsupported parser features.
//!
//! Tolerant parsing means many constructs are accepted but only partially
//! modelled (foreign content namespaces, template contents). Each distinct
//! notice is forwarded to the `log` facade once per process so a long
//! document does not repeat the same line for every occurrence.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};

/// Global set of warnings already emitted.
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Warn about an unsupported feature (logged once per unique message).
///
/// # Example
/// ```
/// use lark_common::warning::{warn_once, was_warned};
///
/// warn_once("HTML Parser", "<svg> parsed without namespace");
/// assert!(was_warned("HTML Parser", "<svg> parsed without namespace"));
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    // A poisoned lock only means another thread panicked mid-insert; the
    // set itself is still usable.
    let inserted = WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(key);

    if inserted {
        log::warn!(target: "lark", "[{component}] {message}");
    }
}

/// Clear all recorded warnings (call before parsing an unrelated document).
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

/// Returns true if the given warning has already been emitted.
#[must_use]
pub fn was_warned(component: &str, message: &str) -> bool {
    let key = format!("[{component}] {message}");
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .is_some_and(|set| set.contains(&key))
}
