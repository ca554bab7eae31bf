//! Bridge warnings with colored terminal output.
//!
//! Failures inside the bridge are reported to callers as values, never as
//! panics. Some of them (a plugin script that throws while loading, a
//! function name that never resolves) are still worth a line on stderr, so
//! they go through here. Each distinct message is printed once.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use owo_colors::OwoColorize;

/// Global set of warnings we've already printed (to deduplicate)
static WARNED: Mutex<Option<HashSet<String>>> = Mutex::new(None);

/// Whether warnings are written to stderr at all
static ENABLED: AtomicBool = AtomicBool::new(true);

/// Warn about a bridge failure (prints once per unique message).
///
/// # Example
/// ```ignore
/// warn_once("JS", "plugin script threw: ReferenceError: foo is not defined");
/// ```
pub fn warn_once(component: &str, message: &str) {
    if record(component, message) && is_enabled() {
        let line = format!("[Tether {component}] ⚠ {message}");
        eprintln!("{}", line.yellow());
    }
}

/// Remember a warning key; `true` the first time it is seen.
fn record(component: &str, message: &str) -> bool {
    WARNED
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get_or_insert_with(HashSet::new)
        .insert(format!("[{component}] {message}"))
}

/// Clear all recorded warnings so they may be printed again.
pub fn clear_warnings() {
    let mut guard = WARNED.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(set) = guard.as_mut() {
        set.clear();
    }
}

/// Turn warning output on or off. Deduplication bookkeeping continues
/// either way.
pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

/// Whether warnings are currently written to stderr.
#[must_use]
pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}
