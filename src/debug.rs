//! Debug logging
//!
//! `--debug` turns on `[DEBUG]` lines on stderr: freshness comparisons,
//! tool probes and every command line handed to the runner. Progress that
//! users always see goes to stdout instead.

use std::sync::OnceLock;

static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

/// Initialize debug mode from the command-line flag (first call wins)
pub fn init_debug(enabled: bool) {
    let _ = DEBUG_ENABLED.set(enabled);
}

/// Check if debug mode is enabled
pub fn is_debug_enabled() -> bool {
    DEBUG_ENABLED.get().copied().unwrap_or(false)
}

/// Print a debug line when `--debug` was given
///
/// Usage: `debug!("probing {} on {}", tool, path)`
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        if $crate::debug::is_debug_enabled() {
            eprintln!("[DEBUG] {}", format_args!($($arg)*));
        }
    };
}
