//! Logging with colored module prefixes.
//!
//! Everything goes to stderr so stdout stays free for the JSON dump.
//!
//! ```ignore
//! log!("config"; "loaded {} in {:?}", name, elapsed);
//! ```

use owo_colors::OwoColorize;
use std::io::{Write, stderr};

// ============================================================================
// Log Macro
// ============================================================================

/// Log a message with a colored module prefix
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Log a message with a colored module prefix
#[inline]
pub fn log(module: &str, message: &str) {
    let mut stderr = stderr().lock();
    writeln!(stderr, "{} {message}", prefix(module)).ok();
    stderr.flush().ok();
}

/// Colored `[module]` prefix, for output written outside `log!`.
pub fn prefix(module: &str) -> String {
    colorize_prefix(module, &module.to_ascii_lowercase())
}

/// Apply color to a module prefix based on module type
#[inline]
fn colorize_prefix(module: &str, module_lower: &str) -> String {
    let prefix = format!("[{module}]");
    match module_lower {
        "error" => prefix.bright_red().bold().to_string(),
        "warning" => prefix.yellow().bold().to_string(),
        "hint" => prefix.bright_cyan().bold().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}
