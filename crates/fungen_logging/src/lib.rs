#![deny(missing_docs)]
//! Shared logging utilities for the FunGen plugin workspace.
//!
//! This crate provides the `fungen_*` logging macros used across the codebase,
//! the stderr logger installed by the binary, and a minimal test initializer.
//!
//! Standard output is reserved for the single JSON result line, so every
//! logger configured here writes to standard error.

use log::LevelFilter;
use simplelog::{ColorChoice, Config, ConfigBuilder, TermLogger, TerminalMode};

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! fungen_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! fungen_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! fungen_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! fungen_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! fungen_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Installs the process-wide logger, writing one line per event to stderr.
///
/// Colors are disabled because the plugin host captures stderr verbatim.
/// Safely no-ops if a logger has already been installed.
pub fn initialize_stderr(level: LevelFilter) {
    let _ = TermLogger::init(level, build_config(), TerminalMode::Stderr, ColorChoice::Never);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto);
}
