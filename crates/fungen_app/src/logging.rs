//! Logger initialization for the plugin binary.
//!
//! Everything goes to stderr; stdout carries only the JSON result.

use std::str::FromStr;

use log::LevelFilter;

/// Overrides the default `info` level, e.g. `FUNGEN_LOG=debug`.
const LEVEL_ENV: &str = "FUNGEN_LOG";

pub fn initialize() {
    let level = std::env::var(LEVEL_ENV)
        .ok()
        .and_then(|raw| LevelFilter::from_str(raw.trim()).ok())
        .unwrap_or(LevelFilter::Info);
    fungen_logging::initialize_stderr(level);
}
