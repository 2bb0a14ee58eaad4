// file: src/formatter/color.rs
// version: 1.0.0
// guid: 5eaf85a4-1053-4c12-b1d8-71e7da6ae75a

//! ANSI color table keyed by severity

use crate::level::Level;

/// Escape sequence that resets all attributes
pub const RESET_CODE: &str = "\x1b[0m";

/// Escape sequence for a level, if the level is in the color table
pub fn color_code(level: Level) -> Option<&'static str> {
    match level {
        Level::Critical => Some("\x1b[1;97;41m"), // bold bright white on red
        Level::Error => Some("\x1b[1;31m"),       // bold red
        Level::Warning => Some("\x1b[0;33m"),     // yellow
        Level::Info => Some("\x1b[0;37m"),        // white
        Level::Debug => Some("\x1b[2;37m"),       // dim gray
        Level::Trace => None,
    }
}

/// `(color_on, color_off)` markers for a record
pub fn markers(level: Level, enabled: bool) -> (&'static str, &'static str) {
    match color_code(level) {
        Some(code) if enabled => (code, RESET_CODE),
        _ => ("", ""),
    }
}
