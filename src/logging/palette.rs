//! Console colors for modules and levels
//!
//! Module colors are assigned by a code-point sum hash so the same module name
//! always renders in the same color.

use crossterm::style::Color;

use super::level::{LogLevel, Severity};

pub const CYAN: Color = Color::AnsiValue(6);
pub const GREEN: Color = Color::AnsiValue(2);
pub const YELLOW: Color = Color::AnsiValue(3);
pub const RED: Color = Color::AnsiValue(1);
pub const BLUE: Color = Color::AnsiValue(4);
pub const MAGENTA: Color = Color::AnsiValue(5);
pub const GRAY: Color = Color::AnsiValue(8);
pub const ORANGE: Color = Color::AnsiValue(208);
pub const LIGHT_GREEN: Color = Color::AnsiValue(119);
pub const LIGHT_BLUE: Color = Color::AnsiValue(117);
pub const VIOLET: Color = Color::AnsiValue(141);
pub const BROWN: Color = Color::AnsiValue(130);
pub const PINK: Color = Color::AnsiValue(219);

/// Module colors, indexed by `int_hash`. Order is fixed.
pub const MODULE_PALETTE: [Color; 10] = [
    CYAN,
    GREEN,
    LIGHT_GREEN,
    BLUE,
    LIGHT_BLUE,
    MAGENTA,
    ORANGE,
    VIOLET,
    BROWN,
    PINK,
];

/// Map a string to an integer in `[0, length)`
///
/// Sums the code points of `s` and reduces modulo `length`.
pub fn int_hash(s: &str, length: usize) -> usize {
    if length == 0 {
        return 0;
    }
    let length = length as u64;
    let sum = s
        .chars()
        .fold(0u64, |acc, c| acc.wrapping_add(u64::from(c as u32)));
    ((sum % length + length) % length) as usize
}

/// Display color for a module name
pub fn module_color(module: &str) -> Color {
    MODULE_PALETTE[int_hash(module, MODULE_PALETTE.len())]
}

/// Color of the level tag; custom tags and NONE are uncolored
pub fn level_color(severity: &Severity) -> Option<Color> {
    match severity {
        Severity::Known(LogLevel::Info) => Some(CYAN),
        Severity::Known(LogLevel::Warn) => Some(YELLOW),
        Severity::Known(LogLevel::Error) => Some(RED),
        Severity::Known(LogLevel::Debug) => Some(GRAY),
        _ => None,
    }
}
