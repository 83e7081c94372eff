//! Logging core
//!
//! Leveled, module-tagged console logging with deterministic module colors and
//! an optional append-only file sink.

mod console;
mod format;
mod global;
mod level;
mod logger;
mod palette;
mod sink;

pub use console::{Console, ConsoleStream, OutputCapabilities, StdConsole, ENV_VAR};
pub use format::{render_colored, render_plain, timestamp_now, LineParts, Message, TIMESTAMP_FORMAT};
pub use global::{close_global, get_instance, get_instance_with, try_instance};
pub use level::{LogLevel, ParseLevelError, Severity};
pub use logger::{exception_message, Logger};
pub use palette::{int_hash, level_color, module_color, MODULE_PALETTE};
pub use sink::FileSink;
