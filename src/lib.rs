//! modlog - leveled, module-tagged console logging
//!
//! Renders `<timestamp> [<MODULE>] <LEVEL>: <message>` lines to the console,
//! color-coded on a terminal, and optionally appends them to a file.

pub mod config;
pub mod error;
pub mod logging;
pub mod shutdown;

pub use error::{LogError, Result};
pub use logging::{get_instance, Logger, LogLevel, Message};
