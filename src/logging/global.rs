//! Process-wide logger accessor
//!
//! The first successful `get_instance` call fixes the logger for the rest of
//! the process. Arguments passed to later calls are ignored.

use std::path::Path;
use std::sync::{Mutex, OnceLock, PoisonError};

use crate::error::Result;

use super::console::OutputCapabilities;
use super::level::LogLevel;
use super::logger::Logger;

static INSTANCE: OnceLock<Logger> = OnceLock::new();
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// Get the process-wide logger, constructing it on first call
///
/// `level` is parsed case-insensitively; an unknown name passes everything
/// through (DEBUG), the same as `Logger::set_level`. Failing to open `sink`
/// is returned and leaves the logger unconstructed, so a later call may retry.
pub fn get_instance(level: &str, sink: Option<&Path>) -> Result<&'static Logger> {
    get_instance_with(level, sink, OutputCapabilities::detect)
}

/// `get_instance` with explicit output capabilities
pub fn get_instance_with(
    level: &str,
    sink: Option<&Path>,
    caps: impl FnOnce() -> OutputCapabilities,
) -> Result<&'static Logger> {
    if let Some(logger) = INSTANCE.get() {
        tracing::debug!("Logger already constructed; ignoring level '{}'", level);
        return Ok(logger);
    }

    let _guard = INIT_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(logger) = INSTANCE.get() {
        return Ok(logger);
    }

    let threshold = LogLevel::parse_or_pass_through(level);
    let logger = Logger::new(threshold, sink, caps())?;
    Ok(INSTANCE.get_or_init(|| logger))
}

/// The process-wide logger, if it has been constructed
pub fn try_instance() -> Option<&'static Logger> {
    INSTANCE.get()
}

/// Close the process-wide logger's sink, if any
///
/// Safe to call from several shutdown paths.
pub fn close_global() -> Result<()> {
    match INSTANCE.get() {
        Some(logger) => logger.close(),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The instance is process-wide, so one test covers the whole lifecycle
    #[test]
    fn test_global_lifecycle() {
        assert!(close_global().is_ok());

        let first = get_instance_with("warn", None, OutputCapabilities::plain).unwrap();
        assert_eq!(first.threshold(), LogLevel::Warn);

        let second = get_instance_with("debug", None, OutputCapabilities::plain).unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(second.threshold(), LogLevel::Warn);

        assert!(try_instance().is_some());
        second.set_level("verbose");
        assert_eq!(second.threshold(), LogLevel::Debug);
        assert!(close_global().is_ok());
        assert!(close_global().is_ok());
    }
}
