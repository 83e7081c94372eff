//! The logger
//!
//! All public emission methods funnel into `Logger::emit`, which filters,
//! renders and writes one line to the console and, if configured, the sink.

use std::fmt;
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::Result;

use super::console::{Console, ConsoleStream, OutputCapabilities, StdConsole};
use super::format::{self, LineParts, Message};
use super::level::{LogLevel, Severity};
use super::sink::FileSink;

/// Mutable logger state, guarded by one lock
struct LoggerState {
    threshold: LogLevel,
    sink: Option<FileSink>,
}

/// Leveled, module-tagged logger
pub struct Logger {
    state: Mutex<LoggerState>,
    console: Box<dyn Console>,
    caps: OutputCapabilities,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock_state();
        f.debug_struct("Logger")
            .field("threshold", &state.threshold)
            .field("sink", &state.sink.as_ref().map(|s| s.path().to_path_buf()))
            .field("caps", &self.caps)
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// Create a logger writing to stdout/stderr
    ///
    /// When `sink_path` is given the file is opened in append mode; failing to
    /// open it is returned as an error.
    pub fn new(
        threshold: LogLevel,
        sink_path: Option<&Path>,
        caps: OutputCapabilities,
    ) -> Result<Self> {
        Self::with_console(threshold, sink_path, caps, StdConsole)
    }

    /// Create a logger writing console lines to `console`
    pub fn with_console(
        threshold: LogLevel,
        sink_path: Option<&Path>,
        caps: OutputCapabilities,
        console: impl Console + 'static,
    ) -> Result<Self> {
        let sink = sink_path.map(FileSink::open).transpose()?;
        Ok(Self {
            state: Mutex::new(LoggerState { threshold, sink }),
            console: Box::new(console),
            caps,
        })
    }

    // A panic while holding the lock must not disable logging or shutdown
    fn lock_state(&self) -> MutexGuard<'_, LoggerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn capabilities(&self) -> OutputCapabilities {
        self.caps
    }

    pub fn threshold(&self) -> LogLevel {
        self.lock_state().threshold
    }

    pub fn set_threshold(&self, threshold: LogLevel) {
        self.lock_state().threshold = threshold;
    }

    /// Set the threshold from a level name (case-insensitive)
    ///
    /// Unknown names pass everything through, i.e. behave like DEBUG.
    pub fn set_level(&self, level: &str) {
        self.set_threshold(LogLevel::parse_or_pass_through(level));
    }

    /// Whether a message at `level` would currently be emitted
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.threshold().allows(level)
    }

    pub fn has_sink(&self) -> bool {
        self.lock_state().sink.is_some()
    }

    pub fn debug(&self, module: &str, message: impl Into<Message>) {
        self.report(self.emit(module, message, Severity::Known(LogLevel::Debug)));
    }

    pub fn info(&self, module: &str, message: impl Into<Message>) {
        self.report(self.emit(module, message, Severity::Known(LogLevel::Info)));
    }

    pub fn warn(&self, module: &str, message: impl Into<Message>) {
        self.report(self.emit(module, message, Severity::Known(LogLevel::Warn)));
    }

    pub fn error(&self, module: &str, message: impl Into<Message>) {
        self.report(self.emit(module, message, Severity::Known(LogLevel::Error)));
    }

    /// Log an error value at ERROR, prefixed by `message` when it is non-empty
    pub fn exception(&self, module: &str, err: &(impl fmt::Display + ?Sized), message: &str) {
        self.error(module, exception_message(err, message));
    }

    /// Log with an arbitrary level tag
    ///
    /// Unknown tags are always emitted, on the default console stream and
    /// without a level color.
    pub fn log(&self, module: &str, message: impl Into<Message>, level: &str) {
        self.report(self.try_log(module, message, level));
    }

    /// Like `log`, but returns write failures
    ///
    /// `Ok(false)` means the message was below the threshold.
    pub fn try_log(&self, module: &str, message: impl Into<Message>, level: &str) -> Result<bool> {
        self.emit(module, message, Severity::parse(level))
    }

    fn emit(&self, module: &str, message: impl Into<Message>, severity: Severity) -> Result<bool> {
        let mut state = self.lock_state();
        if !severity.passes(state.threshold) {
            return Ok(false);
        }

        let module = module.to_uppercase();
        let message = message.into();
        let timestamp = format::timestamp_now();
        let parts = LineParts {
            timestamp: &timestamp,
            module: &module,
            severity: &severity,
            message: &message,
        };

        let console_line = if self.caps.ansi {
            format::render_colored(&parts)
        } else {
            format::render_plain(&parts)
        };
        let console_result = self
            .console
            .write_line(ConsoleStream::for_severity(&severity), &console_line);

        if let Some(sink) = state.sink.as_mut() {
            sink.write_line(&format::render_plain(&parts))?;
        }

        console_result?;
        Ok(true)
    }

    // Logging never changes the caller's control flow
    fn report(&self, result: Result<bool>) {
        if let Err(e) = result {
            tracing::warn!("Log write failed: {}", e);
        }
    }

    /// Flush buffered sink output
    pub fn flush(&self) -> Result<()> {
        match self.lock_state().sink.as_mut() {
            Some(sink) => sink.flush(),
            None => Ok(()),
        }
    }

    /// Flush and release the sink; later lines go to the console only
    ///
    /// Safe to call repeatedly and when no sink is configured.
    pub fn close(&self) -> Result<()> {
        let sink = self.lock_state().sink.take();
        match sink {
            Some(mut sink) => sink.close(),
            None => Ok(()),
        }
    }
}

/// `"{message}: {err}"`, or just `err` when `message` is empty
pub fn exception_message(err: &(impl fmt::Display + ?Sized), message: &str) -> String {
    if message.is_empty() {
        err.to_string()
    } else {
        format!("{}: {}", message, err)
    }
}
