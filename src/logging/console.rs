//! Console output
//!
//! Lines are routed to a stream picked from their severity. The `Console` trait
//! is the seam tests use to observe routing.

use std::io::{self, Write};

use crossterm::tty::IsTty;

use super::level::{LogLevel, Severity};

/// Environment variable holding the runtime mode
pub const ENV_VAR: &str = "MODLOG_ENV";

/// Console stream a line is written to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStream {
    Error,
    Warn,
    Info,
    Debug,
    /// Custom tags and NONE
    Default,
}

impl ConsoleStream {
    pub fn for_severity(severity: &Severity) -> Self {
        match severity {
            Severity::Known(LogLevel::Error) => ConsoleStream::Error,
            Severity::Known(LogLevel::Warn) => ConsoleStream::Warn,
            Severity::Known(LogLevel::Info) => ConsoleStream::Info,
            Severity::Known(LogLevel::Debug) => ConsoleStream::Debug,
            _ => ConsoleStream::Default,
        }
    }
}

/// Destination for rendered console lines
pub trait Console: Send + Sync {
    /// Write one line (without trailing newline) to `stream`
    fn write_line(&self, stream: ConsoleStream, line: &str) -> io::Result<()>;
}

/// Process stdout/stderr
///
/// Error and warn lines go to stderr, everything else to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdConsole;

impl Console for StdConsole {
    fn write_line(&self, stream: ConsoleStream, line: &str) -> io::Result<()> {
        match stream {
            ConsoleStream::Error | ConsoleStream::Warn => {
                let mut err = io::stderr().lock();
                writeln!(err, "{}", line)
            }
            ConsoleStream::Info | ConsoleStream::Debug | ConsoleStream::Default => {
                let mut out = io::stdout().lock();
                writeln!(out, "{}", line)
            }
        }
    }
}

/// What the runtime environment supports, detected once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputCapabilities {
    /// Console accepts ANSI color escapes
    pub ansi: bool,
    /// Development mode: DEBUG is the default threshold
    pub dev_mode: bool,
}

impl OutputCapabilities {
    /// Inspect stdout and `MODLOG_ENV`
    pub fn detect() -> Self {
        let dev_mode = std::env::var(ENV_VAR)
            .map(|v| is_development(&v))
            .unwrap_or(false);
        Self {
            ansi: io::stdout().is_tty(),
            dev_mode,
        }
    }

    /// Capabilities for non-interactive output (no colors, production mode)
    pub fn plain() -> Self {
        Self::default()
    }

    /// Threshold used when none is configured explicitly
    pub fn default_threshold(&self) -> LogLevel {
        if self.dev_mode {
            LogLevel::Debug
        } else {
            LogLevel::Info
        }
    }
}

fn is_development(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("development")
}
