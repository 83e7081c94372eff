//! Log levels and severity tags
//!
//! `LogLevel` is the closed set used for thresholds. `Severity` is the tag of a
//! single emitted line, which may also be a caller-supplied custom tag.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Ordered log level; the discriminant is the filtering priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    None = 5,
}

/// Error returned when a string names none of the defined levels
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown log level '{0}' (expected DEBUG, INFO, WARN, ERROR or NONE)")]
pub struct ParseLevelError(pub String);

impl LogLevel {
    /// All levels in priority order
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::None,
    ];

    /// Numeric priority (1 = DEBUG ... 5 = NONE)
    pub fn priority(self) -> u8 {
        self as u8
    }

    /// Get the display name for this level
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::None => "NONE",
        }
    }

    /// Whether a message at `message` passes when `self` is the threshold
    ///
    /// NONE is a threshold only; a message tagged NONE never passes.
    pub fn allows(self, message: LogLevel) -> bool {
        message != LogLevel::None && message.priority() >= self.priority()
    }

    /// Parse a threshold name, passing everything through (DEBUG) when unknown
    pub fn parse_or_pass_through(level: &str) -> LogLevel {
        level.parse().unwrap_or_else(|e: ParseLevelError| {
            tracing::warn!("{}; passing all messages through", e);
            LogLevel::Debug
        })
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "NONE" => Ok(LogLevel::None),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// Level tag of one log line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Severity {
    Known(LogLevel),
    /// Unrecognized tag, stored uppercased. Bypasses threshold filtering.
    Custom(String),
}

impl Severity {
    /// Normalize a level string. Never fails: unknown tags become `Custom`.
    pub fn parse(level: &str) -> Self {
        match level.parse::<LogLevel>() {
            Ok(level) => Severity::Known(level),
            Err(_) => Severity::Custom(level.trim().to_uppercase()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Severity::Known(level) => level.as_str(),
            Severity::Custom(tag) => tag,
        }
    }

    /// Whether this line passes `threshold`
    pub fn passes(&self, threshold: LogLevel) -> bool {
        match self {
            Severity::Known(level) => threshold.allows(*level),
            Severity::Custom(_) => true,
        }
    }
}

impl From<LogLevel> for Severity {
    fn from(level: LogLevel) -> Self {
        Severity::Known(level)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priorities_are_ordered() {
        let priorities: Vec<u8> = LogLevel::ALL.iter().map(|l| l.priority()).collect();
        assert_eq!(priorities, vec![1, 2, 3, 4, 5]);
        assert!(LogLevel::Debug < LogLevel::Error);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("warn".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert_eq!("Error".parse::<LogLevel>().unwrap(), LogLevel::Error);
        assert_eq!(" none ".parse::<LogLevel>().unwrap(), LogLevel::None);
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_threshold_allows() {
        assert!(LogLevel::Info.allows(LogLevel::Info));
        assert!(LogLevel::Info.allows(LogLevel::Error));
        assert!(!LogLevel::Info.allows(LogLevel::Debug));
        assert!(!LogLevel::None.allows(LogLevel::Error));
        assert!(!LogLevel::None.allows(LogLevel::None));
        assert!(!LogLevel::Debug.allows(LogLevel::None));
    }

    #[test]
    fn test_parse_or_pass_through() {
        assert_eq!(LogLevel::parse_or_pass_through("Warn"), LogLevel::Warn);
        assert_eq!(LogLevel::parse_or_pass_through("none"), LogLevel::None);
        assert_eq!(LogLevel::parse_or_pass_through("chatty"), LogLevel::Debug);
    }

    #[test]
    fn test_none_tagged_severity_never_passes() {
        let none = Severity::parse("none");
        assert_eq!(none, Severity::Known(LogLevel::None));
        assert!(!none.passes(LogLevel::None));
        assert!(!none.passes(LogLevel::Debug));
    }

    #[test]
    fn test_custom_severity_always_passes() {
        let custom = Severity::parse("audit");
        assert_eq!(custom, Severity::Custom("AUDIT".to_string()));
        assert!(custom.passes(LogLevel::None));
        assert!(!Severity::parse("debug").passes(LogLevel::Info));
    }
}
