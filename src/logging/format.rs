//! Line rendering
//!
//! Every line has four fields: timestamp, `[MODULE]`, `LEVEL:` and the message.
//! The plain rendering is what the file sink receives; the colored rendering is
//! only used for an ANSI-capable console.

use std::fmt;

use chrono::Local;
use crossterm::style::Stylize;

use super::level::{LogLevel, Severity};
use super::palette::{self, CYAN, GRAY, RED};

/// Timestamp format: ISO-8601 with a UTC offset, e.g. `2024-01-01T12:00:00+01:00`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Payload of a log call
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Text(String),
    /// Rendered as compact JSON and never color-wrapped
    Structured(serde_json::Value),
}

impl Message {
    pub fn is_text(&self) -> bool {
        matches!(self, Message::Text(_))
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Text(text) => f.write_str(text),
            Message::Structured(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::Text(text.to_string())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::Text(text)
    }
}

impl From<&String> for Message {
    fn from(text: &String) -> Self {
        Message::Text(text.clone())
    }
}

impl From<serde_json::Value> for Message {
    fn from(value: serde_json::Value) -> Self {
        Message::Structured(value)
    }
}

/// The four fields of one line, already normalized
#[derive(Debug, Clone)]
pub struct LineParts<'a> {
    pub timestamp: &'a str,
    pub module: &'a str,
    pub severity: &'a Severity,
    pub message: &'a Message,
}

/// Current local time in `TIMESTAMP_FORMAT`
pub fn timestamp_now() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// `<timestamp> [<MODULE>] <LEVEL>: <message>` without escapes
pub fn render_plain(parts: &LineParts<'_>) -> String {
    format!(
        "{} [{}] {}: {}",
        parts.timestamp,
        parts.module,
        parts.severity.as_str(),
        parts.message
    )
}

/// Same fields as `render_plain`, each wrapped in its own color
pub fn render_colored(parts: &LineParts<'_>) -> String {
    let time_color = match parts.severity {
        Severity::Known(LogLevel::Debug) => GRAY,
        _ => CYAN,
    };
    let time = parts.timestamp.with(time_color);
    let module = parts.module.with(palette::module_color(parts.module));

    let level_tag = format!("{}:", parts.severity.as_str());
    let level = match palette::level_color(parts.severity) {
        Some(color) => level_tag.with(color).to_string(),
        None => level_tag,
    };

    let message_color = match (parts.severity, parts.message.is_text()) {
        (Severity::Known(LogLevel::Error), true) => Some(RED),
        (Severity::Known(LogLevel::Debug), true) => Some(GRAY),
        _ => None,
    };
    let message = match message_color {
        Some(color) => parts.message.to_string().with(color).to_string(),
        None => parts.message.to_string(),
    };

    format!("{} [{}] {} {}", time, module, level, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn parts<'a>(severity: &'a Severity, message: &'a Message) -> LineParts<'a> {
        LineParts {
            timestamp: "2024-01-01T12:00:00+00:00",
            module: "SERVER",
            severity,
            message,
        }
    }

    #[test]
    fn test_render_plain_layout() {
        let severity = Severity::from(LogLevel::Info);
        let message = Message::from("hello");
        assert_eq!(
            render_plain(&parts(&severity, &message)),
            "2024-01-01T12:00:00+00:00 [SERVER] INFO: hello"
        );
    }

    #[test]
    fn test_render_plain_structured_message() {
        let severity = Severity::from(LogLevel::Warn);
        let message = Message::from(serde_json::json!({"disk": 97}));
        assert_eq!(
            render_plain(&parts(&severity, &message)),
            r#"2024-01-01T12:00:00+00:00 [SERVER] WARN: {"disk":97}"#
        );
    }

    #[test]
    fn test_render_plain_custom_tag() {
        let severity = Severity::parse("audit");
        let message = Message::from("login");
        assert!(render_plain(&parts(&severity, &message)).ends_with("[SERVER] AUDIT: login"));
    }

    #[test]
    fn test_render_colored_keeps_fields() {
        let severity = Severity::from(LogLevel::Error);
        let message = Message::from("boom");
        let line = render_colored(&parts(&severity, &message));
        assert!(line.contains("2024-01-01T12:00:00+00:00"));
        assert!(line.contains("SERVER"));
        assert!(line.contains("ERROR:"));
        assert!(line.contains("boom"));
    }

    #[test]
    fn test_render_colored_adds_escapes() {
        // crossterm drops colors when NO_COLOR is set
        if std::env::var_os("NO_COLOR").is_some() {
            return;
        }
        let severity = Severity::from(LogLevel::Debug);
        let message = Message::from("trace me");
        let line = render_colored(&parts(&severity, &message));
        assert!(line.contains('\x1b'));
        assert_ne!(line, render_plain(&parts(&severity, &message)));
    }

    #[test]
    fn test_render_colored_does_not_wrap_structured_message() {
        let severity = Severity::from(LogLevel::Error);
        let message = Message::from(serde_json::json!([1, 2]));
        let line = render_colored(&parts(&severity, &message));
        assert!(line.ends_with(" [1,2]"));
    }

    #[test]
    fn test_timestamp_is_parseable() {
        let ts = timestamp_now();
        assert!(DateTime::parse_from_rfc3339(&ts).is_ok(), "bad timestamp {}", ts);
    }
}
