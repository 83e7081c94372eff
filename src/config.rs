//! Configuration management for modlog

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::logging::{LogLevel, OutputCapabilities};

const CONFIG_FILE: &str = "config.toml";

/// Logger configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Minimum level: "debug", "info", "warn", "error" or "none" (case-insensitive).
    /// When unset, DEBUG in development mode and INFO otherwise.
    #[serde(default)]
    pub level: Option<String>,

    /// Log file to append to. Its directory must already exist.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Config {
    /// Load `modlog/config.toml` from the platform config directory
    ///
    /// Defaults are used when there is no config directory or no file.
    pub fn load() -> Result<Self> {
        match config_file_path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::debug!("No platform config directory, using default config");
                Ok(Self::default())
            }
        }
    }

    /// Load configuration from `path`, or return default if not found
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Threshold to start with
    ///
    /// An unknown configured level passes everything through, like
    /// `Logger::set_level`.
    pub fn effective_level(&self, caps: &OutputCapabilities) -> LogLevel {
        match self.level.as_deref() {
            Some(level) => LogLevel::parse_or_pass_through(level),
            None => caps.default_threshold(),
        }
    }
}

/// `<config dir>/modlog/config.toml`, e.g. `~/.config/modlog/config.toml` on Linux
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("modlog").join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.level.is_none());
        assert!(config.file.is_none());
    }

    #[test]
    fn test_effective_level() {
        let prod = OutputCapabilities::plain();
        let dev = OutputCapabilities {
            ansi: false,
            dev_mode: true,
        };

        let config = Config::default();
        assert_eq!(config.effective_level(&prod), LogLevel::Info);
        assert_eq!(config.effective_level(&dev), LogLevel::Debug);

        let config = Config {
            level: Some("Warn".to_string()),
            file: None,
        };
        assert_eq!(config.effective_level(&dev), LogLevel::Warn);

        let config = Config {
            level: Some("loud".to_string()),
            file: None,
        };
        assert_eq!(config.effective_level(&prod), LogLevel::Debug);
    }

    #[test]
    fn test_load_missing_file_gives_default() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "level = \"error\"\nfile = \"/var/log/app.log\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.level.as_deref(), Some("error"));
        assert_eq!(config.file, Some(PathBuf::from("/var/log/app.log")));
    }

    #[test]
    fn test_load_partial_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "level = \"warn\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert!(config.file.is_none());
        assert_eq!(
            config.effective_level(&OutputCapabilities::plain()),
            LogLevel::Warn
        );
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "level = [").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_config_file_path() {
        // CI might not have a config dir
        if let Some(path) = config_file_path() {
            assert!(path.ends_with("modlog/config.toml"));
        }
    }
}
