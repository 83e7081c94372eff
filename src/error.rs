//! Error types for the logger

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogError {
    #[error("Failed to open log file {path}: {source}")]
    SinkOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write log file {path}: {source}")]
    SinkWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Log file {path} is already closed")]
    SinkClosed { path: PathBuf },

    #[error("Console write failed: {0}")]
    Console(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, LogError>;
