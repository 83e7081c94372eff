//! Append-only file sink
//!
//! The sink exclusively owns its file handle and releases it exactly once.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{LogError, Result};

/// Append-mode log file
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl FileSink {
    /// Open `path` for appending, creating the file if needed
    ///
    /// Parent directories must already exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|source| LogError::SinkOpen {
                path: path.clone(),
                source,
            })?;

        tracing::debug!("Opened log sink at {}", path.display());

        Ok(Self {
            path,
            writer: Some(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_closed(&self) -> bool {
        self.writer.is_none()
    }

    /// Append `line` followed by a newline
    pub fn write_line(&mut self, line: &str) -> Result<()> {
        let writer = self.writer.as_mut().ok_or_else(|| LogError::SinkClosed {
            path: self.path.clone(),
        })?;
        writeln!(writer, "{}", line).map_err(|source| LogError::SinkWrite {
            path: self.path.clone(),
            source,
        })
    }

    pub fn flush(&mut self) -> Result<()> {
        match self.writer.as_mut() {
            Some(writer) => writer.flush().map_err(|source| LogError::SinkWrite {
                path: self.path.clone(),
                source,
            }),
            None => Ok(()),
        }
    }

    /// Flush and release the file. Later calls do nothing.
    pub fn close(&mut self) -> Result<()> {
        let Some(mut writer) = self.writer.take() else {
            return Ok(());
        };
        writer.flush().map_err(|source| LogError::SinkWrite {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!("Closed log sink at {}", self.path.display());
        Ok(())
    }
}
