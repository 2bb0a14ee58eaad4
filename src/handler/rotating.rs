// file: src/handler/rotating.rs
// version: 1.1.0
// guid: c28790a1-fa86-4179-809a-c1f47dedbbce

//! Time-based rotating log file
//!
//! Scheduling, dated file names and pruning come from
//! `tracing_appender::rolling`. The active file is `<name>.<YYYY-MM-DD>`
//! (UTC date) next to the configured path.

use crate::error::{LoggingError, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_appender::rolling::{RollingFileAppender, Rotation};

const FILE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Rollover schedule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum When {
    /// Roll over at midnight
    #[default]
    Midnight,
    /// Roll over once a day
    Daily,
}

impl When {
    pub fn as_str(&self) -> &'static str {
        match self {
            When::Midnight => "midnight",
            When::Daily => "daily",
        }
    }

    /// Appender rotation for this schedule; only one-day periods are supported
    pub fn rotation(&self, interval: u32) -> Result<Rotation> {
        match interval {
            0 | 1 => Ok(Rotation::DAILY),
            n => Err(LoggingError::invalid_value(format!(
                "unsupported rollover interval for {}: {} (only 1 is supported)",
                self, n
            ))),
        }
    }
}

impl std::fmt::Display for When {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for When {
    type Err = LoggingError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "midnight" => Ok(When::Midnight),
            "daily" | "d" => Ok(When::Daily),
            _ => Err(LoggingError::invalid_value(format!(
                "invalid rollover schedule: '{}'",
                s
            ))),
        }
    }
}

impl TryFrom<String> for When {
    type Error = LoggingError;

    fn try_from(value: String) -> std::result::Result<Self, LoggingError> {
        value.parse()
    }
}

impl From<When> for String {
    fn from(when: When) -> Self {
        when.as_str().to_string()
    }
}

/// Daily rolling file backed by a [`RollingFileAppender`]
pub struct RotatingFile {
    path: PathBuf,
    appender: RollingFileAppender,
}

impl RotatingFile {
    /// Open a rolling appender for `path`, keeping `backup_count` old files (0 keeps all)
    pub fn open(
        path: impl AsRef<Path>,
        when: When,
        interval: u32,
        backup_count: usize,
    ) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let rotation = when.rotation(interval)?;

        let prefix = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                LoggingError::invalid_value(format!(
                    "rotating log path has no file name: {}",
                    path.display()
                ))
            })?;
        let dir = directory_of(&path);
        if !dir.exists() {
            std::fs::create_dir_all(&dir)?;
        }

        let mut builder = RollingFileAppender::builder()
            .rotation(rotation)
            .filename_prefix(prefix);
        if backup_count > 0 {
            builder = builder.max_log_files(backup_count + 1);
        }
        let appender = builder
            .build(&dir)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

        Ok(Self { path, appender })
    }

    /// Configured path; dated files are created beside it
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File currently written to
    pub fn current_path(&self) -> PathBuf {
        let name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.path
            .with_file_name(format!("{}.{}", name, Utc::now().format(FILE_DATE_FORMAT)))
    }

    pub fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.appender.write_all(line.as_bytes())?;
        self.appender.flush()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.appender.flush()
    }
}

impl std::fmt::Debug for RotatingFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RotatingFile")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

fn directory_of(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
