// file: src/handler/mod.rs
// version: 1.0.0
// guid: add49e6b-a8d8-4ff4-9640-cbce7d7c364e

//! Handlers: a sink plus its own level threshold and formatter

pub mod rotating;
pub mod sink;

pub use rotating::{RotatingFile, When};
pub use sink::{ConsoleStream, FileMode, SharedBuffer};

use crate::error::{LoggingError, Result};
use crate::formatter::Formatter;
use crate::level::Level;
use crate::record::Record;
use sink::Sink;
use std::fmt;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// Closed set of handler kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandlerKind {
    Stream,
    File,
    RotatingFile,
}

impl HandlerKind {
    pub const ALL: [HandlerKind; 3] = [
        HandlerKind::Stream,
        HandlerKind::File,
        HandlerKind::RotatingFile,
    ];

    /// Key used in the settings document
    pub fn as_str(&self) -> &'static str {
        match self {
            HandlerKind::Stream => "stream",
            HandlerKind::File => "file",
            HandlerKind::RotatingFile => "rotating_file",
        }
    }
}

impl fmt::Display for HandlerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for HandlerKind {
    type Err = LoggingError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        match normalized.as_str() {
            "stream" | "console" | "streamhandler" => Ok(HandlerKind::Stream),
            "file" | "filehandler" => Ok(HandlerKind::File),
            "rotating_file" | "timed_rotating_file" | "timedrotatingfilehandler" => {
                Ok(HandlerKind::RotatingFile)
            }
            _ => Err(LoggingError::handler_type(format!(
                "handler must be one of stream, file or rotating_file, not '{}'",
                s
            ))),
        }
    }
}

/// A log sink with its own threshold and formatter
pub struct Handler {
    kind: HandlerKind,
    level: RwLock<Level>,
    formatter: RwLock<Option<Formatter>>,
    path: Option<PathBuf>,
    sink: Mutex<Sink>,
}

impl Handler {
    fn with_sink(kind: HandlerKind, sink: Sink, path: Option<PathBuf>) -> Self {
        Self {
            kind,
            level: RwLock::new(Level::MOST_VERBOSE),
            formatter: RwLock::new(None),
            path,
            sink: Mutex::new(sink),
        }
    }

    /// Handler writing to stdout or stderr
    pub fn stream(stream: ConsoleStream) -> Self {
        Self::with_sink(HandlerKind::Stream, Sink::Console(stream), None)
    }

    /// Stream handler writing to an arbitrary writer
    pub fn writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self::with_sink(HandlerKind::Stream, Sink::Writer(Box::new(writer)), None)
    }

    /// Handler writing to a plain file
    pub fn file(path: impl AsRef<Path>, mode: FileMode) -> Result<Self> {
        let path = path.as_ref();
        let file = sink::open_log_file(path, mode).map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("failed to open log file {}: {}", path.display(), e),
            )
        })?;
        Ok(Self::with_sink(
            HandlerKind::File,
            Sink::File(file),
            Some(path.to_path_buf()),
        ))
    }

    /// Handler writing to a time-rotated file
    pub fn rotating_file(
        path: impl AsRef<Path>,
        when: When,
        interval: u32,
        backup_count: usize,
    ) -> Result<Self> {
        let path = path.as_ref();
        let rotating = RotatingFile::open(path, when, interval, backup_count).map_err(|e| match e {
            LoggingError::Io(e) => LoggingError::Io(io::Error::new(
                e.kind(),
                format!("failed to open log file {}: {}", path.display(), e),
            )),
            other => other,
        })?;
        Ok(Self::with_sink(
            HandlerKind::RotatingFile,
            Sink::Rotating(rotating),
            Some(path.to_path_buf()),
        ))
    }

    pub fn with_level(self, level: Level) -> Self {
        self.set_level(level);
        self
    }

    pub fn with_formatter(self, formatter: Formatter) -> Self {
        self.set_formatter(formatter);
        self
    }

    pub fn kind(&self) -> HandlerKind {
        self.kind
    }

    /// File path for file-backed handlers
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn level(&self) -> Level {
        *self.level.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_level(&self, level: Level) {
        *self.level.write().unwrap_or_else(PoisonError::into_inner) = level;
    }

    pub fn formatter(&self) -> Option<Formatter> {
        self.formatter
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn has_formatter(&self) -> bool {
        self.formatter
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn set_formatter(&self, formatter: Formatter) {
        *self.formatter.write().unwrap_or_else(PoisonError::into_inner) = Some(formatter);
    }

    /// Install `formatter` only when none is set; returns whether it was installed
    pub fn set_formatter_if_absent(&self, formatter: Formatter) -> bool {
        let mut slot = self.formatter.write().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            return false;
        }
        *slot = Some(formatter);
        true
    }

    /// Format and write a record if it passes this handler's threshold
    pub fn emit(&self, record: &Record) -> io::Result<()> {
        if record.level < self.level() {
            return Ok(());
        }

        let mut line = match self
            .formatter
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
        {
            Some(formatter) => formatter.format(record),
            None => record.message.clone(),
        };
        line.push('\n');

        self.sink
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .write_line(&line)
    }

    pub fn flush(&self) -> io::Result<()> {
        self.sink
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .flush()
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handler")
            .field("kind", &self.kind)
            .field("level", &self.level())
            .field("has_formatter", &self.has_formatter())
            .field("path", &self.path)
            .finish()
    }
}

/// A handler to attach: either a kind to build from settings, or a ready instance
#[derive(Debug, Clone)]
pub enum HandlerSpec {
    Kind(HandlerKind),
    Instance(Arc<Handler>),
}

impl HandlerSpec {
    /// Spec for a handler kind given by name
    pub fn from_name(name: &str) -> Result<Self> {
        Ok(HandlerSpec::Kind(name.parse()?))
    }

    pub fn kind(&self) -> HandlerKind {
        match self {
            HandlerSpec::Kind(kind) => *kind,
            HandlerSpec::Instance(handler) => handler.kind(),
        }
    }
}

impl From<HandlerKind> for HandlerSpec {
    fn from(kind: HandlerKind) -> Self {
        HandlerSpec::Kind(kind)
    }
}

impl From<Handler> for HandlerSpec {
    fn from(handler: Handler) -> Self {
        HandlerSpec::Instance(Arc::new(handler))
    }
}

impl From<Arc<Handler>> for HandlerSpec {
    fn from(handler: Arc<Handler>) -> Self {
        HandlerSpec::Instance(handler)
    }
}
