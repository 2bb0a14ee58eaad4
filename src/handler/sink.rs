// file: src/handler/sink.rs
// version: 1.0.0
// guid: 93e25706-36e5-4b4a-9123-0fafc6bb6ca1

//! Output targets for handlers

use super::rotating::RotatingFile;
use crate::error::LoggingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

/// Console stream a stream handler writes to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ConsoleStream {
    #[default]
    Stdout,
    Stderr,
}

impl ConsoleStream {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsoleStream::Stdout => "stdout",
            ConsoleStream::Stderr => "stderr",
        }
    }
}

impl fmt::Display for ConsoleStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ConsoleStream {
    type Err = LoggingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stdout" => Ok(ConsoleStream::Stdout),
            "stderr" => Ok(ConsoleStream::Stderr),
            _ => Err(LoggingError::invalid_value(format!(
                "invalid console log output: '{}'",
                s
            ))),
        }
    }
}

impl TryFrom<String> for ConsoleStream {
    type Error = LoggingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ConsoleStream> for String {
    fn from(stream: ConsoleStream) -> Self {
        stream.as_str().to_string()
    }
}

/// How a file handler opens an existing file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileMode {
    #[default]
    #[serde(alias = "a")]
    Append,
    #[serde(alias = "w")]
    Truncate,
}

/// Open a log file, creating missing parent directories
pub(crate) fn open_log_file(path: &Path, mode: FileMode) -> io::Result<File> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut options = OpenOptions::new();
    options.create(true);
    match mode {
        FileMode::Append => options.append(true),
        FileMode::Truncate => options.write(true).truncate(true),
    };
    options.open(path)
}

/// In-memory sink that can be cloned and inspected, e.g. to capture console output
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
    inner: Arc<Mutex<Vec<u8>>>,
}

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents written so far, lossily decoded
    pub fn contents(&self) -> String {
        let bytes = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }

    pub fn clear(&self) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Where a handler's formatted lines end up
pub(crate) enum Sink {
    Console(ConsoleStream),
    File(File),
    Rotating(RotatingFile),
    Writer(Box<dyn Write + Send>),
}

impl Sink {
    /// Write one line; each line is flushed before returning
    pub(crate) fn write_line(&mut self, line: &str) -> io::Result<()> {
        match self {
            Sink::Console(ConsoleStream::Stdout) => {
                let mut out = io::stdout().lock();
                out.write_all(line.as_bytes())?;
                out.flush()
            }
            Sink::Console(ConsoleStream::Stderr) => {
                let mut out = io::stderr().lock();
                out.write_all(line.as_bytes())?;
                out.flush()
            }
            Sink::File(file) => {
                file.write_all(line.as_bytes())?;
                file.flush()
            }
            Sink::Rotating(rotating) => rotating.write_line(line),
            Sink::Writer(writer) => {
                writer.write_all(line.as_bytes())?;
                writer.flush()
            }
        }
    }

    pub(crate) fn flush(&mut self) -> io::Result<()> {
        match self {
            Sink::Console(ConsoleStream::Stdout) => io::stdout().flush(),
            Sink::Console(ConsoleStream::Stderr) => io::stderr().flush(),
            Sink::File(file) => file.flush(),
            Sink::Rotating(rotating) => rotating.flush(),
            Sink::Writer(writer) => writer.flush(),
        }
    }
}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sink::Console(stream) => write!(f, "Console({})", stream),
            Sink::File(_) => f.write_str("File"),
            Sink::Rotating(rotating) => write!(f, "Rotating({})", rotating.path().display()),
            Sink::Writer(_) => f.write_str("Writer"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_console_stream_parsing() {
        assert_eq!("STDOUT".parse::<ConsoleStream>().unwrap(), ConsoleStream::Stdout);
        assert_eq!("stderr".parse::<ConsoleStream>().unwrap(), ConsoleStream::Stderr);

        let err = "stdlog".parse::<ConsoleStream>().unwrap_err();
        assert!(err.to_string().contains("invalid console log output: 'stdlog'"));
    }

    #[test]
    fn test_shared_buffer_is_shared_between_clones() {
        let buffer = SharedBuffer::new();
        let mut writer = buffer.clone();
        writer.write_all(b"hello\n").unwrap();
        assert_eq!(buffer.contents(), "hello\n");
        buffer.clear();
        assert_eq!(buffer.contents(), "");
    }

    #[test]
    fn test_open_log_file_modes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("app.log");

        let mut file = open_log_file(&path, FileMode::Append).unwrap();
        file.write_all(b"first\n").unwrap();
        drop(file);

        let mut file = open_log_file(&path, FileMode::Append).unwrap();
        file.write_all(b"second\n").unwrap();
        drop(file);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");

        let mut file = open_log_file(&path, FileMode::Truncate).unwrap();
        file.write_all(b"third\n").unwrap();
        drop(file);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "third\n");
    }

    #[test]
    fn test_file_mode_aliases() {
        let mode: FileMode = serde_yaml::from_str("w").unwrap();
        assert_eq!(mode, FileMode::Truncate);
        let mode: FileMode = serde_yaml::from_str("append").unwrap();
        assert_eq!(mode, FileMode::Append);
    }
}
