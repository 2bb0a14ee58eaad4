// file: src/oneshot.rs
// version: 1.0.0
// guid: 081d29eb-b60f-4220-b8bf-a7705e8adbff

//! One-shot console and log file setup from explicit parameters

use crate::error::{LoggingError, Result};
use crate::formatter::{Formatter, FormatterOptions};
use crate::handler::{ConsoleStream, FileMode, Handler};
use crate::level::Level;
use crate::logger::Logger;
use crate::registry::LoggerRegistry;
use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_CONSOLE_TEMPLATE: &str = "{color_on}{levelname2}: {message}{color_off}";
pub const DEFAULT_LOGFILE_TEMPLATE: &str =
    "{color_on}[{asctime}] [{levelname:<8}] {message}{color_off}";
pub const DEFAULT_LOGFILE_DATE_FORMAT: &str = "%Y%m%d|%H:%M:%S%.6f";

/// Console output parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleSetup {
    /// `stdout` or `stderr`, case-insensitive
    pub output: String,
    pub level: String,
    pub color: bool,
    pub template: String,
}

impl Default for ConsoleSetup {
    fn default() -> Self {
        Self {
            output: "stdout".to_string(),
            level: "debug".to_string(),
            color: false,
            template: DEFAULT_CONSOLE_TEMPLATE.to_string(),
        }
    }
}

/// Log file parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSetup {
    pub path: PathBuf,
    pub level: String,
    pub color: bool,
    pub template: String,
    pub datefmt: String,
    /// Truncate an existing file instead of appending
    pub truncate: bool,
}

impl FileSetup {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }
}

impl Default for FileSetup {
    fn default() -> Self {
        Self {
            path: PathBuf::from("app.log"),
            level: "debug".to_string(),
            color: false,
            template: DEFAULT_LOGFILE_TEMPLATE.to_string(),
            datefmt: DEFAULT_LOGFILE_DATE_FORMAT.to_string(),
            truncate: false,
        }
    }
}

/// Parameters for [`setup_logging`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSetup {
    /// `None` configures the root logger
    pub logger_name: Option<String>,
    pub console: Option<ConsoleSetup>,
    pub logfile: Option<FileSetup>,
}

impl Default for LoggingSetup {
    fn default() -> Self {
        Self {
            logger_name: None,
            console: Some(ConsoleSetup::default()),
            logfile: None,
        }
    }
}

fn parse_level(raw: &str, what: &str) -> Result<Level> {
    raw.parse::<Level>()
        .map_err(|_| LoggingError::invalid_value(format!("invalid {} log level: '{}'", what, raw)))
}

/// Configure console and/or log file output on a logger
///
/// Every parameter is validated before a handler is attached, so a failure
/// leaves the logger as it was.
pub fn setup_logging(registry: &LoggerRegistry, setup: &LoggingSetup) -> Result<Arc<Logger>> {
    if setup.console.is_none() && setup.logfile.is_none() {
        return Err(LoggingError::create_logger(
            "neither console nor log file output requested",
        ));
    }

    let console = match &setup.console {
        Some(console) => {
            let stream: ConsoleStream = console.output.parse()?;
            let level = parse_level(&console.level, "console")?;
            let formatter = Formatter::new(
                FormatterOptions::new(console.template.clone()).with_color(console.color),
            )?;
            Some(
                Handler::stream(stream)
                    .with_level(level)
                    .with_formatter(formatter),
            )
        }
        None => None,
    };

    let logfile = match &setup.logfile {
        Some(file) => {
            let level = parse_level(&file.level, "log file")?;
            let formatter = Formatter::new(
                FormatterOptions::new(file.template.clone())
                    .with_datefmt(file.datefmt.clone())
                    .with_color(file.color),
            )?;
            let mode = if file.truncate {
                FileMode::Truncate
            } else {
                FileMode::Append
            };
            let handler = Handler::file(&file.path, mode).map_err(|e| match e {
                LoggingError::Io(io) => LoggingError::Io(io::Error::new(
                    io.kind(),
                    format!("failed to set up log file handler: {}", io),
                )),
                other => other,
            })?;
            Some(handler.with_level(level).with_formatter(formatter))
        }
        None => None,
    };

    let logger = registry.get_logger(setup.logger_name.as_deref());
    logger.set_level(Level::MOST_VERBOSE);

    for handler in console.into_iter().chain(logfile) {
        let kind = handler.kind();
        logger.add_handler(Arc::new(handler));
        debug!("Attached {} handler to logger '{}'", kind, logger.name());
    }

    Ok(logger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_invalid_console_output_attaches_nothing() {
        let registry = LoggerRegistry::new();
        let setup = LoggingSetup {
            logger_name: Some("app".to_string()),
            console: Some(ConsoleSetup {
                output: "stdlog".to_string(),
                ..ConsoleSetup::default()
            }),
            logfile: None,
        };

        let err = setup_logging(&registry, &setup).unwrap_err();
        assert!(matches!(err, LoggingError::InvalidValue(_)));
        assert!(err.to_string().contains("invalid console log output: 'stdlog'"));
        assert!(!registry.get_logger(Some("app")).has_handlers());
    }

    #[test]
    fn test_invalid_levels() {
        let registry = LoggerRegistry::new();
        let setup = LoggingSetup {
            console: Some(ConsoleSetup {
                level: "loud".to_string(),
                ..ConsoleSetup::default()
            }),
            ..LoggingSetup::default()
        };
        let err = setup_logging(&registry, &setup).unwrap_err();
        assert!(err.to_string().contains("invalid console log level: 'loud'"));

        let temp_dir = TempDir::new().unwrap();
        let setup = LoggingSetup {
            console: None,
            logfile: Some(FileSetup {
                level: "chatty".to_string(),
                ..FileSetup::new(temp_dir.path().join("app.log"))
            }),
            ..LoggingSetup::default()
        };
        let err = setup_logging(&registry, &setup).unwrap_err();
        assert!(err.to_string().contains("invalid log file log level: 'chatty'"));
        assert!(!temp_dir.path().join("app.log").exists());
    }

    #[test]
    fn test_console_and_file_handlers_attached() {
        let temp_dir = TempDir::new().unwrap();
        let registry = LoggerRegistry::new();
        let setup = LoggingSetup {
            logger_name: None,
            console: Some(ConsoleSetup {
                output: "STDERR".to_string(),
                level: "INFO".to_string(),
                ..ConsoleSetup::default()
            }),
            logfile: Some(FileSetup {
                level: "info".to_string(),
                ..FileSetup::new(temp_dir.path().join("app.log"))
            }),
        };

        let logger = setup_logging(&registry, &setup).unwrap();
        assert!(logger.is_root());
        let handlers = logger.handlers();
        assert_eq!(handlers.len(), 2);
        assert_eq!(handlers[0].level(), Level::Info);
        assert!(handlers.iter().all(|h| h.has_formatter()));
    }

    #[test]
    fn test_file_output_and_truncate() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.log");
        std::fs::write(&path, "stale\n").unwrap();

        let registry = LoggerRegistry::new();
        let setup = LoggingSetup {
            logger_name: Some("file-only".to_string()),
            console: None,
            logfile: Some(FileSetup {
                level: "warning".to_string(),
                template: "{levelname}|{message}".to_string(),
                truncate: true,
                ..FileSetup::new(&path)
            }),
        };

        let logger = setup_logging(&registry, &setup).unwrap();
        logger.info("below threshold");
        logger.warning("written");

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "WARNING|written\n");
    }

    #[test]
    fn test_nothing_requested() {
        let registry = LoggerRegistry::new();
        let setup = LoggingSetup {
            logger_name: None,
            console: None,
            logfile: None,
        };
        assert!(matches!(
            setup_logging(&registry, &setup),
            Err(LoggingError::CreateLogger(_))
        ));
    }
}
