// file: src/cli/commands.rs
// version: 1.0.0
// guid: 9d430e34-8a6f-491c-9a1c-18cac7a182b4

//! Demo command implementations

use crate::bridge::LoggerLayer;
use crate::error::{LoggingError, Result};
use crate::handler::{FileMode, HandlerKind, HandlerSpec, When};
use crate::level::Level;
use crate::logger::Logger;
use crate::oneshot::{setup_logging, ConsoleSetup, FileSetup, LoggingSetup};
use crate::registry::LoggerRegistry;
use crate::settings::{DefaultSettings, FileSettings, RotatingFileSettings, SettingsSource};
use crate::setup::setup_logger;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Route this crate's own `tracing` diagnostics into `logger`
pub fn init_diagnostics(logger: Arc<Logger>, verbose: bool, quiet: bool) -> Result<()> {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(LoggerLayer::new(logger).with_filter(filter))
        .try_init()
        .map_err(|e| {
            LoggingError::create_logger(format!("Failed to initialize diagnostics: {}", e))
        })?;

    Ok(())
}

/// Load settings and point file-backed handler kinds at `log_file`
pub fn resolve_settings(
    settings: Option<PathBuf>,
    log_file: Option<PathBuf>,
) -> Result<DefaultSettings> {
    let source = match settings {
        Some(path) => SettingsSource::Path(path),
        None => SettingsSource::from_env(),
    };
    let mut settings = source.load()?;

    if let Some(path) = log_file {
        match settings.file.as_mut() {
            Some(file) => file.filename = path.clone(),
            None => {
                settings.file = Some(FileSettings {
                    filename: path.clone(),
                    mode: FileMode::Append,
                    level: Level::Debug,
                })
            }
        }
        match settings.rotating_file.as_mut() {
            Some(rotating) => rotating.filename = path,
            None => {
                settings.rotating_file = Some(RotatingFileSettings {
                    filename: path,
                    when: When::Midnight,
                    interval: 1,
                    backup_count: 7,
                    level: Level::Debug,
                })
            }
        }
    }

    Ok(settings)
}

/// `setup` subcommand
pub fn setup_command(
    registry: &LoggerRegistry,
    name: Option<&str>,
    settings: Option<PathBuf>,
    handlers: Vec<HandlerKind>,
    log_file: Option<PathBuf>,
) -> Result<Arc<Logger>> {
    let settings = resolve_settings(settings, log_file)?;
    let specs = handlers.into_iter().map(HandlerSpec::Kind).collect();
    setup_logger(registry, name, specs, SettingsSource::Inline(settings), None)
}

/// `quick` subcommand
pub fn quick_command(
    registry: &LoggerRegistry,
    name: Option<String>,
    console: Option<ConsoleSetup>,
    logfile: Option<FileSetup>,
) -> Result<Arc<Logger>> {
    let setup = LoggingSetup {
        logger_name: name,
        console,
        logfile,
    };
    setup_logging(registry, &setup)
}

/// Log one message per standard level
pub fn emit_samples(logger: &Logger) {
    logger.debug("Debug message");
    logger.info("Info message");
    logger.warning("Warning message");
    logger.error("Error message");
    logger.critical("Critical message");
    logger.flush();
}
