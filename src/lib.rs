// file: src/lib.rs
// version: 1.0.0
// guid: daf6a79a-2379-4984-a70e-8a28c2c90fa0

//! # Custom Logging
//!
//! Convenience layer for configuring named loggers with console, file and
//! time-rotated file handlers, colorized formatters keyed by severity, and
//! defaults loaded from a settings document.
//!
//! Two entry points cover the common cases:
//!
//! - [`setup_logger`] attaches handlers to a logger, giving each handler that
//!   lacks one a formatter from the default settings.
//! - [`setup_logging`] builds a console handler and a log file handler
//!   straight from explicit parameters.
//!
//! ```no_run
//! use custom_logging::{setup_logger, LoggerRegistry, SettingsSource};
//!
//! let registry = LoggerRegistry::new();
//! let logger = setup_logger(&registry, Some("app"), Vec::new(), SettingsSource::Bundled, None)?;
//! logger.info("ready");
//! # Ok::<(), custom_logging::LoggingError>(())
//! ```

pub mod bridge;
pub mod cli;
pub mod error;
pub mod formatter;
pub mod handler;
pub mod level;
pub mod logger;
pub mod oneshot;
pub mod record;
pub mod registry;
pub mod settings;
pub mod setup;

pub use bridge::{LogBridge, LoggerLayer};
pub use error::{LoggingError, Result};
pub use formatter::{Formatter, FormatterOptions};
pub use handler::{
    ConsoleStream, FileMode, Handler, HandlerKind, HandlerSpec, SharedBuffer, When,
};
pub use level::Level;
pub use logger::Logger;
pub use oneshot::{setup_logging, ConsoleSetup, FileSetup, LoggingSetup};
pub use record::Record;
pub use registry::LoggerRegistry;
pub use settings::{DefaultSettings, SettingsSource};
pub use setup::setup_logger;

/// Version information for the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
