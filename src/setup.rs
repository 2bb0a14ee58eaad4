// file: src/setup.rs
// version: 1.0.0
// guid: a390ca70-654d-40fc-b766-ff2709bb7f4d

//! Assembling a logger from handlers and default settings

use crate::error::{LoggingError, Result};
use crate::formatter::Formatter;
use crate::handler::{Handler, HandlerKind, HandlerSpec};
use crate::level::Level;
use crate::logger::Logger;
use crate::registry::LoggerRegistry;
use crate::settings::{DefaultSettings, SettingsSource};
use std::sync::Arc;
use tracing::debug;

/// Configure a logger and attach handlers, filling in missing formatters
///
/// The logger threshold is set to the most permissive level so only handler
/// thresholds filter records. With no handlers given, a single stream handler
/// is built from the settings. Handlers given as a [`HandlerKind`] are built
/// from the settings for that kind. Any handler without a formatter receives
/// `default_formatter` if supplied, otherwise the settings formatter for its
/// kind. Every handler is resolved before any is attached, so an error leaves
/// the logger's handler list untouched.
pub fn setup_logger(
    registry: &LoggerRegistry,
    logger_name: Option<&str>,
    handlers: Vec<HandlerSpec>,
    settings: SettingsSource,
    default_formatter: Option<&Formatter>,
) -> Result<Arc<Logger>> {
    let logger = registry.get_logger(logger_name);
    logger.set_level(Level::MOST_VERBOSE);

    let settings = settings.load()?;

    let specs = if handlers.is_empty() {
        vec![HandlerSpec::Kind(HandlerKind::Stream)]
    } else {
        handlers
    };

    let resolved = specs
        .into_iter()
        .map(|spec| resolve_handler(spec, &settings, default_formatter))
        .collect::<Result<Vec<_>>>()?;

    for handler in resolved {
        let kind = handler.kind();
        let level = handler.level();
        logger.add_handler(handler);
        debug!(
            "Attached {} handler (level {}) to logger '{}'",
            kind,
            level,
            logger.name()
        );
    }

    if !logger.has_handlers() {
        return Err(LoggingError::create_logger(format!(
            "logger '{}' has no handlers attached",
            logger.name()
        )));
    }

    Ok(logger)
}

fn resolve_handler(
    spec: HandlerSpec,
    settings: &DefaultSettings,
    default_formatter: Option<&Formatter>,
) -> Result<Arc<Handler>> {
    let handler = match spec {
        HandlerSpec::Kind(kind) => Arc::new(settings.build_handler(kind)?),
        HandlerSpec::Instance(handler) => handler,
    };

    if !handler.has_formatter() {
        let formatter = match default_formatter {
            Some(formatter) => formatter.clone(),
            None => settings.formatter_for(handler.kind())?,
        };
        handler.set_formatter_if_absent(formatter);
    }

    Ok(handler)
}
