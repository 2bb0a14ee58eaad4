// file: src/bridge.rs
// version: 1.1.0
// guid: 60c4f5a1-f323-4d6a-a62f-92f6a70c0ced

//! Forwarding `log` and `tracing` events into a configured [`Logger`], and
//! rendering `tracing` events with a [`Formatter`] inside a `fmt` layer

use crate::error::{LoggingError, Result};
use crate::formatter::Formatter;
use crate::level::Level;
use crate::logger::Logger;
use crate::record::Record;
use std::fmt::{self, Write};
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::subscriber::Interest;
use tracing::{Event, Metadata, Subscriber};
use tracing_subscriber::fmt::format::{self, FormatEvent, FormatFields};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

/// `log::Log` implementation backed by a logger
#[derive(Debug, Clone)]
pub struct LogBridge {
    logger: Arc<Logger>,
}

impl LogBridge {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }

    /// Install as the process-wide `log` logger
    pub fn install(self) -> Result<()> {
        log::set_boxed_logger(Box::new(self)).map_err(|e| {
            LoggingError::create_logger(format!("Failed to install log bridge: {}", e))
        })?;
        log::set_max_level(log::LevelFilter::Trace);
        Ok(())
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        self.logger.is_enabled_for(Level::from(metadata.level()))
    }

    fn log(&self, record: &log::Record<'_>) {
        if !log::Log::enabled(self, record.metadata()) {
            return;
        }
        let forwarded = Record::new(
            record.target(),
            Level::from(record.level()),
            record.args().to_string(),
        )
        .with_location(record.module_path(), record.file(), record.line());
        self.logger.handle(&forwarded);
    }

    fn flush(&self) {
        self.logger.flush();
    }
}

/// `tracing_subscriber` layer backed by a logger
#[derive(Debug, Clone)]
pub struct LoggerLayer {
    logger: Arc<Logger>,
}

impl LoggerLayer {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }
}

impl<S: Subscriber> Layer<S> for LoggerLayer {
    // The logger threshold can change at runtime, so never cache interest
    fn register_callsite(&self, _metadata: &'static Metadata<'static>) -> Interest {
        Interest::sometimes()
    }

    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        self.logger.is_enabled_for(Level::from(metadata.level()))
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        self.logger.handle(&record_from_event(event));
    }
}

/// Lets a [`Formatter`] render events for a `tracing_subscriber::fmt` layer
impl<S, N> FormatEvent<S, N> for Formatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        writeln!(writer, "{}", self.format(&record_from_event(event)))
    }
}

/// Record named after the event's target
fn record_from_event(event: &Event<'_>) -> Record {
    let metadata = event.metadata();
    let mut visitor = MessageVisitor::default();
    event.record(&mut visitor);

    Record::new(
        metadata.target(),
        Level::from(metadata.level()),
        visitor.finish(),
    )
    .with_location(metadata.module_path(), metadata.file(), metadata.line())
}

/// Collects the `message` field, appending other fields as `key=value`
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        match (self.message.is_empty(), self.fields.is_empty()) {
            (_, true) => self.message,
            (true, false) => self.fields,
            (false, false) => format!("{} {}", self.message, self.fields),
        }
    }

    fn push_field(&mut self, name: &str, value: fmt::Arguments<'_>) {
        if !self.fields.is_empty() {
            self.fields.push(' ');
        }
        let _ = write!(self.fields, "{}={}", name, value);
    }
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push_field(field.name(), format_args!("{}", value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.push_field(field.name(), format_args!("{:?}", value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::{color_code, FormatterOptions, RESET_CODE};
    use crate::handler::{Handler, SharedBuffer};
    use log::Log;
    use tracing_subscriber::layer::SubscriberExt;

    fn logger_with_buffer(template: &str) -> (Arc<Logger>, SharedBuffer) {
        let buffer = SharedBuffer::new();
        let logger = Arc::new(Logger::new(Some("bridge")));
        logger.set_level(Level::Debug);
        logger.add_handler(Arc::new(
            Handler::writer(buffer.clone()).with_formatter(Formatter::from_template(template).unwrap()),
        ));
        (logger, buffer)
    }

    #[test]
    fn test_log_bridge_forwards_records() {
        let (logger, buffer) = logger_with_buffer("{name} {levelname} {message}");
        let bridge = LogBridge::new(logger);

        bridge.log(
            &log::Record::builder()
                .args(format_args!("disk {} full", "/var"))
                .level(log::Level::Warn)
                .target("storage")
                .build(),
        );
        bridge.log(
            &log::Record::builder()
                .args(format_args!("too chatty"))
                .level(log::Level::Trace)
                .target("storage")
                .build(),
        );

        assert_eq!(buffer.contents(), "storage WARNING disk /var full\n");
    }

    #[test]
    fn test_tracing_layer_forwards_events() {
        let (logger, buffer) = logger_with_buffer("{levelname2}: {message}");
        let subscriber = tracing_subscriber::registry().with(LoggerLayer::new(logger));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(attempt = 3, "connected");
            tracing::trace!("ignored");
        });

        assert_eq!(buffer.contents(), "Info: connected attempt=3\n");
    }

    #[test]
    fn test_formatter_drives_fmt_layer() {
        let buffer = SharedBuffer::new();
        let writer = buffer.clone();
        let formatter = Formatter::new(
            FormatterOptions::new("{name} | {levelname:<8} | {message}").with_color(true),
        )
        .unwrap();
        let layer = tracing_subscriber::fmt::layer()
            .event_format(formatter)
            .with_writer(move || writer.clone());
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "api", "listening");
            tracing::error!(target: "api", code = 7, "failed");
        });

        let info = color_code(Level::Info).unwrap();
        let error = color_code(Level::Error).unwrap();
        assert_eq!(
            buffer.contents(),
            format!(
                "{info}api | INFO     | listening{reset}\n{error}api | ERROR    | failed code=7{reset}\n",
                info = info,
                error = error,
                reset = RESET_CODE
            )
        );
    }
}
