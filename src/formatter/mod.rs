// file: src/formatter/mod.rs
// version: 1.1.0
// guid: a92b4795-12a6-4424-ab9f-c3156e3658b2

//! Formatters turning records into text lines, with optional ANSI color
//!
//! A formatter is built from [`FormatterOptions`]: a message template, a
//! chrono strftime date template used by `{asctime}`, and a color flag.
//! With color enabled, `{color_on}` and `{color_off}` expand to the
//! severity's escape code and the reset code. A colored template that
//! uses neither marker has the whole line wrapped instead.

pub mod color;
pub mod template;

pub use color::{color_code, RESET_CODE};
pub use template::{Field, Template};

use crate::error::{LoggingError, Result};
use crate::record::Record;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

/// Default message template
pub const DEFAULT_FORMAT: &str = "{asctime} - {name} - {levelname:<8} - {message}";

/// Default date template
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Construction options for a [`Formatter`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterOptions {
    /// Message template
    pub fmt: String,

    /// Date template for `{asctime}`
    pub datefmt: String,

    /// Inject severity colors
    pub color: bool,
}

impl Default for FormatterOptions {
    fn default() -> Self {
        Self {
            fmt: DEFAULT_FORMAT.to_string(),
            datefmt: DEFAULT_DATE_FORMAT.to_string(),
            color: false,
        }
    }
}

impl FormatterOptions {
    /// Options with the given template and default date template
    pub fn new(fmt: impl Into<String>) -> Self {
        Self {
            fmt: fmt.into(),
            ..Self::default()
        }
    }

    pub fn with_datefmt(mut self, datefmt: impl Into<String>) -> Self {
        self.datefmt = datefmt.into();
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

/// Renders records into lines
#[derive(Debug, Clone, PartialEq)]
pub struct Formatter {
    options: FormatterOptions,
    template: Template,
    open_line: bool,
    close_line: bool,
}

impl Formatter {
    /// Build a formatter, validating both templates
    pub fn new(options: FormatterOptions) -> Result<Self> {
        let template = Template::parse(&options.fmt)?;
        validate_datefmt(&options.datefmt)?;

        // Missing markers are supplied at the line edges so color never leaks
        let open_line = options.color && !template.uses(Field::ColorOn);
        let close_line = options.color && !template.uses(Field::ColorOff);

        Ok(Self {
            options,
            template,
            open_line,
            close_line,
        })
    }

    /// Build a formatter from a template alone
    pub fn from_template(fmt: impl Into<String>) -> Result<Self> {
        Self::new(FormatterOptions::new(fmt))
    }

    pub fn options(&self) -> &FormatterOptions {
        &self.options
    }

    pub fn color(&self) -> bool {
        self.options.color
    }

    /// Render a record into a single line, without a trailing newline
    pub fn format(&self, record: &Record) -> String {
        let markers = color::markers(record.level, self.options.color);
        let line = self
            .template
            .render(record, &self.options.datefmt, markers);

        if markers.0.is_empty() {
            return line;
        }
        let open = if self.open_line { markers.0 } else { "" };
        let close = if self.close_line { markers.1 } else { "" };
        format!("{}{}{}", open, line, close)
    }
}

fn validate_datefmt(datefmt: &str) -> Result<()> {
    if StrftimeItems::new(datefmt).any(|item| matches!(item, Item::Error)) {
        return Err(LoggingError::invalid_value(format!(
            "invalid date template: '{}'",
            datefmt
        )));
    }
    Ok(())
}
