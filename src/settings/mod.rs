// file: src/settings/mod.rs
// version: 1.0.0
// guid: 64580b23-bf4e-4e5f-933e-1a5dac8d932b

//! Default settings document
//!
//! Maps each handler kind to its constructor options and carries a
//! formatter section with a `basic` entry plus partial per-kind overrides.

pub mod loader;

pub use loader::{load_settings_file, SettingsSource, SETTINGS_ENV_VAR};

use crate::error::{LoggingError, Result};
use crate::formatter::{Formatter, FormatterOptions};
use crate::handler::{ConsoleStream, FileMode, Handler, HandlerKind, When};
use crate::level::Level;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Settings document shipped with the crate
pub const BUNDLED_SETTINGS: &str = include_str!("default_settings.yaml");

fn default_level() -> Level {
    Level::Debug
}

fn default_interval() -> u32 {
    1
}

/// Defaults for stream handlers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StreamSettings {
    #[serde(default)]
    pub stream: ConsoleStream,

    #[serde(default = "default_level")]
    pub level: Level,
}

/// Defaults for plain file handlers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileSettings {
    pub filename: PathBuf,

    #[serde(default)]
    pub mode: FileMode,

    #[serde(default = "default_level")]
    pub level: Level,
}

/// Defaults for time-rotated file handlers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RotatingFileSettings {
    pub filename: PathBuf,

    #[serde(default)]
    pub when: When,

    #[serde(default = "default_interval")]
    pub interval: u32,

    /// Number of dated backups kept; 0 keeps all
    #[serde(default)]
    pub backup_count: usize,

    #[serde(default = "default_level")]
    pub level: Level,
}

/// Partial formatter options; set fields replace the base value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormatterOverride {
    pub fmt: Option<String>,
    pub datefmt: Option<String>,
    pub color: Option<bool>,
}

impl FormatterOverride {
    /// Field-by-field override of `base`
    pub fn apply(&self, base: &FormatterOptions) -> FormatterOptions {
        FormatterOptions {
            fmt: self.fmt.clone().unwrap_or_else(|| base.fmt.clone()),
            datefmt: self.datefmt.clone().unwrap_or_else(|| base.datefmt.clone()),
            color: self.color.unwrap_or(base.color),
        }
    }
}

/// Formatter defaults: a basic entry and per-kind overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormatterSection {
    pub basic: FormatterOptions,

    #[serde(default)]
    pub stream: Option<FormatterOverride>,

    #[serde(default)]
    pub file: Option<FormatterOverride>,

    #[serde(default)]
    pub rotating_file: Option<FormatterOverride>,
}

impl FormatterSection {
    pub fn override_for(&self, kind: HandlerKind) -> Option<&FormatterOverride> {
        match kind {
            HandlerKind::Stream => self.stream.as_ref(),
            HandlerKind::File => self.file.as_ref(),
            HandlerKind::RotatingFile => self.rotating_file.as_ref(),
        }
    }
}

/// Parsed default settings document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefaultSettings {
    #[serde(default)]
    pub stream: Option<StreamSettings>,

    #[serde(default)]
    pub file: Option<FileSettings>,

    #[serde(default)]
    pub rotating_file: Option<RotatingFileSettings>,

    pub formatter: FormatterSection,
}

impl DefaultSettings {
    /// Settings from the document bundled with the crate
    pub fn bundled() -> Result<Self> {
        Self::from_yaml_str(BUNDLED_SETTINGS)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Formatter options for a handler kind: its override applied over `basic`
    pub fn formatter_options(&self, kind: HandlerKind) -> FormatterOptions {
        match self.formatter.override_for(kind) {
            Some(overrides) => overrides.apply(&self.formatter.basic),
            None => self.formatter.basic.clone(),
        }
    }

    /// Default formatter for a handler kind
    pub fn formatter_for(&self, kind: HandlerKind) -> Result<Formatter> {
        Formatter::new(self.formatter_options(kind)).map_err(|e| {
            LoggingError::settings(format!("invalid default formatter for {}: {}", kind, e))
        })
    }

    /// Construct a handler of `kind` from its default options
    pub fn build_handler(&self, kind: HandlerKind) -> Result<Handler> {
        let missing = || {
            LoggingError::settings(format!(
                "no default settings found for handler kind: {}",
                kind
            ))
        };

        let handler = match kind {
            HandlerKind::Stream => {
                let stream = self.stream.as_ref().ok_or_else(missing)?;
                Handler::stream(stream.stream).with_level(stream.level)
            }
            HandlerKind::File => {
                let file = self.file.as_ref().ok_or_else(missing)?;
                Handler::file(&file.filename, file.mode)?.with_level(file.level)
            }
            HandlerKind::RotatingFile => {
                let rotating = self.rotating_file.as_ref().ok_or_else(missing)?;
                Handler::rotating_file(
                    &rotating.filename,
                    rotating.when,
                    rotating.interval,
                    rotating.backup_count,
                )?
                .with_level(rotating.level)
            }
        };
        Ok(handler)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_bundled_settings_parse() {
        let settings = DefaultSettings::bundled().unwrap();
        assert_eq!(settings.stream.as_ref().unwrap().stream, ConsoleStream::Stdout);
        assert_eq!(settings.rotating_file.as_ref().unwrap().backup_count, 7);
        assert_eq!(settings.rotating_file.as_ref().unwrap().when, When::Midnight);

        for kind in HandlerKind::ALL {
            assert!(settings.formatter_for(kind).is_ok(), "{}", kind);
        }
    }

    #[test]
    fn test_override_is_field_by_field() {
        let settings = DefaultSettings::bundled().unwrap();
        let basic = settings.formatter.basic.clone();

        let file = settings.formatter_options(HandlerKind::File);
        assert_eq!(file.fmt, basic.fmt);
        assert_eq!(file.datefmt, basic.datefmt);
        assert!(!file.color);

        let stream = settings.formatter_options(HandlerKind::Stream);
        assert_ne!(stream.fmt, basic.fmt);
        assert_eq!(stream.datefmt, "%H:%M:%S");
        assert!(stream.color);
    }

    #[test]
    fn test_missing_kind_falls_back_to_basic_formatter() {
        let settings = DefaultSettings::from_yaml_str(
            r#"
formatter:
  basic:
    fmt: "{levelname}: {message}"
"#,
        )
        .unwrap();

        let options = settings.formatter_options(HandlerKind::RotatingFile);
        assert_eq!(options.fmt, "{levelname}: {message}");
        assert_eq!(options.datefmt, crate::formatter::DEFAULT_DATE_FORMAT);
    }

    #[test]
    fn test_missing_handler_section_is_settings_error() {
        let settings = DefaultSettings::from_yaml_str("formatter:\n  basic: {}\n").unwrap();
        let err = settings.build_handler(HandlerKind::File).unwrap_err();
        assert!(matches!(err, LoggingError::Settings(_)));
        assert!(err.to_string().contains("handler kind: file"));
    }

    #[test]
    fn test_invalid_default_formatter_is_settings_error() {
        let settings =
            DefaultSettings::from_yaml_str("formatter:\n  basic:\n    fmt: \"{nope}\"\n").unwrap();
        let err = settings.formatter_for(HandlerKind::Stream).unwrap_err();
        assert!(matches!(err, LoggingError::Settings(_)));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let result = DefaultSettings::from_yaml_str(
            "socket: {}\nformatter:\n  basic: {}\n",
        );
        assert!(matches!(result, Err(LoggingError::Yaml(_))));
    }

    #[test]
    fn test_build_file_handler_from_settings() {
        let temp_dir = TempDir::new().unwrap();
        let mut settings = DefaultSettings::bundled().unwrap();
        let filename = temp_dir.path().join("defaults.log");
        settings.file = Some(FileSettings {
            filename: filename.clone(),
            mode: FileMode::Truncate,
            level: Level::Warning,
        });

        let handler = settings.build_handler(HandlerKind::File).unwrap();
        assert_eq!(handler.kind(), HandlerKind::File);
        assert_eq!(handler.level(), Level::Warning);
        assert!(!handler.has_formatter());
        assert!(filename.exists());
    }

    #[test]
    fn test_json_and_toml_documents() {
        let json = r#"{"stream": {"stream": "stderr"}, "formatter": {"basic": {"color": true}}}"#;
        let settings = DefaultSettings::from_json_str(json).unwrap();
        assert_eq!(settings.stream.unwrap().stream, ConsoleStream::Stderr);
        assert!(settings.formatter.basic.color);

        let toml = "[stream]\nlevel = \"warning\"\n\n[formatter.basic]\nfmt = \"{message}\"\n";
        let settings = DefaultSettings::from_toml_str(toml).unwrap();
        assert_eq!(settings.stream.unwrap().level, Level::Warning);
        assert_eq!(settings.formatter.basic.fmt, "{message}");
    }
}
