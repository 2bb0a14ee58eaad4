// file: src/settings/loader.rs
// version: 1.0.0
// guid: 9a141225-fea0-4d02-8f84-075523199e9e

//! Resolving where default settings come from

use super::DefaultSettings;
use crate::error::{LoggingError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming a settings file used instead of the bundled one
pub const SETTINGS_ENV_VAR: &str = "CUSTOM_LOGGING_SETTINGS";

/// Source of the default settings document
#[derive(Debug, Clone, Default)]
pub enum SettingsSource {
    /// The document bundled with the crate
    #[default]
    Bundled,
    /// A YAML, JSON or TOML file, chosen by extension (YAML otherwise)
    Path(PathBuf),
    /// An already parsed document
    Inline(DefaultSettings),
}

impl SettingsSource {
    /// File named by `CUSTOM_LOGGING_SETTINGS` when set, bundled defaults otherwise
    pub fn from_env() -> Self {
        match std::env::var_os(SETTINGS_ENV_VAR) {
            Some(path) if !path.is_empty() => SettingsSource::Path(PathBuf::from(path)),
            _ => SettingsSource::Bundled,
        }
    }

    /// Load the settings this source refers to
    pub fn load(self) -> Result<DefaultSettings> {
        match self {
            SettingsSource::Bundled => DefaultSettings::bundled().map_err(|e| {
                LoggingError::settings(format!("Failed to parse bundled settings: {}", e))
            }),
            SettingsSource::Path(path) => load_settings_file(&path),
            SettingsSource::Inline(settings) => Ok(settings),
        }
    }
}

impl From<PathBuf> for SettingsSource {
    fn from(path: PathBuf) -> Self {
        SettingsSource::Path(path)
    }
}

impl From<&Path> for SettingsSource {
    fn from(path: &Path) -> Self {
        SettingsSource::Path(path.to_path_buf())
    }
}

impl From<DefaultSettings> for SettingsSource {
    fn from(settings: DefaultSettings) -> Self {
        SettingsSource::Inline(settings)
    }
}

/// Load a settings file; missing or malformed files are settings errors
pub fn load_settings_file<P: AsRef<Path>>(path: P) -> Result<DefaultSettings> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(LoggingError::settings(format!(
            "Specified default settings file does not exist: {}",
            path.display()
        )));
    }

    let content = fs::read_to_string(path).map_err(|e| {
        LoggingError::settings(format!(
            "Failed to read settings file {}: {}",
            path.display(),
            e
        ))
    })?;

    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase());
    let parsed = match extension.as_deref() {
        Some("json") => DefaultSettings::from_json_str(&content),
        Some("toml") => DefaultSettings::from_toml_str(&content),
        _ => DefaultSettings::from_yaml_str(&content),
    };

    let settings = parsed.map_err(|e| {
        LoggingError::settings(format!(
            "Failed to parse settings file {}: {}",
            path.display(),
            e
        ))
    })?;

    debug!("Loaded default logging settings from {}", path.display());
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::HandlerKind;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    #[test]
    fn test_load_yaml_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
stream:
  stream: stderr
  level: info
formatter:
  basic:
    fmt: "{{levelname}} {{message}}"
  stream:
    color: true
"#
        )
        .unwrap();

        let settings = load_settings_file(file.path()).unwrap();
        let stream = settings.stream.clone().unwrap();
        assert_eq!(stream.level, crate::level::Level::Info);

        let options = settings.formatter_options(HandlerKind::Stream);
        assert_eq!(options.fmt, "{levelname} {message}");
        assert!(options.color);
    }

    #[test]
    fn test_load_json_file_by_extension() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"formatter": {{"basic": {{"fmt": "{{message}}"}}}}}}"#).unwrap();

        let settings = load_settings_file(file.path()).unwrap();
        assert_eq!(settings.formatter.basic.fmt, "{message}");
    }

    #[test]
    fn test_missing_file() {
        let err = load_settings_file("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, LoggingError::Settings(_)));
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn test_malformed_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "formatter: [not, a, mapping").unwrap();

        let err = load_settings_file(file.path()).unwrap_err();
        assert!(matches!(err, LoggingError::Settings(_)));
        assert!(err.to_string().contains("Failed to parse settings file"));
    }

    #[test]
    fn test_sources() {
        assert!(SettingsSource::Bundled.load().is_ok());

        let inline = DefaultSettings::default();
        let loaded = SettingsSource::from(inline.clone()).load().unwrap();
        assert_eq!(loaded, inline);
    }
}
