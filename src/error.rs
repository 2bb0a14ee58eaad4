// file: src/error.rs
// version: 1.0.0
// guid: 1638b891-cf0c-4c28-b448-7168c2b74af9

use thiserror::Error;

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, LoggingError>;

/// Error types raised while configuring loggers
#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Handler type error: {0}")]
    HandlerType(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Failed to create logger: {0}")]
    CreateLogger(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl LoggingError {
    /// Create a new settings error
    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }

    /// Create a new handler type error
    pub fn handler_type(msg: impl Into<String>) -> Self {
        Self::HandlerType(msg.into())
    }

    /// Create a new invalid value error
    pub fn invalid_value(msg: impl Into<String>) -> Self {
        Self::InvalidValue(msg.into())
    }

    /// Create a new logger creation error
    pub fn create_logger(msg: impl Into<String>) -> Self {
        Self::CreateLogger(msg.into())
    }
}
