// file: src/record.rs
// version: 1.0.0
// guid: dd98df6e-fd18-45dc-a07f-4d6e4526d9fd

//! A single log event as handed to handlers

use crate::level::Level;
use chrono::{DateTime, Local};

/// Log record passed from a logger to its handlers
#[derive(Debug, Clone)]
pub struct Record {
    /// Name of the emitting logger (`root` for the root logger)
    pub logger: String,
    pub level: Level,
    pub message: String,
    pub created: DateTime<Local>,
    /// Name of the emitting thread, or its id when unnamed
    pub thread: String,
    pub process: u32,
    pub module: Option<String>,
    pub file: Option<String>,
    pub line: Option<u32>,
}

impl Record {
    /// Create a record stamped with the current time and thread
    pub fn new(logger: impl Into<String>, level: Level, message: impl Into<String>) -> Self {
        let current = std::thread::current();
        let thread = match current.name() {
            Some(name) => name.to_string(),
            None => format!("{:?}", current.id()),
        };

        Self {
            logger: logger.into(),
            level,
            message: message.into(),
            created: Local::now(),
            thread,
            process: std::process::id(),
            module: None,
            file: None,
            line: None,
        }
    }

    /// Attach source location details
    pub fn with_location(
        mut self,
        module: Option<&str>,
        file: Option<&str>,
        line: Option<u32>,
    ) -> Self {
        self.module = module.map(str::to_string);
        self.file = file.map(str::to_string);
        self.line = line;
        self
    }

    /// Override the creation timestamp
    pub fn at(mut self, created: DateTime<Local>) -> Self {
        self.created = created;
        self
    }

    /// Millisecond part of the creation timestamp
    pub fn msecs(&self) -> u32 {
        self.created.timestamp_subsec_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_record_defaults() {
        let record = Record::new("app", Level::Info, "hello");
        assert_eq!(record.logger, "app");
        assert_eq!(record.level, Level::Info);
        assert_eq!(record.process, std::process::id());
        assert!(record.line.is_none());
    }

    #[test]
    fn test_msecs() {
        let created = Local
            .with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
            .unwrap()
            + chrono::Duration::milliseconds(42);
        let record = Record::new("app", Level::Debug, "x").at(created);
        assert_eq!(record.msecs(), 42);
    }
}
