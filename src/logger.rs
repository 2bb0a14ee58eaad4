// file: src/logger.rs
// version: 1.0.0
// guid: db361126-8a7b-402e-9622-0a2ad363a8e3

//! Named logger dispatching records to its handlers

use crate::handler::Handler;
use crate::level::Level;
use crate::record::Record;
use std::sync::{Arc, Mutex, PoisonError, RwLock};

/// Name reported for the root logger
pub const ROOT_LOGGER_NAME: &str = "root";

/// A named logger with an ordered list of handlers
#[derive(Debug)]
pub struct Logger {
    name: Option<String>,
    level: RwLock<Level>,
    handlers: Mutex<Vec<Arc<Handler>>>,
}

impl Logger {
    /// Create a logger; `None` creates a root logger
    pub fn new(name: Option<&str>) -> Self {
        Self {
            name: name.filter(|n| !n.is_empty()).map(str::to_string),
            level: RwLock::new(Level::Warning),
            handlers: Mutex::new(Vec::new()),
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(ROOT_LOGGER_NAME)
    }

    pub fn is_root(&self) -> bool {
        self.name.is_none()
    }

    pub fn level(&self) -> Level {
        *self.level.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn set_level(&self, level: Level) {
        *self.level.write().unwrap_or_else(PoisonError::into_inner) = level;
    }

    pub fn is_enabled_for(&self, level: Level) -> bool {
        level >= self.level()
    }

    pub fn add_handler(&self, handler: Arc<Handler>) {
        self.handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(handler);
    }

    /// Snapshot of the attached handlers
    pub fn handlers(&self) -> Vec<Arc<Handler>> {
        self.handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn has_handlers(&self) -> bool {
        !self
            .handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    pub fn clear_handlers(&self) {
        self.handlers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Dispatch a record to every handler
    ///
    /// Write failures are reported on stderr and never reach the caller.
    pub fn handle(&self, record: &Record) {
        if !self.is_enabled_for(record.level) {
            return;
        }
        for handler in self.handlers() {
            if let Err(e) = handler.emit(record) {
                eprintln!(
                    "--- Logging error in {} handler of '{}': {}",
                    handler.kind(),
                    self.name(),
                    e
                );
            }
        }
    }

    pub fn log(&self, level: Level, message: impl Into<String>) {
        if self.is_enabled_for(level) {
            self.handle(&Record::new(self.name(), level, message));
        }
    }

    pub fn trace(&self, message: impl Into<String>) {
        self.log(Level::Trace, message);
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.log(Level::Debug, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.log(Level::Info, message);
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.log(Level::Warning, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.log(Level::Error, message);
    }

    pub fn critical(&self, message: impl Into<String>) {
        self.log(Level::Critical, message);
    }

    pub fn flush(&self) {
        for handler in self.handlers() {
            if let Err(e) = handler.flush() {
                eprintln!("--- Logging error flushing '{}': {}", self.name(), e);
            }
        }
    }
}
