// file: src/registry.rs
// version: 1.0.0
// guid: 1cdd81fb-9ad8-47d2-a049-9192e80bdec8

//! Caller-owned registry of named loggers

use crate::logger::Logger;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Registry handing out one shared [`Logger`] per name
#[derive(Debug)]
pub struct LoggerRegistry {
    root: Arc<Logger>,
    loggers: Mutex<HashMap<String, Arc<Logger>>>,
}

impl LoggerRegistry {
    pub fn new() -> Self {
        Self {
            root: Arc::new(Logger::new(None)),
            loggers: Mutex::new(HashMap::new()),
        }
    }

    pub fn root(&self) -> Arc<Logger> {
        Arc::clone(&self.root)
    }

    /// Get or create a logger; `None` or an empty name is the root logger
    pub fn get_logger(&self, name: Option<&str>) -> Arc<Logger> {
        match name {
            None | Some("") => self.root(),
            Some(name) => {
                let mut loggers = self.loggers.lock().unwrap_or_else(PoisonError::into_inner);
                Arc::clone(
                    loggers
                        .entry(name.to_string())
                        .or_insert_with(|| Arc::new(Logger::new(Some(name)))),
                )
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.loggers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Names of the non-root loggers, sorted
    pub fn logger_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .loggers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_same_logger() {
        let registry = LoggerRegistry::new();
        let a = registry.get_logger(Some("app"));
        let b = registry.get_logger(Some("app"));
        assert!(Arc::ptr_eq(&a, &b));
        assert!(registry.contains("app"));
    }

    #[test]
    fn test_root_logger() {
        let registry = LoggerRegistry::new();
        let root = registry.get_logger(None);
        assert!(root.is_root());
        assert!(Arc::ptr_eq(&root, &registry.get_logger(Some(""))));
        assert!(registry.logger_names().is_empty());
    }

    #[test]
    fn test_registries_are_independent() {
        let first = LoggerRegistry::new();
        let second = LoggerRegistry::new();
        assert!(!Arc::ptr_eq(
            &first.get_logger(Some("app")),
            &second.get_logger(Some("app"))
        ));
    }

    #[test]
    fn test_logger_names_sorted() {
        let registry = LoggerRegistry::new();
        registry.get_logger(Some("zeta"));
        registry.get_logger(Some("alpha"));
        assert_eq!(registry.logger_names(), vec!["alpha", "zeta"]);
    }
}
