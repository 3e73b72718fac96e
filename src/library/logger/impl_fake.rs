use crate::library::logger::interface::{join_namespace, Level, Logger};
use std::sync::{Arc, Mutex};

/// Records every line in memory; namespaced children share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct LoggerFake {
    namespace: Option<String>,
    lines: Arc<Mutex<Vec<(Level, String)>>>,
}

impl LoggerFake {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn lines(&self) -> Vec<(Level, String)> {
        match self.lines.lock() {
            Ok(lines) => lines.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    #[allow(dead_code)]
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.lines()
            .iter()
            .any(|(l, line)| *l == level && line.contains(needle))
    }
}

impl Logger for LoggerFake {
    fn log(&self, level: Level, message: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let line = match &self.namespace {
            Some(namespace) => format!("{}: {}", namespace, message),
            None => message.to_string(),
        };
        let mut lines = match self.lines.lock() {
            Ok(lines) => lines,
            Err(poisoned) => poisoned.into_inner(),
        };
        lines.push((level, line));
        Ok(())
    }

    fn with_namespace(&self, namespace: &str) -> Arc<dyn Logger + Send + Sync> {
        Arc::new(LoggerFake {
            namespace: Some(join_namespace(self.namespace.as_deref(), namespace)),
            lines: self.lines.clone(),
        })
    }
}
