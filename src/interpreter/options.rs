//! Interpreter configuration.

use serde::{Deserialize, Serialize};

/// History entries kept by default before the oldest are dropped.
pub const DEFAULT_MAX_HISTORY: usize = 1024;

/// Options fixed when an interpreter is created.
///
/// Deserializable so hosts can keep them in their own config files;
/// missing fields take their defaults.
///
/// History is bounded by default. A long-lived session with
/// `max_history: None` keeps every taken transition in memory and in its
/// checkpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterpreterOptions {
    /// Record taken transitions in the interpreter's history.
    #[serde(default = "default_record_history")]
    pub record_history: bool,

    /// Keep at most this many history entries, dropping the oldest.
    /// `None` means no limit.
    #[serde(default = "default_max_history")]
    pub max_history: Option<usize>,
}

fn default_record_history() -> bool {
    true
}

fn default_max_history() -> Option<usize> {
    Some(DEFAULT_MAX_HISTORY)
}

impl Default for InterpreterOptions {
    fn default() -> Self {
        Self {
            record_history: default_record_history(),
            max_history: default_max_history(),
        }
    }
}

impl InterpreterOptions {
    pub fn record_history(mut self, enabled: bool) -> Self {
        self.record_history = enabled;
        self
    }

    pub fn max_history(mut self, limit: usize) -> Self {
        self.max_history = Some(limit);
        self
    }

    /// Keep every history entry for the life of the session.
    pub fn unbounded_history(mut self) -> Self {
        self.max_history = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let options: InterpreterOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, InterpreterOptions::default());
        assert!(options.record_history);
        assert_eq!(options.max_history, Some(DEFAULT_MAX_HISTORY));
    }

    #[test]
    fn explicit_null_lifts_the_limit() {
        let options: InterpreterOptions =
            serde_json::from_str(r#"{"max_history": null}"#).unwrap();
        assert_eq!(options.max_history, None);
    }

    #[test]
    fn fluent_setters() {
        let options = InterpreterOptions::default()
            .record_history(false)
            .max_history(8);
        assert!(!options.record_history);
        assert_eq!(options.max_history, Some(8));
        assert_eq!(options.unbounded_history().max_history, None);
    }
}
