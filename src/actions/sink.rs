//! Destinations for the lines actions produce.

use std::sync::{Arc, Mutex, PoisonError};

/// Receives the observable output of actions.
pub trait OutputSink: Send + Sync {
    fn emit(&self, line: &str);
}

impl<T: OutputSink + ?Sized> OutputSink for Arc<T> {
    fn emit(&self, line: &str) {
        (**self).emit(line)
    }
}

/// Sends every line to `tracing` at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl OutputSink for TracingSink {
    fn emit(&self, line: &str) {
        tracing::info!(target: "session_machine::output", "{line}");
    }
}

/// Keeps every line in memory. Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines emitted so far, oldest first.
    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove and return the lines emitted so far.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl OutputSink for RecordingSink {
    fn emit(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
    }
}
